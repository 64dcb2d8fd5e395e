// Wrapping errors as they travel up the call stack
//
// Every wrap records the frame it happened in, so the verbose rendering shows
// the path the error took. Run with STACKCAUSE_FRAMES=skip_std,short to hide
// standard library frames and shorten the function names.

use std::io;

use stackcause::{
    hooks::{
        FramePolicy,
        frame_filter::{AllowFrame, SkipRustSrc},
        name_formatter::OnlyFunctionName,
    },
    identity,
    prelude::*,
};

#[derive(Clone, Debug, thiserror::Error)]
#[error("row {row}: expected {expected} columns")]
struct ParseError {
    row: usize,
    expected: usize,
}

fn read_rows(path: &str) -> Result<String, StackError> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("reading {path}"))
}

fn parse_rows(text: &str) -> Result<usize, StackError> {
    for (row, line) in text.lines().enumerate() {
        if line.split(',').count() != 3 {
            return Err(StackError::wrap(
                ParseError { row, expected: 3 },
                "malformed input",
            ));
        }
    }
    Ok(text.lines().count())
}

fn import(path: &str) -> Result<usize, StackError> {
    let text = match read_rows(path) {
        Ok(text) => text,
        // Fall back to inline data so the example has something to parse.
        Err(error) if !identity::contains_type::<io::Error>(&error) => return Err(error),
        Err(_) => "a,b,c\nd,e\n".to_owned(),
    };
    let rows = parse_rows(&text).wrap_err("importing rows")?;
    Ok(rows)
}

fn main() {
    let error = match import("/does/not/exist.csv") {
        Ok(rows) => {
            println!("Imported {rows} rows");
            return;
        }
        Err(error) => error,
    };

    println!("Example 1: Message chain\n");
    println!("{error}\n");

    println!("Example 2: Chain with frames\n");
    println!("{error:#}\n");

    println!("Example 3: Explicit frame policy\n");
    let policy = FramePolicy::new()
        .filter(SkipRustSrc(AllowFrame))
        .name_formatter(OnlyFunctionName);
    println!("{}\n", error.display_with(&policy));

    println!("Example 4: Finding the cause by type\n");
    if let Some(parse_error) = identity::extract::<ParseError>(&error) {
        println!("Bad row {} ({parse_error})", parse_error.row);
    }
}
