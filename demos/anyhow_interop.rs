// Converting between stackcause and anyhow
//
// Run with: cargo run --example anyhow_interop --features compat-anyhow1

use stackcause::{compat::anyhow1::IntoAnyhow, prelude::*};

fn some_anyhow_function() -> anyhow::Result<String> {
    anyhow::bail!("connection failed");
}

// Calling anyhow code from stackcause
fn stackcause_calls_anyhow() -> Result<String, StackError> {
    let value = some_anyhow_function()
        .into_stackcause()
        .wrap_err("failed to get value")?;
    Ok(value)
}

fn some_stackcause_function() -> Result<String, SharedError> {
    bail!("validation failed");
}

// Calling stackcause code from anyhow
fn anyhow_calls_stackcause() -> anyhow::Result<String> {
    use anyhow::Context;

    let value = some_stackcause_function()
        .into_anyhow()
        .context("running validation")?;
    Ok(value)
}

// StackError implements Error, so `?` converts it directly
fn anyhow_uses_question_mark() -> anyhow::Result<String> {
    let value = stackcause_calls_anyhow()?;
    Ok(value)
}

fn main() {
    println!("Example 1: anyhow -> stackcause\n");
    if let Err(error) = stackcause_calls_anyhow() {
        println!("{error}\n");
    }

    println!("Example 2: stackcause -> anyhow\n");
    if let Err(error) = anyhow_calls_stackcause() {
        println!("{error:#}\n");
    }

    println!("Example 3: ? into anyhow\n");
    if let Err(error) = anyhow_uses_question_mark() {
        for (depth, cause) in error.chain().enumerate() {
            println!("{depth}: {cause}");
        }
    }
}
