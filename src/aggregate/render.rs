use std::{borrow::Cow, error::Error, fmt};

use crate::{ErrorAggregate, ErrorList, SharedError, StackError, hooks::FramePolicy};

/// Writes the text of every item, one per line.
pub(crate) fn write_text(f: &mut fmt::Formatter<'_>, items: &[SharedError]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str("\n")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Writes an `error #n` header followed by the verbose rendering of every
/// item.
pub(crate) fn write_verbose(
    f: &mut fmt::Formatter<'_>,
    items: &[SharedError],
    policy: &FramePolicy,
) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str("\n")?;
        }
        writeln!(f, "error #{}", index + 1)?;
        write_verbose_item(f, item.as_dyn(), policy)?;
    }
    Ok(())
}

/// Renders our own error types with `policy`. Any other error is rendered
/// with `{:#}`, which most errors treat the same as `{}`.
fn write_verbose_item(
    f: &mut fmt::Formatter<'_>,
    item: &(dyn Error + 'static),
    policy: &FramePolicy,
) -> fmt::Result {
    if let Some(error) = item.downcast_ref::<StackError>() {
        error.write_verbose(f, policy)
    } else if let Some(aggregate) = item.downcast_ref::<ErrorAggregate>() {
        write_verbose(f, &aggregate.errors(), policy)
    } else if let Some(list) = item.downcast_ref::<ErrorList>() {
        write_verbose(f, list.as_slice(), policy)
    } else {
        write!(f, "{item:#}")
    }
}

/// Verbose rendering of a set of items with an explicit policy.
pub(crate) struct VerboseItems<'a> {
    pub(crate) items: Cow<'a, [SharedError]>,
    pub(crate) policy: &'a FramePolicy,
}

impl fmt::Display for VerboseItems<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_verbose(f, &self.items, self.policy)
    }
}
