use crate::{ErrorList, SharedError};

/// Extension methods for iterators over `Result` types to collect errors.
///
/// The standard library's [`Iterator::collect`] stops at the first error,
/// while [`collect_errors`](IteratorExt::collect_errors) keeps going and
/// gathers every error into an [`ErrorList`]:
///
/// ```rust
/// use stackcause::prelude::*;
///
/// let inputs = vec!["1", "2", "invalid", "4", "bad"];
///
/// // Standard collect stops at first error
/// let standard: Result<Vec<u8>, _> = inputs.iter().map(|s| s.parse::<u8>()).collect();
/// assert!(standard.is_err());
///
/// // collect_errors processes ALL items and collects ALL errors
/// let result: Result<Vec<u8>, ErrorList> = inputs
///     .into_iter()
///     .map(|s| s.parse::<u8>())
///     .collect_errors();
///
/// assert_eq!(result.map_err(|errors| errors.len()), Err(2));
/// ```
pub trait IteratorExt<A, E>: Sized + Iterator<Item = Result<A, E>> {
    /// Collects successful values into a `Vec`, or every error into an
    /// [`ErrorList`].
    ///
    /// Iteration always runs to the end. Once an error has been seen, the
    /// remaining `Ok` values are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcause::prelude::*;
    ///
    /// let values: Result<Vec<u8>, ErrorList> =
    ///     ["1", "2", "3"].into_iter().map(str::parse::<u8>).collect_errors();
    /// assert_eq!(values.ok(), Some(vec![1, 2, 3]));
    /// ```
    fn collect_errors(self) -> Result<Vec<A>, ErrorList>
    where
        E: Into<SharedError>;
}

impl<A, E, I> IteratorExt<A, E> for I
where
    I: Iterator<Item = Result<A, E>>,
{
    fn collect_errors(self) -> Result<Vec<A>, ErrorList>
    where
        E: Into<SharedError>,
    {
        let mut values = Vec::with_capacity(self.size_hint().0);
        let mut errors: Option<ErrorList> = None;

        for item in self {
            match item {
                Ok(value) if errors.is_none() => values.push(value),
                Ok(_) => {}
                Err(error) => errors.get_or_insert_with(ErrorList::new).add(error),
            }
        }

        match errors {
            Some(errors) => Err(errors),
            None => Ok(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StackError;

    #[test]
    fn test_all_ok() {
        let result = (0..5).map(Ok::<u32, StackError>).collect_errors();
        assert_eq!(result.ok(), Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_empty() {
        let result = core::iter::empty::<Result<u8, StackError>>().collect_errors();
        assert_eq!(result.ok(), Some(Vec::new()));
    }

    #[test]
    fn test_every_error_is_collected_in_order() {
        let result = (0..6)
            .map(|n| {
                if n % 2 == 0 {
                    Ok(n)
                } else {
                    Err(StackError::new(format!("{n} is odd")))
                }
            })
            .collect_errors();

        let errors = result.err().unwrap_or_default();
        assert_eq!(errors.to_string(), "1 is odd\n3 is odd\n5 is odd");
    }

    #[test]
    fn test_std_errors() {
        let result = ["1", "x", "3", "y"]
            .into_iter()
            .map(str::parse::<i32>)
            .collect_errors();

        let errors = result.err().unwrap_or_default();
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|error| error.downcast_ref::<core::num::ParseIntError>().is_some())
        );
    }
}
