use std::error::Error;

/// Boxed error returned by a predicate that could not reach a verdict.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A check over arbitrary input data.
///
/// Predicates never inspect anything but the data they are handed.
/// Returning `Ok(false)` means the data violates the rule; returning
/// an error means the predicate itself failed and the error is
/// propagated to the caller of `apply` untouched.
///
/// Any `Fn(&T) -> bool` closure is a predicate. Closures that can fail
/// are wrapped in [`Fallible`].
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Evaluate the predicate against the data.
    fn evaluate(&self, data: &T) -> Result<bool, BoxError>;
}

impl<T, F> Predicate<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn evaluate(&self, data: &T) -> Result<bool, BoxError> {
        Ok(self(data))
    }
}

/// Adapter for closures that return `Result<bool, BoxError>`.
pub struct Fallible<F>(pub F);

impl<T, F> Predicate<T> for Fallible<F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<bool, BoxError> + Send + Sync,
{
    #[inline]
    fn evaluate(&self, data: &T) -> Result<bool, BoxError> {
        (self.0)(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Threshold {
        min: i64,
    }

    impl Predicate<i64> for Threshold {
        fn evaluate(&self, data: &i64) -> Result<bool, BoxError> {
            Ok(*data >= self.min)
        }
    }

    #[test]
    fn test_closure_is_predicate() {
        let is_even = |n: &i64| n % 2 == 0;

        assert!(is_even.evaluate(&4).unwrap());
        assert!(!is_even.evaluate(&5).unwrap());
    }

    #[test]
    fn test_struct_predicate() {
        let rule = Threshold { min: 10 };

        assert!(rule.evaluate(&10).unwrap());
        assert!(!rule.evaluate(&9).unwrap());
    }

    #[test]
    fn test_fallible_predicate_error() {
        let parse = Fallible(|s: &str| -> Result<bool, BoxError> { Ok(s.parse::<u32>()? > 3) });

        assert!(parse.evaluate("7").unwrap());
        assert!(!parse.evaluate("2").unwrap());
        assert!(parse.evaluate("seven").is_err());
    }
}
