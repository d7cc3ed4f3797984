//! Result type alias for Conduit
//!
//! This module provides a convenient Result type alias that uses ConduitError
//! as the error type.

use super::errors::ConduitError;

/// Result type alias for Conduit operations
///
/// # Examples
///
/// ```
/// use conduit::domain::result::Result;
/// use conduit::domain::errors::ConduitError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ConduitError::Mapping("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConduitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ConduitError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ConduitError::Mapping("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
