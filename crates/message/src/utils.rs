//! Utility macros shared by the message crate.

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// It is used by the validating mutators (`with_method`, `with_request_target`,
/// stream capability checks) to bail out before any state is copied.
///
/// # Example
///
/// ```ignore
/// ensure!(!target.contains(char::is_whitespace), ArgumentError::invalid_request_target(target));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
