//! Utility macros for the SPDY crate.

/// Returns early with an error if a condition is not met.
///
/// Works like `assert!`, but returns `Err($error)` instead of panicking, which
/// keeps the limit checks in the encoder on the error path.
///
/// # Example
///
/// ```ignore
/// ensure!(u32::try_from(name.len()).is_ok(), EncodeError::header_name_too_large(name.len()));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
