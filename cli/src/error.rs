#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use blocwrap_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Error raised by the core library (configuration, manifest).
    #[display("{}", _0)]
    Core(AppError),

    /// Some files ended in an error state.
    #[from(ignore)]
    #[display("{} file(s) could not be processed", _0)]
    FilesFailed(usize),

    /// `check` found files that still need wrapping.
    #[from(ignore)]
    #[display("{} file(s) need wrapping", _0)]
    PendingChanges(usize),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` holds a `String`, which does not implement
/// `std::error::Error`, so `source()` cannot be derived.
impl std::error::Error for CliError {}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::PendingChanges(_) => 1,
            CliError::FilesFailed(_) => 2,
            CliError::Io(_) | CliError::Core(_) | CliError::General(_) => 3,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let err: CliError = AppError::Config("bad window".into()).into();
        assert_eq!(err.to_string(), "Config Error: bad window");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_batch_exit_codes_differ() {
        assert_eq!(CliError::PendingChanges(2).exit_code(), 1);
        assert_eq!(CliError::FilesFailed(1).exit_code(), 2);
        assert_eq!(
            CliError::FilesFailed(1).to_string(),
            "1 file(s) could not be processed"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: CliError = io.into();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.to_string(), "IO Error: closed");
        assert_eq!(err.exit_code(), 3);
    }
}
