//! Structured exit codes.

/// Exit codes for the dupfind application.
///
/// - 0: Success (the scan completed, whatever it found)
/// - 1: General error (missing argument, missing or non-directory root)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the scan completed and a summary was printed.
    Success = 0,
    /// General error: the scan could not start or an unexpected failure occurred.
    GeneralError = 1,
    /// Interrupted: Scan was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DF000",
            Self::GeneralError => "DF001",
            Self::Interrupted => "DF130",
        }
    }

    /// Exit code for an error that escaped [`crate::run_app`].
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err
            .downcast_ref::<crate::duplicates::FinderError>()
            .is_some_and(|e| matches!(e, crate::duplicates::FinderError::Interrupted))
        {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}
