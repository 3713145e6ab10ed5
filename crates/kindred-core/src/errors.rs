use thiserror::Error;

/// Result type alias using CompareError
pub type Result<T> = std::result::Result<T, CompareError>;

/// Canonical error kind taxonomy
///
/// The engine has exactly one recoverable failure class: a value that cannot
/// be inspected. Everything else the dispatcher encounters is either a normal
/// "not equal" verdict (shape mismatches, missing counterparts) or a fatal
/// resource-exhaustion condition surfaced by the runtime itself. Each kind
/// maps to a stable error code usable for programmatic handling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareErrorKind {
    /// A value on the comparison path could not be inspected (for example a
    /// `RefCell` that is mutably borrowed while the engine runs). This is
    /// distinct from "not equal": reporting unequal for a value the engine
    /// never saw would be misleading.
    Inaccessible,
}

impl CompareErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            CompareErrorKind::Inaccessible => "ERR_INACCESSIBLE",
        }
    }
}

/// Error taxonomy for deep-comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// A value on the comparison path could not be inspected
    #[error("value at `{path}` is inaccessible: {reason}")]
    Inaccessible { path: String, reason: String },
}

impl CompareError {
    /// Get the error kind
    pub fn kind(&self) -> CompareErrorKind {
        match self {
            CompareError::Inaccessible { .. } => CompareErrorKind::Inaccessible,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
