//! Error types module
//!
//! All failures of the paste-to-upload pipeline are unified under `PasteError`.
//! Variants follow the failure classes the tool distinguishes: configuration,
//! transport, protocol, unsupported reference, clipboard decoding and host errors.
//!
//! None of these cross into the host editor. The controller logs them at the
//! level reported by [`PasteError::log_level`] and leaves the block unchanged.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes like an unsupported paste
    Debug,
    /// Warning level - for failed uploads the user can retry by pasting again
    Warn,
    /// Error level - for broken setup or host failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Unsupported reference: {0}")]
    UnsupportedReference(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Host error: {0}")]
    Host(String),
}

impl PasteError {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            PasteError::Config(_) => "CONFIG_ERROR",
            PasteError::Transport(_) => "TRANSPORT_ERROR",
            PasteError::Protocol(_) => "PROTOCOL_ERROR",
            PasteError::UnsupportedReference(_) => "UNSUPPORTED_REFERENCE",
            PasteError::Decode(_) => "DECODE_ERROR",
            PasteError::Host(_) => "HOST_ERROR",
        }
    }

    /// Whether pasting again may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PasteError::Transport(_) | PasteError::Protocol(_) | PasteError::Host(_)
        )
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            PasteError::UnsupportedReference(_) => LogLevel::Debug,
            PasteError::Transport(_) | PasteError::Protocol(_) | PasteError::Decode(_) => {
                LogLevel::Warn
            }
            PasteError::Config(_) | PasteError::Host(_) => LogLevel::Error,
        }
    }

    /// Emit this error on the diagnostic channel at its own level.
    pub fn log(&self, context: &str) {
        match self.log_level() {
            LogLevel::Debug => {
                tracing::debug!(
                    code = self.error_code(),
                    recoverable = self.is_recoverable(),
                    error = %self,
                    "{}",
                    context
                )
            }
            LogLevel::Warn => {
                tracing::warn!(
                    code = self.error_code(),
                    recoverable = self.is_recoverable(),
                    error = %self,
                    "{}",
                    context
                )
            }
            LogLevel::Error => {
                tracing::error!(
                    code = self.error_code(),
                    recoverable = self.is_recoverable(),
                    error = %self,
                    "{}",
                    context
                )
            }
        }
    }
}

impl From<serde_json::Error> for PasteError {
    fn from(err: serde_json::Error) -> Self {
        PasteError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PasteError>;
