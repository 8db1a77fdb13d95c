//! Error types for the remote model worker

use thiserror::Error;

/// Remote worker specific errors
#[derive(Error, Debug)]
pub enum RemoteTTSError {
    /// Transport failure talking to the worker
    #[error("Request to model worker failed: {0}\nRoute: {1}\nSuggestion: Check --backend-url and that the worker is running")]
    Transport(reqwest::Error, String),

    /// Worker answered with a non-success status
    #[error("Model worker returned status {0}\nRoute: {1}\nBody: {2}")]
    Status(u16, String, String),

    /// Worker answer could not be decoded
    #[error("Malformed model worker response: {0}\nRoute: {1}")]
    Decode(String, String),

    /// Worker produced audio the demo cannot play back
    #[error("Unexpected waveform: {0}")]
    Waveform(String),

    /// Worker could not find the pretrained assets
    #[error("Pretrained model not found at {0}\nDetails: {1}")]
    ModelNotFound(String, String),
}

impl RemoteTTSError {
    pub fn transport(err: reqwest::Error, route: impl Into<String>) -> Self {
        Self::Transport(err, route.into())
    }

    pub fn decode(msg: impl Into<String>, route: impl Into<String>) -> Self {
        Self::Decode(msg.into(), route.into())
    }
}

/// Result type for remote worker operations
pub type Result<T> = std::result::Result<T, RemoteTTSError>;

// Conversion to parent crate's TTSError
impl From<RemoteTTSError> for crate::TTSError {
    fn from(err: RemoteTTSError) -> Self {
        match err {
            RemoteTTSError::Transport(e, route) => crate::TTSError::ProviderError(
                format!("{} (route: {})", e, route),
                "remote".to_string(),
            ),
            RemoteTTSError::Status(status, route, body) => crate::TTSError::ProviderError(
                format!("status {} from {}: {}", status, route, body),
                "remote".to_string(),
            ),
            RemoteTTSError::Decode(msg, route) => crate::TTSError::InvalidResponse(
                format!("{} (route: {})", msg, route),
                "remote".to_string(),
            ),
            RemoteTTSError::Waveform(msg) => {
                crate::TTSError::InvalidResponse(msg, "remote".to_string())
            }
            RemoteTTSError::ModelNotFound(path, details) => {
                crate::TTSError::ModelNotFound(details, path)
            }
        }
    }
}
