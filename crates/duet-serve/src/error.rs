use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind to {0}: {1}")]
    BindError(String, std::io::Error),

    #[error("Server error: {0}")]
    ServerError(String),
}

pub type Result<T> = std::result::Result<T, ServeError>;
