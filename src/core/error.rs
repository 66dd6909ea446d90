//! Error types for the engine

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink failure with the registry name
    #[error("sink '{name}' failed: {message}")]
    Sink { name: String, message: String },

    /// File sink error with path
    #[error("file sink error for '{path}': {message}")]
    FileSink { path: String, message: String },

    /// Dispatcher no longer accepts work
    #[error("dispatcher is not running")]
    DispatcherStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Create a sink error
    pub fn sink(name: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Sink {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::FileSink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EngineError::Other(msg.into())
    }
}
