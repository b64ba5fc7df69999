use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineReaderError {
    #[error("{0}")]
    Error(String),

    #[error("Line is too long: {length} bytes exceeds limit of {limit}")]
    LineTooLong { length: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
