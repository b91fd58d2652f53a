use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Serialization(#[from] bincode::Error),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("{}:{line}: {cause}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        cause: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, cause: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            cause: cause.into(),
        }
    }
}
