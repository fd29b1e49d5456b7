//! Error types and handling for logger setup

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Logger factory already initialized")]
    AlreadyInitialized(),

    #[error("Invalid log level: {0}")]
    ParseLevel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
