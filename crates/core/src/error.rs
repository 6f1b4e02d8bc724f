//! Error types for Quorum Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid room code: {0}")]
    InvalidRoomCode(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Unknown corner: {0}")]
    UnknownCorner(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
