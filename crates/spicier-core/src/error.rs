//! Error types for spicier-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value '{0}'")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, Error>;
