use crate::core::EquationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("answer pool is empty")]
    EmptyPool,
    #[error("target {text:?} is not a valid equation: {source}")]
    InvalidTarget {
        text: String,
        #[source]
        source: EquationError,
    },
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
