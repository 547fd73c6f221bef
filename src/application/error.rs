use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AqiError {
    #[error("series is empty")]
    EmptySeries,

    #[error("series has {len} entries, limit is {max}")]
    SeriesTooLong { len: usize, max: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
