use thiserror::Error;

/// Failure to resolve a key table query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("empty key query")]
    Empty,

    #[error("no key named {0:?}")]
    UnknownName(String),

    #[error("no key with code {0}")]
    UnknownCode(u32),
}
