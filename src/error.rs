use alloy_primitives::Address;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("out of bounds: {field} needs bytes {offset}..{end}, input has {len}")]
    OutOfBounds {
        field: &'static str,
        offset: usize,
        end: usize,
        len: usize,
    },

    #[error("invalid enum: {field} = {value}")]
    InvalidEnum { field: &'static str, value: u8 },

    #[error("trailing bytes: instruction is {expected} bytes, input has {len}")]
    TrailingBytes { expected: usize, len: usize },

    #[error("input amount must be positive")]
    ZeroAmount,

    #[error("funding failed for token {token}: {reason}")]
    FundingFailed { token: Address, reason: String },

    #[error("pool {pool} rejected swap: {reason}")]
    PoolRejected { pool: Address, reason: String },

    #[error("token {token} is not listed by the pool")]
    TokenNotInPool { token: Address },

    #[error("token index {index} does not fit in one byte")]
    IndexOverflow { index: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by an external collaborator (pool contract or transfer strategy).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct Revert {
    pub reason: String,
}

impl Revert {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
