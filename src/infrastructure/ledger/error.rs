use thiserror::Error;

/// Errors from ledger reads
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node could not be reached or rejected the request.
    #[error("{method} failed: {message}")]
    Transport {
        method: &'static str,
        message: String,
    },

    /// The node answered with data that does not match the ABI.
    #[error("{method} returned undecodable data: {message}")]
    Decode {
        method: &'static str,
        message: String,
    },
}

impl LedgerError {
    pub fn transport(method: &'static str, err: impl std::fmt::Display) -> Self {
        LedgerError::Transport {
            method,
            message: err.to_string(),
        }
    }

    pub fn decode(method: &'static str, err: impl std::fmt::Display) -> Self {
        LedgerError::Decode {
            method,
            message: err.to_string(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
