//! Authorization error types.

use thiserror::Error;

/// Authorization errors.
///
/// Every variant is a deterministic rejection of one grant or one action;
/// none of them is retryable. This enum is marked `#[non_exhaustive]` to
/// allow adding new variants in future versions without breaking
/// downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A grant was created with no allowed principals.
    #[error("allowed list cannot be empty")]
    EmptyRestrictionList,

    /// An allowed-principal entry is not a valid account address.
    #[error("invalid address: {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// A payload to encode as an address is empty or too long.
    #[error("address payload must be 1 to {max} bytes, got {len}", max = crate::MAX_ADDRESS_LEN)]
    InvalidPayloadLength { len: usize },

    /// The action is not one of the kinds a grant understands.
    #[error("unrecognized action: {type_url}")]
    UnrecognizedAction { type_url: String },

    /// The action's relevant principal is not in the allowed list.
    #[error("address is not in the allowed list: {principal}")]
    PrincipalNotAllowed { principal: String },

    /// A grant could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl Error {
    pub(crate) fn invalid_address(address: &str, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
