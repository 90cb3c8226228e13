//! Account address decoding.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Human-readable prefix of account addresses on the default chain.
pub const DEFAULT_ACCOUNT_PREFIX: &str = "cosmos";

/// Longest address payload the chain accepts, in bytes.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Bech32 codec for account addresses with a fixed human-readable prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCodec {
    pub account_prefix: String,
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_PREFIX)
    }
}

impl AddressCodec {
    pub fn new(account_prefix: impl Into<String>) -> Self {
        Self {
            account_prefix: account_prefix.into(),
        }
    }

    /// Decode an account address into its raw payload.
    ///
    /// Only the classic bech32 checksum is accepted, and the bits left over
    /// after regrouping into bytes must be zero. Fails with
    /// [`Error::InvalidAddress`] naming `addr` if it is empty, not valid
    /// bech32, carries another prefix, or has a payload outside
    /// `1..=MAX_ADDRESS_LEN` bytes.
    pub fn decode(&self, addr: &str) -> Result<Vec<u8>> {
        if addr.trim().is_empty() {
            return Err(Error::invalid_address(addr, "empty address string is not allowed"));
        }

        let checked = CheckedHrpstring::new::<Bech32>(addr)
            .map_err(|e| Error::invalid_address(addr, e))?;

        let hrp = checked.hrp();
        if !hrp.as_str().eq_ignore_ascii_case(&self.account_prefix) {
            return Err(Error::invalid_address(
                addr,
                format!(
                    "expected prefix {}, got {}",
                    self.account_prefix,
                    hrp.as_str()
                ),
            ));
        }

        checked
            .validate_segwit_padding()
            .map_err(|e| Error::invalid_address(addr, e))?;

        let payload: Vec<u8> = checked.byte_iter().collect();
        match payload.len() {
            0 => Err(Error::invalid_address(addr, "addresses cannot be empty")),
            n if n > MAX_ADDRESS_LEN => Err(Error::invalid_address(
                addr,
                format!("address max length is {MAX_ADDRESS_LEN}, got {n}"),
            )),
            _ => Ok(payload),
        }
    }

    /// Encode a raw payload as an account address.
    pub fn encode(&self, payload: &[u8]) -> Result<String> {
        if payload.is_empty() || payload.len() > MAX_ADDRESS_LEN {
            return Err(Error::InvalidPayloadLength { len: payload.len() });
        }

        let hrp = Hrp::parse(&self.account_prefix).map_err(|e| {
            Error::Encoding(format!("invalid prefix {}: {e}", self.account_prefix))
        })?;
        bech32::encode::<Bech32>(hrp, payload).map_err(|e| Error::Encoding(e.to_string()))
    }

    /// Whether `addr` decodes under this codec.
    pub fn is_valid(&self, addr: &str) -> bool {
        self.decode(addr).is_ok()
    }
}
