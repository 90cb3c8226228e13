//! Canonical encodings of persisted grants.
//!
//! Grants are stored on-chain and hashed by every node, so both forms must
//! be byte-for-byte stable: fields are written in declaration order and no
//! floating point is involved.

use crate::{Error, Grant, Result};

impl Grant {
    /// Canonical JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Encoding(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Encoding(e.to_string()))
    }

    /// Canonical binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Encoding(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::ActionKind;

    use super::*;

    fn sample() -> Grant {
        Grant::new(
            ActionKind::WithdrawDelegatorReward.type_url(),
            ["cosmos1b", "cosmos1a", "cosmos1b"],
        )
    }

    #[test]
    fn test_json_field_order() {
        assert_eq!(
            sample().to_json().unwrap(),
            r#"{"action_kind":"/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward","allowed_principals":["cosmos1b","cosmos1a","cosmos1b"]}"#
        );
    }

    #[test]
    fn test_json_is_stable_across_reencoding() {
        let json = sample().to_json().unwrap();
        assert_eq!(Grant::from_json(&json).unwrap().to_json().unwrap(), json);
    }

    #[test]
    fn test_bytes_are_stable_and_ordered() {
        let bytes = sample().to_bytes().unwrap();
        let decoded = Grant::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.allowed_principals, sample().allowed_principals);
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(Grant::from_json("{"), Err(Error::Encoding(_))));
        assert!(matches!(Grant::from_bytes(&[0xff; 3]), Err(Error::Encoding(_))));
    }
}
