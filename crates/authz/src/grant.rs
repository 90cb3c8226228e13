//! Allow-list grants over distribution actions.

use serde::{Deserialize, Serialize};

use crate::{Action, AddressCodec, Authorization, Decision, Error, Result};

/// Lets a grantee run one distribution action on the granter's behalf,
/// provided the action's relevant principal is in `allowed_principals`.
///
/// The list behaves as a fixed allow-list rather than a budget: accepting
/// an action hands back an identical grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    /// Type URL of the action this grant is stored under.
    pub action_kind: String,

    /// Addresses permitted as the action's principal. Order is kept so the
    /// grant re-encodes identically.
    pub allowed_principals: Vec<String>,
}

impl Grant {
    /// Build a grant. No validation happens here; see [`Grant::validate_basic`].
    pub fn new<I, S>(action_kind: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action_kind: action_kind.into(),
            allowed_principals: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Structural check against the default chain's address encoding.
    pub fn validate_basic(&self) -> Result<()> {
        Authorization::validate_basic(self, &AddressCodec::default())
    }

    pub fn allows(&self, principal: &str) -> bool {
        self.allowed_principals.iter().any(|a| a == principal)
    }
}

impl Authorization for Grant {
    fn action_kind(&self) -> &str {
        &self.action_kind
    }

    fn accept(&self, action: &Action) -> Result<Decision<Self>> {
        // Dispatch is driven by the action variant only; `action_kind` is
        // the lookup key of the caller, not something to match here.
        let Some(principal) = action.principal() else {
            tracing::debug!(type_url = %action.type_url(), "rejected unrecognized action");
            return Err(Error::UnrecognizedAction {
                type_url: action.type_url().to_string(),
            });
        };

        if !self.allows(principal) {
            tracing::debug!(
                type_url = %action.type_url(),
                principal = %principal,
                "principal not in allowed list"
            );
            return Err(Error::PrincipalNotAllowed {
                principal: principal.to_string(),
            });
        }

        tracing::debug!(
            type_url = %action.type_url(),
            principal = %principal,
            "action accepted"
        );
        Ok(Decision::accept_with(Grant {
            action_kind: self.action_kind.clone(),
            allowed_principals: self.allowed_principals.clone(),
        }))
    }

    fn validate_basic(&self, codec: &AddressCodec) -> Result<()> {
        if self.allowed_principals.is_empty() {
            return Err(Error::EmptyRestrictionList);
        }

        for addr in &self.allowed_principals {
            codec.decode(addr)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionKind;

    fn addr(seed: u8) -> String {
        AddressCodec::default().encode(&[seed; 20]).unwrap()
    }

    #[test]
    fn test_set_withdraw_address_not_allowed() {
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), ["addrA"]);
        let err = grant
            .accept(&Action::set_withdraw_address("addrA", "addrB"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::PrincipalNotAllowed {
                principal: "addrB".into()
            }
        );
    }

    #[test]
    fn test_set_withdraw_address_checks_withdrawer_not_delegator() {
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), ["del"]);
        assert!(grant
            .accept(&Action::set_withdraw_address("del", "wd"))
            .is_err());
        assert!(grant
            .accept(&Action::set_withdraw_address("other", "del"))
            .unwrap()
            .is_allowed());
    }

    #[test]
    fn test_withdraw_validator_commission_allowed() {
        let grant = Grant::new(ActionKind::WithdrawValidatorCommission.type_url(), ["addrA"]);
        let decision = grant
            .accept(&Action::withdraw_validator_commission("addrA"))
            .unwrap();
        assert!(decision.accept);
        assert!(!decision.delete);
        assert_eq!(decision.updated.unwrap().allowed_principals, vec!["addrA"]);
    }

    #[test]
    fn test_withdraw_validator_commission_not_allowed() {
        let grant = Grant::new(ActionKind::WithdrawValidatorCommission.type_url(), ["del"]);
        let err = grant
            .accept(&Action::withdraw_validator_commission("val"))
            .unwrap_err();
        assert!(matches!(err, Error::PrincipalNotAllowed { .. }));
    }

    #[test]
    fn test_withdraw_delegator_reward_allowed() {
        let grant = Grant::new(ActionKind::WithdrawDelegatorReward.type_url(), ["addrA"]);
        let decision = grant
            .accept(&Action::withdraw_delegator_reward("addrA", "val"))
            .unwrap();
        assert!(decision.is_allowed());
        assert_eq!(decision.updated, Some(grant));
    }

    #[test]
    fn test_withdraw_delegator_reward_checks_delegator() {
        let grant = Grant::new(ActionKind::WithdrawDelegatorReward.type_url(), ["val"]);
        assert!(grant
            .accept(&Action::withdraw_delegator_reward("del", "val"))
            .is_err());
    }

    #[test]
    fn test_action_kind_not_compared() {
        // A grant stored under another kind still decides on the variant alone.
        let grant = Grant::new(ActionKind::WithdrawValidatorCommission.type_url(), ["wd"]);
        let decision = grant
            .accept(&Action::set_withdraw_address("del", "wd"))
            .unwrap();
        assert_eq!(
            decision.updated.unwrap().action_kind,
            ActionKind::WithdrawValidatorCommission.type_url()
        );
    }

    #[test]
    fn test_unrecognized_action() {
        let grant = Grant::new("/cosmos.bank.v1beta1.MsgSend", ["addrA"]);
        let err = grant
            .accept(&Action::unrecognized("/cosmos.bank.v1beta1.MsgSend"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnrecognizedAction {
                type_url: "/cosmos.bank.v1beta1.MsgSend".into()
            }
        );
    }

    #[test]
    fn test_accept_leaves_receiver_untouched() {
        let grant = Grant::new(ActionKind::WithdrawDelegatorReward.type_url(), ["a", "b", "a"]);
        let before = grant.clone();
        let action = Action::withdraw_delegator_reward("b", "val");
        let first = grant.accept(&action).unwrap();
        let second = grant.accept(&action).unwrap();
        assert_eq!(first, second);
        assert_eq!(grant, before);
        assert_eq!(first.updated.unwrap().allowed_principals, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_validate_basic_ok() {
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), [addr(1), addr(2)]);
        assert!(grant.validate_basic().is_ok());
    }

    #[test]
    fn test_validate_basic_allows_duplicates() {
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), [addr(1), addr(1)]);
        assert!(grant.validate_basic().is_ok());
    }

    #[test]
    fn test_validate_basic_empty_list() {
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), Vec::<String>::new());
        assert_eq!(grant.validate_basic(), Err(Error::EmptyRestrictionList));
    }

    #[test]
    fn test_validate_basic_invalid_address() {
        let grant = Grant::new(
            ActionKind::SetWithdrawAddress.type_url(),
            [addr(1), "not-an-address".to_string()],
        );
        let err = grant.validate_basic().unwrap_err();
        assert!(
            matches!(err, Error::InvalidAddress { ref address, .. } if address == "not-an-address")
        );
    }

    #[test]
    fn test_validate_basic_empty_string_entry() {
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), [""]);
        assert!(matches!(
            grant.validate_basic(),
            Err(Error::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_validate_basic_custom_prefix() {
        let codec = AddressCodec::new("osmo");
        let osmo = codec.encode(&[4u8; 20]).unwrap();
        let grant = Grant::new(ActionKind::WithdrawDelegatorReward.type_url(), [osmo]);
        assert!(Authorization::validate_basic(&grant, &codec).is_ok());
        assert!(grant.validate_basic().is_err());
    }
}
