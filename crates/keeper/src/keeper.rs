//! Applies grant decisions to a store.

use authz::{Action, AddressCodec, Authorization, Decision, Grant};

use crate::{Error, GrantKey, GrantStore, Result};

/// Enforcement layer around a [`GrantStore`].
///
/// Each `dispatch` performs read, decide and write as one `&mut self` call,
/// so no other use or revocation of the same grant can interleave.
pub struct Keeper<S> {
    store: S,
    codec: AddressCodec,
}

impl<S: GrantStore> Keeper<S> {
    pub fn new(store: S, codec: AddressCodec) -> Self {
        Self { store, codec }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Store a new grant after checking it with `validate_basic`.
    ///
    /// Replaces any grant the granter already gave the grantee for the same
    /// action kind.
    pub fn grant(&mut self, granter: &str, grantee: &str, grant: Grant) -> Result<()> {
        Authorization::validate_basic(&grant, &self.codec)?;
        let key = GrantKey::new(granter, grantee, grant.action_kind());
        tracing::info!(%key, allowed = grant.allowed_principals.len(), "grant stored");
        self.store.put(key, grant);
        Ok(())
    }

    /// Remove a grant.
    pub fn revoke(&mut self, granter: &str, grantee: &str, action_kind: &str) -> Result<()> {
        let key = GrantKey::new(granter, grantee, action_kind);
        self.store
            .remove(&key)
            .ok_or_else(|| Error::NotFound(key.to_string()))?;
        tracing::info!(%key, "grant revoked");
        Ok(())
    }

    /// Decide on `action` with the matching grant and persist the outcome.
    ///
    /// On rejection the stored grant is left exactly as it was.
    pub fn dispatch(
        &mut self,
        granter: &str,
        grantee: &str,
        action: &Action,
    ) -> Result<Decision<Grant>> {
        let key = GrantKey::new(granter, grantee, action.type_url());
        let grant = self
            .store
            .get(&key)
            .ok_or_else(|| Error::NotFound(key.to_string()))?;

        let decision = match grant.accept(action) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(%key, error = %e, "action rejected");
                return Err(e.into());
            }
        };

        if decision.delete {
            self.store.remove(&key);
        } else if let Some(updated) = &decision.updated {
            self.store.put(key.clone(), updated.clone());
        }

        tracing::info!(%key, delete = decision.delete, "action accepted");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryGrantStore;
    use authz::ActionKind;

    fn addr(seed: u8) -> String {
        AddressCodec::default().encode(&[seed; 20]).unwrap()
    }

    fn keeper() -> Keeper<MemoryGrantStore> {
        Keeper::new(MemoryGrantStore::new(), AddressCodec::default())
    }

    #[test]
    fn test_grant_rejects_invalid() {
        let mut keeper = keeper();
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), ["not-an-address"]);
        let err = keeper.grant("granter", "grantee", grant).unwrap_err();
        assert!(matches!(
            err,
            Error::Authorization(authz::Error::InvalidAddress { .. })
        ));
        assert!(keeper.store().is_empty());
    }

    #[test]
    fn test_dispatch_keeps_grant() {
        let mut keeper = keeper();
        let withdrawer = addr(1);
        let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), [withdrawer.clone()]);
        keeper.grant("granter", "grantee", grant.clone()).unwrap();

        let action = Action::set_withdraw_address("granter", withdrawer);
        for _ in 0..3 {
            let decision = keeper.dispatch("granter", "grantee", &action).unwrap();
            assert!(decision.is_allowed());
        }

        let key = GrantKey::new("granter", "grantee", ActionKind::SetWithdrawAddress.type_url());
        assert_eq!(keeper.store().get(&key), Some(grant));
    }

    #[test]
    fn test_dispatch_rejection_leaves_store() {
        let mut keeper = keeper();
        let grant = Grant::new(ActionKind::WithdrawDelegatorReward.type_url(), [addr(1)]);
        keeper.grant("granter", "grantee", grant).unwrap();
        let before = keeper.store().clone();

        let err = keeper
            .dispatch(
                "granter",
                "grantee",
                &Action::withdraw_delegator_reward(addr(2), "val"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Authorization(authz::Error::PrincipalNotAllowed { .. })
        ));
        assert_eq!(keeper.store(), &before);
    }

    #[test]
    fn test_dispatch_without_grant() {
        let mut keeper = keeper();
        let err = keeper
            .dispatch("granter", "grantee", &Action::withdraw_validator_commission("val"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_dispatch_is_keyed_by_action_kind() {
        let mut keeper = keeper();
        let principal = addr(1);
        let grant = Grant::new(ActionKind::WithdrawDelegatorReward.type_url(), [principal.clone()]);
        keeper.grant("granter", "grantee", grant).unwrap();

        let err = keeper
            .dispatch("granter", "grantee", &Action::set_withdraw_address("granter", principal))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_revoke() {
        let mut keeper = keeper();
        let kind = ActionKind::WithdrawDelegatorReward.type_url();
        keeper
            .grant("granter", "grantee", Grant::new(kind, [addr(1)]))
            .unwrap();

        keeper.revoke("granter", "grantee", kind).unwrap();
        assert!(keeper.store().is_empty());
        assert!(matches!(
            keeper.revoke("granter", "grantee", kind),
            Err(Error::NotFound(_))
        ));
    }
}
