//! Scoped authorization grants for distribution actions.
//!
//! A [`Grant`] lets a grantee perform one kind of distribution action on a
//! granter's behalf, as long as the action's relevant principal appears in
//! the grant's allowed list:
//!
//! | Action | Principal checked |
//! |---|---|
//! | [`Action::SetWithdrawAddress`] | withdraw address |
//! | [`Action::WithdrawValidatorCommission`] | validator address |
//! | [`Action::WithdrawDelegatorReward`] | delegator address |
//!
//! [`Authorization::accept`] is a pure decision function. Persisting the
//! returned [`Decision`] atomically with the action is up to the caller.
//!
//! # Example
//!
//! ```
//! use authz::{Action, ActionKind, AddressCodec, Authorization, Grant};
//!
//! let codec = AddressCodec::default();
//! let withdrawer = codec.encode(&[1u8; 20])?;
//!
//! let grant = Grant::new(ActionKind::SetWithdrawAddress.type_url(), [withdrawer.clone()]);
//! grant.validate_basic()?;
//!
//! let decision = grant.accept(&Action::set_withdraw_address("cosmos1delegator", withdrawer))?;
//! assert!(decision.is_allowed());
//! assert_eq!(decision.updated, Some(grant));
//! # Ok::<(), authz::Error>(())
//! ```

mod action;
mod address;
mod authorization;
mod decision;
mod encoding;
mod error;
mod grant;

pub use action::{Action, ActionKind};
pub use address::{AddressCodec, DEFAULT_ACCOUNT_PREFIX, MAX_ADDRESS_LEN};
pub use authorization::Authorization;
pub use decision::Decision;
pub use error::{Error, Result};
pub use grant::Grant;
