//! Action requests a grant can be asked to accept.

use serde::{Deserialize, Serialize};

/// The action kinds a distribution grant understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SetWithdrawAddress,
    WithdrawDelegatorReward,
    WithdrawValidatorCommission,
}

impl ActionKind {
    /// Every recognized kind, in lookup-table order.
    pub const ALL: [ActionKind; 3] = [
        ActionKind::SetWithdrawAddress,
        ActionKind::WithdrawDelegatorReward,
        ActionKind::WithdrawValidatorCommission,
    ];

    /// The identifier grants are stored and looked up under.
    pub const fn type_url(self) -> &'static str {
        match self {
            ActionKind::SetWithdrawAddress => "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress",
            ActionKind::WithdrawDelegatorReward => {
                "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward"
            }
            ActionKind::WithdrawValidatorCommission => {
                "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission"
            }
        }
    }

    pub fn from_type_url(type_url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_url() == type_url)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_url())
    }
}

/// An already-validated action submitted by a grantee.
///
/// Each recognized variant has exactly one relevant principal, the address
/// checked against a grant's allowed list. Anything else lands in
/// [`Action::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum Action {
    SetWithdrawAddress {
        delegator_address: String,
        withdraw_address: String,
    },
    WithdrawDelegatorReward {
        delegator_address: String,
        validator_address: String,
    },
    WithdrawValidatorCommission {
        validator_address: String,
    },
    Unrecognized {
        type_url: String,
    },
}

impl Action {
    pub fn set_withdraw_address(
        delegator_address: impl Into<String>,
        withdraw_address: impl Into<String>,
    ) -> Self {
        Self::SetWithdrawAddress {
            delegator_address: delegator_address.into(),
            withdraw_address: withdraw_address.into(),
        }
    }

    pub fn withdraw_delegator_reward(
        delegator_address: impl Into<String>,
        validator_address: impl Into<String>,
    ) -> Self {
        Self::WithdrawDelegatorReward {
            delegator_address: delegator_address.into(),
            validator_address: validator_address.into(),
        }
    }

    pub fn withdraw_validator_commission(validator_address: impl Into<String>) -> Self {
        Self::WithdrawValidatorCommission {
            validator_address: validator_address.into(),
        }
    }

    pub fn unrecognized(type_url: impl Into<String>) -> Self {
        Self::Unrecognized {
            type_url: type_url.into(),
        }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Action::SetWithdrawAddress { .. } => Some(ActionKind::SetWithdrawAddress),
            Action::WithdrawDelegatorReward { .. } => Some(ActionKind::WithdrawDelegatorReward),
            Action::WithdrawValidatorCommission { .. } => {
                Some(ActionKind::WithdrawValidatorCommission)
            }
            Action::Unrecognized { .. } => None,
        }
    }

    pub fn type_url(&self) -> &str {
        match self {
            Action::Unrecognized { type_url } => type_url,
            _ => self.kind().map(ActionKind::type_url).unwrap_or_default(),
        }
    }

    /// The address a grant's allowed list is checked against.
    pub fn principal(&self) -> Option<&str> {
        match self {
            Action::SetWithdrawAddress {
                withdraw_address, ..
            } => Some(withdraw_address),
            Action::WithdrawDelegatorReward {
                delegator_address, ..
            } => Some(delegator_address),
            Action::WithdrawValidatorCommission { validator_address } => Some(validator_address),
            Action::Unrecognized { .. } => None,
        }
    }
}

const TYPE_FIELD: &str = "@type";

/// Field layout of the recognized kinds, tagged by type URL.
#[derive(Deserialize)]
#[serde(tag = "@type")]
enum KnownAction {
    #[serde(rename = "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress")]
    SetWithdrawAddress {
        delegator_address: String,
        withdraw_address: String,
    },
    #[serde(rename = "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward")]
    WithdrawDelegatorReward {
        delegator_address: String,
        validator_address: String,
    },
    #[serde(rename = "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission")]
    WithdrawValidatorCommission { validator_address: String },
}

impl TryFrom<serde_json::Value> for Action {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let type_url = value
            .get(TYPE_FIELD)
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| format!("action is missing a string `{TYPE_FIELD}` field"))?;

        if ActionKind::from_type_url(type_url).is_none() {
            return Ok(Action::unrecognized(type_url));
        }

        let known: KnownAction = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Ok(match known {
            KnownAction::SetWithdrawAddress {
                delegator_address,
                withdraw_address,
            } => Action::SetWithdrawAddress {
                delegator_address,
                withdraw_address,
            },
            KnownAction::WithdrawDelegatorReward {
                delegator_address,
                validator_address,
            } => Action::WithdrawDelegatorReward {
                delegator_address,
                validator_address,
            },
            KnownAction::WithdrawValidatorCommission { validator_address } => {
                Action::WithdrawValidatorCommission { validator_address }
            }
        })
    }
}

impl From<Action> for serde_json::Value {
    fn from(action: Action) -> Self {
        let type_url = action.type_url().to_string();
        match action {
            Action::SetWithdrawAddress {
                delegator_address,
                withdraw_address,
            } => serde_json::json!({
                "@type": type_url,
                "delegator_address": delegator_address,
                "withdraw_address": withdraw_address,
            }),
            Action::WithdrawDelegatorReward {
                delegator_address,
                validator_address,
            } => serde_json::json!({
                "@type": type_url,
                "delegator_address": delegator_address,
                "validator_address": validator_address,
            }),
            Action::WithdrawValidatorCommission { validator_address } => serde_json::json!({
                "@type": type_url,
                "validator_address": validator_address,
            }),
            Action::Unrecognized { .. } => serde_json::json!({ "@type": type_url }),
        }
    }
}
