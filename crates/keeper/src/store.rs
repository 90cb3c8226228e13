//! Grant storage keyed by granter, grantee and action kind.

use std::collections::BTreeMap;
use std::path::Path;

use authz::{Authorization, Grant};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lookup key of a stored grant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GrantKey {
    pub granter: String,
    pub grantee: String,
    pub action_kind: String,
}

impl GrantKey {
    pub fn new(
        granter: impl Into<String>,
        grantee: impl Into<String>,
        action_kind: impl Into<String>,
    ) -> Self {
        Self {
            granter: granter.into(),
            grantee: grantee.into(),
            action_kind: action_kind.into(),
        }
    }
}

impl std::fmt::Display for GrantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.granter, self.grantee, self.action_kind)
    }
}

/// Storage backend for grants.
pub trait GrantStore {
    fn get(&self, key: &GrantKey) -> Option<Grant>;
    fn put(&mut self, key: GrantKey, grant: Grant);
    fn remove(&mut self, key: &GrantKey) -> Option<Grant>;
}

/// One persisted grant in a grants file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRecord {
    pub granter: String,
    pub grantee: String,
    pub grant: Grant,
}

/// In-memory grant store, serialized as an ordered list of [`GrantRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GrantRecord>", into = "Vec<GrantRecord>")]
pub struct MemoryGrantStore {
    grants: BTreeMap<GrantKey, Grant>,
}

impl MemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a grants file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the store back as a grants file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl GrantStore for MemoryGrantStore {
    fn get(&self, key: &GrantKey) -> Option<Grant> {
        self.grants.get(key).cloned()
    }

    fn put(&mut self, key: GrantKey, grant: Grant) {
        self.grants.insert(key, grant);
    }

    fn remove(&mut self, key: &GrantKey) -> Option<Grant> {
        self.grants.remove(key)
    }
}

impl TryFrom<Vec<GrantRecord>> for MemoryGrantStore {
    type Error = Error;

    /// Fails on two records under the same key, since only one could survive.
    fn try_from(records: Vec<GrantRecord>) -> Result<Self> {
        let mut grants = BTreeMap::new();
        for r in records {
            let key = GrantKey::new(r.granter, r.grantee, r.grant.action_kind());
            if grants.contains_key(&key) {
                return Err(Error::DuplicateGrant(key.to_string()));
            }
            grants.insert(key, r.grant);
        }
        Ok(Self { grants })
    }
}

impl From<MemoryGrantStore> for Vec<GrantRecord> {
    fn from(store: MemoryGrantStore) -> Self {
        store
            .grants
            .into_iter()
            .map(|(key, grant)| GrantRecord {
                granter: key.granter,
                grantee: key.grantee,
                grant,
            })
            .collect()
    }
}
