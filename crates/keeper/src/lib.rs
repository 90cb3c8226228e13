//! Grant enforcement over a pluggable store.
//!
//! The [`Keeper`] looks grants up by (granter, grantee, action kind), asks
//! the grant to [`accept`](authz::Authorization::accept) the action, and
//! persists whatever the returned decision says. [`MemoryGrantStore`] is a
//! JSON-file backed store for tooling and tests.

mod error;
mod keeper;
mod store;

pub use error::{Error, Result};
pub use keeper::Keeper;
pub use store::{GrantKey, GrantRecord, GrantStore, MemoryGrantStore};
