//! The contract every grant type fulfils towards the enforcement layer.

use crate::{Action, AddressCodec, Decision, Result};

/// A stored permission that decides whether an action may run.
///
/// Implementations are immutable values: `accept` returns the next grant
/// state inside the [`Decision`] and never mutates the receiver, so it is
/// safe to call from any number of threads without coordination.
pub trait Authorization: Sized {
    /// Identifier of the action kind this grant is stored under.
    fn action_kind(&self) -> &str;

    /// Decide whether `action` is permitted.
    ///
    /// An `Err` is a hard rejection: the caller must neither execute the
    /// action nor touch the stored grant.
    fn accept(&self, action: &Action) -> Result<Decision<Self>>;

    /// Stateless structural check, run before a new grant is persisted.
    fn validate_basic(&self, codec: &AddressCodec) -> Result<()>;
}
