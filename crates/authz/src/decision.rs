use serde::{Deserialize, Serialize};

/// Outcome of a successful [`Authorization::accept`](crate::Authorization::accept).
///
/// Rejections are reported as errors instead, so a `Decision` always
/// describes what the caller must do with the stored grant after running
/// the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision<A> {
    /// The action may be executed.
    pub accept: bool,
    /// The grant must be removed after this use.
    pub delete: bool,
    /// Grant state to persist in place of the current one.
    pub updated: Option<A>,
}

impl<A> Decision<A> {
    /// Allow the action and replace the stored grant with `updated`.
    pub fn accept_with(updated: A) -> Self {
        Self {
            accept: true,
            delete: false,
            updated: Some(updated),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.accept
    }
}
