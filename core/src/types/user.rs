use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::IndexResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub role: Role,
}

/// Actions gated behind a capability check rather than ad-hoc role
/// comparisons scattered through the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TriggerAiEvaluation,
    ReviewSubmissions,
    AccessAdminPanel,
}

pub fn can(user: &User, action: Action) -> bool {
    match action {
        Action::TriggerAiEvaluation | Action::ReviewSubmissions | Action::AccessAdminPanel => {
            user.role == Role::Admin
        }
    }
}

/// Capability check that maps refusal to the HTTP-facing error.
pub fn require(user: &User, action: Action) -> IndexResult<()> {
    if can(user, action) {
        Ok(())
    } else {
        Err(IndexError::Forbidden)
    }
}
