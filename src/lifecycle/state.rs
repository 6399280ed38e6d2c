use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::altitude::QueryResult;

/// Identifies one submission; responses carrying any other id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LifecycleState {
    Idle,
    Pending { attempt_id: AttemptId },
    Succeeded { result: QueryResult },
    Failed { message: String },
}

impl LifecycleState {
    pub fn pending_attempt(&self) -> Option<AttemptId> {
        match self {
            LifecycleState::Pending { attempt_id } => Some(*attempt_id),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&QueryResult> {
        match self {
            LifecycleState::Succeeded { result } => Some(result),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Pending { .. } => "pending",
            LifecycleState::Succeeded { .. } => "succeeded",
            LifecycleState::Failed { .. } => "failed",
        }
    }
}
