//! Employment status and the lifecycle transition table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::LaborError;

/// Where an employment sits in its lifecycle.
///
/// `PendingOnboard` is initial; `Terminated` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    PendingOnboard,
    Active,
    Leaving,
    Terminated,
    Canceled,
}

/// Commands that move an employment from one status to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOperation {
    Onboard,
    InitiateLeaving,
    Terminate,
    Cancel,
}

/// Every permitted (from, operation, to) triple. Anything absent is rejected.
pub const TRANSITIONS: [(EmploymentStatus, LifecycleOperation, EmploymentStatus); 4] = [
    (
        EmploymentStatus::PendingOnboard,
        LifecycleOperation::Onboard,
        EmploymentStatus::Active,
    ),
    (
        EmploymentStatus::PendingOnboard,
        LifecycleOperation::Cancel,
        EmploymentStatus::Canceled,
    ),
    (
        EmploymentStatus::Active,
        LifecycleOperation::InitiateLeaving,
        EmploymentStatus::Leaving,
    ),
    (
        EmploymentStatus::Leaving,
        LifecycleOperation::Terminate,
        EmploymentStatus::Terminated,
    ),
];

impl EmploymentStatus {
    pub const INITIAL: Self = Self::PendingOnboard;

    pub const fn all() -> [Self; 5] {
        [
            Self::PendingOnboard,
            Self::Active,
            Self::Leaving,
            Self::Terminated,
            Self::Canceled,
        ]
    }

    /// Resolve the target status for `operation`, or fail with a state transition error.
    pub fn transition(self, operation: LifecycleOperation) -> Result<Self, LaborError> {
        TRANSITIONS
            .iter()
            .find(|(from, op, _)| *from == self && *op == operation)
            .map(|(_, _, to)| *to)
            .ok_or(LaborError::StateTransition {
                status: self,
                operation,
            })
    }

    pub fn permits(self, operation: LifecycleOperation) -> bool {
        self.transition(operation).is_ok()
    }

    pub fn can_onboard(self) -> bool {
        self.permits(LifecycleOperation::Onboard)
    }

    pub fn can_initiate_leaving(self) -> bool {
        self.permits(LifecycleOperation::InitiateLeaving)
    }

    pub fn can_terminate(self) -> bool {
        self.permits(LifecycleOperation::Terminate)
    }

    pub fn can_cancel(self) -> bool {
        self.permits(LifecycleOperation::Cancel)
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated | Self::Canceled)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingOnboard => "pending_onboard",
            Self::Active => "active",
            Self::Leaving => "leaving",
            Self::Terminated => "terminated",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl LifecycleOperation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Onboard => "onboard",
            Self::InitiateLeaving => "initiate leaving for",
            Self::Terminate => "terminate",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
