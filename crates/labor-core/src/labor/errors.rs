use std::fmt;

use super::status::{EmploymentStatus, LifecycleOperation};

/// Failures raised by the lifecycle engine. A failed command never mutates the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaborError {
    #[error("domain rule violated: {0}")]
    DomainRule(String),
    #[error("cannot {operation} an employment that is {status}")]
    StateTransition {
        status: EmploymentStatus,
        operation: LifecycleOperation,
    },
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },
}

impl LaborError {
    pub(crate) fn rule(message: impl Into<String>) -> Self {
        Self::DomainRule(message.into())
    }

    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Kinds of records a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    LaborResource,
    EmploymentEvent,
    Person,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::LaborResource => "labor resource",
            EntityKind::EmploymentEvent => "employment event",
            EntityKind::Person => "person",
        };
        f.write_str(label)
    }
}
