use serde::{Deserialize, Serialize};

use super::event::EmploymentEvent;

/// Which overlapping employments block a new hire for the same labor resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Any live employment whose dates overlap conflicts, regardless of employer or type.
    #[default]
    AnyOverlap,
    /// Only live employments with the same enterprise and employment type conflict.
    SameEnterpriseAndType,
}

impl ConflictPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "any_overlap" | "any" => Some(Self::AnyOverlap),
            "same_enterprise_and_type" | "same_enterprise" => Some(Self::SameEnterpriseAndType),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConflictPolicy::AnyOverlap => "any_overlap",
            ConflictPolicy::SameEnterpriseAndType => "same_enterprise_and_type",
        }
    }

    pub fn conflicts(self, candidate: &EmploymentEvent, existing: &EmploymentEvent) -> bool {
        let in_scope = match self {
            ConflictPolicy::AnyOverlap => true,
            ConflictPolicy::SameEnterpriseAndType => {
                candidate.enterprise_id() == existing.enterprise_id()
                    && candidate.employment_type() == existing.employment_type()
            }
        };

        in_scope && candidate.overlaps_with(existing)
    }

    /// First snapshot in `existing` that blocks `candidate`.
    pub fn find_conflict<'a>(
        self,
        candidate: &EmploymentEvent,
        existing: impl IntoIterator<Item = &'a EmploymentEvent>,
    ) -> Option<&'a EmploymentEvent> {
        existing
            .into_iter()
            .find(|snapshot| snapshot.id() != candidate.id() && self.conflicts(candidate, snapshot))
    }
}
