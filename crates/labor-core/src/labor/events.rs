//! Domain events emitted by lifecycle commands.
//!
//! Commands return these as values next to the snapshot they produced; the domain
//! service hands them to an [`EventPublisher`](super::repository::EventPublisher)
//! after the aggregate has been saved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::employment_type::EmploymentType;
use super::ids::{BrandId, EmploymentEventId, EnterpriseId, LaborResourceId, PersonId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborResourceCreated {
    pub labor_resource_id: LaborResourceId,
    pub person_id: PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentCreated {
    pub labor_resource_id: LaborResourceId,
    pub employment_event_id: EmploymentEventId,
    pub person_id: PersonId,
    pub enterprise_id: EnterpriseId,
    pub brand_id: BrandId,
    pub employment_type: EmploymentType,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentOnboarded {
    pub labor_resource_id: LaborResourceId,
    pub employment_event_id: EmploymentEventId,
    pub person_id: PersonId,
    pub enterprise_id: EnterpriseId,
    pub brand_id: BrandId,
    pub onboard_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentLeavingInitiated {
    pub labor_resource_id: LaborResourceId,
    pub employment_event_id: EmploymentEventId,
    pub person_id: PersonId,
    pub enterprise_id: EnterpriseId,
    pub brand_id: BrandId,
    pub leaving_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentTerminated {
    pub labor_resource_id: LaborResourceId,
    pub employment_event_id: EmploymentEventId,
    pub person_id: PersonId,
    pub enterprise_id: EnterpriseId,
    pub brand_id: BrandId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentCanceled {
    pub labor_resource_id: LaborResourceId,
    pub employment_event_id: EmploymentEventId,
    pub person_id: PersonId,
    pub enterprise_id: EnterpriseId,
    pub brand_id: BrandId,
    pub canceled_on: NaiveDate,
}

/// Envelope over every labor domain event, tagged by `event_type` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LaborEvent {
    LaborResourceCreated(LaborResourceCreated),
    EmploymentCreated(EmploymentCreated),
    EmploymentOnboarded(EmploymentOnboarded),
    EmploymentLeavingInitiated(EmploymentLeavingInitiated),
    EmploymentTerminated(EmploymentTerminated),
    EmploymentCanceled(EmploymentCanceled),
}

impl LaborEvent {
    pub const fn event_type(&self) -> &'static str {
        match self {
            LaborEvent::LaborResourceCreated(_) => "labor_resource_created",
            LaborEvent::EmploymentCreated(_) => "employment_created",
            LaborEvent::EmploymentOnboarded(_) => "employment_onboarded",
            LaborEvent::EmploymentLeavingInitiated(_) => "employment_leaving_initiated",
            LaborEvent::EmploymentTerminated(_) => "employment_terminated",
            LaborEvent::EmploymentCanceled(_) => "employment_canceled",
        }
    }

    pub fn labor_resource_id(&self) -> &LaborResourceId {
        match self {
            LaborEvent::LaborResourceCreated(event) => &event.labor_resource_id,
            LaborEvent::EmploymentCreated(event) => &event.labor_resource_id,
            LaborEvent::EmploymentOnboarded(event) => &event.labor_resource_id,
            LaborEvent::EmploymentLeavingInitiated(event) => &event.labor_resource_id,
            LaborEvent::EmploymentTerminated(event) => &event.labor_resource_id,
            LaborEvent::EmploymentCanceled(event) => &event.labor_resource_id,
        }
    }

    /// Snapshot the event refers to, if any.
    pub fn employment_event_id(&self) -> Option<&EmploymentEventId> {
        match self {
            LaborEvent::LaborResourceCreated(_) => None,
            LaborEvent::EmploymentCreated(event) => Some(&event.employment_event_id),
            LaborEvent::EmploymentOnboarded(event) => Some(&event.employment_event_id),
            LaborEvent::EmploymentLeavingInitiated(event) => Some(&event.employment_event_id),
            LaborEvent::EmploymentTerminated(event) => Some(&event.employment_event_id),
            LaborEvent::EmploymentCanceled(event) => Some(&event.employment_event_id),
        }
    }
}
