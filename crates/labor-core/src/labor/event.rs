//! Employment snapshots.
//!
//! An [`EmploymentEvent`] captures the full state of one employment at one point in
//! its life. Lifecycle operations never edit a snapshot; they mint a successor that
//! points back at its predecessor through `original_event_id` and carries the
//! chain's root id in `chain_id`. The only in-place edit is [`EmploymentEvent::update_position`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::employment_type::EmploymentType;
use super::errors::LaborError;
use super::ids::{BrandId, EmploymentEventId, EnterpriseId, LaborPolicyId, LaborResourceId};
use super::status::{EmploymentStatus, LifecycleOperation};
use super::time_range::TimeRange;

/// Terms requested when an employment is first recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentTerms {
    pub employment_type: EmploymentType,
    pub enterprise_id: EnterpriseId,
    pub brand_id: BrandId,
    pub labor_policy_id: LaborPolicyId,
    pub position: String,
    #[serde(default)]
    pub department: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// One immutable snapshot in an employment chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentEvent {
    id: EmploymentEventId,
    labor_resource_id: LaborResourceId,
    employment_type: EmploymentType,
    status: EmploymentStatus,
    enterprise_id: EnterpriseId,
    brand_id: BrandId,
    labor_policy_id: LaborPolicyId,
    position: String,
    department: Option<String>,
    time_range: TimeRange,
    event_time: DateTime<Utc>,
    description: String,
    version: u32,
    original_event_id: Option<EmploymentEventId>,
    chain_id: EmploymentEventId,
    /// Date the cancellation was recorded; may precede the range end when canceled early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    canceled_on: Option<NaiveDate>,
}

impl EmploymentEvent {
    /// Record the first snapshot of a new chain (version 1, no predecessor).
    pub fn create(
        id: EmploymentEventId,
        labor_resource_id: LaborResourceId,
        status: EmploymentStatus,
        terms: EmploymentTerms,
        description: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self, LaborError> {
        if id.is_blank() {
            return Err(LaborError::rule("employment event id is required"));
        }
        if labor_resource_id.is_blank() {
            return Err(LaborError::rule("labor resource id is required"));
        }
        if terms.enterprise_id.is_blank() {
            return Err(LaborError::rule("enterprise id is required"));
        }
        if terms.brand_id.is_blank() {
            return Err(LaborError::rule("brand id is required"));
        }
        if terms.labor_policy_id.is_blank() {
            return Err(LaborError::rule("labor policy id is required"));
        }
        if terms.position.trim().is_empty() {
            return Err(LaborError::rule("position must not be empty"));
        }

        let time_range = TimeRange::of(terms.start_date, terms.end_date)?;

        Ok(Self {
            canceled_on: None,
            chain_id: id.clone(),
            id,
            labor_resource_id,
            employment_type: terms.employment_type,
            status,
            enterprise_id: terms.enterprise_id,
            brand_id: terms.brand_id,
            labor_policy_id: terms.labor_policy_id,
            position: terms.position,
            department: terms.department,
            time_range,
            event_time: clock.now(),
            description: description.into(),
            version: 1,
            original_event_id: None,
        })
    }

    /// Successor snapshot: active from `onboard_date`, keeping the planned end date.
    pub fn create_onboard_event(
        &self,
        onboard_date: NaiveDate,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Self, LaborError> {
        let status = self.status.transition(LifecycleOperation::Onboard)?;

        if onboard_date < self.time_range.start_date() {
            return Err(LaborError::rule(format!(
                "onboard date {onboard_date} precedes employment start {}",
                self.time_range.start_date()
            )));
        }
        if let Some(end) = self.time_range.end_date() {
            if onboard_date > end {
                return Err(LaborError::rule(format!(
                    "onboard date {onboard_date} is after employment end {end}"
                )));
            }
        }

        let time_range = TimeRange::of(onboard_date, self.time_range.end_date())?;
        Ok(self.successor(status, time_range, remarks.unwrap_or("onboarded"), clock))
    }

    /// Successor snapshot: leaving, with the range closed at `leaving_date`.
    pub fn create_leaving_event(
        &self,
        leaving_date: NaiveDate,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Self, LaborError> {
        let status = self.status.transition(LifecycleOperation::InitiateLeaving)?;

        if leaving_date < self.time_range.start_date() {
            return Err(LaborError::rule(format!(
                "leaving date {leaving_date} precedes employment start {}",
                self.time_range.start_date()
            )));
        }

        let time_range = TimeRange::of(self.time_range.start_date(), Some(leaving_date))?;
        Ok(self.successor(
            status,
            time_range,
            remarks.unwrap_or("leaving initiated"),
            clock,
        ))
    }

    /// Successor snapshot: terminated, range unchanged.
    pub fn create_terminated_event(
        &self,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Self, LaborError> {
        let status = self.status.transition(LifecycleOperation::Terminate)?;
        Ok(self.successor(
            status,
            self.time_range,
            remarks.unwrap_or("employment terminated"),
            clock,
        ))
    }

    /// Successor snapshot: canceled, with the range closed at the clock's current date.
    ///
    /// A range cannot end before it starts, so an employment canceled ahead of its
    /// start date keeps a single-day range on the start date. The actual cancel date
    /// is always kept in [`EmploymentEvent::canceled_on`].
    pub fn create_cancel_event(
        &self,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Self, LaborError> {
        let status = self.status.transition(LifecycleOperation::Cancel)?;

        let today = clock.today();
        let start = self.time_range.start_date();
        let time_range = TimeRange::of(start, Some(today.max(start)))?;

        let description = match remarks {
            Some(remarks) => remarks.to_string(),
            None if today < start => {
                format!("employment canceled on {today}, before its start on {start}")
            }
            None => "employment canceled".to_string(),
        };

        let mut canceled = self.successor(status, time_range, &description, clock);
        canceled.canceled_on = Some(today);
        Ok(canceled)
    }

    /// Edit position details on this snapshot without minting a successor.
    pub fn update_position(
        &mut self,
        position: impl Into<String>,
        department: Option<String>,
    ) -> Result<(), LaborError> {
        let position = position.into();
        if position.trim().is_empty() {
            return Err(LaborError::rule("position must not be empty"));
        }

        self.position = position;
        self.department = department;
        Ok(())
    }

    /// Raw temporal overlap between two live snapshots; terminal snapshots never overlap.
    pub fn overlaps_with(&self, other: &EmploymentEvent) -> bool {
        if self.status.is_terminal() || other.status.is_terminal() {
            return false;
        }

        self.time_range.overlaps(&other.time_range)
    }

    /// Whether both snapshots describe the same logical employment.
    pub fn is_same_employment(&self, other: &EmploymentEvent) -> bool {
        if self.id == other.id {
            return true;
        }

        let same_terms = self.labor_resource_id == other.labor_resource_id
            && self.enterprise_id == other.enterprise_id
            && self.brand_id == other.brand_id
            && self.employment_type == other.employment_type;
        if !same_terms {
            return false;
        }

        let direct = self.original_event_id.as_ref() == Some(&other.id)
            || other.original_event_id.as_ref() == Some(&self.id);
        let shared_predecessor = self.original_event_id.is_some()
            && self.original_event_id == other.original_event_id;

        direct || shared_predecessor || self.chain_id == other.chain_id
    }

    fn successor(
        &self,
        status: EmploymentStatus,
        time_range: TimeRange,
        description: &str,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: EmploymentEventId::generate(),
            labor_resource_id: self.labor_resource_id.clone(),
            employment_type: self.employment_type,
            status,
            enterprise_id: self.enterprise_id.clone(),
            brand_id: self.brand_id.clone(),
            labor_policy_id: self.labor_policy_id.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            time_range,
            event_time: clock.now(),
            description: description.to_string(),
            version: self.version + 1,
            original_event_id: Some(self.id.clone()),
            chain_id: self.chain_id.clone(),
            canceled_on: None,
        }
    }

    pub fn id(&self) -> &EmploymentEventId {
        &self.id
    }

    pub fn labor_resource_id(&self) -> &LaborResourceId {
        &self.labor_resource_id
    }

    pub fn employment_type(&self) -> EmploymentType {
        self.employment_type
    }

    pub fn status(&self) -> EmploymentStatus {
        self.status
    }

    pub fn enterprise_id(&self) -> &EnterpriseId {
        &self.enterprise_id
    }

    pub fn brand_id(&self) -> &BrandId {
        &self.brand_id
    }

    pub fn labor_policy_id(&self) -> &LaborPolicyId {
        &self.labor_policy_id
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    pub fn event_time(&self) -> DateTime<Utc> {
        self.event_time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn original_event_id(&self) -> Option<&EmploymentEventId> {
        self.original_event_id.as_ref()
    }

    /// Id of the first snapshot in this snapshot's chain.
    pub fn chain_id(&self) -> &EmploymentEventId {
        &self.chain_id
    }

    pub fn canceled_on(&self) -> Option<NaiveDate> {
        self.canceled_on
    }
}
