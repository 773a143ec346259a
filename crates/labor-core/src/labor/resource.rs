//! Labor resource aggregate.
//!
//! A [`LaborResource`] owns every employment snapshot recorded for one person and
//! is the only place new snapshots enter the index. Commands validate first and
//! append last, so a failed command leaves the aggregate exactly as it was. Each
//! successful command returns the new snapshot together with the domain event it
//! produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::chains::EmploymentChains;
use super::clock::Clock;
use super::errors::{EntityKind, LaborError};
use super::event::{EmploymentEvent, EmploymentTerms};
use super::events::{
    EmploymentCanceled, EmploymentCreated, EmploymentLeavingInitiated, EmploymentOnboarded,
    EmploymentTerminated, LaborEvent, LaborResourceCreated,
};
use super::ids::{BrandId, EmploymentEventId, EnterpriseId, LaborResourceId, PersonId};
use super::policy::ConflictPolicy;
use super::status::EmploymentStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborResource {
    id: LaborResourceId,
    person_id: PersonId,
    employments: EmploymentChains,
    #[serde(default)]
    revision: u64,
}

impl LaborResource {
    pub fn create(
        id: LaborResourceId,
        person_id: PersonId,
    ) -> Result<(Self, LaborEvent), LaborError> {
        if id.is_blank() {
            return Err(LaborError::rule("labor resource id is required"));
        }
        if person_id.is_blank() {
            return Err(LaborError::rule("person id is required"));
        }

        let event = LaborEvent::LaborResourceCreated(LaborResourceCreated {
            labor_resource_id: id.clone(),
            person_id: person_id.clone(),
        });
        let resource = Self {
            id,
            person_id,
            employments: EmploymentChains::default(),
            revision: 0,
        };
        Ok((resource, event))
    }

    pub fn id(&self) -> &LaborResourceId {
        &self.id
    }

    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    pub fn employments(&self) -> &EmploymentChains {
        &self.employments
    }

    /// Optimistic concurrency stamp assigned by the repository; 0 until first saved.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Open a new employment chain in `PendingOnboard`, rejecting overlaps per `policy`.
    pub fn create_employment(
        &mut self,
        terms: EmploymentTerms,
        policy: ConflictPolicy,
        clock: &dyn Clock,
    ) -> Result<(EmploymentEvent, LaborEvent), LaborError> {
        let snapshot = EmploymentEvent::create(
            EmploymentEventId::generate(),
            self.id.clone(),
            EmploymentStatus::INITIAL,
            terms,
            "employment created",
            clock,
        )?;

        if let Some(existing) = policy.find_conflict(&snapshot, self.employments.current()) {
            return Err(LaborError::rule(format!(
                "employment {} overlaps existing {} employment {} ({})",
                snapshot.time_range(),
                existing.status(),
                existing.id(),
                existing.time_range()
            )));
        }

        let event = LaborEvent::EmploymentCreated(EmploymentCreated {
            labor_resource_id: self.id.clone(),
            employment_event_id: snapshot.id().clone(),
            person_id: self.person_id.clone(),
            enterprise_id: snapshot.enterprise_id().clone(),
            brand_id: snapshot.brand_id().clone(),
            employment_type: snapshot.employment_type(),
            start_date: snapshot.time_range().start_date(),
        });

        self.employments.append(snapshot.clone())?;
        Ok((snapshot, event))
    }

    pub fn onboard(
        &mut self,
        employment_event_id: &EmploymentEventId,
        onboard_date: NaiveDate,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<(EmploymentEvent, LaborEvent), LaborError> {
        let snapshot = self
            .current_snapshot(employment_event_id)?
            .create_onboard_event(onboard_date, remarks, clock)?;

        let event = LaborEvent::EmploymentOnboarded(EmploymentOnboarded {
            labor_resource_id: self.id.clone(),
            employment_event_id: snapshot.id().clone(),
            person_id: self.person_id.clone(),
            enterprise_id: snapshot.enterprise_id().clone(),
            brand_id: snapshot.brand_id().clone(),
            onboard_date,
        });

        self.employments.append(snapshot.clone())?;
        Ok((snapshot, event))
    }

    pub fn initiate_leaving(
        &mut self,
        employment_event_id: &EmploymentEventId,
        leaving_date: NaiveDate,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<(EmploymentEvent, LaborEvent), LaborError> {
        let snapshot = self
            .current_snapshot(employment_event_id)?
            .create_leaving_event(leaving_date, remarks, clock)?;

        let event = LaborEvent::EmploymentLeavingInitiated(EmploymentLeavingInitiated {
            labor_resource_id: self.id.clone(),
            employment_event_id: snapshot.id().clone(),
            person_id: self.person_id.clone(),
            enterprise_id: snapshot.enterprise_id().clone(),
            brand_id: snapshot.brand_id().clone(),
            leaving_date,
        });

        self.employments.append(snapshot.clone())?;
        Ok((snapshot, event))
    }

    pub fn terminate_employment(
        &mut self,
        employment_event_id: &EmploymentEventId,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<(EmploymentEvent, LaborEvent), LaborError> {
        let snapshot = self
            .current_snapshot(employment_event_id)?
            .create_terminated_event(remarks, clock)?;

        let event = LaborEvent::EmploymentTerminated(EmploymentTerminated {
            labor_resource_id: self.id.clone(),
            employment_event_id: snapshot.id().clone(),
            person_id: self.person_id.clone(),
            enterprise_id: snapshot.enterprise_id().clone(),
            brand_id: snapshot.brand_id().clone(),
        });

        self.employments.append(snapshot.clone())?;
        Ok((snapshot, event))
    }

    pub fn cancel_employment(
        &mut self,
        employment_event_id: &EmploymentEventId,
        remarks: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<(EmploymentEvent, LaborEvent), LaborError> {
        let snapshot = self
            .current_snapshot(employment_event_id)?
            .create_cancel_event(remarks, clock)?;

        let event = LaborEvent::EmploymentCanceled(EmploymentCanceled {
            labor_resource_id: self.id.clone(),
            employment_event_id: snapshot.id().clone(),
            person_id: self.person_id.clone(),
            enterprise_id: snapshot.enterprise_id().clone(),
            brand_id: snapshot.brand_id().clone(),
            canceled_on: snapshot.canceled_on().unwrap_or_else(|| clock.today()),
        });

        self.employments.append(snapshot.clone())?;
        Ok((snapshot, event))
    }

    /// Edit position details on the current member of a chain, in place.
    pub fn update_position(
        &mut self,
        employment_event_id: &EmploymentEventId,
        position: impl Into<String>,
        department: Option<String>,
    ) -> Result<&EmploymentEvent, LaborError> {
        self.current_snapshot(employment_event_id)?;
        let snapshot = self
            .employments
            .get_mut(employment_event_id)
            .ok_or_else(|| {
                LaborError::not_found(EntityKind::EmploymentEvent, employment_event_id)
            })?;
        snapshot.update_position(position, department)?;
        Ok(snapshot)
    }

    pub fn employment_event(&self, id: &EmploymentEventId) -> Option<&EmploymentEvent> {
        self.employments.get(id)
    }

    /// Every snapshot in append order.
    pub fn employment_events(&self) -> impl Iterator<Item = &EmploymentEvent> + '_ {
        self.employments.iter()
    }

    /// Head snapshot of every chain.
    pub fn current_employment_events(&self) -> Vec<&EmploymentEvent> {
        self.employments.current().collect()
    }

    /// Every snapshot, newest `event_time` first; ties favour the later append.
    pub fn latest_employment_events(&self) -> Vec<&EmploymentEvent> {
        let mut events: Vec<&EmploymentEvent> = self.employments.iter().collect();
        events.reverse();
        events.sort_by(|left, right| right.event_time().cmp(&left.event_time()));
        events
    }

    pub fn active_employment_events(&self) -> Vec<&EmploymentEvent> {
        self.employments
            .current()
            .filter(|event| event.status().is_active())
            .collect()
    }

    /// Active chain heads whose time range covers `date`.
    pub fn active_employment_events_on(&self, date: NaiveDate) -> Vec<&EmploymentEvent> {
        self.employments
            .current()
            .filter(|event| event.status().is_active() && event.time_range().contains(date))
            .collect()
    }

    pub fn employment_events_by_enterprise(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Vec<&EmploymentEvent> {
        self.employments
            .iter()
            .filter(|event| event.enterprise_id() == enterprise_id)
            .collect()
    }

    pub fn employment_events_by_brand(&self, brand_id: &BrandId) -> Vec<&EmploymentEvent> {
        self.employments
            .iter()
            .filter(|event| event.brand_id() == brand_id)
            .collect()
    }

    /// Members of the chain containing `id`, first snapshot to head.
    pub fn chain(&self, id: &EmploymentEventId) -> Vec<&EmploymentEvent> {
        self.employments.chain(id)
    }

    pub fn has_active_employment_with_enterprise(&self, enterprise_id: &EnterpriseId) -> bool {
        self.employments
            .current()
            .any(|event| event.status().is_active() && event.enterprise_id() == enterprise_id)
    }

    pub fn has_active_employment_with_brand(&self, brand_id: &BrandId) -> bool {
        self.employments
            .current()
            .any(|event| event.status().is_active() && event.brand_id() == brand_id)
    }

    fn current_snapshot(&self, id: &EmploymentEventId) -> Result<&EmploymentEvent, LaborError> {
        self.employments
            .get(id)
            .filter(|event| self.employments.is_current(event.id()))
            .ok_or_else(|| LaborError::not_found(EntityKind::EmploymentEvent, id))
    }
}
