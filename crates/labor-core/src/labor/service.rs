use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::errors::{EntityKind, LaborError};
use super::event::{EmploymentEvent, EmploymentTerms};
use super::events::LaborEvent;
use super::ids::{BrandId, EmploymentEventId, EnterpriseId, LaborResourceId, PersonId};
use super::repository::{
    EventPublisher, LaborResourceRepository, PersonDirectory, PublishError, RepositoryError,
};
use super::resource::LaborResource;
use crate::config::LaborConfig;

/// Service composing the labor repository, event publisher, and person registry.
///
/// Every mutation loads the aggregate, runs one command, saves, and only then
/// publishes the command's events in the order they were produced.
pub struct LaborDomainService<R, P> {
    repository: Arc<R>,
    publisher: Arc<P>,
    persons: Arc<dyn PersonDirectory>,
    clock: Arc<dyn Clock>,
    config: LaborConfig,
}

impl<R, P> LaborDomainService<R, P>
where
    R: LaborResourceRepository + 'static,
    P: EventPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        publisher: Arc<P>,
        persons: Arc<dyn PersonDirectory>,
        config: LaborConfig,
    ) -> Self {
        Self::with_clock(repository, publisher, persons, Arc::new(SystemClock), config)
    }

    pub fn with_clock(
        repository: Arc<R>,
        publisher: Arc<P>,
        persons: Arc<dyn PersonDirectory>,
        clock: Arc<dyn Clock>,
        config: LaborConfig,
    ) -> Self {
        Self {
            repository,
            publisher,
            persons,
            clock,
            config,
        }
    }

    pub fn config(&self) -> LaborConfig {
        self.config
    }

    /// Register a labor resource for a known person who does not have one yet.
    pub fn create_labor_resource(
        &self,
        person_id: &PersonId,
    ) -> Result<LaborResource, LaborServiceError> {
        self.ensure_person(person_id)?;
        if self.repository.find_by_person_id(person_id)?.is_some() {
            return Err(LaborError::rule(format!(
                "person {person_id} already has a labor resource"
            ))
            .into());
        }

        let (resource, event) =
            LaborResource::create(LaborResourceId::generate(), person_id.clone())?;
        self.commit(resource, vec![event])
    }

    /// Return the person's labor resource, creating it on first use.
    pub fn get_or_create_labor_resource(
        &self,
        person_id: &PersonId,
    ) -> Result<LaborResource, LaborServiceError> {
        let (resource, events) = self.load_or_new(person_id)?;
        if events.is_empty() {
            return Ok(resource);
        }
        self.commit(resource, events)
    }

    /// Record a pending employment for the person under the configured conflict policy.
    pub fn create_employment(
        &self,
        person_id: &PersonId,
        terms: EmploymentTerms,
    ) -> Result<EmploymentEvent, LaborServiceError> {
        let (mut resource, mut events) = self.load_or_new(person_id)?;
        let (snapshot, event) =
            resource.create_employment(terms, self.config.conflict_policy, self.clock.as_ref())?;
        events.push(event);

        self.commit(resource, events)?;
        Ok(snapshot)
    }

    pub fn onboard(
        &self,
        labor_resource_id: &LaborResourceId,
        employment_event_id: &EmploymentEventId,
        onboard_date: NaiveDate,
        remarks: Option<&str>,
    ) -> Result<EmploymentEvent, LaborServiceError> {
        let mut resource = self.load(labor_resource_id)?;
        let (snapshot, event) = resource.onboard(
            employment_event_id,
            onboard_date,
            remarks,
            self.clock.as_ref(),
        )?;

        self.commit(resource, vec![event])?;
        Ok(snapshot)
    }

    pub fn initiate_leaving(
        &self,
        labor_resource_id: &LaborResourceId,
        employment_event_id: &EmploymentEventId,
        leaving_date: NaiveDate,
        remarks: Option<&str>,
    ) -> Result<EmploymentEvent, LaborServiceError> {
        let mut resource = self.load(labor_resource_id)?;
        let (snapshot, event) = resource.initiate_leaving(
            employment_event_id,
            leaving_date,
            remarks,
            self.clock.as_ref(),
        )?;

        self.commit(resource, vec![event])?;
        Ok(snapshot)
    }

    pub fn terminate_employment(
        &self,
        labor_resource_id: &LaborResourceId,
        employment_event_id: &EmploymentEventId,
        remarks: Option<&str>,
    ) -> Result<EmploymentEvent, LaborServiceError> {
        let mut resource = self.load(labor_resource_id)?;
        let (snapshot, event) =
            resource.terminate_employment(employment_event_id, remarks, self.clock.as_ref())?;

        self.commit(resource, vec![event])?;
        Ok(snapshot)
    }

    pub fn cancel_employment(
        &self,
        labor_resource_id: &LaborResourceId,
        employment_event_id: &EmploymentEventId,
        remarks: Option<&str>,
    ) -> Result<EmploymentEvent, LaborServiceError> {
        let mut resource = self.load(labor_resource_id)?;
        let (snapshot, event) =
            resource.cancel_employment(employment_event_id, remarks, self.clock.as_ref())?;

        self.commit(resource, vec![event])?;
        Ok(snapshot)
    }

    /// Change position details in place; saved without publishing.
    pub fn update_position(
        &self,
        labor_resource_id: &LaborResourceId,
        employment_event_id: &EmploymentEventId,
        position: &str,
        department: Option<&str>,
    ) -> Result<EmploymentEvent, LaborServiceError> {
        let mut resource = self.load(labor_resource_id)?;
        let snapshot = resource
            .update_position(
                employment_event_id,
                position,
                department.map(str::to_string),
            )?
            .clone();

        self.commit(resource, Vec::new())?;
        Ok(snapshot)
    }

    pub fn labor_resource(
        &self,
        labor_resource_id: &LaborResourceId,
    ) -> Result<LaborResource, LaborServiceError> {
        self.load(labor_resource_id)
    }

    /// Active current employments of the person; empty when the person has no resource.
    pub fn find_active_employments(
        &self,
        person_id: &PersonId,
    ) -> Result<Vec<EmploymentEvent>, LaborServiceError> {
        let Some(resource) = self.repository.find_by_person_id(person_id)? else {
            return Ok(Vec::new());
        };
        Ok(resource
            .active_employment_events()
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn has_active_employment_with_enterprise(
        &self,
        person_id: &PersonId,
        enterprise_id: &EnterpriseId,
    ) -> Result<bool, LaborServiceError> {
        Ok(self
            .repository
            .find_by_person_id(person_id)?
            .is_some_and(|resource| resource.has_active_employment_with_enterprise(enterprise_id)))
    }

    pub fn find_labor_resources_by_enterprise(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, LaborServiceError> {
        Ok(self.repository.find_by_enterprise_id(enterprise_id)?)
    }

    pub fn find_labor_resources_by_brand(
        &self,
        brand_id: &BrandId,
    ) -> Result<Vec<LaborResource>, LaborServiceError> {
        Ok(self.repository.find_by_brand_id(brand_id)?)
    }

    pub fn find_active_labor_resources_by_enterprise(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, LaborServiceError> {
        Ok(self.repository.find_active_by_enterprise_id(enterprise_id)?)
    }

    pub fn find_active_labor_resources_by_brand(
        &self,
        brand_id: &BrandId,
    ) -> Result<Vec<LaborResource>, LaborServiceError> {
        Ok(self.repository.find_active_by_brand_id(brand_id)?)
    }

    fn ensure_person(&self, person_id: &PersonId) -> Result<(), LaborServiceError> {
        if self.persons.contains(person_id)? {
            Ok(())
        } else {
            Err(LaborError::not_found(EntityKind::Person, person_id).into())
        }
    }

    fn load(
        &self,
        labor_resource_id: &LaborResourceId,
    ) -> Result<LaborResource, LaborServiceError> {
        self.repository.find_by_id(labor_resource_id)?.ok_or_else(|| {
            LaborError::not_found(EntityKind::LaborResource, labor_resource_id).into()
        })
    }

    /// Existing resource with no pending events, or a fresh unsaved one with its creation event.
    fn load_or_new(
        &self,
        person_id: &PersonId,
    ) -> Result<(LaborResource, Vec<LaborEvent>), LaborServiceError> {
        if let Some(existing) = self.repository.find_by_person_id(person_id)? {
            return Ok((existing, Vec::new()));
        }

        self.ensure_person(person_id)?;
        let (resource, event) =
            LaborResource::create(LaborResourceId::generate(), person_id.clone())?;
        debug!(
            labor_resource_id = %resource.id(),
            %person_id,
            "labor resource opened for first employment"
        );
        Ok((resource, vec![event]))
    }

    fn commit(
        &self,
        resource: LaborResource,
        events: Vec<LaborEvent>,
    ) -> Result<LaborResource, LaborServiceError> {
        let stored = self.repository.save(resource)?;
        info!(
            labor_resource_id = %stored.id(),
            revision = stored.revision(),
            events = events.len(),
            "labor resource saved"
        );

        for event in events {
            let event_type = event.event_type();
            if let Err(err) = self.publisher.publish(event) {
                warn!(
                    labor_resource_id = %stored.id(),
                    event_type,
                    error = %err,
                    "labor event publish failed after save"
                );
                return Err(err.into());
            }
            debug!(labor_resource_id = %stored.id(), event_type, "labor event published");
        }

        Ok(stored)
    }
}

/// Error raised by the labor domain service.
#[derive(Debug, thiserror::Error)]
pub enum LaborServiceError {
    #[error(transparent)]
    Labor(#[from] LaborError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
