use chrono::NaiveDate;
use labor_core::labor::{
    BrandId, Clock, ConflictPolicy, EnterpriseId, EventPublisher, LaborEvent, LaborResource,
    LaborResourceId, LaborResourceRepository, PersonDirectory, PersonId, PublishError,
    RepositoryError, SystemClock,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub(crate) struct InMemoryLaborResourceRepository {
    records: Mutex<HashMap<LaborResourceId, LaborResource>>,
}

impl InMemoryLaborResourceRepository {
    fn records(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<LaborResourceId, LaborResource>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }

    /// Every stored resource, ordered by person for stable output.
    pub(crate) fn all(&self) -> Result<Vec<LaborResource>, RepositoryError> {
        let mut resources: Vec<LaborResource> = self.records()?.values().cloned().collect();
        resources.sort_by(|a, b| a.person_id().cmp(b.person_id()));
        Ok(resources)
    }

    fn matching(
        &self,
        predicate: impl Fn(&LaborResource) -> bool,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|resource| predicate(resource))
            .collect())
    }
}

impl LaborResourceRepository for InMemoryLaborResourceRepository {
    fn save(&self, resource: LaborResource) -> Result<LaborResource, RepositoryError> {
        let mut guard = self.records()?;
        if !guard.contains_key(resource.id()) {
            if let Some(existing) = guard
                .values()
                .find(|stored| stored.person_id() == resource.person_id())
            {
                return Err(RepositoryError::Conflict(format!(
                    "person {} already has labor resource {}",
                    resource.person_id(),
                    existing.id()
                )));
            }
        }
        let stored_revision = guard.get(resource.id()).map_or(0, LaborResource::revision);
        if stored_revision != resource.revision() {
            return Err(RepositoryError::Conflict(format!(
                "labor resource {} is at revision {stored_revision}, not {}",
                resource.id(),
                resource.revision()
            )));
        }

        let stored = resource.with_revision(stored_revision + 1);
        guard.insert(stored.id().clone(), stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: &LaborResourceId) -> Result<Option<LaborResource>, RepositoryError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn find_by_person_id(
        &self,
        person_id: &PersonId,
    ) -> Result<Option<LaborResource>, RepositoryError> {
        Ok(self
            .records()?
            .values()
            .find(|resource| resource.person_id() == person_id)
            .cloned())
    }

    fn find_by_enterprise_id(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        self.matching(|resource| {
            !resource
                .employment_events_by_enterprise(enterprise_id)
                .is_empty()
        })
    }

    fn find_by_brand_id(&self, brand_id: &BrandId) -> Result<Vec<LaborResource>, RepositoryError> {
        self.matching(|resource| !resource.employment_events_by_brand(brand_id).is_empty())
    }

    fn find_active_by_enterprise_id(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        self.matching(|resource| resource.has_active_employment_with_enterprise(enterprise_id))
    }

    fn find_active_by_brand_id(
        &self,
        brand_id: &BrandId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        self.matching(|resource| resource.has_active_employment_with_brand(brand_id))
    }
}

#[derive(Default)]
pub(crate) struct InMemoryEventPublisher {
    events: Mutex<Vec<LaborEvent>>,
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: LaborEvent) -> Result<(), PublishError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| PublishError::Transport("publisher mutex poisoned".to_string()))?;
        guard.push(event);
        Ok(())
    }
}

impl InMemoryEventPublisher {
    pub(crate) fn events(&self) -> Vec<LaborEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Person registry stand-in that knows everybody.
pub(crate) struct OpenPersonDirectory;

impl PersonDirectory for OpenPersonDirectory {
    fn contains(&self, person_id: &PersonId) -> Result<bool, RepositoryError> {
        Ok(!person_id.as_str().trim().is_empty())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// `--today` when given, otherwise the UTC date the system clock stamps events with.
pub(crate) fn resolve_today(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(|| SystemClock.today())
}

pub(crate) fn parse_conflict_policy(raw: &str) -> Result<ConflictPolicy, String> {
    ConflictPolicy::parse(raw).ok_or_else(|| {
        format!(
            "unknown conflict policy '{raw}' (expected any_overlap or same_enterprise_and_type)"
        )
    })
}
