use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::config::LaborConfig;
use crate::labor::{
    BrandId, ConflictPolicy, EmploymentEvent, EmploymentEventId, EmploymentStatus,
    EmploymentTerms, EmploymentType, EnterpriseId, EventPublisher, FixedClock, LaborDomainService,
    LaborEvent, LaborPolicyId, LaborResource, LaborResourceId, LaborResourceRepository,
    PersonDirectory, PersonId, PublishError, RepositoryError,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2023, 6, 1)
}

pub(super) fn clock() -> FixedClock {
    FixedClock::on(today())
}

pub(super) fn person() -> PersonId {
    PersonId::from("person-ada")
}

pub(super) fn enterprise() -> EnterpriseId {
    EnterpriseId::from("ent-harbor")
}

pub(super) fn brand() -> BrandId {
    BrandId::from("brand-harbor-coffee")
}

pub(super) fn terms(start: NaiveDate, end: Option<NaiveDate>) -> EmploymentTerms {
    EmploymentTerms {
        employment_type: EmploymentType::FullTime,
        enterprise_id: enterprise(),
        brand_id: brand(),
        labor_policy_id: LaborPolicyId::from("policy-standard"),
        position: "Barista".to_string(),
        department: Some("Front of house".to_string()),
        start_date: start,
        end_date: end,
    }
}

/// Terms at another employer, for exercising the conflict policies.
pub(super) fn terms_at(
    enterprise_id: &str,
    employment_type: EmploymentType,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> EmploymentTerms {
    EmploymentTerms {
        employment_type,
        enterprise_id: EnterpriseId::from(enterprise_id),
        brand_id: BrandId::from(format!("{enterprise_id}-brand")),
        ..terms(start, end)
    }
}

pub(super) fn year_2023() -> EmploymentTerms {
    terms(date(2023, 1, 1), Some(date(2023, 12, 31)))
}

pub(super) fn pending_event(terms: EmploymentTerms) -> EmploymentEvent {
    EmploymentEvent::create(
        EmploymentEventId::generate(),
        LaborResourceId::from("labor-1"),
        EmploymentStatus::PendingOnboard,
        terms,
        "employment created",
        &clock(),
    )
    .expect("pending snapshot builds")
}

pub(super) fn resource() -> LaborResource {
    let (resource, _) = LaborResource::create(LaborResourceId::from("labor-1"), person())
        .expect("resource builds");
    resource
}

pub(super) fn build_service(
    policy: ConflictPolicy,
) -> (
    LaborDomainService<MemoryRepository, MemoryPublisher>,
    Arc<MemoryRepository>,
    Arc<MemoryPublisher>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let publisher = Arc::new(MemoryPublisher::default());
    let service = LaborDomainService::with_clock(
        repository.clone(),
        publisher.clone(),
        Arc::new(MemoryPersons::with([person(), PersonId::from("person-grace")])),
        Arc::new(clock()),
        LaborConfig {
            conflict_policy: policy,
        },
    );
    (service, repository, publisher)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<LaborResourceId, LaborResource>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    fn matching(&self, predicate: impl Fn(&LaborResource) -> bool) -> Vec<LaborResource> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut found: Vec<LaborResource> =
            guard.values().filter(|r| predicate(r)).cloned().collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        found
    }
}

impl LaborResourceRepository for MemoryRepository {
    fn save(&self, resource: LaborResource) -> Result<LaborResource, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_person_id(
        &self,
        person_id: &PersonId,
    ) -> Result<Option<LaborResource>, RepositoryError> {
        Ok(self
            .matching(|resource| resource.person_id() == person_id)
            .into_iter()
            .next())
    }

    fn find_by_enterprise_id(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(self.matching(|resource| {
            !resource
                .employment_events_by_enterprise(enterprise_id)
                .is_empty()
        }))
    }

    fn find_by_brand_id(&self, brand_id: &BrandId) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(self.matching(|resource| !resource.employment_events_by_brand(brand_id).is_empty()))
    }

    fn find_active_by_enterprise_id(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(self.matching(|resource| resource.has_active_employment_with_enterprise(enterprise_id)))
    }

    fn find_active_by_brand_id(
        &self,
        brand_id: &BrandId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(self.matching(|resource| resource.has_active_employment_with_brand(brand_id)))
    }
}

pub(super) struct UnavailableRepository;

impl LaborResourceRepository for UnavailableRepository {
    fn save(&self, _resource: LaborResource) -> Result<LaborResource, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn find_by_id(&self, _id: &LaborResourceId) -> Result<Option<LaborResource>, RepositoryError> {
        Ok(None)
    }

    fn find_by_person_id(
        &self,
        _person_id: &PersonId,
    ) -> Result<Option<LaborResource>, RepositoryError> {
        Ok(None)
    }

    fn find_by_enterprise_id(
        &self,
        _enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(Vec::new())
    }

    fn find_by_brand_id(&self, _brand_id: &BrandId) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(Vec::new())
    }

    fn find_active_by_enterprise_id(
        &self,
        _enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(Vec::new())
    }

    fn find_active_by_brand_id(
        &self,
        _brand_id: &BrandId,
    ) -> Result<Vec<LaborResource>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPublisher {
    events: Arc<Mutex<Vec<LaborEvent>>>,
}

impl MemoryPublisher {
    pub(super) fn events(&self) -> Vec<LaborEvent> {
        self.events.lock().expect("publisher mutex poisoned").clone()
    }

    pub(super) fn event_types(&self) -> Vec<&'static str> {
        self.events().iter().map(LaborEvent::event_type).collect()
    }
}

impl EventPublisher for MemoryPublisher {
    fn publish(&self, event: LaborEvent) -> Result<(), PublishError> {
        self.events
            .lock()
            .expect("publisher mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct OfflinePublisher;

impl EventPublisher for OfflinePublisher {
    fn publish(&self, _event: LaborEvent) -> Result<(), PublishError> {
        Err(PublishError::Transport("broker offline".to_string()))
    }
}

pub(super) struct MemoryPersons {
    known: HashSet<PersonId>,
}

impl MemoryPersons {
    pub(super) fn with(persons: impl IntoIterator<Item = PersonId>) -> Self {
        Self {
            known: persons.into_iter().collect(),
        }
    }
}

impl PersonDirectory for MemoryPersons {
    fn contains(&self, person_id: &PersonId) -> Result<bool, RepositoryError> {
        Ok(self.known.contains(person_id))
    }
}
