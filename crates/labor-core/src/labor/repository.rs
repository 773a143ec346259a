use super::events::LaborEvent;
use super::ids::{BrandId, EnterpriseId, LaborResourceId, PersonId};
use super::resource::LaborResource;

/// Storage abstraction so the domain service can be exercised in isolation.
///
/// `save` compares the aggregate's revision with the stored one and hands back the
/// persisted copy stamped with the next revision.
pub trait LaborResourceRepository: Send + Sync {
    fn save(&self, resource: LaborResource) -> Result<LaborResource, RepositoryError>;
    fn find_by_id(&self, id: &LaborResourceId) -> Result<Option<LaborResource>, RepositoryError>;
    fn find_by_person_id(
        &self,
        person_id: &PersonId,
    ) -> Result<Option<LaborResource>, RepositoryError>;
    fn find_by_enterprise_id(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError>;
    fn find_by_brand_id(&self, brand_id: &BrandId) -> Result<Vec<LaborResource>, RepositoryError>;
    fn find_active_by_enterprise_id(
        &self,
        enterprise_id: &EnterpriseId,
    ) -> Result<Vec<LaborResource>, RepositoryError>;
    fn find_active_by_brand_id(
        &self,
        brand_id: &BrandId,
    ) -> Result<Vec<LaborResource>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("revision conflict: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for domain events (message bus, outbox, audit log).
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: LaborEvent) -> Result<(), PublishError>;
}

/// Event dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Lookup into the person registry that owns natural-person records.
pub trait PersonDirectory: Send + Sync {
    fn contains(&self, person_id: &PersonId) -> Result<bool, RepositoryError>;
}
