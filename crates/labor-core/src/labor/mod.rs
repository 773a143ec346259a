//! Employment lifecycle: linked snapshots, the labor resource aggregate, and the
//! domain service that persists and publishes through ports.

pub mod chains;
pub mod clock;
pub mod employment_type;
pub mod errors;
pub mod event;
pub mod events;
pub mod ids;
pub mod policy;
pub mod repository;
pub mod resource;
pub mod service;
pub mod status;
pub mod time_range;

#[cfg(test)]
mod tests;

pub use chains::EmploymentChains;
pub use clock::{Clock, FixedClock, SystemClock};
pub use employment_type::EmploymentType;
pub use errors::{EntityKind, LaborError};
pub use event::{EmploymentEvent, EmploymentTerms};
pub use events::{
    EmploymentCanceled, EmploymentCreated, EmploymentLeavingInitiated, EmploymentOnboarded,
    EmploymentTerminated, LaborEvent, LaborResourceCreated,
};
pub use ids::{BrandId, EmploymentEventId, EnterpriseId, LaborPolicyId, LaborResourceId, PersonId};
pub use policy::ConflictPolicy;
pub use repository::{
    EventPublisher, LaborResourceRepository, PersonDirectory, PublishError, RepositoryError,
};
pub use resource::LaborResource;
pub use service::{LaborDomainService, LaborServiceError};
pub use status::{EmploymentStatus, LifecycleOperation, TRANSITIONS};
pub use time_range::TimeRange;
