pub mod advisor;
pub mod config;
pub mod domain;
pub mod errors;

pub use advisor::catalog::{Catalog, CatalogIssue};
pub use advisor::intake::{validate_profile, IntakeResult, IntakeViolation, ProfileSelection};
pub use advisor::summary::SummaryRenderer;
pub use advisor::{recommend, AdvisorEngine, DeterministicAdvisor};
pub use domain::profile::CustomerProfile;
pub use domain::recommendation::{
    NextStepSection, Recommendation, RecommendationWarning, WarningLevel,
};
pub use domain::reference::{
    Capability, ContractTier, ContractType, ContractTypeId, FinancingId, GenerationAssetId,
    OperationsId, RegionId, SegmentId, ValueStreamId,
};
pub use errors::{ApplicationError, DomainError};
