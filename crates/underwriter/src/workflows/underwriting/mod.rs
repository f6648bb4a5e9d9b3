//! Restaurant underwriting: intake, enrichment, risk scoring, decisioning, and premium rating.
//!
//! The scoring, decision, and premium stages are pure functions of their inputs. Everything
//! stateful (identifier assignment, enrichment lookups, storage) lives in the service layer.

pub mod decision;
pub mod domain;
pub mod enrichment;
pub mod intake;
pub mod pipeline;
pub mod premium;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use decision::{decide_value, make_decision, Decision, DecisionError};
pub use domain::{
    ApplicationId, ApplicationSubmission, CrimeLevel, CrimeSummary, EnrichmentRecord,
    HealthInspectionSummary, RestaurantApplication,
};
pub use enrichment::{
    CrimeStatisticsSource, DisabledEnrichment, EnrichmentData, EnrichmentError,
    EnrichmentSources, HealthInspectionSource, MockCrimeStatisticsClient,
    MockHealthInspectionClient,
};
pub use intake::{IntakeGuard, IntakeViolation, REQUIRED_FIELDS};
pub use pipeline::{AssessmentResult, UnderwritingPipeline};
pub use premium::{calculate_premium, PremiumBreakdown};
pub use repository::{
    ApplicationRecord, ApplicationRepository, InMemoryApplicationRepository, RepositoryError,
};
pub use router::underwriting_router;
pub use scoring::{calculate_risk_score, RiskAdjustment, RiskFactor, RiskProfile, RiskScorer};
pub use service::{UnderwritingService, UnderwritingServiceError};
