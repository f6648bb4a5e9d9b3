use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::decision::{decide_value, Decision, DecisionError};
use super::domain::{ApplicationId, RestaurantApplication};
use super::enrichment::EnrichmentSources;
use super::intake::{IntakeGuard, IntakeViolation};
use super::pipeline::{AssessmentResult, UnderwritingPipeline};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};

/// Service composing intake validation, enrichment, the scoring pipeline, and storage.
pub struct UnderwritingService<R> {
    guard: IntakeGuard,
    repository: Arc<R>,
    enrichment: EnrichmentSources,
    pipeline: UnderwritingPipeline,
}

fn next_application_id() -> ApplicationId {
    ApplicationId(Uuid::new_v4().simple().to_string())
}

impl<R> UnderwritingService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, enrichment: EnrichmentSources) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            enrichment,
            pipeline: UnderwritingPipeline::new(),
        }
    }

    /// Validate, store, enrich, and assess a raw submission.
    pub fn submit(&self, payload: Value) -> Result<ApplicationRecord, UnderwritingServiceError> {
        let submission = self.guard.submission_from_payload(payload)?;
        let application =
            RestaurantApplication::from_submission(next_application_id(), submission);
        let application_id = application.application_id.clone();

        let mut record = self.repository.insert(ApplicationRecord {
            application,
            submitted_at: Utc::now(),
            assessment: None,
        })?;
        info!(%application_id, business = %record.application.business_name, "application received");

        let enrichment = self.enrichment.gather(&record.application);
        let assessment = self
            .pipeline
            .assess(
                &record.application,
                enrichment.health.as_ref(),
                enrichment.crime.as_ref(),
            )
            .map_err(|source| UnderwritingServiceError::Assessment {
                application_id: application_id.clone(),
                source,
            })?;

        info!(
            %application_id,
            risk_score = assessment.risk_score,
            decision = assessment.decision.label(),
            premium = assessment.recommended_premium,
            "application assessed"
        );

        record.assessment = Some(assessment);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Fetch the stored application as submitted.
    pub fn application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, UnderwritingServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Fetch the assessment produced for an application.
    pub fn assessment(
        &self,
        application_id: &ApplicationId,
    ) -> Result<AssessmentResult, UnderwritingServiceError> {
        self.application(application_id)?
            .assessment
            .ok_or(UnderwritingServiceError::Repository(RepositoryError::NotFound))
    }

    /// Decide directly from a caller-provided score, bypassing the scorer.
    pub fn decide(&self, raw_score: Option<&Value>) -> Result<Decision, DecisionError> {
        decide_value(raw_score)
    }
}

/// Error raised by the underwriting service.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("assessment failed for {application_id}: {source}")]
    Assessment {
        application_id: ApplicationId,
        source: DecisionError,
    },
}
