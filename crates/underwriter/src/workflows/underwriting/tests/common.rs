use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::underwriting::domain::{
    ApplicationId, CrimeSummary, EnrichmentRecord, HealthInspectionSummary, RestaurantApplication,
};
use crate::workflows::underwriting::enrichment::{
    CrimeStatisticsSource, EnrichmentError, EnrichmentSources, HealthInspectionSource,
};
use crate::workflows::underwriting::repository::{
    ApplicationRecord, ApplicationRepository, InMemoryApplicationRepository, RepositoryError,
};
use crate::workflows::underwriting::{underwriting_router, UnderwritingService};

/// Application whose every scored field lands on a zero adjustment.
pub(super) fn base_application() -> RestaurantApplication {
    RestaurantApplication {
        application_id: ApplicationId("app-test".to_string()),
        business_name: "Testaurant".to_string(),
        address: "123 Test St".to_string(),
        cuisine_type: Some("Greek".to_string()),
        alcohol_sales_percentage: Some(0.1),
        operating_hours: Some("9am-10pm".to_string()),
        square_footage: Some(1500.0),
        building_age: Some(5),
        fire_suppression_system_type: Some("Portable extinguishers".to_string()),
        years_in_business: Some(5),
        management_experience_years: Some(5),
        has_delivery_operations: Some(false),
        has_catering_operations: Some(false),
        seating_capacity: Some(50),
        annual_revenue: Some(300_000.0),
        health_inspection_score: Some(90.0),
        previous_claims_count: Some(0),
    }
}

pub(super) fn application_with(
    edit: impl FnOnce(&mut RestaurantApplication),
) -> RestaurantApplication {
    let mut application = base_application();
    edit(&mut application);
    application
}

pub(super) fn health(value: Value) -> HealthInspectionSummary {
    HealthInspectionSummary(EnrichmentRecord::from_value(value).expect("object payload"))
}

pub(super) fn crime(value: Value) -> CrimeSummary {
    CrimeSummary(EnrichmentRecord::from_value(value).expect("object payload"))
}

/// A complete submission as an HTTP client would send it.
pub(super) fn submission_payload() -> Value {
    json!({
        "business_name": "The Testy Taverna",
        "address": "789 Test Lane",
        "cuisine_type": "Greek",
        "alcohol_sales_percentage": 0.35,
        "operating_hours": "12pm-11pm",
        "square_footage": 2000,
        "building_age": 15,
        "fire_suppression_system_type": "Ansul",
        "years_in_business": 7,
        "management_experience_years": 5,
        "has_delivery_operations": true,
        "has_catering_operations": true,
        "seating_capacity": 70,
        "annual_revenue": 600000.00,
        "health_inspection_score": 92.0,
        "previous_claims_count": 1
    })
}

pub(super) fn payload_with(key: &str, value: Value) -> Value {
    let mut payload = submission_payload();
    payload[key] = value;
    payload
}

pub(super) fn payload_without(key: &str) -> Value {
    let mut payload = submission_payload();
    if let Some(fields) = payload.as_object_mut() {
        fields.remove(key);
    }
    payload
}

pub(super) fn mock_sources() -> EnrichmentSources {
    EnrichmentSources::new(
        Arc::new(crate::workflows::underwriting::MockHealthInspectionClient::default()),
        Arc::new(crate::workflows::underwriting::MockCrimeStatisticsClient::default()),
    )
}

pub(super) fn build_service() -> (
    UnderwritingService<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let service = UnderwritingService::new(repository.clone(), mock_sources());
    (service, repository)
}

pub(super) fn router_with_service(
    service: UnderwritingService<InMemoryApplicationRepository>,
) -> axum::Router {
    underwriting_router(Arc::new(service))
}

pub(super) struct FailingSource;

impl HealthInspectionSource for FailingSource {
    fn inspection_summary(
        &self,
        _address: &str,
        _business_name: &str,
    ) -> Result<Option<HealthInspectionSummary>, EnrichmentError> {
        Err(EnrichmentError::Unavailable {
            source_name: "health department",
            reason: "timeout".to_string(),
        })
    }
}

impl CrimeStatisticsSource for FailingSource {
    fn crime_summary(&self, _address: &str) -> Result<Option<CrimeSummary>, EnrichmentError> {
        Err(EnrichmentError::Unavailable {
            source_name: "crime statistics",
            reason: "rate limited".to_string(),
        })
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
