//! Third-party lookups that enrich an application before scoring.
//!
//! Sources return `Ok(None)` when they have nothing to say about an applicant. A failed
//! lookup is folded into a degraded record (an `error` key only) so the scorer treats it as
//! present-but-empty rather than unknown.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, warn};

use super::domain::{CrimeSummary, EnrichmentRecord, HealthInspectionSummary, RestaurantApplication};
use crate::config::{mask_api_key, EnrichmentConfig};

/// Lookup failure reported by an enrichment source.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("{source_name} lookup unavailable: {reason}")]
    Unavailable {
        source_name: &'static str,
        reason: String,
    },
}

pub trait HealthInspectionSource: Send + Sync {
    fn inspection_summary(
        &self,
        address: &str,
        business_name: &str,
    ) -> Result<Option<HealthInspectionSummary>, EnrichmentError>;
}

pub trait CrimeStatisticsSource: Send + Sync {
    fn crime_summary(&self, address: &str) -> Result<Option<CrimeSummary>, EnrichmentError>;
}

/// Enrichment gathered for a single application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentData {
    pub health: Option<HealthInspectionSummary>,
    pub crime: Option<CrimeSummary>,
}

/// Pair of sources consulted for every submission.
#[derive(Clone)]
pub struct EnrichmentSources {
    health: Arc<dyn HealthInspectionSource>,
    crime: Arc<dyn CrimeStatisticsSource>,
}

impl EnrichmentSources {
    pub fn new(
        health: Arc<dyn HealthInspectionSource>,
        crime: Arc<dyn CrimeStatisticsSource>,
    ) -> Self {
        Self { health, crime }
    }

    /// Mock sources when enrichment is enabled, otherwise sources that never answer.
    pub fn from_config(config: &EnrichmentConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        Self::new(
            Arc::new(MockHealthInspectionClient::new(config.health_api_key.clone())),
            Arc::new(MockCrimeStatisticsClient::new(config.crime_api_key.clone())),
        )
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledEnrichment), Arc::new(DisabledEnrichment))
    }

    pub fn gather(&self, application: &RestaurantApplication) -> EnrichmentData {
        let health = match self
            .health
            .inspection_summary(&application.address, &application.business_name)
        {
            Ok(summary) => summary,
            Err(err) => {
                warn!(application_id = %application.application_id, error = %err, "health inspection lookup failed");
                Some(HealthInspectionSummary(EnrichmentRecord::degraded(err.to_string())))
            }
        };

        let crime = match self.crime.crime_summary(&application.address) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(application_id = %application.application_id, error = %err, "crime statistics lookup failed");
                Some(CrimeSummary(EnrichmentRecord::degraded(err.to_string())))
            }
        };

        EnrichmentData { health, crime }
    }
}

/// Source that never returns data, used when enrichment is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEnrichment;

impl HealthInspectionSource for DisabledEnrichment {
    fn inspection_summary(
        &self,
        _address: &str,
        _business_name: &str,
    ) -> Result<Option<HealthInspectionSummary>, EnrichmentError> {
        Ok(None)
    }
}

impl CrimeStatisticsSource for DisabledEnrichment {
    fn crime_summary(&self, _address: &str) -> Result<Option<CrimeSummary>, EnrichmentError> {
        Ok(None)
    }
}

const MOCK_HEALTH_SOURCE: &str = "mock_health_department_api";
const MOCK_CRIME_SOURCE: &str = "mock_crime_statistics_api";

/// Canned health-department profiles keyed by business name.
#[derive(Debug, Clone, Default)]
pub struct MockHealthInspectionClient {
    api_key: Option<String>,
}

impl MockHealthInspectionClient {
    pub fn new(api_key: Option<String>) -> Self {
        match api_key.as_deref() {
            Some(key) => info!(api_key = %mask_api_key(key), "mock health inspection client initialized"),
            None => info!("mock health inspection client initialized"),
        }
        Self { api_key }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl HealthInspectionSource for MockHealthInspectionClient {
    fn inspection_summary(
        &self,
        address: &str,
        business_name: &str,
    ) -> Result<Option<HealthInspectionSummary>, EnrichmentError> {
        info!(
            %business_name,
            %address,
            authenticated = self.has_api_key(),
            "fetching mock health inspection data"
        );

        let payload = match business_name.to_lowercase().as_str() {
            "the risky diner" => json!({
                "latest_score": 65,
                "last_inspection_date": "2023-01-10",
                "critical_violations_last_year": 5,
                "non_critical_violations_last_year": 10,
                "summary_url": "http://example.com/inspections/risky_diner",
                "source": MOCK_HEALTH_SOURCE,
            }),
            "super clean eats" => json!({
                "latest_score": 98,
                "last_inspection_date": "2023-11-20",
                "critical_violations_last_year": 0,
                "non_critical_violations_last_year": 1,
                "summary_url": "http://example.com/inspections/super_clean_eats",
                "source": MOCK_HEALTH_SOURCE,
            }),
            _ => json!({
                "latest_score": 85,
                "last_inspection_date": "2023-06-01",
                "critical_violations_last_year": 1,
                "non_critical_violations_last_year": 3,
                "summary_url": "http://example.com/inspections/generic",
                "source": MOCK_HEALTH_SOURCE,
            }),
        };

        Ok(record(payload).map(HealthInspectionSummary))
    }
}

/// Canned crime profiles keyed by address fragments.
#[derive(Debug, Clone, Default)]
pub struct MockCrimeStatisticsClient {
    api_key: Option<String>,
}

impl MockCrimeStatisticsClient {
    pub fn new(api_key: Option<String>) -> Self {
        match api_key.as_deref() {
            Some(key) => info!(api_key = %mask_api_key(key), "mock crime statistics client initialized"),
            None => info!("mock crime statistics client initialized"),
        }
        Self { api_key }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl CrimeStatisticsSource for MockCrimeStatisticsClient {
    fn crime_summary(&self, address: &str) -> Result<Option<CrimeSummary>, EnrichmentError> {
        info!(
            %address,
            authenticated = self.has_api_key(),
            "fetching mock crime statistics"
        );

        let address = address.to_lowercase();
        let payload = if address.contains("123 main st") {
            json!({
                "crime_level_area": "Low",
                "theft_incidents_last_year_nearby": 2,
                "vandalism_incidents_last_year_nearby": 0,
                "assault_incidents_last_year_nearby": 1,
                "safety_score": 8.5,
                "source": MOCK_CRIME_SOURCE,
            })
        } else if address.contains("999 danger ave") {
            json!({
                "crime_level_area": "High",
                "theft_incidents_last_year_nearby": 25,
                "vandalism_incidents_last_year_nearby": 10,
                "assault_incidents_last_year_nearby": 7,
                "safety_score": 3.2,
                "source": MOCK_CRIME_SOURCE,
            })
        } else {
            json!({
                "crime_level_area": "Medium",
                "theft_incidents_last_year_nearby": 7,
                "vandalism_incidents_last_year_nearby": 3,
                "assault_incidents_last_year_nearby": 2,
                "safety_score": 6.5,
                "source": MOCK_CRIME_SOURCE,
            })
        };

        Ok(record(payload).map(CrimeSummary))
    }
}

fn record(payload: Value) -> Option<EnrichmentRecord> {
    EnrichmentRecord::from_value(payload)
}
