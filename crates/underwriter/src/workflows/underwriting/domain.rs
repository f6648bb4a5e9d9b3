use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw applicant answers as received at intake, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationSubmission {
    pub business_name: String,
    pub address: String,
    pub cuisine_type: Option<String>,
    pub alcohol_sales_percentage: Option<f64>,
    pub operating_hours: Option<String>,
    pub square_footage: Option<f64>,
    pub building_age: Option<u32>,
    pub fire_suppression_system_type: Option<String>,
    pub years_in_business: Option<u32>,
    pub management_experience_years: Option<u32>,
    pub has_delivery_operations: Option<bool>,
    pub has_catering_operations: Option<bool>,
    pub seating_capacity: Option<u32>,
    pub annual_revenue: Option<f64>,
    pub health_inspection_score: Option<f64>,
    pub previous_claims_count: Option<u32>,
}

/// Validated application consumed by the scoring pipeline.
///
/// Only cuisine, alcohol share, tenure, fire suppression, prior claims, and square footage
/// feed the pipeline. The remaining fields are carried through for the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantApplication {
    pub application_id: ApplicationId,
    pub business_name: String,
    pub address: String,
    pub cuisine_type: Option<String>,
    pub alcohol_sales_percentage: Option<f64>,
    pub operating_hours: Option<String>,
    pub square_footage: Option<f64>,
    pub building_age: Option<u32>,
    pub fire_suppression_system_type: Option<String>,
    pub years_in_business: Option<u32>,
    pub management_experience_years: Option<u32>,
    pub has_delivery_operations: Option<bool>,
    pub has_catering_operations: Option<bool>,
    pub seating_capacity: Option<u32>,
    pub annual_revenue: Option<f64>,
    pub health_inspection_score: Option<f64>,
    pub previous_claims_count: Option<u32>,
}

impl RestaurantApplication {
    pub fn from_submission(application_id: ApplicationId, submission: ApplicationSubmission) -> Self {
        let ApplicationSubmission {
            business_name,
            address,
            cuisine_type,
            alcohol_sales_percentage,
            operating_hours,
            square_footage,
            building_age,
            fire_suppression_system_type,
            years_in_business,
            management_experience_years,
            has_delivery_operations,
            has_catering_operations,
            seating_capacity,
            annual_revenue,
            health_inspection_score,
            previous_claims_count,
        } = submission;

        Self {
            application_id,
            business_name,
            address,
            cuisine_type,
            alcohol_sales_percentage,
            operating_hours,
            square_footage,
            building_age,
            fire_suppression_system_type,
            years_in_business,
            management_experience_years,
            has_delivery_operations,
            has_catering_operations,
            seating_capacity,
            annual_revenue,
            health_inspection_score,
            previous_claims_count,
        }
    }

    /// Alcohol share with non-finite values treated as absent.
    pub fn alcohol_share(&self) -> Option<f64> {
        self.alcohol_sales_percentage.filter(|share| share.is_finite())
    }
}

/// Loosely typed third-party payload.
///
/// Lookups may return partial data or signal failure through an `error` key. Accessors
/// never fail: a missing or wrong-typed field reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichmentRecord(Map<String, Value>);

impl EnrichmentRecord {
    pub const ERROR_KEY: &'static str = "error";

    /// Present-but-degraded record produced when a lookup fails.
    pub fn degraded(reason: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(Self::ERROR_KEY.to_string(), Value::String(reason.into()));
        Self(fields)
    }

    /// Build a record from a JSON value, keeping only object payloads.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn lookup_failed(&self) -> bool {
        self.0.contains_key(Self::ERROR_KEY)
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get(Self::ERROR_KEY).map(|value| match value {
            Value::String(reason) => reason.as_str(),
            _ => "lookup failed",
        })
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Health-inspection lookup result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthInspectionSummary(pub EnrichmentRecord);

impl HealthInspectionSummary {
    pub const LATEST_SCORE: &'static str = "latest_score";
    pub const CRITICAL_VIOLATIONS: &'static str = "critical_violations_last_year";

    /// Most recent inspection score (0-100). `None` when missing or the lookup failed.
    pub fn latest_score(&self) -> Option<f64> {
        self.readable()
            .and_then(|record| record.number(Self::LATEST_SCORE))
    }

    pub fn critical_violations(&self) -> Option<f64> {
        self.readable()
            .and_then(|record| record.number(Self::CRITICAL_VIOLATIONS))
    }

    pub fn lookup_error(&self) -> Option<&str> {
        self.0.error()
    }

    fn readable(&self) -> Option<&EnrichmentRecord> {
        (!self.0.lookup_failed()).then_some(&self.0)
    }
}

/// Neighborhood crime lookup result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrimeSummary(pub EnrichmentRecord);

impl CrimeSummary {
    pub const CRIME_LEVEL: &'static str = "crime_level_area";
    pub const SAFETY_SCORE: &'static str = "safety_score";

    pub fn crime_level(&self) -> Option<CrimeLevel> {
        self.readable()
            .and_then(|record| record.text(Self::CRIME_LEVEL))
            .and_then(CrimeLevel::parse)
    }

    /// Area safety score where lower means less safe.
    pub fn safety_score(&self) -> Option<f64> {
        self.readable()
            .and_then(|record| record.number(Self::SAFETY_SCORE))
    }

    pub fn lookup_error(&self) -> Option<&str> {
        self.0.error()
    }

    fn readable(&self) -> Option<&EnrichmentRecord> {
        (!self.0.lookup_failed()).then_some(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrimeLevel {
    Low,
    Medium,
    High,
}

impl CrimeLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CrimeLevel::Low => "Low",
            CrimeLevel::Medium => "Medium",
            CrimeLevel::High => "High",
        }
    }
}
