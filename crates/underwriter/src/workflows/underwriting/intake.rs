use serde_json::Value;

use super::domain::ApplicationSubmission;

/// Keys every submission must carry. Nullable fields may be sent as `null`, but not omitted.
pub const REQUIRED_FIELDS: [&str; 16] = [
    "business_name",
    "address",
    "cuisine_type",
    "alcohol_sales_percentage",
    "operating_hours",
    "square_footage",
    "building_age",
    "fire_suppression_system_type",
    "years_in_business",
    "management_experience_years",
    "has_delivery_operations",
    "has_catering_operations",
    "seating_capacity",
    "annual_revenue",
    "health_inspection_score",
    "previous_claims_count",
];

/// Server-assigned key that clients may echo back; it is dropped before validation.
const ASSIGNED_ID_FIELD: &str = "application_id";

/// Validation errors raised while accepting a submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("No input data provided")]
    NoInput,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Invalid application data format: {0}")]
    InvalidFormat(String),
}

/// Guard responsible for producing `ApplicationSubmission` instances from raw payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn submission_from_payload(
        &self,
        payload: Value,
    ) -> Result<ApplicationSubmission, IntakeViolation> {
        let mut fields = match payload {
            Value::Object(fields) if !fields.is_empty() => fields,
            Value::Object(_) | Value::Null => return Err(IntakeViolation::NoInput),
            other => {
                return Err(IntakeViolation::InvalidFormat(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !fields.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IntakeViolation::MissingFields(missing));
        }

        fields.remove(ASSIGNED_ID_FIELD);

        let submission: ApplicationSubmission = serde_json::from_value(Value::Object(fields))
            .map_err(|err| IntakeViolation::InvalidFormat(err.to_string()))?;

        validate_ranges(&submission)?;
        Ok(submission)
    }
}

fn validate_ranges(submission: &ApplicationSubmission) -> Result<(), IntakeViolation> {
    if let Some(share) = submission.alcohol_sales_percentage {
        if !share.is_finite() || !(0.0..=1.0).contains(&share) {
            return Err(IntakeViolation::InvalidFormat(format!(
                "alcohol_sales_percentage must be a fraction between 0.0 and 1.0 (found {share})"
            )));
        }
    }

    if let Some(revenue) = submission.annual_revenue {
        if !revenue.is_finite() || revenue < 0.0 {
            return Err(IntakeViolation::InvalidFormat(format!(
                "annual_revenue must be non-negative (found {revenue})"
            )));
        }
    }

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
