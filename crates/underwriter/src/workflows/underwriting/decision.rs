use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scoring::{MAX_RISK_SCORE, MIN_RISK_SCORE};

/// Scores at or below this value are approved.
pub const APPROVE_THRESHOLD: f64 = 3.5;
/// Scores at or below this value (and above approval) are referred.
pub const REFER_THRESHOLD: f64 = 6.5;

/// Underwriting outcome for a scored application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Refer to manual underwriter")]
    Refer,
    #[serde(rename = "Declined")]
    Declined,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::Refer => "Refer to manual underwriter",
            Decision::Declined => "Declined",
        }
    }
}

/// Reasons a score cannot be turned into a decision.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("risk score not provided")]
    MissingScore,
    #[error("invalid risk score type")]
    InvalidScoreType,
    #[error("risk score {found} out of expected range (1.0-10.0)")]
    OutOfRange { found: f64 },
}

/// Map a risk score onto a decision band.
///
/// The range check repeats the scorer's clamp so callers feeding unclamped scores are
/// still rejected.
pub fn make_decision(risk_score: f64) -> Result<Decision, DecisionError> {
    if risk_score.is_nan() {
        return Err(DecisionError::InvalidScoreType);
    }

    if !(MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&risk_score) {
        return Err(DecisionError::OutOfRange { found: risk_score });
    }

    if risk_score <= APPROVE_THRESHOLD {
        Ok(Decision::Approved)
    } else if risk_score <= REFER_THRESHOLD {
        Ok(Decision::Refer)
    } else {
        Ok(Decision::Declined)
    }
}

/// Decide from an untyped payload field, as received from callers outside the pipeline.
pub fn decide_value(raw: Option<&Value>) -> Result<Decision, DecisionError> {
    match raw {
        None | Some(Value::Null) => Err(DecisionError::MissingScore),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or(DecisionError::InvalidScoreType)
            .and_then(make_decision),
        Some(_) => Err(DecisionError::InvalidScoreType),
    }
}
