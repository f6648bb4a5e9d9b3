use serde::{Deserialize, Serialize};

use super::domain::RestaurantApplication;
use super::scoring::{MAX_RISK_SCORE, MIN_RISK_SCORE};

pub const BASE_GENERAL_LIABILITY_RATE: f64 = 500.0;
pub const BASE_PROPERTY_RATE: f64 = 300.0;
/// Square footage assumed when the application gives none (or a non-positive value).
pub const DEFAULT_SQUARE_FOOTAGE: f64 = 1000.0;
const ALCOHOL_LIABILITY_LOAD: f64 = 0.5;
const SQUARE_FOOTAGE_UNIT: f64 = 1000.0;

/// Recommended premium split by coverage line, in dollars rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub total: f64,
    pub general_liability: f64,
    pub property: f64,
}

pub fn calculate_premium(application: &RestaurantApplication, risk_score: f64) -> PremiumBreakdown {
    let alcohol_share = application.alcohol_share().unwrap_or(0.0).max(0.0);
    let square_footage = application
        .square_footage
        .filter(|sq_ft| sq_ft.is_finite() && *sq_ft > 0.0)
        .unwrap_or(DEFAULT_SQUARE_FOOTAGE);
    // f64::max ignores NaN, so a NaN score also rates at the floor.
    let effective_risk_score = MIN_RISK_SCORE.max(risk_score).min(MAX_RISK_SCORE);

    let general_liability = BASE_GENERAL_LIABILITY_RATE
        * effective_risk_score
        * (1.0 + alcohol_share * ALCOHOL_LIABILITY_LOAD);
    let property =
        BASE_PROPERTY_RATE * effective_risk_score * (square_footage / SQUARE_FOOTAGE_UNIT);

    PremiumBreakdown {
        total: round_cents(general_liability + property),
        general_liability: round_cents(general_liability),
        property: round_cents(property),
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
