mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CrimeSummary, HealthInspectionSummary, RestaurantApplication};

pub const BASE_RISK_SCORE: f64 = 5.0;
pub const MIN_RISK_SCORE: f64 = 1.0;
pub const MAX_RISK_SCORE: f64 = 10.0;

/// Inputs that move the risk score away from the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Cuisine,
    AlcoholSales,
    Tenure,
    FireSuppression,
    PriorClaims,
    HealthInspection,
    CrimeExposure,
}

impl RiskFactor {
    pub const fn label(self) -> &'static str {
        match self {
            RiskFactor::Cuisine => "Cuisine",
            RiskFactor::AlcoholSales => "Alcohol sales",
            RiskFactor::Tenure => "Years in business",
            RiskFactor::FireSuppression => "Fire suppression",
            RiskFactor::PriorClaims => "Prior claims",
            RiskFactor::HealthInspection => "Health inspection",
            RiskFactor::CrimeExposure => "Crime exposure",
        }
    }
}

/// Discrete contribution to the risk score, kept for audit and explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustment {
    pub factor: RiskFactor,
    pub points: f64,
    pub notes: String,
}

impl RiskAdjustment {
    pub(crate) fn new(factor: RiskFactor, points: f64, notes: impl Into<String>) -> Self {
        Self {
            factor,
            points,
            notes: notes.into(),
        }
    }

    pub(crate) fn neutral(factor: RiskFactor, notes: impl Into<String>) -> Self {
        Self::new(factor, 0.0, notes)
    }
}

/// Scored application: the clamped score plus the trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub score: f64,
    pub raw_score: f64,
    pub adjustments: Vec<RiskAdjustment>,
}

impl RiskProfile {
    pub fn points_for(&self, factor: RiskFactor) -> f64 {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.factor == factor)
            .map(|adjustment| adjustment.points)
            .sum()
    }

    /// Adjustments that moved the score, in evaluation order.
    pub fn contributing(&self) -> impl Iterator<Item = &RiskAdjustment> {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.points != 0.0)
    }
}

/// Stateless additive scorer over the fixed factor tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn score(
        &self,
        application: &RestaurantApplication,
        health: Option<&HealthInspectionSummary>,
        crime: Option<&CrimeSummary>,
    ) -> RiskProfile {
        let adjustments = rules::score_application(application, health, crime);
        let raw_score = adjustments
            .iter()
            .fold(BASE_RISK_SCORE, |total, adjustment| total + adjustment.points);

        for adjustment in adjustments.iter().filter(|a| a.points != 0.0) {
            debug!(
                application_id = %application.application_id,
                factor = adjustment.factor.label(),
                points = adjustment.points,
                notes = %adjustment.notes,
                "risk adjustment applied"
            );
        }

        RiskProfile {
            score: clamp_risk_score(raw_score),
            raw_score,
            adjustments,
        }
    }
}

pub fn clamp_risk_score(raw: f64) -> f64 {
    raw.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE)
}

/// Score an application, returning a value in `[1.0, 10.0]`.
pub fn calculate_risk_score(
    application: &RestaurantApplication,
    health: Option<&HealthInspectionSummary>,
    crime: Option<&CrimeSummary>,
) -> f64 {
    RiskScorer.score(application, health, crime).score
}
