use serde::{Deserialize, Serialize};

use super::decision::{make_decision, Decision, DecisionError};
use super::domain::{ApplicationId, CrimeSummary, HealthInspectionSummary, RestaurantApplication};
use super::premium::{calculate_premium, PremiumBreakdown};
use super::scoring::{RiskAdjustment, RiskFactor, RiskProfile, RiskScorer};

const CONFIDENCE_LEVEL: f64 = 0.8;

const STANDARD_RECOMMENDATIONS: [&str; 2] = [
    "Consider further safety training for staff.",
    "Ensure fire extinguishers are regularly checked.",
];

/// Mitigation advice attached when a factor adds risk.
const FACTOR_RECOMMENDATIONS: &[(RiskFactor, &str)] = &[
    (
        RiskFactor::FireSuppression,
        "Install a UL 300 compliant kitchen fire suppression system.",
    ),
    (
        RiskFactor::Cuisine,
        "Keep a documented hood and duct cleaning schedule for fryer and grill lines.",
    ),
    (
        RiskFactor::AlcoholSales,
        "Require responsible alcohol service certification for bar staff.",
    ),
    (
        RiskFactor::Tenure,
        "Pair new management with a written safety onboarding program.",
    ),
    (
        RiskFactor::PriorClaims,
        "Submit a loss-control plan addressing prior claims.",
    ),
    (
        RiskFactor::HealthInspection,
        "Schedule a third-party food safety audit before binding.",
    ),
    (
        RiskFactor::CrimeExposure,
        "Add monitored alarm coverage and exterior security lighting.",
    ),
];

/// Combined underwriting recommendation for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub application_id: ApplicationId,
    pub risk_score: f64,
    pub confidence_level: f64,
    pub decision: Decision,
    pub recommended_premium: f64,
    pub premium_breakdown: PremiumBreakdown,
    pub risk_factors: Vec<RiskAdjustment>,
    pub risk_mitigation_recommendations: Vec<String>,
    pub required_documentation: Vec<String>,
    pub explanation_factors: Vec<String>,
}

/// Runs scoring, then decision and premium rating off the same score.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderwritingPipeline {
    scorer: RiskScorer,
}

impl UnderwritingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assess(
        &self,
        application: &RestaurantApplication,
        health: Option<&HealthInspectionSummary>,
        crime: Option<&CrimeSummary>,
    ) -> Result<AssessmentResult, DecisionError> {
        let profile = self.scorer.score(application, health, crime);
        let decision = make_decision(profile.score)?;
        let premium = calculate_premium(application, profile.score);

        Ok(AssessmentResult {
            application_id: application.application_id.clone(),
            risk_score: profile.score,
            confidence_level: CONFIDENCE_LEVEL,
            decision,
            recommended_premium: premium.total,
            premium_breakdown: premium,
            risk_mitigation_recommendations: recommendations(&profile),
            required_documentation: required_documentation(application),
            explanation_factors: explanation_factors(application, &profile, decision),
            risk_factors: profile.adjustments,
        })
    }
}

fn recommendations(profile: &RiskProfile) -> Vec<String> {
    let mut advice: Vec<String> = FACTOR_RECOMMENDATIONS
        .iter()
        .filter(|(factor, _)| profile.points_for(*factor) > 0.0)
        .map(|(_, text)| text.to_string())
        .collect();
    advice.extend(STANDARD_RECOMMENDATIONS.iter().map(|text| text.to_string()));
    advice
}

fn required_documentation(application: &RestaurantApplication) -> Vec<String> {
    let mut documents = vec![
        "Copy of valid business license.".to_string(),
        "Latest health inspection report.".to_string(),
    ];

    if application.alcohol_share().is_some_and(|share| share > 0.0) {
        documents.push("Current liquor license.".to_string());
    }
    if application.previous_claims_count.is_some_and(|count| count > 0) {
        documents.push("Five-year loss runs from prior carriers.".to_string());
    }

    documents
}

fn explanation_factors(
    application: &RestaurantApplication,
    profile: &RiskProfile,
    decision: Decision,
) -> Vec<String> {
    let mut factors = vec![
        format!("Calculated risk score: {:.2}", profile.score),
        format!("Decision based on risk score: {}", decision.label()),
        format!(
            "Cuisine type considered: {}",
            application.cuisine_type.as_deref().unwrap_or("not provided")
        ),
        match application.years_in_business {
            Some(years) => format!("Years in business: {years}"),
            None => "Years in business: not provided".to_string(),
        },
        match application.alcohol_share() {
            Some(share) => format!("Alcohol sales percentage: {:.1}%", share * 100.0),
            None => "Alcohol sales percentage: not provided".to_string(),
        },
    ];

    factors.extend(profile.contributing().map(|adjustment| {
        format!(
            "{}: {:+.2} ({})",
            adjustment.factor.label(),
            adjustment.points,
            adjustment.notes
        )
    }));

    if profile.raw_score != profile.score {
        factors.push(format!(
            "Raw score {:.2} capped to {:.2}",
            profile.raw_score, profile.score
        ));
    }

    factors
}
