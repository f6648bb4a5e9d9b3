use super::common::*;
use approx::assert_relative_eq;
use serde_json::json;

use crate::workflows::underwriting::scoring::{RiskFactor, RiskScorer};
use crate::workflows::underwriting::calculate_risk_score;

#[test]
fn neutral_application_without_enrichment_scores_base_plus_penalties() {
    let application = base_application();

    assert_eq!(calculate_risk_score(&application, None, None), 5.75);
}

#[test]
fn scoring_is_repeatable() {
    let application = base_application();
    let health = health(json!({ "latest_score": 80, "critical_violations_last_year": 2 }));
    let crime = crime(json!({ "crime_level_area": "Medium", "safety_score": 6.5 }));

    let first = RiskScorer.score(&application, Some(&health), Some(&crime));
    let second = RiskScorer.score(&application, Some(&health), Some(&crime));

    assert_eq!(first, second);
    assert_eq!(first.score, 7.5);
}

#[test]
fn worst_case_application_is_capped_at_ten() {
    let application = application_with(|app| {
        app.cuisine_type = Some("Steakhouse".to_string());
        app.alcohol_sales_percentage = Some(0.8);
        app.fire_suppression_system_type = Some("None".to_string());
        app.years_in_business = Some(1);
        app.previous_claims_count = Some(5);
    });
    let health = health(json!({ "latest_score": 65, "critical_violations_last_year": 5 }));
    let crime = crime(json!({ "crime_level_area": "High", "safety_score": 3.2 }));

    let profile = RiskScorer.score(&application, Some(&health), Some(&crime));

    assert_eq!(profile.score, 10.0);
    assert_eq!(profile.raw_score, 18.5);
}

#[test]
fn best_case_application_reaches_three() {
    let application = application_with(|app| {
        app.cuisine_type = Some("Salad Bar".to_string());
        app.alcohol_sales_percentage = Some(0.0);
        app.fire_suppression_system_type = Some("Ansul Kitchen Suppression".to_string());
        app.years_in_business = Some(20);
    });
    let health = health(json!({ "latest_score": 98, "critical_violations_last_year": 0 }));
    let crime = crime(json!({ "crime_level_area": "Low", "safety_score": 8.5 }));

    assert_eq!(
        calculate_risk_score(&application, Some(&health), Some(&crime)),
        3.0
    );
}

#[test]
fn cuisine_matching_ignores_case_and_padding() {
    let padded = application_with(|app| app.cuisine_type = Some("  SteakHouse ".to_string()));
    let italian = application_with(|app| app.cuisine_type = Some("italian".to_string()));
    let fine_dining = application_with(|app| app.cuisine_type = Some("Fine Dining".to_string()));

    assert_eq!(calculate_risk_score(&padded, None, None), 7.25);
    assert_eq!(calculate_risk_score(&italian, None, None), 6.25);
    assert_relative_eq!(calculate_risk_score(&fine_dining, None, None), 5.55);
}

#[test]
fn unrated_or_missing_cuisine_is_neutral() {
    let unrated = application_with(|app| app.cuisine_type = Some("Martian Fusion".to_string()));
    let missing = application_with(|app| app.cuisine_type = None);
    let partial = application_with(|app| app.cuisine_type = Some("sushi bar".to_string()));

    assert_eq!(calculate_risk_score(&unrated, None, None), 5.75);
    assert_eq!(calculate_risk_score(&missing, None, None), 5.75);
    assert_eq!(calculate_risk_score(&partial, None, None), 5.75);
}

#[test]
fn alcohol_bands_use_strict_thresholds() {
    let cases = [
        (Some(0.25), 5.75),
        (Some(0.26), 6.25),
        (Some(0.5), 6.25),
        (Some(0.51), 7.25),
        (None, 5.75),
    ];

    for (share, expected) in cases {
        let application = application_with(|app| app.alcohol_sales_percentage = share);
        assert_eq!(
            calculate_risk_score(&application, None, None),
            expected,
            "alcohol share {share:?}"
        );
    }
}

#[test]
fn tenure_rewards_established_businesses() {
    let cases = [
        (Some(0), 6.75),
        (Some(1), 6.75),
        (Some(2), 5.75),
        (Some(10), 5.75),
        (Some(11), 5.25),
        (None, 5.75),
    ];

    for (years, expected) in cases {
        let application = application_with(|app| app.years_in_business = years);
        assert_eq!(
            calculate_risk_score(&application, None, None),
            expected,
            "years in business {years:?}"
        );
    }
}

#[test]
fn fire_suppression_keywords_are_recognised() {
    let dedicated = [
        "ansul",
        "Ansul System",
        "Kitchen Hood System",
        "wet chemical kitchen suppression unit",
    ];
    for system in dedicated {
        let application =
            application_with(|app| app.fire_suppression_system_type = Some(system.to_string()));
        assert_eq!(
            calculate_risk_score(&application, None, None),
            4.75,
            "system {system}"
        );
    }

    let sprinkler =
        application_with(|app| app.fire_suppression_system_type = Some("Sprinkler".to_string()));
    assert_eq!(calculate_risk_score(&sprinkler, None, None), 5.25);

    let sprinkler_plus = application_with(|app| {
        app.fire_suppression_system_type = Some("sprinkler and extinguishers".to_string())
    });
    assert_eq!(calculate_risk_score(&sprinkler_plus, None, None), 5.75);
}

#[test]
fn absent_fire_suppression_is_penalised() {
    for system in [Some("NONE".to_string()), Some(String::new()), None] {
        let application =
            application_with(|app| app.fire_suppression_system_type = system.clone());
        assert_eq!(
            calculate_risk_score(&application, None, None),
            7.75,
            "system {system:?}"
        );
    }
}

#[test]
fn padded_or_blank_fire_suppression_is_unrated() {
    for system in ["   ", " none ", " Sprinkler "] {
        let application =
            application_with(|app| app.fire_suppression_system_type = Some(system.to_string()));
        let profile = RiskScorer.score(&application, None, None);

        assert_eq!(profile.score, 5.75, "system {system:?}");
        assert_eq!(profile.points_for(RiskFactor::FireSuppression), 0.0);
    }
}

#[test]
fn prior_claims_escalate_above_two() {
    let cases = [
        (Some(0), 5.75),
        (Some(1), 6.25),
        (Some(2), 6.25),
        (Some(3), 7.25),
        (None, 5.75),
    ];

    for (claims, expected) in cases {
        let application = application_with(|app| app.previous_claims_count = claims);
        assert_eq!(
            calculate_risk_score(&application, None, None),
            expected,
            "claims {claims:?}"
        );
    }
}

#[test]
fn health_sub_rules_stack() {
    let application = base_application();
    let cases = [
        (json!({ "latest_score": 65, "critical_violations_last_year": 5 }), 8.75),
        (json!({ "latest_score": 80, "critical_violations_last_year": 2 }), 6.75),
        (json!({ "latest_score": 85, "critical_violations_last_year": 1 }), 5.75),
        (json!({ "latest_score": 98, "critical_violations_last_year": 0 }), 5.25),
        (json!({ "latest_score": 69.9 }), 7.25),
    ];

    for (payload, expected) in cases {
        let summary = health(payload.clone());
        assert_eq!(
            calculate_risk_score(&application, Some(&summary), None),
            expected,
            "health payload {payload}"
        );
    }
}

#[test]
fn empty_health_record_differs_from_missing_one() {
    let application = base_application();
    let empty = health(json!({}));
    let wrong_types = health(json!({
        "latest_score": "bad",
        "critical_violations_last_year": "several",
    }));

    assert_eq!(calculate_risk_score(&application, None, None), 5.75);
    assert_eq!(calculate_risk_score(&application, Some(&empty), None), 5.25);
    assert_eq!(
        calculate_risk_score(&application, Some(&wrong_types), None),
        5.25
    );
}

#[test]
fn degraded_lookups_score_as_present_but_empty() {
    let application = base_application();
    let health = health(json!({ "error": "timeout", "latest_score": 40 }));
    let crime = crime(json!({ "error": "rate limited", "crime_level_area": "High" }));

    let profile = RiskScorer.score(&application, Some(&health), Some(&crime));

    assert_eq!(profile.score, 5.0);
    assert_eq!(profile.points_for(RiskFactor::HealthInspection), 0.0);
    assert_eq!(profile.points_for(RiskFactor::CrimeExposure), 0.0);
}

#[test]
fn crime_sub_rules_stack() {
    let application = base_application();
    let cases = [
        (json!({ "crime_level_area": "High", "safety_score": 3.2 }), 8.0),
        (json!({ "crime_level_area": "medium", "safety_score": 6.5 }), 6.5),
        (json!({ "crime_level_area": "Low", "safety_score": 8.5 }), 5.5),
        (json!({ "crime_level_area": "Unknown", "safety_score": 7.0 }), 5.5),
        (json!({}), 5.5),
    ];

    for (payload, expected) in cases {
        let summary = crime(payload.clone());
        assert_eq!(
            calculate_risk_score(&application, None, Some(&summary)),
            expected,
            "crime payload {payload}"
        );
    }
}

#[test]
fn profile_keeps_one_adjustment_per_factor() {
    let application = application_with(|app| {
        app.fire_suppression_system_type = Some("Ansul".to_string());
        app.previous_claims_count = Some(1);
    });

    let profile = RiskScorer.score(&application, None, None);
    let factors: Vec<RiskFactor> = profile
        .adjustments
        .iter()
        .map(|adjustment| adjustment.factor)
        .collect();

    assert_eq!(
        factors,
        vec![
            RiskFactor::Cuisine,
            RiskFactor::AlcoholSales,
            RiskFactor::Tenure,
            RiskFactor::FireSuppression,
            RiskFactor::PriorClaims,
            RiskFactor::HealthInspection,
            RiskFactor::CrimeExposure,
        ]
    );
    assert_eq!(profile.points_for(RiskFactor::FireSuppression), -1.0);
    assert_eq!(profile.contributing().count(), 4);
}

#[test]
fn crime_notes_name_the_area_level() {
    let application = base_application();
    let summary = crime(json!({ "crime_level_area": "high", "safety_score": 8.0 }));

    let profile = RiskScorer.score(&application, None, Some(&summary));
    let crime_notes = profile
        .adjustments
        .iter()
        .find(|adjustment| adjustment.factor == RiskFactor::CrimeExposure)
        .map(|adjustment| adjustment.notes.as_str());

    assert_eq!(crime_notes, Some("crime level High; safety score 8.0"));
}
