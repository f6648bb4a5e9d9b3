use super::super::domain::{CrimeLevel, CrimeSummary, HealthInspectionSummary, RestaurantApplication};
use super::{RiskAdjustment, RiskFactor};

/// Cuisine hazard table, matched against the lowercase-trimmed cuisine type.
pub(crate) const CUISINE_ADJUSTMENTS: &[(&str, f64)] = &[
    ("sushi", -0.5),
    ("salad bar", -0.5),
    ("cafe", -0.5),
    ("fine dining", -0.2),
    ("italian", 0.5),
    ("mexican", 0.5),
    ("chinese", 0.5),
    ("steakhouse", 1.5),
    ("fast food", 1.5),
];

#[derive(Debug, Clone, Copy)]
pub(crate) enum SuppressionMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl SuppressionMatch {
    fn matches(self, system: &str) -> bool {
        match self {
            SuppressionMatch::Exact(keyword) => system == keyword,
            SuppressionMatch::Contains(keyword) => system.contains(keyword),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SuppressionRule {
    pub matcher: SuppressionMatch,
    pub points: f64,
    pub notes: &'static str,
}

/// Points applied when no suppression system is declared.
pub(crate) const MISSING_SUPPRESSION_POINTS: f64 = 2.0;

/// Evaluated in order against the lowercase system description; the first hit wins.
pub(crate) const FIRE_SUPPRESSION_RULES: &[SuppressionRule] = &[
    SuppressionRule {
        matcher: SuppressionMatch::Exact("none"),
        points: MISSING_SUPPRESSION_POINTS,
        notes: "no fire suppression system",
    },
    SuppressionRule {
        matcher: SuppressionMatch::Exact("sprinkler"),
        points: -0.5,
        notes: "building sprinkler system",
    },
    SuppressionRule {
        matcher: SuppressionMatch::Contains("ansul"),
        points: -1.0,
        notes: "dedicated kitchen suppression (Ansul)",
    },
    SuppressionRule {
        matcher: SuppressionMatch::Contains("kitchen hood"),
        points: -1.0,
        notes: "dedicated kitchen hood suppression",
    },
    SuppressionRule {
        matcher: SuppressionMatch::Contains("kitchen suppression"),
        points: -1.0,
        notes: "dedicated kitchen suppression",
    },
];

pub(crate) const MISSING_HEALTH_POINTS: f64 = 0.5;
pub(crate) const MISSING_CRIME_POINTS: f64 = 0.25;

pub(crate) fn score_application(
    application: &RestaurantApplication,
    health: Option<&HealthInspectionSummary>,
    crime: Option<&CrimeSummary>,
) -> Vec<RiskAdjustment> {
    vec![
        cuisine(application.cuisine_type.as_deref()),
        alcohol(application.alcohol_share()),
        tenure(application.years_in_business),
        fire_suppression(application.fire_suppression_system_type.as_deref()),
        prior_claims(application.previous_claims_count),
        health_inspection(health),
        crime_exposure(crime),
    ]
}

fn cuisine(raw: Option<&str>) -> RiskAdjustment {
    let Some(cuisine) = raw
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
    else {
        return RiskAdjustment::neutral(RiskFactor::Cuisine, "cuisine not provided");
    };

    match CUISINE_ADJUSTMENTS
        .iter()
        .find(|(keyword, _)| *keyword == cuisine)
    {
        Some((keyword, points)) => RiskAdjustment::new(
            RiskFactor::Cuisine,
            *points,
            format!("cuisine '{keyword}' in hazard table"),
        ),
        None => RiskAdjustment::neutral(
            RiskFactor::Cuisine,
            format!("cuisine '{cuisine}' not rated"),
        ),
    }
}

fn alcohol(share: Option<f64>) -> RiskAdjustment {
    match share {
        Some(share) if share > 0.5 => RiskAdjustment::new(
            RiskFactor::AlcoholSales,
            1.5,
            format!("alcohol sales {:.0}% above 50%", share * 100.0),
        ),
        Some(share) if share > 0.25 => RiskAdjustment::new(
            RiskFactor::AlcoholSales,
            0.5,
            format!("alcohol sales {:.0}% above 25%", share * 100.0),
        ),
        Some(share) => RiskAdjustment::neutral(
            RiskFactor::AlcoholSales,
            format!("alcohol sales {:.0}%", share * 100.0),
        ),
        None => RiskAdjustment::neutral(RiskFactor::AlcoholSales, "alcohol sales not provided"),
    }
}

fn tenure(years: Option<u32>) -> RiskAdjustment {
    match years {
        Some(years) if years < 2 => RiskAdjustment::new(
            RiskFactor::Tenure,
            1.0,
            format!("{years} year(s) in business"),
        ),
        Some(years) if years > 10 => RiskAdjustment::new(
            RiskFactor::Tenure,
            -0.5,
            format!("established {years} years"),
        ),
        Some(years) => {
            RiskAdjustment::neutral(RiskFactor::Tenure, format!("{years} years in business"))
        }
        None => RiskAdjustment::neutral(RiskFactor::Tenure, "tenure not provided"),
    }
}

fn fire_suppression(raw: Option<&str>) -> RiskAdjustment {
    // Lowercased only: padded keywords and blank text fall through as unrated systems.
    let Some(system) = raw
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
    else {
        return RiskAdjustment::new(
            RiskFactor::FireSuppression,
            MISSING_SUPPRESSION_POINTS,
            "fire suppression not declared",
        );
    };

    match FIRE_SUPPRESSION_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&system))
    {
        Some(rule) => RiskAdjustment::new(RiskFactor::FireSuppression, rule.points, rule.notes),
        None => RiskAdjustment::neutral(
            RiskFactor::FireSuppression,
            format!("unrated system '{system}'"),
        ),
    }
}

fn prior_claims(count: Option<u32>) -> RiskAdjustment {
    match count {
        Some(count) if count > 2 => RiskAdjustment::new(
            RiskFactor::PriorClaims,
            1.5,
            format!("{count} prior claims"),
        ),
        Some(count) if count >= 1 => RiskAdjustment::new(
            RiskFactor::PriorClaims,
            0.5,
            format!("{count} prior claim(s)"),
        ),
        Some(_) => RiskAdjustment::neutral(RiskFactor::PriorClaims, "no prior claims"),
        None => RiskAdjustment::neutral(RiskFactor::PriorClaims, "claims history not provided"),
    }
}

fn health_inspection(health: Option<&HealthInspectionSummary>) -> RiskAdjustment {
    let Some(health) = health else {
        return RiskAdjustment::new(
            RiskFactor::HealthInspection,
            MISSING_HEALTH_POINTS,
            "no health inspection data",
        );
    };

    if let Some(reason) = health.lookup_error() {
        return RiskAdjustment::neutral(
            RiskFactor::HealthInspection,
            format!("health lookup degraded: {reason}"),
        );
    }

    let mut points = 0.0;
    let mut notes = Vec::new();

    match health.latest_score() {
        Some(score) if score < 70.0 => {
            points += 2.0;
            notes.push(format!("inspection score {score:.0} below 70"));
        }
        Some(score) if score < 85.0 => {
            points += 1.0;
            notes.push(format!("inspection score {score:.0} below 85"));
        }
        Some(score) => notes.push(format!("inspection score {score:.0}")),
        None => {}
    }

    match health.critical_violations() {
        Some(count) if count > 3.0 => {
            points += 1.5;
            notes.push(format!("{count:.0} critical violations"));
        }
        Some(count) if count > 0.0 => {
            points += 0.5;
            notes.push(format!("{count:.0} critical violation(s)"));
        }
        Some(_) => notes.push("no critical violations".to_string()),
        None => {}
    }

    RiskAdjustment::new(RiskFactor::HealthInspection, points, joined(notes))
}

fn crime_exposure(crime: Option<&CrimeSummary>) -> RiskAdjustment {
    let Some(crime) = crime else {
        return RiskAdjustment::new(
            RiskFactor::CrimeExposure,
            MISSING_CRIME_POINTS,
            "no crime statistics",
        );
    };

    if let Some(reason) = crime.lookup_error() {
        return RiskAdjustment::neutral(
            RiskFactor::CrimeExposure,
            format!("crime lookup degraded: {reason}"),
        );
    }

    let mut points = 0.0;
    let mut notes = Vec::new();

    if let Some(level) = crime.crime_level() {
        points += match level {
            CrimeLevel::High => 1.5,
            CrimeLevel::Medium => 0.5,
            CrimeLevel::Low => 0.0,
        };
        notes.push(format!("crime level {}", level.label()));
    }

    match crime.safety_score() {
        Some(score) if score < 4.0 => {
            points += 1.0;
            notes.push(format!("safety score {score:.1} below 4.0"));
        }
        Some(score) if score < 7.0 => {
            points += 0.5;
            notes.push(format!("safety score {score:.1} below 7.0"));
        }
        Some(score) => notes.push(format!("safety score {score:.1}")),
        None => {}
    }

    RiskAdjustment::new(RiskFactor::CrimeExposure, points, joined(notes))
}

fn joined(notes: Vec<String>) -> String {
    if notes.is_empty() {
        "no usable fields".to_string()
    } else {
        notes.join("; ")
    }
}
