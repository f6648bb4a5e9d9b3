use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use underwriter::config::AppConfig;
use underwriter::error::AppError;
use underwriter::workflows::underwriting::{
    AssessmentResult, EnrichmentSources, InMemoryApplicationRepository,
    MockCrimeStatisticsClient, MockHealthInspectionClient, UnderwritingService,
};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a JSON file holding one application submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Skip third-party enrichment lookups for this run
    #[arg(long)]
    pub(crate) no_enrichment: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        no_enrichment,
    } = args;

    let config = AppConfig::load()?;
    let enrichment = if no_enrichment {
        EnrichmentSources::disabled()
    } else {
        EnrichmentSources::from_config(&config.enrichment)
    };

    let raw = std::fs::read_to_string(&input)?;
    let payload: Value = serde_json::from_str(&raw)?;
    let assessment = assess_payload(payload, enrichment)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = UnderwritingService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        mock_enrichment(),
    );

    println!("Restaurant underwriting demo (mock enrichment profiles)");
    for payload in demo_profiles() {
        let business_name = payload["business_name"]
            .as_str()
            .unwrap_or("unnamed applicant")
            .to_string();

        match service.submit(payload) {
            Ok(record) => match record.assessment {
                Some(assessment) => render_assessment(&business_name, &assessment),
                None => println!("\n{business_name}: assessment unavailable"),
            },
            Err(err) => println!("\n{business_name}: submission rejected: {err}"),
        }
    }

    Ok(())
}

fn assess_payload(
    payload: Value,
    enrichment: EnrichmentSources,
) -> Result<AssessmentResult, AppError> {
    let service = UnderwritingService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        enrichment,
    );
    let record = service.submit(payload)?;
    let application_id = record.id().clone();

    Ok(service.assessment(&application_id)?)
}

fn mock_enrichment() -> EnrichmentSources {
    EnrichmentSources::new(
        Arc::new(MockHealthInspectionClient::default()),
        Arc::new(MockCrimeStatisticsClient::default()),
    )
}

fn render_assessment(business_name: &str, assessment: &AssessmentResult) {
    println!("\n{business_name} ({})", assessment.application_id);
    println!(
        "- Risk score {:.2} | {} | confidence {:.0}%",
        assessment.risk_score,
        assessment.decision.label(),
        assessment.confidence_level * 100.0
    );
    println!(
        "- Premium ${:.2} (general liability ${:.2}, property ${:.2})",
        assessment.recommended_premium,
        assessment.premium_breakdown.general_liability,
        assessment.premium_breakdown.property
    );

    println!("  Explanation");
    for line in &assessment.explanation_factors {
        println!("  - {line}");
    }

    println!("  Recommendations");
    for line in &assessment.risk_mitigation_recommendations {
        println!("  - {line}");
    }

    println!("  Required documentation");
    for line in &assessment.required_documentation {
        println!("  - {line}");
    }
}

fn demo_profiles() -> Vec<Value> {
    vec![
        profile(
            "Super Clean Eats",
            "123 Main St",
            json!({
                "cuisine_type": "Sushi",
                "alcohol_sales_percentage": 0.1,
                "fire_suppression_system_type": "Ansul",
                "years_in_business": 12,
                "previous_claims_count": 0,
                "square_footage": 1800,
            }),
        ),
        profile(
            "Corner Bistro",
            "42 Elsewhere Blvd",
            json!({
                "cuisine_type": "Italian",
                "alcohol_sales_percentage": 0.2,
                "fire_suppression_system_type": "Sprinkler",
                "years_in_business": 5,
                "previous_claims_count": 0,
                "square_footage": 2200,
            }),
        ),
        profile(
            "The Risky Diner",
            "999 Danger Ave",
            json!({
                "cuisine_type": "Fast Food",
                "alcohol_sales_percentage": 0.6,
                "fire_suppression_system_type": "None",
                "years_in_business": 1,
                "previous_claims_count": 3,
                "square_footage": 2500,
            }),
        ),
    ]
}

fn profile(business_name: &str, address: &str, overrides: Value) -> Value {
    let mut payload = json!({
        "business_name": business_name,
        "address": address,
        "cuisine_type": null,
        "alcohol_sales_percentage": null,
        "operating_hours": "11am-11pm",
        "square_footage": null,
        "building_age": 25,
        "fire_suppression_system_type": null,
        "years_in_business": null,
        "management_experience_years": 6,
        "has_delivery_operations": true,
        "has_catering_operations": false,
        "seating_capacity": 80,
        "annual_revenue": 750000.0,
        "health_inspection_score": null,
        "previous_claims_count": null
    });

    if let (Some(fields), Value::Object(extra)) = (payload.as_object_mut(), overrides) {
        fields.extend(extra);
    }
    payload
}
