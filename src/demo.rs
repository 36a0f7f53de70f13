use admission_ai::eligibility::{EligibilityEngine, Preferences, Qualification};
use admission_ai::error::AppError;
use admission_ai::profile::{build_report, ProfileReport};

pub(crate) fn sample_qualifications() -> Vec<Qualification> {
    vec![
        Qualification::new("Mathematics", "85"),
        Qualification::new("English Home Language", "78"),
        Qualification::new("Physical Sciences", "82"),
        Qualification::new("Life Sciences", "75"),
        Qualification::new("Geography", "70"),
        Qualification::new("Life Orientation", "80"),
    ]
}

pub(crate) fn sample_preferences() -> Preferences {
    Preferences {
        career_field: Some("Engineering & Technology".to_string()),
        location_preference: Some("Gauteng".to_string()),
        study_mode: Some("Full-time on campus".to_string()),
        financial_aid: Some(serde_json::Value::from("Yes")),
    }
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let engine = EligibilityEngine::standard();
    let qualifications = sample_qualifications();
    let preferences = sample_preferences();

    let report = build_report(&engine, &qualifications, &preferences)?;
    render_report(&qualifications, &report);

    println!("\nCourse screening");
    for field in engine.policy().course_fields() {
        let result = engine
            .check_course_eligibility(&qualifications, field)
            .map_err(admission_ai::profile::ProfileError::from)?;
        let verdict = if result.eligible { "eligible" } else { "not eligible" };
        println!("- {field}: {verdict} ({}% match)", result.match_percentage);
        for missing in &result.missing_requirements {
            println!("    missing {missing}");
        }
    }

    Ok(())
}

fn render_report(qualifications: &[Qualification], report: &ProfileReport) {
    println!("Admission profile demo");
    println!("\nTranscript");
    for qualification in qualifications {
        let mark = qualification
            .mark()
            .ok()
            .flatten()
            .map(|mark| format!("{mark}%"))
            .unwrap_or_else(|| "n/a".to_string());
        println!("- {}: {mark}", qualification.subject_label());
    }

    let summary = &report.university_match;
    println!("\nAPS: {}", report.aps_score);
    println!(
        "Overall match: {:.1} (academic {:.1}, APS {:.1}, preferences {})",
        summary.overall_match,
        summary.academic_score,
        summary.aps_contribution,
        summary.preference_score
    );

    if report.course_recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &report.course_recommendations {
            println!(
                "- {} [{}] {}%",
                recommendation.field,
                recommendation.status.label(),
                recommendation.match_score
            );
        }
    }

    println!("\nInsights");
    for insight in &report.insights {
        println!("- {insight}");
    }
}
