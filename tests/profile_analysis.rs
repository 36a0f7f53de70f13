use admission_ai::eligibility::{
    EligibilityEngine, Preferences, Qualification, RecommendationStatus, ScoringPolicy,
};
use admission_ai::profile::{analyze_profile, ProfileErrorKind};
use admission_ai::analyze_student_profile;
use serde_json::{json, Value};
use std::sync::Arc;

fn sample_payloads() -> (String, String) {
    let qualifications = json!([
        { "subject": "Mathematics", "mark": "85" },
        { "subject": "English Home Language", "mark": "78" },
        { "subject": "Physical Sciences", "mark": "82" },
        { "subject": "Life Sciences", "mark": "75" },
        { "subject": "Geography", "mark": "70" },
        { "subject": "Life Orientation", "mark": "80" }
    ]);
    let preferences = json!({
        "career_field": "Engineering & Technology",
        "location_preference": "Gauteng",
        "study_mode": "Full-time on campus",
        "financial_aid": "Yes"
    });
    (qualifications.to_string(), preferences.to_string())
}

#[test]
fn sample_learner_is_highly_recommended_for_engineering() {
    let (qualifications, preferences) = sample_payloads();

    let raw = analyze_student_profile(&qualifications, &preferences);
    let report: Value = serde_json::from_str(&raw).expect("report is json");

    assert_eq!(report["aps_score"], json!(39));
    assert_eq!(report["university_match"]["aps_score"], json!(39));
    assert_eq!(report["university_match"]["preference_score"], json!(30));

    let recommendations = report["course_recommendations"]
        .as_array()
        .expect("recommendation list");
    let fields: Vec<&str> = recommendations
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["Engineering", "Commerce", "Science", "Humanities"]);
    assert_eq!(recommendations[0]["status"], json!("Highly Recommended"));
    assert_eq!(recommendations[0]["match_score"], json!(100));
    assert_eq!(
        recommendations[0]["requirements_met"],
        json!([
            "Mathematics: 85%/70%",
            "Physical Sciences: 82%/70%",
            "English: 78%/60%",
            "APS Score: 39/35"
        ])
    );

    assert_eq!(
        report["insights"],
        json!([
            "Strong academic performance opens doors to most university programs.",
            "Your APS score qualifies you for most university programs."
        ])
    );
}

#[test]
fn malformed_payloads_never_produce_partial_reports() {
    let (qualifications, preferences) = sample_payloads();

    for (qualifications, preferences) in [
        ("[{\"subject\": \"Mathematics\", ", preferences.as_str()),
        (qualifications.as_str(), "\"Gauteng\""),
        ("42", preferences.as_str()),
    ] {
        let raw = analyze_student_profile(qualifications, preferences);
        let report: Value = serde_json::from_str(&raw).expect("error is json");
        let object = report.as_object().expect("object");

        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["error"]);
    }
}

#[test]
fn typed_errors_distinguish_failure_kinds() {
    let engine = EligibilityEngine::standard();

    let format = analyze_profile(&engine, "{", "{}").expect_err("malformed");
    assert_eq!(format.kind(), ProfileErrorKind::InputFormat);

    let conversion = analyze_profile(&engine, r#"[{"subject": "English", "mark": "B"}]"#, "{}")
        .expect_err("bad mark");
    assert_eq!(conversion.kind(), ProfileErrorKind::ValueConversion);
}

#[test]
fn custom_normalization_changes_aps_contribution() {
    let mut policy = (*ScoringPolicy::standard()).clone();
    policy.aps_scale.normalization = 60;
    policy.validate().expect("custom policy validates");
    let engine = EligibilityEngine::new(Arc::new(policy));

    let qualifications = vec![
        Qualification::new("Mathematics", 90),
        Qualification::new("English Home Language", 90),
    ];
    let outcome = engine
        .university_match(&qualifications, &Preferences::default())
        .expect("match computes");

    assert_eq!(outcome.aps_score, 14);
    assert!((outcome.aps_contribution - 14.0 / 60.0 * 30.0).abs() < 1e-9);
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(EligibilityEngine::standard());
    let qualifications = Arc::new(vec![
        Qualification::new("Mathematics", 72),
        Qualification::new("English First Additional Language", 66),
        Qualification::new("Accounting", 70),
        Qualification::new("Business Studies", 74),
        Qualification::new("Economics", 68),
        Qualification::new("Life Orientation", 80),
    ]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let qualifications = Arc::clone(&qualifications);
            std::thread::spawn(move || {
                engine
                    .course_recommendations(&qualifications, &Preferences::default())
                    .expect("ranking succeeds")
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread completes"))
        .collect();

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0].len(), 2);
    assert_eq!(results[0][0].field, "Commerce");
    assert_eq!(results[0][0].status, RecommendationStatus::AlternativeOption);
}
