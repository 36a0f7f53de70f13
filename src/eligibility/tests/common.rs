use crate::eligibility::{EligibilityEngine, Preferences, Qualification};

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::standard()
}

pub(super) fn qualification(subject: &str, mark: i64) -> Qualification {
    Qualification::new(subject, mark)
}

/// Transcript used by the questionnaire demo.
pub(super) fn sample_transcript() -> Vec<Qualification> {
    vec![
        Qualification::new("Mathematics", "85"),
        Qualification::new("English Home Language", "78"),
        Qualification::new("Physical Sciences", "82"),
        Qualification::new("Life Sciences", "75"),
        Qualification::new("Geography", "70"),
        Qualification::new("Life Orientation", "80"),
    ]
}

pub(super) fn sample_preferences() -> Preferences {
    Preferences {
        career_field: Some("Engineering & Technology".to_string()),
        location_preference: Some("Gauteng".to_string()),
        study_mode: Some("Full-time on campus".to_string()),
        financial_aid: Some(serde_json::json!("Yes")),
    }
}

/// Transcript that clears only the Humanities thresholds.
pub(super) fn humanities_transcript() -> Vec<Qualification> {
    vec![
        qualification("English First Additional Language", 72),
        qualification("History", 68),
        qualification("Mathematical Literacy", 61),
        qualification("Geography", 66),
        qualification("Life Orientation", 74),
        qualification("Tourism", 63),
        qualification("Business Studies", 59),
    ]
}
