//! Report assembly: serialized transcript and questionnaire in, profile report out.

mod import;
mod insights;

pub use import::qualifications_from_csv;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::eligibility::{
    EligibilityEngine, EligibilityError, Preferences, Qualification, Recommendation,
    UniversityMatch,
};
use insights::generate_insights;

/// Which serialized input failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Qualifications,
    Preferences,
    Request,
    MarksCsv,
}

impl Payload {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Qualifications => "qualifications",
            Self::Preferences => "preferences",
            Self::Request => "request",
            Self::MarksCsv => "marks CSV",
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("malformed {payload} payload: {detail}")]
    InputFormat { payload: Payload, detail: String },
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}

/// Coarse failure category, stable across error message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileErrorKind {
    InputFormat,
    ValueConversion,
    UnknownCourseField,
}

impl ProfileError {
    pub(crate) fn input(payload: Payload, detail: impl fmt::Display) -> Self {
        Self::InputFormat {
            payload,
            detail: detail.to_string(),
        }
    }

    pub fn kind(&self) -> ProfileErrorKind {
        match self {
            ProfileError::InputFormat { .. } => ProfileErrorKind::InputFormat,
            ProfileError::Eligibility(EligibilityError::ValueConversion { .. }) => {
                ProfileErrorKind::ValueConversion
            }
            ProfileError::Eligibility(EligibilityError::UnknownCourseField(_)) => {
                ProfileErrorKind::UnknownCourseField
            }
        }
    }
}

/// Complete analysis of a student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub university_match: UniversityMatch,
    pub course_recommendations: Vec<Recommendation>,
    pub insights: Vec<String>,
    pub aps_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

/// Wire shape of an analysis: the full report or a lone `error` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Report(ProfileReport),
    Error(ErrorReport),
}

impl From<Result<ProfileReport, ProfileError>> for ProfileResponse {
    fn from(result: Result<ProfileReport, ProfileError>) -> Self {
        match result {
            Ok(report) => ProfileResponse::Report(report),
            Err(error) => ProfileResponse::Error(ErrorReport {
                error: error.to_string(),
            }),
        }
    }
}

/// Body accepted by the HTTP analysis endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub qualifications: serde_json::Value,
    #[serde(default = "empty_preferences")]
    pub preferences: serde_json::Value,
}

fn empty_preferences() -> serde_json::Value {
    json!({})
}

pub fn parse_qualifications(raw: &str) -> Result<Vec<Qualification>, ProfileError> {
    serde_json::from_str(raw).map_err(|err| ProfileError::input(Payload::Qualifications, err))
}

pub fn parse_preferences(raw: &str) -> Result<Preferences, ProfileError> {
    serde_json::from_str(raw).map_err(|err| ProfileError::input(Payload::Preferences, err))
}

pub fn parse_request(raw: &str) -> Result<(Vec<Qualification>, Preferences), ProfileError> {
    let request: AnalyzeRequest =
        serde_json::from_str(raw).map_err(|err| ProfileError::input(Payload::Request, err))?;
    let qualifications = serde_json::from_value(request.qualifications)
        .map_err(|err| ProfileError::input(Payload::Qualifications, err))?;
    let preferences = serde_json::from_value(request.preferences)
        .map_err(|err| ProfileError::input(Payload::Preferences, err))?;
    Ok((qualifications, preferences))
}

/// Run the full pipeline over already-parsed inputs.
pub fn build_report(
    engine: &EligibilityEngine,
    qualifications: &[Qualification],
    preferences: &Preferences,
) -> Result<ProfileReport, ProfileError> {
    let university_match = engine.university_match(qualifications, preferences)?;
    let course_recommendations = engine.course_recommendations(qualifications, preferences)?;
    let insights = generate_insights(&university_match);

    debug!(
        aps = university_match.aps_score,
        overall = university_match.overall_match,
        recommendations = course_recommendations.len(),
        "profile analysed"
    );

    Ok(ProfileReport {
        aps_score: university_match.aps_score,
        university_match,
        course_recommendations,
        insights,
    })
}

pub fn analyze_profile(
    engine: &EligibilityEngine,
    qualifications_json: &str,
    preferences_json: &str,
) -> Result<ProfileReport, ProfileError> {
    parse_qualifications(qualifications_json)
        .and_then(|qualifications| {
            let preferences = parse_preferences(preferences_json)?;
            build_report(engine, &qualifications, &preferences)
        })
        .inspect_err(|err| {
            warn!(error = %err, kind = ?err.kind(), "profile analysis rejected");
        })
}

/// Serialized entry point: always returns JSON, either the report or `{"error": ...}`.
pub fn analyze_student_profile(qualifications_json: &str, preferences_json: &str) -> String {
    let engine = EligibilityEngine::standard();
    let response = ProfileResponse::from(analyze_profile(
        &engine,
        qualifications_json,
        preferences_json,
    ));

    serde_json::to_string_pretty(&response)
        .unwrap_or_else(|err| json!({ "error": err.to_string() }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SAMPLE_QUALIFICATIONS: &str = r#"[
        {"subject": "Mathematics", "mark": "85"},
        {"subject": "English Home Language", "mark": "78"},
        {"subject": "Physical Sciences", "mark": "82"},
        {"subject": "Life Sciences", "mark": "75"},
        {"subject": "Geography", "mark": "70"},
        {"subject": "Life Orientation", "mark": "80"}
    ]"#;

    const SAMPLE_PREFERENCES: &str = r#"{
        "career_field": "Engineering & Technology",
        "location_preference": "Gauteng",
        "study_mode": "Full-time on campus",
        "financial_aid": "Yes"
    }"#;

    #[test]
    fn sample_profile_produces_full_report() {
        let report = analyze_profile(
            &EligibilityEngine::standard(),
            SAMPLE_QUALIFICATIONS,
            SAMPLE_PREFERENCES,
        )
        .expect("report builds");

        assert_eq!(report.aps_score, 39);
        assert_eq!(report.university_match.aps_score, 39);
        assert_eq!(report.course_recommendations[0].field, "Engineering");
        assert_eq!(
            report.insights,
            vec![
                "Strong academic performance opens doors to most university programs.".to_string(),
                "Your APS score qualifies you for most university programs.".to_string(),
            ]
        );
    }

    #[test]
    fn serialized_report_has_expected_top_level_keys() {
        let raw = analyze_student_profile(SAMPLE_QUALIFICATIONS, SAMPLE_PREFERENCES);
        let value: Value = serde_json::from_str(&raw).expect("valid json");

        let object = value.as_object().expect("report object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["aps_score", "course_recommendations", "insights", "university_match"]
        );
        assert_eq!(
            value["course_recommendations"][0]["status"],
            Value::from("Highly Recommended")
        );
        assert_eq!(value["university_match"]["preference_score"], Value::from(30));
    }

    #[test]
    fn malformed_input_yields_error_only_report() {
        for (qualifications, preferences) in [
            ("not json", SAMPLE_PREFERENCES),
            (SAMPLE_QUALIFICATIONS, "{"),
            (r#"{"subject": "Mathematics"}"#, SAMPLE_PREFERENCES),
            (SAMPLE_QUALIFICATIONS, "null"),
        ] {
            let raw = analyze_student_profile(qualifications, preferences);
            let value: Value = serde_json::from_str(&raw).expect("valid json");

            let object = value.as_object().expect("error object");
            assert_eq!(object.len(), 1, "unexpected report: {raw}");
            assert!(object["error"].as_str().is_some_and(|msg| msg.contains("malformed")));
        }
    }

    #[test]
    fn non_numeric_mark_is_reported_as_value_conversion() {
        let error = analyze_profile(
            &EligibilityEngine::standard(),
            r#"[{"subject": "Mathematics", "mark": "eighty"}]"#,
            "{}",
        )
        .expect_err("mark rejected");

        assert_eq!(error.kind(), ProfileErrorKind::ValueConversion);

        let raw = analyze_student_profile(r#"[{"subject": "Mathematics", "mark": "eighty"}]"#, "{}");
        let value: Value = serde_json::from_str(&raw).expect("valid json");
        assert!(value.get("university_match").is_none());
        assert!(value["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("eighty")));
    }

    #[test]
    fn request_body_defaults_missing_preferences() {
        let body = format!(r#"{{"qualifications": {SAMPLE_QUALIFICATIONS}}}"#);

        let (qualifications, preferences) = parse_request(&body).expect("request parses");

        assert_eq!(qualifications.len(), 6);
        assert_eq!(preferences, Preferences::default());
    }

    #[test]
    fn request_body_reports_which_payload_failed() {
        let error = parse_request(r#"{"qualifications": {"subject": 1}, "preferences": {}}"#)
            .expect_err("qualifications must be a list");

        match error {
            ProfileError::InputFormat { payload, .. } => {
                assert_eq!(payload, Payload::Qualifications)
            }
            other => panic!("expected input format error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_preferences_are_rejected_after_qualifications_parse() {
        let error = analyze_profile(&EligibilityEngine::standard(), SAMPLE_QUALIFICATIONS, "[1, 2")
            .expect_err("preferences rejected");

        assert_eq!(error.kind(), ProfileErrorKind::InputFormat);
        match error {
            ProfileError::InputFormat { payload, .. } => assert_eq!(payload, Payload::Preferences),
            other => panic!("expected input format error, got {other:?}"),
        }
    }

    #[test]
    fn oversized_marks_still_produce_a_full_report() {
        let qualifications = format!(
            r#"[{{"subject": "Geography", "mark": {max}}}, {{"subject": "History", "mark": {max}}}, {{"subject": "Mathematics", "mark": 1}}]"#,
            max = i64::MAX
        );

        let raw = analyze_student_profile(&qualifications, SAMPLE_PREFERENCES);
        let value: Value = serde_json::from_str(&raw).expect("valid json");

        assert!(value.get("error").is_none(), "unexpected error: {raw}");
        let overall = value["university_match"]["overall_match"]
            .as_f64()
            .expect("overall match");
        assert!((0.0..=100.0).contains(&overall));
    }
}
