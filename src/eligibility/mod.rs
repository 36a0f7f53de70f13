//! Admission scoring: APS, course eligibility, overall match and course ranking.

mod aps;
pub mod domain;
mod matching;
pub mod policy;
mod ranking;
mod rules;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use domain::{CanonicalSubject, MarkValue, Preferences, Qualification};
pub use matching::UniversityMatch;
pub use policy::{
    ApsScale, ApsTier, CareerFieldMapping, CourseRequirement, PolicyError, Requirement,
    ScoringPolicy, SubjectRule,
};
pub use ranking::{Recommendation, RecommendationStatus};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const COURSE_FIELD_NOT_FOUND: &str = "Course field not found";

/// Stateless engine applying a scoring policy to a student's transcript.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    policy: Arc<ScoringPolicy>,
}

impl EligibilityEngine {
    pub fn new(policy: Arc<ScoringPolicy>) -> Self {
        Self { policy }
    }

    /// Engine backed by the built-in policy.
    pub fn standard() -> Self {
        Self::new(ScoringPolicy::standard())
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn aps_score(&self, qualifications: &[Qualification]) -> Result<u32, EligibilityError> {
        aps::aggregate_score(qualifications, &self.policy)
    }

    pub fn subject_marks(
        &self,
        qualifications: &[Qualification],
    ) -> Result<BTreeMap<CanonicalSubject, i64>, EligibilityError> {
        aps::subject_marks(qualifications, &self.policy)
    }

    pub fn check_course_eligibility(
        &self,
        qualifications: &[Qualification],
        course_field: &str,
    ) -> Result<EligibilityResult, EligibilityError> {
        let course = self
            .policy
            .course(course_field)
            .ok_or_else(|| EligibilityError::UnknownCourseField(course_field.to_string()))?;

        let result = rules::evaluate_course(qualifications, course, &self.policy)?;
        debug!(
            field = course_field,
            eligible = result.eligible,
            aps = result.aps_score,
            "eligibility checked"
        );
        Ok(result)
    }

    /// Like [`Self::check_course_eligibility`], but an unknown field yields an
    /// ineligible result carrying a reason instead of an error.
    pub fn screen_course(
        &self,
        qualifications: &[Qualification],
        course_field: &str,
    ) -> Result<EligibilityResult, EligibilityError> {
        match self.check_course_eligibility(qualifications, course_field) {
            Err(EligibilityError::UnknownCourseField(_)) => Ok(EligibilityResult::not_found()),
            other => other,
        }
    }

    pub fn university_match(
        &self,
        qualifications: &[Qualification],
        preferences: &Preferences,
    ) -> Result<UniversityMatch, EligibilityError> {
        matching::university_match(qualifications, preferences, &self.policy)
    }

    pub fn course_recommendations(
        &self,
        qualifications: &[Qualification],
        preferences: &Preferences,
    ) -> Result<Vec<Recommendation>, EligibilityError> {
        ranking::rank_courses(qualifications, preferences, &self.policy)
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Verdict for one course field, including the audit trail of each requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub aps_score: u32,
    pub met_requirements: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub match_percentage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EligibilityResult {
    pub fn not_found() -> Self {
        Self {
            eligible: false,
            aps_score: 0,
            met_requirements: Vec::new(),
            missing_requirements: Vec::new(),
            match_percentage: 0,
            reason: Some(COURSE_FIELD_NOT_FOUND.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("invalid mark '{value}' for subject '{subject}': expected an integer percentage")]
    ValueConversion { subject: String, value: String },
    #[error("Course field not found: {0}")]
    UnknownCourseField(String),
}
