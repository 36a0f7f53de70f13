use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Preferences, Qualification};
use super::policy::ScoringPolicy;
use super::rules::evaluate_course;
use super::EligibilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationStatus {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Alternative Option")]
    AlternativeOption,
}

impl RecommendationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::AlternativeOption => "Alternative Option",
        }
    }
}

/// Course field the student qualifies for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub field: String,
    pub match_score: u32,
    pub status: RecommendationStatus,
    pub requirements_met: Vec<String>,
}

pub(crate) fn rank_courses(
    qualifications: &[Qualification],
    preferences: &Preferences,
    policy: &ScoringPolicy,
) -> Result<Vec<Recommendation>, EligibilityError> {
    let preferred = policy.course_for_career(preferences.career_field());

    // Preferred field first so equal scores keep it ahead after the stable sort.
    let ordered = policy
        .courses
        .iter()
        .filter(|course| course.field == preferred)
        .map(|course| (course, RecommendationStatus::HighlyRecommended))
        .chain(
            policy
                .courses
                .iter()
                .filter(|course| course.field != preferred)
                .map(|course| (course, RecommendationStatus::AlternativeOption)),
        );

    let mut recommendations = Vec::new();
    for (course, status) in ordered {
        let result = evaluate_course(qualifications, course, policy)?;
        debug!(
            field = %course.field,
            eligible = result.eligible,
            missing = result.missing_requirements.len(),
            "course screened"
        );
        if result.eligible {
            recommendations.push(Recommendation {
                field: course.field.clone(),
                match_score: result.match_percentage,
                status,
                requirements_met: result.met_requirements,
            });
        }
    }

    recommendations.sort_by(|left, right| right.match_score.cmp(&left.match_score));
    Ok(recommendations)
}
