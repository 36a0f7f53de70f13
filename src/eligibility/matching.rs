use serde::{Deserialize, Serialize};

use super::aps::{aggregate_score, average_mark};
use super::domain::{Preferences, Qualification};
use super::policy::ScoringPolicy;
use super::EligibilityError;

const ACADEMIC_WEIGHT: f64 = 0.4;
const ACADEMIC_CAP: f64 = 40.0;
const APS_CAP: f64 = 30.0;
const POINTS_PER_PREFERENCE: u32 = 10;
const MATCH_CAP: f64 = 100.0;

/// Overall university match, with each contribution kept for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityMatch {
    pub overall_match: f64,
    pub academic_score: f64,
    pub aps_score: u32,
    pub aps_contribution: f64,
    pub preference_score: u32,
    pub average_mark: f64,
}

pub(crate) fn university_match(
    qualifications: &[Qualification],
    preferences: &Preferences,
    policy: &ScoringPolicy,
) -> Result<UniversityMatch, EligibilityError> {
    let average_mark = average_mark(qualifications)?;
    let academic_score = (average_mark * ACADEMIC_WEIGHT).min(ACADEMIC_CAP);

    let aps_score = aggregate_score(qualifications, policy)?;
    let normalization = f64::from(policy.aps_scale.normalization);
    let aps_contribution = (f64::from(aps_score) / normalization * APS_CAP).min(APS_CAP);

    let preference_score = preferences.answered_count() * POINTS_PER_PREFERENCE;

    let total = academic_score + aps_contribution + f64::from(preference_score);

    Ok(UniversityMatch {
        overall_match: total.clamp(0.0, MATCH_CAP),
        academic_score,
        aps_score,
        aps_contribution,
        preference_score,
        average_mark,
    })
}
