use super::aps::{aggregate_score, subject_marks};
use super::domain::Qualification;
use super::policy::{CourseRequirement, Requirement, ScoringPolicy};
use super::{EligibilityError, EligibilityResult};

const MISSING_REQUIREMENT_PENALTY: u32 = 20;

pub(crate) fn evaluate_course(
    qualifications: &[Qualification],
    course: &CourseRequirement,
    policy: &ScoringPolicy,
) -> Result<EligibilityResult, EligibilityError> {
    let aps_score = aggregate_score(qualifications, policy)?;
    let marks = subject_marks(qualifications, policy)?;

    let mut met_requirements = Vec::new();
    let mut missing_requirements = Vec::new();

    for requirement in &course.requirements {
        match *requirement {
            Requirement::Aps { minimum_aps } => {
                if aps_score >= minimum_aps {
                    met_requirements.push(format!("APS Score: {aps_score}/{minimum_aps}"));
                } else {
                    missing_requirements
                        .push(format!("APS Score too low: {aps_score}/{minimum_aps}"));
                }
            }
            Requirement::Subject {
                subject,
                minimum_mark,
            } => {
                let mark = marks.get(&subject).copied().unwrap_or(0);
                if mark >= minimum_mark {
                    met_requirements.push(format!("{subject}: {mark}%/{minimum_mark}%"));
                } else {
                    missing_requirements
                        .push(format!("{subject}: {mark}%/{minimum_mark}% required"));
                }
            }
        }
    }

    let penalty = MISSING_REQUIREMENT_PENALTY.saturating_mul(missing_requirements.len() as u32);

    Ok(EligibilityResult {
        eligible: missing_requirements.is_empty(),
        aps_score,
        met_requirements,
        missing_requirements,
        match_percentage: 100u32.saturating_sub(penalty),
        reason: None,
    })
}
