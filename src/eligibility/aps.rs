use std::collections::BTreeMap;

use super::domain::{CanonicalSubject, Qualification};
use super::policy::ScoringPolicy;
use super::EligibilityError;

/// Admission point score: tier points summed over every entry with a subject and a mark.
pub(crate) fn aggregate_score(
    qualifications: &[Qualification],
    policy: &ScoringPolicy,
) -> Result<u32, EligibilityError> {
    let mut total = 0;
    for qualification in qualifications {
        if !qualification.has_subject() {
            continue;
        }
        if let Some(mark) = qualification.mark()? {
            total = policy.aps_scale.points_for(mark).saturating_add(total);
        }
    }
    Ok(total)
}

/// Marks keyed by canonical subject. Later entries overwrite earlier ones.
pub(crate) fn subject_marks(
    qualifications: &[Qualification],
    policy: &ScoringPolicy,
) -> Result<BTreeMap<CanonicalSubject, i64>, EligibilityError> {
    let mut marks = BTreeMap::new();
    for qualification in qualifications {
        let Some(subject) = policy.canonical_subject(qualification.subject_label()) else {
            continue;
        };
        let mark = qualification.mark()?.unwrap_or(0);
        marks.insert(subject, mark);
    }
    Ok(marks)
}

/// Mean of every present mark, 0 when none are present.
pub(crate) fn average_mark(qualifications: &[Qualification]) -> Result<f64, EligibilityError> {
    // i128 holds the sum of any u32-bounded run of i64 marks.
    let mut total = 0i128;
    let mut count = 0u32;
    for qualification in qualifications {
        if let Some(mark) = qualification.mark()? {
            total += i128::from(mark);
            count += 1;
        }
    }

    if count == 0 {
        Ok(0.0)
    } else {
        Ok(total as f64 / f64::from(count))
    }
}
