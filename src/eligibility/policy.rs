use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::domain::CanonicalSubject;

/// Scoring policy covering the APS scale, subject matching and course thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub aps_scale: ApsScale,
    /// Keyword rules in priority order; the first rule contained in a label wins.
    pub subject_rules: Vec<SubjectRule>,
    pub courses: Vec<CourseRequirement>,
    pub career_fields: Vec<CareerFieldMapping>,
    pub default_course_field: String,
}

/// Percentage-to-points conversion for the admission point score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApsScale {
    /// Tiers sorted by descending `minimum_mark`.
    pub tiers: Vec<ApsTier>,
    pub floor_points: u32,
    /// APS treated as a full score when normalising into the match.
    pub normalization: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApsTier {
    pub minimum_mark: i64,
    pub points: u32,
}

impl ApsScale {
    pub fn points_for(&self, mark: i64) -> u32 {
        self.tiers
            .iter()
            .find(|tier| mark >= tier.minimum_mark)
            .map(|tier| tier.points)
            .unwrap_or(self.floor_points)
    }

    /// Highest points a single subject can earn.
    pub fn max_points(&self) -> u32 {
        self.tiers
            .iter()
            .map(|tier| tier.points)
            .chain(std::iter::once(self.floor_points))
            .max()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRule {
    pub keyword: String,
    pub subject: CanonicalSubject,
}

/// Entry-level thresholds for a course field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequirement {
    pub field: String,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Subject {
        subject: CanonicalSubject,
        minimum_mark: i64,
    },
    Aps {
        minimum_aps: u32,
    },
}

/// Questionnaire career interest routed to a configured course field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerFieldMapping {
    pub career_field: String,
    pub course_field: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("APS scale must define at least one tier")]
    EmptyApsScale,
    #[error("APS tiers must be sorted by descending minimum mark")]
    UnsortedApsTiers,
    #[error("APS normalization must be greater than zero")]
    ZeroNormalization,
    #[error("course field '{0}' is configured more than once")]
    DuplicateCourseField(String),
    #[error("course field '{0}' has no requirements")]
    EmptyCourseRequirements(String),
    #[error("career field '{career_field}' maps to unknown course field '{course_field}'")]
    UnknownMappedCourse {
        career_field: String,
        course_field: String,
    },
    #[error("default course field '{0}' is not configured")]
    UnknownDefaultCourse(String),
}

impl ScoringPolicy {
    /// The built-in South African NSC policy, built once per process.
    pub fn standard() -> Arc<ScoringPolicy> {
        static STANDARD: OnceLock<Arc<ScoringPolicy>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(standard_policy()))
            .clone()
    }

    pub fn course(&self, field: &str) -> Option<&CourseRequirement> {
        self.courses.iter().find(|course| course.field == field)
    }

    pub fn course_fields(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|course| course.field.as_str())
    }

    /// Course field matching a questionnaire career interest.
    pub fn course_for_career(&self, career_field: Option<&str>) -> &str {
        career_field
            .and_then(|career| {
                self.career_fields
                    .iter()
                    .find(|mapping| mapping.career_field == career)
            })
            .map(|mapping| mapping.course_field.as_str())
            .unwrap_or(self.default_course_field.as_str())
    }

    pub fn canonical_subject(&self, label: &str) -> Option<CanonicalSubject> {
        self.subject_rules
            .iter()
            .find(|rule| label.contains(rule.keyword.as_str()))
            .map(|rule| rule.subject)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.aps_scale.tiers.is_empty() {
            return Err(PolicyError::EmptyApsScale);
        }
        if self
            .aps_scale
            .tiers
            .windows(2)
            .any(|pair| pair[0].minimum_mark <= pair[1].minimum_mark)
        {
            return Err(PolicyError::UnsortedApsTiers);
        }
        if self.aps_scale.normalization == 0 {
            return Err(PolicyError::ZeroNormalization);
        }

        let mut seen = HashSet::new();
        for course in &self.courses {
            if !seen.insert(course.field.as_str()) {
                return Err(PolicyError::DuplicateCourseField(course.field.clone()));
            }
            if course.requirements.is_empty() {
                return Err(PolicyError::EmptyCourseRequirements(course.field.clone()));
            }
        }

        for mapping in &self.career_fields {
            if !seen.contains(mapping.course_field.as_str()) {
                return Err(PolicyError::UnknownMappedCourse {
                    career_field: mapping.career_field.clone(),
                    course_field: mapping.course_field.clone(),
                });
            }
        }

        if !seen.contains(self.default_course_field.as_str()) {
            return Err(PolicyError::UnknownDefaultCourse(
                self.default_course_field.clone(),
            ));
        }

        Ok(())
    }
}

fn standard_policy() -> ScoringPolicy {
    use CanonicalSubject::{English, LifeSciences, Mathematics, PhysicalSciences};

    let subject = |subject, minimum_mark| Requirement::Subject {
        subject,
        minimum_mark,
    };
    let aps = |minimum_aps| Requirement::Aps { minimum_aps };
    let course = |field: &str, requirements: Vec<Requirement>| CourseRequirement {
        field: field.to_string(),
        requirements,
    };
    let rule = |keyword: &str, subject| SubjectRule {
        keyword: keyword.to_string(),
        subject,
    };
    let career = |career_field: &str, course_field: &str| CareerFieldMapping {
        career_field: career_field.to_string(),
        course_field: course_field.to_string(),
    };

    ScoringPolicy {
        aps_scale: ApsScale {
            tiers: [(80, 7), (70, 6), (60, 5), (50, 4), (40, 3), (30, 2)]
                .into_iter()
                .map(|(minimum_mark, points)| ApsTier {
                    minimum_mark,
                    points,
                })
                .collect(),
            floor_points: 1,
            normalization: 42,
        },
        subject_rules: vec![
            rule("Mathematics", Mathematics),
            rule("English", English),
            rule("Physical Sciences", PhysicalSciences),
            rule("Life Sciences", LifeSciences),
        ],
        courses: vec![
            course(
                "Engineering",
                vec![
                    subject(Mathematics, 70),
                    subject(PhysicalSciences, 70),
                    subject(English, 60),
                    aps(35),
                ],
            ),
            course(
                "Medicine",
                vec![
                    subject(Mathematics, 75),
                    subject(PhysicalSciences, 75),
                    subject(LifeSciences, 75),
                    subject(English, 70),
                    aps(42),
                ],
            ),
            course(
                "Commerce",
                vec![subject(Mathematics, 65), subject(English, 60), aps(30)],
            ),
            course(
                "Science",
                vec![
                    subject(Mathematics, 70),
                    subject(PhysicalSciences, 65),
                    subject(English, 60),
                    aps(32),
                ],
            ),
            course("Humanities", vec![subject(English, 65), aps(28)]),
        ],
        career_fields: vec![
            career("Engineering & Technology", "Engineering"),
            career("Health Sciences", "Medicine"),
            career("Business & Commerce", "Commerce"),
            career("Natural Sciences", "Science"),
            career("Arts & Humanities", "Humanities"),
        ],
        default_course_field: "Science".to_string(),
    }
}
