//! Matches matric qualifications against university course requirements.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod profile;
pub mod routes;
pub mod telemetry;

pub use eligibility::EligibilityEngine;
pub use profile::analyze_student_profile;
