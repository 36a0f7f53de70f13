use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::eligibility::{EligibilityEngine, EligibilityResult};
use crate::error::AppError;
use crate::profile::{build_report, parse_qualifications, parse_request, ProfileError, ProfileReport};

/// Router exposing profile analysis and single-course screening.
pub fn analysis_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/profile/analyze", post(analyze_handler))
        .route("/api/v1/eligibility/:field", post(eligibility_handler))
        .with_state(engine)
}

// Bodies are taken as raw text so malformed JSON still gets the `{"error": ...}` shape.
pub(crate) async fn analyze_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    body: String,
) -> Result<Json<ProfileReport>, AppError> {
    let report = parse_request(&body)
        .and_then(|(qualifications, preferences)| {
            build_report(&engine, &qualifications, &preferences)
        })
        .inspect_err(|err| warn!(error = %err, "profile analysis rejected"))?;

    info!(
        aps = report.aps_score,
        recommendations = report.course_recommendations.len(),
        "profile analysed"
    );
    Ok(Json(report))
}

pub(crate) async fn eligibility_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Path(field): Path<String>,
    body: String,
) -> Result<Json<EligibilityResult>, AppError> {
    let qualifications = parse_qualifications(&body)?;
    let result = engine
        .screen_course(&qualifications, &field)
        .map_err(ProfileError::from)?;
    Ok(Json(result))
}
