use std::sync::Arc;

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::report::{build_prompt, NarrativeClient, NarrativeError};
use crate::scoring::domain::ApplicantInput;
use crate::scoring::{AssessmentEngine, CreditAssessment};

/// Shared read-only dependencies behind the assessment endpoints.
#[derive(Clone)]
pub struct AssessmentState {
    pub engine: Arc<AssessmentEngine>,
    /// Populated only when narrative generation was configured at startup.
    pub narrative: Option<Arc<NarrativeClient>>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub assessment: CreditAssessment,
}

#[derive(Debug, Serialize)]
pub struct NarrativeAssessmentResponse {
    pub assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub assessment: CreditAssessment,
    pub narrative: String,
}

/// Router builder exposing the scoring pipeline over HTTP.
pub fn assessment_router(state: AssessmentState) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assessment_handler))
        .route("/api/v1/assessments/narrative", post(narrative_handler))
        .with_state(state)
}

async fn assessment_handler(
    State(state): State<AssessmentState>,
    Json(input): Json<ApplicantInput>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = state.engine.assess(&input)?;
    info!(
        risk_score = assessment.score.risk_score,
        grade = assessment.score.grade.label(),
        "applicant assessed"
    );

    Ok(Json(AssessmentResponse {
        assessed_at: Utc::now(),
        assessment,
    }))
}

async fn narrative_handler(
    State(state): State<AssessmentState>,
    Json(input): Json<ApplicantInput>,
) -> Result<Json<NarrativeAssessmentResponse>, AppError> {
    let client = state
        .narrative
        .as_ref()
        .ok_or(AppError::Narrative(NarrativeError::NotConfigured))?;

    // Local pipeline first; the external call only starts once the score
    // is in hand.
    let assessment = state.engine.assess(&input)?;
    let prompt = build_prompt(&input, &assessment.score);
    let narrative = client.generate(&prompt).await?;

    Ok(Json(NarrativeAssessmentResponse {
        assessed_at: Utc::now(),
        assessment,
        narrative,
    }))
}
