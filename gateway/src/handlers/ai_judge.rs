use actix_web::{web, HttpResponse};
use serde::Serialize;
use survivalindex_core::oracle::SurvivalOracle;
use survivalindex_core::services::project::ProjectService;
use survivalindex_core::types::project::{AiRating, Project};
use survivalindex_core::types::user::{require, Action};
use survivalindex_core::ApiError;

use crate::middleware::auth::AuthUser;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub project: Project,
    pub ai_rating: AiRating,
}

pub async fn evaluate_project(
    path: web::Path<String>,
    user: AuthUser,
    projects: web::Data<Box<dyn ProjectService>>,
    oracle: web::Data<Box<dyn SurvivalOracle>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::TriggerAiEvaluation)?;

    let project = projects.get_by_id(&path)?;
    let ai_rating = oracle.evaluate(&project).await?;
    let project = projects.apply_ai_rating(&project.id, ai_rating.clone())?;

    tracing::info!("Stored AI evaluation for project {}", project.id);
    Ok(HttpResponse::Ok().json(EvaluateResponse { project, ai_rating }))
}
