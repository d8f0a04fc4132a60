use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use survivalindex_core::oracle::SurvivalOracle;
use survivalindex_core::services::project::ProjectService;
use survivalindex_core::services::submission::SubmissionService;
use survivalindex_core::types::project::{AiRating, NewProjectDTO, Project};
use survivalindex_core::types::submission::{NewSubmissionDTO, Submission, SubmissionStatus};
use survivalindex_core::types::user::{require, Action};
use survivalindex_core::ApiError;

use crate::middleware::auth::AuthUser;
use crate::ok_json;

#[derive(Deserialize)]
pub struct ListSubmissionsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct ListSubmissionsResponse {
    pub data: Vec<Submission>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproveSubmissionRequest {
    pub review_notes: Option<String>,
    pub trigger_ai_evaluation: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSubmissionResponse {
    pub submission: Submission,
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_rating: Option<AiRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_evaluation_error: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RejectSubmissionRequest {
    pub rejection_reason: String,
    pub review_notes: Option<String>,
}

pub async fn list_submissions(
    query: web::Query<ListSubmissionsQuery>,
    user: AuthUser,
    submissions: web::Data<Box<dyn SubmissionService>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::ReviewSubmissions)?;

    let status = match query.status.as_deref() {
        None | Some("all") | Some("") => None,
        Some(other) => Some(SubmissionStatus::from_str(other)?),
    };
    Ok(HttpResponse::Ok().json(ListSubmissionsResponse {
        data: submissions.list(status),
    }))
}

pub async fn get_submission(
    path: web::Path<String>,
    user: AuthUser,
    submissions: web::Data<Box<dyn SubmissionService>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::ReviewSubmissions)?;
    ok_json!(submissions.get_by_id(&path))
}

pub async fn pending_count(
    user: AuthUser,
    submissions: web::Data<Box<dyn SubmissionService>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::ReviewSubmissions)?;
    Ok(HttpResponse::Ok().json(json!({ "count": submissions.pending_count() })))
}

pub async fn create_submission(
    req: web::Json<NewSubmissionDTO>,
    submissions: web::Data<Box<dyn SubmissionService>>,
) -> Result<HttpResponse, ApiError> {
    let submission = submissions.submit(req.into_inner())?;
    Ok(HttpResponse::Created().json(submission))
}

pub async fn approve_submission(
    path: web::Path<String>,
    req: web::Json<ApproveSubmissionRequest>,
    user: AuthUser,
    submissions: web::Data<Box<dyn SubmissionService>>,
    projects: web::Data<Box<dyn ProjectService>>,
    oracle: web::Data<Box<dyn SurvivalOracle>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::ReviewSubmissions)?;
    let req = req.into_inner();
    if req.trigger_ai_evaluation {
        require(&user.0, Action::TriggerAiEvaluation)?;
    }

    let submission = submissions.approve(&path, req.review_notes)?;
    // Submission fields were validated at submit time, so listing the
    // project cannot fail once the approval has committed.
    let mut project = projects.create(NewProjectDTO::from(&submission))?;

    let mut ai_rating = None;
    let mut ai_evaluation_error = None;
    if req.trigger_ai_evaluation {
        match oracle.evaluate(&project).await {
            Ok(verdict) => {
                project = projects.apply_ai_rating(&project.id, verdict.clone())?;
                ai_rating = Some(verdict);
            }
            Err(e) => {
                // The approval has already committed; a flaky upstream must
                // not force the admin to redo the review.
                tracing::error!("AI evaluation failed for project {}: {e}", project.id);
                ai_evaluation_error = Some(e.to_string());
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApproveSubmissionResponse {
        submission,
        project,
        ai_rating,
        ai_evaluation_error,
    }))
}

pub async fn reject_submission(
    path: web::Path<String>,
    req: web::Json<RejectSubmissionRequest>,
    user: AuthUser,
    submissions: web::Data<Box<dyn SubmissionService>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::ReviewSubmissions)?;
    let req = req.into_inner();
    ok_json!(submissions.reject(&path, &req.rejection_reason, req.review_notes))
}

pub async fn delete_submission(
    path: web::Path<String>,
    user: AuthUser,
    submissions: web::Data<Box<dyn SubmissionService>>,
) -> Result<HttpResponse, ApiError> {
    require(&user.0, Action::ReviewSubmissions)?;
    submissions.delete(&path)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
