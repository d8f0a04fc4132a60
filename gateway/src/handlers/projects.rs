use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use survivalindex_core::services::project::ProjectService;
use survivalindex_core::types::pagination::Pagination;
use survivalindex_core::types::project::{
    NewProjectDTO, Project, ProjectFilter, ProjectType, RatingPatch, SortBy,
};
use survivalindex_core::ApiError;

use crate::ok_json;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(rename = "type", default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

#[derive(Serialize)]
pub struct ListProjectsResponse {
    pub data: Vec<Project>,
    pub pagination: Pagination,
}

#[derive(Deserialize)]
pub struct RateProjectRequest {
    pub ratings: RatingPatch,
}

#[derive(Serialize)]
pub struct RateProjectResponse {
    pub success: bool,
    pub project: Project,
    pub message: String,
}

pub async fn list_projects(
    query: web::Query<ListProjectsQuery>,
    projects: web::Data<Box<dyn ProjectService>>,
) -> Result<HttpResponse, ApiError> {
    let project_type = match query.project_type.as_deref() {
        None | Some("all") | Some("") => None,
        Some(other) => Some(other.parse::<ProjectType>()?),
    };
    let filter = ProjectFilter {
        project_type,
        category: query.category.clone(),
        search: query.search.clone(),
    };

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(12).clamp(1, 100);

    let (data, pagination) =
        projects.list(&filter, query.sort_by.unwrap_or_default(), page, limit)?;
    Ok(HttpResponse::Ok().json(ListProjectsResponse { data, pagination }))
}

pub async fn get_project(
    path: web::Path<String>,
    projects: web::Data<Box<dyn ProjectService>>,
) -> Result<HttpResponse, ApiError> {
    ok_json!(projects.get_by_id(&path))
}

pub async fn create_project(
    req: web::Json<NewProjectDTO>,
    projects: web::Data<Box<dyn ProjectService>>,
) -> Result<HttpResponse, ApiError> {
    let project = projects.create(req.into_inner())?;
    Ok(HttpResponse::Created().json(project))
}

pub async fn rate_project(
    path: web::Path<String>,
    req: web::Json<RateProjectRequest>,
    projects: web::Data<Box<dyn ProjectService>>,
) -> Result<HttpResponse, ApiError> {
    let project = projects.apply_rating(&path, &req.ratings)?;
    Ok(HttpResponse::Ok().json(RateProjectResponse {
        success: true,
        project,
        message: "Rating submitted successfully".to_string(),
    }))
}
