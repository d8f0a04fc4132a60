pub mod ai_judge;
pub mod auth;
pub mod projects;
pub mod submissions;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use survivalindex_core::services::project::ProjectService;

/// Macro to convert a Result<T, E> into Result<HttpResponse>
///
/// Takes an expression that returns a Result, maps the Ok value to an
/// HttpResponse::Ok().json(), and wraps the entire result in Ok().
#[macro_export]
macro_rules! ok_json {
    ($expr:expr) => {
        Ok($expr.map(|result| actix_web::HttpResponse::Ok().json(result))?)
    };
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn stats(projects: web::Data<Box<dyn ProjectService>>) -> HttpResponse {
    HttpResponse::Ok().json(projects.stats())
}

pub async fn categories(projects: web::Data<Box<dyn ProjectService>>) -> HttpResponse {
    HttpResponse::Ok().json(projects.categories())
}
