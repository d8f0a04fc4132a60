use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use survivalindex_core::services::auth::AuthService;
use survivalindex_core::types::user::User;
use survivalindex_core::ApiError;

use crate::middleware::auth::{bearer_token, AuthUser};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user: User,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    auth: web::Data<Box<dyn AuthService>>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = auth.login(&req.email, &req.password)?;
    Ok(HttpResponse::Ok().json(LoginResponse { user, token }))
}

/// Always succeeds: the client clears its token no matter what, so an
/// unknown or absent token is not an error here either.
pub async fn logout(req: HttpRequest, auth: web::Data<Box<dyn AuthService>>) -> HttpResponse {
    if let Some(token) = bearer_token(&req) {
        auth.logout(token);
    }
    HttpResponse::Ok().json(json!({ "success": true }))
}

pub async fn me(user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse { user: user.0 })
}
