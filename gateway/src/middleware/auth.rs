use std::future::{ready, Ready};

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use survivalindex_core::error::IndexError;
use survivalindex_core::services::auth::AuthService;
use survivalindex_core::types::user::User;
use survivalindex_core::ApiError;

/// Authenticated caller, resolved from the `Authorization: Bearer` header
/// against the server-side session store. Clients may keep an optimistic
/// local token-presence check, but every gated call is validated here.
pub struct AuthUser(pub User);

pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn resolve_user(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let auth = req
        .app_data::<web::Data<Box<dyn AuthService>>>()
        .ok_or_else(|| ApiError::CustomError("Auth service is not configured".to_string()))?;
    let token = bearer_token(req).ok_or(IndexError::Unauthorized)?;
    let user = auth.current_user(token).ok_or(IndexError::Unauthorized)?;
    Ok(AuthUser(user))
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_user(req))
    }
}
