use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::logging::security::login_failed;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

/// SSO callback payload forwarded by the identity provider integration.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sub: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub expires_in: u64,
}

/// Handle the SSO login callback.
/// Creates or reuses a user based on email and returns a JWT.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, name, sub } = body.into_inner();

    if email.trim().is_empty() {
        login_failed("empty email", None);
        return Err(AppError::bad_request(
            ErrorCode::InvalidEmail,
            "Email cannot be empty",
        ));
    }
    if sub.trim().is_empty() {
        login_failed("empty sub", Some(&email));
        return Err(AppError::bad_request(
            ErrorCode::InvalidSub,
            "SSO subject cannot be empty",
        ));
    }

    let login_email = email.clone();
    let user = with_txn(&app_state, |txn| {
        Box::pin(async move {
            Ok(ensure_user(txn, &email, name.as_deref().unwrap_or(""), &sub).await?)
        })
    })
    .await
    .inspect_err(|e| login_failed(&e.code().to_string(), Some(&login_email)))?;

    let token = mint_access_token(&user.sub, &user.email, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user_id: user.id,
        expires_in: app_state.security.token_ttl_secs,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
