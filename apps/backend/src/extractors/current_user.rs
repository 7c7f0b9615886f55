use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::Claims;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The authenticated caller, resolved to a stored user.
///
/// Claims are placed in request extensions by the `JwtExtract` middleware.
/// No claims means 401; claims for a subject with no stored user means 403.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<Claims>()
                .ok_or_else(AppError::unauthorized_missing_bearer)?
                .clone();

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let user = users::find_user_by_sub(app_state.db(), &claims.sub)
                .await?
                .ok_or_else(AppError::forbidden_user_not_found)?;

            Ok(CurrentUser {
                id: user.id,
                sub: claims.sub,
                email: user.email,
            })
        })
    }
}
