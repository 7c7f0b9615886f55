use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use super::game_id::parse_positive_id;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// User ID from the `{user_id}` path parameter. Existence is checked by the
/// service that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = match req.match_info().get("user_id") {
            Some(raw) => parse_positive_id(raw, ErrorCode::InvalidUserId, "User").map(UserId),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidUserId,
                "Missing user_id parameter",
            )),
        };
        ready(parsed)
    }
}
