use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::games;
use crate::state::app_state::AppState;

/// Game ID extracted from the `{game_id}` path parameter.
/// Validates that the game exists in the database.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub i64);

/// Parse a strictly positive id from a path segment.
pub(crate) fn parse_positive_id(raw: &str, code: ErrorCode, what: &str) -> Result<i64, AppError> {
    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(code, format!("Invalid {what} id: {raw}")))?;
    if id <= 0 {
        return Err(AppError::bad_request(
            code,
            format!("{what} id must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let raw = req.match_info().get("game_id").ok_or_else(|| {
                AppError::bad_request(ErrorCode::InvalidGameId, "Missing game_id parameter")
            })?;
            let game_id = parse_positive_id(raw, ErrorCode::InvalidGameId, "Game")?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            if games::find_by_id(app_state.db(), game_id).await?.is_none() {
                return Err(AppError::not_found(
                    ErrorCode::GameNotFound,
                    format!("Game {game_id} not found"),
                ));
            }

            Ok(GameId(game_id))
        })
    }
}
