use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::db::txn::with_txn;
use crate::entities::games::SkillLevel;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, GameId, ValidatedJson};
use crate::repos::games::UpcomingFilter;
use crate::services::comments::CommentService;
use crate::services::game_records::build_record;
use crate::services::games::{GamePatch, GameService, NewGame};
use crate::services::queries::GameQueries;
use crate::services::roster::RosterService;
use crate::state::app_state::AppState;
use crate::utils::time::{now, utc_seconds};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGameRequest {
    pub sport_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

/// Partial update body. `null` clears `name` and `capacity`; absent fields
/// are left as stored. `status` is not accepted here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateGameRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sport_id: Option<i64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub capacity: Option<Option<i32>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListGamesQuery {
    pub sport: Option<String>,
    pub start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Accept an RFC 3339 instant or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_start_date(raw: &str) -> Result<OffsetDateTime, AppError> {
    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return utc_seconds(instant).map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidQuery,
                format!("start_date is outside the supported range: {raw}"),
            )
        });
    }
    let date_format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(raw, &date_format)
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidQuery,
                format!("start_date must be an RFC 3339 timestamp or YYYY-MM-DD, got: {raw}"),
            )
        })
}

impl ListGamesQuery {
    fn into_filter(self) -> Result<UpcomingFilter, AppError> {
        let sport_id = match self.sport.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::bad_request(
                    ErrorCode::InvalidQuery,
                    format!("sport must be a numeric id, got: {raw}"),
                )
            })?),
        };
        let start_from = match self.start_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_start_date(raw)?),
        };
        Ok(UpcomingFilter {
            sport_id,
            start_from,
        })
    }
}

async fn list_games(
    query: web::Query<ListGamesQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let now = now();
    let games = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameQueries.list_upcoming(txn, filter, now).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(games))
}

async fn create_game(
    current_user: CurrentUser,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewGame {
        sport_id: body.sport_id,
        name: body.name,
        location: body.location,
        start_time: body.start_time,
        end_time: body.end_time,
        skill_level: body.skill_level,
        capacity: body.capacity,
    };
    let now = now();
    let record = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let game = GameService.create_game(txn, current_user.id, input).await?;
            Ok(build_record(txn, game, now).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(record))
}

async fn get_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let now = now();
    let record = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameQueries.get_game(txn, game_id.0, now).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn update_game(
    game_id: GameId,
    current_user: CurrentUser,
    body: ValidatedJson<UpdateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let patch = GamePatch {
        name: body.name,
        location: body.location,
        sport_id: body.sport_id,
        start_time: body.start_time,
        end_time: body.end_time,
        skill_level: body.skill_level,
        capacity: body.capacity,
    };
    let now = now();
    let record = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let game = GameService
                .update_game(txn, game_id.0, current_user.id, patch)
                .await?;
            Ok(build_record(txn, game, now).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn delete_game(
    game_id: GameId,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameService.delete_game(txn, game_id.0, current_user.id).await?) })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn cancel_game(
    game_id: GameId,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let now = now();
    let record = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let game = GameService
                .cancel_game(txn, game_id.0, current_user.id)
                .await?;
            Ok(build_record(txn, game, now).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn join_game(
    game_id: GameId,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let change = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(RosterService.join(txn, game_id.0, current_user.id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(change))
}

async fn leave_game(
    game_id: GameId,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let change = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(RosterService.leave(txn, game_id.0, current_user.id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(change))
}

async fn archived_games(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let now = now();
    let games = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameQueries.list_archived(txn, current_user.id, now).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(games))
}

async fn my_games(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let now = now();
    let games = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameQueries.list_for_user(txn, current_user.id, now).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(games))
}

async fn list_comments(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comments = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(CommentService.list_comments(txn, game_id.0).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(comments))
}

async fn create_comment(
    game_id: GameId,
    current_user: CurrentUser,
    body: ValidatedJson<CreateCommentRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let text = body.into_inner().text;
    let comment = with_txn(&app_state, |txn| {
        Box::pin(async move {
            Ok(CommentService.post_comment(txn, game_id.0, current_user.id, &text).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Routes under `/api/games`. Fixed segments are registered before
/// `/{game_id}` so they are not captured as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_games))
            .route(web::post().to(create_game)),
    )
    .service(web::resource("/archived").route(web::get().to(archived_games)))
    .service(web::resource("/mine").route(web::get().to(my_games)))
    .service(
        web::resource("/{game_id}")
            .route(web::get().to(get_game))
            .route(web::patch().to(update_game))
            .route(web::delete().to(delete_game)),
    )
    .service(web::resource("/{game_id}/join").route(web::post().to(join_game)))
    .service(web::resource("/{game_id}/leave").route(web::post().to(leave_game)))
    .service(web::resource("/{game_id}/cancel").route(web::post().to(cancel_game)))
    .service(
        web::resource("/{game_id}/comments")
            .route(web::get().to(list_comments))
            .route(web::post().to(create_comment)),
    );
}
