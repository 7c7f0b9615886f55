//! User directory and profile endpoints.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, UserId, ValidatedJson};
use crate::services::queries::GameQueries;
use crate::services::users::{self, ProfileChanges};
use crate::state::app_state::AppState;
use crate::utils::time::now;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub favorite_sports: Option<Vec<i64>>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileChanges {
            name: req.name,
            email: req.email,
            bio: req.bio,
            favorite_sports: req.favorite_sports,
        }
    }
}

async fn search_users(
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let needle = query.into_inner().q;
    let found = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(users::search_users(txn, &needle).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(found))
}

async fn get_user(
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(users::public_profile(txn, user_id.0).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Games the user created or joined, upcoming or not.
async fn user_games(
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let now = now();
    let games = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameQueries.list_for_user(txn, user_id.0, now).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(games))
}

async fn get_profile(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(users::own_profile(txn, current_user.id).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn update_profile(
    current_user: CurrentUser,
    body: ValidatedJson<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let changes = ProfileChanges::from(body.into_inner());
    let profile = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(users::update_profile(txn, current_user.id, changes).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // "/search" must be registered before "/{user_id}"
    cfg.service(web::resource("/search").route(web::get().to(search_users)))
        .service(web::resource("/{user_id}").route(web::get().to(get_user)))
        .service(web::resource("/{user_id}/games").route(web::get().to(user_games)));
}

pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(get_profile))
            .route(web::patch().to(update_profile)),
    );
}
