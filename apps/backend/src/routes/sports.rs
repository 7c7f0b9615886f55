use actix_web::{web, HttpResponse, Result};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::sports;
use crate::state::app_state::AppState;

async fn list_sports(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sports = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(sports::list_sports(txn).await?) })
    })
    .await?;
    Ok(HttpResponse::Ok().json(sports))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_sports)));
}
