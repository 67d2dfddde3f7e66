//! Module used to serve the routes of the leaderboard. The routes reading the leaderboard are
//! in the [`leaderboard`] submodule, and the ones reserved to the administrator in [`admin`].

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{Responder, Scope, web};
use entity::players;
use leaderboard_lib::Database;
use sea_orm::{EntityTrait as _, PaginatorTrait as _};
use serde::Serialize;
use tracing_actix_web::RequestId;

use crate::utils::json;
use crate::{ApiResponse, ApiResultExt as _, FitRequestId as _, Res};

pub mod admin;
pub mod leaderboard;

pub fn api_route() -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("")
        .route("/", web::get().to(leaderboard::index))
        .route("/leaderboard", web::get().to(leaderboard::index))
        .route("/info", web::get().to(info))
        .route("/login", web::post().to(admin::login))
        .route("/logout", web::post().to(admin::logout))
        .route("/logout", web::get().to(admin::logout))
        .route("/add", web::post().to(admin::add))
        .route("/clear", web::post().to(admin::clear))
}

#[derive(Serialize)]
struct InfoResponse {
    service_name: &'static str,
    api_version: &'static str,
    player_count: u64,
}

async fn info(req_id: RequestId, db: Res<Database>) -> ApiResponse<impl Responder> {
    let player_count = players::Entity::find()
        .count(&db.sql_conn)
        .await
        .with_api_err()
        .fit(req_id)?;

    json(InfoResponse {
        service_name: "Bedwars Leaderboard API",
        api_version: env!("CARGO_PKG_VERSION"),
        player_count,
    })
}
