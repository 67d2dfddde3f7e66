//! The routes reserved to the administrator. Every mutation is checked against the
//! administrator flag of the session, see the [`auth`](crate::auth) module.

use actix_session::Session;
use actix_web::{
    Responder,
    web::{Form, Json},
};
use leaderboard_lib::{
    Database,
    mutation::{add_player, clear_all},
    player::PlayerView,
    validation::PlayerForm,
};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::{
    ApiConfig, ApiErrorKind, ApiResponse, FitRequestId as _, Res,
    auth::{self, SessionGate},
    utils::{MessageResponse, json},
};

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    password: String,
}

pub async fn login(
    req_id: RequestId,
    config: Res<ApiConfig>,
    session: Session,
    Form(body): Form<LoginBody>,
) -> ApiResponse<impl Responder> {
    if !config.is_admin_password(&body.password) {
        tracing::warn!("Failed administrator login attempt");
        return Err::<Json<MessageResponse>, _>(ApiErrorKind::WrongPassword).fit(req_id);
    }

    auth::log_in(&session).fit(req_id)?;
    tracing::info!("Administrator logged in");

    Ok(Json(MessageResponse::new("welcome, administrator")))
}

pub async fn logout(session: Session) -> impl Responder {
    auth::log_out(&session);
    Json(MessageResponse::new("logged out"))
}

#[derive(Serialize)]
struct AddResponse {
    message: String,
    player: PlayerView,
}

pub async fn add(
    req_id: RequestId,
    db: Res<Database>,
    session: Session,
    Form(form): Form<PlayerForm>,
) -> ApiResponse<impl Responder> {
    let gate = SessionGate::read(&session).fit(req_id)?;
    let player = add_player(&db.sql_conn, gate, &form).await.fit(req_id)?;

    json(AddResponse {
        message: format!("player {} added to the leaderboard", player.nickname),
        player: player.into(),
    })
}

#[derive(Serialize)]
struct ClearResponse {
    message: &'static str,
    removed: u64,
}

pub async fn clear(
    req_id: RequestId,
    db: Res<Database>,
    session: Session,
) -> ApiResponse<impl Responder> {
    let gate = SessionGate::read(&session).fit(req_id)?;
    let removed = clear_all(&db.sql_conn, gate).await.fit(req_id)?;

    json(ClearResponse {
        message: "leaderboard cleared",
        removed,
    })
}
