use actix_session::Session;
use actix_web::{Responder, web::Query};
use leaderboard_lib::{
    Database,
    access::AccessGate as _,
    leaderboard::{RankingKey, leaderboard},
    player::PlayerView,
};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::{ApiConfig, ApiResponse, FitRequestId as _, Res, auth::SessionGate, utils::json};

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    sort: Option<String>,
}

#[derive(Serialize)]
struct LeaderboardResponse {
    players: Vec<PlayerView>,
    current_sort: RankingKey,
    is_admin: bool,
}

pub async fn index(
    req_id: RequestId,
    db: Res<Database>,
    config: Res<ApiConfig>,
    session: Session,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResponse<impl Responder> {
    let gate = SessionGate::read(&session).fit(req_id)?;
    let key = query
        .sort
        .as_deref()
        .map(RankingKey::from_param)
        .unwrap_or_default();

    let players = leaderboard(&db.sql_conn, key, config.leaderboard_limit)
        .await
        .fit(req_id)?;

    json(LeaderboardResponse {
        players: players.into_iter().map(From::from).collect(),
        current_sort: key,
        is_admin: gate.is_admin(),
    })
}
