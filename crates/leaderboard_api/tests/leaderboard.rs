
use actix_web::test;
use leaderboard_lib::player::{self, NewPlayer, PlayerView};
use sea_orm::DbConn;

#[derive(serde::Deserialize)]
struct LeaderboardResponse {
    players: Vec<PlayerView>,
    current_sort: String,
    is_admin: bool,
}

async fn insert(conn: &DbConn, nickname: &str, f: impl FnOnce(&mut NewPlayer)) -> anyhow::Result<()> {
    let mut new = NewPlayer::new(nickname);
    f(&mut new);
    player::create(conn, new).await?;
    Ok(())
}

async fn seed(conn: &DbConn) -> anyhow::Result<()> {
    insert(conn, "Ann", |p| {
        p.kills = 100;
        p.deaths = 50;
        p.games_played = 5;
        p.wins = 3;
        p.experience = 8_500;
    })
    .await?;
    insert(conn, "Bob", |p| {
        p.kills = 10;
        p.experience = 20_000;
    })
    .await?;
    insert(conn, "Carl", |p| {
        p.kills = 7;
        p.deaths = 3;
        p.experience = 300;
    })
    .await?;
    Ok(())
}

fn nicknames(res: &LeaderboardResponse) -> Vec<&str> {
    res.players.iter().map(|p| p.nickname.as_str()).collect()
}

#[tokio::test]
async fn default_sort_is_experience() -> anyhow::Result<()> {
    base::with_db(async |db| {
        seed(&db.sql_conn).await?;
        let app = base::get_app(db).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body = test::read_body(resp).await;
        let res = base::try_from_slice::<LeaderboardResponse>(&body)?;

        assert_eq!(nicknames(&res), ["Bob", "Ann", "Carl"]);
        assert_eq!(res.current_sort, "experience");
        assert!(!res.is_admin);

        let ann = &res.players[1];
        assert_eq!(ann.kd_ratio, 2.);
        assert_eq!(ann.win_rate, 60.);
        assert_eq!(ann.level, 5);
        assert_eq!(ann.role, "unranked");

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn sort_by_kd_ratio() -> anyhow::Result<()> {
    base::with_db(async |db| {
        seed(&db.sql_conn).await?;
        let app = base::get_app(db).await;

        let req = test::TestRequest::get()
            .uri("/leaderboard?sort=kd_ratio")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let res = base::try_from_slice::<LeaderboardResponse>(&body)?;

        assert_eq!(nicknames(&res), ["Bob", "Carl", "Ann"]);
        assert_eq!(res.current_sort, "kd_ratio");
        assert_eq!(res.players[0].kd_ratio, 10.);
        assert_eq!(res.players[1].kd_ratio, 2.33);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn unknown_sort_falls_back_to_experience() -> anyhow::Result<()> {
    base::with_db(async |db| {
        seed(&db.sql_conn).await?;
        let app = base::get_app(db).await;

        let req = test::TestRequest::get()
            .uri("/leaderboard?sort=level")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body = test::read_body(resp).await;
        let res = base::try_from_slice::<LeaderboardResponse>(&body)?;

        assert_eq!(nicknames(&res), ["Bob", "Ann", "Carl"]);
        assert_eq!(res.current_sort, "experience");

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn admin_flag_is_reported() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let cookie = base::admin_cookie(&app).await?;

        let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
        let body = test::call_and_read_body(&app, req).await;
        let res = base::try_from_slice::<LeaderboardResponse>(&body)?;

        assert!(res.is_admin);
        assert!(res.players.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn malformed_query_is_a_json_error() -> anyhow::Result<()> {
    base::with_db(async |db| {
        seed(&db.sql_conn).await?;
        let app = base::get_app(db).await;

        let req = test::TestRequest::get()
            .uri("/leaderboard?sort=kills&sort=wins")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body = test::read_body(resp).await;
        let error: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(error.r#type, 308);
        assert!(error.message.starts_with("invalid request: "), "{}", error.message);
        assert!(error.message.contains("sort"), "{}", error.message);
        assert!(!error.request_id.is_empty());

        anyhow::Ok(())
    })
    .await
}
