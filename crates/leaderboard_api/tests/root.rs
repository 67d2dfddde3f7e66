
use actix_http::StatusCode;
use actix_web::test;
use leaderboard_lib::player::{self, NewPlayer};

#[tokio::test]
async fn test_not_found() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let req = test::TestRequest::get().uri("/players/12").to_request();

        let resp = test::call_service(&app, req).await;
        let status_code = resp.status();

        let body = test::read_body(resp).await;
        let error: base::ErrorResponse = serde_json::from_slice(&body)?;

        assert_eq!(status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.r#type, 301);
        assert_eq!(error.message, "not found");
        assert!(!error.request_id.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn test_info() -> anyhow::Result<()> {
    #[derive(serde::Deserialize)]
    struct InfoResponse<'a> {
        service_name: &'a str,
        #[allow(dead_code)]
        api_version: &'a str,
        player_count: u64,
    }

    base::with_db(async |db| {
        player::create(&db.sql_conn, NewPlayer::new("Ann")).await?;
        player::create(&db.sql_conn, NewPlayer::new("Bob")).await?;

        let app = base::get_app(db).await;
        let req = test::TestRequest::get().uri("/info").to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();

        let body = test::read_body(resp).await;
        let body = base::try_from_slice::<InfoResponse>(&body)?;

        assert_eq!(status, 200);
        assert_eq!(body.service_name, "Bedwars Leaderboard API");
        assert_eq!(body.player_count, 2);

        anyhow::Ok(())
    })
    .await
}
