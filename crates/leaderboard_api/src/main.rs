//! The Bedwars leaderboard API program.
//!
//! The program also includes a [library](leaderboard_api_lib). Overall, it uses the
//! [`leaderboard_lib`] crate as a main dependency.

use actix_cors::Cors;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::{
    App, HttpServer,
    cookie::{Key, time::Duration as CookieDuration},
};
use anyhow::Context;
use leaderboard_api_lib::{ApiConfig, configure};
use leaderboard_lib::Database;
use migration::MigratorTrait;
use mkenv::prelude::*;
use tracing::level_filters::LevelFilter;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Returns the key used to sign and encrypt the session cookies.
fn session_key(raw: String) -> anyhow::Result<Key> {
    if cfg!(debug_assertions) && raw.is_empty() {
        tracing::warn!("No session key provided, using a random one");
        return Ok(Key::generate());
    }

    Key::try_from(raw.as_bytes()).map_err(|e| anyhow::anyhow!("invalid session key: {e:?}"))
}

/// The main entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }

    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let env = leaderboard_api_lib::init_env()?;

    let db = Database::from_db_url(env.db_env.db_url.db_url.get())
        .await
        .context("Cannot connect to the database")?;

    migration::Migrator::up(&db.sql_conn, None).await?;

    let config = ApiConfig {
        admin_password: env.dynamic.admin_password.get(),
        leaderboard_limit: env.default_limit.get(),
    };
    anyhow::ensure!(
        !config.admin_password.is_empty(),
        "the administrator password must not be empty"
    );

    let sess_key = session_key(env.dynamic.sess_key.get())?;
    let session_ttl = CookieDuration::seconds(i64::from(env.session_ttl.get()));
    let port = env.port.get();

    tracing::info!("Listening on port {port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .supports_credentials()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["accept", "content-type"])
            .max_age(3600);
        #[cfg(debug_assertions)]
        let cors = cors.allow_any_origin();
        #[cfg(not(debug_assertions))]
        let cors = cors.allowed_origin(&leaderboard_api_lib::env().host.host.get());

        App::new()
            .wrap(cors)
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), sess_key.clone())
                    .cookie_secure(cfg!(not(debug_assertions)))
                    .cookie_content_security(CookieContentSecurity::Private)
                    .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
                    .build(),
            )
            .wrap(TracingLogger::<configure::CustomRootSpanBuilder>::new())
            .configure(|cfg| configure::configure(cfg, db.clone(), config.clone()))
    })
    .bind(("0.0.0.0", port))
    .context("Cannot bind 0.0.0.0 address")?
    .run()
    .await
    .context("Cannot create actix-web server")?;

    Ok(())
}
