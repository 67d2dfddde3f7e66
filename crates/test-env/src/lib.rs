use std::panic;

use anyhow::Context as _;
use futures::FutureExt as _;
use migration::MigratorTrait as _;
use sea_orm::{ConnectOptions, DbConn};
use tracing_subscriber::{EnvFilter, fmt::TestWriter};

/// The URL of the database used by the tests.
///
/// Each connection to it gets its own empty database, which vanishes with the connection.
const IN_MEMORY_DB_URL: &str = "sqlite::memory:";

pub trait IntoResult {
    type Out;

    fn into_result(self) -> anyhow::Result<Self::Out>;
}

impl IntoResult for () {
    type Out = ();

    fn into_result(self) -> anyhow::Result<Self::Out> {
        Ok(())
    }
}

impl<T, E> IntoResult for Result<T, E>
where
    anyhow::Error: From<E>,
{
    type Out = T;

    fn into_result(self) -> anyhow::Result<Self::Out> {
        self.map_err(From::from)
    }
}

pub fn init_env() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(TestWriter::new())
        .try_init();

    Ok(())
}

/// Returns a connection to a fresh database, with the migrations applied.
pub async fn fresh_db() -> anyhow::Result<DbConn> {
    // A single connection, otherwise each pooled connection would see its own database.
    let mut options = ConnectOptions::new(IN_MEMORY_DB_URL);
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = sea_orm::Database::connect(options)
        .await
        .context("cannot open the in-memory database")?;
    migration::Migrator::up(&db, None).await?;
    tracing::debug!("Created test database");

    Ok(db)
}

/// Runs the provided test against a fresh database.
///
/// The database is dropped once the test returns, whether it succeeded or not.
pub async fn wrap<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(DbConn) -> R,
    R: IntoResult,
{
    init_env()?;
    let db = fresh_db().await?;

    let r = panic::AssertUnwindSafe(test(db)).catch_unwind().await;

    match r {
        Ok(r) => r.into_result(),
        Err(e) => {
            tracing::info!("Test failed");
            panic::resume_unwind(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait as _;
    use sea_orm::ConnectionTrait as _;

    #[tokio::test]
    async fn migrations_can_be_reverted() -> anyhow::Result<()> {
        super::wrap(async |conn| {
            migration::Migrator::down(&conn, None).await?;
            assert!(
                conn.execute_unprepared("select count(*) from players")
                    .await
                    .is_err()
            );

            migration::Migrator::up(&conn, None).await?;
            conn.execute_unprepared("select count(*) from players").await?;

            anyhow::Ok(())
        })
        .await
    }
}
