use anyhow::Context as _;
use clap::Parser;
use leaderboard_lib::{Database, DbEnv};
use migration::MigratorTrait as _;
use mkenv::prelude::*;

use self::{leaderboard::LbCommand, populate::PopulateCommand};

mod clear;
mod leaderboard;
mod populate;

#[derive(clap::Parser)]
enum Command {
    /// Inserts players in the leaderboard.
    #[clap(subcommand)]
    Populate(PopulateCommand),
    /// Removes every player from the leaderboard.
    Clear,
    /// Prints the leaderboard.
    Leaderboard(LbCommand),
}

mkenv::make_config! {
    struct Env {
        db_env: { DbEnv },
    }
}

/// Ignores the error of a missing `.env` file, the variables may be set by other means.
fn tolerate_missing_env_file<T>(res: dotenvy::Result<T>) -> anyhow::Result<()> {
    match res {
        Err(err) if !err.not_found() => Err(err).context("cannot retrieve .env files"),
        _ => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tolerate_missing_env_file(dotenvy::dotenv())?;
    tracing_subscriber::fmt()
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("unable to init tracing_subscriber: {e}"))?;
    let env = Env::define();
    env.init();

    let db = Database::from_db_url(env.db_env.db_url.db_url.get()).await?;
    migration::Migrator::up(&db.sql_conn, None).await?;

    let cmd = Command::parse();

    match cmd {
        Command::Populate(cmd) => populate::populate(db, cmd).await,
        Command::Clear => clear::clear(db).await,
        Command::Leaderboard(cmd) => leaderboard::leaderboard(db, cmd).await,
    }
}
