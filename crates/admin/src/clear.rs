use leaderboard_lib::{Database, access::Trusted, mutation};

pub async fn clear(db: Database) -> anyhow::Result<()> {
    let removed = mutation::clear_all(&db.sql_conn, Trusted).await?;
    tracing::info!("Removed {removed} player(s)");
    Ok(())
}
