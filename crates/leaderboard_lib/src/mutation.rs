//! The state-changing operations on the players table.
//!
//! Each of them first checks the administrator capability with the provided [`AccessGate`],
//! before touching the database. A rejected operation leaves the table unchanged.

use entity::players;
use sea_orm::{EntityTrait as _, TransactionTrait};

use crate::{
    access::AccessGate,
    error::{AdminOperation, LeaderboardError, LeaderboardResult},
    player,
    validation::{self, PlayerForm},
};

fn check_access<G: AccessGate>(gate: &G, operation: AdminOperation) -> LeaderboardResult {
    if gate.is_admin() {
        Ok(())
    } else {
        tracing::warn!("Rejected attempt to {operation}");
        Err(LeaderboardError::Forbidden(operation))
    }
}

/// Validates the submitted player and inserts it.
///
/// The access is checked before the validation, so a non-administrator always gets
/// a [`LeaderboardError::Forbidden`] error, even with an invalid form.
#[tracing::instrument(skip(conn, gate), fields(nickname = form.nickname.as_deref()))]
pub async fn add_player<C, G>(
    conn: &C,
    gate: G,
    form: &PlayerForm,
) -> LeaderboardResult<players::Model>
where
    C: TransactionTrait,
    G: AccessGate,
{
    check_access(&gate, AdminOperation::AddPlayer)?;

    let new_player = validation::validate(form)?;

    let txn = conn.begin().await?;
    let player = player::create(&txn, new_player).await?;
    txn.commit().await?;

    tracing::info!(id = player.id, "Added player {}", player.nickname);

    Ok(player)
}

/// Removes every player from the leaderboard, and returns the amount of removed players.
#[tracing::instrument(skip(conn, gate))]
pub async fn clear_all<C, G>(conn: &C, gate: G) -> LeaderboardResult<u64>
where
    C: TransactionTrait,
    G: AccessGate,
{
    check_access(&gate, AdminOperation::ClearAll)?;

    let txn = conn.begin().await?;
    let removed = players::Entity::delete_many()
        .exec(&txn)
        .await?
        .rows_affected;
    txn.commit().await?;

    tracing::info!("Cleared the leaderboard, {removed} player(s) removed");

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use entity::players;
    use sea_orm::{EntityTrait as _, PaginatorTrait as _};

    use super::{add_player, clear_all};
    use crate::{
        access::Trusted,
        error::{AdminOperation, LeaderboardError},
        leaderboard::{RankingKey, leaderboard},
        player::{DEFAULT_ROLE, DerivedStats as _},
        validation::{PlayerForm, StatField, ValidationError},
    };

    fn form(nickname: &str) -> PlayerForm {
        PlayerForm {
            nickname: Some(nickname.to_owned()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn admin_adds_player() -> anyhow::Result<()> {
        test_env::wrap(async |conn| {
            let player = add_player(
                &conn,
                Trusted,
                &PlayerForm {
                    kills: Some("100".to_owned()),
                    deaths: Some("50".to_owned()),
                    games_played: Some("5".to_owned()),
                    wins: Some("3".to_owned()),
                    experience: Some("8500".to_owned()),
                    ..form("Ann")
                },
            )
            .await?;

            assert_eq!(player.nickname, "Ann");
            assert_eq!(player.role, DEFAULT_ROLE);
            assert_eq!(player.kd_ratio(), 2.);
            assert_eq!(player.win_rate(), 60.);
            assert_eq!(player.level(), 5);

            let lb = leaderboard(&conn, RankingKey::Experience, 50).await?;
            assert_eq!(lb, [player]);

            anyhow::Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn invalid_player_is_not_saved() -> anyhow::Result<()> {
        test_env::wrap(async |conn| {
            let result = add_player(
                &conn,
                true,
                &PlayerForm {
                    wins: Some("10".to_owned()),
                    games_played: Some("5".to_owned()),
                    ..form("Bob")
                },
            )
            .await;

            assert!(matches!(
                result,
                Err(LeaderboardError::Validation(
                    ValidationError::WinsExceedGames {
                        wins: 10,
                        games_played: 5
                    }
                ))
            ));

            let result = add_player(
                &conn,
                true,
                &PlayerForm {
                    kills: Some("abc".to_owned()),
                    ..form("Bob")
                },
            )
            .await;
            assert!(matches!(
                result,
                Err(LeaderboardError::Validation(ValidationError::NotANumber(
                    StatField::Kills,
                    _
                )))
            ));

            assert_eq!(players::Entity::find().count(&conn).await?, 0);

            anyhow::Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn non_admin_cannot_add() -> anyhow::Result<()> {
        test_env::wrap(async |conn| {
            let result = add_player(&conn, false, &form("Carl")).await;
            assert!(matches!(
                result,
                Err(LeaderboardError::Forbidden(AdminOperation::AddPlayer))
            ));

            // The access is checked before the validation
            let result = add_player(&conn, false, &form("")).await;
            assert!(matches!(
                result,
                Err(LeaderboardError::Forbidden(AdminOperation::AddPlayer))
            ));

            assert_eq!(players::Entity::find().count(&conn).await?, 0);

            anyhow::Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn clear_leaderboard() -> anyhow::Result<()> {
        test_env::wrap(async |conn| {
            for nickname in ["a", "b", "c"] {
                add_player(&conn, Trusted, &form(nickname)).await?;
            }

            let result = clear_all(&conn, false).await;
            assert!(matches!(
                result,
                Err(LeaderboardError::Forbidden(AdminOperation::ClearAll))
            ));
            assert_eq!(players::Entity::find().count(&conn).await?, 3);

            assert_eq!(clear_all(&conn, Trusted).await?, 3);
            assert!(leaderboard(&conn, RankingKey::Kills, 50).await?.is_empty());

            // Clearing an empty leaderboard is fine
            assert_eq!(clear_all(&conn, Trusted).await?, 0);

            anyhow::Ok(())
        })
        .await
    }
}
