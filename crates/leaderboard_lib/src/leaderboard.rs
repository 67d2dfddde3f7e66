//! This module contains the leaderboard query engine.
//!
//! The leaderboard is the list of the players, sorted in descending order by a [`RankingKey`].
//! Players with the same value are sorted by their ID, in ascending order, whatever the key.

use std::{fmt, str::FromStr};

use entity::players;
use sea_orm::{ConnectionTrait, EntityTrait as _, QueryOrder as _, QuerySelect as _};
use serde::{Deserialize, Serialize};

use crate::{error::LeaderboardResult, player::DerivedStats as _};

/// The default maximum amount of players in a leaderboard.
pub const DEFAULT_LIMIT: u64 = 50;

/// The statistic used to sort the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKey {
    /// Sort by experience. This is the default.
    #[default]
    Experience,
    /// Sort by kills.
    Kills,
    /// Sort by final kills.
    FinalKills,
    /// Sort by destroyed beds.
    BedsBroken,
    /// Sort by kill/death ratio.
    ///
    /// This one isn't stored, see [`leaderboard`] for more information.
    KdRatio,
}

impl RankingKey {
    /// Returns the ranking key from the parameter of a request.
    ///
    /// Unknown keys fall back to [`RankingKey::Experience`].
    pub fn from_param(param: &str) -> Self {
        param.parse().unwrap_or_default()
    }

    /// Returns the name of the key, as used in requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Kills => "kills",
            Self::FinalKills => "final_kills",
            Self::BedsBroken => "beds_broken",
            Self::KdRatio => "kd_ratio",
        }
    }

    /// Returns the stored column bound to this key, or `None` if the key is derived.
    fn column(self) -> Option<players::Column> {
        match self {
            Self::Experience => Some(players::Column::Experience),
            Self::Kills => Some(players::Column::Kills),
            Self::FinalKills => Some(players::Column::FinalKills),
            Self::BedsBroken => Some(players::Column::BedsBroken),
            Self::KdRatio => None,
        }
    }
}

impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unknown ranking key.
#[derive(Debug, thiserror::Error)]
#[error("unknown ranking key `{0}`")]
pub struct UnknownRankingKey(pub String);

impl FromStr for RankingKey {
    type Err = UnknownRankingKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experience" => Ok(Self::Experience),
            "kills" => Ok(Self::Kills),
            "final_kills" => Ok(Self::FinalKills),
            "beds_broken" => Ok(Self::BedsBroken),
            "kd_ratio" => Ok(Self::KdRatio),
            _ => Err(UnknownRankingKey(s.to_owned())),
        }
    }
}

/// Returns at most `limit` players, sorted in descending order by the provided key.
///
/// For the stored statistics, the sort and the limit are done by the database.
///
/// The K/D ratio isn't stored, so every player is loaded, and sorted in memory by its computed
/// ratio before being truncated. This costs a full scan of the table instead of a top-K fetch,
/// which is fine for the size of a leaderboard.
pub async fn leaderboard<C: ConnectionTrait>(
    conn: &C,
    key: RankingKey,
    limit: u64,
) -> LeaderboardResult<Vec<players::Model>> {
    let Some(column) = key.column() else {
        return by_kd_ratio(conn, limit).await;
    };

    let players = players::Entity::find()
        .order_by_desc(column)
        .order_by_asc(players::Column::Id)
        .limit(limit)
        .all(conn)
        .await?;

    Ok(players)
}

async fn by_kd_ratio<C: ConnectionTrait>(
    conn: &C,
    limit: u64,
) -> LeaderboardResult<Vec<players::Model>> {
    let mut players = players::Entity::find()
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await?;

    // The sort is stable, so equal ratios keep the ID order
    players.sort_by(|a, b| b.kd_ratio().total_cmp(&a.kd_ratio()));
    players.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

    Ok(players)
}
