//! This module contains anything related to the players of the leaderboard: their creation,
//! and the statistics derived from the stored ones.

use entity::players;
use sea_orm::{ActiveModelTrait as _, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::error::LeaderboardResult;

/// The role given to a player when none is provided.
pub const DEFAULT_ROLE: &str = "unranked";

/// The experience required to reach the levels 2 to 6.
const LEVEL_THRESHOLDS: [i32; 5] = [500, 1_500, 3_500, 7_500, 15_000];

/// Past the last threshold, a level is gained every this amount of experience.
const EXPERIENCE_PER_LEVEL: i32 = 10_000;

/// The highest reachable level.
pub const MAX_LEVEL: u8 = 100;

/// Rounds the exact value of the float to the provided amount of decimals, ties to even.
///
/// Scaling the value before rounding would be lossy, e.g. `0.125 * 100.` would round up.
fn round_to(value: f64, decimals: usize) -> f64 {
    // The float formatting is correctly rounded, so the output always parses back
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Returns the kill/death ratio, rounded to 2 decimals.
///
/// A player without any death has a ratio equal to its kills count.
pub fn kd_ratio(kills: i32, deaths: i32) -> f64 {
    if deaths == 0 {
        return f64::from(kills.max(0));
    }
    round_to(f64::from(kills) / f64::from(deaths), 2)
}

/// Returns the percentage of won games, rounded to 1 decimal. It's 0 if no game was played.
pub fn win_rate(wins: i32, games_played: i32) -> f64 {
    if games_played == 0 {
        return 0.;
    }
    round_to(f64::from(wins) / f64::from(games_played) * 100., 1)
}

/// Returns the level reached with the provided experience, between 1 and [`MAX_LEVEL`].
pub fn level(experience: i32) -> u8 {
    match LEVEL_THRESHOLDS.iter().position(|&t| experience < t) {
        Some(i) => i as u8 + 1,
        None => {
            let above = (experience - LEVEL_THRESHOLDS[4]) / EXPERIENCE_PER_LEVEL;
            (5 + above).min(MAX_LEVEL as i32) as u8
        }
    }
}

/// Gives access to the statistics computed from the stored ones.
///
/// These are never persisted.
pub trait DerivedStats {
    /// See [`kd_ratio`].
    fn kd_ratio(&self) -> f64;

    /// See [`win_rate`].
    fn win_rate(&self) -> f64;

    /// See [`level`].
    fn level(&self) -> u8;
}

impl DerivedStats for players::Model {
    fn kd_ratio(&self) -> f64 {
        kd_ratio(self.kills, self.deaths)
    }

    fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.games_played)
    }

    fn level(&self) -> u8 {
        level(self.experience)
    }
}

/// A player that isn't saved yet.
///
/// The values are expected to be validated already, see the
/// [`validation`](crate::validation) module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    /// The display name.
    pub nickname: String,
    /// The number of kills.
    pub kills: i32,
    /// The number of final kills.
    pub final_kills: i32,
    /// The number of deaths.
    pub deaths: i32,
    /// The number of destroyed beds.
    pub beds_broken: i32,
    /// The number of played games.
    pub games_played: i32,
    /// The number of won games.
    pub wins: i32,
    /// The experience points.
    pub experience: i32,
    /// The free-text role.
    pub role: String,
    /// The server the player comes from.
    pub server_ip: String,
}

impl NewPlayer {
    /// Returns a player with the provided nickname, and every other field set to its default.
    pub fn new<S: Into<String>>(nickname: S) -> Self {
        Self {
            nickname: nickname.into(),
            kills: 0,
            final_kills: 0,
            deaths: 0,
            beds_broken: 0,
            games_played: 0,
            wins: 0,
            experience: 0,
            role: DEFAULT_ROLE.to_owned(),
            server_ip: String::new(),
        }
    }
}

/// Inserts the provided player and returns the saved row.
///
/// The creation date is set to the current time.
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    player: NewPlayer,
) -> LeaderboardResult<players::Model> {
    let model = players::ActiveModel {
        nickname: Set(player.nickname),
        kills: Set(player.kills),
        final_kills: Set(player.final_kills),
        deaths: Set(player.deaths),
        beds_broken: Set(player.beds_broken),
        games_played: Set(player.games_played),
        wins: Set(player.wins),
        experience: Set(player.experience),
        role: Set(player.role),
        server_ip: Set(player.server_ip),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(model)
}

/// A player as displayed on the leaderboard, with its derived statistics.
///
/// The stored fields are the same as in [`players::Model`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PlayerView {
    pub id: i32,
    pub nickname: String,
    pub kills: i32,
    pub final_kills: i32,
    pub deaths: i32,
    pub beds_broken: i32,
    pub games_played: i32,
    pub wins: i32,
    pub experience: i32,
    pub role: String,
    pub server_ip: String,
    pub created_at: chrono::NaiveDateTime,
    /// See [`kd_ratio`].
    pub kd_ratio: f64,
    /// See [`win_rate`].
    pub win_rate: f64,
    /// See [`level`].
    pub level: u8,
}

impl From<players::Model> for PlayerView {
    fn from(player: players::Model) -> Self {
        let kd_ratio = player.kd_ratio();
        let win_rate = player.win_rate();
        let level = player.level();

        Self {
            id: player.id,
            nickname: player.nickname,
            kills: player.kills,
            final_kills: player.final_kills,
            deaths: player.deaths,
            beds_broken: player.beds_broken,
            games_played: player.games_played,
            wins: player.wins,
            experience: player.experience,
            role: player.role,
            server_ip: player.server_ip,
            created_at: player.created_at,
            kd_ratio,
            win_rate,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_LEVEL, kd_ratio, level, win_rate};

    #[test]
    fn kd_ratio_with_deaths() {
        assert_eq!(kd_ratio(100, 50), 2.);
        assert_eq!(kd_ratio(150, 120), 1.25);
        assert_eq!(kd_ratio(1, 3), 0.33);
        assert_eq!(kd_ratio(2, 3), 0.67);
        assert_eq!(kd_ratio(7, 3), 2.33);
        assert_eq!(kd_ratio(13, 100), 0.13);

        for kills in 0..300 {
            for deaths in 1..300 {
                let diff = (kd_ratio(kills, deaths) - kills as f64 / deaths as f64).abs();
                assert!(diff <= 0.005 + 1e-9, "{kills}/{deaths}");
            }
        }
    }

    #[test]
    fn kd_ratio_ties_round_to_even() {
        // Exact ties
        assert_eq!(kd_ratio(1, 8), 0.12);
        assert_eq!(kd_ratio(5, 8), 0.62);
        assert_eq!(kd_ratio(7, 8), 0.88);
        assert_eq!(kd_ratio(3, 8), 0.38);
        // 3/40 is stored slightly below 0.075
        assert_eq!(kd_ratio(3, 40), 0.07);
        // 9/40 is stored slightly above 0.225
        assert_eq!(kd_ratio(9, 40), 0.23);
    }

    #[test]
    fn kd_ratio_without_deaths() {
        assert_eq!(kd_ratio(0, 0), 0.);
        assert_eq!(kd_ratio(10, 0), 10.);
        assert_eq!(kd_ratio(999_999, 0), 999_999.);
    }

    #[test]
    fn win_rate_values() {
        assert_eq!(win_rate(0, 0), 0.);
        assert_eq!(win_rate(3, 5), 60.);
        assert_eq!(win_rate(35, 50), 70.);
        assert_eq!(win_rate(1, 3), 33.3);
        assert_eq!(win_rate(2, 3), 66.7);
        assert_eq!(win_rate(7, 7), 100.);

        assert_eq!(win_rate(1, 16), 6.2);
        assert_eq!(win_rate(3, 16), 18.8);
        assert_eq!(win_rate(5, 16), 31.2);
        assert_eq!(win_rate(1, 8), 12.5);

        for games_played in 1..300 {
            for wins in 0..=games_played {
                let rate = win_rate(wins, games_played);
                assert!((0. ..=100.).contains(&rate));
                let diff = (rate - wins as f64 / games_played as f64 * 100.).abs();
                assert!(diff <= 0.05 + 1e-9, "{wins}/{games_played}");
            }
        }
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(level(0), 1);
        assert_eq!(level(499), 1);
        assert_eq!(level(500), 2);
        assert_eq!(level(1_499), 2);
        assert_eq!(level(1_500), 3);
        assert_eq!(level(3_500), 4);
        assert_eq!(level(7_499), 4);
        assert_eq!(level(7_500), 5);
        assert_eq!(level(15_000), 5);
        assert_eq!(level(24_999), 5);
        assert_eq!(level(25_000), 6);
        assert_eq!(level(999_999), MAX_LEVEL);
    }

    #[test]
    fn level_is_monotonic_and_bounded() {
        let mut previous = level(0);
        for experience in (0..=999_999).step_by(37) {
            let current = level(experience);
            assert!(current >= previous, "level decreased at {experience}");
            assert!((1..=MAX_LEVEL).contains(&current));
            previous = current;
        }
    }
}
