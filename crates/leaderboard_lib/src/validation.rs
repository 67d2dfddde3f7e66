//! The validation of the players submitted by the administrator.
//!
//! The fields are received as raw strings, and are checked in this order, stopping at the
//! first failure:
//!
//! 1. The nickname must not be empty, once trimmed.
//! 2. The nickname must not be longer than [`MAX_NICKNAME_LEN`] characters.
//! 3. Each statistic, in the order of [`StatField::ALL`], must be a whole number between 0
//!    and [`MAX_STAT_VALUE`]. A missing or blank statistic is 0.
//! 4. The wins must not exceed the played games.

use std::{fmt, num::IntErrorKind};

use serde::Deserialize;

use crate::player::{DEFAULT_ROLE, NewPlayer};

/// The maximum length of a nickname, in characters.
pub const MAX_NICKNAME_LEN: usize = 20;

/// The maximum value of a statistic.
pub const MAX_STAT_VALUE: i32 = 999_999;

/// The numeric fields of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StatField {
    Kills,
    FinalKills,
    Deaths,
    BedsBroken,
    GamesPlayed,
    Wins,
    Experience,
}

impl StatField {
    /// Every numeric field, in validation order.
    pub const ALL: [StatField; 7] = [
        Self::Kills,
        Self::FinalKills,
        Self::Deaths,
        Self::BedsBroken,
        Self::GamesPlayed,
        Self::Wins,
        Self::Experience,
    ];
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Kills => "kills",
            Self::FinalKills => "final kills",
            Self::Deaths => "deaths",
            Self::BedsBroken => "beds broken",
            Self::GamesPlayed => "games played",
            Self::Wins => "wins",
            Self::Experience => "experience",
        })
    }
}

/// The reason a submitted player was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The nickname is empty or only made of whitespaces.
    #[error("nickname cannot be empty")]
    EmptyNickname,
    /// The nickname has more than [`MAX_NICKNAME_LEN`] characters.
    #[error("nickname cannot be longer than 20 characters, got {0}")]
    NicknameTooLong(
        /// The length of the provided nickname.
        usize,
    ),
    /// The statistic isn't a whole number.
    #[error("{0} must be a whole number, got `{1}`")]
    NotANumber(StatField, String),
    /// The statistic is negative.
    #[error("{0} must be a non-negative number")]
    Negative(StatField),
    /// The statistic is above [`MAX_STAT_VALUE`].
    #[error("{0} cannot exceed 999,999")]
    TooLarge(StatField),
    /// The wins exceed the played games.
    #[error("wins ({wins}) cannot exceed games played ({games_played})")]
    WinsExceedGames {
        /// The number of won games.
        wins: i32,
        /// The number of played games.
        games_played: i32,
    },
}

/// A player submitted by the administrator, with its fields not checked yet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PlayerForm {
    pub nickname: Option<String>,
    pub kills: Option<String>,
    pub final_kills: Option<String>,
    pub deaths: Option<String>,
    pub beds_broken: Option<String>,
    pub games_played: Option<String>,
    pub wins: Option<String>,
    pub experience: Option<String>,
    pub role: Option<String>,
    pub server_ip: Option<String>,
}

impl PlayerForm {
    /// Returns the raw value of the provided numeric field.
    pub fn stat(&self, field: StatField) -> Option<&str> {
        match field {
            StatField::Kills => self.kills.as_deref(),
            StatField::FinalKills => self.final_kills.as_deref(),
            StatField::Deaths => self.deaths.as_deref(),
            StatField::BedsBroken => self.beds_broken.as_deref(),
            StatField::GamesPlayed => self.games_played.as_deref(),
            StatField::Wins => self.wins.as_deref(),
            StatField::Experience => self.experience.as_deref(),
        }
    }
}

fn parse_stat(field: StatField, raw: Option<&str>) -> Result<i32, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(0);
    }

    match raw.parse::<i64>() {
        Ok(value) if value < 0 => Err(ValidationError::Negative(field)),
        Ok(value) if value > i64::from(MAX_STAT_VALUE) => Err(ValidationError::TooLarge(field)),
        Ok(value) => Ok(value as i32),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Err(ValidationError::TooLarge(field)),
            IntErrorKind::NegOverflow => Err(ValidationError::Negative(field)),
            _ => Err(ValidationError::NotANumber(field, raw.to_owned())),
        },
    }
}

/// Checks the provided form, and returns the player ready to be saved.
pub fn validate(form: &PlayerForm) -> Result<NewPlayer, ValidationError> {
    let nickname = form.nickname.as_deref().map(str::trim).unwrap_or_default();
    if nickname.is_empty() {
        return Err(ValidationError::EmptyNickname);
    }
    let nickname_len = nickname.chars().count();
    if nickname_len > MAX_NICKNAME_LEN {
        return Err(ValidationError::NicknameTooLong(nickname_len));
    }

    let mut stats = [0; StatField::ALL.len()];
    for (value, field) in stats.iter_mut().zip(StatField::ALL) {
        *value = parse_stat(field, form.stat(field))?;
    }
    let [
        kills,
        final_kills,
        deaths,
        beds_broken,
        games_played,
        wins,
        experience,
    ] = stats;

    if wins > games_played {
        return Err(ValidationError::WinsExceedGames { wins, games_played });
    }

    let role = match form.role.as_deref().map(str::trim) {
        Some(role) if !role.is_empty() => role.to_owned(),
        _ => DEFAULT_ROLE.to_owned(),
    };
    let server_ip = form
        .server_ip
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned();

    Ok(NewPlayer {
        nickname: nickname.to_owned(),
        kills,
        final_kills,
        deaths,
        beds_broken,
        games_played,
        wins,
        experience,
        role,
        server_ip,
    })
}
