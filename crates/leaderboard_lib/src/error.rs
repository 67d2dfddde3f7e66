//! A module containing the [`LeaderboardError`] enum, which contains the errors raised
//! by the operations of this crate.

use std::fmt;

use crate::validation::ValidationError;

/// The state-changing operations reserved to the administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOperation {
    /// Adding a player to the leaderboard.
    AddPlayer,
    /// Removing every player from the leaderboard.
    ClearAll,
}

impl fmt::Display for AdminOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminOperation::AddPlayer => f.write_str("add players"),
            AdminOperation::ClearAll => f.write_str("clear the leaderboard"),
        }
    }
}

/// Represents any type of error that could happen when using this crate.
#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum LeaderboardError {
    // --------
    // --- Internal server errors
    // --------

    /// An error from the database.
    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),

    // --------
    // --- Authorization errors
    // --------

    /// The caller doesn't hold the administrator capability.
    #[error("access denied: only the administrator can {0}")]
    Forbidden(
        /// The rejected operation.
        AdminOperation,
    ),

    // --------
    // --- Logical errors
    // --------

    /// The submitted player didn't pass the field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Represents the result of a computation that could return a [`LeaderboardError`].
pub type LeaderboardResult<T = ()> = Result<T, LeaderboardError>;
