//! The main crate of the Bedwars leaderboard.
//!
//! It contains the player statistics and their derived values, the leaderboard query engine,
//! and the validated mutations an administrator can apply to the players table.
//!
//! If you wish to see the crate of the server program itself, take a look
//! at the [`leaderboard_api`](../leaderboard_api_lib/index.html) package.

#![warn(missing_docs)]

mod env;

pub mod access;
pub mod error;
pub mod leaderboard;
pub mod mutation;
pub mod player;
pub mod pool;
pub mod validation;

pub use env::*;
pub use pool::Database;
