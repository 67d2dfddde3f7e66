//! The Bedwars leaderboard API library that the program uses.
//!
//! The content of this library is only made for the API program, and its tests.

mod auth;
mod env;
mod error;
mod http;
mod utils;

pub mod configure;

pub use auth::{ADMIN_SESS_KEY, ApiConfig, SessionGate};
pub use env::*;
pub use error::*;
pub use http::api_route;
pub use utils::Res;
