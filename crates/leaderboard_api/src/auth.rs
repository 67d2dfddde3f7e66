//! The administrator session.
//!
//! The administrator flag is stored in the cookie session of the client, once it logged in
//! with the configured password.

use actix_session::Session;
use leaderboard_lib::access::AccessGate;

use crate::{ApiErrorKind, ApiResult};

/// The key of the administrator flag in the session.
pub const ADMIN_SESS_KEY: &str = "__lb_is_admin";

/// The settings of the API which are read once at start-up.
#[derive(Clone)]
pub struct ApiConfig {
    /// The password expected on the `/login` route.
    pub admin_password: String,
    /// The maximum amount of players shown on the leaderboard.
    pub leaderboard_limit: u64,
}

impl ApiConfig {
    /// Returns true if the provided password is the one of the administrator.
    pub fn is_admin_password(&self, password: &str) -> bool {
        !self.admin_password.is_empty() && password == self.admin_password
    }
}

/// The access gate read from the session of the client.
#[derive(Debug, Clone, Copy)]
pub struct SessionGate {
    is_admin: bool,
}

impl SessionGate {
    pub fn read(session: &Session) -> ApiResult<Self> {
        let is_admin = session
            .get::<bool>(ADMIN_SESS_KEY)
            .map_err(|e| ApiErrorKind::Session(e.to_string()))?
            .unwrap_or_default();
        Ok(Self { is_admin })
    }
}

impl AccessGate for SessionGate {
    fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Grants the administrator capability to the session.
pub fn log_in(session: &Session) -> ApiResult<()> {
    session.renew();
    session
        .insert(ADMIN_SESS_KEY, true)
        .map_err(|e| ApiErrorKind::Session(e.to_string()))
}

/// Removes the administrator capability from the session.
pub fn log_out(session: &Session) {
    session.remove(ADMIN_SESS_KEY);
}

#[cfg(test)]
mod tests {
    use super::ApiConfig;

    #[test]
    fn password_check() {
        let config = ApiConfig {
            admin_password: "s3cret".to_owned(),
            leaderboard_limit: 50,
        };
        assert!(config.is_admin_password("s3cret"));
        assert!(!config.is_admin_password("S3cret"));
        assert!(!config.is_admin_password("s3cret "));
        assert!(!config.is_admin_password(""));

        let config = ApiConfig {
            admin_password: String::new(),
            leaderboard_limit: 50,
        };
        assert!(!config.is_admin_password(""));
    }
}
