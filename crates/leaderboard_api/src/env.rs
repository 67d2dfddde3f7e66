use leaderboard_lib::DbEnv;
use mkenv::{error::ConfigInitError, prelude::*};
use once_cell::sync::OnceCell;

#[cfg(not(debug_assertions))]
mkenv::make_config! {
    pub struct DynamicApiEnv {
        pub sess_key: {
            var_name: "LEADERBOARD_API_SESSION_KEY_FILE",
            layers: [file_read()],
            description: "The path to the file containing the session key used by the API",
        },

        pub admin_password: {
            var_name: "LEADERBOARD_ADMIN_PASSWORD_FILE",
            layers: [file_read()],
            description: "The path to the file containing the password of the administrator",
        },
    }
}

#[cfg(debug_assertions)]
mkenv::make_config! {
    pub struct DynamicApiEnv {
        pub sess_key: {
            var_name: "LEADERBOARD_API_SESSION_KEY",
            layers: [or_default()],
            description: "The session key used by the API, a random one is generated if empty",
            default_val_fmt: "empty",
        },

        pub admin_password: {
            var_name: "LEADERBOARD_ADMIN_PASSWORD",
            description: "The password of the administrator",
        },
    }
}

#[cfg(debug_assertions)]
mkenv::make_config! {
    pub struct Hostname {}
}

#[cfg(not(debug_assertions))]
mkenv::make_config! {
    pub struct Hostname {
        pub host: {
            var_name: "LEADERBOARD_API_HOST",
            description: "The hostname of the server where the API is running (e.g. https://bedwars.example.com)",
        }
    }
}

mkenv::make_config! {
    pub struct ApiEnv {
        pub db_env: { DbEnv },

        pub dynamic: { DynamicApiEnv },

        pub port: {
            var_name: "LEADERBOARD_API_PORT",
            layers: [
                parsed_from_str<u16>(),
                or_default_val(|| 3000),
            ],
            description: "The port used to expose the API",
            default_val_fmt: "3000",
        },

        pub host: { Hostname },

        pub session_ttl: {
            var_name: "LEADERBOARD_SESSION_TTL",
            layers: [
                parsed_from_str<u32>(),
                or_default_val(|| 7 * 24 * 3600),
            ],
            description: "The TTL (time-to-live) of the administrator session (in seconds)",
            default_val_fmt: "7 days",
        },

        pub default_limit: {
            var_name: "LEADERBOARD_DEFAULT_LIMIT",
            layers: [
                parsed_from_str<u64>(),
                or_default_val(|| leaderboard_lib::leaderboard::DEFAULT_LIMIT),
            ],
            description: "The maximum amount of players shown on the leaderboard",
            default_val_fmt: "50",
        },
    }
}

static ENV: OnceCell<ApiEnv> = OnceCell::new();

/// Returns the environment of the API.
///
/// # Panics
///
/// This function panics if [`init_env`] wasn't called before.
pub fn env() -> &'static ApiEnv {
    ENV.get().expect("environment of the API should be initialized")
}

/// Reads the environment of the API, and stores it for later use with [`env`].
pub fn init_env() -> anyhow::Result<&'static ApiEnv> {
    fn map_err(err: ConfigInitError<'_>) -> anyhow::Error {
        anyhow::anyhow!("{err}")
    }

    let env = ApiEnv::define();
    env.try_init().map_err(map_err)?;

    Ok(ENV.get_or_init(|| env))
}
