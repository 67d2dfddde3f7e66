#[cfg(debug_assertions)]
mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbUrlEnv {
        /// The database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            description: "The URL to the SQL database (e.g. sqlite://leaderboard.db?mode=rwc)",
        }
    }
}

#[cfg(not(debug_assertions))]
mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbUrlEnv {
        /// The path to the file containing the database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            layers: [
                file_read(),
            ],
            description: "The path to the file containing the URL to the SQL database",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up a connection to the database of the leaderboard.
    pub struct DbEnv {
        /// The environment for the SQL database.
        pub db_url: { DbUrlEnv },
    }
}
