use clap::Parser;
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;

/// MySQL servers are always reached on the standard port.
pub const MYSQL_PORT: u16 = 3306;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mysqlsh")]
#[command(version)]
#[command(about = "Minimal interactive MySQL shell.\n\nType SQL and end it with ';' to run it. Ctrl-C quits.")]
pub struct Config {
    /// Username
    #[arg(long, default_value = "root")]
    pub user: String,

    /// Password
    #[arg(long, env = "MYSQL_PWD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Hostname
    #[arg(long, env = "MYSQL_HOST", default_value = "localhost")]
    pub host: String,

    /// Database name
    #[arg(long = "db", default_value = "")]
    pub database: String,
}

impl Config {
    /// The selected database, or `None` when `--db` was left empty.
    pub fn database(&self) -> Option<&str> {
        Some(self.database.as_str()).filter(|db| !db.is_empty())
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(MYSQL_PORT)
            .username(&self.user);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if let Some(db) = self.database() {
            options = options.database(db);
        }
        options
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, MYSQL_PORT)?;
        if let Some(db) = self.database() {
            write!(f, "/{}", db)?;
        }
        Ok(())
    }
}
