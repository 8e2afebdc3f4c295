//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/productdb",
        hide_env_values = true
    )]
    pub database_url: String,

    /// Longest wait for a pooled connection before a request fails.
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_MS", default_value_t = 3_000_u64)]
    pub database_acquire_timeout_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.database_acquire_timeout_ms)
    }
}
