//! Server Config

use std::fmt;

use clap::Args;

/// Deployment environment the server runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment(String);

impl Environment {
    /// Error details are only exposed outside production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.0.eq_ignore_ascii_case("production")
    }

    /// Environment name as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Deployment environment (development, production, ...)
    #[arg(long, env = "APP_ENV", default_value = "development", value_parser = parse_environment)]
    pub environment: Environment,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_environment(value: &str) -> Result<Environment, String> {
    let value = value.trim();

    if value.is_empty() {
        return Err("environment cannot be empty".to_owned());
    }

    Ok(Environment::from(value))
}
