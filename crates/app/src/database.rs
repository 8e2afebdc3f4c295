//! Database connection management

use std::{io, sync::Arc, time::Duration};

use jiff::Timestamp;
use serde::Serialize;
use sqlx::{Connection, PgConnection, PgPool, postgres::PgPoolOptions, query};
use tokio::{sync::RwLock, time::timeout};
use tracing::{info, warn};

pub use sqlx::Error as DriverError;

/// SQL used to probe storage connectivity.
pub const PING_SQL: &str = "SELECT 1";

/// How long a caller waits for a pooled connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Whether a driver error says the database itself could not be reached.
///
/// Query-level failures (missing rows, constraint violations, bad SQL) leave
/// the connection status untouched.
#[must_use]
pub fn is_connection_error(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => true,
        sqlx::Error::Database(source) => source.code().is_some_and(|code| {
            code.starts_with("08") || code.starts_with("28") || code.starts_with("57P0")
        }),
        _ => false,
    }
}

/// Connection state of the storage pool as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No probe has completed yet.
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

/// Likely cause of a storage connection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionDiagnosis {
    Authentication,
    Dns,
    Timeout,
    Unknown,
}

impl ConnectionDiagnosis {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Dns => "dns",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Classify a driver error.
    #[must_use]
    pub fn from_error(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => return Self::Timeout,
            sqlx::Error::Io(source) if source.kind() == io::ErrorKind::TimedOut => {
                return Self::Timeout;
            }
            sqlx::Error::Database(source)
                if source.code().is_some_and(|code| code.starts_with("28")) =>
            {
                return Self::Authentication;
            }
            _ => {}
        }

        Self::from_message(&error.to_string())
    }

    /// Classify a failure from its message text alone.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();

        if message.contains("authentication") || message.contains("password") {
            Self::Authentication
        } else if message.contains("lookup")
            || message.contains("name or service not known")
            || message.contains("nodename nor servname")
            || message.contains("name resolution")
            || message.contains("dns")
        {
            Self::Dns
        } else if message.contains("timed out") || message.contains("timeout") {
            Self::Timeout
        } else {
            Self::Unknown
        }
    }
}

/// The most recent connection failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionFailure {
    pub message: String,
    pub diagnosis: ConnectionDiagnosis,
    pub occurred_at: Timestamp,
}

/// Snapshot of the storage connection status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStatus {
    pub state: ConnectionState,
    pub last_error: Option<ConnectionFailure>,
    pub checked_at: Option<Timestamp>,
}

impl StorageStatus {
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    fn connecting() -> Self {
        Self {
            state: ConnectionState::Connecting,
            last_error: None,
            checked_at: None,
        }
    }

    fn record(&mut self, outcome: Result<(), &sqlx::Error>) {
        let now = Timestamp::now();

        self.checked_at = Some(now);

        match outcome {
            Ok(()) => self.state = ConnectionState::Connected,
            Err(error) => {
                self.state = ConnectionState::Disconnected;
                self.last_error = Some(ConnectionFailure {
                    message: error.to_string(),
                    diagnosis: ConnectionDiagnosis::from_error(error),
                    occurred_at: now,
                });
            }
        }
    }
}

/// Storage pool together with the connection status it has observed.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    status: Arc<RwLock<StorageStatus>>,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            status: Arc::new(RwLock::new(StorageStatus::connecting())),
        }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Last observed connection status, without touching the database.
    pub async fn status(&self) -> StorageStatus {
        self.status.read().await.clone()
    }

    /// Probe the database, record the outcome and return the new status.
    pub async fn ping(&self) -> StorageStatus {
        let outcome = query(PING_SQL).execute(&self.pool).await;

        match outcome {
            Ok(_) => self.record(Ok(())).await,
            Err(sqlx::Error::PoolTimedOut) => {
                let cause = self
                    .diagnose_timeout()
                    .await
                    .unwrap_or(sqlx::Error::PoolTimedOut);

                self.record(Err(&cause)).await
            }
            Err(error) => self.record(Err(&error)).await,
        }
    }

    /// Record the connectivity implied by the outcome of a storage operation.
    pub async fn observe<T>(&self, outcome: &Result<T, sqlx::Error>) {
        match outcome {
            Ok(_) => {
                if !self.status.read().await.is_connected() {
                    self.record(Ok(())).await;
                }
            }
            Err(error) if is_connection_error(error) => {
                self.record(Err(error)).await;
            }
            Err(_) => {}
        }
    }

    /// Open a connection outside the pool to find out why acquiring one timed
    /// out. Returns `None` when the direct attempt succeeds or also times out.
    async fn diagnose_timeout(&self) -> Option<sqlx::Error> {
        let options = self.pool.connect_options();
        let limit = self.pool.options().get_acquire_timeout();

        match timeout(limit, PgConnection::connect_with(&options)).await {
            Ok(Ok(connection)) => {
                if let Err(error) = connection.close().await {
                    warn!("failed to close diagnostic connection: {error}");
                }

                None
            }
            Ok(Err(error)) => Some(error),
            Err(_elapsed) => None,
        }
    }

    async fn record(&self, outcome: Result<(), &sqlx::Error>) -> StorageStatus {
        let mut status = self.status.write().await;

        match outcome {
            Ok(()) => {
                if !status.is_connected() {
                    info!("storage connection established");
                }
            }
            Err(error) => warn!("storage connection failed: {error}"),
        }

        status.record(outcome);

        status.clone()
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Build a pool that connects on first use and waits at most
/// `acquire_timeout` for a connection.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed.
pub fn connect_lazy(
    database_url: &str,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
}
