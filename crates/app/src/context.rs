//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    health::{HealthService, PgHealthService},
    products::{PgProductsService, ProductsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid database configuration")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, health: Arc<dyn HealthService>) -> Self {
        Self { products, health }
    }

    /// Build application context from a database URL.
    ///
    /// The pool connects lazily. The initial probe runs in the background on
    /// the current tokio runtime, so an unreachable database neither blocks
    /// nor prevents start-up.
    ///
    /// # Errors
    ///
    /// Returns an error when the database URL cannot be parsed.
    pub fn from_database_url(url: &str, acquire_timeout: Duration) -> Result<Self, AppInitError> {
        let pool = database::connect_lazy(url, acquire_timeout).map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let probe = db.clone();

        tokio::spawn(async move {
            if probe.ping().await.is_connected() {
                info!("connected to database");
            }
        });

        Ok(Self::from_db(db))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self::new(
            Arc::new(PgProductsService::new(db.clone())),
            Arc::new(PgHealthService::new(db)),
        )
    }
}
