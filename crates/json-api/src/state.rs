//! State

use std::{sync::Arc, time::Instant};

use catalog_app::context::AppContext;

use crate::config::server::Environment;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) environment: Environment,
    started: Instant,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, environment: Environment) -> Self {
        Self {
            app,
            environment,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, environment: Environment) -> Arc<Self> {
        Arc::new(Self::new(app, environment))
    }

    /// Whole seconds since the server state was built.
    #[must_use]
    pub(crate) fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
