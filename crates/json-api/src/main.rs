//! Product Catalog JSON API Server

use std::process;

use salvo::{
    affix_state::inject, catcher::Catcher, oapi::OpenApi, oapi::swagger_ui::SwaggerUi, prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use catalog_app::context::AppContext;

use crate::{catcher::ErrorEnvelope, config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod catcher;
mod config;
mod cors;
mod envelope;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod welcome;

/// Product Catalog JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.acquire_timeout(),
    ) {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let environment = config.server.environment.clone();
    let expose_errors = !environment.is_production();

    let addr = config.socket_addr();

    info!(environment = %environment, "Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::shared(app, environment)))
        .get(welcome::handler)
        .push(router::api_router());

    let doc = OpenApi::new("Product Catalog API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let service = Service::new(router)
        .catcher(Catcher::default().hoop(ErrorEnvelope::new(expose_errors)))
        .hoop(observability::request_logging)
        .hoop(cors::handler);

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(service).await;

    info!("server stopped");
}
