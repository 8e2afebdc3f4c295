//! App Router

use salvo::Router;

use crate::{healthcheck, products};

/// Routes mounted under `/api`.
///
/// `search` and `category` are pushed before `{id}` so they are never
/// captured as identifiers.
pub fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("category/{category}").get(products::category::handler))
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}
