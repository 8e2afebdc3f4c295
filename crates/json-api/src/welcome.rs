//! Welcome Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, healthcheck::DatabaseHealth, state::State};

/// Route catalogue advertised by the welcome response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Endpoints {
    pub products: String,
    pub create_product: String,
    pub get_products: String,
    pub get_product_by_id: String,
    pub update_product: String,
    pub delete_product: String,
    pub search_products: String,
    pub get_by_category: String,
    pub health: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            products: "/api/products".to_owned(),
            create_product: "POST /api/products".to_owned(),
            get_products: "GET /api/products".to_owned(),
            get_product_by_id: "GET /api/products/:id".to_owned(),
            update_product: "PUT /api/products/:id".to_owned(),
            delete_product: "DELETE /api/products/:id".to_owned(),
            search_products: "GET /api/products/search?query=name".to_owned(),
            get_by_category: "GET /api/products/category/:category".to_owned(),
            health: "GET /api/health".to_owned(),
        }
    }
}

/// Welcome response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WelcomeResponse {
    pub success: bool,
    pub message: String,
    pub version: String,
    pub database: DatabaseHealth,
    pub endpoints: Endpoints,
}

/// Welcome handler
///
/// Reports the last observed storage status without probing it.
#[endpoint(tags("health"), summary = "API overview")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WelcomeResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(WelcomeResponse {
        success: true,
        message: "Welcome to Product API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        database: state.app.health.storage_status().await.into(),
        endpoints: Endpoints::default(),
    }))
}
