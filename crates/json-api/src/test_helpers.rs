//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use catalog_app::{
    context::AppContext,
    database::{ConnectionState, DriverError, StorageStatus},
    health::MockHealthService,
    products::{
        MockProductsService, ProductsServiceError,
        records::{ProductRecord, ProductUuid},
    },
};

use crate::{config::server::Environment, state::State};

pub(crate) fn product_uuid() -> ProductUuid {
    ProductUuid::from_uuid(Uuid::now_v7())
}

pub(crate) fn make_product(name: &str, category: &str) -> ProductRecord {
    ProductRecord {
        uuid: product_uuid(),
        name: name.to_string(),
        description: format!("{name} description"),
        price: 25.0,
        category: category.to_string(),
        stock: 10,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn storage_error() -> ProductsServiceError {
    ProductsServiceError::Sql(DriverError::PoolTimedOut)
}

pub(crate) fn connected_status() -> StorageStatus {
    StorageStatus {
        state: ConnectionState::Connected,
        last_error: None,
        checked_at: Some(Timestamp::UNIX_EPOCH),
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_list_products_by_category().never();
    products.expect_search_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_health_mock() -> MockHealthService {
    let mut health = MockHealthService::new();

    health.expect_check_storage().never();
    health.expect_storage_status().never();

    health
}

pub(crate) fn state_with(
    products: MockProductsService,
    health: MockHealthService,
    environment: &str,
) -> Arc<State> {
    State::shared(
        AppContext::new(Arc::new(products), Arc::new(health)),
        Environment::from(environment),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(products, strict_health_mock(), "test")))
            .push(route),
    )
}

pub(crate) fn health_service(health: MockHealthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(strict_products_mock(), health, "test")))
            .push(route),
    )
}
