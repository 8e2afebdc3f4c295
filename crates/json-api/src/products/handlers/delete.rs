//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use catalog_app::products::records::parse_product_uuid;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    state::State,
};

const DELETE_FAILED: &str = "Error deleting product";

/// Delete Product Handler
///
/// Permanently removes a product and returns its last state.
#[endpoint(tags("products"), summary = "Delete Product")]
#[tracing::instrument(
    name = "products.delete",
    skip(id, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    tracing::Span::current().record("product_id", tracing::field::display(&id));

    let product = parse_product_uuid(&id)
        .map_err(|error| into_api_error(DELETE_FAILED, error))?;

    let deleted = state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(|error| into_api_error(DELETE_FAILED, error))?;

    tracing::info!(product_uuid = %deleted.uuid, "deleted product");

    Ok(Json(Envelope::with_message(
        "Product deleted successfully",
        deleted.into(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use catalog_app::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, product_uuid, products_service, storage_error};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_returns_deleted_record() -> TestResult {
        let product = make_product("Blue Widget", "Widgets");
        let uuid = product.uuid;

        let mut repo = MockProductsService::new();

        repo.expect_delete_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(product));

        repo.expect_list_products().never();
        repo.expect_list_products_by_category().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();

        let mut res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message.as_deref(), Some("Product deleted successfully"));
        assert_eq!(
            body.data.map(|product| product.name),
            Some("Blue Widget".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() -> TestResult {
        let uuid = product_uuid();

        let mut repo = MockProductsService::new();

        repo.expect_delete_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(ProductsServiceError::NotFound));

        repo.expect_list_products().never();
        repo.expect_list_products_by_category().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();

        let res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_storage_error_returns_500() -> TestResult {
        let uuid = product_uuid();

        let mut repo = MockProductsService::new();

        repo.expect_delete_product()
            .once()
            .return_once(|_| Err(storage_error()));

        repo.expect_list_products().never();
        repo.expect_list_products_by_category().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();

        let mut res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body["message"], DELETE_FAILED);

        Ok(())
    }
}
