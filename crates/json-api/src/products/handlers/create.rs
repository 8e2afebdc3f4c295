//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use catalog_app::products::data::{MISSING_REQUIRED_FIELDS, NewProduct, ProductSubmission};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{
        errors::into_api_error, requests::CreateProductRequest, responses::ProductResponse,
    },
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(category = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = NewProduct::try_from(ProductSubmission::from(json.into_inner()))
        .map_err(|_missing| ApiError::bad_request(MISSING_REQUIRED_FIELDS))?;

    tracing::Span::current().record("category", tracing::field::display(&product.category));

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(|error| into_api_error("Error creating product", error))?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .map_err(ApiError::internal)?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, "created product");

    Ok(Json(Envelope::with_message(
        "Product created successfully",
        product.into(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use catalog_app::products::MockProductsService;

    use crate::test_helpers::{make_product, products_service, storage_error};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").post(handler))
    }

    fn strict_repo() -> MockProductsService {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_list_products().never();
        repo.expect_list_products_by_category().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        repo
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut product = make_product("Pen", "Office");
        product.price = 0.0;
        product.stock = 0;
        let uuid = product.uuid;

        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| {
                *new == NewProduct {
                    name: "Pen".to_string(),
                    description: "Blue ink".to_string(),
                    price: 0.0,
                    category: "Office".to_string(),
                    stock: 0,
                    image_url: None,
                }
            })
            .return_once(move |_| Ok(product));

        repo.expect_list_products().never();
        repo.expect_list_products_by_category().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Pen",
                "description": "Blue ink",
                "price": 0,
                "category": "Office",
                "stock": 0
            }))
            .send(&make_service(repo))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/products/{uuid}").as_str()));
        assert_eq!(body.message.as_deref(), Some("Product created successfully"));
        assert_eq!(body.data.map(|product| product.stock), Some(0));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_field_returns_400() -> TestResult {
        for missing in ["name", "description", "price", "category", "stock"] {
            let mut payload = json!({
                "name": "Pen",
                "description": "Blue ink",
                "price": 1.5,
                "category": "Office",
                "stock": 3
            });

            if let Some(fields) = payload.as_object_mut() {
                fields.remove(missing);
            }

            let mut res = TestClient::post("http://example.com/products")
                .json(&payload)
                .send(&make_service(strict_repo()))
                .await;

            let body: Value = res.take_json().await?;

            assert_eq!(
                res.status_code,
                Some(StatusCode::BAD_REQUEST),
                "expected 400 without {missing}"
            );
            assert_eq!(
                body,
                json!({ "success": false, "message": MISSING_REQUIRED_FIELDS })
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_empty_name_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "",
                "description": "Blue ink",
                "price": 1.5,
                "category": "Office",
                "stock": 3
            }))
            .send(&make_service(strict_repo()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_storage_error_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(storage_error()));

        repo.expect_list_products().never();
        repo.expect_list_products_by_category().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Pen",
                "description": "Blue ink",
                "price": 1.5,
                "category": "Office",
                "stock": 3,
                "imageUrl": "https://img.example.com/pen.png"
            }))
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body["message"], "Error creating product");
        assert!(body["error"].is_string(), "expected error detail, got {body}");

        Ok(())
    }
}
