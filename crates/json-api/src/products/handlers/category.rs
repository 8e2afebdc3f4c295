//! Products By Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    state::State,
};

/// Products By Category Handler
///
/// Returns products whose category matches exactly (case-sensitive).
#[endpoint(tags("products"), summary = "List Products By Category")]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products_by_category(category.into_inner())
        .await
        .map_err(|error| into_api_error("Error fetching products by category", error))?;

    Ok(Json(Envelope::list(
        products.into_iter().map(Into::into).collect(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use catalog_app::products::MockProductsService;

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(
            repo,
            Router::with_path("products/category/{category}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_category_forwards_decoded_category() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products_by_category()
            .once()
            .withf(|category| category == "Home Office")
            .return_once(|_| Ok(vec![make_product("Desk", "Home Office")]));

        repo.expect_list_products().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::get("http://example.com/products/category/Home%20Office")
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["category"], "Home Office");

        Ok(())
    }

    #[tokio::test]
    async fn test_category_without_matches_returns_empty_list() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products_by_category()
            .once()
            .withf(|category| category == "electronics")
            .return_once(|_| Ok(vec![]));

        repo.expect_list_products().never();
        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::get("http://example.com/products/category/electronics")
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, json!({ "success": true, "count": 0, "data": [] }));

        Ok(())
    }
}
