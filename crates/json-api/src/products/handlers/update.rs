//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use catalog_app::products::records::parse_product_uuid;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{
        errors::into_api_error, requests::UpdateProductRequest, responses::ProductResponse,
    },
    state::State,
};

const UPDATE_FAILED: &str = "Error updating product";

/// Product Update Handler
///
/// Overwrites only the fields present in the body. A request without a JSON
/// body only refreshes `updatedAt`.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    request_body = UpdateProductRequest
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, req, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    tracing::Span::current().record("product_id", tracing::field::display(&id));

    let product =
        parse_product_uuid(&id).map_err(|error| into_api_error(UPDATE_FAILED, error))?;

    let update = UpdateProductRequest::from_request(req).await?;

    let updated = state
        .app
        .products
        .update_product(product, update.into())
        .await
        .map_err(|error| into_api_error(UPDATE_FAILED, error))?;

    tracing::info!(product_uuid = %updated.uuid, "updated product");

    Ok(Json(Envelope::with_message(
        "Product updated successfully",
        updated.into(),
    )))
}
