//! Get Product Handler

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

const FETCH_FAILED: &str = "Error fetching product";

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product =
        parse_product_uuid(&id.into_inner()).map_err(|error| into_api_error(FETCH_FAILED, error))?;

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(|error| into_api_error(FETCH_FAILED, error))?;

    Ok(Json(Envelope::data(product.into())))
}
