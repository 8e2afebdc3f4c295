//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    state::State,
};

/// Product Index Handler
///
/// Returns every product, newest first.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(|error| into_api_error("Error fetching products", error))?;

    Ok(Json(Envelope::list(
        products.into_iter().map(Into::into).collect(),
    )))
}
