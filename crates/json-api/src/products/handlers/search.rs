//! Search Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    state::State,
};

const MISSING_QUERY: &str = "Please provide a search query";

/// Search Products Handler
///
/// Returns products whose name contains `query`, ignoring case.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    query: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(query) = query.into_inner().filter(|query| !query.is_empty()) else {
        return Err(ApiError::bad_request(MISSING_QUERY));
    };

    let products = state
        .app
        .products
        .search_products(query)
        .await
        .map_err(|error| into_api_error("Error searching products", error))?;

    Ok(Json(Envelope::list(
        products.into_iter().map(Into::into).collect(),
    )))
}
