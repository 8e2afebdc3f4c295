//! Product request bodies.

use salvo::{Request, oapi::ToSchema};
use serde::{Deserialize, Serialize};

use catalog_app::products::data::{ProductSubmission, ProductUpdate, provided};

use crate::errors::ApiError;

/// Create Product Request
///
/// Every field is optional at the wire level so that missing fields are
/// reported with the required-fields message rather than a parse error.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
}

impl From<CreateProductRequest> for ProductSubmission {
    fn from(request: CreateProductRequest) -> Self {
        ProductSubmission {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
            stock: request.stock,
            image_url: request.image_url,
        }
    }
}

/// Update Product Request
///
/// Absent fields are left unchanged. `imageUrl: null` clears the image.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    #[serde(
        default,
        deserialize_with = "provided",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

impl UpdateProductRequest {
    /// Read the update from the request body.
    ///
    /// A request without a JSON body updates nothing.
    pub(crate) async fn from_request(req: &mut Request) -> Result<Self, ApiError> {
        let is_json = req
            .content_type()
            .is_some_and(|mime| mime.subtype().as_str() == "json");

        if !is_json {
            return Ok(Self::default());
        }

        let payload = req.payload().await.map_err(ApiError::invalid_body)?;

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(payload).map_err(ApiError::invalid_body)
    }
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
            stock: request.stock,
            image_url: request.image_url,
        }
    }
}
