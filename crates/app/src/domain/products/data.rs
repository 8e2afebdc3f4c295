//! Products Data

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Product fields as submitted by a caller, before presence checks.
///
/// Every field is optional so that "not provided" can be told apart from
/// falsy values such as a `stock` of `0`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
}

/// Message reported when a submission lacks a required field.
pub const MISSING_REQUIRED_FIELDS: &str =
    "Please provide all required fields: name, description, price, category, and stock";

/// A submission lacked one of the required product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", MISSING_REQUIRED_FIELDS)]
pub struct MissingRequiredFields;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub image_url: Option<String>,
}

impl TryFrom<ProductSubmission> for NewProduct {
    type Error = MissingRequiredFields;

    fn try_from(submission: ProductSubmission) -> Result<Self, Self::Error> {
        let (Some(name), Some(description), Some(price), Some(category), Some(stock)) = (
            non_empty(submission.name),
            non_empty(submission.description),
            submission.price,
            non_empty(submission.category),
            submission.stock,
        ) else {
            return Err(MissingRequiredFields);
        };

        Ok(Self {
            name,
            description,
            price,
            category,
            stock,
            image_url: submission.image_url,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Product Update Data
///
/// `None` leaves the stored field untouched. `image_url` is doubly optional so
/// an explicit `null` clears the stored URL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "provided")]
    pub image_url: Option<Option<String>>,
}

/// Deserialize a present field (including `null`) as `Some`.
///
/// # Errors
///
/// Propagates the inner deserializer's error.
pub fn provided<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
