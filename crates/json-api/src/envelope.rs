//! Response envelope shared by every JSON endpoint.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Successful response body.
///
/// `count` is only set for listings, `message` only for writes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    /// Always `true`
    pub success: bool,

    /// Human readable outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of items in `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Response payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    pub(crate) fn with_message(message: &str, data: T) -> Self {
        Self {
            message: Some(message.to_owned()),
            ..Self::data(data)
        }
    }
}

impl<T: ToSchema + 'static> Envelope<Vec<T>> {
    pub(crate) fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::data(items)
        }
    }
}

/// Failed response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Always `false`
    pub success: bool,

    /// Human readable failure summary
    pub message: String,

    /// Underlying error detail, when it may be shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn new(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}
