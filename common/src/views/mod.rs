//! Output views for the various functions within hostwatch.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod host;
pub use host::*;

/// An error response for an API endpoint. The message is deliberately generic;
/// the underlying cause only ever reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// A human-readable message describing what failed.
    pub body: String,
}

impl ApiErrorResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}
