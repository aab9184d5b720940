use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// The fields of a host to register. Any JSON object is accepted; the store
/// assigns `_id`, `createdAt` and `updatedAt` itself and ignores client values
/// for those keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(value_type = Object)]
pub struct CreateHostParams(pub Map<String, Value>);

impl From<Map<String, Value>> for CreateHostParams {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
