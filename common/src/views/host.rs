use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A registered host as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Host {
    /// The unique identifier for this host, assigned by the store.
    #[serde(rename = "_id")]
    pub id: String,

    /// Everything the client supplied when the host was registered. The API
    /// does not constrain the shape of these fields.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last write to this host. Hosts that have not been written to within
    /// the staleness window are dropped from listings. Absent when the store
    /// holds no readable value, in which case the host is never dropped.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
