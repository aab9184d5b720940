use chrono::{DateTime, SubsecRound, Utc};
use hostwatch_common::{params::CreateHostParams, views::Host};
use mongodb::bson::{self, Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::StoreError;

/// Keys owned by the store. Client-supplied values for these are dropped
/// before insert.
pub const RESERVED_FIELDS: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// A host document as persisted in the `hosts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbHost {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// When the host was inserted
    #[serde(
        rename = "createdAt",
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// When the host was last written. `None` when the stored value is
    /// missing or unreadable; such hosts never count as stale.
    #[serde(
        rename = "updatedAt",
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Client-supplied fields, minus [`RESERVED_FIELDS`]
    #[serde(flatten)]
    pub fields: Document,
}

impl DbHost {
    /// Build a new host from creation parameters, assigning a fresh id and
    /// stamping both timestamps with `now`.
    ///
    /// `now` is truncated to millisecond precision so the returned value is
    /// identical to what a later read from the store yields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] when a field value has no BSON
    /// representation (e.g. an integer above `i64::MAX`).
    pub fn create(params: CreateHostParams, now: DateTime<Utc>) -> Result<Self, StoreError> {
        let mut fields = bson::to_document(&params.0)?;
        for key in RESERVED_FIELDS {
            fields.remove(key);
        }

        let now = now.trunc_subsecs(3);

        Ok(Self {
            id: ObjectId::new(),
            created_at: Some(now),
            updated_at: Some(now),
            fields,
        })
    }
}

impl From<DbHost> for Host {
    fn from(value: DbHost) -> Self {
        let fields = match Bson::Document(value.fields).into_relaxed_extjson() {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        Self {
            id: value.id.to_hex(),
            fields,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use mongodb::bson::doc;
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> CreateHostParams {
        match value {
            Value::Object(fields) => fields.into(),
            _ => panic!("params must be an object"),
        }
    }

    fn read(document: Document) -> DbHost {
        bson::from_document(document).unwrap()
    }

    #[test]
    fn test_create_strips_reserved_fields() {
        let now = Utc::now();
        let host = DbHost::create(
            params(json!({
                "_id": "mine",
                "name": "h1",
                "createdAt": "yesterday",
                "updatedAt": "yesterday",
            })),
            now,
        )
        .unwrap();

        assert_eq!(host.fields, doc! { "name": "h1" });
        assert_eq!(host.created_at, host.updated_at);

        let updated_at = host.updated_at.unwrap();
        assert_eq!(updated_at.timestamp_millis(), now.timestamp_millis());
        assert_eq!(updated_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_create_unrepresentable_values_declare_no_status() {
        let err = DbHost::create(params(json!({ "big": u64::MAX })), Utc::now()).unwrap_err();

        assert!(matches!(err, StoreError::Encode(_)));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_document_roundtrip_preserves_host() {
        let host = DbHost::create(params(json!({ "name": "h1", "port": 22 })), Utc::now()).unwrap();

        let document = bson::to_document(&host).unwrap();
        assert_eq!(document.get_object_id("_id").unwrap(), host.id);
        assert!(matches!(document.get("updatedAt"), Some(Bson::DateTime(_))));
        assert_eq!(document.get_str("name").unwrap(), "h1");

        assert_eq!(read(document), host);
    }

    #[test]
    fn test_missing_updated_at_stays_unknown() {
        let id = ObjectId::new();
        let host = read(doc! { "_id": id, "name": "legacy" });

        assert_eq!(host.id, id);
        assert_eq!(host.created_at, None);
        assert_eq!(host.updated_at, None);
        assert_eq!(host.fields, doc! { "name": "legacy" });
    }

    #[test]
    fn test_string_updated_at_is_parsed() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let host = read(doc! { "_id": ObjectId::new(), "updatedAt": at.to_rfc3339() });

        assert_eq!(host.updated_at, Some(at));
    }

    #[test]
    fn test_unreadable_updated_at_stays_unknown() {
        for updated_at in [Bson::from("soon"), Bson::from(42), Bson::Null] {
            let host = read(doc! { "_id": ObjectId::new(), "updatedAt": updated_at.clone() });

            assert_eq!(host.updated_at, None, "updatedAt: {updated_at}");
            assert!(host.fields.is_empty());
        }
    }

    #[test]
    fn test_rejects_documents_without_object_id() {
        assert!(bson::from_document::<DbHost>(doc! { "name": "no id" }).is_err());
        assert!(bson::from_document::<DbHost>(doc! { "_id": "not-an-oid" }).is_err());
    }

    #[test]
    fn test_into_view() {
        let updated = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let host = DbHost {
            id: ObjectId::new(),
            created_at: Some(updated - TimeDelta::days(1)),
            updated_at: Some(updated),
            fields: doc! { "name": "h1", "nested": { "ok": true } },
        };

        let view: Host = host.clone().into();

        assert_eq!(view.id, host.id.to_hex());
        assert_eq!(view.fields["name"], "h1");
        assert_eq!(view.fields["nested"], json!({ "ok": true }));
        assert_eq!(view.updated_at, Some(updated));
    }
}
