use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::query::{FieldKind, Listable};

/// Hospital document stored in MongoDB.
///
/// Every attribute is optional on read because listings may project any
/// subset of fields.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Hospital {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postalcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<mongodb::bson::DateTime>,
}

impl Listable for Hospital {
    const CREATED_AT_FIELD: &'static str = "created_at";

    fn field_kind(field: &str) -> FieldKind {
        match field {
            "_id" => FieldKind::ObjectId,
            "created_at" => FieldKind::DateTime,
            _ => FieldKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};

    #[test]
    fn test_projected_document_deserializes() {
        let hospital: Hospital = from_document(doc! { "name": "Chulalongkorn" }).unwrap();
        assert_eq!(hospital.name.as_deref(), Some("Chulalongkorn"));
        assert_eq!(hospital.id, None);
        assert_eq!(hospital.province, None);
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(Hospital::field_kind("created_at"), FieldKind::DateTime);
        assert_eq!(Hospital::field_kind("_id"), FieldKind::ObjectId);
        assert_eq!(Hospital::field_kind("postalcode"), FieldKind::Text);
    }
}
