use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::query::{FieldKind, Listable};

/// Appointment document stored in MongoDB.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Appointment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appt_date: Option<mongodb::bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<mongodb::bson::DateTime>,
}

impl Appointment {
    /// Hex id of the owning user, empty when not loaded.
    pub fn owner_id(&self) -> String {
        self.user.map(|id| id.to_hex()).unwrap_or_default()
    }
}

impl Listable for Appointment {
    const CREATED_AT_FIELD: &'static str = "created_at";

    fn field_kind(field: &str) -> FieldKind {
        match field {
            "_id" | "user" | "hospital" => FieldKind::ObjectId,
            "appt_date" | "created_at" => FieldKind::DateTime,
            _ => FieldKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_id() {
        let user = ObjectId::new();
        let appointment = Appointment {
            user: Some(user),
            ..Default::default()
        };
        assert_eq!(appointment.owner_id(), user.to_hex());
        assert_eq!(Appointment::default().owner_id(), "");
    }

    #[test]
    fn test_reference_fields_are_object_ids() {
        assert_eq!(Appointment::field_kind("hospital"), FieldKind::ObjectId);
        assert_eq!(Appointment::field_kind("appt_date"), FieldKind::DateTime);
    }
}
