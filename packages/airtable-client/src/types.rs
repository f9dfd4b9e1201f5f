//! Wire and domain types for the business directory table.
//!
//! The table columns are named in Cyrillic; the wire structs own that
//! translation so the rest of the workspace speaks plain field names.

use serde::{Deserialize, Serialize};

/// A business submission as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessRecord {
    /// Store-assigned record id.
    pub id: String,
    pub name: String,
    pub city: String,
    pub services: String,
    pub contact: String,
    pub verified: bool,
    pub rejected: bool,
    /// Telegram user id of the submitter.
    pub submitter_id: i64,
}

/// Fields for a new, unreviewed business record.
#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub name: String,
    pub city: String,
    pub services: String,
    pub contact: String,
    pub submitter_id: i64,
}

// Wire representation.

#[derive(Debug, Deserialize)]
pub(crate) struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Record {
    pub id: String,
    pub fields: RecordFields,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RecordFields {
    #[serde(rename = "Название", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Город", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "Услуги", default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(rename = "Контакт", default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "Проверено", default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(rename = "Отклонено", default, skip_serializing_if = "Option::is_none")]
    pub rejected: Option<bool>,
    // The table stores the Telegram id as text.
    #[serde(rename = "User_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldsEnvelope {
    pub fields: RecordFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRecord {
    pub id: String,
}

impl Record {
    pub(crate) fn into_business(self) -> BusinessRecord {
        let f = self.fields;
        BusinessRecord {
            id: self.id,
            name: f.name.unwrap_or_default(),
            city: f.city.unwrap_or_default(),
            services: f.services.unwrap_or_default(),
            contact: f.contact.unwrap_or_default(),
            verified: f.verified.unwrap_or(false),
            rejected: f.rejected.unwrap_or(false),
            submitter_id: f
                .user_id
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl From<&NewBusiness> for FieldsEnvelope {
    fn from(b: &NewBusiness) -> Self {
        Self {
            fields: RecordFields {
                name: Some(b.name.clone()),
                city: Some(b.city.clone()),
                services: Some(b.services.clone()),
                contact: Some(b.contact.clone()),
                verified: Some(false),
                rejected: Some(false),
                user_id: Some(b.submitter_id.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_with_missing_fields_defaults() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "id": "recXYZ",
            "fields": { "Название": "Кафе" }
        }))
        .unwrap();

        let business = record.into_business();
        assert_eq!(business.id, "recXYZ");
        assert_eq!(business.name, "Кафе");
        assert_eq!(business.city, "");
        assert!(!business.verified);
        assert!(!business.rejected);
        assert_eq!(business.submitter_id, 0);
    }

    #[test]
    fn new_business_serializes_store_column_names() {
        let envelope = FieldsEnvelope::from(&NewBusiness {
            name: "Cafe A".into(),
            city: "Kyiv".into(),
            services: "10% discount".into(),
            contact: "@cafeA".into(),
            submitter_id: 7,
        });

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["fields"]["Название"], "Cafe A");
        assert_eq!(json["fields"]["Город"], "Kyiv");
        assert_eq!(json["fields"]["Услуги"], "10% discount");
        assert_eq!(json["fields"]["Контакт"], "@cafeA");
        assert_eq!(json["fields"]["Проверено"], false);
        assert_eq!(json["fields"]["Отклонено"], false);
        assert_eq!(json["fields"]["User_id"], "7");
    }
}
