use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::auth::model::validate_phone;
use crate::store::WithId;
use crate::utils::pagination::{PageInfo, deserialize_optional_i64};

pub const COLLECTION: &str = "contacts";

pub const SEARCH_FIELDS: &[&str] = &["name", "email", "phoneNumber", "message"];

/// Triage state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A contact form submission as stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: ContactStatus,
    pub timestamp: DateTime<Utc>,
    /// Email of the logged-in visitor, if the submission carried a valid
    /// session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = validate_phone))]
    pub phone_number: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Status patches arrive as a raw string so an unknown status maps to a
/// 400 instead of a body-shape rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContactStatusRequest {
    pub status: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListContactsParams {
    pub status: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactsListResponse {
    pub success: bool,
    pub contacts: Vec<WithId<Contact>>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub contact: WithId<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ContactStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(ContactStatus::parse("resolved"), Some(ContactStatus::Resolved));
        assert_eq!(ContactStatus::parse("done"), None);
    }

    #[test]
    fn test_contact_defaults_to_pending() {
        let contact: Contact = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "phoneNumber": "08012345678",
            "email": "ada@example.com",
            "timestamp": "2026-01-01T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(contact.status, ContactStatus::Pending);
        assert!(contact.submitted_by.is_none());
    }

    #[test]
    fn test_input_validates_phone_and_email() {
        let ok = ContactInput {
            name: "Ada".to_string(),
            phone_number: "+234 801 234 5678".to_string(),
            email: "ada@example.com".to_string(),
            message: None,
        };
        assert!(ok.validate().is_ok());

        let bad = ContactInput {
            phone_number: "call me".to_string(),
            ..ok
        };
        assert!(bad.validate().is_err());
    }
}
