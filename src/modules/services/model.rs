use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::store::WithId;
use crate::utils::pagination::{PageInfo, deserialize_optional_i64};

pub const COLLECTION: &str = "services";

/// Fields searched by the offset strategy's `search` parameter.
pub const SEARCH_FIELDS: &[&str] = &["name", "shortDescription", "category"];

/// A service catalog entry as stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-supplied fields for create and update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Short description is required"))]
    pub short_description: String,
    #[validate(length(min = 1, message = "Long description is required"))]
    pub long_description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// List query parameters. Unknown parameters are rejected rather than
/// silently ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListServicesParams {
    pub category: Option<String>,
    /// Comma-separated; matches entries carrying any of the tags.
    pub tags: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServicesListResponse {
    pub success: bool,
    pub services: Vec<WithId<Service>>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub success: bool,
    pub service: WithId<Service>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_wire_names() {
        let service = Service {
            name: "Cloud Migration".to_string(),
            category: "consulting".to_string(),
            short_description: "Lift and shift".to_string(),
            long_description: "Full migration engagement".to_string(),
            image: None,
            tags: vec!["cloud".to_string()],
            timestamp: Utc::now(),
            created_by: Some("admin@example.com".to_string()),
            updated_by: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&service).unwrap();
        assert!(json.get("shortDescription").is_some());
        assert!(json.get("createdBy").is_some());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn test_list_params_reject_unknown_fields() {
        let err = serde_json::from_str::<ListServicesParams>(r#"{"cursor": "abc"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_input_requires_descriptions() {
        let input = ServiceInput {
            name: "X".to_string(),
            category: "y".to_string(),
            short_description: String::new(),
            long_description: "z".to_string(),
            image: None,
            tags: vec![],
        };
        assert!(input.validate().is_err());
    }
}
