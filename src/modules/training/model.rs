use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::modules::blog::model::SeoMeta;
use crate::store::WithId;
use crate::utils::pagination::{PageInfo, deserialize_optional_i64};

pub const COLLECTION: &str = "training";

pub const SEARCH_FIELDS: &[&str] = &["title", "description", "category", "level"];

/// A training course as stored. Deactivated courses stay in the
/// collection and keep their soft-delete audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub title: String,
    pub description: String,
    pub yt_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMeta>,
    pub category: String,
    pub level: String,
    pub duration: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactivated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Accepts youtube.com and youtu.be URLs over http(s).
pub fn validate_yt_link(link: &str) -> Result<(), ValidationError> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"));
    let valid = rest.is_some_and(|rest| {
        let rest = rest.strip_prefix("www.").unwrap_or(rest);
        rest.starts_with("youtube.com/") || rest.starts_with("youtu.be/")
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("yt_link").with_message("Invalid YouTube URL".into()))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = validate_yt_link))]
    pub yt_link: String,
    #[serde(default)]
    pub seo: Option<SeoMeta>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Level is required"))]
    pub level: String,
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListTrainingsParams {
    pub category: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    pub page_token: Option<String>,
}

/// Admin listing adds an explicit `isActive` filter; absent means both.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminListTrainingsParams {
    pub is_active: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    pub page_token: Option<String>,
}

/// Trailing pagination parameters of the category and level routes.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageQuery {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainingsListResponse {
    pub success: bool,
    pub trainings: Vec<WithId<Training>>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainingResponse {
    pub success: bool,
    pub training: WithId<Training>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_yt_link() {
        assert!(validate_yt_link("https://www.youtube.com/watch?v=abc123").is_ok());
        assert!(validate_yt_link("https://youtu.be/abc123").is_ok());
        assert!(validate_yt_link("http://youtube.com/watch?v=abc123").is_ok());
        assert!(validate_yt_link("https://vimeo.com/12345").is_err());
        assert!(validate_yt_link("youtube.com/watch?v=abc").is_err());
        assert!(validate_yt_link("https://notyoutube.com/x").is_err());
    }

    #[test]
    fn test_training_defaults_to_active() {
        let training: Training = serde_json::from_value(serde_json::json!({
            "title": "Docker Basics",
            "description": "Containers from scratch",
            "ytLink": "https://youtu.be/abc",
            "category": "devops",
            "level": "beginner",
            "duration": "2h",
            "timestamp": "2026-01-01T00:00:00Z",
        }))
        .unwrap();
        assert!(training.is_active);
        assert!(training.deleted_at.is_none());
    }

    #[test]
    fn test_soft_delete_fields_round_trip() {
        let json = serde_json::json!({
            "title": "T",
            "description": "D",
            "ytLink": "https://youtu.be/abc",
            "category": "c",
            "level": "l",
            "duration": "1h",
            "timestamp": "2026-01-01T00:00:00Z",
            "isActive": false,
            "deletedBy": "admin@example.com",
            "deletedAt": "2026-02-01T00:00:00Z",
        });
        let training: Training = serde_json::from_value(json).unwrap();
        assert!(!training.is_active);
        assert_eq!(training.deleted_by.as_deref(), Some("admin@example.com"));
    }
}
