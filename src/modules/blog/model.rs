use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::store::WithId;
use crate::utils::pagination::{PageInfo, deserialize_optional_i64};

pub const COLLECTION: &str = "blogs";

pub const SEARCH_FIELDS: &[&str] = &["title", "content", "author", "category"];

/// Search-engine metadata attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A blog post as stored. Unpublished posts are only visible through
/// authoring endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMeta>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub seo: Option<SeoMeta>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListBlogsParams {
    pub category: Option<String>,
    pub author: Option<String>,
    /// Comma-separated; matches posts carrying any of the tags.
    pub tags: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogsListResponse {
    pub success: bool,
    pub blogs: Vec<WithId<Blog>>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogResponse {
    pub success: bool,
    pub blog: WithId<Blog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_defaults_to_unpublished() {
        let blog: Blog = serde_json::from_value(serde_json::json!({
            "title": "T",
            "content": "C",
            "author": "A",
            "category": "news",
            "timestamp": "2026-01-01T00:00:00Z",
        }))
        .unwrap();
        assert!(!blog.is_published);
        assert!(blog.tags.is_empty());
    }

    #[test]
    fn test_seo_wire_names() {
        let seo = SeoMeta {
            meta_title: Some("t".to_string()),
            meta_description: None,
            keywords: vec!["rust".to_string()],
        };
        let json = serde_json::to_value(&seo).unwrap();
        assert!(json.get("metaTitle").is_some());
        assert!(json.get("metaDescription").is_none());
    }

    #[test]
    fn test_list_params_reject_unknown_fields() {
        assert!(serde_json::from_str::<ListBlogsParams>(r#"{"published": "true"}"#).is_err());
    }
}
