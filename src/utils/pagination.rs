//! Paginated query building over the document store.
//!
//! Every list endpoint supports the same two strategies:
//!
//! - **Offset**: `page` (plus optional `search`): store-side filters, full
//!   ordered fetch, client-side search, slice. Returns full counts.
//! - **Cursor**: `pageToken`: store-side filters plus `start_after`, no
//!   counts, no search. A token is only valid against the exact filter and
//!   sort combination that produced it.
//!
//! `limit` is clamped to 1..=100 (default 10), `page` to >= 1 (default 1).

use data_encoding::BASE64URL_NOPAD;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::store::query::Direction;
use crate::store::{Document, DocumentStore, Fields, Query, StoreError};
use crate::utils::errors::AppError;

/// Every resource collection orders its scans by this field, newest first.
const ORDER_FIELD: &str = "timestamp";

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Query strings deliver numbers as strings; empty strings mean absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Which pagination strategy a request selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Offset { page: i64, limit: i64 },
    Cursor { token: Option<String>, limit: i64 },
}

impl PageRequest {
    /// Resolve raw query parameters into a strategy.
    ///
    /// `page` or `search` selects the offset strategy; `pageToken` selects
    /// the cursor strategy and cannot be combined with either (search
    /// cannot ride a cursor). A bare request starts a cursor scan.
    pub fn resolve(
        limit: Option<i64>,
        page: Option<i64>,
        page_token: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, AppError> {
        let token = page_token.filter(|t| !t.is_empty());
        let has_search = search.is_some_and(|s| !s.is_empty());
        let limit = clamp_limit(limit);

        match token {
            Some(token) => {
                if page.is_some() || has_search {
                    return Err(AppError::validation(
                        "pageToken cannot be combined with page or search",
                    ));
                }
                Ok(Self::Cursor {
                    token: Some(token.to_string()),
                    limit,
                })
            }
            None if page.is_some() || has_search => Ok(Self::Offset {
                page: clamp_page(page),
                limit,
            }),
            None => Ok(Self::Cursor { token: None, limit }),
        }
    }
}

/// Offset-strategy metadata, shaped like the API has always reported it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
}

/// Cursor-strategy metadata. `nextPageToken` is present iff the page came
/// back full.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CursorMeta {
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Pagination metadata of either strategy.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PageInfo {
    Offset(PageMeta),
    Cursor(CursorMeta),
}

/// Opaque cursor: the id of the last document of a page plus the
/// fingerprint of the query that produced it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct PageToken {
    fingerprint: String,
    last_id: String,
}

impl PageToken {
    fn encode(&self) -> Result<String, AppError> {
        let json = serde_json::to_vec(self).map_err(AppError::internal)?;
        Ok(BASE64URL_NOPAD.encode(&json))
    }

    fn decode(token: &str) -> Result<Self, AppError> {
        let bytes = BASE64URL_NOPAD
            .decode(token.as_bytes())
            .map_err(|_| AppError::validation("Invalid page token"))?;
        serde_json::from_slice(&bytes).map_err(|_| AppError::validation("Invalid page token"))
    }
}

/// Case-insensitive substring match over a fixed set of string fields.
pub fn matches_search(data: &Fields, needle: &str, fields: &[&str]) -> bool {
    let needle = needle.to_lowercase();
    fields.iter().any(|field| {
        data.get(*field)
            .and_then(|v| v.as_str())
            .is_some_and(|s| s.to_lowercase().contains(&needle))
    })
}

/// Offset strategy: ordered full fetch, optional search, slice.
pub async fn fetch_offset_page(
    store: &dyn DocumentStore,
    collection: &str,
    base: Query,
    search: Option<(&str, &[&str])>,
    page: i64,
    limit: i64,
) -> Result<(Vec<Document>, PageMeta), AppError> {
    let query = base.order_by(ORDER_FIELD, Direction::Descending);
    let mut docs = store.run_query(collection, &query).await?;

    if let Some((needle, fields)) = search {
        if !needle.is_empty() {
            docs.retain(|doc| matches_search(&doc.data, needle, fields));
        }
    }

    let total = docs.len() as i64;
    let total_pages = (total as u64).div_ceil(limit as u64) as i64;
    // Saturating arithmetic keeps absurdly large page numbers from wrapping.
    let offset = page.saturating_sub(1).saturating_mul(limit) as usize;
    let items: Vec<Document> = docs
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    let meta = PageMeta {
        page,
        limit,
        total,
        total_pages,
        has_next_page: page.saturating_mul(limit) < total,
    };
    Ok((items, meta))
}

/// Cursor strategy: store-side `start_after` + `limit` resume.
pub async fn fetch_cursor_page(
    store: &dyn DocumentStore,
    collection: &str,
    base: Query,
    token: Option<&str>,
    limit: i64,
) -> Result<(Vec<Document>, CursorMeta), AppError> {
    let ordered = base.order_by(ORDER_FIELD, Direction::Descending);
    let fingerprint = ordered.fingerprint(collection);

    let mut query = ordered.limit(limit as usize);
    if let Some(token) = token {
        let token = PageToken::decode(token)?;
        if token.fingerprint != fingerprint {
            return Err(AppError::validation(
                "Page token does not match this query",
            ));
        }
        query = query.start_after(token.last_id);
    }

    let docs = match store.run_query(collection, &query).await {
        Ok(docs) => docs,
        // The anchor document is gone; the cursor cannot resume.
        Err(StoreError::NotFound { .. }) => {
            return Err(AppError::validation("Invalid page token"));
        }
        Err(err) => return Err(err.into()),
    };

    let next_page_token = if docs.len() == limit as usize {
        match docs.last() {
            Some(last) => Some(
                PageToken {
                    fingerprint,
                    last_id: last.id.clone(),
                }
                .encode()?,
            ),
            None => None,
        }
    } else {
        None
    };

    Ok((docs, CursorMeta {
        limit,
        next_page_token,
    }))
}

/// Run whichever strategy the request resolved to.
///
/// `search` only applies to the offset strategy; [`PageRequest::resolve`]
/// guarantees it is absent on the cursor path.
pub async fn fetch_page(
    store: &dyn DocumentStore,
    collection: &str,
    base: Query,
    search: Option<(&str, &[&str])>,
    request: PageRequest,
) -> Result<(Vec<Document>, PageInfo), AppError> {
    match request {
        PageRequest::Offset { page, limit } => {
            let (docs, meta) =
                fetch_offset_page(store, collection, base, search, page, limit).await?;
            Ok((docs, PageInfo::Offset(meta)))
        }
        PageRequest::Cursor { token, limit } => {
            let (docs, meta) =
                fetch_cursor_page(store, collection, base, token.as_deref(), limit).await?;
            Ok((docs, PageInfo::Cursor(meta)))
        }
    }
}
