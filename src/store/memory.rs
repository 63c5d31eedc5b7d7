//! In-memory document store.
//!
//! Thread-safe collections behind an RwLock. Backs the test suites and
//! local development; data does not survive a restart.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use super::query::{Direction, Filter, Query};
use super::{Document, DocumentStore, Fields, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn value_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over field values. Strings that both parse as RFC 3339
/// timestamps compare as instants, so mixed-precision timestamps still
/// order correctly.
fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(tx), Ok(ty)) => tx.cmp(&ty),
                _ => x.cmp(y),
            }
        }
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => value_rank(a).cmp(&value_rank(b)),
    }
}

fn matches(data: &Fields, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { field, value } => data.get(field) == Some(value),
        Filter::ArrayContainsAny { field, values } => match data.get(field) {
            Some(Value::Array(items)) => values.iter().any(|v| items.contains(v)),
            _ => false,
        },
    }
}

/// Scan-order comparator: order field first, document id as secondary
/// sort key so equal values page deterministically.
fn scan_cmp(
    a: &(Option<Value>, String),
    b: &(Option<Value>, String),
    direction: Direction,
) -> Ordering {
    let by_value = match (&a.0, &b.0) {
        (Some(x), Some(y)) => cmp_values(x, y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    };
    let ordered = by_value.then_with(|| a.1.cmp(&b.1));
    match direction {
        Direction::Ascending => ordered,
        Direction::Descending => ordered.reverse(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn add(&self, collection: &str, data: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.set(collection, &id, data).await?;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        for (key, value) in patch {
            doc.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn run_query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read();
        let docs = match collections.get(collection) {
            Some(docs) => docs,
            None if query.start_after.is_some() => {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    id: query.start_after.clone().unwrap_or_default(),
                });
            }
            None => return Ok(Vec::new()),
        };

        let (order_field, direction) = match &query.order_by {
            Some((field, dir)) => (Some(field.as_str()), *dir),
            None => (None, Direction::Ascending),
        };
        let sort_key = |id: &str, data: &Fields| -> (Option<Value>, String) {
            let value = order_field.and_then(|f| data.get(f).cloned());
            (value, id.to_string())
        };

        let mut results: Vec<((Option<Value>, String), Document)> = docs
            .iter()
            .filter(|(_, data)| query.filters.iter().all(|f| matches(data, f)))
            .map(|(id, data)| {
                (
                    sort_key(id, data),
                    Document {
                        id: id.clone(),
                        data: data.clone(),
                    },
                )
            })
            .collect();
        results.sort_by(|a, b| scan_cmp(&a.0, &b.0, direction));

        if let Some(anchor_id) = &query.start_after {
            // The anchor is resolved against the whole collection so a
            // cursor still works if the anchor itself fails the filters.
            let anchor_data = docs.get(anchor_id).ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: anchor_id.clone(),
            })?;
            let anchor_key = sort_key(anchor_id, anchor_data);
            results.retain(|(key, _)| scan_cmp(key, &anchor_key, direction) == Ordering::Greater);
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        Ok(results.into_iter().map(|(_, doc)| doc).collect())
    }
}
