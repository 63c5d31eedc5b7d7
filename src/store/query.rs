use serde_json::{Value, json};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value.
    Eq { field: String, value: Value },
    /// Array field contains at least one of the given values.
    ArrayContainsAny { field: String, values: Vec<Value> },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn array_contains_any(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::ArrayContainsAny {
            field: field.into(),
            values: values.into_iter().map(Value::String).collect(),
        }
    }
}

/// An ordered, filtered scan over one collection.
///
/// Built incrementally the way a store client chains
/// `where(..).orderBy(..).startAfter(..).limit(..)`.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
    pub start_after: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume the ordered scan after the document with the given id.
    pub fn start_after(mut self, doc_id: impl Into<String>) -> Self {
        self.start_after = Some(doc_id.into());
        self
    }

    /// Stable hash of the filter + sort combination over a collection.
    ///
    /// Page tokens embed this so a cursor can only resume the exact query
    /// that produced it; limit and cursor position are deliberately
    /// excluded.
    pub fn fingerprint(&self, collection: &str) -> String {
        let filters: Vec<Value> = self
            .filters
            .iter()
            .map(|f| match f {
                Filter::Eq { field, value } => json!(["eq", field, value]),
                Filter::ArrayContainsAny { field, values } => {
                    json!(["array-contains-any", field, values])
                }
            })
            .collect();
        let order = self.order_by.as_ref().map(|(field, dir)| {
            let dir = match dir {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            json!([field, dir])
        });

        let canonical = json!({
            "collection": collection,
            "filters": filters,
            "orderBy": order,
        });

        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable_for_same_query() {
        let a = Query::new()
            .filter(Filter::eq("category", "devops"))
            .order_by("timestamp", Direction::Descending);
        let b = Query::new()
            .filter(Filter::eq("category", "devops"))
            .order_by("timestamp", Direction::Descending);
        assert_eq!(a.fingerprint("services"), b.fingerprint("services"));
    }

    #[test]
    fn test_fingerprint_differs_across_filters() {
        let a = Query::new()
            .filter(Filter::eq("category", "devops"))
            .order_by("timestamp", Direction::Descending);
        let b = Query::new()
            .filter(Filter::eq("category", "cloud"))
            .order_by("timestamp", Direction::Descending);
        assert_ne!(a.fingerprint("services"), b.fingerprint("services"));
    }

    #[test]
    fn test_fingerprint_differs_across_collections() {
        let q = Query::new().order_by("timestamp", Direction::Descending);
        assert_ne!(q.fingerprint("services"), q.fingerprint("blogs"));
    }

    #[test]
    fn test_fingerprint_ignores_limit_and_cursor() {
        let base = Query::new().order_by("timestamp", Direction::Descending);
        let paged = Query::new()
            .order_by("timestamp", Direction::Descending)
            .limit(10)
            .start_after("abc");
        assert_eq!(base.fingerprint("blogs"), paged.fingerprint("blogs"));
    }
}
