use chrono::Utc;
use serde_json::json;

use crate::store::query::Filter;
use crate::store::{DocumentStore, Query, WithId, to_fields};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageInfo, PageRequest, fetch_page};

use super::model::{COLLECTION, ListServicesParams, SEARCH_FIELDS, Service, ServiceInput};

/// Split a comma-separated query value into trimmed, non-empty parts.
pub(crate) fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct ServiceService;

impl ServiceService {
    fn base_query(params: &ListServicesParams) -> Query {
        let mut query = Query::new();
        if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
            query = query.filter(Filter::eq("category", category));
        }
        if let Some(tags) = params.tags.as_deref() {
            let tags = split_csv(tags);
            if !tags.is_empty() {
                query = query.filter(Filter::array_contains_any("tags", tags));
            }
        }
        query
    }

    pub async fn list(
        store: &dyn DocumentStore,
        params: ListServicesParams,
    ) -> Result<(Vec<WithId<Service>>, PageInfo), AppError> {
        let request = PageRequest::resolve(
            params.limit,
            params.page,
            params.page_token.as_deref(),
            params.search.as_deref(),
        )?;
        let search = params.search.as_deref().map(|s| (s, SEARCH_FIELDS));

        let (docs, info) =
            fetch_page(store, COLLECTION, Self::base_query(&params), search, request).await?;
        let services = docs
            .into_iter()
            .map(|doc| doc.into_typed::<Service>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)?;

        Ok((services, info))
    }

    pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<WithId<Service>, AppError> {
        store
            .get(COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))?
            .into_typed()
            .map_err(AppError::from)
    }

    pub async fn create(
        store: &dyn DocumentStore,
        input: ServiceInput,
        created_by: &str,
    ) -> Result<String, AppError> {
        let service = Service {
            name: input.name,
            category: input.category,
            short_description: input.short_description,
            long_description: input.long_description,
            image: input.image,
            tags: input.tags,
            timestamp: Utc::now(),
            created_by: Some(created_by.to_string()),
            updated_by: None,
            updated_at: None,
        };
        Ok(store.add(COLLECTION, to_fields(&service)?).await?)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: ServiceInput,
        updated_by: &str,
    ) -> Result<(), AppError> {
        if store.get(COLLECTION, id).await?.is_none() {
            return Err(AppError::not_found("Service not found"));
        }

        let mut patch = to_fields(&json!({
            "name": input.name,
            "category": input.category,
            "shortDescription": input.short_description,
            "longDescription": input.long_description,
            "tags": input.tags,
            "updatedBy": updated_by,
            "updatedAt": Utc::now(),
        }))?;
        if let Some(image) = input.image {
            patch.insert("image".to_string(), json!(image));
        }

        store.update(COLLECTION, id, patch).await?;
        Ok(())
    }

    /// Hard delete, idempotent.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
        store.delete(COLLECTION, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(name: &str, category: &str, tags: &[&str]) -> ServiceInput {
        ServiceInput {
            name: name.to_string(),
            category: category.to_string(),
            short_description: format!("{name} in short"),
            long_description: format!("{name} at length"),
            image: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_csv(" , ,"), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_create_get_round_trip() {
        let store = MemoryStore::new();
        let id = ServiceService::create(&store, input("Audit", "security", &[]), "a@b.com")
            .await
            .unwrap();

        let found = ServiceService::get(&store, &id).await.unwrap();
        assert_eq!(found.inner.name, "Audit");
        assert_eq!(found.inner.created_by.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_list_filters_by_category_and_tags() {
        let store = MemoryStore::new();
        ServiceService::create(&store, input("A", "devops", &["ci"]), "a@b.com")
            .await
            .unwrap();
        ServiceService::create(&store, input("B", "devops", &["cd"]), "a@b.com")
            .await
            .unwrap();
        ServiceService::create(&store, input("C", "cloud", &["ci"]), "a@b.com")
            .await
            .unwrap();

        let (services, _) = ServiceService::list(&store, ListServicesParams {
            category: Some("devops".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(services.len(), 2);

        let (services, _) = ServiceService::list(&store, ListServicesParams {
            tags: Some("ci".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(services.len(), 2);

        let (services, _) = ServiceService::list(&store, ListServicesParams {
            category: Some("devops".to_string()),
            tags: Some("ci".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].inner.name, "A");
    }

    #[tokio::test]
    async fn test_update_missing_service_is_not_found() {
        let store = MemoryStore::new();
        let err = ServiceService::update(&store, "nope", input("X", "y", &[]), "a@b.com")
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = ServiceService::create(&store, input("X", "y", &[]), "a@b.com")
            .await
            .unwrap();
        ServiceService::delete(&store, &id).await.unwrap();
        ServiceService::delete(&store, &id).await.unwrap();
        assert!(ServiceService::get(&store, &id).await.is_err());
    }
}
