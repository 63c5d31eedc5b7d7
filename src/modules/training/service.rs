use chrono::Utc;
use serde_json::json;

use crate::store::query::Filter;
use crate::store::{DocumentStore, Query, WithId, to_fields};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageInfo, PageRequest, fetch_page};

use super::model::{
    AdminListTrainingsParams, COLLECTION, ListTrainingsParams, SEARCH_FIELDS, Training,
    TrainingInput,
};

pub struct TrainingService;

impl TrainingService {
    fn public_query(category: Option<&str>, level: Option<&str>) -> Query {
        let mut query = Query::new().filter(Filter::eq("isActive", true));
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query = query.filter(Filter::eq("category", category));
        }
        if let Some(level) = level.filter(|l| !l.is_empty()) {
            query = query.filter(Filter::eq("level", level));
        }
        query
    }

    async fn run_list(
        store: &dyn DocumentStore,
        base: Query,
        search: Option<&str>,
        limit: Option<i64>,
        page: Option<i64>,
        page_token: Option<&str>,
    ) -> Result<(Vec<WithId<Training>>, PageInfo), AppError> {
        let request = PageRequest::resolve(limit, page, page_token, search)?;
        let search = search.map(|s| (s, SEARCH_FIELDS));

        let (docs, info) = fetch_page(store, COLLECTION, base, search, request).await?;
        let trainings = docs
            .into_iter()
            .map(|doc| doc.into_typed::<Training>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)?;
        Ok((trainings, info))
    }

    /// Public listing, active courses only.
    pub async fn list_public(
        store: &dyn DocumentStore,
        params: ListTrainingsParams,
    ) -> Result<(Vec<WithId<Training>>, PageInfo), AppError> {
        let base = Self::public_query(params.category.as_deref(), params.level.as_deref());
        Self::run_list(
            store,
            base,
            params.search.as_deref(),
            params.limit,
            params.page,
            params.page_token.as_deref(),
        )
        .await
    }

    /// Admin listing. `isActive` accepts "true" or "false"; absent means
    /// both active and deactivated courses.
    pub async fn list_admin(
        store: &dyn DocumentStore,
        params: AdminListTrainingsParams,
    ) -> Result<(Vec<WithId<Training>>, PageInfo), AppError> {
        let mut query = Query::new();
        if let Some(raw) = params.is_active.as_deref().filter(|v| !v.is_empty()) {
            let is_active = match raw {
                "true" => true,
                "false" => false,
                _ => return Err(AppError::validation("isActive must be true or false")),
            };
            query = query.filter(Filter::eq("isActive", is_active));
        }
        if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
            query = query.filter(Filter::eq("category", category));
        }
        if let Some(level) = params.level.as_deref().filter(|l| !l.is_empty()) {
            query = query.filter(Filter::eq("level", level));
        }

        Self::run_list(
            store,
            query,
            params.search.as_deref(),
            params.limit,
            params.page,
            params.page_token.as_deref(),
        )
        .await
    }

    /// Deactivated courses look like they do not exist to public readers.
    pub async fn get_public(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<WithId<Training>, AppError> {
        let training: WithId<Training> = store
            .get(COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found("Training not found"))?
            .into_typed()
            .map_err(AppError::from)?;

        if !training.inner.is_active {
            return Err(AppError::not_found("Training not found"));
        }
        Ok(training)
    }

    pub async fn get_admin(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<WithId<Training>, AppError> {
        store
            .get(COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found("Training not found"))?
            .into_typed()
            .map_err(AppError::from)
    }

    pub async fn create(
        store: &dyn DocumentStore,
        input: TrainingInput,
        created_by: &str,
    ) -> Result<String, AppError> {
        let training = Training {
            title: input.title,
            description: input.description,
            yt_link: input.yt_link,
            seo: input.seo,
            category: input.category,
            level: input.level,
            duration: input.duration,
            timestamp: Utc::now(),
            is_active: true,
            created_by: Some(created_by.to_string()),
            updated_by: None,
            updated_at: None,
            deactivated_at: None,
            reactivated_at: None,
            deleted_by: None,
            deleted_at: None,
        };
        Ok(store.add(COLLECTION, to_fields(&training)?).await?)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: TrainingInput,
        updated_by: &str,
    ) -> Result<(), AppError> {
        if store.get(COLLECTION, id).await?.is_none() {
            return Err(AppError::not_found("Training not found"));
        }

        let mut patch = to_fields(&json!({
            "title": input.title,
            "description": input.description,
            "ytLink": input.yt_link,
            "category": input.category,
            "level": input.level,
            "duration": input.duration,
            "updatedBy": updated_by,
            "updatedAt": Utc::now(),
        }))?;
        if let Some(seo) = input.seo {
            patch.insert(
                "seo".to_string(),
                serde_json::to_value(seo).map_err(AppError::internal)?,
            );
        }

        store.update(COLLECTION, id, patch).await?;
        Ok(())
    }

    /// Toggle visibility, stamping the matching audit field.
    pub async fn set_status(
        store: &dyn DocumentStore,
        id: &str,
        is_active: bool,
        updated_by: &str,
    ) -> Result<(), AppError> {
        if store.get(COLLECTION, id).await?.is_none() {
            return Err(AppError::not_found("Training not found"));
        }

        let now = Utc::now();
        let stamp = if is_active {
            "reactivatedAt"
        } else {
            "deactivatedAt"
        };
        store
            .update(
                COLLECTION,
                id,
                to_fields(&json!({
                    "isActive": is_active,
                    stamp: now,
                    "updatedBy": updated_by,
                    "updatedAt": now,
                }))?,
            )
            .await?;
        Ok(())
    }

    /// Soft delete: deactivate and record who deleted it. The record
    /// survives for the admin views.
    pub async fn soft_delete(
        store: &dyn DocumentStore,
        id: &str,
        deleted_by: &str,
    ) -> Result<(), AppError> {
        if store.get(COLLECTION, id).await?.is_none() {
            return Err(AppError::not_found("Training not found"));
        }

        store
            .update(
                COLLECTION,
                id,
                to_fields(&json!({
                    "isActive": false,
                    "deletedBy": deleted_by,
                    "deletedAt": Utc::now(),
                }))?,
            )
            .await?;
        Ok(())
    }

    /// Permanent removal, idempotent.
    pub async fn permanent_delete(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
        store.delete(COLLECTION, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(title: &str, category: &str, level: &str) -> TrainingInput {
        TrainingInput {
            title: title.to_string(),
            description: format!("{title} description"),
            yt_link: "https://youtu.be/abc123".to_string(),
            seo: None,
            category: category.to_string(),
            level: level.to_string(),
            duration: "2h".to_string(),
        }
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_public_but_not_admin() {
        let store = MemoryStore::new();
        let id = TrainingService::create(&store, input("Docker", "devops", "beginner"), "a@b.com")
            .await
            .unwrap();

        TrainingService::soft_delete(&store, &id, "admin@example.com")
            .await
            .unwrap();

        assert_eq!(
            TrainingService::get_public(&store, &id)
                .await
                .unwrap_err()
                .status(),
            axum::http::StatusCode::NOT_FOUND
        );

        let admin_view = TrainingService::get_admin(&store, &id).await.unwrap();
        assert!(!admin_view.inner.is_active);
        assert_eq!(
            admin_view.inner.deleted_by.as_deref(),
            Some("admin@example.com")
        );
        assert!(admin_view.inner.deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_status_toggle_stamps_audit_fields() {
        let store = MemoryStore::new();
        let id = TrainingService::create(&store, input("K8s", "devops", "advanced"), "a@b.com")
            .await
            .unwrap();

        TrainingService::set_status(&store, &id, false, "a@b.com")
            .await
            .unwrap();
        let off = TrainingService::get_admin(&store, &id).await.unwrap();
        assert!(!off.inner.is_active);
        assert!(off.inner.deactivated_at.is_some());
        assert!(off.inner.reactivated_at.is_none());

        TrainingService::set_status(&store, &id, true, "a@b.com")
            .await
            .unwrap();
        let on = TrainingService::get_admin(&store, &id).await.unwrap();
        assert!(on.inner.is_active);
        assert!(on.inner.reactivated_at.is_some());
    }

    #[tokio::test]
    async fn test_admin_list_filters_by_is_active() {
        let store = MemoryStore::new();
        let keep = TrainingService::create(&store, input("A", "devops", "beginner"), "a@b.com")
            .await
            .unwrap();
        let gone = TrainingService::create(&store, input("B", "devops", "beginner"), "a@b.com")
            .await
            .unwrap();
        TrainingService::soft_delete(&store, &gone, "a@b.com")
            .await
            .unwrap();

        let (all, _) = TrainingService::list_admin(&store, AdminListTrainingsParams::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let (active, _) = TrainingService::list_admin(&store, AdminListTrainingsParams {
            is_active: Some("true".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, keep);

        let err = TrainingService::list_admin(&store, AdminListTrainingsParams {
            is_active: Some("maybe".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_public_list_pins_active_and_filters() {
        let store = MemoryStore::new();
        TrainingService::create(&store, input("A", "devops", "beginner"), "a@b.com")
            .await
            .unwrap();
        TrainingService::create(&store, input("B", "cloud", "beginner"), "a@b.com")
            .await
            .unwrap();
        let hidden = TrainingService::create(&store, input("C", "devops", "beginner"), "a@b.com")
            .await
            .unwrap();
        TrainingService::set_status(&store, &hidden, false, "a@b.com")
            .await
            .unwrap();

        let (devops, _) = TrainingService::list_public(&store, ListTrainingsParams {
            category: Some("devops".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(devops.len(), 1);
        assert_eq!(devops[0].inner.title, "A");
    }

    #[tokio::test]
    async fn test_permanent_delete_removes_record() {
        let store = MemoryStore::new();
        let id = TrainingService::create(&store, input("X", "c", "l"), "a@b.com")
            .await
            .unwrap();
        TrainingService::permanent_delete(&store, &id).await.unwrap();
        assert!(TrainingService::get_admin(&store, &id).await.is_err());
        // Idempotent.
        TrainingService::permanent_delete(&store, &id).await.unwrap();
    }
}
