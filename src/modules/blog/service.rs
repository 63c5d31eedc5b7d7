use chrono::Utc;
use serde_json::json;

use crate::modules::services::service::split_csv;
use crate::store::query::Filter;
use crate::store::{DocumentStore, Query, WithId, to_fields};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageInfo, PageRequest, fetch_page};

use super::model::{Blog, BlogInput, COLLECTION, ListBlogsParams, SEARCH_FIELDS};

pub struct BlogService;

impl BlogService {
    /// Public reads always pin `isPublished == true` as a store-side
    /// filter, on both strategies.
    fn base_query(params: &ListBlogsParams) -> Query {
        let mut query = Query::new().filter(Filter::eq("isPublished", true));
        if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
            query = query.filter(Filter::eq("category", category));
        }
        if let Some(author) = params.author.as_deref().filter(|a| !a.is_empty()) {
            query = query.filter(Filter::eq("author", author));
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
        params: ListBlogsParams,
    ) -> Result<(Vec<WithId<Blog>>, PageInfo), AppError> {
        let request = PageRequest::resolve(
            params.limit,
            params.page,
            params.page_token.as_deref(),
            params.search.as_deref(),
        )?;
        let search = params.search.as_deref().map(|s| (s, SEARCH_FIELDS));

        let (docs, info) =
            fetch_page(store, COLLECTION, Self::base_query(&params), search, request).await?;
        let blogs = docs
            .into_iter()
            .map(|doc| doc.into_typed::<Blog>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)?;

        Ok((blogs, info))
    }

    /// Unpublished posts look like they do not exist to public readers.
    pub async fn get_published(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<WithId<Blog>, AppError> {
        let blog: WithId<Blog> = store
            .get(COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found("Blog not found"))?
            .into_typed()
            .map_err(AppError::from)?;

        if !blog.inner.is_published {
            return Err(AppError::not_found("Blog not found"));
        }
        Ok(blog)
    }

    pub async fn create(
        store: &dyn DocumentStore,
        input: BlogInput,
        created_by: &str,
    ) -> Result<String, AppError> {
        let blog = Blog {
            title: input.title,
            content: input.content,
            author: input.author,
            category: input.category,
            tags: input.tags,
            image: input.image,
            seo: input.seo,
            timestamp: Utc::now(),
            is_published: input.is_published.unwrap_or(false),
            created_by: Some(created_by.to_string()),
            updated_by: None,
            updated_at: None,
        };
        Ok(store.add(COLLECTION, to_fields(&blog)?).await?)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: BlogInput,
        updated_by: &str,
    ) -> Result<(), AppError> {
        if store.get(COLLECTION, id).await?.is_none() {
            return Err(AppError::not_found("Blog not found"));
        }

        let mut patch = to_fields(&json!({
            "title": input.title,
            "content": input.content,
            "author": input.author,
            "category": input.category,
            "tags": input.tags,
            "updatedBy": updated_by,
            "updatedAt": Utc::now(),
        }))?;
        if let Some(image) = input.image {
            patch.insert("image".to_string(), json!(image));
        }
        if let Some(seo) = input.seo {
            patch.insert("seo".to_string(), serde_json::to_value(seo).map_err(AppError::internal)?);
        }
        if let Some(is_published) = input.is_published {
            patch.insert("isPublished".to_string(), json!(is_published));
        }

        store.update(COLLECTION, id, patch).await?;
        Ok(())
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
        store.delete(COLLECTION, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(title: &str, published: bool) -> BlogInput {
        BlogInput {
            title: title.to_string(),
            content: format!("{title} body"),
            author: "Ada".to_string(),
            category: "engineering".to_string(),
            tags: vec![],
            image: None,
            seo: None,
            is_published: Some(published),
        }
    }

    #[tokio::test]
    async fn test_public_list_excludes_unpublished() {
        let store = MemoryStore::new();
        BlogService::create(&store, input("Visible", true), "a@b.com")
            .await
            .unwrap();
        BlogService::create(&store, input("Draft", false), "a@b.com")
            .await
            .unwrap();

        let (blogs, _) = BlogService::list(&store, ListBlogsParams::default())
            .await
            .unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].inner.title, "Visible");
    }

    #[tokio::test]
    async fn test_public_get_hides_drafts() {
        let store = MemoryStore::new();
        let id = BlogService::create(&store, input("Draft", false), "a@b.com")
            .await
            .unwrap();

        let err = BlogService::get_published(&store, &id).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_can_publish() {
        let store = MemoryStore::new();
        let id = BlogService::create(&store, input("Draft", false), "a@b.com")
            .await
            .unwrap();

        BlogService::update(&store, &id, input("Draft", true), "b@c.com")
            .await
            .unwrap();
        let blog = BlogService::get_published(&store, &id).await.unwrap();
        assert!(blog.inner.is_published);
        assert_eq!(blog.inner.updated_by.as_deref(), Some("b@c.com"));
    }

    #[tokio::test]
    async fn test_list_filters_by_author() {
        let store = MemoryStore::new();
        BlogService::create(&store, input("A", true), "a@b.com")
            .await
            .unwrap();
        let mut other = input("B", true);
        other.author = "Grace".to_string();
        BlogService::create(&store, other, "a@b.com").await.unwrap();

        let (blogs, _) = BlogService::list(&store, ListBlogsParams {
            author: Some("Grace".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].inner.title, "B");
    }
}
