use chrono::Utc;
use serde_json::json;

use crate::store::query::Filter;
use crate::store::{DocumentStore, Query, WithId, to_fields};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageInfo, PageRequest, fetch_page};

use super::model::{
    COLLECTION, Contact, ContactInput, ContactStatus, ListContactsParams, SEARCH_FIELDS,
};

pub struct ContactService;

impl ContactService {
    /// Record a submission. `submitted_by` attributes it to a logged-in
    /// visitor when the request carried a valid session.
    pub async fn create(
        store: &dyn DocumentStore,
        input: ContactInput,
        submitted_by: Option<String>,
    ) -> Result<String, AppError> {
        let contact = Contact {
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
            message: input.message,
            status: ContactStatus::Pending,
            timestamp: Utc::now(),
            submitted_by,
            updated_by: None,
            updated_at: None,
        };
        Ok(store.add(COLLECTION, to_fields(&contact)?).await?)
    }

    pub async fn list(
        store: &dyn DocumentStore,
        params: ListContactsParams,
    ) -> Result<(Vec<WithId<Contact>>, PageInfo), AppError> {
        let mut query = Query::new();
        if let Some(raw) = params.status.as_deref().filter(|s| !s.is_empty()) {
            let status =
                ContactStatus::parse(raw).ok_or_else(|| AppError::validation("Invalid status"))?;
            query = query.filter(Filter::eq(
                "status",
                serde_json::to_value(status).map_err(AppError::internal)?,
            ));
        }

        let request = PageRequest::resolve(
            params.limit,
            params.page,
            params.page_token.as_deref(),
            params.search.as_deref(),
        )?;
        let search = params.search.as_deref().map(|s| (s, SEARCH_FIELDS));

        let (docs, info) = fetch_page(store, COLLECTION, query, search, request).await?;
        let contacts = docs
            .into_iter()
            .map(|doc| doc.into_typed::<Contact>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)?;

        Ok((contacts, info))
    }

    pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<WithId<Contact>, AppError> {
        store
            .get(COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found("Contact not found"))?
            .into_typed()
            .map_err(AppError::from)
    }

    pub async fn set_status(
        store: &dyn DocumentStore,
        id: &str,
        status: ContactStatus,
        updated_by: &str,
    ) -> Result<(), AppError> {
        if store.get(COLLECTION, id).await?.is_none() {
            return Err(AppError::not_found("Contact not found"));
        }

        store
            .update(
                COLLECTION,
                id,
                to_fields(&json!({
                    "status": status,
                    "updatedBy": updated_by,
                    "updatedAt": Utc::now(),
                }))?,
            )
            .await?;
        Ok(())
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
        store.delete(COLLECTION, id).await?;
        Ok(())
    }
}
