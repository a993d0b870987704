use storage::{
    RecordStore, dto::category::CreateCategoryRequest, error::StorageError, models::Category,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// List all categories
pub async fn list_categories(store: &dyn RecordStore) -> WebResult<Vec<Category>> {
    Ok(store.list_categories().await?)
}

/// Get category by id
pub async fn get_category(store: &dyn RecordStore, id: Uuid) -> WebResult<Category> {
    store.find_category(id).await.map_err(|e| match e {
        StorageError::NotFound => WebError::NotFound(format!("Category not found for id: {id}")),
        other => WebError::Storage(other),
    })
}

/// Create a new category
pub async fn create_category(
    store: &dyn RecordStore,
    request: &CreateCategoryRequest,
) -> WebResult<Category> {
    store.create_category(request).await.map_err(|e| {
        if e.is_conflict() {
            WebError::Conflict(format!("Category '{}' already exists", request.name))
        } else {
            WebError::Storage(e)
        }
    })
}
