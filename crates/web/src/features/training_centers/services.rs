use storage::{
    RecordStore, dto::training_center::CreateTrainingCenterRequest, error::StorageError,
    models::TrainingCenter,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_training_centers(store: &dyn RecordStore) -> WebResult<Vec<TrainingCenter>> {
    Ok(store.list_training_centers().await?)
}

pub async fn get_training_center(store: &dyn RecordStore, id: Uuid) -> WebResult<TrainingCenter> {
    store.find_training_center(id).await.map_err(|e| match e {
        StorageError::NotFound => {
            WebError::NotFound(format!("Training center not found for id: {id}"))
        }
        other => WebError::Storage(other),
    })
}

pub async fn create_training_center(
    store: &dyn RecordStore,
    request: &CreateTrainingCenterRequest,
) -> WebResult<TrainingCenter> {
    store.create_training_center(request).await.map_err(|e| {
        if e.is_conflict() {
            WebError::Conflict(format!("Training center '{}' already exists", request.name))
        } else {
            WebError::Storage(e)
        }
    })
}
