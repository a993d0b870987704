use chrono::Utc;
use storage::{
    AthleteFilter, RecordStore,
    dto::{
        athlete::{CreateAthleteRequest, UpdateAthleteRequest},
        common::{LimitOffsetParams, Page},
    },
    error::StorageError,
    models::{Athlete, Category, NewAthlete, TrainingCenter},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

fn athlete_not_found(id: Uuid) -> WebError {
    WebError::NotFound(format!("Athlete not found for id: {id}"))
}

/// Maps "no such athlete" to a 404 naming the id; other failures pass through.
fn or_not_found(error: StorageError, id: Uuid) -> WebError {
    match error {
        StorageError::NotFound => athlete_not_found(id),
        other => WebError::Storage(other),
    }
}

/// Maps a duplicate key on write to a conflict naming the CPF.
fn or_cpf_conflict(error: StorageError, cpf: &str) -> WebError {
    if error.is_conflict() {
        WebError::Conflict(format!("An athlete with cpf {cpf} is already registered"))
    } else {
        WebError::Storage(error)
    }
}

async fn resolve_category(store: &dyn RecordStore, name: &str) -> WebResult<Category> {
    store
        .find_category_by_name(name)
        .await?
        .ok_or_else(|| WebError::BadRequest(format!("Category '{name}' was not found")))
}

async fn resolve_training_center(store: &dyn RecordStore, name: &str) -> WebResult<TrainingCenter> {
    store
        .find_training_center_by_name(name)
        .await?
        .ok_or_else(|| WebError::BadRequest(format!("Training center '{name}' was not found")))
}

/// List athletes matching the filter
pub async fn list_athletes(
    store: &dyn RecordStore,
    filter: &AthleteFilter,
    page: LimitOffsetParams,
) -> WebResult<Page<Athlete>> {
    page.validate().map_err(WebError::BadRequest)?;
    Ok(store.list_athletes(filter, page).await?)
}

/// Get athlete by id
pub async fn get_athlete(store: &dyn RecordStore, id: Uuid) -> WebResult<Athlete> {
    store.find_athlete(id).await.map_err(|e| or_not_found(e, id))
}

/// Register a new athlete.
///
/// The category and the training center are looked up separately so a
/// missing one is reported by name before anything is written.
pub async fn create_athlete(
    store: &dyn RecordStore,
    request: &CreateAthleteRequest,
) -> WebResult<Athlete> {
    let category = resolve_category(store, &request.category.name).await?;
    let training_center = resolve_training_center(store, &request.training_center.name).await?;

    let new = NewAthlete {
        id: Uuid::new_v4(),
        created_at: Utc::now().naive_utc(),
        name: request.name.clone(),
        cpf: request.cpf.clone(),
        weight: request.weight,
        height: request.height,
        sex: request.sex.clone(),
        category_id: category.pk_id,
        training_center_id: training_center.pk_id,
    };

    let athlete = store
        .insert_athlete(&new)
        .await
        .map_err(|e| or_cpf_conflict(e, &request.cpf))?;

    tracing::info!(athlete_id = %athlete.id, "Athlete registered");
    Ok(athlete)
}

/// Apply a partial update and return the full record
pub async fn update_athlete(
    store: &dyn RecordStore,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> WebResult<Athlete> {
    let mut athlete = get_athlete(store, id).await?;

    request.apply_to(&mut athlete);

    if let Some(category) = &request.category {
        let category = resolve_category(store, &category.name).await?;
        athlete.category_id = category.pk_id;
        athlete.category_name = category.name;
    }

    if let Some(center) = &request.training_center {
        let center = resolve_training_center(store, &center.name).await?;
        athlete.training_center_id = center.pk_id;
        athlete.training_center_name = center.name;
    }

    store.update_athlete(&athlete).await.map_err(|e| match e {
        StorageError::NotFound => athlete_not_found(id),
        other => or_cpf_conflict(other, &athlete.cpf),
    })
}

/// Delete an athlete
pub async fn delete_athlete(store: &dyn RecordStore, id: Uuid) -> WebResult<()> {
    store.delete_athlete(id).await.map_err(|e| or_not_found(e, id))?;

    tracing::info!(athlete_id = %id, "Athlete deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storage::{
        MemoryStore,
        dto::{
            athlete::{CategoryRef, TrainingCenterRef},
            category::CreateCategoryRequest,
            training_center::CreateTrainingCenterRequest,
        },
    };

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        for name in ["Scale", "RX"] {
            store
                .create_category(&CreateCategoryRequest {
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }
        store
            .create_training_center(&CreateTrainingCenterRequest {
                name: "CT King".to_string(),
                address: "Rua X, n. 2".to_string(),
                owner: "Marcos".to_string(),
            })
            .await
            .unwrap();
        store
    }

    fn request(name: &str, cpf: &str) -> CreateAthleteRequest {
        CreateAthleteRequest {
            name: name.to_string(),
            cpf: cpf.to_string(),
            weight: Decimal::new(755, 1),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            category: CategoryRef {
                name: "Scale".to_string(),
            },
            training_center: TrainingCenterRef {
                name: "CT King".to_string(),
            },
        }
    }

    async fn count_all(store: &MemoryStore) -> i64 {
        list_athletes(store, &AthleteFilter::default(), LimitOffsetParams::default())
            .await
            .unwrap()
            .total
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_persists_nothing() {
        let store = seeded_store().await;
        let mut req = request("Joao", "12345678900");
        req.category.name = "Elite".to_string();

        let err = create_athlete(&store, &req).await.unwrap_err();

        assert!(matches!(err, WebError::BadRequest(ref msg) if msg.contains("Elite")));
        assert_eq!(count_all(&store).await, 0);
    }

    #[tokio::test]
    async fn test_create_with_unknown_training_center_persists_nothing() {
        let store = seeded_store().await;
        let mut req = request("Joao", "12345678900");
        req.training_center.name = "CT Queen".to_string();

        let err = create_athlete(&store, &req).await.unwrap_err();

        assert!(matches!(err, WebError::BadRequest(ref msg) if msg.contains("CT Queen")));
        assert_eq!(count_all(&store).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_conflict() {
        let store = seeded_store().await;
        create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        let err = create_athlete(&store, &request("Maria", "12345678900"))
            .await
            .unwrap_err();

        assert!(matches!(err, WebError::Conflict(ref msg) if msg.contains("12345678900")));
        assert_eq!(count_all(&store).await, 1);
    }

    #[tokio::test]
    async fn test_created_athlete_can_be_fetched() {
        let store = seeded_store().await;
        let created = create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        let fetched = get_athlete(&store, created.id).await.unwrap();

        assert_eq!(fetched.name, "Joao");
        assert_eq!(fetched.cpf, "12345678900");
        assert_eq!(fetched.weight, Decimal::new(755, 1));
        assert_eq!(fetched.height, Decimal::new(170, 2));
        assert_eq!(fetched.sex, "M");
        assert_eq!(fetched.category_name, "Scale");
        assert_eq!(fetched.training_center_name, "CT King");
    }

    #[tokio::test]
    async fn test_list_filters_by_exact_name() {
        let store = seeded_store().await;
        create_athlete(&store, &request("Joao", "00000000001"))
            .await
            .unwrap();
        create_athlete(&store, &request("Joao Pedro", "00000000002"))
            .await
            .unwrap();

        let filter = AthleteFilter {
            name: Some("Joao".to_string()),
            cpf: None,
        };
        let page = list_athletes(&store, &filter, LimitOffsetParams::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Joao");
        assert_eq!(count_all(&store).await, 2);
    }

    #[tokio::test]
    async fn test_list_rejects_invalid_pagination() {
        let store = seeded_store().await;
        let page = LimitOffsetParams {
            limit: 0,
            offset: 0,
        };
        let err = list_athletes(&store, &AthleteFilter::default(), page)
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_changes_only_given_field() {
        let store = seeded_store().await;
        let created = create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        let update = UpdateAthleteRequest {
            name: Some("Joao Silva".to_string()),
            ..Default::default()
        };
        let updated = update_athlete(&store, created.id, &update).await.unwrap();

        assert_eq!(updated.name, "Joao Silva");
        assert_eq!(updated.cpf, created.cpf);
        assert_eq!(updated.weight, created.weight);
        assert_eq!(updated.height, created.height);
        assert_eq!(updated.sex, created.sex);
        assert_eq!(updated.category_name, created.category_name);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_moves_athlete_to_resolved_category() {
        let store = seeded_store().await;
        let created = create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        let update = UpdateAthleteRequest {
            category: Some(CategoryRef {
                name: "RX".to_string(),
            }),
            ..Default::default()
        };
        let updated = update_athlete(&store, created.id, &update).await.unwrap();

        assert_eq!(updated.category_name, "RX");
        assert_eq!(updated.training_center_name, "CT King");
        assert_ne!(updated.category_id, created.category_id);
    }

    #[tokio::test]
    async fn test_update_unknown_category_is_bad_request() {
        let store = seeded_store().await;
        let created = create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        let update = UpdateAthleteRequest {
            name: Some("Joao Silva".to_string()),
            category: Some(CategoryRef {
                name: "Elite".to_string(),
            }),
            ..Default::default()
        };
        let err = update_athlete(&store, created.id, &update)
            .await
            .unwrap_err();

        assert!(matches!(err, WebError::BadRequest(ref msg) if msg.contains("Elite")));
        assert_eq!(get_athlete(&store, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_unknown_training_center_is_bad_request() {
        let store = seeded_store().await;
        let created = create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        let update = UpdateAthleteRequest {
            weight: Some(Decimal::new(80, 0)),
            training_center: Some(TrainingCenterRef {
                name: "CT Queen".to_string(),
            }),
            ..Default::default()
        };
        let err = update_athlete(&store, created.id, &update)
            .await
            .unwrap_err();

        assert!(matches!(err, WebError::BadRequest(ref msg) if msg.contains("CT Queen")));
        assert_eq!(get_athlete(&store, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_taken_cpf_is_conflict() {
        let store = seeded_store().await;
        create_athlete(&store, &request("Joao", "00000000001"))
            .await
            .unwrap();
        let maria = create_athlete(&store, &request("Maria", "00000000002"))
            .await
            .unwrap();

        let update = UpdateAthleteRequest {
            cpf: Some("00000000001".to_string()),
            ..Default::default()
        };
        let err = update_athlete(&store, maria.id, &update).await.unwrap_err();

        assert!(matches!(err, WebError::Conflict(ref msg) if msg.contains("00000000001")));
        assert_eq!(get_athlete(&store, maria.id).await.unwrap().cpf, "00000000002");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = seeded_store().await;
        let err = update_athlete(&store, Uuid::new_v4(), &UpdateAthleteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = seeded_store().await;
        let created = create_athlete(&store, &request("Joao", "12345678900"))
            .await
            .unwrap();

        delete_athlete(&store, created.id).await.unwrap();

        assert!(matches!(
            get_athlete(&store, created.id).await,
            Err(WebError::NotFound(_))
        ));
        assert!(matches!(
            delete_athlete(&store, created.id).await,
            Err(WebError::NotFound(_))
        ));
    }
}
