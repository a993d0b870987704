//! In-process record store.
//!
//! Mirrors the PostgreSQL schema closely enough for the services to behave
//! identically: unique names and CPFs, integer keys for references, and
//! athletes joined with their category and training center names on read.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::category::CreateCategoryRequest;
use crate::dto::common::{LimitOffsetParams, Page};
use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, Category, NewAthlete, TrainingCenter};

use super::{AthleteFilter, RecordStore};

#[derive(Default)]
struct Tables {
    next_pk: i32,
    categories: Vec<Category>,
    training_centers: Vec<TrainingCenter>,
    athletes: Vec<Athlete>,
}

impl Tables {
    fn next_pk(&mut self) -> i32 {
        self.next_pk += 1;
        self.next_pk
    }

    fn category_name(&self, pk_id: i32) -> Result<String> {
        self.categories
            .iter()
            .find(|c| c.pk_id == pk_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| StorageError::MissingReference(format!("category {pk_id}")))
    }

    fn training_center_name(&self, pk_id: i32) -> Result<String> {
        self.training_centers
            .iter()
            .find(|t| t.pk_id == pk_id)
            .map(|t| t.name.clone())
            .ok_or_else(|| StorageError::MissingReference(format!("training center {pk_id}")))
    }

    fn ensure_cpf_free(&self, cpf: &str, owner: Option<Uuid>) -> Result<()> {
        let taken = self
            .athletes
            .iter()
            .any(|a| a.cpf == cpf && Some(a.id) != owner);
        if taken {
            return Err(StorageError::ConstraintViolation(format!(
                "cpf {cpf} already registered"
            )));
        }
        Ok(())
    }
}

/// Record store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> Result<Category> {
        let tables = self.tables.read().await;
        tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn create_category(&self, req: &CreateCategoryRequest) -> Result<Category> {
        let mut tables = self.tables.write().await;
        if tables.categories.iter().any(|c| c.name == req.name) {
            return Err(StorageError::ConstraintViolation(format!(
                "category {} already exists",
                req.name
            )));
        }

        let category = Category {
            pk_id: tables.next_pk(),
            id: Uuid::new_v4(),
            name: req.name.clone(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>> {
        let tables = self.tables.read().await;
        let mut centers = tables.training_centers.clone();
        centers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(centers)
    }

    async fn find_training_center(&self, id: Uuid) -> Result<TrainingCenter> {
        let tables = self.tables.read().await;
        tables
            .training_centers
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_training_center_by_name(&self, name: &str) -> Result<Option<TrainingCenter>> {
        let tables = self.tables.read().await;
        Ok(tables.training_centers.iter().find(|t| t.name == name).cloned())
    }

    async fn create_training_center(
        &self,
        req: &CreateTrainingCenterRequest,
    ) -> Result<TrainingCenter> {
        let mut tables = self.tables.write().await;
        if tables.training_centers.iter().any(|t| t.name == req.name) {
            return Err(StorageError::ConstraintViolation(format!(
                "training center {} already exists",
                req.name
            )));
        }

        let center = TrainingCenter {
            pk_id: tables.next_pk(),
            id: Uuid::new_v4(),
            name: req.name.clone(),
            address: req.address.clone(),
            owner: req.owner.clone(),
        };
        tables.training_centers.push(center.clone());
        Ok(center)
    }

    async fn list_athletes(
        &self,
        filter: &AthleteFilter,
        page: LimitOffsetParams,
    ) -> Result<Page<Athlete>> {
        let tables = self.tables.read().await;
        let matching: Vec<&Athlete> = tables
            .athletes
            .iter()
            .filter(|a| filter.matches(a))
            .collect();

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, total, page))
    }

    async fn find_athlete(&self, id: Uuid) -> Result<Athlete> {
        let tables = self.tables.read().await;
        tables
            .athletes
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_athlete(&self, new: &NewAthlete) -> Result<Athlete> {
        let mut tables = self.tables.write().await;
        tables.ensure_cpf_free(&new.cpf, None)?;

        let athlete = Athlete {
            id: new.id,
            created_at: new.created_at,
            name: new.name.clone(),
            cpf: new.cpf.clone(),
            weight: new.weight,
            height: new.height,
            sex: new.sex.clone(),
            category_id: new.category_id,
            category_name: tables.category_name(new.category_id)?,
            training_center_id: new.training_center_id,
            training_center_name: tables.training_center_name(new.training_center_id)?,
        };
        tables.athletes.push(athlete.clone());
        Ok(athlete)
    }

    async fn update_athlete(&self, athlete: &Athlete) -> Result<Athlete> {
        let mut tables = self.tables.write().await;
        tables.ensure_cpf_free(&athlete.cpf, Some(athlete.id))?;

        let category_name = tables.category_name(athlete.category_id)?;
        let training_center_name = tables.training_center_name(athlete.training_center_id)?;

        let stored = tables
            .athletes
            .iter_mut()
            .find(|a| a.id == athlete.id)
            .ok_or(StorageError::NotFound)?;

        stored.name = athlete.name.clone();
        stored.cpf = athlete.cpf.clone();
        stored.weight = athlete.weight;
        stored.height = athlete.height;
        stored.sex = athlete.sex.clone();
        stored.category_id = athlete.category_id;
        stored.category_name = category_name;
        stored.training_center_id = athlete.training_center_id;
        stored.training_center_name = training_center_name;

        Ok(stored.clone())
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        let before = tables.athletes.len();
        tables.athletes.retain(|a| a.id != id);

        if tables.athletes.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    async fn seeded() -> (MemoryStore, Category, TrainingCenter) {
        let store = MemoryStore::new();
        let category = store
            .create_category(&CreateCategoryRequest {
                name: "Scale".to_string(),
            })
            .await
            .unwrap();
        let center = store
            .create_training_center(&CreateTrainingCenterRequest {
                name: "CT King".to_string(),
                address: "Rua X, n. 2".to_string(),
                owner: "Marcos".to_string(),
            })
            .await
            .unwrap();
        (store, category, center)
    }

    fn new_athlete(
        name: &str,
        cpf: &str,
        category: &Category,
        center: &TrainingCenter,
    ) -> NewAthlete {
        NewAthlete {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now().naive_utc(),
            name: name.to_string(),
            cpf: cpf.to_string(),
            weight: Decimal::new(75, 0),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            category_id: category.pk_id,
            training_center_id: center.pk_id,
        }
    }

    #[tokio::test]
    async fn test_insert_joins_reference_names() {
        let (store, category, center) = seeded().await;
        let athlete = store
            .insert_athlete(&new_athlete("Joao", "12345678900", &category, &center))
            .await
            .unwrap();

        assert_eq!(athlete.category_name, "Scale");
        assert_eq!(athlete.training_center_name, "CT King");
        assert_eq!(store.find_athlete(athlete.id).await.unwrap(), athlete);
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_constraint_violation() {
        let (store, category, center) = seeded().await;
        store
            .insert_athlete(&new_athlete("Joao", "12345678900", &category, &center))
            .await
            .unwrap();

        let err = store
            .insert_athlete(&new_athlete("Maria", "12345678900", &category, &center))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        let page = store
            .list_athletes(&AthleteFilter::default(), LimitOffsetParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_rejected() {
        let (store, _, _) = seeded().await;
        let err = store
            .create_category(&CreateCategoryRequest {
                name: "Scale".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_unknown_reference_is_missing_reference() {
        let (store, category, center) = seeded().await;
        let mut athlete = new_athlete("Joao", "12345678900", &category, &center);
        athlete.training_center_id = 999;

        let err = store.insert_athlete(&athlete).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingReference(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let (store, category, center) = seeded().await;
        for (name, cpf) in [
            ("Joao", "00000000001"),
            ("Maria", "00000000002"),
            ("Joao", "00000000003"),
        ] {
            store
                .insert_athlete(&new_athlete(name, cpf, &category, &center))
                .await
                .unwrap();
        }

        let by_name = AthleteFilter {
            name: Some("Joao".to_string()),
            cpf: None,
        };
        let page = store
            .list_athletes(&by_name, LimitOffsetParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|a| a.name == "Joao"));

        let both = AthleteFilter {
            name: Some("Joao".to_string()),
            cpf: Some("00000000002".to_string()),
        };
        let page = store
            .list_athletes(&both, LimitOffsetParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);

        let second = LimitOffsetParams { limit: 1, offset: 1 };
        let page = store
            .list_athletes(&AthleteFilter::default(), second)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Maria");
    }

    #[tokio::test]
    async fn test_update_keeps_own_cpf_and_rejects_taken_one() {
        let (store, category, center) = seeded().await;
        let first = store
            .insert_athlete(&new_athlete("Joao", "00000000001", &category, &center))
            .await
            .unwrap();
        store
            .insert_athlete(&new_athlete("Maria", "00000000002", &category, &center))
            .await
            .unwrap();

        let mut renamed = first.clone();
        renamed.name = "Joao Silva".to_string();
        let updated = store.update_athlete(&renamed).await.unwrap();
        assert_eq!(updated.name, "Joao Silva");

        let mut clash = updated.clone();
        clash.cpf = "00000000002".to_string();
        assert!(store.update_athlete(&clash).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (store, category, center) = seeded().await;
        let athlete = store
            .insert_athlete(&new_athlete("Joao", "12345678900", &category, &center))
            .await
            .unwrap();

        store.delete_athlete(athlete.id).await.unwrap();
        assert!(matches!(
            store.delete_athlete(athlete.id).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            store.find_athlete(athlete.id).await,
            Err(StorageError::NotFound)
        ));
    }
}
