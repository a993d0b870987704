use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::category::CreateCategoryRequest;
use crate::dto::common::{LimitOffsetParams, Page};
use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::Result;
use crate::models::{Athlete, Category, NewAthlete, TrainingCenter};

pub mod athlete;
pub mod category;
pub mod memory;
pub mod training_center;

/// Exact-match athlete filters. `None` fields do not constrain the result;
/// present fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AthleteFilter {
    pub name: Option<String>,
    pub cpf: Option<String>,
}

impl AthleteFilter {
    pub fn matches(&self, athlete: &Athlete) -> bool {
        self.name.as_ref().is_none_or(|name| &athlete.name == name)
            && self.cpf.as_ref().is_none_or(|cpf| &athlete.cpf == cpf)
    }
}

/// Persistence operations needed by the HTTP services.
///
/// Lookups by identifier return `StorageError::NotFound` when nothing matches;
/// lookups by name return `Ok(None)` so callers can report which reference was
/// missing. Duplicate unique keys surface as `StorageError::ConstraintViolation`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn find_category(&self, id: Uuid) -> Result<Category>;
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn create_category(&self, req: &CreateCategoryRequest) -> Result<Category>;

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>>;
    async fn find_training_center(&self, id: Uuid) -> Result<TrainingCenter>;
    async fn find_training_center_by_name(&self, name: &str) -> Result<Option<TrainingCenter>>;
    async fn create_training_center(
        &self,
        req: &CreateTrainingCenterRequest,
    ) -> Result<TrainingCenter>;

    async fn list_athletes(
        &self,
        filter: &AthleteFilter,
        page: LimitOffsetParams,
    ) -> Result<Page<Athlete>>;
    async fn find_athlete(&self, id: Uuid) -> Result<Athlete>;
    async fn insert_athlete(&self, athlete: &NewAthlete) -> Result<Athlete>;
    async fn update_athlete(&self, athlete: &Athlete) -> Result<Athlete>;
    async fn delete_athlete(&self, id: Uuid) -> Result<()>;
}
