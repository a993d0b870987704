use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::dto::category::CreateCategoryRequest;
use crate::dto::common::{LimitOffsetParams, Page};
use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::Result;
use crate::models::{Athlete, Category, NewAthlete, TrainingCenter};
use crate::repository::athlete::AthleteRepository;
use crate::repository::category::CategoryRepository;
use crate::repository::training_center::TrainingCenterRepository;
use crate::repository::{AthleteFilter, RecordStore};

/// PostgreSQL-backed record store
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for Database {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(&self.pool).list().await
    }

    async fn find_category(&self, id: Uuid) -> Result<Category> {
        CategoryRepository::new(&self.pool).find_by_id(id).await
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        CategoryRepository::new(&self.pool).find_by_name(name).await
    }

    async fn create_category(&self, req: &CreateCategoryRequest) -> Result<Category> {
        CategoryRepository::new(&self.pool).create(req).await
    }

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>> {
        TrainingCenterRepository::new(&self.pool).list().await
    }

    async fn find_training_center(&self, id: Uuid) -> Result<TrainingCenter> {
        TrainingCenterRepository::new(&self.pool).find_by_id(id).await
    }

    async fn find_training_center_by_name(&self, name: &str) -> Result<Option<TrainingCenter>> {
        TrainingCenterRepository::new(&self.pool)
            .find_by_name(name)
            .await
    }

    async fn create_training_center(
        &self,
        req: &CreateTrainingCenterRequest,
    ) -> Result<TrainingCenter> {
        TrainingCenterRepository::new(&self.pool).create(req).await
    }

    async fn list_athletes(
        &self,
        filter: &AthleteFilter,
        page: LimitOffsetParams,
    ) -> Result<Page<Athlete>> {
        AthleteRepository::new(&self.pool).list(filter, page).await
    }

    async fn find_athlete(&self, id: Uuid) -> Result<Athlete> {
        AthleteRepository::new(&self.pool).find_by_id(id).await
    }

    async fn insert_athlete(&self, athlete: &NewAthlete) -> Result<Athlete> {
        AthleteRepository::new(&self.pool).create(athlete).await
    }

    async fn update_athlete(&self, athlete: &Athlete) -> Result<Athlete> {
        AthleteRepository::new(&self.pool).update(athlete).await
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<()> {
        AthleteRepository::new(&self.pool).delete(id).await
    }
}
