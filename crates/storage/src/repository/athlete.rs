use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::{LimitOffsetParams, Page};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, NewAthlete};

use super::AthleteFilter;

/// Columns of an athlete joined with its category and training center names.
/// Expects the athlete relation to be aliased as `a`.
const ATHLETE_SELECT: &str = r#"
    SELECT a.id, a.created_at, a.name, a.cpf, a.weight, a.height, a.sex,
           a.category_id, c.name AS category_name,
           a.training_center_id, t.name AS training_center_name
"#;

const ATHLETE_JOINS: &str = r#"
    JOIN categories c ON c.pk_id = a.category_id
    JOIN training_centers t ON t.pk_id = a.training_center_id
"#;

const ATHLETE_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR a.name = $1)
      AND ($2::text IS NULL OR a.cpf = $2)
"#;

/// Repository for Athlete database operations
pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List athletes matching the filter, oldest registrations first
    pub async fn list(
        &self,
        filter: &AthleteFilter,
        page: LimitOffsetParams,
    ) -> Result<Page<Athlete>> {
        let sql = format!(
            "{ATHLETE_SELECT} FROM athletes a {ATHLETE_JOINS} {ATHLETE_FILTER}
             ORDER BY a.created_at, a.id
             LIMIT $3 OFFSET $4"
        );
        let athletes = sqlx::query_as::<_, Athlete>(&sql)
            .bind(filter.name.as_deref())
            .bind(filter.cpf.as_deref())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM athletes a {ATHLETE_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(filter.name.as_deref())
            .bind(filter.cpf.as_deref())
            .fetch_one(self.pool)
            .await?;

        Ok(Page::new(athletes, total, page))
    }

    /// Find athlete by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        let sql = format!("{ATHLETE_SELECT} FROM athletes a {ATHLETE_JOINS} WHERE a.id = $1");
        let athlete = sqlx::query_as::<_, Athlete>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Insert a new athlete
    pub async fn create(&self, new: &NewAthlete) -> Result<Athlete> {
        let sql = format!(
            "WITH a AS (
                INSERT INTO athletes (id, created_at, name, cpf, weight, height, sex,
                                      category_id, training_center_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
             )
             {ATHLETE_SELECT} FROM a {ATHLETE_JOINS}"
        );
        let athlete = sqlx::query_as::<_, Athlete>(&sql)
            .bind(new.id)
            .bind(new.created_at)
            .bind(&new.name)
            .bind(&new.cpf)
            .bind(new.weight)
            .bind(new.height)
            .bind(&new.sex)
            .bind(new.category_id)
            .bind(new.training_center_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).classify(|| format!("cpf {} already registered", new.cpf))
            })?;

        Ok(athlete)
    }

    /// Overwrite every mutable column of an existing athlete
    pub async fn update(&self, athlete: &Athlete) -> Result<Athlete> {
        let sql = format!(
            "WITH a AS (
                UPDATE athletes
                SET name = $2,
                    cpf = $3,
                    weight = $4,
                    height = $5,
                    sex = $6,
                    category_id = $7,
                    training_center_id = $8
                WHERE id = $1
                RETURNING *
             )
             {ATHLETE_SELECT} FROM a {ATHLETE_JOINS}"
        );
        let updated = sqlx::query_as::<_, Athlete>(&sql)
            .bind(athlete.id)
            .bind(&athlete.name)
            .bind(&athlete.cpf)
            .bind(athlete.weight)
            .bind(athlete.height)
            .bind(&athlete.sex)
            .bind(athlete.category_id)
            .bind(athlete.training_center_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).classify(|| format!("cpf {} already registered", athlete.cpf))
            })?
            .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
