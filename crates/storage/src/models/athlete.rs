use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// An athlete row joined with the names of its category and training center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub category_id: i32,
    pub category_name: String,
    pub training_center_id: i32,
    pub training_center_name: String,
}

/// A fully resolved athlete ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewAthlete {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub category_id: i32,
    pub training_center_id: i32,
}
