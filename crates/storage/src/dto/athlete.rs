use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Athlete;
use crate::repository::AthleteFilter;

/// Reference to a category by its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRef {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 10,
        message = "Category name must be between 1 and 10 characters"
    ))]
    pub name: String,
}

/// Reference to a training center by its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrainingCenterRef {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Training center name must be between 1 and 20 characters"
    ))]
    pub name: String,
}

/// Request payload for registering a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Decimal,

    #[validate(custom(function = "validate_height"))]
    pub height: Decimal,

    #[validate(custom(function = "validate_sex"))]
    pub sex: String,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: CategoryRef,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: TrainingCenterRef,
}

/// Request payload for a partial athlete update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Option<Decimal>,

    #[validate(custom(function = "validate_height"))]
    pub height: Option<Decimal>,

    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: Option<CategoryRef>,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: Option<TrainingCenterRef>,
}

impl UpdateAthleteRequest {
    /// Overwrites the scalar fields that are present in the request.
    ///
    /// Category and training center changes need a lookup first, so they are
    /// applied by the caller once resolved.
    pub fn apply_to(&self, athlete: &mut Athlete) {
        if let Some(name) = &self.name {
            athlete.name = name.clone();
        }
        if let Some(cpf) = &self.cpf {
            athlete.cpf = cpf.clone();
        }
        if let Some(weight) = self.weight {
            athlete.weight = weight;
        }
        if let Some(height) = self.height {
            athlete.height = height;
        }
        if let Some(sex) = &self.sex {
            athlete.sex = sex.clone();
        }
    }
}

/// Query string filters accepted by the athlete listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteListQuery {
    /// Exact athlete name
    pub nome: Option<String>,
    /// Exact CPF
    pub cpf: Option<String>,
}

impl From<AthleteListQuery> for AthleteFilter {
    fn from(query: AthleteListQuery) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            name: non_empty(query.nome),
            cpf: non_empty(query.cpf),
        }
    }
}

/// Full athlete representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centro_treinamento")]
    pub training_center: TrainingCenterRef,
}

/// Compact athlete representation used in listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centro_treinamento")]
    pub training_center: TrainingCenterRef,
}

// Validation helpers
const MEASURE_SCALE: u32 = 2;

fn validate_cpf(cpf: &str) -> Result<(), validator::ValidationError> {
    if cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_cpf");
        error.message = Some("CPF must be exactly 11 digits".into());
        Err(error)
    }
}

/// Weights are stored as NUMERIC(6,2): positive, below 10000, two decimals at most.
fn validate_weight(value: &Decimal) -> Result<(), validator::ValidationError> {
    validate_measure(
        value,
        Decimal::new(10_000, 0),
        "invalid_weight",
        "Weight must be greater than 0 and less than 10000, with at most 2 decimals",
    )
}

/// Heights are stored as NUMERIC(4,2): positive, below 100, two decimals at most.
fn validate_height(value: &Decimal) -> Result<(), validator::ValidationError> {
    validate_measure(
        value,
        Decimal::new(100, 0),
        "invalid_height",
        "Height must be greater than 0 and less than 100, with at most 2 decimals",
    )
}

fn validate_measure(
    value: &Decimal,
    upper: Decimal,
    code: &'static str,
    message: &'static str,
) -> Result<(), validator::ValidationError> {
    let in_range = *value > Decimal::ZERO && *value < upper;
    if in_range && value.normalize().scale() <= MEASURE_SCALE {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new(code);
        error.message = Some(message.into());
        Err(error)
    }
}

fn validate_sex(sex: &str) -> Result<(), validator::ValidationError> {
    const VALID_SEXES: &[&str] = &["M", "F"];

    if VALID_SEXES.contains(&sex) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_sex");
        error.message = Some("Sex must be M or F".into());
        Err(error)
    }
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            name: athlete.name,
            cpf: athlete.cpf,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            category: CategoryRef {
                name: athlete.category_name,
            },
            training_center: TrainingCenterRef {
                name: athlete.training_center_name,
            },
        }
    }
}

impl From<Athlete> for AthleteSummary {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            name: athlete.name,
            category: CategoryRef {
                name: athlete.category_name,
            },
            training_center: TrainingCenterRef {
                name: athlete.training_center_name,
            },
        }
    }
}
