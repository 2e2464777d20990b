use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{TelegramIdentity, none_if_blank};
use crate::validation::{ValidationError, normalize_phone, validate_city};

/// SeaORM entity for the `employers` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
    pub clinic: String,
    pub city: String,
    pub phone: String,
    pub about: Option<String>,
    pub rating: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request/response bodies) ──

/// Request body for `POST /api/employer`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployerIn {
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
    pub clinic: String,
    pub city: String,
    pub phone: String,
    pub about: Option<String>,
}

/// Field set after validation/normalization, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmployer {
    pub clinic: String,
    pub city: String,
    pub phone: String,
    pub about: Option<String>,
}

impl EmployerIn {
    /// Same strict phone/city checks as the assistant form; employers
    /// have no date fields.
    pub fn validate(&self) -> Result<ValidatedEmployer, ValidationError> {
        let phone = normalize_phone(&self.phone)?;
        let city = validate_city(&self.city)?;

        Ok(ValidatedEmployer {
            clinic: self.clinic.trim().to_string(),
            city: city.to_string(),
            phone,
            about: none_if_blank(&self.about),
        })
    }

    pub fn identity(&self) -> TelegramIdentity {
        TelegramIdentity {
            tg_id: self.tg_id,
            tg_username: self.tg_username.clone(),
        }
    }
}

/// Wire representation of a stored employer; `created_at` stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerResponse {
    pub id: i64,
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
    pub clinic: String,
    pub city: String,
    pub phone: String,
    pub about: Option<String>,
    pub rating: i32,
}

impl From<Model> for EmployerResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            tg_id: m.tg_id,
            tg_username: m.tg_username,
            clinic: m.clinic,
            city: m.city,
            phone: m.phone,
            about: m.about,
            rating: m.rating,
        }
    }
}
