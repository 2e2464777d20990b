use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{TelegramIdentity, none_if_blank};
use crate::validation::{
    ValidationError, coerce_experience, coerce_rate, normalize_phone, validate_city,
    validate_dates,
};

/// SeaORM entity for the `assistants` table.
///
/// `availability_dates` holds a JSON array of `YYYY-MM-DD` strings as
/// TEXT — the storage format the first revisions of the service wrote,
/// kept so existing databases stay readable.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assistants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub exp: String,
    pub rate: Option<String>,
    pub about: Option<String>,
    pub availability_dates: Option<String>,
    pub rating: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded availability set. Ascending and de-duplicated on write, so
    /// it comes back that way too; unreadable stored JSON decodes to empty.
    pub fn availability(&self) -> Vec<String> {
        self.availability_dates
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    /// Experience as a number, via the lenient coercion (`"3+"` → 3).
    pub fn experience_years(&self) -> i64 {
        coerce_experience(&self.exp)
    }

    /// Hourly rate in whole rubles; `None` when absent or unparseable.
    pub fn hourly_rate(&self) -> Option<i64> {
        self.rate.as_deref().and_then(coerce_rate)
    }
}

// ── DTOs (not stored in DB, used for request/response bodies) ──

/// Request body for `POST /api/assistant`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantIn {
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
    pub name: String,
    pub city: String,
    pub phone: String,
    #[serde(default = "default_exp")]
    pub exp: String,
    pub rate: Option<String>,
    pub about: Option<String>,
    pub availability_dates: Option<Vec<String>>,
}

fn default_exp() -> String {
    "0".to_string()
}

/// Field set after validation/normalization, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAssistant {
    pub name: String,
    pub city: String,
    pub phone: String,
    pub exp: String,
    pub rate: Option<String>,
    pub about: Option<String>,
    pub availability_dates: Vec<String>,
}

impl AssistantIn {
    /// Strict checks first (phone, city, dates — each with its own
    /// user-facing message), then the lenient cleanups. Nothing is
    /// written if this fails.
    pub fn validate(&self) -> Result<ValidatedAssistant, ValidationError> {
        let phone = normalize_phone(&self.phone)?;
        let city = validate_city(&self.city)?;
        let availability_dates =
            validate_dates(self.availability_dates.as_deref().unwrap_or_default())?;

        Ok(ValidatedAssistant {
            name: self.name.trim().to_string(),
            city: city.to_string(),
            phone,
            exp: self.exp.trim().to_string(),
            rate: none_if_blank(&self.rate),
            about: none_if_blank(&self.about),
            availability_dates,
        })
    }

    pub fn identity(&self) -> TelegramIdentity {
        TelegramIdentity {
            tg_id: self.tg_id,
            tg_username: self.tg_username.clone(),
        }
    }
}

/// Query params for `GET /api/assistants`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantQuery {
    pub city: Option<String>,
    pub date: Option<String>,
    pub experience_min: Option<i64>,
    pub rate_max: Option<i64>,
}

/// Wire representation of a stored assistant. `availability_dates` is
/// rendered as the decoded, ordered list; `created_at` stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    pub id: i64,
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub exp: String,
    pub rate: Option<String>,
    pub about: Option<String>,
    pub availability_dates: Vec<String>,
    pub rating: i32,
}

impl From<Model> for AssistantResponse {
    fn from(m: Model) -> Self {
        let availability_dates = m.availability();
        Self {
            id: m.id,
            tg_id: m.tg_id,
            tg_username: m.tg_username,
            name: m.name,
            city: m.city,
            phone: m.phone,
            exp: m.exp,
            rate: m.rate,
            about: m.about,
            availability_dates,
            rating: m.rating,
        }
    }
}
