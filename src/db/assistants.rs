use sea_orm::*;

use crate::models::{IdentityKey, TelegramIdentity};
use crate::models::assistants::{self, ValidatedAssistant};

/// Find an assistant by Telegram identity, trying `tg_id` first and the
/// username only as a fallback.
pub async fn find_by_identity<C: ConnectionTrait>(
    conn: &C,
    identity: &TelegramIdentity,
) -> Result<Option<assistants::Model>, DbErr> {
    for key in identity.lookup_keys() {
        let found = match key {
            IdentityKey::ByTelegramId(id) => {
                assistants::Entity::find()
                    .filter(assistants::Column::TgId.eq(id))
                    .one(conn)
                    .await?
            }
            IdentityKey::ByUsername(username) => {
                assistants::Entity::find()
                    .filter(assistants::Column::TgUsername.eq(username))
                    .one(conn)
                    .await?
            }
            IdentityKey::Anonymous => None,
        };
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

/// Create-or-overwrite an assistant keyed by Telegram identity.
///
/// The lookup and the write run in one transaction; together with the
/// unique index on `tg_id` this keeps two concurrent first-time submits
/// from creating two rows for the same caller. When the index does fire
/// (we lost the race and the row exists now), one retry takes the update
/// branch instead of surfacing the constraint error.
pub async fn upsert(
    db: &DatabaseConnection,
    identity: &TelegramIdentity,
    fields: ValidatedAssistant,
) -> Result<assistants::Model, DbErr> {
    match write_profile(db, identity, fields.clone()).await {
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            write_profile(db, identity, fields).await
        }
        outcome => outcome,
    }
}

/// One lookup-then-write pass. `rating` and `created_at` are set once at
/// creation and never touched on update.
async fn write_profile(
    db: &DatabaseConnection,
    identity: &TelegramIdentity,
    fields: ValidatedAssistant,
) -> Result<assistants::Model, DbErr> {
    let dates_json = serde_json::to_string(&fields.availability_dates)
        .map_err(|e| DbErr::Custom(format!("availability_dates encode: {e}")))?;

    let txn = db.begin().await?;

    let stored = match find_by_identity(&txn, identity).await? {
        None => {
            let new = assistants::ActiveModel {
                id: NotSet,
                tg_id: Set(identity.tg_id),
                tg_username: Set(identity.trimmed_username()),
                name: Set(fields.name),
                city: Set(fields.city),
                phone: Set(fields.phone),
                exp: Set(fields.exp),
                rate: Set(fields.rate),
                about: Set(fields.about),
                availability_dates: Set(Some(dates_json)),
                rating: Set(5),
                created_at: Set(chrono::Utc::now()),
            };
            new.insert(&txn).await?
        }
        Some(existing) => {
            let mut active: assistants::ActiveModel = existing.into();
            // Identity fields only move forward: a later call that omits
            // one must not erase a previously recorded value.
            if identity.tg_id.is_some() {
                active.tg_id = Set(identity.tg_id);
            }
            if let Some(username) = identity.trimmed_username() {
                active.tg_username = Set(Some(username));
            }
            active.name = Set(fields.name);
            active.city = Set(fields.city);
            active.phone = Set(fields.phone);
            active.exp = Set(fields.exp);
            active.rate = Set(fields.rate);
            active.about = Set(fields.about);
            active.availability_dates = Set(Some(dates_json));
            active.update(&txn).await?
        }
    };

    txn.commit().await?;
    Ok(stored)
}

/// Ranked candidate window: best-rated first, newest first among equals,
/// truncated to `cap`. Every further filter only narrows this window —
/// nothing ever digs past the cap.
pub async fn list_ranked(
    db: &DatabaseConnection,
    city: Option<&str>,
    cap: u64,
) -> Result<Vec<assistants::Model>, DbErr> {
    let mut query = assistants::Entity::find();
    if let Some(city) = city {
        query = query.filter(assistants::Column::City.eq(city));
    }
    query
        .order_by_desc(assistants::Column::Rating)
        .order_by_desc(assistants::Column::CreatedAt)
        .limit(cap)
        .all(db)
        .await
}

/// Narrow an already-ranked window in place; never re-sorts.
///
/// A `rate_max` ceiling drops profiles whose rate is absent or
/// unparseable: an unknown rate does not satisfy a ceiling.
pub fn apply_filters(
    rows: Vec<assistants::Model>,
    date: Option<&str>,
    experience_min: Option<i64>,
    rate_max: Option<i64>,
) -> Vec<assistants::Model> {
    rows.into_iter()
        .filter(|m| date.is_none_or(|d| m.availability().iter().any(|have| have == d)))
        .filter(|m| experience_min.is_none_or(|min| m.experience_years() >= min))
        .filter(|m| rate_max.is_none_or(|max| m.hourly_rate().is_some_and(|rate| rate <= max)))
        .collect()
}

/// All assistants, newest first, for the admin view.
pub async fn list_all(
    db: &DatabaseConnection,
    cap: u64,
) -> Result<Vec<assistants::Model>, DbErr> {
    assistants::Entity::find()
        .order_by_desc(assistants::Column::CreatedAt)
        .limit(cap)
        .all(db)
        .await
}

/// Permanently delete an assistant by surrogate id.
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<DeleteResult, DbErr> {
    assistants::Entity::delete_by_id(id).exec(db).await
}
