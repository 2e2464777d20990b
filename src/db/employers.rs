use sea_orm::*;

use crate::models::{IdentityKey, TelegramIdentity};
use crate::models::employers::{self, ValidatedEmployer};

/// Find an employer by Telegram identity, trying `tg_id` first and the
/// username only as a fallback.
pub async fn find_by_identity<C: ConnectionTrait>(
    conn: &C,
    identity: &TelegramIdentity,
) -> Result<Option<employers::Model>, DbErr> {
    for key in identity.lookup_keys() {
        let found = match key {
            IdentityKey::ByTelegramId(id) => {
                employers::Entity::find()
                    .filter(employers::Column::TgId.eq(id))
                    .one(conn)
                    .await?
            }
            IdentityKey::ByUsername(username) => {
                employers::Entity::find()
                    .filter(employers::Column::TgUsername.eq(username))
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

/// Create-or-overwrite an employer keyed by Telegram identity. Same
/// transactional shape as the assistant upsert: lookup and write commit
/// together, a lost first-insert race retries into the update branch,
/// and `rating`/`created_at` are creation-only.
pub async fn upsert(
    db: &DatabaseConnection,
    identity: &TelegramIdentity,
    fields: ValidatedEmployer,
) -> Result<employers::Model, DbErr> {
    match write_profile(db, identity, fields.clone()).await {
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            write_profile(db, identity, fields).await
        }
        outcome => outcome,
    }
}

async fn write_profile(
    db: &DatabaseConnection,
    identity: &TelegramIdentity,
    fields: ValidatedEmployer,
) -> Result<employers::Model, DbErr> {
    let txn = db.begin().await?;

    let stored = match find_by_identity(&txn, identity).await? {
        None => {
            let new = employers::ActiveModel {
                id: NotSet,
                tg_id: Set(identity.tg_id),
                tg_username: Set(identity.trimmed_username()),
                clinic: Set(fields.clinic),
                city: Set(fields.city),
                phone: Set(fields.phone),
                about: Set(fields.about),
                rating: Set(5),
                created_at: Set(chrono::Utc::now()),
            };
            new.insert(&txn).await?
        }
        Some(existing) => {
            let mut active: employers::ActiveModel = existing.into();
            if identity.tg_id.is_some() {
                active.tg_id = Set(identity.tg_id);
            }
            if let Some(username) = identity.trimmed_username() {
                active.tg_username = Set(Some(username));
            }
            active.clinic = Set(fields.clinic);
            active.city = Set(fields.city);
            active.phone = Set(fields.phone);
            active.about = Set(fields.about);
            active.update(&txn).await?
        }
    };

    txn.commit().await?;
    Ok(stored)
}

/// All employers, newest first, for the admin view.
pub async fn list_all(
    db: &DatabaseConnection,
    cap: u64,
) -> Result<Vec<employers::Model>, DbErr> {
    employers::Entity::find()
        .order_by_desc(employers::Column::CreatedAt)
        .limit(cap)
        .all(db)
        .await
}

/// Permanently delete an employer by surrogate id.
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<DeleteResult, DbErr> {
    employers::Entity::delete_by_id(id).exec(db).await
}
