//! Integration tests for profile upsert, listing and admin delete.
//!
//! Everything runs against in-memory SQLite with the real migrations —
//! no server or external database needed.
//!
//! Run with: `cargo test --test profiles_test`

use chrono::{Duration, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, NotSet, Set, SqlErr,
};

use assistfinder_backend::db::{assistants as assistant_db, employers as employer_db};
use assistfinder_backend::models::TelegramIdentity;
use assistfinder_backend::models::assistants::{self, AssistantIn};
use assistfinder_backend::models::employers::EmployerIn;

async fn test_db() -> DatabaseConnection {
    // A single connection keeps the in-memory database alive across
    // queries; a pool would hand each query a fresh empty database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    db
}

fn by_id(tg_id: i64) -> TelegramIdentity {
    TelegramIdentity {
        tg_id: Some(tg_id),
        tg_username: None,
    }
}

fn by_username(username: &str) -> TelegramIdentity {
    TelegramIdentity {
        tg_id: None,
        tg_username: Some(username.to_string()),
    }
}

fn assistant_payload(tg_id: Option<i64>, tg_username: Option<&str>) -> AssistantIn {
    AssistantIn {
        tg_id,
        tg_username: tg_username.map(str::to_string),
        name: "Алина".to_string(),
        city: "Москва".to_string(),
        phone: "+7 999 111 22 33".to_string(),
        exp: "3+".to_string(),
        rate: Some("500".to_string()),
        about: None,
        availability_dates: Some(vec!["2024-05-02".to_string(), "2024-05-01".to_string()]),
    }
}

async fn upsert_assistant(db: &DatabaseConnection, payload: &AssistantIn) -> assistants::Model {
    let fields = payload.validate().expect("payload should validate");
    assistant_db::upsert(db, &payload.identity(), fields)
        .await
        .expect("upsert")
}

/// Rewrite ranking inputs directly; upsert never touches them.
async fn set_ranking(db: &DatabaseConnection, row: assistants::Model, rating: i32, age_days: i64) {
    let mut active: assistants::ActiveModel = row.into();
    active.rating = Set(rating);
    active.created_at = Set(Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
        - Duration::days(age_days));
    active.update(db).await.expect("update ranking");
}

#[tokio::test]
async fn first_upsert_creates_with_defaults() {
    let db = test_db().await;

    let stored = upsert_assistant(&db, &assistant_payload(Some(42), Some("@alina"))).await;

    assert!(stored.id > 0);
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.phone, "+79991112233");
    assert_eq!(stored.city, "Москва");
    assert_eq!(stored.availability(), vec!["2024-05-01", "2024-05-02"]);
}

#[tokio::test]
async fn repeated_upsert_converges_to_one_row() {
    let db = test_db().await;
    let payload = assistant_payload(Some(42), Some("@alina"));

    let first = upsert_assistant(&db, &payload).await;
    let second = upsert_assistant(&db, &payload).await;

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    let all = assistant_db::list_all(&db, 10).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn upsert_overwrites_fields_in_place() {
    let db = test_db().await;

    let first = upsert_assistant(&db, &assistant_payload(Some(42), None)).await;

    let mut changed = assistant_payload(Some(42), None);
    changed.city = "Санкт-Петербург".to_string();
    changed.rate = None;
    let second = upsert_assistant(&db, &changed).await;

    assert_eq!(first.id, second.id);
    assert_eq!(second.city, "Санкт-Петербург");
    assert_eq!(second.rate, None); // full replace, not a merge
    assert_eq!(second.rating, 5);
    assert_eq!(second.created_at, first.created_at);
}

#[tokio::test]
async fn username_profile_is_found_once_tg_id_arrives() {
    let db = test_db().await;

    // Saved before the client started sending tg_id.
    let original = upsert_assistant(&db, &assistant_payload(None, Some("@alina"))).await;
    assert_eq!(original.tg_id, None);

    // Same person, now with the numeric id: must update, not duplicate.
    let updated = upsert_assistant(&db, &assistant_payload(Some(42), Some("@alina"))).await;
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.tg_id, Some(42));

    // A later call without the username must not erase it.
    let again = upsert_assistant(&db, &assistant_payload(Some(42), None)).await;
    assert_eq!(again.id, original.id);
    assert_eq!(again.tg_username.as_deref(), Some("@alina"));
}

#[tokio::test]
async fn failed_validation_leaves_stored_state_unchanged() {
    let db = test_db().await;
    upsert_assistant(&db, &assistant_payload(Some(42), None)).await;

    // The handler validates before touching the store; a bad city never
    // reaches the upsert.
    let mut bad = assistant_payload(Some(42), None);
    bad.city = "bad-city".to_string();
    assert!(bad.validate().is_err());

    let stored = assistant_db::find_by_identity(&db, &by_id(42))
        .await
        .unwrap()
        .expect("profile still present");
    assert_eq!(stored.city, "Москва");
}

#[tokio::test]
async fn listing_is_ranked_and_capped() {
    let db = test_db().await;

    for i in 0..5 {
        let row = upsert_assistant(&db, &assistant_payload(Some(100 + i), None)).await;
        // Ratings 1..=5, each row a day older than the previous.
        set_ranking(&db, row, (i + 1) as i32, i).await;
    }

    let window = assistant_db::list_ranked(&db, None, 3).await.unwrap();
    assert_eq!(window.len(), 3);
    let ratings: Vec<i32> = window.iter().map(|m| m.rating).collect();
    assert_eq!(ratings, vec![5, 4, 3]);
}

#[tokio::test]
async fn equal_ratings_put_newest_first() {
    let db = test_db().await;

    let older = upsert_assistant(&db, &assistant_payload(Some(1), None)).await;
    let newer = upsert_assistant(&db, &assistant_payload(Some(2), None)).await;
    set_ranking(&db, older, 5, 10).await;
    set_ranking(&db, newer, 5, 0).await;

    let window = assistant_db::list_ranked(&db, None, 10).await.unwrap();
    let ids: Vec<i64> = window.iter().map(|m| m.tg_id.unwrap()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn city_restriction_is_exact() {
    let db = test_db().await;

    upsert_assistant(&db, &assistant_payload(Some(1), None)).await;
    let mut spb = assistant_payload(Some(2), None);
    spb.city = "Санкт-Петербург".to_string();
    upsert_assistant(&db, &spb).await;

    let moscow = assistant_db::list_ranked(&db, Some("Москва"), 10).await.unwrap();
    assert_eq!(moscow.len(), 1);
    assert_eq!(moscow[0].tg_id, Some(1));
}

#[tokio::test]
async fn rate_ceiling_excludes_profiles_without_a_rate() {
    let db = test_db().await;

    for (tg_id, rate) in [(1, Some("400")), (2, Some("600")), (3, None)] {
        let mut payload = assistant_payload(Some(tg_id), None);
        payload.rate = rate.map(str::to_string);
        upsert_assistant(&db, &payload).await;
    }

    let window = assistant_db::list_ranked(&db, None, 10).await.unwrap();
    let kept = assistant_db::apply_filters(window, None, None, Some(500));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].tg_id, Some(1));
}

#[tokio::test]
async fn date_and_experience_filters_compose() {
    let db = test_db().await;

    let mut free_on_first = assistant_payload(Some(1), None);
    free_on_first.availability_dates = Some(vec!["2024-05-01".to_string()]);
    free_on_first.exp = "5".to_string();
    upsert_assistant(&db, &free_on_first).await;

    let mut junior_same_day = assistant_payload(Some(2), None);
    junior_same_day.availability_dates = Some(vec!["2024-05-01".to_string()]);
    junior_same_day.exp = "0".to_string();
    upsert_assistant(&db, &junior_same_day).await;

    let mut other_day = assistant_payload(Some(3), None);
    other_day.availability_dates = Some(vec!["2024-06-01".to_string()]);
    other_day.exp = "5".to_string();
    upsert_assistant(&db, &other_day).await;

    let window = assistant_db::list_ranked(&db, None, 10).await.unwrap();
    let kept = assistant_db::apply_filters(window, Some("2024-05-01"), Some(3), None);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].tg_id, Some(1));
}

#[tokio::test]
async fn employer_upsert_round_trips_by_username() {
    let db = test_db().await;

    let payload = EmployerIn {
        tg_id: None,
        tg_username: Some("@smile_clinic".to_string()),
        clinic: "Стоматология Smile".to_string(),
        city: "Москва".to_string(),
        phone: "+7 999 222 33 44".to_string(),
        about: Some("Ищем ассистента на завтра".to_string()),
    };
    let fields = payload.validate().unwrap();
    let stored = employer_db::upsert(&db, &payload.identity(), fields)
        .await
        .unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.phone, "+79992223344");

    let found = employer_db::find_by_identity(&db, &by_username("@smile_clinic"))
        .await
        .unwrap()
        .expect("stored employer");
    assert_eq!(found.id, stored.id);
}

#[tokio::test]
async fn duplicate_tg_id_is_rejected_by_the_store() {
    let db = test_db().await;
    upsert_assistant(&db, &assistant_payload(Some(42), None)).await;

    // A second row for the same tg_id must die on the unique index, not
    // silently become a duplicate identity.
    let duplicate = assistants::ActiveModel {
        id: NotSet,
        tg_id: Set(Some(42)),
        name: Set("Дубль".to_string()),
        city: Set("Москва".to_string()),
        phone: Set("+79990000000".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let err = duplicate.insert(&db).await.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn concurrent_first_upserts_converge_to_one_row() {
    let db = test_db().await;
    let payload = assistant_payload(Some(42), Some("@alina"));
    let fields = payload.validate().unwrap();
    let identity = payload.identity();

    // Two first-time submits for the same caller racing each other: the
    // loser retries into the update branch instead of erroring or
    // creating a second row.
    let (first, second) = tokio::join!(
        assistant_db::upsert(&db, &identity, fields.clone()),
        assistant_db::upsert(&db, &identity, fields),
    );
    let first = first.expect("upsert");
    let second = second.expect("upsert");

    assert_eq!(first.id, second.id);
    let all = assistant_db::list_all(&db, 10).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn admin_delete_is_permanent_and_404s_on_missing_ids() {
    let db = test_db().await;

    let stored = upsert_assistant(&db, &assistant_payload(Some(42), Some("@alina"))).await;

    let missing = assistant_db::delete_by_id(&db, stored.id + 999).await.unwrap();
    assert_eq!(missing.rows_affected, 0); // handler turns this into 404

    let deleted = assistant_db::delete_by_id(&db, stored.id).await.unwrap();
    assert_eq!(deleted.rows_affected, 1);

    // Gone by surrogate id and by its former identity keys.
    assert!(
        assistant_db::find_by_identity(&db, &by_id(42))
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        assistant_db::find_by_identity(&db, &by_username("@alina"))
            .await
            .unwrap()
            .is_none()
    );
}
