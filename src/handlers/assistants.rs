use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::db::assistants as assistant_db;
use crate::handlers::ListConfig;
use crate::models::TelegramIdentity;
use crate::models::assistants::{AssistantIn, AssistantQuery, AssistantResponse};
use crate::validation;

/// POST /api/assistant — create or overwrite the caller's profile.
/// Validation runs before any write, so a rejected request leaves the
/// stored profile untouched.
pub async fn upsert_assistant(
    db: web::Data<DatabaseConnection>,
    body: web::Json<AssistantIn>,
) -> impl Responder {
    let payload = body.into_inner();
    let fields = match payload.validate() {
        Ok(fields) => fields,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "detail": e.to_string(),
            }));
        }
    };

    match assistant_db::upsert(db.get_ref(), &payload.identity(), fields).await {
        Ok(stored) => HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "id": stored.id,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "detail": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/assistant?tg_id=..&tg_username=.. — the caller's own profile,
/// `null` when nothing is stored for that identity yet.
pub async fn get_my_assistant(
    db: web::Data<DatabaseConnection>,
    query: web::Query<TelegramIdentity>,
) -> impl Responder {
    let identity = query.into_inner();
    match assistant_db::find_by_identity(db.get_ref(), &identity).await {
        Ok(found) => HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "assistant": found.map(AssistantResponse::from),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "detail": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/assistants — ranked, capped, optionally filtered listing for
/// employers. An unknown `city` or malformed `date` yields an empty list
/// rather than an error: a bad filter must not dump the whole table.
pub async fn list_assistants(
    db: web::Data<DatabaseConnection>,
    config: web::Data<ListConfig>,
    query: web::Query<AssistantQuery>,
) -> impl Responder {
    let city = match query.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) if !validation::ALLOWED_CITIES.contains(&city) => {
            tracing::info!(city, "listing request for unknown city");
            return HttpResponse::Ok().json(Vec::<AssistantResponse>::new());
        }
        other => other,
    };

    let date = query.date.as_deref().map(str::trim).filter(|d| !d.is_empty());
    if let Some(date) = date {
        if !validation::is_calendar_date(date) {
            return HttpResponse::Ok().json(Vec::<AssistantResponse>::new());
        }
    }

    match assistant_db::list_ranked(db.get_ref(), city, config.assistants_cap).await {
        Ok(window) => {
            let rows = assistant_db::apply_filters(
                window,
                date,
                query.experience_min,
                query.rate_max,
            );
            let response: Vec<AssistantResponse> =
                rows.into_iter().map(AssistantResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "detail": format!("Database error: {e}"),
        })),
    }
}
