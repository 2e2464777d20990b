use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::db::employers as employer_db;
use crate::models::TelegramIdentity;
use crate::models::employers::{EmployerIn, EmployerResponse};

/// POST /api/employer — create or overwrite the caller's clinic profile.
pub async fn upsert_employer(
    db: web::Data<DatabaseConnection>,
    body: web::Json<EmployerIn>,
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

    match employer_db::upsert(db.get_ref(), &payload.identity(), fields).await {
        Ok(stored) => HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "id": stored.id,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "detail": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/employer?tg_id=..&tg_username=.. — the caller's own profile,
/// `null` when nothing is stored for that identity yet.
pub async fn get_my_employer(
    db: web::Data<DatabaseConnection>,
    query: web::Query<TelegramIdentity>,
) -> impl Responder {
    let identity = query.into_inner();
    match employer_db::find_by_identity(db.get_ref(), &identity).await {
        Ok(found) => HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "employer": found.map(EmployerResponse::from),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "detail": format!("Database error: {e}"),
        })),
    }
}
