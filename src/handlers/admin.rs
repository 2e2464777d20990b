use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::db::{assistants as assistant_db, employers as employer_db};
use crate::models::assistants::AssistantResponse;
use crate::models::employers::EmployerResponse;

/// The only identity allowed on the admin endpoints. The service has no
/// roles, tokens or sessions; this byte-for-byte username comparison is
/// the whole authorization model.
pub const PRIVILEGED_USERNAME: &str = "@assistfinder_admin";

/// Bulk reads are capped like the public listing, just higher.
const ADMIN_LIST_CAP: u64 = 800;

/// Which profile table an admin call targets, parsed from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Assistant,
    Employer,
}

impl ProfileKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "assistant" => Some(Self::Assistant),
            "employer" => Some(Self::Employer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminQuery {
    pub tg_username: Option<String>,
}

/// 403 unless the caller is exactly the privileged username.
pub fn require_privileged(tg_username: Option<&str>) -> Result<(), HttpResponse> {
    if tg_username == Some(PRIVILEGED_USERNAME) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "detail": "Доступ только для администратора.",
        })))
    }
}

fn unknown_kind(raw: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "detail": format!("Неизвестный тип профиля: {raw}"),
    }))
}

fn db_error(e: sea_orm::DbErr) -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "detail": format!("Database error: {e}"),
    }))
}

/// GET /api/admin/{kind}?tg_username=@... — unfiltered newest-first read
/// of one profile table.
pub async fn list_profiles(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
    query: web::Query<AdminQuery>,
) -> impl Responder {
    if let Err(forbidden) = require_privileged(query.tg_username.as_deref()) {
        return forbidden;
    }
    let Some(kind) = ProfileKind::parse(&path) else {
        return unknown_kind(&path);
    };

    match kind {
        ProfileKind::Assistant => {
            match assistant_db::list_all(db.get_ref(), ADMIN_LIST_CAP).await {
                Ok(rows) => {
                    let response: Vec<AssistantResponse> =
                        rows.into_iter().map(AssistantResponse::from).collect();
                    HttpResponse::Ok().json(response)
                }
                Err(e) => db_error(e),
            }
        }
        ProfileKind::Employer => {
            match employer_db::list_all(db.get_ref(), ADMIN_LIST_CAP).await {
                Ok(rows) => {
                    let response: Vec<EmployerResponse> =
                        rows.into_iter().map(EmployerResponse::from).collect();
                    HttpResponse::Ok().json(response)
                }
                Err(e) => db_error(e),
            }
        }
    }
}

/// DELETE /api/admin/{kind}/{id}?tg_username=@... — permanent removal,
/// no soft-delete and no cascade.
pub async fn delete_profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(String, i64)>,
    query: web::Query<AdminQuery>,
) -> impl Responder {
    if let Err(forbidden) = require_privileged(query.tg_username.as_deref()) {
        return forbidden;
    }
    let (kind_raw, id) = path.into_inner();
    let Some(kind) = ProfileKind::parse(&kind_raw) else {
        return unknown_kind(&kind_raw);
    };

    let result = match kind {
        ProfileKind::Assistant => assistant_db::delete_by_id(db.get_ref(), id).await,
        ProfileKind::Employer => employer_db::delete_by_id(db.get_ref(), id).await,
    };

    match result {
        Ok(deleted) if deleted.rows_affected > 0 => {
            tracing::info!(id, kind = %kind_raw, "profile deleted by admin");
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "detail": format!("Профиль {id} не найден."),
        })),
        Err(e) => db_error(e),
    }
}
