pub mod admin;
pub mod assistants;
pub mod employers;

use actix_web::web;

/// Candidate-window size for the public listing, read from the
/// environment once at startup and injected as shared app data. The
/// filters in `list_assistants` only narrow this window; they never dig
/// past the cap.
#[derive(Debug, Clone, Copy)]
pub struct ListConfig {
    pub assistants_cap: u64,
}

impl ListConfig {
    pub fn from_env() -> Self {
        let assistants_cap = std::env::var("ASSISTANT_LIST_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200);
        Self { assistants_cap }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Profile routes (identity comes with the mini-app payload) ──
    cfg.service(
        web::resource("/assistant")
            .route(web::get().to(assistants::get_my_assistant))
            .route(web::post().to(assistants::upsert_assistant)),
    );
    cfg.service(
        web::resource("/assistants").route(web::get().to(assistants::list_assistants)),
    );
    cfg.service(
        web::resource("/employer")
            .route(web::get().to(employers::get_my_employer))
            .route(web::post().to(employers::upsert_employer)),
    );

    // ── Admin routes (gated on the one privileged username) ──
    cfg.service(
        web::scope("/admin")
            .route("/{kind}", web::get().to(admin::list_profiles))
            .route("/{kind}/{id}", web::delete().to(admin::delete_profile)),
    );
}
