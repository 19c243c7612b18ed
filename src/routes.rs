// region:    --- Imports
use crate::config::StorageConfig;
use crate::handlers::{admin, legacy, storefront};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

// endregion: --- Imports

/// 업로드를 위해 바디 사이즈 20MB 허용
const BODY_LIMIT_BYTES: usize = 1024 * 1024 * 20;

// region:    --- Router
pub fn build_router(state: AppState) -> Router {
    // 관리자 페이지 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(storefront_routes())
        .merge(admin_routes())
        .merge(legacy_routes());

    // 디스크 스토리지는 업로드된 파일을 직접 서빙
    if let StorageConfig::Disk { location, .. } = &state.config.storage {
        router = router.nest_service("/media", ServeDir::new(location));
    }

    router
        .layer(cors)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(storefront::handle_get_home))
        .route("/accounts", get(storefront::handle_get_accounts))
        .route("/accounts/search", get(storefront::handle_search_accounts))
        .route("/accounts/:id", get(storefront::handle_get_account))
        .route("/ads", get(storefront::handle_get_ads))
        .route("/rank-boosts", get(storefront::handle_get_rank_boosts))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin::handle_login))
        .route("/admin/logout", post(admin::handle_logout))
        .route("/admin/session", get(admin::handle_get_session))
        .route("/admin/password", put(admin::handle_update_password))
        .route(
            "/admin/accounts",
            get(admin::handle_list_accounts).post(admin::handle_create_account),
        )
        .route("/admin/accounts/cleanup", post(admin::handle_cleanup_expired))
        .route(
            "/admin/accounts/:id",
            put(admin::handle_update_account).delete(admin::handle_delete_account_now),
        )
        .route(
            "/admin/accounts/:id/mark-deleted",
            post(admin::handle_mark_for_deletion),
        )
        .route(
            "/admin/accounts/:id/restore",
            post(admin::handle_restore_account),
        )
        .route(
            "/admin/accounts/:id/images",
            post(admin::handle_append_images),
        )
        .route(
            "/admin/accounts/:id/images/:index",
            put(admin::handle_replace_image).delete(admin::handle_remove_image),
        )
        .route("/admin/uploads/:bucket", post(admin::handle_upload))
        .route(
            "/admin/ads",
            get(admin::handle_list_ads).post(admin::handle_create_ad),
        )
        .route(
            "/admin/ads/:id",
            put(admin::handle_update_ad).delete(admin::handle_delete_ad),
        )
        .route(
            "/admin/rank-boosts",
            get(admin::handle_list_rank_boosts).post(admin::handle_create_rank_boost),
        )
        .route(
            "/admin/rank-boosts/:id",
            put(admin::handle_update_rank_boost).delete(admin::handle_delete_rank_boost),
        )
}

fn legacy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin-login", post(legacy::handle_admin_login))
        .route("/api/admin/accounts", post(legacy::handle_insert_account))
}

// endregion: --- Router
