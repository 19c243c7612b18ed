/// 이전 관리자 페이지가 호출하던 엔드포인트
/// 세션을 만들지 않으며 응답 형식도 `{ok, ...}` 를 유지한다.
// region:    --- Imports
use crate::auth::{self, Credentials};
use crate::error::AppError;
use crate::listing::{commands, AccountInput};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

// endregion: --- Imports

const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

#[derive(Debug, Deserialize)]
pub struct LegacyAccountRequest {
    pub account: Option<AccountInput>,
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "ok": false, "error": message }))).into_response()
}

fn failure(err: AppError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        return err.into_response();
    }
    reject(status, &err.to_string())
}

/// 이메일/비밀번호 확인만 수행
pub async fn handle_admin_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Response {
    if let Err(e) = credentials.ensure_present() {
        return failure(e);
    }
    info!("{:<12} --> 로그인 확인: {}", "HandlerLegacy", credentials.email);

    match auth::verify_credentials(&state.db_manager, &credentials).await {
        Ok(Some(_)) => Json(json!({ "ok": true })).into_response(),
        Ok(None) => {
            warn!("{:<12} --> 로그인 실패: {}", "HandlerLegacy", credentials.email);
            reject(
                StatusCode::UNAUTHORIZED,
                "이메일 또는 비밀번호가 올바르지 않습니다.",
            )
        }
        Err(e) => failure(e),
    }
}

/// 비밀 헤더 확인 후 계정 등록
pub async fn handle_insert_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LegacyAccountRequest>,
) -> Response {
    let provided = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    let authorized = match (state.config.admin_api_secret.as_deref(), provided) {
        (Some(expected), Some(provided)) => expected == provided,
        _ => false,
    };
    if !authorized {
        warn!("{:<12} --> 관리자 비밀값 불일치", "HandlerLegacy");
        return reject(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let Some(input) = request.account else {
        return reject(StatusCode::BAD_REQUEST, "account 필드가 필요합니다.");
    };

    match commands::create_account(&state.account_store(), input, Utc::now()).await {
        Ok(account) => Json(json!({ "ok": true, "data": account })).into_response(),
        Err(e) => failure(e),
    }
}
