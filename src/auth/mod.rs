/// 관리자 인증
///
/// 로그인 시 발급한 세션 토큰을 `Authorization: Bearer` 헤더로 받아
/// 요청마다 명시적인 `AdminSession` 값으로 핸들러에 전달한다.
// region:    --- Imports
pub mod password;

use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::query::queries;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use chrono::{DateTime, Duration, Utc};
use password::{hash_password, verify_password, PasswordChange};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Models
// 관리자 계정
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// 인증된 관리자 세션
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminSession {
    #[serde(skip_serializing)]
    pub token: String,
    pub admin_id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// 로그인 요청
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn ensure_present(&self) -> AppResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "이메일과 비밀번호를 모두 입력해 주세요.".to_string(),
            ));
        }
        Ok(())
    }
}

/// 로그인 결과
#[derive(Debug, Clone, Serialize)]
pub struct SignIn {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

// endregion: --- Models

// region:    --- Session Extractor
/// Authorization 헤더에서 Bearer 토큰 추출
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Authentication("로그인이 필요합니다.".to_string()))?;

        get_session(&state.db_manager, &token, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::Authentication("세션이 만료되었거나 유효하지 않습니다.".to_string())
            })
    }
}

// endregion: --- Session Extractor

// region:    --- Operations
/// 이메일/비밀번호 확인, 불일치면 None
pub async fn verify_credentials(
    db_manager: &DatabaseManager,
    credentials: &Credentials,
) -> AppResult<Option<AdminUser>> {
    let admin = sqlx::query_as::<_, AdminUser>(queries::GET_ADMIN_BY_EMAIL)
        .bind(credentials.email.trim())
        .fetch_optional(db_manager.pool())
        .await?;

    Ok(admin.filter(|admin| verify_password(&credentials.password, &admin.password_hash)))
}

/// 로그인: 세션 토큰 발급
pub async fn sign_in(
    db_manager: &DatabaseManager,
    credentials: &Credentials,
    ttl_hours: i64,
    now: DateTime<Utc>,
) -> AppResult<SignIn> {
    credentials.ensure_present()?;
    info!("{:<12} --> 로그인 시도: {}", "Auth", credentials.email);

    let admin = verify_credentials(db_manager, credentials)
        .await?
        .ok_or_else(|| {
            warn!("{:<12} --> 로그인 실패: {}", "Auth", credentials.email);
            AppError::Authentication("이메일 또는 비밀번호가 올바르지 않습니다.".to_string())
        })?;

    purge_expired_sessions(db_manager, now).await?;

    let token = generate_session_token();
    let expires_at = now + Duration::hours(ttl_hours);
    sqlx::query(queries::INSERT_SESSION)
        .bind(&token)
        .bind(admin.id)
        .bind(now)
        .bind(expires_at)
        .execute(db_manager.pool())
        .await?;

    info!("{:<12} --> 로그인 성공: {}", "Auth", admin.email);
    Ok(SignIn {
        token,
        email: admin.email,
        expires_at,
    })
}

/// 유효한 세션 조회
pub async fn get_session(
    db_manager: &DatabaseManager,
    token: &str,
    now: DateTime<Utc>,
) -> AppResult<Option<AdminSession>> {
    let session = sqlx::query_as::<_, AdminSession>(queries::GET_SESSION)
        .bind(token)
        .bind(now)
        .fetch_optional(db_manager.pool())
        .await?;
    Ok(session)
}

/// 로그아웃
pub async fn sign_out(db_manager: &DatabaseManager, session: &AdminSession) -> AppResult<()> {
    info!("{:<12} --> 로그아웃: {}", "Auth", session.email);
    sqlx::query(queries::DELETE_SESSION)
        .bind(&session.token)
        .execute(db_manager.pool())
        .await?;
    Ok(())
}

/// 비밀번호 변경, 현재 세션 외 다른 세션은 종료
pub async fn update_password(
    db_manager: &DatabaseManager,
    session: &AdminSession,
    change: &PasswordChange,
) -> AppResult<()> {
    change.validate()?;
    info!("{:<12} --> 비밀번호 변경: {}", "Auth", session.email);

    let admin = sqlx::query_as::<_, AdminUser>(queries::GET_ADMIN_BY_ID)
        .bind(session.admin_id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or_else(|| AppError::Authentication("관리자 계정을 찾을 수 없습니다.".to_string()))?;

    if !verify_password(&change.current_password, &admin.password_hash) {
        return Err(AppError::Validation(
            "현재 비밀번호가 올바르지 않습니다.".to_string(),
        ));
    }

    let new_hash = hash_password(&change.new_password)?;
    let admin_id = admin.id;
    let token = session.token.clone();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(queries::UPDATE_ADMIN_PASSWORD)
                    .bind(admin_id)
                    .bind(new_hash)
                    .execute(&mut **tx)
                    .await?;
                sqlx::query(queries::DELETE_OTHER_SESSIONS)
                    .bind(admin_id)
                    .bind(token)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, AppError>(())
            })
        })
        .await
}

/// 없으면 관리자 계정 생성, 생성했으면 true
pub async fn ensure_admin(
    db_manager: &DatabaseManager,
    email: &str,
    password: &str,
) -> AppResult<bool> {
    let hash = hash_password(password)?;
    let created = sqlx::query_scalar::<_, Uuid>(queries::INSERT_ADMIN)
        .bind(email.trim())
        .bind(hash)
        .fetch_optional(db_manager.pool())
        .await?;
    Ok(created.is_some())
}

/// 만료된 세션 삭제
pub async fn purge_expired_sessions(
    db_manager: &DatabaseManager,
    now: DateTime<Utc>,
) -> AppResult<u64> {
    let result = sqlx::query(queries::DELETE_EXPIRED_SESSIONS)
        .bind(now)
        .execute(db_manager.pool())
        .await?;
    Ok(result.rows_affected())
}

fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

// endregion: --- Operations

// endregion: --- Tests
