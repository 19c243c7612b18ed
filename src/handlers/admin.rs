// region:    --- Imports
use super::read_image_files;
use crate::ads::{self, AdInput};
use crate::auth::{self, password::PasswordChange, AdminSession, Credentials};
use crate::boost::{self, RankBoostInput};
use crate::error::{AppError, AppResult};
use crate::listing::commands;
use crate::listing::{Account, AccountInput, AccountUpdate, ListingState, RemainingTime};
use crate::query::handlers::{self as queries, AccountFilter};
use crate::query::PageRequest;
use crate::state::AppState;
use crate::storage::upload::upload_images;
use crate::storage::Bucket;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Session Handlers

/// 관리자 로그인
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    let sign_in = auth::sign_in(
        &state.db_manager,
        &credentials,
        state.config.session_ttl_hours,
        Utc::now(),
    )
    .await?;
    Ok(Json(sign_in))
}

/// 관리자 로그아웃
pub async fn handle_logout(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<impl IntoResponse> {
    auth::sign_out(&state.db_manager, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 현재 세션 조회
pub async fn handle_get_session(session: AdminSession) -> impl IntoResponse {
    Json(session)
}

/// 비밀번호 변경
pub async fn handle_update_password(
    State(state): State<AppState>,
    session: AdminSession,
    Json(change): Json<PasswordChange>,
) -> AppResult<impl IntoResponse> {
    auth::update_password(&state.db_manager, &session, &change).await?;
    Ok(Json(serde_json::json!({
        "message": "비밀번호가 변경되었습니다."
    })))
}

// endregion: --- Session Handlers

// region:    --- Account Handlers

/// 관리자 화면용 계정 (상태, 남은 유예 시간 포함)
#[derive(Debug, Serialize)]
pub struct AdminAccountView {
    #[serde(flatten)]
    pub account: Account,
    pub state: ListingState,
    pub remaining: Option<RemainingTime>,
}

impl AdminAccountView {
    pub fn new(account: Account, now: DateTime<Utc>) -> Self {
        Self {
            state: account.state(),
            remaining: account.remaining(now),
            account,
        }
    }
}

/// 계정 목록 (최신순)
pub async fn handle_list_accounts(
    State(state): State<AppState>,
    session: AdminSession,
    Query(request): Query<PageRequest>,
) -> AppResult<impl IntoResponse> {
    info!(
        "{:<12} --> 관리자 계정 목록 조회 by {}",
        "HandlerAdmin", session.email
    );
    let now = Utc::now();
    let page =
        queries::get_accounts_page(&state.db_manager, request, AccountFilter::default()).await?;
    Ok(Json(page.map(|account| AdminAccountView::new(account, now))))
}

/// 계정 생성
pub async fn handle_create_account(
    State(state): State<AppState>,
    session: AdminSession,
    Json(input): Json<AccountInput>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 계정 생성 by {}", "HandlerAdmin", session.email);
    let account = commands::create_account(&state.account_store(), input, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// 계정 수정
pub async fn handle_update_account(
    State(state): State<AppState>,
    session: AdminSession,
    Path(account_id): Path<Uuid>,
    Json(update): Json<AccountUpdate>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 계정 수정 by {}", "HandlerAdmin", session.email);
    let account = commands::update_account(
        &state.account_store(),
        state.storage.as_ref(),
        account_id,
        update,
        Utc::now(),
    )
    .await?;
    Ok(Json(account))
}

/// 삭제 표시 (24시간 유예)
pub async fn handle_mark_for_deletion(
    State(state): State<AppState>,
    session: AdminSession,
    Path(account_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 삭제 표시 by {}", "HandlerAdmin", session.email);
    let now = Utc::now();
    let account = commands::mark_for_deletion(&state.account_store(), account_id, now).await?;
    Ok(Json(AdminAccountView::new(account, now)))
}

/// 복구
pub async fn handle_restore_account(
    State(state): State<AppState>,
    session: AdminSession,
    Path(account_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 계정 복구 by {}", "HandlerAdmin", session.email);
    let now = Utc::now();
    let account = commands::restore(&state.account_store(), account_id, now).await?;
    Ok(Json(AdminAccountView::new(account, now)))
}

/// 즉시 영구 삭제
pub async fn handle_delete_account_now(
    State(state): State<AppState>,
    session: AdminSession,
    Path(account_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 즉시 삭제 by {}", "HandlerAdmin", session.email);
    let report =
        commands::delete_now(&state.account_store(), state.storage.as_ref(), account_id).await?;
    Ok(Json(report))
}

/// 만료 계정 정리
pub async fn handle_cleanup_expired(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 만료 정리 by {}", "HandlerAdmin", session.email);
    let summary =
        commands::cleanup_expired(&state.account_store(), state.storage.as_ref(), Utc::now())
            .await?;
    Ok(Json(serde_json::json!({
        "accounts_purged": summary.accounts_purged(),
        "images_removed": summary.images_removed(),
        "failures": summary.failures(),
        "summary": summary,
    })))
}

/// 이미지 추가
pub async fn handle_append_images(
    State(state): State<AppState>,
    session: AdminSession,
    Path(account_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 이미지 추가 by {}", "HandlerAdmin", session.email);
    let files = read_image_files(multipart).await?;
    let account = commands::append_images(
        &state.account_store(),
        state.storage.as_ref(),
        account_id,
        files,
        Utc::now(),
    )
    .await?;
    Ok(Json(account))
}

/// 이미지 교체
pub async fn handle_replace_image(
    State(state): State<AppState>,
    session: AdminSession,
    Path((account_id, index)): Path<(Uuid, usize)>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 이미지 교체 by {}", "HandlerAdmin", session.email);
    let file = read_image_files(multipart)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("교체할 이미지를 선택해 주세요.".to_string()))?;
    let account = commands::replace_image(
        &state.account_store(),
        state.storage.as_ref(),
        account_id,
        index,
        file,
        Utc::now(),
    )
    .await?;
    Ok(Json(account))
}

/// 이미지 제거
pub async fn handle_remove_image(
    State(state): State<AppState>,
    session: AdminSession,
    Path((account_id, index)): Path<(Uuid, usize)>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 이미지 제거 by {}", "HandlerAdmin", session.email);
    let account = commands::remove_image(
        &state.account_store(),
        state.storage.as_ref(),
        account_id,
        index,
        Utc::now(),
    )
    .await?;
    Ok(Json(account))
}

/// 버킷에 이미지 업로드 후 공개 URL 반환
pub async fn handle_upload(
    State(state): State<AppState>,
    session: AdminSession,
    Path(bucket): Path<String>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let bucket = Bucket::from_name(&bucket)?;
    info!(
        "{:<12} --> 업로드 {} by {}",
        "HandlerAdmin",
        bucket.name(),
        session.email
    );
    let files = read_image_files(multipart).await?;
    let urls = upload_images(state.storage.as_ref(), bucket, files).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "urls": urls }))))
}

// endregion: --- Account Handlers

// region:    --- Ad Handlers

/// 전체 광고 목록
pub async fn handle_list_ads(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<impl IntoResponse> {
    Ok(Json(queries::get_all_ads(&state.db_manager).await?))
}

pub async fn handle_create_ad(
    State(state): State<AppState>,
    session: AdminSession,
    Json(input): Json<AdInput>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 광고 생성 by {}", "HandlerAdmin", session.email);
    let ad = ads::create_ad(&state.db_manager, input).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

pub async fn handle_update_ad(
    State(state): State<AppState>,
    session: AdminSession,
    Path(ad_id): Path<Uuid>,
    Json(input): Json<AdInput>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 광고 수정 by {}", "HandlerAdmin", session.email);
    let ad = ads::update_ad(&state.db_manager, state.storage.as_ref(), ad_id, input).await?;
    Ok(Json(ad))
}

pub async fn handle_delete_ad(
    State(state): State<AppState>,
    session: AdminSession,
    Path(ad_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 광고 삭제 by {}", "HandlerAdmin", session.email);
    let report = ads::delete_ad(&state.db_manager, state.storage.as_ref(), ad_id).await?;
    Ok(Json(report))
}

// endregion: --- Ad Handlers

// region:    --- Rank Boost Handlers

pub async fn handle_list_rank_boosts(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(request): Query<PageRequest>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(
        queries::get_rank_boosts_page(&state.db_manager, request).await?,
    ))
}

pub async fn handle_create_rank_boost(
    State(state): State<AppState>,
    session: AdminSession,
    Json(input): Json<RankBoostInput>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 랭크 부스트 생성 by {}", "HandlerAdmin", session.email);
    let boost = boost::create_rank_boost(&state.db_manager, input).await?;
    Ok((StatusCode::CREATED, Json(boost)))
}

pub async fn handle_update_rank_boost(
    State(state): State<AppState>,
    session: AdminSession,
    Path(boost_id): Path<Uuid>,
    Json(input): Json<RankBoostInput>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 랭크 부스트 수정 by {}", "HandlerAdmin", session.email);
    let boost = boost::update_rank_boost(&state.db_manager, boost_id, input).await?;
    Ok(Json(boost))
}

pub async fn handle_delete_rank_boost(
    State(state): State<AppState>,
    session: AdminSession,
    Path(boost_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 랭크 부스트 삭제 by {}", "HandlerAdmin", session.email);
    boost::delete_rank_boost(&state.db_manager, boost_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Rank Boost Handlers
