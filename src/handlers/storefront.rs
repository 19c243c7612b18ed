// region:    --- Imports
use crate::error::{AppError, AppResult};
use crate::listing::Category;
use crate::query::handlers::{self as queries, AccountFilter};
use crate::query::PageRequest;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

/// 홈 화면 최신 계정 수
const HOME_ACCOUNT_LIMIT: i64 = 6;
/// 검색 기본 결과 수
const DEFAULT_SEARCH_LIMIT: i64 = 8;
const MAX_SEARCH_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct AccountListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub category: Option<String>,
    pub collector_level: Option<String>,
}

/// 빈 값과 "all" 은 필터 없음
fn filter_value(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "all")
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

// region:    --- Query Handlers

/// 홈 화면: 노출 광고 + 모바일 레전드 최신 계정
pub async fn handle_get_home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 홈 화면 조회", "HandlerQuery");
    let ads = queries::get_active_ads(&state.db_manager).await?;
    let accounts =
        queries::get_latest_accounts(&state.db_manager, Category::MobileLegend, HOME_ACCOUNT_LIMIT)
            .await?;
    Ok(Json(serde_json::json!({
        "ads": ads,
        "accounts": accounts,
    })))
}

/// 계정 목록 (카테고리 / 컬렉터 레벨 필터)
pub async fn handle_get_accounts(
    State(state): State<AppState>,
    Query(params): Query<AccountListParams>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 계정 목록 조회: {:?}", "HandlerQuery", params);
    let request = PageRequest {
        page: params.page,
        page_size: params.page_size,
    };
    let category = filter_value(params.category)
        .map(|name| Category::from_name(&name))
        .transpose()?;
    let filter = AccountFilter {
        category,
        collector_level: filter_value(params.collector_level),
    };
    let page = queries::get_accounts_page(&state.db_manager, request, filter).await?;
    Ok(Json(page))
}

/// 제목 검색 (판매 중인 계정만)
pub async fn handle_search_accounts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let keyword = params.q.unwrap_or_default();
    let keyword = keyword.trim();
    info!("{:<12} --> 계정 검색: {}", "HandlerQuery", keyword);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let accounts = if keyword.is_empty() {
        Vec::new()
    } else {
        queries::search_accounts(&state.db_manager, keyword, limit).await?
    };
    Ok(Json(accounts))
}

/// 계정 상세
pub async fn handle_get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 계정 상세 조회 id: {}", "HandlerQuery", account_id);
    let account = queries::get_account(&state.db_manager, account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", account_id)))?;
    Ok(Json(account))
}

/// 노출 광고 목록
pub async fn handle_get_ads(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 광고 목록 조회", "HandlerQuery");
    Ok(Json(queries::get_active_ads(&state.db_manager).await?))
}

/// 랭크 부스트 목록
pub async fn handle_get_rank_boosts(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 랭크 부스트 목록 조회", "HandlerQuery");
    Ok(Json(queries::get_all_rank_boosts(&state.db_manager).await?))
}

// endregion: --- Query Handlers
