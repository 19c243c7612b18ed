// region:    --- Imports
use super::{queries, Page, PageRequest};
use crate::ads::Ad;
use crate::boost::RankBoost;
use crate::database::DatabaseManager;
use crate::listing::model::{Account, Category};
use sqlx::Error as SqlxError;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Account Queries

/// 계정 목록 필터
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub category: Option<Category>,
    pub collector_level: Option<String>,
}

/// 계정 조회
pub async fn get_account(
    db_manager: &DatabaseManager,
    account_id: Uuid,
) -> Result<Option<Account>, SqlxError> {
    info!("{:<12} --> 계정 조회 id: {}", "Query", account_id);
    sqlx::query_as::<_, Account>(queries::GET_ACCOUNT)
        .bind(account_id)
        .fetch_optional(db_manager.pool())
        .await
}

/// 계정 페이지 조회 (전체 건수 포함)
pub async fn get_accounts_page(
    db_manager: &DatabaseManager,
    request: PageRequest,
    filter: AccountFilter,
) -> Result<Page<Account>, SqlxError> {
    info!(
        "{:<12} --> 계정 페이지 조회 page: {}, size: {}",
        "Query",
        request.page(),
        request.page_size()
    );
    let category = filter.category.map(|c| c.as_str().to_string());
    let level = filter.collector_level;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let items = sqlx::query_as::<_, Account>(queries::GET_ACCOUNTS_PAGE)
                    .bind(request.page_size())
                    .bind(request.offset())
                    .bind(category.as_deref())
                    .bind(level.as_deref())
                    .fetch_all(&mut **tx)
                    .await?;

                let total: i64 = sqlx::query_scalar(queries::COUNT_ACCOUNTS)
                    .bind(category.as_deref())
                    .bind(level.as_deref())
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(Page::new(items, total, request))
            })
        })
        .await
}

/// 카테고리별 최신 계정 조회
pub async fn get_latest_accounts(
    db_manager: &DatabaseManager,
    category: Category,
    limit: i64,
) -> Result<Vec<Account>, SqlxError> {
    info!(
        "{:<12} --> 최신 계정 조회 category: {}",
        "Query",
        category.as_str()
    );
    sqlx::query_as::<_, Account>(queries::GET_LATEST_ACCOUNTS_BY_CATEGORY)
        .bind(category.as_str())
        .bind(limit)
        .fetch_all(db_manager.pool())
        .await
}

/// 제목 검색
pub async fn search_accounts(
    db_manager: &DatabaseManager,
    keyword: &str,
    limit: i64,
) -> Result<Vec<Account>, SqlxError> {
    info!("{:<12} --> 계정 검색: {}", "Query", keyword);
    sqlx::query_as::<_, Account>(queries::SEARCH_ACCOUNTS)
        .bind(like_pattern(keyword))
        .bind(limit)
        .fetch_all(db_manager.pool())
        .await
}

/// ILIKE 부분 일치 패턴 (와일드카드 문자는 이스케이프)
pub fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// endregion: --- Account Queries

// region:    --- Ad Queries

/// 전체 광고 조회
pub async fn get_all_ads(db_manager: &DatabaseManager) -> Result<Vec<Ad>, SqlxError> {
    info!("{:<12} --> 전체 광고 조회", "Query");
    sqlx::query_as::<_, Ad>(queries::GET_ALL_ADS)
        .fetch_all(db_manager.pool())
        .await
}

/// 노출 중인 광고 조회
pub async fn get_active_ads(db_manager: &DatabaseManager) -> Result<Vec<Ad>, SqlxError> {
    info!("{:<12} --> 노출 광고 조회", "Query");
    sqlx::query_as::<_, Ad>(queries::GET_ACTIVE_ADS)
        .fetch_all(db_manager.pool())
        .await
}

pub async fn get_ad(db_manager: &DatabaseManager, ad_id: Uuid) -> Result<Option<Ad>, SqlxError> {
    info!("{:<12} --> 광고 조회 id: {}", "Query", ad_id);
    sqlx::query_as::<_, Ad>(queries::GET_AD)
        .bind(ad_id)
        .fetch_optional(db_manager.pool())
        .await
}

// endregion: --- Ad Queries

// region:    --- Rank Boost Queries

/// 랭크 부스트 전체 조회
pub async fn get_all_rank_boosts(
    db_manager: &DatabaseManager,
) -> Result<Vec<RankBoost>, SqlxError> {
    info!("{:<12} --> 랭크 부스트 조회", "Query");
    sqlx::query_as::<_, RankBoost>(queries::GET_ALL_RANK_BOOSTS)
        .fetch_all(db_manager.pool())
        .await
}

/// 랭크 부스트 페이지 조회
pub async fn get_rank_boosts_page(
    db_manager: &DatabaseManager,
    request: PageRequest,
) -> Result<Page<RankBoost>, SqlxError> {
    info!(
        "{:<12} --> 랭크 부스트 페이지 조회 page: {}",
        "Query",
        request.page()
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let items = sqlx::query_as::<_, RankBoost>(queries::GET_RANK_BOOSTS_PAGE)
                    .bind(request.page_size())
                    .bind(request.offset())
                    .fetch_all(&mut **tx)
                    .await?;

                let total: i64 = sqlx::query_scalar(queries::COUNT_RANK_BOOSTS)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(Page::new(items, total, request))
            })
        })
        .await
}

// endregion: --- Rank Boost Queries
