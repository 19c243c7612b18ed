/// 메인 배너 광고
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::query::{self, queries};
use crate::storage::{remove_images_best_effort, Bucket, ImageRemoval, ObjectStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Model
// 광고 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ad {
    pub id: Uuid,
    pub title: Option<String>,
    pub image_url: String,
    pub link: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 광고 생성/수정 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub order_index: Option<i32>,
}

/// 검증을 통과한 광고 입력
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAd {
    pub title: Option<String>,
    pub image_url: String,
    pub link: Option<String>,
    pub order_index: i32,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AdInput {
    /// 노출 순서와 이미지는 필수
    pub fn validated(self) -> AppResult<ValidAd> {
        let order_index = self
            .order_index
            .ok_or_else(|| AppError::Validation("노출 순서를 입력해 주세요.".to_string()))?;
        let image_url = non_empty(self.image_url)
            .ok_or_else(|| AppError::Validation("이미지를 선택해 주세요.".to_string()))?;

        Ok(ValidAd {
            title: non_empty(self.title),
            image_url,
            link: non_empty(self.link),
            order_index,
        })
    }
}

// endregion: --- Model

// region:    --- Commands
/// 광고 생성
pub async fn create_ad(db_manager: &DatabaseManager, input: AdInput) -> AppResult<Ad> {
    let ad = input.validated()?;
    info!("{:<12} --> 광고 생성 order: {}", "Command", ad.order_index);
    let created = sqlx::query_as::<_, Ad>(queries::INSERT_AD)
        .bind(ad.title)
        .bind(ad.image_url)
        .bind(ad.link)
        .bind(ad.order_index)
        .fetch_one(db_manager.pool())
        .await?;
    Ok(created)
}

/// 광고 수정, 이미지가 바뀌면 이전 이미지는 삭제 시도
pub async fn update_ad(
    db_manager: &DatabaseManager,
    storage: &dyn ObjectStore,
    ad_id: Uuid,
    input: AdInput,
) -> AppResult<Ad> {
    let ad = input.validated()?;
    info!("{:<12} --> 광고 수정 id: {}", "Command", ad_id);
    let previous = query::handlers::get_ad(db_manager, ad_id)
        .await?
        .ok_or_else(|| not_found(ad_id))?;

    let updated = sqlx::query_as::<_, Ad>(queries::UPDATE_AD)
        .bind(ad_id)
        .bind(ad.title)
        .bind(ad.image_url)
        .bind(ad.link)
        .bind(ad.order_index)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or_else(|| not_found(ad_id))?;

    if previous.image_url != updated.image_url {
        remove_images_best_effort(storage, Bucket::AdsImages, &[previous.image_url]).await;
    }
    Ok(updated)
}

/// 광고 삭제 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdDeleteReport {
    pub ad_id: Uuid,
    pub image: ImageRemoval,
}

/// 광고 삭제: 이미지 삭제(실패 무시) 후 행 삭제
pub async fn delete_ad(
    db_manager: &DatabaseManager,
    storage: &dyn ObjectStore,
    ad_id: Uuid,
) -> AppResult<AdDeleteReport> {
    info!("{:<12} --> 광고 삭제 id: {}", "Command", ad_id);
    let ad = query::handlers::get_ad(db_manager, ad_id)
        .await?
        .ok_or_else(|| not_found(ad_id))?;

    let image = remove_images_best_effort(storage, Bucket::AdsImages, &[ad.image_url]).await;
    if !image.is_clean() {
        warn!(
            "{:<12} --> 광고 {} 이미지 삭제 실패, 행 삭제는 계속 진행",
            "Command", ad_id
        );
    }

    let result = sqlx::query(queries::DELETE_AD)
        .bind(ad_id)
        .execute(db_manager.pool())
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found(ad_id));
    }

    Ok(AdDeleteReport { ad_id, image })
}

fn not_found(ad_id: Uuid) -> AppError {
    AppError::NotFound(format!("광고를 찾을 수 없습니다: {}", ad_id))
}

// endregion: --- Commands

// endregion: --- Tests
