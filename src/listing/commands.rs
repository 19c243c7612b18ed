/// 계정 판매글 커맨드 처리
/// 1. 생성 / 수정
/// 2. 삭제 표시 / 복구
/// 3. 즉시 삭제 / 만료 정리
/// 4. 이미지 추가 / 교체 / 제거
// region:    --- Imports
use super::lifecycle::expiry_cutoff;
use super::model::{Account, AccountInput, AccountUpdate, DeletionMarks};
use super::store::AccountStore;
use crate::error::{AppError, AppResult};
use crate::storage::upload::{self, ImageFile};
use crate::storage::{remove_images_best_effort, Bucket, ImageRemoval, ObjectStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Helpers
fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", id))
}

/// 조회 후 존재 여부 확인
async fn load(store: &impl AccountStore, id: Uuid) -> AppResult<Account> {
    store.get(id).await?.ok_or_else(|| not_found(id))
}

/// 조건부 수정이 적용되지 않았을 때 원인 판별
async fn explain_rejected_edit(store: &impl AccountStore, id: Uuid) -> AppError {
    match store.get(id).await {
        Ok(Some(account)) => match account.ensure_editable() {
            Err(e) => e,
            Ok(()) => AppError::Internal(format!("계정 {} 수정이 적용되지 않았습니다.", id)),
        },
        Ok(None) => not_found(id),
        Err(e) => e,
    }
}

// endregion: --- Helpers

// region:    --- Create / Update
/// 1. 계정 생성
pub async fn create_account(
    store: &impl AccountStore,
    input: AccountInput,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    let input = input.validated()?;
    info!("{:<12} --> 계정 생성: {}", "Command", input.title);
    store.insert(&input, now).await
}

/// 1. 계정 수정 (삭제 대기 중이면 거부)
/// 요청에 없는 category, images 는 저장된 값을 유지한다.
/// 목록에서 빠진 이미지는 저장 후 스토리지에서 삭제한다.
pub async fn update_account(
    store: &impl AccountStore,
    storage: &dyn ObjectStore,
    id: Uuid,
    update: AccountUpdate,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    info!("{:<12} --> 계정 수정 id: {}", "Command", id);
    let before = load(store, id).await?;
    before.ensure_editable()?;
    let input = update.merge_into(&before)?;

    let updated = match store.update(id, &input, now).await? {
        Some(account) => account,
        None => return Err(explain_rejected_edit(store, id).await),
    };
    remove_dropped_images(storage, &before.images, &updated.images).await;
    Ok(updated)
}

// endregion: --- Create / Update

// region:    --- Grace Period Transitions
/// 2. 삭제 표시: 판매 완료 처리 후 24시간 유예
pub async fn mark_for_deletion(
    store: &impl AccountStore,
    id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    info!("{:<12} --> 삭제 표시 id: {}", "Command", id);
    store
        .set_deletion_marks(id, DeletionMarks::pending(now), now)
        .await?
        .ok_or_else(|| not_found(id))
}

/// 2. 복구: 판매/삭제 표시 해제
pub async fn restore(
    store: &impl AccountStore,
    id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    info!("{:<12} --> 계정 복구 id: {}", "Command", id);
    store
        .set_deletion_marks(id, DeletionMarks::cleared(), now)
        .await?
        .ok_or_else(|| not_found(id))
}

// endregion: --- Grace Period Transitions

// region:    --- Purge
/// 즉시 삭제 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeReport {
    pub account_id: Uuid,
    pub images: ImageRemoval,
}

/// 3. 즉시 삭제: 이미지 삭제(실패 무시) 후 행 삭제
pub async fn delete_now(
    store: &impl AccountStore,
    storage: &dyn ObjectStore,
    id: Uuid,
) -> AppResult<PurgeReport> {
    info!("{:<12} --> 즉시 삭제 id: {}", "Command", id);
    let account = load(store, id).await?;

    let images = remove_images_best_effort(storage, Bucket::AccountsImages, &account.images).await;
    if !images.is_clean() {
        warn!(
            "{:<12} --> 계정 {} 이미지 {}개 삭제 실패, 행 삭제는 계속 진행",
            "Command",
            id,
            images.failures.len()
        );
    }

    if !store.delete(id).await? {
        return Err(not_found(id));
    }

    Ok(PurgeReport {
        account_id: id,
        images,
    })
}

/// 정리 대상 한 건의 처리 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurgeStatus {
    /// 행 삭제 완료 (이미지 삭제 실패는 images.failures 에 기록)
    Purged { images: ImageRemoval },
    /// 조회 이후 복구되었거나 이미 삭제되어 건너뜀
    Skipped,
    /// 행 삭제 실패
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeOutcome {
    pub account_id: Uuid,
    #[serde(flatten)]
    pub status: PurgeStatus,
}

/// 만료 정리 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupSummary {
    pub cutoff: DateTime<Utc>,
    pub outcomes: Vec<PurgeOutcome>,
}

impl CleanupSummary {
    pub fn accounts_purged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, PurgeStatus::Purged { .. }))
            .count()
    }

    pub fn images_removed(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                PurgeStatus::Purged { images } => images.removed_count(),
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, PurgeStatus::Failed { .. }))
            .count()
    }
}

/// 3. 만료 정리
///
/// deleted_at 이 now - 24h 보다 이전인 계정을 하나씩 처리한다.
/// 즉시 삭제(이미지 먼저, 행 나중)와 달리 행을 먼저 삭제하고 이미지를 지운다.
/// 행은 여전히 만료 상태일 때만 삭제되므로 조회 이후 복구된 계정은 이미지까지 남는다.
/// 대신 행 삭제 직후 중단되면 스토리지에 고아 오브젝트가 남을 수 있다.
/// 이미지는 파일 단위로 삭제하며, 한 계정의 실패가 나머지 처리를 막지 않는다.
pub async fn cleanup_expired(
    store: &impl AccountStore,
    storage: &dyn ObjectStore,
    now: DateTime<Utc>,
) -> AppResult<CleanupSummary> {
    let cutoff = expiry_cutoff(now);
    let expired = store.find_expired(cutoff).await?;
    info!(
        "{:<12} --> 만료 정리 시작: 대상 {}건 (기준 {})",
        "Cleanup",
        expired.len(),
        cutoff
    );

    let mut outcomes = Vec::with_capacity(expired.len());
    for account in expired {
        let status = match store.delete_if_expired(account.id, cutoff).await {
            Ok(Some(images)) => PurgeStatus::Purged {
                images: remove_images_best_effort(storage, Bucket::AccountsImages, &images).await,
            },
            Ok(None) => {
                info!(
                    "{:<12} --> 계정 {} 은(는) 더 이상 만료 상태가 아님, 건너뜀",
                    "Cleanup", account.id
                );
                PurgeStatus::Skipped
            }
            Err(e) => {
                error!("{:<12} --> 계정 {} 삭제 실패: {}", "Cleanup", account.id, e);
                PurgeStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(PurgeOutcome {
            account_id: account.id,
            status,
        });
    }

    let summary = CleanupSummary { cutoff, outcomes };
    info!(
        "{:<12} --> 만료 정리 완료: 계정 {}건, 이미지 {}개 삭제, 실패 {}건",
        "Cleanup",
        summary.accounts_purged(),
        summary.images_removed(),
        summary.failures()
    );
    Ok(summary)
}

// endregion: --- Purge

// region:    --- Images
/// 4. 이미지 추가
pub async fn append_images(
    store: &impl AccountStore,
    storage: &dyn ObjectStore,
    id: Uuid,
    files: Vec<ImageFile>,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    info!("{:<12} --> 이미지 추가 id: {}", "Command", id);
    let account = load(store, id).await?;
    account.ensure_editable()?;

    let urls = upload::upload_images(storage, Bucket::AccountsImages, files).await?;
    let mut images = account.images;
    images.extend(urls);
    save_images(store, id, &images, now).await
}

/// 4. 이미지 교체
pub async fn replace_image(
    store: &impl AccountStore,
    storage: &dyn ObjectStore,
    id: Uuid,
    index: usize,
    file: ImageFile,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    info!(
        "{:<12} --> 이미지 교체 id: {}, index: {}",
        "Command", id, index
    );
    let account = load(store, id).await?;
    account.ensure_editable()?;
    upload::ensure_index(&account.images, index)?;

    let mut urls = upload::upload_images(storage, Bucket::AccountsImages, vec![file]).await?;
    let url = urls.pop().ok_or_else(|| AppError::Internal("업로드 결과 없음".to_string()))?;
    let images = upload::replace_at(&account.images, index, url)?;
    let updated = save_images(store, id, &images, now).await?;
    remove_dropped_images(storage, &account.images, &updated.images).await;
    Ok(updated)
}

/// 4. 이미지 제거
pub async fn remove_image(
    store: &impl AccountStore,
    storage: &dyn ObjectStore,
    id: Uuid,
    index: usize,
    now: DateTime<Utc>,
) -> AppResult<Account> {
    info!(
        "{:<12} --> 이미지 제거 id: {}, index: {}",
        "Command", id, index
    );
    let account = load(store, id).await?;
    account.ensure_editable()?;

    let images = upload::remove_at(&account.images, index)?;
    let updated = save_images(store, id, &images, now).await?;
    remove_dropped_images(storage, &account.images, &updated.images).await;
    Ok(updated)
}

/// 저장된 목록에서 빠진 이미지 오브젝트 삭제 (실패는 로그만 남김)
async fn remove_dropped_images(storage: &dyn ObjectStore, before: &[String], after: &[String]) {
    let dropped: Vec<String> = before
        .iter()
        .filter(|url| !after.contains(url))
        .cloned()
        .collect();
    if !dropped.is_empty() {
        remove_images_best_effort(storage, Bucket::AccountsImages, &dropped).await;
    }
}

async fn save_images(
    store: &impl AccountStore,
    id: Uuid,
    images: &[String],
    now: DateTime<Utc>,
) -> AppResult<Account> {
    match store.set_images(id, images, now).await? {
        Some(account) => Ok(account),
        None => Err(explain_rejected_edit(store, id).await),
    }
}

// endregion: --- Images
