mod common;

use chrono::Duration;
use common::{
    account_input, account_update, init_tracing, png, t0, MemoryAccountStore, MemoryObjectStore,
};
use storefront_service::error::AppError;
use storefront_service::listing::commands::{self, PurgeStatus};
use storefront_service::listing::{Category, ListingState, RemainingTime};
use storefront_service::storage::upload::{ImageFile, MAX_IMAGE_BYTES};
use storefront_service::storage::Bucket;

/// 생성 -> 삭제 표시 -> 23시간 후 복구 / 25시간 후 정리
#[tokio::test]
async fn test_grace_period_end_to_end() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    // 복구되는 계정
    let kept = commands::create_account(&store, account_input("복구 계정"), start)
        .await
        .unwrap();
    assert_eq!(kept.price, 10000);
    assert_eq!(kept.skins, 0);

    let pending = commands::mark_for_deletion(&store, kept.id, start)
        .await
        .unwrap();
    assert_eq!(pending.state(), ListingState::PendingDeletion);
    assert!(pending.is_sold);
    assert_eq!(pending.sold_at, Some(start));

    let restored = commands::restore(&store, kept.id, start + Duration::hours(23))
        .await
        .unwrap();
    assert_eq!(restored.state(), ListingState::Active);
    assert!(!restored.is_sold);
    assert_eq!(restored.sold_at, None);
    assert_eq!(restored.deleted_at, None);

    // 정리되는 계정 (이미지 2개)
    let doomed = commands::create_account(&store, account_input("삭제 계정"), start)
        .await
        .unwrap();
    let doomed = commands::append_images(
        &store,
        &storage,
        doomed.id,
        vec![png("front.png"), png("back.png")],
        start,
    )
    .await
    .unwrap();
    assert_eq!(doomed.images.len(), 2);
    assert_eq!(storage.object_count(), 2);

    commands::mark_for_deletion(&store, doomed.id, start)
        .await
        .unwrap();

    let summary = commands::cleanup_expired(&store, &storage, start + Duration::hours(25))
        .await
        .unwrap();
    assert_eq!(summary.accounts_purged(), 1);
    assert_eq!(summary.images_removed(), 2);
    assert_eq!(summary.failures(), 0);
    assert_eq!(summary.outcomes[0].account_id, doomed.id);

    assert!(store.snapshot(doomed.id).is_none());
    assert!(store.snapshot(kept.id).is_some());
    assert_eq!(storage.object_count(), 0);
}

#[tokio::test]
async fn test_cleanup_cutoff_is_strict() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let account = commands::create_account(&store, account_input("경계 계정"), start)
        .await
        .unwrap();
    commands::mark_for_deletion(&store, account.id, start)
        .await
        .unwrap();

    // 정확히 24시간: 아직 유예 기간
    let summary = commands::cleanup_expired(&store, &storage, start + Duration::hours(24))
        .await
        .unwrap();
    assert!(summary.outcomes.is_empty());
    assert!(store.snapshot(account.id).is_some());

    let summary = commands::cleanup_expired(
        &store,
        &storage,
        start + Duration::hours(24) + Duration::seconds(1),
    )
    .await
    .unwrap();
    assert_eq!(summary.accounts_purged(), 1);
    assert!(store.snapshot(account.id).is_none());
}

#[tokio::test]
async fn test_restore_during_cleanup_is_skipped() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let url = storage.seed(Bucket::AccountsImages, "kept.png");
    let mut input = account_input("정리 중 복구");
    input.images = vec![url.clone()];
    let account = commands::create_account(&store, input, start).await.unwrap();
    commands::mark_for_deletion(&store, account.id, start)
        .await
        .unwrap();

    store.restore_during_next_scan(account.id);
    let summary = commands::cleanup_expired(&store, &storage, start + Duration::hours(30))
        .await
        .unwrap();

    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.outcomes[0].status, PurgeStatus::Skipped);
    assert_eq!(summary.accounts_purged(), 0);

    let row = store.snapshot(account.id).unwrap();
    assert_eq!(row.state(), ListingState::Active);
    assert!(storage.contains_url(&url));
}

#[tokio::test]
async fn test_edit_refused_while_pending() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let account = commands::create_account(&store, account_input("원래 제목"), start)
        .await
        .unwrap();
    commands::mark_for_deletion(&store, account.id, start)
        .await
        .unwrap();

    let err = commands::update_account(
        &store,
        &storage,
        account.id,
        account_update("바뀐 제목", 20000),
        start + Duration::hours(1),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = commands::append_images(
        &store,
        &storage,
        account.id,
        vec![png("new.png")],
        start + Duration::hours(1),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(storage.upload_count(), 0);

    let row = store.snapshot(account.id).unwrap();
    assert_eq!(row.title, "원래 제목");
    assert!(row.images.is_empty());
    assert_eq!(row.updated_at, start);
}

/// 수정 요청에 없는 category, images 는 그대로 유지
#[tokio::test]
async fn test_update_keeps_omitted_category_and_images() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let url = storage.seed(Bucket::AccountsImages, "pubg.png");
    let mut input = account_input("pubg acct");
    input.category = Category::Pubg;
    input.images = vec![url.clone()];
    let account = commands::create_account(&store, input, start).await.unwrap();

    let updated = commands::update_account(
        &store,
        &storage,
        account.id,
        serde_json::from_str(r#"{"title":"pubg acct","price":12000}"#).unwrap(),
        start + Duration::hours(1),
    )
    .await
    .unwrap();
    assert_eq!(updated.price, 12000);
    assert_eq!(updated.category, "pubg");
    assert_eq!(updated.images, vec![url.clone()]);
    assert_eq!(updated.updated_at, start + Duration::hours(1));
    assert!(storage.contains_url(&url));

    // 명시적으로 비운 목록은 적용되고 빠진 이미지는 삭제된다
    let mut clear = account_update("pubg acct", 12000);
    clear.images = Some(Vec::new());
    clear.category = Some(Category::MobileLegend);
    let cleared = commands::update_account(&store, &storage, account.id, clear, start)
        .await
        .unwrap();
    assert!(cleared.images.is_empty());
    assert_eq!(cleared.category, "mobile_legend");
    assert!(!storage.contains_url(&url));
}

#[tokio::test]
async fn test_rejected_upload_leaves_images_unchanged() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let account = commands::create_account(&store, account_input("업로드 계정"), start)
        .await
        .unwrap();
    let account = commands::append_images(&store, &storage, account.id, vec![png("a.png")], start)
        .await
        .unwrap();
    let before = account.images.clone();

    // 이미지가 아닌 파일이 섞인 배치
    let err = commands::append_images(
        &store,
        &storage,
        account.id,
        vec![
            png("ok.png"),
            ImageFile::new("notes.txt", "text/plain", b"hello".to_vec()),
        ],
        start,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // 5MB 초과
    let err = commands::replace_image(
        &store,
        &storage,
        account.id,
        0,
        ImageFile::new("big.jpg", "image/jpeg", vec![0; MAX_IMAGE_BYTES + 1]),
        start,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(store.snapshot(account.id).unwrap().images, before);
    assert_eq!(storage.upload_count(), 1);
}

#[tokio::test]
async fn test_replace_and_remove_image() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let account = commands::create_account(&store, account_input("이미지 편집"), start)
        .await
        .unwrap();
    let account = commands::append_images(
        &store,
        &storage,
        account.id,
        vec![png("one.png"), png("two.png")],
        start,
    )
    .await
    .unwrap();
    let (first, second) = (account.images[0].clone(), account.images[1].clone());

    let replaced = commands::replace_image(&store, &storage, account.id, 0, png("three.png"), start)
        .await
        .unwrap();
    assert_eq!(replaced.images.len(), 2);
    assert_ne!(replaced.images[0], first);
    assert_eq!(replaced.images[1], second);
    assert!(!storage.contains_url(&first));
    assert!(storage.contains_url(&replaced.images[0]));

    let removed = commands::remove_image(&store, &storage, account.id, 1, start)
        .await
        .unwrap();
    assert_eq!(removed.images, vec![replaced.images[0].clone()]);
    assert!(!storage.contains_url(&second));

    let err = commands::remove_image(&store, &storage, account.id, 5, start)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

/// 한 계정의 이미지 삭제 실패가 다른 계정 정리를 막지 않는다
#[tokio::test]
async fn test_cleanup_continues_after_image_failure() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let broken_url = storage.seed(Bucket::AccountsImages, "broken.png");
    let fine_url = storage.seed(Bucket::AccountsImages, "fine.png");
    let other_url = storage.seed(Bucket::AccountsImages, "other.png");
    storage.fail_removal_of("broken.png");

    let mut first = account_input("첫 번째");
    first.images = vec![broken_url.clone(), fine_url.clone()];
    let first = commands::create_account(&store, first, start).await.unwrap();
    let mut second = account_input("두 번째");
    second.images = vec![other_url.clone()];
    let second = commands::create_account(&store, second, start).await.unwrap();

    commands::mark_for_deletion(&store, first.id, start)
        .await
        .unwrap();
    commands::mark_for_deletion(&store, second.id, start + Duration::minutes(1))
        .await
        .unwrap();

    let summary = commands::cleanup_expired(&store, &storage, start + Duration::hours(48))
        .await
        .unwrap();
    assert_eq!(summary.accounts_purged(), 2);
    assert_eq!(summary.images_removed(), 2);
    assert_eq!(store.len(), 0);

    let first_outcome = summary
        .outcomes
        .iter()
        .find(|o| o.account_id == first.id)
        .unwrap();
    match &first_outcome.status {
        PurgeStatus::Purged { images } => {
            assert_eq!(images.removed, vec!["fine.png".to_string()]);
            assert_eq!(images.failures.len(), 1);
            assert_eq!(images.failures[0].key, "broken.png");
        }
        other => panic!("unexpected status: {:?}", other),
    }

    assert!(storage.contains_url(&broken_url));
    assert!(!storage.contains_url(&fine_url));
    assert!(!storage.contains_url(&other_url));
}

#[tokio::test]
async fn test_delete_now_ignores_image_failures() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let url = storage.seed(Bucket::AccountsImages, "stuck.png");
    storage.fail_removal_of("stuck.png");
    let mut input = account_input("즉시 삭제");
    input.images = vec![url];
    let account = commands::create_account(&store, input, start).await.unwrap();

    let report = commands::delete_now(&store, &storage, account.id)
        .await
        .unwrap();
    assert_eq!(report.account_id, account.id);
    assert!(!report.images.is_clean());
    assert!(store.snapshot(account.id).is_none());

    let err = commands::delete_now(&store, &storage, account.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_restore_after_purge_is_not_found() {
    init_tracing();
    let store = MemoryAccountStore::new();
    let storage = MemoryObjectStore::new();
    let start = t0();

    let account = commands::create_account(&store, account_input("사라진 계정"), start)
        .await
        .unwrap();
    commands::mark_for_deletion(&store, account.id, start)
        .await
        .unwrap();
    commands::cleanup_expired(&store, &storage, start + Duration::hours(25))
        .await
        .unwrap();

    let err = commands::restore(&store, account.id, start + Duration::hours(26))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_remaining_time_for_pending_listing() {
    let store = MemoryAccountStore::new();
    let start = t0();

    let account = commands::create_account(&store, account_input("남은 시간"), start)
        .await
        .unwrap();
    assert_eq!(account.remaining(start), None);

    let pending = commands::mark_for_deletion(&store, account.id, start)
        .await
        .unwrap();
    assert_eq!(
        pending.remaining(start + Duration::minutes(90)),
        Some(RemainingTime {
            hours: 22,
            minutes: 30
        })
    );
    assert_eq!(
        pending.remaining(start + Duration::hours(30)),
        Some(RemainingTime {
            hours: 0,
            minutes: 0
        })
    );
}
