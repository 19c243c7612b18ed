#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use storefront_service::error::{AppError, AppResult};
use storefront_service::listing::model::{DeletionMarks, ExpiredAccount};
use storefront_service::listing::{Account, AccountInput, AccountStore, AccountUpdate, Category};
use storefront_service::storage::upload::ImageFile;
use storefront_service::storage::{Bucket, ObjectStore};
use uuid::Uuid;

/// 트레이싱 초기화 (여러 번 호출해도 안전)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn account_input(title: &str) -> AccountInput {
    AccountInput {
        title: title.to_string(),
        description: "테스트 계정".to_string(),
        price: 10000,
        skins: 0,
        collector_level: None,
        category: Category::MobileLegend,
        images: Vec::new(),
    }
}

/// category, images 없이 보내는 수정 요청
pub fn account_update(title: &str, price: i64) -> AccountUpdate {
    AccountUpdate {
        title: title.to_string(),
        description: "수정된 설명".to_string(),
        price,
        skins: 0,
        collector_level: None,
        category: None,
        images: None,
    }
}

pub fn png(name: &str) -> ImageFile {
    ImageFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

// region:    --- In-memory Account Store
/// 메모리 계정 저장소
#[derive(Default)]
pub struct MemoryAccountStore {
    rows: Mutex<HashMap<Uuid, Account>>,
    /// find_expired 직후 복구할 계정 (정리 도중 복구 재현)
    restore_on_scan: Mutex<Option<Uuid>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, id: Uuid) -> Option<Account> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn restore_during_next_scan(&self, id: Uuid) {
        *self.restore_on_scan.lock().unwrap() = Some(id);
    }
}

fn apply_marks(account: &mut Account, marks: DeletionMarks) {
    account.is_sold = marks.is_sold;
    account.sold_at = marks.sold_at;
    account.deleted_at = marks.deleted_at;
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.snapshot(id))
    }

    async fn insert(&self, input: &AccountInput, now: DateTime<Utc>) -> AppResult<Account> {
        let account = Account {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            description: input.description.clone(),
            price: input.price,
            skins: input.skins,
            collector_level: input.collector_level.clone(),
            category: input.category.as_str().to_string(),
            images: input.images.clone(),
            is_sold: false,
            sold_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(
        &self,
        id: Uuid,
        input: &AccountInput,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(account) = rows.get_mut(&id).filter(|a| a.deleted_at.is_none()) else {
            return Ok(None);
        };
        account.title = input.title.clone();
        account.description = input.description.clone();
        account.price = input.price;
        account.skins = input.skins;
        account.collector_level = input.collector_level.clone();
        account.category = input.category.as_str().to_string();
        account.images = input.images.clone();
        account.updated_at = now;
        Ok(Some(account.clone()))
    }

    async fn set_images(
        &self,
        id: Uuid,
        images: &[String],
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(account) = rows.get_mut(&id).filter(|a| a.deleted_at.is_none()) else {
            return Ok(None);
        };
        account.images = images.to_vec();
        account.updated_at = now;
        Ok(Some(account.clone()))
    }

    async fn set_deletion_marks(
        &self,
        id: Uuid,
        marks: DeletionMarks,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|account| {
            apply_marks(account, marks);
            account.updated_at = now;
            account.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn find_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ExpiredAccount>> {
        let mut rows = self.rows.lock().unwrap();
        let mut expired: Vec<(DateTime<Utc>, ExpiredAccount)> = rows
            .values()
            .filter_map(|a| {
                a.deleted_at.filter(|d| *d < cutoff).map(|d| {
                    (
                        d,
                        ExpiredAccount {
                            id: a.id,
                            images: a.images.clone(),
                        },
                    )
                })
            })
            .collect();
        expired.sort_by_key(|(deleted_at, _)| *deleted_at);

        if let Some(id) = self.restore_on_scan.lock().unwrap().take() {
            if let Some(account) = rows.get_mut(&id) {
                apply_marks(account, DeletionMarks::cleared());
            }
        }

        Ok(expired.into_iter().map(|(_, e)| e).collect())
    }

    async fn delete_if_expired(
        &self,
        id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Vec<String>>> {
        let mut rows = self.rows.lock().unwrap();
        let expired = rows
            .get(&id)
            .and_then(|a| a.deleted_at)
            .is_some_and(|d| d < cutoff);
        if !expired {
            return Ok(None);
        }
        Ok(rows.remove(&id).map(|a| a.images))
    }
}

// endregion: --- In-memory Account Store

// region:    --- In-memory Object Store
/// 메모리 오브젝트 스토리지, 지정한 키는 삭제 실패
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    failing_keys: Mutex<HashSet<String>>,
    uploads: Mutex<usize>,
}

fn object_path(bucket: Bucket, key: &str) -> String {
    format!("{}/{}", bucket.name(), key)
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미 저장된 오브젝트를 넣고 공개 URL 반환
    pub fn seed(&self, bucket: Bucket, key: &str) -> String {
        self.objects
            .lock()
            .unwrap()
            .insert(object_path(bucket, key), vec![1, 2, 3]);
        self.public_url(bucket, key)
    }

    pub fn fail_removal_of(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn contains_url(&self, url: &str) -> bool {
        let path = url.trim_start_matches("https://cdn.test/");
        self.objects.lock().unwrap().contains_key(path)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn upload_count(&self) -> usize {
        *self.uploads.lock().unwrap()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: Bucket,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        *self.uploads.lock().unwrap() += 1;
        self.objects
            .lock()
            .unwrap()
            .insert(object_path(bucket, key), data);
        Ok(())
    }

    async fn remove(&self, bucket: Bucket, key: &str) -> AppResult<()> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(AppError::Storage(format!("remove failed: {}", key)));
        }
        self.objects
            .lock()
            .unwrap()
            .remove(&object_path(bucket, key));
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket.name(), key)
    }
}

// endregion: --- In-memory Object Store
