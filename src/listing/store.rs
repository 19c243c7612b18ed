// region:    --- Imports
use super::model::{Account, AccountInput, DeletionMarks, ExpiredAccount};
use crate::error::AppResult;
use crate::query::queries;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Account Store Trait
/// 계정 판매글 저장소 트레이트
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Option<Account>>;

    async fn insert(&self, input: &AccountInput, now: DateTime<Utc>) -> AppResult<Account>;

    /// 삭제 대기 중이거나 없는 계정이면 None
    async fn update(
        &self,
        id: Uuid,
        input: &AccountInput,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>>;

    /// 삭제 대기 중이거나 없는 계정이면 None
    async fn set_images(
        &self,
        id: Uuid,
        images: &[String],
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>>;

    async fn set_deletion_marks(
        &self,
        id: Uuid,
        marks: DeletionMarks,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>>;

    /// 삭제된 행이 있으면 true
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// deleted_at < cutoff 인 계정
    async fn find_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ExpiredAccount>>;

    /// 여전히 deleted_at < cutoff 이면 삭제하고 이미지 목록을 돌려준다
    async fn delete_if_expired(
        &self,
        id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Vec<String>>>;
}

// endregion: --- Account Store Trait

// region:    --- Postgres Account Store
/// PostgreSQL 구현체
pub struct PostgresAccountStore {
    pool: Arc<PgPool>,
}

impl PostgresAccountStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(queries::GET_ACCOUNT)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(account)
    }

    async fn insert(&self, input: &AccountInput, now: DateTime<Utc>) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(queries::INSERT_ACCOUNT)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.skins)
            .bind(input.collector_level.as_deref())
            .bind(input.category.as_str())
            .bind(&input.images)
            .bind(now)
            .fetch_one(&*self.pool)
            .await?;
        info!("{:<12} --> 계정 저장 id: {}", "Store", account.id);
        Ok(account)
    }

    async fn update(
        &self,
        id: Uuid,
        input: &AccountInput,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(queries::UPDATE_ACCOUNT)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.skins)
            .bind(input.collector_level.as_deref())
            .bind(input.category.as_str())
            .bind(&input.images)
            .bind(now)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(account)
    }

    async fn set_images(
        &self,
        id: Uuid,
        images: &[String],
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(queries::UPDATE_ACCOUNT_IMAGES)
            .bind(id)
            .bind(images)
            .bind(now)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(account)
    }

    async fn set_deletion_marks(
        &self,
        id: Uuid,
        marks: DeletionMarks,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(queries::UPDATE_DELETION_MARKS)
            .bind(id)
            .bind(marks.is_sold)
            .bind(marks.sold_at)
            .bind(marks.deleted_at)
            .bind(now)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(queries::DELETE_ACCOUNT)
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ExpiredAccount>> {
        let rows = sqlx::query_as::<_, ExpiredAccount>(queries::GET_EXPIRED_ACCOUNTS)
            .bind(cutoff)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_if_expired(
        &self,
        id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Vec<String>>> {
        let images = sqlx::query_scalar::<_, Vec<String>>(queries::DELETE_ACCOUNT_IF_EXPIRED)
            .bind(id)
            .bind(cutoff)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(images)
    }
}

// endregion: --- Postgres Account Store
