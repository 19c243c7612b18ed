/// 랭크 부스트 상품
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::query::queries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// 랭크 부스트 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankBoost {
    pub id: Uuid,
    pub title: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankBoostInput {
    pub title: String,
    #[serde(default)]
    pub price: i64,
}

impl RankBoostInput {
    pub fn validated(mut self) -> AppResult<Self> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(AppError::Validation("제목을 입력해 주세요.".to_string()));
        }
        if self.price < 0 {
            return Err(AppError::Validation(
                "가격은 0 이상이어야 합니다.".to_string(),
            ));
        }
        Ok(self)
    }
}

/// 랭크 부스트 생성
pub async fn create_rank_boost(
    db_manager: &DatabaseManager,
    input: RankBoostInput,
) -> AppResult<RankBoost> {
    let input = input.validated()?;
    info!("{:<12} --> 랭크 부스트 생성: {}", "Command", input.title);
    let created = sqlx::query_as::<_, RankBoost>(queries::INSERT_RANK_BOOST)
        .bind(&input.title)
        .bind(input.price)
        .fetch_one(db_manager.pool())
        .await?;
    Ok(created)
}

/// 랭크 부스트 수정
pub async fn update_rank_boost(
    db_manager: &DatabaseManager,
    boost_id: Uuid,
    input: RankBoostInput,
) -> AppResult<RankBoost> {
    let input = input.validated()?;
    info!("{:<12} --> 랭크 부스트 수정 id: {}", "Command", boost_id);
    sqlx::query_as::<_, RankBoost>(queries::UPDATE_RANK_BOOST)
        .bind(boost_id)
        .bind(&input.title)
        .bind(input.price)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or_else(|| not_found(boost_id))
}

/// 랭크 부스트 삭제
pub async fn delete_rank_boost(db_manager: &DatabaseManager, boost_id: Uuid) -> AppResult<()> {
    info!("{:<12} --> 랭크 부스트 삭제 id: {}", "Command", boost_id);
    let result = sqlx::query(queries::DELETE_RANK_BOOST)
        .bind(boost_id)
        .execute(db_manager.pool())
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found(boost_id));
    }
    Ok(())
}

fn not_found(boost_id: Uuid) -> AppError {
    AppError::NotFound(format!("랭크 부스트를 찾을 수 없습니다: {}", boost_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_boost_input() {
        let ok = RankBoostInput {
            title: " Epic → Legend ".to_string(),
            price: 25000,
        }
        .validated()
        .unwrap();
        assert_eq!(ok.title, "Epic → Legend");

        let negative = RankBoostInput {
            title: "x".to_string(),
            price: -5,
        };
        assert!(negative.validated().is_err());
    }
}
