use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 컬렉터 레벨 (표시 순서 그대로)
pub const COLLECTOR_LEVELS: [&str; 7] = [
    "Discount Accounts",
    "Expert collector",
    "Renowned Collector",
    "Exalted Collector",
    "Mega Collector",
    "World Collector",
    "World Collector +",
];

// 계정 판매글 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub skins: i32,
    pub collector_level: Option<String>,
    pub category: String,
    pub images: Vec<String>,
    pub is_sold: bool,
    pub sold_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 게임 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    MobileLegend,
    Pubg,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MobileLegend => "mobile_legend",
            Category::Pubg => "pubg",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::MobileLegend => "Mobile Legend",
            Category::Pubg => "PUBG",
        }
    }

    pub fn from_name(name: &str) -> AppResult<Self> {
        match name {
            "mobile_legend" => Ok(Category::MobileLegend),
            "pubg" => Ok(Category::Pubg),
            other => Err(AppError::Validation(format!(
                "알 수 없는 카테고리입니다: {}",
                other
            ))),
        }
    }
}

/// 계정 생성/수정 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub skins: i32,
    #[serde(default)]
    pub collector_level: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub images: Vec<String>,
}

impl AccountInput {
    /// 입력값 검증 및 정규화
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
        if self.skins < 0 {
            return Err(AppError::Validation(
                "스킨 수는 0 이상이어야 합니다.".to_string(),
            ));
        }

        // 빈 문자열은 미지정으로 취급
        self.collector_level = self
            .collector_level
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty());
        if let Some(level) = &self.collector_level {
            if !COLLECTOR_LEVELS.contains(&level.as_str()) {
                return Err(AppError::Validation(format!(
                    "알 수 없는 컬렉터 레벨입니다: {}",
                    level
                )));
            }
        }

        Ok(self)
    }
}

/// 계정 수정 요청
/// category, images 가 없으면 저장된 값을 유지한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub skins: i32,
    #[serde(default)]
    pub collector_level: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl AccountUpdate {
    /// 저장된 계정에 덮어쓸 전체 입력 생성
    pub fn merge_into(self, current: &Account) -> AppResult<AccountInput> {
        let category = match self.category {
            Some(category) => category,
            None => Category::from_name(&current.category)?,
        };
        AccountInput {
            title: self.title,
            description: self.description,
            price: self.price,
            skins: self.skins,
            collector_level: self.collector_level,
            category,
            images: self.images.unwrap_or_else(|| current.images.clone()),
        }
        .validated()
    }
}

/// 삭제 표시 필드 묶음
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionMarks {
    pub is_sold: bool,
    pub sold_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl DeletionMarks {
    /// 판매 완료 + 삭제 대기
    pub fn pending(now: DateTime<Utc>) -> Self {
        Self {
            is_sold: true,
            sold_at: Some(now),
            deleted_at: Some(now),
        }
    }

    pub fn cleared() -> Self {
        Self {
            is_sold: false,
            sold_at: None,
            deleted_at: None,
        }
    }
}

/// 정리 대상 조회 결과
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ExpiredAccount {
    pub id: Uuid,
    pub images: Vec<String>,
}
