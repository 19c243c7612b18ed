/// 삭제 유예 기간 규칙
/// 1. 상태 판별 (활성 / 삭제 대기)
/// 2. 남은 시간 계산
/// 3. 정리 기준 시각
// region:    --- Imports
use super::model::Account;
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

// endregion: --- Imports

// region:    --- Grace Period
/// 삭제 유예 기간 (24시간)
pub const GRACE_PERIOD_HOURS: i64 = 24;

pub fn grace_period() -> Duration {
    Duration::hours(GRACE_PERIOD_HOURS)
}

/// 판매글 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    Active,
    PendingDeletion,
}

impl Account {
    pub fn state(&self) -> ListingState {
        match self.deleted_at {
            Some(_) => ListingState::PendingDeletion,
            None => ListingState::Active,
        }
    }

    /// 삭제 대기 중이면 남은 유예 시간
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<RemainingTime> {
        self.deleted_at.map(|deleted_at| remaining_time(deleted_at, now))
    }

    /// 삭제 대기 중인 판매글은 수정 불가
    pub fn ensure_editable(&self) -> AppResult<()> {
        if self.deleted_at.is_some() {
            return Err(AppError::Conflict(
                "삭제 대기 중인 계정은 수정할 수 없습니다.".to_string(),
            ));
        }
        Ok(())
    }
}

/// 영구 삭제까지 남은 시간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingTime {
    pub hours: i64,
    pub minutes: i64,
}

/// deleted_at + 24h - now, 음수면 0시간 0분
pub fn remaining_time(deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> RemainingTime {
    let left_ms = (deleted_at + grace_period() - now).num_milliseconds();
    if left_ms <= 0 {
        return RemainingTime {
            hours: 0,
            minutes: 0,
        };
    }

    const HOUR_MS: i64 = 60 * 60 * 1000;
    const MINUTE_MS: i64 = 60 * 1000;
    RemainingTime {
        hours: left_ms / HOUR_MS,
        minutes: (left_ms % HOUR_MS) / MINUTE_MS,
    }
}

/// 이 시각보다 엄격히 이전에 삭제 표시된 판매글이 정리 대상
pub fn expiry_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - grace_period()
}

pub fn is_expired(deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    deleted_at < expiry_cutoff(now)
}

// endregion: --- Grace Period

// endregion: --- Tests
