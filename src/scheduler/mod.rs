/// 만료 계정 정리 스케줄러
/// CLEANUP_INTERVAL_SECS 가 설정된 경우에만 main 에서 시작한다.
/// 한 번의 실행이 실패해도 다음 주기에 다시 시도한다.
// region:    --- Imports
use crate::listing::commands::cleanup_expired;
use crate::listing::PostgresAccountStore;
use crate::storage::ObjectStore;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Cleanup Scheduler
/// 만료 계정 정리 스케줄러
pub struct CleanupScheduler {
    pool: Arc<PgPool>,
    storage: Arc<dyn ObjectStore>,
    period: Duration,
}

impl CleanupScheduler {
    pub fn new(pool: Arc<PgPool>, storage: Arc<dyn ObjectStore>, period_secs: u64) -> Self {
        Self {
            pool,
            storage,
            period: Duration::from_secs(period_secs.max(1)),
        }
    }

    /// 정리 작업 시작
    pub fn start(&self) -> JoinHandle<()> {
        let store = PostgresAccountStore::new(Arc::clone(&self.pool));
        let storage = Arc::clone(&self.storage);
        let period = self.period;
        info!(
            "{:<12} --> 만료 정리 주기: {}초",
            "Scheduler",
            period.as_secs()
        );
        tokio::spawn(async move {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                match cleanup_expired(&store, storage.as_ref(), Utc::now()).await {
                    Ok(summary) if summary.outcomes.is_empty() => {
                        debug!("{:<12} --> 정리할 계정 없음", "Scheduler");
                    }
                    Ok(summary) => {
                        info!(
                            "{:<12} --> 정리 완료: 계정 {}건, 이미지 {}개, 실패 {}건",
                            "Scheduler",
                            summary.accounts_purged(),
                            summary.images_removed(),
                            summary.failures()
                        );
                    }
                    Err(e) => {
                        error!("{:<12} --> 만료 정리 중 오류 발생: {:?}", "Scheduler", e);
                    }
                }
            }
        })
    }
}
// endregion: --- Cleanup Scheduler
