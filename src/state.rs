use crate::config::{Config, StorageConfig};
use crate::database::DatabaseManager;
use crate::listing::PostgresAccountStore;
use crate::storage::{DiskObjectStore, HttpObjectStore, ObjectStore};
use std::sync::Arc;

/// 라우터 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub db_manager: Arc<DatabaseManager>,
    pub storage: Arc<dyn ObjectStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db_manager: Arc<DatabaseManager>,
        storage: Arc<dyn ObjectStore>,
        config: Config,
    ) -> Self {
        Self {
            db_manager,
            storage,
            config: Arc::new(config),
        }
    }

    /// 요청 단위 계정 저장소
    pub fn account_store(&self) -> PostgresAccountStore {
        PostgresAccountStore::new(self.db_manager.get_pool())
    }
}

/// 설정에 맞는 스토리지 백엔드 생성
pub fn build_storage(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config {
        StorageConfig::Disk {
            location,
            public_base_url,
        } => Arc::new(DiskObjectStore::new(location.clone(), public_base_url.clone())),
        StorageConfig::Http {
            base_url,
            service_key,
        } => Arc::new(HttpObjectStore::new(base_url.clone(), service_key.clone())),
    }
}
