/// 로컬 디스크 오브젝트 스토리지
use super::{Bucket, ObjectStore};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// `{base}/{bucket}/{key}` 에 저장하고 `{public_base_url}/media/{bucket}/{key}` 로 노출
#[derive(Clone)]
pub struct DiskObjectStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl DiskObjectStore {
    pub fn new(base_path: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn object_path(&self, bucket: Bucket, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(AppError::Validation(format!(
                "잘못된 오브젝트 키입니다: {}",
                key
            )));
        }
        Ok(self.base_path.join(bucket.name()).join(key))
    }
}

#[async_trait]
impl ObjectStore for DiskObjectStore {
    async fn upload(
        &self,
        bucket: Bucket,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("버킷 디렉터리 생성 실패: {}", e))
            })?;
        }

        // create_new: 같은 키 덮어쓰기 금지
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| AppError::Storage(format!("{} 저장 실패: {}", key, e)))?;
        file.write_all(&data)
            .await
            .map_err(|e| AppError::Storage(format!("{} 저장 실패: {}", key, e)))?;
        file.flush()
            .await
            .map_err(|e| AppError::Storage(format!("{} 저장 실패: {}", key, e)))?;
        Ok(())
    }

    async fn remove(&self, bucket: Bucket, key: &str) -> AppResult<()> {
        let path = self.object_path(bucket, key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("{} 삭제 실패: {}", key, e))),
        }
    }

    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/media/{}/{}", self.public_base_url, bucket.name(), key)
    }
}
