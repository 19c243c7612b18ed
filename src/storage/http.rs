/// 호스팅 스토리지 REST 백엔드
///
/// `POST|DELETE {base}/storage/v1/object/{bucket}/{key}` 형태의 API를 사용한다.
use super::{Bucket, ObjectStore};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn object_url(&self, bucket: Bucket, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket.name(),
            key
        )
    }

    /// 실패 응답 본문을 에러 메시지로 변환
    async fn ensure_success(response: reqwest::Response, action: &str) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Storage(format!(
            "{} 실패 ({}): {}",
            action, status, body
        )))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(
        &self,
        bucket: Bucket,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        debug!("{:<12} --> 업로드 {}/{}", "Storage", bucket.name(), key);
        let response = self
            .client
            .post(self.object_url(bucket, key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("content-type", content_type)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Self::ensure_success(response, "업로드").await
    }

    async fn remove(&self, bucket: Bucket, key: &str) -> AppResult<()> {
        debug!("{:<12} --> 삭제 {}/{}", "Storage", bucket.name(), key);
        let response = self
            .client
            .delete(self.object_url(bucket, key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Self::ensure_success(response, "삭제").await
    }

    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket.name(),
            key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let store = HttpObjectStore::new("https://proj.example.co/", "key");
        assert_eq!(
            store.object_url(Bucket::AccountsImages, "1-a.png"),
            "https://proj.example.co/storage/v1/object/accounts-images/1-a.png"
        );
        assert_eq!(
            store.public_url(Bucket::AdsImages, "b.jpg"),
            "https://proj.example.co/storage/v1/object/public/ads-images/b.jpg"
        );
    }
}
