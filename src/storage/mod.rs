/// 오브젝트 스토리지
///
/// 이미지 파일을 버킷 단위로 저장한다.
/// 호스팅 스토리지(REST)와 로컬 디스크 백엔드를 지원한다.
// region:    --- Imports
pub mod disk;
pub mod http;
pub mod upload;

pub use disk::DiskObjectStore;
pub use http::HttpObjectStore;

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Bucket
/// 스토리지 버킷
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "accounts-images")]
    AccountsImages,
    #[serde(rename = "ads-images")]
    AdsImages,
}

impl Bucket {
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::AccountsImages => "accounts-images",
            Bucket::AdsImages => "ads-images",
        }
    }

    pub fn from_name(name: &str) -> AppResult<Self> {
        match name {
            "accounts-images" => Ok(Bucket::AccountsImages),
            "ads-images" => Ok(Bucket::AdsImages),
            other => Err(AppError::NotFound(format!(
                "존재하지 않는 버킷입니다: {}",
                other
            ))),
        }
    }
}

// endregion: --- Bucket

// region:    --- Object Store Trait
/// 오브젝트 스토리지 트레이트
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 오브젝트 업로드 (같은 키가 있으면 실패)
    async fn upload(
        &self,
        bucket: Bucket,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()>;

    /// 오브젝트 삭제
    async fn remove(&self, bucket: Bucket, key: &str) -> AppResult<()>;

    /// 공개 URL
    fn public_url(&self, bucket: Bucket, key: &str) -> String;
}

// endregion: --- Object Store Trait

// region:    --- Best-effort Removal
/// 이미지 한 건의 삭제 실패
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageFailure {
    pub key: String,
    pub reason: String,
}

/// 이미지 일괄 삭제 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageRemoval {
    pub removed: Vec<String>,
    pub failures: Vec<ImageFailure>,
}

impl ImageRemoval {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 공개 URL 에서 오브젝트 키 추출 (마지막 경로 조각)
pub fn object_key_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// URL 목록에 해당하는 오브젝트를 하나씩 삭제한다.
/// 실패는 기록만 하고 나머지 파일 처리를 계속한다.
pub async fn remove_images_best_effort(
    storage: &dyn ObjectStore,
    bucket: Bucket,
    urls: &[String],
) -> ImageRemoval {
    let mut result = ImageRemoval::default();

    for key in urls.iter().filter_map(|url| object_key_from_url(url)) {
        match storage.remove(bucket, &key).await {
            Ok(()) => result.removed.push(key),
            Err(e) => {
                warn!(
                    "{:<12} --> 이미지 삭제 실패 {}/{}: {}",
                    "Storage",
                    bucket.name(),
                    key,
                    e
                );
                result.failures.push(ImageFailure {
                    key,
                    reason: e.to_string(),
                });
            }
        }
    }

    if !result.removed.is_empty() {
        info!(
            "{:<12} --> 이미지 {}개 삭제 ({})",
            "Storage",
            result.removed_count(),
            bucket.name()
        );
    }
    result
}

// endregion: --- Best-effort Removal

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_from_url() {
        assert_eq!(
            object_key_from_url(
                "https://x.example.co/storage/v1/object/public/accounts-images/17-abc.png"
            ),
            Some("17-abc.png".to_string())
        );
        assert_eq!(
            object_key_from_url("http://localhost:3000/media/ads-images/a.jpg?v=2"),
            Some("a.jpg".to_string())
        );
        assert_eq!(object_key_from_url("plain.webp"), Some("plain.webp".to_string()));
        assert_eq!(object_key_from_url("https://x.example.co/dir/"), None);
        assert_eq!(object_key_from_url(""), None);
    }

    #[test]
    fn test_bucket_names() {
        assert_eq!(
            Bucket::from_name("ads-images").unwrap(),
            Bucket::AdsImages
        );
        assert_eq!(Bucket::AccountsImages.name(), "accounts-images");
        assert!(Bucket::from_name("other").is_err());
    }
}
// endregion: --- Tests
