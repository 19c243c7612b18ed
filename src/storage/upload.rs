/// 이미지 업로드 검증 및 이미지 목록 편집
// region:    --- Imports
use super::{Bucket, ObjectStore};
use crate::error::{AppError, AppResult};
use chrono::Utc;
use rand::Rng;
use tracing::info;

// endregion: --- Imports

// region:    --- Image File
/// 이미지 최대 크기 (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// 업로드된 파일
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// MIME 타입이 image/ 로 시작하고 5MB 이하인지 검사
    pub fn validate(&self) -> AppResult<()> {
        if !self.content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "{} 파일은 이미지가 아닙니다.",
                self.file_name
            )));
        }
        if self.data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::Validation(format!(
                "{} 파일이 너무 큽니다 (최대 5MB).",
                self.file_name
            )));
        }
        Ok(())
    }

    /// 원본 파일명의 확장자
    pub fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
                ext
            }
            _ => "bin",
        }
    }
}

/// 충돌 방지용 오브젝트 키: `{밀리초}-{랜덤 36진수}.{확장자}`
pub fn generate_object_key(file: &ImageFile) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = to_base36(rand::thread_rng().gen::<u64>());
    format!("{}-{}.{}", millis, suffix, file.extension().to_ascii_lowercase())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

// endregion: --- Image File

// region:    --- Upload
/// 모든 파일을 먼저 검증한 뒤 순서대로 업로드하고 공개 URL 목록을 돌려준다.
/// 하나라도 검증에 실패하면 아무것도 올리지 않는다.
pub async fn upload_images(
    storage: &dyn ObjectStore,
    bucket: Bucket,
    files: Vec<ImageFile>,
) -> AppResult<Vec<String>> {
    if files.is_empty() {
        return Err(AppError::Validation(
            "업로드할 이미지를 선택해 주세요.".to_string(),
        ));
    }
    for file in &files {
        file.validate()?;
    }

    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let key = generate_object_key(&file);
        storage
            .upload(bucket, &key, file.data, &file.content_type)
            .await?;
        urls.push(storage.public_url(bucket, &key));
    }

    info!(
        "{:<12} --> 이미지 {}개 업로드 ({})",
        "Upload",
        urls.len(),
        bucket.name()
    );
    Ok(urls)
}

// endregion: --- Upload

// region:    --- Image List
/// index 위치의 이미지를 교체
pub fn replace_at(images: &[String], index: usize, url: String) -> AppResult<Vec<String>> {
    ensure_index(images, index)?;
    let mut next = images.to_vec();
    next[index] = url;
    Ok(next)
}

/// index 위치의 이미지를 목록에서 제거 (스토리지 오브젝트는 그대로)
pub fn remove_at(images: &[String], index: usize) -> AppResult<Vec<String>> {
    ensure_index(images, index)?;
    let mut next = images.to_vec();
    next.remove(index);
    Ok(next)
}

pub fn ensure_index(images: &[String], index: usize) -> AppResult<()> {
    if index >= images.len() {
        return Err(AppError::Validation(format!(
            "이미지 위치가 올바르지 않습니다: {}",
            index
        )));
    }
    Ok(())
}

// endregion: --- Image List

// endregion: --- Tests
