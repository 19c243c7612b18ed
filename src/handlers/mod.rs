pub mod admin;
pub mod legacy;
pub mod storefront;

use crate::error::{AppError, AppResult};
use crate::storage::upload::ImageFile;
use axum::extract::Multipart;

/// multipart 요청에서 파일 필드를 모두 읽는다
pub async fn read_image_files(mut multipart: Multipart) -> AppResult<Vec<ImageFile>> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("잘못된 업로드 요청입니다: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("파일을 읽을 수 없습니다: {}", e)))?;
        files.push(ImageFile::new(file_name, content_type, data.to_vec()));
    }
    Ok(files)
}
