/// 서비스 공통 에러 타입
// region:    --- Imports
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

// endregion: --- Imports

// region:    --- App Error
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 오류
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),

    /// 오브젝트 스토리지 오류
    #[error("스토리지 오류: {0}")]
    Storage(String),

    /// 입력값 검증 실패
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// 현재 상태에서 허용되지 않는 요청
    #[error("{0}")]
    Conflict(String),

    /// 인증 실패
    #[error("{0}")]
    Authentication(String),

    /// 설정 오류
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("내부 오류: {0}")]
    Internal(String),
}

impl AppError {
    /// 클라이언트에 내려가는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Validation(_) => "INVALID_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Authentication(_) => "UNAUTHORIZED",
            AppError::Config(_) => "MISCONFIGURED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// AppError -> HTTP 응답 변환
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 내부 오류는 상세 내용을 숨기고 로그로만 남긴다
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:<12} --> 요청 처리 실패: {}", "Error", self);
            "서버 내부 오류가 발생했습니다.".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": self.code(),
            })),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// endregion: --- App Error

// endregion: --- Tests
