/// 환경 변수 기반 서비스 설정
// region:    --- Imports
use crate::error::{AppError, AppResult};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

// endregion: --- Imports

// region:    --- Config
/// 세션 유효 시간 상한 (1년)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// 오브젝트 스토리지 백엔드 설정
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// 로컬 디스크 (`/media` 경로로 서빙)
    Disk {
        location: PathBuf,
        public_base_url: String,
    },
    /// 호스팅 스토리지 REST API
    Http { base_url: String, service_key: String },
}

/// 부트스트랩 관리자 계정
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub storage: StorageConfig,
    /// `x-admin-secret` 헤더와 비교하는 값, 없으면 해당 엔드포인트는 항상 거부
    pub admin_api_secret: Option<String>,
    pub session_ttl_hours: i64,
    /// 설정되지 않으면 정리 작업은 관리자가 수동으로 실행한다
    pub cleanup_interval_secs: Option<u64>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn load() -> AppResult<Self> {
        let port: u16 = try_load("PORT", "3000")?;

        let database_url = required("DATABASE_URL")?;
        let max_connections = try_load("DATABASE_MAX_CONNECTIONS", "5")?;

        let storage = match optional("STORAGE_BACKEND").as_deref() {
            None | Some("disk") => StorageConfig::Disk {
                location: PathBuf::from(
                    optional("STORAGE_DIR").unwrap_or_else(|| "./data/storage".to_string()),
                ),
                public_base_url: optional("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| format!("http://localhost:{}", port)),
            },
            Some("http") => StorageConfig::Http {
                base_url: required("STORAGE_URL")?,
                service_key: required("STORAGE_SERVICE_KEY")?,
            },
            Some(other) => {
                return Err(AppError::Config(format!(
                    "알 수 없는 STORAGE_BACKEND 값: {}",
                    other
                )))
            }
        };

        let cleanup_interval_secs = match optional("CLEANUP_INTERVAL_SECS") {
            Some(raw) => Some(parse("CLEANUP_INTERVAL_SECS", &raw)?),
            None => None,
        };

        let bootstrap_admin = match (
            optional("ADMIN_BOOTSTRAP_EMAIL"),
            optional("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            _ => None,
        };

        Ok(Self {
            port,
            database_url,
            max_connections,
            storage,
            admin_api_secret: optional("ADMIN_API_SECRET"),
            session_ttl_hours: session_ttl(try_load("SESSION_TTL_HOURS", "168")?)?,
            cleanup_interval_secs,
            bootstrap_admin,
        })
    }
}

/// 비어 있지 않은 환경 변수 값
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &str) -> AppResult<String> {
    optional(key).ok_or_else(|| AppError::Config(format!("{} 환경 변수가 필요합니다.", key)))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        info!("{:<12} --> {} 미설정, 기본값 사용: {}", "Config", key, default);
        default.to_string()
    });
    parse(key, &raw)
}

/// 1시간 이상, 상한 이하만 허용
fn session_ttl(hours: i64) -> AppResult<i64> {
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        return Err(AppError::Config(format!(
            "SESSION_TTL_HOURS 는 1 ~ {} 사이여야 합니다: {}",
            MAX_SESSION_TTL_HOURS, hours
        )));
    }
    Ok(hours)
}

fn parse<T: FromStr>(key: &str, raw: &str) -> AppResult<T>
where
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| AppError::Config(format!("{} 값이 올바르지 않습니다: {}", key, e)))
}

// endregion: --- Config

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports_key() {
        let err = parse::<u16>("PORT", "abc").unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert_eq!(parse::<u64>("CLEANUP_INTERVAL_SECS", "60").unwrap(), 60);
    }

    #[test]
    fn test_session_ttl_is_bounded() {
        assert_eq!(session_ttl(168).unwrap(), 168);
        assert!(matches!(session_ttl(0), Err(AppError::Config(_))));
        assert!(matches!(session_ttl(i64::MAX), Err(AppError::Config(_))));
        assert!(session_ttl(MAX_SESSION_TTL_HOURS).is_ok());
    }
}
// endregion: --- Tests
