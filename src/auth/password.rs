/// 관리자 비밀번호 해시 (Argon2)
use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::Deserialize;

/// 최소 비밀번호 길이
pub const MIN_PASSWORD_LEN: usize = 6;

/// 랜덤 솔트로 PHC 문자열 생성
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("비밀번호 해시 실패: {}", e)))
}

/// 저장된 해시와 비교, 해시 형식이 잘못되면 false
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// 비밀번호 변경 요청
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChange {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> AppResult<()> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AppError::Validation(
                "모든 항목을 입력해 주세요.".to_string(),
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(AppError::Validation(
                "새 비밀번호가 일치하지 않습니다.".to_string(),
            ));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "비밀번호는 최소 {}자 이상이어야 합니다.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_password() {
        let hash = hash_password("correct_password").unwrap();
        assert!(verify_password("correct_password", &hash));
        assert!(!verify_password("wrong_password", &hash));
        assert!(!verify_password("correct_password", "not-a-phc-string"));
    }

    #[test]
    fn test_password_change_rules() {
        let change = |current: &str, new: &str, confirm: &str| PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        };
        assert!(change("old", "secret1", "secret1").validate().is_ok());
        assert!(change("", "secret1", "secret1").validate().is_err());
        assert!(change("old", "secret1", "secret2").validate().is_err());
        assert!(change("old", "abc", "abc").validate().is_err());
    }
}
