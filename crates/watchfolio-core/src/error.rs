//! 코어 에러 타입.

use std::path::PathBuf;
use thiserror::Error;

/// 코어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 저장된 포트폴리오 상태 파일이 없음
    #[error("저장된 포트폴리오가 없습니다: {}", .0.display())]
    StateNotFound(PathBuf),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 코어 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_not_found_message() {
        let err = CoreError::StateNotFound(PathBuf::from("portfolio.json"));
        assert!(err.to_string().contains("portfolio.json"));
    }

    #[test]
    fn test_from_serde_error() {
        let err: CoreError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
