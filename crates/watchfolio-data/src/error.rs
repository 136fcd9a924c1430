//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
///
/// "종목 없음"은 오류가 아니라 빈 시계열로 표현됩니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 소스 연결 불가 또는 조회 실패
    #[error("Data source unavailable ({ticker}): {message}")]
    Unavailable { ticker: String, message: String },

    /// 조회 타임아웃
    #[error("Fetch timed out after {secs}s: {ticker}")]
    Timeout { ticker: String, secs: u64 },

    /// 응답 파싱 오류
    #[error("Parse error ({ticker}): {message}")]
    Parse { ticker: String, message: String },

    /// 잘못된 요청
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl DataError {
    /// 재시도하면 성공할 수 있는 오류인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataError::Unavailable { .. } | DataError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        let timeout = DataError::Timeout {
            ticker: "MSFT".to_string(),
            secs: 30,
        };
        assert!(timeout.is_retryable());

        let parse = DataError::Parse {
            ticker: "MSFT".to_string(),
            message: "bad".to_string(),
        };
        assert!(!parse.is_retryable());
        assert!(!DataError::InvalidRequest("empty".to_string()).is_retryable());
    }
}
