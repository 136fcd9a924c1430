//! 분석 엔진 오류 타입.

use thiserror::Error;

/// 분석 오류.
///
/// 엔진은 재시도하지 않으며 모든 오류는 호출자의 입력 문제입니다.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    /// 포트폴리오 종목에 비중이 지정되지 않음
    #[error("No weight assigned for {0}")]
    MissingWeight(String),

    /// 포트폴리오 종목의 가격 시계열이 전달되지 않음
    #[error("No price series supplied for {0}")]
    MissingPrices(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
