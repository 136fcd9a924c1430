//! 데이터 Provider 모듈.
//!
//! - `YahooSource`: Yahoo Finance 전체 기간 일봉
//! - `InMemorySource`: 고정 데이터 (테스트, 오프라인 재현)

pub mod memory;
pub mod yahoo;

use async_trait::async_trait;
use watchfolio_core::RawBar;

use crate::error::Result;

pub use memory::InMemorySource;
pub use yahoo::YahooSource;

/// 과거 가격 데이터 소스.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// 소스 이름 (로그용).
    fn name(&self) -> &str;

    /// 티커의 가능한 모든 일봉을 조회합니다.
    ///
    /// 알 수 없는 티커는 `Ok(vec![])`를 반환합니다.
    /// 정렬이나 중복 제거는 보장하지 않습니다.
    async fn fetch_history(&self, ticker: &str) -> Result<Vec<RawBar>>;
}
