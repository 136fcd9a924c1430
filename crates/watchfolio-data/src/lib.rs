//! 시장 데이터 접근.
//!
//! 이 crate는 다음을 제공합니다:
//! - `MarketDataSource` 트레이트와 Yahoo Finance / 메모리 구현
//! - 타임아웃, 정규화, 티커별 캐시를 담당하는 `MarketDataAccessor`
//!
//! 조회 결과가 빈 `PriceSeries`이면 "종목 없음"이며 에러가 아닙니다.

pub mod accessor;
pub mod error;
pub mod provider;

pub use accessor::{AccessorConfig, MarketDataAccessor};
pub use error::{DataError, Result};
pub use provider::{InMemorySource, MarketDataSource, YahooSource};
