//! 시장 데이터 접근자.
//!
//! 데이터 소스 호출에 타임아웃을 걸고, 원시 봉을 날짜 단위 `PriceSeries`로
//! 정규화하며, 선택적으로 티커별 결과를 메모리에 캐시합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use watchfolio_data::{AccessorConfig, MarketDataAccessor, YahooSource};
//!
//! let accessor = MarketDataAccessor::new(YahooSource::new()?, AccessorConfig::default());
//! let series = accessor.fetch("MSFT").await?;
//! if series.is_empty() {
//!     println!("Ticker not found");
//! }
//! ```

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use watchfolio_core::{normalize_ticker, DataConfig, PriceSeries};

use crate::error::{DataError, Result};
use crate::provider::MarketDataSource;

/// 접근자 설정.
#[derive(Debug, Clone)]
pub struct AccessorConfig {
    /// 티커당 조회 타임아웃
    pub fetch_timeout: Duration,
    /// `fetch_many` 동시 조회 수
    pub max_concurrent_fetches: usize,
    /// 티커별 캐시 사용 여부
    pub cache_enabled: bool,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self::from(&DataConfig::default())
    }
}

impl From<&DataConfig> for AccessorConfig {
    fn from(config: &DataConfig) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            max_concurrent_fetches: config.max_concurrent_fetches.max(1),
            cache_enabled: config.cache_enabled,
        }
    }
}

/// 시장 데이터 접근자.
pub struct MarketDataAccessor<S> {
    source: S,
    config: AccessorConfig,
    cache: RwLock<HashMap<String, PriceSeries>>,
}

impl<S: MarketDataSource> MarketDataAccessor<S> {
    pub fn new(source: S, config: AccessorConfig) -> Self {
        Self {
            source,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 티커의 전체 일봉 가격 시계열을 조회합니다.
    ///
    /// 알 수 없는 티커는 빈 시계열을 반환합니다. 빈 결과는 캐시하지 않습니다.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn fetch(&self, ticker: &str) -> Result<PriceSeries> {
        let ticker = normalize_ticker(ticker);
        if ticker.is_empty() {
            return Err(DataError::InvalidRequest("empty ticker".to_string()));
        }

        if self.config.cache_enabled {
            if let Some(series) = self.cache.read().await.get(&ticker) {
                debug!(ticker = %ticker, "캐시에서 가격 조회");
                return Ok(series.clone());
            }
        }

        let raw = tokio::time::timeout(self.config.fetch_timeout, self.source.fetch_history(&ticker))
            .await
            .map_err(|_| DataError::Timeout {
                ticker: ticker.clone(),
                secs: self.config.fetch_timeout.as_secs(),
            })??;

        let series = PriceSeries::from_raw(ticker.clone(), &raw);

        if series.is_empty() {
            warn!(ticker = %ticker, "Ticker not found");
            return Ok(series);
        }

        info!(
            ticker = %ticker,
            raw = raw.len(),
            days = series.len(),
            first = ?series.first_date(),
            "가격 시계열 조회 완료"
        );

        if self.config.cache_enabled {
            self.cache.write().await.insert(ticker, series.clone());
        }

        Ok(series)
    }

    /// 여러 티커를 동시에 조회합니다.
    ///
    /// 결과는 입력 순서를 따르며, 티커별 실패는 서로 독립적으로 보고됩니다.
    pub async fn fetch_many(&self, tickers: &[String]) -> Vec<(String, Result<PriceSeries>)> {
        stream::iter(tickers.iter().cloned())
            .map(|ticker| async move {
                let result = self.fetch(&ticker).await;
                (ticker, result)
            })
            .buffered(self.config.max_concurrent_fetches)
            .collect()
            .await
    }

    /// 캐시를 비웁니다.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    pub async fn cached_tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.cache.read().await.keys().cloned().collect();
        tickers.sort();
        tickers
    }
}
