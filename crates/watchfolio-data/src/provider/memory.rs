//! 메모리 기반 데이터 소스.
//!
//! 고정된 봉 데이터를 반환합니다. 테스트와 오프라인 재현에 사용합니다.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use watchfolio_core::RawBar;

use super::MarketDataSource;
use crate::error::{DataError, Result};

/// 메모리 데이터 소스.
#[derive(Default)]
pub struct InMemorySource {
    bars: HashMap<String, Vec<RawBar>>,
    unavailable: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 티커 데이터를 등록합니다.
    pub fn with_bars(mut self, ticker: impl Into<String>, bars: Vec<RawBar>) -> Self {
        self.bars.insert(ticker.into(), bars);
        self
    }

    /// 항상 연결 실패를 반환할 티커를 등록합니다.
    pub fn with_unavailable(mut self, ticker: impl Into<String>) -> Self {
        self.unavailable.insert(ticker.into());
        self
    }

    /// 모든 응답에 지연을 추가합니다.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 지금까지 `fetch_history` 호출 횟수.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_history(&self, ticker: &str) -> Result<Vec<RawBar>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.unavailable.contains(ticker) {
            return Err(DataError::Unavailable {
                ticker: ticker.to_string(),
                message: "source offline".to_string(),
            });
        }

        Ok(self.bars.get(ticker).cloned().unwrap_or_default())
    }
}
