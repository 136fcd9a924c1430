//! 종목 시세 조회.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use watchfolio_core::PriceSeries;
use watchfolio_data::{MarketDataAccessor, MarketDataSource};

/// 최근 종가 목록.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub ticker: String,
    /// 전체 일봉 수
    pub days: usize,
    /// 최근 종가 (날짜 오름차순)
    pub recent: Vec<(NaiveDate, f64)>,
}

impl Quote {
    /// 시계열의 마지막 `last`개 종가. 빈 시계열이면 `None`.
    pub fn from_series(series: &PriceSeries, last: usize) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        let skip = series.len().saturating_sub(last);
        Some(Self {
            ticker: series.ticker().to_string(),
            days: series.len(),
            recent: series.closes().skip(skip).collect(),
        })
    }
}

/// 종목의 최근 종가를 조회합니다. 알 수 없는 종목이면 `None`.
pub async fn quote_ticker<S: MarketDataSource>(
    accessor: &MarketDataAccessor<S>,
    ticker: &str,
    last: usize,
) -> Result<Option<Quote>> {
    let series = accessor
        .fetch(ticker)
        .await
        .with_context(|| format!("Failed to fetch {}", ticker))?;
    Ok(Quote::from_series(&series, last))
}
