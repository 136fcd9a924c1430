//! 가격 및 수익률 시계열.
//!
//! - `RawBar` - 데이터 소스가 반환한 원시 봉 (타임스탬프 포함, 정렬/중복 보장 없음)
//! - `PriceBar` / `PriceSeries` - 날짜 단위로 정규화된 일봉 시계열
//! - `ReturnSeries` - 날짜별 값 시계열 (수익률, 누적 성장 등)

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 데이터 소스가 반환한 원시 OHLCV 봉.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// 봉 타임스탬프 (UTC)
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// 거래소 현지 시간의 UTC 오프셋 (초)
    #[serde(default)]
    pub utc_offset_secs: i32,
}

impl RawBar {
    /// 종가만 있는 봉을 생성합니다 (UTC 기준).
    pub fn from_close(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
            utc_offset_secs: 0,
        }
    }

    /// 거래소 UTC 오프셋 지정.
    pub fn with_utc_offset(mut self, secs: i32) -> Self {
        self.utc_offset_secs = secs;
        self
    }

    /// 거래소 현지 시간 기준 거래일.
    ///
    /// 오프셋이 범위를 벗어나면 UTC 날짜를 사용합니다.
    pub fn trading_date(&self) -> NaiveDate {
        match FixedOffset::east_opt(self.utc_offset_secs) {
            Some(tz) => self.timestamp.with_timezone(&tz).date_naive(),
            None => self.timestamp.date_naive(),
        }
    }
}

/// 날짜 단위 일봉.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&RawBar> for PriceBar {
    fn from(raw: &RawBar) -> Self {
        Self {
            date: raw.trading_date(),
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        }
    }
}

/// 한 종목의 일봉 가격 시계열.
///
/// 날짜는 유일하며 오름차순입니다. 비어 있는 시계열은 "종목 없음"을 뜻합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// 빈 시계열을 생성합니다.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            bars: Vec::new(),
        }
    }

    /// 원시 봉을 날짜 단위로 정규화합니다.
    ///
    /// 거래소 현지 시간으로 바꿔 시간 성분을 버리고 날짜순으로 정렬한 뒤, 같은 날짜가 여러 번 나오면
    /// 마지막으로 나온 봉을 남깁니다.
    pub fn from_raw(ticker: impl Into<String>, raw: &[RawBar]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, PriceBar> = BTreeMap::new();
        for bar in raw {
            let bar = PriceBar::from(bar);
            by_date.insert(bar.date, bar);
        }

        Self {
            ticker: ticker.into(),
            bars: by_date.into_values().collect(),
        }
    }

    /// (날짜, 종가) 쌍에서 시계열을 생성합니다.
    pub fn from_closes<I>(ticker: impl Into<String>, closes: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut by_date: BTreeMap<NaiveDate, PriceBar> = BTreeMap::new();
        for (date, close) in closes {
            by_date.insert(
                date,
                PriceBar {
                    date,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 0,
                },
            );
        }

        Self {
            ticker: ticker.into(),
            bars: by_date.into_values().collect(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// (날짜, 종가) 순회.
    pub fn closes(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.bars.iter().map(|b| (b.date, b.close))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }
}

/// 날짜순 값 시계열.
///
/// 기간 수익률, 포트폴리오 수익률, 누적 성장 곡선 모두 이 타입으로 표현합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl ReturnSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.values.get(date).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 날짜 오름차순 순회.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.values.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().copied()
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.values.iter().next().map(|(d, v)| (*d, *v))
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.values.iter().next_back().map(|(d, v)| (*d, *v))
    }

    /// 모든 값에 `factor`를 곱한 시계열.
    pub fn scale(&self, factor: f64) -> Self {
        self.values.iter().map(|(d, v)| (*d, v * factor)).collect()
    }

    /// `start` 이후(포함) 날짜만 남긴 시계열.
    pub fn since(&self, start: NaiveDate) -> Self {
        Self {
            values: self.values.range(start..).map(|(d, v)| (*d, *v)).collect(),
        }
    }
}

impl FromIterator<(NaiveDate, f64)> for ReturnSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
