//! Yahoo Finance 과거 데이터 소스.
//!
//! 심볼은 Yahoo Finance 형식 그대로 전달합니다 (예: "MSFT", "SPY", "005930.KS").
//! 조회 범위는 항상 전체 기간(`max`), 간격은 일봉(`1d`)입니다.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::{debug, warn};
use watchfolio_core::RawBar;
use yahoo_finance_api as yahoo;

use super::MarketDataSource;
use crate::error::{DataError, Result};

const INTERVAL: &str = "1d";
const RANGE: &str = "max";

/// Yahoo Finance 데이터 소스.
pub struct YahooSource {
    connector: yahoo::YahooConnector,
}

impl YahooSource {
    /// 새로운 Yahoo Finance 소스 생성.
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new().map_err(|e| DataError::Unavailable {
            ticker: String::new(),
            message: format!("Yahoo Finance 연결 실패: {}", e),
        })?;
        Ok(Self { connector })
    }

    /// Yahoo 일봉을 원시 봉으로 변환합니다. `utc_offset_secs`는 거래소 현지 시간 오프셋입니다.
    fn quote_to_bar(quote: &yahoo::Quote, utc_offset_secs: i32) -> Option<RawBar> {
        let timestamp = Utc.timestamp_opt(quote.timestamp, 0).single()?;
        Some(RawBar {
            timestamp,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            utc_offset_secs,
        })
    }
}

/// Yahoo 오류를 분류합니다. `None`이면 "데이터 없음"(종목 없음)입니다.
fn classify_error(ticker: &str, err: yahoo::YahooError) -> Option<DataError> {
    let message = match err {
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => return None,
        // 404 응답은 FetchFailed("Ticker .. not found")로 전달됨
        yahoo::YahooError::FetchFailed(message) if is_not_found_message(&message) => return None,
        yahoo::YahooError::ApiError(api) => {
            let message = api_error_message(api.code.as_deref(), api.description.as_deref());
            if is_not_found_message(&message) {
                return None;
            }
            message
        }
        other => other.to_string(),
    };

    Some(DataError::Unavailable {
        ticker: ticker.to_string(),
        message,
    })
}

/// Yahoo API 오류 본문 (`{"code": .., "description": ..}`)을 메시지로 합칩니다.
fn api_error_message(code: Option<&str>, description: Option<&str>) -> String {
    format!("{}: {}", code.unwrap_or("unknown"), description.unwrap_or_default())
}

/// 존재하지 않는 심볼에 대한 Yahoo 응답 메시지인지 확인.
fn is_not_found_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("404")
        || lower.contains("not found")
        || lower.contains("no data found")
        || lower.contains("delisted")
}

#[async_trait]
impl MarketDataSource for YahooSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_history(&self, ticker: &str) -> Result<Vec<RawBar>> {
        debug!(ticker = ticker, interval = INTERVAL, range = RANGE, "Yahoo Finance API 호출");

        let response = match self.connector.get_quote_range(ticker, INTERVAL, RANGE).await {
            Ok(response) => response,
            Err(e) => {
                return match classify_error(ticker, e) {
                    None => {
                        warn!(ticker = ticker, "Yahoo Finance: 데이터 없음");
                        Ok(Vec::new())
                    }
                    Some(err) => Err(err),
                };
            }
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) => {
                return match classify_error(ticker, e) {
                    None => Ok(Vec::new()),
                    Some(DataError::Unavailable { ticker, message }) => {
                        Err(DataError::Parse { ticker, message })
                    }
                    Some(err) => Err(err),
                };
            }
        };

        // 메타데이터가 없으면 UTC 날짜 사용
        let utc_offset_secs = response.metadata().map(|m| m.gmtoffset).unwrap_or(0);

        let bars: Vec<RawBar> = quotes
            .iter()
            .filter_map(|q| Self::quote_to_bar(q, utc_offset_secs))
            .collect();
        debug!(
            ticker = ticker,
            count = bars.len(),
            utc_offset_secs,
            "Yahoo Finance 일봉 수신"
        );

        Ok(bars)
    }
}
