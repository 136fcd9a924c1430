//! 관심종목 및 포트폴리오 편집.
//!
//! 대부분의 편집은 `PortfolioState::apply`로 충분하며, 종목 추가만
//! 데이터 존재 여부를 먼저 확인합니다.

use anyhow::{Context, Result};
use tracing::info;
use watchfolio_core::{normalize_ticker, Action, PortfolioState, Transition};
use watchfolio_data::{MarketDataAccessor, MarketDataSource};

/// 종목 추가 결과.
#[derive(Debug)]
pub enum AddOutcome {
    /// 상태 전이가 적용됨 (이미 등록된 종목이면 알림 포함)
    Applied(Transition),
    /// 데이터 소스에 없는 종목. 상태는 변경되지 않음
    NotFound(PortfolioState),
}

/// 가격 데이터가 있는 종목만 관심종목에 추가합니다.
pub async fn add_ticker<S: MarketDataSource>(
    accessor: &MarketDataAccessor<S>,
    state: PortfolioState,
    ticker: &str,
) -> Result<AddOutcome> {
    let ticker = normalize_ticker(ticker);
    if state.watchlist.contains(&ticker) {
        return Ok(AddOutcome::Applied(state.apply(Action::AddTicker(ticker))));
    }

    let series = accessor
        .fetch(&ticker)
        .await
        .with_context(|| format!("Failed to look up {}", ticker))?;

    if series.is_empty() {
        return Ok(AddOutcome::NotFound(state));
    }

    info!(ticker = %ticker, days = series.len(), "관심종목 추가");
    Ok(AddOutcome::Applied(state.apply(Action::AddTicker(ticker))))
}

/// 쉼표로 구분된 종목 목록 파싱 (빈 항목 무시).
pub fn parse_ticker_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(normalize_ticker)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use watchfolio_core::RawBar;
    use watchfolio_data::{AccessorConfig, InMemorySource};

    fn accessor() -> MarketDataAccessor<InMemorySource> {
        let bar = RawBar::from_close(Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap(), 370.0);
        let source = InMemorySource::new()
            .with_bars("MSFT", vec![bar])
            .with_unavailable("DOWN");
        MarketDataAccessor::new(source, AccessorConfig::default())
    }

    #[test]
    fn test_parse_ticker_list() {
        assert_eq!(parse_ticker_list("msft, aapl,,spy "), vec!["MSFT", "AAPL", "SPY"]);
        assert!(parse_ticker_list(" , ").is_empty());
    }

    #[tokio::test]
    async fn test_add_known_ticker() {
        let outcome = add_ticker(&accessor(), PortfolioState::new(), "msft").await.unwrap();

        match outcome {
            AddOutcome::Applied(t) => {
                assert_eq!(t.state.watchlist, vec!["MSFT"]);
                assert_eq!(t.state.portfolio, vec!["MSFT"]);
                assert!(t.notice.is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_unknown_ticker_leaves_state() {
        let outcome = add_ticker(&accessor(), PortfolioState::new(), "NOPE").await.unwrap();

        match outcome {
            AddOutcome::NotFound(state) => assert!(state.watchlist.is_empty()),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_listed_ticker_skips_lookup() {
        let accessor = accessor();
        let state = PortfolioState::new().apply(Action::AddTicker("MSFT".into())).state;

        let outcome = add_ticker(&accessor, state, "MSFT").await.unwrap();
        assert!(matches!(outcome, AddOutcome::Applied(Transition { notice: Some(_), .. })));
        assert_eq!(accessor.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_add_unavailable_is_error() {
        let result = add_ticker(&accessor(), PortfolioState::new(), "DOWN").await;
        assert!(result.is_err());
    }
}
