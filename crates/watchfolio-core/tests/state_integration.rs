//! 포트폴리오 상태 전이와 저장소 통합 테스트.

use proptest::prelude::*;
use watchfolio_core::{
    load_state, save_state, Action, Notice, PortfolioState,
};

#[test]
fn test_session_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio_dump.json");

    let actions = vec![
        Action::AddTicker("MSFT".to_string()),
        Action::AddTicker("AAPL".to_string()),
        Action::AddTicker("GOOG".to_string()),
        Action::SelectPortfolio(vec!["MSFT".to_string(), "GOOG".to_string()]),
        Action::SetWeight {
            ticker: "MSFT".to_string(),
            weight: 0.8,
        },
        Action::FillDefaultWeights,
    ];

    let state = actions
        .into_iter()
        .fold(PortfolioState::new(), |s, a| s.apply(a).state);

    assert_eq!(state.watchlist, vec!["MSFT", "AAPL", "GOOG"]);
    assert_eq!(state.portfolio, vec!["MSFT", "GOOG"]);
    assert_eq!(state.weights["MSFT"], 0.8);
    assert_eq!(state.weights["GOOG"], 0.5);
    assert!(!state.weights.contains_key("AAPL"));

    save_state(&path, &state).unwrap();
    let restored = load_state(&path).unwrap();
    assert_eq!(restored, state);

    // 복원된 상태에서도 중복 추가는 알림만 발생
    let t = restored.apply(Action::AddTicker("aapl".to_string()));
    assert_eq!(t.notice, Some(Notice::AlreadyListed("AAPL".to_string())));
}

#[test]
fn test_missing_fields_default_to_empty() {
    let state = PortfolioState::from_json(r#"{"watchlist": ["SPY"]}"#).unwrap();
    assert_eq!(state.watchlist, vec!["SPY"]);
    assert!(state.portfolio.is_empty());
    assert!(state.weights.is_empty());
}

fn ticker_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["MSFT", "AAPL", "GOOG", "AMZN", "SPY", "QQQ"])
        .prop_map(|s| s.to_string())
}

proptest! {
    #[test]
    fn prop_portfolio_is_subset_of_watchlist(
        added in prop::collection::vec(ticker_strategy(), 0..6),
        selected in prop::collection::vec(ticker_strategy(), 0..6),
    ) {
        let state = added
            .into_iter()
            .fold(PortfolioState::new(), |s, t| s.apply(Action::AddTicker(t)).state)
            .apply(Action::SelectPortfolio(selected))
            .state;

        for ticker in &state.portfolio {
            prop_assert!(state.watchlist.contains(ticker));
        }
    }

    #[test]
    fn prop_fill_default_weights_covers_portfolio(
        added in prop::collection::vec(ticker_strategy(), 1..6),
    ) {
        let state = added
            .into_iter()
            .fold(PortfolioState::new(), |s, t| s.apply(Action::AddTicker(t)).state)
            .apply(Action::FillDefaultWeights)
            .state;

        let n = state.portfolio.len() as f64;
        for ticker in &state.portfolio {
            prop_assert_eq!(state.weights.get(ticker).copied(), Some(1.0 / n));
        }
    }
}
