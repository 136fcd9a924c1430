//! 관심종목 및 포트폴리오 상태.
//!
//! 모든 사용자 동작은 `PortfolioState::apply`를 통한 순수 상태 전이
//! `(이전 상태, Action) -> 새 상태`로 표현됩니다. 상태는 어떤 전송 수단
//! (파일, HTTP, CLI)으로도 직렬화할 수 있습니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 관심종목, 분석 대상 포트폴리오, 종목별 비중.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    /// 종목별 포트폴리오 비중 (정규화하지 않음)
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    /// 분석에 포함할 종목 (순서 유지)
    #[serde(default)]
    pub portfolio: Vec<String>,
    /// 지금까지 추가된 모든 종목 (순서 유지)
    #[serde(default)]
    pub watchlist: Vec<String>,
}

/// 사용자 동작.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 관심종목과 포트폴리오에 종목 추가
    AddTicker(String),
    /// 관심종목에서 종목 제거 (포트폴리오와 비중에서도 제거)
    RemoveTicker(String),
    /// 포트폴리오 구성 종목 지정 (관심종목 중에서만)
    SelectPortfolio(Vec<String>),
    /// 종목 비중 지정
    SetWeight { ticker: String, weight: f64 },
    /// 비중이 없는 포트폴리오 종목에 1/N 비중 부여
    FillDefaultWeights,
    /// 빈 상태로 초기화
    Reset,
}

/// 상태 전이 중 발생한 사용자 알림.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// 이미 관심종목에 있는 종목
    AlreadyListed(String),
    /// 관심종목에 없는 종목
    NotOnWatchlist(Vec<String>),
    /// 포트폴리오에 없는 종목
    NotInPortfolio(String),
    /// 유한하지 않은 비중
    InvalidWeight { ticker: String, weight: f64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AlreadyListed(t) => write!(f, "{} is already on the watchlist", t),
            Notice::NotOnWatchlist(ts) => write!(f, "not on the watchlist: {}", ts.join(", ")),
            Notice::NotInPortfolio(t) => write!(f, "{} is not in the portfolio", t),
            Notice::InvalidWeight { ticker, weight } => {
                write!(f, "invalid weight {} for {}", weight, ticker)
            }
        }
    }
}

/// 상태 전이 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PortfolioState,
    pub notice: Option<Notice>,
}

impl Transition {
    fn quiet(state: PortfolioState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    fn with_notice(state: PortfolioState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

/// 티커 표기 정규화 (앞뒤 공백 제거, 대문자).
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

impl PortfolioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 동작을 적용한 새 상태를 반환합니다.
    pub fn apply(mut self, action: Action) -> Transition {
        match action {
            Action::AddTicker(ticker) => {
                let ticker = normalize_ticker(&ticker);
                if self.watchlist.contains(&ticker) {
                    return Transition::with_notice(self, Notice::AlreadyListed(ticker));
                }
                self.watchlist.push(ticker.clone());
                if !self.portfolio.contains(&ticker) {
                    self.portfolio.push(ticker);
                }
                Transition::quiet(self)
            }

            Action::RemoveTicker(ticker) => {
                let ticker = normalize_ticker(&ticker);
                if !self.watchlist.contains(&ticker) {
                    return Transition::with_notice(self, Notice::NotOnWatchlist(vec![ticker]));
                }
                self.watchlist.retain(|t| t != &ticker);
                self.portfolio.retain(|t| t != &ticker);
                self.weights.remove(&ticker);
                Transition::quiet(self)
            }

            Action::SelectPortfolio(tickers) => {
                let mut selected = Vec::new();
                let mut unknown = Vec::new();
                for ticker in tickers.iter().map(|t| normalize_ticker(t)) {
                    if !self.watchlist.contains(&ticker) {
                        if !unknown.contains(&ticker) {
                            unknown.push(ticker);
                        }
                    } else if !selected.contains(&ticker) {
                        selected.push(ticker);
                    }
                }
                self.portfolio = selected;

                if unknown.is_empty() {
                    Transition::quiet(self)
                } else {
                    Transition::with_notice(self, Notice::NotOnWatchlist(unknown))
                }
            }

            Action::SetWeight { ticker, weight } => {
                let ticker = normalize_ticker(&ticker);
                if !self.portfolio.contains(&ticker) {
                    return Transition::with_notice(self, Notice::NotInPortfolio(ticker));
                }
                if !weight.is_finite() {
                    return Transition::with_notice(self, Notice::InvalidWeight { ticker, weight });
                }
                self.weights.insert(ticker, weight);
                Transition::quiet(self)
            }

            Action::FillDefaultWeights => {
                if self.portfolio.is_empty() {
                    return Transition::quiet(self);
                }
                let default_weight = 1.0 / self.portfolio.len() as f64;
                for ticker in &self.portfolio {
                    self.weights
                        .entry(ticker.clone())
                        .or_insert(default_weight);
                }
                Transition::quiet(self)
            }

            Action::Reset => Transition::quiet(Self::default()),
        }
    }

    /// 종목에 적용될 비중. 지정되지 않았으면 현재 포트폴리오 크기 기준 1/N.
    pub fn effective_weight(&self, ticker: &str) -> Option<f64> {
        if let Some(w) = self.weights.get(ticker) {
            return Some(*w);
        }
        if self.portfolio.iter().any(|t| t == ticker) {
            Some(1.0 / self.portfolio.len() as f64)
        } else {
            None
        }
    }

    /// 포트폴리오 종목의 비중 합계 (지정된 비중만).
    pub fn assigned_weight_sum(&self) -> f64 {
        self.portfolio
            .iter()
            .filter_map(|t| self.weights.get(t))
            .sum()
    }

    /// JSON으로 직렬화합니다.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JSON에서 역직렬화합니다.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(tickers: &[&str]) -> PortfolioState {
        tickers.iter().fold(PortfolioState::new(), |s, t| {
            s.apply(Action::AddTicker(t.to_string())).state
        })
    }

    #[test]
    fn test_add_ticker() {
        let t = PortfolioState::new().apply(Action::AddTicker(" msft ".to_string()));
        assert!(t.notice.is_none());
        assert_eq!(t.state.watchlist, vec!["MSFT"]);
        assert_eq!(t.state.portfolio, vec!["MSFT"]);
    }

    #[test]
    fn test_add_duplicate_ticker() {
        let state = state_with(&["MSFT"]);
        let t = state.clone().apply(Action::AddTicker("MSFT".to_string()));
        assert_eq!(t.notice, Some(Notice::AlreadyListed("MSFT".to_string())));
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_select_portfolio_filters_unknown() {
        let state = state_with(&["MSFT", "AAPL", "GOOG"]);
        let t = state.apply(Action::SelectPortfolio(vec![
            "aapl".to_string(),
            "TSLA".to_string(),
            "AAPL".to_string(),
            "MSFT".to_string(),
        ]));

        assert_eq!(t.state.portfolio, vec!["AAPL", "MSFT"]);
        assert_eq!(t.state.watchlist.len(), 3);
        assert_eq!(t.notice, Some(Notice::NotOnWatchlist(vec!["TSLA".to_string()])));
    }

    #[test]
    fn test_set_weight_requires_portfolio_member() {
        let state = state_with(&["MSFT"]);
        let t = state.apply(Action::SetWeight {
            ticker: "AAPL".to_string(),
            weight: 0.5,
        });
        assert_eq!(t.notice, Some(Notice::NotInPortfolio("AAPL".to_string())));
        assert!(t.state.weights.is_empty());
    }

    #[test]
    fn test_set_weight_rejects_nan() {
        let state = state_with(&["MSFT"]);
        let t = state.apply(Action::SetWeight {
            ticker: "MSFT".to_string(),
            weight: f64::NAN,
        });
        assert!(matches!(t.notice, Some(Notice::InvalidWeight { .. })));
        assert!(t.state.weights.is_empty());
    }

    #[test]
    fn test_fill_default_weights_keeps_assigned() {
        let state = state_with(&["MSFT", "AAPL", "GOOG", "AMZN"])
            .apply(Action::SetWeight {
                ticker: "MSFT".to_string(),
                weight: 0.7,
            })
            .state;

        let state = state.apply(Action::FillDefaultWeights).state;
        assert_eq!(state.weights["MSFT"], 0.7);
        assert_eq!(state.weights["AAPL"], 0.25);
        assert_eq!(state.weights["AMZN"], 0.25);
        // 정규화하지 않음
        assert!((state.assigned_weight_sum() - 1.45).abs() < 1e-12);
    }

    #[test]
    fn test_effective_weight_defaults_to_equal() {
        let state = state_with(&["MSFT", "AAPL"]);
        assert_eq!(state.effective_weight("MSFT"), Some(0.5));
        assert_eq!(state.effective_weight("TSLA"), None);
    }

    #[test]
    fn test_remove_ticker() {
        let state = state_with(&["MSFT", "AAPL"])
            .apply(Action::FillDefaultWeights)
            .state
            .apply(Action::RemoveTicker("msft".to_string()))
            .state;

        assert_eq!(state.watchlist, vec!["AAPL"]);
        assert_eq!(state.portfolio, vec!["AAPL"]);
        assert!(!state.weights.contains_key("MSFT"));
    }

    #[test]
    fn test_reset() {
        let t = state_with(&["MSFT"]).apply(Action::Reset);
        assert_eq!(t.state, PortfolioState::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let state = state_with(&["MSFT", "SPY"]).apply(Action::FillDefaultWeights).state;
        let json = state.to_json().unwrap();
        assert_eq!(PortfolioState::from_json(&json).unwrap(), state);
    }
}
