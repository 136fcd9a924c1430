//! 도메인 모델.

pub mod series;
pub mod state;

pub use series::{PriceBar, PriceSeries, RawBar, ReturnSeries};
pub use state::{normalize_ticker, Action, Notice, PortfolioState, Transition};
