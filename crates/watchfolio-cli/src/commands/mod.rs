//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod output;
pub mod quote;
pub mod watchlist;

pub use analyze::{run_analysis, AnalysisReport, AnalyzeRequest, FetchIssue};
pub use output::OutputFormat;
pub use quote::{quote_ticker, Quote};
pub use watchlist::{add_ticker, parse_ticker_list, AddOutcome};
