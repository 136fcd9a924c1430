//! 포트폴리오 성과 모듈
//!
//! - [`portfolio`]: 벤치마크 대비 성과 계산
//! - [`summary`]: 보고서용 요약 지표

pub mod portfolio;
pub mod summary;

pub use portfolio::{compute_portfolio_performance, PortfolioPerformance};
pub use summary::PerformanceSummary;
