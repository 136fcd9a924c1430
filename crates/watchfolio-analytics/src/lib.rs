//! 포트폴리오 수익률 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 가격 시계열의 단순 수익률 계산
//! - 날짜 기준 inner join, 가중 합산, 누적 성장 곡선
//! - Pearson 상관계수
//! - 벤치마크 대비 포트폴리오 성과 계산 및 요약
//!
//! 모든 연산은 입력만으로 결정되는 순수 함수입니다.

pub mod correlation;
pub mod error;
pub mod performance;
pub mod returns;

pub use correlation::{calculate_correlation, correlation_by_date};
pub use error::{AnalyticsError, Result};
pub use performance::{compute_portfolio_performance, PerformanceSummary, PortfolioPerformance};
pub use returns::{active_returns, compute_returns, cumulative_growth, inner_join, weighted_sum};
