//! 성과 요약.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::portfolio::PortfolioPerformance;

/// 보고서용 성과 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// 포트폴리오 곡선의 첫 날짜
    pub first_date: Option<NaiveDate>,
    /// 포트폴리오 곡선의 마지막 날짜
    pub last_date: Option<NaiveDate>,
    /// 포트폴리오 관측 일수
    pub observations: usize,
    /// 포트폴리오 누적 수익률 (마지막 성장값 - 1)
    pub portfolio_return: Option<f64>,
    /// 벤치마크 누적 수익률
    pub benchmark_return: Option<f64>,
    /// 초과 수익률 누적
    pub active_return: Option<f64>,
    /// 벤치마크와의 상관계수
    pub correlation: Option<f64>,
}

impl From<&PortfolioPerformance> for PerformanceSummary {
    fn from(perf: &PortfolioPerformance) -> Self {
        let total = |curve: &watchfolio_core::ReturnSeries| curve.last().map(|(_, g)| g - 1.0);

        Self {
            first_date: perf.cumulative_growth.first().map(|(d, _)| d),
            last_date: perf.cumulative_growth.last().map(|(d, _)| d),
            observations: perf.cumulative_growth.len(),
            portfolio_return: total(&perf.cumulative_growth),
            benchmark_return: total(&perf.benchmark_growth),
            active_return: total(&perf.active_growth),
            correlation: perf.correlation,
        }
    }
}
