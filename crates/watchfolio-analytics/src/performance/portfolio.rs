//! 벤치마크 대비 포트폴리오 성과 계산.
//!
//! # 계산 순서
//!
//! 1. 종목별 수익률에 비중을 곱함
//! 2. 모든 종목에 공통인 날짜로 inner join
//! 3. 날짜별 합계 → 포트폴리오 수익률
//! 4. 벤치마크 수익률 계산
//! 5. 두 수익률을 시작일 이후로 필터
//! 6. 포트폴리오 누적 성장
//! 7. 초과 수익률 (inner join)
//! 8. 벤치마크 누적 성장
//! 9. 초과 수익률 누적 성장
//! 10. 포트폴리오/벤치마크 상관계수

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use watchfolio_core::{PriceSeries, ReturnSeries};

use crate::correlation::correlation_by_date;
use crate::error::{AnalyticsError, Result};
use crate::returns::{active_returns, compute_returns, cumulative_growth, inner_join, weighted_sum};

/// 포트폴리오 성과 계산 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPerformance {
    /// 분석 시작일 (포함)
    pub start_date: Option<NaiveDate>,
    /// 가중 합산 포트폴리오 수익률 (시작일 필터 전)
    pub portfolio_returns: ReturnSeries,
    /// 초과 수익률 (시작일 이후, 벤치마크와 공통 날짜)
    pub active_returns: ReturnSeries,
    /// 포트폴리오 누적 성장
    pub cumulative_growth: ReturnSeries,
    /// 벤치마크 누적 성장
    pub benchmark_growth: ReturnSeries,
    /// 초과 수익률 누적 성장
    pub active_growth: ReturnSeries,
    /// 벤치마크와 포트폴리오 수익률의 Pearson 상관계수
    pub correlation: Option<f64>,
}

impl PortfolioPerformance {
    /// 보유 종목이 없을 때의 결과.
    pub fn empty(start_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative_growth.is_empty()
    }
}

/// 포트폴리오 성과를 계산합니다.
///
/// # 인자
///
/// * `holdings` - 포트폴리오 종목 (중복은 한 번만 계산)
/// * `weights` - 종목별 비중 (정규화하지 않음)
/// * `prices` - 종목별 가격 시계열
/// * `benchmark` - 벤치마크 가격 시계열
/// * `start_date` - 분석 시작일 (포함)
///
/// # 오류
///
/// 비중이 없는 종목은 `MissingWeight`, 가격 시계열이 없는 종목은 `MissingPrices`.
/// 보유 종목이 없으면 빈 결과를 반환합니다.
pub fn compute_portfolio_performance(
    holdings: &[String],
    weights: &BTreeMap<String, f64>,
    prices: &HashMap<String, PriceSeries>,
    benchmark: &PriceSeries,
    start_date: NaiveDate,
) -> Result<PortfolioPerformance> {
    let mut tickers: Vec<&String> = Vec::with_capacity(holdings.len());
    for ticker in holdings {
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }

    if tickers.is_empty() {
        debug!("보유 종목 없음, 빈 결과 반환");
        return Ok(PortfolioPerformance::empty(start_date));
    }

    // 비중 누락은 데이터보다 먼저 확인
    let mut weighted = Vec::with_capacity(tickers.len());
    for ticker in &tickers {
        let weight = *weights
            .get(*ticker)
            .ok_or_else(|| AnalyticsError::MissingWeight((*ticker).clone()))?;
        weighted.push((*ticker, weight));
    }

    // 1. 종목별 가중 수익률
    let mut scaled = Vec::with_capacity(weighted.len());
    for (ticker, weight) in weighted {
        let series = prices
            .get(ticker)
            .ok_or_else(|| AnalyticsError::MissingPrices(ticker.clone()))?;
        scaled.push(compute_returns(series).scale(weight));
    }

    // 2-3. inner join 후 날짜별 합계
    let portfolio_returns = weighted_sum(&inner_join(&scaled));

    // 4-5. 벤치마크 수익률, 시작일 필터
    let benchmark_returns = compute_returns(benchmark);
    let portfolio_window = portfolio_returns.since(start_date);
    let benchmark_window = benchmark_returns.since(start_date);

    // 6-9.
    let cumulative = cumulative_growth(&portfolio_window);
    let active = active_returns(&portfolio_window, &benchmark_window);
    let benchmark_growth = cumulative_growth(&benchmark_window);
    let active_growth = cumulative_growth(&active);

    // 10.
    let correlation = correlation_by_date(&benchmark_window, &portfolio_window);

    debug!(
        tickers = tickers.len(),
        aligned_days = portfolio_returns.len(),
        window_days = portfolio_window.len(),
        benchmark_days = benchmark_window.len(),
        correlation = ?correlation,
        "포트폴리오 성과 계산 완료"
    );

    Ok(PortfolioPerformance {
        start_date: Some(start_date),
        portfolio_returns,
        active_returns: active,
        cumulative_growth: cumulative,
        benchmark_growth,
        active_growth,
        correlation,
    })
}
