//! 벤치마크 대비 포트폴리오 성과 분석.
//!
//! 1. 비중이 없는 종목에 1/N 비중을 채움 (호출자가 갱신된 상태를 저장)
//! 2. 포트폴리오 종목과 벤치마크를 동시에 조회
//! 3. 조회 문제가 없으면 성과 계산

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};
use watchfolio_analytics::{compute_portfolio_performance, PerformanceSummary, PortfolioPerformance};
use watchfolio_core::{normalize_ticker, Action, PortfolioState};
use watchfolio_data::{MarketDataAccessor, MarketDataSource};

/// 분석 요청.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// 벤치마크 티커
    pub benchmark: String,
    /// 분석 시작일 (포함)
    pub start_date: NaiveDate,
}

/// 종목별 조회 문제.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchIssue {
    /// 데이터 소스에 없는 종목
    NotFound { ticker: String },
    /// 조회 실패 (`retryable`이면 일시적 장애)
    Failed {
        ticker: String,
        message: String,
        retryable: bool,
    },
}

impl FetchIssue {
    pub fn ticker(&self) -> &str {
        match self {
            FetchIssue::NotFound { ticker } | FetchIssue::Failed { ticker, .. } => ticker,
        }
    }
}

/// 분석 결과.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub benchmark: String,
    pub start_date: NaiveDate,
    /// 분석에 사용한 비중
    pub weights: BTreeMap<String, f64>,
    /// 종목별 조회 문제 (있으면 성과를 계산하지 않음)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FetchIssue>,
    pub summary: Option<PerformanceSummary>,
    pub performance: Option<PortfolioPerformance>,
}

/// 분석을 실행합니다.
///
/// 기본 비중이 채워진 상태와 보고서를 반환합니다. 조회 문제는 오류가 아니라
/// 보고서의 `issues`로 전달됩니다.
pub async fn run_analysis<S: MarketDataSource>(
    accessor: &MarketDataAccessor<S>,
    state: PortfolioState,
    request: &AnalyzeRequest,
) -> Result<(PortfolioState, AnalysisReport)> {
    let state = state.apply(Action::FillDefaultWeights).state;
    let benchmark = normalize_ticker(&request.benchmark);

    let mut report = AnalysisReport {
        benchmark: benchmark.clone(),
        start_date: request.start_date,
        weights: state
            .portfolio
            .iter()
            .filter_map(|t| state.weights.get(t).map(|w| (t.clone(), *w)))
            .collect(),
        issues: Vec::new(),
        summary: None,
        performance: None,
    };

    if state.portfolio.is_empty() {
        let perf = PortfolioPerformance::empty(request.start_date);
        report.summary = Some(PerformanceSummary::from(&perf));
        report.performance = Some(perf);
        return Ok((state, report));
    }

    let mut tickers = state.portfolio.clone();
    if !tickers.contains(&benchmark) {
        tickers.push(benchmark.clone());
    }

    let mut prices = HashMap::with_capacity(tickers.len());
    for (ticker, result) in accessor.fetch_many(&tickers).await {
        match result {
            Ok(series) if series.is_empty() => {
                report.issues.push(FetchIssue::NotFound { ticker });
            }
            Ok(series) => {
                prices.insert(ticker, series);
            }
            Err(e) => {
                report.issues.push(FetchIssue::Failed {
                    ticker,
                    message: e.to_string(),
                    retryable: e.is_retryable(),
                });
            }
        }
    }

    if !report.issues.is_empty() {
        warn!(issues = report.issues.len(), "조회 문제로 분석 생략");
        return Ok((state, report));
    }

    // 조회 문제가 없으면 요청한 모든 종목 (벤치마크 포함)이 `prices`에 있음
    let benchmark_series = &prices[&benchmark];

    let perf = compute_portfolio_performance(
        &state.portfolio,
        &state.weights,
        &prices,
        benchmark_series,
        request.start_date,
    )?;

    info!(
        holdings = state.portfolio.len(),
        benchmark = %benchmark,
        days = perf.cumulative_growth.len(),
        "분석 완료"
    );

    report.summary = Some(PerformanceSummary::from(&perf));
    report.performance = Some(perf);
    Ok((state, report))
}
