//! 명령 결과 출력 형식.

use anyhow::Result;
use std::fmt::Write;
use watchfolio_analytics::{PerformanceSummary, PortfolioPerformance};
use watchfolio_core::PortfolioState;

use super::analyze::{AnalysisReport, FetchIssue};
use super::quote::Quote;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:+.2}%", v * 100.0))
}

/// 최근 종가 표.
pub fn format_quote(quote: &Quote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} days)", quote.ticker, quote.days);
    for (date, close) in &quote.recent {
        let _ = writeln!(out, "  {}  {:>12.4}", date, close);
    }
    out
}

/// 관심종목, 포트폴리오, 비중 표.
pub fn format_state(state: &PortfolioState) -> String {
    let mut out = String::new();

    if state.watchlist.is_empty() {
        out.push_str("Watchlist is empty\n");
        return out;
    }

    let _ = writeln!(out, "{:<10} {:>10} {:>10}", "TICKER", "PORTFOLIO", "WEIGHT");
    for ticker in &state.watchlist {
        let in_portfolio = state.portfolio.contains(ticker);
        let weight = match state.weights.get(ticker) {
            Some(w) => format!("{:.4}", w),
            // 분석 시 1/N으로 채워질 비중
            None if in_portfolio => fmt_opt(state.effective_weight(ticker), 4) + "*",
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<10} {:>10} {:>10}",
            ticker,
            if in_portfolio { "yes" } else { "no" },
            weight
        );
    }
    let _ = writeln!(out, "Assigned weight sum: {:.4}", state.assigned_weight_sum());
    out
}

/// 날짜별 누적 성장 곡선 표 (포트폴리오 곡선의 날짜 기준).
pub fn format_curves(perf: &PortfolioPerformance) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10}",
        "DATE", "PORTFOLIO", "BENCHMARK", "ACTIVE"
    );
    for (date, growth) in perf.cumulative_growth.iter() {
        let _ = writeln!(
            out,
            "{:<12} {:>10.4} {:>10} {:>10}",
            date.to_string(),
            growth,
            fmt_opt(perf.benchmark_growth.get(&date), 4),
            fmt_opt(perf.active_growth.get(&date), 4)
        );
    }
    out
}

/// 성과 요약.
pub fn format_summary(benchmark: &str, summary: &PerformanceSummary) -> String {
    let mut out = String::new();

    let (Some(first), Some(last)) = (summary.first_date, summary.last_date) else {
        out.push_str("No overlapping data in the selected period\n");
        return out;
    };

    let _ = writeln!(out, "Period:      {} ~ {} ({} days)", first, last, summary.observations);
    let _ = writeln!(out, "Portfolio:   {}", fmt_pct(summary.portfolio_return));
    let _ = writeln!(out, "{:<12} {}", format!("{}:", benchmark), fmt_pct(summary.benchmark_return));
    let _ = writeln!(out, "Active:      {}", fmt_pct(summary.active_return));
    let _ = writeln!(out, "Correlation: {}", fmt_opt(summary.correlation, 4));
    out
}

/// 조회 문제 목록. 종목 없음과 일시 장애를 구분해 표시합니다.
pub fn format_issues(issues: &[FetchIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let _ = match issue {
            FetchIssue::NotFound { ticker } => writeln!(out, "{}: ticker not found", ticker),
            FetchIssue::Failed {
                ticker,
                message,
                retryable: true,
            } => writeln!(out, "{}: data unavailable, try again later ({})", ticker, message),
            FetchIssue::Failed {
                ticker, message, ..
            } => writeln!(out, "{}: {}", ticker, message),
        };
    }
    out
}

/// 분석 보고서 전체.
pub fn render_report(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut out = String::new();
    if !report.issues.is_empty() {
        out.push_str(&format_issues(&report.issues));
        return Ok(out);
    }

    if report.weights.is_empty() {
        out.push_str("Portfolio is empty\n");
        return Ok(out);
    }

    if let Some(perf) = &report.performance {
        if !perf.is_empty() {
            out.push_str(&format_curves(perf));
            out.push('\n');
        }
    }
    if let Some(summary) = &report.summary {
        out.push_str(&format_summary(&report.benchmark, summary));
    }
    Ok(out)
}
