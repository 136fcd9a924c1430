//! 포트폴리오 트래커 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 최근 종가 조회
//! watchfolio quote -t MSFT
//!
//! # 관심종목 추가 및 비중 지정
//! watchfolio add -t MSFT
//! watchfolio add -t AAPL
//! watchfolio weight -t MSFT -w 0.6
//!
//! # 포트폴리오 구성 변경
//! watchfolio select MSFT,AAPL
//!
//! # SPY 대비 성과 분석
//! watchfolio analyze --from 2023-01-01 --benchmark SPY
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use watchfolio_core::{
    init_logging, load_state_or_default, save_state, Action, AppConfig, LogConfig,
    PortfolioState, Transition,
};
use watchfolio_data::{AccessorConfig, MarketDataAccessor, YahooSource};

use watchfolio_cli::commands::output::{format_quote, format_state, render_report};
use watchfolio_cli::{
    add_ticker, parse_ticker_list, quote_ticker, run_analysis, AddOutcome, AnalyzeRequest,
    OutputFormat,
};

#[derive(Parser)]
#[command(name = "watchfolio")]
#[command(about = "Portfolio tracker - 관심종목 관리 및 벤치마크 대비 성과 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    /// 포트폴리오 상태 파일 (기본: 설정의 state.path)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 최근 종가 조회
    Quote {
        /// 종목 심볼 (예: MSFT)
        #[arg(short, long)]
        ticker: String,

        /// 표시할 최근 일수
        #[arg(short = 'n', long, default_value = "5")]
        last: usize,
    },

    /// 관심종목 추가 (가격 데이터가 있는 종목만)
    Add {
        #[arg(short, long)]
        ticker: String,
    },

    /// 관심종목에서 제거
    Remove {
        #[arg(short, long)]
        ticker: String,
    },

    /// 포트폴리오 구성 종목 지정 (쉼표로 구분, 예: MSFT,AAPL)
    Select { tickers: String },

    /// 종목 비중 지정
    Weight {
        #[arg(short, long)]
        ticker: String,

        /// 비중 (정규화하지 않음)
        #[arg(short, long, allow_negative_numbers = true)]
        weight: f64,
    },

    /// 현재 관심종목/포트폴리오/비중 보기
    Show,

    /// 벤치마크 대비 성과 분석
    Analyze {
        /// 시작 날짜 (YYYY-MM-DD, 기본: 설정의 default_lookback_days 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 벤치마크 티커 (기본: 설정의 data.benchmark)
        #[arg(short, long)]
        benchmark: Option<String>,

        /// 출력 형식 (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// 상태 초기화
    Reset,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

fn build_accessor(config: &AppConfig) -> Result<MarketDataAccessor<YahooSource>> {
    let source = YahooSource::new()?;
    Ok(MarketDataAccessor::new(
        source,
        AccessorConfig::from(&config.data),
    ))
}

/// 전이 결과를 저장하고 알림이 있으면 출력합니다.
fn commit(path: &Path, transition: Transition) -> Result<PortfolioState> {
    if let Some(notice) = &transition.notice {
        println!("{}", notice);
    }
    save_state(path, &transition.state)
        .with_context(|| format!("Failed to save state to {}", path.display()))?;
    Ok(transition.state)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let state_path = cli
        .state
        .unwrap_or_else(|| PathBuf::from(&config.state.path));
    let state = load_state_or_default(&state_path)
        .with_context(|| format!("Failed to load state from {}", state_path.display()))?;

    match cli.command {
        Commands::Quote { ticker, last } => {
            let accessor = build_accessor(&config)?;
            match quote_ticker(&accessor, &ticker, last).await? {
                Some(quote) => print!("{}", format_quote(&quote)),
                None => println!("{}: ticker not found", ticker.trim().to_uppercase()),
            }
        }

        Commands::Add { ticker } => {
            let accessor = build_accessor(&config)?;
            match add_ticker(&accessor, state, &ticker).await? {
                AddOutcome::Applied(transition) => {
                    let state = commit(&state_path, transition)?;
                    print!("{}", format_state(&state));
                }
                AddOutcome::NotFound(_) => {
                    println!("{}: ticker not found", ticker.trim().to_uppercase());
                }
            }
        }

        Commands::Remove { ticker } => {
            let state = commit(&state_path, state.apply(Action::RemoveTicker(ticker)))?;
            print!("{}", format_state(&state));
        }

        Commands::Select { tickers } => {
            let tickers = parse_ticker_list(&tickers);
            let state = commit(&state_path, state.apply(Action::SelectPortfolio(tickers)))?;
            print!("{}", format_state(&state));
        }

        Commands::Weight { ticker, weight } => {
            let state = commit(
                &state_path,
                state.apply(Action::SetWeight { ticker, weight }),
            )?;
            print!("{}", format_state(&state));
        }

        Commands::Show => {
            print!("{}", format_state(&state));
        }

        Commands::Analyze {
            from,
            benchmark,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            let start_date = match from {
                Some(s) => parse_date(&s)?,
                None => config
                    .analysis
                    .default_start(Utc::now().date_naive())
                    .context("Invalid analysis config")?,
            };
            let request = AnalyzeRequest {
                benchmark: benchmark.unwrap_or_else(|| config.data.benchmark.clone()),
                start_date,
            };

            let accessor = build_accessor(&config)?;
            let (state, report) = run_analysis(&accessor, state, &request).await?;

            // 채워진 기본 비중 저장
            save_state(&state_path, &state)
                .with_context(|| format!("Failed to save state to {}", state_path.display()))?;

            print!("{}", render_report(&report, format)?);

            if !report.issues.is_empty() {
                anyhow::bail!(
                    "Analysis skipped: {} ticker(s) could not be loaded",
                    report.issues.len()
                );
            }
        }

        Commands::Reset => {
            commit(&state_path, state.apply(Action::Reset))?;
            info!(path = %state_path.display(), "State reset");
            println!("State reset");
        }
    }

    Ok(())
}
