//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 시장 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 분석 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 포트폴리오 상태 저장 설정
    #[serde(default)]
    pub state: StateConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 시장 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 벤치마크 티커 (시장 지수 대용)
    #[serde(default = "default_benchmark")]
    pub benchmark: String,
    /// 티커당 조회 타임아웃 (초)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// 동시 조회 최대 개수
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// 프로세스 내 티커별 캐시 사용 여부
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

fn default_benchmark() -> String {
    "SPY".to_string()
}
fn default_fetch_timeout() -> u64 {
    30
}
fn default_max_concurrent_fetches() -> usize {
    4
}
fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            benchmark: default_benchmark(),
            fetch_timeout_secs: default_fetch_timeout(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            cache_enabled: true,
        }
    }
}

/// 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// 시작일 미지정 시 오늘로부터 거슬러 올라갈 일수 (기본 5년)
    #[serde(default = "default_lookback_days")]
    pub default_lookback_days: i64,
}

fn default_lookback_days() -> i64 {
    5 * 365
}

impl AnalysisConfig {
    /// `today`에서 `default_lookback_days`만큼 거슬러 올라간 기본 시작일.
    ///
    /// 음수이거나 날짜 범위를 벗어나는 일수는 설정 오류입니다.
    pub fn default_start(&self, today: NaiveDate) -> CoreResult<NaiveDate> {
        let days = self.default_lookback_days;
        if days < 0 {
            return Err(CoreError::Config(format!(
                "analysis.default_lookback_days must not be negative: {}",
                days
            )));
        }

        Duration::try_days(days)
            .and_then(|lookback| today.checked_sub_signed(lookback))
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "analysis.default_lookback_days is out of range: {}",
                    days
                ))
            })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_lookback_days: default_lookback_days(),
        }
    }
}

/// 포트폴리오 상태 저장 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    /// 상태 파일 경로
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("portfolio_state.json")
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("WATCHFOLIO")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data.benchmark, "SPY");
        assert_eq!(config.data.fetch_timeout_secs, 30);
        assert!(config.data.cache_enabled);
        assert_eq!(config.analysis.default_lookback_days, 1825);
        assert_eq!(config.state.path, PathBuf::from("portfolio_state.json"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.data.max_concurrent_fetches, 4);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[data]\nbenchmark = \"QQQ\"\nfetch_timeout_secs = 5").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.data.benchmark, "QQQ");
        assert_eq!(config.data.fetch_timeout_secs, 5);
        assert_eq!(config.data.max_concurrent_fetches, 4);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_invalid_value_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[data]\nfetch_timeout_secs = \"soon\"").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_default_start() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let analysis = AnalysisConfig {
            default_lookback_days: 29,
        };
        assert_eq!(
            analysis.default_start(today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_default_start_out_of_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        for days in [i64::MAX, 100_000_000, -1] {
            let analysis = AnalysisConfig {
                default_lookback_days: days,
            };
            assert!(matches!(
                analysis.default_start(today),
                Err(CoreError::Config(_))
            ));
        }
    }
}
