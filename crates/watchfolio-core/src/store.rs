//! 포트폴리오 상태 파일 저장소.
//!
//! 비중, 포트폴리오 종목, 관심종목을 하나의 JSON 파일로 저장하고 복원합니다.
//! 스키마 버전 관리는 하지 않습니다.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::PortfolioState;
use crate::error::{CoreError, CoreResult};

/// 상태를 파일에 저장합니다.
///
/// 임시 파일에 먼저 쓴 뒤 이름을 바꿔 부분 기록을 남기지 않습니다.
pub fn save_state(path: impl AsRef<Path>, state: &PortfolioState) -> CoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = state.to_json()?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    info!(
        path = %path.display(),
        watchlist = state.watchlist.len(),
        portfolio = state.portfolio.len(),
        "포트폴리오 저장"
    );
    Ok(())
}

/// 파일에서 상태를 불러옵니다.
pub fn load_state(path: impl AsRef<Path>) -> CoreResult<PortfolioState> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CoreError::StateNotFound(path.to_path_buf()));
    }

    let json = fs::read_to_string(path)?;
    let state = PortfolioState::from_json(&json)?;

    debug!(path = %path.display(), "포트폴리오 불러오기");
    Ok(state)
}

/// 파일이 없으면 빈 상태를 반환합니다.
pub fn load_state_or_default(path: impl AsRef<Path>) -> CoreResult<PortfolioState> {
    match load_state(path) {
        Err(CoreError::StateNotFound(_)) => Ok(PortfolioState::default()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Action;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("portfolio.json");

        let state = PortfolioState::new()
            .apply(Action::AddTicker("MSFT".to_string()))
            .state
            .apply(Action::FillDefaultWeights)
            .state;

        save_state(&path, &state).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(matches!(load_state(&path), Err(CoreError::StateNotFound(_))));
        assert_eq!(load_state_or_default(&path).unwrap(), PortfolioState::default());
    }

    #[test]
    fn test_load_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_state(&path), Err(CoreError::Serialization(_))));
    }
}
