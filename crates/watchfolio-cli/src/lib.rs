//! 포트폴리오 트래커 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 관심종목/포트폴리오 편집 명령 (상태 파일에 저장)
//! - 종목 시세 조회
//! - 벤치마크 대비 성과 분석 및 출력

pub mod commands;

pub use commands::*;
