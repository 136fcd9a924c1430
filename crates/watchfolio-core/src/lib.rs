//! # Watchfolio Core
//!
//! 포트폴리오 트래커의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 가격/수익률 시계열 타입
//! - 관심종목 및 포트폴리오 상태와 순수 상태 전이
//! - 포트폴리오 상태 저장/복원
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod store;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use store::{load_state, load_state_or_default, save_state};
