//! 상관계수 계산 모듈.
//!
//! 포트폴리오와 벤치마크 수익률 간의 Pearson 상관계수를 계산합니다.
//!
//! # 예시
//!
//! ```rust,ignore
//! use watchfolio_analytics::correlation::calculate_correlation;
//!
//! let returns_a = vec![0.01, -0.02, 0.015, 0.005];
//! let returns_b = vec![0.008, -0.015, 0.012, 0.003];
//!
//! let corr = calculate_correlation(&returns_a, &returns_b);
//! println!("상관계수: {:.4}", corr.unwrap_or(0.0));
//! ```

use watchfolio_core::ReturnSeries;

/// Pearson 상관계수 계산.
///
/// # 반환
///
/// 상관계수 (-1.0 ~ 1.0). 길이가 다르거나 관측치가 2개 미만이거나
/// 한쪽의 분산이 0이면 정의되지 않으므로 `None`.
pub fn calculate_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;

    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // 공분산 및 분산
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // 변동 없음 (평균 계산의 반올림 오차 이하의 분산 포함)
    if is_flat(var_x, mean_x, n) || is_flat(var_y, mean_y, n) {
        return None;
    }

    let corr = cov / (var_x.sqrt() * var_y.sqrt());
    // 부동소수점 오차로 범위를 벗어나지 않도록
    Some(corr.clamp(-1.0, 1.0))
}

fn is_flat(var: f64, mean: f64, n: f64) -> bool {
    let tolerance = f64::EPSILON * mean.abs() * n;
    var <= tolerance * tolerance * n
}

/// 두 날짜 시계열의 상관계수 (두 시계열 모두에 있는 날짜만 사용).
pub fn correlation_by_date(a: &ReturnSeries, b: &ReturnSeries) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .filter_map(|(date, x)| b.get(&date).map(|y| (x, y)))
        .unzip();
    calculate_correlation(&xs, &ys)
}
