//! 수익률 시계열 연산.
//!
//! - 단순 수익률: `r[i] = p[i] / p[i-1] - 1`
//! - 날짜 기준 inner join
//! - 누적 성장: `Π(1 + r)`

use chrono::NaiveDate;
use std::collections::BTreeMap;
use watchfolio_core::{PriceSeries, ReturnSeries};

/// 가격 시계열을 기간 수익률로 변환합니다.
///
/// 첫 날짜는 수익률이 정의되지 않으므로 결과에 포함되지 않습니다.
/// 직전 가격이 0이면 해당 날짜도 정의되지 않으므로 제외합니다.
pub fn compute_returns(series: &PriceSeries) -> ReturnSeries {
    series
        .bars()
        .windows(2)
        .filter(|w| w[0].close != 0.0)
        .map(|w| (w[1].date, w[1].close / w[0].close - 1.0))
        .collect()
}

/// 모든 시계열에 공통으로 존재하는 날짜만 남겨 정렬된 표로 합칩니다.
///
/// 결과의 각 행은 입력 순서대로의 값 벡터입니다. 입력이 하나면 그대로입니다.
pub fn inner_join(series: &[ReturnSeries]) -> BTreeMap<NaiveDate, Vec<f64>> {
    let Some((first, rest)) = series.split_first() else {
        return BTreeMap::new();
    };

    first
        .iter()
        .filter_map(|(date, value)| {
            let mut row = Vec::with_capacity(series.len());
            row.push(value);
            for other in rest {
                row.push(other.get(&date)?);
            }
            Some((date, row))
        })
        .collect()
}

/// 정렬된 표의 날짜별 합계.
pub fn weighted_sum(aligned: &BTreeMap<NaiveDate, Vec<f64>>) -> ReturnSeries {
    aligned
        .iter()
        .map(|(date, row)| (*date, row.iter().sum()))
        .collect()
}

/// 초과 수익률 (포트폴리오 - 벤치마크), 두 시계열에 모두 있는 날짜만.
pub fn active_returns(portfolio: &ReturnSeries, benchmark: &ReturnSeries) -> ReturnSeries {
    portfolio
        .iter()
        .filter_map(|(date, p)| benchmark.get(&date).map(|b| (date, p - b)))
        .collect()
}

/// 누적 성장 곡선. 첫 값은 `1 + r[0]`이며 중간에 초기화하지 않습니다.
pub fn cumulative_growth(returns: &ReturnSeries) -> ReturnSeries {
    returns
        .iter()
        .scan(1.0, |acc, (date, r)| {
            *acc *= 1.0 + r;
            Some((date, *acc))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn series(values: &[(u32, f64)]) -> ReturnSeries {
        values.iter().map(|(day, v)| (d(*day), *v)).collect()
    }

    #[test]
    fn test_constant_prices_give_zero_returns() {
        let prices = PriceSeries::from_closes("X", (1..=5).map(|day| (d(day), 42.0)));
        let returns = compute_returns(&prices);

        assert_eq!(returns.len(), 4);
        assert!(returns.get(&d(1)).is_none());
        assert!(returns.values().all(|r| r == 0.0));
    }

    #[test]
    fn test_simple_returns() {
        let prices = PriceSeries::from_closes("X", vec![(d(1), 100.0), (d(2), 110.0), (d(3), 99.0)]);
        let returns = compute_returns(&prices);

        assert!((returns.get(&d(2)).unwrap() - 0.10).abs() < 1e-12);
        assert!((returns.get(&d(3)).unwrap() + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_zero_previous_price_is_undefined() {
        let prices = PriceSeries::from_closes("X", vec![(d(1), 0.0), (d(2), 10.0), (d(3), 11.0)]);
        let returns = compute_returns(&prices);

        assert_eq!(returns.len(), 1);
        assert!(returns.get(&d(3)).is_some());
    }

    #[test]
    fn test_short_series() {
        assert!(compute_returns(&PriceSeries::empty("X")).is_empty());
        let one = PriceSeries::from_closes("X", vec![(d(1), 1.0)]);
        assert!(compute_returns(&one).is_empty());
    }

    #[test]
    fn test_inner_join_drops_partial_dates() {
        let a = series(&[(2, 0.1), (3, 0.2), (4, 0.3)]);
        let b = series(&[(3, 1.0), (4, 2.0), (5, 3.0)]);
        let c = series(&[(1, 0.0), (4, 9.0), (3, 8.0)]);

        let joined = inner_join(&[a, b, c]);
        let dates: Vec<_> = joined.keys().copied().collect();
        assert_eq!(dates, vec![d(3), d(4)]);
        assert_eq!(joined[&d(4)], vec![0.3, 2.0, 9.0]);
    }

    #[test]
    fn test_inner_join_single_and_empty() {
        let a = series(&[(2, 0.1), (3, 0.2)]);
        let joined = inner_join(std::slice::from_ref(&a));
        assert_eq!(weighted_sum(&joined), a);

        assert!(inner_join(&[]).is_empty());
    }

    #[test]
    fn test_active_returns_inner_join() {
        let p = series(&[(2, 0.10), (3, 0.05)]);
        let b = series(&[(3, 0.02), (4, 0.01)]);
        let active = active_returns(&p, &b);

        assert_eq!(active.len(), 1);
        assert!((active.get(&d(3)).unwrap() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_growth() {
        let r = series(&[(2, 0.10), (3, -0.10), (4, 0.0)]);
        let g = cumulative_growth(&r);

        assert!((g.get(&d(2)).unwrap() - 1.10).abs() < 1e-12);
        assert!((g.get(&d(3)).unwrap() - 0.99).abs() < 1e-12);
        assert!((g.get(&d(4)).unwrap() - 0.99).abs() < 1e-12);
        assert!(cumulative_growth(&ReturnSeries::new()).is_empty());
    }
}
