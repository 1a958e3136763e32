//! Differencing and integration utilities for the ARIMA family.

/// Apply `d` rounds of first differencing.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply `d` rounds of seasonal differencing at the given period.
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            break;
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(curr, prev)| curr - prev)
            .collect();
    }
    result
}

/// Reverse first differencing for values appended after `original`.
///
/// `differenced` holds future values on the d-times-differenced scale;
/// `original` supplies the initial values at each differencing level.
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let init = if level == 0 {
            *original.last().unwrap_or(&0.0)
        } else {
            *difference(original, level).last().unwrap_or(&0.0)
        };

        let mut cumsum = init;
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

/// Reverse seasonal differencing for values appended after `original`.
///
/// Each future value on the seasonally differenced scale is added to the
/// observation one period earlier, walking the level history the same way
/// `integrate` does for regular differences.
pub fn seasonal_integrate(differenced: &[f64], original: &[f64], d: usize, period: usize) -> Vec<f64> {
    if d == 0 || period == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let history = seasonal_difference(original, level, period);
        let mut extended = history.clone();
        for &value in &result {
            let t = extended.len();
            let prev = if t >= period {
                extended[t - period]
            } else {
                0.0
            };
            extended.push(value + prev);
        }
        result = extended[history.len()..].to_vec();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_orders() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&series, 0), series);
        assert_eq!(difference(&series, 1), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(difference(&series, 2), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn seasonal_difference_removes_repeating_pattern() {
        let series = vec![
            100.0, 120.0, 80.0, 90.0, // year 1
            110.0, 130.0, 90.0, 100.0, // year 2
        ];
        assert_eq!(
            seasonal_difference(&series, 1, 4),
            vec![10.0, 10.0, 10.0, 10.0]
        );

        let flat = vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0];
        assert_eq!(seasonal_difference(&flat, 1, 3), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn integrate_continues_from_last_value() {
        let original = vec![10.0, 12.0, 15.0, 19.0, 24.0];
        let integrated = integrate(&[6.0, 7.0], &original, 1);
        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_round_trips_second_order() {
        let original = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        // Differences of the quadratic sequence are constant at 1
        let integrated = integrate(&[1.0, 1.0], &original, 2);
        assert_relative_eq!(integrated[0], 21.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 28.0, epsilon = 1e-10);
    }

    #[test]
    fn seasonal_integrate_reverses_seasonal_difference() {
        let original = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        // Seasonally differenced (period 4) future values of the same
        // +4-per-cycle ramp are all 4
        let integrated = seasonal_integrate(&[4.0, 4.0, 4.0, 4.0], &original, 1, 4);
        assert_eq!(integrated, vec![9.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn zero_order_operations_are_identity() {
        let series = vec![1.0, 2.0, 3.0];
        assert_eq!(integrate(&series, &[5.0], 0), series);
        assert_eq!(seasonal_integrate(&series, &[5.0], 0, 4), series);
        assert_eq!(seasonal_difference(&series, 1, 0), series);
    }
}
