//! ARIMA and seasonal ARIMA models.
//!
//! Coefficients are estimated by minimizing the conditional sum of squares
//! with a bounded simplex search. Seasonal models add autoregressive and
//! moving-average terms at multiples of the seasonal offset on top of the
//! regular terms, after seasonal and regular differencing.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{
    difference, integrate, seasonal_difference, seasonal_integrate,
};
use crate::models::{Forecaster, IntervalForecast};
use crate::utils::optimization::{minimize, SimplexOptions};
use crate::utils::stats::{mean, quantile_normal};
use std::fmt::Write as _;

/// Non-seasonal order (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrder {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
}

impl ModelOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

/// Seasonal order (P, D, Q) at seasonal offset `s` (in grid steps).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalOrder {
    /// Seasonal AR order.
    pub p: usize,
    /// Seasonal differencing order.
    pub d: usize,
    /// Seasonal MA order.
    pub q: usize,
    /// Seasonal offset: steps per cycle. Zero disables the seasonal part.
    pub s: usize,
}

impl SeasonalOrder {
    pub fn new(p: usize, d: usize, q: usize, s: usize) -> Self {
        Self { p, d, q, s }
    }

    fn none() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Conditional sum of squares of the one-step-ahead errors.
#[allow(clippy::too_many_arguments)]
fn conditional_sum_of_squares(
    w: &[f64],
    order: ModelOrder,
    seasonal: SeasonalOrder,
    intercept: f64,
    ar: &[f64],
    ma: &[f64],
    sar: &[f64],
    sma: &[f64],
) -> f64 {
    let start = order
        .p
        .max(seasonal.s * seasonal.p)
        .max(order.q.max(seasonal.s * seasonal.q));
    let n = w.len();
    if n <= start {
        return f64::MAX;
    }

    let mut errors = vec![0.0; n];
    let mut acc = 0.0;
    for t in start..n {
        let mut pred = intercept;
        for (i, &coeff) in ar.iter().enumerate() {
            pred += coeff * (w[t - 1 - i] - intercept);
        }
        for (j, &coeff) in sar.iter().enumerate() {
            pred += coeff * (w[t - seasonal.s * (j + 1)] - intercept);
        }
        for (i, &coeff) in ma.iter().enumerate() {
            pred += coeff * errors[t - 1 - i];
        }
        for (j, &coeff) in sma.iter().enumerate() {
            pred += coeff * errors[t - seasonal.s * (j + 1)];
        }
        let err = w[t] - pred;
        errors[t] = err;
        acc += err * err;
    }
    acc
}

/// Shared estimation and forecasting state for both model flavors.
#[derive(Debug, Clone)]
struct Engine {
    order: ModelOrder,
    seasonal: SeasonalOrder,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sar: Vec<f64>,
    sma: Vec<f64>,
    original: Option<Vec<f64>>,
    transformed: Option<Vec<f64>>,
    transformed_errors: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl Engine {
    fn new(order: ModelOrder, seasonal: SeasonalOrder) -> Self {
        Self {
            order,
            seasonal,
            intercept: 0.0,
            ar: vec![],
            ma: vec![],
            sar: vec![],
            sma: vec![],
            original: None,
            transformed: None,
            transformed_errors: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
            aic: None,
            bic: None,
        }
    }

    /// Longest lag referenced by the recursion; earlier points cannot be
    /// predicted one-step-ahead.
    fn warmup(&self) -> usize {
        self.order
            .p
            .max(self.seasonal.s * self.seasonal.p)
            .max(self.order.q.max(self.seasonal.s * self.seasonal.q))
    }

    /// Samples consumed by differencing before the recursion sees the data.
    fn diff_offset(&self) -> usize {
        self.order.d + self.seasonal.s * self.seasonal.d
    }

    fn coefficient_count(&self) -> usize {
        self.order.p + self.order.q + self.seasonal.p + self.seasonal.q
    }

    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.seasonal.s == 0
            && (self.seasonal.p > 0 || self.seasonal.d > 0 || self.seasonal.q > 0)
        {
            return Err(ForecastError::InvalidParameter(
                "seasonal order requires a positive seasonal offset".to_string(),
            ));
        }
        let values = series.values();
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::Fit(
                "series contains gaps after preparation".to_string(),
            ));
        }
        let min_len = self.diff_offset() + self.warmup() + 2;
        if values.len() < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: values.len(),
            });
        }

        self.original = Some(values.to_vec());
        let z = seasonal_difference(values, self.seasonal.d, self.seasonal.s);
        let w = difference(&z, self.order.d);

        self.estimate(&w)?;
        self.evaluate(values, &w);
        Ok(())
    }

    fn estimate(&mut self, w: &[f64]) -> Result<()> {
        let (p, q) = (self.order.p, self.order.q);
        let (sp, sq) = (self.seasonal.p, self.seasonal.q);
        let center = mean(w);

        if self.coefficient_count() == 0 {
            self.intercept = center;
            return Ok(());
        }

        let mut initial = vec![0.0; 1 + self.coefficient_count()];
        initial[0] = center;
        let mut slot = 1;
        for count in [p, q, sp, sq] {
            for i in 0..count {
                initial[slot] = 0.1 / (i + 1) as f64;
                slot += 1;
            }
        }

        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        bounds.extend(std::iter::repeat((-0.99, 0.99)).take(self.coefficient_count()));

        let order = self.order;
        let seasonal = self.seasonal;
        let outcome = minimize(
            |params| {
                let intercept = params[0];
                let (ar, rest) = params[1..].split_at(p);
                let (ma, rest) = rest.split_at(q);
                let (sar, sma) = rest.split_at(sp);
                conditional_sum_of_squares(w, order, seasonal, intercept, ar, ma, sar, sma)
            },
            &initial,
            &bounds,
            SimplexOptions {
                max_iter: 1000,
                tolerance: 1e-8,
                ..Default::default()
            },
        );

        if !outcome.value.is_finite() || outcome.point.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::Fit(
                "coefficient estimation did not converge".to_string(),
            ));
        }

        self.intercept = outcome.point[0];
        let (ar, rest) = outcome.point[1..].split_at(p);
        let (ma, rest) = rest.split_at(q);
        let (sar, sma) = rest.split_at(sp);
        self.ar = ar.to_vec();
        self.ma = ma.to_vec();
        self.sar = sar.to_vec();
        self.sma = sma.to_vec();
        Ok(())
    }

    /// One-step-ahead prediction at index `t` of the transformed series,
    /// given the error history so far.
    fn predict_one(&self, w: &[f64], errors: &[f64], t: usize) -> f64 {
        let s = self.seasonal.s;
        let mut pred = self.intercept;
        for (i, &coeff) in self.ar.iter().enumerate() {
            if t > i {
                pred += coeff * (w[t - 1 - i] - self.intercept);
            }
        }
        for (j, &coeff) in self.sar.iter().enumerate() {
            let lag = s * (j + 1);
            if t >= lag {
                pred += coeff * (w[t - lag] - self.intercept);
            }
        }
        for (i, &coeff) in self.ma.iter().enumerate() {
            if t > i {
                pred += coeff * errors[t - 1 - i];
            }
        }
        for (j, &coeff) in self.sma.iter().enumerate() {
            let lag = s * (j + 1);
            if t >= lag {
                pred += coeff * errors[t - lag];
            }
        }
        pred
    }

    /// Compute fitted values and residuals, then map them back to the
    /// original scale. Warm-up positions keep the observation itself so the
    /// fitted series stays gap-free; their residuals are zero and excluded
    /// from the variance.
    fn evaluate(&mut self, original: &[f64], w: &[f64]) {
        let n = w.len();
        let start = self.warmup();

        let mut fitted_w = vec![f64::NAN; n];
        let mut errors = vec![0.0; n];
        for t in start..n {
            let pred = self.predict_one(w, &errors, t);
            fitted_w[t] = pred;
            errors[t] = w[t] - pred;
        }

        let valid = &errors[start..];
        if !valid.is_empty() {
            let variance = valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64;
            self.residual_variance = Some(variance);

            let n_eff = valid.len() as f64;
            let k = (self.coefficient_count() + 1) as f64;
            let ll = -0.5 * n_eff * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
            self.aic = Some(-2.0 * ll + 2.0 * k);
            self.bic = Some(-2.0 * ll + k * n_eff.ln());
        }

        // The transformed value at index t is the observation at
        // t + diff_offset minus a combination of earlier observations, so a
        // one-step-ahead prediction on the original scale differs from the
        // observation by exactly the transformed-scale error.
        let offset = self.diff_offset();
        let mut fitted = original.to_vec();
        let mut residuals = vec![0.0; original.len()];
        for t in 0..n {
            if fitted_w[t].is_finite() {
                let idx = t + offset;
                fitted[idx] = original[idx] - errors[t];
                residuals[idx] = errors[t];
            }
        }

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        self.transformed = Some(w.to_vec());
        self.transformed_errors = Some(errors);
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let original = self.original.as_ref().ok_or(ForecastError::FitRequired)?;
        let w = self.transformed.as_ref().ok_or(ForecastError::FitRequired)?;
        let errors = self
            .transformed_errors
            .as_ref()
            .ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(vec![]);
        }

        let mut extended = w.clone();
        let mut extended_errors = errors.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let pred = self.predict_one(&extended, &extended_errors, t);
            extended.push(pred);
            // Future shocks are their expectation, zero
            extended_errors.push(0.0);
        }
        let future_w = &extended[w.len()..];

        let z = seasonal_difference(original, self.seasonal.d, self.seasonal.s);
        let future_z = integrate(future_w, &z, self.order.d);
        Ok(seasonal_integrate(
            &future_z,
            original,
            self.seasonal.d,
            self.seasonal.s,
        ))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<IntervalForecast> {
        let point = self.predict(horizon)?;
        let variance = self.residual_variance.unwrap_or(0.0);
        let z = quantile_normal((1.0 + level) / 2.0);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, &pred) in point.iter().enumerate() {
            // Forecast error variance grows with the horizon
            let se = (variance * (h + 1) as f64).sqrt();
            lower.push(pred - z * se);
            upper.push(pred + z * se);
        }

        Ok(IntervalForecast { point, lower, upper })
    }

    fn label(&self) -> String {
        if self.seasonal.s > 0 {
            format!(
                "SARIMA({},{},{})({},{},{})[{}]",
                self.order.p,
                self.order.d,
                self.order.q,
                self.seasonal.p,
                self.seasonal.d,
                self.seasonal.q,
                self.seasonal.s
            )
        } else {
            format!(
                "ARIMA({},{},{})",
                self.order.p, self.order.d, self.order.q
            )
        }
    }

    fn summary(&self) -> String {
        let mut out = String::new();
        let n = self.original.as_ref().map(|o| o.len()).unwrap_or(0);
        let _ = writeln!(out, "{} fit on {} observations", self.label(), n);
        let _ = writeln!(out, "  {:<18} {:>12.6}", "intercept", self.intercept);
        for (i, coeff) in self.ar.iter().enumerate() {
            let _ = writeln!(out, "  {:<18} {:>12.6}", format!("ar.L{}", i + 1), coeff);
        }
        for (i, coeff) in self.ma.iter().enumerate() {
            let _ = writeln!(out, "  {:<18} {:>12.6}", format!("ma.L{}", i + 1), coeff);
        }
        for (j, coeff) in self.sar.iter().enumerate() {
            let lag = self.seasonal.s * (j + 1);
            let _ = writeln!(out, "  {:<18} {:>12.6}", format!("ar.S.L{}", lag), coeff);
        }
        for (j, coeff) in self.sma.iter().enumerate() {
            let lag = self.seasonal.s * (j + 1);
            let _ = writeln!(out, "  {:<18} {:>12.6}", format!("ma.S.L{}", lag), coeff);
        }
        if let Some(variance) = self.residual_variance {
            let _ = writeln!(out, "  {:<18} {:>12.6}", "sigma2", variance);
        }
        if let (Some(aic), Some(bic)) = (self.aic, self.bic) {
            let _ = writeln!(out, "  AIC {:.2}  BIC {:.2}", aic, bic);
        }
        out
    }
}

/// Non-seasonal ARIMA(p, d, q).
#[derive(Debug, Clone)]
pub struct ARIMA {
    engine: Engine,
}

impl ARIMA {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            engine: Engine::new(ModelOrder::new(p, d, q), SeasonalOrder::none()),
        }
    }

    pub fn from_order(order: ModelOrder) -> Self {
        Self {
            engine: Engine::new(order, SeasonalOrder::none()),
        }
    }

    pub fn order(&self) -> ModelOrder {
        self.engine.order
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.engine.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.engine.ma
    }

    pub fn intercept(&self) -> f64 {
        self.engine.intercept
    }

    pub fn aic(&self) -> Option<f64> {
        self.engine.aic
    }

    pub fn bic(&self) -> Option<f64> {
        self.engine.bic
    }
}

impl Forecaster for ARIMA {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        self.engine.fit(series)
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        self.engine.predict(horizon)
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<IntervalForecast> {
        self.engine.predict_with_intervals(horizon, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.engine.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.engine.residuals.as_deref()
    }

    fn residual_std_error(&self) -> Option<f64> {
        self.engine.residual_variance.map(f64::sqrt)
    }

    fn name(&self) -> &str {
        "ARIMA"
    }

    fn summary(&self) -> String {
        self.engine.summary()
    }
}

/// Seasonal ARIMA(p, d, q)(P, D, Q)[s].
#[derive(Debug, Clone)]
pub struct SARIMA {
    engine: Engine,
}

impl SARIMA {
    pub fn new(order: ModelOrder, seasonal: SeasonalOrder) -> Self {
        Self {
            engine: Engine::new(order, seasonal),
        }
    }

    pub fn order(&self) -> ModelOrder {
        self.engine.order
    }

    pub fn seasonal_order(&self) -> SeasonalOrder {
        self.engine.seasonal
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.engine.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.engine.ma
    }

    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.engine.sar
    }

    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.engine.sma
    }

    pub fn intercept(&self) -> f64 {
        self.engine.intercept
    }

    pub fn aic(&self) -> Option<f64> {
        self.engine.aic
    }

    pub fn bic(&self) -> Option<f64> {
        self.engine.bic
    }
}

impl Forecaster for SARIMA {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        self.engine.fit(series)
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        self.engine.predict(horizon)
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<IntervalForecast> {
        self.engine.predict_with_intervals(horizon, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.engine.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.engine.residuals.as_deref()
    }

    fn residual_std_error(&self) -> Option<f64> {
        self.engine.residual_variance.map(f64::sqrt)
    }

    fn name(&self) -> &str {
        "SARIMA"
    }

    fn summary(&self) -> String {
        self.engine.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::hours(i as i64)).collect()
    }

    fn make_series(values: Vec<f64>) -> TimeSeries {
        TimeSeries::new(make_timestamps(values.len()), values).unwrap()
    }

    #[test]
    fn arima_basic_fit_and_predict() {
        let values: Vec<f64> = (0..50)
            .map(|i| 10.0 + 0.5 * i as f64 + (i as f64 * 0.3).sin())
            .collect();
        let ts = make_series(values);

        let mut model = ARIMA::new(1, 1, 1);
        model.fit(&ts).unwrap();

        assert_eq!(model.ar_coefficients().len(), 1);
        assert_eq!(model.ma_coefficients().len(), 1);
        assert!(model.aic().is_some());
        assert!(model.bic().is_some());

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.len(), 5);
        assert!(forecast.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn arima_mean_only_predicts_the_mean() {
        let values = vec![4.0, 6.0, 5.0, 4.0, 6.0, 5.0, 4.0, 6.0, 5.0, 5.0];
        let ts = make_series(values.clone());

        let mut model = ARIMA::new(0, 0, 0);
        model.fit(&ts).unwrap();

        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert_relative_eq!(model.intercept(), expected, epsilon = 1e-9);

        let forecast = model.predict(3).unwrap();
        for value in forecast {
            assert_relative_eq!(value, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn arima_with_differencing_continues_a_trend() {
        let values: Vec<f64> = (0..50).map(|i| 10.0 + 2.0 * i as f64).collect();
        let ts = make_series(values.clone());

        let mut model = ARIMA::new(0, 1, 0);
        model.fit(&ts).unwrap();

        // On a pure linear trend the differenced series is constant, so the
        // forecast keeps climbing by the same increment
        let forecast = model.predict(3).unwrap();
        assert_relative_eq!(forecast[0], 110.0, epsilon = 1e-6);
        assert_relative_eq!(forecast[1], 112.0, epsilon = 1e-6);
        assert_relative_eq!(forecast[2], 114.0, epsilon = 1e-6);
    }

    #[test]
    fn arima_fitted_values_track_the_original_scale() {
        let values: Vec<f64> = (0..60).map(|i| 5.0 + 1.5 * i as f64).collect();
        let ts = make_series(values.clone());

        let mut model = ARIMA::new(1, 1, 0);
        model.fit(&ts).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert_eq!(fitted.len(), values.len());
        // After warm-up, one-step-ahead predictions on a clean trend are tight
        for (f, y) in fitted.iter().zip(&values).skip(5) {
            assert_relative_eq!(f, y, epsilon = 1e-3);
        }

        let residuals = model.residuals().unwrap();
        assert_eq!(residuals.len(), values.len());
        assert!(residuals.iter().skip(5).all(|r| r.abs() < 1e-3));
    }

    #[test]
    fn arima_intervals_are_finite_ordered_and_widening() {
        let values: Vec<f64> = (0..50)
            .map(|i| 10.0 + 0.5 * i as f64 + (i as f64 * 0.3).sin())
            .collect();
        let ts = make_series(values);

        let mut model = ARIMA::new(1, 1, 1);
        model.fit(&ts).unwrap();

        let forecast = model.predict_with_intervals(5, 0.75).unwrap();
        for h in 0..5 {
            assert!(forecast.lower[h].is_finite());
            assert!(forecast.upper[h].is_finite());
            assert!(forecast.upper[h] >= forecast.lower[h]);
        }
        let first_width = forecast.upper[0] - forecast.lower[0];
        let last_width = forecast.upper[4] - forecast.lower[4];
        assert!(last_width >= first_width);
    }

    #[test]
    fn interval_nesting_across_levels() {
        let values: Vec<f64> = (0..60)
            .map(|i| 20.0 + (i as f64 * 0.4).sin() * 3.0 + (i % 5) as f64 * 0.2)
            .collect();
        let ts = make_series(values);

        let mut model = ARIMA::new(1, 0, 0);
        model.fit(&ts).unwrap();

        let narrow = model.predict_with_intervals(6, 0.25).unwrap();
        let mid = model.predict_with_intervals(6, 0.50).unwrap();
        let wide = model.predict_with_intervals(6, 0.75).unwrap();

        for h in 0..6 {
            assert!(narrow.lower[h] >= mid.lower[h]);
            assert!(mid.lower[h] >= wide.lower[h]);
            assert!(narrow.upper[h] <= mid.upper[h]);
            assert!(mid.upper[h] <= wide.upper[h]);
        }
    }

    #[test]
    fn arima_rejects_short_series() {
        let ts = make_series(vec![1.0, 2.0, 3.0]);
        let mut model = ARIMA::new(2, 1, 1);
        assert!(matches!(
            model.fit(&ts),
            Err(ForecastError::InsufficientData { .. })
        ));
    }

    #[test]
    fn arima_rejects_gapped_series() {
        let ts = make_series(vec![1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let mut model = ARIMA::new(1, 0, 0);
        assert!(matches!(model.fit(&ts), Err(ForecastError::Fit(_))));
    }

    #[test]
    fn prediction_requires_fit() {
        let model = ARIMA::new(1, 1, 1);
        assert!(matches!(model.predict(5), Err(ForecastError::FitRequired)));
        assert!(!model.is_fitted());
    }

    #[test]
    fn zero_horizon_is_empty() {
        let values: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let ts = make_series(values);

        let mut model = ARIMA::new(1, 1, 1);
        model.fit(&ts).unwrap();
        assert!(model.predict(0).unwrap().is_empty());
    }

    #[test]
    fn sarima_pure_seasonal_difference_repeats_the_cycle() {
        // A ramp that gains 4 per cycle of length 4: seasonal differences
        // are constant, so the forecast extends the ramp exactly
        let values: Vec<f64> = (1..=16).map(|i| i as f64).collect();
        let ts = make_series(values);

        let mut model = SARIMA::new(ModelOrder::new(0, 0, 0), SeasonalOrder::new(0, 1, 0, 4));
        model.fit(&ts).unwrap();

        let forecast = model.predict(4).unwrap();
        assert_relative_eq!(forecast[0], 17.0, epsilon = 1e-6);
        assert_relative_eq!(forecast[1], 18.0, epsilon = 1e-6);
        assert_relative_eq!(forecast[2], 19.0, epsilon = 1e-6);
        assert_relative_eq!(forecast[3], 20.0, epsilon = 1e-6);
    }

    #[test]
    fn sarima_tracks_a_seasonal_pattern() {
        // Strong period-6 pattern with mild noise
        let pattern = [10.0, 14.0, 22.0, 30.0, 24.0, 12.0];
        let values: Vec<f64> = (0..72)
            .map(|i| pattern[i % 6] + ((i * 7) % 5) as f64 * 0.1)
            .collect();
        let ts = make_series(values);

        let mut model = SARIMA::new(ModelOrder::new(0, 0, 0), SeasonalOrder::new(1, 1, 0, 6));
        model.fit(&ts).unwrap();

        let forecast = model.predict(6).unwrap();
        for (h, expected) in pattern.iter().enumerate() {
            assert!(
                (forecast[h] - expected).abs() < 2.0,
                "h={} forecast={} expected~{}",
                h,
                forecast[h],
                expected
            );
        }
    }

    #[test]
    fn summary_reports_order_and_diagnostics() {
        let values: Vec<f64> = (0..40)
            .map(|i| 10.0 + (i as f64 * 0.3).sin())
            .collect();
        let ts = make_series(values);

        let mut model = ARIMA::new(1, 0, 1);
        model.fit(&ts).unwrap();
        let summary = model.summary();
        assert!(summary.contains("ARIMA(1,0,1)"));
        assert!(summary.contains("ar.L1"));
        assert!(summary.contains("ma.L1"));
        assert!(summary.contains("sigma2"));
        assert!(summary.contains("AIC"));

        let mut seasonal = SARIMA::new(ModelOrder::new(1, 0, 0), SeasonalOrder::new(1, 0, 0, 4));
        seasonal.fit(&ts).unwrap();
        let summary = seasonal.summary();
        assert!(summary.contains("SARIMA(1,0,0)(1,0,0)[4]"));
        assert!(summary.contains("ar.S.L4"));
    }
}
