//! Statistical helpers shared by the model family.

/// Approximate quantile function of the standard normal distribution,
/// using the Abramowitz and Stegun rational approximation (26.2.23).
///
/// # Example
/// ```
/// use gridcast::utils::quantile_normal;
///
/// let z = quantile_normal(0.975);
/// assert!((z - 1.96).abs() < 0.01);
/// ```
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = p.min(1.0 - p);
    let t = (-2.0 * tail.ln()).sqrt();

    let numerator = 2.515517 + t * (0.802853 + t * 0.010328);
    let denominator = 1.0 + t * (1.432788 + t * (0.189269 + t * 0.001308));
    let z = t - numerator / denominator;

    if p < 0.5 {
        -z
    } else {
        z
    }
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
