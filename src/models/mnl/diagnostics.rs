//! Chain diagnostics for scalar posterior traces.

/// Lag-`k` autocorrelation for a scalar chain.
#[must_use]
pub fn autocorrelation(series: &[f64], lag: usize) -> f64 {
    if series.is_empty() || lag >= series.len() {
        return 0.0;
    }

    let n = series.len() - lag;
    let mean = series.iter().sum::<f64>() / usize_to_f64(series.len());

    let mut denominator = 0.0;
    for value in series {
        let centered = value - mean;
        denominator += centered * centered;
    }
    if denominator <= 0.0 {
        return 0.0;
    }

    let mut numerator = 0.0;
    for idx in 0..n {
        numerator += (series[idx] - mean) * (series[idx + lag] - mean);
    }
    numerator / denominator
}

/// Heuristic effective sample size using positive-autocorrelation truncation.
#[must_use]
pub fn effective_sample_size(series: &[f64]) -> f64 {
    let n = series.len();
    if n < 2 {
        return usize_to_f64(n);
    }

    let mut rho_sum = 0.0;
    for lag in 1..n {
        let rho = autocorrelation(series, lag);
        if rho <= 0.0 {
            break;
        }
        rho_sum += rho;
    }

    usize_to_f64(n) / (2.0f64.mul_add(rho_sum, 1.0)).max(1.0)
}

fn usize_to_f64(value: usize) -> f64 {
    f64::from(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn autocorrelation_at_lag_zero_is_one() {
        let series = [1.0, 2.0, 0.5, 1.5, 2.5];
        assert_relative_eq!(autocorrelation(&series, 0), 1.0);
    }

    #[test]
    fn constant_series_has_zero_autocorrelation() {
        let series = [2.0; 10];
        assert_relative_eq!(autocorrelation(&series, 1), 0.0);
    }

    #[test]
    fn repeated_states_shrink_effective_sample_size() {
        let independent: Vec<f64> = (0..100)
            .map(|idx| if idx % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let sticky: Vec<f64> = (0..100)
            .map(|idx| if (idx / 10) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        assert!(effective_sample_size(&sticky) < effective_sample_size(&independent));
    }
}
