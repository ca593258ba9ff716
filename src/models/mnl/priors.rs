//! Independent Gaussian priors over part-worths.

/// Per-dimension prior variances for `Normal(0, variance)` priors.
///
/// Defaults follow the reference conjoint design: variance 5 for the three
/// indicator-column weights and variance 1 for price.
#[derive(Debug, Clone)]
pub struct PriorConfig {
    pub variances: Vec<f64>,
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            variances: vec![5.0, 5.0, 5.0, 1.0],
        }
    }
}

impl PriorConfig {
    /// Whether all prior variances are numerically valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.variances.is_empty()
            && self
                .variances
                .iter()
                .all(|variance| variance.is_finite() && *variance > 0.0)
    }
}

/// Log-density for `Normal(0, variance)`.
#[must_use]
pub fn log_zero_mean_normal_density(value: f64, variance: f64) -> f64 {
    if variance <= 0.0 {
        return f64::NEG_INFINITY;
    }
    -0.5 * (std::f64::consts::TAU.ln() + variance.ln() + value * value / variance)
}

/// Joint log-prior over all coefficients.
///
/// `beta` and the configured variances must have equal length; the sampler
/// enforces this before the chain starts.
#[must_use]
pub fn log_prior(beta: &[f64], config: &PriorConfig) -> f64 {
    debug_assert_eq!(beta.len(), config.variances.len());
    beta.iter()
        .zip(&config.variances)
        .map(|(value, variance)| log_zero_mean_normal_density(*value, *variance))
        .sum()
}
