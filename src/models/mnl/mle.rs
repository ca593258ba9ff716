//! Maximum-likelihood estimation for the MNL model.
//!
//! Newton-Raphson on the log-likelihood from the all-zero start, using the
//! analytic score and observed information. The inverse information at the
//! final iterate doubles as the coefficient covariance estimate.

use faer::Mat;
use statrs::distribution::{ContinuousCDF, Normal};

use super::design::ChoiceDesign;
use super::likelihood::{choice_probabilities, log_likelihood};
use super::types::MnlError;
use crate::utils::{covariance_from_information, solve_linear_system};

/// Tuning parameters for the Newton iteration.
#[derive(Debug, Clone, Copy)]
pub struct MleOptions {
    /// Maximum Newton steps.
    pub max_iter: usize,
    /// Convergence tolerance on the largest coefficient update.
    pub tolerance: f64,
}

impl Default for MleOptions {
    fn default() -> Self {
        Self {
            max_iter: 50,
            tolerance: 1.0e-8,
        }
    }
}

impl MleOptions {
    /// # Errors
    ///
    /// Returns `MnlError` if options are internally inconsistent.
    pub fn validate(self) -> Result<(), MnlError> {
        if self.max_iter == 0 {
            return Err(MnlError::InvalidMaxIterations);
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MnlError::InvalidTolerance);
        }
        Ok(())
    }
}

/// Confidence interval for a coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Maximum-likelihood fit with Hessian-based covariance.
#[derive(Debug, Clone)]
pub struct MleFit {
    /// Estimated coefficients in design-column order.
    pub beta: Vec<f64>,
    /// Inverse observed information at the final iterate.
    pub covariance: Mat<f64>,
    /// Square roots of the covariance diagonal.
    pub std_errors: Vec<f64>,
    /// Log-likelihood at the final iterate.
    pub log_likelihood: f64,
    /// Newton steps taken.
    pub iterations: usize,
    /// False when the iteration limit was reached before the update shrank
    /// below tolerance. The best iterate is still returned.
    pub converged: bool,
}

/// Fit the MNL model by Newton-Raphson from the zero vector.
///
/// Non-convergence is surfaced through `MleFit::converged` rather than an
/// error, so callers can still inspect the best iterate.
///
/// # Errors
///
/// Returns `MnlError` if options are invalid, the information matrix is
/// singular, or the iteration produces non-finite coefficients.
pub fn fit_mle(design: &ChoiceDesign, options: MleOptions) -> Result<MleFit, MnlError> {
    options.validate()?;

    let dim = design.n_params();
    let mut beta = vec![0.0; dim];
    let mut converged = false;
    let mut iterations = 0;

    for iteration in 1..=options.max_iter {
        iterations = iteration;
        let (score, information) = score_and_information(&beta, design);
        let step = solve_linear_system(&information, &score)?;

        let mut max_step = 0.0f64;
        for (index, value) in beta.iter_mut().enumerate() {
            *value += step[(index, 0)];
            max_step = max_step.max(step[(index, 0)].abs());
        }
        if beta.iter().any(|value| !value.is_finite()) {
            return Err(MnlError::NonConvergence);
        }
        if max_step < options.tolerance {
            converged = true;
            break;
        }
    }

    let (_, information) = score_and_information(&beta, design);
    let covariance = covariance_from_information(&information)?;
    let std_errors = (0..dim)
        .map(|index| covariance[(index, index)].max(0.0).sqrt())
        .collect();
    let fit_log_likelihood = log_likelihood(&beta, design);

    Ok(MleFit {
        beta,
        covariance,
        std_errors,
        log_likelihood: fit_log_likelihood,
        iterations,
        converged,
    })
}

/// Score vector and observed information at `beta`.
///
/// Score: `Σ xᵢ (yᵢ - pᵢ)`. Information per task block:
/// `X'(diag(p) - p p')X`, accumulated across blocks.
fn score_and_information(beta: &[f64], design: &ChoiceDesign) -> (Mat<f64>, Mat<f64>) {
    let dim = design.n_params();
    let probabilities = choice_probabilities(beta, design);
    let mut score = Mat::<f64>::zeros(dim, 1);
    let mut information = Mat::<f64>::zeros(dim, dim);
    let mut weighted = vec![0.0; dim];

    for block in 0..design.n_tasks {
        let start = block * design.n_alts;
        let end = start + design.n_alts;
        weighted.fill(0.0);

        for row in start..end {
            let probability = probabilities[row];
            let residual = design.chosen[row] - probability;
            for i in 0..dim {
                let x_i = design.x[(row, i)];
                score[(i, 0)] += x_i * residual;
                weighted[i] += probability * x_i;
                for j in 0..dim {
                    information[(i, j)] += probability * x_i * design.x[(row, j)];
                }
            }
        }
        for i in 0..dim {
            for j in 0..dim {
                information[(i, j)] -= weighted[i] * weighted[j];
            }
        }
    }
    (score, information)
}

/// Compute Wald confidence intervals from a covariance matrix.
#[must_use]
pub fn coefficient_confidence_intervals(
    beta: &[f64],
    covariance: &Mat<f64>,
    alpha: f64,
) -> Vec<ConfidenceInterval> {
    let z = normal_quantile(1.0 - alpha / 2.0);
    beta.iter()
        .enumerate()
        .map(|(index, estimate)| {
            let se = covariance[(index, index)].max(0.0).sqrt();
            ConfidenceInterval {
                lower: estimate - z * se,
                upper: estimate + z * se,
            }
        })
        .collect()
}

fn normal_quantile(p: f64) -> f64 {
    Normal::new(0.0, 1.0).map_or(f64::NAN, |normal| normal.inverse_cdf(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PartWorths;
    use crate::simulate::{SimulationConfig, simulate_choices};
    use approx::assert_relative_eq;

    fn simulated_design(n_respondents: u32, seed: u64) -> ChoiceDesign {
        let config = SimulationConfig {
            n_respondents,
            seed,
            true_betas: PartWorths::new(1.0, 0.5, -0.8, -0.1),
            ..SimulationConfig::default()
        };
        let dataset = simulate_choices(&config).expect("simulation should succeed");
        ChoiceDesign::from_dataset(&dataset)
    }

    #[test]
    fn fit_converges_on_simulated_data() {
        let design = simulated_design(150, 11);
        let fit = fit_mle(&design, MleOptions::default()).expect("fit should succeed");

        assert!(fit.converged);
        assert!(fit.iterations < 50);
        assert!(fit.log_likelihood.is_finite());
        assert!(fit.beta.iter().all(|value| value.is_finite()));
        assert!(fit.std_errors.iter().all(|se| *se > 0.0));
        // The price part-worth is negative in truth and should come out
        // negative with this much data.
        assert!(fit.beta[3] < 0.0);
    }

    #[test]
    fn iteration_cap_surfaces_as_non_converged_fit() {
        let design = simulated_design(30, 5);
        let options = MleOptions {
            max_iter: 1,
            ..MleOptions::default()
        };
        let fit = fit_mle(&design, options).expect("fit should still return");
        assert!(!fit.converged);
        assert_eq!(fit.iterations, 1);
    }

    #[test]
    fn validate_rejects_zero_iterations() {
        let options = MleOptions {
            max_iter: 0,
            ..MleOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(MnlError::InvalidMaxIterations)
        ));
    }

    #[test]
    fn score_vanishes_at_the_optimum() {
        let design = simulated_design(80, 17);
        let fit = fit_mle(&design, MleOptions::default()).expect("fit should succeed");
        let (score, _) = score_and_information(&fit.beta, &design);
        for i in 0..design.n_params() {
            assert!(score[(i, 0)].abs() < 1.0e-5);
        }
    }

    #[test]
    fn confidence_intervals_use_the_normal_quantile() {
        let covariance = Mat::from_fn(2, 2, |i, j| if i == j { 0.25 } else { 0.0 });
        let intervals = coefficient_confidence_intervals(&[1.0, -1.0], &covariance, 0.05);
        assert_relative_eq!(intervals[0].lower, 1.0 - 1.959_964 * 0.5, epsilon = 1.0e-4);
        assert_relative_eq!(intervals[0].upper, 1.0 + 1.959_964 * 0.5, epsilon = 1.0e-4);
        assert!(intervals[1].lower < -1.0 && intervals[1].upper > -1.0);
    }
}
