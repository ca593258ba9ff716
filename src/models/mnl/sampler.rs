//! Metropolis-Hastings posterior sampling for the MNL model.
//!
//! A single-block Gaussian random walk over the coefficient vector, with
//! independent per-dimension proposal scales. The current log-posterior is
//! cached so each iteration costs one likelihood evaluation.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use super::design::ChoiceDesign;
use super::likelihood::log_likelihood;
use super::posterior::PosteriorChain;
use super::priors::{PriorConfig, log_prior};
use super::types::{MnlError, MnlSamplerConfig, MnlSamplerReport};
use crate::inference::ProposalStats;

/// Unnormalized log-posterior: log-likelihood plus joint log-prior.
#[must_use]
pub fn log_posterior(beta: &[f64], design: &ChoiceDesign, prior: &PriorConfig) -> f64 {
    log_likelihood(beta, design) + log_prior(beta, prior)
}

/// Run the Metropolis-Hastings chain and return the retained draws.
///
/// The chain starts at the zero vector unless `config.init` supplies a warm
/// start. Rejected proposals repeat the current state in the chain; the
/// first `burn_in` iterations are discarded and the remainder thinned by
/// `thin`. Identical configuration and design reproduce the chain exactly.
///
/// # Errors
///
/// Returns `MnlError` if the configuration is invalid, any dimension does
/// not match the design, or the initial log-posterior is not finite.
pub fn sample_posterior(
    design: &ChoiceDesign,
    config: &MnlSamplerConfig,
) -> Result<(PosteriorChain, MnlSamplerReport), MnlError> {
    config.validate()?;

    let dim = design.n_params();
    check_dimension(dim, config.prior.variances.len())?;
    check_dimension(dim, config.proposal.scales.len())?;

    let mut beta = match &config.init {
        Some(init) => {
            check_dimension(dim, init.len())?;
            init.clone()
        }
        None => vec![0.0; dim],
    };

    let schedule = config.schedule;
    let mut rng = StdRng::seed_from_u64(schedule.seed);
    let mut current_log_posterior = log_posterior(&beta, design, &config.prior);
    if !current_log_posterior.is_finite() {
        return Err(MnlError::NonFiniteStart);
    }

    let mut stats = ProposalStats::default();
    let mut draws = Vec::with_capacity(schedule.retained_draws());
    let mut proposal = vec![0.0; dim];

    for iteration in 0..schedule.iterations {
        random_walk_into(
            &mut proposal,
            &beta,
            &config.proposal.scales,
            &mut rng,
        );
        let candidate_log_posterior = log_posterior(&proposal, design, &config.prior);
        let accepted = candidate_log_posterior.is_finite()
            && should_accept(candidate_log_posterior - current_log_posterior, &mut rng);
        if accepted {
            std::mem::swap(&mut beta, &mut proposal);
            current_log_posterior = candidate_log_posterior;
        }
        stats.record(accepted);

        if iteration >= schedule.burn_in
            && (iteration - schedule.burn_in).is_multiple_of(schedule.thin)
        {
            draws.push(beta.clone());
        }
    }

    let chain = PosteriorChain::new(draws, dim);
    let report = MnlSamplerReport {
        iterations_completed: schedule.iterations,
        retained_draws: chain.len(),
        acceptance_rate: stats.acceptance_rate(),
    };
    Ok((chain, report))
}

const fn check_dimension(design_cols: usize, coef_len: usize) -> Result<(), MnlError> {
    if design_cols == coef_len {
        Ok(())
    } else {
        Err(MnlError::DesignCoefficientMismatch {
            design_cols,
            coef_len,
        })
    }
}

fn random_walk_into(output: &mut Vec<f64>, values: &[f64], scales: &[f64], rng: &mut StdRng) {
    output.clear();
    output.extend(
        values
            .iter()
            .zip(scales.iter())
            .map(|(value, scale)| value + scale * sample_standard_normal(rng)),
    );
}

fn should_accept(log_acceptance: f64, rng: &mut StdRng) -> bool {
    log_acceptance >= 0.0 || rng.random::<f64>().ln() < log_acceptance
}

fn sample_standard_normal(rng: &mut StdRng) -> f64 {
    let u1 = (1.0_f64 - rng.random::<f64>()).max(f64::MIN_POSITIVE);
    let u2 = rng.random::<f64>();
    (-2.0_f64 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
