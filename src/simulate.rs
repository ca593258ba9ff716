//! # Synthetic conjoint data
//!
//! Simulates choice experiments from known part-worths: every task draws a
//! fixed-size alternative set from the profile catalog, perturbs the
//! deterministic utilities with i.i.d. standard Gumbel noise, and labels the
//! utility-maximizing alternative as chosen. Latent utilities are used only
//! to produce the label and are never stored.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{RngExt, SeedableRng};
use thiserror::Error;

use crate::input::{ChoiceDataset, ChoiceInputError, ChoiceRecord, PartWorths, ProfileCatalog};

/// Errors returned by the conjoint data generator.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("respondent, task, and alternative counts must be positive")]
    InvalidCounts,
    #[error("alternatives per task ({n_alts}) must not exceed catalog size ({catalog})")]
    TooManyAlternatives { n_alts: usize, catalog: usize },
    #[error(transparent)]
    InvalidDataset(#[from] ChoiceInputError),
}

/// Configuration for one simulated choice experiment.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub n_respondents: u32,
    pub n_tasks: u32,
    pub n_alts: usize,
    pub true_betas: PartWorths,
    /// RNG seed for reproducibility.
    pub seed: u64,
    pub catalog: ProfileCatalog,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_respondents: 100,
            n_tasks: 10,
            n_alts: 3,
            true_betas: PartWorths::new(1.0, 0.5, -0.8, -0.1),
            seed: 123,
            catalog: ProfileCatalog::streaming_default(),
        }
    }
}

impl SimulationConfig {
    /// # Errors
    ///
    /// Returns `SimulationError` if counts are zero or the catalog cannot
    /// supply `n_alts` distinct profiles.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_respondents == 0 || self.n_tasks == 0 || self.n_alts == 0 {
            return Err(SimulationError::InvalidCounts);
        }
        if self.n_alts > self.catalog.len() {
            return Err(SimulationError::TooManyAlternatives {
                n_alts: self.n_alts,
                catalog: self.catalog.len(),
            });
        }
        Ok(())
    }
}

/// Generate a labeled choice dataset.
///
/// Deterministic given `config.seed`; the generator owns its own RNG stream
/// and has no side effects beyond consuming it.
///
/// # Errors
///
/// Returns `SimulationError` if the configuration is invalid.
pub fn simulate_choices(config: &SimulationConfig) -> Result<ChoiceDataset, SimulationError> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let task_count = usize::try_from(config.n_respondents)
        .unwrap_or(0)
        .saturating_mul(usize::try_from(config.n_tasks).unwrap_or(0));
    let mut records = Vec::with_capacity(task_count.saturating_mul(config.n_alts));
    let mut utilities = Vec::with_capacity(config.n_alts);

    for resp in 1..=config.n_respondents {
        for task in 1..=config.n_tasks {
            let picks = index::sample(&mut rng, config.catalog.len(), config.n_alts);

            utilities.clear();
            for catalog_idx in picks.iter() {
                let profile = &config.catalog.profiles()[catalog_idx];
                utilities
                    .push(config.true_betas.utility(profile) + sample_standard_gumbel(&mut rng));
            }
            let best = argmax_first(&utilities);

            for (position, catalog_idx) in picks.iter().enumerate() {
                let profile = config.catalog.profiles()[catalog_idx];
                records.push(ChoiceRecord {
                    resp,
                    task,
                    brand: profile.brand,
                    ads: profile.ads,
                    price: profile.price,
                    choice: u8::from(position == best),
                });
            }
        }
    }

    Ok(ChoiceDataset::new(records, config.n_alts)?)
}

/// Standard Gumbel draw via the inverse CDF `-ln(-ln(U))`.
fn sample_standard_gumbel(rng: &mut StdRng) -> f64 {
    let u = rng.random::<f64>().max(f64::MIN_POSITIVE);
    -(-u.ln()).ln()
}

/// First maximizing index. Exact ties resolve to the lowest index so a task
/// can never mark two chosen alternatives.
fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}
