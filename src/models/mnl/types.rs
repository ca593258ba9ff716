//! Core public types for the MNL module.

use thiserror::Error;

use super::priors::PriorConfig;
use crate::inference::{InferenceError, McmcConfig};
use crate::input::ChoiceInputError;

/// Errors returned by MNL configuration, validation, and fitting.
#[derive(Debug, Error)]
pub enum MnlError {
    #[error(transparent)]
    InvalidInput(#[from] ChoiceInputError),
    #[error(transparent)]
    InvalidSchedule(#[from] InferenceError),
    #[error("design columns ({design_cols}) must match coefficient length ({coef_len})")]
    DesignCoefficientMismatch { design_cols: usize, coef_len: usize },
    #[error("invalid prior configuration")]
    InvalidPriorConfig,
    #[error("proposal scales must be finite and strictly positive")]
    InvalidProposalScales,
    #[error("optimizer iteration limit must be positive")]
    InvalidMaxIterations,
    #[error("convergence tolerance must be positive and finite")]
    InvalidTolerance,
    #[error("log-posterior is not finite at the initial state")]
    NonFiniteStart,
    #[error("linear solve failed")]
    SolveFailed,
    #[error("MNL fitting produced non-finite coefficients")]
    NonConvergence,
}

/// Per-dimension standard deviations of the Gaussian random-walk proposal.
///
/// Defaults follow the reference conjoint design: 0.05 for the three
/// indicator columns and a tighter 0.005 step for price, whose utility
/// impact per unit is roughly an order of magnitude larger.
#[derive(Debug, Clone)]
pub struct ProposalScales {
    pub scales: Vec<f64>,
}

impl Default for ProposalScales {
    fn default() -> Self {
        Self {
            scales: vec![0.05, 0.05, 0.05, 0.005],
        }
    }
}

impl ProposalScales {
    /// Whether all proposal scales are numerically usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.scales.is_empty()
            && self
                .scales
                .iter()
                .all(|scale| scale.is_finite() && *scale > 0.0)
    }
}

/// Full sampler configuration for MNL posterior simulation.
#[derive(Debug, Clone, Default)]
pub struct MnlSamplerConfig {
    pub schedule: McmcConfig,
    pub prior: PriorConfig,
    pub proposal: ProposalScales,
    /// Optional warm start; `None` starts the chain at the zero vector.
    pub init: Option<Vec<f64>>,
}

impl MnlSamplerConfig {
    /// # Errors
    ///
    /// Returns `MnlError` if any configuration block is invalid. Malformed
    /// priors and proposal scales are rejected here, before the chain runs.
    pub fn validate(&self) -> Result<(), MnlError> {
        self.schedule.validate()?;
        if !self.prior.is_valid() {
            return Err(MnlError::InvalidPriorConfig);
        }
        if !self.proposal.is_valid() {
            return Err(MnlError::InvalidProposalScales);
        }
        Ok(())
    }
}

/// Sampler run summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MnlSamplerReport {
    pub iterations_completed: usize,
    pub retained_draws: usize,
    pub acceptance_rate: f64,
}
