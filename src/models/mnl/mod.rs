//! Multinomial-logit estimation for conjoint choice data.
//!
//! The estimation surface has two strategies over one shared likelihood:
//! a Newton maximum-likelihood fit with Hessian-based covariance, and a
//! Metropolis-Hastings sampler under independent Gaussian priors.

pub mod design;
pub mod diagnostics;
pub mod likelihood;
pub mod mle;
pub mod posterior;
pub mod priors;
pub mod sampler;
pub mod types;

pub use design::ChoiceDesign;
pub use diagnostics::{autocorrelation, effective_sample_size};
pub use likelihood::{choice_probabilities, log_likelihood};
pub use mle::{
    ConfidenceInterval, MleFit, MleOptions, coefficient_confidence_intervals, fit_mle,
};
pub use posterior::{
    Histogram, ParameterSummary, PosteriorChain, histogram, summarize_posterior,
};
pub use priors::{PriorConfig, log_prior, log_zero_mean_normal_density};
pub use sampler::{log_posterior, sample_posterior};
pub use types::{MnlError, MnlSamplerConfig, MnlSamplerReport, ProposalScales};
