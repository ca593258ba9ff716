#![forbid(unsafe_code)]

//! # `choice_models`
//!
//! Conjoint choice simulation and multinomial-logit (MNL) estimation:
//! a seeded synthetic-data generator, a grouped design-matrix builder, a
//! numerically stable MNL likelihood, a Newton maximum-likelihood fit with
//! Hessian-based covariance, and a Metropolis-Hastings posterior sampler
//! under independent Gaussian priors.
//!
//! Everything is single-threaded and deterministic given its seed; random
//! streams are owned, explicitly seeded generator handles rather than
//! ambient process state.

pub mod inference;
pub mod input;
pub mod io;
pub mod models;
pub mod report;
pub mod simulate;
pub mod utils;

pub use inference::{InferenceError, McmcConfig, ProposalStats};
pub use input::{
    AdPolicy, Brand, CatalogError, ChoiceDataset, ChoiceInputError, ChoiceRecord,
    PARAMETER_NAMES, PartWorths, Profile, ProfileCatalog,
};
pub use io::{CsvError, read_csv, write_csv};
pub use report::{
    EstimationTables, render_estimation_tables, render_mle_table, render_posterior_table,
};
pub use simulate::{SimulationConfig, SimulationError, simulate_choices};

pub use models::mnl::{
    ChoiceDesign, ConfidenceInterval, Histogram, MleFit, MleOptions, MnlError, MnlSamplerConfig,
    MnlSamplerReport, ParameterSummary, PosteriorChain, PriorConfig, ProposalScales,
    autocorrelation, choice_probabilities, coefficient_confidence_intervals,
    effective_sample_size, fit_mle, histogram, log_likelihood, log_posterior, log_prior,
    log_zero_mean_normal_density, sample_posterior, summarize_posterior,
};
