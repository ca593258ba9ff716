use choice_models::{
    ChoiceDesign, McmcConfig, MleOptions, MnlSamplerConfig, PARAMETER_NAMES, PartWorths,
    SimulationConfig, coefficient_confidence_intervals, effective_sample_size, fit_mle,
    histogram, render_estimation_tables, sample_posterior, simulate_choices,
    summarize_posterior,
};

const N_RESPONDENTS: u32 = 100;
const N_TASKS: u32 = 10;
const SIMULATION_SEED: u64 = 123;
const CHAIN_SEED: u64 = 42;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let truth = PartWorths::new(1.0, 0.5, -0.8, -0.1);
    let simulation = SimulationConfig {
        n_respondents: N_RESPONDENTS,
        n_tasks: N_TASKS,
        true_betas: truth,
        seed: SIMULATION_SEED,
        ..SimulationConfig::default()
    };
    let dataset = simulate_choices(&simulation)?;
    let design = ChoiceDesign::from_dataset(&dataset);

    println!("Conjoint MNL parameter-recovery validation");
    println!(
        "Synthetic experiment: respondents={N_RESPONDENTS}, tasks={N_TASKS}, alternatives={}, rows={}",
        dataset.n_alts(),
        dataset.records().len()
    );

    let fit = fit_mle(&design, MleOptions::default())?;
    let intervals = coefficient_confidence_intervals(&fit.beta, &fit.covariance, 0.05);
    println!(
        "MLE: log-likelihood={:.3}, iterations={}, converged={}",
        fit.log_likelihood, fit.iterations, fit.converged
    );

    let sampler_config = MnlSamplerConfig {
        schedule: McmcConfig {
            iterations: 11_000,
            burn_in: 1_000,
            thin: 1,
            seed: CHAIN_SEED,
        },
        ..MnlSamplerConfig::default()
    };
    let (chain, report) = sample_posterior(&design, &sampler_config)?;
    println!(
        "Sampler: iterations={}, retained draws={}, acceptance rate={:.2}",
        report.iterations_completed, report.retained_draws, report.acceptance_rate
    );

    let summaries = summarize_posterior(&chain);
    let tables = render_estimation_tables(&fit, &intervals, &summaries, &PARAMETER_NAMES);
    println!("\nMaximum likelihood\n{}", tables.mle);
    println!("Posterior (Metropolis-Hastings)\n{}", tables.posterior);

    let price_trace = chain.trace(3);
    let price_hist = histogram(&price_trace, 20);
    println!(
        "Price trace: effective sample size={:.0}, histogram bins={}",
        effective_sample_size(&price_trace),
        price_hist.counts.len()
    );

    let truth_vec = truth.to_vec();
    let within_three_se = fit
        .beta
        .iter()
        .zip(&fit.std_errors)
        .zip(&truth_vec)
        .all(|((estimate, se), true_value)| (estimate - true_value).abs() < 3.0 * se);
    let price_interval_excludes_zero = intervals[3].upper < 0.0;
    let posterior_price_in_mle_interval =
        summaries[3].mean > intervals[3].lower && summaries[3].mean < intervals[3].upper;
    let acceptance_in_band = report.acceptance_rate > 0.15 && report.acceptance_rate < 0.60;

    let checks = [
        ("every part-worth within 3 SE of truth", within_three_se),
        ("price 95% CI excludes zero", price_interval_excludes_zero),
        (
            "posterior price mean inside MLE 95% CI",
            posterior_price_in_mle_interval,
        ),
        ("acceptance rate in (0.15, 0.60)", acceptance_in_band),
    ];

    println!("\nValidation checks");
    let passed = checks.iter().filter(|(_, ok)| *ok).count();
    for (name, ok) in checks {
        let status = if ok { "PASS" } else { "FAIL" };
        println!("{name}: {status}");
    }
    println!("Checks passed: {passed}/4");

    Ok(())
}
