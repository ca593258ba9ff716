//! Multinomial-logit likelihood with per-task log-sum-exp stabilization.

use faer::Mat;

use super::design::ChoiceDesign;
use crate::utils::vec_to_column;

/// Linear utilities `Xβ` as a plain vector.
pub(crate) fn linear_utilities(x: &Mat<f64>, beta: &[f64]) -> Vec<f64> {
    let coefficients = vec_to_column(beta);
    let values = x * &coefficients;
    (0..values.nrows()).map(|row| values[(row, 0)]).collect()
}

/// Log-likelihood of `beta` for grouped choice data.
///
/// Each task block is evaluated as `u_chosen - logsumexp(u)` with the block
/// maximum subtracted before exponentiating, so overflow cannot occur for
/// finite `beta`. The result never exceeds zero; `-inf` appears only when
/// `beta` is extreme enough to underflow the chosen probability.
#[must_use]
pub fn log_likelihood(beta: &[f64], design: &ChoiceDesign) -> f64 {
    let utilities = linear_utilities(&design.x, beta);
    let mut total = 0.0;

    for block in 0..design.n_tasks {
        let start = block * design.n_alts;
        let end = start + design.n_alts;

        let mut max_utility = f64::NEG_INFINITY;
        for row in start..end {
            max_utility = max_utility.max(utilities[row]);
        }

        let mut sum_exp = 0.0;
        let mut chosen_utility = f64::NEG_INFINITY;
        for row in start..end {
            sum_exp += (utilities[row] - max_utility).exp();
            if design.chosen[row] > 0.5 {
                chosen_utility = utilities[row];
            }
        }

        total += chosen_utility - max_utility - sum_exp.ln();
    }
    total
}

/// Per-row choice probabilities from a stable per-block softmax.
///
/// Probabilities within each task block sum to one.
#[must_use]
pub fn choice_probabilities(beta: &[f64], design: &ChoiceDesign) -> Vec<f64> {
    let utilities = linear_utilities(&design.x, beta);
    let mut probabilities = vec![0.0; utilities.len()];

    for block in 0..design.n_tasks {
        let start = block * design.n_alts;
        let end = start + design.n_alts;

        let mut max_utility = f64::NEG_INFINITY;
        for row in start..end {
            max_utility = max_utility.max(utilities[row]);
        }

        let mut sum_exp = 0.0;
        for row in start..end {
            let scaled = (utilities[row] - max_utility).exp();
            probabilities[row] = scaled;
            sum_exp += scaled;
        }
        for row in start..end {
            probabilities[row] /= sum_exp;
        }
    }
    probabilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AdPolicy, Brand, ChoiceRecord};
    use approx::assert_relative_eq;

    fn record(task: u32, brand: Brand, price: f64, choice: u8) -> ChoiceRecord {
        ChoiceRecord {
            resp: 1,
            task,
            brand,
            ads: AdPolicy::AdFree,
            price,
            choice,
        }
    }

    fn two_task_design() -> ChoiceDesign {
        let records = vec![
            record(1, Brand::Netflix, 8.0, 1),
            record(1, Brand::Prime, 12.0, 0),
            record(1, Brand::Hulu, 16.0, 0),
            record(2, Brand::Hulu, 8.0, 0),
            record(2, Brand::Netflix, 24.0, 0),
            record(2, Brand::Prime, 12.0, 1),
        ];
        ChoiceDesign::from_records(records, 3).expect("design should build")
    }

    #[test]
    fn log_likelihood_never_exceeds_zero() {
        let design = two_task_design();
        let candidates = [
            vec![0.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.5, -0.8, -0.1],
            vec![-3.0, 2.0, 1.5, 0.2],
        ];
        for beta in &candidates {
            assert!(log_likelihood(beta, &design) <= 0.0);
        }
    }

    #[test]
    fn zero_coefficients_give_uniform_choice_probabilities() {
        let design = two_task_design();
        let beta = vec![0.0; 4];
        let expected = f64::from(u32::try_from(design.n_tasks).unwrap_or(u32::MAX))
            * (1.0 / 3.0f64).ln();
        assert_relative_eq!(log_likelihood(&beta, &design), expected, epsilon = 1.0e-12);
    }

    #[test]
    fn probabilities_sum_to_one_per_block() {
        let design = two_task_design();
        let beta = vec![1.0, 0.5, -0.8, -0.1];
        let probabilities = choice_probabilities(&beta, &design);
        for block in probabilities.chunks(design.n_alts) {
            assert_relative_eq!(block.iter().sum::<f64>(), 1.0, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn log_likelihood_matches_chosen_probability_product() {
        let design = two_task_design();
        let beta = vec![0.4, -0.3, 0.2, -0.05];
        let probabilities = choice_probabilities(&beta, &design);
        let direct: f64 = probabilities
            .iter()
            .zip(&design.chosen)
            .filter(|(_, chosen)| **chosen > 0.5)
            .map(|(probability, _)| probability.ln())
            .sum();
        assert_relative_eq!(log_likelihood(&beta, &design), direct, epsilon = 1.0e-12);
    }

    #[test]
    fn extreme_coefficients_stay_overflow_free() {
        let design = two_task_design();
        let beta = vec![400.0, -400.0, 300.0, -40.0];
        let value = log_likelihood(&beta, &design);
        assert!(!value.is_nan());
        assert!(value <= 0.0);
    }
}
