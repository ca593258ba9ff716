//! Posterior chain storage and summaries.

use num_traits::ToPrimitive;

/// Retained posterior draws, one coefficient vector per kept iteration.
#[derive(Debug, Clone, Default)]
pub struct PosteriorChain {
    draws: Vec<Vec<f64>>,
    dim: usize,
}

impl PosteriorChain {
    #[must_use]
    pub fn new(draws: Vec<Vec<f64>>, dim: usize) -> Self {
        debug_assert!(draws.iter().all(|draw| draw.len() == dim));
        Self { draws, dim }
    }

    #[must_use]
    pub fn draws(&self) -> &[Vec<f64>] {
        &self.draws
    }

    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.draws.len()
    }

    /// Ordered draws for one coefficient, for trace plots and diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid coefficient index.
    #[must_use]
    pub fn trace(&self, index: usize) -> Vec<f64> {
        assert!(index < self.dim, "coefficient index out of range");
        self.draws.iter().map(|draw| draw[index]).collect()
    }
}

/// Scalar posterior summary statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub q025: f64,
    pub q50: f64,
    pub q975: f64,
}

/// Compute per-coefficient posterior summaries.
///
/// Pure function: calling it twice on the same chain yields identical
/// results.
#[must_use]
pub fn summarize_posterior(chain: &PosteriorChain) -> Vec<ParameterSummary> {
    if chain.is_empty() {
        return vec![ParameterSummary::default(); chain.dim()];
    }
    (0..chain.dim())
        .map(|index| summarize_scalar(&chain.trace(index)))
        .collect()
}

#[must_use]
fn summarize_scalar(values: &[f64]) -> ParameterSummary {
    if values.is_empty() {
        return ParameterSummary::default();
    }

    let n = usize_to_f64(values.len());
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|value| {
            let centered = value - mean;
            centered * centered
        })
        .sum::<f64>()
        / n.max(1.0);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ParameterSummary {
        mean,
        std_dev: variance.sqrt(),
        q025: percentile(&sorted, 0.025),
        q50: percentile(&sorted, 0.5),
        q975: percentile(&sorted, 0.975),
    }
}

#[must_use]
fn percentile(sorted_values: &[f64], probability: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }

    let clamped = probability.clamp(0.0, 1.0);
    let last = sorted_values.len() - 1;
    let position = clamped * usize_to_f64(last);
    let lower = position.floor().to_usize().unwrap_or(0);
    let upper = position.ceil().to_usize().unwrap_or(last);

    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = position - usize_to_f64(lower);
        (1.0 - weight).mul_add(sorted_values[lower], weight * sorted_values[upper])
    }
}

/// Equal-width histogram of a scalar chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// Bin boundaries, `bins + 1` values from the minimum to the maximum.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Bin `values` into `bins` equal-width intervals over their observed range.
///
/// Degenerate inputs (no values or zero bins) produce an empty histogram;
/// a constant series lands entirely in the first bin.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bins_f = usize_to_f64(bins);
    let width = (max - min) / bins_f;

    let edges = (0..=bins)
        .map(|edge| width.mul_add(usize_to_f64(edge), min))
        .collect();
    let mut counts = vec![0usize; bins];
    for value in values {
        let offset = if width > 0.0 {
            ((value - min) / width)
                .floor()
                .to_usize()
                .unwrap_or(0)
                .min(bins - 1)
        } else {
            0
        };
        counts[offset] += 1;
    }
    Histogram { edges, counts }
}

fn usize_to_f64(value: usize) -> f64 {
    f64::from(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_chain() -> PosteriorChain {
        PosteriorChain::new(
            vec![
                vec![0.0, 1.0],
                vec![2.0, 3.0],
                vec![4.0, 5.0],
            ],
            2,
        )
    }

    #[test]
    fn summarize_reports_per_dimension_statistics() {
        let summaries = summarize_posterior(&sample_chain());
        assert_eq!(summaries.len(), 2);
        assert_relative_eq!(summaries[0].mean, 2.0);
        assert_relative_eq!(summaries[1].mean, 3.0);
        assert_relative_eq!(summaries[0].q50, 2.0);
        assert!(summaries[0].std_dev > 0.0);
    }

    #[test]
    fn summarize_is_idempotent() {
        let chain = sample_chain();
        let first = summarize_posterior(&chain);
        let second = summarize_posterior(&chain);
        for (a, b) in first.iter().zip(&second) {
            assert_relative_eq!(a.mean, b.mean);
            assert_relative_eq!(a.std_dev, b.std_dev);
            assert_relative_eq!(a.q025, b.q025);
            assert_relative_eq!(a.q975, b.q975);
        }
    }

    #[test]
    fn summarize_empty_chain_yields_defaults() {
        let chain = PosteriorChain::new(Vec::new(), 4);
        let summaries = summarize_posterior(&chain);
        assert_eq!(summaries.len(), 4);
        assert_relative_eq!(summaries[0].mean, 0.0);
    }

    #[test]
    fn trace_returns_draws_in_order() {
        let chain = sample_chain();
        assert_eq!(chain.trace(1), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let sorted = [0.0, 1.0, 2.0, 3.0];
        assert_relative_eq!(percentile(&sorted, 0.5), 1.5);
        assert_relative_eq!(percentile(&sorted, 0.0), 0.0);
        assert_relative_eq!(percentile(&sorted, 1.0), 3.0);
    }

    #[test]
    fn histogram_covers_the_range_and_counts_everything() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0];
        let hist = histogram(&values, 4);
        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        assert_relative_eq!(hist.edges[0], 0.0);
        assert_relative_eq!(hist.edges[4], 2.0);
    }

    #[test]
    fn histogram_handles_constant_series() {
        let hist = histogram(&[1.0, 1.0, 1.0], 3);
        assert_eq!(hist.counts, vec![3, 0, 0]);
    }

    #[test]
    fn histogram_of_empty_input_is_empty() {
        assert_eq!(histogram(&[], 4), Histogram::default());
    }
}
