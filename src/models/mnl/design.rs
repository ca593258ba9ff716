//! Numeric design-matrix construction for grouped choice data.

use faer::Mat;

use crate::input::{ChoiceDataset, ChoiceInputError, ChoiceRecord};

/// Row-per-alternative numeric encoding of a choice dataset.
///
/// Rows appear in the dataset's record order, grouped in contiguous blocks
/// of `n_alts` per task; `chosen` shares that exact order. Reshaping rows
/// into blocks therefore recovers the task groupings, which is the invariant
/// the likelihood relies on.
#[derive(Debug, Clone)]
pub struct ChoiceDesign {
    pub x: Mat<f64>,
    pub chosen: Vec<f64>,
    pub n_alts: usize,
    pub n_tasks: usize,
}

impl ChoiceDesign {
    /// Encode an already-validated dataset.
    #[must_use]
    pub fn from_dataset(dataset: &ChoiceDataset) -> Self {
        let records = dataset.records();
        let x = Mat::from_fn(records.len(), 4, |row, col| {
            records[row].profile().design_row()[col]
        });
        let chosen = records
            .iter()
            .map(|record| f64::from(record.choice))
            .collect();
        Self {
            x,
            chosen,
            n_alts: dataset.n_alts(),
            n_tasks: dataset.n_tasks(),
        }
    }

    /// Validate raw records and encode them in one step.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceInputError` if any task block has the wrong row count
    /// or does not mark exactly one chosen alternative.
    pub fn from_records(
        records: Vec<ChoiceRecord>,
        n_alts: usize,
    ) -> Result<Self, ChoiceInputError> {
        let dataset = ChoiceDataset::new(records, n_alts)?;
        Ok(Self::from_dataset(&dataset))
    }

    /// Number of design columns (one coefficient each).
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.x.ncols()
    }
}
