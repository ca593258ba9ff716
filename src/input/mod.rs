//! # Choice-experiment inputs
//!
//! Long-format containers for conjoint choice data: one record per
//! alternative, grouped in contiguous blocks of `n_alts` rows per
//! `(respondent, task)` pair. The block structure is the invariant the
//! likelihood relies on, so it is enforced here, at construction time,
//! rather than trusted downstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod profiles;

pub use profiles::{
    AdPolicy, Brand, CatalogError, PARAMETER_NAMES, PartWorths, Profile, ProfileCatalog,
};

/// Errors returned when validating choice data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoiceInputError {
    #[error("dataset contains no records")]
    Empty,
    #[error("alternatives per task must be at least 2")]
    InvalidAlternativeCount,
    #[error("task ({resp}, {task}) has {rows} rows; expected {expected}")]
    TaskSize {
        resp: u32,
        task: u32,
        rows: usize,
        expected: usize,
    },
    #[error("task ({resp}, {task}) marks {count} chosen alternatives; expected exactly 1")]
    ChosenCount { resp: u32, task: u32, count: usize },
    #[error("record in task ({resp}, {task}) has a non-finite price")]
    NonFinitePrice { resp: u32, task: u32 },
    #[error("choice indicators must be 0 or 1")]
    InvalidChoiceFlag,
}

/// One alternative as observed by the analyst.
///
/// Latent utilities and noise never appear here; only the attribute levels
/// and the binary choice indicator survive generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub resp: u32,
    pub task: u32,
    pub brand: Brand,
    #[serde(rename = "ad")]
    pub ads: AdPolicy,
    pub price: f64,
    pub choice: u8,
}

impl ChoiceRecord {
    #[must_use]
    pub const fn profile(&self) -> Profile {
        Profile {
            brand: self.brand,
            ads: self.ads,
            price: self.price,
        }
    }
}

/// Immutable long-format choice dataset.
#[derive(Debug, Clone)]
pub struct ChoiceDataset {
    records: Vec<ChoiceRecord>,
    n_alts: usize,
}

impl ChoiceDataset {
    /// Wrap validated records.
    ///
    /// Records must arrive sorted by `(resp, task, alternative order)` so
    /// that each task forms one contiguous block of `n_alts` rows.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceInputError` if any block has the wrong row count, does
    /// not mark exactly one chosen alternative, or carries malformed values.
    pub fn new(records: Vec<ChoiceRecord>, n_alts: usize) -> Result<Self, ChoiceInputError> {
        validate_records(&records, n_alts)?;
        Ok(Self { records, n_alts })
    }

    #[must_use]
    pub fn records(&self) -> &[ChoiceRecord] {
        &self.records
    }

    #[must_use]
    pub const fn n_alts(&self) -> usize {
        self.n_alts
    }

    /// Number of choice tasks (row blocks) in the dataset.
    #[must_use]
    pub fn n_tasks(&self) -> usize {
        self.records.len() / self.n_alts
    }
}

fn validate_records(records: &[ChoiceRecord], n_alts: usize) -> Result<(), ChoiceInputError> {
    if n_alts < 2 {
        return Err(ChoiceInputError::InvalidAlternativeCount);
    }
    if records.is_empty() {
        return Err(ChoiceInputError::Empty);
    }

    let mut start = 0;
    while start < records.len() {
        let resp = records[start].resp;
        let task = records[start].task;
        let mut end = start + 1;
        while end < records.len() && records[end].resp == resp && records[end].task == task {
            end += 1;
        }

        let rows = end - start;
        if rows != n_alts {
            return Err(ChoiceInputError::TaskSize {
                resp,
                task,
                rows,
                expected: n_alts,
            });
        }

        let mut chosen = 0;
        for record in &records[start..end] {
            if record.choice > 1 {
                return Err(ChoiceInputError::InvalidChoiceFlag);
            }
            if !record.price.is_finite() {
                return Err(ChoiceInputError::NonFinitePrice { resp, task });
            }
            chosen += usize::from(record.choice == 1);
        }
        if chosen != 1 {
            return Err(ChoiceInputError::ChosenCount {
                resp,
                task,
                count: chosen,
            });
        }

        start = end;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(resp: u32, task: u32, price: f64, choice: u8) -> ChoiceRecord {
        ChoiceRecord {
            resp,
            task,
            brand: Brand::Netflix,
            ads: AdPolicy::AdFree,
            price,
            choice,
        }
    }

    fn well_formed_task(resp: u32, task: u32) -> Vec<ChoiceRecord> {
        vec![
            record(resp, task, 8.0, 1),
            record(resp, task, 12.0, 0),
            record(resp, task, 16.0, 0),
        ]
    }

    #[test]
    fn new_accepts_contiguous_blocks() {
        let mut records = well_formed_task(1, 1);
        records.extend(well_formed_task(1, 2));
        records.extend(well_formed_task(2, 1));
        let dataset = ChoiceDataset::new(records, 3).expect("dataset should validate");
        assert_eq!(dataset.n_tasks(), 3);
    }

    #[test]
    fn new_rejects_short_task_block() {
        let mut records = well_formed_task(1, 1);
        records.pop();
        let err = ChoiceDataset::new(records, 3).expect_err("short block should fail");
        assert!(matches!(
            err,
            ChoiceInputError::TaskSize {
                resp: 1,
                task: 1,
                rows: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn new_rejects_multiple_chosen_alternatives() {
        let mut records = well_formed_task(1, 1);
        records[1].choice = 1;
        let err = ChoiceDataset::new(records, 3).expect_err("double choice should fail");
        assert!(matches!(err, ChoiceInputError::ChosenCount { count: 2, .. }));
    }

    #[test]
    fn new_rejects_zero_chosen_alternatives() {
        let mut records = well_formed_task(1, 1);
        records[0].choice = 0;
        let err = ChoiceDataset::new(records, 3).expect_err("no choice should fail");
        assert!(matches!(err, ChoiceInputError::ChosenCount { count: 0, .. }));
    }

    #[test]
    fn new_rejects_non_finite_price() {
        let mut records = well_formed_task(1, 1);
        records[2].price = f64::INFINITY;
        let err = ChoiceDataset::new(records, 3).expect_err("infinite price should fail");
        assert!(matches!(err, ChoiceInputError::NonFinitePrice { .. }));
    }

    #[test]
    fn new_rejects_empty_dataset() {
        let err = ChoiceDataset::new(Vec::new(), 3).expect_err("empty dataset should fail");
        assert_eq!(err, ChoiceInputError::Empty);
    }
}
