//! CSV interchange for the long-format dataset schema.
//!
//! Columns: `resp,task,brand,ad,price,choice` with brand spelled `N`/`P`/`H`
//! and the ad column `Yes`/`No`. Reading validates the dataset before
//! handing it to the estimator.

use std::io::{Read, Write};

use thiserror::Error;

use crate::input::{ChoiceDataset, ChoiceInputError, ChoiceRecord};

/// Errors returned by CSV reading and writing.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv processing failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Input(#[from] ChoiceInputError),
}

/// Write a dataset in the long-format CSV schema.
///
/// # Errors
///
/// Returns `CsvError` if serialization or the underlying writer fails.
pub fn write_csv<W: Write>(dataset: &ChoiceDataset, writer: W) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in dataset.records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read and validate a dataset from the long-format CSV schema.
///
/// # Errors
///
/// Returns `CsvError` if parsing fails or the records violate the task
/// block structure.
pub fn read_csv<R: Read>(reader: R, n_alts: usize) -> Result<ChoiceDataset, CsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: ChoiceRecord = result?;
        records.push(record);
    }
    Ok(ChoiceDataset::new(records, n_alts)?)
}
