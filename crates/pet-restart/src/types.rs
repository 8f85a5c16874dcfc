//! Checkpoint record type and last-sample accessors.

use crate::{RestartError, RestartResult};
use std::collections::HashMap;

/// A prior run's output data, held fully in memory.
///
/// Each entry is a row-major 2-D array. Scalar time series (`current`,
/// `phi_applied`, filling fractions, particle averages) are stored as one
/// row of T samples; spatial series (reaction rates, potentials,
/// concentration profiles) are stored as T rows of N values.
#[derive(Debug, Clone, Default)]
pub struct CheckpointRecord {
    data: HashMap<String, Vec<Vec<f64>>>,
}

impl CheckpointRecord {
    pub fn new(data: HashMap<String, Vec<Vec<f64>>>) -> Self {
        Self { data }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    fn series(&self, key: &str) -> RestartResult<&Vec<Vec<f64>>> {
        self.data.get(key).ok_or_else(|| RestartError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Last sample of a scalar time series (first row, trailing element).
    pub fn last_scalar(&self, key: &str) -> RestartResult<f64> {
        let rows = self.series(key)?;
        let row = rows.first().ok_or_else(|| RestartError::EmptySeries {
            key: key.to_string(),
        })?;
        row.last().copied().ok_or_else(|| RestartError::EmptySeries {
            key: key.to_string(),
        })
    }

    /// Last time sample of a spatial series (final row), checked against
    /// the live configuration's expected length.
    pub fn last_row(&self, key: &str, expected: usize) -> RestartResult<&[f64]> {
        let rows = self.series(key)?;
        let row = rows.last().ok_or_else(|| RestartError::EmptySeries {
            key: key.to_string(),
        })?;
        if row.len() != expected {
            return Err(RestartError::ShapeMismatch {
                key: key.to_string(),
                expected,
                found: row.len(),
            });
        }
        Ok(row)
    }
}
