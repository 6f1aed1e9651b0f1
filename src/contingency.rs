//! 2x2 contingency counts over paired correctness outcomes.

use crate::error::Result;
use crate::trial::{validate_pairing, TrialResult};
use serde::{Deserialize, Serialize};

/// Paired correctness counts for two systems over the same task set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyMatrix {
    /// Tasks both systems solved
    pub both_correct: usize,
    /// Tasks only system A solved
    pub a_only: usize,
    /// Tasks only system B solved
    pub b_only: usize,
    /// Tasks neither system solved
    pub both_wrong: usize,
}

impl ContingencyMatrix {
    /// Build the matrix from two result sequences over the same tasks.
    ///
    /// Validates the pairing preconditions first; any violation aborts
    /// with `InvalidInput`.
    pub fn from_paired(results_a: &[TrialResult], results_b: &[TrialResult]) -> Result<Self> {
        validate_pairing(results_a, results_b)?;
        let mut matrix = Self {
            both_correct: 0,
            a_only: 0,
            b_only: 0,
            both_wrong: 0,
        };
        for (a, b) in results_a.iter().zip(results_b) {
            match (a.correct, b.correct) {
                (true, true) => matrix.both_correct += 1,
                (true, false) => matrix.a_only += 1,
                (false, true) => matrix.b_only += 1,
                (false, false) => matrix.both_wrong += 1,
            }
        }
        Ok(matrix)
    }

    /// Total number of paired tasks.
    pub fn total(&self) -> usize {
        self.both_correct + self.a_only + self.b_only + self.both_wrong
    }

    /// Discordant pairs (exactly one system correct).
    pub fn discordant(&self) -> usize {
        self.a_only + self.b_only
    }

    /// Fraction of tasks system A solved.
    pub fn accuracy_a(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.both_correct + self.a_only) as f64 / total as f64
    }

    /// Fraction of tasks system B solved.
    pub fn accuracy_b(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.both_correct + self.b_only) as f64 / total as f64
    }
}
