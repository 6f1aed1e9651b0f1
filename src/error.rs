//! Error types for paired comparison operations.
//!
//! `InvalidInput` aborts an entire comparison. The other two variants are
//! local to a single sub-test: the aggregator records them as inconclusive
//! components and still produces a report.

use thiserror::Error;

/// Errors for paired comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// Mispaired or malformed input sequences.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A sub-test lacks the minimum paired sample size.
    #[error("Insufficient sample: need at least {required} paired values, got {actual}")]
    InsufficientSample { required: usize, actual: usize },

    /// Zero spread with a nonzero shift; no finite test statistic exists.
    #[error("Degenerate variance: zero spread with mean difference {mean_difference}")]
    DegenerateVariance { mean_difference: f64 },
}

pub type Result<T> = std::result::Result<T, CompareError>;

impl CompareError {
    /// Invalid-input error from any printable reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Result sequences have different lengths.
    pub fn length_mismatch(len_a: usize, len_b: usize) -> Self {
        Self::InvalidInput {
            reason: format!("result sequences differ in length: {} vs {}", len_a, len_b),
        }
    }

    /// Task ids disagree at a paired index.
    pub fn task_mismatch(index: usize, task_a: &str, task_b: &str) -> Self {
        Self::InvalidInput {
            reason: format!(
                "task ids diverge at index {}: {:?} vs {:?}",
                index, task_a, task_b
            ),
        }
    }
}
