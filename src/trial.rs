//! Trial records and pairing helpers.
//!
//! A comparison consumes two sequences of [`TrialResult`] covering the same
//! ordered task set. Pairing is positional and checked against task ids
//! before any statistic is computed.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Positional label for the two compared sequences
///
/// System A is always the first sequence passed to a comparison, B the
/// second. Report fields use this label; the report header maps it back
/// to the concrete system ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemLabel {
    A,
    B,
}

impl SystemLabel {
    /// The opposite label.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for SystemLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// One task outcome from one system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// System that produced the trial
    pub system_id: String,
    /// Task identifier; the pairing key across systems
    pub task_id: String,
    /// Binary correctness outcome
    pub correct: bool,
    /// Named continuous measurements (e.g. cost, latency_seconds)
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl TrialResult {
    /// Create a trial with no metrics attached.
    pub fn new(system_id: impl Into<String>, task_id: impl Into<String>, correct: bool) -> Self {
        Self {
            system_id: system_id.into(),
            task_id: task_id.into(),
            correct,
            metrics: BTreeMap::new(),
        }
    }

    /// Attach one metric value, builder style.
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

/// Validate the pairing preconditions for two result sequences.
///
/// Checks that both sequences are non-empty and equal in length, that task
/// ids agree at every index, and that each sequence carries a single
/// system id. Any violation aborts the whole comparison.
pub fn validate_pairing(results_a: &[TrialResult], results_b: &[TrialResult]) -> Result<()> {
    if results_a.is_empty() || results_b.is_empty() {
        return Err(CompareError::invalid_input("empty result sequences"));
    }
    if results_a.len() != results_b.len() {
        return Err(CompareError::length_mismatch(
            results_a.len(),
            results_b.len(),
        ));
    }
    for (i, (a, b)) in results_a.iter().zip(results_b).enumerate() {
        if a.task_id != b.task_id {
            return Err(CompareError::task_mismatch(i, &a.task_id, &b.task_id));
        }
    }
    for (label, results) in [("A", results_a), ("B", results_b)] {
        let first = &results[0].system_id;
        if let Some(other) = results.iter().find(|t| t.system_id != *first) {
            return Err(CompareError::invalid_input(format!(
                "sequence for system {} mixes system ids: {:?} and {:?}",
                label, first, other.system_id
            )));
        }
    }
    Ok(())
}

/// Extract the paired values of one metric, preserving task order.
///
/// Only indices where both sides carry the metric contribute a pair. A
/// short result is not an error here; the per-metric tests enforce their
/// own minimum sample sizes.
pub fn paired_metric(
    results_a: &[TrialResult],
    results_b: &[TrialResult],
    name: &str,
) -> (Vec<f64>, Vec<f64>) {
    let mut values_a = Vec::new();
    let mut values_b = Vec::new();
    for (a, b) in results_a.iter().zip(results_b) {
        if let (Some(&va), Some(&vb)) = (a.metrics.get(name), b.metrics.get(name)) {
            values_a.push(va);
            values_b.push(vb);
        }
    }
    (values_a, values_b)
}
