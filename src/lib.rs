//! Cotejar - Paired statistical comparison of two systems over one task set
//!
//! This library decides whether the observed differences between two
//! systems evaluated on the same ordered tasks are statistically
//! meaningful: McNemar's test on paired correctness, paired t-tests on
//! continuous metrics, Cohen's d effect sizes, and a fixed aggregation
//! rule producing a categorical recommendation with a justification.
//!
//! The entry point is [`report::compare`], which consumes two sequences
//! of [`trial::TrialResult`] and a list of metric names and returns a
//! serializable [`report::ComparisonReport`].

pub mod cli;
pub mod contingency;
pub mod descriptive;
pub mod distribution;
pub mod effect_size;
pub mod error;
pub mod mcnemar;
pub mod report;
pub mod trial;
pub mod ttest;

/// Fixed two-tailed significance level applied by every sub-test and the
/// aggregator. Not configurable.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
