// Paired t-test over continuous metric samples
//
// Scientific Foundation:
// - Paired design reduces to a one-sample test on per-task differences
// - t = mean(d) / (sd(d) / sqrt(n)), df = n - 1
// - Two-tailed p-value via the regularized incomplete beta function,
//   I_x(df/2, 1/2) with x = df / (df + t^2)

use crate::descriptive::{mean, sample_std_dev};
use crate::distribution::student_t_two_tailed;
use crate::error::{CompareError, Result};
use crate::SIGNIFICANCE_LEVEL;
use serde::{Deserialize, Serialize};

/// Result of a paired t-test on one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedTTestResult {
    /// t-statistic over the per-task differences (A minus B)
    pub t_statistic: f64,

    /// n - 1 for n paired values
    pub degrees_of_freedom: usize,

    /// Two-tailed p-value
    pub p_value: f64,

    /// p < 0.05
    pub significant: bool,

    /// Mean of the per-task differences (A minus B)
    pub mean_difference: f64,

    /// Mean of system A's values
    pub mean_a: f64,

    /// Mean of system B's values
    pub mean_b: f64,
}

/// Run a paired t-test over two metric samples of equal length.
///
/// Identical samples (every difference zero) are the defined degenerate
/// result t = 0, p = 1.0. Zero spread with a nonzero shift has no finite
/// statistic and is surfaced as `DegenerateVariance` instead of an
/// infinity in the output.
pub fn paired_t_test(values_a: &[f64], values_b: &[f64]) -> Result<PairedTTestResult> {
    if values_a.len() != values_b.len() {
        return Err(CompareError::length_mismatch(
            values_a.len(),
            values_b.len(),
        ));
    }
    let n = values_a.len();
    if n < 2 {
        return Err(CompareError::InsufficientSample {
            required: 2,
            actual: n,
        });
    }

    let differences: Vec<f64> = values_a.iter().zip(values_b).map(|(a, b)| a - b).collect();
    let mean_difference = mean(&differences);
    let sd = sample_std_dev(&differences);
    let degrees_of_freedom = n - 1;
    let mean_a = mean(values_a);
    let mean_b = mean(values_b);

    if sd == 0.0 {
        if mean_difference == 0.0 {
            return Ok(PairedTTestResult {
                t_statistic: 0.0,
                degrees_of_freedom,
                p_value: 1.0,
                significant: false,
                mean_difference: 0.0,
                mean_a,
                mean_b,
            });
        }
        return Err(CompareError::DegenerateVariance { mean_difference });
    }

    let t_statistic = mean_difference / (sd / (n as f64).sqrt());
    let p_value = student_t_two_tailed(t_statistic, degrees_of_freedom as f64);

    Ok(PairedTTestResult {
        t_statistic,
        degrees_of_freedom,
        p_value,
        significant: p_value < SIGNIFICANCE_LEVEL,
        mean_difference,
        mean_a,
        mean_b,
    })
}
