// Cohen's d effect size with pooled standard deviation
//
// Scientific Foundation:
// - Cohen (1988): standardized mean difference with the conventional
//   0.2 / 0.5 / 0.8 magnitude thresholds
// - Pooled SD over two equal-size samples, n - 1 variances

use crate::descriptive::{mean, sample_variance};
use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conventional magnitude label for |d|
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl Magnitude {
    /// Classify a Cohen's d value by its absolute magnitude.
    pub fn from_cohens_d(d: f64) -> Self {
        let abs = d.abs();
        if abs < 0.2 {
            Self::Negligible
        } else if abs < 0.5 {
            Self::Small
        } else if abs < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect size of the difference between two metric samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSizeResult {
    /// Standardized mean difference, A minus B over the pooled SD
    pub cohens_d: f64,

    /// Magnitude classification of |d|
    pub magnitude_label: Magnitude,
}

/// Compute Cohen's d between two metric samples of equal length.
///
/// The sign carries direction: negative d means system A's values are
/// smaller. Two constant samples at the same level yield d = 0; constant
/// samples at different levels have no finite d and are surfaced as
/// `DegenerateVariance`.
pub fn cohens_d(values_a: &[f64], values_b: &[f64]) -> Result<EffectSizeResult> {
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

    let mean_a = mean(values_a);
    let mean_b = mean(values_b);
    let pooled_sd = ((sample_variance(values_a) + sample_variance(values_b)) / 2.0).sqrt();

    if pooled_sd == 0.0 {
        if mean_a == mean_b {
            return Ok(EffectSizeResult {
                cohens_d: 0.0,
                magnitude_label: Magnitude::Negligible,
            });
        }
        return Err(CompareError::DegenerateVariance {
            mean_difference: mean_a - mean_b,
        });
    }

    let d = (mean_a - mean_b) / pooled_sd;
    Ok(EffectSizeResult {
        cohens_d: d,
        magnitude_label: Magnitude::from_cohens_d(d),
    })
}
