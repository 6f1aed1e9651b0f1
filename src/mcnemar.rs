// McNemar's test over paired correctness outcomes
//
// Scientific Foundation:
// - McNemar (1947): chi-square test on the discordant pairs of a paired
//   binary design
// - Edwards (1948): continuity correction, chi2 = (|b - c| - 1)^2 / (b + c)
// - P-value from the chi-square survival function with df = 1

use crate::contingency::ContingencyMatrix;
use crate::distribution::chi_square_survival;
use crate::trial::SystemLabel;
use crate::SIGNIFICANCE_LEVEL;
use serde::{Deserialize, Serialize};

/// Result of McNemar's test on a contingency matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McNemarResult {
    /// Continuity-corrected chi-square statistic
    pub statistic: f64,

    /// p-value against the chi-square distribution, df = 1
    pub p_value: f64,

    /// p < 0.05
    pub significant: bool,

    /// System with more exclusive successes; None when tied
    pub favored_system: Option<SystemLabel>,
}

/// Run McNemar's test with continuity correction.
///
/// Only the discordant counts enter the statistic: b = tasks only A
/// solved, c = tasks only B solved. Equal discordant counts (including
/// zero) are a defined result, statistic 0 and p exactly 1.0, never an
/// error. Direction is computed from the counts alone; significance is
/// the separate p < 0.05 decision.
pub fn mcnemar_test(matrix: &ContingencyMatrix) -> McNemarResult {
    if matrix.a_only == matrix.b_only {
        return McNemarResult {
            statistic: 0.0,
            p_value: 1.0,
            significant: false,
            favored_system: None,
        };
    }

    let favored_system = if matrix.a_only > matrix.b_only {
        Some(SystemLabel::A)
    } else {
        Some(SystemLabel::B)
    };

    let b = matrix.a_only as f64;
    let c = matrix.b_only as f64;
    let corrected = (b - c).abs() - 1.0;
    let statistic = corrected * corrected / (b + c);
    let p_value = chi_square_survival(statistic, 1.0);

    McNemarResult {
        statistic,
        p_value,
        significant: p_value < SIGNIFICANCE_LEVEL,
        favored_system,
    }
}
