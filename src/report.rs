// Comparison report assembly and the fixed recommendation rule
//
// The aggregator runs every sub-test, tolerates per-metric failures, and
// applies one decision procedure:
//   1. Significant McNemar result confirmed by a significant metric
//      t-test in the same direction -> STRONG preference for the favored
//      system.
//   2. Significant McNemar result alone -> WEAK preference (accuracy
//      edge without a confirmed cost/latency advantage).
//   3. Otherwise, significant metric t-tests that all favor one system
//      -> WEAK preference for it. Metrics are cost-like: lower is better.
//   4. Nothing significant, or metric tests that disagree on a direction
//      -> NO_CLEAR_WINNER.
// Accuracy significance outranks metric significance whenever both exist.

use crate::contingency::ContingencyMatrix;
use crate::effect_size::{cohens_d, EffectSizeResult, Magnitude};
use crate::error::Result;
use crate::mcnemar::{mcnemar_test, McNemarResult};
use crate::trial::{paired_metric, SystemLabel, TrialResult};
use crate::ttest::{paired_t_test, PairedTTestResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which sub-test an inconclusive entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestComponent {
    PairedTTest,
    EffectSize,
}

impl fmt::Display for TestComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PairedTTest => f.write_str("paired_t_test"),
            Self::EffectSize => f.write_str("effect_size"),
        }
    }
}

/// A sub-test that could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InconclusiveTest {
    /// Sub-test that was skipped
    pub component: TestComponent,
    /// Metric the sub-test was running on
    pub metric: String,
    /// Why it was skipped
    pub reason: String,
}

/// Categorical recommendation over the whole comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongA,
    StrongB,
    WeakA,
    WeakB,
    NoClearWinner,
}

impl Recommendation {
    fn strong(label: SystemLabel) -> Self {
        match label {
            SystemLabel::A => Self::StrongA,
            SystemLabel::B => Self::StrongB,
        }
    }

    fn weak(label: SystemLabel) -> Self {
        match label {
            SystemLabel::A => Self::WeakA,
            SystemLabel::B => Self::WeakB,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongA => "STRONG_A",
            Self::StrongB => "STRONG_B",
            Self::WeakA => "WEAK_A",
            Self::WeakB => "WEAK_B",
            Self::NoClearWinner => "NO_CLEAR_WINNER",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete comparison of two systems over one task set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// system_id of the first sequence
    pub system_a: String,

    /// system_id of the second sequence
    pub system_b: String,

    /// Number of paired tasks
    pub tasks: usize,

    /// Fraction of tasks system A solved
    pub accuracy_a: f64,

    /// Fraction of tasks system B solved
    pub accuracy_b: f64,

    /// Paired correctness counts
    pub contingency: ContingencyMatrix,

    /// McNemar's test over the contingency counts
    pub mcnemar: McNemarResult,

    /// Paired t-test per metric
    pub paired_t_test: BTreeMap<String, PairedTTestResult>,

    /// Cohen's d per metric
    pub effect_size: BTreeMap<String, EffectSizeResult>,

    /// Sub-tests that could not be computed
    pub inconclusive: Vec<InconclusiveTest>,

    /// Categorical verdict
    pub recommendation: Recommendation,

    /// Human-readable explanation of the verdict
    pub justification: String,
}

/// Compare two systems' results over the same ordered task set.
///
/// `metric_names` selects which continuous metrics get a paired t-test
/// and an effect size; duplicates are ignored. Metrics are treated as
/// cost-like: lower values are better. Per-metric failures never abort
/// the comparison; they are recorded in `inconclusive` and excluded from
/// the recommendation. Identical inputs always produce byte-identical
/// serialized reports.
pub fn compare(
    results_a: &[TrialResult],
    results_b: &[TrialResult],
    metric_names: &[&str],
) -> Result<ComparisonReport> {
    let contingency = ContingencyMatrix::from_paired(results_a, results_b)?;
    let mcnemar = mcnemar_test(&contingency);
    tracing::debug!(
        statistic = mcnemar.statistic,
        p_value = mcnemar.p_value,
        "mcnemar test complete"
    );

    let mut paired_t_tests = BTreeMap::new();
    let mut effect_sizes = BTreeMap::new();
    let mut inconclusive = Vec::new();
    let mut seen = std::collections::BTreeSet::new();

    for &name in metric_names {
        if !seen.insert(name) {
            continue;
        }
        let (values_a, values_b) = paired_metric(results_a, results_b, name);

        match paired_t_test(&values_a, &values_b) {
            Ok(result) => {
                tracing::debug!(
                    metric = name,
                    t = result.t_statistic,
                    p_value = result.p_value,
                    "paired t-test complete"
                );
                paired_t_tests.insert(name.to_string(), result);
            }
            Err(e) => {
                tracing::warn!("Skipping paired t-test for metric {}: {}", name, e);
                inconclusive.push(InconclusiveTest {
                    component: TestComponent::PairedTTest,
                    metric: name.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        match cohens_d(&values_a, &values_b) {
            Ok(result) => {
                effect_sizes.insert(name.to_string(), result);
            }
            Err(e) => {
                tracing::warn!("Skipping effect size for metric {}: {}", name, e);
                inconclusive.push(InconclusiveTest {
                    component: TestComponent::EffectSize,
                    metric: name.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let (recommendation, justification) = recommend(
        &contingency,
        &mcnemar,
        &paired_t_tests,
        &effect_sizes,
        &inconclusive,
    );

    Ok(ComparisonReport {
        system_a: results_a[0].system_id.clone(),
        system_b: results_b[0].system_id.clone(),
        tasks: contingency.total(),
        accuracy_a: contingency.accuracy_a(),
        accuracy_b: contingency.accuracy_b(),
        contingency,
        mcnemar,
        paired_t_test: paired_t_tests,
        effect_size: effect_sizes,
        inconclusive,
        recommendation,
        justification,
    })
}

/// Apply the fixed decision procedure.
fn recommend(
    contingency: &ContingencyMatrix,
    mcnemar: &McNemarResult,
    paired_t_tests: &BTreeMap<String, PairedTTestResult>,
    effect_sizes: &BTreeMap<String, EffectSizeResult>,
    inconclusive: &[InconclusiveTest],
) -> (Recommendation, String) {
    // Significant metric t-tests with the system each favors; metrics are
    // cost-like, so a negative mean difference (A smaller) favors A
    let significant: Vec<(&str, SystemLabel, &PairedTTestResult)> = paired_t_tests
        .iter()
        .filter(|(_, t)| t.significant)
        .map(|(name, t)| {
            let label = if t.mean_difference < 0.0 {
                SystemLabel::A
            } else {
                SystemLabel::B
            };
            (name.as_str(), label, t)
        })
        .collect();

    // Steps 1 and 2: a significant accuracy difference outranks the
    // metric tests; a metric test in the same direction upgrades it
    if mcnemar.significant {
        if let Some(label) = mcnemar.favored_system {
            let confirming = significant
                .iter()
                .filter(|(_, metric_label, _)| *metric_label == label)
                .min_by(|a, b| a.2.p_value.total_cmp(&b.2.p_value));
            if let Some(&(name, _, test)) = confirming {
                let magnitude = effect_sizes
                    .get(name)
                    .map_or(Magnitude::Negligible, |e| e.magnitude_label);
                return (
                    Recommendation::strong(label),
                    format!(
                        "significant accuracy difference favoring system {} \
                         (McNemar p = {:.4}, accuracy {:.4} vs {:.4}), \
                         confirmed by metric {} (p = {:.4}, {} effect)",
                        label,
                        mcnemar.p_value,
                        contingency.accuracy_a(),
                        contingency.accuracy_b(),
                        name,
                        test.p_value,
                        magnitude
                    ),
                );
            }
            return (
                Recommendation::weak(label),
                format!(
                    "significant accuracy difference favoring system {} \
                     (McNemar p = {:.4}, accuracy {:.4} vs {:.4}); \
                     no metric test confirms the advantage",
                    label,
                    mcnemar.p_value,
                    contingency.accuracy_a(),
                    contingency.accuracy_b()
                ),
            );
        }
    }

    // Step 3: metric t-tests alone
    if !significant.is_empty() {
        let first = significant[0].1;
        if significant.iter().all(|(_, label, _)| *label == first) {
            // Cite the strongest metric (smallest p) in the justification
            let (name, label, test) = significant
                .iter()
                .min_by(|a, b| a.2.p_value.total_cmp(&b.2.p_value))
                .copied()
                .unwrap_or(significant[0]);
            let magnitude = effect_sizes
                .get(name)
                .map_or(Magnitude::Negligible, |e| e.magnitude_label);
            return (
                Recommendation::weak(label),
                format!(
                    "no significant accuracy difference (McNemar p = {:.4}); \
                     metric {} favors system {} (p = {:.4}, {} effect)",
                    mcnemar.p_value, name, label, test.p_value, magnitude
                ),
            );
        }
        let directions: Vec<String> = significant
            .iter()
            .map(|(name, label, _)| format!("{} favors {}", name, label))
            .collect();
        return (
            Recommendation::NoClearWinner,
            format!(
                "significant metric differences disagree on a winner: {}",
                directions.join(", ")
            ),
        );
    }

    // Step 4: nothing significant
    let justification = if paired_t_tests.is_empty() && !inconclusive.is_empty() {
        format!(
            "no significant accuracy difference (McNemar p = {:.4}) and \
             no conclusive metric tests ({} skipped)",
            mcnemar.p_value,
            inconclusive.len()
        )
    } else if paired_t_tests.is_empty() {
        format!(
            "no significant accuracy difference (McNemar p = {:.4}); \
             no metric tests requested",
            mcnemar.p_value
        )
    } else {
        format!(
            "no significant difference in accuracy (McNemar p = {:.4}) or \
             in any of the {} metric tests",
            mcnemar.p_value,
            paired_t_tests.len()
        )
    };
    (Recommendation::NoClearWinner, justification)
}

impl ComparisonReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        let header = match self.recommendation {
            Recommendation::StrongA => "✅ STRONG PREFERENCE: SYSTEM A",
            Recommendation::StrongB => "✅ STRONG PREFERENCE: SYSTEM B",
            Recommendation::WeakA => "📊 WEAK PREFERENCE: SYSTEM A",
            Recommendation::WeakB => "📊 WEAK PREFERENCE: SYSTEM B",
            Recommendation::NoClearWinner => "⚖️  NO CLEAR WINNER",
        };
        report.push_str(header);
        report.push_str("\n\n");

        report.push_str(&format!(
            "Systems: {} (A) vs {} (B)\n",
            self.system_a, self.system_b
        ));
        report.push_str(&format!(
            "Tasks: {} | accuracy A = {:.4}, accuracy B = {:.4}\n",
            self.tasks, self.accuracy_a, self.accuracy_b
        ));
        report.push_str(&format!("Justification: {}\n", self.justification));

        report.push_str("\n📋 Contingency:\n");
        report.push_str(&format!(
            "  both_correct={} a_only={} b_only={} both_wrong={}\n",
            self.contingency.both_correct,
            self.contingency.a_only,
            self.contingency.b_only,
            self.contingency.both_wrong
        ));

        report.push_str("\n📈 McNemar:\n");
        let favored = match self.mcnemar.favored_system {
            Some(label) => label.to_string(),
            None => "none".to_string(),
        };
        report.push_str(&format!(
            "  chi2 = {:.4}, p = {:.4}{}, favored: {}\n",
            self.mcnemar.statistic,
            self.mcnemar.p_value,
            if self.mcnemar.significant {
                " (significant)"
            } else {
                ""
            },
            favored
        ));

        if !self.paired_t_test.is_empty() {
            report.push_str("\n📊 Paired t-tests:\n");
            for (name, test) in &self.paired_t_test {
                report.push_str(&format!(
                    "  {} (t = {:.4}, df = {}, p = {:.4}{}, mean A = {:.4}, mean B = {:.4})\n",
                    name,
                    test.t_statistic,
                    test.degrees_of_freedom,
                    test.p_value,
                    if test.significant { ", significant" } else { "" },
                    test.mean_a,
                    test.mean_b
                ));
            }
        }

        if !self.effect_size.is_empty() {
            report.push_str("\n📐 Effect sizes:\n");
            for (name, effect) in &self.effect_size {
                report.push_str(&format!(
                    "  {} (d = {:.4}, {})\n",
                    name, effect.cohens_d, effect.magnitude_label
                ));
            }
        }

        if !self.inconclusive.is_empty() {
            report.push_str(&format!(
                "\n⚠️  Inconclusive components ({}):\n",
                self.inconclusive.len()
            ));
            for entry in &self.inconclusive {
                report.push_str(&format!(
                    "  - {}[{}]: {}\n",
                    entry.component, entry.metric, entry.reason
                ));
            }
        }

        report
    }
}
