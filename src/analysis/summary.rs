// Pipeline orchestration and the immutable per-run summary
//
// Sequencing: winsorize -> Welch on the clipped values -> Mann-Whitney on the
// raw values -> bootstrap the lift CI on the clipped values. The summary is
// produced exactly once per run and is only ever read by the renderers.

use crate::analysis::bootstrap::bootstrap_lift_ci;
use crate::analysis::config::AnalyzerConfig;
use crate::analysis::rank::mann_whitney_u;
use crate::analysis::welch::welch_t_test;
use crate::analysis::winsor::winsorize;
use crate::dataset::GroupedSamples;
use anyhow::Result;

/// Significance call at the configured alpha (keyed on the Welch p-value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Significant,
    NotSignificant,
}

/// Immutable record of one analysis run
#[derive(Debug, Clone)]
pub struct TestSummary {
    pub group_column: String,
    pub metric_column: String,
    pub control_label: String,
    pub treatment_label: String,

    pub control_n: usize,
    pub treatment_n: usize,
    pub control_mean: f64,
    pub treatment_mean: f64,
    pub control_median: f64,
    pub treatment_median: f64,

    pub welch_t: f64,
    pub welch_p: f64,
    pub welch_df: f64,
    pub mann_whitney_u: f64,
    pub mann_whitney_p: f64,

    /// Relative lift (treatment - control) / control; NaN when the control
    /// mean is zero
    pub lift: f64,
    pub lift_ci_lower: f64,
    pub lift_ci_upper: f64,

    pub verdict: Verdict,

    /// Configuration used, echoed for reproducibility
    pub config: AnalyzerConfig,
}

/// Run the full analysis pipeline over the cleaned arms.
///
/// # Example
/// ```
/// use cotejo::analysis::{analyze, AnalyzerConfig, Verdict};
/// use cotejo::dataset::GroupedSamples;
///
/// let csv = "arm,revenue\na,10\na,12\na,11\na,13\nb,15\nb,16\nb,14\nb,17\n";
/// let groups = GroupedSamples::from_csv_str(csv, "arm", "revenue").unwrap();
///
/// let config = AnalyzerConfig {
///     seed: Some(42),
///     ..AnalyzerConfig::default()
/// };
/// let summary = analyze(&groups, &config).unwrap();
/// assert_eq!(summary.verdict, Verdict::Significant);
/// ```
pub fn analyze(groups: &GroupedSamples, config: &AnalyzerConfig) -> Result<TestSummary> {
    config.validate()?;

    let control = winsorize(&groups.control, config.winsor)?;
    let treatment = winsorize(&groups.treatment, config.winsor)?;

    let welch = welch_t_test(&control, &treatment)?;
    // Rank test on the raw values: clipping must not disturb the ranks
    let rank = mann_whitney_u(&groups.control, &groups.treatment)?;

    let control_mean = f64::from(welch.control_mean);
    let treatment_mean = f64::from(welch.treatment_mean);
    let lift = if control_mean == 0.0 {
        f64::NAN
    } else {
        (treatment_mean - control_mean) / control_mean
    };

    let interval = bootstrap_lift_ci(
        &control,
        &treatment,
        config.bootstrap,
        config.alpha,
        config.seed,
    )?;

    let welch_p = f64::from(welch.pvalue);
    let verdict = if welch_p < config.alpha {
        Verdict::Significant
    } else {
        Verdict::NotSignificant
    };

    tracing::debug!(
        welch_p,
        mann_whitney_p = rank.pvalue,
        lift,
        "analysis complete"
    );

    Ok(TestSummary {
        group_column: groups.group_column.clone(),
        metric_column: groups.metric_column.clone(),
        control_label: groups.control_label.clone(),
        treatment_label: groups.treatment_label.clone(),
        control_n: control.len(),
        treatment_n: treatment.len(),
        control_mean,
        treatment_mean,
        control_median: f64::from(welch.control_median),
        treatment_median: f64::from(welch.treatment_median),
        welch_t: f64::from(welch.statistic),
        welch_p,
        welch_df: f64::from(welch.df),
        mann_whitney_u: rank.statistic,
        mann_whitney_p: rank.pvalue,
        lift,
        lift_ci_lower: interval.lower,
        lift_ci_upper: interval.upper,
        verdict,
        config: config.clone(),
    })
}
