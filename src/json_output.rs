//! JSON output format for the analysis summary
//!
//! Dedicated DTOs keep the wire shape stable independent of internal
//! summary fields.

use crate::analysis::{TestSummary, Verdict};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One experiment arm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonGroup {
    /// Group label as found in the input
    pub label: String,
    /// Usable rows after cleaning
    pub n: usize,
    pub mean: f64,
    pub median: f64,
}

/// One hypothesis test outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTest {
    pub statistic: f64,
    pub pvalue: f64,
    /// Degrees of freedom (absent for the rank-sum test)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub df: Option<f64>,
}

/// Machine-readable report for --format json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub group_column: String,
    pub metric_column: String,
    pub control: JsonGroup,
    pub treatment: JsonGroup,
    pub welch: JsonTest,
    pub mann_whitney: JsonTest,
    /// Relative lift (treatment - control) / control
    pub lift: f64,
    pub lift_ci: [f64; 2],
    pub significant: bool,
    pub alpha: f64,
    pub winsor: f64,
    pub bootstrap: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl JsonReport {
    /// Build the JSON report from a completed summary.
    pub fn from_summary(summary: &TestSummary) -> Self {
        Self {
            group_column: summary.group_column.clone(),
            metric_column: summary.metric_column.clone(),
            control: JsonGroup {
                label: summary.control_label.clone(),
                n: summary.control_n,
                mean: summary.control_mean,
                median: summary.control_median,
            },
            treatment: JsonGroup {
                label: summary.treatment_label.clone(),
                n: summary.treatment_n,
                mean: summary.treatment_mean,
                median: summary.treatment_median,
            },
            welch: JsonTest {
                statistic: summary.welch_t,
                pvalue: summary.welch_p,
                df: Some(summary.welch_df),
            },
            mann_whitney: JsonTest {
                statistic: summary.mann_whitney_u,
                pvalue: summary.mann_whitney_p,
                df: None,
            },
            lift: summary.lift,
            lift_ci: [summary.lift_ci_lower, summary.lift_ci_upper],
            significant: summary.verdict == Verdict::Significant,
            alpha: summary.config.alpha,
            winsor: summary.config.winsor,
            bootstrap: summary.config.bootstrap,
            seed: summary.config.seed,
        }
    }
}

/// Render the summary as pretty-printed JSON.
pub fn render_json(summary: &TestSummary) -> Result<String> {
    let report = JsonReport::from_summary(summary);
    let mut out =
        serde_json::to_string_pretty(&report).context("failed to serialize JSON report")?;
    out.push('\n');
    Ok(out)
}
