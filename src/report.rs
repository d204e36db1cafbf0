//! Markdown rendering of the analysis summary
//!
//! The report is all-or-nothing: it is built from the completed summary only,
//! so a failed run never emits a partial document.

use crate::analysis::{TestSummary, Verdict};

/// Render the summary as a Markdown document.
pub fn render_markdown(summary: &TestSummary) -> String {
    let verdict = match summary.verdict {
        Verdict::Significant => "SIGNIFICANT ✅",
        Verdict::NotSignificant => "NOT SIGNIFICANT ❌",
    };
    let confidence = (1.0 - summary.config.alpha) * 100.0;

    let mut report = String::new();
    report.push_str("# A/B Test Summary\n\n");
    report.push_str(&format!("**Metric:** `{}`  \n", summary.metric_column));
    report.push_str(&format!(
        "**Groups:** `{}` ({} = control, {} = treatment)  \n",
        summary.group_column, summary.control_label, summary.treatment_label
    ));
    report.push_str(&format!(
        "**Alpha:** {:.2} | **Winsor:** {:.3} | **Bootstrap:** {}",
        summary.config.alpha, summary.config.winsor, summary.config.bootstrap
    ));
    match summary.config.seed {
        Some(seed) => report.push_str(&format!(" | **Seed:** {seed}\n\n")),
        None => report.push_str("\n\n"),
    }

    report.push_str(&format!(
        "|            | {:>14} | {:>14} |\n",
        "A (control)", "B (treatment)"
    ));
    report.push_str("|------------|---------------:|---------------:|\n");
    report.push_str(&format!(
        "| n          | {:>14} | {:>14} |\n",
        summary.control_n, summary.treatment_n
    ));
    report.push_str(&format!(
        "| mean       | {:>14.4} | {:>14.4} |\n",
        summary.control_mean, summary.treatment_mean
    ));
    report.push_str(&format!(
        "| median     | {:>14.4} | {:>14.4} |\n",
        summary.control_median, summary.treatment_median
    ));
    report.push_str(&format!(
        "| lift (B/A) | {:>14} | {:>13.2}% |\n\n",
        "—",
        summary.lift * 100.0
    ));

    report.push_str(&format!(
        "**Welch's t-test:** t = {:.3}, df = {:.1}, p = {:.4} → **{}**  \n",
        summary.welch_t, summary.welch_df, summary.welch_p, verdict
    ));
    report.push_str(&format!(
        "**Mann–Whitney U:** U = {:.0}, p = {:.4}  \n",
        summary.mann_whitney_u, summary.mann_whitney_p
    ));
    report.push_str(&format!(
        "**Bootstrap {:.0}% CI for lift:** [{:.2}%, {:.2}%]\n\n",
        confidence,
        summary.lift_ci_lower * 100.0,
        summary.lift_ci_upper * 100.0
    ));

    report.push_str(
        "> Interpretation: if the CI excludes 0% and p < alpha, the treatment \
         shows a statistically significant effect.\n",
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalyzerConfig;

    fn summary(verdict: Verdict) -> TestSummary {
        TestSummary {
            group_column: "arm".to_string(),
            metric_column: "revenue".to_string(),
            control_label: "a".to_string(),
            treatment_label: "b".to_string(),
            control_n: 4,
            treatment_n: 4,
            control_mean: 11.5,
            treatment_mean: 15.5,
            control_median: 11.5,
            treatment_median: 15.5,
            welch_t: -4.382,
            welch_p: 0.0047,
            welch_df: 6.0,
            mann_whitney_u: 0.0,
            mann_whitney_p: 0.0286,
            lift: 0.3478,
            lift_ci_lower: 0.2101,
            lift_ci_upper: 0.4822,
            verdict,
            config: AnalyzerConfig {
                seed: Some(42),
                ..AnalyzerConfig::default()
            },
        }
    }

    #[test]
    fn test_report_contains_all_sections() {
        let report = render_markdown(&summary(Verdict::Significant));
        assert!(report.contains("# A/B Test Summary"));
        assert!(report.contains("`revenue`"));
        assert!(report.contains("Welch's t-test"));
        assert!(report.contains("Mann–Whitney U"));
        assert!(report.contains("Bootstrap 95% CI"));
        assert!(report.contains("Interpretation"));
    }

    #[test]
    fn test_significant_verdict_rendered() {
        let report = render_markdown(&summary(Verdict::Significant));
        assert!(report.contains("SIGNIFICANT ✅"));
        assert!(!report.contains("NOT SIGNIFICANT"));
    }

    #[test]
    fn test_not_significant_verdict_rendered() {
        let report = render_markdown(&summary(Verdict::NotSignificant));
        assert!(report.contains("NOT SIGNIFICANT ❌"));
    }

    #[test]
    fn test_lift_rendered_as_percentage() {
        let report = render_markdown(&summary(Verdict::Significant));
        assert!(report.contains("34.78%"));
        assert!(report.contains("[21.01%, 48.22%]"));
    }

    #[test]
    fn test_seed_echoed_when_set() {
        let report = render_markdown(&summary(Verdict::Significant));
        assert!(report.contains("**Seed:** 42"));
    }

    #[test]
    fn test_seed_omitted_when_unset() {
        let mut s = summary(Verdict::Significant);
        s.config.seed = None;
        let report = render_markdown(&s);
        assert!(!report.contains("Seed"));
    }

    #[test]
    fn test_sample_sizes_rendered() {
        let mut s = summary(Verdict::Significant);
        s.control_n = 128;
        s.treatment_n = 256;
        let report = render_markdown(&s);
        assert!(report.contains("128"));
        assert!(report.contains("256"));
    }
}
