// Welch's t-test for the difference in group means, using aprender
//
// This module wraps aprender's hypothesis testing and trueno's vector
// primitives to compare the two experiment arms.
//
// - aprender's ttest_ind with equal_var = false is the Welch variant:
//   it does not assume equal variances between the arms and uses the
//   Welch-Satterthwaite degrees of freedom.
// - P-values are two-sided.
// - trueno::Vector supplies SIMD-optimized mean/variance; aprender's
//   DescriptiveStats supplies medians (R-7 quantile at 0.5).

use anyhow::{Context, Result};
use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Result of comparing the two arms' means
#[derive(Debug, Clone)]
pub struct WelchTest {
    /// t-statistic (control minus treatment, over the pooled standard error)
    pub statistic: f32,

    /// Two-sided p-value
    pub pvalue: f32,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f32,

    pub control_mean: f32,
    pub treatment_mean: f32,
    pub control_median: f32,
    pub treatment_median: f32,
    pub control_variance: f32,
    pub treatment_variance: f32,
}

/// Compare the two arms with Welch's independent t-test.
///
/// # Example
/// ```
/// use cotejo::analysis::welch_t_test;
///
/// let control = vec![10.0, 12.0, 11.0, 13.0];
/// let treatment = vec![15.0, 16.0, 14.0, 17.0];
///
/// let result = welch_t_test(&control, &treatment).unwrap();
/// assert!(result.pvalue < 0.05); // Clear separation between the arms
/// ```
pub fn welch_t_test(control: &[f32], treatment: &[f32]) -> Result<WelchTest> {
    if control.len() < 2 || treatment.len() < 2 {
        anyhow::bail!("need at least 2 samples per group for the t-test");
    }

    let control_vec = Vector::from_slice(control);
    let treatment_vec = Vector::from_slice(treatment);

    let control_mean = control_vec
        .mean()
        .context("failed to compute control mean")?;
    let treatment_mean = treatment_vec
        .mean()
        .context("failed to compute treatment mean")?;
    let control_variance = control_vec
        .variance()
        .context("failed to compute control variance")?;
    let treatment_variance = treatment_vec
        .variance()
        .context("failed to compute treatment variance")?;

    let control_median = median(&control_vec)?;
    let treatment_median = median(&treatment_vec)?;

    // Both arms constant: the t-statistic is undefined, but a report must
    // still come out with a p-value in [0, 1].
    let (statistic, pvalue, df) = if control_variance == 0.0 && treatment_variance == 0.0 {
        let df = (control.len() + treatment.len() - 2) as f32;
        if control_mean == treatment_mean {
            (0.0, 1.0, df)
        } else {
            let sign = if control_mean > treatment_mean {
                f32::INFINITY
            } else {
                f32::NEG_INFINITY
            };
            (sign, 0.0, df)
        }
    } else {
        // aprender's independent t-test (Welch variant: unequal variances)
        let ttest = aprender::stats::hypothesis::ttest_ind(control, treatment, false)
            .context("failed to compute t-test")?;
        (ttest.statistic, ttest.pvalue.clamp(0.0, 1.0), ttest.df)
    };

    Ok(WelchTest {
        statistic,
        pvalue,
        df,
        control_mean,
        treatment_mean,
        control_median,
        treatment_median,
        control_variance,
        treatment_variance,
    })
}

/// Median via aprender's DescriptiveStats (R-7 quantile at 0.5).
pub fn median(vector: &Vector<f32>) -> Result<f32> {
    let stats = DescriptiveStats::new(vector);
    stats
        .quantile(0.5)
        .map_err(|e| anyhow::anyhow!("failed to compute median: {}", e))
}
