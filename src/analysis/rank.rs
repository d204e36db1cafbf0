// Mann-Whitney U rank-sum test (non-parametric cross-check)
//
// Runs on the raw metric values so winsorization cannot disturb the ranks.
// Ties receive the average of the ranks they span; the p-value uses the
// tie-corrected normal approximation with a continuity correction, matching
// SciPy's mannwhitneyu(alternative="two-sided") asymptotic path. Because the
// statistic depends only on ranks, it is invariant under any strictly
// monotonic transform of the metric.

use anyhow::Result;
use std::cmp::Ordering;

/// Result of the rank-sum comparison
#[derive(Debug, Clone)]
pub struct MannWhitneyTest {
    /// U statistic for the control group
    pub statistic: f64,

    /// Two-sided p-value
    pub pvalue: f64,
}

/// Compare the two arms with the Mann-Whitney U test.
pub fn mann_whitney_u(control: &[f32], treatment: &[f32]) -> Result<MannWhitneyTest> {
    if control.is_empty() || treatment.is_empty() {
        anyhow::bail!("need at least 1 sample per group for the rank-sum test");
    }

    let n1 = control.len();
    let n2 = treatment.len();
    let n = n1 + n2;

    // Pool the samples, tagging each with its arm (0 = control)
    let mut pooled: Vec<(f32, u8)> = control
        .iter()
        .map(|&v| (v, 0u8))
        .chain(treatment.iter().map(|&v| (v, 1u8)))
        .collect();
    pooled.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    // Average ranks for ties; accumulate the tie-correction term
    let mut ranks = vec![0.0f64; n];
    let mut tie_term = 0.0f64;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && pooled[j + 1].0 == pooled[i].0 {
            j += 1;
        }
        let count = (j - i + 1) as f64;
        let avg_rank = ((i + j) as f64) / 2.0 + 1.0;
        for rank in ranks.iter_mut().take(j + 1).skip(i) {
            *rank = avg_rank;
        }
        if count > 1.0 {
            tie_term += count * count * count - count;
        }
        i = j + 1;
    }

    let rank_sum_control: f64 = pooled
        .iter()
        .zip(&ranks)
        .filter(|((_, arm), _)| *arm == 0)
        .map(|(_, &rank)| rank)
        .sum();

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let nf = n as f64;

    let statistic = rank_sum_control - n1f * (n1f + 1.0) / 2.0;
    let mean_u = n1f * n2f / 2.0;
    let variance = n1f * n2f / 12.0 * ((nf + 1.0) - tie_term / (nf * (nf - 1.0)));

    // Every pooled value identical: no ordering information
    if variance <= 0.0 {
        return Ok(MannWhitneyTest {
            statistic,
            pvalue: 1.0,
        });
    }

    // Continuity correction of 0.5 toward the mean
    let delta = ((statistic - mean_u).abs() - 0.5).max(0.0);
    let z = delta / variance.sqrt();
    let pvalue = (2.0 * normal_sf(z)).clamp(0.0, 1.0);

    Ok(MannWhitneyTest { statistic, pvalue })
}

/// Computes P(Z > z) for the standard normal distribution.
/// Uses Abramowitz & Stegun 26.2.17 rational approximation with Horner's
/// method. Caller must pass z >= 0.
fn normal_sf(z: f64) -> f64 {
    debug_assert!(z >= 0.0, "normal_sf requires z >= 0, got {}", z);

    let t = 1.0 / (1.0 + 0.2316419 * z);
    let d = 0.3989422804014327; // 1/sqrt(2*pi)
    let p = d * (-z * z / 2.0).exp();

    // Horner's method for the polynomial
    let poly = t
        * (0.319381530
            + t * (-0.356563782 + t * (1.781477937 + t * (-1.821255978 + t * 1.330274429))));

    p * poly
}
