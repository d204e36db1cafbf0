// Winsorization: clip a group's metric values to its [w, 1-w] quantile range
//
// Quantiles use aprender's DescriptiveStats, which implements the R-7 method
// (linear interpolation between order statistics) - the same convention as
// pandas' Series.quantile. Clipping bounds the influence of outliers on the
// mean-based statistics; rank-based tests run on the unclipped values.

use anyhow::Result;
use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Clip `samples` to their [fraction, 1 - fraction] quantile range.
///
/// A fraction of 0 returns the samples unchanged.
pub fn winsorize(samples: &[f32], fraction: f64) -> Result<Vec<f32>> {
    if fraction <= 0.0 {
        return Ok(samples.to_vec());
    }
    if samples.is_empty() {
        anyhow::bail!("cannot winsorize an empty group");
    }

    let vector = Vector::from_slice(samples);
    let stats = DescriptiveStats::new(&vector);
    let lower = stats
        .quantile(fraction)
        .map_err(|e| anyhow::anyhow!("failed to compute lower quantile: {}", e))?;
    let upper = stats
        .quantile(1.0 - fraction)
        .map_err(|e| anyhow::anyhow!("failed to compute upper quantile: {}", e))?;

    Ok(samples.iter().map(|v| v.clamp(lower, upper)).collect())
}
