// Percentile bootstrap for the relative lift
//
// Both arms are resampled with replacement; the lift (treatment mean minus
// control mean, over the control mean) is recomputed per resample and the
// empirical [alpha/2, 1 - alpha/2] percentiles become the interval bounds.
// Resamples whose control mean is zero produce a non-finite lift and are
// discarded, mirroring how the point estimate NaN-guards a zero control mean.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Empirical confidence interval for the lift
#[derive(Debug, Clone, Copy)]
pub struct LiftInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Bootstrap a confidence interval for the relative lift between the arms.
///
/// Seeded runs are fully reproducible; an unseeded run draws fresh entropy.
pub fn bootstrap_lift_ci(
    control: &[f32],
    treatment: &[f32],
    resamples: usize,
    alpha: f64,
    seed: Option<u64>,
) -> Result<LiftInterval> {
    if control.is_empty() || treatment.is_empty() {
        anyhow::bail!("cannot bootstrap empty groups");
    }
    if resamples == 0 {
        anyhow::bail!("bootstrap resample count must be >= 1");
    }

    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut lifts = Vec::with_capacity(resamples);
    for _ in 0..resamples {
        let control_mean = resample_mean(control, &mut rng);
        let treatment_mean = resample_mean(treatment, &mut rng);
        let lift = (treatment_mean - control_mean) / control_mean;
        if lift.is_finite() {
            lifts.push(lift);
        }
    }

    if lifts.is_empty() {
        anyhow::bail!("bootstrap produced no finite lift resamples (control mean is zero)");
    }
    if lifts.len() < resamples {
        tracing::warn!(
            discarded = resamples - lifts.len(),
            "discarded bootstrap resamples with zero control mean"
        );
    }

    lifts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(LiftInterval {
        lower: percentile(&lifts, alpha / 2.0),
        upper: percentile(&lifts, 1.0 - alpha / 2.0),
    })
}

fn resample_mean(samples: &[f32], rng: &mut StdRng) -> f64 {
    let n = samples.len();
    let mut sum = 0.0f64;
    for _ in 0..n {
        sum += f64::from(samples[rng.gen_range(0..n)]);
    }
    sum / n as f64
}

/// Linear-interpolated percentile of pre-sorted data
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = q * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
