// A/B comparison pipeline
//
// This module implements the statistical core: winsorization, Welch's t-test
// (parametric, unequal variances), the Mann-Whitney U rank-sum cross-check,
// and a percentile bootstrap for the lift confidence interval.
//
// Implementation:
// - Uses aprender (crates.io) for hypothesis testing and quantiles
// - Uses trueno (crates.io) for SIMD-optimized vector statistics
// - Uses rand for seedable bootstrap resampling
// - The rank-sum test is local: aprender has no Mann-Whitney implementation

mod bootstrap;
mod config;
mod rank;
mod summary;
mod welch;
mod winsor;

pub use bootstrap::{bootstrap_lift_ci, LiftInterval};
pub use config::{AnalyzerConfig, ConfigError};
pub use rank::{mann_whitney_u, MannWhitneyTest};
pub use summary::{analyze, TestSummary, Verdict};
pub use welch::{median, welch_t_test, WelchTest};
pub use winsor::winsorize;
