//! Cotejo - A/B test analyzer with robust statistics
//!
//! This library provides the core functionality for comparing two labeled
//! groups of numeric observations: Welch's t-test (robust to unequal
//! variances), the Mann-Whitney U rank-sum cross-check, and a percentile
//! bootstrap confidence interval for the relative lift, rendered as a
//! Markdown or JSON report.

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod json_output;
pub mod report;
