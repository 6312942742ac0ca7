use clap::Parser;

use crate::summary::DeriverOptions;

/// Match prediction summaries and dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "matchday-predictions", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// JSON fixture file (uses the built-in matchday when omitted)
    #[arg(long, env = "FIXTURES_PATH")]
    pub fixtures_path: Option<String>,

    /// Print the text report to stdout and exit instead of serving
    #[arg(long, env = "REPORT_ONLY", default_value = "false")]
    pub report: bool,

    /// Default minimum confidence (percent) for listed summaries
    #[arg(long, env = "MIN_CONFIDENCE", default_value = "0.0")]
    pub min_confidence: f64,

    /// Only list summaries above the solid-prediction threshold by default
    #[arg(long, env = "HIGH_ONLY", default_value = "false")]
    pub high_only: bool,

    /// Number of exact scores carried by each summary
    #[arg(long, env = "TOP_SCORES", default_value = "3")]
    pub top_scores: usize,

    /// Allowed distance of the outcome probability sum from 100
    #[arg(long, env = "PROBABILITY_TOLERANCE", default_value = "0.5")]
    pub probability_tolerance: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=100.0).contains(&self.min_confidence) {
            anyhow::bail!("min_confidence must be between 0 and 100");
        }
        if self.top_scores == 0 {
            anyhow::bail!("top_scores must be at least 1");
        }
        if self.probability_tolerance.is_nan() || self.probability_tolerance < 0.0 {
            anyhow::bail!("probability_tolerance must be non-negative");
        }
        Ok(())
    }

    pub fn deriver_options(&self) -> DeriverOptions {
        DeriverOptions {
            top_scores: self.top_scores,
            probability_tolerance: self.probability_tolerance,
        }
    }
}
