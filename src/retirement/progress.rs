//! Offset progress aggregates. Computed on demand, never stored.

use serde::Serialize;

use crate::retirement::state::TrackedCredit;

/// Emissions versus offsets for one buyer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OffsetSummary {
    pub baseline: f64,
    pub target: f64,
    /// Sum of purchased volume, retired or not.
    pub total_offset: f64,
    pub net_emissions: f64,
    /// Percent of the way from baseline to target, in `[0, 100]`.
    pub progress_pct: f64,
    pub remaining: f64,
}

impl OffsetSummary {
    pub fn compute(baseline: f64, target: f64, credits: &[TrackedCredit]) -> Self {
        let total_offset: f64 = credits.iter().map(|c| c.record.metadata.volume_tco2e).sum();
        let net_emissions = (baseline - total_offset).max(0.0);
        let progress_pct = if baseline > target {
            ((baseline - net_emissions) / (baseline - target) * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let remaining = (net_emissions - target).max(0.0);

        Self {
            baseline,
            target,
            total_offset,
            net_emissions,
            progress_pct,
            remaining,
        }
    }
}
