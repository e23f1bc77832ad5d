//! Statistics aggregation from drop records.
//!
//! Turns raw [`DropRecord`] data into structured distributions: where the
//! beans landed, and (for skill batches) which skill levels were assigned.
//! Everything here is plain data with `Serialize` derives; rendering and
//! storage belong to whatever sits on top.

use serde::Serialize;

use crate::bean::Mode;
use crate::constants::SLOT_COUNT;

use super::engine::{mean_std, median_from_counts, DropRecord};

// ── Distribution over the ten slots (or skill levels) ───────────────

/// Empirical distribution over `0..SLOT_COUNT`.
#[derive(Clone, Debug, Serialize)]
pub struct SlotDistribution {
    /// Observations per cell; sums to the batch size.
    pub counts: Vec<u64>,
    /// `counts` normalized by the batch size.
    pub probabilities: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u8,
    pub max: u8,
    pub median: u8,
}

impl SlotDistribution {
    /// Build a distribution from per-cell counts.
    pub fn from_counts(counts: [u64; SLOT_COUNT]) -> Self {
        let n = counts.iter().sum::<u64>() as usize;
        let denom = n.max(1) as f64;
        let probabilities: Vec<f64> = counts.iter().map(|&c| c as f64 / denom).collect();
        let (mean, std_dev) = mean_std(&counts, n);
        let min = counts.iter().position(|&c| c > 0).unwrap_or(0) as u8;
        let max = counts.iter().rposition(|&c| c > 0).unwrap_or(0) as u8;
        let median = median_from_counts(&counts, n);

        SlotDistribution {
            counts: counts.to_vec(),
            probabilities,
            mean,
            std_dev,
            min,
            max,
            median,
        }
    }
}

// ── Top-level batch statistics ──────────────────────────────────────

/// Aggregated statistics for one batch of drops.
#[derive(Clone, Debug, Serialize)]
pub struct BatchStatistics {
    pub num_beans: u64,
    pub seed: u64,
    /// `"luck"` or `"skill"`; a batch runs in a single mode.
    pub mode: String,
    /// Where the beans landed.
    pub slots: SlotDistribution,
    /// Distribution of assigned skill levels. `None` for luck batches,
    /// where no level is drawn.
    pub skill_levels: Option<SlotDistribution>,
}

/// Aggregate statistics from a slice of drop records.
///
/// All records in a batch share one mode; an empty slice aggregates to a
/// zeroed luck-mode result.
pub fn aggregate_statistics(records: &[DropRecord], seed: u64) -> BatchStatistics {
    let mode = match records.first() {
        Some(r) if !r.is_luck => Mode::Skill,
        _ => Mode::Luck,
    };

    let mut slot_counts = [0u64; SLOT_COUNT];
    for r in records {
        slot_counts[r.slot as usize] += 1;
    }

    let skill_levels = match mode {
        Mode::Luck => None,
        Mode::Skill => {
            let mut level_counts = [0u64; SLOT_COUNT];
            for r in records {
                level_counts[r.skill_level as usize] += 1;
            }
            Some(SlotDistribution::from_counts(level_counts))
        }
    };

    BatchStatistics {
        num_beans: records.len() as u64,
        seed,
        mode: mode.name().to_string(),
        slots: SlotDistribution::from_counts(slot_counts),
        skill_levels,
    }
}

/// Chi-square goodness-of-fit statistic against a uniform distribution
/// over the cells of `counts`. Returns 0 for an empty or all-zero input.
pub fn chi_square_uniform(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 || counts.is_empty() {
        return 0.0;
    }
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&obs| {
            let d = obs as f64 - expected;
            d * d / expected
        })
        .sum()
}
