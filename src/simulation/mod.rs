//! Batch traversal and statistics.
//!
//! - [`engine`]: drop N beans through the board, optionally recording the
//!   full choice sequence of each
//! - [`statistics`]: aggregate slot and skill-level distributions from
//!   recorded drops

pub mod engine;
pub mod statistics;

// Re-export commonly used items
pub use engine::{
    drop_bean, drop_bean_with_recording, simulate_batch, simulate_batch_with_recording,
    DropRecord, SimulationResult,
};
pub use statistics::{aggregate_statistics, chi_square_uniform, BatchStatistics, SlotDistribution};
