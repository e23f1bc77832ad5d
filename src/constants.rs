//! Board geometry and skill-range constants.
//!
//! A bean traverses [`PEG_ROWS`] peg rows and lands in one of [`SLOT_COUNT`]
//! slots. Its final slot index equals the number of rightward deflections it
//! made, so slots range over `0..SLOT_COUNT` (0 = all left, 9 = all right).

/// Number of peg rows a bean passes on its way down. One left/right
/// decision is made per row.
pub const PEG_ROWS: usize = 9;

/// Number of landing slots: `PEG_ROWS + 1`, since the slot index is the
/// count of rightward deflections over the full drop.
pub const SLOT_COUNT: usize = 10;

/// Number of distinct skill levels. Skill-mode beans draw uniformly from
/// `0..SKILL_LEVELS` at construction.
pub const SKILL_LEVELS: u8 = 10;

/// Highest skill level: `SKILL_LEVELS - 1`. A bean at this level deflects
/// right at every row and lands in the last slot.
pub const MAX_SKILL: u8 = 9;
