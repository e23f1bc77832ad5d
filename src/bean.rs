//! Bean decision logic: per-row left/right choices and the resulting slot.
//!
//! A [`Bean`] operates in one of two modes, fixed at construction:
//!
//! - **Luck**: every peg row is an independent fair coin flip. Over a full
//!   drop the slot index follows Binomial(9, 0.5).
//! - **Skill**: the bean carries a skill level in `0..=9` drawn uniformly at
//!   construction. It deflects right for its first `skill_level` rows, then
//!   left for the rest, so it always lands in slot `skill_level`.
//!
//! Randomness is injected: the bean never owns a generator. Both the
//! constructor and [`Bean::decide`] take `&mut R` where `R: Rng`, so a
//! driver can share one generator across beans or give each bean its own,
//! and tests can supply deterministic stub sources.
//!
//! Bounded values are extracted from raw generator bits by multiply-high
//! rather than through a uniform-sampler API. This keeps the mapping from
//! generator output to skill level (and to coin flips) exact and stable,
//! which stub sources in tests rely on.

use rand::Rng;

use crate::constants::{MAX_SKILL, PEG_ROWS, SKILL_LEVELS};

/// Outcome of one peg deflection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Operating mode, fixed at construction.
///
/// Kept as a plain tagged enum with a branch at the decision site: two
/// variants that never change after construction do not warrant dynamic
/// dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Each row is an independent fair coin flip.
    Luck,
    /// Right for the first `skill_level` rows, left afterwards.
    Skill,
}

impl Mode {
    /// Short lowercase name, for labeling aggregated output.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Luck => "luck",
            Mode::Skill => "skill",
        }
    }
}

/// One bean: mode, fixed skill level, and the running count of rightward
/// decisions issued during the current drop.
///
/// Lifecycle: construct once, drive through up to [`PEG_ROWS`] calls to
/// [`decide`](Bean::decide) (or one [`final_slot`](Bean::final_slot)),
/// record the slot, discard. There is no reset: a new drop means a new bean.
#[derive(Clone, Debug)]
pub struct Bean {
    mode: Mode,
    /// In `0..=MAX_SKILL`. Only consulted in skill mode; luck beans keep 0
    /// here and never read it.
    skill_level: u8,
    rights_issued: u8,
    rows_traversed: u8,
}

/// Map one raw `u32` draw to a skill level in `0..SKILL_LEVELS`.
///
/// Multiply-high extraction: `(draw * 10) >> 32`. Uniform over the ten
/// levels up to a bias of 10/2^32, and exactly predictable for stub
/// sources (a draw of `0xC000_0000` maps to level 7).
#[inline(always)]
fn draw_skill_level<R: Rng>(rng: &mut R) -> u8 {
    ((rng.random::<u32>() as u64 * SKILL_LEVELS as u64) >> 32) as u8
}

/// One fair coin flip from the low bit of a fresh `u32` draw.
#[inline(always)]
fn flip<R: Rng>(rng: &mut R) -> Direction {
    if rng.random::<u32>() & 1 == 1 {
        Direction::Right
    } else {
        Direction::Left
    }
}

impl Bean {
    /// Create a bean in luck mode (`is_luck`) or skill mode.
    ///
    /// Skill mode draws the skill level uniformly from `0..=9` using the
    /// supplied source; luck mode consumes nothing from it.
    pub fn new<R: Rng>(is_luck: bool, rng: &mut R) -> Self {
        if is_luck {
            Bean {
                mode: Mode::Luck,
                skill_level: 0,
                rights_issued: 0,
                rows_traversed: 0,
            }
        } else {
            Bean {
                mode: Mode::Skill,
                skill_level: draw_skill_level(rng),
                rights_issued: 0,
                rows_traversed: 0,
            }
        }
    }

    /// Create a skill-mode bean at a fixed level, clamped to [`MAX_SKILL`].
    ///
    /// Deterministic counterpart of [`Bean::new`] for drivers and tests that
    /// need a known level.
    pub fn with_skill(level: u8) -> Self {
        Bean {
            mode: Mode::Skill,
            skill_level: level.min(MAX_SKILL),
            rights_issued: 0,
            rows_traversed: 0,
        }
    }

    /// Decide the deflection at the next peg row.
    ///
    /// Called once per row, up to [`PEG_ROWS`] times per drop; counting
    /// rows is the caller's contract. Calls beyond that are not checked:
    /// a skill bean keeps returning `Left`, a luck bean keeps flipping.
    ///
    /// Luck mode draws a fresh fair flip each call. Skill mode returns
    /// `Right` until `skill_level` rights have been issued, then `Left`,
    /// never touching the randomness source.
    pub fn decide<R: Rng>(&mut self, rng: &mut R) -> Direction {
        let dir = match self.mode {
            Mode::Luck => flip(rng),
            Mode::Skill => {
                if self.rights_issued < self.skill_level {
                    Direction::Right
                } else {
                    Direction::Left
                }
            }
        };
        if dir == Direction::Right {
            self.rights_issued += 1;
        }
        self.rows_traversed += 1;
        dir
    }

    /// Complete the drop and return the final slot index.
    ///
    /// Issues the remaining decisions of the 9-row traversal (all of them on
    /// a fresh bean) and returns the total count of rightward deflections,
    /// which is the slot the bean lands in. Consumes the bean: a drop ends
    /// here.
    pub fn final_slot<R: Rng>(mut self, rng: &mut R) -> usize {
        let remaining = PEG_ROWS.saturating_sub(self.rows_traversed as usize);
        for _ in 0..remaining {
            self.decide(rng);
        }
        self.rights_issued as usize
    }

    /// Operating mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fixed skill level. Meaningful only in skill mode; luck beans report 0
    /// but never consult it.
    #[inline]
    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    /// Rightward decisions issued so far. After a full drop this equals the
    /// final slot index.
    #[inline]
    pub fn rights_issued(&self) -> u8 {
        self.rights_issued
    }
}
