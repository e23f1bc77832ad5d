//! # Galton: bean machine simulation core
//!
//! Models a bean machine (Galton board): beans fall through a triangular
//! array of 9 peg rows and land in one of 10 slots. At every row a bean
//! deflects left or right; its final slot index is the number of rightward
//! deflections, so fair deflection yields a Binomial(9, 0.5) slot
//! distribution.
//!
//! Beans come in two modes, fixed at construction:
//!
//! | Mode  | Per-row choice | Final slot |
//! |-------|----------------|------------|
//! | Luck  | independent fair coin flip | Binomial(9, 0.5) |
//! | Skill | right for the first `skill_level` rows, then left | exactly `skill_level` |
//!
//! The skill level is drawn uniformly from `0..=9` when a skill bean is
//! built, using the caller-supplied randomness source. No generator is ever
//! read from ambient state: constructors and decisions take `&mut R` where
//! `R: rand::Rng`, so tests can drive beans with deterministic stubs.
//!
//! ## Modules
//!
//! - [`bean`]: the core decision logic (one bean, one drop)
//! - [`constants`]: board geometry (rows, slots, skill range)
//! - [`simulation`]: parallel batch drops and distribution statistics
//!
//! Beans are independent: batches parallelize per bean with rayon, each
//! bean on its own seeded generator.

pub mod bean;
pub mod constants;
pub mod simulation;
