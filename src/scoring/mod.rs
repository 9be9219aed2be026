//! Risk scoring and classification engine.
//!
//! - [`levels`] — the fixed five-entry probability/impact rating table.
//! - [`score`] — weight product and score-to-severity classification.
//! - [`stats`] — aggregate statistics, worst-risk ranking, code derivation,
//!   and matrix cell counts.
//!
//! Everything here is pure: no state, no I/O, deterministic for a given
//! input. Out-of-domain inputs are programming errors and panic rather
//! than being clamped.

pub mod levels;
pub mod score;
pub mod stats;
