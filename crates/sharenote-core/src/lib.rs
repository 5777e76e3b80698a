//! Core Sharenote arithmetic for proof-of-work denomination planning.
//!
//! This crate provides pure Rust implementations of:
//! - Note label parsing and construction (`33Z53`, `33.53Z`, `33Z 53CZ`)
//! - Probability and difficulty arithmetic over fractional bit difficulties
//! - Hashrate parsing, planning, and humanised display
//! - 256-bit hash targets and the compact nBits difficulty codec
//! - Bill estimates and rig planning reports
//!
//! Every operation is a pure, stateless transform: no I/O, no shared state,
//! and every fallible contract returns a [`SharenoteError`].

pub mod arith;
pub mod error;
pub mod estimate;
pub mod hashrate;
pub mod note;
pub mod plan;
pub mod target;

pub use arith::{
    bits_from_difficulty, combine_notes_serial, difficulty_for_note, difficulty_from_bits,
    divide_notes, expected_hashes, expected_hashes_for_note, note_difference,
    probability_from_bits, probability_per_hash, scale_note,
};
pub use error::SharenoteError;
pub use estimate::{
    estimate_note, estimate_notes, format_probability_display, plan_sharenote_from_hashrate,
    BillEstimate, EstimateOptions, PrimaryMode, SharenotePlan,
};
pub use hashrate::{
    humanise_hashrate, humanise_hashrate_with_precision, normalize_hashrate_value,
    parse_hashrate, HashrateUnit, HashrateValue, HumanHashrate,
};
pub use note::{compare_notes, ensure_note, parse_label, NoteInput, Sharenote, CENT_BIT_STEP};
pub use plan::{
    hashrate_range_for_note, max_bits_for_hashrate, note_from_hashrate, reliability_level,
    reliability_levels, required_hashrate, required_hashrate_mean, required_hashrate_quantile,
    ReliabilityId, ReliabilityLevel,
};
pub use target::{nbits_to_sharenote, sharenote_to_nbits, target_for, target_hex};
