//! Probability and difficulty arithmetic over note bits.
//!
//! Everything here composes from two primitives: `difficulty = 2^bits` and
//! `probability = 2^-bits`. Combination, difference, and scaling all happen
//! in linear difficulty space and convert back through log2, clamping to the
//! zero note whenever the result would be non-positive.

use crate::error::SharenoteError;
use crate::note::{ensure_note, NoteInput, Sharenote};

/// Per-hash success probability for a continuous bit difficulty: `2^-bits`.
pub fn probability_from_bits(bits: f64) -> Result<f64, SharenoteError> {
    if !bits.is_finite() {
        return Err(SharenoteError::InvalidBits);
    }
    Ok((-bits).exp2())
}

/// Per-hash success probability for a note.
pub fn probability_per_hash(note: impl Into<NoteInput>) -> Result<f64, SharenoteError> {
    let resolved = ensure_note(note)?;
    probability_from_bits(resolved.bits())
}

/// Linear-scale difficulty for a continuous bit difficulty: `2^bits`.
pub fn difficulty_from_bits(bits: f64) -> f64 {
    bits.exp2()
}

/// Linear-scale difficulty for a note.
pub fn difficulty_for_note(note: impl Into<NoteInput>) -> Result<f64, SharenoteError> {
    let resolved = ensure_note(note)?;
    Ok(resolved.bits().exp2())
}

/// Invert a linear difficulty back to bits. Fails for non-positive input.
pub fn bits_from_difficulty(difficulty: f64) -> Result<f64, SharenoteError> {
    if !difficulty.is_finite() || difficulty <= 0.0 {
        return Err(SharenoteError::NonPositiveDifficulty);
    }
    Ok(difficulty.log2())
}

/// Mean number of hash attempts before success: `1 / probability`.
pub fn expected_hashes(bits: f64) -> Result<f64, SharenoteError> {
    let probability = probability_from_bits(bits)?;
    Ok(1.0 / probability)
}

/// Mean number of hash attempts to mint the given note.
pub fn expected_hashes_for_note(note: impl Into<NoteInput>) -> Result<f64, SharenoteError> {
    let resolved = ensure_note(note)?;
    expected_hashes(resolved.bits())
}

/// Combined rarity of independent serial proof attempts.
///
/// Difficulties add in linear space; the sum converts back to a quantised
/// note. An empty input fails; a degenerate sum clamps to the zero note.
pub fn combine_notes_serial<I>(notes: I) -> Result<Sharenote, SharenoteError>
where
    I: IntoIterator,
    I::Item: Into<NoteInput>,
{
    let mut total = 0.0;
    let mut seen = false;
    for note in notes {
        total += difficulty_for_note(note)?;
        seen = true;
    }
    if !seen {
        return Err(SharenoteError::EmptyNotes);
    }
    if !total.is_finite() || total <= 0.0 {
        return Ok(Sharenote::zero());
    }
    Sharenote::from_bits(total.log2())
}

/// Subtract difficulties, clamping to the zero note when the subtrahend
/// dominates. Monotonic difficulty cannot go negative.
pub fn note_difference(
    minuend: impl Into<NoteInput>,
    subtrahend: impl Into<NoteInput>,
) -> Result<Sharenote, SharenoteError> {
    let remaining = difficulty_for_note(minuend)? - difficulty_for_note(subtrahend)?;
    if remaining <= 0.0 {
        return Ok(Sharenote::zero());
    }
    Sharenote::from_bits(bits_from_difficulty(remaining)?)
}

/// Multiply a note's difficulty by a non-negative finite factor.
///
/// Factor zero collapses to the zero note.
pub fn scale_note(
    note: impl Into<NoteInput>,
    factor: f64,
) -> Result<Sharenote, SharenoteError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(SharenoteError::InvalidScaleFactor);
    }
    if factor == 0.0 {
        return Ok(Sharenote::zero());
    }
    let scaled = difficulty_for_note(note)? * factor;
    Sharenote::from_bits(bits_from_difficulty(scaled)?)
}

/// Ratio of two note difficulties.
pub fn divide_notes(
    numerator: impl Into<NoteInput>,
    denominator: impl Into<NoteInput>,
) -> Result<f64, SharenoteError> {
    let num = difficulty_for_note(numerator)?;
    let den = difficulty_for_note(denominator)?;
    if den <= 0.0 {
        return Err(SharenoteError::DivisionByZeroNote);
    }
    Ok(num / den)
}
