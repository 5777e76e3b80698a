//! Error type shared across the crate.

use thiserror::Error;

/// Errors returned by note parsing, hashrate planning, and target maths.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SharenoteError {
    /// The label text matched none of the accepted syntaxes.
    #[error("unrecognised Sharenote label {0:?}")]
    InvalidLabel(String),
    /// Hashrate text did not split into a magnitude and a unit token.
    #[error("unrecognised hashrate format {0:?}")]
    InvalidHashrate(String),
    /// The unit token was not a recognised SI hashrate unit.
    #[error("unrecognised hashrate unit {0:?}")]
    UnrecognisedUnit(String),
    /// A hashrate magnitude was NaN, infinite, or negative.
    #[error("hashrate must be finite and non-negative")]
    InvalidHashrateValue,
    /// A planning operation needs a strictly positive hashrate.
    #[error("hashrate must be > 0")]
    NonPositiveHashrate,
    /// A bit difficulty was NaN, infinite, or negative.
    #[error("bits must be finite and non-negative")]
    InvalidBits,
    /// A cent-unit count was negative.
    #[error("cent units must be non-negative")]
    NegativeCentUnits,
    #[error("seconds must be > 0")]
    NonPositiveSeconds,
    #[error("multiplier must be > 0")]
    NonPositiveMultiplier,
    /// Quantile confidence outside the open interval (0, 1).
    #[error("confidence must be in (0, 1)")]
    InvalidConfidence,
    #[error("scale factor must be finite and non-negative")]
    InvalidScaleFactor,
    /// An aggregate operation received no notes.
    #[error("notes must not be empty")]
    EmptyNotes,
    #[error("difficulty must be > 0")]
    NonPositiveDifficulty,
    #[error("division by a zero-difficulty note")]
    DivisionByZeroNote,
    /// The note is harder than the 256-bit target space can express.
    #[error("note too hard; target underflows 256 bits")]
    TargetUnderflow,
    #[error("nBits must be exactly 8 hex characters")]
    NBitsLength,
    #[error("invalid nBits hex {0:?}")]
    NBitsHex(String),
    #[error("nBits mantissa must be non-zero")]
    NBitsZeroMantissa,
}
