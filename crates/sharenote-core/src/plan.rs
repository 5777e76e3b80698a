//! Hashrate planning: required rates, inversions, and reliability presets.
//!
//! Success of repeated hashing is a Poisson process, so "finish within the
//! window with confidence c" just multiplies the mean work by `-ln(1 - c)`.
//! The presets below precompute that multiplier for the usual confidence
//! levels.

use crate::arith::expected_hashes;
use crate::error::SharenoteError;
use crate::hashrate::{normalize_hashrate_value, HashrateValue};
use crate::note::{ensure_note, NoteInput, Sharenote, CENT_BIT_STEP};

/// Identifier for a reliability preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReliabilityId {
    Mean,
    Usually90,
    Often95,
    VeryLikely99,
    Almost999,
}

impl ReliabilityId {
    /// Parse a preset name as used in config files and the JS API.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mean" => Some(ReliabilityId::Mean),
            "usually_90" => Some(ReliabilityId::Usually90),
            "often_95" => Some(ReliabilityId::Often95),
            "very_likely_99" => Some(ReliabilityId::VeryLikely99),
            "almost_999" => Some(ReliabilityId::Almost999),
            _ => None,
        }
    }

    /// Stable identifier string.
    pub fn name(&self) -> &'static str {
        match self {
            ReliabilityId::Mean => "mean",
            ReliabilityId::Usually90 => "usually_90",
            ReliabilityId::Often95 => "often_95",
            ReliabilityId::VeryLikely99 => "very_likely_99",
            ReliabilityId::Almost999 => "almost_999",
        }
    }
}

/// A named confidence preset with its precomputed Poisson multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct ReliabilityLevel {
    pub id: ReliabilityId,
    /// Human-facing description.
    pub label: &'static str,
    /// Confidence probability; the mean preset has none by design.
    pub confidence: Option<f64>,
    /// `-ln(1 - confidence)`, or 1 for the mean preset.
    pub multiplier: f64,
}

const RELIABILITY_LEVELS: [ReliabilityLevel; 5] = [
    ReliabilityLevel {
        id: ReliabilityId::Mean,
        label: "On average",
        confidence: None,
        multiplier: 1.0,
    },
    ReliabilityLevel {
        id: ReliabilityId::Usually90,
        label: "Usually (90%)",
        confidence: Some(0.90),
        multiplier: 2.302585092994046,
    },
    ReliabilityLevel {
        id: ReliabilityId::Often95,
        label: "Often (95%)",
        confidence: Some(0.95),
        multiplier: 2.995732273553991,
    },
    ReliabilityLevel {
        id: ReliabilityId::VeryLikely99,
        label: "Very likely (99%)",
        confidence: Some(0.99),
        multiplier: 4.605170185988092,
    },
    ReliabilityLevel {
        id: ReliabilityId::Almost999,
        label: "Almost certain (99.9%)",
        confidence: Some(0.999),
        multiplier: 6.907755278982137,
    },
];

/// All presets in a stable order: mean, 90, 95, 99, 99.9.
pub fn reliability_levels() -> &'static [ReliabilityLevel] {
    &RELIABILITY_LEVELS
}

/// Look up one preset.
pub fn reliability_level(id: ReliabilityId) -> &'static ReliabilityLevel {
    &RELIABILITY_LEVELS[id as usize]
}

/// Hashrate needed to mint the note within `seconds`, scaled by a Poisson
/// `multiplier`: `expected_hashes * multiplier / seconds`.
pub fn required_hashrate(
    note: impl Into<NoteInput>,
    seconds: f64,
    multiplier: f64,
) -> Result<f64, SharenoteError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(SharenoteError::NonPositiveSeconds);
    }
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(SharenoteError::NonPositiveMultiplier);
    }
    let resolved = ensure_note(note)?;
    let expected = expected_hashes(resolved.bits())?;
    Ok(expected * multiplier / seconds)
}

/// Hashrate needed on average (multiplier 1).
pub fn required_hashrate_mean(
    note: impl Into<NoteInput>,
    seconds: f64,
) -> Result<f64, SharenoteError> {
    required_hashrate(note, seconds, 1.0)
}

/// Hashrate needed to succeed within `seconds` with the given confidence.
pub fn required_hashrate_quantile(
    note: impl Into<NoteInput>,
    seconds: f64,
    confidence: f64,
) -> Result<f64, SharenoteError> {
    let multiplier = quantile_multiplier(confidence)?;
    required_hashrate(note, seconds, multiplier)
}

/// Poisson multiplier for a confidence in the open interval (0, 1).
pub fn quantile_multiplier(confidence: f64) -> Result<f64, SharenoteError> {
    if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
        return Err(SharenoteError::InvalidConfidence);
    }
    Ok(-(1.0 - confidence).ln())
}

/// Highest continuous bit difficulty reachable with the given budget:
/// `log2(hashrate * seconds / multiplier)`.
pub fn max_bits_for_hashrate(
    hashrate: f64,
    seconds: f64,
    multiplier: f64,
) -> Result<f64, SharenoteError> {
    if !hashrate.is_finite() || hashrate <= 0.0 {
        return Err(SharenoteError::NonPositiveHashrate);
    }
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(SharenoteError::NonPositiveSeconds);
    }
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(SharenoteError::NonPositiveMultiplier);
    }
    Ok((hashrate * seconds / multiplier).log2())
}

/// The hardest note a rig can reach in the window, rounded down to whole
/// cents.
pub fn note_from_hashrate(
    hashrate: &HashrateValue,
    seconds: f64,
    multiplier: f64,
) -> Result<Sharenote, SharenoteError> {
    let numeric = normalize_hashrate_value(hashrate)?;
    let bits = max_bits_for_hashrate(numeric, seconds, multiplier)?;
    Sharenote::from_bits(bits)
}

/// The half-open H/s interval `[low, high)` that maps back to this note's
/// label under [`note_from_hashrate`] — the quantisation band for one cent.
pub fn hashrate_range_for_note(
    note: impl Into<NoteInput>,
    seconds: f64,
    multiplier: f64,
) -> Result<(f64, f64), SharenoteError> {
    let resolved = ensure_note(note)?;
    let low = required_hashrate(&resolved, seconds, multiplier)?;
    // One cent up scales the difficulty by 2^0.01.
    let high = low * CENT_BIT_STEP.exp2();
    Ok((low, high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashrate::HashrateUnit;

    fn roughly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs()
    }

    #[test]
    fn test_required_hashrate_mean() {
        let mean = required_hashrate_mean("33Z53", 5.0).unwrap();
        assert!(roughly_equal(mean, 2.480651469e9));
    }

    #[test]
    fn test_required_hashrate_quantile() {
        let q95 = required_hashrate_quantile("33Z53", 5.0, 0.95).unwrap();
        assert!(roughly_equal(q95, 7.431367665e9));
    }

    #[test]
    fn test_required_hashrate_validation() {
        assert_eq!(
            required_hashrate("33Z53", 0.0, 1.0),
            Err(SharenoteError::NonPositiveSeconds)
        );
        assert_eq!(
            required_hashrate("33Z53", 5.0, 0.0),
            Err(SharenoteError::NonPositiveMultiplier)
        );
        for confidence in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            assert_eq!(
                required_hashrate_quantile("33Z53", 5.0, confidence),
                Err(SharenoteError::InvalidConfidence),
                "confidence {}",
                confidence
            );
        }
    }

    #[test]
    fn test_note_from_hashrate_inverts_mean() {
        let note = note_from_hashrate(
            &HashrateValue::new(2.480651469e9, HashrateUnit::Hps),
            5.0,
            1.0,
        )
        .unwrap();
        assert_eq!(note.label(), "33Z53");
    }

    #[test]
    fn test_note_from_hashrate_units() {
        // 5 GH/s over 5 s is 2.5e10 hashes, log2 ~ 34.54.
        let note = note_from_hashrate(
            &HashrateValue::new(5.0, HashrateUnit::GHps),
            5.0,
            1.0,
        )
        .unwrap();
        assert_eq!(note.label(), "34Z54");
    }

    #[test]
    fn test_max_bits_validation() {
        assert!(max_bits_for_hashrate(0.0, 5.0, 1.0).is_err());
        assert!(max_bits_for_hashrate(1e9, 0.0, 1.0).is_err());
        assert!(max_bits_for_hashrate(1e9, 5.0, 0.0).is_err());
        assert!(max_bits_for_hashrate(f64::INFINITY, 5.0, 1.0).is_err());
    }

    #[test]
    fn test_hashrate_range_quantisation_band() {
        let (low, high) = hashrate_range_for_note("33Z53", 5.0, 1.0).unwrap();
        assert!(roughly_equal(low, 2.480651469e9));
        assert!(roughly_equal(high / low, 0.01f64.exp2()));

        // Everything inside the band lands on the same label.
        let mid = (low + high) / 2.0;
        let note = note_from_hashrate(&HashrateValue::new(mid, HashrateUnit::Hps), 5.0, 1.0)
            .unwrap();
        assert_eq!(note.label(), "33Z53");

        // The top of the band tips over to the next cent.
        let above = note_from_hashrate(&HashrateValue::new(high, HashrateUnit::Hps), 5.0, 1.0)
            .unwrap();
        assert_eq!(above.label(), "33Z54");
    }

    #[test]
    fn test_reliability_levels_table() {
        let levels = reliability_levels();
        assert_eq!(levels.len(), 5);
        let ids: Vec<ReliabilityId> = levels.iter().map(|level| level.id).collect();
        assert_eq!(
            ids,
            [
                ReliabilityId::Mean,
                ReliabilityId::Usually90,
                ReliabilityId::Often95,
                ReliabilityId::VeryLikely99,
                ReliabilityId::Almost999,
            ]
        );

        let mean = reliability_level(ReliabilityId::Mean);
        assert_eq!(mean.confidence, None);
        assert_eq!(mean.multiplier, 1.0);

        let often = reliability_level(ReliabilityId::Often95);
        assert_eq!(often.confidence, Some(0.95));
        assert!(roughly_equal(often.multiplier, -(0.05f64.ln())));
    }

    #[test]
    fn test_reliability_names_round_trip() {
        for level in reliability_levels() {
            assert_eq!(ReliabilityId::from_name(level.id.name()), Some(level.id));
        }
        assert_eq!(ReliabilityId::from_name("sometimes"), None);
    }
}
