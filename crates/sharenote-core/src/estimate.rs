//! Bill estimates and rig planning reports.
//!
//! An estimate bundles everything a UI needs to show for one note and time
//! window: per-hash probability, expected work, and the mean and quantile
//! hashrates with a humanised "primary" figure. Planning inverts the same
//! maths to pick the best note for a rig's measured hashrate.

use crate::arith::{expected_hashes_for_note, probability_per_hash};
use crate::error::SharenoteError;
use crate::hashrate::{humanise_hashrate, normalize_hashrate_value, HashrateValue, HumanHashrate};
use crate::note::{ensure_note, NoteInput, Sharenote};
use crate::plan::{
    note_from_hashrate, quantile_multiplier, reliability_level, required_hashrate,
    required_hashrate_mean, ReliabilityId,
};

/// Whether a bill estimate leads with the mean or the quantile hashrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryMode {
    Mean,
    Quantile,
}

/// Configuration for [`estimate_note`] and
/// [`plan_sharenote_from_hashrate`].
///
/// Defaults: multiplier 1, no quantile, primary mode inferred, probability
/// precision 8.
#[derive(Debug, Clone)]
pub struct EstimateOptions {
    multiplier: f64,
    quantile: Option<f64>,
    primary_mode: Option<PrimaryMode>,
    probability_precision: usize,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        EstimateOptions {
            multiplier: 1.0,
            quantile: None,
            primary_mode: None,
            probability_precision: 8,
        }
    }
}

impl EstimateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the Poisson multiplier directly, clearing any quantile.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self.quantile = None;
        self
    }

    /// Adopt a preset's multiplier and confidence.
    pub fn with_reliability(mut self, id: ReliabilityId) -> Self {
        let level = reliability_level(id);
        self.multiplier = level.multiplier;
        self.quantile = level.confidence;
        self
    }

    /// Derive the multiplier from a raw confidence in (0, 1); out-of-range
    /// values are ignored.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        if let Ok(multiplier) = quantile_multiplier(confidence) {
            self.multiplier = multiplier;
            self.quantile = Some(confidence);
        }
        self
    }

    /// Force the primary hashrate to mean or quantile.
    pub fn with_primary_mode(mut self, mode: PrimaryMode) -> Self {
        self.primary_mode = Some(mode);
        self
    }

    /// Decimal places for the probability display.
    pub fn with_probability_precision(mut self, precision: usize) -> Self {
        self.probability_precision = precision;
        self
    }
}

/// Everything needed to show the cost of minting one note in one window.
#[derive(Debug, Clone)]
pub struct BillEstimate {
    pub sharenote: Sharenote,
    pub label: String,
    pub bits: f64,
    pub seconds_target: f64,
    pub probability_per_hash: f64,
    /// e.g. `"1 / 2^33.53000000"`.
    pub probability_display: String,
    pub expected_hashes: f64,
    pub required_hashrate_mean: f64,
    pub required_hashrate_quantile: f64,
    pub required_hashrate_primary: f64,
    pub required_hashrate_human: HumanHashrate,
    pub multiplier: f64,
    pub quantile: Option<f64>,
    pub primary_mode: PrimaryMode,
}

/// A note choice for a rig, with the bill that justifies it.
#[derive(Debug, Clone)]
pub struct SharenotePlan {
    pub sharenote: Sharenote,
    pub bill: BillEstimate,
    pub seconds_target: f64,
    pub input_hashrate_hps: f64,
    pub input_hashrate_human: HumanHashrate,
}

/// Render a per-hash probability as `"1 / 2^<bits>"` text.
pub fn format_probability_display(bits: f64, precision: usize) -> String {
    format!("1 / 2^{:.*}", precision, bits)
}

/// Compute a [`BillEstimate`] for the note over the given window.
pub fn estimate_note(
    note: impl Into<NoteInput>,
    seconds: f64,
    options: EstimateOptions,
) -> Result<BillEstimate, SharenoteError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(SharenoteError::NonPositiveSeconds);
    }
    if !options.multiplier.is_finite() || options.multiplier <= 0.0 {
        return Err(SharenoteError::NonPositiveMultiplier);
    }
    let resolved = ensure_note(note)?;

    let probability = probability_per_hash(&resolved)?;
    let expected = expected_hashes_for_note(&resolved)?;
    let mean = required_hashrate_mean(&resolved, seconds)?;
    let quantile_rate = required_hashrate(&resolved, seconds, options.multiplier)?;

    let primary_mode = match options.primary_mode {
        // A quantile primary is only meaningful when one was requested.
        Some(PrimaryMode::Quantile) if options.quantile.is_none() => PrimaryMode::Mean,
        Some(mode) => mode,
        None if options.quantile.is_some() => PrimaryMode::Quantile,
        None => PrimaryMode::Mean,
    };
    let primary = match primary_mode {
        PrimaryMode::Mean => mean,
        PrimaryMode::Quantile => quantile_rate,
    };

    Ok(BillEstimate {
        label: resolved.label(),
        bits: resolved.bits(),
        probability_display: format_probability_display(
            resolved.bits(),
            options.probability_precision,
        ),
        sharenote: resolved,
        seconds_target: seconds,
        probability_per_hash: probability,
        expected_hashes: expected,
        required_hashrate_mean: mean,
        required_hashrate_quantile: quantile_rate,
        required_hashrate_primary: primary,
        required_hashrate_human: humanise_hashrate(primary),
        multiplier: options.multiplier,
        quantile: options.quantile,
        primary_mode,
    })
}

/// Estimate several notes under the same window and options.
pub fn estimate_notes<I>(
    notes: I,
    seconds: f64,
    options: EstimateOptions,
) -> Result<Vec<BillEstimate>, SharenoteError>
where
    I: IntoIterator,
    I::Item: Into<NoteInput>,
{
    notes
        .into_iter()
        .map(|note| estimate_note(note, seconds, options.clone()))
        .collect()
}

/// Pick the hardest note a rig can mint in the window and estimate it.
///
/// The options' multiplier drives both the note choice and the bill, so a
/// reliability preset applies consistently to both halves.
pub fn plan_sharenote_from_hashrate(
    hashrate: &HashrateValue,
    seconds: f64,
    options: EstimateOptions,
) -> Result<SharenotePlan, SharenoteError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(SharenoteError::NonPositiveSeconds);
    }
    let numeric = normalize_hashrate_value(hashrate)?;
    if numeric <= 0.0 {
        return Err(SharenoteError::NonPositiveHashrate);
    }

    let note = note_from_hashrate(hashrate, seconds, options.multiplier)?;
    let bill = estimate_note(&note, seconds, options)?;

    Ok(SharenotePlan {
        sharenote: note,
        bill,
        seconds_target: seconds,
        input_hashrate_hps: numeric,
        input_hashrate_human: humanise_hashrate(numeric),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashrate::HashrateUnit;

    fn roughly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs()
    }

    #[test]
    fn test_estimate_defaults_to_mean() {
        let estimate = estimate_note("33Z53", 5.0, EstimateOptions::new()).unwrap();
        assert_eq!(estimate.label, "33Z53");
        assert_eq!(estimate.primary_mode, PrimaryMode::Mean);
        assert_eq!(estimate.quantile, None);
        assert!(roughly_equal(estimate.required_hashrate_primary, 2.480651469e9));
        assert_eq!(estimate.probability_display, "1 / 2^33.53000000");
        assert!(roughly_equal(
            estimate.probability_per_hash * estimate.expected_hashes,
            1.0
        ));
    }

    #[test]
    fn test_estimate_with_confidence() {
        let estimate = estimate_note(
            "33Z53",
            5.0,
            EstimateOptions::new().with_confidence(0.95),
        )
        .unwrap();
        assert_eq!(estimate.primary_mode, PrimaryMode::Quantile);
        assert_eq!(estimate.quantile, Some(0.95));
        assert!(roughly_equal(estimate.required_hashrate_primary, 7.431367665e9));
        assert_eq!(estimate.required_hashrate_human.unit, HashrateUnit::GHps);
        assert!(estimate.required_hashrate_human.display.starts_with("7.43"));
        assert!(estimate.required_hashrate_human.display.ends_with(" GH/s"));
    }

    #[test]
    fn test_estimate_with_reliability_preset() {
        let estimate = estimate_note(
            "33Z53",
            5.0,
            EstimateOptions::new().with_reliability(ReliabilityId::Often95),
        )
        .unwrap();
        assert_eq!(estimate.quantile, Some(0.95));
        assert!(roughly_equal(estimate.required_hashrate_primary, 7.431367665e9));
    }

    #[test]
    fn test_estimate_primary_mode_overrides() {
        // Explicit mean wins over a requested quantile.
        let mean_first = estimate_note(
            "33Z53",
            5.0,
            EstimateOptions::new()
                .with_confidence(0.95)
                .with_primary_mode(PrimaryMode::Mean),
        )
        .unwrap();
        assert_eq!(mean_first.primary_mode, PrimaryMode::Mean);
        assert!(roughly_equal(
            mean_first.required_hashrate_primary,
            mean_first.required_hashrate_mean
        ));

        // Quantile without a quantile request falls back to mean.
        let fallback = estimate_note(
            "33Z53",
            5.0,
            EstimateOptions::new().with_primary_mode(PrimaryMode::Quantile),
        )
        .unwrap();
        assert_eq!(fallback.primary_mode, PrimaryMode::Mean);
    }

    #[test]
    fn test_estimate_validation() {
        assert_eq!(
            estimate_note("33Z53", 0.0, EstimateOptions::new()).unwrap_err(),
            SharenoteError::NonPositiveSeconds
        );
        assert_eq!(
            estimate_note("33Z53", 5.0, EstimateOptions::new().with_multiplier(0.0)).unwrap_err(),
            SharenoteError::NonPositiveMultiplier
        );
        assert!(estimate_note("abcZ", 5.0, EstimateOptions::new()).is_err());

        // Out-of-range confidence leaves the defaults untouched.
        let untouched = estimate_note(
            "33Z53",
            5.0,
            EstimateOptions::new().with_confidence(1.0),
        )
        .unwrap();
        assert_eq!(untouched.quantile, None);
        assert_eq!(untouched.multiplier, 1.0);
    }

    #[test]
    fn test_estimate_notes_batch() {
        let estimates = estimate_notes(["33Z53", "20Z10"], 5.0, EstimateOptions::new()).unwrap();
        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0].label, "33Z53");
        assert_eq!(estimates[1].label, "20Z10");
    }

    #[test]
    fn test_format_probability_display() {
        assert_eq!(format_probability_display(57.12, 5), "1 / 2^57.12000");
        assert_eq!(format_probability_display(33.53, 0), "1 / 2^34");
    }

    #[test]
    fn test_plan_from_hashrate() {
        let rig = HashrateValue::new(5.0, HashrateUnit::GHps);
        let plan = plan_sharenote_from_hashrate(
            &rig,
            5.0,
            EstimateOptions::new().with_reliability(ReliabilityId::Often95),
        )
        .unwrap();

        let expected = note_from_hashrate(
            &rig,
            5.0,
            reliability_level(ReliabilityId::Often95).multiplier,
        )
        .unwrap();
        assert_eq!(plan.sharenote.label(), expected.label());

        // The quantile bill for the chosen note sits just under the rig's
        // actual hashrate (cent quantisation rounds the note down).
        let input = plan.input_hashrate_hps;
        let deviation = (plan.bill.required_hashrate_primary - input).abs() / input;
        assert!(deviation <= 0.02, "deviation {}", deviation);
        assert_eq!(plan.input_hashrate_human.unit, HashrateUnit::GHps);
        assert!(roughly_equal(input, 5e9));
    }

    #[test]
    fn test_plan_validation() {
        let rig = HashrateValue::new(0.0, HashrateUnit::GHps);
        assert_eq!(
            plan_sharenote_from_hashrate(&rig, 5.0, EstimateOptions::new()).unwrap_err(),
            SharenoteError::NonPositiveHashrate
        );
    }
}
