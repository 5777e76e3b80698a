//! Serde mirror structs handed across the JS boundary.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use sharenote_core::{
    BillEstimate, HumanHashrate, PrimaryMode, ReliabilityLevel, Sharenote, SharenotePlan,
};

/// A parsed note for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteView {
    /// Canonical label, e.g. "33Z53".
    pub label: String,
    /// Whole-bit component.
    pub z: u32,
    /// Cent component in 0..=99.
    pub cents: u8,
    /// Continuous bit difficulty.
    pub bits: f64,
}

impl From<&Sharenote> for NoteView {
    fn from(note: &Sharenote) -> Self {
        NoteView {
            label: note.label(),
            z: note.z(),
            cents: note.cents(),
            bits: note.bits(),
        }
    }
}

/// A humanised hashrate for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanHashrateView {
    /// Magnitude after scaling into `unit`.
    pub value: f64,
    /// Unit symbol, e.g. "GH/s".
    pub unit: String,
    /// Rendered text, e.g. "3.20 GH/s".
    pub display: String,
    /// SI exponent of the unit (GH/s is 3).
    pub exponent: u32,
}

impl From<&HumanHashrate> for HumanHashrateView {
    fn from(human: &HumanHashrate) -> Self {
        HumanHashrateView {
            value: human.value,
            unit: human.unit.symbol().to_string(),
            display: human.display.clone(),
            exponent: human.exponent,
        }
    }
}

/// A bill estimate for one note and time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateView {
    pub note: NoteView,
    pub seconds_target: f64,
    pub probability_per_hash: f64,
    /// e.g. "1 / 2^33.53000000".
    pub probability_display: String,
    pub expected_hashes: f64,
    pub required_hashrate_mean: f64,
    pub required_hashrate_quantile: f64,
    pub required_hashrate_primary: f64,
    pub required_hashrate_human: HumanHashrateView,
    pub multiplier: f64,
    pub quantile: Option<f64>,
    /// "mean" or "quantile".
    pub primary_mode: String,
}

impl From<&BillEstimate> for EstimateView {
    fn from(bill: &BillEstimate) -> Self {
        EstimateView {
            note: NoteView::from(&bill.sharenote),
            seconds_target: bill.seconds_target,
            probability_per_hash: bill.probability_per_hash,
            probability_display: bill.probability_display.clone(),
            expected_hashes: bill.expected_hashes,
            required_hashrate_mean: bill.required_hashrate_mean,
            required_hashrate_quantile: bill.required_hashrate_quantile,
            required_hashrate_primary: bill.required_hashrate_primary,
            required_hashrate_human: HumanHashrateView::from(&bill.required_hashrate_human),
            multiplier: bill.multiplier,
            quantile: bill.quantile,
            primary_mode: primary_mode_name(bill.primary_mode).to_string(),
        }
    }
}

/// A planned note for a rig, with its supporting bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanView {
    pub note: NoteView,
    pub bill: EstimateView,
    pub seconds_target: f64,
    pub input_hashrate_hps: f64,
    pub input_hashrate_human: HumanHashrateView,
}

impl From<&SharenotePlan> for PlanView {
    fn from(plan: &SharenotePlan) -> Self {
        PlanView {
            note: NoteView::from(&plan.sharenote),
            bill: EstimateView::from(&plan.bill),
            seconds_target: plan.seconds_target,
            input_hashrate_hps: plan.input_hashrate_hps,
            input_hashrate_human: HumanHashrateView::from(&plan.input_hashrate_human),
        }
    }
}

/// A reliability preset for selection UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityView {
    /// Stable identifier, e.g. "often_95".
    pub id: String,
    /// Human-facing description.
    pub label: String,
    pub confidence: Option<f64>,
    pub multiplier: f64,
}

impl From<&ReliabilityLevel> for ReliabilityView {
    fn from(level: &ReliabilityLevel) -> Self {
        ReliabilityView {
            id: level.id.name().to_string(),
            label: level.label.to_string(),
            confidence: level.confidence,
            multiplier: level.multiplier,
        }
    }
}

fn primary_mode_name(mode: PrimaryMode) -> &'static str {
    match mode {
        PrimaryMode::Mean => "mean",
        PrimaryMode::Quantile => "quantile",
    }
}

/// Convert any view into a JS value.
pub fn to_js<T: Serialize>(view: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(view)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharenote_core::{estimate_note, parse_label, EstimateOptions};

    #[test]
    fn test_note_view_fields() {
        let note = parse_label("33Z53").unwrap();
        let view = NoteView::from(&note);
        assert_eq!(view.label, "33Z53");
        assert_eq!(view.z, 33);
        assert_eq!(view.cents, 53);
    }

    #[test]
    fn test_estimate_view_serialises() {
        let bill = estimate_note(
            "33Z53",
            5.0,
            EstimateOptions::new().with_confidence(0.95),
        )
        .unwrap();
        let view = EstimateView::from(&bill);
        assert_eq!(view.primary_mode, "quantile");
        assert_eq!(view.required_hashrate_human.unit, "GH/s");

        let json = serde_json::to_string(&view).unwrap();
        let parsed: EstimateView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.note.label, "33Z53");
        assert_eq!(parsed.quantile, Some(0.95));
    }
}
