//! Stateless planner API exposed to JavaScript.

use wasm_bindgen::prelude::*;

use sharenote_core::{
    estimate_note, humanise_hashrate, parse_hashrate, parse_label,
    plan_sharenote_from_hashrate, reliability_levels, EstimateOptions, HashrateUnit,
    HashrateValue, ReliabilityId,
};

use crate::view::{
    to_js, EstimateView, HumanHashrateView, NoteView, PlanView, ReliabilityView,
};

/// Parse a note label ("33Z53", "33.53Z", "33Z 53CZ") into its components.
#[wasm_bindgen]
pub fn parse_note(label: &str) -> Result<JsValue, JsValue> {
    let note = parse_label(label).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&NoteView::from(&note))
}

/// Parse a human-entered hashrate string (e.g. "5 GH/s") into H/s.
#[wasm_bindgen]
pub fn parse_hashrate_text(input: &str) -> Result<f64, JsValue> {
    parse_hashrate(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Estimate the hashrate bill for a note over `seconds`.
///
/// `reliability` is an optional preset id ("mean", "usually_90", "often_95",
/// "very_likely_99", "almost_999"); omitted means the mean estimate.
#[wasm_bindgen]
pub fn estimate(label: &str, seconds: f64, reliability: Option<String>) -> Result<JsValue, JsValue> {
    let options = options_for(reliability.as_deref())?;
    let bill = estimate_note(label, seconds, options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&EstimateView::from(&bill))
}

/// Plan the hardest note a rig can mint in `seconds`, given its hashrate as
/// text (e.g. "5 GH/s").
#[wasm_bindgen]
pub fn plan_from_hashrate(
    hashrate: &str,
    seconds: f64,
    reliability: Option<String>,
) -> Result<JsValue, JsValue> {
    let hps = parse_hashrate(hashrate).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = options_for(reliability.as_deref())?;
    let plan = plan_sharenote_from_hashrate(
        &HashrateValue::new(hps, HashrateUnit::Hps),
        seconds,
        options,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&PlanView::from(&plan))
}

/// Render a raw H/s figure in its most readable SI unit.
#[wasm_bindgen]
pub fn humanise(hashrate: f64) -> Result<JsValue, JsValue> {
    let human = humanise_hashrate(hashrate);
    to_js(&HumanHashrateView::from(&human))
}

/// List the reliability presets in their stable order.
#[wasm_bindgen]
pub fn reliability_presets() -> Result<JsValue, JsValue> {
    let views: Vec<ReliabilityView> = reliability_levels()
        .iter()
        .map(ReliabilityView::from)
        .collect();
    to_js(&views)
}

fn options_for(reliability: Option<&str>) -> Result<EstimateOptions, JsValue> {
    match reliability {
        None => Ok(EstimateOptions::new()),
        Some(name) => {
            let id = ReliabilityId::from_name(name).ok_or_else(|| {
                JsValue::from_str(&format!("unknown reliability level: {}", name))
            })?;
            Ok(EstimateOptions::new().with_reliability(id))
        }
    }
}
