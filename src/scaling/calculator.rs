use crate::recipe::types::InitialValues;
use crate::scaling::types::{ScaledMaterial, ScalingState};

/// Half-width of the band around ratio 1.0 inside which the request is
/// treated as "one standard batch" and the log omits material overrides.
pub const DEFAULT_RATIO_TOLERANCE: f64 = 0.01;

/// Scale a baseline to the operator's requested base material quantity.
///
/// The ratio is anchored to the base material (first baseline line):
/// `requested / baseline base quantity`. Every material line is then
/// scaled and floored independently; costs are the baseline unit cost
/// times the floored quantity, so per-unit pricing survives any ratio.
/// Yield floors the same way. Flooring happens after multiplication,
/// per line; the ratio itself is never floored.
///
/// A request that is zero, negative, or not finite zeroes the preview
/// out instead of erroring: the operator is mid-edit and the form stays
/// open. The material rows are kept (zeroed) so a console can still
/// render the list.
pub fn scale(baseline: &InitialValues, requested_base_quantity: f64) -> ScalingState {
    let base_quantity = baseline.base_quantity();
    if !requested_base_quantity.is_finite()
        || requested_base_quantity <= 0.0
        || base_quantity <= 0.0
    {
        return zeroed(baseline, requested_base_quantity);
    }

    let ratio = requested_base_quantity / base_quantity;

    let materials: Vec<ScaledMaterial> = baseline
        .materials
        .iter()
        .map(|m| {
            let quantity = (ratio * m.quantity).floor();
            ScaledMaterial {
                material_id: m.material_id.clone(),
                unit: m.unit.clone(),
                quantity,
                cost: m.unit_cost * quantity,
            }
        })
        .collect();

    let total_cost = materials.iter().map(|m| m.cost).sum();
    let units_produced = (ratio * baseline.units_produced as f64).floor() as u32;

    ScalingState {
        materials,
        units_produced,
        total_cost,
        ratio,
        requested_base_quantity,
        at_default_ratio: (ratio - 1.0).abs() < DEFAULT_RATIO_TOLERANCE,
    }
}

/// Preview for an unusable request: every figure zero, rows preserved.
fn zeroed(baseline: &InitialValues, requested_base_quantity: f64) -> ScalingState {
    let materials = baseline
        .materials
        .iter()
        .map(|m| ScaledMaterial {
            material_id: m.material_id.clone(),
            unit: m.unit.clone(),
            quantity: 0.0,
            cost: 0.0,
        })
        .collect();

    ScalingState {
        materials,
        units_produced: 0,
        total_cost: 0.0,
        ratio: 0.0,
        requested_base_quantity,
        at_default_ratio: false,
    }
}
