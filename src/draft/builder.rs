//! Submission assembly: validating form state against the scaled
//! preview and producing the wire draft.

use std::collections::HashSet;

use crate::draft::types::{MaterialUsed, ProductionLogDraft, ProductionLogForm};
use crate::error::EngineError;
use crate::recipe::types::ProductionType;
use crate::scaling::types::ScalingState;

/// Tolerance when comparing whole-valued floored quantities.
const QUANTITY_EPSILON: f64 = 1e-9;

/// Build the submission body for one production log.
///
/// Rejects drafts the backend would record as nonsense: blank required
/// fields and previews that yield zero units. At default ratio the
/// material override is omitted entirely so the backend applies recipe
/// defaults; otherwise the override carries the base material with the
/// operator's requested quantity, exactly as entered.
///
/// Text fields are trimmed; blank optional fields collapse to omitted.
pub fn build_draft(
    form: &ProductionLogForm,
    scaling: &ScalingState,
) -> Result<ProductionLogDraft, EngineError> {
    if form.production_type_id.trim().is_empty() {
        return Err(EngineError::MissingField("production type"));
    }
    if form.machine.trim().is_empty() {
        return Err(EngineError::MissingField("machine"));
    }
    if form.shift.trim().is_empty() {
        return Err(EngineError::MissingField("shift"));
    }
    if scaling.units_produced == 0 {
        return Err(EngineError::ZeroYield);
    }

    let raw_materials_used = if scaling.at_default_ratio {
        None
    } else {
        let base = match scaling.base_material() {
            Some(base) => base,
            None => return Err(EngineError::EmptyRecipe(form.production_type_id.clone())),
        };
        Some(vec![MaterialUsed {
            material_id: base.material_id.clone(),
            quantity: scaling.requested_base_quantity,
        }])
    };

    Ok(ProductionLogDraft {
        production_type_id: form.production_type_id.trim().to_string(),
        date: form.date,
        machine: form.machine.trim().to_string(),
        operator: normalize_optional(&form.operator),
        shift: form.shift.trim().to_string(),
        notes: normalize_optional(&form.notes),
        raw_materials_used,
    })
}

/// Check a draft's material override against a recipe.
///
/// `None` is always consistent: the log runs at recipe defaults. A
/// present override must name only materials the recipe lists, each at
/// most once, and every entry other than the base material must equal
/// the scale-then-floor result of the ratio implied by the base entry.
/// The base entry itself is exempt from flooring because it carries the
/// raw requested quantity.
pub fn override_is_consistent(draft: &ProductionLogDraft, recipe: &ProductionType) -> bool {
    let entries = match &draft.raw_materials_used {
        None => return true,
        Some(entries) => entries,
    };
    if entries.is_empty() {
        return false;
    }

    let base = match recipe.base_material() {
        Some(base) if base.quantity_per_batch > 0.0 => base,
        _ => return false,
    };
    let base_entry = match entries.iter().find(|e| e.material_id == base.material_id) {
        Some(entry) => entry,
        None => return false,
    };
    if !base_entry.quantity.is_finite() || base_entry.quantity <= 0.0 {
        return false;
    }

    let ratio = base_entry.quantity / base.quantity_per_batch;
    let mut seen = HashSet::new();
    for entry in entries {
        // A single scaling pass emits each material once
        if !seen.insert(entry.material_id.as_str()) {
            return false;
        }
        if entry.material_id == base.material_id {
            continue;
        }
        let required = match recipe
            .materials
            .iter()
            .find(|m| m.material_id == entry.material_id)
        {
            Some(required) => required,
            None => return false,
        };
        let expected = (ratio * required.quantity_per_batch).floor();
        if (entry.quantity - expected).abs() > QUANTITY_EPSILON {
            return false;
        }
    }
    true
}

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
