//! Baseline construction: turning backend payloads into validated
//! [`InitialValues`] the calculator can scale against.
//!
//! Two construction paths exist, mirroring the two backend shapes:
//! the pre-joined `initial-values` payload, and a recipe paired with
//! per-material unit costs from inventory. Both reject data the engine
//! cannot scale (empty material list, non-positive quantities, zero
//! yield) so every `InitialValues` in circulation is usable as a divisor.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::api::client::ApiClient;
use crate::api::types::InitialValuesDto;
use crate::error::EngineError;
use crate::recipe::types::{InitialValues, MaterialBaseline, ProductionType};

/// Tolerance for the backend's pre-computed total drifting from the
/// sum of its own material lines.
const TOTAL_COST_DRIFT: f64 = 0.01;

/// Build a baseline from the pre-joined `initial-values` payload.
///
/// The total cost is recomputed from the material lines; a backend total
/// that disagrees is logged and ignored, since every downstream figure is
/// derived from the lines.
pub fn baseline_from_initial_values(
    production_type_id: &str,
    dto: &InitialValuesDto,
) -> Result<InitialValues, EngineError> {
    if dto.initial_materials.is_empty() {
        return Err(EngineError::EmptyRecipe(production_type_id.to_string()));
    }
    if dto.units_produced == 0 {
        return Err(invalid(production_type_id, "recipe produces zero units per batch"));
    }

    let mut materials = Vec::with_capacity(dto.initial_materials.len());
    for m in &dto.initial_materials {
        check_quantity(production_type_id, &m.material_id, m.quantity)?;
        check_cost(production_type_id, &m.material_id, m.cost)?;
        materials.push(MaterialBaseline {
            material_id: m.material_id.clone(),
            unit: m.unit.clone(),
            quantity: m.quantity,
            unit_cost: m.cost / m.quantity,
            cost: m.cost,
        });
    }

    let total_cost: f64 = materials.iter().map(|m| m.cost).sum();
    if (total_cost - dto.total_cost).abs() > TOTAL_COST_DRIFT {
        warn!(
            "Backend totalCost {} for '{}' disagrees with material lines ({}); using the line sum",
            dto.total_cost, production_type_id, total_cost
        );
    }

    Ok(InitialValues {
        production_type_id: production_type_id.to_string(),
        materials,
        units_produced: dto.units_produced,
        total_cost,
    })
}

/// Build a baseline from a recipe plus per-material unit costs.
///
/// Used when the backend has no `initial-values` endpoint. `unit_costs`
/// maps material id to cost per single unit; a material without a cost
/// makes the recipe unscalable and is rejected.
pub fn baseline_from_recipe(
    recipe: &ProductionType,
    unit_costs: &HashMap<String, f64>,
) -> Result<InitialValues, EngineError> {
    if recipe.materials.is_empty() {
        return Err(EngineError::EmptyRecipe(recipe.id.clone()));
    }
    if recipe.units_per_batch == 0 {
        return Err(invalid(&recipe.id, "recipe produces zero units per batch"));
    }

    let mut materials = Vec::with_capacity(recipe.materials.len());
    for m in &recipe.materials {
        check_quantity(&recipe.id, &m.material_id, m.quantity_per_batch)?;
        let unit_cost = *unit_costs.get(&m.material_id).ok_or_else(|| {
            invalid(
                &recipe.id,
                &format!("no unit cost for material '{}'", m.material_id),
            )
        })?;
        check_cost(&recipe.id, &m.material_id, unit_cost)?;
        materials.push(MaterialBaseline {
            material_id: m.material_id.clone(),
            unit: m.unit.clone(),
            quantity: m.quantity_per_batch,
            unit_cost,
            cost: unit_cost * m.quantity_per_batch,
        });
    }

    let total_cost = materials.iter().map(|m| m.cost).sum();

    Ok(InitialValues {
        production_type_id: recipe.id.clone(),
        materials,
        units_produced: recipe.units_per_batch,
        total_cost,
    })
}

/// Fetch per-unit costs for every material of a recipe from inventory.
///
/// Any failure is propagated: unlike display names, costs have no safe
/// placeholder, and a baseline without them would silently miscost logs.
pub async fn unit_costs_from_inventory(
    client: &ApiClient,
    recipe: &ProductionType,
) -> Result<HashMap<String, f64>, EngineError> {
    let mut costs = HashMap::with_capacity(recipe.materials.len());
    for m in &recipe.materials {
        if costs.contains_key(&m.material_id) {
            continue;
        }
        let item = client.inventory_item(&m.material_id).await?;
        costs.insert(m.material_id.clone(), item.cost_per_unit);
    }
    Ok(costs)
}

/// Resolve a production type's baseline via the pre-joined endpoint.
pub async fn resolve(
    client: &ApiClient,
    production_type_id: &str,
) -> Result<InitialValues, EngineError> {
    info!("Resolving baseline for production type '{}'", production_type_id);
    let dto = client.initial_values(production_type_id).await?;
    let baseline = baseline_from_initial_values(production_type_id, &dto)?;
    info!(
        "Baseline for '{}': {} materials, {} units/batch, total cost {}",
        production_type_id,
        baseline.materials.len(),
        baseline.units_produced,
        baseline.total_cost
    );
    Ok(baseline)
}

fn invalid(production_type_id: &str, reason: &str) -> EngineError {
    EngineError::InvalidRecipe {
        production_type_id: production_type_id.to_string(),
        reason: reason.to_string(),
    }
}

fn check_quantity(
    production_type_id: &str,
    material_id: &str,
    quantity: f64,
) -> Result<(), EngineError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(invalid(
            production_type_id,
            &format!("material '{}' has non-positive quantity {}", material_id, quantity),
        ));
    }
    Ok(())
}

fn check_cost(production_type_id: &str, material_id: &str, cost: f64) -> Result<(), EngineError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(invalid(
            production_type_id,
            &format!("material '{}' has invalid cost {}", material_id, cost),
        ));
    }
    Ok(())
}
