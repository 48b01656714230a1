use serde::{Deserialize, Serialize};

// === Recipe payloads ===

/// Response body of `GET /production-types/{id}`.
///
/// Field order inside `raw_materials_required` is meaningful: the first
/// entry is the base material every scaling ratio is computed against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionTypeDto {
    /// Display name, e.g. "9-inch Hollow Blocks"
    pub name: String,
    pub raw_materials_required: Vec<RequiredMaterialDto>,
    /// Finished units one batch of this recipe yields
    pub units_produced: u32,
    /// Selling price per finished unit
    pub unit_price: f64,
}

/// One required material row inside a recipe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredMaterialDto {
    pub material_id: String,
    /// Quantity consumed per batch, in `unit`
    pub quantity: f64,
    pub unit: String,
}

// === Baseline payloads ===

/// Response body of `GET /production-types/{id}/initial-values`.
///
/// The backend pre-joins recipe quantities with inventory costs, so one
/// request yields the whole one-batch cost picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialValuesDto {
    pub initial_materials: Vec<InitialMaterialDto>,
    pub units_produced: u32,
    pub total_cost: f64,
}

/// One material row inside a baseline payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialMaterialDto {
    pub material_id: String,
    /// Quantity consumed per batch, in `unit`
    pub quantity: f64,
    /// Cost of that quantity, in the console's currency
    pub cost: f64,
    pub unit: String,
}

// === Inventory payloads ===

/// Response body of `GET /inventory/{materialId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    /// Display name, e.g. "Portland Cement"
    pub name: String,
    pub unit: String,
    pub cost_per_unit: f64,
    /// Stock on hand, in `unit`
    pub quantity: f64,
}
