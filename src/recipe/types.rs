use serde::Serialize;

use crate::api::types::ProductionTypeDto;

/// A production type: the immutable recipe a console scales against.
///
/// `materials` preserves backend order. The first entry is the base
/// material; every scaling ratio in the engine is anchored to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionType {
    pub id: String,
    pub name: String,
    pub materials: Vec<RequiredMaterial>,
    /// Finished units one batch yields
    pub units_per_batch: u32,
    /// Selling price per finished unit
    pub unit_price: f64,
}

/// One material requirement of a recipe, per batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredMaterial {
    pub material_id: String,
    pub quantity_per_batch: f64,
    pub unit: String,
}

impl ProductionType {
    /// Build the domain recipe from the backend payload. The id travels
    /// separately because the payload does not echo it.
    pub fn from_dto(id: &str, dto: ProductionTypeDto) -> Self {
        let materials = dto
            .raw_materials_required
            .into_iter()
            .map(|m| RequiredMaterial {
                material_id: m.material_id,
                quantity_per_batch: m.quantity,
                unit: m.unit,
            })
            .collect();

        ProductionType {
            id: id.to_string(),
            name: dto.name,
            materials,
            units_per_batch: dto.units_produced,
            unit_price: dto.unit_price,
        }
    }

    /// The scaling anchor: the first required material, if any.
    pub fn base_material(&self) -> Option<&RequiredMaterial> {
        self.materials.first()
    }
}

/// Baseline values for one batch of a recipe: per-material quantities,
/// unit costs and line costs, plus yield and total cost.
///
/// This is the 1.0x reference every scaled preview is derived from. It is
/// produced by the constructors in [`crate::recipe::resolver`], which
/// guarantee a non-empty material list with positive quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialValues {
    pub production_type_id: String,
    pub materials: Vec<MaterialBaseline>,
    pub units_produced: u32,
    pub total_cost: f64,
}

/// One material line of a baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialBaseline {
    pub material_id: String,
    pub unit: String,
    /// Quantity per batch, in `unit`
    pub quantity: f64,
    /// Cost per single `unit` of this material
    pub unit_cost: f64,
    /// Cost of `quantity` at `unit_cost`
    pub cost: f64,
}

impl InitialValues {
    /// Quantity of the base material for one batch. Zero only if the
    /// struct was built by hand with no materials.
    pub fn base_quantity(&self) -> f64 {
        self.materials.first().map_or(0.0, |m| m.quantity)
    }

    /// The scaling anchor line, if any.
    pub fn base_material(&self) -> Option<&MaterialBaseline> {
        self.materials.first()
    }
}
