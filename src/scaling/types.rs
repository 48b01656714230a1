use serde::Serialize;

/// One material line of a scaled preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledMaterial {
    pub material_id: String,
    pub unit: String,
    /// Scaled quantity, floored to a whole number of `unit`
    pub quantity: f64,
    /// Line cost: baseline unit cost times the floored quantity
    pub cost: f64,
}

/// The complete preview for one requested base material quantity.
///
/// Produced by [`crate::scaling::scale`] as a pure function of the
/// baseline and the request; recomputing with the same inputs yields an
/// identical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingState {
    /// Material lines in baseline order; index 0 is the base material
    pub materials: Vec<ScaledMaterial>,
    pub units_produced: u32,
    pub total_cost: f64,
    /// Requested base quantity divided by the baseline base quantity.
    /// Zero when the request zeroes the preview out.
    pub ratio: f64,
    /// The operator's input, echoed verbatim (not floored)
    pub requested_base_quantity: f64,
    /// True when the ratio sits inside the tolerance band around 1.0,
    /// meaning the log can rely on recipe defaults
    pub at_default_ratio: bool,
}

impl ScalingState {
    /// The scaled base material line, if any.
    pub fn base_material(&self) -> Option<&ScaledMaterial> {
        self.materials.first()
    }

    /// Revenue if every projected unit sells at `unit_price`.
    pub fn projected_revenue(&self, unit_price: f64) -> f64 {
        self.units_produced as f64 * unit_price
    }

    /// Projected revenue minus projected material cost.
    pub fn projected_margin(&self, unit_price: f64) -> f64 {
        self.projected_revenue(unit_price) - self.total_cost
    }
}
