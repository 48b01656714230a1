use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Operator-entered fields for one production log.
///
/// This is form state, not a wire type; the submission body is produced
/// by [`crate::draft::build_draft`], which pairs it with the current
/// scaled preview.
#[derive(Debug, Clone)]
pub struct ProductionLogForm {
    pub production_type_id: String,
    pub date: NaiveDate,
    pub machine: String,
    pub operator: Option<String>,
    pub shift: String,
    pub notes: Option<String>,
}

/// Request body of `POST /production/logs`.
///
/// `raw_materials_used` is omitted from the JSON entirely (not null)
/// when the log runs at recipe defaults; the backend falls back to the
/// recipe's own quantities. When present it carries the base material
/// only, with the operator's requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLogDraft {
    pub production_type_id: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub machine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    pub shift: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_materials_used: Option<Vec<MaterialUsed>>,
}

/// One material usage override on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsed {
    pub material_id: String,
    pub quantity: f64,
}
