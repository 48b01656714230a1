//! Ratio-based scaling of recipe baselines.
//!
//! # Architecture
//!
//! - `types` holds the preview structures a console renders
//! - `calculator` holds the pure scaling function
//!
//! Scaling is a full recompute: every request maps the baseline through
//! one ratio and produces a fresh [`ScalingState`]. Nothing is mutated
//! incrementally, so a preview can never drift from its inputs.
//!
//! # Example
//!
//! ```
//! use batchmate::recipe::{InitialValues, MaterialBaseline};
//! use batchmate::scaling::scale;
//!
//! let baseline = InitialValues {
//!     production_type_id: "pt-blocks".to_string(),
//!     materials: vec![MaterialBaseline {
//!         material_id: "mat-cement".to_string(),
//!         unit: "kg".to_string(),
//!         quantity: 10.0,
//!         unit_cost: 2.0,
//!         cost: 20.0,
//!     }],
//!     units_produced: 5,
//!     total_cost: 20.0,
//! };
//!
//! let preview = scale(&baseline, 25.0);
//! assert_eq!(preview.units_produced, 12);
//! assert_eq!(preview.total_cost, 50.0);
//! ```

pub mod calculator;
pub mod types;

pub use calculator::{scale, DEFAULT_RATIO_TOLERANCE};
pub use types::{ScaledMaterial, ScalingState};
