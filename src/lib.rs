//! Batchmate: production scaling and costing engine for batch
//! manufacturing consoles.
//!
//! The engine resolves a production type's baseline from the console
//! backend, recomputes material quantities, costs and yield whenever the
//! operator scales the base material, and assembles the production-log
//! submission body. All arithmetic lives in pure functions under
//! [`scaling`] and [`draft`]; network and state concerns sit in [`api`]
//! and [`session`].

pub mod api;
pub mod draft;
pub mod error;
pub mod recipe;
pub mod scaling;
pub mod session;

pub use api::client::{ApiClient, UNKNOWN_MATERIAL};
pub use draft::builder::{build_draft, override_is_consistent};
pub use draft::types::{MaterialUsed, ProductionLogDraft, ProductionLogForm};
pub use error::EngineError;
pub use recipe::types::{InitialValues, MaterialBaseline, ProductionType, RequiredMaterial};
pub use scaling::calculator::{scale, DEFAULT_RATIO_TOLERANCE};
pub use scaling::types::{ScaledMaterial, ScalingState};
pub use session::{ProductionFormSession, SelectionToken};
