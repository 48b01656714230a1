//! Recipes and the baselines resolved from them.

pub mod resolver;
pub mod types;

pub use resolver::{baseline_from_initial_values, baseline_from_recipe, resolve};
pub use types::{InitialValues, MaterialBaseline, ProductionType, RequiredMaterial};
