//! Production log drafts: form input, validation, and the wire body.

pub mod builder;
pub mod types;

pub use builder::{build_draft, override_is_consistent};
pub use types::{MaterialUsed, ProductionLogDraft, ProductionLogForm};
