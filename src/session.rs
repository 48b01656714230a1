//! Form session orchestration: selection lifecycle, stale-response
//! guarding, preview recompute, and draft assembly.
//!
//! Selections resolve asynchronously and an operator can re-select
//! while a fetch is in flight. Every selection gets a monotone token;
//! a resolution is applied only if its token is still the newest one,
//! so a slow response can never overwrite a later selection's values.
//!
//! # Example
//!
//! ```ignore
//! let client = ApiClient::new("http://localhost:5000/api")?;
//! let mut session = ProductionFormSession::new();
//!
//! session.select_production_type(&client, "pt-blocks").await?;
//! session.set_base_quantity(25.0);
//!
//! let draft = session.build_draft(&form)?;
//! let log = client.create_log(&draft).await?;
//! ```

use tracing::{debug, info, warn};

use crate::api::client::ApiClient;
use crate::draft::builder;
use crate::draft::types::{ProductionLogDraft, ProductionLogForm};
use crate::error::EngineError;
use crate::recipe::resolver;
use crate::recipe::types::InitialValues;
use crate::scaling::calculator::scale;
use crate::scaling::types::ScalingState;

/// Identifies one production-type selection within a session. Becomes
/// stale the moment a newer selection begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken {
    generation: u64,
}

/// State machine behind one production log form.
#[derive(Debug, Default)]
pub struct ProductionFormSession {
    generation: u64,
    pending_id: Option<String>,
    baseline: Option<InitialValues>,
    scaling: Option<ScalingState>,
}

impl ProductionFormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start selecting `production_type_id`: clears the current values
    /// and returns the token the eventual resolution must present.
    pub fn begin_selection(&mut self, production_type_id: &str) -> SelectionToken {
        self.generation += 1;
        self.pending_id = Some(production_type_id.to_string());
        self.baseline = None;
        self.scaling = None;
        info!(
            "Selection {} started for production type '{}'",
            self.generation, production_type_id
        );
        SelectionToken {
            generation: self.generation,
        }
    }

    /// Apply a selection's resolution result.
    ///
    /// Returns `Ok(true)` if applied, `Ok(false)` if the token was stale
    /// (the result, success or failure, is dropped), and the resolution
    /// error if the current selection itself failed. On apply the preview
    /// initializes at the baseline quantity, ratio 1.0.
    pub fn complete_selection(
        &mut self,
        token: SelectionToken,
        result: Result<InitialValues, EngineError>,
    ) -> Result<bool, EngineError> {
        if token.generation != self.generation {
            debug!(
                "Dropping stale selection result (token {}, current {})",
                token.generation, self.generation
            );
            return Ok(false);
        }

        match result {
            Ok(baseline) => {
                info!(
                    "Selection {} resolved: '{}' with {} materials",
                    token.generation,
                    baseline.production_type_id,
                    baseline.materials.len()
                );
                self.pending_id = None;
                self.scaling = Some(scale(&baseline, baseline.base_quantity()));
                self.baseline = Some(baseline);
                Ok(true)
            }
            Err(e) => {
                warn!(
                    "Selection {} for '{}' failed: {}",
                    token.generation,
                    self.pending_id.as_deref().unwrap_or("?"),
                    e
                );
                self.pending_id = None;
                Err(e)
            }
        }
    }

    /// Recompute the preview for a new requested base quantity.
    /// Returns `None` until a selection has resolved.
    pub fn set_base_quantity(&mut self, requested: f64) -> Option<&ScalingState> {
        let baseline = self.baseline.as_ref()?;
        self.scaling = Some(scale(baseline, requested));
        self.scaling.as_ref()
    }

    /// The production type a selection is in flight for, if any.
    pub fn pending_production_type(&self) -> Option<&str> {
        self.pending_id.as_deref()
    }

    /// The resolved baseline, if any.
    pub fn baseline(&self) -> Option<&InitialValues> {
        self.baseline.as_ref()
    }

    /// The current preview, if any.
    pub fn scaling(&self) -> Option<&ScalingState> {
        self.scaling.as_ref()
    }

    /// Assemble the submission body from form fields and the current
    /// preview. Requires a resolved selection.
    pub fn build_draft(&self, form: &ProductionLogForm) -> Result<ProductionLogDraft, EngineError> {
        let scaling = self.scaling.as_ref().ok_or(EngineError::NoSelection)?;
        builder::build_draft(form, scaling)
    }

    /// Begin, resolve and apply a selection in one call, for callers
    /// that do not interleave selections.
    pub async fn select_production_type(
        &mut self,
        client: &ApiClient,
        production_type_id: &str,
    ) -> Result<&InitialValues, EngineError> {
        let token = self.begin_selection(production_type_id);
        let result = resolver::resolve(client, production_type_id).await;
        self.complete_selection(token, result)?;
        self.baseline.as_ref().ok_or(EngineError::NoSelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::types::MaterialBaseline;
    use chrono::NaiveDate;

    fn baseline(id: &str, base_quantity: f64) -> InitialValues {
        InitialValues {
            production_type_id: id.to_string(),
            materials: vec![
                MaterialBaseline {
                    material_id: "mat-cement".to_string(),
                    unit: "kg".to_string(),
                    quantity: base_quantity,
                    unit_cost: 2.0,
                    cost: 2.0 * base_quantity,
                },
                MaterialBaseline {
                    material_id: "mat-water".to_string(),
                    unit: "L".to_string(),
                    quantity: 3.0,
                    unit_cost: 3.0,
                    cost: 9.0,
                },
            ],
            units_produced: 5,
            total_cost: 2.0 * base_quantity + 9.0,
        }
    }

    fn form(production_type_id: &str) -> ProductionLogForm {
        ProductionLogForm {
            production_type_id: production_type_id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 22).unwrap(),
            machine: "press-2".to_string(),
            operator: None,
            shift: "morning".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_resolution_applies_and_previews_at_baseline() {
        let mut session = ProductionFormSession::new();
        let token = session.begin_selection("pt-blocks");
        assert_eq!(session.pending_production_type(), Some("pt-blocks"));

        let applied = session
            .complete_selection(token, Ok(baseline("pt-blocks", 10.0)))
            .unwrap();
        assert!(applied);
        assert!(session.pending_production_type().is_none());

        let preview = session.scaling().unwrap();
        assert!(preview.at_default_ratio);
        assert_eq!(preview.units_produced, 5);
        assert_eq!(preview.requested_base_quantity, 10.0);
    }

    #[test]
    fn test_stale_resolution_is_dropped() {
        let mut session = ProductionFormSession::new();
        let first = session.begin_selection("pt-blocks");
        let second = session.begin_selection("pt-bread");

        let applied = session
            .complete_selection(first, Ok(baseline("pt-blocks", 10.0)))
            .unwrap();
        assert!(!applied, "superseded result must not apply");
        assert!(session.baseline().is_none());
        assert_eq!(
            session.pending_production_type(),
            Some("pt-bread"),
            "newest selection stays pending"
        );

        let applied = session
            .complete_selection(second, Ok(baseline("pt-bread", 25.0)))
            .unwrap();
        assert!(applied);
        assert_eq!(
            session.baseline().unwrap().production_type_id,
            "pt-bread"
        );
    }

    #[test]
    fn test_stale_failure_is_dropped_silently() {
        let mut session = ProductionFormSession::new();
        let first = session.begin_selection("pt-blocks");
        let second = session.begin_selection("pt-bread");

        let outcome = session.complete_selection(
            first,
            Err(EngineError::Network("connection reset".to_string())),
        );
        assert!(matches!(outcome, Ok(false)), "stale errors never surface");

        session
            .complete_selection(second, Ok(baseline("pt-bread", 25.0)))
            .unwrap();
        assert!(session.baseline().is_some());
    }

    #[test]
    fn test_current_failure_surfaces_and_clears() {
        let mut session = ProductionFormSession::new();
        let token = session.begin_selection("pt-ghost");

        let err = session
            .complete_selection(token, Err(EngineError::RecipeNotFound("pt-ghost".to_string())))
            .unwrap_err();
        assert!(matches!(err, EngineError::RecipeNotFound(_)));
        assert!(session.baseline().is_none());
        assert!(session.pending_production_type().is_none());
    }

    #[test]
    fn test_set_base_quantity_requires_selection() {
        let mut session = ProductionFormSession::new();
        assert!(session.set_base_quantity(25.0).is_none());
    }

    #[test]
    fn test_set_base_quantity_recomputes_preview() {
        let mut session = ProductionFormSession::new();
        let token = session.begin_selection("pt-blocks");
        session
            .complete_selection(token, Ok(baseline("pt-blocks", 10.0)))
            .unwrap();

        let preview = session.set_base_quantity(25.0).unwrap();
        assert_eq!(preview.units_produced, 12);
        assert_eq!(preview.total_cost, 71.0);
        assert!(!preview.at_default_ratio);
    }

    #[test]
    fn test_build_draft_requires_selection() {
        let session = ProductionFormSession::new();
        let err = session.build_draft(&form("pt-blocks")).unwrap_err();
        assert!(matches!(err, EngineError::NoSelection));
    }

    #[test]
    fn test_build_draft_uses_current_preview() {
        let mut session = ProductionFormSession::new();
        let token = session.begin_selection("pt-blocks");
        session
            .complete_selection(token, Ok(baseline("pt-blocks", 10.0)))
            .unwrap();
        session.set_base_quantity(25.0);

        let draft = session.build_draft(&form("pt-blocks")).unwrap();
        let used = draft.raw_materials_used.unwrap();
        assert_eq!(used[0].quantity, 25.0);
    }

    #[test]
    fn test_reselection_clears_previous_values() {
        let mut session = ProductionFormSession::new();
        let token = session.begin_selection("pt-blocks");
        session
            .complete_selection(token, Ok(baseline("pt-blocks", 10.0)))
            .unwrap();
        assert!(session.baseline().is_some());

        session.begin_selection("pt-bread");
        assert!(session.baseline().is_none());
        assert!(session.scaling().is_none());
    }
}
