use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Production type '{0}' not found")]
    RecipeNotFound(String),

    #[error("Production type '{0}' has no required materials")]
    EmptyRecipe(String),

    #[error("Invalid recipe for '{production_type_id}': {reason}")]
    InvalidRecipe {
        production_type_id: String,
        reason: String,
    },

    #[error("Scaled batch produces zero units; increase the base material quantity")]
    ZeroYield,

    #[error("Required field '{0}' is empty")]
    MissingField(&'static str),

    #[error("No production type selected")]
    NoSelection,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl From<EngineError> for String {
    fn from(err: EngineError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_presentable() {
        let err = EngineError::RecipeNotFound("pt-42".to_string());
        assert_eq!(err.to_string(), "Production type 'pt-42' not found");

        let err = EngineError::Api {
            status: 422,
            message: "date is required".to_string(),
        };
        assert_eq!(err.to_string(), "API error (422): date is required");
    }

    #[test]
    fn test_converts_to_string_for_ui_boundaries() {
        let msg: String = EngineError::ZeroYield.into();
        assert!(msg.contains("zero units"), "got: {}", msg);
    }
}
