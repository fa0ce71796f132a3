use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutfitError {
    #[error("Model call failed: {0}")]
    ModelCall(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OutfitError {
    /// Stable label for log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelCall(_) => "model_call",
            Self::SchemaValidation(_) => "schema_validation",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, OutfitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        assert_eq!(OutfitError::ModelCall("x".into()).kind(), "model_call");
        assert_eq!(
            OutfitError::SchemaValidation("x".into()).kind(),
            "schema_validation"
        );
        assert_eq!(OutfitError::Storage("x".into()).kind(), "storage");
        assert_eq!(OutfitError::Config("x".into()).kind(), "config");
    }
}
