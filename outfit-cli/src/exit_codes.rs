//! Exit codes following sysexits.h conventions.

use outfit_core::OutfitError;
use thiserror::Error;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all, including configuration problems).
pub const GENERAL_ERROR: i32 = 1;

/// Input data rejected (file larger than the upload ceiling).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// Model or storage provider failed.
/// Maps to EX_UNAVAILABLE from sysexits.h.
pub const PROVIDER_ERROR: i32 = 69;

/// Errors raised by the CLI itself before the pipeline runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read file: {0}")]
    Unreadable(String),

    #[error("File size limit exceeded (max 10MB): {size} bytes > {max} bytes")]
    TooLarge { size: usize, max: usize },
}

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let code = if let Some(input) = err.downcast_ref::<InputError>() {
            match input {
                InputError::Unreadable(_) => INPUT_ERROR,
                InputError::TooLarge { .. } => DATA_ERROR,
            }
        } else if let Some(outfit) = err.downcast_ref::<OutfitError>() {
            match outfit {
                OutfitError::ModelCall(_)
                | OutfitError::SchemaValidation(_)
                | OutfitError::Storage(_) => PROVIDER_ERROR,
                OutfitError::Config(_) => GENERAL_ERROR,
            }
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(format!("{err:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_map_to_sysexits() {
        let unreadable = anyhow::Error::new(InputError::Unreadable("missing.jpg".into()));
        assert_eq!(ExitCode::from_anyhow(&unreadable).code, INPUT_ERROR);

        let too_large = anyhow::Error::new(InputError::TooLarge { size: 11, max: 10 });
        assert_eq!(ExitCode::from_anyhow(&too_large).code, DATA_ERROR);
    }

    #[test]
    fn test_input_error_messages() {
        let err = InputError::Unreadable("No such file or directory".into());
        assert_eq!(err.to_string(), "Failed to read file: No such file or directory");

        let err = InputError::TooLarge {
            size: 10_485_761,
            max: 10_485_760,
        };
        assert_eq!(
            err.to_string(),
            "File size limit exceeded (max 10MB): 10485761 bytes > 10485760 bytes"
        );
    }

    #[test]
    fn test_provider_errors_are_unavailable() {
        let err = anyhow::Error::new(OutfitError::ModelCall("timeout".into()));
        assert_eq!(ExitCode::from_anyhow(&err).code, PROVIDER_ERROR);

        let err = anyhow::Error::new(OutfitError::Config("no key".into()));
        assert_eq!(ExitCode::from_anyhow(&err).code, GENERAL_ERROR);
    }

    #[test]
    fn test_context_does_not_hide_kind() {
        let err = anyhow::Error::new(OutfitError::Storage("denied".into()))
            .context("Analysis failed");
        let exit = ExitCode::from_anyhow(&err);
        assert_eq!(exit.code, PROVIDER_ERROR);
        assert!(exit.message.unwrap().contains("denied"));
    }
}
