//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::{LoadError, LocaleParseError, ManifestError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Locale(#[from] LocaleParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("No content for route: {0}")]
    NotFound(String),
}

impl CliError {
    /// Process exit status for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::NotFound("x".to_owned()).exit_code(), 2);
        let err = CliError::Locale(LocaleParseError("fr-FR".to_owned()));
        assert_eq!(err.exit_code(), 1);
    }
}
