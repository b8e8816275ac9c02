//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(
            expand_env("site-data.json", "site.manifest").unwrap(),
            "site-data.json"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let expanded = expand_env(
            "${DOCNAV_TEST_SURELY_UNSET_VAR:-fallback.json}",
            "site.manifest",
        )
        .unwrap();
        assert_eq!(expanded, "fallback.json");
    }

    #[test]
    fn test_unset_without_default_is_error() {
        let err = expand_env("${DOCNAV_TEST_SURELY_UNSET_VAR}", "locale.preferred").unwrap_err();
        assert!(
            matches!(&err, ConfigError::EnvVar { field, .. } if field == "locale.preferred"),
            "Expected ConfigError::EnvVar, got {err:?}"
        );
        assert!(err.to_string().contains("DOCNAV_TEST_SURELY_UNSET_VAR"));
    }
}
