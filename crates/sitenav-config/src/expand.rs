//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Strings without `${` are returned unchanged, so bare `$` in URLs and
/// titles is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(UnsetVar(var.to_owned())),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITENAV_TEST_TITLE", "Generic Docs");
        }
        let result = expand_env("${SITENAV_TEST_TITLE}", "title").unwrap();
        assert_eq!(result, "Generic Docs");
        unsafe {
            std::env::remove_var("SITENAV_TEST_TITLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_UNSET_ORG");
        }
        let result = expand_env(
            "https://github.com/${SITENAV_UNSET_ORG:-MetaFi-labs}",
            "socials[0].link",
        )
        .unwrap();
        assert_eq!(result, "https://github.com/MetaFi-labs");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_MISSING_VAR");
        }
        let err = expand_env("${SITENAV_MISSING_VAR}", "title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SITENAV_MISSING_VAR"));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("Generic Docs", "title").unwrap();
        assert_eq!(result, "Generic Docs");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("Pay $5", "title").unwrap();
        assert_eq!(result, "Pay $5");
    }
}
