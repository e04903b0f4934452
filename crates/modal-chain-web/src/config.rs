//! Config embedded in the page markup.

use modal_chain_core::ModalConfig;

use crate::error::WebError;

/// Body attribute holding an optional JSON [`ModalConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-modal-config";

/// Parses the value of [`CONFIG_ATTRIBUTE`]. A missing or blank value gives
/// the default config.
pub fn parse_config(raw: Option<&str>) -> Result<ModalConfig, WebError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ModalConfig::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_chain_core::ScrollLock;

    #[test]
    fn test_missing_attribute_is_default() {
        assert_eq!(parse_config(None).unwrap(), ModalConfig::default());
        assert_eq!(parse_config(Some("  ")).unwrap(), ModalConfig::default());
    }

    #[test]
    fn test_attribute_overrides() {
        let config = parse_config(Some(r#"{"scrollLock":"overflow","chaining":false}"#)).unwrap();
        assert_eq!(config.scroll_lock, ScrollLock::Overflow);
        assert!(!config.chaining);
    }

    #[test]
    fn test_malformed_attribute() {
        assert!(matches!(
            parse_config(Some("{not json")),
            Err(WebError::InvalidConfig(_))
        ));
    }
}
