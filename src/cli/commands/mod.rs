//! CLI command implementations

pub mod replay;
pub mod request;
pub mod validate;

use crate::config::{load_config, load_default_config, PolyclinicConfig};
use crate::domain::Result;
use std::path::Path;

/// Every request was handled with `200 OK`
pub const EXIT_OK: i32 = 0;
/// At least one request got a non-200 response
pub const EXIT_REQUEST_FAILED: i32 = 1;
/// Configuration missing or invalid
pub const EXIT_CONFIG: i32 = 2;
/// Input file unreadable or containing malformed lines
pub const EXIT_INPUT: i32 = 3;
/// The configured store could not be reached
pub const EXIT_CONNECTION: i32 = 4;

/// Loads `path`, or defaults plus environment overrides without one
pub fn resolve_config(path: Option<&Path>) -> Result<PolyclinicConfig> {
    match path {
        Some(path) => load_config(path),
        None => load_default_config(),
    }
}

/// Parses a `key=value` pair
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("name=North", "name", "North" ; "plain")]
    #[test_case("name=a=b", "name", "a=b" ; "value keeps later equals")]
    #[test_case("name=", "name", "" ; "empty value")]
    #[test_case("name=%D0%9F", "name", "%D0%9F" ; "value not decoded")]
    fn test_parse_key_value(raw: &str, key: &str, value: &str) {
        assert_eq!(
            parse_key_value(raw).unwrap(),
            (key.to_string(), value.to_string())
        );
    }

    #[test_case("name" ; "no separator")]
    #[test_case("=North" ; "empty key")]
    fn test_parse_key_value_rejects(raw: &str) {
        assert!(parse_key_value(raw).is_err());
    }

    #[test]
    fn test_resolve_missing_file() {
        let missing = Path::new("/definitely/not/here/polyclinic.toml");
        assert!(resolve_config(Some(missing)).is_err());
    }
}
