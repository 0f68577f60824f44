//! Spreadsheet link resolution
//!
//! Shared spreadsheet links come in several shapes (`/spreadsheets/d/<id>/edit`,
//! `/d/<id>/view`, `/u/0/d/<id>`, or a bare identifier after the host). Resolution
//! is purely textual and never touches the network.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// Host used for canonical and export links
pub const SPREADSHEET_HOST: &str = "https://docs.google.com/spreadsheets";

/// Identifier patterns, tried in order. Each captures the identifier in group 1.
static IDENTIFIER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/spreadsheets/d/([a-zA-Z0-9_-]+)",
        r"(?:^|/)d/([a-zA-Z0-9_-]+)",
        r"^https?://[^/]+/([a-zA-Z0-9_-]{25,})(?:[/?#]|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static FRAGMENT_GID: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(?:.*&)?gid=([0-9]+)").unwrap());
static QUERY_GID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?&]gid=([0-9]+)").unwrap());

/// Result of [`parse_link`]. Either part is `None` when it cannot be found.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLink {
    /// Spreadsheet identifier
    pub identifier: Option<String>,
    /// Sub-sheet reference (`gid`)
    pub fragment_ref: Option<String>,
}

/// Extract the spreadsheet identifier from a link.
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] when no known URL shape matches.
pub fn resolve_identifier(link: &str) -> Result<String> {
    let link = link.trim();
    if link.is_empty() {
        return Err(Error::InvalidLink("link is empty".into()));
    }

    IDENTIFIER_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(link))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::InvalidLink(format!("no spreadsheet identifier in '{}'", link)))
}

/// Split a link into its identifier and `gid` reference without failing.
///
/// The fragment `#gid=` takes precedence over a `?gid=` query parameter.
pub fn parse_link(link: &str) -> ParsedLink {
    let link = link.trim();
    let fragment_ref = FRAGMENT_GID
        .captures(link)
        .or_else(|| QUERY_GID.captures(link))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    ParsedLink {
        identifier: resolve_identifier(link).ok(),
        fragment_ref,
    }
}

/// Build the canonical edit link for an identifier and optional `gid`
pub fn create_link(identifier: &str, fragment_ref: Option<&str>) -> String {
    match fragment_ref {
        Some(gid) if !gid.is_empty() => {
            format!("{}/d/{}/edit#gid={}", SPREADSHEET_HOST, identifier, gid)
        }
        _ => format!("{}/d/{}/edit", SPREADSHEET_HOST, identifier),
    }
}

/// Build the xlsx export link for an identifier
pub fn export_url(identifier: &str) -> String {
    format!("{}/d/{}/export?format=xlsx", SPREADSHEET_HOST, identifier)
}

/// Check whether a link resolves to an identifier
pub fn validate(link: &str) -> bool {
    resolve_identifier(link).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resolve_edit_link() {
        let id = resolve_identifier(
            "https://docs.google.com/spreadsheets/d/1aBcD_-9xYz/edit#gid=0",
        )
        .unwrap();
        assert_eq!(id, "1aBcD_-9xYz");
    }

    #[test]
    fn test_resolve_user_scoped_link() {
        let id = resolve_identifier("https://docs.google.com/spreadsheets/u/1/d/XYZ987/view").unwrap();
        assert_eq!(id, "XYZ987");
    }

    #[test]
    fn test_resolve_generic_d_segment() {
        let id = resolve_identifier("https://drive.example.com/file/d/TOKEN_42/preview").unwrap();
        assert_eq!(id, "TOKEN_42");
    }

    #[test]
    fn test_resolve_long_segment_after_host() {
        let id = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
        let resolved = resolve_identifier(&format!("https://sheets.example.org/{}?usp=sharing", id)).unwrap();
        assert_eq!(resolved, id);
    }

    #[test]
    fn test_resolve_rejects_unknown_shapes() {
        assert!(matches!(
            resolve_identifier("https://example.com/about"),
            Err(Error::InvalidLink(_))
        ));
        assert!(matches!(resolve_identifier(""), Err(Error::InvalidLink(_))));
        assert!(matches!(resolve_identifier("   "), Err(Error::InvalidLink(_))));
        assert!(resolve_identifier("https://example.com/short").is_err());
    }

    #[test]
    fn test_parse_link_query_and_fragment() {
        let parsed = parse_link("https://docs.google.com/spreadsheets/d/ABC123/edit?gid=99#gid=99");
        assert_eq!(
            parsed,
            ParsedLink {
                identifier: Some("ABC123".into()),
                fragment_ref: Some("99".into()),
            }
        );
    }

    #[test]
    fn test_parse_link_prefers_fragment() {
        let parsed = parse_link("https://docs.google.com/spreadsheets/d/ABC/edit?gid=1#gid=2");
        assert_eq!(parsed.fragment_ref.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_link_without_gid() {
        let parsed = parse_link("https://docs.google.com/spreadsheets/d/ABC/edit");
        assert_eq!(parsed.identifier.as_deref(), Some("ABC"));
        assert_eq!(parsed.fragment_ref, None);
    }

    #[test]
    fn test_parse_link_degrades_on_garbage() {
        assert_eq!(parse_link("not a url"), ParsedLink::default());
    }

    #[test]
    fn test_create_link() {
        assert_eq!(
            create_link("ABC", None),
            "https://docs.google.com/spreadsheets/d/ABC/edit"
        );
        assert_eq!(
            create_link("ABC", Some("7")),
            "https://docs.google.com/spreadsheets/d/ABC/edit#gid=7"
        );
        assert_eq!(
            create_link("ABC", Some("")),
            "https://docs.google.com/spreadsheets/d/ABC/edit"
        );
    }

    #[test]
    fn test_export_url() {
        assert_eq!(
            export_url("ABC"),
            "https://docs.google.com/spreadsheets/d/ABC/export?format=xlsx"
        );
    }

    #[test]
    fn test_validate() {
        assert!(validate("https://docs.google.com/spreadsheets/d/ABC/edit"));
        assert!(!validate("https://example.com"));
    }

    proptest! {
        #[test]
        fn prop_create_then_parse_round_trips(
            id in "[a-zA-Z0-9_-]{1,60}",
            gid in proptest::option::of("[0-9]{1,10}"),
        ) {
            let parsed = parse_link(&create_link(&id, gid.as_deref()));
            prop_assert_eq!(parsed.identifier, Some(id));
            prop_assert_eq!(parsed.fragment_ref, gid);
        }
    }
}
