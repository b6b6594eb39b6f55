use serde::Deserialize;

/// The slice of kind-0 metadata the client displays.
#[derive(Debug, Default, Deserialize)]
struct ProfileRecord {
    #[serde(default)]
    name: Option<String>,
}

/// Parse the display name out of profile-metadata content.
///
/// Returns `None` for malformed JSON or a missing/blank name.
pub fn parse_profile_name(content: &str) -> Option<String> {
    let record: ProfileRecord = serde_json::from_str(content).ok()?;
    record
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_name() {
        assert_eq!(
            parse_profile_name(r#"{"name":"alice","about":"hi"}"#),
            Some("alice".to_string())
        );
        assert_eq!(parse_profile_name(r#"{"name":"  "}"#), None);
        assert_eq!(parse_profile_name(r#"{"display_name":"bob"}"#), None);
        assert_eq!(parse_profile_name("not json"), None);
        assert_eq!(parse_profile_name(r#"{"name":42}"#), None);
    }
}
