//! HeaderSet: the read-only header map attached to every fetch

use std::collections::BTreeMap;

/// Header name under which the configured bearer credential is injected
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// The set of headers attached to every request in a run
///
/// Built once at startup from the configured token plus any extra headers,
/// then shared read-only by all workers. Extra headers are merged over the
/// token entry, so a configured `X-Auth-Token` overrides the credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    headers: BTreeMap<String, String>,
}

impl HeaderSet {
    /// Build the header set from the auth token and extra configured headers
    pub fn build(token: &str, extra: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(AUTH_HEADER.to_string(), token.to_string());
        for (name, value) in extra {
            headers.insert(name, value);
        }
        Self { headers }
    }

    /// Iterate over (name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Look up a header value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_injected_under_auth_header() {
        let set = HeaderSet::build("secret", []);
        assert_eq!(set.get(AUTH_HEADER), Some("secret"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_extra_headers_merged_over_token() {
        let set = HeaderSet::build(
            "secret",
            [
                ("Accept".to_string(), "application/json".to_string()),
                (AUTH_HEADER.to_string(), "override".to_string()),
            ],
        );
        assert_eq!(set.get("Accept"), Some("application/json"));
        assert_eq!(set.get(AUTH_HEADER), Some("override"));
    }
}
