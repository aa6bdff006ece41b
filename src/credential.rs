//! API credential shared by every node of a facade chain.

use std::fmt;

use reqwest::Url;

use crate::error::{Error, Result};

/// Public Tracker API root.
pub const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com/services/v5";

/// An API token and the service root it is valid for.
///
/// Validated at construction and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    api_key: String,
    base_url: Url,
}

impl Credential {
    pub fn new(api_key: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidCredential("API key is empty"));
        }
        if api_key.chars().any(char::is_control) {
            return Err(Error::InvalidCredential(
                "API key contains control characters",
            ));
        }

        let raw = base_url.as_ref().trim();
        if raw.is_empty() {
            return Err(Error::InvalidCredential("base URL is empty"));
        }
        let mut base_url = Url::parse(raw)
            .map_err(|_| Error::InvalidCredential("base URL is not an absolute URL"))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidCredential("base URL cannot carry a path"));
        }
        // Relative paths must append to the service root, not replace its last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { api_key, base_url })
    }

    /// Credential against the public Tracker service.
    pub fn with_default_url(api_key: impl Into<String>) -> Result<Self> {
        Self::new(api_key, DEFAULT_BASE_URL)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a service path against the base URL.
    ///
    /// One leading `/` is stripped, so `/projects` and `projects` resolve to
    /// the same absolute URL.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.base_url
            .join(relative)
            .map_err(|e| Error::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_key() {
        let err = Credential::new("", DEFAULT_BASE_URL).unwrap_err();
        assert!(matches!(err, Error::InvalidCredential(_)));

        let err = Credential::new("   ", DEFAULT_BASE_URL).unwrap_err();
        assert!(matches!(err, Error::InvalidCredential(_)));
    }

    #[test]
    fn rejects_empty_or_relative_base_url() {
        assert!(matches!(
            Credential::new("token", "").unwrap_err(),
            Error::InvalidCredential(_)
        ));
        assert!(matches!(
            Credential::new("token", "services/v5").unwrap_err(),
            Error::InvalidCredential(_)
        ));
    }

    #[test]
    fn leading_slash_does_not_change_resolution() {
        let credential = Credential::new("token", "https://tracker.test/services/v5").unwrap();

        let with_slash = credential.resolve("/projects").unwrap();
        let without = credential.resolve("projects").unwrap();

        assert_eq!(with_slash, without);
        assert_eq!(with_slash.as_str(), "https://tracker.test/services/v5/projects");
    }

    #[test]
    fn resolution_keeps_query_strings() {
        let credential = Credential::new("token", "https://tracker.test/services/v5/").unwrap();

        let url = credential
            .resolve("/projects/7/stories?limit=5&offset=10")
            .unwrap();

        assert_eq!(url.path(), "/services/v5/projects/7/stories");
        assert_eq!(url.query(), Some("limit=5&offset=10"));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let credential = Credential::with_default_url("very-secret").unwrap();
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("very-secret"));
    }
}
