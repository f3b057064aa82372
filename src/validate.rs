use crate::core::{PlaylistReference, ProviderDescriptor, registry};
use crate::error::ValidationError;
use url::Url;

/// Validates playlist URLs against a provider registry.
///
/// Pure and deterministic: no network I/O, directly unit-testable.
#[derive(Debug, Clone)]
pub struct UrlValidator<'a> {
    providers: &'a [ProviderDescriptor],
}

impl Default for UrlValidator<'static> {
    fn default() -> Self {
        Self::new(registry())
    }
}

impl<'a> UrlValidator<'a> {
    pub fn new(providers: &'a [ProviderDescriptor]) -> Self {
        Self { providers }
    }

    /// Parse and validate a playlist URL into a provider-qualified reference
    pub fn validate(&self, url: &str) -> Result<PlaylistReference, ValidationError> {
        let parsed =
            Url::parse(url).map_err(|_| ValidationError::MalformedUrl(url.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ValidationError::MalformedUrl(url.to_string()))?;

        let provider = self
            .providers
            .iter()
            .find(|p| p.host == host)
            .ok_or_else(|| ValidationError::UnsupportedProvider(host.to_string()))?;

        // A trailing slash counts as a third, empty segment
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.collect())
            .unwrap_or_default();
        if segments.len() != 2 {
            return Err(ValidationError::InvalidPathShape(segments.len()));
        }

        if segments[0] != provider.path_prefix {
            return Err(ValidationError::InvalidPathPrefix(segments[0].to_string()));
        }

        let id = segments[1];
        if !provider.id_pattern.is_match(id) {
            return Err(ValidationError::InvalidIdFormat(id.to_string()));
        }

        Ok(PlaylistReference::new(provider.clone(), id.to_string()))
    }
}

/// Validate a playlist URL against the built-in registry
pub fn validate(url: &str) -> Result<PlaylistReference, ValidationError> {
    UrlValidator::default().validate(url)
}
