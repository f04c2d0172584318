//! Builds a hosting provider from configuration.

use crate::hosting::{
    adapters::{GitHubProvider, PlaceholderProvider},
    domain::HostingPlatform,
    ports::{HostingError, HostingProvider},
};
use std::sync::Arc;

/// Settings needed to construct a provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Target platform.
    pub platform: HostingPlatform,
    /// API token; required by real backends.
    pub token: Option<String>,
    /// API base URL override for self-hosted instances.
    pub api_base_url: Option<String>,
}

impl ProviderConfig {
    /// Creates a configuration for `platform` with no token or URL override.
    #[must_use]
    pub const fn new(platform: HostingPlatform) -> Self {
        Self {
            platform,
            token: None,
            api_base_url: None,
        }
    }

    /// Sets the API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the API base URL override.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("platform", &self.platform)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Returns the provider for the configured platform.
///
/// # Errors
///
/// Returns [`HostingError::Validation`] when GitHub is selected without a
/// token.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn HostingProvider>, HostingError> {
    let provider: Arc<dyn HostingProvider> = match config.platform {
        HostingPlatform::GitHub => {
            let token = config.token.as_deref().ok_or_else(|| {
                HostingError::Validation("a GitHub API token is required".to_owned())
            })?;
            let github = match config.api_base_url.as_deref() {
                Some(url) => GitHubProvider::with_base_url(token, url)?,
                None => GitHubProvider::new(token)?,
            };
            Arc::new(github)
        }
        HostingPlatform::GitLab => Arc::new(PlaceholderProvider::gitlab()),
        HostingPlatform::Bitbucket => Arc::new(PlaceholderProvider::bitbucket()),
    };
    Ok(provider)
}
