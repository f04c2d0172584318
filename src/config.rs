//! Engine configuration.
//!
//! [`SyncConfig`] deserializes with defaults for every field, so a partial
//! document (or none at all) yields a usable configuration.
//! [`SyncConfig::from_env`] layers the process environment on top of the
//! defaults.

use crate::hosting::{
    domain::{HostingPlatform, ParsePlatformError},
    factory::ProviderConfig,
};
use crate::workspace::domain::{CommitterIdentity, GitAuth};
use camino::Utf8PathBuf;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Selects the hosting platform.
pub const ENV_PLATFORM: &str = "TASKSYNC_PLATFORM";
/// Overrides the web host used to build clone URLs.
pub const ENV_HOST: &str = "TASKSYNC_HOST";
/// Overrides the REST API base URL.
pub const ENV_API_URL: &str = "TASKSYNC_API_URL";
/// Sets the directory under which workspaces are created.
pub const ENV_WORKSPACE_ROOT: &str = "TASKSYNC_WORKSPACE_ROOT";
/// Token variables, checked in order.
pub const ENV_TOKENS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Default prefix for status labels (`tasksync:in_progress`).
pub const DEFAULT_LABEL_PREFIX: &str = "tasksync";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default pull-request body template.
pub const DEFAULT_PULL_REQUEST_TEMPLATE: &str = "\
{{ description }}

Closes #{{ issue_number }}

---
Branch `{{ branch }}` for task {{ task_id }}.";

/// Default back-reference comment template.
pub const DEFAULT_LINK_BACK_TEMPLATE: &str =
    "Opened pull request #{{ pr_number }} for this issue: {{ pr_url }}";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown platform name.
    #[error(transparent)]
    InvalidPlatform(#[from] ParsePlatformError),

    /// The workspace root is empty.
    #[error("workspace root must not be empty")]
    EmptyWorkspaceRoot,

    /// The request timeout is zero.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    /// The status-label prefix is empty.
    #[error("status label prefix must not be empty")]
    EmptyLabelPrefix,

    /// A template does not parse.
    #[error("invalid {name} template: {source}")]
    Template {
        /// Which template failed.
        name: &'static str,
        /// Template engine error.
        source: minijinja::Error,
    },
}

/// Settings for the synchronization engine.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Hosting platform.
    pub platform: HostingPlatform,
    /// Web host for clone URLs; the platform's public host when unset.
    pub host: Option<String>,
    /// REST API base URL override.
    pub api_base_url: Option<String>,
    /// REST API token.
    pub token: Option<String>,
    /// Directory under which workspaces are created.
    pub workspace_root: Utf8PathBuf,
    /// Git binary.
    pub git_binary: Utf8PathBuf,
    /// Clone authentication.
    pub git_auth: Option<GitAuth>,
    /// Committer identity configured in each workspace.
    pub committer: Option<CommitterIdentity>,
    /// Prefix shared by every status label.
    pub label_prefix: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Pull-request body template.
    pub pull_request_template: String,
    /// Comment posted on the issue after a pull request opens.
    pub link_back_template: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            platform: HostingPlatform::GitHub,
            host: None,
            api_base_url: None,
            token: None,
            workspace_root: Utf8PathBuf::from("workspaces"),
            git_binary: Utf8PathBuf::from("git"),
            git_auth: None,
            committer: None,
            label_prefix: DEFAULT_LABEL_PREFIX.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pull_request_template: DEFAULT_PULL_REQUEST_TEMPLATE.to_owned(),
            link_back_template: DEFAULT_LINK_BACK_TEMPLATE.to_owned(),
        }
    }
}

impl SyncConfig {
    /// Loads defaults overlaid with the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPlatform`] for an unknown
    /// `TASKSYNC_PLATFORM`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults overlaid with values from `lookup`. Blank values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPlatform`] for an unknown platform.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty())
        };
        let mut config = Self::default();
        if let Some(platform) = value(ENV_PLATFORM) {
            config.platform = HostingPlatform::try_from(platform.as_str())?;
        }
        config.host = value(ENV_HOST);
        config.api_base_url = value(ENV_API_URL);
        if let Some(root) = value(ENV_WORKSPACE_ROOT) {
            config.workspace_root = Utf8PathBuf::from(root);
        }
        config.token = ENV_TOKENS.iter().find_map(|key| value(key));
        if let Some(binary) = value(crate::workspace::adapters::ENV_GIT_BIN) {
            config.git_binary = Utf8PathBuf::from(binary);
        }
        Ok(config)
    }

    /// Checks the settings the engine depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty workspace root or label prefix, a
    /// zero timeout, or a template that does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspace_root.as_str().trim().is_empty() {
            return Err(ConfigError::EmptyWorkspaceRoot);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.label_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyLabelPrefix);
        }
        let env = minijinja::Environment::new();
        for (name, source) in [
            ("pull request", &self.pull_request_template),
            ("link-back", &self.link_back_template),
        ] {
            env.template_from_str(source)
                .map_err(|err| ConfigError::Template { name, source: err })?;
        }
        Ok(())
    }

    /// Returns the web host for clone URLs.
    #[must_use]
    pub fn web_host(&self) -> &str {
        self.host
            .as_deref()
            .unwrap_or_else(|| self.platform.default_host())
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the settings for [`crate::hosting::factory::build_provider`].
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            platform: self.platform,
            token: self.token.clone(),
            api_base_url: self.api_base_url.clone(),
        }
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("platform", &self.platform)
            .field("host", &self.host)
            .field("api_base_url", &self.api_base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("workspace_root", &self.workspace_root)
            .field("git_binary", &self.git_binary)
            .field("git_auth", &self.git_auth)
            .field("committer", &self.committer)
            .field("label_prefix", &self.label_prefix)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}
