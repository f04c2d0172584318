//! Clone authentication and committer identity.

use serde::Deserialize;
use std::fmt;

const TOKEN_USERNAME: &str = "x-access-token";

/// Authentication used when cloning a remote source.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GitAuth {
    /// SSH private key; `~` and environment variables are expanded.
    SshKey {
        /// Key file path.
        path: String,
    },
    /// HTTPS access token.
    Token {
        /// Token value.
        token: String,
        /// Username sent with the token; platforms accept a placeholder.
        #[serde(default)]
        username: Option<String>,
    },
    /// HTTPS username and password.
    Basic {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
}

impl GitAuth {
    /// Returns the `(username, secret)` pair for HTTPS credential helpers,
    /// or `None` for SSH keys.
    #[must_use]
    pub fn https_credentials(&self) -> Option<(&str, &str)> {
        match self {
            Self::SshKey { .. } => None,
            Self::Token { token, username } => {
                Some((username.as_deref().unwrap_or(TOKEN_USERNAME), token))
            }
            Self::Basic { username, password } => Some((username, password)),
        }
    }
}

impl fmt::Debug for GitAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SshKey { path } => f.debug_struct("SshKey").field("path", path).finish(),
            Self::Token { username, .. } => f
                .debug_struct("Token")
                .field("username", username)
                .field("token", &"<redacted>")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Name and email recorded as the workspace's git committer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitterIdentity {
    /// `user.name`.
    pub name: String,
    /// `user.email`.
    pub email: String,
}
