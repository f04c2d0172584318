//! Classification of clone sources.

use camino::Utf8PathBuf;
use std::fmt;

const REMOTE_SCHEMES: [&str; 5] = ["http://", "https://", "git://", "ssh://", "file://"];

/// Where a workspace is cloned from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceLocator {
    /// A URL with a recognised transport scheme.
    Remote(String),
    /// A filesystem path to an existing repository.
    Local(Utf8PathBuf),
}

impl SourceLocator {
    /// Classifies a source string.
    ///
    /// `http`, `https`, `git`, `ssh` and `file` URLs are remote; everything
    /// else, including strings without `scheme://`, is a local path.
    #[must_use]
    pub fn classify(source: &str) -> Self {
        let trimmed = source.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if REMOTE_SCHEMES
            .iter()
            .any(|scheme| lowered.starts_with(scheme))
        {
            Self::Remote(trimmed.to_owned())
        } else {
            Self::Local(Utf8PathBuf::from(trimmed))
        }
    }

    /// Returns whether the source is remote.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Returns the value passed to `git clone`.
    #[must_use]
    pub fn as_clone_arg(&self) -> &str {
        match self {
            Self::Remote(url) => url,
            Self::Local(path) => path.as_str(),
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_clone_arg())
    }
}
