//! GitHub REST backend.

pub(crate) mod convert;
pub(crate) mod models;
mod provider;

pub use provider::{DEFAULT_API_BASE_URL, GitHubProvider};
