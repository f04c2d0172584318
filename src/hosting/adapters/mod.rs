//! Hosting provider implementations.

pub mod github;
pub mod memory;
pub mod placeholder;

pub use github::{DEFAULT_API_BASE_URL, GitHubProvider};
pub use memory::InMemoryHostingProvider;
pub use placeholder::PlaceholderProvider;
