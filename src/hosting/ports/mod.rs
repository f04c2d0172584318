//! Port contracts for Git-hosting platforms.

pub mod provider;

pub use provider::{HostingError, HostingProvider, HostingResult};
