//! Git-hosting platform abstraction.
//!
//! A single capability set ([`ports::HostingProvider`]) covers repositories,
//! issues, pull requests, reviews, comments and labels. Adapters keep each
//! platform's vocabulary (state strings, casing, payload shapes) behind the
//! contract; callers never branch on platform identity.
//!
//! - Canonical records in [`domain`]
//! - The provider contract in [`ports`]
//! - GitHub REST, placeholder, and in-memory backends in [`adapters`]
//! - Construction from configuration in [`factory`]

pub mod adapters;
pub mod domain;
pub mod factory;
pub mod ports;
