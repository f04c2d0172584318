//! Isolated per-task git workspaces.
//!
//! A workspace is a full clone of the task's repository, checked out on a
//! dedicated branch in its own directory. Provisioning is all-or-nothing.
//!
//! - Domain types in [`domain`]
//! - Git and persistence ports in [`ports`]
//! - Git CLI and in-memory adapters in [`adapters`]
//! - The provisioner in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
