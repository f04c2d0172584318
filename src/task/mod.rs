//! Local task tracking.
//!
//! A task is the local mirror of one remote issue. It is created queued,
//! gains a workspace and branch when materialized, and moves through a
//! validated status table. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
