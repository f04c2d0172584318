//! tasksync: turns Git-hosting issues into locally workable tasks.
//!
//! An automation agent discovers issues assigned to it, provisions an
//! isolated clone on a dedicated branch for each, and publishes the finished
//! work as a pull request linked back to the originating issue, tracking
//! review feedback afterwards.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Value objects and aggregates with no infrastructure
//!   dependencies
//! - **Ports**: Async trait interfaces for hosting platforms, git and
//!   persistence
//! - **Adapters**: GitHub REST, git CLI, in-memory and placeholder
//!   implementations
//! - **Services**: Orchestration over the ports
//!
//! # Modules
//!
//! - [`branch`]: Branch-name derivation and validation
//! - [`config`]: Engine configuration
//! - [`context`]: Cancellation and deadline propagation
//! - [`hosting`]: Hosting-platform contract and adapters
//! - [`sync`]: The task-synchronization engine
//! - [`task`]: Task aggregate and lifecycle
//! - [`workspace`]: Workspace provisioning

pub mod branch;
pub mod config;
pub mod context;
pub mod hosting;
pub mod sync;
pub mod task;
pub mod workspace;
