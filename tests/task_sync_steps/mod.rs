//! Step definitions for task synchronization scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
