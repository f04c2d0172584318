//! Unit tests for the workspace context.
