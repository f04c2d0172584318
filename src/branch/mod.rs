//! Branch naming for task workspaces.
//!
//! [`BranchName`] is the validated git ref segment used everywhere a task
//! branch is stored or passed to git, and [`derive_branch_name`] produces one
//! deterministically from free text.

mod derive;
mod name;

pub use derive::{
    BRANCH_PREFIX, DEFAULT_SLUG, MAX_SLUG_LENGTH, MAX_TICKET_LENGTH, derive_branch_name, slugify,
};
pub use name::{BranchName, BranchNameError};
