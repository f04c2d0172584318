//! Domain model for workspaces and provisioning requests.

mod auth;
mod commit;
mod error;
mod ids;
mod request;
mod source;
mod workspace;

pub use auth::{CommitterIdentity, GitAuth};
pub use commit::CommitSummary;
pub use error::WorkspaceDomainError;
pub use ids::WorkspaceId;
pub use request::{BRANCH_NAME_METADATA_KEY, WorkspaceRequest};
pub use source::SourceLocator;
pub use workspace::{NewWorkspace, Workspace};
