//! Workspace provisioning service.

mod fs;
mod provisioner;

pub use provisioner::{
    ProvisionError, ProvisionResult, ProvisionedWorkspace, WorkspaceProvisioner, discard,
};
