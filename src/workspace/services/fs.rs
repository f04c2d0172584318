//! Filesystem side effects of provisioning: the per-path lock, the
//! destination directory and the credential-store file.

use super::ProvisionError;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::Dir;
use std::io::Write;
use tracing::warn;

/// Parent directory handle plus the destination's final component.
pub(super) struct Destination {
    parent: Dir,
    parent_path: Utf8PathBuf,
    name: String,
}

impl Destination {
    /// Opens (creating if needed) the destination's parent directory.
    pub(super) fn open(path: &Utf8Path) -> Result<Self, ProvisionError> {
        let name = path
            .file_name()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .ok_or_else(|| ProvisionError::InvalidDestination(path.to_owned()))?;
        let parent_path = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
            .to_owned();
        Dir::create_ambient_dir_all(&parent_path, ambient_authority())
            .map_err(|err| ProvisionError::filesystem(&parent_path, err))?;
        let parent = Dir::open_ambient_dir(&parent_path, ambient_authority())
            .map_err(|err| ProvisionError::filesystem(&parent_path, err))?;
        Ok(Self {
            parent,
            parent_path,
            name: name.to_owned(),
        })
    }

    /// Returns the full destination path.
    pub(super) fn path(&self) -> Utf8PathBuf {
        self.parent_path.join(&self.name)
    }

    /// Returns the destination's final component.
    pub(super) fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent directory path.
    pub(super) fn parent_path(&self) -> &Utf8Path {
        &self.parent_path
    }

    /// Takes the exclusive per-path lock file `.<name>.lock`.
    pub(super) fn lock(&self) -> Result<LockGuard<'_>, ProvisionError> {
        let lock_name = format!(".{}.lock", self.name);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        match self.parent.open_with(&lock_name, &options) {
            Ok(_) => Ok(LockGuard {
                parent: &self.parent,
                name: lock_name,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(ProvisionError::DestinationLocked(self.path()))
            }
            Err(err) => Err(ProvisionError::filesystem(
                &self.parent_path.join(&lock_name),
                err,
            )),
        }
    }

    /// Fails when the destination already exists.
    pub(super) fn ensure_absent(&self) -> Result<(), ProvisionError> {
        let exists = self
            .parent
            .try_exists(&self.name)
            .map_err(|err| ProvisionError::filesystem(&self.path(), err))?;
        if exists {
            return Err(ProvisionError::DestinationExists(self.path()));
        }
        Ok(())
    }

    /// Creates the empty destination directory.
    pub(super) fn create(&self) -> Result<(), ProvisionError> {
        self.parent
            .create_dir(&self.name)
            .map_err(|err| ProvisionError::filesystem(&self.path(), err))
    }

    /// Writes a git credential-store file readable only by the owner and
    /// returns its path.
    pub(super) fn write_credentials(&self, line: &str) -> Result<Utf8PathBuf, ProvisionError> {
        let file_name = format!(".{}.git-credentials", self.name);
        let file_path = self.parent_path.join(&file_name);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self
            .parent
            .open_with(&file_name, &options)
            .map_err(|err| ProvisionError::filesystem(&file_path, err))?;
        restrict_to_owner(&self.parent, &file_name)
            .map_err(|err| ProvisionError::filesystem(&file_path, err))?;
        file.write_all(format!("{line}\n").as_bytes())
            .map_err(|err| ProvisionError::filesystem(&file_path, err))?;
        Ok(file_path)
    }

    /// Removes the destination tree and the credential file, logging rather
    /// than failing on cleanup errors.
    pub(super) fn roll_back(&self, credential_file: Option<&Utf8Path>) {
        match self.parent.remove_dir_all(&self.name) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %self.path(), error = %err, "failed to remove workspace"),
        }
        let Some(credential_name) = credential_file.and_then(Utf8Path::file_name) else {
            return;
        };
        match self.parent.remove_file(credential_name) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(file = credential_name, error = %err, "failed to remove credential file");
            }
        }
    }
}

#[cfg(unix)]
fn restrict_to_owner(dir: &Dir, name: &str) -> std::io::Result<()> {
    use cap_std::fs::{Permissions, PermissionsExt};
    dir.set_permissions(name, Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_dir: &Dir, _name: &str) -> std::io::Result<()> {
    Ok(())
}

/// Removes the lock file when dropped.
pub(super) struct LockGuard<'a> {
    parent: &'a Dir,
    name: String,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.parent.remove_file(&self.name) {
            warn!(lock = %self.name, error = %err, "failed to release workspace lock");
        }
    }
}
