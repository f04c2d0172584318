//! Pull-request body and issue comment rendering.

use super::{SyncError, SyncResult};
use minijinja::{Environment, Value};

pub(super) const PULL_REQUEST: &str = "pull request";
pub(super) const LINK_BACK: &str = "link-back";

pub(super) fn render(name: &'static str, template: &str, context: Value) -> SyncResult<String> {
    Environment::new()
        .render_str(template, context)
        .map_err(|source| SyncError::Template { name, source })
}
