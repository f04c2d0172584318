//! Deterministic branch-name derivation from free text.
//!
//! Policy: strictly alphanumeric. After lower-casing, every character outside
//! `[a-z0-9-]` (dots included) becomes a hyphen, runs of hyphens collapse,
//! edges are trimmed, and the slug is bounded to [`MAX_SLUG_LENGTH`].

use super::BranchName;

/// Prefix applied to every derived branch.
pub const BRANCH_PREFIX: &str = "task/";

/// Slug used when the input sanitizes to nothing.
pub const DEFAULT_SLUG: &str = "task";

/// Maximum number of characters kept from the free-text slug.
pub const MAX_SLUG_LENGTH: usize = 30;

/// Maximum number of characters kept from a ticket identifier.
pub const MAX_TICKET_LENGTH: usize = 20;

/// Sanitizes free text into a branch slug.
///
/// Empty or symbol-only input yields [`DEFAULT_SLUG`].
///
/// # Examples
///
///     use tasksync::branch::slugify;
///
///     assert_eq!(slugify("Fix--double--hyphens"), "fix-double-hyphens");
///     assert_eq!(slugify("  !!!  "), "task");
#[must_use]
pub fn slugify(text: &str) -> String {
    sanitize(text, MAX_SLUG_LENGTH).unwrap_or_else(|| DEFAULT_SLUG.to_owned())
}

/// Derives a task branch name from free text and an optional ticket.
///
/// Produces `task/<slug>` or `task/<slug>-<ticket>`. The ticket is sanitized
/// with the same rules; a ticket that sanitizes to nothing is omitted.
///
/// # Examples
///
///     use tasksync::branch::derive_branch_name;
///
///     assert_eq!(
///         derive_branch_name("Fix login bug", Some("123")).as_str(),
///         "task/fix-login-bug-123"
///     );
#[must_use]
pub fn derive_branch_name(text: &str, ticket: Option<&str>) -> BranchName {
    let slug = slugify(text);
    let name = match ticket.and_then(|raw| sanitize(raw, MAX_TICKET_LENGTH)) {
        Some(ticket_slug) => format!("{BRANCH_PREFIX}{slug}-{ticket_slug}"),
        None => format!("{BRANCH_PREFIX}{slug}"),
    };
    BranchName::from_derived(name)
}

fn sanitize(text: &str, max_length: usize) -> Option<String> {
    let mut collapsed = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            ch
        } else {
            '-'
        };
        if mapped == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(mapped);
    }

    let bounded: String = collapsed
        .trim_matches('-')
        .chars()
        .take(max_length)
        .collect();
    // Truncation may expose a hyphen at the new end.
    let slug = bounded.trim_end_matches('-');
    (!slug.is_empty()).then(|| slug.to_owned())
}
