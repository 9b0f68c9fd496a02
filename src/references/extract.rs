//! Pure extractor for tracking-issue references in free-form text.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::IssueRef;

/// Two or more ASCII uppercase letters, a hyphen, then ASCII digits.
static ISSUE_REF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,}-[0-9]+").expect("issue reference regex is valid"));

/// Returns the leftmost tracking-issue reference in `text`, if any.
///
/// # Parsing Rules
///
/// - A reference is 2+ uppercase ASCII letters, `-`, then 1+ ASCII digits
/// - Surrounding punctuation is ignored (`[ABC-123]` matches)
/// - Without the hyphen there is no match (`ABC123`)
/// - Only the first match is returned; later references are ignored
///
/// # Examples
///
/// ```
/// use launch_readiness::references::extract_issue_ref;
///
/// let found = extract_issue_ref("feat: implement feature ABC-123").unwrap();
/// assert_eq!(found.as_str(), "ABC-123");
///
/// let first = extract_issue_ref("Multiple issues ABC-123 and XYZ-789").unwrap();
/// assert_eq!(first.as_str(), "ABC-123");
///
/// assert!(extract_issue_ref("Invalid ID: ABC123").is_none());
/// ```
pub fn extract_issue_ref(text: &str) -> Option<IssueRef> {
    ISSUE_REF_PATTERN
        .find(text)
        .map(|m| IssueRef::from_match(m.as_str()))
}

/// Searches each text in order and returns the first reference found.
///
/// Used where there is a precedence between sources, e.g. a PR title is
/// searched before its body.
pub fn extract_first<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<IssueRef> {
    texts.into_iter().find_map(extract_issue_ref)
}
