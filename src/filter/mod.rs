//! Issue list filtering.
//!
//! The filtered view is always recomputed from the fetched issues, the
//! current [`FilterState`] and the comment index; nothing here mutates the
//! fetched list. Predicates combine with AND:
//!
//! - scope (All / Created / Assigned / Commented)
//! - title search
//! - per-category selection (author, label, milestone, assignee)

pub mod comments;
pub mod scope;
pub mod search;
pub mod selection;

pub use comments::CommentIndex;
pub use scope::{matches_scope, Scope, ScopeMatch};
pub use search::matches_text;
pub use selection::{Category, CategorySelection};

use crate::data::{Issue, IssueId, UserId};

/// Shown in place of the list when nothing passes the filters
pub const EMPTY_STATE_TEXT: &str = "No results matched your search.";

/// Everything the user has chosen to narrow the issue list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub scope: Option<Scope>,
    pub selection: CategorySelection,
    pub search_text: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            scope: Some(Scope::All),
            selection: CategorySelection::default(),
            search_text: String::new(),
        }
    }
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any predicate can drop an issue.
    pub fn is_narrowing(&self) -> bool {
        self.scope != Some(Scope::All) || !self.search_text.is_empty() || self.selection.is_active()
    }

    /// Toggle a category selection. Returns the new selection for it.
    pub fn toggle(&mut self, category: Category, id: u64) -> Option<u64> {
        self.selection.toggle(category, id)
    }
}

/// Result of one pass of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Indices into the fetched issue list, in list order
    pub indices: Vec<usize>,
    /// Issues that pass every other predicate but wait on comment data
    pub pending: Vec<IssueId>,
}

impl FilterOutcome {
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Check a single issue against every active predicate.
pub fn evaluate(
    issue: &Issue,
    state: &FilterState,
    current_user: UserId,
    comments: &CommentIndex,
) -> ScopeMatch {
    if !matches_text(issue, &state.search_text) || !state.selection.matches(issue) {
        return ScopeMatch::NoMatch;
    }
    matches_scope(issue, state.scope, current_user, comments)
}

/// Derive the filtered view of `issues`.
pub fn apply(
    issues: &[Issue],
    state: &FilterState,
    current_user: UserId,
    comments: &CommentIndex,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for (idx, issue) in issues.iter().enumerate() {
        match evaluate(issue, state, current_user, comments) {
            ScopeMatch::Match => outcome.indices.push(idx),
            ScopeMatch::Pending => outcome.pending.push(issue.id),
            ScopeMatch::NoMatch => {}
        }
    }

    outcome
}

/// Convenience for callers that want the issues rather than indices.
pub fn select<'a>(issues: &'a [Issue], outcome: &FilterOutcome) -> Vec<&'a Issue> {
    outcome
        .indices
        .iter()
        .filter_map(|&idx| issues.get(idx))
        .collect()
}
