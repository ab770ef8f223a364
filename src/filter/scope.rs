//! Scope buckets relative to the current user.

use super::comments::CommentIndex;
use crate::data::{Issue, UserId};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Every issue on the current tab
    #[default]
    All,
    /// Issues the current user wrote
    Created,
    /// Issues assigned to the current user
    Assigned,
    /// Issues the current user commented on
    Commented,
}

impl Scope {
    pub const ALL: [Scope; 4] = [Scope::All, Scope::Created, Scope::Assigned, Scope::Commented];

    pub fn title(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Created => "Created",
            Self::Assigned => "Assigned",
            Self::Commented => "Commented",
        }
    }

    /// Position in the scope tab bar
    pub fn index(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Created => 1,
            Self::Assigned => 2,
            Self::Commented => 3,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.title().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown scope '{}' (all, created, assigned, commented)", s))
    }
}

/// Result of checking one issue against a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMatch {
    Match,
    NoMatch,
    /// Comment data for the issue has not arrived yet
    Pending,
}

impl From<bool> for ScopeMatch {
    fn from(matched: bool) -> Self {
        if matched {
            Self::Match
        } else {
            Self::NoMatch
        }
    }
}

/// Check an issue against a scope.
///
/// `None` means no scope tab is selected and hides everything.
pub fn matches_scope(
    issue: &Issue,
    scope: Option<Scope>,
    current_user: UserId,
    comments: &CommentIndex,
) -> ScopeMatch {
    let Some(scope) = scope else {
        return ScopeMatch::NoMatch;
    };

    match scope {
        Scope::All => ScopeMatch::Match,
        Scope::Created => (issue.author_id == current_user).into(),
        Scope::Assigned => {
            if issue.assignees.is_empty() {
                return ScopeMatch::NoMatch;
            }
            issue.is_assigned_to(current_user).into()
        }
        Scope::Commented => match comments.has_commented(issue.id, current_user) {
            Some(commented) => commented.into(),
            None => ScopeMatch::Pending,
        },
    }
}
