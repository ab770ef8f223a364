//! Comment authors per issue, loaded ahead of the Commented scope.

use crate::data::{Comment, Issue, IssueId, UserId};
use std::collections::{HashMap, HashSet};

/// Who commented on which issue.
///
/// An issue missing from the index has not been loaded yet, which is
/// different from an issue with no comments.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    authors: HashMap<IssueId, HashSet<UserId>>,
}

impl CommentIndex {
    pub fn insert(&mut self, issue: IssueId, comments: &[Comment]) {
        self.authors
            .insert(issue, comments.iter().map(|c| c.author_id).collect());
    }

    pub fn is_loaded(&self, issue: IssueId) -> bool {
        self.authors.contains_key(&issue)
    }

    /// `None` while the comments of `issue` are unknown.
    pub fn has_commented(&self, issue: IssueId, user: UserId) -> Option<bool> {
        self.authors.get(&issue).map(|authors| authors.contains(&user))
    }

    /// Ids of issues whose comments still need fetching, in list order.
    pub fn missing(&self, issues: &[Issue]) -> Vec<IssueId> {
        issues
            .iter()
            .map(|i| i.id)
            .filter(|id| !self.is_loaded(*id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.authors.clear();
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: UserId) -> Comment {
        Comment {
            id: author,
            author_id: author,
            content: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_empty_comment_list_is_loaded() {
        let mut index = CommentIndex::default();
        assert_eq!(index.has_commented(1, 5), None);

        index.insert(1, &[]);
        assert!(index.is_loaded(1));
        assert_eq!(index.has_commented(1, 5), Some(false));
    }

    #[test]
    fn test_reinsert_replaces_authors() {
        let mut index = CommentIndex::default();
        index.insert(1, &[comment(5), comment(6)]);
        assert_eq!(index.has_commented(1, 6), Some(true));

        index.insert(1, &[comment(5)]);
        assert_eq!(index.has_commented(1, 6), Some(false));
        assert_eq!(index.len(), 1);
    }
}
