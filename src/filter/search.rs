//! Title search.

use crate::data::Issue;

/// Case-insensitive substring match on the issue title.
///
/// Content is not searched. An empty query matches everything.
pub fn matches_text(issue: &Issue, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    issue.title.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str, content: &str) -> Issue {
        Issue {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            author_id: 1,
            assignees: vec![],
            labels: vec![],
            milestone: None,
            is_open: true,
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches_text(&titled("Bug report", ""), "bug"));
        assert!(matches_text(&titled("bug report", ""), "REPORT"));
    }

    #[test]
    fn test_content_not_searched() {
        assert!(!matches_text(&titled("Crash", "a nasty bug"), "bug"));
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(matches_text(&titled("Anything", ""), ""));
    }
}
