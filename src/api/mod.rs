pub mod client;
pub mod error;
pub mod wire;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

use crate::data::{
    Comment, Issue, IssueId, IssueStatus, Label, LabelForm, LabelId, Milestone, MilestoneForm,
    MilestoneId, NewIssue, UserRef,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;

/// Shared HTTP client for all API requests to enable connection pooling
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(5)
        .build()
        .expect("Failed to create HTTP client")
});

/// Comment fetches kept in flight at once while loading the Commented scope
const COMMENT_FETCH_CONCURRENCY: usize = 5;

/// Operations the client needs from the issue tracker server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueApi: Send + Sync {
    async fn fetch_issues(&self, status: IssueStatus) -> ApiResult<Vec<Issue>>;

    /// Returns the id of the new issue
    async fn create_issue(&self, issue: &NewIssue) -> ApiResult<IssueId>;

    async fn set_issue_status(&self, id: IssueId, status: IssueStatus) -> ApiResult<()>;

    async fn fetch_users(&self) -> ApiResult<Vec<UserRef>>;

    async fn fetch_labels(&self) -> ApiResult<Vec<Label>>;

    async fn create_label(&self, label: &LabelForm) -> ApiResult<()>;

    async fn update_label(&self, id: LabelId, label: &LabelForm) -> ApiResult<()>;

    async fn delete_label(&self, id: LabelId) -> ApiResult<()>;

    async fn fetch_milestones(&self) -> ApiResult<Vec<Milestone>>;

    async fn create_milestone(&self, milestone: &MilestoneForm) -> ApiResult<()>;

    async fn update_milestone(&self, id: MilestoneId, milestone: &MilestoneForm) -> ApiResult<()>;

    async fn delete_milestone(&self, id: MilestoneId) -> ApiResult<()>;

    async fn fetch_comments(&self, issue: IssueId) -> ApiResult<Vec<Comment>>;

    /// `true` when the server answers the auth check with 200
    async fn auth_status(&self) -> ApiResult<bool>;
}

/// Users, labels and milestones offered by the filter menu.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub users: Vec<UserRef>,
    pub labels: Vec<Label>,
    pub milestones: Vec<Milestone>,
}

/// Fetch the filter menu entries concurrently.
///
/// A failing endpoint leaves its list empty rather than failing the menu.
pub async fn fetch_filter_options(api: &dyn IssueApi) -> FilterOptions {
    let (users, labels, milestones) = tokio::join!(
        api.fetch_users(),
        api.fetch_labels(),
        api.fetch_milestones()
    );

    FilterOptions {
        users: users.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch users: {}", e);
            Vec::new()
        }),
        labels: labels.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch labels: {}", e);
            Vec::new()
        }),
        milestones: milestones.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch milestones: {}", e);
            Vec::new()
        }),
    }
}

/// Comments fetched for a batch of issues.
#[derive(Debug, Default)]
pub struct CommentBatch {
    pub loaded: Vec<(IssueId, Vec<Comment>)>,
    pub failed: Vec<IssueId>,
}

/// Fetch comments for every issue in `ids`, a few at a time.
pub async fn fetch_comment_batch(api: Arc<dyn IssueApi>, ids: Vec<IssueId>) -> CommentBatch {
    let results: Vec<(IssueId, ApiResult<Vec<Comment>>)> = stream::iter(ids)
        .map(|id| {
            let api = Arc::clone(&api);
            async move { (id, api.fetch_comments(id).await) }
        })
        .buffer_unordered(COMMENT_FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut batch = CommentBatch::default();
    for (id, result) in results {
        match result {
            Ok(comments) => batch.loaded.push((id, comments)),
            Err(e) => {
                tracing::debug!("Failed to fetch comments for issue {}: {}", id, e);
                batch.failed.push(id);
            }
        }
    }
    batch
}

/// Ask the server whether the stored credentials are still valid.
///
/// Any error counts as logged out.
pub async fn check_login(api: &dyn IssueApi) -> bool {
    match api.auth_status().await {
        Ok(logged_in) => logged_in,
        Err(e) => {
            tracing::warn!("Auth check failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: u64) -> Comment {
        Comment {
            id: author,
            author_id: author,
            content: String::new(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_comment_batch_splits_failures() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_comments().returning(|id| {
            if id == 2 {
                Err(ApiError::from_status("/api/issues/2/comments", 500))
            } else {
                Ok(vec![comment(id * 10)])
            }
        });

        let api: Arc<dyn IssueApi> = Arc::new(mock);
        let mut batch = fetch_comment_batch(api, vec![1, 2, 3]).await;
        batch.loaded.sort_by_key(|(id, _)| *id);

        assert_eq!(batch.failed, vec![2]);
        assert_eq!(batch.loaded.len(), 2);
        assert_eq!(batch.loaded[0].0, 1);
        assert_eq!(batch.loaded[1].1[0].author_id, 30);
    }

    #[tokio::test]
    async fn test_filter_options_tolerate_failures() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_users().returning(|| {
            Ok(vec![UserRef {
                id: 1,
                name: "sue".to_string(),
            }])
        });
        mock.expect_fetch_labels()
            .returning(|| Err(ApiError::from_status("/api/labels", 502)));
        mock.expect_fetch_milestones().returning(|| Ok(vec![]));

        let options = fetch_filter_options(&mock).await;
        assert_eq!(options.users.len(), 1);
        assert!(options.labels.is_empty());
    }

    #[tokio::test]
    async fn test_check_login_error_is_logged_out() {
        let mut mock = MockIssueApi::new();
        mock.expect_auth_status()
            .returning(|| Err(ApiError::from_status("/api/auth", 500)));
        assert!(!check_login(&mock).await);

        let mut mock = MockIssueApi::new();
        mock.expect_auth_status().returning(|| Ok(true));
        assert!(check_login(&mock).await);
    }
}
