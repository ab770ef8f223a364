//! Test utilities and fixtures for issuedeck tests
#![allow(dead_code)]

use async_trait::async_trait;
use issuedeck::api::{ApiError, ApiResult, IssueApi};
use issuedeck::config::{Config, ServerConfig, UiConfig, UserConfig};
use issuedeck::data::{
    Comment, Issue, IssueId, IssueStatus, Label, LabelForm, LabelId, LabelRef, Milestone,
    MilestoneForm, MilestoneId, MilestoneRef, NewIssue, UserId, UserRef,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const ME: UserId = 5;

/// Config pointing at a server nobody listens on; tests use [`FakeApi`].
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token: None,
        },
        user: UserConfig { id: ME },
        ui: UiConfig::default(),
    }
}

pub fn issue(id: IssueId, author: UserId, title: &str) -> Issue {
    Issue {
        id,
        title: title.to_string(),
        content: String::new(),
        author_id: author,
        assignees: vec![],
        labels: vec![],
        milestone: None,
        is_open: true,
    }
}

pub fn closed_issue(id: IssueId, author: UserId, title: &str) -> Issue {
    Issue {
        is_open: false,
        ..issue(id, author, title)
    }
}

pub fn with_assignees(mut issue: Issue, users: &[UserId]) -> Issue {
    issue.assignees = users
        .iter()
        .map(|&id| UserRef {
            id,
            name: format!("user{}", id),
        })
        .collect();
    issue
}

pub fn with_label(mut issue: Issue, id: LabelId, name: &str) -> Issue {
    issue.labels.push(LabelRef {
        id,
        name: name.to_string(),
        color: "#D73A4A".to_string(),
    });
    issue
}

pub fn with_milestone(mut issue: Issue, id: MilestoneId, title: &str) -> Issue {
    issue.milestone = Some(MilestoneRef {
        id,
        title: title.to_string(),
    });
    issue
}

pub fn comment(id: u64, author: UserId) -> Comment {
    Comment {
        id,
        author_id: author,
        content: "+1".to_string(),
        created_at: None,
    }
}

pub fn ids(issues: &[&Issue]) -> Vec<IssueId> {
    issues.iter().map(|i| i.id).collect()
}

/// Issue list payload as the server sends it
pub fn issue_list_json() -> Value {
    json!([
        {
            "issueId": 1,
            "title": "Crash on launch",
            "content": "Stack trace attached",
            "userId": 5,
            "isOpen": 1,
            "assign": [{ "userId": 9, "name": "kim" }],
            "label": [{ "labelId": 3, "labelName": "bug", "labelColor": "#D73A4A" }],
            "milestone": { "milestoneId": 2, "title": "v1.0" }
        },
        {
            "issueId": 2,
            "title": "Typo in README",
            "userId": 9,
            "isOpen": false
        }
    ])
}

pub fn label_list_json() -> Value {
    json!([
        { "id": 3, "name": "bug", "description": "Something broke", "color": "#D73A4A" },
        { "id": 4, "name": "docs", "description": "", "color": "#0075CA" }
    ])
}

pub fn milestone_list_json() -> Value {
    json!([
        {
            "id": 2,
            "title": "v1.0",
            "dueDate": "2024-06-30",
            "content": "First release",
            "isOpen": 1,
            "openIssue": 3,
            "closeIssue": 1
        }
    ])
}

pub fn comment_list_json() -> Value {
    json!([
        { "id": 10, "userId": 5, "content": "Seen it too", "createdAt": "2024-01-02T03:04:05Z" },
        { "id": 11, "userId": 9 }
    ])
}

/// In-memory issue tracker.
#[derive(Default)]
pub struct FakeApi {
    pub issues: Mutex<Vec<Issue>>,
    pub comments: Mutex<HashMap<IssueId, Vec<Comment>>>,
    pub failing_comments: HashSet<IssueId>,
    pub users: Vec<UserRef>,
    pub labels: Vec<Label>,
    pub milestones: Vec<Milestone>,
    pub logged_in: bool,
    pub unauthorized: bool,
    /// `(issue, status)` for every status change requested
    pub status_calls: Mutex<Vec<(IssueId, IssueStatus)>>,
    pub comment_calls: Mutex<Vec<IssueId>>,
}

impl FakeApi {
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            logged_in: true,
            ..Self::default()
        }
    }

    pub fn add_comments(&self, issue: IssueId, comments: Vec<Comment>) {
        self.comments.lock().unwrap().insert(issue, comments);
    }
}

#[async_trait]
impl IssueApi for FakeApi {
    async fn fetch_issues(&self, status: IssueStatus) -> ApiResult<Vec<Issue>> {
        if self.unauthorized {
            return Err(ApiError::from_status("/api/issues", 401));
        }
        let open = status == IssueStatus::Open;
        Ok(self
            .issues
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.is_open == open)
            .cloned()
            .collect())
    }

    async fn create_issue(&self, issue: &NewIssue) -> ApiResult<IssueId> {
        let mut issues = self.issues.lock().unwrap();
        let id = issues.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        issues.push(Issue {
            id,
            title: issue.title.clone(),
            content: issue.content.clone(),
            author_id: ME,
            assignees: vec![],
            labels: vec![],
            milestone: None,
            is_open: true,
        });
        Ok(id)
    }

    async fn set_issue_status(&self, id: IssueId, status: IssueStatus) -> ApiResult<()> {
        self.status_calls.lock().unwrap().push((id, status));
        for issue in self.issues.lock().unwrap().iter_mut() {
            if issue.id == id {
                issue.is_open = status == IssueStatus::Open;
            }
        }
        Ok(())
    }

    async fn fetch_users(&self) -> ApiResult<Vec<UserRef>> {
        Ok(self.users.clone())
    }

    async fn fetch_labels(&self) -> ApiResult<Vec<Label>> {
        Ok(self.labels.clone())
    }

    async fn create_label(&self, _label: &LabelForm) -> ApiResult<()> {
        Ok(())
    }

    async fn update_label(&self, _id: LabelId, _label: &LabelForm) -> ApiResult<()> {
        Ok(())
    }

    async fn delete_label(&self, _id: LabelId) -> ApiResult<()> {
        Ok(())
    }

    async fn fetch_milestones(&self) -> ApiResult<Vec<Milestone>> {
        Ok(self.milestones.clone())
    }

    async fn create_milestone(&self, _milestone: &MilestoneForm) -> ApiResult<()> {
        Ok(())
    }

    async fn update_milestone(&self, _id: MilestoneId, _milestone: &MilestoneForm) -> ApiResult<()> {
        Ok(())
    }

    async fn delete_milestone(&self, _id: MilestoneId) -> ApiResult<()> {
        Ok(())
    }

    async fn fetch_comments(&self, issue: IssueId) -> ApiResult<Vec<Comment>> {
        self.comment_calls.lock().unwrap().push(issue);
        if self.failing_comments.contains(&issue) {
            return Err(ApiError::from_status("/api/issues/comments", 500));
        }
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&issue)
            .cloned()
            .unwrap_or_default())
    }

    async fn auth_status(&self) -> ApiResult<bool> {
        Ok(self.logged_in)
    }
}
