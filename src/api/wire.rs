//! JSON shapes of the issue tracker API and their mapping onto `data` types.

use crate::data::{
    Comment, Issue, IssueId, Label, LabelRef, Milestone, MilestoneRef, UserRef,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

// The server stores flags as TINYINT, so `isOpen` arrives as 0/1 or a bool
// depending on the endpoint.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    issue_id: IssueId,
    title: String,
    #[serde(default)]
    content: Option<String>,
    user_id: u64,
    #[serde(default = "default_true", deserialize_with = "flag")]
    is_open: bool,
    #[serde(default)]
    assign: Option<Vec<AssigneeNode>>,
    #[serde(default)]
    label: Option<Vec<IssueLabelNode>>,
    #[serde(default)]
    milestone: Option<IssueMilestoneNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssigneeNode {
    user_id: u64,
    #[serde(default, alias = "userName")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueLabelNode {
    label_id: u64,
    label_name: String,
    label_color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueMilestoneNode {
    milestone_id: u64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct LabelNode {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneNode {
    id: u64,
    title: String,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default = "default_true", deserialize_with = "flag")]
    is_open: bool,
    #[serde(default)]
    open_issue: u32,
    #[serde(default)]
    close_issue: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    id: u64,
    user_id: u64,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedIssue {
    issue_id: IssueId,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Issue {
            id: node.issue_id,
            title: node.title,
            content: node.content.unwrap_or_default(),
            author_id: node.user_id,
            assignees: node
                .assign
                .unwrap_or_default()
                .into_iter()
                .map(|a| UserRef {
                    id: a.user_id,
                    name: a.name.unwrap_or_default(),
                })
                .collect(),
            labels: node
                .label
                .unwrap_or_default()
                .into_iter()
                .map(|l| LabelRef {
                    id: l.label_id,
                    name: l.label_name,
                    color: l.label_color,
                })
                .collect(),
            milestone: node.milestone.map(|m| MilestoneRef {
                id: m.milestone_id,
                title: m.title,
            }),
            is_open: node.is_open,
        }
    }
}

/// Parse a due date, accepting `2020-11-30` or a full RFC 3339 timestamp.
fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

impl From<MilestoneNode> for Milestone {
    fn from(node: MilestoneNode) -> Self {
        Milestone {
            id: node.id,
            title: node.title,
            due_date: node.due_date.as_deref().and_then(parse_due_date),
            content: node.content,
            is_open: node.is_open,
            open_issues: node.open_issue,
            closed_issues: node.close_issue,
        }
    }
}

impl From<CommentNode> for Comment {
    fn from(node: CommentNode) -> Self {
        Comment {
            id: node.id,
            author_id: node.user_id,
            content: node.content.unwrap_or_default(),
            created_at: node
                .created_at
                .as_deref()
                .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
        }
    }
}

pub fn parse_issues(body: &str) -> serde_json::Result<Vec<Issue>> {
    let nodes: Vec<IssueNode> = serde_json::from_str(body)?;
    Ok(nodes.into_iter().map(Issue::from).collect())
}

pub fn parse_created_issue(body: &str) -> serde_json::Result<IssueId> {
    let created: CreatedIssue = serde_json::from_str(body)?;
    Ok(created.issue_id)
}

pub fn parse_users(body: &str) -> serde_json::Result<Vec<UserRef>> {
    let nodes: Vec<UserNode> = serde_json::from_str(body)?;
    Ok(nodes
        .into_iter()
        .map(|u| UserRef {
            id: u.id,
            name: u.name,
        })
        .collect())
}

pub fn parse_labels(body: &str) -> serde_json::Result<Vec<Label>> {
    let nodes: Vec<LabelNode> = serde_json::from_str(body)?;
    Ok(nodes
        .into_iter()
        .map(|l| Label {
            id: l.id,
            name: l.name,
            description: l.description.filter(|d| !d.is_empty()),
            color: l.color,
        })
        .collect())
}

pub fn parse_milestones(body: &str) -> serde_json::Result<Vec<Milestone>> {
    let nodes: Vec<MilestoneNode> = serde_json::from_str(body)?;
    Ok(nodes.into_iter().map(Milestone::from).collect())
}

pub fn parse_comments(body: &str) -> serde_json::Result<Vec<Comment>> {
    let nodes: Vec<CommentNode> = serde_json::from_str(body)?;
    Ok(nodes.into_iter().map(Comment::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_accepts_int_and_bool() {
        let body = r#"[
            {"issueId": 1, "title": "a", "userId": 1, "isOpen": 0},
            {"issueId": 2, "title": "b", "userId": 1, "isOpen": true}
        ]"#;
        let issues = parse_issues(body).unwrap();
        assert!(!issues[0].is_open);
        assert!(issues[1].is_open);
    }

    #[test]
    fn test_due_date_formats() {
        assert_eq!(
            parse_due_date("2020-11-30"),
            NaiveDate::from_ymd_opt(2020, 11, 30)
        );
        assert_eq!(
            parse_due_date("2020-11-30T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2020, 11, 30)
        );
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("someday"), None);
    }
}
