pub mod color;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type IssueId = u64;
pub type UserId = u64;
pub type LabelId = u64;
pub type MilestoneId = u64;

/// An issue as shown in the issue list.
///
/// Replaced wholesale on every fetch; status changes go through the API
/// and come back with the next refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub assignees: Vec<UserRef>,
    pub labels: Vec<LabelRef>,
    pub milestone: Option<MilestoneRef>,
    pub is_open: bool,
}

impl Issue {
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.assignees.iter().any(|a| a.id == user)
    }

    pub fn has_label(&self, label: LabelId) -> bool {
        self.labels.iter().any(|l| l.id == label)
    }

    pub fn milestone_id(&self) -> Option<MilestoneId> {
        self.milestone.as_ref().map(|m| m.id)
    }

    pub fn status(&self) -> IssueStatus {
        if self.is_open {
            IssueStatus::Open
        } else {
            IssueStatus::Closed
        }
    }
}

/// Read-only projection of a server user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

/// Label as attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
    pub id: LabelId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRef {
    pub id: MilestoneId,
    pub title: String,
}

/// Full label entity from the label list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

/// Full milestone entity from the milestone list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub content: Option<String>,
    pub is_open: bool,
    pub open_issues: u32,
    pub closed_issues: u32,
}

impl Milestone {
    /// Share of closed issues, 0.0 when the milestone has no issues.
    pub fn progress(&self) -> f64 {
        let total = self.open_issues + self.closed_issues;
        if total == 0 {
            0.0
        } else {
            self.closed_issues as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author_id: UserId,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Which side of the open/closed tab an issue list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    #[default]
    Open,
    Closed,
}

impl IssueStatus {
    /// Value used in the `status` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown issue status '{}'", other)),
        }
    }
}

/// Request body for creating an issue
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub title: String,
    pub content: String,
    pub assignees: Vec<UserId>,
    pub labels: Vec<LabelId>,
    pub milestone_id: Option<MilestoneId>,
}

/// Request body for creating or editing a label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelForm {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

/// Request body for creating or editing a milestone
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneForm {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub content: Option<String>,
}

/// Label list held by the label screen.
///
/// Seeded with the fetched list and narrowed locally after a delete
/// succeeds, so the screen does not need a refetch.
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    labels: Vec<Label>,
}

impl LabelStore {
    pub fn set_initial(&mut self, labels: Vec<Label>) {
        self.labels = labels;
    }

    pub fn remove(&mut self, id: LabelId) -> Option<Label> {
        let pos = self.labels.iter().position(|l| l.id == id)?;
        Some(self.labels.remove(pos))
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
