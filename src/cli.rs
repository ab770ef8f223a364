//! Non-interactive subcommands.
//!
//! Each command talks to the server through [`IssueApi`] and writes plain
//! text to the given writer, so the same filtering the TUI does is available
//! to scripts.

use crate::api::{self, IssueApi};
use crate::data::color::{is_valid_color, random_color};
use crate::data::{
    Issue, IssueStatus, Label, LabelForm, LabelId, LabelStore, Milestone, MilestoneForm,
    MilestoneId, NewIssue, UserId,
};
use crate::filter::{self, Category, CommentIndex, FilterState, Scope, EMPTY_STATE_TEXT};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::io::Write;
use std::sync::Arc;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List issues through the same filters as the TUI
    Issues(IssuesArgs),
    /// Create an issue
    New(NewIssueArgs),
    /// Manage labels
    Labels {
        #[command(subcommand)]
        action: LabelCommand,
    },
    /// Manage milestones
    Milestones {
        #[command(subcommand)]
        action: MilestoneCommand,
    },
    /// Check whether the server accepts the configured credentials
    Auth,
}

#[derive(Args, Debug, Default)]
pub struct IssuesArgs {
    /// List closed issues instead of open ones
    #[arg(long)]
    pub closed: bool,

    /// all, created, assigned or commented
    #[arg(long, default_value = "all")]
    pub scope: Scope,

    /// Case-insensitive title search
    #[arg(long, short)]
    pub search: Option<String>,

    #[arg(long)]
    pub author: Option<UserId>,

    #[arg(long)]
    pub label: Option<LabelId>,

    #[arg(long)]
    pub milestone: Option<MilestoneId>,

    #[arg(long)]
    pub assignee: Option<UserId>,
}

impl IssuesArgs {
    pub fn status(&self) -> IssueStatus {
        if self.closed {
            IssueStatus::Closed
        } else {
            IssueStatus::Open
        }
    }

    pub fn filter_state(&self) -> FilterState {
        let mut state = FilterState {
            scope: Some(self.scope),
            search_text: self.search.clone().unwrap_or_default(),
            ..FilterState::default()
        };
        state.selection.set(Category::Author, self.author);
        state.selection.set(Category::Label, self.label);
        state.selection.set(Category::Milestone, self.milestone);
        state.selection.set(Category::Assignee, self.assignee);
        state
    }
}

#[derive(Args, Debug)]
pub struct NewIssueArgs {
    pub title: String,

    #[arg(long, short, default_value = "")]
    pub content: String,

    /// User id to assign; repeat for several
    #[arg(long = "assignee")]
    pub assignees: Vec<UserId>,

    /// Label id; repeat for several
    #[arg(long = "label")]
    pub labels: Vec<LabelId>,

    #[arg(long)]
    pub milestone: Option<MilestoneId>,
}

#[derive(Subcommand, Debug)]
pub enum LabelCommand {
    List,
    Create {
        name: String,
        #[arg(long, short)]
        description: Option<String>,
        /// #RRGGBB; a random color when omitted
        #[arg(long)]
        color: Option<String>,
    },
    Update {
        id: LabelId,
        name: String,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        id: LabelId,
    },
}

#[derive(Subcommand, Debug)]
pub enum MilestoneCommand {
    List,
    Create {
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, short)]
        content: Option<String>,
    },
    Update {
        id: MilestoneId,
        title: String,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, short)]
        content: Option<String>,
    },
    Delete {
        id: MilestoneId,
    },
}

pub async fn run(
    command: Command,
    api: Arc<dyn IssueApi>,
    current_user: UserId,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Issues(args) => list_issues(api, current_user, &args, out).await,
        Command::New(args) => create_issue(api.as_ref(), args, out).await,
        Command::Labels { action } => run_labels(api.as_ref(), action, out).await,
        Command::Milestones { action } => run_milestones(api.as_ref(), action, out).await,
        Command::Auth => {
            let logged_in = api::check_login(api.as_ref()).await;
            writeln!(out, "{}", if logged_in { "logged in" } else { "logged out" })?;
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Issues
// ─────────────────────────────────────────────────────────────────────────────

/// Fetch, filter and print issues.
///
/// The Commented scope loads comments for the candidates first, then filters
/// again with the completed index.
pub async fn list_issues(
    api: Arc<dyn IssueApi>,
    current_user: UserId,
    args: &IssuesArgs,
    out: &mut impl Write,
) -> Result<()> {
    let issues = api
        .fetch_issues(args.status())
        .await
        .context("Failed to fetch issues")?;
    let state = args.filter_state();

    let mut comments = CommentIndex::default();
    let mut outcome = filter::apply(&issues, &state, current_user, &comments);

    if !outcome.is_complete() {
        let batch = api::fetch_comment_batch(Arc::clone(&api), outcome.pending.clone()).await;
        for (id, loaded) in &batch.loaded {
            comments.insert(*id, loaded);
        }
        for id in &batch.failed {
            tracing::warn!("Treating issue {} as uncommented, comments failed to load", id);
            comments.insert(*id, &[]);
        }
        outcome = filter::apply(&issues, &state, current_user, &comments);
    }

    let visible = filter::select(&issues, &outcome);
    if visible.is_empty() {
        writeln!(out, "{}", EMPTY_STATE_TEXT)?;
        return Ok(());
    }
    for issue in visible {
        writeln!(out, "{}", format_issue(issue))?;
    }
    Ok(())
}

async fn create_issue(api: &dyn IssueApi, args: NewIssueArgs, out: &mut impl Write) -> Result<()> {
    if args.title.trim().is_empty() {
        anyhow::bail!("Issue title must not be empty");
    }
    let issue = NewIssue {
        title: args.title,
        content: args.content,
        assignees: args.assignees,
        labels: args.labels,
        milestone_id: args.milestone,
    };
    let id = api
        .create_issue(&issue)
        .await
        .context("Failed to create issue")?;
    writeln!(out, "Created issue #{}", id)?;
    Ok(())
}

pub fn format_issue(issue: &Issue) -> String {
    let mut line = format!("#{:<5} {}", issue.id, issue.title);
    if !issue.labels.is_empty() {
        let names: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
        line.push_str(&format!("  [{}]", names.join(", ")));
    }
    if let Some(milestone) = &issue.milestone {
        line.push_str(&format!("  ({})", milestone.title));
    }
    line
}

// ─────────────────────────────────────────────────────────────────────────────
// Labels
// ─────────────────────────────────────────────────────────────────────────────

/// Pick the color for a label form: the given one if valid, a random one if
/// none was given.
pub fn resolve_color(color: Option<String>) -> Result<String> {
    match color {
        Some(c) if is_valid_color(&c) => Ok(c.to_uppercase()),
        Some(c) => anyhow::bail!("'{}' is not a color, expected #RRGGBB", c),
        None => Ok(random_color()),
    }
}

async fn load_labels(api: &dyn IssueApi) -> Result<LabelStore> {
    let mut store = LabelStore::default();
    store.set_initial(api.fetch_labels().await.context("Failed to fetch labels")?);
    Ok(store)
}

async fn run_labels(api: &dyn IssueApi, action: LabelCommand, out: &mut impl Write) -> Result<()> {
    match action {
        LabelCommand::List => {
            let store = load_labels(api).await?;
            writeln!(out, "{} labels", store.len())?;
            for label in store.labels() {
                writeln!(out, "{}", format_label(label))?;
            }
        }
        LabelCommand::Create {
            name,
            description,
            color,
        } => {
            let form = label_form(name, description, color)?;
            api.create_label(&form)
                .await
                .context("Failed to create label")?;
            writeln!(out, "Created label '{}' ({})", form.name, form.color)?;
        }
        LabelCommand::Update {
            id,
            name,
            description,
            color,
        } => {
            let form = label_form(name, description, color)?;
            api.update_label(id, &form)
                .await
                .context("Failed to update label")?;
            writeln!(out, "Updated label {}", id)?;
        }
        LabelCommand::Delete { id } => {
            let mut store = load_labels(api).await?;
            api.delete_label(id)
                .await
                .context("Failed to delete label")?;
            match store.remove(id) {
                Some(label) => writeln!(out, "Deleted label '{}'", label.name)?,
                None => writeln!(out, "Deleted label {}", id)?,
            }
            writeln!(out, "{} labels left", store.len())?;
        }
    }
    Ok(())
}

fn label_form(
    name: String,
    description: Option<String>,
    color: Option<String>,
) -> Result<LabelForm> {
    if name.trim().is_empty() {
        anyhow::bail!("Label name must not be empty");
    }
    Ok(LabelForm {
        name,
        description: description.filter(|d| !d.is_empty()),
        color: resolve_color(color)?,
    })
}

pub fn format_label(label: &Label) -> String {
    match &label.description {
        Some(desc) => format!("{:>4}  {}  {}  {}", label.id, label.color, label.name, desc),
        None => format!("{:>4}  {}  {}", label.id, label.color, label.name),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Milestones
// ─────────────────────────────────────────────────────────────────────────────

async fn run_milestones(
    api: &dyn IssueApi,
    action: MilestoneCommand,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        MilestoneCommand::List => {
            let milestones = api
                .fetch_milestones()
                .await
                .context("Failed to fetch milestones")?;
            for milestone in &milestones {
                writeln!(out, "{}", format_milestone(milestone))?;
            }
        }
        MilestoneCommand::Create {
            title,
            due,
            content,
        } => {
            let form = milestone_form(title, due, content)?;
            api.create_milestone(&form)
                .await
                .context("Failed to create milestone")?;
            writeln!(out, "Created milestone '{}'", form.title)?;
        }
        MilestoneCommand::Update {
            id,
            title,
            due,
            content,
        } => {
            let form = milestone_form(title, due, content)?;
            api.update_milestone(id, &form)
                .await
                .context("Failed to update milestone")?;
            writeln!(out, "Updated milestone {}", id)?;
        }
        MilestoneCommand::Delete { id } => {
            api.delete_milestone(id)
                .await
                .context("Failed to delete milestone")?;
            writeln!(out, "Deleted milestone {}", id)?;
        }
    }
    Ok(())
}

fn milestone_form(
    title: String,
    due_date: Option<NaiveDate>,
    content: Option<String>,
) -> Result<MilestoneForm> {
    if title.trim().is_empty() {
        anyhow::bail!("Milestone title must not be empty");
    }
    Ok(MilestoneForm {
        title,
        due_date,
        content,
    })
}

pub fn format_milestone(milestone: &Milestone) -> String {
    let due = milestone
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "no due date".to_string());
    let state = if milestone.is_open { "open" } else { "closed" };
    format!(
        "{:>4}  {}  [{}]  {}  {:.0}% ({} open, {} closed)",
        milestone.id,
        milestone.title,
        state,
        due,
        milestone.progress() * 100.0,
        milestone.open_issues,
        milestone.closed_issues
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockIssueApi};
    use crate::data::{Comment, LabelRef, MilestoneRef};
    use pretty_assertions::assert_eq;

    fn issue(id: u64, author: UserId, title: &str) -> Issue {
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

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_issue() {
        let mut i = issue(12, 5, "Crash on start");
        i.labels.push(LabelRef {
            id: 1,
            name: "bug".to_string(),
            color: "#FF0000".to_string(),
        });
        i.milestone = Some(MilestoneRef {
            id: 2,
            title: "v1".to_string(),
        });
        assert_eq!(format_issue(&i), "#12    Crash on start  [bug]  (v1)");
    }

    #[test]
    fn test_format_milestone_progress() {
        let m = Milestone {
            id: 3,
            title: "Beta".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            content: None,
            is_open: true,
            open_issues: 1,
            closed_issues: 3,
        };
        assert_eq!(
            format_milestone(&m),
            "   3  Beta  [open]  2024-05-01  75% (1 open, 3 closed)"
        );
    }

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color(Some("#aabbcc".to_string())).unwrap(), "#AABBCC");
        assert!(resolve_color(Some("aabbcc".to_string())).is_err());
        assert!(is_valid_color(&resolve_color(None).unwrap()));
    }

    #[test]
    fn test_issue_args_build_filter_state() {
        let args = IssuesArgs {
            scope: Scope::Created,
            search: Some("bug".to_string()),
            label: Some(4),
            ..IssuesArgs::default()
        };
        let state = args.filter_state();
        assert_eq!(state.scope, Some(Scope::Created));
        assert_eq!(state.search_text, "bug");
        assert_eq!(state.selection.get(Category::Label), Some(4));
        assert_eq!(state.selection.get(Category::Author), None);
        assert_eq!(args.status(), IssueStatus::Open);
    }

    #[tokio::test]
    async fn test_list_issues_created_scope() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_issues()
            .returning(|_| Ok(vec![issue(1, 5, "Crash"), issue(2, 9, "Typo")]));

        let args = IssuesArgs {
            scope: Scope::Created,
            ..IssuesArgs::default()
        };
        let mut buf = Vec::new();
        list_issues(Arc::new(mock), 5, &args, &mut buf).await.unwrap();
        assert_eq!(output(buf), "#1     Crash\n");
    }

    #[tokio::test]
    async fn test_list_issues_commented_loads_comments() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_issues()
            .returning(|_| Ok(vec![issue(1, 9, "Crash"), issue(2, 9, "Typo")]));
        mock.expect_fetch_comments().returning(|id| {
            let author = if id == 2 { 5 } else { 7 };
            Ok(vec![Comment {
                id: 100 + id,
                author_id: author,
                content: "me too".to_string(),
                created_at: None,
            }])
        });

        let args = IssuesArgs {
            scope: Scope::Commented,
            ..IssuesArgs::default()
        };
        let mut buf = Vec::new();
        list_issues(Arc::new(mock), 5, &args, &mut buf).await.unwrap();
        assert_eq!(output(buf), "#2     Typo\n");
    }

    #[tokio::test]
    async fn test_list_issues_empty_state() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_issues()
            .returning(|_| Ok(vec![issue(1, 9, "Crash")]));

        let args = IssuesArgs {
            search: Some("nothing".to_string()),
            ..IssuesArgs::default()
        };
        let mut buf = Vec::new();
        list_issues(Arc::new(mock), 5, &args, &mut buf).await.unwrap();
        assert_eq!(output(buf), format!("{}\n", EMPTY_STATE_TEXT));
    }

    #[tokio::test]
    async fn test_delete_label_reports_name() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_labels().returning(|| {
            Ok(vec![
                Label {
                    id: 1,
                    name: "bug".to_string(),
                    description: None,
                    color: "#FF0000".to_string(),
                },
                Label {
                    id: 2,
                    name: "docs".to_string(),
                    description: None,
                    color: "#00FF00".to_string(),
                },
            ])
        });
        mock.expect_delete_label().returning(|_| Ok(()));

        let mut buf = Vec::new();
        run_labels(&mock, LabelCommand::Delete { id: 1 }, &mut buf)
            .await
            .unwrap();
        assert_eq!(output(buf), "Deleted label 'bug'\n1 labels left\n");
    }

    #[tokio::test]
    async fn test_create_label_rejects_bad_color() {
        let mock = MockIssueApi::new();
        let mut buf = Vec::new();
        let result = run_labels(
            &mock,
            LabelCommand::Create {
                name: "bug".to_string(),
                description: None,
                color: Some("#ZZZZZZ".to_string()),
            },
            &mut buf,
        )
        .await;
        assert!(result.is_err());
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let mut mock = MockIssueApi::new();
        mock.expect_fetch_issues()
            .returning(|_| Err(ApiError::from_status("/api/issues", 500)));

        let mut buf = Vec::new();
        let err = list_issues(Arc::new(mock), 5, &IssuesArgs::default(), &mut buf)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to fetch issues"));
    }
}
