use crate::api::{self, CommentBatch, FilterOptions, IssueApi};
use crate::config::Config;
use crate::data::{Issue, IssueId, IssueStatus, UserId};
use crate::filter::{self, Category, CommentIndex, FilterOutcome, FilterState, Scope};
use crate::tui::edit_mode::EditMode;
use crate::util::send_or_log;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Braille spinner frames for loading animation
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Result from a background task
#[derive(Debug)]
pub enum RefreshResult {
    /// Issue list for the tab it was requested for
    Issues {
        status: IssueStatus,
        issues: Vec<Issue>,
    },
    /// Comment authors, stamped with the issue fetch they were requested under
    Comments {
        generation: u64,
        batch: CommentBatch,
    },
    FilterOptions(FilterOptions),
    /// Open/close requests finished
    StatusChanged {
        target: IssueStatus,
        changed: usize,
        failed: usize,
        bulk: bool,
    },
    Login(bool),
    Error {
        message: String,
        unauthorized: bool,
    },
}

impl RefreshResult {
    fn from_api_error(context: &str, err: &api::ApiError) -> Self {
        Self::Error {
            message: format!("{}: {}", context, err),
            unauthorized: err.is_auth(),
        }
    }
}

/// Active modal state - only one modal can be active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    FilterMenu { category: usize, item: usize },
}

impl ModalState {
    pub fn is_none(&self) -> bool {
        matches!(self, ModalState::None)
    }
}

pub struct App {
    pub config: Arc<Config>,
    pub api: Arc<dyn IssueApi>,
    pub current_user: UserId,

    // Issue data
    pub status: IssueStatus,
    pub issues: Vec<Issue>,
    pub comments: CommentIndex,
    comments_in_flight: HashSet<IssueId>,
    comments_generation: u64,

    // Filter state
    pub filter: FilterState,
    pub outcome: FilterOutcome,
    pub options: FilterOptions,

    // Search state
    pub search_active: bool,
    pub search_typing: bool,

    // Edit mode
    pub edit: EditMode,
    pub selected: HashSet<IssueId>,

    pub cursor: usize,
    pub modal: ModalState,

    // UI state
    pub logged_in: Option<bool>,
    pub error_message: Option<String>,
    pub is_loading: bool,
    pub spinner_frame: usize,

    result_tx: mpsc::Sender<RefreshResult>,
    result_rx: mpsc::Receiver<RefreshResult>,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn IssueApi>) -> Self {
        let (result_tx, result_rx) = mpsc::channel(100);
        let current_user = config.user.id;
        let status = config.ui.default_status;

        Self {
            config: Arc::new(config),
            api,
            current_user,
            status,
            issues: Vec::new(),
            comments: CommentIndex::default(),
            comments_in_flight: HashSet::new(),
            comments_generation: 0,
            filter: FilterState::default(),
            outcome: FilterOutcome::default(),
            options: FilterOptions::default(),
            search_active: false,
            search_typing: false,
            edit: EditMode::default(),
            selected: HashSet::new(),
            cursor: 0,
            modal: ModalState::None,
            logged_in: None,
            error_message: None,
            is_loading: false,
            spinner_frame: 0,
            result_tx,
            result_rx,
        }
    }

    /// Kick off the initial fetches.
    pub fn start(&mut self) {
        self.check_login();
        self.fetch_issues();
    }

    /// Process a message and update app state (Elm Architecture update function).
    ///
    /// Returns `true` if the app should quit.
    pub fn update(&mut self, msg: super::Message) -> bool {
        use super::Message;
        match msg {
            Message::Quit => return true,
            Message::Refresh => self.fetch_issues(),
            Message::ToggleStatusTab => self.toggle_status_tab(),

            Message::MoveUp => self.move_selection(-1),
            Message::MoveDown => self.move_selection(1),
            Message::GotoTop => self.cursor = 0,
            Message::GotoBottom => self.cursor = self.outcome.len().saturating_sub(1),

            Message::ToggleIssueStatus => self.toggle_issue_status(),

            Message::ToggleEditMode => self.toggle_edit_mode(),
            Message::ToggleSelected => self.toggle_selected(),
            Message::ToggleSelectAll => self.toggle_select_all(),
            Message::CloseSelected => self.close_selected(),

            Message::EnterSearch => self.enter_search(),
            Message::ExitSearch => self.exit_search(),
            Message::ConfirmSearch => self.search_typing = false,
            Message::FocusSearch => self.search_typing = true,
            Message::SearchInput(c) => {
                self.filter.search_text.push(c);
                self.recompute();
            }
            Message::SearchBackspace => {
                self.filter.search_text.pop();
                self.recompute();
            }
            Message::SetScope(scope) => self.set_scope(scope),
            Message::NextScope => self.set_scope(self.current_scope().next()),
            Message::PrevScope => self.set_scope(self.current_scope().prev()),

            Message::ToggleFilterMenu => self.toggle_filter_menu(),
            Message::FilterMenuCategory(delta) => self.move_menu_category(delta),
            Message::FilterMenuItem(delta) => self.move_menu_item(delta),
            Message::FilterMenuSelect => self.select_menu_item(),
            Message::ClearFilters => {
                self.filter.selection.clear();
                self.recompute();
            }

            Message::ToggleHelp => {
                self.modal = if self.modal == ModalState::Help {
                    ModalState::None
                } else {
                    ModalState::Help
                };
            }
            Message::CloseModal => self.modal = ModalState::None,

            Message::None => {}
        }
        false
    }

    /// Advance spinner frame (call on tick while loading)
    pub fn tick_spinner(&mut self) {
        if self.is_loading || self.is_waiting_on_comments() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background work
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the current tab in the background.
    ///
    /// The comment index is dropped since the refetched issues may have new
    /// comments.
    pub fn fetch_issues(&mut self) {
        self.is_loading = true;
        self.comments.clear();
        self.comments_in_flight.clear();
        self.comments_generation += 1;

        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();
        let status = self.status;

        tokio::spawn(async move {
            tracing::debug!("Fetching {} issues", status);
            let result = match api.fetch_issues(status).await {
                Ok(issues) => RefreshResult::Issues { status, issues },
                Err(e) => RefreshResult::from_api_error("Failed to load issues", &e),
            };
            send_or_log(&tx, result, "issue list").await;
        });
    }

    pub fn check_login(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();

        tokio::spawn(async move {
            let logged_in = api::check_login(api.as_ref()).await;
            send_or_log(&tx, RefreshResult::Login(logged_in), "login state").await;
        });
    }

    fn load_filter_options(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();

        tokio::spawn(async move {
            let options = api::fetch_filter_options(api.as_ref()).await;
            send_or_log(&tx, RefreshResult::FilterOptions(options), "filter options").await;
        });
    }

    /// Start fetching comments for every displayed issue the index lacks.
    fn ensure_comments_loaded(&mut self) {
        let missing: Vec<IssueId> = self
            .comments
            .missing(&self.issues)
            .into_iter()
            .filter(|id| !self.comments_in_flight.contains(id))
            .collect();

        if missing.is_empty() {
            return;
        }

        tracing::debug!("Loading comments for {} issues", missing.len());
        self.comments_in_flight.extend(missing.iter().copied());

        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();
        let generation = self.comments_generation;
        tokio::spawn(async move {
            let batch = api::fetch_comment_batch(api, missing).await;
            let result = RefreshResult::Comments { generation, batch };
            send_or_log(&tx, result, "comment batch").await;
        });
    }

    fn change_status(&mut self, ids: Vec<IssueId>, target: IssueStatus, bulk: bool) {
        if ids.is_empty() {
            return;
        }
        self.is_loading = true;

        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();

        tokio::spawn(async move {
            let mut changed = 0;
            let mut failed = 0;
            for id in ids {
                match api.set_issue_status(id, target).await {
                    Ok(()) => changed += 1,
                    Err(e) => {
                        tracing::warn!("Failed to mark issue {} {}: {}", id, target, e);
                        failed += 1;
                    }
                }
            }
            let result = RefreshResult::StatusChanged {
                target,
                changed,
                failed,
                bulk,
            };
            send_or_log(&tx, result, "status change").await;
        });
    }

    /// Drain finished background work (non-blocking, call from event loop tick).
    ///
    /// Returns `true` if anything arrived.
    pub fn poll_refresh(&mut self) -> bool {
        let mut received = false;
        while let Ok(result) = self.result_rx.try_recv() {
            self.apply_result(result);
            received = true;
        }
        received
    }

    pub fn apply_result(&mut self, result: RefreshResult) {
        match result {
            RefreshResult::Issues { status, issues } => {
                if status != self.status {
                    tracing::debug!("Dropping stale {} issue list", status);
                    return;
                }
                self.is_loading = false;
                self.error_message = None;
                self.issues = issues;
                self.selected.retain(|id| self.issues.iter().any(|i| i.id == *id));
                self.edit.set_selected(self.selected.len());
                self.recompute();
            }
            RefreshResult::Comments { generation, batch } => {
                if generation != self.comments_generation {
                    tracing::debug!("Dropping comment batch from an earlier issue fetch");
                    return;
                }
                for (id, comments) in &batch.loaded {
                    self.comments_in_flight.remove(id);
                    self.comments.insert(*id, comments);
                }
                if !batch.failed.is_empty() {
                    // Loaded-empty so the scope settles instead of refetching forever
                    for id in &batch.failed {
                        self.comments_in_flight.remove(id);
                        self.comments.insert(*id, &[]);
                    }
                    self.error_message = Some(format!(
                        "Could not load comments for {} issues",
                        batch.failed.len()
                    ));
                }
                self.recompute();
            }
            RefreshResult::FilterOptions(options) => {
                self.options = options;
                self.clamp_menu();
            }
            RefreshResult::StatusChanged {
                target,
                changed,
                failed,
                bulk,
            } => {
                tracing::info!("Marked {} issues {}", changed, target);
                if failed > 0 {
                    self.error_message = Some(format!(
                        "{} of {} issues could not be updated",
                        failed,
                        failed + changed
                    ));
                }
                if bulk {
                    self.selected.clear();
                    self.edit.finish_close();
                }
                self.fetch_issues();
            }
            RefreshResult::Login(logged_in) => {
                self.logged_in = Some(logged_in);
            }
            RefreshResult::Error {
                message,
                unauthorized,
            } => {
                tracing::error!("{}", message);
                self.is_loading = false;
                if unauthorized {
                    self.logged_in = Some(false);
                }
                self.error_message = Some(message);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering
    // ─────────────────────────────────────────────────────────────────────────

    /// Rederive the filtered view from the fetched issues.
    pub fn recompute(&mut self) {
        self.outcome = filter::apply(&self.issues, &self.filter, self.current_user, &self.comments);
        self.cursor = self.cursor.min(self.outcome.len().saturating_sub(1));

        if !self.outcome.is_complete() {
            self.ensure_comments_loaded();
        }
    }

    /// Issues in display order
    pub fn visible_issues(&self) -> Vec<&Issue> {
        filter::select(&self.issues, &self.outcome)
    }

    pub fn highlighted(&self) -> Option<&Issue> {
        self.outcome
            .indices
            .get(self.cursor)
            .and_then(|&idx| self.issues.get(idx))
    }

    /// Comments for some otherwise matching issues are still loading.
    pub fn is_waiting_on_comments(&self) -> bool {
        !self.outcome.is_complete()
    }

    fn current_scope(&self) -> Scope {
        self.filter.scope.unwrap_or_default()
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.filter.scope = Some(scope);
        self.cursor = 0;
        self.recompute();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation & tabs
    // ─────────────────────────────────────────────────────────────────────────

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.outcome.len();
        if len == 0 {
            return;
        }
        let next = self.cursor as i64 + delta as i64;
        self.cursor = next.clamp(0, len as i64 - 1) as usize;
    }

    pub fn toggle_status_tab(&mut self) {
        self.status = self.status.toggled();
        self.cursor = 0;
        self.selected.clear();
        self.edit.set_selected(0);
        self.fetch_issues();
    }

    /// Close the highlighted issue on the Open tab, reopen it on the Closed tab.
    pub fn toggle_issue_status(&mut self) {
        let Some(issue) = self.highlighted() else {
            return;
        };
        let id = issue.id;
        let target = issue.status().toggled();
        self.change_status(vec![id], target, false);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edit mode
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_edit_mode(&mut self) {
        self.edit.toggle();
        self.selected.clear();
    }

    pub fn toggle_selected(&mut self) {
        if !self.edit.is_editing() {
            return;
        }
        let Some(id) = self.highlighted().map(|i| i.id) else {
            return;
        };
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.edit.set_selected(self.selected.len());
    }

    /// Select every visible issue, or clear the selection if there is one.
    pub fn toggle_select_all(&mut self) {
        if !self.edit.is_editing() {
            return;
        }
        if self.selected.is_empty() {
            self.selected = self.visible_issues().iter().map(|i| i.id).collect();
        } else {
            self.selected.clear();
        }
        self.edit.set_selected(self.selected.len());
    }

    pub fn close_selected(&mut self) {
        if !self.edit.close_enabled() {
            return;
        }
        let mut ids: Vec<IssueId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        self.change_status(ids, IssueStatus::Closed, true);
    }

    pub fn is_selected(&self, id: IssueId) -> bool {
        self.selected.contains(&id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search(&mut self) {
        self.search_active = true;
        self.search_typing = true;
    }

    /// Dismiss the search UI: filters reset and the Open tab is reloaded.
    pub fn exit_search(&mut self) {
        self.search_active = false;
        self.search_typing = false;
        self.filter.reset();
        self.cursor = 0;
        self.status = IssueStatus::Open;
        self.recompute();
        self.fetch_issues();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filter menu
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_filter_menu(&mut self) {
        if matches!(self.modal, ModalState::FilterMenu { .. }) {
            self.modal = ModalState::None;
        } else {
            self.modal = ModalState::FilterMenu {
                category: 0,
                item: 0,
            };
            self.load_filter_options();
        }
    }

    /// Entries offered for a category as `(id, display name)`.
    pub fn menu_entries(&self, category: Category) -> Vec<(u64, String)> {
        match category {
            Category::Author | Category::Assignee => self
                .options
                .users
                .iter()
                .map(|u| (u.id, u.name.clone()))
                .collect(),
            Category::Label => self
                .options
                .labels
                .iter()
                .map(|l| (l.id, l.name.clone()))
                .collect(),
            Category::Milestone => self
                .options
                .milestones
                .iter()
                .map(|m| (m.id, m.title.clone()))
                .collect(),
        }
    }

    fn move_menu_category(&mut self, delta: i32) {
        if let ModalState::FilterMenu { category, item } = &mut self.modal {
            let count = Category::ALL.len() as i32;
            *category = (*category as i32 + delta).rem_euclid(count) as usize;
            *item = 0;
        }
    }

    fn move_menu_item(&mut self, delta: i32) {
        let ModalState::FilterMenu { category, item } = self.modal else {
            return;
        };
        let len = self.menu_entries(Category::ALL[category]).len();
        if len == 0 {
            return;
        }
        let next = (item as i64 + delta as i64).clamp(0, len as i64 - 1) as usize;
        self.modal = ModalState::FilterMenu {
            category,
            item: next,
        };
    }

    fn clamp_menu(&mut self) {
        if let ModalState::FilterMenu { category, item } = self.modal {
            let len = self.menu_entries(Category::ALL[category]).len();
            self.modal = ModalState::FilterMenu {
                category,
                item: item.min(len.saturating_sub(1)),
            };
        }
    }

    fn select_menu_item(&mut self) {
        let ModalState::FilterMenu { category, item } = self.modal else {
            return;
        };
        let category = Category::ALL[category];
        let Some((id, _)) = self.menu_entries(category).get(item).cloned() else {
            return;
        };
        self.filter.toggle(category, id);
        self.cursor = 0;
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockIssueApi;
    use crate::config::{ServerConfig, UiConfig, UserConfig};
    use crate::data::{Comment, LabelRef, UserRef};
    use crate::tui::Message;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                base_url: "http://localhost".to_string(),
                token: None,
            },
            user: UserConfig { id: 5 },
            ui: UiConfig::default(),
        }
    }

    fn issue(id: IssueId, author: UserId, title: &str) -> Issue {
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

    fn app_with(issues: Vec<Issue>) -> App {
        let mut app = App::new(config(), Arc::new(MockIssueApi::new()));
        app.apply_result(RefreshResult::Issues {
            status: IssueStatus::Open,
            issues,
        });
        app
    }

    fn visible_ids(app: &App) -> Vec<IssueId> {
        app.visible_issues().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_search_narrows_without_refetch() {
        let mut app = app_with(vec![issue(1, 5, "Crash"), issue(2, 9, "Typo")]);
        for c in "TYPO".chars() {
            app.update(Message::SearchInput(c));
        }
        assert_eq!(visible_ids(&app), vec![2]);

        app.update(Message::SearchBackspace);
        app.update(Message::SearchBackspace);
        app.update(Message::SearchBackspace);
        app.update(Message::SearchBackspace);
        assert_eq!(visible_ids(&app), vec![1, 2]);
    }

    #[test]
    fn test_created_scope() {
        let mut app = app_with(vec![issue(1, 5, "Crash"), issue(2, 9, "Typo")]);
        app.update(Message::SetScope(Scope::Created));
        assert_eq!(visible_ids(&app), vec![1]);
    }

    fn quiet_api() -> MockIssueApi {
        let mut api = MockIssueApi::new();
        api.expect_fetch_issues().returning(|_| Ok(vec![]));
        api.expect_fetch_comments().returning(|_| Ok(vec![]));
        api
    }

    fn comment_by(author: UserId) -> Comment {
        Comment {
            id: 1,
            author_id: author,
            content: "looked into it".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_comment_batch_from_before_refetch_dropped() {
        let mut app = App::new(config(), Arc::new(quiet_api()));
        app.apply_result(RefreshResult::Issues {
            status: IssueStatus::Open,
            issues: vec![issue(1, 9, "Crash")],
        });
        app.set_scope(Scope::Commented);
        let requested_under = app.comments_generation;

        app.fetch_issues();
        app.apply_result(RefreshResult::Comments {
            generation: requested_under,
            batch: CommentBatch {
                loaded: vec![(1, vec![comment_by(6)])],
                failed: vec![],
            },
        });
        app.apply_result(RefreshResult::Issues {
            status: IssueStatus::Open,
            issues: vec![issue(1, 9, "Crash")],
        });

        assert!(!app.comments.is_loaded(1));
        assert_eq!(app.outcome.pending, vec![1]);
        assert!(visible_ids(&app).is_empty());

        app.apply_result(RefreshResult::Comments {
            generation: app.comments_generation,
            batch: CommentBatch {
                loaded: vec![(1, vec![comment_by(5)])],
                failed: vec![],
            },
        });
        assert!(app.outcome.is_complete());
        assert_eq!(visible_ids(&app), vec![1]);
    }

    #[tokio::test]
    async fn test_spinner_turns_while_waiting_on_comments() {
        let mut app = App::new(config(), Arc::new(quiet_api()));
        app.apply_result(RefreshResult::Issues {
            status: IssueStatus::Open,
            issues: vec![issue(1, 9, "Crash")],
        });
        app.tick_spinner();
        assert_eq!(app.spinner_frame, 0);

        app.set_scope(Scope::Commented);
        assert!(!app.is_loading);
        assert!(app.is_waiting_on_comments());
        app.tick_spinner();
        assert_eq!(app.spinner_frame, 1);
    }

    #[test]
    fn test_stale_tab_response_dropped() {
        let mut app = app_with(vec![issue(1, 5, "Crash")]);
        app.apply_result(RefreshResult::Issues {
            status: IssueStatus::Closed,
            issues: vec![issue(7, 5, "Old")],
        });
        assert_eq!(visible_ids(&app), vec![1]);
    }

    #[test]
    fn test_error_keeps_prior_data() {
        let mut app = app_with(vec![issue(1, 5, "Crash")]);
        app.apply_result(RefreshResult::Error {
            message: "Failed to load issues: boom".to_string(),
            unauthorized: true,
        });
        assert_eq!(visible_ids(&app), vec![1]);
        assert_eq!(app.logged_in, Some(false));
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_select_all_then_deselect() {
        let mut app = app_with(vec![issue(1, 5, "a"), issue(2, 5, "b")]);
        app.update(Message::ToggleSelectAll);
        assert!(app.selected.is_empty(), "ignored outside edit mode");

        app.update(Message::ToggleEditMode);
        app.update(Message::ToggleSelectAll);
        assert_eq!(app.edit.header_text(), "2 Selected");
        assert_eq!(app.edit.select_action_label(), "Deselect All");

        app.update(Message::ToggleSelectAll);
        assert_eq!(app.edit.header_text(), "0 Selected");
        assert!(!app.edit.close_enabled());
    }

    #[test]
    fn test_toggle_selected_follows_cursor() {
        let mut app = app_with(vec![issue(1, 5, "a"), issue(2, 5, "b")]);
        app.update(Message::ToggleEditMode);
        app.update(Message::MoveDown);
        app.update(Message::ToggleSelected);
        assert!(app.is_selected(2));
        app.update(Message::ToggleSelected);
        assert!(!app.is_selected(2));
    }

    #[test]
    fn test_filter_menu_toggles_label() {
        let mut labelled = issue(1, 5, "a");
        labelled.labels.push(LabelRef {
            id: 3,
            name: "bug".to_string(),
            color: "#FF0000".to_string(),
        });
        let mut app = app_with(vec![labelled, issue(2, 5, "b")]);
        app.options.labels.push(crate::data::Label {
            id: 3,
            name: "bug".to_string(),
            description: None,
            color: "#FF0000".to_string(),
        });
        app.options.users.push(UserRef {
            id: 5,
            name: "sue".to_string(),
        });

        app.modal = ModalState::FilterMenu {
            category: 1,
            item: 0,
        };
        assert_eq!(Category::ALL[1], Category::Label);

        app.update(Message::FilterMenuSelect);
        assert_eq!(visible_ids(&app), vec![1]);

        app.update(Message::FilterMenuSelect);
        assert_eq!(visible_ids(&app), vec![1, 2]);
    }

    #[test]
    fn test_cursor_clamped_after_narrowing() {
        let mut app = app_with(vec![issue(1, 5, "a"), issue(2, 9, "b"), issue(3, 9, "c")]);
        app.update(Message::GotoBottom);
        assert_eq!(app.cursor, 2);
        app.update(Message::SearchInput('a'));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.highlighted().map(|i| i.id), Some(1));
    }
}
