//! Message enum for Elm Architecture (TEA) pattern.
//!
//! All possible user actions in the application are represented as messages.
//! This enables unidirectional data flow and testable update logic.

use crate::filter::Scope;

/// All possible user actions in the application.
///
/// Messages are dispatched from key events and processed by the `App::update()` method.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Refetch the current tab
    Refresh,
    /// Switch between the Open and Closed tabs
    ToggleStatusTab,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    MoveUp,
    MoveDown,
    GotoTop,
    GotoBottom,

    // ─────────────────────────────────────────────────────────────────────────
    // Issue actions
    // ─────────────────────────────────────────────────────────────────────────
    /// Close the highlighted issue (Open tab) or reopen it (Closed tab)
    ToggleIssueStatus,

    // ─────────────────────────────────────────────────────────────────────────
    // Edit mode
    // ─────────────────────────────────────────────────────────────────────────
    ToggleEditMode,
    /// Select or deselect the highlighted issue
    ToggleSelected,
    /// Select All, or Deselect All when something is selected
    ToggleSelectAll,
    CloseSelected,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Present the search bar and scope tabs
    EnterSearch,
    /// Dismiss search: reset filters and refetch open issues
    ExitSearch,
    /// Stop typing but keep the search results
    ConfirmSearch,
    /// Resume typing into the search bar
    FocusSearch,
    SearchInput(char),
    SearchBackspace,
    SetScope(Scope),
    NextScope,
    PrevScope,

    // ─────────────────────────────────────────────────────────────────────────
    // Filter menu
    // ─────────────────────────────────────────────────────────────────────────
    ToggleFilterMenu,
    /// Move between categories (columns)
    FilterMenuCategory(i32),
    /// Move between entries of the current category
    FilterMenuItem(i32),
    /// Toggle the highlighted entry
    FilterMenuSelect,
    ClearFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    ToggleHelp,
    CloseModal,

    /// No-op message (for unhandled keys)
    None,
}
