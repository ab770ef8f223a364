//! TUI rendering module.
//!
//! - `layout` - Layout calculations and text utilities
//! - `list` - Issue list rendering
//! - `status` - Header, scope tabs, status bar and help
//! - `menus` - Filter menu

pub mod layout;
mod list;
mod menus;
mod status;

pub use self::draw::draw;

mod draw {
    use super::list::draw_issue_list;
    use super::menus::draw_filter_menu;
    use super::status::{draw_header, draw_help_popup, draw_scope_tabs, draw_status_bar};
    use crate::tui::{App, ModalState};
    use ratatui::{
        layout::{Constraint, Direction, Layout},
        Frame,
    };

    /// Main draw function - renders the entire TUI.
    pub fn draw(f: &mut Frame, app: &App) {
        if app.search_active {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Search bar
                    Constraint::Length(1), // Scope tabs
                    Constraint::Min(0),    // Issue list
                    Constraint::Length(1), // Status bar
                ])
                .split(f.area());

            draw_header(f, app, chunks[0]);
            draw_scope_tabs(f, app, chunks[1]);
            draw_issue_list(f, app, chunks[2]);
            draw_status_bar(f, app, chunks[3]);
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Header
                    Constraint::Min(0),    // Issue list
                    Constraint::Length(1), // Status bar
                ])
                .split(f.area());

            draw_header(f, app, chunks[0]);
            draw_issue_list(f, app, chunks[1]);
            draw_status_bar(f, app, chunks[2]);
        }

        match app.modal {
            ModalState::Help => draw_help_popup(f),
            ModalState::FilterMenu { .. } => draw_filter_menu(f, app),
            ModalState::None => {}
        }
    }
}
