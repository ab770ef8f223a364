//! Header, scope tabs, status bar and help popup.

use super::layout::{fit_lines_to_area, popup_rect, truncate_with_ellipsis};
use crate::filter::Scope;
use crate::tui::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Keyboard shortcuts for the help popup.
pub fn keyboard_shortcuts() -> Vec<&'static str> {
    vec![
        "",
        "  Navigation",
        "  ──────────",
        "  j/k, ↑/↓     Move up/down",
        "  gg           Go to top",
        "  G            Go to bottom",
        "  Tab          Switch Open/Closed",
        "",
        "  Search",
        "  ──────",
        "  /            Search titles",
        "  Tab          Next scope (while typing)",
        "  1-4, [ ]     Pick scope",
        "  Enter        Keep results",
        "  Esc          Dismiss search and reset filters",
        "",
        "  Actions",
        "  ───────",
        "  x            Close / reopen issue",
        "  f            Filter menu",
        "  r            Refresh",
        "",
        "  Edit mode",
        "  ─────────",
        "  e            Toggle edit mode",
        "  Space        Select issue",
        "  a            Select All / Deselect All",
        "  c            Close selected",
        "",
    ]
}

/// Draw the top bar: app name, tab, login state and spinner, or the search bar.
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = if app.search_active {
        let cursor = if app.search_typing { "█" } else { "" };
        let style = if app.search_typing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}{}", app.filter.search_text, cursor), style),
        ])
    } else {
        let login = match app.logged_in {
            Some(true) => Span::styled(" ● online ", Style::default().fg(Color::Green)),
            Some(false) => Span::styled(" ○ logged out ", Style::default().fg(Color::Red)),
            None => Span::styled(" … ", Style::default().fg(Color::DarkGray)),
        };
        let filtered = if app.filter.is_narrowing() {
            Span::styled(" ▼ filtered ", Style::default().fg(Color::Magenta))
        } else {
            Span::raw("")
        };
        let spinner = if app.is_loading {
            format!(" {}", app.spinner_char())
        } else {
            String::new()
        };
        Line::from(vec![
            Span::styled(
                " issuedeck ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", app.status.label()),
                Style::default().fg(Color::White),
            ),
            login,
            filtered,
            Span::styled(spinner, Style::default().fg(Color::Yellow)),
        ])
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the scope tabs shown under the search bar.
pub fn draw_scope_tabs(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    for (i, scope) in Scope::ALL.iter().enumerate() {
        let is_active = app.filter.scope == Some(*scope);
        let style = if is_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, scope.title()), style));
        if i + 1 < Scope::ALL.len() {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
    }

    if app.is_waiting_on_comments() {
        spans.push(Span::styled(
            format!("  {} loading comments", app.spinner_char()),
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar at the bottom of the screen.
pub fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let status = if let Some(err) = &app.error_message {
        Span::styled(
            truncate_with_ellipsis(&format!(" {}", err), width),
            Style::default().fg(Color::Red),
        )
    } else if app.search_typing {
        let text = if width >= 55 {
            " Type to search | Tab: scope | Enter: confirm | Esc: dismiss "
        } else {
            " Enter:confirm Esc:dismiss "
        };
        Span::styled(text, Style::default().fg(Color::Yellow))
    } else if app.edit.is_editing() {
        let action = app.edit.select_action_label();
        let close = if app.edit.close_enabled() {
            "c: Close selected"
        } else {
            "c: (nothing selected)"
        };
        let text = if width >= 60 {
            format!(" Space: select | a: {} | {} | e: done ", action, close)
        } else {
            format!(" a: {} | e: done ", action)
        };
        Span::styled(text, Style::default().fg(Color::Magenta))
    } else {
        let text = if width >= 90 {
            " j/k: nav | Tab: open/closed | x: close/reopen | /: search | f: filter | e: edit | ?: help "
        } else if width >= 50 {
            " j/k Tab x / f e ? "
        } else {
            " ? help "
        };
        Span::styled(text, Style::default().fg(Color::DarkGray))
    };

    f.render_widget(Paragraph::new(Line::from(status)), area);
}

pub fn draw_help_popup(f: &mut Frame) {
    let area = popup_rect(60, 80, 40, 12, f.area());
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = keyboard_shortcuts().into_iter().map(Line::from).collect();
    lines.push(Line::from(Span::styled(
        "  Esc: Close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}
