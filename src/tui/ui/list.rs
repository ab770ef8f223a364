//! Issue list rendering.

use super::layout::{
    compute_row_layout, display_width, pad_to_width, scroll_offset, truncate_with_ellipsis,
    RowLayout, PREFIX, SEP,
};
use crate::data::color::{font_color, rgb, FontColor};
use crate::data::{Issue, LabelRef};
use crate::filter::EMPTY_STATE_TEXT;
use crate::tui::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Style of a label chip: the label color as background and a readable
/// foreground picked from its luminance.
pub fn label_chip_style(label: &LabelRef) -> Style {
    let fg = match font_color(&label.color) {
        FontColor::Black => Color::Black,
        FontColor::White => Color::White,
    };
    match rgb(&label.color) {
        Some((r, g, b)) => Style::default().fg(fg).bg(Color::Rgb(r, g, b)),
        None => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}

fn meta_spans(issue: &Issue, width: usize) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut used = 0;

    for label in &issue.labels {
        let chip = format!(" {} ", label.name);
        let chip_width = display_width(&chip) + 1;
        if used + chip_width > width {
            break;
        }
        spans.push(Span::styled(chip, label_chip_style(label)));
        spans.push(Span::raw(" "));
        used += chip_width;
    }

    if let Some(milestone) = &issue.milestone {
        let remaining = width.saturating_sub(used);
        if remaining > 2 {
            spans.push(Span::styled(
                truncate_with_ellipsis(&format!("◆ {}", milestone.title), remaining),
                Style::default().fg(Color::Magenta),
            ));
        }
    }

    spans
}

fn issue_line(app: &App, issue: &Issue, layout: RowLayout, highlighted: bool) -> Line<'static> {
    let sep_style = Style::default().fg(Color::DarkGray);

    let marker = if app.edit.is_editing() {
        if app.is_selected(issue.id) {
            Span::styled("● ", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ ", sep_style)
        }
    } else {
        Span::raw(PREFIX)
    };

    let status_style = if issue.is_open {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Magenta)
    };

    let mut spans = vec![
        marker,
        Span::styled(
            pad_to_width(&format!("#{}", issue.id), layout.id, Alignment::Left),
            status_style,
        ),
        Span::styled(SEP, sep_style),
        Span::styled(
            pad_to_width(
                &truncate_with_ellipsis(&issue.title, layout.title),
                layout.title,
                Alignment::Left,
            ),
            Style::default().fg(Color::White),
        ),
    ];

    if layout.meta > 0 {
        spans.push(Span::styled(SEP, sep_style));
        spans.extend(meta_spans(issue, layout.meta));
    }

    let line = Line::from(spans);
    if highlighted {
        line.style(
            Style::default()
                .bg(Color::Rgb(40, 44, 52))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        line
    }
}

/// Draw the issue list, or the empty state when nothing passes the filters.
pub fn draw_issue_list(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " {} {} ({}) ",
        app.status.label(),
        app.edit.header_text(),
        app.outcome.len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let issues = app.visible_issues();
    if issues.is_empty() {
        let text = if app.is_loading || app.is_waiting_on_comments() {
            format!("{} Loading...", app.spinner_char())
        } else {
            EMPTY_STATE_TEXT.to_string()
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let layout = compute_row_layout(inner.width);
    let height = inner.height as usize;
    let offset = scroll_offset(app.cursor, issues.len(), height);

    let lines: Vec<Line> = issues
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(idx, issue)| issue_line(app, issue, layout, idx == app.cursor))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
