//! Filter menu rendering.

use super::layout::{fit_lines_to_area, popup_rect, truncate_with_ellipsis};
use crate::filter::Category;
use crate::tui::{App, ModalState};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Most entries listed per category before the list is cut
const MAX_MENU_ENTRIES: usize = 15;

pub fn draw_filter_menu(f: &mut Frame, app: &App) {
    let ModalState::FilterMenu { category, item } = app.modal else {
        return;
    };

    let area = popup_rect(55, 70, 42, 16, f.area());
    f.render_widget(Clear, area);

    let active_style = Style::default().fg(Color::White);
    let dim_style = Style::default().fg(Color::DarkGray);
    let tab_active = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    // Category tabs
    let mut tabs = vec![Span::raw(" ")];
    for (idx, cat) in Category::ALL.iter().enumerate() {
        let selected = app.filter.selection.get(*cat).is_some();
        let label = if selected {
            format!(" {}* ", cat.title())
        } else {
            format!(" {} ", cat.title())
        };
        tabs.push(Span::styled(
            label,
            if idx == category { tab_active } else { dim_style },
        ));
    }

    let mut lines = vec![Line::from(tabs), Line::from("")];

    let current = Category::ALL[category];
    let entries = app.menu_entries(current);
    let chosen = app.filter.selection.get(current);
    let width = area.width.saturating_sub(10) as usize;

    if entries.is_empty() {
        lines.push(Line::from(Span::styled("  Loading...", dim_style)));
    }

    let start = item.saturating_sub(MAX_MENU_ENTRIES - 1);
    for (idx, (id, name)) in entries
        .iter()
        .enumerate()
        .skip(start)
        .take(MAX_MENU_ENTRIES)
    {
        let is_chosen = chosen == Some(*id);
        let marker = if is_chosen { "●" } else { "○" };
        let cursor = if idx == item { "▸" } else { " " };
        let text_style = if idx == item {
            active_style.add_modifier(Modifier::BOLD)
        } else if is_chosen {
            active_style
        } else {
            dim_style
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", cursor), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} ", marker),
                if is_chosen {
                    Style::default().fg(Color::Green)
                } else {
                    dim_style
                },
            ),
            Span::styled(truncate_with_ellipsis(name, width), text_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  h/l: category | j/k: move | Enter: toggle | c: clear | Esc: close",
        dim_style,
    )));

    let block = Block::default()
        .title(" Filter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}
