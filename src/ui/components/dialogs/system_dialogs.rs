use super::scroll_behavior::ScrollState;
use crate::constants::DIALOG_TITLE_DEBUG_LOGS;
use crate::models::EntityKind;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
    Frame,
};

const HELP_TEXT: &str = r"
PITWALL - Race Server Admin Console
===================================

TABS
----
Tab / Shift+Tab   Next / previous tab
1 / 2 / 3         Pilots / Cars / Races

TABLE
-----
j/k  ↓/↑          Select row
n/p  →/←          Next / previous page
g / G             First / last page
s                 Cycle page size (resets to the first page)
v                 View selected record
e / Enter         Edit selected record
d                 Delete selected record (asks for confirmation)

RECORDS
-------
a                 Add a record to the active tab
r                 Reload the table and the pilot/car lists

DIALOGS
-------
Tab / Shift+Tab   Next / previous field
Space             Toggle the highlighted entry of a picker
Enter             Save (or confirm a delete)
Esc               Close without saving

GENERAL
-------
?                 Toggle this help
L                 Show logs
q / Ctrl+C        Quit

SCROLLING (help, logs, info)
----------------------------
j/k  ↑/↓          Scroll by a line
PageUp/PageDown   Scroll by a page
Home / End        Jump to top / bottom

Press 'Esc' or '?' to close this help
";

pub fn render_delete_confirmation_dialog(f: &mut Frame, area: Rect, kind: EntityKind, label: &str) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 7, area);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" ⚠ Delete {} ", kind.noun()))
        .style(Style::default().fg(Color::Red));

    let message = Line::from(vec![
        Span::styled("Delete ", Style::default().fg(Color::White)),
        Span::styled(
            label.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("? This cannot be undone.", Style::default().fg(Color::White)),
    ]);
    let message_paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let instructions = Line::from(vec![
        Span::styled("Enter/y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(" Delete", Style::default().fg(Color::Gray)),
        Span::styled(" • ", Style::default().fg(Color::Gray)),
        Span::styled("Esc/n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(" Cancel", Style::default().fg(Color::Gray)),
    ]);
    let instructions_paragraph = Paragraph::new(instructions).alignment(Alignment::Center);

    let inner = block.inner(dialog_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    f.render_widget(block, dialog_area);
    f.render_widget(message_paragraph, chunks[0]);
    f.render_widget(instructions_paragraph, chunks[1]);
}

pub fn render_info_dialog(f: &mut Frame, area: Rect, title: &str, message: &str, scroll: &mut ScrollState) {
    let height = (message.lines().count() as u16).saturating_add(5).clamp(8, 24);
    let dialog_area = LayoutManager::centered_rect_lines(60, height, area);
    render_message_dialog(
        f,
        dialog_area,
        &format!(" ℹ {} ", title),
        Color::Blue,
        message,
        "Press any key to continue • j/k to scroll",
        scroll,
    );
}

fn render_message_dialog(
    f: &mut Frame,
    dialog_area: Rect,
    title: &str,
    color: Color,
    message: &str,
    instructions: &str,
    scroll: &mut ScrollState,
) {
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.to_string())
        .style(Style::default().fg(color));

    let content_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + 1,
        dialog_area.width.saturating_sub(2),
        dialog_area.height.saturating_sub(4),
    );

    let instructions_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + dialog_area.height.saturating_sub(2),
        dialog_area.width.saturating_sub(2),
        1,
    );

    f.render_widget(block, dialog_area);
    render_scrollable_lines(f, content_area, message, scroll, None);
    f.render_widget(
        Paragraph::new(instructions.to_string())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        instructions_area,
    );
}

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll: &mut ScrollState) {
    let help_area = LayoutManager::centered_rect(90, 90, area);
    render_full_text(f, help_area, "📖 Help - Press 'Esc' or '?' to close", HELP_TEXT, scroll);
}

pub fn render_logs_dialog(f: &mut Frame, area: Rect, logs: &[String], scroll: &mut ScrollState) {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    let logs_content = if logs.is_empty() {
        "No logs yet".to_string()
    } else {
        logs.join("\n")
    };
    render_full_text(f, logs_area, DIALOG_TITLE_DEBUG_LOGS, &logs_content, scroll);
}

fn render_full_text(f: &mut Frame, outer: Rect, title: &str, text: &str, scroll: &mut ScrollState) {
    f.render_widget(Clear, outer);

    let margin_x = 2;
    let margin_y = 1;
    let content_area = Rect::new(
        outer.x + margin_x,
        outer.y + margin_y,
        outer.width.saturating_sub(margin_x * 2),
        outer.height.saturating_sub(margin_y * 2),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_alignment(Alignment::Center);
    let inner = block.inner(content_area);
    f.render_widget(block, content_area);

    render_scrollable_lines(f, inner, text, scroll, Some(content_area));
}

/// Draw the visible window of `text`, with a scrollbar when it overflows
fn render_scrollable_lines(
    f: &mut Frame,
    area: Rect,
    text: &str,
    scroll: &mut ScrollState,
    scrollbar_area: Option<Rect>,
) {
    let lines: Vec<&str> = text.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height as usize;
    let offset = scroll.clamp(total_lines, visible_height);

    let visible = lines
        .iter()
        .skip(offset)
        .take(visible_height)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let paragraph = Paragraph::new(visible)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);

    if total_lines > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("▐")
            .style(Style::default().fg(Color::Gray))
            .thumb_style(Style::default().fg(Color::White));

        f.render_stateful_widget(scrollbar, scrollbar_area.unwrap_or(area), &mut scroll.scrollbar);
    }
}
