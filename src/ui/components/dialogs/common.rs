use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block<'a>(title: &'a str, theme_color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color))
}

fn field_block(field_title: &str, focused: bool, has_error: bool) -> Block<'static> {
    let border_color = if has_error {
        Color::Red
    } else if focused {
        Color::Cyan
    } else {
        Color::Gray
    };

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color))
}

/// Creates an input field block; the focused field shows a visual cursor
pub fn create_input_paragraph(
    input_buffer: &str,
    cursor_position: usize,
    field_title: &str,
    focused: bool,
    has_error: bool,
) -> Paragraph<'static> {
    let input_display = if focused {
        let byte_pos: usize = input_buffer
            .chars()
            .take(cursor_position)
            .map(|ch| ch.len_utf8())
            .sum();
        let (before, after) = input_buffer.split_at(byte_pos);
        format!("{}█{}", before, after)
    } else {
        input_buffer.to_string()
    };

    Paragraph::new(input_display)
        .block(field_block(field_title, focused, has_error))
        .style(Style::default().fg(Color::White))
}

/// Creates a selection field block (read-only display with title)
pub fn create_selection_paragraph(value: String, field_title: &str, focused: bool, has_error: bool) -> Paragraph<'static> {
    Paragraph::new(value)
        .block(field_block(field_title, focused, has_error))
        .style(Style::default().fg(Color::White))
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (key, color, desc) in instructions {
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Common instruction shortcuts used across dialogs
pub mod shortcuts {
    use super::*;

    pub const SEPARATOR: InstructionShortcut = (" • ", Color::Gray, "");
    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, " Cancel");
    pub const ENTER_SAVE: InstructionShortcut = ("Enter", Color::Green, " Save");
    pub const TAB_NEXT: InstructionShortcut = ("Tab", Color::Cyan, " Next field");
    pub const SPACE_TOGGLE: InstructionShortcut = ("Space", Color::Cyan, " Toggle");
    pub const ARROWS_MOVE: InstructionShortcut = ("↑/↓", Color::Cyan, " Move");
}
