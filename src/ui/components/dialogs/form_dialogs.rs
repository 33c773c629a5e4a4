use super::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, create_selection_paragraph, shortcuts,
    InstructionShortcut,
};
use crate::constants::PLACEHOLDER_UNNAMED_PILOT;
use crate::forms::{EntityForm, FieldErrors, FormField};
use crate::models::{EntityId, Relations};
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const PICKER_HEIGHT: u16 = 7;

/// Entries a picker field offers, as `(id, label)`
pub fn picker_options(field: FormField, relations: &Relations) -> Vec<(EntityId, String)> {
    match field {
        FormField::Owner | FormField::Pilots => relations
            .pilots
            .iter()
            .map(|pilot| {
                let name = if pilot.name.trim().is_empty() {
                    PLACEHOLDER_UNNAMED_PILOT.to_string()
                } else {
                    pilot.name.clone()
                };
                (pilot.id, name)
            })
            .collect(),
        FormField::Cars => relations.cars.iter().map(|car| (car.id, car.label())).collect(),
        _ => Vec::new(),
    }
}

/// Comma separated labels of the chosen ids; unknown ids show as `#id`
fn selection_summary(selected: &[EntityId], options: &[(EntityId, String)]) -> String {
    if selected.is_empty() {
        return "None selected".to_string();
    }
    selected
        .iter()
        .map(|id| {
            options
                .iter()
                .find(|(option_id, _)| option_id == id)
                .map(|(_, label)| label.clone())
                .unwrap_or_else(|| format!("#{}", id))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything the form dialog needs to draw itself
pub struct FormView<'a> {
    pub title: &'a str,
    pub form: &'a EntityForm,
    pub focused: usize,
    pub cursor_position: usize,
    pub picker_cursor: usize,
    pub errors: &'a FieldErrors,
    pub relations: &'a Relations,
    pub submitting: bool,
    pub server_error: Option<&'a str>,
}

fn field_height(field: FormField, focused: bool) -> u16 {
    // Input box plus one line for its validation message
    if field.is_text() || !focused {
        4
    } else {
        PICKER_HEIGHT + 1
    }
}

pub fn render_form_dialog(f: &mut Frame, area: Rect, view: &FormView) {
    let fields = view.form.fields();
    let body_height: u16 = fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_height(*field, index == view.focused))
        .sum();
    // Borders, server message and instructions
    let height = body_height + 5;

    let width = LayoutManager::dialog_width_percent(area.width);
    let dialog_area = LayoutManager::centered_rect_lines(width, height, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(view.title, Color::Cyan);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .enumerate()
        .map(|(index, field)| Constraint::Length(field_height(*field, index == view.focused)))
        .collect();
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in fields.iter().enumerate() {
        render_field(f, chunks[index], view, *field, index == view.focused);
    }

    let status_line = if view.submitting {
        Paragraph::new("Saving…").style(Style::default().fg(Color::Yellow))
    } else if let Some(message) = view.server_error {
        Paragraph::new(format!("✗ {}", message)).style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new("")
    };
    f.render_widget(status_line, chunks[fields.len()]);

    let focused_is_picker = fields.get(view.focused).is_some_and(|field| !field.is_text());
    let instructions: Vec<InstructionShortcut> = if focused_is_picker {
        vec![
            shortcuts::ARROWS_MOVE,
            shortcuts::SEPARATOR,
            shortcuts::SPACE_TOGGLE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]
    } else {
        vec![
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]
    };
    f.render_widget(create_instructions_paragraph(&instructions), chunks[fields.len() + 1]);
}

fn render_field(f: &mut Frame, area: Rect, view: &FormView, field: FormField, focused: bool) {
    let error = view.errors.get(&field);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    if let Some(text) = view.form.text(field) {
        let paragraph = create_input_paragraph(text, view.cursor_position, field.label(), focused, error.is_some());
        f.render_widget(paragraph, parts[0]);
    } else {
        let options = picker_options(field, view.relations);
        let selected = view.form.selected_ids(field);
        if focused {
            render_picker(f, parts[0], field, &options, &selected, view.picker_cursor, error.is_some());
        } else {
            let summary = selection_summary(&selected, &options);
            f.render_widget(
                create_selection_paragraph(summary, field.label(), false, error.is_some()),
                parts[0],
            );
        }
    }

    if let Some(message) = error {
        f.render_widget(
            Paragraph::new(Line::from(format!("  {}", message))).style(Style::default().fg(Color::Red)),
            parts[1],
        );
    }
}

fn render_picker(
    f: &mut Frame,
    area: Rect,
    field: FormField,
    options: &[(EntityId, String)],
    selected: &[EntityId],
    cursor: usize,
    has_error: bool,
) {
    let border_color = if has_error { Color::Red } else { Color::Cyan };
    let title = format!(" {} ({} selected) ", field.label(), selected.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .style(Style::default().fg(border_color));

    if options.is_empty() {
        let paragraph = Paragraph::new("Nothing to choose from yet")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = options
        .iter()
        .map(|(id, label)| {
            let mark = if selected.contains(id) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, label)).style(Style::default().fg(Color::White))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(cursor.min(options.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");

    f.render_stateful_widget(list, area, &mut state);
}
