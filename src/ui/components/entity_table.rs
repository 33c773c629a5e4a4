//! Paginated record table shared by the pilots, cars and races tabs.

use crate::constants::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::models::{EntityId, EntityKind, Page, PageRequest};
use crate::ui::core::{
    actions::{Action, DialogType, EditTarget, TablePage},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

/// Page index, page size and page count of one table.
///
/// `page` is zero-based and always stays inside `[0, total_pages)` once the
/// server reported at least one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    size: u32,
    total_pages: u32,
    options: Vec<u32>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS.to_vec())
    }
}

impl Pager {
    pub fn new(size: u32, options: Vec<u32>) -> Self {
        let mut options: Vec<u32> = options.into_iter().filter(|option| *option > 0).collect();
        if options.is_empty() {
            options = DEFAULT_PAGE_SIZE_OPTIONS.to_vec();
        }
        let size = if options.contains(&size) { size } else { options[0] };

        Self {
            page: 0,
            size,
            total_pages: 0,
            options,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn options(&self) -> &[u32] {
        &self.options
    }

    /// Query for the current page
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    fn go_to(&mut self, page: u32) -> Option<PageRequest> {
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.request())
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.page + 1 < self.total_pages {
            self.go_to(self.page + 1)
        } else {
            None
        }
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Option<PageRequest> {
        self.go_to(0)
    }

    pub fn last_page(&mut self) -> Option<PageRequest> {
        self.go_to(self.total_pages.saturating_sub(1))
    }

    /// Switch to `size` and go back to the first page
    pub fn set_size(&mut self, size: u32) -> PageRequest {
        self.size = size;
        self.page = 0;
        self.request()
    }

    /// Move to the next configured page size, wrapping around
    pub fn cycle_size(&mut self) -> PageRequest {
        let index = self.options.iter().position(|option| *option == self.size);
        let next = match index {
            Some(index) => self.options[(index + 1) % self.options.len()],
            None => self.options[0],
        };
        self.set_size(next)
    }

    /// Record the page count of a response.
    ///
    /// Returns a corrected request when the current page no longer exists,
    /// e.g. after the last row of the last page was deleted. With no pages
    /// at all the pager falls back to page 0.
    pub fn set_total_pages(&mut self, total_pages: u32) -> Option<PageRequest> {
        self.total_pages = total_pages;
        if self.page >= total_pages.max(1) {
            self.page = total_pages.saturating_sub(1);
            return Some(self.request());
        }
        None
    }
}

/// A record type that can be shown as a table row.
pub trait TableRecord: Clone {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Column headers with their width constraints
    fn columns() -> Vec<(&'static str, Constraint)>;

    /// One display string per column
    fn cells(&self) -> Vec<String>;

    /// Short name used by the delete confirmation
    fn label(&self) -> String;

    fn edit_target(&self) -> EditTarget;

    /// Unwrap a loaded page if it belongs to this table
    fn from_page(page: TablePage) -> Option<Page<Self>>;
}

/// Table component with row selection and pagination for records of type `T`.
pub struct EntityTable<T: TableRecord> {
    pub rows: Vec<T>,
    pub pager: Pager,
    pub selected_index: usize,
    pub table_state: TableState,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: TableRecord> Default for EntityTable<T> {
    fn default() -> Self {
        Self::new(Pager::default())
    }
}

impl<T: TableRecord> EntityTable<T> {
    pub fn new(pager: Pager) -> Self {
        Self {
            rows: Vec::new(),
            pager,
            selected_index: 0,
            table_state: TableState::default(),
            loading: false,
            error: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.selected_index)
    }

    /// Action re-fetching the current page
    pub fn reload(&mut self) -> Action {
        self.load(self.pager.request())
    }

    fn load(&mut self, request: PageRequest) -> Action {
        self.loading = true;
        Action::LoadPage {
            kind: T::KIND,
            request,
        }
    }

    /// Store a page response; may ask for another page if this one is out of range
    pub fn apply_page(&mut self, request: PageRequest, page: Page<T>) -> Action {
        if request != self.pager.request() {
            // A newer request superseded this one
            return Action::None;
        }

        self.loading = false;
        self.error = None;
        let total_pages = if page.page.total_pages == 0 && !page.content.is_empty() {
            1
        } else {
            page.page.total_pages
        };
        self.rows = page.content;
        self.update_table_state();

        match self.pager.set_total_pages(total_pages) {
            Some(corrected) => self.load(corrected),
            None => Action::None,
        }
    }

    pub fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    fn update_table_state(&mut self) {
        if self.rows.is_empty() {
            self.selected_index = 0;
            self.table_state.select(None);
        } else {
            if self.selected_index >= self.rows.len() {
                self.selected_index = self.rows.len() - 1;
            }
            self.table_state.select(Some(self.selected_index));
        }
    }

    fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.rows.len();
            self.update_table_state();
        }
    }

    fn select_previous(&mut self) {
        if !self.rows.is_empty() {
            self.selected_index = if self.selected_index == 0 {
                self.rows.len() - 1
            } else {
                self.selected_index - 1
            };
            self.update_table_state();
        }
    }

    fn page_action(&mut self, request: Option<PageRequest>) -> Action {
        match request {
            Some(request) => {
                self.selected_index = 0;
                self.load(request)
            }
            None => Action::None,
        }
    }

    fn footer(&self) -> String {
        let total = self.pager.total_pages().max(1);
        let mut footer = format!(
            " Page {} of {} • {} per page ",
            (self.pager.page() + 1).min(total),
            total,
            self.pager.size()
        );
        if self.loading {
            footer.push_str("• loading… ");
        }
        footer
    }
}

impl<T: TableRecord> Component for EntityTable<T> {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_previous();
                Action::None
            }
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                let request = self.pager.next_page();
                self.page_action(request)
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                let request = self.pager.previous_page();
                self.page_action(request)
            }
            KeyCode::Char('g') | KeyCode::Home => {
                let request = self.pager.first_page();
                self.page_action(request)
            }
            KeyCode::Char('G') | KeyCode::End => {
                let request = self.pager.last_page();
                self.page_action(request)
            }
            KeyCode::Char('s') => {
                let request = self.pager.cycle_size();
                self.page_action(Some(request))
            }
            KeyCode::Char('e') | KeyCode::Enter => match self.selected() {
                Some(record) => Action::ShowDialog(DialogType::Edit(record.edit_target())),
                None => Action::None,
            },
            KeyCode::Char('d') | KeyCode::Delete => match self.selected() {
                Some(record) => Action::ShowDialog(DialogType::DeleteConfirmation {
                    kind: T::KIND,
                    id: record.id(),
                    label: record.label(),
                }),
                None => Action::None,
            },
            KeyCode::Char('v') => match self.selected() {
                Some(record) => Action::ViewRecord {
                    kind: T::KIND,
                    id: record.id(),
                },
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::PageLoaded { request, page } if page.kind() == T::KIND => match T::from_page(page) {
                Some(page) => self.apply_page(request, page),
                None => Action::None,
            },
            // Left for the app to show on the status line
            Action::PageFailed { kind, ref message } if kind == T::KIND => {
                self.apply_failure(message.clone());
                action
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", T::KIND.title()))
            .title_bottom(Line::from(self.footer()).alignment(Alignment::Right))
            .style(Style::default().fg(Color::Gray));

        if let Some(error) = &self.error {
            let paragraph = Paragraph::new(format!("{}\n\nPress 'r' to retry.", error))
                .block(block)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, rect);
            return;
        }

        if self.rows.is_empty() {
            let message = if self.loading {
                format!("Loading {}…", T::KIND.collection())
            } else {
                format!("No {} yet. Press 'a' to add one.", T::KIND.collection())
            };
            let paragraph = Paragraph::new(message)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, rect);
            return;
        }

        let columns = T::columns();
        let header = Row::new(columns.iter().map(|(title, _)| {
            Cell::from(*title).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        }))
        .bottom_margin(1);
        let widths: Vec<Constraint> = columns.iter().map(|(_, width)| *width).collect();

        let rows = self
            .rows
            .iter()
            .map(|record| Row::new(record.cells()).style(Style::default().fg(Color::White)));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("› ");

        f.render_stateful_widget(table, rect, &mut self.table_state);
    }
}
