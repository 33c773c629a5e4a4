use crate::api::RaceApi;
use crate::config::Config;
use crate::logger::Logger;
use crate::models::{EntityKind, Relations};
use crate::ui::components::status_bar::StatusMessage;
use crate::ui::components::{CarsTable, DialogComponent, Pager, PilotsTable, RacesTable, Severity, StatusBar};
use crate::ui::core::{
    actions::{Action, DialogType},
    event_handler::EventType,
    task_manager::TaskManager,
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Tabs},
    Frame,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const KEY_HINTS: &str =
    "a add • e edit • d delete • v view • n/p page • s size • r reload • Tab switch • ? help • q quit";

/// Root component: owns the three tables, the dialog layer, the relations
/// cache and the status line, and turns actions into background requests.
pub struct AppComponent {
    // Component composition
    pilots: PilotsTable,
    cars: CarsTable,
    races: RacesTable,
    dialog: DialogComponent,
    status: StatusBar,

    // Application state
    active: EntityKind,
    relations: Relations,
    relations_page_size: u32,

    // Services
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(api: Arc<dyn RaceApi>, config: &Config, logger: Logger) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new(api);
        let pager = || Pager::new(config.ui.page_size, config.ui.page_size_options.clone());

        Self {
            pilots: PilotsTable::new(pager()),
            cars: CarsTable::new(pager()),
            races: RacesTable::new(pager()),
            dialog: DialogComponent::new(),
            status: StatusBar::new(config.ui.status_timeout_secs),
            active: config.ui.default_kind(),
            relations: Relations::default(),
            relations_page_size: config.api.relations_page_size,
            task_manager,
            background_action_rx,
            logger,
            should_quit: false,
        }
    }

    /// Initial loads: relation lists and the first page of the active table
    pub fn start(&mut self) {
        self.logger.log(format!(
            "AppComponent: Starting on '{}' tab against {}",
            self.active.collection(),
            self.task_manager.endpoint()
        ));
        self.dispatch(Action::LoadRelations);
        let reload = self.reload_table(self.active);
        self.dispatch(reload);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_kind(&self) -> EntityKind {
        self.active
    }

    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.current()
    }

    pub fn dialog(&self) -> &DialogComponent {
        &self.dialog
    }

    pub fn pilots(&self) -> &PilotsTable {
        &self.pilots
    }

    pub fn cars(&self) -> &CarsTable {
        &self.cars
    }

    pub fn races(&self) -> &RacesTable {
        &self.races
    }

    /// Check if any background operations are running
    pub fn is_busy(&self) -> bool {
        self.task_manager.is_busy()
    }

    fn reload_table(&mut self, kind: EntityKind) -> Action {
        match kind {
            EntityKind::Pilot => self.pilots.reload(),
            EntityKind::Car => self.cars.reload(),
            EntityKind::Race => self.races.reload(),
        }
    }

    fn active_table_key(&mut self, key: KeyEvent) -> Action {
        match self.active {
            EntityKind::Pilot => self.pilots.handle_key_events(key),
            EntityKind::Car => self.cars.handle_key_events(key),
            EntityKind::Race => self.races.handle_key_events(key),
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.logger.log("Global key: Ctrl+C - quitting application".to_string());
            return Action::Quit;
        }

        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('L') => {
                self.dialog.set_logs(self.logger.get_logs());
                Action::ShowDialog(DialogType::Logs)
            }
            KeyCode::Tab => Action::SwitchTab(self.active.next()),
            KeyCode::BackTab => Action::SwitchTab(self.active.previous()),
            KeyCode::Char(c @ '1'..='3') => Action::SwitchTab(EntityKind::from_index(c as usize - '1' as usize)),
            KeyCode::Char('a') => Action::OpenCreate(self.active),
            KeyCode::Char('r') => Action::Refresh,
            _ => self.active_table_key(key),
        }
    }

    /// Handle whatever the components did not consume; returns a follow-up action
    fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                for task in self.task_manager.running() {
                    self.logger.log(format!("Quit: cancelling {}", task));
                }
                self.task_manager.cancel_all_tasks();
                Action::None
            }
            Action::SwitchTab(kind) => {
                if kind == self.active {
                    return Action::None;
                }
                self.logger.log(format!("Navigation: switched to {} tab", kind.collection()));
                self.active = kind;
                self.spawn_relations_load();
                self.reload_table(kind)
            }
            Action::LoadPage { kind, request } => {
                self.logger.log(format!(
                    "Data: loading {} page={} size={}",
                    kind.collection(),
                    request.page,
                    request.size
                ));
                self.task_manager.spawn_page_load(kind, request);
                Action::None
            }
            Action::PageFailed { message, .. } => {
                self.report_error(message);
                Action::None
            }
            Action::Refresh => {
                self.logger.log(format!("Data: refreshing {}", self.active.collection()));
                self.spawn_relations_load();
                self.reload_table(self.active)
            }
            Action::LoadRelations => {
                self.spawn_relations_load();
                Action::None
            }
            Action::RelationsLoaded(relations) => {
                self.logger.log(format!(
                    "Data: relations loaded ({} pilots, {} cars)",
                    relations.pilots.len(),
                    relations.cars.len()
                ));
                self.dialog.set_relations(relations.clone());
                self.relations = relations;
                Action::None
            }
            Action::RelationsFailed(message) => {
                self.report_error(message);
                Action::None
            }
            Action::OpenCreate(kind) => {
                // The dialog opens right away; pickers fill in when the lists arrive
                self.logger.log(format!("Dialog: creating a {}", kind.noun()));
                self.spawn_relations_load();
                Action::ShowDialog(DialogType::Create(kind))
            }
            Action::ViewRecord { kind, id } => {
                self.logger.log(format!("Data: viewing {} {}", kind.noun(), id));
                self.task_manager.spawn_record_load(kind, id);
                Action::None
            }
            Action::RecordLoaded { title, .. } => {
                // Another dialog was opened while the record loaded
                self.logger.log(format!("Data: {} loaded behind an open dialog", title));
                self.status
                    .show(format!("{} loaded; close the dialog and press 'v' to view it", title), Severity::Info);
                Action::None
            }
            Action::Submit { token, id, payload } => {
                self.logger.log(format!(
                    "Record: submitting {} {}",
                    payload.kind().noun(),
                    id.map(|id| format!("#{}", id)).unwrap_or_else(|| "(new)".to_string())
                ));
                self.task_manager.spawn_submit(token, id, payload);
                Action::None
            }
            Action::SubmitSucceeded { kind, message, .. } | Action::DeleteSucceeded { kind, message } => {
                self.logger.log(format!("Record: {}", message));
                self.status.show(message, Severity::Success);
                self.spawn_relations_load();
                self.reload_table(kind)
            }
            Action::SubmitFailed { message, .. } | Action::DeleteFailed { message, .. } => {
                self.report_error(message);
                Action::None
            }
            Action::Delete { kind, id } => {
                self.logger.log(format!("Record: deleting {} {}", kind.noun(), id));
                self.task_manager.spawn_delete(kind, id);
                Action::None
            }
            Action::ShowError(message) => {
                self.report_error(message);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn spawn_relations_load(&mut self) {
        self.task_manager.spawn_relations_load(self.relations_page_size);
    }

    fn report_error(&mut self, message: String) {
        self.logger.log(format!("Error: {}", message));
        self.status.show(message, Severity::Error);
    }

    /// Run an action, and any follow-ups, through the component hierarchy
    pub fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            if matches!(action, Action::None) {
                continue;
            }

            let action = self.dialog.update(action);
            let action = self.pilots.update(action);
            let action = self.cars.update(action);
            let action = self.races.update(action);

            queue.push_back(self.handle_app_action(action));
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        // Clean up first: a finished task already queued its action
        self.task_manager.cleanup_finished_tasks();

        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Periodic work: apply background results and expire the status line
    pub fn tick(&mut self) {
        for action in self.process_background_actions() {
            self.dispatch(action);
        }
        self.status.expire(Instant::now());
    }

    /// Keep ticking until no request is in flight
    pub async fn settle(&mut self) {
        loop {
            self.tick();
            if self.task_manager.task_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) {
        match event_type {
            EventType::Key(key) => {
                let action = self.handle_global_key(key);
                self.dispatch(action);
            }
            EventType::Tick => self.tick(),
            EventType::Resize(_, _) | EventType::Other => {}
        }
    }

    fn render_tabs(&self, f: &mut Frame, rect: Rect) {
        let titles: Vec<Line> = EntityKind::ALL
            .iter()
            .enumerate()
            .map(|(index, kind)| Line::from(format!(" {} {} ", index + 1, kind.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(" 🏁 Pitwall • {} ", self.task_manager.endpoint())),
            )
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .divider("│");

        f.render_widget(tabs, rect);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.handle_global_key(key)
    }

    fn update(&mut self, action: Action) -> Action {
        self.dispatch(action);
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::main_layout(rect);

        self.render_tabs(f, areas[0]);
        match self.active {
            EntityKind::Pilot => self.pilots.render(f, areas[1]),
            EntityKind::Car => self.cars.render(f, areas[1]),
            EntityKind::Race => self.races.render(f, areas[1]),
        }
        self.status.render(f, areas[2], self.is_busy(), KEY_HINTS);

        // Render dialog on top if visible
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }
}
