mod common;

use common::{started_app, FakeApi};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pitwall::constants::{ERROR_LOAD_PILOTS, ERROR_LOAD_RELATIONS, SUCCESS_PILOT_CREATED, SUCCESS_PILOT_DELETED};
use pitwall::forms::FormField;
use pitwall::models::{EntityKind, Page, PageMeta, PageRequest, Pilot, PilotSummary};
use pitwall::ui::components::Severity;
use pitwall::ui::core::{Action, DialogType, EventType, TablePage};
use pitwall::ui::AppComponent;
use pitwall::Car;

fn key(code: KeyCode) -> EventType {
    EventType::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(app: &mut AppComponent, code: KeyCode) {
    app.handle_event(key(code));
}

fn type_text(app: &mut AppComponent, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[tokio::test]
async fn test_startup_requests_first_page_and_relations() {
    let api = FakeApi::with_pilots(3);
    let app = started_app(api.clone()).await;

    let calls = api.calls();
    assert!(calls.contains(&"GET /api/pilots?page=0&size=5".to_string()));
    assert!(calls.contains(&"GET /api/pilots?page=0&size=1000".to_string()));
    assert!(calls.contains(&"GET /api/cars?page=0&size=1000".to_string()));

    assert_eq!(app.active_kind(), EntityKind::Pilot);
    assert_eq!(app.pilots().rows.len(), 3);
    assert_eq!(app.relations().pilots.len(), 3);
    assert!(!app.is_busy());
}

#[tokio::test]
async fn test_paging_uses_zero_based_index() {
    let api = FakeApi::with_pilots(12);
    let mut app = started_app(api.clone()).await;
    assert_eq!(app.pilots().pager.total_pages(), 3);

    press(&mut app, KeyCode::Char('n'));
    app.settle().await;
    assert!(api.calls().contains(&"GET /api/pilots?page=1&size=5".to_string()));
    assert_eq!(app.pilots().rows[0].id, 6);

    press(&mut app, KeyCode::Char('G'));
    app.settle().await;
    assert_eq!(app.pilots().pager.page(), 2);
    assert_eq!(app.pilots().rows.len(), 2);

    // Already on the last page: no request
    let before = api.calls().len();
    press(&mut app, KeyCode::Char('n'));
    app.settle().await;
    assert_eq!(api.calls().len(), before);
}

#[tokio::test]
async fn test_page_size_cycle_resets_to_first_page() {
    let api = FakeApi::with_pilots(12);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('n'));
    app.settle().await;
    press(&mut app, KeyCode::Char('s'));
    app.settle().await;

    assert!(api.calls().contains(&"GET /api/pilots?page=0&size=10".to_string()));
    assert_eq!(app.pilots().pager.page(), 0);
    assert_eq!(app.pilots().rows.len(), 10);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let api = FakeApi::with_pilots(3);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('d'));
    assert!(matches!(
        app.dialog().dialog_type,
        Some(DialogType::DeleteConfirmation { kind: EntityKind::Pilot, id: 1, .. })
    ));

    // Cancel: nothing is sent
    press(&mut app, KeyCode::Char('n'));
    app.settle().await;
    assert!(!app.dialog().is_visible());
    assert!(api.calls_starting_with("DELETE").is_empty());

    // Confirm: exactly one DELETE, then the table reloads
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    app.settle().await;

    assert_eq!(api.calls_starting_with("DELETE"), vec!["DELETE /api/pilots/1".to_string()]);
    assert_eq!(app.pilots().rows.len(), 2);
    let status = app.status().unwrap();
    assert_eq!(status.text, SUCCESS_PILOT_DELETED);
    assert_eq!(status.severity, Severity::Success);
}

#[tokio::test]
async fn test_deleting_last_row_of_last_page_moves_back() {
    let api = FakeApi::with_pilots(6);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('n'));
    app.settle().await;
    assert_eq!(app.pilots().rows.len(), 1);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert_eq!(app.pilots().pager.page(), 0);
    assert_eq!(app.pilots().pager.total_pages(), 1);
    assert_eq!(app.pilots().rows.len(), 5);
}

#[tokio::test]
async fn test_delete_failure_shows_server_message() {
    let api = FakeApi::with_pilots(2);
    api.fail_writes_with(409, "Pilot still owns cars");
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    app.settle().await;

    let status = app.status().unwrap();
    assert_eq!(status.severity, Severity::Error);
    assert!(status.text.contains("Pilot still owns cars"));
    assert_eq!(app.pilots().rows.len(), 2);
}

#[tokio::test]
async fn test_invalid_form_does_not_submit() {
    let api = FakeApi::with_pilots(1);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('a'));
    app.settle().await;
    assert_eq!(app.dialog().form_kind(), Some(EntityKind::Pilot));

    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert!(api.calls_starting_with("POST").is_empty());
    let form = app.dialog().form.as_ref().unwrap();
    assert_eq!(form.errors.len(), 3);
}

#[tokio::test]
async fn test_create_pilot_closes_dialog_and_reloads() {
    let api = FakeApi::with_pilots(1);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Oscar");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "24");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "3");
    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert_eq!(api.calls_starting_with("POST"), vec!["POST /api/pilots Oscar".to_string()]);
    assert!(!app.dialog().is_visible());
    assert_eq!(app.status().unwrap().text, SUCCESS_PILOT_CREATED);

    // Re-fetched after the write
    let loads = api.calls_starting_with("GET /api/pilots?page=0&size=5");
    assert_eq!(loads.len(), 2);
}

#[tokio::test]
async fn test_submit_failure_keeps_dialog_open() {
    let api = FakeApi::with_pilots(1);
    api.fail_writes_with(400, "Name already taken");
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Lando");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "25");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "7");
    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert!(app.dialog().is_form_open());
    let form = app.dialog().form.as_ref().unwrap();
    assert_eq!(form.server_error.as_deref(), Some("Name already taken"));
    assert!(!form.submitting);
    assert_eq!(app.status().unwrap().severity, Severity::Error);
}

#[tokio::test]
async fn test_create_car_picks_owner_from_relations() {
    let api = FakeApi::with_pilots(2);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('2'));
    app.settle().await;
    assert_eq!(app.active_kind(), EntityKind::Car);

    press(&mut app, KeyCode::Char('a'));
    app.settle().await;
    type_text(&mut app, "Williams");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "FW47");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "880");
    press(&mut app, KeyCode::Tab);
    // Owner picker: second pilot
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert_eq!(api.calls_starting_with("POST"), vec!["POST /api/cars Williams 2".to_string()]);
}

#[tokio::test]
async fn test_edit_prefills_from_selected_row() {
    let api = FakeApi::with_pilots(0);
    api.cars.lock().unwrap().push(Car {
        id: 5,
        brand: "Alpine".to_string(),
        model: "A525".to_string(),
        power: 870,
        owner: Some(PilotSummary {
            id: 4,
            name: "Pierre".to_string(),
            experience: 9,
        }),
    });
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('2'));
    app.settle().await;
    press(&mut app, KeyCode::Char('e'));

    let form = app.dialog().form.as_ref().unwrap();
    assert_eq!(form.editing_id, Some(5));
    assert_eq!(form.form.selected_ids(FormField::Owner), vec![4]);

    press(&mut app, KeyCode::Enter);
    app.settle().await;
    assert_eq!(api.calls_starting_with("PUT"), vec!["PUT /api/cars/5 Alpine".to_string()]);
}

#[tokio::test]
async fn test_view_fetches_single_record() {
    let api = FakeApi::with_pilots(2);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('v'));
    app.settle().await;

    assert!(api.calls().contains(&"GET /api/pilots/2".to_string()));
    match &app.dialog().dialog_type {
        Some(DialogType::Info { message, .. }) => assert!(message.contains("Pilot 2")),
        other => panic!("expected info dialog, got {:?}", other),
    }

    // Any key closes it
    press(&mut app, KeyCode::Char('x'));
    assert!(!app.dialog().is_visible());
}

#[tokio::test]
async fn test_tab_switch_reloads_relations_and_table() {
    let api = FakeApi::with_pilots(1);
    let mut app = started_app(api.clone()).await;
    let relation_loads = api.calls_starting_with("GET /api/cars?page=0&size=1000").len();

    press(&mut app, KeyCode::Tab);
    app.settle().await;
    assert_eq!(app.active_kind(), EntityKind::Car);
    assert!(api.calls().contains(&"GET /api/cars?page=0&size=5".to_string()));
    assert_eq!(
        api.calls_starting_with("GET /api/cars?page=0&size=1000").len(),
        relation_loads + 1
    );

    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    app.settle().await;
    assert_eq!(app.active_kind(), EntityKind::Race);
    assert!(api.calls().contains(&"GET /api/races?page=0&size=5".to_string()));
}

#[tokio::test]
async fn test_quit_keys() {
    let api = FakeApi::with_pilots(0);
    let mut app = started_app(api.clone()).await;

    // 'q' inside a form is text, not quit
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());

    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_help_and_logs_dialogs() {
    let api = FakeApi::with_pilots(0);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('?'));
    assert!(matches!(app.dialog().dialog_type, Some(DialogType::Help)));
    press(&mut app, KeyCode::Esc);
    assert!(!app.dialog().is_visible());

    press(&mut app, KeyCode::Char('L'));
    assert!(matches!(app.dialog().dialog_type, Some(DialogType::Logs)));
    assert!(!app.dialog().logs.is_empty());
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.dialog().is_visible());
    assert!(!app.should_quit());
}

#[tokio::test]
async fn test_create_race_with_multi_select_pickers() {
    let api = FakeApi::with_pilots(2).with_cars(1);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('3'));
    app.settle().await;
    press(&mut app, KeyCode::Char('a'));
    app.settle().await;
    type_text(&mut app, "Monaco");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "2025");
    press(&mut app, KeyCode::Tab);
    // Pilots picker: both pilots
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Tab);
    // Cars picker: the only car
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert_eq!(
        api.calls_starting_with("POST"),
        vec!["POST /api/races Monaco [1, 2] [1]".to_string()]
    );
    assert!(!app.dialog().is_visible());
}

#[tokio::test]
async fn test_list_failure_shows_resource_message() {
    let api = FakeApi::with_pilots(12);
    let mut app = started_app(api.clone()).await;
    api.fail_reads_with(500, "database offline");

    press(&mut app, KeyCode::Char('n'));
    app.settle().await;

    let error = app.pilots().error.clone().unwrap();
    assert!(error.starts_with(ERROR_LOAD_PILOTS));
    assert!(error.contains("database offline"));
    let status = app.status().unwrap();
    assert_eq!(status.severity, Severity::Error);
    assert!(status.text.starts_with(ERROR_LOAD_PILOTS));
}

#[tokio::test]
async fn test_relations_failure_keeps_previous_lists() {
    let api = FakeApi::with_pilots(3).with_cars(2);
    let mut app = started_app(api.clone()).await;
    let before = app.relations().clone();
    assert_eq!(before.pilots.len(), 3);

    api.fail_reads_with(503, "maintenance");
    app.dispatch(Action::LoadRelations);
    app.settle().await;

    assert_eq!(app.relations(), &before);
    assert!(app.status().unwrap().text.starts_with(ERROR_LOAD_RELATIONS));
}

#[tokio::test]
async fn test_stale_page_response_is_dropped() {
    let api = FakeApi::with_pilots(12);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('n'));
    app.settle().await;
    assert_eq!(app.pilots().rows[0].id, 6);

    // A late answer for page 0 arrives after the user moved on
    let late = Page {
        content: vec![Pilot {
            id: 99,
            name: "Late".to_string(),
            ..Default::default()
        }],
        page: PageMeta {
            total_pages: 1,
            ..Default::default()
        },
    };
    app.dispatch(Action::PageLoaded {
        request: PageRequest::new(0, 5),
        page: TablePage::Pilots(late),
    });

    assert_eq!(app.pilots().pager.page(), 1);
    assert_eq!(app.pilots().pager.total_pages(), 3);
    assert_eq!(app.pilots().rows[0].id, 6);
}

#[tokio::test]
async fn test_late_submit_success_leaves_new_form_open() {
    let api = FakeApi::with_pilots(1);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Oscar");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "24");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "3");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Half typed");
    app.settle().await;

    assert_eq!(api.calls_starting_with("POST").len(), 1);
    assert_eq!(app.status().unwrap().text, SUCCESS_PILOT_CREATED);
    let form = app.dialog().form.as_ref().unwrap();
    assert_eq!(form.form.text(FormField::Name), Some("Half typed"));
    assert_eq!(form.server_error, None);
}

#[tokio::test]
async fn test_viewed_record_does_not_replace_open_form() {
    let api = FakeApi::with_pilots(1);
    let mut app = started_app(api.clone()).await;

    press(&mut app, KeyCode::Char('v'));
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Half typed");
    app.settle().await;

    assert!(api.calls().contains(&"GET /api/pilots/1".to_string()));
    assert!(matches!(app.dialog().dialog_type, Some(DialogType::Create(EntityKind::Pilot))));
    let form = app.dialog().form.as_ref().unwrap();
    assert_eq!(form.form.text(FormField::Name), Some("Half typed"));
    assert_eq!(app.status().unwrap().severity, Severity::Info);
}
