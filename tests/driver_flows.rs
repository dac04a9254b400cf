//! End-to-end flows through the driver and the in-memory store.

use confview::app::{Action, STILL_LOADING};
use confview::history::{HistoryList, HistoryStore};
use confview::runtime::Driver;
use confview::store::MemoryStore;
use confview::ui::{DialogDecision, DialogSpec, RecordingSurface, Template, ToolbarButton, ToolbarMode};
use confview::{initialize, Config, Entity};
use serde_json::json;

type TestDriver = Driver<MemoryStore, RecordingSurface>;

fn entity(id: &str, name: &str) -> Entity {
    Entity::new(id, "ViewDefinition", name, json!({"columns": ["a", "b"]}))
}

fn driver_with(config: &Config, entities: Vec<Entity>) -> TestDriver {
    let view = initialize(config).unwrap();
    Driver::new(view, MemoryStore::with_entities(entities), RecordingSurface::new())
}

fn driver(entities: Vec<Entity>) -> TestDriver {
    driver_with(&Config::default(), entities)
}

fn newest_dialog(driver: &TestDriver) -> confview::store::Ticket {
    *driver.open_dialogs().keys().next_back().unwrap()
}

fn last_render(actions: &[Action]) -> Option<(&Template, &serde_json::Value)> {
    actions.iter().rev().find_map(|a| match a {
        Action::Render { template, data } => Some((template, data)),
        _ => None,
    })
}

#[test]
fn create_lands_on_the_new_entity() {
    let mut driver = driver(vec![entity("41", "Existing")]);
    driver.navigate("configs/name:X").unwrap();
    driver.press(ToolbarButton::New).unwrap();
    let dialog = newest_dialog(&driver);

    driver
        .resolve_dialog(
            dialog,
            DialogDecision::with_fields([("name", "X"), ("xml", "<YieldCurveDefinition/>")]),
        )
        .unwrap();

    let log = driver.drain_log();
    assert!(log.contains(&Action::CloseDialog { dialog }));
    assert!(log.contains(&Action::Navigate {
        path: "configs/42/new:/name:X".into()
    }));
    assert_eq!(driver.location(), Some("configs/42/name:X"));
    assert!(driver.open_dialogs().is_empty());

    let shown = driver.view().displayed().unwrap();
    assert_eq!(shown.id, "42");
    assert_eq!(shown.kind, "YieldCurveDefinition");

    let history = driver.view().history();
    assert!(history.contains(&HistoryList::New.key("configs"), "configs/42/name:X"));
    assert!(history.contains(&HistoryList::Recent.key("configs"), "configs/42/name:X"));
}

#[test]
fn blank_name_keeps_the_create_dialog_open() {
    let mut driver = driver(vec![]);
    driver.navigate("configs").unwrap();
    driver.press(ToolbarButton::New).unwrap();
    let dialog = newest_dialog(&driver);

    driver
        .resolve_dialog(dialog, DialogDecision::with_fields([("name", " "), ("xml", "<a/>")]))
        .unwrap();

    let log = driver.drain_log();
    assert!(log.contains(&Action::ShowDialogError {
        dialog,
        message: "name is required".into()
    }));
    assert!(driver.open_dialogs().contains_key(&dialog));
    assert_eq!(driver.location(), Some("configs"));

    driver
        .resolve_dialog(dialog, DialogDecision::with_fields([("name", "Named"), ("xml", "<a/>")]))
        .unwrap();
    assert_eq!(driver.location(), Some("configs/1"));
}

#[test]
fn locked_delete_shows_error_dialog_and_stays() {
    let mut driver = driver(vec![entity("7", "Locked view")]);
    driver.store_mut().lock("7");
    driver.navigate("configs/7").unwrap();
    driver.press(ToolbarButton::Delete).unwrap();
    let confirm = newest_dialog(&driver);
    driver.resolve_dialog(confirm, DialogDecision::confirmed()).unwrap();

    assert_eq!(driver.location(), Some("configs/7"));
    assert!(driver.store().get("7").is_some());
    let error = newest_dialog(&driver);
    assert_ne!(error, confirm);
    assert_eq!(
        driver.open_dialogs().get(&error),
        Some(&DialogSpec::Error {
            message: "locked".into()
        })
    );

    driver.resolve_dialog(error, DialogDecision::confirmed()).unwrap();
    assert!(driver.open_dialogs().is_empty());
    assert_eq!(driver.view().displayed().map(|e| e.id.as_str()), Some("7"));
}

#[test]
fn delete_returns_to_the_list() {
    let mut driver = driver(vec![entity("7", "view"), entity("8", "other view")]);
    driver.navigate("configs/7/name:view").unwrap();
    driver.press(ToolbarButton::Delete).unwrap();
    let dialog = newest_dialog(&driver);
    driver.resolve_dialog(dialog, DialogDecision::confirmed()).unwrap();

    assert_eq!(driver.location(), Some("configs/name:view"));
    assert!(driver.store().get("7").is_none());
    assert!(driver.view().displayed().is_none());
    assert_eq!(driver.view().toolbar(), Some(ToolbarMode::NoSelection));

    let log = driver.drain_log();
    assert_eq!(last_render(&log).map(|(t, _)| *t), Some(Template::DefaultPage));
    let last_rows = log.iter().rev().find_map(|a| match a {
        Action::ReplaceList { rows } => Some(rows.len()),
        _ => None,
    });
    assert_eq!(last_rows, Some(1));
}

#[test]
fn out_of_order_replies_show_the_latest_entity() {
    let mut driver = driver(vec![entity("1", "first"), entity("2", "second")]).deferred();
    driver.navigate("configs/1").unwrap();
    let first_get = *driver.pending_tickets().last().unwrap();
    driver.navigate("configs/2").unwrap();
    let second_get = *driver.pending_tickets().last().unwrap();

    assert!(driver.release(second_get).unwrap());
    assert!(driver.release(first_get).unwrap());
    driver.release_all().unwrap();

    assert_eq!(driver.view().displayed().map(|e| e.id.as_str()), Some("2"));
    let renders = driver
        .drain_log()
        .into_iter()
        .filter(|a| matches!(a, Action::Render { template: Template::Detail, .. }))
        .count();
    assert_eq!(renders, 1);
}

#[test]
fn slow_load_escalates_then_clears() {
    let mut driver = driver(vec![entity("1", "slow")]).deferred();
    driver.navigate("configs/1").unwrap();
    assert_eq!(driver.message(), Some("loading..."));

    assert_eq!(driver.fire_timers().unwrap(), 1);
    assert_eq!(driver.message(), Some(STILL_LOADING));

    driver.release_all().unwrap();
    assert_eq!(driver.message(), None);
    assert!(driver.armed_timers().is_empty());
}

#[test]
fn fast_load_never_escalates() {
    let mut driver = driver(vec![entity("1", "fast")]).deferred();
    driver.navigate("configs/1").unwrap();
    driver.release_all().unwrap();
    assert_eq!(driver.fire_timers().unwrap(), 0);

    let escalated = driver.drain_log().into_iter().any(|a| {
        matches!(a, Action::ShowMessage { text } if text == STILL_LOADING)
    });
    assert!(!escalated);
}

#[test]
fn edit_affordance_rerenders_editable() {
    let mut driver = driver(vec![entity("1", "editable")]);
    driver.navigate("configs/1/type:ViewDefinition").unwrap();
    driver.drain_log();

    driver.request_edit().unwrap();
    assert_eq!(driver.location(), Some("configs/1/type:ViewDefinition"));
    let log = driver.drain_log();
    assert!(log.contains(&Action::Navigate {
        path: "configs/1/edit:/type:ViewDefinition".into()
    }));
    let (template, data) = last_render(&log).unwrap();
    assert_eq!(*template, Template::Detail);
    assert_eq!(data["editable"], true);
    assert_eq!(data["configData"], "{\n    \"columns\": [\n        \"a\",\n        \"b\"\n    ]\n}");
}

#[test]
fn favorites_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        history_path: Some(dir.path().join("history.json")),
        ..Config::default()
    };

    {
        let mut driver = driver_with(&config, vec![entity("1", "kept")]);
        driver.navigate("configs/1").unwrap();
        driver.press(ToolbarButton::Favorites).unwrap();
    }

    let mut driver = driver_with(&config, vec![entity("1", "kept")]);
    driver.navigate("configs").unwrap();
    let log = driver.drain_log();
    let (template, data) = last_render(&log).unwrap();
    assert_eq!(*template, Template::DefaultPage);
    assert_eq!(data["favorites_list"], "kept <configs/1>");
    assert_eq!(data["recent_list"], "kept <configs/1>");
    assert_eq!(data["new_list"], "no new configs");
}

#[test]
fn custom_page_name_prefixes_every_route() {
    let config = Config {
        page_name: "curves".into(),
        ..Config::default()
    };
    let mut driver = driver_with(&config, vec![entity("3", "curve")]);
    driver.navigate("curves/3").unwrap();
    assert!(driver.view().displayed().is_some());

    driver.press(ToolbarButton::Up).unwrap();
    assert_eq!(driver.location(), Some("curves"));
    assert!(driver.drain_log().contains(&Action::SetTab { page: "curves".into() }));
}

#[test]
fn reply_for_a_replaced_route_is_not_rendered() {
    let mut driver = driver(vec![entity("1", "one"), entity("5", "five")]).deferred();
    driver.navigate("configs/1/name:x").unwrap();
    driver.navigate("configs/5/new:/name:y").unwrap();
    driver.release_all().unwrap();

    assert_eq!(driver.location(), Some("configs/5/new:/name:y"));
    assert!(driver.view().displayed().is_none());
    assert!(driver.armed_timers().is_empty());
    assert!(!driver
        .drain_log()
        .iter()
        .any(|a| matches!(a, Action::Render { template: Template::Detail, .. })));
}
