mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{RecordingHost, entries, journal, journaling, rect};
use crossterm::event::{KeyCode, MouseButton};
use term_context_menu::drivers::translate::PointerInput;
use term_context_menu::{ContextMenuPage, ElementId, EventOutcome, TriggerOptions};

fn host() -> RecordingHost {
    RecordingHost::new(80, 40)
        .with_panel("menu-a", 10, 5)
        .with_panel("menu-b", 10, 5)
}

fn id(s: &str) -> ElementId {
    ElementId::new(s)
}

fn two_regions(journal: &common::Journal) -> ContextMenuPage<RecordingHost> {
    let mut page = ContextMenuPage::new();
    page.attach(
        "a",
        rect(0, 0, 20, 20),
        TriggerOptions::new("menu-a"),
        journaling("a", journal),
    );
    page.attach(
        "b",
        rect(20, 0, 20, 20),
        TriggerOptions::new("menu-b"),
        journaling("b", journal),
    );
    page
}

#[test]
fn opening_one_region_closes_the_other_first() {
    let log = journal();
    let page = two_regions(&log);
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(25, 2));
    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));

    assert_eq!(entries(&log), ["b:trigger", "b:close", "a:trigger"]);
    assert_eq!(
        host.markings,
        [
            ("menu-b".to_string(), true),
            ("menu-b".to_string(), false),
            ("menu-a".to_string(), true),
        ]
    );
    assert!(page.is_open(&id("a")));
    assert!(!page.is_open(&id("b")));
    assert_eq!(
        page.registry().get_active(),
        Some((id("menu-a"), id("a")))
    );
}

#[test]
fn escape_closes_exactly_once() {
    let log = journal();
    let page = two_regions(&log);
    let mut host = host();

    page.dispatch_key(&mut host, KeyCode::Esc);
    assert!(entries(&log).is_empty());

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    page.dispatch_key(&mut host, KeyCode::Esc);
    page.dispatch_key(&mut host, KeyCode::Esc);

    assert_eq!(entries(&log), ["a:trigger", "a:close"]);
    assert!(host.marked.is_empty());
    assert!(!page.registry().is_active());
}

#[test]
fn other_keys_leave_the_menu_open() {
    let log = journal();
    let page = two_regions(&log);
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    page.dispatch_key(&mut host, KeyCode::Enter);
    page.dispatch_key(&mut host, KeyCode::Char('x'));

    assert!(page.is_open(&id("a")));
    assert!(host.marked.contains("menu-a"));
}

#[test]
fn right_button_click_on_the_origin_keeps_the_menu_open() {
    let log = journal();
    let page = two_regions(&log);
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    page.dispatch_pointer(&mut host, PointerInput::click(6, 3, MouseButton::Right));
    assert!(page.is_open(&id("a")));

    // same element, wrong button
    page.dispatch_pointer(&mut host, PointerInput::click(6, 3, MouseButton::Left));
    assert!(!page.is_open(&id("a")));
    assert_eq!(entries(&log), ["a:trigger", "a:close"]);
}

#[test]
fn clicks_and_right_clicks_outside_dismiss() {
    let log = journal();
    let page = two_regions(&log);
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    page.dispatch_pointer(&mut host, PointerInput::click(25, 2, MouseButton::Right));
    assert_eq!(page.open_region(), None);

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    let outcome = page.dispatch_pointer(&mut host, PointerInput::context_menu(60, 30));
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(page.open_region(), None);
    assert_eq!(
        entries(&log),
        ["a:trigger", "a:close", "a:trigger", "a:close"]
    );
}

#[test]
fn disabled_region_ignores_right_clicks_and_dismissals() {
    let log = journal();
    let disabled = Rc::new(Cell::new(true));
    let mut page = ContextMenuPage::new();
    let flag = Rc::clone(&disabled);
    page.attach(
        "a",
        rect(0, 0, 20, 20),
        TriggerOptions::new("menu-a"),
        journaling("a", &log).disabled_when(move || flag.get()),
    );
    let mut host = host();

    let outcome = page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(entries(&log).is_empty());
    assert!(host.markings.is_empty());
    assert!(!page.registry().is_active());

    disabled.set(false);
    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    assert!(page.is_open(&id("a")));

    // disabled while open: dismissal listeners stand down
    disabled.set(true);
    page.dispatch_key(&mut host, KeyCode::Esc);
    assert!(page.is_open(&id("a")));
    assert_eq!(entries(&log), ["a:trigger"]);
}

#[test]
fn open_state_changes_are_mirrored() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut page = ContextMenuPage::new();
    page.attach(
        "a",
        rect(0, 0, 20, 20),
        TriggerOptions::new("menu-a"),
        term_context_menu::TriggerCallbacks::new()
            .on_open_state_changed(move |open| sink.borrow_mut().push(open)),
    );
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    page.dispatch_key(&mut host, KeyCode::Esc);

    assert_eq!(*seen.borrow(), [true, false]);
}

#[test]
fn missing_panel_consumes_but_opens_nothing() {
    let log = journal();
    let mut page = two_regions(&log);
    page.attach(
        "ghost",
        rect(40, 0, 20, 20),
        TriggerOptions::new("no-such-panel"),
        journaling("ghost", &log),
    );
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    let outcome = page.dispatch_pointer(&mut host, PointerInput::context_menu(45, 2));

    assert_eq!(outcome, EventOutcome::Consumed);
    assert_eq!(entries(&log), ["a:trigger", "a:close", "ghost:trigger"]);
    assert!(host.marked.is_empty());
    assert_eq!(page.open_region(), None);
    assert!(!page.registry().is_active());
}

#[test]
fn detaching_an_open_region_leaves_its_menu_until_the_next_trigger() {
    let log = journal();
    let mut page = two_regions(&log);
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(5, 2));
    assert!(page.detach(&id("a")));
    assert!(host.marked.contains("menu-a"));
    assert!(page.registry().is_active());

    // no listener left to hear the escape
    page.dispatch_key(&mut host, KeyCode::Esc);
    assert!(host.marked.contains("menu-a"));

    page.dispatch_pointer(&mut host, PointerInput::context_menu(25, 2));
    assert!(!host.marked.contains("menu-a"));
    assert!(host.marked.contains("menu-b"));
    assert_eq!(entries(&log), ["a:trigger", "b:trigger"]);
}

#[test]
fn closing_after_an_item_is_chosen() {
    let log = journal();
    let page = two_regions(&log);
    let mut host = host();

    page.dispatch_pointer(&mut host, PointerInput::context_menu(25, 2));
    page.controller(&id("a")).unwrap().close(&mut host);
    assert!(page.is_open(&id("b")));

    page.controller(&id("b")).unwrap().close(&mut host);
    assert!(!page.is_open(&id("b")));
    assert_eq!(entries(&log), ["b:trigger", "b:close"]);
}
