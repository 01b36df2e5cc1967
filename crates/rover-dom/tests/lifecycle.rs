/// View lifecycle: attach, hydrate from server markup, update, detach
use rover_dom::builder::Builder;
use rover_dom::el;
use rover_dom::node::{AbstractNode, Handler, NodeId, Props};
use rover_dom::platform::{
    find_by_id, import_node, text_content, LiveDocument, Platform, SerialDocument,
};
use rover_dom::reconcile::materialize;
use rover_dom::scheduler::Scheduler;
use rover_dom::view::{Component, LifecycleState, View, ViewConfig, ViewError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Counter {
    clicks: Rc<Cell<u32>>,
    label: String,
    ready: Rc<RefCell<Vec<Option<NodeId>>>>,
}

impl Counter {
    fn new(label: &str) -> Self {
        Self {
            clicks: Rc::new(Cell::new(0)),
            label: label.to_string(),
            ready: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Component for Counter {
    fn render(&self, h: &Builder<'_>) -> AbstractNode {
        let clicks = self.clicks.clone();
        el!(
            h,
            "div",
            Props::new().id("counter").class("counter"),
            el!(h, "span", Props::new().id("count"), format!("{} {}", self.label, self.clicks.get())),
            el!(
                h,
                "button",
                Props::new()
                    .id("inc")
                    .on("click", Handler::new(move |_| clicks.set(clicks.get() + 1))),
                "+"
            )
        )
    }

    fn ready(&mut self, root: Option<NodeId>, _platform: &mut dyn Platform) {
        self.ready.borrow_mut().push(root);
    }
}

fn counter_view(component: Counter) -> View<Counter> {
    View::new(ViewConfig::new("counter"), component).unwrap()
}

#[test]
fn test_reattach_moves_without_rerender() {
    let mut doc = LiveDocument::new();
    let mut scheduler = Scheduler::new();
    let body = doc.body();
    let a = doc.create_element("section");
    let b = doc.create_element("section");
    doc.append_child(body, a).unwrap();
    doc.append_child(body, b).unwrap();

    let view = counter_view(Counter::new("Clicks"));
    view.attach(&mut doc, a, &mut scheduler).unwrap();
    view.attach(&mut doc, b, &mut scheduler).unwrap();

    let root = view.root().unwrap();
    assert!(doc.children(a).is_empty());
    assert_eq!(doc.children(b), &[root]);
    assert_eq!(view.render_count(), 1);
    assert_eq!(view.state(), LifecycleState::Attached);

    // one deferred ready per attach
    assert_eq!(scheduler.run_until_idle(&mut doc), 2);
}

#[test]
fn test_hydrate_adopts_server_markup() {
    let component = Counter::new("Clicks");
    let clicks = component.clicks.clone();
    let ready = component.ready.clone();
    let view = counter_view(component);

    // Server side: render on the serialization backend
    let mut server = SerialDocument::new();
    let node = view.render(&server);
    let server_root = materialize(&mut server, &node).unwrap();
    assert_eq!(
        server.to_html(server_root),
        r#"<div id="counter" class="counter"><span id="count">Clicks 0</span><button id="inc">+</button></div>"#
    );

    // Client side: the same markup arrives as an interactive tree
    let mut client = LiveDocument::new();
    let body = client.body();
    let existing = import_node(&mut client, &server, server_root).unwrap();
    client.append_child(body, existing).unwrap();
    let button = find_by_id(&client, existing, "inc").unwrap();

    let root = view.hydrate(&mut client, existing).unwrap();

    assert_eq!(root, existing);
    assert_eq!(view.state(), LifecycleState::Hydrated);
    assert_eq!(find_by_id(&client, root, "inc"), Some(button));
    assert_eq!(*ready.borrow(), vec![Some(root)]);

    assert_eq!(client.dispatch(button, "click"), 1);
    assert_eq!(clicks.get(), 1);

    view.update(&mut client).unwrap();
    let count = find_by_id(&client, root, "count").unwrap();
    assert_eq!(text_content(&client, count), "Clicks 1");
}

#[test]
fn test_ready_after_detach_sees_no_root() {
    let component = Counter::new("Clicks");
    let ready = component.ready.clone();
    let view = counter_view(component);
    let mut doc = LiveDocument::new();
    let mut scheduler = Scheduler::new();
    let body = doc.body();

    view.attach(&mut doc, body, &mut scheduler).unwrap();
    view.detach(&mut doc).unwrap();
    scheduler.run_until_idle(&mut doc);

    assert_eq!(*ready.borrow(), vec![None]);
    assert_eq!(view.state(), LifecycleState::Detached);
    assert!(doc.children(body).is_empty());
}

#[test]
fn test_ready_after_view_dropped_is_skipped() {
    let component = Counter::new("Clicks");
    let ready = component.ready.clone();
    let mut doc = LiveDocument::new();
    let mut scheduler = Scheduler::new();
    let body = doc.body();

    {
        let view = counter_view(component);
        view.attach(&mut doc, body, &mut scheduler).unwrap();
    }

    assert_eq!(scheduler.run_until_idle(&mut doc), 1);
    assert!(ready.borrow().is_empty());
}

#[test]
fn test_reattach_after_detach_renders_again() {
    let view = counter_view(Counter::new("Clicks"));
    let mut doc = LiveDocument::new();
    let mut scheduler = Scheduler::new();
    let body = doc.body();

    view.attach(&mut doc, body, &mut scheduler).unwrap();
    view.detach(&mut doc).unwrap();
    view.attach(&mut doc, body, &mut scheduler).unwrap();

    assert_eq!(view.render_count(), 2);
    assert_eq!(doc.children(body).len(), 1);
}

#[test]
fn test_focus_kept_across_update() {
    let view = counter_view(Counter::new("Clicks"));
    let mut doc = LiveDocument::new();
    let mut scheduler = Scheduler::new();
    let body = doc.body();
    view.attach(&mut doc, body, &mut scheduler).unwrap();

    let button = doc.get_element_by_id("inc").unwrap();
    rover_dom::platform::add_class(&mut doc, button, "focused").unwrap();
    doc.focus(button).unwrap();

    view.with_component(|c| c.label = "Total".to_string());
    view.update(&mut doc).unwrap();

    assert_eq!(doc.focused(), Some(button));
    assert_eq!(doc.attribute(button, "class"), Some("focused"));
    let count = doc.get_element_by_id("count").unwrap();
    assert_eq!(text_content(&doc, count), "Total 0");
}

#[test]
fn test_missing_id_is_configuration_error() {
    let result = View::new(ViewConfig::default(), Counter::new("Clicks"));
    assert!(matches!(result, Err(ViewError::MissingId)));
}

#[test]
fn test_custom_focus_class_restored_after_blur() {
    let view = View::new(
        ViewConfig::new("counter").with_focus_class("is-active"),
        Counter::new("Clicks"),
    )
    .unwrap();
    let mut doc = LiveDocument::new();
    let mut scheduler = Scheduler::new();
    let body = doc.body();
    view.attach(&mut doc, body, &mut scheduler).unwrap();

    let button = doc.get_element_by_id("inc").unwrap();
    rover_dom::platform::add_class(&mut doc, button, "is-active").unwrap();
    doc.blur();

    view.update(&mut doc).unwrap();

    assert_eq!(doc.focused(), Some(button));
    assert_eq!(doc.attribute(button, "class"), Some("is-active"));
}
