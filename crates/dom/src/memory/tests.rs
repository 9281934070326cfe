use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{ComponentEvent, ComponentEventKind, Element};

fn tree() -> (MemoryDocument, Node, Node, Node) {
	let doc = MemoryDocument::new();
	let outer = doc.create_element("div");
	let inner = doc.create_element("span");
	let sibling = doc.create_element("p");
	outer.append_child(&inner);
	doc.body().append_child(&outer);
	doc.body().append_child(&sibling);
	(doc, outer, inner, sibling)
}

#[test]
fn descendants_are_in_document_order() {
	let (doc, outer, inner, sibling) = tree();
	let body = doc.body();
	assert_eq!(doc.root().descendants(), vec![body, outer, inner, sibling]);
}

#[test]
fn elements_by_class_skips_detached_nodes() {
	let (doc, outer, _, sibling) = tree();
	outer.add_class("x-foo");
	sibling.add_class("x-foo");
	let detached = doc.create_element("div");
	detached.add_class("x-foo");

	assert_eq!(doc.elements_by_class("x-foo"), vec![outer, sibling]);
}

#[test]
fn append_child_moves_between_parents() {
	let (_, outer, inner, sibling) = tree();
	sibling.append_child(&inner);

	assert!(outer.children().is_empty());
	assert_eq!(inner.parent(), Some(sibling.clone()));
	assert!(sibling.contains(&inner));
	assert!(!outer.contains(&inner));
}

#[test]
fn classes_are_a_set() {
	let doc = MemoryDocument::new();
	let el = doc.create_element("button");
	el.add_class("a");
	el.add_class("b");
	el.add_class("a");
	assert_eq!(el.class_list(), vec!["a".to_string(), "b".to_string()]);
	assert!(el.remove_class("a"));
	assert!(!el.remove_class("a"));
	assert_eq!(format!("{el:?}"), "<button class=\"b\">");
}

#[test]
fn bubbling_reaches_ancestors_in_order() {
	let (doc, outer, inner, _) = tree();
	let seen = Rc::new(RefCell::new(Vec::new()));
	for node in [inner.clone(), outer.clone(), doc.body()] {
		let seen = seen.clone();
		node.add_listener("ping", move |event| {
			seen.borrow_mut().push((event.current_target().map(|n| n.tag().to_string()), event.target().tag().to_string()));
		});
	}

	assert!(inner.dispatch(EventInit::new("ping").bubbles(true)));
	assert_eq!(
		*seen.borrow(),
		vec![
			(Some("span".to_string()), "span".to_string()),
			(Some("div".to_string()), "span".to_string()),
			(Some("body".to_string()), "span".to_string()),
		]
	);
}

#[test]
fn non_bubbling_event_stays_on_target() {
	let (_, outer, inner, _) = tree();
	let hits = Rc::new(RefCell::new(0));
	let counter = hits.clone();
	outer.add_listener("ping", move |_| *counter.borrow_mut() += 1);

	inner.dispatch(EventInit::new("ping"));
	assert_eq!(*hits.borrow(), 0);
}

#[test]
fn prevent_default_only_applies_to_cancelable_events() {
	let (_, outer, inner, _) = tree();
	outer.add_listener("veto", |event| event.prevent_default());

	assert!(inner.dispatch(EventInit::new("veto").bubbles(true)));
	assert!(!inner.dispatch(EventInit::new("veto").bubbles(true).cancelable(true)));
}

#[test]
fn stop_propagation_halts_bubbling() {
	let (_, outer, inner, _) = tree();
	let hits = Rc::new(RefCell::new(0));
	inner.add_listener("ping", |event| event.stop_propagation());
	let counter = hits.clone();
	outer.add_listener("ping", move |_| *counter.borrow_mut() += 1);

	inner.dispatch(EventInit::new("ping").bubbles(true));
	assert_eq!(*hits.borrow(), 0);
}

#[test]
fn removed_listener_does_not_fire() {
	let doc = MemoryDocument::new();
	let el = doc.create_element("div");
	let hits = Rc::new(RefCell::new(0));
	let counter = hits.clone();
	let id = el.add_listener("click", move |_| *counter.borrow_mut() += 1);
	el.dispatch(EventInit::new("click"));

	assert!(el.remove_listener(id));
	assert!(!el.remove_listener(id));
	el.dispatch(EventInit::new("click"));
	assert_eq!(*hits.borrow(), 1);
	assert_eq!(el.listener_count(), 0);
}

#[test]
fn blur_clears_focus_and_notifies() {
	let doc = MemoryDocument::new();
	let el = doc.create_element("button");
	doc.body().append_child(&el);
	let blurred = Rc::new(RefCell::new(false));
	let flag = blurred.clone();
	el.add_listener("blur", move |_| *flag.borrow_mut() = true);

	el.blur();
	assert!(!*blurred.borrow(), "blur without focus is a no-op");

	el.focus();
	assert!(el.is_focused());
	assert_eq!(doc.focused(), Some(el.clone()));
	el.blur();
	assert!(!el.is_focused());
	assert!(*blurred.borrow());
}

#[test]
fn frames_run_once_and_defer_new_requests() {
	let doc = MemoryDocument::new();
	let log = Rc::new(RefCell::new(Vec::new()));

	let inner_doc = doc.clone();
	let inner_log = log.clone();
	doc.request_frame(move || {
		inner_log.borrow_mut().push("first");
		let again = inner_log.clone();
		inner_doc.request_frame(move || again.borrow_mut().push("second"));
	});

	assert_eq!(doc.run_frame(), 1);
	assert_eq!(*log.borrow(), vec!["first"]);
	assert_eq!(doc.pending_frames(), 1);
	assert_eq!(doc.run_frame(), 1);
	assert_eq!(*log.borrow(), vec!["first", "second"]);
	assert_eq!(doc.run_frame(), 0);
}

#[test]
fn cancelled_frame_never_runs() {
	let doc = MemoryDocument::new();
	let ran = Rc::new(RefCell::new(false));
	let flag = ran.clone();
	let id = doc.request_frame(move || *flag.borrow_mut() = true);

	assert!(doc.cancel_frame(id));
	assert!(!doc.cancel_frame(id));
	assert_eq!(doc.run_frame(), 0);
	assert!(!*ran.borrow());
}

#[test]
fn cancel_from_earlier_callback_in_same_frame() {
	let doc = MemoryDocument::new();
	let ran = Rc::new(RefCell::new(false));
	let later_slot = Rc::new(RefCell::new(None));

	let canceller_doc = doc.clone();
	let slot = later_slot.clone();
	doc.request_frame(move || {
		if let Some(id) = slot.borrow_mut().take() {
			canceller_doc.cancel_frame(id);
		}
	});
	let flag = ran.clone();
	*later_slot.borrow_mut() = Some(doc.request_frame(move || *flag.borrow_mut() = true));

	assert_eq!(doc.run_frame(), 1);
	assert!(!*ran.borrow());
}

#[test]
fn component_events_bubble_and_carry_behavior() {
	let (doc, _, inner, _) = tree();
	let seen = Rc::new(RefCell::new(None));
	let slot = seen.clone();
	doc.body().add_listener(ComponentEventKind::Upgraded.name(), move |event| {
		*slot.borrow_mut() = event.detail().map(str::to_owned);
	});

	let event = ComponentEvent::new(ComponentEventKind::Upgraded, "Foo");
	assert!(inner.dispatch_component_event(&event));
	assert_eq!(seen.borrow().as_deref(), Some("Foo"));
}

#[test]
fn only_upgrading_event_can_be_vetoed() {
	let doc = MemoryDocument::new();
	let el = doc.create_element("div");
	el.add_listener(ComponentEventKind::Upgrading.name(), |event| event.prevent_default());
	el.add_listener(ComponentEventKind::Upgraded.name(), |event| event.prevent_default());

	assert!(!el.dispatch_component_event(&ComponentEvent::new(ComponentEventKind::Upgrading, "Foo")));
	assert!(el.dispatch_component_event(&ComponentEvent::new(ComponentEventKind::Upgraded, "Foo")));
}
