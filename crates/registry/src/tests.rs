use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{BehaviorId, BehaviorRegistration, Disposable, RESERVED_SLOT, Registry, RegistryError, Selector};

/// Element stand-in; the registry never inspects elements.
type El = u32;

struct Plain;

struct Closable(Rc<RefCell<bool>>);

impl Disposable for Closable {
	fn dispose(&mut self) {
		*self.0.borrow_mut() = true;
	}
}

fn plain(id: &str, selector: &str) -> BehaviorRegistration<El> {
	BehaviorRegistration::new(id, selector, |_: &El| Plain).expect("valid registration")
}

fn ids(registry: &Registry<El>) -> Vec<String> {
	registry.ids().map(ToString::to_string).collect()
}

#[rstest]
#[case("x-foo", "x-foo")]
#[case(".x-foo", "x-foo")]
#[case("  .mdl_button ", "mdl_button")]
fn selector_accepts_class_names(#[case] input: &str, #[case] class: &str) {
	let selector = Selector::class(input).expect("valid selector");
	assert_eq!(selector.class_name(), class);
	assert_eq!(selector.to_string(), format!(".{class}"));
}

#[rstest]
#[case("")]
#[case(".")]
#[case("a b")]
#[case(".a.b")]
#[case("#id")]
#[case("1abc")]
#[case("a,b")]
fn selector_rejects_non_class_input(#[case] input: &str) {
	assert_eq!(Selector::class(input), Err(RegistryError::InvalidSelector(input.to_owned())));
}

#[rstest]
#[case("")]
#[case("Foo,Bar")]
#[case("Foo Bar")]
#[case("Foo\t")]
fn behavior_id_rejects_marker_breaking_tokens(#[case] input: &str) {
	assert_eq!(BehaviorId::new(input), Err(RegistryError::InvalidId(input.to_owned())));
}

#[test]
fn register_appends_in_order() {
	let mut registry = Registry::new();
	registry.register(plain("Foo", ".x-foo")).expect("register Foo");
	registry.register(plain("Bar", ".x-bar")).expect("register Bar");

	assert_eq!(ids(&registry), vec!["Foo", "Bar"]);
	assert_eq!(registry.len(), 2);
	assert!(!registry.is_empty());
}

#[test]
fn find_returns_registration_or_none() {
	let mut registry = Registry::new();
	registry.register(plain("Foo", ".x-foo")).expect("register Foo");

	let found = registry.find("Foo").expect("Foo is registered");
	assert_eq!(found.selector().class_name(), "x-foo");
	assert!(registry.find("Missing").is_none());
	assert_eq!(registry.find_by_class("x-foo").map(|r| r.id().to_string()), Some("Foo".to_string()));
	assert!(registry.find_by_class("x-bar").is_none());
}

/// Duplicate selectors fail and leave the registry unchanged.
#[test]
fn duplicate_selector_is_rejected() {
	let mut registry = Registry::new();
	registry.register(plain("Foo", ".x-foo")).expect("register Foo");

	let err = registry.register(plain("Other", "x-foo")).expect_err("selector is taken");
	assert_eq!(
		err,
		RegistryError::DuplicateSelector {
			selector: Selector::class("x-foo").unwrap(),
			existing: BehaviorId::new("Foo").unwrap(),
			incoming: BehaviorId::new("Other").unwrap(),
		}
	);
	assert_eq!(ids(&registry), vec!["Foo"]);
	assert!(registry.find("Other").is_none());
}

#[test]
fn same_id_with_other_selector_is_rejected() {
	let mut registry = Registry::new();
	registry.register(plain("Foo", ".x-foo")).expect("register Foo");

	let err = registry.register(plain("Foo", ".x-other")).expect_err("id is taken");
	assert!(matches!(err, RegistryError::DuplicateId { .. }), "got {err:?}");
	assert_eq!(registry.find("Foo").unwrap().selector().class_name(), "x-foo");
}

#[test]
fn reserved_slot_cannot_be_an_id() {
	let mut registry: Registry<El> = Registry::new();
	let err = registry.register(plain(RESERVED_SLOT, ".x-reserved")).expect_err("reserved id");
	assert!(matches!(err, RegistryError::ReservedId(_)));
	assert!(registry.is_empty());
}

/// Re-registering keeps the slot but drops previously attached callbacks.
#[test]
fn replacement_keeps_position_and_drops_callbacks() {
	let mut registry = Registry::new();
	registry.register(plain("Foo", ".x-foo")).expect("register Foo");
	registry.register(plain("Bar", ".x-bar")).expect("register Bar");
	registry.add_upgrade_callback("Foo", |_| {});
	assert_eq!(registry.find("Foo").unwrap().upgrade_callbacks().len(), 1);

	let replacement = plain("Foo", "x-foo").exposed();
	registry.register(replacement).expect("compatible replacement");

	assert_eq!(ids(&registry), vec!["Foo", "Bar"]);
	let foo = registry.find("Foo").unwrap();
	assert!(foo.auto_expose());
	assert!(foo.upgrade_callbacks().is_empty());
}

#[test]
fn callbacks_keep_insertion_order() {
	let order = Rc::new(RefCell::new(Vec::new()));
	let mut registry = Registry::new();
	let first = order.clone();
	registry
		.register(plain("Foo", ".x-foo").with_upgrade_callback(move |el: &El| first.borrow_mut().push(("builder", *el))))
		.expect("register Foo");
	let second = order.clone();
	registry.add_upgrade_callback("Foo", move |el| second.borrow_mut().push(("added", *el)));

	for callback in registry.find("Foo").unwrap().upgrade_callbacks() {
		callback(&7);
	}
	assert_eq!(*order.borrow(), vec![("builder", 7), ("added", 7)]);
}

#[test]
fn callback_for_unknown_id_is_ignored() {
	let mut registry: Registry<El> = Registry::new();
	registry.add_upgrade_callback("Nobody", |_| panic!("never attached"));
	assert!(registry.is_empty());
}

#[test]
fn all_is_restartable() {
	let mut registry = Registry::new();
	registry.register(plain("A", "a")).unwrap();
	registry.register(plain("B", "b")).unwrap();

	let first: Vec<_> = registry.all().map(|r| r.id().to_string()).collect();
	let second: Vec<_> = registry.all().map(|r| r.id().to_string()).collect();
	assert_eq!(first, second);
	assert_eq!(first, vec!["A", "B"]);
}

#[test]
fn teardown_presence_follows_the_constructor() {
	let disposed = Rc::new(RefCell::new(false));
	let flag = disposed.clone();
	let closable = BehaviorRegistration::disposable("Bar", ".x-bar", move |_: &El| Closable(flag.clone())).unwrap();
	assert!(closable.has_teardown());
	assert!(!plain("Foo", ".x-foo").has_teardown());

	let mut instance = closable.instantiate(&1);
	closable.teardown().expect("disposable").run(instance.as_mut());
	assert!(*disposed.borrow());
}

#[test]
fn instantiate_runs_factory_per_call() {
	let calls = Rc::new(RefCell::new(Vec::new()));
	let log = calls.clone();
	let registration = BehaviorRegistration::new("Foo", "x-foo", move |el: &El| {
		log.borrow_mut().push(*el);
		*el * 2
	})
	.unwrap();

	let a = registration.instantiate(&1);
	let b = registration.instantiate(&2);
	assert_eq!(a.downcast_ref::<u32>(), Some(&2));
	assert_eq!(b.downcast_ref::<u32>(), Some(&4));
	assert_eq!(*calls.borrow(), vec![1, 2]);
}
