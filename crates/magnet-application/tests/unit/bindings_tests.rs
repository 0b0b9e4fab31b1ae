//! Tests for link-time binding declarations

use std::sync::Arc;

use magnet_application::bindings::{BINDINGS, BindingEntry, list_bindings};
use magnet_application::{ImplementationRegistry, IndexBuilder};
use magnet_domain::ports::{DependencyScope, FactoryBinding};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct English;
struct French;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

impl Greeter for French {
    fn greet(&self) -> String {
        "bonjour".to_string()
    }
}

#[linkme::distributed_slice(BINDINGS)]
static ENGLISH_GREETER: BindingEntry = BindingEntry {
    implementation: "english",
    qualifier: "en",
    factory: || {
        FactoryBinding::from_fn::<dyn Greeter, _>(|_scope: &dyn DependencyScope| {
            Ok(Arc::new(English) as Arc<dyn Greeter>)
        })
    },
};

#[linkme::distributed_slice(BINDINGS)]
static FRENCH_GREETER: BindingEntry = BindingEntry {
    implementation: "french",
    qualifier: "fr",
    factory: || {
        FactoryBinding::from_fn::<dyn Greeter, _>(|_scope: &dyn DependencyScope| {
            Ok(Arc::new(French) as Arc<dyn Greeter>)
        })
    },
};

#[test]
fn test_list_bindings_includes_linked_entries() {
    let bindings = list_bindings();

    let greeters: Vec<_> = bindings
        .iter()
        .filter(|(type_name, _, _)| type_name.contains("Greeter"))
        .map(|(_, qualifier, implementation)| (*qualifier, *implementation))
        .collect();
    assert_eq!(greeters, vec![("en", "english"), ("fr", "french")]);
}

#[test]
fn test_linked_entries_resolve_by_qualifier() {
    let catalog = BINDINGS
        .iter()
        .fold(IndexBuilder::new(), |builder, entry| builder.bind_entry(entry))
        .build();
    let (factories, index) = catalog.into_parts();

    let registry = ImplementationRegistry::new();
    registry.register(factories, index).unwrap();

    let fr = registry.require_single::<dyn Greeter>(Some("fr"), &()).unwrap();
    assert_eq!(fr.greet(), "bonjour");
    assert_eq!(registry.get_many::<dyn Greeter>(None, &()).unwrap().len(), 2);
}
