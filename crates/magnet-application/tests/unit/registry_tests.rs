//! Tests for the implementation registry
//!
//! Fixture: `[F1(Type1), F2(Type1), F3(Type2), F4(Type2)]` indexed as
//! `Type1: {"impl1": 0..1, "impl2": 1..2}` and `Type2: 2..4` (default group).

use std::sync::Arc;

use magnet_application::ImplementationRegistry;
use magnet_domain::error::Error;
use magnet_domain::ports::{DependencyScope, FactoryBinding};
use magnet_domain::value_objects::{Index, Range};

use crate::test_utils::{Calls, TestScope, Type1, Type2, Type3, expect_err, type1, type2};

struct Fixture {
    registry: ImplementationRegistry,
    f1: Arc<Calls>,
    f2: Arc<Calls>,
    f3: Arc<Calls>,
    f4: Arc<Calls>,
}

fn fixture() -> Fixture {
    let (b1, f1) = type1("type1-impl1");
    let (b2, f2) = type1("type1-impl2");
    let (b3, f3) = type2("type2-impl1");
    let (b4, f4) = type2("type2-impl2");

    let mut index = Index::new();
    index
        .insert_qualified::<dyn Type1>([Range::new(0, 1, "impl1"), Range::new(1, 1, "impl2")])
        .expect("qualifiers should be distinct")
        .insert_single::<dyn Type2>(Range::new(2, 2, ""));

    let registry = ImplementationRegistry::new();
    registry
        .register(vec![b1, b2, b3, b4], index)
        .expect("fixture index should be valid");

    Fixture {
        registry,
        f1,
        f2,
        f3,
        f4,
    }
}

const SCOPE: TestScope = TestScope { id: 7 };

// ============================================================================
// get_many
// ============================================================================

#[test]
fn test_get_many_unknown_type_is_empty() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type3>(None, &SCOPE).unwrap();
    assert!(impls.is_empty());

    let impls = fx.registry.get_many::<dyn Type3>(Some("impl1"), &SCOPE).unwrap();
    assert!(impls.is_empty());
}

#[test]
fn test_get_many_default_group_invokes_every_factory_in_order() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type2>(None, &SCOPE).unwrap();

    assert_eq!(impls.len(), 2);
    assert_eq!(impls[0].label(), "type2-impl1");
    assert_eq!(impls[1].label(), "type2-impl2");
    assert_eq!(fx.f3.scopes(), vec![Some(7)]);
    assert_eq!(fx.f4.scopes(), vec![Some(7)]);
    assert_eq!(fx.f1.count() + fx.f2.count(), 0);
}

#[test]
fn test_get_many_empty_qualifier_is_default_lookup() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type2>(Some(""), &SCOPE).unwrap();

    assert_eq!(impls.len(), 2);
}

#[test]
fn test_get_many_qualifier_impl1() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type1>(Some("impl1"), &SCOPE).unwrap();

    assert_eq!(impls.len(), 1);
    assert_eq!(impls[0].label(), "type1-impl1");
    assert_eq!(fx.f1.count(), 1);
    assert_eq!(fx.f2.count(), 0);
}

#[test]
fn test_get_many_qualifier_impl2() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type1>(Some("impl2"), &SCOPE).unwrap();

    assert_eq!(impls.len(), 1);
    assert_eq!(impls[0].label(), "type1-impl2");
    assert_eq!(fx.f1.count(), 0);
    assert_eq!(fx.f2.count(), 1);
}

#[test]
fn test_get_many_unknown_qualifier_is_empty() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type1>(Some("impl3"), &SCOPE).unwrap();

    assert!(impls.is_empty());
    assert_eq!(fx.f1.count() + fx.f2.count(), 0);
}

#[test]
fn test_get_many_default_lookup_spans_every_qualifier() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type1>(None, &SCOPE).unwrap();

    let labels: Vec<_> = impls.iter().map(|i| i.label()).collect();
    assert_eq!(labels, vec!["type1-impl1", "type1-impl2"]);
}

#[test]
fn test_get_many_qualifier_against_unqualified_single_range_is_empty() {
    let fx = fixture();

    let impls = fx.registry.get_many::<dyn Type2>(Some("impl1"), &SCOPE).unwrap();

    assert!(impls.is_empty());
    assert_eq!(fx.f3.count() + fx.f4.count(), 0);
}

#[test]
fn test_get_many_does_not_cache_instances() {
    let fx = fixture();

    let first = fx.registry.get_many::<dyn Type2>(None, &SCOPE).unwrap();
    let second = fx.registry.get_many::<dyn Type2>(None, &SCOPE).unwrap();

    assert_eq!(fx.f3.count(), 2);
    assert_eq!(fx.f4.count(), 2);
    assert!(!Arc::ptr_eq(&first[0], &second[0]));
}

#[test]
fn test_get_many_forwards_scope_verbatim() {
    let fx = fixture();

    fx.registry.get_many::<dyn Type2>(None, &TestScope { id: 1 }).unwrap();
    fx.registry.get_many::<dyn Type2>(None, &()).unwrap();

    assert_eq!(fx.f3.scopes(), vec![Some(1), None]);
}

// ============================================================================
// get_single / require_single
// ============================================================================

#[test]
fn test_get_single_one_found() {
    let fx = fixture();

    let found = fx.registry.get_single::<dyn Type1>(Some("impl2"), &SCOPE).unwrap();

    assert_eq!(found.map(|i| i.label()), Some("type1-impl2"));
    assert_eq!(fx.f2.count(), 1);
    assert_eq!(fx.f1.count(), 0);
}

#[test]
fn test_get_single_none_found() {
    let fx = fixture();

    let found = fx.registry.get_single::<dyn Type3>(None, &SCOPE).unwrap();

    assert!(found.is_none());
}

#[test]
fn test_get_single_qualifier_against_unqualified_single_range_is_absent() {
    let fx = fixture();

    let found = fx.registry.get_single::<dyn Type2>(Some("impl1"), &SCOPE).unwrap();

    assert!(found.is_none());
    assert_eq!(fx.f3.count() + fx.f4.count(), 0);
}

#[test]
fn test_get_single_multiple_found() {
    let fx = fixture();

    let err = expect_err(fx.registry.get_single::<dyn Type2>(None, &SCOPE));

    match err {
        Error::MultipleBindings {
            type_name,
            qualifier,
            count,
        } => {
            assert!(type_name.contains("Type2"), "got {type_name}");
            assert_eq!(qualifier, None);
            assert_eq!(count, 2);
        }
        other => panic!("expected MultipleBindings, got {other:?}"),
    }
}

#[test]
fn test_require_single_one_found() {
    let fx = fixture();

    let found = fx.registry.require_single::<dyn Type1>(Some("impl2"), &SCOPE).unwrap();

    assert_eq!(found.label(), "type1-impl2");
    assert_eq!(fx.f2.count(), 1);
}

#[test]
fn test_require_single_none_found() {
    let fx = fixture();

    let err = expect_err(fx.registry.require_single::<dyn Type3>(None, &SCOPE));

    assert!(matches!(err, Error::MissingBinding { qualifier: None, .. }), "got {err:?}");
}

#[test]
fn test_require_single_unknown_qualifier_reports_it() {
    let fx = fixture();

    let err = expect_err(fx.registry.require_single::<dyn Type1>(Some("impl3"), &SCOPE));

    match err {
        Error::MissingBinding { qualifier, .. } => assert_eq!(qualifier.as_deref(), Some("impl3")),
        other => panic!("expected MissingBinding, got {other:?}"),
    }
}

#[test]
fn test_require_single_multiple_found() {
    let fx = fixture();

    let err = expect_err(fx.registry.require_single::<dyn Type2>(None, &SCOPE));

    assert!(matches!(err, Error::MultipleBindings { count: 2, .. }), "got {err:?}");
}

// ============================================================================
// Factory failures
// ============================================================================

#[test]
fn test_factory_error_propagates_unchanged() {
    let (ok, ok_calls) = type2("after-failure");
    let failing = FactoryBinding::from_fn::<dyn Type2, _>(|_scope: &dyn DependencyScope| {
        Err("connection refused".into())
    });
    let mut index = Index::new();
    index.insert_single::<dyn Type2>(Range::unqualified(0, 2));

    let registry = ImplementationRegistry::new();
    registry.register(vec![failing, ok], index).unwrap();

    let err = expect_err(registry.get_many::<dyn Type2>(None, &SCOPE));

    assert!(matches!(err, Error::Factory(_)));
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(ok_calls.count(), 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_query_before_register_fails() {
    let registry = ImplementationRegistry::new();

    assert!(!registry.is_registered());
    assert!(matches!(
        registry.get_many::<dyn Type1>(None, &SCOPE),
        Err(Error::NotRegistered)
    ));
    assert!(matches!(
        registry.require_single::<dyn Type1>(None, &SCOPE),
        Err(Error::NotRegistered)
    ));
}

#[test]
fn test_second_register_is_rejected() {
    let fx = fixture();
    let (binding, _) = type1("late");
    let mut index = Index::new();
    index.insert_single::<dyn Type1>(Range::unqualified(0, 1));

    let err = expect_err(fx.registry.register(vec![binding], index));

    assert!(matches!(err, Error::AlreadyRegistered));
    assert_eq!(fx.registry.factory_count(), 4);
}

#[test]
fn test_invalid_index_is_not_installed() {
    let (binding, _) = type1("only");
    let mut index = Index::new();
    index.insert_single::<dyn Type1>(Range::unqualified(0, 3));

    let registry = ImplementationRegistry::new();
    let err = expect_err(registry.register(vec![binding], index));

    assert!(matches!(err, Error::InvalidIndex { .. }), "got {err:?}");
    assert!(!registry.is_registered());
}

#[test]
fn test_inspection() {
    let fx = fixture();

    assert!(fx.registry.is_registered());
    assert_eq!(fx.registry.factory_count(), 4);
    assert_eq!(fx.registry.type_count(), 2);
    assert!(fx.registry.contains::<dyn Type1>(Some("impl1")).unwrap());
    assert!(!fx.registry.contains::<dyn Type1>(Some("impl3")).unwrap());
    assert!(!fx.registry.contains::<dyn Type3>(None).unwrap());
    assert_eq!(fx.f1.count() + fx.f2.count(), 0);
}

#[test]
fn test_concurrent_queries_after_register() {
    let fx = fixture();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let impls = fx.registry.get_many::<dyn Type2>(None, &SCOPE).unwrap();
                assert_eq!(impls.len(), 2);
            });
        }
    });

    assert_eq!(fx.f3.count(), 4);
    assert_eq!(fx.f4.count(), 4);
}
