//! Implementation registry
//!
//! Owns the factory array and the type index once they are registered and
//! turns `(type, qualifier)` lookups into freshly constructed instances.
//! Instances are never cached: every query invokes the matching factories
//! again.

use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use magnet_domain::error::{Error, Result};
use magnet_domain::ports::{DependencyScope, FactoryBinding};
use magnet_domain::value_objects::{Index, normalize_qualifier};
use once_cell::sync::OnceCell;
use tracing::{info, trace};

struct Bindings {
    factories: Vec<FactoryBinding>,
    index: Index,
}

/// Registry resolving types to implementations
///
/// The registry has two states. It starts **unregistered**, where every
/// query fails with [`Error::NotRegistered`], and becomes **registered**
/// after the first successful [`register`](Self::register). There is no way
/// back. Once registered, the state is immutable and queries may run from
/// any number of threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use magnet_application::ImplementationRegistry;
/// use magnet_domain::ports::{DependencyScope, FactoryBinding};
/// use magnet_domain::value_objects::{Index, Range};
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct FixedClock;
///
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 {
///         42
///     }
/// }
///
/// let factories = vec![FactoryBinding::from_fn::<dyn Clock, _>(|_scope: &dyn DependencyScope| {
///     Ok(Arc::new(FixedClock) as Arc<dyn Clock>)
/// })];
/// let mut index = Index::new();
/// index.insert_single::<dyn Clock>(Range::unqualified(0, 1));
///
/// let registry = ImplementationRegistry::new();
/// registry.register(factories, index)?;
///
/// let clock = registry.require_single::<dyn Clock>(None, &())?;
/// assert_eq!(clock.now(), 42);
/// # Ok::<(), magnet_domain::Error>(())
/// ```
pub struct ImplementationRegistry {
    bindings: OnceCell<Bindings>,
}

impl ImplementationRegistry {
    /// Create an unregistered registry
    pub const fn new() -> Self {
        Self {
            bindings: OnceCell::new(),
        }
    }

    /// Install the factory array and index
    ///
    /// The index is validated against the factories first; nothing is
    /// installed when validation fails. Registration happens once: a second
    /// call fails with [`Error::AlreadyRegistered`].
    pub fn register(&self, factories: Vec<FactoryBinding>, index: Index) -> Result<()> {
        if self.is_registered() {
            return Err(Error::AlreadyRegistered);
        }
        index.validate(&factories)?;

        let factory_count = factories.len();
        let type_count = index.len();
        self.bindings
            .set(Bindings { factories, index })
            .map_err(|_| Error::AlreadyRegistered)?;

        info!(
            factories = factory_count,
            types = type_count,
            "Implementation registry registered"
        );
        Ok(())
    }

    /// Whether `register` has completed
    pub fn is_registered(&self) -> bool {
        self.bindings.get().is_some()
    }

    /// Number of registered factories, zero while unregistered
    pub fn factory_count(&self) -> usize {
        self.bindings.get().map_or(0, |b| b.factories.len())
    }

    /// Number of indexed types, zero while unregistered
    pub fn type_count(&self) -> usize {
        self.bindings.get().map_or(0, |b| b.index.len())
    }

    /// Whether a lookup for `T` and `qualifier` matches any factory
    ///
    /// No factory is invoked.
    pub fn contains<T: ?Sized + 'static>(&self, qualifier: Option<&str>) -> Result<bool> {
        let bindings = self.bindings()?;
        Ok(bindings
            .index
            .resolve(TypeId::of::<T>(), qualifier)
            .is_some_and(|bounds| !bounds.is_empty()))
    }

    /// Construct every implementation of `T` matching `qualifier`
    ///
    /// Returns an empty vector when `T` has no bindings or no group matches
    /// the qualifier. Factories run in slice order, each once, with `scope`.
    /// The first factory failure is returned unchanged and the remaining
    /// factories are not invoked.
    pub fn get_many<T>(&self, qualifier: Option<&str>, scope: &dyn DependencyScope) -> Result<Vec<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let bindings = self.bindings()?;
        let Some(bounds) = bindings.index.resolve(TypeId::of::<T>(), qualifier) else {
            trace!(type_name = type_name::<T>(), qualifier = ?qualifier, "No binding matched");
            return Ok(Vec::new());
        };
        trace!(
            type_name = type_name::<T>(),
            qualifier = ?qualifier,
            start = bounds.start,
            end = bounds.end,
            "Resolving implementations"
        );

        let factories = bindings.factories.get(bounds.clone()).ok_or_else(|| {
            Error::invalid_index(format!(
                "{}: range {}..{} exceeds {} factories",
                type_name::<T>(),
                bounds.start,
                bounds.end,
                bindings.factories.len()
            ))
        })?;

        factories
            .iter()
            .zip(bounds)
            .map(|(factory, slot)| instantiate::<T>(factory, slot, scope))
            .collect()
    }

    /// Construct the single implementation of `T`, if any
    ///
    /// Returns `None` when nothing matches and fails with
    /// [`Error::MultipleBindings`] when more than one implementation does.
    pub fn get_single<T>(&self, qualifier: Option<&str>, scope: &dyn DependencyScope) -> Result<Option<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut instances = self.get_many::<T>(qualifier, scope)?;
        match instances.len() {
            0 | 1 => Ok(instances.pop()),
            count => Err(Error::multiple_bindings(
                type_name::<T>(),
                normalize_qualifier(qualifier),
                count,
            )),
        }
    }

    /// Construct the one and only implementation of `T`
    ///
    /// Fails with [`Error::MissingBinding`] when nothing matches and with
    /// [`Error::MultipleBindings`] when more than one implementation does.
    pub fn require_single<T>(&self, qualifier: Option<&str>, scope: &dyn DependencyScope) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get_single::<T>(qualifier, scope)?
            .ok_or_else(|| Error::missing_binding(type_name::<T>(), normalize_qualifier(qualifier)))
    }

    fn bindings(&self) -> Result<&Bindings> {
        self.bindings.get().ok_or(Error::NotRegistered)
    }
}

fn instantiate<T>(factory: &FactoryBinding, slot: usize, scope: &dyn DependencyScope) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    let instance = factory.create(scope).map_err(Error::Factory)?;
    instance
        .downcast::<Arc<T>>()
        .map(|instance| *instance)
        .map_err(|_| Error::TypeMismatch {
            expected: type_name::<T>().to_string(),
            actual: factory.type_name().to_string(),
            slot,
        })
}

impl Default for ImplementationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ImplementationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationRegistry")
            .field("registered", &self.is_registered())
            .field("factories", &self.factory_count())
            .field("types", &self.type_count())
            .finish()
    }
}
