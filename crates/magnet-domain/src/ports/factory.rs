//! Factory port and its type-erased binding
//!
//! A [`Factory<T>`] constructs one instance of `T` per call. The registry
//! stores factories of many different `T` in a single array, so each one is
//! wrapped into a [`FactoryBinding`] that remembers the `TypeId` of the type
//! it produces and hands out instances as `Box<dyn Any>` holding an `Arc<T>`.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use crate::ports::scope::DependencyScope;

/// Error raised by a factory while constructing an instance
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by factories
pub type FactoryResult<T> = std::result::Result<T, FactoryError>;

/// Type-erased instance; always an `Arc<T>` for the binding's declared `T`
pub type Instance = Box<dyn Any + Send + Sync>;

type ErasedCreate = Box<dyn Fn(&dyn DependencyScope) -> FactoryResult<Instance> + Send + Sync>;

/// Constructs instances of `T`
///
/// `T` is usually a trait object (`dyn Service`) so that several concrete
/// implementations can be bound to the same type.
pub trait Factory<T: ?Sized>: Send + Sync {
    /// Create a fresh instance, pulling dependencies from `scope`
    fn create(&self, scope: &dyn DependencyScope) -> FactoryResult<Arc<T>>;
}

/// A factory slot of the registry's factory array
pub struct FactoryBinding {
    type_id: TypeId,
    type_name: &'static str,
    create: ErasedCreate,
}

impl FactoryBinding {
    /// Erase a [`Factory`] implementation
    pub fn new<T, F>(factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Factory<T> + 'static,
    {
        Self::from_fn::<T, _>(move |scope| factory.create(scope))
    }

    /// Erase a factory closure
    ///
    /// ```
    /// use std::sync::Arc;
    /// use magnet_domain::ports::{DependencyScope, FactoryBinding};
    ///
    /// trait Greeter: Send + Sync {}
    /// struct English;
    /// impl Greeter for English {}
    ///
    /// let binding = FactoryBinding::from_fn::<dyn Greeter, _>(|_scope: &dyn DependencyScope| {
    ///     Ok(Arc::new(English) as Arc<dyn Greeter>)
    /// });
    /// assert!(binding.produces::<dyn Greeter>());
    /// ```
    pub fn from_fn<T, F>(create: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn DependencyScope) -> FactoryResult<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            create: Box::new(move |scope: &dyn DependencyScope| {
                create(scope).map(|instance| Box::new(instance) as Instance)
            }),
        }
    }

    /// Identity of the produced type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the produced type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this binding produces instances of `T`
    pub fn produces<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Invoke the factory
    pub fn create(&self, scope: &dyn DependencyScope) -> FactoryResult<Instance> {
        (self.create)(scope)
    }
}

impl fmt::Debug for FactoryBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryBinding")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
