//! Dependency scope port
//!
//! The scope is the caller-owned context a factory pulls its own
//! dependencies from. The registry forwards it verbatim and never looks
//! inside; factories that know the concrete scope type recover it with
//! [`DependencyScope::downcast_ref`].

use downcast_rs::{DowncastSync, impl_downcast};

/// Opaque context passed unchanged to every factory invocation
///
/// # Example
///
/// ```
/// use magnet_domain::ports::DependencyScope;
///
/// struct RequestScope {
///     user: String,
/// }
///
/// impl DependencyScope for RequestScope {}
///
/// let scope: &dyn DependencyScope = &RequestScope { user: "ada".into() };
/// let concrete = scope.downcast_ref::<RequestScope>().unwrap();
/// assert_eq!(concrete.user, "ada");
/// ```
pub trait DependencyScope: DowncastSync {}

impl_downcast!(sync DependencyScope);

/// Empty scope for factories without dependencies
impl DependencyScope for () {}
