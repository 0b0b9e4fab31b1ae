//! Catalog construction and registration
//!
//! Reads the link-time binding declarations, applies the registry
//! configuration and installs the result into a registry. Linked entries
//! carry no declaration order, so they are laid out by type name, then
//! qualifier, then implementation name; the same binary always produces the
//! same factory array.

use magnet_application::bindings::{BINDINGS, BindingCatalog, BindingEntry, IndexBuilder};
use magnet_application::registry::{ImplementationRegistry, global};
use magnet_domain::error::{Error, Result};
use magnet_domain::ports::FactoryBinding;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, RegistryConfig};

/// Build the catalog from every linked binding
///
/// Implementations listed in `config.disabled` are skipped. An empty
/// catalog is an error unless `config.allow_empty` is set.
pub fn build_catalog(config: &RegistryConfig) -> Result<BindingCatalog> {
    build_catalog_from(&BINDINGS, config)
}

pub(crate) fn build_catalog_from(entries: &[BindingEntry], config: &RegistryConfig) -> Result<BindingCatalog> {
    for name in &config.disabled {
        if !entries.iter().any(|entry| entry.implementation == name.as_str()) {
            warn!(implementation = %name, "Disabled implementation is not linked");
        }
    }

    let mut declarations: Vec<(FactoryBinding, &BindingEntry)> = entries
        .iter()
        .filter(|entry| {
            let disabled = config.is_disabled(entry.implementation);
            if disabled {
                debug!(implementation = entry.implementation, "Binding disabled by configuration");
            }
            !disabled
        })
        .map(|entry| ((entry.factory)(), entry))
        .collect();

    if declarations.is_empty() && !config.allow_empty {
        return Err(Error::config(
            "No bindings linked; link the crates declaring them or set registry.allow_empty",
        ));
    }

    declarations.sort_by(|(a, a_entry), (b, b_entry)| {
        (a.type_name(), a_entry.qualifier, a_entry.implementation).cmp(&(
            b.type_name(),
            b_entry.qualifier,
            b_entry.implementation,
        ))
    });

    let catalog = declarations
        .into_iter()
        .fold(IndexBuilder::new(), |builder, (binding, entry)| {
            builder.bind(binding, entry.qualifier, entry.implementation)
        })
        .build();
    Ok(catalog)
}

/// Register a catalog into `registry`
pub fn install(registry: &ImplementationRegistry, catalog: BindingCatalog) -> Result<()> {
    for descriptor in catalog.descriptors() {
        debug!(
            slot = descriptor.slot,
            type_name = descriptor.type_name,
            qualifier = %descriptor.qualifier,
            implementation = %descriptor.implementation,
            "Binding"
        );
    }
    let (factories, index) = catalog.into_parts();
    for (type_name, entry) in index.iter() {
        debug!(
            type_name,
            groups = entry.ranges().count(),
            span = ?entry.span(),
            "Indexed type"
        );
    }
    registry.register(factories, index)
}

/// Build the catalog and install it into the process-wide registry
///
/// Call once during startup, before any thread queries the registry.
pub fn bootstrap(config: &AppConfig) -> Result<&'static ImplementationRegistry> {
    let catalog = build_catalog(&config.registry)?;
    let bindings = catalog.len();

    let registry = global();
    install(registry, catalog)?;

    info!(
        bindings,
        types = registry.type_count(),
        "Magnet registry bootstrapped"
    );
    Ok(registry)
}
