//! Index builder
//!
//! Lays binding declarations out into the factory array and index the
//! registry consumes. Declarations of one type end up contiguous, and inside
//! a type each qualifier group is contiguous, so every range the builder
//! emits passes [`Index::validate`].

use std::any::TypeId;

use magnet_domain::ports::FactoryBinding;
use magnet_domain::value_objects::{Index, IndexEntry, Range};
use tracing::debug;

use crate::bindings::BindingEntry;

/// Where one declared implementation landed in the factory array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    /// Name of the bound type
    pub type_name: &'static str,
    /// Qualifier group, empty for the default group
    pub qualifier: String,
    /// Implementation name
    pub implementation: String,
    /// Offset in the factory array
    pub slot: usize,
}

/// Factory array and index produced by [`IndexBuilder::build`]
#[derive(Debug)]
pub struct BindingCatalog {
    factories: Vec<FactoryBinding>,
    index: Index,
    descriptors: Vec<BindingDescriptor>,
}

impl BindingCatalog {
    /// The type index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// One descriptor per factory, in slot order
    pub fn descriptors(&self) -> &[BindingDescriptor] {
        &self.descriptors
    }

    /// Number of factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the catalog holds no factory
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Split into the arguments of `ImplementationRegistry::register`
    pub fn into_parts(self) -> (Vec<FactoryBinding>, Index) {
        (self.factories, self.index)
    }
}

struct Declaration {
    binding: FactoryBinding,
    implementation: String,
}

struct QualifierGroup {
    qualifier: String,
    declarations: Vec<Declaration>,
}

struct TypeGroup {
    type_id: TypeId,
    type_name: &'static str,
    groups: Vec<QualifierGroup>,
}

/// Builder grouping declarations by type, then by qualifier
///
/// Types and qualifier groups keep the order in which they first appear;
/// declarations inside a group keep their declaration order.
#[derive(Default)]
pub struct IndexBuilder {
    types: Vec<TypeGroup>,
    declared: usize,
}

impl IndexBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an implementation of the binding's type
    pub fn bind(
        mut self,
        binding: FactoryBinding,
        qualifier: impl Into<String>,
        implementation: impl Into<String>,
    ) -> Self {
        let qualifier = qualifier.into();
        let declaration = Declaration {
            binding,
            implementation: implementation.into(),
        };

        let type_id = declaration.binding.type_id();
        let position = match self.types.iter().position(|t| t.type_id == type_id) {
            Some(position) => position,
            None => {
                self.types.push(TypeGroup {
                    type_id,
                    type_name: declaration.binding.type_name(),
                    groups: Vec::new(),
                });
                self.types.len() - 1
            }
        };
        let groups = &mut self.types[position].groups;

        match groups.iter_mut().find(|g| g.qualifier == qualifier) {
            Some(group) => group.declarations.push(declaration),
            None => groups.push(QualifierGroup {
                qualifier,
                declarations: vec![declaration],
            }),
        }
        self.declared += 1;
        self
    }

    /// Declare a linked [`BindingEntry`]
    pub fn bind_entry(self, entry: &BindingEntry) -> Self {
        self.bind((entry.factory)(), entry.qualifier, entry.implementation)
    }

    /// Number of declarations so far
    pub fn len(&self) -> usize {
        self.declared
    }

    /// Whether nothing was declared
    pub fn is_empty(&self) -> bool {
        self.declared == 0
    }

    /// Lay the declarations out
    ///
    /// A type with one qualifier group gets a `Single` entry, a type with
    /// several groups a `Qualified` one.
    pub fn build(self) -> BindingCatalog {
        let mut factories = Vec::with_capacity(self.declared);
        let mut descriptors = Vec::with_capacity(self.declared);
        let mut index = Index::new();

        for type_group in self.types {
            let mut ranges = Vec::with_capacity(type_group.groups.len());
            for group in type_group.groups {
                ranges.push(Range::new(factories.len(), group.declarations.len(), group.qualifier.clone()));
                for declaration in group.declarations {
                    descriptors.push(BindingDescriptor {
                        type_name: type_group.type_name,
                        qualifier: group.qualifier.clone(),
                        implementation: declaration.implementation,
                        slot: factories.len(),
                    });
                    factories.push(declaration.binding);
                }
            }

            let entry = match ranges.len() {
                1 => IndexEntry::Single(ranges.remove(0)),
                _ => IndexEntry::Qualified(
                    ranges
                        .into_iter()
                        .map(|range| (range.qualifier().to_string(), range))
                        .collect(),
                ),
            };
            index.insert(type_group.type_id, type_group.type_name, entry);
        }

        debug!(
            factories = factories.len(),
            types = index.len(),
            "Binding catalog built"
        );
        BindingCatalog {
            factories,
            index,
            descriptors,
        }
    }
}
