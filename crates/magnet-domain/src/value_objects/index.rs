//! Type index
//!
//! Maps a requested type to the slice of the factory array that serves it.
//! A type bound without qualifier distinctions carries a single [`Range`];
//! a type with several named groups carries one range per qualifier.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::ports::FactoryBinding;
use crate::value_objects::range::{Range, normalize_qualifier};

/// Location of one type's factories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    /// The type has a single qualifier group
    Single(Range),
    /// The type has several named groups, keyed by qualifier
    Qualified(HashMap<String, Range>),
}

impl IndexEntry {
    /// Build a qualified entry keyed by each range's qualifier
    ///
    /// Fails with [`Error::InvalidIndex`] when two ranges share a qualifier.
    pub fn qualified(ranges: impl IntoIterator<Item = Range>) -> Result<Self> {
        let mut map = HashMap::new();
        for range in ranges {
            let qualifier = range.qualifier().to_string();
            if map.contains_key(&qualifier) {
                return Err(Error::invalid_index(format!(
                    "duplicate qualifier '{qualifier}'"
                )));
            }
            map.insert(qualifier, range);
        }
        Ok(Self::Qualified(map))
    }

    /// Resolve a lookup to factory array bounds
    ///
    /// - `Single` + no qualifier: the whole range
    /// - `Single` + qualifier: the range only if its qualifier matches
    /// - `Qualified` + qualifier: the range under that exact key
    /// - `Qualified` + no qualifier: the span of every group of the type
    pub fn resolve(&self, qualifier: Option<&str>) -> Option<std::ops::Range<usize>> {
        match (self, normalize_qualifier(qualifier)) {
            (Self::Single(range), None) => Some(range.bounds()),
            (Self::Single(range), Some(q)) => (range.qualifier() == q).then(|| range.bounds()),
            (Self::Qualified(ranges), Some(q)) => ranges.get(q).map(Range::bounds),
            (Self::Qualified(_), None) => self.span(),
        }
    }

    /// Bounds covering every range of the entry
    pub fn span(&self) -> Option<std::ops::Range<usize>> {
        let start = self.ranges().map(Range::start).min()?;
        let end = self.ranges().map(Range::end).max()?;
        Some(start..end)
    }

    /// Iterate over the ranges of the entry
    pub fn ranges(&self) -> Box<dyn Iterator<Item = &Range> + '_> {
        match self {
            Self::Single(range) => Box::new(std::iter::once(range)),
            Self::Qualified(ranges) => Box::new(ranges.values()),
        }
    }
}

#[derive(Debug, Clone)]
struct TypeSlot {
    type_name: &'static str,
    entry: IndexEntry,
}

/// Index from requested type to its [`IndexEntry`]
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: HashMap<TypeId, TypeSlot>,
}

impl Index {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `T` to a single range
    pub fn insert_single<T: ?Sized + 'static>(&mut self, range: Range) -> &mut Self {
        self.insert(TypeId::of::<T>(), type_name::<T>(), IndexEntry::Single(range))
    }

    /// Bind `T` to several ranges keyed by their qualifiers
    pub fn insert_qualified<T: ?Sized + 'static>(
        &mut self,
        ranges: impl IntoIterator<Item = Range>,
    ) -> Result<&mut Self> {
        let entry = IndexEntry::qualified(ranges).map_err(|err| match err {
            Error::InvalidIndex { message } => {
                Error::invalid_index(format!("{}: {message}", type_name::<T>()))
            }
            other => other,
        })?;
        Ok(self.insert(TypeId::of::<T>(), type_name::<T>(), entry))
    }

    /// Bind a type identity to an entry, replacing any previous entry
    pub fn insert(&mut self, type_id: TypeId, type_name: &'static str, entry: IndexEntry) -> &mut Self {
        self.entries.insert(type_id, TypeSlot { type_name, entry });
        self
    }

    /// Entry of a type, if it has bindings
    pub fn get(&self, type_id: TypeId) -> Option<&IndexEntry> {
        self.entries.get(&type_id).map(|slot| &slot.entry)
    }

    /// Resolve a type and optional qualifier to factory array bounds
    pub fn resolve(&self, type_id: TypeId, qualifier: Option<&str>) -> Option<std::ops::Range<usize>> {
        self.get(type_id)?.resolve(qualifier)
    }

    /// Number of indexed types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(type name, entry)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &IndexEntry)> + '_ {
        self.entries.values().map(|slot| (slot.type_name, &slot.entry))
    }

    /// Check the index against the factory array it describes
    ///
    /// Every range must be non-empty and lie inside `factories`; qualified
    /// keys must equal their range's qualifier; the ranges of a type must be
    /// disjoint and form one contiguous block; every slot of that block must
    /// produce the indexed type.
    pub fn validate(&self, factories: &[FactoryBinding]) -> Result<()> {
        for (type_id, slot) in &self.entries {
            validate_entry(*type_id, slot, factories)?;
        }
        Ok(())
    }
}

fn validate_entry(type_id: TypeId, slot: &TypeSlot, factories: &[FactoryBinding]) -> Result<()> {
    let type_name = slot.type_name;

    if let IndexEntry::Qualified(ranges) = &slot.entry {
        if ranges.is_empty() {
            return Err(Error::invalid_index(format!(
                "{type_name} has a qualified entry without ranges"
            )));
        }
        if let Some((key, range)) = ranges.iter().find(|(key, range)| key.as_str() != range.qualifier()) {
            return Err(Error::invalid_index(format!(
                "{type_name}: key '{key}' holds a range qualified '{}'",
                range.qualifier()
            )));
        }
    }

    let mut ranges: Vec<&Range> = slot.entry.ranges().collect();
    ranges.sort_by_key(|range| range.start());

    for range in &ranges {
        let Some(end) = range.checked_end() else {
            return Err(Error::invalid_index(format!(
                "{type_name}: range starting at {} with {} factories overflows",
                range.start(),
                range.count()
            )));
        };
        if range.count() == 0 {
            return Err(Error::invalid_index(format!(
                "{type_name}: range for qualifier '{}' is empty",
                range.qualifier()
            )));
        }
        if end > factories.len() {
            return Err(Error::invalid_index(format!(
                "{type_name}: range {}..{end} exceeds {} factories",
                range.start(),
                factories.len()
            )));
        }
    }

    for pair in ranges.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if prev.overlaps(next) {
            return Err(Error::invalid_index(format!(
                "{type_name}: ranges '{}' and '{}' overlap",
                prev.qualifier(),
                next.qualifier()
            )));
        }
        if prev.end() != next.start() {
            return Err(Error::invalid_index(format!(
                "{type_name}: gap between ranges '{}' and '{}'",
                prev.qualifier(),
                next.qualifier()
            )));
        }
    }

    for range in ranges {
        for offset in range.bounds() {
            let factory = &factories[offset];
            if factory.type_id() != type_id {
                return Err(Error::invalid_index(format!(
                    "{type_name}: slot {offset} produces {}",
                    factory.type_name()
                )));
            }
        }
    }

    Ok(())
}
