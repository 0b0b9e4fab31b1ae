//! Domain layer constants

/// Qualifier of the default (unqualified) binding group
pub const DEFAULT_QUALIFIER: &str = "";

/// Placeholder used in messages when a lookup carries no qualifier
pub const DEFAULT_QUALIFIER_LABEL: &str = "<default>";
