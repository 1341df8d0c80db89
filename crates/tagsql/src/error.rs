//! Error types for tagsql

use thiserror::Error;

/// Result type alias for tagsql operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for column resolution and statement building.
///
/// Resolution errors describe an entity whose `columns()` list and field
/// declarations disagree. They are definition errors: nothing in this crate
/// retries or recovers from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrmError {
    /// A slot does not point at any declared field of the entity
    #[error(
        "field not supported: slot of type `{slot_type}` is not a declared field of `{entity}`"
    )]
    FieldNotSupported {
        entity: &'static str,
        slot_type: &'static str,
    },

    /// The matched field carries no column name under the configured tag
    #[error("field `{field}` must have a `{tag}` tag if included in columns()")]
    TagMissing { field: &'static str, tag: String },

    /// Two slots of `columns()` point at the same storage location
    #[error("column '{column}' is listed more than once in columns()")]
    DuplicateSlot { column: &'static str },

    /// The entity lacks the columns a statement needs
    #[error("cannot build {statement} for table '{table}': entity lacks a required column")]
    EmptyStatement {
        statement: &'static str,
        table: String,
    },

    /// Unrecognized dialect name
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

impl OrmError {
    /// Create a field-not-supported error for a slot inside `entity`
    pub fn field_not_supported(entity: &'static str, slot_type: &'static str) -> Self {
        Self::FieldNotSupported { entity, slot_type }
    }

    /// Create a tag-missing error
    pub fn tag_missing(field: &'static str, tag: impl Into<String>) -> Self {
        Self::TagMissing {
            field,
            tag: tag.into(),
        }
    }

    /// Create an empty-statement error
    pub fn empty_statement(statement: &'static str, table: impl Into<String>) -> Self {
        Self::EmptyStatement {
            statement,
            table: table.into(),
        }
    }

    /// Check if this is a field-not-supported error
    pub fn is_field_not_supported(&self) -> bool {
        matches!(self, Self::FieldNotSupported { .. })
    }

    /// Check if this is a tag-missing error
    pub fn is_tag_missing(&self) -> bool {
        matches!(self, Self::TagMissing { .. })
    }

    /// Check if this is a duplicate-slot error
    pub fn is_duplicate_slot(&self) -> bool {
        matches!(self, Self::DuplicateSlot { .. })
    }

    /// True for errors raised while resolving slots to column names.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::FieldNotSupported { .. } | Self::TagMissing { .. } | Self::DuplicateSlot { .. }
        )
    }
}
