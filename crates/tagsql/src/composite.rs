//! Field declarations and the [`Composite`] trait.
//!
//! A composite type registers, once per type, a static table of
//! [`FieldDecl`]s. At runtime [`Composite::declared_fields`] pairs each
//! declaration with the storage target of the field in a concrete value, so
//! slot references can be matched back to their declaration by identity.
//!
//! `#[derive(Composite)]` writes both halves; implementing by hand looks like:
//!
//! ```rust
//! use tagsql::{Composite, DeclaredField, FieldDecl};
//!
//! struct Tag {
//!     id: i64,
//!     label: String,
//! }
//!
//! impl Composite for Tag {
//!     fn declared_fields(&self) -> Vec<DeclaredField<'_>> {
//!         static FIELDS: &[FieldDecl] = &[
//!             FieldDecl::column("id", &[("sql", "id")]),
//!             FieldDecl::column("label", &[("sql", "label,notnull")]),
//!         ];
//!         vec![
//!             DeclaredField::column(&FIELDS[0], &self.id),
//!             DeclaredField::column(&FIELDS[1], &self.label),
//!         ]
//!     }
//! }
//! ```

use std::any::Any;

use crate::error::{OrmError, OrmResult};
use crate::slot::SlotTarget;

/// How a declared field stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain column value.
    Column,
    /// A sub-composite embedded by value.
    Embedded,
    /// A sub-composite held through `Box`, `Rc` or `Arc`.
    EmbeddedRef,
}

/// Static metadata attached to one field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// `(key, value)` tag pairs, e.g. `("sql", "id,pk")`.
    pub tags: &'static [(&'static str, &'static str)],
    pub kind: FieldKind,
}

impl FieldDecl {
    pub const fn column(ident: &'static str, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            ident,
            tags,
            kind: FieldKind::Column,
        }
    }

    pub const fn embedded(
        ident: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            ident,
            tags,
            kind: FieldKind::Embedded,
        }
    }

    pub const fn embedded_ref(
        ident: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            ident,
            tags,
            kind: FieldKind::EmbeddedRef,
        }
    }

    /// Raw tag value stored under `key`.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Column name under `key`: the tag value up to the first comma.
    pub fn column_name(&self, key: &str) -> OrmResult<&'static str> {
        let value = self
            .tag(key)
            .ok_or_else(|| OrmError::tag_missing(self.ident, key))?;
        let name = value.split(',').next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(OrmError::tag_missing(self.ident, key));
        }
        Ok(name)
    }
}

/// A declared field of a concrete value.
#[derive(Clone, Copy)]
pub struct DeclaredField<'a> {
    pub decl: &'static FieldDecl,
    /// Storage target of the field itself.
    pub target: SlotTarget,
    /// Sub-composite to search for embedded fields.
    pub embedded: Option<&'a dyn Composite>,
}

impl<'a> DeclaredField<'a> {
    pub fn column<T: Any>(decl: &'static FieldDecl, field: &'a T) -> Self {
        Self {
            decl,
            target: SlotTarget::of(field),
            embedded: None,
        }
    }

    /// An embedded field. `inner` is the field itself for by-value
    /// embedding, or the pointee for `Box`/`Rc`/`Arc` fields.
    pub fn embedded<F: Any, C: Composite>(
        decl: &'static FieldDecl,
        field: &'a F,
        inner: &'a C,
    ) -> Self {
        Self {
            decl,
            target: SlotTarget::of(field),
            embedded: Some(inner),
        }
    }
}

/// A value whose fields carry static declarations.
pub trait Composite {
    /// Declared fields in declaration order.
    fn declared_fields(&self) -> Vec<DeclaredField<'_>>;

    /// Type name used in error messages.
    fn composite_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
