//! Resolved column lists: entity slots paired with their column names.

use std::ops::Deref;

use crate::entity::Entity;
use crate::error::{OrmError, OrmResult};
use crate::slot::{SlotRef, SlotTarget};
use crate::tag::FieldIndex;

/// A slot paired with the column name declared for it.
#[derive(Debug, Clone)]
pub struct NamedSlot<'a> {
    pub name: &'static str,
    pub slot: SlotRef<'a>,
}

/// Resolved columns of an entity, in `columns()` order.
///
/// Column 0 is the identifier column.
#[derive(Debug, Clone, Default)]
pub struct NamedFields<'a>(Vec<NamedSlot<'a>>);

impl<'a> NamedFields<'a> {
    /// Column names in order.
    pub fn names(&self) -> ColNames {
        self.0.iter().map(|f| f.name.to_string()).collect()
    }

    /// Slots in order.
    pub fn slots(&self) -> Vec<SlotRef<'a>> {
        self.0.iter().map(|f| f.slot.clone()).collect()
    }

    /// The identifier column (column 0).
    pub fn identifier(&self) -> Option<&NamedSlot<'a>> {
        self.0.first()
    }

    /// Every column except the identifier.
    pub fn data(&self) -> &[NamedSlot<'a>] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[NamedSlot<'a>] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<NamedSlot<'a>> {
        self.0
    }
}

impl<'a> Deref for NamedFields<'a> {
    type Target = [NamedSlot<'a>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for NamedFields<'a> {
    type Item = NamedSlot<'a>;
    type IntoIter = std::vec::IntoIter<NamedSlot<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Ordered column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColNames(Vec<String>);

impl ColNames {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Qualify every name with `alias.`; an empty alias leaves names as-is.
    pub fn prefix(mut self, alias: &str) -> Self {
        if !alias.is_empty() {
            for name in &mut self.0 {
                *name = format!("{alias}.{name}");
            }
        }
        self
    }

    /// Comma-joined names, as used in column lists.
    pub fn join(&self) -> String {
        self.0.join(",")
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for ColNames {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<String> for ColNames {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for ColNames {
    fn eq(&self, other: &[S]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for ColNames {
    fn eq(&self, other: &[S; N]) -> bool {
        *self == other[..]
    }
}

/// Resolve every slot of `entity.columns()` to its column name under `tag`.
///
/// All or nothing: the first slot that fails to resolve aborts the call.
pub fn resolve<'e, E: Entity>(entity: &'e E, tag: &str) -> OrmResult<NamedFields<'e>> {
    let index = FieldIndex::build(entity);
    let columns = entity.columns();
    let mut seen: Vec<SlotTarget> = Vec::with_capacity(columns.len());
    let mut out = Vec::with_capacity(columns.len());

    for slot in columns {
        let found = index.find(slot.target())?;
        if seen.contains(&found.target) {
            return Err(OrmError::DuplicateSlot {
                column: found.decl.column_name(tag).unwrap_or(found.decl.ident),
            });
        }
        seen.push(found.target);
        let name = found.decl.column_name(tag)?;
        out.push(NamedSlot { name, slot });
    }

    Ok(NamedFields(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_qualifies_names() {
        let names = ColNames::new(vec!["id".into(), "foo".into()]);
        assert_eq!(names.clone().prefix("alias"), ["alias.id", "alias.foo"]);
        assert_eq!(names.prefix(""), ["id", "foo"]);
    }

    #[test]
    fn join_uses_bare_commas() {
        let names: ColNames = ["id", "name", "email"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names.join(), "id,name,email");
        assert_eq!(ColNames::default().join(), "");
    }
}
