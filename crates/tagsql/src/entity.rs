//! The [`Entity`] trait: a value mapped to one table.

use crate::composite::Composite;
use crate::slot::SlotRef;

/// A data-bearing value mapped to one table.
///
/// `columns()` lists references to the entity's own fields (or fields of
/// composites it embeds), by reference, in column order. The first column
/// is the identifier.
///
/// # Example
///
/// ```ignore
/// use tagsql::{Composite, Entity, SlotRef};
///
/// #[derive(Composite)]
/// struct User {
///     #[tag(sql = "id")]
///     id: i64,
///     #[tag(sql = "email")]
///     email: String,
/// }
///
/// impl Entity for User {
///     fn table_name(&self) -> &str {
///         "users"
///     }
///
///     fn columns(&self) -> Vec<SlotRef<'_>> {
///         vec![SlotRef::new(&self.id), SlotRef::new(&self.email)]
///     }
/// }
/// ```
pub trait Entity: Composite {
    fn table_name(&self) -> &str;

    fn columns(&self) -> Vec<SlotRef<'_>>;

    /// Whether the database generates the identifier.
    ///
    /// Return `false` to include column 0 in INSERT (and in the insert half
    /// of an upsert).
    fn auto_id(&self) -> bool {
        true
    }
}
