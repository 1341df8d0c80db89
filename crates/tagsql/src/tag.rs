//! Resolution of a slot reference to its field declaration.
//!
//! The composition tree of a value is flattened into a [`FieldIndex`]:
//! fields are visited in reverse declaration order, each followed by the
//! flattened fields of the sub-composite it embeds. The first entry at the
//! slot's address and of the slot's type wins. A struct-typed field and its
//! first sub-field share an address; the type check tells them apart, so a
//! slot into a plain struct column is not mistaken for the column itself.
//! Fields embedded through `Box`/`Rc`/`Arc` match on address alone, since
//! nothing else lives at the pointer's own storage.
//!
//! Reverse order decides which declaration wins when two fields share an
//! address with no type to tell them apart (zero-sized fields).

use crate::composite::{Composite, FieldDecl, FieldKind};
use crate::error::{OrmError, OrmResult};
use crate::slot::{SlotRef, SlotTarget};

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    target: SlotTarget,
    decl: &'static FieldDecl,
}

impl IndexEntry {
    fn matches(&self, slot: SlotTarget) -> bool {
        if self.target.addr() != slot.addr() {
            return false;
        }
        match self.decl.kind {
            FieldKind::Column | FieldKind::Embedded => self.target.type_id() == slot.type_id(),
            FieldKind::EmbeddedRef => true,
        }
    }
}

/// A matched field: its declaration and the storage it was found at.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch {
    pub decl: &'static FieldDecl,
    pub target: SlotTarget,
}

/// Flattened field declarations of one composite value.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    owner: &'static str,
    entries: Vec<IndexEntry>,
}

impl FieldIndex {
    pub fn build(container: &dyn Composite) -> Self {
        let mut entries = Vec::new();
        flatten(container, &mut entries);
        Self {
            owner: container.composite_name(),
            entries,
        }
    }

    /// Number of declared fields, embedded ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the field declared at `slot`.
    pub fn find(&self, slot: SlotTarget) -> OrmResult<FieldMatch> {
        self.entries
            .iter()
            .find(|entry| entry.matches(slot))
            .map(|entry| FieldMatch {
                decl: entry.decl,
                target: entry.target,
            })
            .ok_or_else(|| OrmError::field_not_supported(self.owner, slot.type_name()))
    }

    /// Find the field declared at `slot` and read its column name under `tag`.
    pub fn column_name(&self, slot: &SlotRef<'_>, tag: &str) -> OrmResult<&'static str> {
        self.find(slot.target())?.decl.column_name(tag)
    }
}

fn flatten(container: &dyn Composite, out: &mut Vec<IndexEntry>) {
    for field in container.declared_fields().into_iter().rev() {
        out.push(IndexEntry {
            target: field.target,
            decl: field.decl,
        });
        if let Some(inner) = field.embedded {
            flatten(inner, out);
        }
    }
}

/// Find the declaration of the field `slot` points at inside `container`.
pub fn lookup(container: &dyn Composite, slot: &SlotRef<'_>) -> OrmResult<&'static FieldDecl> {
    FieldIndex::build(container)
        .find(slot.target())
        .map(|found| found.decl)
}

/// Column name of the field `slot` points at inside `container`.
pub fn column_name(
    container: &dyn Composite,
    slot: &SlotRef<'_>,
    tag: &str,
) -> OrmResult<&'static str> {
    FieldIndex::build(container).column_name(slot, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::DeclaredField;
    use std::sync::Arc;

    #[repr(C)]
    #[derive(Debug, Default, serde::Serialize)]
    struct Audit {
        created_by: i64,
        note: String,
    }

    impl Composite for Audit {
        fn declared_fields(&self) -> Vec<DeclaredField<'_>> {
            static FIELDS: &[FieldDecl] = &[
                FieldDecl::column("created_by", &[("sql", "created_by")]),
                FieldDecl::column("note", &[("sql", "note,nullable")]),
            ];
            vec![
                DeclaredField::column(&FIELDS[0], &self.created_by),
                DeclaredField::column(&FIELDS[1], &self.note),
            ]
        }
    }

    #[repr(C)]
    #[derive(Debug, Default)]
    struct Post {
        audit: Audit,
        title: String,
        draft: bool,
    }

    impl Composite for Post {
        fn declared_fields(&self) -> Vec<DeclaredField<'_>> {
            static FIELDS: &[FieldDecl] = &[
                FieldDecl::embedded("audit", &[("sql", "audit")]),
                FieldDecl::column("title", &[("sql", "title"), ("json", "Title")]),
                FieldDecl::column("draft", &[("json", "draft")]),
            ];
            vec![
                DeclaredField::embedded(&FIELDS[0], &self.audit, &self.audit),
                DeclaredField::column(&FIELDS[1], &self.title),
                DeclaredField::column(&FIELDS[2], &self.draft),
            ]
        }
    }

    #[repr(C)]
    #[derive(Debug, Default)]
    struct Theme {
        name: String,
    }

    /// `theme` is a plain column of struct type, not embedded.
    #[repr(C)]
    #[derive(Debug, Default)]
    struct Profile {
        theme: Theme,
        id: i64,
    }

    impl Composite for Profile {
        fn declared_fields(&self) -> Vec<DeclaredField<'_>> {
            static FIELDS: &[FieldDecl] = &[
                FieldDecl::column("theme", &[("sql", "theme")]),
                FieldDecl::column("id", &[("sql", "id")]),
            ];
            vec![
                DeclaredField::column(&FIELDS[0], &self.theme),
                DeclaredField::column(&FIELDS[1], &self.id),
            ]
        }
    }

    #[derive(Debug, Default)]
    struct SharedPost {
        audit: Arc<Audit>,
        title: String,
    }

    impl Composite for SharedPost {
        fn declared_fields(&self) -> Vec<DeclaredField<'_>> {
            static FIELDS: &[FieldDecl] = &[
                FieldDecl::embedded_ref("audit", &[]),
                FieldDecl::column("title", &[("sql", "title")]),
            ];
            vec![
                DeclaredField::embedded(&FIELDS[0], &self.audit, &*self.audit),
                DeclaredField::column(&FIELDS[1], &self.title),
            ]
        }
    }

    #[test]
    fn resolves_direct_field() {
        let post = Post::default();
        let name = column_name(&post, &SlotRef::new(&post.title), "sql").unwrap();
        assert_eq!(name, "title");
        let name = column_name(&post, &SlotRef::new(&post.title), "json").unwrap();
        assert_eq!(name, "Title");
    }

    #[test]
    fn embedded_first_field_wins_over_embedding() {
        let post = Post::default();
        // repr(C): the embedded struct and its first field share an address.
        assert_eq!(
            SlotTarget::of(&post.audit).addr(),
            SlotTarget::of(&post.audit.created_by).addr()
        );

        let name = column_name(&post, &SlotRef::new(&post.audit.created_by), "sql").unwrap();
        assert_eq!(name, "created_by");

        let name = column_name(&post, &SlotRef::json(&post.audit), "sql").unwrap();
        assert_eq!(name, "audit");
    }

    #[test]
    fn resolves_second_embedded_field() {
        let post = Post::default();
        let decl = lookup(&post, &SlotRef::new(&post.audit.note)).unwrap();
        assert_eq!(decl.ident, "note");
        assert_eq!(decl.column_name("sql").unwrap(), "note");
    }

    #[test]
    fn recurses_through_pointer() {
        let post = SharedPost::default();
        let name = column_name(&post, &SlotRef::new(&post.audit.note), "sql").unwrap();
        assert_eq!(name, "note");
    }

    #[test]
    fn foreign_slot_is_not_supported() {
        let post = Post::default();
        let elsewhere = String::from("not a field");
        let err = column_name(&post, &SlotRef::new(&elsewhere), "sql").unwrap_err();
        assert!(err.is_field_not_supported());
        assert_eq!(
            err,
            OrmError::field_not_supported(
                std::any::type_name::<Post>(),
                std::any::type_name::<String>()
            )
        );
    }

    #[test]
    fn field_of_another_value_is_not_supported() {
        let post = Post::default();
        let other = Post::default();
        let err = lookup(&post, &SlotRef::new(&other.title)).unwrap_err();
        assert!(err.is_field_not_supported());
    }

    #[test]
    fn untagged_field_reports_tag_missing() {
        let post = Post::default();
        let err = column_name(&post, &SlotRef::new(&post.draft), "sql").unwrap_err();
        assert_eq!(err, OrmError::tag_missing("draft", "sql"));
    }

    #[test]
    fn struct_column_does_not_claim_its_first_sub_field() {
        let profile = Profile::default();
        assert_eq!(
            SlotTarget::of(&profile.theme).addr(),
            SlotTarget::of(&profile.theme.name).addr()
        );

        let err = lookup(&profile, &SlotRef::new(&profile.theme.name)).unwrap_err();
        assert!(err.is_field_not_supported());

        let found = FieldIndex::build(&profile)
            .find(SlotTarget::of(&profile.theme))
            .unwrap();
        assert_eq!(found.decl.ident, "theme");
    }

    #[test]
    fn index_flattens_embedded_fields() {
        let post = Post::default();
        assert_eq!(FieldIndex::build(&post).len(), 5);
        let shared = SharedPost::default();
        assert_eq!(FieldIndex::build(&shared).len(), 4);
    }
}
