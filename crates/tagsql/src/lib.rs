//! # tagsql
//!
//! Map entities to parameterized SQL without a schema language.
//!
//! An entity names its table and lists references to its own fields. Each
//! reference is resolved back to the column name declared on the field
//! (`#[tag(sql = "...")]`), and the resolved list is rendered as SELECT,
//! INSERT, UPDATE or UPSERT text with dialect-correct placeholders.
//!
//! ## Features
//!
//! - **Identity-based**: columns are found by the address of the field a slot
//!   points at, through embedded sub-structs and adapters
//! - **Dialects**: Postgres (`$1`, `ON CONFLICT`) and MySQL (`?`, `ON DUPLICATE KEY`)
//! - **No global state**: the dialect and tag name live in a [`Builder`] value
//! - **Fail fast**: a slot without a declared column is an error, never bad SQL
//!
//! ## Example
//!
//! ```ignore
//! use tagsql::prelude::*;
//!
//! #[derive(Composite)]
//! struct User {
//!     #[tag(sql = "id")]
//!     id: i64,
//!     #[tag(sql = "email")]
//!     email: String,
//! }
//!
//! impl Entity for User {
//!     fn table_name(&self) -> &str {
//!         "users"
//!     }
//!
//!     fn columns(&self) -> Vec<SlotRef<'_>> {
//!         vec![SlotRef::new(&self.id), SlotRef::new(&self.email)]
//!     }
//! }
//!
//! let user = User { id: 1, email: "a@example.com".into() };
//! let stmt = Builder::new(Dialect::Postgres).upsert_one(&user)?;
//! assert_eq!(
//!     stmt.sql(),
//!     "INSERT INTO users (email) VALUES ($1) ON CONFLICT (id) DO UPDATE SET email = $2"
//! );
//! ```

pub mod builder;
pub mod composite;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod named;
pub mod prelude;
pub mod slot;
pub mod statement;
pub mod tag;

pub use builder::{Builder, DEFAULT_TAG};
pub use composite::{Composite, DeclaredField, FieldDecl, FieldKind};
pub use dialect::Dialect;
pub use entity::Entity;
pub use error::{OrmError, OrmResult};
pub use named::{ColNames, NamedFields, NamedSlot};
pub use slot::{Json, SlotAdapter, SlotRef, SlotTarget};
pub use statement::Statement;
pub use tag::FieldIndex;

#[cfg(feature = "derive")]
pub use tagsql_derive::Composite;
