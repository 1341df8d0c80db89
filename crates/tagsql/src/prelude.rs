//! Convenient imports for typical `tagsql` usage.
//!
//! ```ignore
//! use tagsql::prelude::*;
//! ```

pub use crate::{Builder, Composite, Dialect, Entity, Json, OrmError, OrmResult, SlotRef, Statement};
