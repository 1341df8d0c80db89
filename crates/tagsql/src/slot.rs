//! Slot references: identity handles to storage locations inside an entity.
//!
//! A [`SlotRef`] remembers *where* a value lives (address and element type)
//! and *what* to bind for it. Resolution only looks at the former, the
//! statement builder only hands out the latter.

use std::any::{Any, TypeId};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use bytes::BytesMut;
use serde::Serialize;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// Address and element type of one storage location.
#[derive(Clone, Copy)]
pub struct SlotTarget {
    addr: usize,
    type_id: TypeId,
    type_name: &'static str,
}

impl SlotTarget {
    /// Target of the location `value` points at.
    pub fn of<T: Any>(value: &T) -> Self {
        Self {
            addr: std::ptr::from_ref(value).addr(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn addr(&self) -> usize {
        self.addr
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for SlotTarget {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr && self.type_id == other.type_id
    }
}

impl Eq for SlotTarget {}

impl fmt::Debug for SlotTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotTarget")
            .field("addr", &format_args!("{:#x}", self.addr))
            .field("type", &self.type_name)
            .finish()
    }
}

/// A bind-time view over a storage location.
///
/// Adapters bind a transformed value (a coerced type, a JSON document, ...)
/// while still resolving to the declaration of the location they wrap.
pub trait SlotAdapter: ToSql + Sync {
    /// The wrapped storage location.
    fn target(&self) -> SlotTarget;
}

/// Opaque handle to one storage location owned by an entity.
///
/// Cloning is cheap: the bound value sits behind an `Arc`, so a slot can be
/// listed twice in one argument list (as upserts do) without copying it.
#[derive(Clone)]
pub struct SlotRef<'a> {
    target: SlotTarget,
    adapted: bool,
    value: Arc<dyn ToSql + Sync + 'a>,
}

impl<'a> SlotRef<'a> {
    /// Reference a field directly.
    pub fn new<T>(value: &'a T) -> Self
    where
        T: ToSql + Sync + Any,
    {
        Self {
            target: SlotTarget::of(value),
            adapted: false,
            value: Arc::new(value),
        }
    }

    /// Reference a field through an adapter.
    pub fn adapt<A>(adapter: A) -> Self
    where
        A: SlotAdapter + 'a,
    {
        Self {
            target: adapter.target(),
            adapted: true,
            value: Arc::new(adapter),
        }
    }

    /// Reference a field bound as a JSON document.
    pub fn json<T>(value: &'a T) -> Self
    where
        T: Serialize + fmt::Debug + Sync + Any,
    {
        Self::adapt(Json(value))
    }

    /// The location this slot resolves against (the wrapped one for adapters).
    pub fn target(&self) -> SlotTarget {
        self.target
    }

    pub fn is_adapted(&self) -> bool {
        self.adapted
    }

    /// The value to bind for this slot.
    pub fn as_param(&self) -> &(dyn ToSql + Sync + 'a) {
        &*self.value
    }
}

impl PartialEq for SlotRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for SlotRef<'_> {}

impl fmt::Debug for SlotRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotRef")
            .field("target", &self.target)
            .field("adapted", &self.adapted)
            .field("value", &self.value)
            .finish()
    }
}

/// Adapter binding a serializable field as a `json`/`jsonb` value.
#[derive(Debug)]
pub struct Json<'a, T>(pub &'a T);

impl<T> SlotAdapter for Json<'_, T>
where
    T: Serialize + fmt::Debug + Sync + Any,
{
    fn target(&self) -> SlotTarget {
        SlotTarget::of(self.0)
    }
}

impl<T> ToSql for Json<'_, T>
where
    T: Serialize + fmt::Debug + Sync,
{
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        let value = serde_json::to_value(self.0)?;
        value.to_sql(ty, out)
    }

    fn accepts(ty: &Type) -> bool {
        <serde_json::Value as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}
