//! # Dynamic Map Handle
//!
//! Shared, lock-guarded entry storage for map fields, keyed by the closed
//! set of kinds the format admits as map keys (bool, the four integer
//! shapes, string). Same freeze discipline as [`crate::list`]: one global
//! frozen empty sentinel backs every map converter's `zero_value`, and
//! mutating it panics.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::message::StorageId;
use crate::value::Value;

static FROZEN_EMPTY: Lazy<MapHandle> = Lazy::new(|| {
    MapHandle(Arc::new(MapStorage {
        frozen: true,
        entries: RwLock::new(BTreeMap::new()),
    }))
});

/// Map key restricted to the kinds the format allows
///
/// Floats, bytes, enums, and composites are not valid map keys; keeping the
/// restriction in the type means map storage never has to reject a key at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    String(String),
}

impl MapKey {
    /// The `Value` this key converts through at the container boundary
    pub fn into_value(self) -> Value {
        match self {
            MapKey::Bool(v) => Value::Bool(v),
            MapKey::I32(v) => Value::I32(v),
            MapKey::I64(v) => Value::I64(v),
            MapKey::U32(v) => Value::U32(v),
            MapKey::U64(v) => Value::U64(v),
            MapKey::String(v) => Value::String(v),
        }
    }

    /// Key form of a dynamic value; `None` when the tag is not a key kind
    pub fn from_value(value: Value) -> Option<MapKey> {
        match value {
            Value::Bool(v) => Some(MapKey::Bool(v)),
            Value::I32(v) => Some(MapKey::I32(v)),
            Value::I64(v) => Some(MapKey::I64(v)),
            Value::U32(v) => Some(MapKey::U32(v)),
            Value::U64(v) => Some(MapKey::U64(v)),
            Value::String(v) => Some(MapKey::String(v)),
            _ => None,
        }
    }
}

struct MapStorage {
    frozen: bool,
    entries: RwLock<BTreeMap<MapKey, Value>>,
}

/// Shared dynamic map; identity is storage identity
#[derive(Clone)]
pub struct MapHandle(Arc<MapStorage>);

impl MapHandle {
    /// Fresh, independently mutable empty map
    pub fn new() -> Self {
        MapHandle(Arc::new(MapStorage {
            frozen: false,
            entries: RwLock::new(BTreeMap::new()),
        }))
    }

    /// The shared immutable empty sentinel
    pub fn frozen_empty() -> Self {
        FROZEN_EMPTY.clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.0.frozen
    }

    pub fn len(&self) -> usize {
        self.0.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.entries.read().is_empty()
    }

    pub fn get(&self, key: &MapKey) -> Option<Value> {
        self.0.entries.read().get(key).cloned()
    }

    pub fn contains(&self, key: &MapKey) -> bool {
        self.0.entries.read().contains_key(key)
    }

    pub fn insert(&self, key: MapKey, value: Value) -> Option<Value> {
        self.check_mutable();
        self.0.entries.write().insert(key, value)
    }

    pub fn remove(&self, key: &MapKey) -> Option<Value> {
        self.check_mutable();
        self.0.entries.write().remove(key)
    }

    pub fn clear(&self) {
        self.check_mutable();
        self.0.entries.write().clear();
    }

    /// Snapshot of the entries in key order
    pub fn entries(&self) -> Vec<(MapKey, Value)> {
        self.0
            .entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn storage_id(&self) -> StorageId {
        StorageId(Arc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    fn check_mutable(&self) {
        if self.0.frozen {
            frozen_mutation()
        }
    }
}

impl Default for MapHandle {
    fn default() -> Self {
        MapHandle::new()
    }
}

impl std::fmt::Debug for MapHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MapHandle(len={}{})",
            self.len(),
            if self.is_frozen() { ", frozen" } else { "" }
        )
    }
}

#[cold]
#[track_caller]
fn frozen_mutation() -> ! {
    panic!("mutation of a frozen map handle")
}
