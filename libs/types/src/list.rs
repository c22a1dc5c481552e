//! # Dynamic List Handle
//!
//! Shared, lock-guarded element storage for repeated fields. A handle is
//! either mutable (minted by a list converter's `new_value`) or frozen; the
//! one frozen handle that matters is the global empty sentinel backing every
//! list converter's `zero_value`, so "field not present" never allocates.
//! Mutating a frozen handle is a programming defect and panics.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::message::StorageId;
use crate::value::Value;

static FROZEN_EMPTY: Lazy<ListHandle> = Lazy::new(|| {
    ListHandle(Arc::new(ListStorage {
        frozen: true,
        items: RwLock::new(Vec::new()),
    }))
});

struct ListStorage {
    frozen: bool,
    items: RwLock<Vec<Value>>,
}

/// Shared dynamic list; identity is storage identity
#[derive(Clone)]
pub struct ListHandle(Arc<ListStorage>);

impl ListHandle {
    /// Fresh, independently mutable empty list
    pub fn new() -> Self {
        ListHandle(Arc::new(ListStorage {
            frozen: false,
            items: RwLock::new(Vec::new()),
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
        self.0.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.items.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.items.read().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.check_mutable();
        self.0.items.write().push(value);
    }

    pub fn set(&self, index: usize, value: Value) {
        self.check_mutable();
        let mut items = self.0.items.write();
        match items.get_mut(index) {
            Some(slot) => *slot = value,
            None => index_out_of_bounds(index, items.len()),
        }
    }

    pub fn clear(&self) {
        self.check_mutable();
        self.0.items.write().clear();
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

impl Default for ListHandle {
    fn default() -> Self {
        ListHandle::new()
    }
}

impl std::fmt::Debug for ListHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ListHandle(len={}{})",
            self.len(),
            if self.is_frozen() { ", frozen" } else { "" }
        )
    }
}

#[cold]
#[track_caller]
fn frozen_mutation() -> ! {
    panic!("mutation of a frozen list handle")
}

#[cold]
#[track_caller]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("list index {index} out of bounds (len {len})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_lists_are_independent() {
        let a = ListHandle::new();
        let b = ListHandle::new();
        a.push(Value::I32(1));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 0);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_clones_share_storage() {
        let a = ListHandle::new();
        let b = a.clone();
        b.push(Value::Bool(true));
        assert_eq!(a.get(0), Some(Value::Bool(true)));
        assert_eq!(a.storage_id(), b.storage_id());
    }

    #[test]
    fn test_frozen_sentinel_is_shared() {
        assert!(ListHandle::frozen_empty().ptr_eq(&ListHandle::frozen_empty()));
        assert!(ListHandle::frozen_empty().is_frozen());
        assert!(!ListHandle::new().is_frozen());
    }

    #[test]
    #[should_panic(expected = "frozen list handle")]
    fn test_frozen_mutation_panics() {
        ListHandle::frozen_empty().push(Value::I32(1));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let list = ListHandle::new();
        list.push(Value::I32(1));
        list.set(0, Value::I32(9));
        assert_eq!(list.get(0), Some(Value::I32(9)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    #[should_panic(expected = "list index 1 out of bounds (len 1)")]
    fn test_set_out_of_bounds_panics() {
        let list = ListHandle::new();
        list.push(Value::I32(1));
        list.set(1, Value::I32(2));
    }
}
