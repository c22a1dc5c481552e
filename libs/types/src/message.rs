//! # Message Handles and Reflective Capabilities
//!
//! ## Purpose
//!
//! The message side of the native/dynamic bridge. Native composite values
//! live in shared storage reached through `MessageRef<M>`; the dynamic layer
//! sees them through `MessageHandle`, a nullable handle over an object-safe
//! reflective view. Handle identity is storage identity: two handles are the
//! same message exactly when they point at the same underlying storage.
//!
//! ## Capability Surface
//!
//! - [`Reflective`]: a generated composite that can describe itself and
//!   expose field operations; the runtime mints its reflective view from
//!   this capability
//! - [`LegacyMessage`]: the narrow get/set/has/clear adapter contract for
//!   older, non-self-describing composite shapes; the legacy adapter in
//!   `libs/reflect` wraps it into the same view
//! - [`Unwrap`]: a view's ability to report the exact original native
//!   reference it wraps, so container round trips preserve identity without
//!   cloning
//!
//! ## Concurrency
//!
//! Storage is guarded by a `parking_lot::RwLock`; reflective `get` takes a
//! read lock, `set`/`clear` a write lock. Handles and refs are `Clone` and
//! freely shareable across threads.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::native::NativeValue;
use crate::value::Value;

/// Identity token for handle storage
///
/// Equal tokens mean same underlying storage. The absent handle (and the
/// null `MessageRef`) always report `StorageId(0)`, so every absent handle
/// shares one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageId(pub usize);

impl StorageId {
    pub const ABSENT: StorageId = StorageId(0);
}

/// Nullable shared reference to owned message storage
///
/// The runtime's rendering of a pointer-typed message field. Cloning is
/// cheap (one `Arc` bump); `ptr_eq` compares storage identity, not contents.
pub struct MessageRef<M>(Option<Arc<RwLock<M>>>);

impl<M> Clone for MessageRef<M> {
    fn clone(&self) -> Self {
        MessageRef(self.0.clone())
    }
}

impl<M> MessageRef<M> {
    /// Allocate fresh storage holding `value`
    pub fn new(value: M) -> Self {
        MessageRef(Some(Arc::new(RwLock::new(value))))
    }

    /// The null reference (field not present)
    pub fn null() -> Self {
        MessageRef(None)
    }

    /// Re-wrap existing storage; used by views handing back the exact
    /// reference they were built over
    pub fn from_arc(storage: Arc<RwLock<M>>) -> Self {
        MessageRef(Some(storage))
    }

    /// The underlying storage; `None` for the null reference
    pub fn as_arc(&self) -> Option<&Arc<RwLock<M>>> {
        self.0.as_ref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Same-storage identity; two nulls are identical
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn storage_id(&self) -> StorageId {
        match &self.0 {
            Some(arc) => StorageId(Arc::as_ptr(arc) as usize),
            None => StorageId::ABSENT,
        }
    }

    /// Read access to the referenced value; `None` for the null reference
    pub fn with<R>(&self, f: impl FnOnce(&M) -> R) -> Option<R> {
        self.0.as_ref().map(|arc| f(&arc.read()))
    }

    /// Write access to the referenced value; `None` for the null reference
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        self.0.as_ref().map(|arc| f(&mut arc.write()))
    }
}

impl<M: Clone> MessageRef<M> {
    /// Clone of the referenced value; `None` for the null reference
    pub fn snapshot(&self) -> Option<M> {
        self.with(|m| m.clone())
    }
}

impl<M> Default for MessageRef<M> {
    fn default() -> Self {
        MessageRef::null()
    }
}

impl<M> std::fmt::Debug for MessageRef<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "MessageRef(null)")
        } else {
            write!(f, "MessageRef({:#x})", self.storage_id().0)
        }
    }
}

/// Self-description capability of a generated composite
///
/// A `Reflective` composite can name its schema and answer field operations
/// against its own fields; the runtime mints the dynamic view directly from
/// this, with no adapter in between.
pub trait Reflective: Default + Clone + Send + Sync + 'static {
    fn descriptor() -> MessageDescriptor;
    fn get_field(&self, field: &FieldDescriptor) -> Value;
    fn set_field(&mut self, field: &FieldDescriptor, value: Value);
    fn has_field(&self, field: &FieldDescriptor) -> bool;
    fn clear_field(&mut self, field: &FieldDescriptor);
}

/// Adapter contract for non-self-describing composites
///
/// Same narrow field-operation surface as [`Reflective`], kept as a separate
/// trait so the legacy wrap path stays an explicit, visible branch at
/// binding time.
pub trait LegacyMessage: Default + Clone + Send + Sync + 'static {
    fn legacy_descriptor() -> MessageDescriptor;
    fn legacy_get(&self, field: &FieldDescriptor) -> Value;
    fn legacy_set(&mut self, field: &FieldDescriptor, value: Value);
    fn legacy_has(&self, field: &FieldDescriptor) -> bool;
    fn legacy_clear(&mut self, field: &FieldDescriptor);
}

/// A view's ability to surrender the exact native reference it wraps
///
/// Probed by message converters before any reflective fallback so that a
/// value which entered the dynamic world from a native reference leaves it
/// as that same reference.
pub trait Unwrap {
    /// The original native reference, erased (a `MessageRef<M>` clone)
    fn unwrap_native(&self) -> NativeValue;
}

/// Object-safe reflective view over message storage
///
/// Implementations wrap a non-null `MessageRef<M>` and translate field
/// operations through the composite's capability ([`Reflective`] or
/// [`LegacyMessage`]).
pub trait MessageView: Send + Sync {
    fn descriptor(&self) -> MessageDescriptor;
    fn get(&self, field: &FieldDescriptor) -> Value;
    fn set(&self, field: &FieldDescriptor, value: Value);
    fn has(&self, field: &FieldDescriptor) -> bool;
    fn clear(&self, field: &FieldDescriptor);

    /// Identity of the wrapped storage
    fn storage_id(&self) -> StorageId;

    /// Unwrap capability probe; `None` when the view cannot surrender its
    /// native reference
    fn as_unwrap(&self) -> Option<&dyn Unwrap> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Nullable dynamic message handle
///
/// `absent()` is the Zero() of every message converter: conceptually a null
/// reference, allocating nothing. Equality is storage identity.
#[derive(Clone)]
pub struct MessageHandle(Option<Arc<dyn MessageView>>);

impl MessageHandle {
    /// The universal absent handle
    pub fn absent() -> Self {
        MessageHandle(None)
    }

    pub fn new(view: Arc<dyn MessageView>) -> Self {
        MessageHandle(Some(view))
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    pub fn view(&self) -> Option<&Arc<dyn MessageView>> {
        self.0.as_ref()
    }

    pub fn storage_id(&self) -> StorageId {
        match &self.0 {
            Some(view) => view.storage_id(),
            None => StorageId::ABSENT,
        }
    }
}

impl PartialEq for MessageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.storage_id() == other.storage_id()
    }
}

impl Eq for MessageHandle {}

impl std::fmt::Debug for MessageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "MessageHandle(absent)"),
            Some(view) => write!(
                f,
                "MessageHandle({} @ {:#x})",
                view.descriptor().name(),
                view.storage_id().0
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_ref_identity() {
        let a: MessageRef<i32> = MessageRef::null();
        let b: MessageRef<i32> = MessageRef::null();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.storage_id(), StorageId::ABSENT);
    }

    #[test]
    fn test_distinct_storage_distinct_identity() {
        let a = MessageRef::new(1u8);
        let b = MessageRef::new(1u8);
        assert!(!a.ptr_eq(&b));
        assert_ne!(a.storage_id(), b.storage_id());
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn test_ref_read_write() {
        let r = MessageRef::new(10i64);
        r.with_mut(|v| *v += 5);
        assert_eq!(r.with(|v| *v), Some(15));
        assert_eq!(MessageRef::<i64>::null().with(|v| *v), None);
    }

    #[test]
    fn test_absent_handles_share_identity() {
        assert_eq!(MessageHandle::absent(), MessageHandle::absent());
        assert_eq!(MessageHandle::absent().storage_id(), StorageId::ABSENT);
    }
}
