//! # Reflective View
//!
//! The dynamic view the runtime mints over a self-describing composite.
//! Wraps non-null shared storage and translates `MessageView` field
//! operations straight through the composite's [`Reflective`] capability.
//! Implements [`Unwrap`] so converting back to native hands out the exact
//! reference the view was built over.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use types::descriptor::{FieldDescriptor, MessageDescriptor};
use types::message::{MessageView, Reflective, StorageId, Unwrap};
use types::native::NativeValue;
use types::value::Value;
use types::MessageRef;

/// View over `MessageRef<M>` storage for a [`Reflective`] composite
///
/// Holds the storage `Arc` directly, so the non-null invariant is
/// structural: a view always has a message behind it.
pub struct ReflectView<M: Reflective> {
    storage: Arc<RwLock<M>>,
}

impl<M: Reflective> ReflectView<M> {
    pub fn over(storage: Arc<RwLock<M>>) -> Self {
        ReflectView { storage }
    }

    /// The wrapped storage as a native reference
    pub fn storage(&self) -> MessageRef<M> {
        MessageRef::from_arc(self.storage.clone())
    }
}

impl<M: Reflective> MessageView for ReflectView<M> {
    fn descriptor(&self) -> MessageDescriptor {
        M::descriptor()
    }

    fn get(&self, field: &FieldDescriptor) -> Value {
        self.storage.read().get_field(field)
    }

    fn set(&self, field: &FieldDescriptor, value: Value) {
        self.storage.write().set_field(field, value);
    }

    fn has(&self, field: &FieldDescriptor) -> bool {
        self.storage.read().has_field(field)
    }

    fn clear(&self, field: &FieldDescriptor) {
        self.storage.write().clear_field(field);
    }

    fn storage_id(&self) -> StorageId {
        StorageId(Arc::as_ptr(&self.storage) as *const () as usize)
    }

    fn as_unwrap(&self) -> Option<&dyn Unwrap> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<M: Reflective> Unwrap for ReflectView<M> {
    fn unwrap_native(&self) -> NativeValue {
        NativeValue::new(self.storage())
    }
}
