//! # Legacy Message Adapter
//!
//! Fallback view for composites that predate self-description and expose
//! only the narrow [`LegacyMessage`] get/set/has/clear contract. The
//! adapter presents the same `MessageView` surface as [`crate::view`], so
//! the conversion layer treats both shapes identically after binding time.
//! Wraps are logged at debug level; legacy traffic is worth noticing.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use types::descriptor::{FieldDescriptor, MessageDescriptor};
use types::message::{LegacyMessage, MessageHandle, MessageView, StorageId, Unwrap};
use types::native::NativeValue;
use types::value::Value;
use types::MessageRef;

/// View over `MessageRef<M>` storage for a [`LegacyMessage`] composite
pub struct LegacyView<M: LegacyMessage> {
    storage: Arc<RwLock<M>>,
}

impl<M: LegacyMessage> LegacyView<M> {
    pub fn over(storage: Arc<RwLock<M>>) -> Self {
        LegacyView { storage }
    }

    /// The wrapped storage as a native reference
    pub fn storage(&self) -> MessageRef<M> {
        MessageRef::from_arc(self.storage.clone())
    }
}

/// Adapt legacy storage into a dynamic handle
pub fn wrap_legacy<M: LegacyMessage>(storage: Arc<RwLock<M>>) -> MessageHandle {
    debug!(
        message = std::any::type_name::<M>(),
        "wrapping legacy composite"
    );
    MessageHandle::new(Arc::new(LegacyView::over(storage)))
}

impl<M: LegacyMessage> MessageView for LegacyView<M> {
    fn descriptor(&self) -> MessageDescriptor {
        M::legacy_descriptor()
    }

    fn get(&self, field: &FieldDescriptor) -> Value {
        self.storage.read().legacy_get(field)
    }

    fn set(&self, field: &FieldDescriptor, value: Value) {
        self.storage.write().legacy_set(field, value);
    }

    fn has(&self, field: &FieldDescriptor) -> bool {
        self.storage.read().legacy_has(field)
    }

    fn clear(&self, field: &FieldDescriptor) {
        self.storage.write().legacy_clear(field);
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

impl<M: LegacyMessage> Unwrap for LegacyView<M> {
    fn unwrap_native(&self) -> NativeValue {
        NativeValue::new(self.storage())
    }
}
