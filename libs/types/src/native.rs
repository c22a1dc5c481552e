//! # Native Value Type Erasure
//!
//! A `NativeValue` carries one statically typed host value (a generated-code
//! scalar, enum newtype, `MessageRef`, or container handle) across the
//! type-erased converter boundary. The erased value remembers its `TypeId`
//! and static type name; converters perform exactly one type-identity check
//! per operation against the binding they were constructed with, never
//! general-purpose introspection.

use std::any::{Any, TypeId};

/// Type-erased native value
///
/// The runtime type is fixed when the value is created and observed through
/// `type_id()`/`is::<T>()`. Mismatched downcasts return the value unchanged
/// so callers can report the offending type name.
pub struct NativeValue {
    inner: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl NativeValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        NativeValue {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.inner.as_ref().type_id()
    }

    /// Static name of the erased type, for diagnostics
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref().downcast_ref::<T>()
    }

    /// Consume the erased value, recovering `T`; on mismatch the original
    /// value comes back so its type name stays reportable.
    pub fn downcast<T: Any>(self) -> Result<T, NativeValue> {
        if self.inner.as_ref().is::<T>() {
            // Checked above, the unwrap cannot fire.
            let boxed = self.inner.downcast::<T>().unwrap_or_else(|_| unreachable!());
            Ok(*boxed)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeValue<{}>", self.type_name)
    }
}
