//! # Native Type Bindings
//!
//! ## Purpose
//!
//! Binding-time description of a native type: its `TypeId`, static name,
//! and the capability table the converter layer needs for non-scalar
//! shapes. Generated code describes each of its field types through the
//! typed constructors here; the generics are instantiated per field at
//! schema-build time, so the converters themselves stay monomorphization-
//! free and pay exactly one `TypeId` comparison per operation.
//!
//! ## Capability Tables
//!
//! - [`EnumOps`]: number extraction and reconstruction for a generated
//!   enum newtype, captured as fn pointers from the [`EnumNative`] impl
//! - [`MessageOps`]: wrap/unwrap/identity/allocation for a composite,
//!   captured from either the `Reflective` or the `LegacyMessage` path,
//!   and for either reference-bound (`MessageRef<M>`) or legacy
//!   value-bound (`M`) native shapes
//!
//! Container bindings (`list_of`, `map_of`) carry their component types so
//! the dispatcher can build element converters through the same entry
//! point.

use std::any::{Any, TypeId};
use std::sync::Arc;

use types::message::{LegacyMessage, MessageHandle, MessageView, Reflective};
use types::native::NativeValue;
use types::{ListHandle, MapHandle, MessageRef};

use crate::convert::fatal_native;
use crate::legacy::wrap_legacy;
use crate::view::ReflectView;

/// Numeric identity contract of a generated enum native
///
/// Generated enums are open `i32` newtypes: `from_number` is total and
/// never consults the declared value list.
pub trait EnumNative: Any + Send + Sync + Copy + 'static {
    fn number(self) -> i32;
    fn from_number(n: i32) -> Self;
}

/// Enum capability table captured at binding time
#[derive(Clone, Copy)]
pub struct EnumOps {
    pub(crate) number_of: fn(&NativeValue) -> i32,
    pub(crate) from_number: fn(i32) -> NativeValue,
}

/// Message capability table captured at binding time
///
/// The wrap path (self-describing vs legacy) and the native shape
/// (reference vs value) are both resolved here, once, by which constructor
/// built the table.
#[derive(Clone, Copy)]
pub struct MessageOps {
    pub(crate) value_bound: bool,
    pub(crate) wrap: fn(NativeValue) -> MessageHandle,
    pub(crate) unwrap: fn(&MessageHandle) -> NativeValue,
    pub(crate) is_handle: fn(&MessageHandle) -> bool,
    pub(crate) new_handle: fn() -> MessageHandle,
}

#[derive(Clone)]
enum Shape {
    Scalar,
    Enum(EnumOps),
    Message(MessageOps),
    List {
        elem: Box<NativeType>,
    },
    Map {
        key: Box<NativeType>,
        value: Box<NativeType>,
    },
}

/// Binding-time descriptor of one native type
#[derive(Clone)]
pub struct NativeType {
    id: TypeId,
    name: &'static str,
    shape: Shape,
}

impl NativeType {
    /// A plain scalar native (`bool`, the numerics, `String`, `Blob`)
    pub fn of<T: Any + Send + Sync>() -> Self {
        NativeType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            shape: Shape::Scalar,
        }
    }

    /// A generated enum newtype
    pub fn of_enum<E: EnumNative>() -> Self {
        NativeType {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
            shape: Shape::Enum(EnumOps {
                number_of: enum_number_of::<E>,
                from_number: enum_from_number::<E>,
            }),
        }
    }

    /// A reference-bound self-describing composite (`MessageRef<M>`)
    pub fn of_message<M: Reflective>() -> Self {
        NativeType {
            id: TypeId::of::<MessageRef<M>>(),
            name: std::any::type_name::<MessageRef<M>>(),
            shape: Shape::Message(MessageOps {
                value_bound: false,
                wrap: wrap_ref::<M>,
                unwrap: unwrap_ref::<M>,
                is_handle: is_handle_for::<M>,
                new_handle: new_handle_ref::<M>,
            }),
        }
    }

    /// A value-bound self-describing composite (`M` itself); the legacy
    /// compatibility shape for generated code that embeds messages by value
    pub fn of_message_value<M: Reflective>() -> Self {
        NativeType {
            id: TypeId::of::<M>(),
            name: std::any::type_name::<M>(),
            shape: Shape::Message(MessageOps {
                value_bound: true,
                wrap: wrap_value::<M>,
                unwrap: unwrap_value::<M>,
                is_handle: is_handle_for::<M>,
                new_handle: new_handle_ref::<M>,
            }),
        }
    }

    /// A reference-bound composite reachable only through the legacy adapter
    pub fn of_legacy_message<M: LegacyMessage>() -> Self {
        NativeType {
            id: TypeId::of::<MessageRef<M>>(),
            name: std::any::type_name::<MessageRef<M>>(),
            shape: Shape::Message(MessageOps {
                value_bound: false,
                wrap: wrap_legacy_ref::<M>,
                unwrap: unwrap_legacy_ref::<M>,
                is_handle: is_legacy_handle_for::<M>,
                new_handle: new_legacy_handle::<M>,
            }),
        }
    }

    /// A value-bound composite reachable only through the legacy adapter
    pub fn of_legacy_message_value<M: LegacyMessage>() -> Self {
        NativeType {
            id: TypeId::of::<M>(),
            name: std::any::type_name::<M>(),
            shape: Shape::Message(MessageOps {
                value_bound: true,
                wrap: wrap_legacy_value::<M>,
                unwrap: unwrap_legacy_value::<M>,
                is_handle: is_legacy_handle_for::<M>,
                new_handle: new_legacy_handle::<M>,
            }),
        }
    }

    /// A repeated-field binding carrying its element type
    pub fn list_of(elem: NativeType) -> Self {
        NativeType {
            id: TypeId::of::<ListHandle>(),
            name: std::any::type_name::<ListHandle>(),
            shape: Shape::List {
                elem: Box::new(elem),
            },
        }
    }

    /// A map-field binding carrying its key and value component types
    pub fn map_of(key: NativeType, value: NativeType) -> Self {
        NativeType {
            id: TypeId::of::<MapHandle>(),
            name: std::any::type_name::<MapHandle>(),
            shape: Shape::Map {
                key: Box::new(key),
                value: Box::new(value),
            },
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn enum_ops(&self) -> Option<EnumOps> {
        match &self.shape {
            Shape::Enum(ops) => Some(*ops),
            _ => None,
        }
    }

    pub fn message_ops(&self) -> Option<MessageOps> {
        match &self.shape {
            Shape::Message(ops) => Some(*ops),
            _ => None,
        }
    }

    /// True when the binding is the legacy value-bound composite shape
    pub fn is_value_bound(&self) -> bool {
        matches!(&self.shape, Shape::Message(ops) if ops.value_bound)
    }

    /// Element type of a list binding
    pub fn elem(&self) -> Option<&NativeType> {
        match &self.shape {
            Shape::List { elem } => Some(elem),
            _ => None,
        }
    }

    /// Key component type of a map binding
    pub fn map_key(&self) -> Option<&NativeType> {
        match &self.shape {
            Shape::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Value component type of a map binding
    pub fn map_value(&self) -> Option<&NativeType> {
        match &self.shape {
            Shape::Map { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Debug for NativeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeType({})", self.name)
    }
}

fn enum_number_of<E: EnumNative>(native: &NativeValue) -> i32 {
    match native.downcast_ref::<E>() {
        Some(e) => e.number(),
        None => fatal_native(native.type_name(), std::any::type_name::<E>()),
    }
}

fn enum_from_number<E: EnumNative>(number: i32) -> NativeValue {
    NativeValue::new(E::from_number(number))
}

fn wrap_ref<M: Reflective>(native: NativeValue) -> MessageHandle {
    let r = downcast_native::<MessageRef<M>>(native);
    match r.as_arc() {
        Some(storage) => MessageHandle::new(Arc::new(ReflectView::over(storage.clone()))),
        None => MessageHandle::absent(),
    }
}

fn unwrap_ref<M: Reflective>(handle: &MessageHandle) -> NativeValue {
    match handle.view() {
        None => NativeValue::new(MessageRef::<M>::null()),
        Some(view) => unwrap_exact::<MessageRef<M>>(view.as_ref()),
    }
}

fn new_handle_ref<M: Reflective>() -> MessageHandle {
    MessageHandle::new(Arc::new(ReflectView::<M>::over(Arc::new(
        parking_lot::RwLock::new(M::default()),
    ))))
}

fn is_handle_for<M: Reflective>(handle: &MessageHandle) -> bool {
    handle_wraps::<MessageRef<M>>(handle)
}

fn wrap_value<M: Reflective>(native: NativeValue) -> MessageHandle {
    // The dynamic model only carries reference-shaped handles; an owned
    // composite gets fresh shared storage synthesized around it.
    let m = downcast_native::<M>(native);
    MessageHandle::new(Arc::new(ReflectView::over(Arc::new(
        parking_lot::RwLock::new(m),
    ))))
}

fn unwrap_value<M: Reflective>(handle: &MessageHandle) -> NativeValue {
    match handle.view() {
        None => NativeValue::new(M::default()),
        Some(view) => {
            let r = unwrap_exact::<MessageRef<M>>(view.as_ref());
            let m = r
                .downcast::<MessageRef<M>>()
                .ok()
                .and_then(|r| r.snapshot())
                .unwrap_or_default();
            NativeValue::new(m)
        }
    }
}

fn wrap_legacy_ref<M: LegacyMessage>(native: NativeValue) -> MessageHandle {
    let r = downcast_native::<MessageRef<M>>(native);
    match r.as_arc() {
        Some(storage) => wrap_legacy(storage.clone()),
        None => MessageHandle::absent(),
    }
}

fn unwrap_legacy_ref<M: LegacyMessage>(handle: &MessageHandle) -> NativeValue {
    match handle.view() {
        None => NativeValue::new(MessageRef::<M>::null()),
        Some(view) => unwrap_exact::<MessageRef<M>>(view.as_ref()),
    }
}

fn new_legacy_handle<M: LegacyMessage>() -> MessageHandle {
    wrap_legacy(Arc::new(parking_lot::RwLock::new(M::default())))
}

fn is_legacy_handle_for<M: LegacyMessage>(handle: &MessageHandle) -> bool {
    handle_wraps::<MessageRef<M>>(handle)
}

fn wrap_legacy_value<M: LegacyMessage>(native: NativeValue) -> MessageHandle {
    let m = downcast_native::<M>(native);
    wrap_legacy(Arc::new(parking_lot::RwLock::new(m)))
}

fn unwrap_legacy_value<M: LegacyMessage>(handle: &MessageHandle) -> NativeValue {
    match handle.view() {
        None => NativeValue::new(M::default()),
        Some(view) => {
            let r = unwrap_exact::<MessageRef<M>>(view.as_ref());
            let m = r
                .downcast::<MessageRef<M>>()
                .ok()
                .and_then(|r| r.snapshot())
                .unwrap_or_default();
            NativeValue::new(m)
        }
    }
}

/// Downcast an erased native or die with both type names in the message
fn downcast_native<T: Any>(native: NativeValue) -> T {
    match native.downcast::<T>() {
        Ok(v) => v,
        Err(n) => fatal_native(n.type_name(), std::any::type_name::<T>()),
    }
}

/// Recover the exact wrapped reference through the unwrap capability
fn unwrap_exact<R: Any>(view: &dyn MessageView) -> NativeValue {
    match view.as_unwrap() {
        Some(u) => {
            let native = u.unwrap_native();
            if native.is::<R>() {
                native
            } else {
                fatal_native(native.type_name(), std::any::type_name::<R>())
            }
        }
        None => fatal_native("opaque message view", std::any::type_name::<R>()),
    }
}

/// Non-fatal identity probe behind `is_valid_dynamic`
fn handle_wraps<R: Any>(handle: &MessageHandle) -> bool {
    match handle.view() {
        // One universal absent handle; every message converter accepts it.
        None => true,
        Some(view) => view
            .as_unwrap()
            .map_or(false, |u| u.unwrap_native().is::<R>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Blob;

    #[test]
    fn test_scalar_binding_identity() {
        let t = NativeType::of::<i32>();
        assert_eq!(t.id(), TypeId::of::<i32>());
        assert_eq!(t.name(), "i32");
        assert!(t.enum_ops().is_none());
        assert!(t.message_ops().is_none());
    }

    #[test]
    fn test_container_component_types() {
        let t = NativeType::list_of(NativeType::of::<String>());
        assert_eq!(t.id(), TypeId::of::<ListHandle>());
        assert_eq!(t.elem().unwrap().id(), TypeId::of::<String>());
        assert!(t.map_key().is_none());

        let m = NativeType::map_of(NativeType::of::<u64>(), NativeType::of::<Blob>());
        assert_eq!(m.id(), TypeId::of::<MapHandle>());
        assert_eq!(m.map_key().unwrap().id(), TypeId::of::<u64>());
        assert_eq!(m.map_value().unwrap().id(), TypeId::of::<Blob>());
    }
}
