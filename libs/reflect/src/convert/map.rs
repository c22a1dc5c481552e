//! # Map Converter (container boundary)
//!
//! Boundary converter for map fields. Same discipline as the list
//! converter: shallow handle validation here, key/value kind enforcement
//! delegated to the component converters built through the singular
//! dispatch on the binding's component types.

use types::descriptor::FieldDescriptor;
use types::native::NativeValue;
use types::value::Value;
use types::MapHandle;

use super::{bind_singular, fatal_binding, fatal_dynamic, fatal_native, Converter};
use crate::binding::NativeType;

/// Converter for map-shaped fields, carrying its key/value converters
pub struct MapConverter {
    key: Box<dyn Converter>,
    value: Box<dyn Converter>,
}

pub fn bind_map(native: &NativeType, field: &FieldDescriptor) -> MapConverter {
    let (key_ty, value_ty) = match (native.map_key(), native.map_value()) {
        (Some(k), Some(v)) => (k, v),
        _ => fatal_binding(native, field),
    };
    let (key_fd, value_fd) = match (field.map_key(), field.map_value()) {
        (Some(k), Some(v)) => (k, v),
        _ => fatal_binding(native, field),
    };
    MapConverter {
        key: bind_singular(key_ty, key_fd),
        value: bind_singular(value_ty, value_fd),
    }
}

impl MapConverter {
    /// The key converter consumed by container mechanics
    pub fn key(&self) -> &dyn Converter {
        self.key.as_ref()
    }

    /// The value converter consumed by container mechanics
    pub fn value(&self) -> &dyn Converter {
        self.value.as_ref()
    }
}

impl Converter for MapConverter {
    fn to_dynamic(&self, native: NativeValue) -> Value {
        match native.downcast::<MapHandle>() {
            Ok(handle) => Value::Map(handle),
            Err(n) => fatal_native(n.type_name(), "MapHandle"),
        }
    }

    fn to_native(&self, value: Value) -> NativeValue {
        match value {
            Value::Map(handle) => NativeValue::new(handle),
            other => fatal_dynamic(other.kind_name(), "map"),
        }
    }

    fn is_valid_dynamic(&self, value: &Value) -> bool {
        matches!(value, Value::Map(_))
    }

    fn is_valid_native(&self, native: &NativeValue) -> bool {
        native.is::<MapHandle>()
    }

    fn new_value(&self) -> Value {
        Value::Map(MapHandle::new())
    }

    fn zero_value(&self) -> Value {
        Value::Map(MapHandle::frozen_empty())
    }
}
