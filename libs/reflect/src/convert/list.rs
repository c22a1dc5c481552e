//! # List Converter (container boundary)
//!
//! Boundary converter for repeated fields. The handle itself is validated
//! shallowly; element kinds are not re-checked here — the per-element
//! converter, built through the same singular dispatch on the binding's
//! element type, enforces them when elements are converted. Container
//! iteration mechanics live with the callers that own the containers.

use types::descriptor::FieldDescriptor;
use types::native::NativeValue;
use types::value::Value;
use types::ListHandle;

use super::{bind_singular, fatal_binding, fatal_dynamic, fatal_native, Converter};
use crate::binding::NativeType;

/// Converter for list-shaped fields, carrying its element converter
pub struct ListConverter {
    elem: Box<dyn Converter>,
}

pub fn bind_list(native: &NativeType, field: &FieldDescriptor) -> ListConverter {
    let elem_ty = match native.elem() {
        Some(ty) => ty,
        None => fatal_binding(native, field),
    };
    ListConverter {
        elem: bind_singular(elem_ty, field),
    }
}

impl ListConverter {
    /// The per-element converter consumed by container mechanics
    pub fn element(&self) -> &dyn Converter {
        self.elem.as_ref()
    }
}

impl Converter for ListConverter {
    fn to_dynamic(&self, native: NativeValue) -> Value {
        match native.downcast::<ListHandle>() {
            Ok(handle) => Value::List(handle),
            Err(n) => fatal_native(n.type_name(), "ListHandle"),
        }
    }

    fn to_native(&self, value: Value) -> NativeValue {
        match value {
            Value::List(handle) => NativeValue::new(handle),
            other => fatal_dynamic(other.kind_name(), "list"),
        }
    }

    fn is_valid_dynamic(&self, value: &Value) -> bool {
        matches!(value, Value::List(_))
    }

    fn is_valid_native(&self, native: &NativeValue) -> bool {
        native.is::<ListHandle>()
    }

    fn new_value(&self) -> Value {
        Value::List(ListHandle::new())
    }

    fn zero_value(&self) -> Value {
        Value::List(ListHandle::frozen_empty())
    }
}
