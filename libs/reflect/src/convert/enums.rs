//! # Enum Converter
//!
//! Pure numeric-identity conversion: enum values cross the bridge as
//! signed 32-bit numbers, never through symbolic lookup. The one
//! cardinality-sensitive wrinkle is the cached default: singular fields
//! use the declared default, repeated fields use the numeric value of the
//! *first declared* member — not necessarily 0 — because repeated enum
//! fields have no per-field default to honor.

use std::any::TypeId;

use types::descriptor::FieldDescriptor;
use types::kind::Cardinality;
use types::native::NativeValue;
use types::value::{EnumNumber, Value};

use super::{fatal_binding, fatal_dynamic, fatal_native, Converter};
use crate::binding::{EnumOps, NativeType};

pub(crate) struct EnumConverter {
    ops: EnumOps,
    native_id: TypeId,
    native_name: &'static str,
    def: Value,
}

impl EnumConverter {
    pub(crate) fn bind(native: &NativeType, field: &FieldDescriptor) -> Self {
        let ops = match native.enum_ops() {
            Some(ops) => ops,
            None => fatal_binding(native, field),
        };
        let def = if field.cardinality() == Cardinality::Repeated {
            let desc = match field.enum_descriptor() {
                Some(desc) => desc,
                None => fatal_binding(native, field),
            };
            Value::Enum(EnumNumber(desc.first_value().number()))
        } else {
            field.default_value()
        };
        Self {
            ops,
            native_id: native.id(),
            native_name: native.name(),
            def,
        }
    }
}

impl Converter for EnumConverter {
    fn to_dynamic(&self, native: NativeValue) -> Value {
        if native.type_id() != self.native_id {
            fatal_native(native.type_name(), self.native_name)
        }
        Value::Enum(EnumNumber((self.ops.number_of)(&native)))
    }

    fn to_native(&self, value: Value) -> NativeValue {
        match value {
            Value::Enum(n) => (self.ops.from_number)(n.get()),
            other => fatal_dynamic(other.kind_name(), "enum"),
        }
    }

    fn is_valid_dynamic(&self, value: &Value) -> bool {
        matches!(value, Value::Enum(_))
    }

    fn is_valid_native(&self, native: &NativeValue) -> bool {
        native.type_id() == self.native_id
    }

    fn new_value(&self) -> Value {
        self.def.clone()
    }

    fn zero_value(&self) -> Value {
        self.def.clone()
    }
}
