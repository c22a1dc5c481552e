//! # Message Converter
//!
//! The composite-kind converter. All shape decisions (reference-bound vs
//! value-bound native, self-describing vs legacy wrap path) were resolved
//! at binding time into the [`MessageOps`] capability table; the converter
//! itself performs the bound-type check and drives the table.
//!
//! `new_value` always allocates fresh storage, so two handles from
//! consecutive calls never alias. `zero_value` is the absent handle and
//! allocates nothing. `to_native` goes through the view's unwrap
//! capability, so a reference that entered the dynamic world leaves it as
//! the same reference.

use std::any::TypeId;

use types::descriptor::FieldDescriptor;
use types::message::MessageHandle;
use types::native::NativeValue;
use types::value::Value;

use super::{fatal_binding, fatal_dynamic, fatal_native, Converter};
use crate::binding::{MessageOps, NativeType};

pub(crate) struct MessageConverter {
    ops: MessageOps,
    native_id: TypeId,
    native_name: &'static str,
}

impl MessageConverter {
    pub(crate) fn bind(native: &NativeType, field: &FieldDescriptor) -> Self {
        let ops = match native.message_ops() {
            Some(ops) => ops,
            None => fatal_binding(native, field),
        };
        Self {
            ops,
            native_id: native.id(),
            native_name: native.name(),
        }
    }
}

impl Converter for MessageConverter {
    fn to_dynamic(&self, native: NativeValue) -> Value {
        if native.type_id() != self.native_id {
            fatal_native(native.type_name(), self.native_name)
        }
        Value::Message((self.ops.wrap)(native))
    }

    fn to_native(&self, value: Value) -> NativeValue {
        match value {
            Value::Message(handle) => (self.ops.unwrap)(&handle),
            other => fatal_dynamic(other.kind_name(), "message"),
        }
    }

    fn is_valid_dynamic(&self, value: &Value) -> bool {
        match value {
            Value::Message(handle) => (self.ops.is_handle)(handle),
            _ => false,
        }
    }

    fn is_valid_native(&self, native: &NativeValue) -> bool {
        native.type_id() == self.native_id
    }

    fn new_value(&self) -> Value {
        Value::Message((self.ops.new_handle)())
    }

    fn zero_value(&self) -> Value {
        Value::Message(MessageHandle::absent())
    }
}
