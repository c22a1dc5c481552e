//! # Scalar Converter Family
//!
//! The nine primitive-kind converters. The seven fixed-shape ones (bool,
//! the four integer width/signedness combinations, the two floats) differ
//! only in their bound native type, value tag, and zero, so they come out
//! of one declarative macro. String and Bytes are written out longhand:
//! both kinds accept either a text-typed (`String`) or blob-typed (`Blob`)
//! native binding, and the text-typed bindings canonicalize empty to the
//! absent blob, which changes the structure of the conversion itself.

use types::descriptor::FieldDescriptor;
use types::native::NativeValue;
use types::value::{Blob, Value};

use super::{fatal_dynamic, fatal_native, resolve_default, Converter};
use crate::binding::NativeType;

/// Generate one fixed-shape scalar converter
///
/// Each instance binds one primitive kind to one native type and caches
/// one default dynamic value, resolved at construction: the declared
/// default for singular fields, the kind's zero for repeated ones.
macro_rules! scalar_converter {
    (
        $(#[$meta:meta])*
        $name:ident, $native:ty, $variant:ident, $zero:expr, $kind_name:literal
    ) => {
        paste::paste! {
            $(#[$meta])*
            pub(crate) struct [<$name Converter>] {
                def: Value,
            }

            impl [<$name Converter>] {
                pub(crate) fn bind(field: &FieldDescriptor) -> Self {
                    Self {
                        def: resolve_default(field, Value::$variant($zero)),
                    }
                }
            }

            impl Converter for [<$name Converter>] {
                fn to_dynamic(&self, native: NativeValue) -> Value {
                    match native.downcast::<$native>() {
                        Ok(v) => Value::$variant(v),
                        Err(n) => fatal_native(n.type_name(), stringify!($native)),
                    }
                }

                fn to_native(&self, value: Value) -> NativeValue {
                    match value {
                        Value::$variant(v) => NativeValue::new(v),
                        other => fatal_dynamic(other.kind_name(), $kind_name),
                    }
                }

                fn is_valid_dynamic(&self, value: &Value) -> bool {
                    matches!(value, Value::$variant(_))
                }

                fn is_valid_native(&self, native: &NativeValue) -> bool {
                    native.is::<$native>()
                }

                fn new_value(&self) -> Value {
                    self.def.clone()
                }

                fn zero_value(&self) -> Value {
                    self.def.clone()
                }
            }
        }
    };
}

scalar_converter!(
    /// Bool kind over `bool` natives
    Bool, bool, Bool, false, "bool"
);
scalar_converter!(
    /// Int32/Sint32/Sfixed32 kinds over `i32` natives
    I32, i32, I32, 0, "int32"
);
scalar_converter!(
    /// Int64/Sint64/Sfixed64 kinds over `i64` natives
    I64, i64, I64, 0, "int64"
);
scalar_converter!(
    /// Uint32/Fixed32 kinds over `u32` natives
    U32, u32, U32, 0, "uint32"
);
scalar_converter!(
    /// Uint64/Fixed64 kinds over `u64` natives
    U64, u64, U64, 0, "uint64"
);
scalar_converter!(
    /// Float kind over `f32` natives
    F32, f32, F32, 0.0, "float"
);
scalar_converter!(
    /// Double kind over `f64` natives
    F64, f64, F64, 0.0, "double"
);

/// String kind over either `String` or `Blob` natives
///
/// The blob-typed binding canonicalizes on the way back: a dynamic empty
/// string becomes the absent blob, never a zero-length allocated one. Text
/// recovered from blob storage decodes lossily; string fields are expected
/// to hold UTF-8 and this layer does not validate.
pub(crate) struct StringConverter {
    text_bound: bool,
    def: Value,
}

impl StringConverter {
    pub(crate) fn bind(native: &NativeType, field: &FieldDescriptor) -> Self {
        Self {
            text_bound: native.id() == std::any::TypeId::of::<String>(),
            def: resolve_default(field, Value::String(String::new())),
        }
    }
}

impl Converter for StringConverter {
    fn to_dynamic(&self, native: NativeValue) -> Value {
        if self.text_bound {
            match native.downcast::<String>() {
                Ok(s) => Value::String(s),
                Err(n) => fatal_native(n.type_name(), "String"),
            }
        } else {
            match native.downcast::<Blob>() {
                Ok(b) => Value::String(String::from_utf8_lossy(b.as_slice()).into_owned()),
                Err(n) => fatal_native(n.type_name(), "Blob"),
            }
        }
    }

    fn to_native(&self, value: Value) -> NativeValue {
        match value {
            Value::String(s) if self.text_bound => NativeValue::new(s),
            Value::String(s) => {
                if s.is_empty() {
                    // Empty text stored in blob shape is the absent blob.
                    NativeValue::new(Blob::absent())
                } else {
                    NativeValue::new(Blob::from(s))
                }
            }
            other => fatal_dynamic(other.kind_name(), "string"),
        }
    }

    fn is_valid_dynamic(&self, value: &Value) -> bool {
        matches!(value, Value::String(_))
    }

    fn is_valid_native(&self, native: &NativeValue) -> bool {
        if self.text_bound {
            native.is::<String>()
        } else {
            native.is::<Blob>()
        }
    }

    fn new_value(&self) -> Value {
        self.def.clone()
    }

    fn zero_value(&self) -> Value {
        self.def.clone()
    }
}

/// Bytes kind over either `Blob` or `String` natives
///
/// The text-typed binding canonicalizes on the way in: native empty text
/// becomes the absent dynamic blob. The blob-typed binding passes values
/// through unchanged; a present empty blob stays a present empty blob.
pub(crate) struct BytesConverter {
    text_bound: bool,
    def: Value,
}

impl BytesConverter {
    pub(crate) fn bind(native: &NativeType, field: &FieldDescriptor) -> Self {
        Self {
            text_bound: native.id() == std::any::TypeId::of::<String>(),
            def: resolve_default(field, Value::Bytes(Blob::absent())),
        }
    }
}

impl Converter for BytesConverter {
    fn to_dynamic(&self, native: NativeValue) -> Value {
        if self.text_bound {
            match native.downcast::<String>() {
                Ok(s) if s.is_empty() => Value::Bytes(Blob::absent()),
                Ok(s) => Value::Bytes(Blob::from(s)),
                Err(n) => fatal_native(n.type_name(), "String"),
            }
        } else {
            match native.downcast::<Blob>() {
                Ok(b) => Value::Bytes(b),
                Err(n) => fatal_native(n.type_name(), "Blob"),
            }
        }
    }

    fn to_native(&self, value: Value) -> NativeValue {
        match value {
            Value::Bytes(b) if self.text_bound => {
                NativeValue::new(String::from_utf8_lossy(b.as_slice()).into_owned())
            }
            Value::Bytes(b) => NativeValue::new(b),
            other => fatal_dynamic(other.kind_name(), "bytes"),
        }
    }

    fn is_valid_dynamic(&self, value: &Value) -> bool {
        matches!(value, Value::Bytes(_))
    }

    fn is_valid_native(&self, native: &NativeValue) -> bool {
        if self.text_bound {
            native.is::<String>()
        } else {
            native.is::<Blob>()
        }
    }

    fn new_value(&self) -> Value {
        self.def.clone()
    }

    fn zero_value(&self) -> Value {
        self.def.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::kind::Kind;

    fn singular(kind: Kind) -> FieldDescriptor {
        FieldDescriptor::builder(1, "f", kind).build().unwrap()
    }

    #[test]
    fn test_macro_generated_converter_shape() {
        let c = I32Converter::bind(&singular(Kind::Int32));
        assert_eq!(c.to_dynamic(NativeValue::new(-7i32)), Value::I32(-7));
        assert_eq!(c.to_native(Value::I32(-7)).downcast::<i32>().unwrap(), -7);
        assert!(c.is_valid_native(&NativeValue::new(0i32)));
        assert!(!c.is_valid_native(&NativeValue::new(0i64)));
        assert!(c.is_valid_dynamic(&Value::I32(1)));
        assert!(!c.is_valid_dynamic(&Value::U32(1)));
    }

    #[test]
    #[should_panic(expected = "invalid native value")]
    fn test_width_mismatch_is_fatal() {
        let c = I32Converter::bind(&singular(Kind::Int32));
        c.to_dynamic(NativeValue::new(0i64));
    }

    #[test]
    fn test_string_blob_binding_canonicalizes_empty() {
        let blob_bound = StringConverter::bind(&NativeType::of::<Blob>(), &singular(Kind::String));
        let native = blob_bound.to_native(Value::String(String::new()));
        assert!(native.downcast_ref::<Blob>().unwrap().is_absent());
    }

    #[test]
    fn test_bytes_blob_binding_does_not_normalize() {
        let c = BytesConverter::bind(&NativeType::of::<Blob>(), &singular(Kind::Bytes));
        match c.to_dynamic(NativeValue::new(Blob::from_slice(&[]))) {
            Value::Bytes(b) => {
                assert!(b.is_empty());
                assert!(!b.is_absent());
            }
            other => panic!("expected bytes, got {:?}", other),
        }
    }
}
