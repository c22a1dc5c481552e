//! # Value Conversion Layer
//!
//! ## Purpose
//!
//! The bridge between a field's native representation (statically typed
//! generated-code values) and its dynamic representation (kind-tagged
//! [`Value`]s). One [`Converter`] per field: immutable, constructed once at
//! schema-binding time by [`bind_field`], then shared freely across
//! threads by every encode/decode/merge path.
//!
//! ## Dispatch
//!
//! `bind_field` routes by field shape: list-shaped fields to the list
//! converter, map-shaped fields to the map converter, everything else
//! through the singular kind switch. The wire-variant integer kinds
//! (Sint32, Sfixed32, Fixed64, ...) collapse onto the four integer
//! converters; Group routes with Message.
//!
//! ## Failure Policy
//!
//! No recoverable error exists in this layer. A (native type, kind) pair
//! with no converter, or a value that does not carry a converter's bound
//! type, means schema binding computed an incorrect pairing: a programming
//! defect. Both panic immediately with a uniform `got ..., want ...`
//! message. [`Converter::is_valid_native`]/[`Converter::is_valid_dynamic`]
//! are the only sanctioned non-fatal probes.

pub mod enums;
pub mod list;
pub mod map;
pub mod message;
pub mod scalar;

use std::any::TypeId;

use tracing::trace;

use types::descriptor::FieldDescriptor;
use types::kind::{Cardinality, Kind};
use types::native::NativeValue;
use types::value::{Blob, Value};

use crate::binding::NativeType;

/// Uniform conversion contract, one implementation per field kind
///
/// All operations are synchronous and side-effect-free with respect to
/// shared state; `new_value` on composite converters allocates, nothing
/// else does. Implementations are immutable and `Send + Sync`.
pub trait Converter: Send + Sync {
    /// Native to dynamic. The native value's runtime type must equal the
    /// converter's bound type; a mismatch panics.
    fn to_dynamic(&self, native: NativeValue) -> Value;

    /// Dynamic to native. The value's kind tag must match the converter's
    /// kind; a mismatch panics.
    fn to_native(&self, value: Value) -> NativeValue;

    /// Non-fatal compatibility probe for the dynamic side
    fn is_valid_dynamic(&self, value: &Value) -> bool;

    /// Non-fatal compatibility probe for the native side
    fn is_valid_native(&self, native: &NativeValue) -> bool;

    /// Scalars/enums: the cached default. Messages and containers: a
    /// fresh, independently mutable composite.
    fn new_value(&self) -> Value;

    /// Scalars/enums: the same cached default as `new_value`. Messages:
    /// the absent handle. Containers: the shared frozen empty sentinel.
    fn zero_value(&self) -> Value;
}

/// Construct the one converter for a (native type, field descriptor) pair
///
/// The returned instance is immutable; callers memoize it per field and
/// apply their own discipline around racing first constructions.
pub fn bind_field(native: &NativeType, field: &FieldDescriptor) -> Box<dyn Converter> {
    if field.is_list() {
        let conv = Box::new(list::bind_list(native, field));
        trace!(field = field.name(), native = native.name(), "bound list converter");
        return conv;
    }
    if field.is_map() {
        let conv = Box::new(map::bind_map(native, field));
        trace!(field = field.name(), native = native.name(), "bound map converter");
        return conv;
    }
    bind_singular(native, field)
}

/// The singular kind switch
pub fn bind_singular(native: &NativeType, field: &FieldDescriptor) -> Box<dyn Converter> {
    let id = native.id();
    let conv: Box<dyn Converter> = match field.kind() {
        Kind::Bool if id == TypeId::of::<bool>() => Box::new(scalar::BoolConverter::bind(field)),
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 if id == TypeId::of::<i32>() => {
            Box::new(scalar::I32Converter::bind(field))
        }
        Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 if id == TypeId::of::<i64>() => {
            Box::new(scalar::I64Converter::bind(field))
        }
        Kind::Uint32 | Kind::Fixed32 if id == TypeId::of::<u32>() => {
            Box::new(scalar::U32Converter::bind(field))
        }
        Kind::Uint64 | Kind::Fixed64 if id == TypeId::of::<u64>() => {
            Box::new(scalar::U64Converter::bind(field))
        }
        Kind::Float if id == TypeId::of::<f32>() => Box::new(scalar::F32Converter::bind(field)),
        Kind::Double if id == TypeId::of::<f64>() => Box::new(scalar::F64Converter::bind(field)),
        Kind::String if id == TypeId::of::<String>() || id == TypeId::of::<Blob>() => {
            Box::new(scalar::StringConverter::bind(native, field))
        }
        Kind::Bytes if id == TypeId::of::<String>() || id == TypeId::of::<Blob>() => {
            Box::new(scalar::BytesConverter::bind(native, field))
        }
        Kind::Enum => Box::new(enums::EnumConverter::bind(native, field)),
        Kind::Message | Kind::Group => Box::new(message::MessageConverter::bind(native, field)),
        _ => fatal_binding(native, field),
    };
    trace!(
        field = field.name(),
        kind = field.kind().name(),
        native = native.name(),
        "bound converter"
    );
    conv
}

/// Cached-default resolution shared by every scalar/enum converter:
/// repeated fields get the kind's zero, singular fields the declared
/// default.
pub(crate) fn resolve_default(field: &FieldDescriptor, zero: Value) -> Value {
    if field.cardinality() == Cardinality::Repeated {
        return zero;
    }
    field.default_value()
}

#[cold]
#[track_caller]
pub(crate) fn fatal_binding(native: &NativeType, field: &FieldDescriptor) -> ! {
    panic!(
        "invalid native type {} for field {} ({})",
        native.name(),
        field.name(),
        field.kind().name()
    )
}

#[cold]
#[track_caller]
pub(crate) fn fatal_native(got: &str, want: &str) -> ! {
    panic!("invalid native value: got {got}, want {want}")
}

#[cold]
#[track_caller]
pub(crate) fn fatal_dynamic(got: &str, want: &str) -> ! {
    panic!("invalid dynamic value: got {got}, want {want}")
}
