//! # Enum Conversion Integration Tests
//!
//! Numeric-identity conversion and the cardinality-sensitive default:
//! singular fields honor the declared default, repeated fields take the
//! first declared member's number even when it is not 0.

mod common;

use common::{Mode, MODE_ENUM, MODE_FAST};
use reflect::{bind_field, bind_singular, Converter, EnumNative, NativeType};
use types::value::{EnumNumber, Value};
use types::{FieldDescriptor, Kind, NativeValue};

fn enum_field() -> FieldDescriptor {
    FieldDescriptor::builder(4, "mode", Kind::Enum)
        .enum_descriptor(MODE_ENUM.clone())
        .build()
        .unwrap()
}

#[test]
fn test_numeric_identity_roundtrip() {
    let conv = bind_field(&NativeType::of_enum::<Mode>(), &enum_field());
    let dynamic = conv.to_dynamic(NativeValue::new(MODE_FAST));
    assert_eq!(dynamic, Value::Enum(EnumNumber(2)));
    assert_eq!(conv.to_native(dynamic).downcast::<Mode>().unwrap(), MODE_FAST);
}

#[test]
fn test_open_enum_accepts_undeclared_numbers() {
    // No symbolic lookup happens in this layer; any number round-trips.
    let conv = bind_field(&NativeType::of_enum::<Mode>(), &enum_field());
    let back = conv.to_native(Value::Enum(EnumNumber(999)));
    assert_eq!(back.downcast::<Mode>().unwrap().number(), 999);
}

#[test]
fn test_singular_declared_default() {
    let field = FieldDescriptor::builder(4, "mode", Kind::Enum)
        .enum_descriptor(MODE_ENUM.clone())
        .default_value(Value::Enum(EnumNumber(0)))
        .build()
        .unwrap();
    let conv = bind_field(&NativeType::of_enum::<Mode>(), &field);
    assert_eq!(conv.new_value(), Value::Enum(EnumNumber(0)));
    assert_eq!(conv.zero_value(), Value::Enum(EnumNumber(0)));
}

#[test]
fn test_repeated_default_is_first_declared_member() {
    // MODE_FAST (number 2) is declared first, so the repeated element
    // default is 2 even though the singular default would be 0.
    let field = FieldDescriptor::builder(4, "modes", Kind::Enum)
        .enum_descriptor(MODE_ENUM.clone())
        .repeated()
        .build()
        .unwrap();
    let conv = bind_singular(&NativeType::of_enum::<Mode>(), &field);
    assert_eq!(conv.new_value(), Value::Enum(EnumNumber(2)));
    assert_eq!(conv.zero_value(), Value::Enum(EnumNumber(2)));
}

#[test]
fn test_enum_and_i32_dynamics_are_distinct() {
    let conv = bind_field(&NativeType::of_enum::<Mode>(), &enum_field());
    assert!(conv.is_valid_dynamic(&Value::Enum(EnumNumber(3))));
    assert!(!conv.is_valid_dynamic(&Value::I32(3)));
}

#[test]
fn test_native_probe_checks_enum_type() {
    let conv = bind_field(&NativeType::of_enum::<Mode>(), &enum_field());
    assert!(conv.is_valid_native(&NativeValue::new(MODE_FAST)));
    assert!(!conv.is_valid_native(&NativeValue::new(2i32)));
}

#[test]
#[should_panic(expected = "invalid native value")]
fn test_plain_i32_native_is_fatal() {
    let conv = bind_field(&NativeType::of_enum::<Mode>(), &enum_field());
    conv.to_dynamic(NativeValue::new(2i32));
}
