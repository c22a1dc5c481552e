//! # Container Boundary Integration Tests
//!
//! The list/map converters at the edge of the core: shallow handle
//! validation, frozen empty sentinels behind `zero_value`, fresh mutable
//! handles behind `new_value`, and component converters built through the
//! same singular dispatch.

mod common;

use common::{Mode, MODE_ENUM};
use reflect::convert::list::bind_list;
use reflect::convert::map::bind_map;
use reflect::{bind_field, Converter, NativeType};
use types::value::{EnumNumber, Value};
use types::{FieldDescriptor, Kind, ListHandle, MapHandle, MapKey, NativeValue};

fn repeated_i32() -> FieldDescriptor {
    FieldDescriptor::builder(1, "readings", Kind::Int32).repeated().build().unwrap()
}

fn counters_map() -> FieldDescriptor {
    FieldDescriptor::builder(2, "counters", Kind::Message)
        .map()
        .map_key(FieldDescriptor::builder(1, "key", Kind::String).build().unwrap())
        .map_value(FieldDescriptor::builder(2, "value", Kind::Int64).build().unwrap())
        .build()
        .unwrap()
}

fn list_binding() -> NativeType {
    NativeType::list_of(NativeType::of::<i32>())
}

fn map_binding() -> NativeType {
    NativeType::map_of(NativeType::of::<String>(), NativeType::of::<i64>())
}

#[test]
fn test_list_handle_roundtrip() {
    let conv = bind_field(&list_binding(), &repeated_i32());
    let handle = ListHandle::new();
    handle.push(Value::I32(1));

    let dynamic = conv.to_dynamic(NativeValue::new(handle.clone()));
    assert!(conv.is_valid_dynamic(&dynamic));
    let back = conv.to_native(dynamic).downcast::<ListHandle>().unwrap();
    assert!(back.ptr_eq(&handle), "container round trip preserves storage identity");
}

#[test]
fn test_list_new_is_mutable_zero_is_frozen() {
    let conv = bind_field(&list_binding(), &repeated_i32());

    let fresh = conv.new_value();
    let list = fresh.as_list().unwrap();
    list.push(Value::I32(7));
    assert_eq!(list.len(), 1);

    let zero = conv.zero_value();
    assert!(zero.as_list().unwrap().is_frozen());
    assert_eq!(zero, conv.zero_value(), "zero is one shared sentinel");
    assert_ne!(conv.new_value(), conv.new_value(), "fresh handles never alias");
}

#[test]
#[should_panic(expected = "frozen list handle")]
fn test_mutating_list_zero_sentinel_panics() {
    let conv = bind_field(&list_binding(), &repeated_i32());
    let zero = conv.zero_value();
    zero.as_list().unwrap().push(Value::I32(1));
}

#[test]
fn test_list_element_converter_uses_repeated_defaults() {
    let conv = bind_list(&list_binding(), &repeated_i32());
    // Element kind enforcement lives in the element converter.
    let elem = conv.element();
    assert_eq!(elem.new_value(), Value::I32(0));
    assert!(elem.is_valid_dynamic(&Value::I32(3)));
    assert!(!elem.is_valid_dynamic(&Value::I64(3)));
    assert_eq!(elem.to_dynamic(NativeValue::new(5i32)), Value::I32(5));
}

#[test]
fn test_repeated_enum_element_default() {
    let field = FieldDescriptor::builder(3, "modes", Kind::Enum)
        .enum_descriptor(MODE_ENUM.clone())
        .repeated()
        .build()
        .unwrap();
    let conv = bind_list(&NativeType::list_of(NativeType::of_enum::<Mode>()), &field);
    assert_eq!(
        conv.element().new_value(),
        Value::Enum(EnumNumber(2)),
        "repeated enum defaults to the first declared member"
    );
}

#[test]
fn test_map_handle_roundtrip() {
    let conv = bind_field(&map_binding(), &counters_map());
    let handle = MapHandle::new();
    handle.insert(MapKey::String("hits".into()), Value::I64(3));

    let dynamic = conv.to_dynamic(NativeValue::new(handle.clone()));
    assert!(conv.is_valid_dynamic(&dynamic));
    let back = conv.to_native(dynamic).downcast::<MapHandle>().unwrap();
    assert!(back.ptr_eq(&handle));
    assert_eq!(back.get(&MapKey::String("hits".into())), Some(Value::I64(3)));
}

#[test]
fn test_map_component_converters() {
    let conv = bind_map(&map_binding(), &counters_map());
    assert_eq!(conv.key().to_dynamic(NativeValue::new(String::from("k"))), Value::String("k".into()));
    assert_eq!(conv.value().to_dynamic(NativeValue::new(9i64)), Value::I64(9));
    assert!(!conv.key().is_valid_dynamic(&Value::I64(1)));
}

#[test]
#[should_panic(expected = "frozen map handle")]
fn test_mutating_map_zero_sentinel_panics() {
    let conv = bind_field(&map_binding(), &counters_map());
    let zero = conv.zero_value();
    zero.as_map().unwrap().insert(MapKey::Bool(true), Value::Bool(true));
}

#[test]
fn test_map_zero_is_shared_new_is_fresh() {
    let conv = bind_field(&map_binding(), &counters_map());
    assert!(conv.zero_value().as_map().unwrap().is_frozen());
    assert_eq!(conv.zero_value(), conv.zero_value());

    let fresh = conv.new_value();
    let map = fresh.as_map().unwrap();
    map.insert(MapKey::String("a".into()), Value::I64(1));
    assert_eq!(map.len(), 1);
}

#[test]
#[should_panic(expected = "invalid native value")]
fn test_list_converter_rejects_map_handle() {
    let conv = bind_field(&list_binding(), &repeated_i32());
    conv.to_dynamic(NativeValue::new(MapHandle::new()));
}

#[test]
#[should_panic(expected = "invalid native type")]
fn test_list_field_requires_list_binding() {
    // A repeated field handed a scalar binding has no element type.
    bind_field(&NativeType::of::<i32>(), &repeated_i32());
}
