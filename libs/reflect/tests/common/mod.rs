//! Shared fixtures for the reflect integration suites: a generated-style
//! self-describing message (`Gauge`), a non-self-describing legacy
//! composite (`Tally`), the `Mode` enum newtype, and their descriptors.
//!
//! `Mode` deliberately declares MODE_FAST (number 2) first so the
//! repeated-enum default policy is observable; `reading` deliberately
//! declares a non-zero singular default for the same reason.

#![allow(dead_code)]

use std::sync::Arc;

use once_cell::sync::Lazy;

use reflect::{EnumNative, ReflectView};
use types::descriptor::{
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, MessageDescriptor,
};
use types::message::{LegacyMessage, MessageHandle, Reflective};
use types::value::{Blob, EnumNumber, Value};
use types::{Kind, MessageRef};

/// Generated-style open enum: any number is representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode(pub i32);

pub const MODE_FAST: Mode = Mode(2);
pub const MODE_SLOW: Mode = Mode(0);

impl EnumNative for Mode {
    fn number(self) -> i32 {
        self.0
    }

    fn from_number(n: i32) -> Self {
        Mode(n)
    }
}

pub static MODE_ENUM: Lazy<EnumDescriptor> = Lazy::new(|| {
    EnumDescriptor::new(
        "Mode",
        vec![
            EnumValueDescriptor::new("MODE_FAST", 2),
            EnumValueDescriptor::new("MODE_SLOW", 0),
        ],
    )
    .unwrap()
});

pub static GAUGE_DESC: Lazy<MessageDescriptor> = Lazy::new(|| {
    MessageDescriptor::new(
        "Gauge",
        vec![
            FieldDescriptor::builder(1, "reading", Kind::Int32)
                .default_value(Value::I32(5))
                .build()
                .unwrap(),
            FieldDescriptor::builder(2, "label", Kind::String).build().unwrap(),
            FieldDescriptor::builder(3, "payload", Kind::Bytes).build().unwrap(),
            FieldDescriptor::builder(4, "mode", Kind::Enum)
                .enum_descriptor(MODE_ENUM.clone())
                .build()
                .unwrap(),
            FieldDescriptor::builder(5, "child", Kind::Message).build().unwrap(),
        ],
    )
});

/// Generated-style self-describing composite
#[derive(Debug, Clone, Default)]
pub struct Gauge {
    pub reading: i32,
    pub label: String,
    pub payload: Blob,
    pub mode: Mode,
    pub child: MessageRef<Gauge>,
}

impl Reflective for Gauge {
    fn descriptor() -> MessageDescriptor {
        GAUGE_DESC.clone()
    }

    fn get_field(&self, field: &FieldDescriptor) -> Value {
        match field.number() {
            1 => Value::I32(self.reading),
            2 => Value::String(self.label.clone()),
            3 => Value::Bytes(self.payload.clone()),
            4 => Value::Enum(EnumNumber(self.mode.number())),
            5 => match self.child.as_arc() {
                Some(storage) => {
                    Value::Message(MessageHandle::new(Arc::new(ReflectView::over(
                        storage.clone(),
                    ))))
                }
                None => Value::Message(MessageHandle::absent()),
            },
            n => panic!("Gauge has no field number {n}"),
        }
    }

    fn set_field(&mut self, field: &FieldDescriptor, value: Value) {
        match (field.number(), value) {
            (1, Value::I32(v)) => self.reading = v,
            (2, Value::String(v)) => self.label = v,
            (3, Value::Bytes(v)) => self.payload = v,
            (4, Value::Enum(n)) => self.mode = Mode::from_number(n.get()),
            (5, Value::Message(h)) => {
                self.child = match h.view() {
                    None => MessageRef::null(),
                    Some(view) => view
                        .as_unwrap()
                        .expect("test views expose unwrap")
                        .unwrap_native()
                        .downcast::<MessageRef<Gauge>>()
                        .expect("child handle wraps Gauge storage"),
                };
            }
            (n, v) => panic!("cannot set Gauge field {n} from {}", v.kind_name()),
        }
    }

    fn has_field(&self, field: &FieldDescriptor) -> bool {
        match field.number() {
            1 => self.reading != 0,
            2 => !self.label.is_empty(),
            3 => !self.payload.is_absent(),
            4 => self.mode.number() != 0,
            5 => !self.child.is_null(),
            n => panic!("Gauge has no field number {n}"),
        }
    }

    fn clear_field(&mut self, field: &FieldDescriptor) {
        match field.number() {
            1 => self.reading = 0,
            2 => self.label.clear(),
            3 => self.payload = Blob::absent(),
            4 => self.mode = Mode::default(),
            5 => self.child = MessageRef::null(),
            n => panic!("Gauge has no field number {n}"),
        }
    }
}

pub static TALLY_DESC: Lazy<MessageDescriptor> = Lazy::new(|| {
    MessageDescriptor::new(
        "Tally",
        vec![
            FieldDescriptor::builder(1, "count", Kind::Uint64).build().unwrap(),
            FieldDescriptor::builder(2, "note", Kind::String).build().unwrap(),
        ],
    )
});

/// Pre-self-description composite shape, reachable only through the
/// legacy adapter contract
#[derive(Debug, Clone, Default)]
pub struct Tally {
    pub count: u64,
    pub note: String,
}

impl LegacyMessage for Tally {
    fn legacy_descriptor() -> MessageDescriptor {
        TALLY_DESC.clone()
    }

    fn legacy_get(&self, field: &FieldDescriptor) -> Value {
        match field.number() {
            1 => Value::U64(self.count),
            2 => Value::String(self.note.clone()),
            n => panic!("Tally has no field number {n}"),
        }
    }

    fn legacy_set(&mut self, field: &FieldDescriptor, value: Value) {
        match (field.number(), value) {
            (1, Value::U64(v)) => self.count = v,
            (2, Value::String(v)) => self.note = v,
            (n, v) => panic!("cannot set Tally field {n} from {}", v.kind_name()),
        }
    }

    fn legacy_has(&self, field: &FieldDescriptor) -> bool {
        match field.number() {
            1 => self.count != 0,
            2 => !self.note.is_empty(),
            n => panic!("Tally has no field number {n}"),
        }
    }

    fn legacy_clear(&mut self, field: &FieldDescriptor) {
        match field.number() {
            1 => self.count = 0,
            2 => self.note.clear(),
            n => panic!("Tally has no field number {n}"),
        }
    }
}

/// Fresh Gauge storage for identity-sensitive tests
pub fn gauge_ref(gauge: Gauge) -> MessageRef<Gauge> {
    MessageRef::new(gauge)
}

pub fn reading_field() -> FieldDescriptor {
    GAUGE_DESC.field_by_name("reading").unwrap().clone()
}

pub fn child_field() -> FieldDescriptor {
    GAUGE_DESC.field_by_name("child").unwrap().clone()
}
