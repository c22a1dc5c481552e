//! # Schema Descriptors
//!
//! ## Purpose
//!
//! The descriptor model the conversion layer binds against: field, message,
//! and enum metadata with validated construction. Descriptors are Arc-backed
//! and cheap to clone, so converters and views can hold them per field
//! without copying schema data.
//!
//! ## Validation Boundary
//!
//! Schema-shape mistakes are recoverable and surface here as
//! [`DescriptorError`] at assembly time: a declared default whose tag does
//! not match the field kind, a default on a repeated field, an enum field
//! without members, map components on a non-map field. By the time a
//! converter is constructed, every descriptor it sees has already passed
//! this validation; converter-side mismatches are programming defects and
//! panic instead.

use std::sync::Arc;

use thiserror::Error;

use crate::kind::{Cardinality, Kind};
use crate::value::Value;

/// Schema-shape errors raised while assembling descriptors
///
/// Each variant carries enough context to point at the offending field
/// without consulting the schema source.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DescriptorError {
    /// Declared default's tag does not match the field's kind
    #[error("field '{field}': declared default is {value_kind}, want {kind}")]
    DefaultKindMismatch {
        field: String,
        kind: &'static str,
        value_kind: &'static str,
    },

    /// Repeated fields have no notion of a per-field default
    #[error("field '{field}': repeated fields cannot declare a default")]
    DefaultOnRepeated { field: String },

    /// Enum-kind fields must name an enum with at least one member
    #[error("field '{field}': enum kind requires an enum descriptor")]
    MissingEnumDescriptor { field: String },

    /// Enums with no declared members have no first value to default to
    #[error("enum '{enum_name}' declares no values")]
    EmptyEnum { enum_name: String },

    /// Key/value component descriptors belong on map fields only
    #[error("field '{field}': map components on a non-map field")]
    MapComponentsOnNonMap { field: String },

    /// Map fields must describe both their key and value components
    #[error("field '{field}': map field is missing key/value descriptors")]
    MapComponentsMissing { field: String },
}

/// One declared enum member: symbolic name plus stable number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDescriptor {
    name: String,
    number: i32,
}

impl EnumValueDescriptor {
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        EnumValueDescriptor {
            name: name.into(),
            number,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> i32 {
        self.number
    }
}

#[derive(Debug)]
struct EnumDescriptorInner {
    name: String,
    values: Vec<EnumValueDescriptor>,
}

/// Named enum with its ordered member list
///
/// Declaration order is significant: repeated enum fields default to the
/// *first declared* member's number, which need not be 0.
#[derive(Debug, Clone)]
pub struct EnumDescriptor(Arc<EnumDescriptorInner>);

impl EnumDescriptor {
    pub fn new(
        name: impl Into<String>,
        values: Vec<EnumValueDescriptor>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if values.is_empty() {
            return Err(DescriptorError::EmptyEnum { enum_name: name });
        }
        Ok(EnumDescriptor(Arc::new(EnumDescriptorInner { name, values })))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn values(&self) -> &[EnumValueDescriptor] {
        &self.0.values
    }

    /// First declared member, in declaration order
    pub fn first_value(&self) -> &EnumValueDescriptor {
        // Construction rejects empty enums.
        &self.0.values[0]
    }
}

#[derive(Debug)]
struct FieldDescriptorInner {
    number: u32,
    name: String,
    kind: Kind,
    cardinality: Cardinality,
    is_map: bool,
    default: Option<Value>,
    enum_desc: Option<EnumDescriptor>,
    map_key: Option<FieldDescriptor>,
    map_value: Option<FieldDescriptor>,
}

/// Validated per-field schema metadata
///
/// Built through [`FieldDescriptor::builder`]; every accessor is total for a
/// descriptor that passed `build()`.
#[derive(Debug, Clone)]
pub struct FieldDescriptor(Arc<FieldDescriptorInner>);

impl FieldDescriptor {
    pub fn builder(number: u32, name: impl Into<String>, kind: Kind) -> FieldDescriptorBuilder {
        FieldDescriptorBuilder {
            number,
            name: name.into(),
            kind,
            cardinality: Cardinality::Singular,
            is_map: false,
            default: None,
            enum_desc: None,
            map_key: None,
            map_value: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.0.number
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.0.cardinality
    }

    /// Repeated and not a map: the list-shaped case of dispatch
    pub fn is_list(&self) -> bool {
        self.0.cardinality == Cardinality::Repeated && !self.0.is_map
    }

    pub fn is_map(&self) -> bool {
        self.0.is_map
    }

    /// Effective default: the declared default when present, otherwise the
    /// kind's canonical zero. Singular converters cache exactly this value;
    /// repeated converters ignore it in favor of the zero.
    pub fn default_value(&self) -> Value {
        match &self.0.default {
            Some(v) => v.clone(),
            None => self.0.kind.zero_value(),
        }
    }

    pub fn enum_descriptor(&self) -> Option<&EnumDescriptor> {
        self.0.enum_desc.as_ref()
    }

    /// Key component of a map field; `None` on non-map fields
    pub fn map_key(&self) -> Option<&FieldDescriptor> {
        self.0.map_key.as_ref()
    }

    /// Value component of a map field; `None` on non-map fields
    pub fn map_value(&self) -> Option<&FieldDescriptor> {
        self.0.map_value.as_ref()
    }
}

/// Builder enforcing the schema-shape rules of [`DescriptorError`]
pub struct FieldDescriptorBuilder {
    number: u32,
    name: String,
    kind: Kind,
    cardinality: Cardinality,
    is_map: bool,
    default: Option<Value>,
    enum_desc: Option<EnumDescriptor>,
    map_key: Option<FieldDescriptor>,
    map_value: Option<FieldDescriptor>,
}

impl FieldDescriptorBuilder {
    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    /// Mark the field as a map. Map fields are repeated entry fields;
    /// cardinality follows. Key/value components are set separately and
    /// checked at `build()`.
    pub fn map(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self.is_map = true;
        self
    }

    pub fn map_key(mut self, key: FieldDescriptor) -> Self {
        self.map_key = Some(key);
        self
    }

    pub fn map_value(mut self, value: FieldDescriptor) -> Self {
        self.map_value = Some(value);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn enum_descriptor(mut self, desc: EnumDescriptor) -> Self {
        self.enum_desc = Some(desc);
        self
    }

    pub fn build(self) -> Result<FieldDescriptor, DescriptorError> {
        if let Some(default) = &self.default {
            if self.cardinality == Cardinality::Repeated {
                return Err(DescriptorError::DefaultOnRepeated { field: self.name });
            }
            if !default.matches_kind(self.kind) {
                return Err(DescriptorError::DefaultKindMismatch {
                    field: self.name,
                    kind: self.kind.name(),
                    value_kind: default.kind_name(),
                });
            }
        }
        if self.kind == Kind::Enum && self.enum_desc.is_none() {
            return Err(DescriptorError::MissingEnumDescriptor { field: self.name });
        }
        if self.is_map {
            if self.map_key.is_none() || self.map_value.is_none() {
                return Err(DescriptorError::MapComponentsMissing { field: self.name });
            }
        } else if self.map_key.is_some() || self.map_value.is_some() {
            return Err(DescriptorError::MapComponentsOnNonMap { field: self.name });
        }
        Ok(FieldDescriptor(Arc::new(FieldDescriptorInner {
            number: self.number,
            name: self.name,
            kind: self.kind,
            cardinality: self.cardinality,
            is_map: self.is_map,
            default: self.default,
            enum_desc: self.enum_desc,
            map_key: self.map_key,
            map_value: self.map_value,
        })))
    }
}

#[derive(Debug)]
struct MessageDescriptorInner {
    name: String,
    fields: Vec<FieldDescriptor>,
}

/// Named message schema: its ordered field list
#[derive(Debug, Clone)]
pub struct MessageDescriptor(Arc<MessageDescriptorInner>);

impl MessageDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        MessageDescriptor(Arc::new(MessageDescriptorInner {
            name: name.into(),
            fields,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.0.fields
    }

    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.0.fields.iter().find(|f| f.number() == number)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.0.fields.iter().find(|f| f.name() == name)
    }
}
