//! # Field Kind Registry
//!
//! ## Purpose
//!
//! Central registry of the wire-level field kinds a Prism schema can declare.
//! Kind numbers are stable and match the exchange format's wire numbering
//! (Double=1 through Sint64=18) so descriptors built here interoperate with
//! the format's existing schema tooling.
//!
//! ## Integration Points
//!
//! - **Descriptors**: every `FieldDescriptor` carries exactly one `Kind`
//! - **Converter dispatch**: `reflect::bind_field` selects a converter by Kind
//! - **Default resolution**: `Kind::zero_value()` supplies the canonical zero
//!   used for repeated-field defaults
//!
//! Multiple wire kinds share one dynamic representation: the three signed
//! 32-bit variants (Int32/Sint32/Sfixed32) all convert through `i32`, and the
//! same collapsing applies to the other integral families. `Group` is the
//! legacy composite encoding and is treated identically to `Message` by the
//! conversion layer.

use num_enum::TryFromPrimitive;

use crate::value::{Blob, EnumNumber, Value};

/// Wire-level field kind with stable numbering
///
/// The numeric values are part of the exchange format and must never be
/// renumbered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Kind {
    Double = 1,
    Float = 2,
    Int64 = 3,
    Uint64 = 4,
    Int32 = 5,
    Fixed64 = 6,
    Fixed32 = 7,
    Bool = 8,
    String = 9,
    Group = 10,
    Message = 11,
    Bytes = 12,
    Uint32 = 13,
    Enum = 14,
    Sfixed32 = 15,
    Sfixed64 = 16,
    Sint32 = 17,
    Sint64 = 18,
}

impl Kind {
    /// Human-readable kind name for diagnostics and panic messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Double => "double",
            Kind::Float => "float",
            Kind::Int64 => "int64",
            Kind::Uint64 => "uint64",
            Kind::Int32 => "int32",
            Kind::Fixed64 => "fixed64",
            Kind::Fixed32 => "fixed32",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Group => "group",
            Kind::Message => "message",
            Kind::Bytes => "bytes",
            Kind::Uint32 => "uint32",
            Kind::Enum => "enum",
            Kind::Sfixed32 => "sfixed32",
            Kind::Sfixed64 => "sfixed64",
            Kind::Sint32 => "sint32",
            Kind::Sint64 => "sint64",
        }
    }

    /// True for the integral wire kinds (signed, unsigned, and fixed variants)
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Kind::Int32
                | Kind::Sint32
                | Kind::Sfixed32
                | Kind::Int64
                | Kind::Sint64
                | Kind::Sfixed64
                | Kind::Uint32
                | Kind::Fixed32
                | Kind::Uint64
                | Kind::Fixed64
        )
    }

    /// True for the floating-point kinds
    pub fn is_floating(&self) -> bool {
        matches!(self, Kind::Float | Kind::Double)
    }

    /// True for every non-composite kind (everything but Message/Group)
    pub fn is_scalar(&self) -> bool {
        !self.is_composite()
    }

    /// True for the composite kinds handled by the message converter
    pub fn is_composite(&self) -> bool {
        matches!(self, Kind::Message | Kind::Group)
    }

    /// Canonical zero value for this kind
    ///
    /// This is the default cached by converters for repeated-cardinality
    /// fields: 0 for numerics, `""` for strings, the absent blob for byte
    /// sequences, `false` for bool, enum number 0 for enums, and the absent
    /// handle for composites.
    pub fn zero_value(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => Value::I32(0),
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => Value::I64(0),
            Kind::Uint32 | Kind::Fixed32 => Value::U32(0),
            Kind::Uint64 | Kind::Fixed64 => Value::U64(0),
            Kind::Float => Value::F32(0.0),
            Kind::Double => Value::F64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Bytes => Value::Bytes(Blob::absent()),
            Kind::Enum => Value::Enum(EnumNumber(0)),
            Kind::Message | Kind::Group => Value::Message(crate::message::MessageHandle::absent()),
        }
    }
}

/// Singular / repeated classification of a field
///
/// Map fields are modeled as repeated entry fields carrying an `is_map` flag
/// on their descriptor, so no third variant exists here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Singular,
    Repeated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_numbers_are_stable() {
        assert_eq!(Kind::Double as u8, 1);
        assert_eq!(Kind::Bool as u8, 8);
        assert_eq!(Kind::Message as u8, 11);
        assert_eq!(Kind::Sint64 as u8, 18);
    }

    #[test]
    fn test_try_from_primitive() {
        assert_eq!(Kind::try_from(1u8).unwrap(), Kind::Double);
        assert_eq!(Kind::try_from(14u8).unwrap(), Kind::Enum);
        assert!(Kind::try_from(0u8).is_err());
        assert!(Kind::try_from(19u8).is_err());
    }

    #[test]
    fn test_classification() {
        assert!(Kind::Sint32.is_integral());
        assert!(!Kind::Bool.is_integral());
        assert!(Kind::Double.is_floating());
        assert!(Kind::Group.is_composite());
        assert!(Kind::Bytes.is_scalar());
        assert!(!Kind::Message.is_scalar());
    }

    #[test]
    fn test_zero_values_collapse_wire_variants() {
        assert_eq!(Kind::Int32.zero_value(), Value::I32(0));
        assert_eq!(Kind::Sint32.zero_value(), Value::I32(0));
        assert_eq!(Kind::Sfixed32.zero_value(), Value::I32(0));
        assert_eq!(Kind::Fixed64.zero_value(), Value::U64(0));
    }

    #[test]
    fn test_bytes_zero_is_absent() {
        match Kind::Bytes.zero_value() {
            Value::Bytes(b) => assert!(b.is_absent()),
            other => panic!("bytes zero should be a blob, got {:?}", other),
        }
    }
}
