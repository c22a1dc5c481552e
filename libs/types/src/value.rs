//! # Dynamic Value Representation
//!
//! ## Purpose
//!
//! Kind-tagged runtime value used by every generic operation in the Prism
//! runtime (encoding, decoding, diffing, text rendering). A `Value` is
//! immutable; composite variants carry shared handles whose storage is
//! mutated through the handle, never through the `Value` itself.
//!
//! ## Integration Points
//!
//! - **Converters**: `Value`s are produced and consumed only through the
//!   field kind's converter in `libs/reflect`
//! - **Descriptors**: declared field defaults are stored as `Value`s
//! - **Containers**: `ListHandle`/`MapHandle` elements are `Value`s
//!
//! Equality is shallow: by value for scalars, by storage identity for
//! message/list/map handles. Absent and empty blobs compare equal because
//! the exchange format treats them as the same byte sequence.

use bytes::Bytes;

use crate::kind::Kind;
use crate::list::ListHandle;
use crate::map::MapHandle;
use crate::message::MessageHandle;

/// Enum numeric identity, distinct from a plain `i32`
///
/// The conversion layer represents enum values purely as signed 32-bit
/// numbers; the newtype keeps validity probes able to tell an enum dynamic
/// apart from an int32 dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumNumber(pub i32);

impl EnumNumber {
    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for EnumNumber {
    fn from(n: i32) -> Self {
        EnumNumber(n)
    }
}

/// Byte sequence with an explicit absent state
///
/// The format treats an absent byte sequence and a zero-length one as
/// equivalent, with absent as the canonical form. `Blob` preserves the
/// distinction so converters can normalize (text-typed bindings always
/// produce the absent form for empty input) while `PartialEq` treats the
/// two as equal. Backed by `bytes::Bytes`, so clones are reference-counted.
#[derive(Clone)]
pub struct Blob(Option<Bytes>);

impl Blob {
    /// The canonical absent byte sequence
    pub fn absent() -> Self {
        Blob(None)
    }

    /// A present (possibly zero-length) byte sequence
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Blob(Some(bytes.into()))
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Blob(Some(Bytes::copy_from_slice(data)))
    }

    /// True only for the absent form, not for a present empty sequence
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// True for both the absent form and a present zero-length sequence
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Byte view; the absent form reads as the empty slice
    pub fn as_slice(&self) -> &[u8] {
        match &self.0 {
            Some(b) => b.as_ref(),
            None => &[],
        }
    }
}

impl Default for Blob {
    fn default() -> Self {
        Blob::absent()
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Blob {}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "Blob(absent)"),
            Some(b) => write!(f, "Blob(0x{})", hex::encode(b)),
        }
    }
}

impl From<&str> for Blob {
    fn from(s: &str) -> Self {
        Blob::from_slice(s.as_bytes())
    }
}

impl From<String> for Blob {
    fn from(s: String) -> Self {
        Blob(Some(Bytes::from(s.into_bytes())))
    }
}

impl From<Vec<u8>> for Blob {
    fn from(v: Vec<u8>) -> Self {
        Blob(Some(Bytes::from(v)))
    }
}

/// Kind-tagged dynamic value
///
/// One variant per dynamic representation: eight primitive shapes, enum
/// numbers, and the three composite handles.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Blob),
    Enum(EnumNumber),
    Message(MessageHandle),
    List(ListHandle),
    Map(MapHandle),
}

impl Value {
    /// Tag name for diagnostics and mismatch panics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I32(_) => "int32",
            Value::I64(_) => "int64",
            Value::U32(_) => "uint32",
            Value::U64(_) => "uint64",
            Value::F32(_) => "float",
            Value::F64(_) => "double",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Message(_) => "message",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether this value's tag is an acceptable declared default for `kind`
    ///
    /// Wire variants collapse onto their shared representation, so an `I32`
    /// value matches `Sint32` and `Sfixed32` as well as `Int32`. Composite
    /// kinds accept only the absent handle (messages have no declared
    /// defaults).
    pub fn matches_kind(&self, kind: Kind) -> bool {
        match (self, kind) {
            (Value::Bool(_), Kind::Bool) => true,
            (Value::I32(_), Kind::Int32 | Kind::Sint32 | Kind::Sfixed32) => true,
            (Value::I64(_), Kind::Int64 | Kind::Sint64 | Kind::Sfixed64) => true,
            (Value::U32(_), Kind::Uint32 | Kind::Fixed32) => true,
            (Value::U64(_), Kind::Uint64 | Kind::Fixed64) => true,
            (Value::F32(_), Kind::Float) => true,
            (Value::F64(_), Kind::Double) => true,
            (Value::String(_), Kind::String) => true,
            (Value::Bytes(_), Kind::Bytes) => true,
            (Value::Enum(_), Kind::Enum) => true,
            (Value::Message(h), Kind::Message | Kind::Group) => h.is_absent(),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumNumber> {
        match self {
            Value::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageHandle> {
        match self {
            Value::Message(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListHandle> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapHandle> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }
}

// Shallow equality: by value for scalars, by storage identity for handles.
// Deep message equality is deliberately not implemented in this layer.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Message(a), Value::Message(b)) => a.storage_id() == b.storage_id(),
            (Value::List(a), Value::List(b)) => a.storage_id() == b.storage_id(),
            (Value::Map(a), Value::Map(b)) => a.storage_id() == b.storage_id(),
            _ => false,
        }
    }
}
