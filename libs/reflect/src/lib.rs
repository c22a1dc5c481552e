//! # Prism Value-Conversion Layer
//!
//! Per-field converters between the native representation of message data
//! (statically typed generated-code values) and its dynamic representation
//! (kind-tagged `types::Value`s used by encoding, decoding, diffing, and
//! text rendering).
//!
//! ## Design Philosophy
//!
//! - **Resolve once, convert forever**: [`bind_field`] pairs one native
//!   type with one field descriptor and returns one immutable converter;
//!   per-call work is a tag match plus a single `TypeId` comparison
//! - **Capabilities over introspection**: generated code hands the layer
//!   fn-pointer capability tables ([`binding::EnumOps`],
//!   [`binding::MessageOps`]) built by generic constructors at
//!   schema-build time; no general-purpose reflection anywhere
//! - **Loud defects, quiet probes**: bound-type violations panic
//!   immediately; `is_valid_*` never does — callers unsure of
//!   compatibility probe first
//!
//! ## Quick Start
//!
//! ```rust
//! use reflect::{bind_field, Converter, NativeType};
//! use types::{FieldDescriptor, Kind, NativeValue, Value};
//!
//! let field = FieldDescriptor::builder(1, "reading", Kind::Int32)
//!     .default_value(Value::I32(5))
//!     .build()
//!     .unwrap();
//! let conv = bind_field(&NativeType::of::<i32>(), &field);
//!
//! assert_eq!(conv.to_dynamic(NativeValue::new(9i32)), Value::I32(9));
//! assert_eq!(conv.new_value(), Value::I32(5));
//! ```

pub mod binding;
pub mod convert;
pub mod legacy;
pub mod view;

pub use binding::{EnumNative, NativeType};
pub use convert::{bind_field, bind_singular, Converter};
pub use legacy::{wrap_legacy, LegacyView};
pub use view::ReflectView;
