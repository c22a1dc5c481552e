//! # Prism Reflection Data Model
//!
//! Shared data model for the Prism reflection runtime: the two parallel
//! representations of message data and the schema metadata that binds them.
//!
//! ## Design Philosophy
//!
//! - **Two representations, one schema**: statically typed native values on
//!   one side, kind-tagged dynamic [`Value`]s on the other, bridged per
//!   field by the converters in `libs/reflect`
//! - **Identity over aliasing**: messages and containers are handles into
//!   owned shared storage; handle equality is storage identity, never
//!   structural comparison
//! - **Validated schemas, fatal bindings**: schema-shape mistakes surface
//!   as recoverable [`DescriptorError`]s at assembly time; once descriptors
//!   are built, any type mismatch downstream is a programming defect
//! - **Canonical absence**: absent blobs, null message refs, and frozen
//!   empty containers give "field not present" a concrete zero-allocation
//!   form
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{FieldDescriptor, Kind, Value};
//!
//! let field = FieldDescriptor::builder(1, "reading", Kind::Int32)
//!     .default_value(Value::I32(5))
//!     .build()
//!     .unwrap();
//! assert_eq!(field.default_value(), Value::I32(5));
//! ```

pub mod descriptor;
pub mod kind;
pub mod list;
pub mod map;
pub mod message;
pub mod native;
pub mod value;

pub use descriptor::{
    DescriptorError, EnumDescriptor, EnumValueDescriptor, FieldDescriptor,
    FieldDescriptorBuilder, MessageDescriptor,
};
pub use kind::{Cardinality, Kind};
pub use list::ListHandle;
pub use map::{MapHandle, MapKey};
pub use message::{
    LegacyMessage, MessageHandle, MessageRef, MessageView, Reflective, StorageId, Unwrap,
};
pub use native::NativeValue;
pub use value::{Blob, EnumNumber, Value};
