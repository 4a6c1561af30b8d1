//! # structpack - Declarative Binary Struct Codec
//!
//! structpack serializes structured records to fixed-layout byte streams
//! driven entirely by per-field metadata: a record type declares its
//! fields once (name, wire order, kind, array-ness, access mode, length
//! markers) and the engine packs and unpacks it without any hand-written
//! byte shuffling.
//!
//! ## Quick Start
//!
//! ```ignore
//! use structpack::{ByteOrder, ElemKind, FieldDecl, FieldMut, FieldRef, LayoutDecl, Struct};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Sample {
//!     count: i32,
//!     items: Vec<i32>,
//! }
//!
//! impl Struct for Sample {
//!     fn layout(&self) -> LayoutDecl {
//!         LayoutDecl::new("Sample")
//!             .constructed_by(|| Box::new(Sample::default()))
//!             .field(FieldDecl::scalar("count", 0, ElemKind::I32))
//!             .field(FieldDecl::array("items", 1, ElemKind::I32).length_from("count"))
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldRef<'_>> {
//!         match name {
//!             "count" => Some(FieldRef::I32(self.count)),
//!             "items" => Some(FieldRef::I32s(&self.items)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
//!         match name {
//!             "count" => Some(FieldMut::I32(&mut self.count)),
//!             "items" => Some(FieldMut::I32s(&mut self.items)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let sample = Sample { count: 3, items: vec![10, 20, 30] };
//! let bytes = structpack::pack(&sample, ByteOrder::Big)?;
//! let back: Sample = structpack::unpack(&bytes, ByteOrder::Big)?;
//! assert_eq!(back, sample);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   pack / unpack (codec engine)      │
//! ├──────────────────┬──────────────────┤
//! │   Schema Cache   │  Record Access   │
//! │   (per TypeId)   │  (Struct trait)  │
//! ├──────────────────┴──────────────────┤
//! │   Schema (validated wire layout)    │
//! ├─────────────────────────────────────┤
//! │   Byte Cursor (Writer / Reader)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`cursor`]: primitive encode/decode with big- or little-endian
//!   byte order fixed at construction
//! - [`field`]: field and layout declarations
//! - [`schema`]: declaration validation into the immutable [`Schema`]
//! - [`cache`]: process-wide schema memoization
//! - [`record`]: the [`Struct`] trait and value access enums
//! - [`codec`]: the schema-driven pack/unpack engine
//! - [`fixed`]: fixed-capacity byte strings with trimmed-text equality
//! - [`error`]: typed error taxonomy
//!
//! ## Wire Contract
//!
//! Every primitive is an exact round-trip in the configured byte order.
//! Arrays are the flat concatenation of element encodings with no
//! implicit length prefix; a length-marked array reads its element
//! count from a sibling integer field that occupies its own position in
//! the wire layout. Nested records are encoded inline by recursing into
//! their own schemas.

pub mod cache;
pub mod codec;
pub mod cursor;
pub mod error;
pub mod field;
pub mod fixed;
pub mod record;
pub mod schema;

pub use cache::{schema_of, SchemaCache};
pub use codec::{pack, pack_into, unpack, unpack_dyn, unpack_into, MAX_NESTING_DEPTH};
pub use cursor::{ByteOrder, Reader, Writer};
pub use error::{CodecError, CursorError, Error, Result, SchemaError};
pub use field::{AccessMode, ElemKind, FieldDecl, LayoutDecl, NewStructFn};
pub use fixed::FixedString;
pub use record::{AccessorPair, FieldMut, FieldRef, Struct, StructSlice, Value};
pub use schema::{FieldModel, Schema};
