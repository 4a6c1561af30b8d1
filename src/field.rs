//! # Field and Layout Declarations
//!
//! This module provides the declaration types a record supplies through
//! [`Struct::layout`](crate::record::Struct::layout): an [`ElemKind`] per
//! field, a [`FieldDecl`] describing one field, and a [`LayoutDecl`]
//! collecting them for a record type.
//!
//! Declarations are unvalidated input. [`Schema::build`](crate::schema::Schema::build)
//! turns a `LayoutDecl` into the immutable, validated schema the engine
//! walks; declared field order may be sparse in the source listing, but
//! every field must carry an explicit `order` forming a dense
//! `0..field_count` permutation.
//!
//! ## Element Kinds
//!
//! | Kind | Wire width | In-memory type |
//! |------|------------|----------------|
//! | `Bool` | 1 | `bool` |
//! | `U8` | 1 | `u8` |
//! | `I16` | 2 | `i16` |
//! | `I32` | 4 | `i32` |
//! | `I64` | 8 | `i64` |
//! | `Char` | 2 | `u16` (UTF-16 code unit) |
//! | `F32` | 4 | `f32` |
//! | `F64` | 8 | `f64` |
//! | `Str` | capacity | [`FixedString`](crate::fixed::FixedString) |
//! | `Struct` | nested layout | any [`Struct`](crate::record::Struct) |

use crate::record::Struct;

/// Factory producing a boxed default instance of a record type.
pub type NewStructFn = fn() -> Box<dyn Struct>;

/// Primitive kind of a field, or of an array field's elements.
///
/// Uses `#[repr(u8)]` for a single-byte discriminant. Width metadata
/// lives here; everything else about a field lives in [`FieldDecl`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElemKind {
    Bool = 0,
    U8 = 1,
    I16 = 2,
    I32 = 3,
    I64 = 4,
    Char = 5,
    F32 = 6,
    F64 = 7,

    Str = 20,
    Struct = 21,
}

impl ElemKind {
    /// Wire width in bytes, or `None` for kinds whose width depends on
    /// the value (`Str`) or on another schema (`Struct`).
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            ElemKind::Bool | ElemKind::U8 => Some(1),
            ElemKind::I16 | ElemKind::Char => Some(2),
            ElemKind::I32 | ElemKind::F32 => Some(4),
            ElemKind::I64 | ElemKind::F64 => Some(8),
            ElemKind::Str | ElemKind::Struct => None,
        }
    }

    /// Whether the kind can carry a length-marker value.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ElemKind::U8 | ElemKind::I16 | ElemKind::I32 | ElemKind::I64
        )
    }

    pub(crate) fn wire_name(self) -> &'static str {
        match self {
            ElemKind::Bool => "bool",
            ElemKind::U8 => "u8",
            ElemKind::I16 => "i16",
            ElemKind::I32 => "i32",
            ElemKind::I64 => "i64",
            ElemKind::Char => "char",
            ElemKind::F32 => "f32",
            ElemKind::F64 => "f64",
            ElemKind::Str => "fixed string",
            ElemKind::Struct => "nested record",
        }
    }
}

/// How the codec engine reaches a field's value.
///
/// `Direct` borrows storage in place through
/// [`Struct::field`](crate::record::Struct::field) /
/// [`Struct::field_mut`](crate::record::Struct::field_mut). `Accessor`
/// moves owned [`Value`](crate::record::Value)s through
/// [`Struct::get`](crate::record::Struct::get) /
/// [`Struct::set`](crate::record::Struct::set), whose availability the
/// record reports up front via
/// [`Struct::accessors`](crate::record::Struct::accessors). The mode is
/// resolved at schema-build time, never per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Direct,
    Accessor,
}

/// Declaration of one field: name, wire order, kind, array-ness, access
/// mode, and an optional length-marker relation.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub(crate) name: &'static str,
    pub(crate) order: usize,
    pub(crate) kind: ElemKind,
    pub(crate) array: bool,
    pub(crate) access: AccessMode,
    pub(crate) length_from: Option<&'static str>,
    pub(crate) nested_new: Option<NewStructFn>,
}

impl FieldDecl {
    fn new(name: &'static str, order: usize, kind: ElemKind, array: bool) -> Self {
        Self {
            name,
            order,
            kind,
            array,
            access: AccessMode::Direct,
            length_from: None,
            nested_new: None,
        }
    }

    /// A single primitive value.
    pub fn scalar(name: &'static str, order: usize, kind: ElemKind) -> Self {
        Self::new(name, order, kind, false)
    }

    /// A homogeneous array of `kind`. Without
    /// [`length_from`](FieldDecl::length_from) the value's existing
    /// length is the wire length.
    pub fn array(name: &'static str, order: usize, kind: ElemKind) -> Self {
        Self::new(name, order, kind, true)
    }

    /// A nested record encoded inline by recursing into its own schema.
    pub fn nested(name: &'static str, order: usize) -> Self {
        Self::new(name, order, ElemKind::Struct, false)
    }

    /// An array of nested records.
    pub fn nested_array(name: &'static str, order: usize) -> Self {
        Self::new(name, order, ElemKind::Struct, true)
    }

    /// A fixed-capacity byte string occupying exactly its capacity on
    /// the wire.
    pub fn fixed_str(name: &'static str, order: usize) -> Self {
        Self::new(name, order, ElemKind::Str, false)
    }

    /// Marks this array's element count as carried by the integer field
    /// `marker`, which must be declared with a smaller order.
    pub fn length_from(mut self, marker: &'static str) -> Self {
        self.length_from = Some(marker);
        self
    }

    /// Switches the field to accessor-pair access.
    pub fn via_accessors(mut self) -> Self {
        self.access = AccessMode::Accessor;
        self
    }

    /// Factory used on decode when an accessor-mode nested value is
    /// absent.
    pub fn default_with(mut self, factory: NewStructFn) -> Self {
        self.nested_new = Some(factory);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn kind(&self) -> ElemKind {
        self.kind
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn access(&self) -> AccessMode {
        self.access
    }
}

/// Declaration of a record type: its name, a constructor, and its
/// fields in any listing order.
#[derive(Debug, Clone)]
pub struct LayoutDecl {
    pub(crate) name: &'static str,
    pub(crate) constructor: Option<NewStructFn>,
    pub(crate) fields: Vec<FieldDecl>,
}

impl LayoutDecl {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            constructor: None,
            fields: Vec::new(),
        }
    }

    /// Constructor producing a boxed default instance; required by
    /// schema validation.
    pub fn constructed_by(mut self, factory: NewStructFn) -> Self {
        self.constructor = Some(factory);
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
