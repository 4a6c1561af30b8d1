//! # Schema - Validated Wire Layout
//!
//! This module turns a [`LayoutDecl`] into a [`Schema`]: the immutable
//! description of a record type's wire layout, with fields held in
//! ascending order and length-marker relations resolved to field
//! indices. A schema is built once per record type (the cache in
//! [`crate::cache`] memoizes it) and never mutated afterwards.
//!
//! Validation fails fast with the first violation:
//! - missing constructor (`SchemaError::InaccessibleType`)
//! - duplicate, out-of-range, or non-dense orders (`SchemaError::OrderConflict`)
//! - length markers that are missing, non-integer, arrays, or themselves
//!   length-marked (`SchemaError::DanglingLengthMarker`)
//! - a marker declared after the array it measures
//!   (`CodecError::LengthMarkerAfterArray`, surfaced at build rather
//!   than first use)

use smallvec::SmallVec;

use crate::error::{CodecError, Result, SchemaError};
use crate::field::{AccessMode, ElemKind, FieldDecl, LayoutDecl, NewStructFn};
use crate::record::Struct;

/// Validated metadata for one field, in wire position.
#[derive(Debug, Clone)]
pub struct FieldModel {
    decl: FieldDecl,
    marker_idx: Option<usize>,
    is_length_marker: bool,
}

impl FieldModel {
    pub fn name(&self) -> &'static str {
        self.decl.name
    }

    pub fn kind(&self) -> ElemKind {
        self.decl.kind
    }

    pub fn is_array(&self) -> bool {
        self.decl.array
    }

    pub fn access(&self) -> AccessMode {
        self.decl.access
    }

    /// For a length-marked array, the wire index of its marker field.
    pub fn marker_index(&self) -> Option<usize> {
        self.marker_idx
    }

    /// Whether another array field reads its element count from this
    /// field's value.
    pub fn is_length_marker(&self) -> bool {
        self.is_length_marker
    }

    pub(crate) fn nested_new(&self) -> Option<NewStructFn> {
        self.decl.nested_new
    }
}

/// Immutable, validated wire layout of a record type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    constructor: NewStructFn,
    fields: SmallVec<[FieldModel; 8]>,
}

impl Schema {
    /// Validates a declaration into a schema. Pure function of the
    /// declaration; the first violation aborts the build.
    pub fn build(decl: LayoutDecl) -> Result<Self> {
        let record = decl.name;
        let constructor = decl
            .constructor
            .ok_or(SchemaError::InaccessibleType { record })?;

        let n = decl.fields.len();
        let mut slots: Vec<Option<FieldDecl>> = vec![None; n];
        for field in decl.fields {
            if field.order >= n || slots[field.order].is_some() {
                return Err(SchemaError::OrderConflict {
                    record,
                    field: field.name,
                    order: field.order,
                    expected: n,
                }
                .into());
            }
            let order = field.order;
            slots[order] = Some(field);
        }
        // n unique orders below n fill every slot
        let ordered: Vec<FieldDecl> = slots.into_iter().flatten().collect();
        debug_assert_eq!(ordered.len(), n);

        let mut fields: SmallVec<[FieldModel; 8]> = ordered
            .into_iter()
            .map(|decl| FieldModel {
                decl,
                marker_idx: None,
                is_length_marker: false,
            })
            .collect();

        for idx in 0..fields.len() {
            let Some(marker) = fields[idx].decl.length_from else {
                continue;
            };
            let field = fields[idx].decl.name;
            if !fields[idx].decl.array {
                return Err(SchemaError::DanglingLengthMarker {
                    record,
                    field,
                    marker,
                    reason: "only array fields can be length-marked",
                }
                .into());
            }
            let Some(marker_idx) = fields.iter().position(|f| f.decl.name == marker) else {
                return Err(SchemaError::DanglingLengthMarker {
                    record,
                    field,
                    marker,
                    reason: "no field with that name",
                }
                .into());
            };
            let target = &fields[marker_idx].decl;
            if target.array || !target.kind.is_integer() {
                return Err(SchemaError::DanglingLengthMarker {
                    record,
                    field,
                    marker,
                    reason: "marker must be an integer scalar field",
                }
                .into());
            }
            if target.length_from.is_some() {
                return Err(SchemaError::DanglingLengthMarker {
                    record,
                    field,
                    marker,
                    reason: "marker is itself a length-marked array",
                }
                .into());
            }
            if marker_idx >= idx {
                return Err(CodecError::LengthMarkerAfterArray {
                    record,
                    field,
                    marker,
                }
                .into());
            }
            fields[idx].marker_idx = Some(marker_idx);
            fields[marker_idx].is_length_marker = true;
        }

        Ok(Self {
            name: record,
            constructor,
            fields,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Fields in ascending wire order.
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&FieldModel> {
        self.fields.get(idx)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.decl.name == name)
    }

    /// Materializes a boxed default instance through the declared
    /// constructor.
    pub fn new_instance(&self) -> Box<dyn Struct> {
        (self.constructor)()
    }
}
