//! # Codec Engine - Schema-Driven Pack and Unpack
//!
//! This module walks a record's [`Schema`] in wire order and moves each
//! field through the byte cursor, recursing for nested records. The
//! record never describes its own bytes; the schema drives everything.
//!
//! ## Algorithm
//!
//! Symmetric for pack and unpack:
//!
//! 1. Resolve the schema through the global [`SchemaCache`].
//! 2. Pre-flight accessor-mode fields: packing needs each getter,
//!    unpacking needs both halves of the pair. A missing accessor fails
//!    here, before any field is read or written.
//! 3. Visit fields in ascending order:
//!    - A length-marked array resolves its element count first: packing
//!      uses the array value's own length; unpacking reads the marker
//!      field's integer value back from the record (the marker decoded
//!      earlier — schema validation guarantees it precedes the array),
//!      allocates exactly that many elements, then fills them. A count
//!      of zero yields an empty array; negative counts clamp to zero.
//!    - An unmarked array uses the value's existing length as-is.
//!    - A nested record recurses, bounded by [`MAX_NESTING_DEPTH`].
//!    - Everything else is a single cursor read or write.
//!
//! ## Failure Semantics
//!
//! The first failure aborts the whole call. The engine performs no
//! rollback: a failed pack leaves partial bytes in the writer and a
//! failed unpack may have already populated earlier fields — callers
//! must treat a failed call as producing no usable output.

use crate::cache::SchemaCache;
use crate::cursor::{ByteOrder, Reader, Writer};
use crate::error::{CodecError, Error, Result};
use crate::field::{AccessMode, ElemKind};
use crate::fixed::FixedString;
use crate::record::{FieldMut, FieldRef, Struct, StructSlice, Value};
use crate::schema::{FieldModel, Schema};

/// Maximum depth of nested-record recursion.
pub const MAX_NESTING_DEPTH: usize = 16;

/// Packs `record` into a fresh buffer in the given byte order.
pub fn pack(record: &dyn Struct, order: ByteOrder) -> Result<Vec<u8>> {
    let mut writer = Writer::new(order);
    pack_into(record, &mut writer)?;
    Ok(writer.into_bytes())
}

/// Packs `record` onto the end of a caller-owned writer, so several
/// records can share one buffer.
pub fn pack_into(record: &dyn Struct, writer: &mut Writer) -> Result<()> {
    encode_struct(writer, record, 0)
}

/// Unpacks `bytes` into an existing record. Trailing bytes beyond the
/// record's layout are left unread.
pub fn unpack_into(bytes: &[u8], record: &mut dyn Struct, order: ByteOrder) -> Result<()> {
    let mut reader = Reader::new(bytes, order);
    decode_struct(&mut reader, record, 0)
}

/// Unpacks `bytes` into a fresh default instance of `R`.
pub fn unpack<R: Struct + Default>(bytes: &[u8], order: ByteOrder) -> Result<R> {
    let mut record = R::default();
    unpack_into(bytes, &mut record, order)?;
    Ok(record)
}

/// Unpacks `bytes` into an instance materialized through the schema's
/// constructor, for callers that only know the type dynamically.
pub fn unpack_dyn(bytes: &[u8], schema: &Schema, order: ByteOrder) -> Result<Box<dyn Struct>> {
    let mut record = schema.new_instance();
    unpack_into(bytes, record.as_mut(), order)?;
    Ok(record)
}

fn encode_struct(w: &mut Writer, record: &dyn Struct, depth: usize) -> Result<()> {
    let schema = SchemaCache::global().get_or_build(record)?;
    if depth >= MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            record: schema.name(),
            depth,
        }
        .into());
    }
    preflight(&schema, record, false)?;
    for field in schema.fields() {
        encode_field(w, record, &schema, field, depth)?;
    }
    Ok(())
}

fn decode_struct(r: &mut Reader<'_>, record: &mut dyn Struct, depth: usize) -> Result<()> {
    let schema = SchemaCache::global().get_or_build(record)?;
    if depth >= MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            record: schema.name(),
            depth,
        }
        .into());
    }
    preflight(&schema, record, true)?;
    for idx in 0..schema.field_count() {
        let field = &schema.fields()[idx];
        let count = match field.marker_index() {
            Some(marker_idx) => {
                let marker = &schema.fields()[marker_idx];
                Some(marker_value(record, &schema, marker)?.max(0) as usize)
            }
            None => None,
        };
        decode_field(r, record, &schema, field, count, depth)?;
    }
    Ok(())
}

/// Accessor availability check, run before any field is touched so a
/// missing accessor never leaves the record partially mutated.
fn preflight(schema: &Schema, record: &dyn Struct, decode: bool) -> Result<()> {
    for field in schema.fields() {
        if field.access() != AccessMode::Accessor {
            continue;
        }
        let pair = record.accessors(field.name());
        if !pair.get || (decode && !pair.set) {
            return Err(missing_accessor(schema, field));
        }
    }
    Ok(())
}

/// The marker field's current integer value, read back from the record.
fn marker_value(record: &dyn Struct, schema: &Schema, marker: &FieldModel) -> Result<i64> {
    match marker.access() {
        AccessMode::Direct => match record.field(marker.name()) {
            Some(FieldRef::U8(v)) => Ok(i64::from(v)),
            Some(FieldRef::I16(v)) => Ok(i64::from(v)),
            Some(FieldRef::I32(v)) => Ok(i64::from(v)),
            Some(FieldRef::I64(v)) => Ok(v),
            _ => Err(mismatch(schema, marker)),
        },
        AccessMode::Accessor => match record.get(marker.name()) {
            Some(Value::U8(v)) => Ok(i64::from(v)),
            Some(Value::I16(v)) => Ok(i64::from(v)),
            Some(Value::I32(v)) => Ok(i64::from(v)),
            Some(Value::I64(v)) => Ok(v),
            None => Err(missing_accessor(schema, marker)),
            _ => Err(mismatch(schema, marker)),
        },
    }
}

fn encode_field(
    w: &mut Writer,
    record: &dyn Struct,
    schema: &Schema,
    field: &FieldModel,
    depth: usize,
) -> Result<()> {
    match field.access() {
        AccessMode::Direct => {
            let Some(value) = record.field(field.name()) else {
                return Err(mismatch(schema, field));
            };
            encode_ref(w, schema, field, value, depth)
        }
        AccessMode::Accessor => {
            let Some(value) = record.get(field.name()) else {
                return Err(missing_accessor(schema, field));
            };
            encode_value(w, schema, field, value, depth)
        }
    }
}

fn encode_ref(
    w: &mut Writer,
    schema: &Schema,
    field: &FieldModel,
    value: FieldRef<'_>,
    depth: usize,
) -> Result<()> {
    match (field.kind(), field.is_array(), value) {
        (ElemKind::Bool, false, FieldRef::Bool(v)) => w.write_bool(v),
        (ElemKind::U8, false, FieldRef::U8(v)) => w.write_u8(v),
        (ElemKind::I16, false, FieldRef::I16(v)) => w.write_i16(v),
        (ElemKind::I32, false, FieldRef::I32(v)) => w.write_i32(v),
        (ElemKind::I64, false, FieldRef::I64(v)) => w.write_i64(v),
        (ElemKind::Char, false, FieldRef::Char(v)) => w.write_char(v),
        (ElemKind::F32, false, FieldRef::F32(v)) => w.write_f32(v),
        (ElemKind::F64, false, FieldRef::F64(v)) => w.write_f64(v),

        (ElemKind::Str, false, FieldRef::Str(s)) => w.write_u8_slice(s.as_bytes(), None),
        (ElemKind::Struct, false, FieldRef::Struct(nested)) => {
            return encode_struct(w, nested, depth + 1);
        }

        (ElemKind::Bool, true, FieldRef::Bools(v)) => w.write_bool_slice(v, None),
        (ElemKind::U8, true, FieldRef::Bytes(v)) => w.write_u8_slice(v, None),
        (ElemKind::I16, true, FieldRef::I16s(v)) => w.write_i16_slice(v, None),
        (ElemKind::I32, true, FieldRef::I32s(v)) => w.write_i32_slice(v, None),
        (ElemKind::I64, true, FieldRef::I64s(v)) => w.write_i64_slice(v, None),
        (ElemKind::Char, true, FieldRef::Chars(v)) => w.write_char_slice(v, None),
        (ElemKind::F32, true, FieldRef::F32s(v)) => w.write_f32_slice(v, None),
        (ElemKind::F64, true, FieldRef::F64s(v)) => w.write_f64_slice(v, None),

        (ElemKind::Str, true, FieldRef::Strs(v)) => {
            for s in v {
                w.write_u8_slice(s.as_bytes(), None);
            }
        }
        (ElemKind::Struct, true, FieldRef::Structs(slice)) => {
            for i in 0..slice.len() {
                encode_struct(w, slice.at(i), depth + 1)?;
            }
        }

        _ => return Err(mismatch(schema, field)),
    }
    Ok(())
}

fn encode_value(
    w: &mut Writer,
    schema: &Schema,
    field: &FieldModel,
    value: Value,
    depth: usize,
) -> Result<()> {
    if matches!(value, Value::Null) {
        return Err(if field.is_array() {
            null_array(schema, field)
        } else if matches!(field.kind(), ElemKind::Str | ElemKind::Struct) {
            uninitialized(schema, field)
        } else {
            mismatch(schema, field)
        });
    }
    match (field.kind(), field.is_array(), value) {
        (ElemKind::Bool, false, Value::Bool(v)) => w.write_bool(v),
        (ElemKind::U8, false, Value::U8(v)) => w.write_u8(v),
        (ElemKind::I16, false, Value::I16(v)) => w.write_i16(v),
        (ElemKind::I32, false, Value::I32(v)) => w.write_i32(v),
        (ElemKind::I64, false, Value::I64(v)) => w.write_i64(v),
        (ElemKind::Char, false, Value::Char(v)) => w.write_char(v),
        (ElemKind::F32, false, Value::F32(v)) => w.write_f32(v),
        (ElemKind::F64, false, Value::F64(v)) => w.write_f64(v),

        (ElemKind::Str, false, Value::Str(s)) => w.write_u8_slice(s.as_bytes(), None),
        (ElemKind::Struct, false, Value::Struct(nested)) => {
            return encode_struct(w, nested.as_ref(), depth + 1);
        }

        (ElemKind::Bool, true, Value::Bools(v)) => w.write_bool_slice(&v, None),
        (ElemKind::U8, true, Value::Bytes(v)) => w.write_u8_slice(&v, None),
        (ElemKind::I16, true, Value::I16s(v)) => w.write_i16_slice(&v, None),
        (ElemKind::I32, true, Value::I32s(v)) => w.write_i32_slice(&v, None),
        (ElemKind::I64, true, Value::I64s(v)) => w.write_i64_slice(&v, None),
        (ElemKind::Char, true, Value::Chars(v)) => w.write_char_slice(&v, None),
        (ElemKind::F32, true, Value::F32s(v)) => w.write_f32_slice(&v, None),
        (ElemKind::F64, true, Value::F64s(v)) => w.write_f64_slice(&v, None),

        (ElemKind::Str, true, Value::Strs(v)) => {
            for s in &v {
                w.write_u8_slice(s.as_bytes(), None);
            }
        }
        (ElemKind::Struct, true, Value::Structs(slice)) => {
            for i in 0..slice.len() {
                encode_struct(w, slice.at(i), depth + 1)?;
            }
        }

        _ => return Err(mismatch(schema, field)),
    }
    Ok(())
}

fn decode_field(
    r: &mut Reader<'_>,
    record: &mut dyn Struct,
    schema: &Schema,
    field: &FieldModel,
    count: Option<usize>,
    depth: usize,
) -> Result<()> {
    match field.access() {
        AccessMode::Direct => {
            let Some(slot) = record.field_mut(field.name()) else {
                return Err(mismatch(schema, field));
            };
            decode_into_ref(r, schema, field, slot, count, depth)
        }
        AccessMode::Accessor => decode_via_accessors(r, record, schema, field, count, depth),
    }
}

fn decode_into_ref(
    r: &mut Reader<'_>,
    schema: &Schema,
    field: &FieldModel,
    slot: FieldMut<'_>,
    count: Option<usize>,
    depth: usize,
) -> Result<()> {
    match (field.kind(), field.is_array(), slot) {
        (ElemKind::Bool, false, FieldMut::Bool(v)) => *v = r.read_bool()?,
        (ElemKind::U8, false, FieldMut::U8(v)) => *v = r.read_u8()?,
        (ElemKind::I16, false, FieldMut::I16(v)) => *v = r.read_i16()?,
        (ElemKind::I32, false, FieldMut::I32(v)) => *v = r.read_i32()?,
        (ElemKind::I64, false, FieldMut::I64(v)) => *v = r.read_i64()?,
        (ElemKind::Char, false, FieldMut::Char(v)) => *v = r.read_char()?,
        (ElemKind::F32, false, FieldMut::F32(v)) => *v = r.read_f32()?,
        (ElemKind::F64, false, FieldMut::F64(v)) => *v = r.read_f64()?,

        (ElemKind::Str, false, FieldMut::Str(s)) => {
            if s.capacity() == 0 {
                return Err(uninitialized(schema, field));
            }
            r.read_u8_slice(s.as_bytes_mut(), None)?;
        }
        (ElemKind::Struct, false, FieldMut::Struct(nested)) => {
            return decode_struct(r, nested, depth + 1);
        }

        (ElemKind::Bool, true, FieldMut::Bools(v)) => {
            if let Some(n) = count {
                v.resize(n, false);
            }
            r.read_bool_slice(v, None)?;
        }
        (ElemKind::U8, true, FieldMut::Bytes(v)) => {
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_u8_slice(v, None)?;
        }
        (ElemKind::I16, true, FieldMut::I16s(v)) => {
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_i16_slice(v, None)?;
        }
        (ElemKind::I32, true, FieldMut::I32s(v)) => {
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_i32_slice(v, None)?;
        }
        (ElemKind::I64, true, FieldMut::I64s(v)) => {
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_i64_slice(v, None)?;
        }
        (ElemKind::Char, true, FieldMut::Chars(v)) => {
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_char_slice(v, None)?;
        }
        (ElemKind::F32, true, FieldMut::F32s(v)) => {
            if let Some(n) = count {
                v.resize(n, 0.0);
            }
            r.read_f32_slice(v, None)?;
        }
        (ElemKind::F64, true, FieldMut::F64s(v)) => {
            if let Some(n) = count {
                v.resize(n, 0.0);
            }
            r.read_f64_slice(v, None)?;
        }

        (ElemKind::Str, true, FieldMut::Strs(v)) => {
            if let Some(n) = count {
                v.resize(n, FixedString::default());
            }
            for s in v.iter_mut() {
                if s.capacity() == 0 {
                    return Err(uninitialized(schema, field));
                }
                r.read_u8_slice(s.as_bytes_mut(), None)?;
            }
        }
        (ElemKind::Struct, true, FieldMut::Structs(slice)) => {
            if let Some(n) = count {
                slice.resize_with_default(n);
            }
            for i in 0..slice.len() {
                decode_struct(r, slice.at_mut(i), depth + 1)?;
            }
        }

        _ => return Err(mismatch(schema, field)),
    }
    Ok(())
}

fn decode_via_accessors(
    r: &mut Reader<'_>,
    record: &mut dyn Struct,
    schema: &Schema,
    field: &FieldModel,
    count: Option<usize>,
    depth: usize,
) -> Result<()> {
    let name = field.name();
    match (field.kind(), field.is_array()) {
        (ElemKind::Bool, false) => {
            let v = r.read_bool()?;
            put(record, schema, field, Value::Bool(v))
        }
        (ElemKind::U8, false) => {
            let v = r.read_u8()?;
            put(record, schema, field, Value::U8(v))
        }
        (ElemKind::I16, false) => {
            let v = r.read_i16()?;
            put(record, schema, field, Value::I16(v))
        }
        (ElemKind::I32, false) => {
            let v = r.read_i32()?;
            put(record, schema, field, Value::I32(v))
        }
        (ElemKind::I64, false) => {
            let v = r.read_i64()?;
            put(record, schema, field, Value::I64(v))
        }
        (ElemKind::Char, false) => {
            let v = r.read_char()?;
            put(record, schema, field, Value::Char(v))
        }
        (ElemKind::F32, false) => {
            let v = r.read_f32()?;
            put(record, schema, field, Value::F32(v))
        }
        (ElemKind::F64, false) => {
            let v = r.read_f64()?;
            put(record, schema, field, Value::F64(v))
        }

        (ElemKind::Str, false) => {
            let mut s = match record.get(name) {
                Some(Value::Str(s)) => s,
                Some(Value::Null) => return Err(uninitialized(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if s.capacity() == 0 {
                return Err(uninitialized(schema, field));
            }
            r.read_u8_slice(s.as_bytes_mut(), None)?;
            put(record, schema, field, Value::Str(s))
        }
        (ElemKind::Struct, false) => {
            let mut nested: Box<dyn Struct> = match record.get(name) {
                Some(Value::Struct(b)) => b,
                Some(Value::Null) => match field.nested_new() {
                    Some(factory) => factory(),
                    None => {
                        return Err(CodecError::NestedInstantiationFailed {
                            record: schema.name(),
                            field: name,
                        }
                        .into());
                    }
                },
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            decode_struct(r, nested.as_mut(), depth + 1)?;
            put(record, schema, field, Value::Struct(nested))
        }

        (ElemKind::Bool, true) => {
            let mut v = match record.get(name) {
                Some(Value::Bools(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, false);
            }
            r.read_bool_slice(&mut v, None)?;
            put(record, schema, field, Value::Bools(v))
        }
        (ElemKind::U8, true) => {
            let mut v = match record.get(name) {
                Some(Value::Bytes(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_u8_slice(&mut v, None)?;
            put(record, schema, field, Value::Bytes(v))
        }
        (ElemKind::I16, true) => {
            let mut v = match record.get(name) {
                Some(Value::I16s(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_i16_slice(&mut v, None)?;
            put(record, schema, field, Value::I16s(v))
        }
        (ElemKind::I32, true) => {
            let mut v = match record.get(name) {
                Some(Value::I32s(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_i32_slice(&mut v, None)?;
            put(record, schema, field, Value::I32s(v))
        }
        (ElemKind::I64, true) => {
            let mut v = match record.get(name) {
                Some(Value::I64s(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_i64_slice(&mut v, None)?;
            put(record, schema, field, Value::I64s(v))
        }
        (ElemKind::Char, true) => {
            let mut v = match record.get(name) {
                Some(Value::Chars(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0);
            }
            r.read_char_slice(&mut v, None)?;
            put(record, schema, field, Value::Chars(v))
        }
        (ElemKind::F32, true) => {
            let mut v = match record.get(name) {
                Some(Value::F32s(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0.0);
            }
            r.read_f32_slice(&mut v, None)?;
            put(record, schema, field, Value::F32s(v))
        }
        (ElemKind::F64, true) => {
            let mut v = match record.get(name) {
                Some(Value::F64s(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, 0.0);
            }
            r.read_f64_slice(&mut v, None)?;
            put(record, schema, field, Value::F64s(v))
        }

        (ElemKind::Str, true) => {
            let mut v = match record.get(name) {
                Some(Value::Strs(v)) => v,
                Some(Value::Null) if count.is_some() => Vec::new(),
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                v.resize(n, FixedString::default());
            }
            for s in v.iter_mut() {
                if s.capacity() == 0 {
                    return Err(uninitialized(schema, field));
                }
                r.read_u8_slice(s.as_bytes_mut(), None)?;
            }
            put(record, schema, field, Value::Strs(v))
        }
        (ElemKind::Struct, true) => {
            // a fresh element vector cannot be conjured through type
            // erasure, so struct arrays must be present even when marked
            let mut slice: Box<dyn StructSlice> = match record.get(name) {
                Some(Value::Structs(b)) => b,
                Some(Value::Null) => return Err(null_array(schema, field)),
                None => return Err(missing_accessor(schema, field)),
                Some(_) => return Err(mismatch(schema, field)),
            };
            if let Some(n) = count {
                slice.resize_with_default(n);
            }
            for i in 0..slice.len() {
                decode_struct(r, slice.at_mut(i), depth + 1)?;
            }
            put(record, schema, field, Value::Structs(slice))
        }
    }
}

fn put(record: &mut dyn Struct, schema: &Schema, field: &FieldModel, value: Value) -> Result<()> {
    if record.set(field.name(), value) {
        Ok(())
    } else {
        Err(missing_accessor(schema, field))
    }
}

fn mismatch(schema: &Schema, field: &FieldModel) -> Error {
    CodecError::TypeMismatch {
        record: schema.name(),
        field: field.name(),
        expected: expected_name(field),
    }
    .into()
}

fn missing_accessor(schema: &Schema, field: &FieldModel) -> Error {
    CodecError::MissingAccessor {
        record: schema.name(),
        field: field.name(),
    }
    .into()
}

fn null_array(schema: &Schema, field: &FieldModel) -> Error {
    CodecError::NullArrayField {
        record: schema.name(),
        field: field.name(),
    }
    .into()
}

fn uninitialized(schema: &Schema, field: &FieldModel) -> Error {
    CodecError::RequiredFieldUninitialized {
        record: schema.name(),
        field: field.name(),
    }
    .into()
}

fn expected_name(field: &FieldModel) -> &'static str {
    if !field.is_array() {
        return field.kind().wire_name();
    }
    match field.kind() {
        ElemKind::Bool => "bool array",
        ElemKind::U8 => "u8 array",
        ElemKind::I16 => "i16 array",
        ElemKind::I32 => "i32 array",
        ElemKind::I64 => "i64 array",
        ElemKind::Char => "char array",
        ElemKind::F32 => "f32 array",
        ElemKind::F64 => "f64 array",
        ElemKind::Str => "fixed string array",
        ElemKind::Struct => "nested record array",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDecl, LayoutDecl};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counted {
        count: i32,
        items: Vec<i32>,
    }

    impl Struct for Counted {
        fn layout(&self) -> LayoutDecl {
            LayoutDecl::new("Counted")
                .constructed_by(|| Box::new(Counted::default()))
                .field(FieldDecl::scalar("count", 0, ElemKind::I32))
                .field(FieldDecl::array("items", 1, ElemKind::I32).length_from("count"))
        }

        fn field(&self, name: &str) -> Option<FieldRef<'_>> {
            match name {
                "count" => Some(FieldRef::I32(self.count)),
                "items" => Some(FieldRef::I32s(&self.items)),
                _ => None,
            }
        }

        fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
            match name {
                "count" => Some(FieldMut::I32(&mut self.count)),
                "items" => Some(FieldMut::I32s(&mut self.items)),
                _ => None,
            }
        }
    }

    #[test]
    fn marked_array_round_trips() {
        let record = Counted {
            count: 3,
            items: vec![10, 20, 30],
        };
        let bytes = pack(&record, ByteOrder::Big).unwrap();
        assert_eq!(bytes.len(), 4 + 3 * 4);

        let back: Counted = unpack(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn zero_marker_decodes_empty_array() {
        let record = Counted {
            count: 0,
            items: Vec::new(),
        };
        let bytes = pack(&record, ByteOrder::Big).unwrap();
        assert_eq!(bytes.len(), 4);

        let back: Counted = unpack(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(back.count, 0);
        assert!(back.items.is_empty());
    }

    #[test]
    fn negative_marker_clamps_to_empty_array() {
        let record = Counted {
            count: -1,
            items: Vec::new(),
        };
        let bytes = pack(&record, ByteOrder::Big).unwrap();

        let back: Counted = unpack(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(back.count, -1);
        assert!(back.items.is_empty());
    }

    #[test]
    fn decode_shrinks_oversized_target_to_marker() {
        let bytes = pack(
            &Counted {
                count: 1,
                items: vec![7],
            },
            ByteOrder::Little,
        )
        .unwrap();

        let mut target = Counted {
            count: 0,
            items: vec![1, 2, 3, 4],
        };
        unpack_into(&bytes, &mut target, ByteOrder::Little).unwrap();
        assert_eq!(target.count, 1);
        assert_eq!(target.items, vec![7]);
    }

    #[test]
    fn truncated_input_fails_with_eof() {
        let bytes = pack(
            &Counted {
                count: 2,
                items: vec![5, 6],
            },
            ByteOrder::Big,
        )
        .unwrap();

        let err = unpack::<Counted>(&bytes[..bytes.len() - 1], ByteOrder::Big).unwrap_err();
        assert!(matches!(err, Error::Cursor(_)));
    }

    #[test]
    fn pack_into_appends_records_to_one_writer() {
        let a = Counted {
            count: 1,
            items: vec![1],
        };
        let b = Counted {
            count: 2,
            items: vec![2, 3],
        };

        let mut writer = Writer::new(ByteOrder::Big);
        pack_into(&a, &mut writer).unwrap();
        pack_into(&b, &mut writer).unwrap();

        let bytes = writer.into_bytes();
        let mut reader = Reader::new(&bytes, ByteOrder::Big);
        assert_eq!(reader.read_i32().unwrap(), 1);
        assert_eq!(reader.read_i32().unwrap(), 1);
        assert_eq!(reader.read_i32().unwrap(), 2);
        assert_eq!(reader.read_i32().unwrap(), 2);
        assert_eq!(reader.read_i32().unwrap(), 3);
    }
}

