//! # Record Access Layer
//!
//! This module provides the [`Struct`] trait record types implement, and
//! the access enums the codec engine moves values through:
//!
//! - [`FieldRef`] / [`FieldMut`]: borrowed views used for
//!   [`AccessMode::Direct`](crate::field::AccessMode) fields — the
//!   engine reads and writes the record's storage in place.
//! - [`Value`]: owned values used for accessor-pair fields — the engine
//!   calls [`Struct::get`] / [`Struct::set`], and the record reports
//!   which half of the pair exists via [`Struct::accessors`].
//! - [`StructSlice`]: type-erased view of a `Vec<T: Struct>`, letting
//!   the engine walk and resize nested-record arrays without knowing
//!   the element type.
//!
//! `Value::Null` models an absent value on the accessor path (an unset
//! optional nested record or array). Direct-mode fields borrow storage
//! that always exists, so absence never arises there.
//!
//! The codec engine only ever borrows a record for the duration of one
//! call; ownership stays with the caller.

use std::any::Any;
use std::fmt;

use crate::field::LayoutDecl;
use crate::fixed::FixedString;

/// A record type the codec can pack and unpack.
///
/// `layout` is consulted once per process per concrete type; the result
/// is validated and memoized by the schema cache. `field`/`field_mut`
/// serve direct-mode fields, `get`/`set`/`accessors` serve
/// accessor-mode fields and default to "not available".
pub trait Struct: Any + fmt::Debug {
    /// Field layout declaration for this record type.
    fn layout(&self) -> LayoutDecl;

    /// Borrowed view of a direct-mode field.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Mutable borrowed view of a direct-mode field.
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;

    /// Reports which of the accessor pair exists for `name`. Consulted
    /// before any accessor-mode field is read or written, so a missing
    /// accessor fails the call before the record is touched.
    fn accessors(&self, name: &str) -> AccessorPair {
        let _ = name;
        AccessorPair::NONE
    }

    /// Accessor-pair getter.
    fn get(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    /// Accessor-pair setter; returns `false` when no setter exists for
    /// `name`.
    fn set(&mut self, name: &str, value: Value) -> bool {
        let _ = (name, value);
        false
    }
}

impl dyn Struct {
    pub fn is<T: Struct>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    pub fn downcast_ref<T: Struct>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    pub fn downcast_mut<T: Struct>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }
}

/// Which half of an accessor pair a record exposes for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessorPair {
    pub get: bool,
    pub set: bool,
}

impl AccessorPair {
    pub const NONE: Self = Self {
        get: false,
        set: false,
    };
    pub const GET_ONLY: Self = Self {
        get: true,
        set: false,
    };
    pub const SET_ONLY: Self = Self {
        get: false,
        set: true,
    };
    pub const BOTH: Self = Self {
        get: true,
        set: true,
    };
}

/// Borrowed read view of a direct-mode field. Scalars are copied out;
/// arrays, fixed strings, and nested records are borrowed.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Bool(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
    Char(u16),
    F32(f32),
    F64(f64),

    Bools(&'a [bool]),
    Bytes(&'a [u8]),
    I16s(&'a [i16]),
    I32s(&'a [i32]),
    I64s(&'a [i64]),
    Chars(&'a [u16]),
    F32s(&'a [f32]),
    F64s(&'a [f64]),

    Str(&'a FixedString),
    Strs(&'a [FixedString]),
    Struct(&'a dyn Struct),
    Structs(&'a dyn StructSlice),
}

/// Borrowed write view of a direct-mode field.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Bool(&'a mut bool),
    U8(&'a mut u8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Char(&'a mut u16),
    F32(&'a mut f32),
    F64(&'a mut f64),

    Bools(&'a mut Vec<bool>),
    Bytes(&'a mut Vec<u8>),
    I16s(&'a mut Vec<i16>),
    I32s(&'a mut Vec<i32>),
    I64s(&'a mut Vec<i64>),
    Chars(&'a mut Vec<u16>),
    F32s(&'a mut Vec<f32>),
    F64s(&'a mut Vec<f64>),

    Str(&'a mut FixedString),
    Strs(&'a mut Vec<FixedString>),
    Struct(&'a mut dyn Struct),
    Structs(&'a mut dyn StructSlice),
}

/// Owned value moved through an accessor pair.
#[derive(Debug)]
pub enum Value {
    /// An absent object or array value.
    Null,

    Bool(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
    Char(u16),
    F32(f32),
    F64(f64),

    Bools(Vec<bool>),
    Bytes(Vec<u8>),
    I16s(Vec<i16>),
    I32s(Vec<i32>),
    I64s(Vec<i64>),
    Chars(Vec<u16>),
    F32s(Vec<f32>),
    F64s(Vec<f64>),

    Str(FixedString),
    Strs(Vec<FixedString>),
    Struct(Box<dyn Struct>),
    Structs(Box<dyn StructSlice>),
}

/// Type-erased homogeneous vector of nested records.
///
/// Implemented for every `Vec<T>` whose elements are `Struct + Default`,
/// so records keep ordinary typed vectors while the engine resizes and
/// walks them through the erased interface.
pub trait StructSlice: fmt::Debug {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grows or shrinks to exactly `len` elements, filling new slots
    /// with default instances.
    fn resize_with_default(&mut self, len: usize);

    fn at(&self, idx: usize) -> &dyn Struct;

    fn at_mut(&mut self, idx: usize) -> &mut dyn Struct;
}

impl<T: Struct + Default> StructSlice for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn resize_with_default(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn at(&self, idx: usize) -> &dyn Struct {
        &self[idx]
    }

    fn at_mut(&mut self, idx: usize) -> &mut dyn Struct {
        &mut self[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ElemKind, FieldDecl};

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Struct for Point {
        fn layout(&self) -> LayoutDecl {
            LayoutDecl::new("Point")
                .constructed_by(|| Box::new(Point::default()))
                .field(FieldDecl::scalar("x", 0, ElemKind::I32))
                .field(FieldDecl::scalar("y", 1, ElemKind::I32))
        }

        fn field(&self, name: &str) -> Option<FieldRef<'_>> {
            match name {
                "x" => Some(FieldRef::I32(self.x)),
                "y" => Some(FieldRef::I32(self.y)),
                _ => None,
            }
        }

        fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
            match name {
                "x" => Some(FieldMut::I32(&mut self.x)),
                "y" => Some(FieldMut::I32(&mut self.y)),
                _ => None,
            }
        }
    }

    #[test]
    fn downcast_recovers_concrete_type() {
        let boxed: Box<dyn Struct> = Box::new(Point { x: 3, y: 4 });
        assert!(boxed.is::<Point>());
        let point = boxed.downcast_ref::<Point>().unwrap();
        assert_eq!(point, &Point { x: 3, y: 4 });
    }

    #[test]
    fn downcast_to_wrong_type_returns_none() {
        #[derive(Debug, Default)]
        struct Other;
        impl Struct for Other {
            fn layout(&self) -> LayoutDecl {
                LayoutDecl::new("Other").constructed_by(|| Box::new(Other))
            }
            fn field(&self, _name: &str) -> Option<FieldRef<'_>> {
                None
            }
            fn field_mut(&mut self, _name: &str) -> Option<FieldMut<'_>> {
                None
            }
        }

        let boxed: Box<dyn Struct> = Box::new(Point::default());
        assert!(boxed.downcast_ref::<Other>().is_none());
    }

    #[test]
    fn struct_slice_resizes_with_defaults() {
        let mut points: Vec<Point> = vec![Point { x: 1, y: 2 }];
        let slice: &mut dyn StructSlice = &mut points;
        slice.resize_with_default(3);
        assert_eq!(slice.len(), 3);
        assert_eq!(points[1], Point::default());
    }

    #[test]
    fn struct_slice_exposes_elements_as_dyn() {
        let mut points: Vec<Point> = vec![Point { x: 7, y: 8 }];
        let slice: &mut dyn StructSlice = &mut points;
        assert_eq!(
            slice.at(0).downcast_ref::<Point>().unwrap(),
            &Point { x: 7, y: 8 }
        );
        slice.at_mut(0).downcast_mut::<Point>().unwrap().x = 9;
        assert_eq!(points[0].x, 9);
    }

    #[test]
    fn default_accessor_surface_reports_nothing() {
        let mut p = Point::default();
        assert_eq!(p.accessors("x"), AccessorPair::NONE);
        assert!(p.get("x").is_none());
        assert!(!p.set("x", Value::I32(1)));
    }
}
