//! # Error Types
//!
//! Typed error taxonomy for schema building, cursor I/O, and the codec
//! engine. Every failure is terminal for the current call: the engine
//! performs no rollback, and callers must treat a failed pack/unpack as
//! producing no usable output.
//!
//! ## Error Categories
//!
//! | Category | Raised by | Recoverable by retry |
//! |----------|-----------|----------------------|
//! | [`SchemaError`] | `Schema::build` | No — fix the declaration |
//! | [`CursorError`] | `Reader` | No — input is short |
//! | [`CodecError`] | pack/unpack engine | No — fix schema or input |
//!
//! Variants carry the record type name and field name where meaningful, so
//! a failure deep inside a nested record still names its exact location.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for all codec operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Schema build failures. Detected once, at the first codec operation for
/// a record type; never at field-walk time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("record type `{record}` declares no constructor and cannot be instantiated")]
    InaccessibleType { record: &'static str },

    #[error(
        "field `{field}` of `{record}` has order {order}, which is duplicated or outside 0..{expected}"
    )]
    OrderConflict {
        record: &'static str,
        field: &'static str,
        order: usize,
        expected: usize,
    },

    #[error("array field `{field}` of `{record}` references length marker `{marker}`: {reason}")]
    DanglingLengthMarker {
        record: &'static str,
        field: &'static str,
        marker: &'static str,
        reason: &'static str,
    },
}

/// Byte cursor failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
}

/// Codec engine failures while walking a record's schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(
        "array field `{field}` of `{record}` is length-marked by `{marker}`, which is declared after it"
    )]
    LengthMarkerAfterArray {
        record: &'static str,
        field: &'static str,
        marker: &'static str,
    },

    #[error("array field `{field}` of `{record}` has no value; arrays cannot be absent")]
    NullArrayField {
        record: &'static str,
        field: &'static str,
    },

    #[error("nested record field `{field}` of `{record}` is absent and declares no factory")]
    NestedInstantiationFailed {
        record: &'static str,
        field: &'static str,
    },

    #[error("field `{field}` of `{record}` must be initialized and sized before this operation")]
    RequiredFieldUninitialized {
        record: &'static str,
        field: &'static str,
    },

    #[error("field `{field}` of `{record}` requires an accessor pair that is not available")]
    MissingAccessor {
        record: &'static str,
        field: &'static str,
    },

    #[error("field `{field}` of `{record}` answered a value that is not {expected}")]
    TypeMismatch {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("record `{record}` exceeds the maximum nesting depth at level {depth}")]
    NestingTooDeep { record: &'static str, depth: usize },
}
