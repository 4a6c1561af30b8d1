//! # Schema Cache
//!
//! Process-wide memoization of validated [`Schema`]s, keyed by the
//! record's concrete `TypeId`. A record type's layout is declared once
//! and validated once; every subsequent pack/unpack for that type is a
//! read-lock lookup.
//!
//! ## Thread Safety
//!
//! Concurrent `get_or_build` calls for the same or different types are
//! safe. A miss builds the schema outside the lock, then inserts with
//! first-writer-wins semantics: racing builders all observe the same
//! cached entry, and a torn or partial entry is never visible. Build
//! failures are not cached — the declaration is broken either way.
//!
//! ## Lifecycle
//!
//! Populated lazily, never evicted; entries live for the process
//! lifetime behind `Arc`.

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::error::Result;
use crate::record::Struct;
use crate::schema::Schema;

static GLOBAL: OnceLock<SchemaCache> = OnceLock::new();

/// Thread-safe memoized mapping from record type identity to its built
/// schema.
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl SchemaCache {
    /// A fresh, empty cache. Most callers want [`SchemaCache::global`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by the codec engine.
    pub fn global() -> &'static SchemaCache {
        GLOBAL.get_or_init(SchemaCache::new)
    }

    /// Returns the cached schema for `record`'s concrete type, building
    /// and inserting it on first access.
    pub fn get_or_build(&self, record: &dyn Struct) -> Result<Arc<Schema>> {
        // vtable type_id: the concrete type behind the trait object,
        // not TypeId::of::<dyn Struct>()
        let any: &dyn Any = record;
        let key = any.type_id();

        if let Some(schema) = self.schemas.read().get(&key) {
            return Ok(Arc::clone(schema));
        }

        let built = Arc::new(Schema::build(record.layout())?);
        let mut schemas = self.schemas.write();
        Ok(Arc::clone(schemas.entry(key).or_insert(built)))
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convenience lookup of the schema for a concrete record type.
pub fn schema_of<R: Struct + Default>() -> Result<Arc<Schema>> {
    let probe = R::default();
    SchemaCache::global().get_or_build(&probe)
}
