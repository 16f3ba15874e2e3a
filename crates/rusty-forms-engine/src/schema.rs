// File: src/schema.rs
// Purpose: Validation schema definition and the swappable schema store

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::chain::Chain;
use crate::error::{Result, ValidationError};
use crate::path;
use crate::validator::ValidatorEntry;

/// Declarative set of validator chains
///
/// `field` maps dot-separated field paths to their chains, `record` maps
/// record rule names to chains evaluated against the whole value set.
/// Building a replacement schema from an old one is a clone plus builder
/// calls; the engine never merges schemas itself.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    pub field: BTreeMap<String, Vec<ValidatorEntry>>,
    pub record: BTreeMap<String, Vec<ValidatorEntry>>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) the chain for a field path
    pub fn with_field<I, E>(mut self, path: impl Into<String>, validators: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ValidatorEntry>,
    {
        self.field
            .insert(path.into(), validators.into_iter().map(Into::into).collect());
        self
    }

    /// Declare (or replace) the chain for a record rule
    pub fn with_record<I, E>(mut self, key: impl Into<String>, validators: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ValidatorEntry>,
    {
        self.record
            .insert(key.into(), validators.into_iter().map(Into::into).collect());
        self
    }

    /// Drop a field path and its chain
    pub fn without_field(mut self, path: &str) -> Self {
        self.field.remove(path);
        self
    }

    /// Drop a record rule and its chain
    pub fn without_record(mut self, key: &str) -> Self {
        self.record.remove(key);
        self
    }

    /// Declared field paths
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.field.keys().map(String::as_str)
    }

    /// Declared record keys
    pub fn record_keys(&self) -> impl Iterator<Item = &str> {
        self.record.keys().map(String::as_str)
    }

    /// Verify that every field path can be placed in an error tree
    ///
    /// Rejects empty segments and paths that are both a leaf and the
    /// container of another declared path (`"a"` next to `"a.b"`).
    pub fn check(&self, separator: char) -> Result<()> {
        for field_path in self.field.keys() {
            path::check(field_path, separator)?;
        }
        for field_path in self.field.keys() {
            let containers = field_path
                .match_indices(separator)
                .map(|(at, _)| &field_path[..at]);
            for container in containers {
                if self.field.contains_key(container) {
                    return Err(ValidationError::InvalidFieldPath {
                        path: field_path.clone(),
                        reason: format!("'{}' is also declared as a field", container),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A schema together with its normalized chains
///
/// Immutable once built; evaluations hold it through an `Arc`.
#[derive(Debug)]
pub struct SchemaSnapshot {
    definition: Arc<ValidationSchema>,
    fields: BTreeMap<String, Chain>,
    records: BTreeMap<String, Chain>,
}

impl SchemaSnapshot {
    pub fn compile(definition: ValidationSchema) -> Self {
        let fields = definition
            .field
            .iter()
            .map(|(key, entries)| (key.clone(), Chain::from_entries(entries)))
            .collect();
        let records = definition
            .record
            .iter()
            .map(|(key, entries)| (key.clone(), Chain::from_entries(entries)))
            .collect();
        Self {
            definition: Arc::new(definition),
            fields,
            records,
        }
    }

    pub fn definition(&self) -> &Arc<ValidationSchema> {
        &self.definition
    }

    /// Chain for a field path, if declared
    pub fn field_chain(&self, path: &str) -> Option<&Chain> {
        self.fields.get(path)
    }

    pub fn field_chains(&self) -> impl Iterator<Item = (&str, &Chain)> {
        self.fields.iter().map(|(key, chain)| (key.as_str(), chain))
    }

    pub fn record_chains(&self) -> impl Iterator<Item = (&str, &Chain)> {
        self.records.iter().map(|(key, chain)| (key.as_str(), chain))
    }
}

/// Holds the current schema snapshot
///
/// The lock only guards the pointer: readers clone the `Arc`, writers swap
/// it. Evaluations never observe a replacement that happens mid-flight.
#[derive(Debug)]
pub struct SchemaStore {
    current: RwLock<Arc<SchemaSnapshot>>,
}

impl SchemaStore {
    pub fn new(schema: ValidationSchema) -> Self {
        Self {
            current: RwLock::new(Arc::new(SchemaSnapshot::compile(schema))),
        }
    }

    /// Capture the snapshot in effect right now
    pub fn snapshot(&self) -> Arc<SchemaSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the whole schema
    pub fn replace(&self, schema: ValidationSchema) {
        debug!(
            fields = schema.field.len(),
            records = schema.record.len(),
            "replacing validation schema"
        );
        let next = Arc::new(SchemaSnapshot::compile(schema));
        *self.current.write() = next;
    }
}
