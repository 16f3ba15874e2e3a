//! Validation engine core - field, record and whole-form evaluation

use futures::future::try_join_all;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::ValidationConfig;
use crate::error::{Result, TargetKind, ValidationError};
use crate::path;
use crate::result::{FormValidationResult, RecordValidationResult};
use crate::schema::{SchemaSnapshot, SchemaStore, ValidationSchema};

/// Create a validation engine bound to `schema`
pub fn create_validation(schema: ValidationSchema) -> FormValidation {
    FormValidation::new(schema)
}

/// Validation engine for one form
///
/// Cloning shares the schema store, so a schema update through one clone is
/// seen by all of them. Engines built separately never share state.
#[derive(Debug, Clone)]
pub struct FormValidation {
    store: Arc<SchemaStore>,
    config: Arc<ValidationConfig>,
}

type Outcomes<'a> = Vec<(&'a str, Option<String>)>;

impl FormValidation {
    /// Create an engine with the default configuration
    pub fn new(schema: ValidationSchema) -> Self {
        Self::with_config(schema, ValidationConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(schema: ValidationSchema, config: ValidationConfig) -> Self {
        Self {
            store: Arc::new(SchemaStore::new(schema)),
            config: Arc::new(config),
        }
    }

    /// Like [`FormValidation::new`], rejecting field paths that cannot form a tree
    pub fn try_new(schema: ValidationSchema) -> Result<Self> {
        Self::try_with_config(schema, ValidationConfig::default())
    }

    pub fn try_with_config(schema: ValidationSchema, config: ValidationConfig) -> Result<Self> {
        schema.check(config.path_separator)?;
        Ok(Self::with_config(schema, config))
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// The schema currently in effect
    pub fn schema(&self) -> Arc<ValidationSchema> {
        Arc::clone(self.store.snapshot().definition())
    }

    /// Replace the schema for every evaluation started after this returns
    ///
    /// This is a full replacement, not a merge. Evaluations already running
    /// finish against the schema they started with.
    pub fn update_validation_schema(&self, schema: ValidationSchema) {
        self.store.replace(schema);
    }

    /// Checked variant of [`FormValidation::update_validation_schema`]
    pub fn try_update_validation_schema(&self, schema: ValidationSchema) -> Result<()> {
        schema.check(self.config.path_separator)?;
        self.store.replace(schema);
        Ok(())
    }

    /// Validate a single field
    ///
    /// Returns the message of the first failing validator, or `None` when the
    /// chain passes or the path is not declared. No error tree is built here.
    #[instrument(skip_all, fields(field = %field_path))]
    pub async fn validate_field(
        &self,
        field_path: &str,
        value: Value,
        values: Option<Value>,
    ) -> Result<Option<String>> {
        let snapshot = self.store.snapshot();
        let Some(chain) = snapshot.field_chain(field_path) else {
            return Ok(None);
        };
        let values = Arc::new(values.unwrap_or(Value::Null));
        chain.run(field_path, TargetKind::Field, &value, &values).await
    }

    /// Validate every declared record rule against `values`
    ///
    /// All rules run concurrently and independently. Only failing rules are
    /// reported; `None` means every rule passed.
    #[instrument(skip_all)]
    pub async fn validate_record(&self, values: Value) -> Result<Option<RecordValidationResult>> {
        let snapshot = self.store.snapshot();
        let values = Arc::new(values);
        let outcomes = run_records(&snapshot, &values).await?;

        let record_errors: BTreeMap<String, String> = outcomes
            .into_iter()
            .filter_map(|(key, message)| message.map(|message| (key.to_string(), message)))
            .collect();

        if record_errors.is_empty() {
            Ok(None)
        } else {
            debug!(failed = record_errors.len(), "record validation failed");
            Ok(Some(RecordValidationResult { record_errors }))
        }
    }

    /// Validate every declared field and record rule
    ///
    /// `None` is the only success shape. Once anything fails, every declared
    /// field appears in the tree and every declared record key under
    /// `record_errors`, with `""` for the ones that passed.
    #[instrument(skip_all)]
    pub async fn validate_form(&self, values: Value) -> Result<Option<FormValidationResult>> {
        let snapshot = self.store.snapshot();
        let values = Arc::new(values);
        let separator = self.config.path_separator;

        let (fields, records) = futures::try_join!(
            run_fields(&snapshot, &values, separator),
            run_records(&snapshot, &values)
        )?;

        let failed = fields
            .iter()
            .chain(records.iter())
            .filter(|(_, message)| message.is_some())
            .count();
        if failed == 0 {
            return Ok(None);
        }
        debug!(failed, "form validation failed");

        let mut result = FormValidationResult::new(separator);
        for (field_path, message) in fields {
            path::insert(
                &mut result.fields,
                field_path,
                separator,
                Value::String(message.unwrap_or_default()),
            );
        }
        for (key, message) in records {
            result
                .record_errors
                .insert(key.to_string(), message.unwrap_or_default());
        }
        Ok(Some(result))
    }

    /// Render a form result as JSON using the configured record errors key
    pub fn render(&self, result: &FormValidationResult) -> Value {
        result.to_value_with_key(&self.config.record_errors_key)
    }
}

async fn run_fields<'a>(
    snapshot: &'a SchemaSnapshot,
    values: &'a Arc<Value>,
    separator: char,
) -> Result<Outcomes<'a>> {
    let evaluations = snapshot.field_chains().map(|(field_path, chain)| {
        let value = path::resolve(values, field_path, separator);
        async move {
            let message = chain.run(field_path, TargetKind::Field, value, values).await?;
            Ok::<_, ValidationError>((field_path, message))
        }
    });
    try_join_all(evaluations).await
}

async fn run_records<'a>(
    snapshot: &'a SchemaSnapshot,
    values: &'a Arc<Value>,
) -> Result<Outcomes<'a>> {
    let evaluations = snapshot.record_chains().map(|(key, chain)| async move {
        let message = chain
            .run(key, TargetKind::Record, &path::UNDEFINED, values)
            .await?;
        Ok::<_, ValidationError>((key, message))
    });
    try_join_all(evaluations).await
}
