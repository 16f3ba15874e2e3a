//! # rusty-forms-engine
//!
//! Schema-driven validation for form values. A [`ValidationSchema`] declares
//! validator chains per field path and per record rule; a [`FormValidation`]
//! runs them and reports the result in a shape a form renderer can consume
//! directly.
//!
//! ## Features
//!
//! - **Chains**: validators run in declaration order and stop at the first failure
//! - **Sync and async validators**: closures, async closures or [`Validator`] types
//! - **Overrides**: per-validator message override and custom arguments
//! - **Nested fields**: `"address.zip"` becomes `{ "address": { "zip": ... } }`
//! - **Record rules**: validators that see the whole value set
//! - **Hot schema swap**: replace the schema without disturbing running evaluations
//!
//! ## Example
//!
//! ```rust
//! use rusty_forms_engine::{create_validation, ValidationResult, ValidationSchema, ValidatorFn};
//! use serde_json::json;
//!
//! # async fn run() -> rusty_forms_engine::Result<()> {
//! let required = ValidatorFn::from_fn(|args| {
//!     if args.value.as_str().map_or(true, str::is_empty) {
//!         ValidationResult::failure("REQUIRED", args.message_or("Please fill in this mandatory field."))
//!     } else {
//!         ValidationResult::success("REQUIRED")
//!     }
//! });
//!
//! let validation = create_validation(
//!     ValidationSchema::new().with_field("user.name", [required]),
//! );
//!
//! let result = validation.validate_form(json!({ "user": { "name": "" } })).await?;
//! assert_eq!(
//!     result.map(|r| r.to_value()),
//!     Some(json!({
//!         "user": { "name": "Please fill in this mandatory field." },
//!         "recordErrors": {},
//!     }))
//! );
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod result;
pub mod schema;
pub mod validator;

pub use chain::Chain;
pub use config::ValidationConfig;
pub use engine::{create_validation, FormValidation};
pub use error::{Result, TargetKind, ValidationError};
pub use result::{FormValidationResult, RecordValidationResult, ValidationResult};
pub use schema::{SchemaSnapshot, SchemaStore, ValidationSchema};
pub use validator::{
    FullValidator, Validator, ValidatorArgs, ValidatorDescriptor, ValidatorEntry, ValidatorFn,
};
