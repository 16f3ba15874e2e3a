// File: src/validator.rs
// Purpose: Validator shapes accepted in a schema and their normalized form

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::path;
use crate::result::ValidationResult;

/// Arguments handed to every validator invocation
#[derive(Debug, Clone)]
pub struct ValidatorArgs {
    /// Current value of the field (`Null` for record validators)
    pub value: Value,
    /// The entire input value set
    pub values: Arc<Value>,
    /// Message override configured in the schema, if any
    pub message: Option<String>,
    /// Extra arguments from the schema; an empty object when none were given
    pub custom_args: Value,
    /// Field path or record key being evaluated
    pub name: String,
}

impl ValidatorArgs {
    /// Look up a custom argument by key, `Null` if absent
    pub fn custom_arg(&self, key: &str) -> &Value {
        self.custom_args.get(key).unwrap_or(&path::UNDEFINED)
    }

    /// The configured message override, or `default` when there is none
    pub fn message_or(&self, default: &str) -> String {
        self.message.clone().unwrap_or_else(|| default.to_string())
    }
}

/// Trait for validators implemented as types rather than closures
///
/// Useful for validators that hold state such as a connection pool.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Validate the target described by `args`
    ///
    /// Returning `Err` is a fault, not a validation failure: it aborts the
    /// evaluation that invoked the validator.
    async fn validate(&self, args: ValidatorArgs) -> anyhow::Result<ValidationResult>;
}

type SyncFn = dyn Fn(ValidatorArgs) -> anyhow::Result<ValidationResult> + Send + Sync;
type AsyncFn = dyn Fn(ValidatorArgs) -> BoxFuture<'static, anyhow::Result<ValidationResult>> + Send + Sync;

/// A callable validator, synchronous or asynchronous
///
/// The flavour is fixed when the value is built, so the chain executor only
/// ever dispatches on this enum.
#[derive(Clone)]
pub enum ValidatorFn {
    Sync(Arc<SyncFn>),
    Async(Arc<AsyncFn>),
    Custom(Arc<dyn Validator>),
}

impl ValidatorFn {
    /// Wrap a synchronous validator that cannot fault
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(ValidatorArgs) -> ValidationResult + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(
            move |args: ValidatorArgs| -> anyhow::Result<ValidationResult> { Ok(f(args)) },
        ))
    }

    /// Wrap a synchronous validator that may fault
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(ValidatorArgs) -> anyhow::Result<ValidationResult> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Wrap an asynchronous validator
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(ValidatorArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<ValidationResult>> + Send + 'static,
    {
        Self::Async(Arc::new(
            move |args: ValidatorArgs| -> BoxFuture<'static, anyhow::Result<ValidationResult>> {
                Box::pin(f(args))
            },
        ))
    }

    /// Wrap a [`Validator`] implementation
    pub fn custom<V: Validator + 'static>(validator: V) -> Self {
        Self::Custom(Arc::new(validator))
    }

    /// Invoke the validator
    pub async fn call(&self, args: ValidatorArgs) -> anyhow::Result<ValidationResult> {
        match self {
            ValidatorFn::Sync(f) => f(args),
            ValidatorFn::Async(f) => f(args).await,
            ValidatorFn::Custom(v) => v.validate(args).await,
        }
    }
}

impl fmt::Debug for ValidatorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorFn::Sync(_) => write!(f, "ValidatorFn::Sync"),
            ValidatorFn::Async(_) => write!(f, "ValidatorFn::Async"),
            ValidatorFn::Custom(_) => write!(f, "ValidatorFn::Custom"),
        }
    }
}

/// A validator declared together with its overrides
#[derive(Debug, Clone)]
pub struct FullValidator {
    pub validator: ValidatorFn,
    /// Passed to the validator as `args.message`
    pub message: Option<String>,
    pub custom_args: Option<Value>,
}

impl FullValidator {
    pub fn new(validator: ValidatorFn) -> Self {
        Self {
            validator,
            message: None,
            custom_args: None,
        }
    }

    /// Set the message override
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the custom arguments
    pub fn custom_args(mut self, custom_args: Value) -> Self {
        self.custom_args = Some(custom_args);
        self
    }
}

/// One element of a validator chain as written in a schema
#[derive(Debug, Clone)]
pub enum ValidatorEntry {
    /// A bare validator with no overrides
    Bare(ValidatorFn),
    /// A validator with a message override and/or custom arguments
    Full(FullValidator),
}

impl ValidatorEntry {
    /// Resolve either shape into the uniform invocation record
    pub fn normalize(&self) -> ValidatorDescriptor {
        match self {
            ValidatorEntry::Bare(validator) => ValidatorDescriptor {
                validator: validator.clone(),
                message: None,
                custom_args: empty_custom_args(),
            },
            ValidatorEntry::Full(full) => ValidatorDescriptor {
                validator: full.validator.clone(),
                message: full.message.clone(),
                custom_args: full.custom_args.clone().unwrap_or_else(empty_custom_args),
            },
        }
    }
}

impl From<ValidatorFn> for ValidatorEntry {
    fn from(validator: ValidatorFn) -> Self {
        ValidatorEntry::Bare(validator)
    }
}

impl From<FullValidator> for ValidatorEntry {
    fn from(full: FullValidator) -> Self {
        ValidatorEntry::Full(full)
    }
}

fn empty_custom_args() -> Value {
    Value::Object(Map::new())
}

/// Normalized validator, ready to be invoked by a chain
#[derive(Debug, Clone)]
pub struct ValidatorDescriptor {
    validator: ValidatorFn,
    message: Option<String>,
    custom_args: Value,
}

impl ValidatorDescriptor {
    /// Message override configured for this validator
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn custom_args(&self) -> &Value {
        &self.custom_args
    }

    /// Invoke the validator with this descriptor's overrides injected
    pub async fn invoke(
        &self,
        name: &str,
        value: &Value,
        values: &Arc<Value>,
    ) -> anyhow::Result<ValidationResult> {
        let args = ValidatorArgs {
            value: value.clone(),
            values: Arc::clone(values),
            message: self.message.clone(),
            custom_args: self.custom_args.clone(),
            name: name.to_string(),
        };
        self.validator.call(args).await
    }
}
