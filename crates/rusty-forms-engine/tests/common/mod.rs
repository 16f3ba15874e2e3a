//! Shared helpers for the engine integration tests

#![allow(dead_code)]

use rusty_forms_engine::{ValidationResult, ValidatorArgs, ValidatorFn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A validator that counts its invocations
#[derive(Clone)]
pub struct Mock {
    validator: ValidatorFn,
    calls: Arc<AtomicUsize>,
}

impl Mock {
    /// Synchronous validator built from a closure over the args
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(ValidatorArgs) -> ValidationResult + Send + Sync + 'static,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = ValidatorFn::from_fn(move |args| {
            counter.fetch_add(1, Ordering::SeqCst);
            f(args)
        });
        Self { validator, calls }
    }

    /// Asynchronous validator built from a closure over the args
    pub fn asynchronous<F>(f: F) -> Self
    where
        F: Fn(ValidatorArgs) -> ValidationResult + Send + Sync + 'static,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let f = Arc::new(f);
        let validator = ValidatorFn::from_async(move |args| {
            counter.fetch_add(1, Ordering::SeqCst);
            let f = Arc::clone(&f);
            async move {
                tokio::task::yield_now().await;
                Ok::<_, anyhow::Error>(f(args))
            }
        });
        Self { validator, calls }
    }

    /// Synchronous validator that always returns `result`
    pub fn returning(result: ValidationResult) -> Self {
        Self::sync(move |_| result.clone())
    }

    /// Asynchronous validator that always resolves to `result`
    pub fn resolving(result: ValidationResult) -> Self {
        Self::asynchronous(move |_| result.clone())
    }

    /// Validator that prefers the configured message override
    pub fn failing_with_default(kind: &'static str, default: &'static str) -> Self {
        Self::sync(move |args| ValidationResult::failure(kind, args.message_or(default)))
    }

    pub fn validator(&self) -> ValidatorFn {
        self.validator.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn called(&self) -> bool {
        self.calls() > 0
    }
}

pub fn failed(kind: &str, message: &str) -> ValidationResult {
    ValidationResult::failure(kind, message)
}

pub fn succeeded(kind: &str, message: &str) -> ValidationResult {
    ValidationResult::success(kind).with_message(message)
}

/// Route engine logs to the test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
