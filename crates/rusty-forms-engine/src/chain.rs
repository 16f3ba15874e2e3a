// File: src/chain.rs
// Purpose: Ordered, short-circuiting execution of a validator chain

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::error::{Result, TargetKind, ValidationError};
use crate::validator::{ValidatorDescriptor, ValidatorEntry};

/// Normalized validators attached to one field path or record key
#[derive(Debug, Clone, Default)]
pub struct Chain {
    descriptors: Vec<ValidatorDescriptor>,
}

impl Chain {
    /// Normalize schema entries into a chain
    pub fn from_entries(entries: &[ValidatorEntry]) -> Self {
        Self {
            descriptors: entries.iter().map(ValidatorEntry::normalize).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Run the validators in declaration order
    ///
    /// Each validator is awaited before the next one starts. The first
    /// failing outcome stops the chain and its message is returned; later
    /// validators are never invoked. `Ok(None)` means every validator passed.
    pub async fn run(
        &self,
        target: &str,
        kind: TargetKind,
        value: &Value,
        values: &Arc<Value>,
    ) -> Result<Option<String>> {
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            trace!(target_name = target, %kind, index, "invoking validator");

            let outcome = descriptor.invoke(target, value, values).await.map_err(|source| {
                warn!(target_name = target, %kind, index, error = %source, "validator fault");
                ValidationError::fault(target, kind, index, source)
            })?;

            if !outcome.succeeded {
                debug!(
                    target_name = target,
                    %kind,
                    index,
                    skipped = self.descriptors.len() - index - 1,
                    "chain stopped at failing validator"
                );
                return Ok(Some(outcome.message));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ValidationResult;
    use crate::validator::{FullValidator, ValidatorFn};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted(calls: &Arc<AtomicUsize>, succeeded: bool, message: &'static str) -> ValidatorEntry {
        let calls = Arc::clone(calls);
        ValidatorFn::from_fn(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            ValidationResult {
                succeeded,
                message: message.to_string(),
                kind: "COUNTED".to_string(),
            }
        })
        .into()
    }

    async fn run(chain: &Chain) -> Result<Option<String>> {
        chain
            .run("username", TargetKind::Field, &Value::from("whatever"), &Arc::new(Value::Null))
            .await
    }

    #[tokio::test]
    async fn test_empty_chain_succeeds() {
        let chain = Chain::default();
        assert!(chain.is_empty());
        assert_eq!(run(&chain).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_all_pass_invokes_every_validator() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let chain = Chain::from_entries(&[counted(&first, true, "a"), counted(&second, true, "b")]);

        assert_eq!(run(&chain).await.unwrap(), None);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_first_failure_short_circuits() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let chain = Chain::from_entries(&[counted(&first, false, "a"), counted(&second, false, "b")]);

        assert_eq!(run(&chain).await.unwrap(), Some("a".to_string()));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_failure_reports_second_message() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let chain = Chain::from_entries(&[counted(&first, true, "a"), counted(&second, false, "b")]);

        assert_eq!(run(&chain).await.unwrap(), Some("b".to_string()));
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_returned_message_is_not_overridden() {
        // The override reaches the validator; this one ignores it.
        let entry: ValidatorEntry =
            FullValidator::new(ValidatorFn::from_fn(|_| ValidationResult::failure("T", "own message")))
                .message("override")
                .into();
        let chain = Chain::from_entries(&[entry]);
        assert_eq!(run(&chain).await.unwrap(), Some("own message".to_string()));
    }

    #[tokio::test]
    async fn test_fault_stops_chain_and_propagates() {
        let after = Arc::new(AtomicUsize::new(0));
        let faulty: ValidatorEntry = ValidatorFn::try_from_fn(|_| Err(anyhow::anyhow!("boom"))).into();
        let chain = Chain::from_entries(&[faulty, counted(&after, true, "b")]);

        let err = run(&chain).await.unwrap_err();
        match err {
            ValidationError::ValidatorFault { target, index, .. } => {
                assert_eq!(target, "username");
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }
}
