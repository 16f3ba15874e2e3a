// File: src/error.rs
// Purpose: Error types for schema checks and validator faults

use std::fmt;
use thiserror::Error;

/// What a validator chain is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A (possibly nested) form field
    Field,
    /// A record-level rule evaluated against the whole value set
    Record,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Field => write!(f, "field"),
            TargetKind::Record => write!(f, "record"),
        }
    }
}

/// Errors raised by the validation engine
///
/// A validator reporting `succeeded: false` is never an error; it surfaces as
/// a message in the result. These variants cover faults and bad schemas.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A validator returned an error instead of a result
    #[error("validator #{index} for {kind} '{target}' failed: {source}")]
    ValidatorFault {
        /// Field path or record key being evaluated
        target: String,
        kind: TargetKind,
        /// Position of the faulting validator in its chain
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// A field path cannot be turned into a nested error tree
    #[error("invalid field path '{path}': {reason}")]
    InvalidFieldPath { path: String, reason: String },
}

impl ValidationError {
    /// Wrap a validator's own error with the chain it came from
    pub fn fault(target: &str, kind: TargetKind, index: usize, source: anyhow::Error) -> Self {
        Self::ValidatorFault {
            target: target.to_string(),
            kind,
            index,
            source,
        }
    }

    /// Field path or record key the error is about
    pub fn target(&self) -> &str {
        match self {
            Self::ValidatorFault { target, .. } => target,
            Self::InvalidFieldPath { path, .. } => path,
        }
    }

    /// Recover the error the validator itself returned, untouched
    pub fn into_source(self) -> Option<anyhow::Error> {
        match self {
            Self::ValidatorFault { source, .. } => Some(source),
            Self::InvalidFieldPath { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display_names_target() {
        let err = ValidationError::fault("username", TargetKind::Field, 1, anyhow::anyhow!("boom"));
        assert_eq!(err.to_string(), "validator #1 for field 'username' failed: boom");
        assert_eq!(err.target(), "username");
    }

    #[test]
    fn test_into_source_preserves_original_error() {
        let err = ValidationError::fault("R", TargetKind::Record, 0, anyhow::anyhow!("db offline"));
        let source = err.into_source().unwrap();
        assert_eq!(source.to_string(), "db offline");
    }
}
