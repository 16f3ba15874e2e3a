//! Engine configuration types

use serde::{Deserialize, Serialize};

/// Separator between the segments of a nested field path
pub const DEFAULT_PATH_SEPARATOR: char = '.';

/// Key holding record-level errors in a rendered form result
pub const DEFAULT_RECORD_ERRORS_KEY: &str = "recordErrors";

/// Validation engine configuration
///
/// Embeddable in a host application's own config file; the engine never reads
/// files itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Separator used to nest field paths (default: '.')
    #[serde(default = "default_path_separator")]
    pub path_separator: char,

    /// Key record errors are rendered under (default: "recordErrors")
    #[serde(default = "default_record_errors_key")]
    pub record_errors_key: String,
}

pub(crate) fn default_path_separator() -> char {
    DEFAULT_PATH_SEPARATOR
}

fn default_record_errors_key() -> String {
    DEFAULT_RECORD_ERRORS_KEY.to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            path_separator: default_path_separator(),
            record_errors_key: default_record_errors_key(),
        }
    }
}
