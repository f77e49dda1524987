use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, warn};

/// Errors raised by the item search library
#[derive(Error, Debug)]
pub enum SearchError {
    /// An item's `build()` hook failed while its source was being indexed.
    /// Indexing is not best-effort, so this reaches the caller of `search`.
    #[error("Failed to build item '{full_name}': {source}")]
    ItemBuild {
        full_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Malformed full name '{full_name}': {reason}")]
    MalformedFullName {
        full_name: String,
        reason: &'static str,
    },

    #[error("Preferences IO failed for '{}': {source}", path.display())]
    Preferences {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preferences: {0}")]
    PreferencesParse(#[from] serde_json::Error),
}

impl SearchError {
    /// Whether the library can carry on after this error.
    ///
    /// Build failures abort the query; everything else degrades to defaults
    /// or a best-effort value.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ItemBuild { .. })
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use quick_pick::error::ResultExt;
///
/// // Keep going if the preferences file can't be written
/// store.save().log_err();
///
/// // Log as warning for expected failures
/// let item = item.set_full_name("a//b").warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Panic in debug mode, log error in release mode.
///
/// Use for "impossible" states that should crash during development
/// but gracefully degrade in production.
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            tracing::error!("IMPOSSIBLE STATE: {}", format_args!($($fmt_arg)*));
        }
    };
}
