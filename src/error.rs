//! Error types for diskgraph.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while sampling or rendering.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Standard output is not attached to a terminal.
    #[error("standard output is not a terminal")]
    NotATerminal,

    /// The kernel counter file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    CounterSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The counter file did not contain the expected fields.
    ///
    /// Most likely the kernel is too old to expose the full stat format.
    #[error(
        "found only {found} of {expected} expected fields in {path}; \
         most likely your kernel is too old to work with diskgraph"
    )]
    CounterFormat {
        path: PathBuf,
        found: usize,
        expected: usize,
    },

    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Process exit code for this error.
    ///
    /// Distinct codes per failure class: configuration problems exit 1,
    /// an unreadable counter source exits 2, an incompatible counter
    /// format exits 3.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotATerminal | Self::Io(_) => 1,
            Self::CounterSource { .. } => 2,
            Self::CounterFormat { .. } => 3,
        }
    }
}
