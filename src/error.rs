//! Error taxonomy for merge planning and execution.
//!
//! Section resolution has no error type of its own: a line that is not a
//! heading is a routine outcome and surfaces as `None`. Merging is different:
//! the caller has to distinguish a user-correctable empty selection from a
//! failed read or a lost write race, so each gets its own variant.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between planning a merge and writing it.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The plan was finalized with zero notes included. User-correctable.
    #[error("no notes selected for merging")]
    EmptySelection,

    /// A source note's body could not be read. The merge aborts whole; no
    /// partial output is written.
    #[error("failed to read '{path}': {source}")]
    ContentRead {
        /// The note that failed to read.
        path: PathBuf,
        /// The underlying read failure.
        source: io::Error,
    },

    /// The resolved target path was claimed by another writer between the
    /// uniqueness check and the create. Not retried: retrying would need a
    /// freshly resolved name.
    #[error("'{path}' was created by another writer during the merge")]
    WriteConflict {
        /// The contested target path.
        path: PathBuf,
    },

    /// Any other storage failure (enumeration, target creation).
    #[error("vault error: {0}")]
    Store(#[from] io::Error),
}
