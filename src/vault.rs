//! The vault is the storage collaborator: note enumeration, content reads,
//! collision-free target naming and the final create-new write.
//!
//! The core never touches the filesystem directly; it goes through
//! [`NoteStore`] so tests (and other hosts) can substitute their own storage.
//! [`FsStore`] is the plain-filesystem implementation the binary uses.

use crate::error::MergeError;
use crate::input::matches_extension;
use crate::merge_plan::{natural_cmp, NoteHandle};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Storage operations the merge step needs from its host.
pub trait NoteStore {
    /// Immediate child notes of `folder` whose extension is in `extensions`,
    /// in natural name order. Non-recursive.
    ///
    /// # Errors
    ///
    /// Returns an error when the folder cannot be enumerated.
    fn list_notes(&self, folder: &Path, extensions: &[String]) -> io::Result<Vec<NoteHandle>>;

    /// Full text content of the note at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the note cannot be read.
    fn read_note(&self, path: &Path) -> io::Result<String>;

    /// Whether a note already exists at `path`.
    fn note_exists(&self, path: &Path) -> bool;

    /// Create a new note at `path` with `contents`. Fails with
    /// [`io::ErrorKind::AlreadyExists`] if `path` was claimed in the meantime;
    /// never overwrites.
    ///
    /// # Errors
    ///
    /// Returns an error when the note cannot be created.
    fn create_note(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`NoteStore`] over the local filesystem.
pub struct FsStore;

impl NoteStore for FsStore {
    fn list_notes(&self, folder: &Path, extensions: &[String]) -> io::Result<Vec<NoteHandle>> {
        let mut notes = Vec::new();
        for entry in fs::read_dir(folder)? {
            let path = entry?.path();
            if path.is_file() && matches_extension(&path, extensions) {
                notes.push(NoteHandle::new(path));
            }
        }
        notes.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        Ok(notes)
    }

    fn read_note(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn note_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_note(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(contents.as_bytes())
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
/// Finalized merge: ordered sources plus the resolved unique target path.
///
/// Produced once by [`prepare_merge`], consumed once by [`execute_merge`].
pub struct MergePlan {
    /// The included notes, in merge order.
    pub sources: Vec<NoteHandle>,
    /// Collision-free output path inside the folder being merged.
    pub target: PathBuf,
}

#[must_use]
/// Resolve a target path for merging `folder` that does not collide with any
/// existing note.
///
/// The base name is the folder's own name: `<folder>/<base>.md`, then
/// `<base> 1.md`, `<base> 2.md`, and so on until an unused path turns up.
/// Each attempt is a distinct name so the loop terminates for any realistic
/// number of pre-existing collisions, but it is unbounded by construction.
pub fn resolve_merge_target<S>(store: &S, folder: &Path) -> PathBuf
where
    S: NoteStore + ?Sized,
{
    let base = folder
        .file_name()
        .map_or_else(|| "merged".to_string(), |name| name.to_string_lossy().into_owned());

    let candidate = folder.join(format!("{base}.md"));
    if !store.note_exists(&candidate) {
        return candidate;
    }

    let mut counter = 1u64;
    loop {
        let candidate = folder.join(format!("{base} {counter}.md"));
        if !store.note_exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[must_use]
/// Pair the ordered sources with a freshly resolved unique target in `folder`.
pub fn prepare_merge<S>(store: &S, folder: &Path, sources: Vec<NoteHandle>) -> MergePlan
where
    S: NoteStore + ?Sized,
{
    let target = resolve_merge_target(store, folder);
    MergePlan { sources, target }
}

#[must_use]
/// Concatenate note bodies in plan order: exactly one blank line between
/// consecutive non-empty bodies, nothing before the first or after the last.
///
/// Trailing newlines on each body are normalized away so the single-blank-line
/// separation holds whether or not the source files end in a newline. Empty
/// bodies contribute nothing, separator included.
pub fn merge_contents<B: AsRef<str>>(bodies: &[B]) -> String {
    let mut merged = String::new();
    for body in bodies {
        let body = body.as_ref().trim_end_matches('\n');
        if body.is_empty() {
            continue;
        }
        if !merged.is_empty() {
            merged.push_str("\n\n");
        }
        merged.push_str(body);
    }
    merged
}

/// Read every source, concatenate, and create the target note.
///
/// All reads happen before the single write: a failed read aborts the whole
/// merge with nothing on disk.
///
/// # Errors
///
/// [`MergeError::ContentRead`] when any source fails to read,
/// [`MergeError::WriteConflict`] when the target was claimed between name
/// resolution and the write, [`MergeError::Store`] for any other storage
/// failure.
pub fn execute_merge<S>(store: &S, plan: &MergePlan) -> Result<(), MergeError>
where
    S: NoteStore + ?Sized,
{
    let mut bodies = Vec::with_capacity(plan.sources.len());
    for source in &plan.sources {
        let body = store
            .read_note(&source.path)
            .map_err(|source_err| MergeError::ContentRead {
                path: source.path.clone(),
                source: source_err,
            })?;
        bodies.push(body);
    }

    let contents = merge_contents(&bodies);
    store.create_note(&plan.target, &contents).map_err(|err| {
        if err.kind() == io::ErrorKind::AlreadyExists {
            MergeError::WriteConflict {
                path: plan.target.clone(),
            }
        } else {
            MergeError::Store(err)
        }
    })
}

#[cfg(test)]
#[path = "tests/vault.rs"]
mod tests;
