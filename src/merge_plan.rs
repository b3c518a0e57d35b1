//! The merge planner holds an ordered, user-filterable set of merge candidates.
//!
//! One planner instance backs one interactive picker session: it is created
//! when the picker opens, mutated by toggle and move events, and dropped when
//! the picker closes. Abandoning it has no side effects. The candidate set is
//! fixed at construction; only order and inclusion flags ever change.

use crate::error::MergeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
/// A stable handle to a note plus the name shown in the picker.
pub struct NoteHandle {
    /// Path identifying the note in its vault.
    pub path: PathBuf,
    /// Display name (the file stem).
    pub name: String,
}

impl NoteHandle {
    #[must_use]
    /// Build a handle from a path, deriving the display name from its stem.
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
        Self { path, name }
    }
}

#[derive(Clone, Debug)]
/// One planner row: a candidate and whether it is currently included.
pub struct Entry {
    /// The candidate note.
    pub handle: NoteHandle,
    /// Whether the note takes part in the merge.
    pub included: bool,
}

/// Ordered, reorderable, filterable list of merge candidates.
pub struct MergePlanner {
    entries: Vec<Entry>,
}

impl MergePlanner {
    #[must_use]
    /// Build a planner over `candidates`, all initially included, in
    /// case-insensitive numeric-aware name order ("note2" before "note10").
    pub fn new(mut candidates: Vec<NoteHandle>) -> Self {
        candidates.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        Self {
            entries: candidates
                .into_iter()
                .map(|handle| Entry {
                    handle,
                    included: true,
                })
                .collect(),
        }
    }

    #[must_use]
    /// The rows in their current order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    /// Number of candidates (fixed for the planner's lifetime).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether the planner holds no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.handle.path.as_path() == path)
    }

    /// Flip the inclusion flag for the note at `path`. Order is untouched and
    /// a double toggle restores the original flag.
    ///
    /// Returns false (and changes nothing) for a path the planner was not
    /// constructed with.
    pub fn toggle_included(&mut self, path: &Path) -> bool {
        match self.position(path) {
            Some(index) => {
                self.entries[index].included = !self.entries[index].included;
                true
            }
            None => false,
        }
    }

    /// Move the note at `path` to `new_index`, clamped to the valid range,
    /// preserving the relative order of every other entry. Moving an entry
    /// onto its own index is a no-op.
    ///
    /// Returns false for a path the planner was not constructed with.
    pub fn move_to(&mut self, path: &Path, new_index: usize) -> bool {
        let Some(current) = self.position(path) else {
            return false;
        };
        let target = new_index.min(self.entries.len() - 1);
        if target != current {
            let entry = self.entries.remove(current);
            self.entries.insert(target, entry);
        }
        true
    }

    /// The included notes in their current order.
    ///
    /// # Errors
    ///
    /// [`MergeError::EmptySelection`] when nothing is included: callers must
    /// surface that rather than produce a degenerate empty merge.
    pub fn finalize(&self) -> Result<Vec<NoteHandle>, MergeError> {
        let included: Vec<NoteHandle> = self
            .entries
            .iter()
            .filter(|entry| entry.included)
            .map(|entry| entry.handle.clone())
            .collect();
        if included.is_empty() {
            return Err(MergeError::EmptySelection);
        }
        Ok(included)
    }
}

#[must_use]
/// Case-insensitive, numeric-aware lexicographic comparison: digit runs
/// compare by value, everything else character by character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut xs = a.chars().map(|c| c.to_ascii_lowercase()).peekable();
    let mut ys = b.chars().map(|c| c.to_ascii_lowercase()).peekable();

    loop {
        match (xs.peek().copied(), ys.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let xr = take_digit_run(&mut xs);
                let yr = take_digit_run(&mut ys);
                let ord = cmp_digit_runs(&xr, &yr);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.cmp(&y);
                if ord != Ordering::Equal {
                    return ord;
                }
                xs.next();
                ys.next();
            }
        }
    }
}

fn take_digit_run<I>(chars: &mut Peekable<I>) -> String
where
    I: Iterator<Item = char>,
{
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(x: &str, y: &str) -> Ordering {
    let xt = x.trim_start_matches('0');
    let yt = y.trim_start_matches('0');
    // More significant digits wins; same width compares digit-wise. Leading
    // zeros only break exact value ties ("01" before nothing extra in "1").
    xt.len()
        .cmp(&yt.len())
        .then_with(|| xt.cmp(yt))
        .then_with(|| x.len().cmp(&y.len()))
}

#[cfg(test)]
#[path = "tests/merge_plan.rs"]
mod tests;
