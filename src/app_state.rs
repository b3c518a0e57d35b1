//! The core state machine bridging notes, section selection, and merging.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated
//! as the user navigates. The reader view holds a line snapshot of the open
//! note; the editor view holds an edtui buffer of the same note. Both resolve
//! sections through the same functions in [`crate::section`], so a selection
//! made from either surface covers identical lines.

use crate::clipboard;
use crate::config::Config;
use crate::input;
use crate::merge_plan::{MergePlanner, NoteHandle};
use crate::section::{self, LineSource, SectionRange};
use crate::vault::{self, FsStore, MergePlan, NoteStore};
use edtui::{EditorState, Lines};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// [`LineSource`] view over a live edtui buffer, so the editor surface feeds
/// the resolver directly rather than through its own copy of the logic.
struct EditorLines<'a>(&'a Lines);

impl LineSource for EditorLines<'_> {
    fn line_count(&self) -> usize {
        self.0.len()
    }

    fn line(&self, index: usize) -> Cow<'_, str> {
        Cow::Owned(
            self.0
                .iter_row()
                .nth(index)
                .map_or_else(String::new, |row| row.iter().collect()),
        )
    }
}

#[derive(PartialEq, Eq)]
/// Determines navigation scope and quit behavior based on vault size.
pub enum FileMode {
    /// Single-note mode quits directly to shell.
    Single,
    /// Multi-note mode returns to the note list before quitting.
    Multi,
}

#[derive(Clone, Copy, PartialEq, Eq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays the vault's notes for selection.
    NoteList,
    /// Read-only line view of one note with section selection.
    Reader,
    /// Vim-like editor over the whole note.
    Editor,
    /// Interactive merge candidate picker.
    Picker,
    /// Captures vim-style command input after ':' in the editor.
    Command,
}

/// Bridges notes, section resolution and merge planning for the UI.
pub struct AppState {
    /// Notes available in this session.
    pub files: Vec<PathBuf>,
    /// Selected note in the note list view.
    pub current_file_index: usize,
    /// Controls navigation behavior and note list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Line snapshot of the open note, shown by the reader view.
    pub lines: Vec<String>,
    /// Cursor line in the reader view.
    pub cursor_line: usize,
    /// Currently highlighted section selection, if any.
    pub selection: Option<SectionRange>,
    /// Editor buffer content when the editor view is active.
    pub editor_state: Option<EditorState>,
    /// Merge picker state; one planner per picker session.
    pub planner: Option<MergePlanner>,
    /// Cursor row in the merge picker.
    pub picker_index: usize,
    /// Folder backing the merge picker, when the session opened on one.
    pub vault_folder: Option<PathBuf>,
    /// Merge plans executed this session, printed as JSON on exit.
    pub executed_merges: Vec<MergePlan>,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Whether section selections include the heading line. Passed explicitly
    /// into every resolver call.
    pub include_heading: bool,
    /// Note extensions recognised when enumerating the vault folder.
    pub file_extensions: Vec<String>,
    /// Maximum line width for editor text wrapping.
    pub wrap_width: usize,
    store: FsStore,
}

impl AppState {
    #[must_use]
    /// Initialise application state and determine file mode.
    ///
    /// Single-note sessions skip the note list and quit directly to shell;
    /// multi-note sessions show the list and return to it on 'q'.
    pub fn new(files: Vec<PathBuf>, vault_folder: Option<PathBuf>, cfg: &Config) -> Self {
        let file_mode = if files.len() == 1 {
            FileMode::Single
        } else {
            FileMode::Multi
        };
        let current_view = if file_mode == FileMode::Single {
            View::Reader
        } else {
            View::NoteList
        };

        Self {
            files,
            current_file_index: 0,
            file_mode,
            current_view,
            lines: Vec::new(),
            cursor_line: 0,
            selection: None,
            editor_state: None,
            planner: None,
            picker_index: 0,
            vault_folder,
            executed_merges: Vec::new(),
            command_buffer: String::new(),
            message: None,
            include_heading: cfg.include_heading,
            file_extensions: cfg.file_extensions.clone(),
            wrap_width: cfg.wrap_width,
            store: FsStore,
        }
    }

    /// Load the note at `index` into the reader view as a fresh line snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the note cannot be read.
    pub fn open_note(&mut self, index: usize) -> io::Result<()> {
        let content = fs::read_to_string(&self.files[index])?;
        self.current_file_index = index;
        self.lines = content.lines().map(str::to_string).collect();
        self.cursor_line = 0;
        self.selection = None;
        self.editor_state = None;
        self.current_view = View::Reader;
        Ok(())
    }

    #[must_use]
    /// Display name of the note open in the reader/editor.
    pub fn current_note_name(&self) -> String {
        self.files
            .get(self.current_file_index)
            .map_or_else(String::new, |path| input::display_name(path))
    }

    /// Move the reader cursor up one line.
    pub fn cursor_up(&mut self) {
        self.cursor_line = self.cursor_line.saturating_sub(1);
    }

    /// Move the reader cursor down one line.
    pub fn cursor_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
        }
    }

    /// Jump the reader cursor to the previous heading line, if any.
    pub fn cursor_to_prev_heading(&mut self) {
        if let Some((index, _)) = section::scan_headers(self.lines.as_slice())
            .into_iter()
            .take_while(|&(index, _)| index < self.cursor_line)
            .last()
        {
            self.cursor_line = index;
        }
    }

    /// Jump the reader cursor to the next heading line, if any.
    pub fn cursor_to_next_heading(&mut self) {
        if let Some((index, _)) = section::scan_headers(self.lines.as_slice())
            .into_iter()
            .find(|&(index, _)| index > self.cursor_line)
        {
            self.cursor_line = index;
        }
    }

    /// Highlight the section under the reader cursor, or report why not.
    pub fn select_section(&mut self) {
        match section::resolve_section_range(
            self.lines.as_slice(),
            self.cursor_line,
            self.include_heading,
        ) {
            Some(range) => {
                self.selection = Some(range);
                self.message = Some(format!("Selected {} lines", range.line_count()));
            }
            None => {
                self.selection = None;
                self.message = Some(self.not_selectable_reason());
            }
        }
    }

    fn not_selectable_reason(&self) -> String {
        if self.lines.is_empty() {
            return "Note is empty".to_string();
        }
        if section::parse_header(&self.lines[self.cursor_line]).is_some() {
            "Section has no body to select".to_string()
        } else {
            "Not a heading line".to_string()
        }
    }

    #[must_use]
    /// Text of the section under the reader cursor, resolved with the
    /// configured heading policy. `None` when nothing is selectable.
    pub fn section_text_at_cursor(&self) -> Option<String> {
        let range = section::resolve_section_range(
            self.lines.as_slice(),
            self.cursor_line,
            self.include_heading,
        )?;
        Some(section::section_text(self.lines.as_slice(), range))
    }

    #[must_use]
    /// Title text of the heading under the reader cursor, per its resolved
    /// column span. `None` when the cursor is not on a heading.
    pub fn title_text_at_cursor(&self) -> Option<String> {
        let span = section::resolve_title_span(self.lines.as_slice(), self.cursor_line)?;
        let line = &self.lines[self.cursor_line];
        Some(
            line.chars()
                .skip(span.start_col)
                .take(span.end_col - span.start_col)
                .collect(),
        )
    }

    /// Copy the section under the reader cursor to the system clipboard.
    pub fn copy_section(&mut self) {
        match self.section_text_at_cursor() {
            Some(text) => self.report_copy(&text),
            None => self.message = Some(self.not_selectable_reason()),
        }
    }

    /// Copy the heading title under the reader cursor to the clipboard.
    pub fn copy_title(&mut self) {
        match self.title_text_at_cursor() {
            Some(text) => self.report_copy(&text),
            None => self.message = Some("Not a heading line".to_string()),
        }
    }

    fn report_copy(&mut self, text: &str) {
        self.message = Some(match clipboard::copy(text) {
            Ok(()) => format!("Copied {} lines", text.lines().count()),
            Err(err) => format!("Clipboard error: {err}"),
        });
    }

    /// Load the open note into an edtui buffer and switch to the editor view.
    pub fn enter_editor(&mut self) {
        let text = self.lines.join("\n");
        self.editor_state = Some(EditorState::new(Lines::from(text.as_str())));
        self.current_view = View::Editor;
    }

    /// Return to the reader view, discarding the editor buffer.
    pub fn exit_editor(&mut self) {
        self.editor_state = None;
        self.current_view = View::Reader;
    }

    #[must_use]
    /// Fresh line snapshot of the editor buffer, the live surface's side of
    /// the shared lines abstraction.
    pub fn editor_snapshot(&self) -> Vec<String> {
        self.editor_state.as_ref().map_or_else(Vec::new, |state| {
            state
                .lines
                .iter_row()
                .map(|row| row.iter().collect::<String>())
                .collect()
        })
    }

    /// Copy the section under the editor cursor to the clipboard.
    ///
    /// Resolves through the same functions as the reader view, over the live
    /// buffer via [`EditorLines`], so both surfaces select identical lines.
    pub fn copy_section_in_editor(&mut self) {
        let text = self.editor_state.as_ref().and_then(|state| {
            let source = EditorLines(&state.lines);
            let range =
                section::resolve_section_range(&source, state.cursor.row, self.include_heading)?;
            Some(section::section_text(&source, range))
        });
        match text {
            Some(text) => self.report_copy(&text),
            None => self.message = Some("Not a heading line".to_string()),
        }
    }

    /// Write the editor buffer back to the open note and refresh the reader
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the note cannot be written.
    pub fn save_editor(&mut self) -> io::Result<()> {
        let snapshot = self.editor_snapshot();
        if self.editor_state.is_none() {
            return Ok(());
        }
        let content = snapshot.join("\n");
        fs::write(&self.files[self.current_file_index], &content)?;
        self.lines = snapshot;
        self.cursor_line = self.cursor_line.min(self.lines.len().saturating_sub(1));
        self.selection = None;
        self.message = Some("Saved".to_string());
        Ok(())
    }

    /// Open the merge picker over the vault folder's notes.
    ///
    /// One planner per session: created here, dropped on cancel or merge.
    pub fn open_picker(&mut self) {
        let Some(folder) = self.vault_folder.clone() else {
            self.message = Some("Open a folder to merge its notes".to_string());
            return;
        };
        match self.store.list_notes(&folder, &self.file_extensions) {
            Ok(handles) if !handles.is_empty() => {
                self.planner = Some(MergePlanner::new(handles));
                self.picker_index = 0;
                self.current_view = View::Picker;
            }
            Ok(_) => self.message = Some("No notes in this folder".to_string()),
            Err(err) => self.message = Some(format!("Cannot list folder: {err}")),
        }
    }

    /// Abandon the picker session with no side effects.
    pub fn cancel_picker(&mut self) {
        self.planner = None;
        self.current_view = if self.lines.is_empty() {
            View::NoteList
        } else {
            View::Reader
        };
    }

    /// Move the picker cursor up one row.
    pub fn picker_cursor_up(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    /// Move the picker cursor down one row.
    pub fn picker_cursor_down(&mut self) {
        if let Some(planner) = &self.planner {
            if self.picker_index + 1 < planner.len() {
                self.picker_index += 1;
            }
        }
    }

    fn handle_at_picker_cursor(&self) -> Option<NoteHandle> {
        self.planner
            .as_ref()
            .and_then(|planner| planner.entries().get(self.picker_index))
            .map(|entry| entry.handle.clone())
    }

    /// Toggle inclusion of the note under the picker cursor.
    pub fn picker_toggle(&mut self) {
        if let Some(handle) = self.handle_at_picker_cursor() {
            if let Some(planner) = &mut self.planner {
                planner.toggle_included(&handle.path);
            }
        }
    }

    /// Move the note under the picker cursor up one position.
    pub fn picker_move_up(&mut self) {
        if self.picker_index == 0 {
            return;
        }
        if let Some(handle) = self.handle_at_picker_cursor() {
            if let Some(planner) = &mut self.planner {
                if planner.move_to(&handle.path, self.picker_index - 1) {
                    self.picker_index -= 1;
                }
            }
        }
    }

    /// Move the note under the picker cursor down one position.
    pub fn picker_move_down(&mut self) {
        if let Some(handle) = self.handle_at_picker_cursor() {
            if let Some(planner) = &mut self.planner {
                if self.picker_index + 1 < planner.len()
                    && planner.move_to(&handle.path, self.picker_index + 1)
                {
                    self.picker_index += 1;
                }
            }
        }
    }

    /// Finalize the picker session: prepare a plan over the included notes
    /// and execute it against the vault folder.
    ///
    /// An empty selection leaves the picker open for correction; any other
    /// failure is reported and the session ends. A successful merge adds the
    /// new note to the session's file list.
    pub fn execute_merge(&mut self) {
        let Some(planner) = &self.planner else {
            return;
        };
        let Some(folder) = self.vault_folder.clone() else {
            return;
        };

        let sources = match planner.finalize() {
            Ok(sources) => sources,
            Err(err) => {
                // User-correctable: stay in the picker.
                self.message = Some(err.to_string());
                return;
            }
        };

        let plan = vault::prepare_merge(&self.store, &folder, sources);
        match vault::execute_merge(&self.store, &plan) {
            Ok(()) => {
                self.message = Some(format!(
                    "Merged {} notes into {}",
                    plan.sources.len(),
                    input::display_name(&plan.target),
                ));
                self.files.push(plan.target.clone());
                self.executed_merges.push(plan);
                self.cancel_picker();
            }
            Err(err) => {
                self.message = Some(format!("Merge failed: {err}"));
                self.cancel_picker();
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
