use super::{AppState, EditorLines, FileMode, View};
use crate::config::Config;
use crate::section;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn test_config() -> Config {
    Config {
        include_heading: true,
        file_extensions: vec!["md".to_string()],
        wrap_width: 100,
    }
}

fn write_note(folder: &Path, name: &str, body: &str) -> PathBuf {
    let path = folder.join(name);
    fs::write(&path, body).unwrap();
    path
}

fn vault_app(notes: &[(&str, &str)]) -> (tempfile::TempDir, AppState) {
    let dir = tempdir().unwrap();
    let mut files = Vec::new();
    for (name, body) in notes {
        files.push(write_note(dir.path(), name, body));
    }
    let folder = dir.path().to_path_buf();
    let app = AppState::new(files, Some(folder), &test_config());
    (dir, app)
}

#[test]
fn single_note_opens_straight_into_the_reader() {
    let (_dir, mut app) = vault_app(&[("only.md", "# A\nbody")]);
    assert!(app.file_mode == FileMode::Single);

    app.open_note(0).unwrap();
    assert!(app.current_view == View::Reader);
    assert_eq!(app.lines, vec!["# A", "body"]);
}

#[test]
fn select_section_highlights_the_resolved_range() {
    let (_dir, mut app) = vault_app(&[("note.md", "# A\nbody1\n## B\nbody2\n# C\nbody3")]);
    app.open_note(0).unwrap();

    app.select_section();
    let range = app.selection.unwrap();
    assert_eq!((range.start_line, range.end_line), (0, 3));

    // Off a heading the selection clears and the reason is reported.
    app.cursor_down();
    app.select_section();
    assert_eq!(app.selection, None);
    assert_eq!(app.message.as_deref(), Some("Not a heading line"));
}

#[test]
fn include_heading_flag_is_honored_per_call() {
    let (_dir, mut app) = vault_app(&[("note.md", "# A\nbody1\n# B")]);
    app.open_note(0).unwrap();

    assert_eq!(app.section_text_at_cursor().unwrap(), "# A\nbody1");

    app.include_heading = false;
    assert_eq!(app.section_text_at_cursor().unwrap(), "body1");
}

#[test]
fn title_text_comes_from_the_resolved_span() {
    let (_dir, mut app) = vault_app(&[("note.md", "## Hello World  \nbody")]);
    app.open_note(0).unwrap();

    assert_eq!(app.title_text_at_cursor().unwrap(), "Hello World");
}

#[test]
fn heading_jumps_move_between_headings_only() {
    let (_dir, mut app) = vault_app(&[("note.md", "intro\n# A\nbody\n## B\nmore")]);
    app.open_note(0).unwrap();

    app.cursor_to_next_heading();
    assert_eq!(app.cursor_line, 1);
    app.cursor_to_next_heading();
    assert_eq!(app.cursor_line, 3);
    app.cursor_to_next_heading();
    assert_eq!(app.cursor_line, 3, "no heading below: cursor stays");
    app.cursor_to_prev_heading();
    assert_eq!(app.cursor_line, 1);
}

#[test]
fn both_surfaces_resolve_identical_ranges() {
    let (_dir, mut app) = vault_app(&[("note.md", "# A\nbody1\n## B\nbody2\n# C")]);
    app.open_note(0).unwrap();
    app.enter_editor();

    let snapshot = app.editor_snapshot();
    assert_eq!(snapshot, app.lines, "editor snapshot mirrors the reader");

    let editor_state = app.editor_state.as_ref().unwrap();
    let live = EditorLines(&editor_state.lines);
    for index in 0..app.lines.len() {
        for include_heading in [true, false] {
            let from_reader =
                section::resolve_section_range(app.lines.as_slice(), index, include_heading);
            let from_editor = section::resolve_section_range(&live, index, include_heading);
            assert_eq!(from_reader, from_editor);
        }
    }
}

#[test]
fn save_editor_writes_the_buffer_and_refreshes_the_reader() {
    let (_dir, mut app) = vault_app(&[("note.md", "# A\nold")]);
    app.open_note(0).unwrap();
    app.enter_editor();

    if let Some(ref mut editor_state) = app.editor_state {
        editor_state.lines = edtui::Lines::from("# A\nnew");
    }
    app.save_editor().unwrap();

    assert_eq!(app.lines, vec!["# A", "new"]);
    let on_disk = fs::read_to_string(&app.files[0]).unwrap();
    assert_eq!(on_disk, "# A\nnew");
}

#[test]
fn picker_session_merges_included_notes_in_order() {
    let (dir, mut app) = vault_app(&[("a.md", "alpha"), ("b.md", "beta"), ("c.md", "gamma")]);

    app.open_picker();
    assert!(app.current_view == View::Picker);
    let planner = app.planner.as_ref().unwrap();
    assert_eq!(planner.len(), 3);

    // Exclude b, move c to the front, then merge.
    app.picker_cursor_down();
    app.picker_toggle();
    app.picker_cursor_down();
    app.picker_move_up();
    app.picker_move_up();
    app.execute_merge();

    assert_eq!(app.executed_merges.len(), 1);
    let plan = &app.executed_merges[0];
    let names: Vec<&str> = plan
        .sources
        .iter()
        .map(|handle| handle.name.as_str())
        .collect();
    assert_eq!(names, vec!["c", "a"]);

    let folder_name = dir.path().file_name().unwrap().to_string_lossy();
    assert_eq!(plan.target, dir.path().join(format!("{folder_name}.md")));
    assert_eq!(fs::read_to_string(&plan.target).unwrap(), "gamma\n\nalpha");

    assert!(app.planner.is_none(), "session ends after the merge");
    assert_eq!(app.files.last(), Some(&plan.target));
}

#[test]
fn empty_selection_keeps_the_picker_open() {
    let (_dir, mut app) = vault_app(&[("a.md", "alpha"), ("b.md", "beta")]);

    app.open_picker();
    app.picker_toggle();
    app.picker_cursor_down();
    app.picker_toggle();
    app.execute_merge();

    assert!(app.current_view == View::Picker, "user can correct and retry");
    assert_eq!(app.message.as_deref(), Some("no notes selected for merging"));
    assert!(app.executed_merges.is_empty());
}

#[test]
fn cancelled_picker_leaves_no_side_effects() {
    let (dir, mut app) = vault_app(&[("a.md", "alpha"), ("b.md", "beta")]);
    let before: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();

    app.open_picker();
    app.picker_toggle();
    app.picker_cursor_down();
    app.picker_move_up();
    app.cancel_picker();

    assert!(app.planner.is_none());
    let after: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(after.len(), before.len());
    assert!(app.executed_merges.is_empty());
}

#[test]
fn picker_without_a_folder_reports_instead_of_opening() {
    let dir = tempdir().unwrap();
    let note = write_note(dir.path(), "a.md", "alpha");
    let mut app = AppState::new(vec![note], None, &test_config());

    app.open_picker();
    assert!(app.planner.is_none());
    assert_eq!(
        app.message.as_deref(),
        Some("Open a folder to merge its notes")
    );
}
