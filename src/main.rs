//! quire: section-aware selection and note merging for markdown vaults.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use edtui::EditorEventHandler;
use quire::{app_state, config, input, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Section-aware selection and note merging for markdown vaults", long_about = None)]
struct Args {
    /// Notes or a vault folder to open (defaults to the current folder)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Exclude the heading line from section selections
    #[arg(long)]
    no_heading: bool,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if args.no_heading {
        cfg.include_heading = false;
    }

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };
    let vault_folder = paths.iter().find(|path| path.is_dir()).cloned();

    let files = input::find_notes(&paths, &cfg.file_extensions)?;
    if files.is_empty() {
        eprintln!("No matching notes found");
        return Ok(());
    }

    let mut state = app_state::AppState::new(files, vault_folder, &cfg);
    if state.file_mode == app_state::FileMode::Single {
        state.open_note(0)?;
    }

    run_tui(state)
}

fn run_tui(mut app: app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, &mut app, &mut editor_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else if !app.executed_merges.is_empty() {
        let json = serde_json::to_string_pretty(&app.executed_merges).map_err(io::Error::other)?;
        println!("{json}");
    }

    Ok(())
}

#[allow(clippy::too_many_lines)]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
    editor_handler: &mut EditorEventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.current_view {
                app_state::View::NoteList => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up => {
                        if app.current_file_index > 0 {
                            app.current_file_index -= 1;
                        }
                    }
                    KeyCode::Down => {
                        if app.current_file_index < app.files.len() - 1 {
                            app.current_file_index += 1;
                        }
                    }
                    KeyCode::Enter => {
                        let index = app.current_file_index;
                        if let Err(e) = app.open_note(index) {
                            app.message = Some(format!("Cannot open note: {e}"));
                        }
                    }
                    KeyCode::Char('m') => app.open_picker(),
                    _ => {}
                },
                app_state::View::Reader => match key.code {
                    KeyCode::Char('q') => {
                        if app.file_mode == app_state::FileMode::Multi {
                            app.current_view = app_state::View::NoteList;
                        } else {
                            return Ok(());
                        }
                    }
                    KeyCode::Up => app.cursor_up(),
                    KeyCode::Down => app.cursor_down(),
                    KeyCode::Char('[') => app.cursor_to_prev_heading(),
                    KeyCode::Char(']') => app.cursor_to_next_heading(),
                    KeyCode::Char('s') => app.select_section(),
                    KeyCode::Char('y') => app.copy_section(),
                    KeyCode::Char('t') => app.copy_title(),
                    KeyCode::Char('e') | KeyCode::Enter => app.enter_editor(),
                    KeyCode::Char('m') => app.open_picker(),
                    KeyCode::Esc => {
                        app.selection = None;
                        app.message = None;
                    }
                    _ => {}
                },
                app_state::View::Editor => match key.code {
                    KeyCode::Char(':') => {
                        if let Some(ref editor_state) = app.editor_state {
                            if editor_state.mode == edtui::EditorMode::Normal {
                                app.current_view = app_state::View::Command;
                                app.command_buffer.clear();
                                app.message = None;
                            } else {
                                editor_handler
                                    .on_key_event(key, app.editor_state.as_mut().unwrap());
                            }
                        }
                    }
                    KeyCode::Esc => {
                        if let Some(ref editor_state) = app.editor_state {
                            if editor_state.mode == edtui::EditorMode::Normal {
                                app.exit_editor();
                            } else {
                                editor_handler
                                    .on_key_event(key, app.editor_state.as_mut().unwrap());
                            }
                        }
                    }
                    _ => {
                        if let Some(ref mut editor_state) = app.editor_state {
                            editor_handler.on_key_event(key, editor_state);
                        }
                    }
                },
                app_state::View::Command => match key.code {
                    KeyCode::Char(c) => {
                        app.command_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.command_buffer.pop();
                    }
                    KeyCode::Enter => {
                        let cmd = app.command_buffer.clone();
                        app.current_view = app_state::View::Editor;

                        match cmd.as_str() {
                            "w" => {
                                if let Err(e) = app.save_editor() {
                                    app.message = Some(format!("Error saving: {e}"));
                                }
                            }
                            "x" => {
                                if let Err(e) = app.save_editor() {
                                    app.message = Some(format!("Error saving: {e}"));
                                } else {
                                    app.exit_editor();
                                }
                            }
                            "ys" => app.copy_section_in_editor(),
                            "q" | "q!" => app.exit_editor(),
                            _ => {
                                app.message = Some(format!("Unknown command: {cmd}"));
                            }
                        }
                        app.command_buffer.clear();
                    }
                    KeyCode::Esc => {
                        app.current_view = app_state::View::Editor;
                        app.command_buffer.clear();
                    }
                    _ => {}
                },
                app_state::View::Picker => match key.code {
                    KeyCode::Char(' ') => app.picker_toggle(),
                    KeyCode::Up => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) {
                            app.picker_move_up();
                        } else {
                            app.picker_cursor_up();
                        }
                    }
                    KeyCode::Down => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) {
                            app.picker_move_down();
                        } else {
                            app.picker_cursor_down();
                        }
                    }
                    KeyCode::Enter => app.execute_merge(),
                    KeyCode::Esc | KeyCode::Char('q') => app.cancel_picker(),
                    _ => {}
                },
            }
        }
    }
}
