//! The UI renders the application state into something visible and vim-able.
//!
//! The draw function dispatches based on the current view: note list, reader
//! (with section highlighting), editor, merge picker, or command entry.

use crate::app_state::{AppState, View};
use crate::input;
use crate::section;
use edtui::{EditorTheme, EditorView, SyntaxHighlighter};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    match app.current_view {
        View::NoteList => draw_note_list(f, app),
        View::Reader => draw_reader(f, app),
        View::Editor | View::Command => draw_editor(f, app),
        View::Picker => draw_picker(f, app),
    }
}

fn split_main(f: &Frame) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area())
}

fn status_bar(f: &mut Frame, app: &AppState, area: Rect, help: &str) {
    let text = app.message.clone().unwrap_or_else(|| help.to_string());
    let widget = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_note_list(f: &mut Frame, app: &AppState) {
    let chunks = split_main(f);

    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(format!("📄 {}", input::display_name(path))).style(style)
        })
        .collect();

    let title = format!("Notes ({})", app.files.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    status_bar(
        f,
        app,
        chunks[1],
        "↑/↓: Navigate | Enter: Open | m: Merge picker | q: Quit",
    );
}

fn draw_reader(f: &mut Frame, app: &AppState) {
    let chunks = split_main(f);

    let items: Vec<ListItem> = app
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let content = if let Some(header) = section::parse_header(line) {
                Line::from(vec![
                    Span::raw("#".repeat(header.level)),
                    Span::raw(" "),
                    Span::styled(
                        header.title,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(line.clone())
            };

            let mut style = Style::default();
            if app.selection.is_some_and(|range| range.contains(i)) {
                style = style.bg(Color::DarkGray);
            }
            if i == app.cursor_line {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(content).style(style)
        })
        .collect();

    let title = app.current_note_name();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    let mut state = ListState::default().with_selected(Some(app.cursor_line));
    f.render_stateful_widget(list, chunks[0], &mut state);

    status_bar(
        f,
        app,
        chunks[1],
        "↑/↓: Move | [/]: Headings | s: Select | y: Copy section | t: Copy title | e: Edit | m: Merge | q: Back",
    );
}

fn draw_editor(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Note name
            Constraint::Min(0),    // Editor
            Constraint::Length(3), // Help / command line
        ])
        .split(f.area());

    let max_width = app.wrap_width;
    let name = app.current_note_name();
    let header = Paragraph::new(name.clone())
        .block(Block::default().borders(Borders::ALL).title("Editing"));
    f.render_widget(header, chunks[0]);

    let title = format!("Note: {name} (max line: {max_width} chars)");
    if let Some(ref mut editor_state) = app.editor_state {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let syntax_highlighter = SyntaxHighlighter::new("dracula", "md");
        let editor = EditorView::new(editor_state)
            .theme(EditorTheme::default())
            .syntax_highlighter(Some(syntax_highlighter))
            .wrap(true);

        f.render_widget(editor, inner);
    }

    let help_text = if app.current_view == View::Command {
        format!(":{}", app.command_buffer)
    } else if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        ":w Save | :x Save & Exit | :ys Copy section at cursor | :q Quit".to_string()
    };
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_picker(f: &mut Frame, app: &AppState) {
    let chunks = split_main(f);

    let items: Vec<ListItem> = app.planner.as_ref().map_or_else(Vec::new, |planner| {
        planner
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = if entry.included { "[x]" } else { "[ ]" };
                let mut style = if entry.included {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if i == app.picker_index {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(format!("{marker} {}", entry.handle.name)).style(style)
            })
            .collect()
    });

    let included = app
        .planner
        .as_ref()
        .map_or(0, |p| p.entries().iter().filter(|e| e.included).count());
    let title = format!("Merge notes ({included} included)");
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    status_bar(
        f,
        app,
        chunks[1],
        "Space: Toggle | Ctrl+↑/↓: Reorder | Enter: Merge | Esc: Cancel",
    );
}
