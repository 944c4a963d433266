use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::io::data_io;
use crate::ops::executor;

use super::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Enter) => submit(app),
        (_, KeyCode::Esc) => {
            app.input.clear();
            app.cursor = 0;
            app.history_index = None;
            app.status = None;
        }
        (_, KeyCode::Backspace) => {
            if app.cursor > 0 {
                let start = prev_boundary(&app.input, app.cursor);
                app.input.replace_range(start..app.cursor, "");
                app.cursor = start;
            }
        }
        (_, KeyCode::Delete) => {
            if app.cursor < app.input.len() {
                let end = next_boundary(&app.input, app.cursor);
                app.input.replace_range(app.cursor..end, "");
            }
        }
        (_, KeyCode::Left) => {
            app.cursor = prev_boundary(&app.input, app.cursor);
        }
        (_, KeyCode::Right) => {
            app.cursor = next_boundary(&app.input, app.cursor);
        }
        (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (_, KeyCode::End) => {
            app.cursor = app.input.len();
        }
        (_, KeyCode::Up) => history_back(app),
        (_, KeyCode::Down) => history_forward(app),
        (_, KeyCode::PageUp) => {
            app.scroll = app.scroll.saturating_sub(5);
        }
        (_, KeyCode::PageDown) => {
            app.scroll = app.scroll.saturating_add(5);
        }
        (_, KeyCode::Char(c)) => {
            app.input.insert(app.cursor, c);
            app.cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Execute the typed line, surface the outcome on the status line, and
/// persist the book if the command mutated it.
fn submit(app: &mut App) {
    let line = app.input.trim().to_string();
    if line.is_empty() {
        return;
    }

    app.history.push(line.clone());
    app.history_index = None;
    app.input.clear();
    app.cursor = 0;

    match executor::execute_line(&mut app.book, &line) {
        Ok(outcome) => {
            if outcome.mutated
                && let Err(e) = data_io::save_applications(&app.data_path, app.book.records())
            {
                app.set_status(format!("{} (save failed: {e})", outcome.message), true);
                return;
            }
            if outcome.exit {
                app.should_quit = true;
            }
            app.set_status(outcome.message, false);
        }
        Err(e) => app.set_status(e.to_string(), true),
    }
}

fn history_back(app: &mut App) {
    if app.history.is_empty() {
        return;
    }
    let next_index = match app.history_index {
        None => {
            app.draft = app.input.clone();
            app.history.len() - 1
        }
        Some(0) => 0,
        Some(i) => i - 1,
    };
    app.history_index = Some(next_index);
    app.input = app.history[next_index].clone();
    app.cursor = app.input.len();
}

fn history_forward(app: &mut App) {
    let Some(i) = app.history_index else {
        return;
    };
    if i + 1 < app.history.len() {
        app.history_index = Some(i + 1);
        app.input = app.history[i + 1].clone();
    } else {
        app.history_index = None;
        app.input = app.draft.clone();
    }
    app.cursor = app.input.len();
}

/// Byte offset of the grapheme boundary before `pos`.
fn prev_boundary(s: &str, pos: usize) -> usize {
    s[..pos]
        .grapheme_indices(true)
        .last()
        .map_or(0, |(i, _)| i)
}

/// Byte offset of the grapheme boundary after `pos`.
fn next_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .graphemes(true)
        .next()
        .map_or(s.len(), |g| pos + g.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::model::book::ApplicationBook;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_in(dir: &TempDir) -> App {
        App::new(
            ApplicationBook::new(),
            dir.path().join("applications.json"),
        )
    }

    fn type_line(app: &mut App, line: &str) {
        for c in line.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_grapheme_editing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        type_line(&mut app, "find cafe\u{301}"); // café with combining accent
        assert_eq!(app.input, "find cafe\u{301}");

        // one backspace removes the whole accented grapheme
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input, "find caf");

        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Delete));
        assert_eq!(app.input, "find ca");
        handle_key(&mut app, key(KeyCode::End));
        assert_eq!(app.cursor, app.input.len());
    }

    #[test]
    fn enter_executes_and_reports_success() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        type_line(&mut app, "add c/Amazon p/ML Engineer d/2026-01-01");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.book.len(), 1);
        assert!(app.input.is_empty());
        let status = app.status.as_ref().unwrap();
        assert!(!status.is_error);
        assert!(status.text.starts_with("Added application:"));
        // mutation was persisted
        assert!(app.data_path.exists());
    }

    #[test]
    fn enter_reports_errors_without_mutating() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        type_line(&mut app, "delete 1");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.book.is_empty());
        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("index 1"));
        // nothing written for a failed command
        assert!(!app.data_path.exists());
    }

    #[test]
    fn exit_command_quits() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        type_line(&mut app, "exit");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn history_browsing_restores_the_draft() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        type_line(&mut app, "help");
        handle_key(&mut app, key(KeyCode::Enter));
        type_line(&mut app, "list");
        handle_key(&mut app, key(KeyCode::Enter));

        type_line(&mut app, "fin");
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.input, "list");
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.input, "help");
        handle_key(&mut app, key(KeyCode::Up)); // already at the oldest
        assert_eq!(app.input, "help");
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.input, "list");
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.input, "fin"); // the unfinished draft comes back
    }

    #[test]
    fn esc_clears_input_and_status() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        type_line(&mut app, "garbage");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.status.is_some());

        type_line(&mut app, "half a comm");
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.input.is_empty());
        assert!(app.status.is_none());
    }
}
