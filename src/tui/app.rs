use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::cli::handlers::data_dir;
use crate::io::config_io;
use crate::io::data_io;
use crate::model::book::ApplicationBook;

use super::{input, render};

/// The status line under the list: the last command's feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Main application state for the TUI.
pub struct App {
    pub book: ApplicationBook,
    pub data_path: PathBuf,
    /// Command line being typed.
    pub input: String,
    /// Byte offset of the cursor within `input` (always on a grapheme
    /// boundary).
    pub cursor: usize,
    /// Feedback from the last executed command.
    pub status: Option<StatusLine>,
    /// Previously submitted command lines, oldest first.
    pub history: Vec<String>,
    /// Position while browsing history with Up/Down; `None` = editing a
    /// fresh line.
    pub history_index: Option<usize>,
    /// The fresh line stashed away while browsing history.
    pub draft: String,
    /// First visible row of the record list.
    pub scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(book: ApplicationBook, data_path: PathBuf) -> Self {
        App {
            book,
            data_path,
            input: String::new(),
            cursor: 0,
            status: None,
            history: Vec::new(),
            history_index: None,
            draft: String::new(),
            scroll: 0,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusLine { text, is_error });
    }
}

/// Run the TUI against the given data directory (`-C` flag or cwd).
pub fn run(dir_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir(dir_flag);
    let data_path = config_io::data_file_path(&dir)?;
    let records = data_io::load_applications(&data_path)?;
    let mut app = App::new(ApplicationBook::from_records(records), data_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
