use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::dnd::{DropId, Rect};
use crate::io::config_io::read_config;
use crate::io::paths::FocusDirs;
use crate::io::store::Store;
use crate::io::watcher::StoreWatcher;
use crate::model::board::Board;
use crate::model::config::Config;
use crate::model::task::TaskId;

use super::input;
use super::render;
use super::theme::Theme;

/// Which screen is showing — a pure function of the session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Both task lists with drag-and-drop (no session in progress)
    Board,
    /// The running session with the counter
    Session,
    /// The finished-session summary awaiting acknowledgment
    Summary,
}

/// Current interaction mode within the board view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    EditTitle,
    MoveTask,
}

/// In-progress title edit. Buffered locally and committed as one mutation
/// on Enter.
#[derive(Debug, Clone)]
pub struct EditState {
    pub id: TaskId,
    pub text: String,
    /// Byte offset into `text`, always on a grapheme boundary
    pub cursor: usize,
}

/// An in-progress mouse drag of a task row.
#[derive(Debug, Clone)]
pub struct DragState {
    pub id: TaskId,
    /// The row rect the drag started from; its size follows the pointer
    pub source_rect: Rect,
    pub column: u16,
    pub row: u16,
}

impl DragState {
    /// The dragged rect for target resolution: the source row centered at
    /// the pointer.
    pub fn dragged_rect(&self) -> Rect {
        self.source_rect.centered_at(self.column, self.row)
    }
}

/// Main application state
pub struct App {
    pub store: Store,
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,
    /// Cursor index into `flat_items()` (board view)
    pub cursor: usize,
    pub edit: Option<EditState>,
    pub drag: Option<DragState>,
    /// Drop targets recorded during the last render, in paint order
    pub drop_rects: Vec<(DropId, Rect)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: Store, config: Config) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            store,
            config,
            theme,
            mode: Mode::Navigate,
            cursor: 0,
            edit: None,
            drag: None,
            drop_rects: Vec::new(),
            should_quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn view(&self) -> View {
        match &self.board().active_session {
            None => View::Board,
            Some(s) if s.is_finished() => View::Summary,
            Some(_) => View::Session,
        }
    }

    /// Board-view display order: session list first, then backlog.
    pub fn flat_items(&self) -> Vec<TaskId> {
        let board = self.board();
        board
            .session
            .iter()
            .chain(board.backlog.iter())
            .copied()
            .collect()
    }

    pub fn cursor_task(&self) -> Option<TaskId> {
        self.flat_items().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.flat_items().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Put the cursor on the given task, if it is visible.
    pub fn select_task(&mut self, id: TaskId) {
        if let Some(idx) = self.flat_items().iter().position(|&t| t == id) {
            self.cursor = idx;
        }
    }

    /// Topmost drop target under the pointer. Items are recorded after
    /// their container, so reverse order prefers rows over containers.
    pub fn hit_drop_target(&self, column: u16, row: u16) -> Option<(DropId, Rect)> {
        self.drop_rects
            .iter()
            .rev()
            .copied()
            .find(|(_, rect)| rect.contains(column, row))
    }
}

/// Run the TUI application
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dirs = FocusDirs::resolve(data_dir)?;
    let config = read_config(&dirs.config_path())?;

    // No lock held here: each Store save takes the write lock briefly, so
    // CLI invocations land while the TUI runs and the watcher picks them up
    let store = Store::load_or_default(&dirs.data_dir);
    let watcher = StoreWatcher::start(&dirs.data_dir)?;

    let mut app = App::new(store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &watcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: &StoreWatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // 250ms poll keeps the session counter ticking without a timer task
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key)?;
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse)?;
                }
                _ => {}
            }
        }

        // Pick up board writes from concurrent CLI invocations
        if !watcher.poll().is_empty() && app.store.reload() {
            app.clamp_cursor();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::board_ops::{add_task, switch_task};
    use crate::ops::session_ops::{end_session, start_session};
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Store::load_or_default(dir.path());
        (App::new(store, Config::default()), dir)
    }

    #[test]
    fn view_follows_session_record() {
        let (mut app, _dir) = test_app();
        assert_eq!(app.view(), View::Board);

        app.store
            .mutate(|b| {
                switch_task(b, 1);
                start_session(b, 1000).unwrap();
            })
            .unwrap();
        assert_eq!(app.view(), View::Session);

        app.store.mutate(|b| end_session(b, 2000).unwrap()).unwrap();
        assert_eq!(app.view(), View::Summary);
    }

    #[test]
    fn flat_items_lists_session_before_backlog() {
        let (mut app, _dir) = test_app();
        let (a, b) = app
            .store
            .mutate(|board| {
                let a = add_task(board, 100);
                let b = add_task(board, 200);
                switch_task(board, b);
                (a, b)
            })
            .unwrap();

        assert_eq!(app.flat_items(), vec![b, 1, a]);
        app.select_task(a);
        assert_eq!(app.cursor_task(), Some(a));
        app.cursor = 99;
        app.clamp_cursor();
        assert_eq!(app.cursor, 2);
    }
}
