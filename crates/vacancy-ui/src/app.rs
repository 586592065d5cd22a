//! Application state and TUI event loops for the vacancy views.
//!
//! [`App`] owns the theme, the view mode and the scroll offset. Both views
//! are static: the data is computed before the loop starts and the loop only
//! redraws and reacts to keys.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use vacancy_data::query::QueryOutcome;

use crate::statistics_view::{self, StatisticsData};
use crate::table_view;
use crate::themes::Theme;

/// Rows skipped by PageUp / PageDown.
const PAGE: usize = 10;

// ── ViewMode ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Filtered and sorted vacancy table.
    Vacancies,
    /// Year and city dynamics.
    Statistics,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// First visible table row.
    pub scroll: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, view_mode: ViewMode) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            scroll: 0,
            should_quit: false,
        }
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Show the vacancy table until `q` / `Ctrl+C`. Arrow keys, PageUp,
    /// PageDown and Home scroll.
    pub async fn run_table(self, outcome: QueryOutcome) -> io::Result<()> {
        let row_count = match &outcome {
            QueryOutcome::Rows(view) => view.rows.len(),
            QueryOutcome::NothingFound => 0,
        };
        self.run_loop(row_count, |app, frame| {
            let area = frame.area();
            match &outcome {
                QueryOutcome::Rows(view) => {
                    table_view::render_vacancy_table(frame, area, view, app.scroll, &app.theme)
                }
                QueryOutcome::NothingFound => {
                    table_view::render_nothing_found(frame, area, &app.theme)
                }
            }
        })
    }

    /// Show the statistics tables and charts until `q` / `Ctrl+C`.
    pub async fn run_statistics(self, data: StatisticsData) -> io::Result<()> {
        self.run_loop(0, |app, frame| {
            let area = frame.area();
            if data.total == 0 {
                statistics_view::render_no_statistics(frame, area, &app.theme);
            } else {
                statistics_view::render_statistics(frame, area, &data, &app.theme);
            }
        })
    }

    /// Apply one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent, row_count: usize) -> bool {
        let last = row_count.saturating_sub(1);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll = (self.scroll + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = (self.scroll + PAGE).min(last),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = last,
            _ => {}
        }
        self.should_quit
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn run_loop<F>(mut self, row_count: usize, mut draw: F) -> io::Result<()>
    where
        F: FnMut(&App, &mut Frame),
    {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| draw(&self, frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if self.handle_key(key, row_count) {
                            break Ok(());
                        }
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("dark", ViewMode::Vacancies);
        assert_eq!(app.view_mode, ViewMode::Vacancies);
        assert_eq!(app.scroll, 0);
        assert!(!app.should_quit);
        assert_eq!(app.theme.text.fg, Some(Color::White));
    }

    #[test]
    fn test_app_creation_light_theme() {
        let app = App::new("light", ViewMode::Statistics);
        assert_eq!(app.theme.text.fg, Some(Color::Black));
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut app = App::new("dark", ViewMode::Vacancies);
            assert!(app.handle_key(key(code), 5));
        }
        let mut app = App::new("dark", ViewMode::Vacancies);
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 5));
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = App::new("dark", ViewMode::Vacancies);
        assert!(!app.handle_key(key(KeyCode::Char('c')), 5));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut app = App::new("dark", ViewMode::Vacancies);
        app.handle_key(key(KeyCode::Up), 3);
        assert_eq!(app.scroll, 0);

        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down), 3);
        }
        assert_eq!(app.scroll, 2);

        app.handle_key(key(KeyCode::Home), 3);
        assert_eq!(app.scroll, 0);

        app.handle_key(key(KeyCode::PageDown), 25);
        assert_eq!(app.scroll, 10);
        app.handle_key(key(KeyCode::End), 25);
        assert_eq!(app.scroll, 24);
        app.handle_key(key(KeyCode::PageUp), 25);
        assert_eq!(app.scroll, 14);
    }

    #[test]
    fn test_scroll_with_no_rows() {
        let mut app = App::new("dark", ViewMode::Vacancies);
        app.handle_key(key(KeyCode::Down), 0);
        assert_eq!(app.scroll, 0);
    }
}
