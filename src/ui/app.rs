//! Main TUI application state and logic

use crate::algorithms::Algorithm;
use crate::playback::Playback;
use crate::replay::hanoi;
use crate::trace::TraceSession;
use crate::ui::panes::{
    self, NarrativeRenderData, SourceScrollState, StatusRenderData, TreeScrollState,
};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
    Narrative,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> source -> narrative)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Narrative,
            FocusedPane::Narrative => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// The run being replayed
    pub playback: Playback,

    /// Reused for every re-run, reset before each one
    session: TraceSession,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub tree_scroll: TreeScrollState,
    pub source_scroll: SourceScrollState,
    pub narrative_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Delay between steps in auto-play mode
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app replaying `playback` from its current position
    pub fn new(playback: Playback, play_interval: Duration) -> Self {
        App {
            playback,
            session: TraceSession::new(),
            focused_pane: FocusedPane::Tree,
            tree_scroll: TreeScrollState::default(),
            source_scroll: SourceScrollState::default(),
            narrative_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            play_interval,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                if self.playback.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Narrative (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[0]);

        self.render_source(frame, left_rows[0]);
        self.render_narrative(frame, left_rows[1]);

        // Right column: Call tree, with the rods underneath for Hanoi
        if self.playback.algorithm() == Algorithm::Hanoi {
            let rod_height = self.playback.run().n.clamp(1, 10) as u16 + 5;
            let right_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(rod_height)])
                .split(columns[1]);
            self.render_tree(frame, right_rows[0]);
            self.render_rods(frame, right_rows[1]);
        } else {
            self.render_tree(frame, columns[1]);
        }

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.playback.position(),
                total_steps: self.playback.total_steps(),
                is_playing: self.is_playing,
                failed: self.playback.run().outcome.is_err(),
            },
        );
    }

    fn render_tree(&mut self, frame: &mut Frame, area: Rect) {
        match self.playback.tree() {
            Ok(tree) => panes::render_tree_pane(
                frame,
                area,
                &tree,
                self.focused_pane == FocusedPane::Tree,
                &mut self.tree_scroll,
            ),
            Err(e) => render_error(frame, area, " Call Tree ", &e.to_string()),
        }
    }

    fn render_source(&mut self, frame: &mut Frame, area: Rect) {
        let highlight = self.playback.highlight();
        panes::render_source_pane(
            frame,
            area,
            self.playback.algorithm().listing(),
            highlight.as_ref(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );
    }

    fn render_narrative(&mut self, frame: &mut Frame, area: Rect) {
        match self.playback.narrative() {
            Ok(narrative) => panes::render_narrative_pane(
                frame,
                area,
                NarrativeRenderData {
                    algorithm: self.playback.algorithm(),
                    n: self.playback.run().n,
                    narrative: narrative.as_ref(),
                    failure: self
                        .playback
                        .run()
                        .outcome
                        .as_ref()
                        .err()
                        .map(|e| e.to_string()),
                },
                self.focused_pane == FocusedPane::Narrative,
                &mut self.narrative_scroll,
            ),
            Err(e) => render_error(frame, area, " Execution Flow ", &e.to_string()),
        }
    }

    fn render_rods(&mut self, frame: &mut Frame, area: Rect) {
        let rods = self.playback.rods();
        let moves = hanoi::moves(self.playback.trace(), self.playback.position());
        match (rods, moves) {
            (Ok(Some(state)), Ok(moves)) => {
                panes::render_rods_pane(frame, area, &state, moves.len())
            }
            (Ok(None), _) => {}
            (Err(e), _) | (_, Err(e)) => render_error(frame, area, " Rods ", &e.to_string()),
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = self.playback.step_forward_by(n);
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => {
                    self.tree_scroll.offset = self.tree_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Narrative => {
                    self.narrative_scroll = self.narrative_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => {
                    self.tree_scroll.offset = self.tree_scroll.offset.saturating_add(1);
                }
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_add(1);
                }
                FocusedPane::Narrative => {
                    self.narrative_scroll = self.narrative_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        if self.playback.is_at_end() {
                            self.playback.rewind_to_start();
                        }
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.playback.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.playback.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let current = self.playback.algorithm();
                let next = Algorithm::ALL
                    .iter()
                    .position(|&a| a == current)
                    .map_or(Algorithm::Fibonacci, |i| {
                        Algorithm::ALL[(i + 1) % Algorithm::ALL.len()]
                    });
                self.rerun(next, next.default_input());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_input(1),
            KeyCode::Char('-') => self.adjust_input(-1),
            _ => {}
        }
    }

    /// Change n by `delta`, staying within the algorithm's input range
    fn adjust_input(&mut self, delta: i64) {
        let algorithm = self.playback.algorithm();
        match self.playback.run().n.checked_add(delta) {
            Some(n) if algorithm.input_range().contains(&n) => self.rerun(algorithm, n),
            _ => {
                let range = algorithm.input_range();
                self.status_message = format!(
                    "{} takes n in {}..={}",
                    algorithm.name(),
                    range.start(),
                    range.end()
                );
            }
        }
    }

    /// Trace a new run and start replaying it from step 0
    fn rerun(&mut self, algorithm: Algorithm, n: i64) {
        debug!(algorithm = algorithm.name(), n, "re-running");
        self.is_playing = false;
        let run = algorithm.run_in(&mut self.session, n);
        self.status_message = match &run.outcome {
            Ok(value) => format!("Ran {}({}) = {}", algorithm.name(), n, value),
            Err(e) => format!("{}({}) raised: {}", algorithm.name(), n, e),
        };
        self.playback = Playback::new(run);
        self.tree_scroll = TreeScrollState::default();
        self.source_scroll = SourceScrollState::default();
        self.narrative_scroll = 0;
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.playback.step_forward() {
            Ok(()) => self.status_message = "Stepped forward".to_string(),
            Err(e) => self.status_message = format!("Cannot step forward: {}", e),
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.playback.step_backward() {
            Ok(()) => self.status_message = "Stepped backward".to_string(),
            Err(e) => self.status_message = format!("Cannot step backward: {}", e),
        }
    }
}

fn render_error(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.error));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .style(Style::default().fg(DEFAULT_THEME.error))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
