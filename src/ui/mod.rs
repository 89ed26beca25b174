// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal explorer for fretlab.
//!
//! Provides a ratatui-based interface showing the coloured fretboard, the
//! pattern's intervals, the diatonic chord table and a progression
//! analyser. All state lives in [`ExplorerState`]; key presses are mapped
//! to a [`KeyAction`] and applied to it, and everything derived is
//! recomputed from the core on each draw.

mod fretboard;
mod tables;

pub use fretboard::{interval_color, string_set_hint, FretboardWidget};
pub use tables::{DiatonicWidget, ProgressionWidget};

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::{Settings, MAX_FRET_COUNT};
use crate::report::FretboardView;
use crate::theory::{
    detect_key_quality, diatonic_table, interval_label, parse_progression, resolve_intervals,
    ChordSet, DiatonicRow, Fretboard, IntervalClass, KeyQuality, Note, PatternKind,
    ProgressionToken, Tuning,
};

/// Longest progression the input line accepts
const MAX_PROGRESSION_LEN: usize = 64;

/// Everything the explorer shows, independent of the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerState {
    pub root: Note,
    pub pattern: PatternKind,
    /// Add 7th and 9th to plain major/minor triads
    pub extended: bool,
    pub tuning: Tuning,
    pub view: FretboardView,
    pub fret_count: usize,
    pub chord_set: ChordSet,
    /// Requested key quality; a progression may still read as minor
    pub key_quality: KeyQuality,
    pub progression: String,
    /// Progression input line has focus
    pub editing: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ExplorerState {
    /// Build the starting state from session settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            root: Note::from_pitch_class(settings.root_pc()),
            pattern: settings.pattern_kind(),
            extended: settings.extended,
            tuning: settings.tuning(),
            view: FretboardView {
                voicing: settings.voicing_mode(),
                show_intervals: settings.show_intervals,
                show_all: settings.show_all_notes,
            },
            fret_count: settings.frets(),
            chord_set: settings.chord_set(),
            key_quality: settings.key_quality(),
            progression: settings.progression.clone(),
            editing: false,
            show_help: false,
            status_message: None,
        }
    }

    /// Set a status message shown in the status bar
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Intervals of the selected pattern
    pub fn intervals(&self) -> Vec<u8> {
        resolve_intervals(self.pattern.id(), self.extended)
    }

    pub fn fretboard(&self) -> Fretboard {
        Fretboard::generate(
            self.root.pitch_class(),
            &self.intervals(),
            self.tuning,
            self.fret_count.min(MAX_FRET_COUNT),
        )
    }

    pub fn diatonic(&self) -> Vec<DiatonicRow> {
        diatonic_table(self.root.pitch_class(), self.chord_set)
    }

    pub fn analysis(&self) -> Vec<ProgressionToken> {
        parse_progression(&self.progression, self.root.pitch_class(), self.key_quality)
    }

    /// Key quality the progression is analysed in
    pub fn effective_key(&self) -> KeyQuality {
        detect_key_quality(&self.progression, self.key_quality)
    }

    /// Apply one action to the state
    pub fn apply(&mut self, action: &KeyAction) {
        self.status_message = None;
        match action {
            KeyAction::None | KeyAction::Quit => {}
            KeyAction::NextRoot => self.root = self.root.transpose(1),
            KeyAction::PrevRoot => self.root = self.root.transpose(-1),
            KeyAction::NextPattern => self.pattern = self.pattern.next(),
            KeyAction::PrevPattern => self.pattern = self.pattern.prev(),
            KeyAction::CycleTuning => self.tuning = self.tuning.next(),
            KeyAction::CycleVoicing => {
                self.view.voicing = self.view.voicing.next();
                self.set_status(format!("Voicing: {}", self.view.voicing.label()));
            }
            KeyAction::ToggleIntervals => self.view.show_intervals = !self.view.show_intervals,
            KeyAction::ToggleShowAll => self.view.show_all = !self.view.show_all,
            KeyAction::ToggleExtended => {
                self.extended = !self.extended;
                if self.extended && self.pattern.extensions().is_none() {
                    self.set_status("Extensions only apply to MAJOR and MINOR");
                }
            }
            KeyAction::ToggleChordSet => self.chord_set = self.chord_set.toggle(),
            KeyAction::ToggleKeyQuality => self.key_quality = self.key_quality.toggle(),
            KeyAction::EditProgression => {
                self.editing = true;
                self.set_status("Editing progression: Enter or Esc to finish");
            }
            KeyAction::Input(c) => {
                if self.progression.chars().count() < MAX_PROGRESSION_LEN {
                    self.progression.push(*c);
                }
            }
            KeyAction::Backspace => {
                self.progression.pop();
            }
            KeyAction::FinishEdit => self.editing = false,
            KeyAction::ToggleHelp => self.show_help = !self.show_help,
        }
    }
}

/// Key event result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    NextRoot,
    PrevRoot,
    NextPattern,
    PrevPattern,
    CycleTuning,
    CycleVoicing,
    /// Switch between note names and interval labels
    ToggleIntervals,
    /// Show notes outside the pattern
    ToggleShowAll,
    ToggleExtended,
    /// Switch the diatonic table between triads and sevenths
    ToggleChordSet,
    ToggleKeyQuality,
    /// Give the progression input line focus
    EditProgression,
    /// Character typed into the progression
    Input(char),
    Backspace,
    /// Leave the progression input line
    FinishEdit,
    ToggleHelp,
}

/// Map a key press to an action; `editing` routes typing to the progression
pub fn map_key(code: KeyCode, modifiers: KeyModifiers, editing: bool) -> KeyAction {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (code, modifiers) {
        return KeyAction::Quit;
    }

    if editing {
        return match code {
            KeyCode::Enter | KeyCode::Esc => KeyAction::FinishEdit,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Input(c),
            _ => KeyAction::None,
        };
    }

    match (code, modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,

        // Root and pattern
        (KeyCode::Right, _) => KeyAction::NextRoot,
        (KeyCode::Left, _) => KeyAction::PrevRoot,
        (KeyCode::Down, _) => KeyAction::NextPattern,
        (KeyCode::Up, _) => KeyAction::PrevPattern,

        // Fretboard display
        (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::CycleTuning,
        (KeyCode::Char('v'), KeyModifiers::NONE) => KeyAction::CycleVoicing,
        (KeyCode::Char('i'), KeyModifiers::NONE) => KeyAction::ToggleIntervals,
        (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::ToggleShowAll,
        (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::ToggleExtended,

        // Tables
        (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::ToggleChordSet,
        (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::ToggleKeyQuality,
        (KeyCode::Char('e'), KeyModifiers::NONE) => KeyAction::EditProgression,

        // Help
        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::ToggleHelp,

        _ => KeyAction::None,
    }
}

/// Terminal UI application
pub struct App {
    state: ExplorerState,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Event poll timeout
    tick_rate: Duration,
    running: bool,
}

impl App {
    /// Take over the terminal and start from `state`
    pub fn new(state: ExplorerState) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state,
            terminal,
            tick_rate: Duration::from_millis(250),
            running: true,
        })
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Handle a key event
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        let action = map_key(code, modifiers, self.state.editing);
        if action == KeyAction::Quit {
            self.quit();
        } else {
            self.state.apply(&action);
        }
        action
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        if event::poll(self.tick_rate)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw and handle input until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        while self.running {
            self.draw()?;
            if let Some(Event::Key(key)) = self.poll_event()? {
                if key.kind == KeyEventKind::Press {
                    let action = self.handle_key(key.code, key.modifiers);
                    tracing::trace!(?action, "key handled");
                }
            }
        }
        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        let state = &self.state;
        let board = state.fretboard();
        let diatonic = state.diatonic();
        let analysis = state.analysis();

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),                                   // Header
                    Constraint::Length(board.string_count() as u16 + 5),     // Fretboard
                    Constraint::Length(3),                                   // Intervals
                    Constraint::Min(11),                                     // Tables
                    Constraint::Length(1),                                   // Status bar
                ])
                .split(area);

            render_header(frame, chunks[0], state);
            render_fretboard(frame, chunks[1], state, &board);
            render_intervals(frame, chunks[2], state);

            let tables = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[3]);
            render_diatonic(frame, tables[0], state, &diatonic);
            render_progression(frame, tables[1], state, &analysis);

            render_status_bar(frame, chunks[4], state);

            if state.show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn label_value<'a>(label: &'a str, value: String, color: Color) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
    ]
}

/// Render the selection header
fn render_header(frame: &mut Frame, area: Rect, state: &ExplorerState) {
    let block = Block::default().borders(Borders::ALL).title(" fretlab ");

    let mut spans = Vec::new();
    spans.extend(label_value("Root ", state.root.to_string(), interval_color(IntervalClass::Root)));
    spans.extend(label_value("Pattern ", state.pattern.label(), Color::Cyan));
    if state.extended && state.pattern.extensions().is_some() {
        spans.push(Span::styled("+7/9   ", Style::default().fg(Color::Magenta)));
    }
    spans.extend(label_value("Tuning ", state.tuning.to_string(), Color::White));
    spans.extend(label_value("Voicing ", state.view.voicing.label().to_string(), Color::Yellow));
    let labels = if state.view.show_intervals { "intervals" } else { "notes" };
    spans.extend(label_value("Labels ", labels.to_string(), Color::White));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render the fretboard with the voicing hint underneath
fn render_fretboard(frame: &mut Frame, area: Rect, state: &ExplorerState, board: &Fretboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Fretboard ({} frets) ", board.fret_count()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(FretboardWidget::new(board).view(state.view), chunks[0]);
    frame.render_widget(Paragraph::new(string_set_hint(state.view.voicing)), chunks[1]);
}

/// Render the pattern's intervals, coloured like the fretboard
fn render_intervals(frame: &mut Frame, area: Rect, state: &ExplorerState) {
    let block = Block::default().borders(Borders::ALL).title(" Intervals ");
    let root = state.root;

    let spans: Vec<Span> = state
        .intervals()
        .into_iter()
        .flat_map(|i| {
            let note = root.transpose(i as i16);
            let style = Style::default().fg(interval_color(IntervalClass::of(i)));
            [
                Span::styled(format!("{} ", interval_label(i)), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("({})   ", note), Style::default().fg(Color::Gray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_diatonic(frame: &mut Frame, area: Rect, state: &ExplorerState, rows: &[DiatonicRow]) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Modes of {} ({}) ",
        state.root,
        state.chord_set.label()
    ));
    frame.render_widget(DiatonicWidget::new(rows).block(block), area);
}

fn render_progression(
    frame: &mut Frame,
    area: Rect,
    state: &ExplorerState,
    tokens: &[ProgressionToken],
) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Progression in {} {} ",
        state.root,
        state.effective_key()
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let input_style = if state.editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if state.editing { "_" } else { "" };
    let input = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}{}", state.progression, cursor), input_style),
    ]);
    frame.render_widget(Paragraph::new(input), chunks[0]);

    if tokens.is_empty() {
        let empty = Paragraph::new("Enter a progression like ii-V-I")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[1]);
    } else {
        frame.render_widget(ProgressionWidget::new(tokens), chunks[1]);
    }
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &ExplorerState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg.as_str(), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " ←/→: Root | ↑/↓: Pattern | t: Tuning | v: Voicing | e: Edit progression | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 50.min(area.width.saturating_sub(4));
    let height = 21.min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Selection", bold)),
        Line::from("  Left/Right  Previous/next root"),
        Line::from("  Up/Down     Previous/next pattern"),
        Line::from("  x           Toggle 7th/9th extensions"),
        Line::from(""),
        Line::from(Span::styled("Fretboard", bold)),
        Line::from("  t           Cycle tuning"),
        Line::from("  v           Cycle voicing"),
        Line::from("  i           Notes / interval labels"),
        Line::from("  a           Show all notes"),
        Line::from(""),
        Line::from(Span::styled("Tables", bold)),
        Line::from("  s           Triads / 7ths"),
        Line::from("  m           Major / minor key"),
        Line::from("  e           Edit progression"),
        Line::from("  Enter/Esc   Finish editing"),
        Line::from(""),
        Line::from(Span::styled("Other", bold)),
        Line::from("  h/?         Toggle help"),
        Line::from("  q/Ctrl+c    Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
