// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Coloured fretboard widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::report::{fret_marker, FretboardView};
use crate::theory::{FretCell, Fretboard, IntervalClass, VoicingMode};

const CELL_WIDTH: usize = 4;

/// Highlight colour for an interval class
pub fn interval_color(class: IntervalClass) -> Color {
    match class {
        IntervalClass::Root => Color::Rgb(249, 115, 22),
        IntervalClass::Third => Color::Green,
        IntervalClass::Fifth => Color::Blue,
        IntervalClass::Seventh => Color::Magenta,
        IntervalClass::Other => Color::Gray,
    }
}

/// Style for a visible cell
fn cell_style(cell: &FretCell) -> Style {
    let style = Style::default().fg(interval_color(IntervalClass::of(cell.interval)));
    if cell.is_root {
        style.add_modifier(Modifier::BOLD)
    } else if !cell.is_in_scale {
        style.fg(Color::DarkGray)
    } else {
        style
    }
}

/// Widget drawing every string of a fretboard with a fret-marker header
pub struct FretboardWidget<'a> {
    board: &'a Fretboard,
    view: FretboardView,
    block: Option<Block<'a>>,
}

impl<'a> FretboardWidget<'a> {
    pub fn new(board: &'a Fretboard) -> Self {
        Self {
            board,
            view: FretboardView::default(),
            block: None,
        }
    }

    /// Set the labelling and voicing filter
    pub fn view(mut self, view: FretboardView) -> Self {
        self.view = view;
        self
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn header_lines(&self) -> [Line<'static>; 2] {
        let dim = Style::default().fg(Color::DarkGray);
        let mut numbers = vec![Span::raw("   ")];
        let mut markers = vec![Span::raw("   ")];
        for fret in 0..=self.board.fret_count() {
            numbers.push(Span::styled(format!("{:^CELL_WIDTH$} ", fret), dim));
            markers.push(Span::styled(
                format!("{:^CELL_WIDTH$} ", fret_marker(fret)),
                Style::default().fg(Color::Yellow),
            ));
        }
        [Line::from(numbers), Line::from(markers)]
    }

    fn string_line(&self, open_note: &'static str, row: &[FretCell]) -> Line<'static> {
        let rule = Style::default().fg(Color::DarkGray);
        let mut spans = vec![Span::styled(format!("{:<2} ", open_note), Style::default().fg(Color::White))];

        for cell in row {
            let span = match self.view.label(cell) {
                Some(label) => Span::styled(format!("{:^CELL_WIDTH$}", label), cell_style(cell)),
                None => Span::styled(format!("{:^CELL_WIDTH$}", "·"), rule),
            };
            spans.push(span);
            spans.push(Span::styled(if cell.fret == 0 { "‖" } else { "│" }, rule));
        }
        Line::from(spans)
    }

    /// Lines the widget draws, without the block
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = self.header_lines().to_vec();
        for (open, row) in self.board.tuning().strings().iter().zip(self.board.strings()) {
            lines.push(self.string_line(open.note, row));
        }
        lines
    }
}

impl Widget for FretboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block.clone() {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        Paragraph::new(self.lines()).render(area, buf);
    }
}

/// One-line hint listing the string groups of a voicing
pub fn string_set_hint(voicing: VoicingMode) -> Line<'static> {
    let sets = voicing.string_sets();
    if sets.is_empty() {
        return Line::from(Span::styled(
            "All notes in the pattern",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut spans = vec![Span::styled(
        format!("{}: ", voicing.label()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(set.name, Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}
