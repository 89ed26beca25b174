// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic chord and progression analysis tables.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Cell, Row, Table, Widget},
};

use crate::theory::diatonic::DEGREE_HEADERS;
use crate::theory::{DiatonicRow, ProgressionToken};

fn header_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Widget for the 7x7 mode/degree chord table
pub struct DiatonicWidget<'a> {
    rows: &'a [DiatonicRow],
    block: Option<Block<'a>>,
}

impl<'a> DiatonicWidget<'a> {
    pub fn new(rows: &'a [DiatonicRow]) -> Self {
        Self { rows, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn table(&self) -> Table<'a> {
        let header = Row::new(
            std::iter::once(Cell::from("Mode"))
                .chain(DEGREE_HEADERS.iter().map(|h| Cell::from(*h))),
        )
        .style(header_style());

        let rows = self.rows.iter().map(|row| {
            let mut cells = vec![Cell::from(row.mode).style(Style::default().fg(Color::Cyan))];
            for (degree, (numeral, chord)) in row.numerals.iter().zip(&row.chords).enumerate() {
                // tonic column stands out
                let style = if degree == 0 {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                cells.push(Cell::from(format!("{} {}", numeral, chord)).style(style));
            }
            Row::new(cells)
        });

        let widths = std::iter::once(Constraint::Length(16))
            .chain(std::iter::repeat(Constraint::Min(10)).take(7));

        Table::new(rows, widths).header(header)
    }
}

impl Widget for DiatonicWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut table = self.table();
        if let Some(block) = self.block {
            table = table.block(block);
        }
        Widget::render(table, area, buf);
    }
}

/// Widget for an analysed progression
pub struct ProgressionWidget<'a> {
    tokens: &'a [ProgressionToken],
    block: Option<Block<'a>>,
}

impl<'a> ProgressionWidget<'a> {
    pub fn new(tokens: &'a [ProgressionToken]) -> Self {
        Self {
            tokens,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn table(&self) -> Table<'a> {
        let header = Row::new(["Numeral", "Chord", "Role", "Function"]).style(header_style());

        let rows = self.tokens.iter().map(|token| {
            let chord_style = if token.is_resolved() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Red)
            };
            Row::new(vec![
                Cell::from(token.text.trim().to_string()),
                Cell::from(token.chord.clone()).style(chord_style),
                Cell::from(token.role_name().unwrap_or("-")).style(Style::default().fg(Color::Cyan)),
                Cell::from(token.role_description().unwrap_or("-"))
                    .style(Style::default().fg(Color::Gray)),
            ])
        });

        Table::new(
            rows,
            [
                Constraint::Length(9),
                Constraint::Length(10),
                Constraint::Length(17),
                Constraint::Min(20),
            ],
        )
        .header(header)
    }
}

impl Widget for ProgressionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut table = self.table();
        if let Some(block) = self.block {
            table = table.block(block);
        }
        Widget::render(table, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{build_diatonic_table, parse_progression, KeyQuality};

    #[test]
    fn test_diatonic_widget() {
        let rows = build_diatonic_table(0, false);
        let widget = DiatonicWidget::new(&rows);
        assert_eq!(widget.rows.len(), 7);
        assert!(widget.block.is_none());
    }

    #[test]
    fn test_widgets_render_into_buffer() {
        let area = Rect::new(0, 0, 100, 12);

        let rows = build_diatonic_table(0, false);
        let mut buf = Buffer::empty(area);
        DiatonicWidget::new(&rows).render(area, &mut buf);
        let first_row: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(first_row.starts_with("Ionian (Major)"));
        assert!(first_row.contains("ii Dm"));

        let tokens = parse_progression("ii-V-I", 0, KeyQuality::Major);
        let mut buf = Buffer::empty(area);
        ProgressionWidget::new(&tokens).render(area, &mut buf);
        let first_row: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(first_row.contains("Dm"));
        assert!(first_row.contains("Supertonic"));
    }
}
