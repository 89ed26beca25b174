// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Plain-text rendering of fretboards and chord tables.
//!
//! Everything here builds a `String` and never prints, so the command-line
//! front end and the tests share the same output.

use std::fmt::Write;

use crate::theory::diatonic::DEGREE_HEADERS;
use crate::theory::pitch::NOTE_NAMES;
use crate::theory::{
    detect_key_quality, diatonic_table, interval_label, parse_progression, ChordSet, FretCell,
    Fretboard, KeyQuality, PatternKind, PitchClass, Tuning, VoicingMode,
};

/// Frets that carry an inlay marker
pub const FRET_MARKERS: [usize; 9] = [3, 5, 7, 9, 12, 15, 17, 19, 21];

/// Placeholder for hidden cells and missing table values
const BLANK: &str = "-";

const CELL_WIDTH: usize = 5;

/// How fretboard cells are labelled and filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FretboardView {
    pub voicing: VoicingMode,
    /// Interval labels instead of note names
    pub show_intervals: bool,
    /// Include notes outside the pattern
    pub show_all: bool,
}

impl FretboardView {
    /// Label for a cell, or `None` when the cell is hidden
    pub fn label(&self, cell: &FretCell) -> Option<&'static str> {
        if !self.voicing.is_visible(cell, self.show_all) {
            return None;
        }
        Some(if self.show_intervals {
            interval_label(cell.interval)
        } else {
            cell.note_name()
        })
    }
}

/// Inlay glyph for a fret ("**" on the octave)
pub fn fret_marker(fret: usize) -> &'static str {
    match fret {
        12 => "**",
        f if FRET_MARKERS.contains(&f) => "*",
        _ => "",
    }
}

/// Render the whole fretboard, highest string first
pub fn fretboard(board: &Fretboard, view: FretboardView) -> String {
    let mut out = String::new();

    let mut numbers = String::from("   ");
    let mut markers = String::from("   ");
    for fret in 0..=board.fret_count() {
        let sep = if fret == 0 { "  " } else { " " };
        let _ = write!(numbers, "{:^CELL_WIDTH$}{}", fret, sep);
        let _ = write!(markers, "{:^CELL_WIDTH$}{}", fret_marker(fret), sep);
    }
    out.push_str(numbers.trim_end());
    out.push('\n');
    out.push_str(markers.trim_end());
    out.push('\n');

    for (open, row) in board.tuning().strings().iter().zip(board.strings()) {
        let _ = write!(out, "{:<2}|", open.note);
        for cell in row {
            let label = view.label(cell).unwrap_or(BLANK);
            let sep = if cell.fret == 0 { "||" } else { "|" };
            let _ = write!(out, "{:^CELL_WIDTH$}{}", label, sep);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of a pattern over a root, e.g. "C major: R M3 5"
pub fn pattern_summary(root: PitchClass, pattern: PatternKind, intervals: &[u8]) -> String {
    let labels: Vec<&str> = intervals.iter().map(|i| interval_label(*i)).collect();
    format!(
        "{} {}: {}",
        NOTE_NAMES[(root % 12) as usize],
        pattern.label(),
        labels.join(" ")
    )
}

/// Suggested string groups for a voicing, one per line
pub fn string_sets(voicing: VoicingMode) -> String {
    voicing
        .string_sets()
        .iter()
        .map(|set| format!("{}: strings {:?}\n", set.name, set.strings))
        .collect()
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Lay out rows under headers with left-aligned, width-fitted columns
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = table_line(headers.iter().copied(), &widths);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&table_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

/// Diatonic chords of every mode of `root`
pub fn diatonic(root: PitchClass, chord_set: ChordSet) -> String {
    let mut headers = vec!["Mode"];
    headers.extend(DEGREE_HEADERS);

    let rows: Vec<Vec<String>> = diatonic_table(root, chord_set)
        .into_iter()
        .map(|row| {
            std::iter::once(row.mode.to_string())
                .chain(
                    row.numerals
                        .iter()
                        .zip(&row.chords)
                        .map(|(numeral, chord)| format!("{} {}", numeral, chord)),
                )
                .collect()
        })
        .collect();

    format!(
        "{} modes ({})\n{}",
        NOTE_NAMES[(root % 12) as usize],
        chord_set.label(),
        table(&headers, &rows)
    )
}

/// Analysis table for a progression in the key of `root`
pub fn progression(text: &str, root: PitchClass, key_quality: KeyQuality) -> String {
    let key = detect_key_quality(text, key_quality);
    let rows: Vec<Vec<String>> = parse_progression(text, root, key_quality)
        .into_iter()
        .enumerate()
        .map(|(i, token)| {
            let degree = token
                .degree
                .map(|d| (d + 1).to_string())
                .unwrap_or_else(|| BLANK.to_string());
            vec![
                (i + 1).to_string(),
                token.text.trim().to_string(),
                token.chord.clone(),
                degree,
                token.role_name().unwrap_or(BLANK).to_string(),
                token.role_description().unwrap_or(BLANK).to_string(),
            ]
        })
        .collect();

    format!(
        "Key: {} {}\n{}",
        NOTE_NAMES[(root % 12) as usize],
        key,
        table(&["#", "Numeral", "Chord", "Degree", "Role", "Function"], &rows)
    )
}

/// Patterns, tunings and voicings known to the registry
pub fn catalogue() -> String {
    let mut out = String::from("Patterns:\n");
    for kind in PatternKind::ALL {
        let labels: Vec<&str> = kind.intervals().iter().map(|i| interval_label(*i)).collect();
        let _ = writeln!(out, "  {:<12} {:<12} {}", kind.id(), kind.label(), labels.join(" "));
    }

    out.push_str("\nTunings:\n");
    for tuning in Tuning::ALL {
        let notes: Vec<&str> = tuning.strings().iter().map(|s| s.note).collect();
        let _ = writeln!(out, "  {:<12} {}", tuning.id(), notes.join(" "));
    }

    out.push_str("\nVoicings:\n");
    for voicing in VoicingMode::ALL {
        let _ = writeln!(out, "  {:<14} {}", voicing.id(), voicing.label());
    }
    out
}
