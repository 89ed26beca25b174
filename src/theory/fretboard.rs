// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard note grid.
//!
//! Produces one row per string (in the tuning's stored high-to-low order)
//! and one cell per fret, 0 through `fret_count` inclusive. Every cell is
//! computed eagerly; the grid is small and recomputed whenever the root,
//! pattern or tuning changes.

use super::pattern::pitch_set;
use super::pitch::{interval_between, Note, PitchClass};
use super::tuning::Tuning;

/// Default number of frets (cells per string is one more, for the nut)
pub const DEFAULT_FRET_COUNT: usize = 21;

/// A single string/fret position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretCell {
    /// String index, 0 is the highest string
    pub string_index: usize,
    /// Fret number, 0 is the open string
    pub fret: usize,
    /// Absolute pitch class sounding at this position
    pub pitch: PitchClass,
    /// Interval above the root (0-11)
    pub interval: PitchClass,
    pub is_root: bool,
    /// Whether the pitch belongs to the selected pattern
    pub is_in_scale: bool,
}

impl FretCell {
    /// Display name of the sounding note
    pub fn note(&self) -> Note {
        Note::from_pitch_class(self.pitch)
    }

    pub fn note_name(&self) -> &'static str {
        self.note().name()
    }
}

/// Fully materialized fretboard for one root, pattern and tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    tuning: Tuning,
    fret_count: usize,
    rows: Vec<Vec<FretCell>>,
}

impl Fretboard {
    /// Build the grid for a known tuning
    pub fn generate(root: PitchClass, intervals: &[u8], tuning: Tuning, fret_count: usize) -> Self {
        let root = root % 12;
        let targets = pitch_set(root, intervals);

        let rows = tuning
            .strings()
            .iter()
            .enumerate()
            .map(|(string_index, open)| {
                (0..=fret_count)
                    .map(|fret| {
                        let pitch = ((open.base as usize + fret) % 12) as PitchClass;
                        let interval = interval_between(root, pitch);
                        FretCell {
                            string_index,
                            fret,
                            pitch,
                            interval,
                            is_root: interval == 0,
                            is_in_scale: targets[pitch as usize],
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            tuning,
            fret_count,
            rows,
        }
    }

    pub fn tuning(&self) -> Tuning {
        self.tuning
    }

    pub fn fret_count(&self) -> usize {
        self.fret_count
    }

    pub fn string_count(&self) -> usize {
        self.rows.len()
    }

    /// All strings, highest first
    pub fn strings(&self) -> &[Vec<FretCell>] {
        &self.rows
    }

    /// Cell at a string/fret position, if it exists
    pub fn cell(&self, string: usize, fret: usize) -> Option<&FretCell> {
        self.rows.get(string).and_then(|row| row.get(fret))
    }

    /// Positions of the root note across the board
    pub fn roots(&self) -> impl Iterator<Item = &FretCell> {
        self.rows.iter().flatten().filter(|c| c.is_root)
    }

    pub fn into_rows(self) -> Vec<Vec<FretCell>> {
        self.rows
    }
}

/// Build the fretboard grid for a tuning given by name.
///
/// An unknown tuning name yields an empty grid.
pub fn generate_fretboard(
    root: PitchClass,
    intervals: &[u8],
    tuning_name: &str,
    fret_count: usize,
) -> Vec<Vec<FretCell>> {
    match Tuning::from_name(tuning_name) {
        Some(tuning) => Fretboard::generate(root, intervals, tuning, fret_count).into_rows(),
        None => {
            tracing::debug!(tuning_name, "unknown tuning, returning empty fretboard");
            Vec::new()
        }
    }
}
