// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Voicing filters for fretboard display.
//!
//! A voicing narrows the visible notes to a set of chord tones and names
//! the string groups those tones are usually played on. It never changes
//! the underlying fretboard data.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fretboard::FretCell;
use super::pitch::PitchClass;

/// A named group of string indices (0 = highest string)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSet {
    pub name: &'static str,
    pub strings: &'static [usize],
}

const CLOSE_TRIAD_SETS: [StringSet; 4] = [
    StringSet { name: "Strings 1-2-3", strings: &[0, 1, 2] },
    StringSet { name: "Strings 2-3-4", strings: &[1, 2, 3] },
    StringSet { name: "Strings 3-4-5", strings: &[2, 3, 4] },
    StringSet { name: "Strings 4-5-6", strings: &[3, 4, 5] },
];

const SPREAD_TRIAD_SETS: [StringSet; 3] = [
    StringSet { name: "Strings 1-2-4", strings: &[0, 1, 3] },
    StringSet { name: "Strings 2-3-5", strings: &[1, 2, 4] },
    StringSet { name: "Strings 3-4-6", strings: &[2, 3, 5] },
];

const SHELL_SETS: [StringSet; 2] = [
    StringSet { name: "E-String Root (6-4-3)", strings: &[5, 3, 2] },
    StringSet { name: "A-String Root (5-3-2)", strings: &[4, 2, 1] },
];

/// Voicing display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicingMode {
    #[default]
    All,
    TriadsClose,
    TriadsSpread,
    Shells,
}

impl VoicingMode {
    pub const ALL: [VoicingMode; 4] = [
        VoicingMode::All,
        VoicingMode::TriadsClose,
        VoicingMode::TriadsSpread,
        VoicingMode::Shells,
    ];

    pub fn id(self) -> &'static str {
        match self {
            VoicingMode::All => "all",
            VoicingMode::TriadsClose => "triads_close",
            VoicingMode::TriadsSpread => "triads_spread",
            VoicingMode::Shells => "shells",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        VoicingMode::ALL.iter().copied().find(|v| v.id() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            VoicingMode::All => "All Notes",
            VoicingMode::TriadsClose => "Close Triads",
            VoicingMode::TriadsSpread => "Spread Triads",
            VoicingMode::Shells => "Shell Voicings",
        }
    }

    /// Intervals kept by this voicing; empty keeps everything
    pub fn allowed_intervals(self) -> &'static [PitchClass] {
        match self {
            VoicingMode::All => &[],
            // R, m3, M3, 5
            VoicingMode::TriadsClose | VoicingMode::TriadsSpread => &[0, 3, 4, 7],
            // R, 3rds, 7ths
            VoicingMode::Shells => &[0, 3, 4, 10, 11],
        }
    }

    /// String groupings suggested for this voicing
    pub fn string_sets(self) -> &'static [StringSet] {
        match self {
            VoicingMode::All => &[],
            VoicingMode::TriadsClose => &CLOSE_TRIAD_SETS,
            VoicingMode::TriadsSpread => &SPREAD_TRIAD_SETS,
            VoicingMode::Shells => &SHELL_SETS,
        }
    }

    pub fn allows(self, interval: PitchClass) -> bool {
        let allowed = self.allowed_intervals();
        allowed.is_empty() || allowed.contains(&(interval % 12))
    }

    /// Whether a cell should be drawn.
    ///
    /// A cell starts visible when it is in the pattern (or `show_all` is
    /// set), and is then narrowed by the voicing's interval filter.
    pub fn is_visible(self, cell: &FretCell, show_all: bool) -> bool {
        (cell.is_in_scale || show_all) && self.allows(cell.interval)
    }

    pub fn next(self) -> Self {
        let idx = VoicingMode::ALL.iter().position(|v| *v == self).unwrap_or(0);
        VoicingMode::ALL[(idx + 1) % VoicingMode::ALL.len()]
    }
}

impl fmt::Display for VoicingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
