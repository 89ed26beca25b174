// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Six-string tunings, stored highest string first (tab order).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::PitchClass;

/// One open string of a tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningString {
    /// Display name of the open note
    pub note: &'static str,
    /// Scientific octave of the open note
    pub octave: i8,
    /// Pitch class of the open note
    pub base: PitchClass,
}

const fn string(note: &'static str, octave: i8, base: PitchClass) -> TuningString {
    TuningString { note, octave, base }
}

const STANDARD: [TuningString; 6] = [
    string("E", 4, 4),
    string("B", 3, 11),
    string("G", 3, 7),
    string("D", 3, 2),
    string("A", 2, 9),
    string("E", 2, 4),
];

const B_STANDARD: [TuningString; 6] = [
    string("B", 3, 11),
    string("F#", 3, 6),
    string("D", 3, 2),
    string("A", 2, 9),
    string("E", 2, 4),
    string("B", 1, 11),
];

const DADGAD: [TuningString; 6] = [
    string("D", 4, 2),
    string("A", 3, 9),
    string("G", 3, 7),
    string("D", 3, 2),
    string("A", 2, 9),
    string("D", 2, 2),
];

const FACGCE: [TuningString; 6] = [
    string("E", 4, 4),
    string("C", 4, 0),
    string("G", 3, 7),
    string("C", 3, 0),
    string("A", 2, 9),
    string("F", 2, 5),
];

/// Built-in tunings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tuning {
    #[serde(rename = "STD")]
    Standard,
    #[serde(rename = "B")]
    BStandard,
    #[serde(rename = "DADGAD")]
    Dadgad,
    #[serde(rename = "FACGCE")]
    Facgce,
}

impl Tuning {
    /// All tunings in registry order
    pub const ALL: [Tuning; 4] = [
        Tuning::Standard,
        Tuning::BStandard,
        Tuning::Dadgad,
        Tuning::Facgce,
    ];

    /// Registry identifier
    pub fn id(self) -> &'static str {
        match self {
            Tuning::Standard => "STD",
            Tuning::BStandard => "B",
            Tuning::Dadgad => "DADGAD",
            Tuning::Facgce => "FACGCE",
        }
    }

    /// Look up a tuning by its exact identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Tuning::ALL.iter().copied().find(|t| t.id() == name)
    }

    /// Open strings, highest pitch first
    pub fn strings(self) -> &'static [TuningString] {
        match self {
            Tuning::Standard => &STANDARD,
            Tuning::BStandard => &B_STANDARD,
            Tuning::Dadgad => &DADGAD,
            Tuning::Facgce => &FACGCE,
        }
    }

    pub fn string_count(self) -> usize {
        self.strings().len()
    }

    /// Step to the next tuning (wraps)
    pub fn next(self) -> Self {
        let idx = Tuning::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tuning::ALL[(idx + 1) % Tuning::ALL.len()]
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
