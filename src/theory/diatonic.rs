// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic chords of the seven modes, and the functional role of each
//! scale degree.
//!
//! Numerals and chord qualities are fixed 7x7 tables (mode x degree). The
//! numerals already carry case and accidentals for their mode, so nothing
//! here is derived arithmetically except the chord roots.

use serde::{Deserialize, Serialize};

use super::pitch::{note_name_at, PitchClass, Semitones};

/// Mode display names, Ionian first
pub const MODE_NAMES: [&str; 7] = [
    "Ionian (Major)",
    "Dorian",
    "Phrygian",
    "Lydian",
    "Mixolydian",
    "Aeolian (Minor)",
    "Locrian",
];

/// Scale intervals of each mode
pub const MODE_INTERVALS: [[u8; 7]; 7] = [
    [0, 2, 4, 5, 7, 9, 11],
    [0, 2, 3, 5, 7, 9, 10],
    [0, 1, 3, 5, 7, 8, 10],
    [0, 2, 4, 6, 7, 9, 11],
    [0, 2, 4, 5, 7, 9, 10],
    [0, 2, 3, 5, 7, 8, 10],
    [0, 1, 3, 5, 6, 8, 10],
];

pub const TRIAD_NUMERALS: [[&str; 7]; 7] = [
    ["I", "ii", "iii", "IV", "V", "vi", "vii°"],
    ["i", "ii", "bIII", "IV", "v", "vi°", "bVII"],
    ["i", "bII", "bIII", "iv", "v°", "bVI", "bVII"],
    ["I", "II", "iii", "#iv°", "V", "vi", "vii"],
    ["I", "ii", "iii°", "IV", "v", "vi", "bVII"],
    ["i", "ii°", "bIII", "iv", "v", "bVI", "bVII"],
    ["i°", "bII", "biii", "iv", "bV", "bVI", "bvii"],
];

pub const SEVENTH_NUMERALS: [[&str; 7]; 7] = [
    ["Imaj7", "ii7", "iii7", "IVmaj7", "V7", "vi7", "vii°7"],
    ["i7", "ii7", "bIIImaj7", "IV7", "v7", "vi°7", "bVIImaj7"],
    ["i7", "bIImaj7", "bIII7", "iv7", "v°7", "bVImaj7", "bVII7"],
    ["Imaj7", "II7", "iii7", "#iv°7", "Vmaj7", "vi7", "vii7"],
    ["I7", "ii7", "iii°7", "IVmaj7", "v7", "vi7", "bVIImaj7"],
    ["i7", "ii°7", "bIIImaj7", "iv7", "v7", "bVImaj7", "bVII7"],
    ["i°7", "bIImaj7", "biii7", "iv7", "bVmaj7", "bVI7", "bvii7"],
];

pub const TRIAD_QUALITIES: [[&str; 7]; 7] = [
    ["", "m", "m", "", "", "m", "dim"],
    ["m", "m", "", "", "m", "dim", ""],
    ["m", "", "", "m", "dim", "", ""],
    ["", "", "m", "dim", "", "m", "m"],
    ["", "m", "dim", "", "m", "m", ""],
    ["m", "dim", "", "m", "m", "", ""],
    ["dim", "", "m", "m", "", "", "m"],
];

pub const SEVENTH_QUALITIES: [[&str; 7]; 7] = [
    ["maj7", "m7", "m7", "maj7", "7", "m7", "m7b5"],
    ["m7", "m7", "maj7", "7", "m7", "m7b5", "maj7"],
    ["m7", "maj7", "7", "m7", "m7b5", "maj7", "m7"],
    ["maj7", "7", "m7", "m7b5", "maj7", "m7", "m7"],
    ["7", "m7", "m7b5", "maj7", "m7", "m7", "maj7"],
    ["m7", "m7b5", "maj7", "m7", "m7", "maj7", "7"],
    ["m7b5", "maj7", "m7", "m7", "maj7", "7", "m7"],
];

/// Column headers for the degree columns
pub const DEGREE_HEADERS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Functional name and description of a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeRole {
    pub name: &'static str,
    pub description: &'static str,
}

/// Roles of degrees 0-6, independent of mode and key
pub static DEGREE_ROLES: [DegreeRole; 7] = [
    DegreeRole {
        name: "Tonic",
        description: "Home chord, stable resolution center",
    },
    DegreeRole {
        name: "Supertonic",
        description: "Predominant, builds tension leading to V",
    },
    DegreeRole {
        name: "Mediant",
        description: "Prolongs tonic, shares notes with I",
    },
    DegreeRole {
        name: "Subdominant",
        description: "Moves away from tonic, prepares V",
    },
    DegreeRole {
        name: "Dominant",
        description: "Peak tension, strongly resolves to I",
    },
    DegreeRole {
        name: "Submediant",
        description: "Deceptive resolution target, bridges I and IV",
    },
    DegreeRole {
        name: "Leading/Subtonic",
        description: "High tension pulling to I (Maj) or moving to III (Min)",
    },
];

/// Role of a scale degree (0-6)
pub fn degree_role(degree: usize) -> Option<&'static DegreeRole> {
    DEGREE_ROLES.get(degree)
}

/// Which chord table to read: plain triads or seventh chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordSet {
    #[default]
    Triads,
    Sevenths,
}

impl ChordSet {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "triads" | "triad" => Some(ChordSet::Triads),
            "sevenths" | "seventh" | "7ths" => Some(ChordSet::Sevenths),
            _ => None,
        }
    }

    pub fn numerals(self) -> &'static [[&'static str; 7]; 7] {
        match self {
            ChordSet::Triads => &TRIAD_NUMERALS,
            ChordSet::Sevenths => &SEVENTH_NUMERALS,
        }
    }

    pub fn qualities(self) -> &'static [[&'static str; 7]; 7] {
        match self {
            ChordSet::Triads => &TRIAD_QUALITIES,
            ChordSet::Sevenths => &SEVENTH_QUALITIES,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ChordSet::Triads => ChordSet::Sevenths,
            ChordSet::Sevenths => ChordSet::Triads,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChordSet::Triads => "Triads",
            ChordSet::Sevenths => "7ths",
        }
    }
}

/// One mode's row of the diatonic table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiatonicRow {
    pub mode: &'static str,
    pub numerals: [&'static str; 7],
    pub chords: [String; 7],
}

/// Build the 7x7 table of diatonic chords for every mode of `root`
pub fn diatonic_table(root: PitchClass, chord_set: ChordSet) -> Vec<DiatonicRow> {
    let numerals = chord_set.numerals();
    let qualities = chord_set.qualities();

    MODE_NAMES
        .into_iter()
        .enumerate()
        .map(|(mode, name)| DiatonicRow {
            mode: name,
            numerals: numerals[mode],
            chords: std::array::from_fn(|degree| {
                let offset = MODE_INTERVALS[mode][degree] as Semitones;
                format!("{}{}", note_name_at(root, offset), qualities[mode][degree])
            }),
        })
        .collect()
}

/// Build the diatonic table, choosing seventh chords when `use_seventh` is set
pub fn build_diatonic_table(root: PitchClass, use_seventh: bool) -> Vec<DiatonicRow> {
    let chord_set = if use_seventh {
        ChordSet::Sevenths
    } else {
        ChordSet::Triads
    };
    diatonic_table(root, chord_set)
}
