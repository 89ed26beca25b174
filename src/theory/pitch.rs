// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and note-name resolution.
//!
//! Everything here works on the twelve equal-tempered pitch classes,
//! numbered from C = 0. Names are always spelled with sharps; the five
//! common flat spellings are folded onto their sharp equivalents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pitch class type (0-11)
pub type PitchClass = u8;

/// Semitone offset type
pub type Semitones = i16;

/// Canonical pitch-class names, indexed by pitch class
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings (already uppercased) and the sharp they stand for
pub const FLAT_TO_SHARP: [(&str, &str); 5] = [
    ("DB", "C#"),
    ("EB", "D#"),
    ("GB", "F#"),
    ("AB", "G#"),
    ("BB", "A#"),
];

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> PitchClass {
        self as PitchClass
    }

    /// Get note from pitch class (wraps values above 11)
    pub fn from_pitch_class(pc: PitchClass) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Canonical sharp-spelled name
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self as usize]
    }

    /// Parse a note name, returning `None` when it is not recognised.
    ///
    /// Accepts any case and surrounding whitespace, plus the flat spellings
    /// listed in [`FLAT_TO_SHARP`].
    pub fn from_name(name: &str) -> Option<Self> {
        let clean = name.trim().to_uppercase();
        let clean = FLAT_TO_SHARP
            .iter()
            .find(|(flat, _)| *flat == clean)
            .map(|(_, sharp)| *sharp)
            .unwrap_or(clean.as_str());

        NOTE_NAMES
            .iter()
            .position(|n| *n == clean)
            .map(|idx| Note::ALL[idx])
    }

    /// Parse a note name, defaulting to C for anything unrecognised
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Note::C)
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let new_pc = (self.pitch_class() as Semitones + semitones).rem_euclid(12) as PitchClass;
        Note::from_pitch_class(new_pc)
    }

    /// Get interval in semitones to another note (ascending)
    pub fn interval_to(self, other: Note) -> PitchClass {
        interval_between(self.pitch_class(), other.pitch_class())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a note name to its pitch class.
///
/// Total over all inputs: anything that is not one of the twelve sharp
/// names or five flat spellings resolves to C (0).
pub fn resolve_note(name: &str) -> PitchClass {
    let pc = Note::resolve(name).pitch_class();
    if pc == 0 && Note::from_name(name).is_none() {
        tracing::debug!(name, "unrecognised note name, defaulting to C");
    }
    pc
}

/// Name of the pitch class reached from `root` by `semitones`
pub fn note_name_at(root: PitchClass, semitones: Semitones) -> &'static str {
    NOTE_NAMES[wrap(root as Semitones + semitones) as usize]
}

/// Ascending interval from `from` to `to`, in 0..12
pub fn interval_between(from: PitchClass, to: PitchClass) -> PitchClass {
    wrap(to as Semitones - from as Semitones)
}

/// Normalize any semitone value onto 0..12
pub fn wrap(semitones: Semitones) -> PitchClass {
    semitones.rem_euclid(12) as PitchClass
}
