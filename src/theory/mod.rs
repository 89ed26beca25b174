// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core for fretlab.
//!
//! Pure functions over constant tables: note and pattern lookup, fretboard
//! layout across tunings, diatonic chord tables for the seven modes, and
//! Roman-numeral progression analysis. Nothing here allocates global state
//! or fails; unknown inputs fall back to documented defaults.

pub mod diatonic;
pub mod fretboard;
pub mod pattern;
pub mod pitch;
pub mod progression;
pub mod tuning;
pub mod voicing;

pub use diatonic::{build_diatonic_table, degree_role, diatonic_table, ChordSet, DegreeRole, DiatonicRow};
pub use fretboard::{generate_fretboard, FretCell, Fretboard, DEFAULT_FRET_COUNT};
pub use pattern::{interval_label, resolve_intervals, IntervalClass, PatternKind};
pub use pitch::{resolve_note, Note, PitchClass, Semitones};
pub use progression::{detect_key_quality, parse_progression, KeyQuality, ProgressionToken};
pub use tuning::{Tuning, TuningString};
pub use voicing::{StringSet, VoicingMode};
