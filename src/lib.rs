// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! fretlab: scales, chords, fretboards and Roman-numeral progressions.

pub mod config;
pub mod report;
pub mod theory;
pub mod ui;

pub use config::{Settings, SettingsError};
pub use theory::{
    build_diatonic_table, generate_fretboard, parse_progression, resolve_intervals, resolve_note,
};
