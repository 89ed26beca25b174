// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named scale and chord patterns.
//!
//! A pattern is an ordered list of semitone offsets from a root. Chord
//! patterns may reach past the octave (9ths use 14), so offsets are not
//! reduced here; consumers wrap them when they need pitch classes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::{PitchClass, Semitones};

/// Extension offsets appended to the bare major triad
pub const MAJOR_EXTENSIONS: [u8; 2] = [11, 14];

/// Extension offsets appended to the bare minor triad
pub const MINOR_EXTENSIONS: [u8; 2] = [10, 14];

/// Short labels for each interval above the root
pub const INTERVAL_LABELS: [&str; 12] = [
    "R", "b2", "2", "m3", "M3", "4", "b5", "5", "b6", "6", "b7", "7",
];

/// Scale and chord patterns known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    // Triads and chords
    Major,
    Minor,
    Maj7,
    Min7,
    Dom7,
    Maj9,
    Min9,
    Dom9,

    // Pentatonic scales
    PentMaj,
    PentMin,

    // Diatonic scales
    ScaleMaj,
    ScaleMin,

    // Modes
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl PatternKind {
    /// All patterns in registry order
    pub const ALL: [PatternKind; 19] = [
        PatternKind::Major,
        PatternKind::Minor,
        PatternKind::Maj7,
        PatternKind::Min7,
        PatternKind::Dom7,
        PatternKind::Maj9,
        PatternKind::Min9,
        PatternKind::Dom9,
        PatternKind::PentMaj,
        PatternKind::PentMin,
        PatternKind::ScaleMaj,
        PatternKind::ScaleMin,
        PatternKind::Ionian,
        PatternKind::Dorian,
        PatternKind::Phrygian,
        PatternKind::Lydian,
        PatternKind::Mixolydian,
        PatternKind::Aeolian,
        PatternKind::Locrian,
    ];

    /// Get the intervals (semitones from root) for this pattern
    pub fn intervals(self) -> &'static [u8] {
        match self {
            PatternKind::Major => &[0, 4, 7],
            PatternKind::Minor => &[0, 3, 7],
            PatternKind::Maj7 => &[0, 4, 7, 11],
            PatternKind::Min7 => &[0, 3, 7, 10],
            PatternKind::Dom7 => &[0, 4, 7, 10],
            PatternKind::Maj9 => &[0, 4, 7, 11, 14],
            PatternKind::Min9 => &[0, 3, 7, 10, 14],
            PatternKind::Dom9 => &[0, 4, 7, 10, 14],
            PatternKind::PentMaj => &[0, 2, 4, 7, 9],
            PatternKind::PentMin => &[0, 3, 5, 7, 10],
            PatternKind::ScaleMaj | PatternKind::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            PatternKind::ScaleMin | PatternKind::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            PatternKind::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            PatternKind::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            PatternKind::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            PatternKind::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            PatternKind::Locrian => &[0, 1, 3, 5, 6, 8, 10],
        }
    }

    /// Registry identifier (e.g. "scale_maj")
    pub fn id(self) -> &'static str {
        match self {
            PatternKind::Major => "major",
            PatternKind::Minor => "minor",
            PatternKind::Maj7 => "maj7",
            PatternKind::Min7 => "min7",
            PatternKind::Dom7 => "dom7",
            PatternKind::Maj9 => "maj9",
            PatternKind::Min9 => "min9",
            PatternKind::Dom9 => "dom9",
            PatternKind::PentMaj => "pent_maj",
            PatternKind::PentMin => "pent_min",
            PatternKind::ScaleMaj => "scale_maj",
            PatternKind::ScaleMin => "scale_min",
            PatternKind::Ionian => "ionian",
            PatternKind::Dorian => "dorian",
            PatternKind::Phrygian => "phrygian",
            PatternKind::Lydian => "lydian",
            PatternKind::Mixolydian => "mixolydian",
            PatternKind::Aeolian => "aeolian",
            PatternKind::Locrian => "locrian",
        }
    }

    /// Look up a pattern by its exact registry identifier
    pub fn from_name(name: &str) -> Option<Self> {
        PatternKind::ALL.iter().copied().find(|p| p.id() == name)
    }

    /// Display label for menus ("scale_maj" -> "SCALE MAJ")
    pub fn label(self) -> String {
        self.id().replacen('_', " ", 1).to_uppercase()
    }

    /// Extension offsets that `extended` adds to this pattern, if any
    pub fn extensions(self) -> Option<&'static [u8]> {
        match self {
            PatternKind::Major => Some(&MAJOR_EXTENSIONS),
            PatternKind::Minor => Some(&MINOR_EXTENSIONS),
            _ => None,
        }
    }

    /// Step to the next pattern in registry order (wraps)
    pub fn next(self) -> Self {
        let idx = PatternKind::ALL.iter().position(|p| *p == self).unwrap_or(0);
        PatternKind::ALL[(idx + 1) % PatternKind::ALL.len()]
    }

    /// Step to the previous pattern in registry order (wraps)
    pub fn prev(self) -> Self {
        let len = PatternKind::ALL.len();
        let idx = PatternKind::ALL.iter().position(|p| *p == self).unwrap_or(0);
        PatternKind::ALL[(idx + len - 1) % len]
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolve a pattern name to its interval list.
///
/// Unknown names fall back to the major triad. `extended` only applies when
/// the requested name is exactly "major" or "minor"; other patterns are
/// returned as-is even if they share a tonal centre.
pub fn resolve_intervals(pattern_name: &str, extended: bool) -> Vec<u8> {
    let kind = match PatternKind::from_name(pattern_name) {
        Some(kind) => kind,
        None => {
            tracing::debug!(pattern_name, "unknown pattern, falling back to major");
            return PatternKind::Major.intervals().to_vec();
        }
    };

    let mut intervals = kind.intervals().to_vec();
    if extended {
        if let Some(ext) = kind.extensions() {
            intervals.extend_from_slice(ext);
        }
    }
    intervals
}

/// Short label for an interval; values outside 0..12 are wrapped
pub fn interval_label(interval: PitchClass) -> &'static str {
    INTERVAL_LABELS[(interval % 12) as usize]
}

/// Highlight class of an interval, used when colouring notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalClass {
    Root,
    Third,
    Fifth,
    Seventh,
    Other,
}

impl IntervalClass {
    /// Classify an interval above the root
    pub fn of(interval: PitchClass) -> Self {
        match interval % 12 {
            0 => IntervalClass::Root,
            3 | 4 => IntervalClass::Third,
            7 => IntervalClass::Fifth,
            10 | 11 => IntervalClass::Seventh,
            _ => IntervalClass::Other,
        }
    }
}

/// Pitch classes covered by `intervals` above `root`
pub fn pitch_set(root: PitchClass, intervals: &[u8]) -> [bool; 12] {
    let mut set = [false; 12];
    for &i in intervals {
        set[super::pitch::wrap(root as Semitones + i as Semitones) as usize] = true;
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_intervals() {
        assert_eq!(PatternKind::Major.intervals(), &[0, 4, 7]);
        assert_eq!(PatternKind::Min9.intervals(), &[0, 3, 7, 10, 14]);
        assert_eq!(PatternKind::PentMin.intervals(), &[0, 3, 5, 7, 10]);
        assert_eq!(PatternKind::Locrian.intervals(), &[0, 1, 3, 5, 6, 8, 10]);
        assert_eq!(PatternKind::ScaleMaj.intervals(), PatternKind::Ionian.intervals());
        assert_eq!(PatternKind::ScaleMin.intervals(), PatternKind::Aeolian.intervals());
    }

    #[test]
    fn test_pattern_from_name() {
        for kind in PatternKind::ALL {
            assert_eq!(PatternKind::from_name(kind.id()), Some(kind));
        }
        assert_eq!(PatternKind::from_name("Major"), None);
        assert_eq!(PatternKind::from_name("harmonic_minor"), None);
    }

    #[test]
    fn test_pattern_label() {
        assert_eq!(PatternKind::ScaleMaj.label(), "SCALE MAJ");
        assert_eq!(PatternKind::Dom7.label(), "DOM7");
    }

    #[test]
    fn test_resolve_intervals_unknown_falls_back() {
        assert_eq!(resolve_intervals("nonsense", false), vec![0, 4, 7]);
        // The fallback is never extended
        assert_eq!(resolve_intervals("nonsense", true), vec![0, 4, 7]);
    }

    #[test]
    fn test_resolve_intervals_extensions_are_narrow() {
        assert_eq!(resolve_intervals("major", true), vec![0, 4, 7, 11, 14]);
        assert_eq!(resolve_intervals("minor", true), vec![0, 3, 7, 10, 14]);
        assert_eq!(resolve_intervals("major", false), vec![0, 4, 7]);

        assert_eq!(resolve_intervals("scale_maj", true), vec![0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(resolve_intervals("scale_min", true), vec![0, 2, 3, 5, 7, 8, 10]);
        assert_eq!(resolve_intervals("maj7", true), vec![0, 4, 7, 11]);
    }

    #[test]
    fn test_interval_labels() {
        assert_eq!(interval_label(0), "R");
        assert_eq!(interval_label(3), "m3");
        assert_eq!(interval_label(4), "M3");
        assert_eq!(interval_label(10), "b7");
        assert_eq!(interval_label(14), "2");
    }

    #[test]
    fn test_interval_class() {
        assert_eq!(IntervalClass::of(0), IntervalClass::Root);
        assert_eq!(IntervalClass::of(3), IntervalClass::Third);
        assert_eq!(IntervalClass::of(4), IntervalClass::Third);
        assert_eq!(IntervalClass::of(7), IntervalClass::Fifth);
        assert_eq!(IntervalClass::of(11), IntervalClass::Seventh);
        assert_eq!(IntervalClass::of(2), IntervalClass::Other);
    }

    #[test]
    fn test_pattern_cycle() {
        assert_eq!(PatternKind::Major.next(), PatternKind::Minor);
        assert_eq!(PatternKind::Major.prev(), PatternKind::Locrian);
        assert_eq!(PatternKind::Locrian.next(), PatternKind::Major);
    }

    #[test]
    fn test_pitch_set() {
        let set = pitch_set(9, &[0, 3, 7, 14]);
        assert!(set[9]);
        assert!(set[0]);
        assert!(set[4]);
        assert!(set[11]);
        assert_eq!(set.iter().filter(|b| **b).count(), 4);
    }
}
