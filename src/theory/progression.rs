// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman-numeral progression analysis.
//!
//! A progression is a hyphen-separated list of numerals such as
//! `ii-V7-I` or `i-bVI-bVII`. Each token is split into an optional
//! accidental, a numeral body made of `i`/`v` letters, and a free-form
//! extension. The body picks the scale degree, its case picks the default
//! quality, and the extension may override that quality.
//!
//! Tokens that cannot be read come back unresolved (chord `"?"`) instead of
//! failing the whole progression.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::diatonic::{degree_role, DegreeRole};
use super::pitch::{note_name_at, wrap, PitchClass, Semitones};

/// Chord name given to tokens that could not be read
pub const UNRESOLVED_CHORD: &str = "?";

/// Degree reported for unresolved tokens
pub const UNRESOLVED_DEGREE: i8 = -1;

/// Numeral bodies and their scale degrees
const DEGREES: [(&str, usize); 7] = [
    ("i", 0),
    ("ii", 1),
    ("iii", 2),
    ("iv", 3),
    ("v", 4),
    ("vi", 5),
    ("vii", 6),
];

/// Key quality used to pick the diatonic intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyQuality {
    #[default]
    Major,
    Minor,
}

impl KeyQuality {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "major" | "maj" => Some(KeyQuality::Major),
            "minor" | "min" => Some(KeyQuality::Minor),
            _ => None,
        }
    }

    /// Semitone offsets of the seven scale degrees
    pub fn diatonic_intervals(self) -> [u8; 7] {
        match self {
            KeyQuality::Major => [0, 2, 4, 5, 7, 9, 11],
            KeyQuality::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            KeyQuality::Major => KeyQuality::Minor,
            KeyQuality::Minor => KeyQuality::Major,
        }
    }
}

impl fmt::Display for KeyQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyQuality::Major => write!(f, "major"),
            KeyQuality::Minor => write!(f, "minor"),
        }
    }
}

/// One analysed token of a progression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionToken {
    /// Token exactly as it appeared between hyphens
    pub text: String,
    /// Scale degree (0-6), `None` when unresolved
    pub degree: Option<usize>,
    /// Pitch class of the chord root, `None` when unresolved
    pub root: Option<PitchClass>,
    /// Chord quality suffix ("", "m", "dim", "aug", "m7b5")
    pub quality: String,
    /// Extension text left after quality markers were removed
    pub extension: String,
    /// Full chord name, or `"?"` when unresolved
    pub chord: String,
    pub role: Option<&'static DegreeRole>,
}

impl ProgressionToken {
    fn unresolved(text: &str) -> Self {
        Self {
            text: text.to_string(),
            degree: None,
            root: None,
            quality: String::new(),
            extension: String::new(),
            chord: UNRESOLVED_CHORD.to_string(),
            role: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.degree.is_some()
    }

    /// Scale degree with -1 standing in for "unresolved"
    pub fn deg(&self) -> i8 {
        self.degree.map(|d| d as i8).unwrap_or(UNRESOLVED_DEGREE)
    }

    pub fn role_name(&self) -> Option<&'static str> {
        self.role.map(|r| r.name)
    }

    pub fn role_description(&self) -> Option<&'static str> {
        self.role.map(|r| r.description)
    }
}

/// A token split into accidental, numeral body and extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumeralParts<'a> {
    accidental: Option<char>,
    body: &'a str,
    extension: &'a str,
}

impl NumeralParts<'_> {
    /// Semitone shift of the accidental. Only a lowercase `b` flattens.
    fn shift(&self) -> Semitones {
        match self.accidental {
            Some('b') => -1,
            Some('#') => 1,
            _ => 0,
        }
    }

    fn is_upper(&self) -> bool {
        self.body == self.body.to_uppercase()
    }

    fn degree(&self) -> Option<usize> {
        let lower = self.body.to_lowercase();
        DEGREES
            .iter()
            .find(|(numeral, _)| *numeral == lower)
            .map(|(_, degree)| *degree)
    }
}

fn is_numeral_char(c: char) -> bool {
    matches!(c, 'i' | 'v' | 'I' | 'V')
}

/// Accidental, numeral body, extension. The extension may not cross a line.
static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([b#])?([iv]+)([^\n\r\x{2028}\x{2029}]*)$").expect("numeral pattern is valid")
});

static HALF_DIMINISHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ø|m7b5").expect("marker pattern is valid"));
static DIMINISHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dim|°").expect("marker pattern is valid"));
static AUGMENTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)aug|\+").expect("marker pattern is valid"));

/// Split a trimmed token. Returns `None` when there is no numeral body.
fn split_numeral(token: &str) -> Option<NumeralParts<'_>> {
    let caps = NUMERAL.captures(token)?;
    let body = caps.get(2)?.as_str();

    Some(NumeralParts {
        accidental: caps.get(1).and_then(|m| m.as_str().chars().next()),
        body,
        extension: caps.get(3).map_or("", |m| m.as_str()),
    })
}

/// Quality and remaining extension chosen by an override rule
#[derive(Debug, Clone, PartialEq, Eq)]
struct QualityOverride {
    quality: &'static str,
    extension: String,
}

/// An override rule sees the numeral case and the raw extension
type QualityRule = fn(bool, &str) -> Option<QualityOverride>;

/// Override rules, highest precedence first. The first rule that fires wins.
const QUALITY_RULES: [QualityRule; 5] = [
    half_diminished,
    diminished,
    augmented,
    suspended,
    lowercase_minor_dedup,
];

/// "ø" or "m7b5" anywhere: half-diminished, markers removed
fn half_diminished(_upper: bool, extension: &str) -> Option<QualityOverride> {
    marker_override(extension, &HALF_DIMINISHED, "m7b5")
}

/// "dim" or "°" anywhere: diminished, markers removed
fn diminished(_upper: bool, extension: &str) -> Option<QualityOverride> {
    marker_override(extension, &DIMINISHED, "dim")
}

/// "aug" or "+" anywhere: augmented, markers removed
fn augmented(_upper: bool, extension: &str) -> Option<QualityOverride> {
    marker_override(extension, &AUGMENTED, "aug")
}

/// "sus" anywhere: no third, so no quality; extension kept
fn suspended(_upper: bool, extension: &str) -> Option<QualityOverride> {
    extension
        .to_lowercase()
        .contains("sus")
        .then(|| QualityOverride {
            quality: "",
            extension: extension.to_string(),
        })
}

/// Lowercase numeral whose extension already starts with "m" ("ivm7")
fn lowercase_minor_dedup(upper: bool, extension: &str) -> Option<QualityOverride> {
    (!upper && extension.to_lowercase().starts_with('m')).then(|| QualityOverride {
        quality: "",
        extension: extension.to_string(),
    })
}

fn marker_override(
    extension: &str,
    markers: &Regex,
    quality: &'static str,
) -> Option<QualityOverride> {
    markers.is_match(extension).then(|| QualityOverride {
        quality,
        extension: markers.replace_all(extension, "").into_owned(),
    })
}

/// Pick the quality for a numeral: case default, then the override chain
fn resolve_quality(upper: bool, extension: &str) -> (&'static str, String) {
    QUALITY_RULES
        .iter()
        .find_map(|rule| rule(upper, extension))
        .map(|o| (o.quality, o.extension))
        .unwrap_or_else(|| (if upper { "" } else { "m" }, extension.to_string()))
}

/// Split a progression into its non-empty tokens, in order
fn tokenize(text: &str) -> Vec<&str> {
    text.split('-').filter(|t| !t.trim().is_empty()).collect()
}

/// Whether a set of tokens reads as a minor-key progression.
///
/// Looks at the `i`/`v` letters of every token at once: the progression is
/// minor when some token reduces to exactly `i` and none to exactly `I`.
fn reads_as_minor(tokens: &[&str]) -> bool {
    let bases: Vec<String> = tokens
        .iter()
        .map(|t| t.chars().filter(|c| is_numeral_char(*c)).collect())
        .collect();

    bases.iter().any(|b| b == "i") && !bases.iter().any(|b| b == "I")
}

/// Key quality a progression will be analysed in.
///
/// A requested minor key is kept; otherwise the tokens decide.
pub fn detect_key_quality(text: &str, requested: KeyQuality) -> KeyQuality {
    key_for_tokens(&tokenize(text), requested)
}

fn key_for_tokens(tokens: &[&str], requested: KeyQuality) -> KeyQuality {
    if requested == KeyQuality::Minor || reads_as_minor(tokens) {
        KeyQuality::Minor
    } else {
        KeyQuality::Major
    }
}

fn analyse_token(token: &str, root: PitchClass, intervals: &[u8; 7]) -> ProgressionToken {
    let Some(parts) = split_numeral(token.trim()) else {
        tracing::debug!(token, "no numeral in progression token");
        return ProgressionToken::unresolved(token);
    };
    let Some(degree) = parts.degree() else {
        tracing::debug!(token, body = parts.body, "numeral out of range");
        return ProgressionToken::unresolved(token);
    };

    let interval = intervals[degree] as Semitones + parts.shift();
    let chord_root = wrap(root as Semitones + interval);
    let (quality, extension) = resolve_quality(parts.is_upper(), parts.extension);
    let chord = format!("{}{}{}", note_name_at(chord_root, 0), quality, extension);

    ProgressionToken {
        text: token.to_string(),
        degree: Some(degree),
        root: Some(chord_root),
        quality: quality.to_string(),
        extension,
        chord,
        role: degree_role(degree),
    }
}

/// Analyse a hyphen-separated Roman-numeral progression in the key of `root`.
///
/// Output has one token per non-empty input token, in input order.
pub fn parse_progression(
    text: &str,
    root: PitchClass,
    key_quality: KeyQuality,
) -> Vec<ProgressionToken> {
    let tokens = tokenize(text);
    let intervals = key_for_tokens(&tokens, key_quality).diatonic_intervals();

    tokens
        .into_iter()
        .map(|token| analyse_token(token, root % 12, &intervals))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chords(tokens: &[ProgressionToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.chord.as_str()).collect()
    }

    #[test]
    fn test_two_five_one_in_c() {
        let result = parse_progression("ii-V-I", 0, KeyQuality::Major);
        assert_eq!(result.len(), 3);
        assert_eq!(chords(&result), vec!["Dm", "G", "C"]);
        assert_eq!(
            result.iter().map(|t| t.deg()).collect::<Vec<_>>(),
            vec![1, 4, 0]
        );
        assert_eq!(result[0].role_name(), Some("Supertonic"));
        assert_eq!(result[1].role_name(), Some("Dominant"));
        assert_eq!(result[2].role_name(), Some("Tonic"));
    }

    #[test]
    fn test_minor_auto_detection() {
        let result = parse_progression("i-iv-v", 0, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["Cm", "Fm", "Gm"]);
        assert_eq!(detect_key_quality("i-iv-v", KeyQuality::Major), KeyQuality::Minor);
    }

    #[test]
    fn test_minor_detection_is_global() {
        // Both "i" and "I" present: stays major
        assert_eq!(detect_key_quality("i-I-V", KeyQuality::Major), KeyQuality::Major);
        // "i" with an uppercase V: minor, and V keeps its uppercase quality
        let result = parse_progression("i-VI-VII-i", 9, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["Am", "F", "G", "Am"]);
        // Extension letters count too: "imaj7" reduces to "i"
        assert_eq!(detect_key_quality("imaj7-IV", KeyQuality::Major), KeyQuality::Minor);
    }

    #[test]
    fn test_requested_minor_is_kept() {
        let result = parse_progression("I-III", 0, KeyQuality::Minor);
        assert_eq!(chords(&result), vec!["C", "D#"]);
    }

    #[test]
    fn test_lowercase_m_is_not_doubled() {
        let result = parse_progression("ivm7", 0, KeyQuality::Major);
        assert_eq!(result[0].chord, "Fm7");
        assert_eq!(result[0].quality, "");
        assert_eq!(result[0].extension, "m7");
    }

    #[test]
    fn test_flat_two() {
        let result = parse_progression("bII-V7", 0, KeyQuality::Major);
        assert_eq!(result[0].root, Some(1));
        assert_eq!(result[0].quality, "");
        assert_eq!(result[0].chord, "C#");
        assert_eq!(result[0].deg(), 1);
        assert_eq!(result[1].chord, "G7");
    }

    #[test]
    fn test_sharp_and_wrap_below_root() {
        let result = parse_progression("#iv-bI", 0, KeyQuality::Major);
        assert_eq!(result[0].chord, "F#m");
        assert_eq!(result[1].root, Some(11));
        assert_eq!(result[1].chord, "B");
    }

    #[test]
    fn test_uppercase_b_is_consumed_without_shift() {
        let result = parse_progression("BII", 0, KeyQuality::Major);
        assert_eq!(result[0].chord, "D");
        assert_eq!(result[0].deg(), 1);
    }

    #[test]
    fn test_unresolved_tokens_do_not_stop_parsing() {
        let result = parse_progression("I-x-viii-Bdim-V", 0, KeyQuality::Major);
        assert_eq!(result.len(), 5);
        assert_eq!(chords(&result), vec!["C", "?", "?", "?", "G"]);
        for token in &result[1..4] {
            assert!(!token.is_resolved());
            assert_eq!(token.deg(), -1);
            assert!(token.role.is_none());
            assert!(token.role_description().is_none());
        }
        assert_eq!(result[1].text, "x");
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        let result = parse_progression("--I- -V--", 0, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["C", "G"]);
        assert!(parse_progression("", 0, KeyQuality::Major).is_empty());
    }

    #[test]
    fn test_whitespace_around_tokens() {
        let result = parse_progression(" vi - IV ", 7, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["Em", "C"]);
        assert_eq!(result[0].text, " vi ");
    }

    #[test]
    fn test_quality_markers() {
        let result = parse_progression("vii°-iiø7-V+-Iaug-viidim7-iim7b5", 0, KeyQuality::Major);
        assert_eq!(
            chords(&result),
            vec!["Bdim", "Dm7b57", "Gaug", "Caug", "Bdim7", "Dm7b5"]
        );
    }

    #[test]
    fn test_markers_ignore_case() {
        let result = parse_progression("viiDIM-IIØ", 0, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["Bdim", "Dm7b5"]);
    }

    #[test]
    fn test_sus_clears_quality() {
        let result = parse_progression("Isus4-iisus2", 0, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["Csus4", "Dsus2"]);
    }

    #[test]
    fn test_rule_half_diminished() {
        let o = half_diminished(false, "ø7").unwrap();
        assert_eq!(o.quality, "m7b5");
        assert_eq!(o.extension, "7");
        assert!(half_diminished(false, "7").is_none());
    }

    #[test]
    fn test_rule_diminished() {
        let o = diminished(true, "°7").unwrap();
        assert_eq!(o.quality, "dim");
        assert_eq!(o.extension, "7");
        assert!(diminished(true, "maj7").is_none());
    }

    #[test]
    fn test_rule_augmented() {
        let o = augmented(true, "+aug").unwrap();
        assert_eq!(o.quality, "aug");
        assert_eq!(o.extension, "");
    }

    #[test]
    fn test_rule_suspended() {
        let o = suspended(false, "SUS4").unwrap();
        assert_eq!(o.quality, "");
        assert_eq!(o.extension, "SUS4");
        assert!(suspended(false, "7").is_none());
    }

    #[test]
    fn test_rule_lowercase_minor_dedup() {
        assert!(lowercase_minor_dedup(false, "m7").is_some());
        assert!(lowercase_minor_dedup(false, "M7").is_some());
        assert!(lowercase_minor_dedup(true, "m7").is_none());
        assert!(lowercase_minor_dedup(false, "7").is_none());
    }

    #[test]
    fn test_rule_precedence() {
        // Half-diminished wins over diminished
        assert_eq!(resolve_quality(false, "ødim").0, "m7b5");
        // Diminished wins over augmented and sus
        assert_eq!(resolve_quality(true, "dim+sus").0, "dim");
        // Augmented wins over sus
        assert_eq!(resolve_quality(true, "+sus4").0, "aug");
        // Nothing fires: case default
        assert_eq!(resolve_quality(true, "7"), ("", "7".to_string()));
        assert_eq!(resolve_quality(false, "7"), ("m", "7".to_string()));
    }

    #[test]
    fn test_markers_are_stripped_everywhere() {
        assert_eq!(diminished(true, "dim7dim").unwrap().extension, "7");
        assert_eq!(diminished(true, "°7°").unwrap().extension, "7");
        assert_eq!(half_diminished(false, "M7B5add9").unwrap().extension, "add9");
        assert_eq!(augmented(true, "AUG+9").unwrap().extension, "9");
    }

    #[test]
    fn test_line_break_in_extension_is_unresolved() {
        let result = parse_progression("I7\r9-ii\n7-V", 0, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["?", "?", "G"]);
        assert!(!result[0].is_resolved());
        assert_eq!(result[1].text, "ii\n7");
        assert!(split_numeral("V\u{2028}").is_none());

        // trailing line breaks are trimmed with the rest of the whitespace
        let result = parse_progression("I7\n", 0, KeyQuality::Major);
        assert_eq!(chords(&result), vec!["C7"]);
    }

    #[test]
    fn test_split_numeral() {
        let parts = split_numeral("bVII7").unwrap();
        assert_eq!(parts.accidental, Some('b'));
        assert_eq!(parts.body, "VII");
        assert_eq!(parts.extension, "7");

        let parts = split_numeral("viv").unwrap();
        assert_eq!(parts.body, "viv");
        assert!(parts.degree().is_none());

        let parts = split_numeral("BII").unwrap();
        assert_eq!(parts.accidental, Some('B'));
        assert_eq!(parts.shift(), 0);

        assert!(split_numeral("Bdim").is_none());
        assert!(split_numeral("b").is_none());
        assert!(split_numeral("7").is_none());
        assert!(split_numeral("").is_none());
    }

    #[test]
    fn test_parse_is_pure() {
        let a = parse_progression("I-vi-IV-V", 2, KeyQuality::Major);
        let b = parse_progression("I-vi-IV-V", 2, KeyQuality::Major);
        assert_eq!(a, b);
        assert_eq!(chords(&a), vec!["D", "Bm", "G", "A"]);
    }
}
