// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session settings for fretlab.
//!
//! A settings file picks the starting root, pattern, tuning and display
//! options for the explorer and the text reports. Files may be YAML or
//! TOML; the format is chosen from the file extension. Every field is
//! optional and falls back to the defaults below.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theory::{
    resolve_intervals, resolve_note, ChordSet, KeyQuality, Note, PatternKind, PitchClass, Tuning,
    VoicingMode, DEFAULT_FRET_COUNT,
};

/// Largest fret count a settings file may ask for
pub const MAX_FRET_COUNT: usize = 24;

/// Problems found while validating settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown root note: {0:?}")]
    UnknownRoot(String),
    #[error("unknown pattern: {0:?}")]
    UnknownPattern(String),
    #[error("unknown tuning: {0:?}")]
    UnknownTuning(String),
    #[error("unknown voicing: {0:?}")]
    UnknownVoicing(String),
    #[error("unknown chord set: {0:?} (expected triads or sevenths)")]
    UnknownChordSet(String),
    #[error("unknown key quality: {0:?} (expected major or minor)")]
    UnknownKeyQuality(String),
    #[error("fret count {0} is outside 1..=24")]
    FretCount(usize),
    #[error("unsupported settings file extension: {0:?}")]
    UnsupportedFormat(String),
}

/// On-disk settings formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Yaml,
    Toml,
}

impl SettingsFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(SettingsFormat::Yaml),
            "toml" => Ok(SettingsFormat::Toml),
            _ => Err(SettingsError::UnsupportedFormat(ext)),
        }
    }
}

/// One explorer session's starting state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root note name (e.g. "C", "F#", "Bb")
    pub root: String,
    /// Pattern identifier (e.g. "major", "scale_maj", "dorian")
    pub pattern: String,
    /// Add the 7th and 9th to plain major/minor triads
    pub extended: bool,
    /// Tuning identifier: STD, B, DADGAD or FACGCE
    pub tuning: String,
    /// Voicing filter: all, triads_close, triads_spread or shells
    pub voicing: String,
    pub fret_count: usize,
    /// Label notes with intervals instead of note names
    pub show_intervals: bool,
    /// Show notes outside the pattern as well
    pub show_all_notes: bool,
    /// Diatonic table contents: triads or sevenths
    pub chord_set: String,
    /// Roman-numeral progression to analyse
    pub progression: String,
    /// Key quality for the progression: major or minor
    pub key_quality: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: "C".to_string(),
            pattern: PatternKind::Major.id().to_string(),
            extended: false,
            tuning: Tuning::Standard.id().to_string(),
            voicing: VoicingMode::All.id().to_string(),
            fret_count: DEFAULT_FRET_COUNT,
            show_intervals: false,
            show_all_notes: false,
            chord_set: "triads".to_string(),
            progression: "ii-V-I".to_string(),
            key_quality: KeyQuality::Major.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path)?;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        let settings = match format {
            SettingsFormat::Yaml => Self::from_yaml(&contents),
            SettingsFormat::Toml => Self::from_toml(&contents),
        }
        .with_context(|| format!("Invalid settings file: {:?}", path))?;

        tracing::info!(
            path = %path.display(),
            root = %settings.root,
            pattern = %settings.pattern,
            tuning = %settings.tuning,
            "loaded settings"
        );
        Ok(settings)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Save settings, using the format implied by the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = match SettingsFormat::from_path(path)? {
            SettingsFormat::Yaml => self.to_yaml()?,
            SettingsFormat::Toml => self.to_toml()?,
        };
        fs::write(path, text).with_context(|| format!("Failed to write settings file: {:?}", path))
    }

    /// Check every field, reporting all problems at once
    pub fn validate(&self) -> Result<(), Vec<SettingsError>> {
        let mut errors = Vec::new();

        if Note::from_name(&self.root).is_none() {
            errors.push(SettingsError::UnknownRoot(self.root.clone()));
        }
        if PatternKind::from_name(&self.pattern).is_none() {
            errors.push(SettingsError::UnknownPattern(self.pattern.clone()));
        }
        if Tuning::from_name(&self.tuning).is_none() {
            errors.push(SettingsError::UnknownTuning(self.tuning.clone()));
        }
        if VoicingMode::from_name(&self.voicing).is_none() {
            errors.push(SettingsError::UnknownVoicing(self.voicing.clone()));
        }
        if ChordSet::from_name(&self.chord_set).is_none() {
            errors.push(SettingsError::UnknownChordSet(self.chord_set.clone()));
        }
        if KeyQuality::from_name(&self.key_quality).is_none() {
            errors.push(SettingsError::UnknownKeyQuality(self.key_quality.clone()));
        }
        if !(1..=MAX_FRET_COUNT).contains(&self.fret_count) {
            errors.push(SettingsError::FretCount(self.fret_count));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Root pitch class; unknown names resolve to C
    pub fn root_pc(&self) -> PitchClass {
        resolve_note(&self.root)
    }

    /// Pattern intervals with the `extended` flag applied
    pub fn intervals(&self) -> Vec<u8> {
        resolve_intervals(&self.pattern, self.extended)
    }

    pub fn pattern_kind(&self) -> PatternKind {
        PatternKind::from_name(&self.pattern).unwrap_or(PatternKind::Major)
    }

    pub fn tuning(&self) -> Tuning {
        Tuning::from_name(&self.tuning).unwrap_or(Tuning::Standard)
    }

    pub fn voicing_mode(&self) -> VoicingMode {
        VoicingMode::from_name(&self.voicing).unwrap_or_default()
    }

    pub fn chord_set(&self) -> ChordSet {
        ChordSet::from_name(&self.chord_set).unwrap_or_default()
    }

    pub fn key_quality(&self) -> KeyQuality {
        KeyQuality::from_name(&self.key_quality).unwrap_or_default()
    }

    /// Fret count clamped into the supported range
    pub fn frets(&self) -> usize {
        self.fret_count.clamp(1, MAX_FRET_COUNT)
    }
}
