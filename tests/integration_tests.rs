// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for fretlab
//!
//! These tests go through the public API only: the string-keyed entry
//! points, the settings loader and the text reports.

use std::fs;

use fretlab::config::Settings;
use fretlab::report::{self, FretboardView};
use fretlab::theory::{
    build_diatonic_table, generate_fretboard, parse_progression, resolve_intervals, resolve_note,
    KeyQuality, PatternKind, Tuning, VoicingMode,
};
use tempfile::tempdir;

const SHARPS: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

#[test]
fn test_note_names_resolve_in_any_case() {
    for (pc, name) in SHARPS.iter().enumerate() {
        assert_eq!(resolve_note(name) as usize, pc);
        assert_eq!(resolve_note(&name.to_lowercase()) as usize, pc);
        assert_eq!(resolve_note(&format!("  {}\t", name)) as usize, pc);
    }

    for (flat, pc) in [("Db", 1), ("Eb", 3), ("Gb", 6), ("Ab", 8), ("Bb", 10)] {
        assert_eq!(resolve_note(flat), pc);
        assert_eq!(resolve_note(&flat.to_uppercase()), pc);
        assert_eq!(resolve_note(&flat.to_lowercase()), pc);
    }

    assert_eq!(resolve_note("db"), resolve_note("C#"));
    assert_eq!(resolve_note("xyz"), 0);
    assert_eq!(resolve_note(""), 0);
    // only the five listed flats are normalised
    assert_eq!(resolve_note("Cb"), 0);
    assert_eq!(resolve_note("Fb"), 0);
}

#[test]
fn test_interval_resolution() {
    assert_eq!(resolve_intervals("major", false), vec![0, 4, 7]);
    assert_eq!(resolve_intervals("major", true), vec![0, 4, 7, 11, 14]);
    assert_eq!(resolve_intervals("minor", true), vec![0, 3, 7, 10, 14]);
    assert_eq!(resolve_intervals("dorian", true), vec![0, 2, 3, 5, 7, 9, 10]);
    assert_eq!(resolve_intervals("unknown", true), vec![0, 4, 7]);
    assert_eq!(resolve_intervals("MAJOR", false), vec![0, 4, 7]);
}

#[test]
fn test_fretboard_invariants_for_every_combination() {
    for root in 0..12u8 {
        for pattern in PatternKind::ALL {
            let intervals = resolve_intervals(pattern.id(), true);
            let targets: Vec<u8> = intervals.iter().map(|i| (root + i) % 12).collect();

            for tuning in Tuning::ALL {
                let rows = generate_fretboard(root, &intervals, tuning.id(), 21);
                assert_eq!(rows.len(), 6);

                for (s, row) in rows.iter().enumerate() {
                    assert_eq!(row.len(), 22);
                    for (f, cell) in row.iter().enumerate() {
                        assert_eq!(cell.string_index, s);
                        assert_eq!(cell.fret, f);
                        assert_eq!((cell.interval + root) % 12, cell.pitch);
                        assert_eq!(cell.is_root, cell.interval == 0);
                        assert_eq!(cell.is_in_scale, targets.contains(&cell.pitch));
                    }
                }
            }
        }
    }
}

#[test]
fn test_fretboard_c_major_standard() {
    let rows = generate_fretboard(0, &[0, 4, 7], "STD", 21);

    assert_eq!(rows[0][0].note_name(), "E");
    // major third above C
    assert_eq!(rows[0][0].interval, 4);
    assert_eq!(rows[0][8].note_name(), "C");
    assert_eq!(rows[0][8].interval, 0);
    assert!(rows[0][8].is_root);
    assert!(rows[0][8].is_in_scale);

    // low E string is the last row
    assert_eq!(rows[5][5].note_name(), "A");
    assert!(generate_fretboard(0, &[0, 4, 7], "BANJO", 21).is_empty());
}

#[test]
fn test_diatonic_tables() {
    let triads = build_diatonic_table(0, false);
    assert_eq!(triads.len(), 7);
    assert_eq!(triads[0].chords, ["C", "Dm", "Em", "F", "G", "Am", "Bdim"]);
    assert_eq!(triads[0].numerals, ["I", "ii", "iii", "IV", "V", "vi", "vii°"]);

    let sevenths = build_diatonic_table(2, true);
    assert_eq!(sevenths[1].mode, "Dorian");
    assert_eq!(sevenths[1].chords[0], "Dm7");
    assert_eq!(sevenths[1].chords[3], "G7");
}

#[test]
fn test_progression_examples() {
    let two_five_one = parse_progression("ii-V-I", 0, KeyQuality::Major);
    let chords: Vec<&str> = two_five_one.iter().map(|t| t.chord.as_str()).collect();
    assert_eq!(chords, vec!["Dm", "G", "C"]);
    let roles: Vec<_> = two_five_one.iter().map(|t| t.role_name()).collect();
    assert_eq!(roles, vec![Some("Supertonic"), Some("Dominant"), Some("Tonic")]);

    let minor = parse_progression("i-iv-v", 0, KeyQuality::Major);
    assert_eq!(minor[0].deg(), 0);
    assert_eq!(minor[0].chord, "Cm");

    let ivm7 = parse_progression("ivm7", 0, KeyQuality::Major);
    assert_eq!(ivm7[0].chord, "Fm7");

    let neapolitan = parse_progression("bII-V7", 0, KeyQuality::Major);
    assert_eq!(neapolitan[0].root, Some(1));
    assert_eq!(neapolitan[0].chord, "C#");
    assert_eq!(neapolitan[0].quality, "");
    assert_eq!(neapolitan[1].chord, "G7");
}

#[test]
fn test_progression_unresolved_tokens() {
    let result = parse_progression("I--foo-V", 7, KeyQuality::Major);
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].chord, "G");
    assert_eq!(result[1].chord, "?");
    assert_eq!(result[1].deg(), -1);
    assert!(result[1].role.is_none());
    assert_eq!(result[2].chord, "D");

    assert!(parse_progression("", 0, KeyQuality::Major).is_empty());
}

#[test]
fn test_core_is_pure() {
    assert_eq!(
        generate_fretboard(3, &[0, 3, 7], "FACGCE", 24),
        generate_fretboard(3, &[0, 3, 7], "FACGCE", 24)
    );
    assert_eq!(build_diatonic_table(8, true), build_diatonic_table(8, true));
    assert_eq!(
        parse_progression("i-bVI-bVII", 9, KeyQuality::Minor),
        parse_progression("i-bVI-bVII", 9, KeyQuality::Minor)
    );
}

#[test]
fn test_settings_file_drives_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.yaml");
    fs::write(
        &path,
        "root: A\npattern: pent_min\ntuning: DADGAD\nvoicing: all\nfret_count: 12\n",
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert!(settings.validate().is_ok());

    let rows = generate_fretboard(
        settings.root_pc(),
        &settings.intervals(),
        &settings.tuning,
        settings.frets(),
    );
    assert_eq!(rows[0].len(), 13);
    // open D is the 4th of A minor pentatonic
    assert!(rows[0][0].is_in_scale);

    let board = fretlab::theory::Fretboard::generate(
        settings.root_pc(),
        &settings.intervals(),
        settings.tuning(),
        settings.frets(),
    );
    let text = report::fretboard(
        &board,
        FretboardView {
            voicing: settings.voicing_mode(),
            show_intervals: true,
            show_all: false,
        },
    );
    assert_eq!(text.lines().count(), 8);
    assert!(text.lines().nth(2).unwrap().starts_with("D |  4  ||"));
}

#[test]
fn test_settings_validation_through_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "root = \"Q\"\ntuning = \"DROP_D\"\nvoicing = \"shells\"\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    let errors = settings.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(settings.voicing_mode(), VoicingMode::Shells);
}

#[test]
fn test_progression_report_minor_key() {
    let text = report::progression("i-iv-v", 0, KeyQuality::Major);
    assert!(text.starts_with("Key: C minor"));
    assert!(text.contains("Cm"));
    assert!(text.contains("Fm"));
    assert!(text.contains("Gm"));
}
