// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::io;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use fretlab::config::Settings;
use fretlab::report::{self, FretboardView};
use fretlab::theory::{resolve_intervals, ChordSet, Fretboard, KeyQuality, Note, PatternKind, Tuning};
use fretlab::ui::{App, ExplorerState};

fn print_usage() {
    println!("fretlab - Scales, chords and progressions on the fretboard");
    println!();
    println!("Usage: fretlab [--config FILE] [COMMAND]");
    println!();
    println!("Commands:");
    println!("  --fretboard [ROOT] [PATTERN] [TUNING]  Print the fretboard as text");
    println!("  --modes [ROOT] [--sevenths]            Print diatonic chords of every mode");
    println!("  --progression PROG [ROOT] [--minor]    Analyse a Roman-numeral progression");
    println!("  --list                                 List patterns, tunings and voicings");
    println!("  --check FILE                           Validate a settings file");
    println!("  --help                                 Show this help message");
    println!();
    println!("With no command the interactive explorer starts.");
    println!("Settings files may be YAML (.yaml, .yml) or TOML (.toml).");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Split `--config FILE` out of the argument list
fn take_config(args: &mut Vec<String>) -> Result<Option<String>> {
    match args.iter().position(|a| a == "--config") {
        Some(idx) => {
            if idx + 1 >= args.len() {
                return Err(anyhow!("--config requires a file path"));
            }
            let path = args.remove(idx + 1);
            args.remove(idx);
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Switches accepted after a command; everything else is positional
const FLAGS: [&str; 2] = ["--minor", "--sevenths"];

/// Separate known flags from positional arguments, keeping order
fn split_flags(args: &[String]) -> (Vec<&str>, Vec<&str>) {
    args.iter()
        .map(String::as_str)
        .partition(|a| FLAGS.contains(a))
}

fn parse_root(name: &str) -> Result<Note> {
    Note::from_name(name).ok_or_else(|| anyhow!("Unknown root note: {}", name))
}

fn print_fretboard(settings: &Settings, args: &[&str]) -> Result<()> {
    let root = match args.first() {
        Some(name) => parse_root(name)?,
        None => Note::from_pitch_class(settings.root_pc()),
    };
    let pattern = match args.get(1) {
        Some(name) => PatternKind::from_name(name)
            .ok_or_else(|| anyhow!("Unknown pattern: {} (see --list)", name))?,
        None => settings.pattern_kind(),
    };
    let tuning = match args.get(2) {
        Some(name) => Tuning::from_name(name)
            .ok_or_else(|| anyhow!("Unknown tuning: {} (see --list)", name))?,
        None => settings.tuning(),
    };

    let intervals = resolve_intervals(pattern.id(), settings.extended);
    let board = Fretboard::generate(root.pitch_class(), &intervals, tuning, settings.frets());
    let view = FretboardView {
        voicing: settings.voicing_mode(),
        show_intervals: settings.show_intervals,
        show_all: settings.show_all_notes,
    };

    println!("{} ({})", report::pattern_summary(root.pitch_class(), pattern, &intervals), tuning);
    println!();
    print!("{}", report::fretboard(&board, view));
    let sets = report::string_sets(view.voicing);
    if !sets.is_empty() {
        println!();
        println!("{}", view.voicing.label());
        print!("{}", sets);
    }
    Ok(())
}

fn print_modes(settings: &Settings, args: &[&str], flags: &[&str]) -> Result<()> {
    let root = match args.first() {
        Some(name) => parse_root(name)?,
        None => Note::from_pitch_class(settings.root_pc()),
    };
    let chord_set = if flags.contains(&"--sevenths") {
        ChordSet::Sevenths
    } else {
        settings.chord_set()
    };

    print!("{}", report::diatonic(root.pitch_class(), chord_set));
    Ok(())
}

fn print_progression(settings: &Settings, args: &[&str], flags: &[&str]) -> Result<()> {
    let text = args
        .first()
        .ok_or_else(|| anyhow!("--progression requires a progression such as ii-V-I"))?;
    let root = match args.get(1) {
        Some(name) => parse_root(name)?,
        None => Note::from_pitch_class(settings.root_pc()),
    };
    let key_quality = if flags.contains(&"--minor") {
        KeyQuality::Minor
    } else {
        settings.key_quality()
    };

    print!("{}", report::progression(text, root.pitch_class(), key_quality));
    Ok(())
}

fn check_settings(path: &str) -> Result<()> {
    let settings = Settings::load(path)?;
    match settings.validate() {
        Ok(()) => {
            println!("{}: OK", path);
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {}", path, error);
            }
            Err(anyhow!("{} problem(s) found in {}", errors.len(), path))
        }
    }
}

fn run_explorer(settings: &Settings) -> Result<()> {
    let mut app = App::new(ExplorerState::from_settings(settings))
        .context("Failed to initialise terminal")?;
    app.run().context("Terminal UI error")
}

fn main() -> Result<()> {
    init_logging();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let settings = match take_config(&mut args)? {
        Some(path) => {
            let settings = Settings::load(&path)?;
            if let Err(errors) = settings.validate() {
                for error in errors {
                    tracing::warn!(%error, "settings problem, using fallback");
                }
            }
            settings
        }
        None => Settings::default(),
    };

    let Some(command) = args.first().map(String::as_str) else {
        return run_explorer(&settings);
    };
    let (flags, positional) = split_flags(&args[1..]);

    match command {
        "--fretboard" => print_fretboard(&settings, &positional)?,
        "--modes" => print_modes(&settings, &positional, &flags)?,
        "--progression" => print_progression(&settings, &positional, &flags)?,
        "--list" => print!("{}", report::catalogue()),
        "--check" => {
            let path = positional
                .first()
                .ok_or_else(|| anyhow!("--check requires a settings file"))?;
            check_settings(path)?;
        }
        "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown option: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
