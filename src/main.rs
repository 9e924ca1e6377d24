use clap::Parser;
use log::{info, warn};

use quiztrainer::cli::Cli;
use quiztrainer::config::Config;
use quiztrainer::export;
use quiztrainer::gate::Gate;
use quiztrainer::model::{QuestionSet, StatsRecord};
use quiztrainer::persist::FileStore;
use quiztrainer::source::{self, LoadFailure};
use quiztrainer::state::{AppState, Screen};
use quiztrainer::stats;
use quiztrainer::tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // The TUI owns the terminal, so logging stays off unless asked for.
    if std::env::var_os("RUST_LOG").is_some() {
        pretty_env_logger::init();
    }
    let cli = Cli::parse();

    // Handle --write-manifest
    if let Some(dir) = &cli.write_manifest {
        let (path, count) = export::write_manifest(dir).map_err(|e| e.to_string())?;
        eprintln!("Wrote {} ({} files).", path.display(), count);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let mut store = open_store(&cli, &config)?;

    // Handle --reset-stats
    if cli.reset_stats {
        stats::reset_stats(&mut store).map_err(|e| format!("Cannot reset stats: {}", e))?;
        eprintln!("Stats cleared.");
    }

    let preset_name = cli.name.clone().or_else(|| config.user_name.clone());

    // Handle --stats
    if cli.stats {
        let record = stats::read_stats(&store, preset_name.as_deref().unwrap_or(""));
        print_stats(&record);
        return Ok(());
    }

    let paths = if cli.paths.is_empty() {
        config.question_dirs.clone()
    } else {
        cli.paths.clone()
    };
    let report = source::load_sources(&paths);
    let mut notices: Vec<String> = report.failures.iter().map(describe_failure).collect();
    if report.sets.is_empty() {
        if !paths.is_empty() {
            notices.push("No usable question sets found, using the built-in sample.".to_string());
        }
        info!("falling back to the built-in sample set");
    }
    let sets = report.into_sets_or_sample();

    let selected = match &cli.set {
        Some(name) => sets
            .iter()
            .position(|s| &s.name == name)
            .ok_or_else(|| format!("No question set named '{}' (see --list)", name))?,
        None => 0,
    };

    // Handle --list
    if cli.list {
        print_sets(&sets, &notices);
        return Ok(());
    }

    // Handle --export
    if let Some(path) = &cli.export {
        export::export_set(&sets[selected], path).map_err(|e| e.to_string())?;
        eprintln!("Exported '{}' to {}", sets[selected].name, path.display());
        return Ok(());
    }

    let gate = Gate::new(config.passcode.clone());

    // A preset name signs in directly when there is no passcode to ask for.
    // Otherwise an earlier sign-in is reused, or the gate screen is shown.
    let user = match preset_name.as_deref() {
        Some(name) if !gate.requires_passcode() => {
            Some(gate.enter(&mut store, "", name).map_err(|e| e.to_string())?)
        }
        _ => gate.remembered_user(&store).unwrap_or_else(|e| {
            warn!("cannot read sign-in data: {}", e);
            None
        }),
    };

    let count = cli
        .count
        .unwrap_or(config.default_count as i64)
        .max(1) as usize;
    let mut state = AppState::new(sets, gate, count);
    state.select_set(selected);
    state.notices = notices;

    match user {
        Some(name) => {
            state.stats = stats::read_stats(&store, &name);
            state.user_name = name;
            state.screen = Screen::Setup;
        }
        None => {
            state.gate_name = preset_name.unwrap_or_default();
        }
    }

    tui::run_tui(state, &mut store)?;

    Ok(())
}

fn open_store(cli: &Cli, config: &Config) -> Result<FileStore, String> {
    match cli.data_dir.as_ref().or(config.data_dir.as_ref()) {
        Some(dir) => Ok(FileStore::new(dir)),
        None => FileStore::open_default().map_err(|e| e.to_string()),
    }
}

fn describe_failure(failure: &LoadFailure) -> String {
    format!("{}: {}", failure.source, failure.error)
}

fn print_sets(sets: &[QuestionSet], notices: &[String]) {
    for set in sets {
        println!("{:<24} {:>5} questions  {}", set.name, set.len(), set.title);
    }
    for notice in notices {
        eprintln!("Warning: {}", notice);
    }
}

fn print_stats(record: &StatsRecord) {
    if !record.name.is_empty() {
        println!("User:            {}", record.name);
    }
    println!("Tests taken:     {}", record.tests_taken);
    println!("Correct answers: {} / {}", record.total_correct, record.total_questions);
    println!("Average:         {}%", record.average_percent());
    if let Some(last) = record.last_percent {
        println!("Last test:       {}%", last);
    }
}
