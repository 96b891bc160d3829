use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use leadsheet_eval::{build_report, EvaluationConfig, EvaluatorBuilder, JsonSongSource};

#[derive(Debug, Parser)]
#[command(name = "evaluate_songs")]
#[command(about = "Score cross-version chord annotations against leadsheet ground truth")]
struct Args {
    #[arg(long, env = "LEADSHEET_EVAL_CONFIG")]
    config: Option<PathBuf>,
    /// Overrides `dataset_root` from the config file.
    #[arg(long, env = "LEADSHEET_EVAL_DATASET_ROOT")]
    dataset_root: Option<PathBuf>,
    /// Restrict the run to these songs (repeatable).
    #[arg(long = "song", env = "LEADSHEET_EVAL_SONGS", value_delimiter = ',')]
    songs: Vec<String>,
    #[arg(long, env = "LEADSHEET_EVAL_OFFSET", default_value_t = 0)]
    offset: usize,
    #[arg(long, env = "LEADSHEET_EVAL_LIMIT")]
    limit: Option<usize>,
    /// Keep repeated leadsheet chords instead of merging them.
    #[arg(long, env = "LEADSHEET_EVAL_RAW_LEADSHEET", default_value_t = false)]
    raw_leadsheet: bool,
    #[arg(long, env = "LEADSHEET_EVAL_OUT", default_value = "results/eval.json")]
    out: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run() {
        tracing::error!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let mut config = match args.config.as_ref() {
        Some(path) => EvaluationConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => EvaluationConfig::default(),
    };
    if let Some(root) = args.dataset_root {
        config.dataset_root = root;
    }
    if args.raw_leadsheet {
        config.simplify_leadsheet = false;
    }

    let songs = select_songs(&config, &args.songs, args.offset, args.limit)?;
    let source = JsonSongSource::new(config.material_path());
    let evaluator = EvaluatorBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build evaluator: {err}"))?;

    let progress = ProgressBar::new(songs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let outcomes = evaluator.evaluate_songs(&source, &songs, |outcome| {
        progress.set_message(outcome.song.clone());
        progress.inc(1);
    });
    progress.finish_with_message("evaluation complete");

    let report = build_report(&outcomes, Utc::now());
    report
        .write_json(&args.out)
        .map_err(|err| format!("Failed to write report: {err}"))?;
    println!(
        "{} ({} evaluated, {} failed)",
        args.out.display(),
        report.meta.evaluated_count,
        report.meta.failed_count
    );
    Ok(())
}

fn select_songs(
    config: &EvaluationConfig,
    requested: &[String],
    offset: usize,
    limit: Option<usize>,
) -> Result<Vec<String>, String> {
    let mut songs = config
        .load_song_ids()
        .map_err(|err| format!("Failed to list songs: {err}"))?;

    if !requested.is_empty() {
        let known: HashSet<&str> = songs.iter().map(String::as_str).collect();
        let missing: Vec<&str> = requested
            .iter()
            .map(String::as_str)
            .filter(|song| !known.contains(song))
            .collect();
        if !missing.is_empty() {
            return Err(format!("Unknown song(s): {}", missing.join(", ")));
        }
        songs.retain(|song| requested.contains(song));
    }

    let mut songs: Vec<String> = songs.into_iter().skip(offset).collect();
    if let Some(limit) = limit {
        songs.truncate(limit);
    }
    if songs.is_empty() {
        return Err("No songs selected after applying filters/offset/limit.".to_string());
    }
    require_dir_exists(&config.material_path())?;
    Ok(songs)
}

fn require_dir_exists(path: &Path) -> Result<(), String> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(format!("Missing material directory '{}'.", path.display()))
    }
}
