use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

use jvdrill::catalog::Catalog;
use jvdrill::config::Config;
use jvdrill::engine::history;
use jvdrill::session::practice::PracticeSession;
use jvdrill::session::prompt::{self, TerminalPrompt};
use jvdrill::store::json_store::JsonStore;

#[derive(Parser)]
#[command(
    name = "jvdrill",
    version,
    about = "Japanese verb conjugation drills with adaptive sampling"
)]
struct Cli {
    #[arg(short = 'n', long, help = "Number of verbs to practice")]
    count: Option<usize>,

    #[arg(long, help = "Verb catalog: `kana kanji` per line, `None` for no kanji")]
    verbs: Option<PathBuf>,

    #[arg(long, help = "Form catalog: one of ます, て, た, ない per line")]
    forms: Option<PathBuf>,

    #[arg(long, help = "Directory holding the practice history")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Seed for reproducible sampling")]
    seed: Option<u64>,

    #[arg(long, value_name = "N", help = "Show the N hardest verb/form pairs and exit")]
    stats: Option<usize>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()?;

    let cli = Cli::parse();
    let mut config = Config::load()?;

    if let Some(path) = cli.verbs {
        config.verb_catalog = Some(path);
    }
    if let Some(path) = cli.forms {
        config.form_catalog = Some(path);
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(count) = cli.count {
        config.quiz_length = Some(count);
    }

    if cli.write_config {
        config.save()?;
        println!("Wrote {}", Config::config_path().display());
        return Ok(());
    }

    let catalog = Catalog::load(
        config.verb_catalog.as_deref(),
        config.form_catalog.as_deref(),
    )?;
    let store = JsonStore::with_base_dir(config.data_dir.clone())?;
    let mut session = PracticeSession::open(&catalog, store, config.fresh_weight, config.seed)
        .context("opening practice history")?;

    if let Some(n) = cli.stats {
        print_stats(session.records(), n);
        return Ok(());
    }

    let mut prompt = TerminalPrompt::stdin();

    let rounds = match config.quiz_length {
        Some(rounds) => rounds,
        None => prompt::ask_quiz_length(&mut prompt)?,
    };

    let summary = session.run_quiz(rounds, &mut prompt)?;

    println!();
    println!(
        "{} {}/{} correct ({:.0}%)",
        "Done!".bold(),
        summary.correct,
        summary.rounds,
        summary.accuracy()
    );

    Ok(())
}

fn print_stats(records: &[history::HistoryRecord], n: usize) {
    println!(
        "{:<12} {:<12} {:<4} {:>7} {:>7} {:>7} {:>8}",
        "verb", "kanji", "form", "samples", "errors", "streak", "weight"
    );

    for record in history::hardest(records, n) {
        println!(
            "{:<12} {:<12} {:<4} {:>7} {:>7} {:>7} {:>8.3}",
            record.verb_base,
            record.verb_kanji.as_deref().unwrap_or("-"),
            record.verb_form.as_str(),
            record.sample_count,
            record.error_count,
            record.continue_right_count,
            record.relative_weight
        );
    }
}
