//! bpselect CLI Module
//!
//! Command-line interface for cleaning the survey export and running the
//! windowed best-subset model search.

use clap::{Parser, Subcommand};
use colored::*;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::data::{
    one_hot_encode, separate_target, train_test_split, DataLoader, FeatureMatrix, SurveyCleaner,
};
use crate::report::tabularize;
use crate::search::{Criterion, SearchConfig, SubsetSearch};
use crate::training::{ModelKind, TreeParams};
use ndarray::Array1;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "bpselect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Blood-pressure survey preparation and best-subset model selection")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the survey, fit models over every contiguous feature window, and
    /// report the best one
    Search {
        /// Survey CSV export
        #[arg(short, long)]
        data: PathBuf,

        /// Target column name
        #[arg(short, long, default_value = "messwert_bp_sys")]
        target: String,

        /// Model kind (decision_tree, random_forest)
        #[arg(short, long, default_value = "decision_tree")]
        model: String,

        /// Selection criterion (mse, r2, adjusted_r_2)
        #[arg(short, long, default_value = "mse")]
        criterion: String,

        /// Fraction of rows held out for testing
        #[arg(long, default_value = "0.2")]
        test_split: f64,

        /// Seed for the row shuffle that fixes the train/test boundary
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Columns dropped after cleaning, comma separated
        #[arg(long, value_delimiter = ',', default_value = "zeit,geburtsjahr")]
        drop: Vec<String>,

        /// Maximum tree depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Number of trees for the random forest
        #[arg(long, default_value = "100")]
        n_estimators: usize,

        /// Seed for the forest's bootstrap sampling
        #[arg(long)]
        model_seed: Option<u64>,

        /// 0 = silent, 1 = final result, 2 = every trial
        #[arg(short, long, default_value = "1")]
        verbosity: u8,

        /// Save the winning model as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a summary of the cleaned survey frame
    Info {
        /// Survey CSV export
        #[arg(short, long)]
        data: PathBuf,
    },
}

// ─── Shared pipeline ───────────────────────────────────────────────────────────

struct PreparedData {
    train_x: FeatureMatrix,
    test_x: FeatureMatrix,
    train_y: Array1<f64>,
    test_y: Array1<f64>,
}

fn prepare(
    data_path: &Path,
    target: &str,
    drop: &[String],
    seed: u64,
    test_split: f64,
) -> anyhow::Result<PreparedData> {
    step_run("Loading data");
    let start = Instant::now();
    let raw = DataLoader::new().load_csv(
        data_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("non-UTF8 path"))?,
    )?;
    step_done(&format!(
        "{} rows × {} cols in {:?}",
        raw.height(),
        raw.width(),
        start.elapsed()
    ));

    step_run("Cleaning");
    let start = Instant::now();
    let cleaned = SurveyCleaner::new()
        .with_filter_columns(drop.to_vec())
        .with_shuffle_seed(seed)
        .clean(&raw)?;
    step_done(&format!("{} rows kept in {:?}", cleaned.df.height(), start.elapsed()));

    step_run("Encoding");
    let encoded = one_hot_encode(&cleaned.df, &cleaned.categorical, &cleaned.numeric)?;
    step_done(&format!("{} feature columns", encoded.width() - 1));

    let (x, y) = separate_target(&encoded, target)?;
    let (train_x, test_x, train_y, test_y) = train_test_split(&x, &y, test_split)?;

    Ok(PreparedData {
        train_x,
        test_x,
        train_y,
        test_y,
    })
}

// ─── Commands ──────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn cmd_search(
    data_path: &Path,
    target: &str,
    model: &str,
    criterion: &str,
    test_split: f64,
    seed: u64,
    drop: &[String],
    max_depth: Option<usize>,
    n_estimators: usize,
    model_seed: Option<u64>,
    verbosity: u8,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    section("Search");

    let criterion: Criterion = criterion.parse()?;
    // Model kind parsing never fails; unrecognized names skip every trial
    let kind: ModelKind = model.parse().unwrap_or(ModelKind::Unsupported);

    let mut params = TreeParams::default().with_n_estimators(n_estimators);
    if let Some(depth) = max_depth {
        params = params.with_max_depth(depth);
    }
    if let Some(s) = model_seed {
        params = params.with_random_seed(s);
    }
    let params = params.validated()?;

    let prepared = prepare(data_path, target, drop, seed, test_split)?;

    step_run(&format!("Searching with {}", model.cyan()));
    let start = Instant::now();
    let search = SubsetSearch::new(SearchConfig {
        criterion,
        model: kind,
        params,
        verbosity,
    });
    let features = prepared.train_x.names().to_vec();
    let best = search.run(
        &features,
        &prepared.train_x,
        &prepared.train_y,
        &prepared.test_x,
        &prepared.test_y,
    )?;
    step_done(&format!("{:?}", start.elapsed()));

    match best {
        Some(trial) => {
            println!();
            println!("  {:<16} {}", muted("Features"), trial.features.join(", ").white());
            println!(
                "  {:<16} {}",
                muted("Criterion"),
                format!("{} = {:.4}", criterion.as_str(), trial.criterion_value)
                    .white()
                    .bold()
            );
            println!();

            let table = tabularize(
                &[trial.model.label().to_string()],
                &[trial.train_report],
                &[trial.test_report],
            )?;
            println!("{}", table);

            if let Some(path) = output {
                let path = path
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("non-UTF8 path"))?;
                trial.model.save(path)?;
                println!("  {} saved model to {}", ok("✓"), path);
            }
        }
        None => {
            println!();
            println!("  {}", "no candidate found".yellow());
            println!();
        }
    }

    Ok(())
}

pub fn cmd_info(data_path: &Path) -> anyhow::Result<()> {
    section("Info");

    step_run("Loading data");
    let raw = DataLoader::new().load_csv(
        data_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("non-UTF8 path"))?,
    )?;
    step_done(&format!("{} rows × {} cols", raw.height(), raw.width()));

    step_run("Cleaning");
    let cleaned = SurveyCleaner::new().clean(&raw)?;
    step_done(&format!("{} rows kept", cleaned.df.height()));

    println!();
    println!("  {:<16} {}", muted("Categorical"), cleaned.categorical.join(", "));
    println!("  {:<16} {}", muted("Numeric"), cleaned.numeric.join(", "));
    println!();
    print_head(&cleaned.df);

    Ok(())
}

fn print_head(df: &DataFrame) {
    println!("{}", df.head(Some(5)));
}
