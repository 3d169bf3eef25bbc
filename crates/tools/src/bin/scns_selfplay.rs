/// SCNS 同士の自己対局。
///
/// 1手ごとに 1 行、最後に対局結果を 1 行、JSONL 形式で出力する（`--out` 省略時は標準出力）。
///
/// # 使用例
///
/// ```shell
/// cargo run -p tools --release --bin scns-selfplay -- \
///   --time-ms 500 --max-plies 100 --out runs/selfplay.jsonl
/// ```
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as _;
use scns_core::Searcher;
use scns_dobutsu::{MaterialEvaluator, Position};
use serde::Serialize;

use tools::config::{Overrides, load_config};
use tools::report::ReportLog;
use tools::selfplay::{GameConfig, MoveEvent, run_game, side_label};

#[derive(clap::Parser, Debug)]
#[command(about = "self-play games of sibling conspiracy number search on Dobutsu shogi")]
struct Cli {
    /// Start position in SFEN (or "startpos")
    #[arg(long, default_value = "startpos")]
    sfen: String,

    /// Search config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time budget per move in milliseconds (overrides the config file)
    #[arg(long)]
    time_ms: Option<u64>,

    /// Iteration limit per move (overrides the config file)
    #[arg(long)]
    iterations: Option<u64>,

    /// Maximum plies per game
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Output JSONL file (stdout if omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct MoveLog<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    ply: u32,
    side_to_move: char,
    sfen_before: &'a str,
    move_usi: &'a str,
    search: &'a ReportLog,
}

#[derive(Serialize)]
struct ResultLog<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    outcome: &'a str,
    reason: &'a str,
    plies: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    let config = load_config(
        cli.config.as_deref(),
        Overrides {
            time_ms: cli.time_ms,
            iterations: cli.iterations,
        },
    )?;
    let start = Position::from_sfen(&cli.sfen)
        .with_context(|| format!("invalid SFEN: {}", cli.sfen))?;
    let searcher = Searcher::new(config, MaterialEvaluator)?;

    let mut writer: Box<dyn Write> = match &cli.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut write_error = None;
    let mut on_move = |event: &MoveEvent| {
        if write_error.is_some() {
            return;
        }
        let log = MoveLog {
            kind: "move",
            ply: event.ply,
            side_to_move: side_label(event.side),
            sfen_before: &event.sfen_before,
            move_usi: &event.move_usi,
            search: &event.search,
        };
        if let Err(e) = write_jsonl(&mut writer, &log) {
            write_error = Some(e);
        }
    };
    let result = run_game(
        &searcher,
        &start,
        &GameConfig {
            max_plies: cli.max_plies,
        },
        &mut on_move,
    )?;
    if let Some(e) = write_error {
        return Err(e);
    }

    write_jsonl(
        &mut writer,
        &ResultLog {
            kind: "result",
            outcome: result.outcome.label(),
            reason: &result.reason,
            plies: result.plies,
        },
    )?;
    writer.flush()?;
    Ok(())
}

fn write_jsonl<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
