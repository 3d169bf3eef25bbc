/// 1 局面を SCNS で探索して最善手を出力する。
///
/// # 使用例
///
/// ```shell
/// cargo run -p tools --release --bin scns-think -- \
///   --sfen startpos --moves 2c2b 1a2b --time-ms 1000
/// ```
///
/// `--json` を付けると探索結果（ルートの子ノードごとの訪問回数など）を JSON で出力する。
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as _;
use scns_core::Searcher;
use scns_dobutsu::{MaterialEvaluator, Position};

use tools::config::{Overrides, load_config};
use tools::report::ReportLog;

#[derive(clap::Parser, Debug)]
#[command(about = "search a Dobutsu shogi position with sibling conspiracy number search")]
struct Cli {
    /// Position in SFEN (or "startpos")
    #[arg(long, default_value = "startpos")]
    sfen: String,

    /// Moves to play from the position before searching
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Search config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time budget in milliseconds (overrides the config file)
    #[arg(long)]
    time_ms: Option<u64>,

    /// Iteration limit (overrides the config file)
    #[arg(long)]
    iterations: Option<u64>,

    /// Print the search report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let config = load_config(
        cli.config.as_deref(),
        Overrides {
            time_ms: cli.time_ms,
            iterations: cli.iterations,
        },
    )?;
    let mut pos = Position::from_sfen(&cli.sfen)
        .with_context(|| format!("invalid SFEN: {}", cli.sfen))?;
    pos.play_moves(cli.moves.iter().map(String::as_str))
        .context("failed to apply --moves")?;

    let searcher = Searcher::new(config, MaterialEvaluator)?;
    let report = searcher.search(&pos);

    let mut out = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &ReportLog::from_report(&report))?;
        writeln!(out)?;
    } else {
        writeln!(out, "bestmove {}", report.best_move)?;
    }
    Ok(())
}

fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}
