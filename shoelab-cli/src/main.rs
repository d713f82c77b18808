//! shoelab CLI: interactive result entry, replay and config commands.
//!
//! Commands:
//! - `play`: enter results one at a time and read back the recommendation
//! - `replay`: feed a whole result string, print the table, optionally export
//! - `config`: print the effective configuration as TOML

mod export;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shoelab_core::config::EngineConfig;
use shoelab_core::domain::{GameLabel, Outcome};
use shoelab_core::engine::{RoundRecord, RoundTable};
use shoelab_core::session::{SessionBook, Summary};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use export::{export_summary_json, export_table_csv};

#[derive(Parser)]
#[command(
    name = "shoelab",
    about = "shoelab: transition indicators and bet recommendations for Player/Banker/Tie shoes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: type p, b or t after every round.
    Play {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Game label to start on.
        #[arg(long, default_value = "G1")]
        game: String,
    },
    /// Replay a recorded shoe such as "PBPPBT" (spaces and commas ignored).
    Replay {
        results: String,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the full table to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the summary as JSON instead of a text table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the configuration (defaults, or the given file after validation).
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { config, game } => run_play(config.as_deref(), &game),
        Commands::Replay {
            results,
            config,
            csv,
            json,
        } => run_replay(&results, config.as_deref(), csv.as_deref(), json),
        Commands::Config { config } => {
            print!("{}", load_config(config.as_deref())?.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shoelab=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

/// Parse a compact result string. Whitespace and commas are separators.
fn parse_results(input: &str) -> Result<Vec<Outcome>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .enumerate()
        .map(|(i, c)| {
            Outcome::try_from(c).with_context(|| format!("result #{} is not P, B or T", i + 1))
        })
        .collect()
}

fn run_replay(results: &str, config: Option<&Path>, csv: Option<&Path>, json: bool) -> Result<()> {
    let outcomes = parse_results(results)?;
    if outcomes.is_empty() {
        bail!("no results to replay");
    }

    let mut book = SessionBook::with_config(load_config(config)?);
    let label = GameLabel::new("G1");
    for outcome in outcomes {
        book.record_result(&label, outcome)?;
    }
    let summary = book.summary(&label);

    if let Some(path) = csv {
        std::fs::write(path, export_table_csv(&summary.table)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = summary.table.len(), "table exported");
    }

    if json {
        println!("{}", export_summary_json(&summary)?);
    } else {
        print_table(&summary.table);
        print_summary(&summary);
    }
    Ok(())
}

fn run_play(config: Option<&Path>, game: &str) -> Result<()> {
    let mut book = SessionBook::with_config(load_config(config)?);
    let mut label = GameLabel::new(game);
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("[{label}] > ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" | "?" => print_help(),
            "u" | "undo" => match book.undo_last_result(&label) {
                Ok(view) => print_latest(view.latest.as_ref()),
                Err(e) => eprintln!("{e}"),
            },
            "r" | "reset" => {
                book.reset_session(&label);
                println!("{label} reset.");
            }
            "g" | "game" => match words.next() {
                Some(next) => {
                    label = GameLabel::new(next);
                    print_latest(book.summary(&label).table.last());
                }
                None => {
                    let open: Vec<&str> = book.labels().map(GameLabel::as_str).collect();
                    println!("games: {}", open.join(" "));
                }
            },
            "s" | "summary" => print_summary(&book.summary(&label)),
            "table" => print_table(&book.summary(&label).table),
            symbol => match book.record_symbol(&label, symbol) {
                Ok(view) => print_latest(view.latest.as_ref()),
                Err(e) => eprintln!("{e}"),
            },
        }
    }
    Ok(())
}

fn print_help() {
    println!("p / b / t   record Player, Banker or Tie");
    println!("u           undo the last result");
    println!("r           reset this game");
    println!("g <label>   switch game (no label lists open games)");
    println!("s           summary");
    println!("table       full table");
    println!("q           quit");
}

fn num(v: f64, precision: usize) -> String {
    if v.is_nan() {
        "-".into()
    } else {
        format!("{v:.precision$}")
    }
}

fn print_latest(latest: Option<&RoundRecord>) {
    match latest {
        Some(r) => println!(
            "round {} {}: next {} | RSI P3 {} P4 {} | score {} [{}..{}] | bankroll {:.2} ({:+.2})",
            r.round_num,
            r.outcome,
            r.decision,
            num(r.rsi_p3, 1),
            num(r.rsi_p4, 1),
            num(r.cumulative, 0),
            num(r.support, 0),
            num(r.resistance, 0),
            r.bankroll,
            r.profit,
        ),
        None => println!("no rounds yet"),
    }
}

fn print_table(table: &RoundTable) {
    println!(
        "{:>5} {:<7} {:>2} {:>6} {:>6} {:>6} {:>6} {:>5} {:>6} {:>6} {:>5} {:>5} {:<7} {:>10}",
        "Round", "Result", "Cl", "P1", "P2", "P3", "P4", "Score", "RSI3", "RSI4", "Sup", "Res",
        "Next", "Bankroll"
    );
    println!("{}", "-".repeat(94));
    for r in table.records() {
        println!(
            "{:>5} {:<7} {:>2} {:>6} {:>6} {:>6} {:>6} {:>5} {:>6} {:>6} {:>5} {:>5} {:<7} {:>10}",
            r.round_num,
            r.outcome.to_string(),
            r.class,
            num(r.p1, 3),
            num(r.p2, 3),
            num(r.p3, 3),
            num(r.p4, 3),
            num(r.cumulative, 0),
            num(r.rsi_p3, 1),
            num(r.rsi_p4, 1),
            num(r.support, 0),
            num(r.resistance, 0),
            r.decision.to_string(),
            format!("{:.2}", r.bankroll),
        );
    }
}

fn print_summary(summary: &Summary) {
    let t = &summary.tallies;
    let p = &summary.proportions.0;
    println!();
    println!("=== {} ===", summary.label);
    println!(
        "Rounds:     {} (Player {}, Banker {}, Tie {})",
        t.total(),
        t.player,
        t.banker,
        t.tie
    );
    println!(
        "P1..P4:     {:.3} {:.3} {:.3} {:.3}",
        p[0], p[1], p[2], p[3]
    );
    println!("Bankroll:   {:.2}", summary.bankroll);
    println!("Profit:     {:+.2}", summary.profit);
    if let Some(last) = summary.table.last() {
        println!("Next:       {}", last.decision);
    }
    println!();
}
