//! fanout - entrypoint

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use fanout::core::logger;
use fanout::core::telemetry::{write_dispatch_record, DispatchRecord};
use fanout::{Action, Config, ConnectorKind, ConnectorManager, DataRecord};

/// CLI definition using clap
#[derive(Debug, Parser)]
#[command(name = "fanout")]
#[command(about = "Fanout — broadcast an action to connectors and AND their verdicts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List available connector kinds
    List,

    /// Dispatch one action. Usage: `fanout dispatch --action 1 --connector stateful --record '{"price": 3}'`
    Dispatch {
        /// Action identifier
        #[arg(long, short, allow_hyphen_values = true)]
        action: i64,

        /// Connector kinds to register, in order (repeatable). Defaults to every kind.
        #[arg(long = "connector", short)]
        connectors: Vec<ConnectorKind>,

        /// Data record as a JSON object
        #[arg(long, conflicts_with = "record_file")]
        record: Option<String>,

        /// Path to a file holding the data record as a JSON object
        #[arg(long)]
        record_file: Option<PathBuf>,
    },

    /// Dispatch every line of a JSONL file: `{"action": 1, "record": {...}}`
    Replay {
        /// JSONL input file
        path: PathBuf,

        /// Connector kinds to register, in order (repeatable). Defaults to every kind.
        #[arg(long = "connector", short)]
        connectors: Vec<ConnectorKind>,
    },
}

#[derive(Debug, Deserialize)]
struct ReplayLine {
    action: Action,
    #[serde(default)]
    record: DataRecord,
}

fn main() -> Result<ExitCode> {
    logger::init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!();
        Cli::command().print_help().ok();
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    logger::header(env!("CARGO_PKG_VERSION"));
    let start_time = Instant::now();

    let config = Config::load().context("loading configuration from environment")?;

    let all_ok = match command {
        Commands::List => {
            list_kinds();
            true
        }
        Commands::Dispatch {
            action,
            connectors,
            record,
            record_file,
        } => {
            let record = load_record(record.as_deref(), record_file.as_deref())?;
            let mut manager = build_manager(&config, &connectors);
            dispatch_one(&config, &mut manager, Action(action), &record)?
        }
        Commands::Replay { path, connectors } => {
            let mut manager = build_manager(&config, &connectors);
            replay(&config, &mut manager, &path)?
        }
    };

    logger::summary(start_time.elapsed());

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn list_kinds() {
    println!();
    println!("{}", "Available connectors:".bright_cyan().bold());
    for kind in ConnectorKind::ALL {
        println!("  - {}", kind.tag().bright_white());
    }
}

/// Register the requested kinds in order, or every kind when none were given.
fn build_manager(config: &Config, kinds: &[ConnectorKind]) -> ConnectorManager {
    let kinds: &[ConnectorKind] = if kinds.is_empty() {
        &ConnectorKind::ALL
    } else {
        kinds
    };

    let mut manager = ConnectorManager::new().with_policy(config.fault_policy);
    for kind in kinds {
        manager.register(kind.build(config));
    }

    logger::section("connectors");
    logger::info(&format!(
        "{} (fault policy: {})",
        manager.names().join(", "),
        manager.policy()
    ));
    manager
}

fn load_record(inline: Option<&str>, file: Option<&Path>) -> Result<DataRecord> {
    if let Some(raw) = inline {
        return serde_json::from_str(raw).context("parsing --record as a JSON object");
    }
    if let Some(path) = file {
        let raw = fs::read_to_string(path).with_context(|| format!("reading record file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("parsing record file {} as a JSON object", path.display()));
    }
    Ok(DataRecord::new())
}

/// Dispatch once and print the verdicts. Returns whether the action was valid.
fn dispatch_one(
    config: &Config,
    manager: &mut ConnectorManager,
    action: Action,
    record: &DataRecord,
) -> Result<bool> {
    logger::section("dispatch");
    match manager.dispatch_report(action, record) {
        Ok(report) => {
            logger::report(action, &report);
            let rec = DispatchRecord::from_report(config, action, record, &report);
            if let Err(e) = write_dispatch_record(config, &rec) {
                logger::warn(&format!("telemetry not written: {:#}", e));
            }
            Ok(report.valid)
        }
        Err(err) => {
            let rec = DispatchRecord::from_fault(config, action, record, &err);
            if let Err(e) = write_dispatch_record(config, &rec) {
                logger::warn(&format!("telemetry not written: {:#}", e));
            }
            Err(err)
        }
    }
}

/// Dispatch every line of `path` in order. A faulting line is reported and
/// skipped. Returns true only if every line was valid.
fn replay(config: &Config, manager: &mut ConnectorManager, path: &Path) -> Result<bool> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading replay file {}", path.display()))?;

    let (mut valid, mut invalid, mut faulted) = (0usize, 0usize, 0usize);

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry: ReplayLine = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed replay line", path.display(), idx + 1))?;

        match dispatch_one(config, manager, entry.action, &entry.record) {
            Ok(true) => valid += 1,
            Ok(false) => invalid += 1,
            Err(e) => {
                logger::error(&format!("line {} faulted: {:#}", idx + 1, e));
                faulted += 1;
            }
        }
    }

    logger::section("replay");
    logger::info(&format!(
        "{} valid, {} invalid, {} faulted",
        valid, invalid, faulted
    ));

    Ok(invalid == 0 && faulted == 0)
}
