//! MRLabel command-line entry point.
//!
//! Reads commands line by line from stdin (or a script file) and prints the
//! output log and replies of the application.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mrlabel::config::{AppConfig, LogLevel};
use mrlabel::picker::{FilePicker, NativeFilePicker, NoFilePicker};
use mrlabel::{LabelerApp, Message, Reply, ui};

#[derive(Parser)]
#[command(name = "mrlabel")]
#[command(about = "Label text, image and audio files and export or upload the labels")]
#[command(version)]
struct Cli {
    /// Config file path (overrides the default location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Database file used by `upload`
    #[arg(long, env = "MRLABEL_DATABASE")]
    database: Option<PathBuf>,

    /// Destination table used by `upload`
    #[arg(long, env = "MRLABEL_TABLE")]
    table: Option<String>,

    /// Folder default export paths are resolved against
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Write the effective configuration to the default location and exit
    #[arg(long)]
    save_config: bool,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match AppConfig::load_from_default_path() {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring config file, using defaults: {}", e);
                AppConfig::default()
            }
        },
    };

    if let Some(level) = cli.log_level {
        config.preferences.log_level = level;
    }
    if let Some(path) = &cli.database {
        config.database.path = path.clone();
    }
    if let Some(table) = &cli.table {
        config.database.table = table.clone();
    }
    if let Some(dir) = &cli.export_dir {
        config.preferences.export_folder = dir.display().to_string();
    }
    Ok(config)
}

/// Start logging before the config file is read.
///
/// Without `RUST_LOG` the logger passes every record and the global max level
/// carries the verbosity, so it can be adjusted once the config is loaded.
/// Returns whether `RUST_LOG` is in control.
fn init_logging(initial: LogLevel) -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !from_env {
        log::set_max_level(initial.to_level_filter());
    }
    from_env
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let rust_log = init_logging(cli.log_level.unwrap_or_default());
    let config = load_config(&cli)?;
    if !rust_log {
        log::set_max_level(config.preferences.log_level.to_level_filter());
    }

    if cli.save_config {
        let path = config
            .save_to_default_path()
            .context("Failed to save configuration")?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    let interactive = cli.script.is_none() && io::stdin().is_terminal();
    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let picker: Box<dyn FilePicker> = if interactive {
        Box::new(NativeFilePicker {
            start_dir: dirs::home_dir(),
        })
    } else {
        Box::new(NoFilePicker)
    };

    let mut app = LabelerApp::new(config, picker);
    run(&mut app, input, interactive)
}

fn run(app: &mut LabelerApp, input: Box<dyn BufRead>, interactive: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if interactive {
        writeln!(stdout, "{} (type 'help' for commands)", mrlabel::constants::APP_TITLE)?;
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let message = match trimmed.parse::<Message>() {
            Ok(message) => message,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        let reply = app.update(message);
        for line in app.drain_output() {
            writeln!(stdout, "{}", line)?;
        }
        if let Some(text) = ui::render_reply(&reply) {
            writeln!(stdout, "{}", text.trim_end())?;
        }
        if reply == Reply::Quit {
            break;
        }
    }
    Ok(())
}
