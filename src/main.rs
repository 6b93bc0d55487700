//! # Quill - a scriptable text buffer
//!
//! Opens a file (or an empty buffer), runs editing commands against it and
//! prints the resulting lines and cursor.
//!
//! ```bash
//! # Edit from the command line
//! cargo run -- -e 'insert Hello, World!' -e 'move -13 0' -e select -e 'move 5 0' -e delete
//!
//! # Run a script against a file and write the result elsewhere
//! cargo run -- notes.txt --script edits.quill --output notes.out.txt
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_buffer::TextBuffer;
use quill_core::command::{self, Command};
use quill_core::{Config, Document, Session};

/// Quill - edit text with scripted commands
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Script file with one command per line
    #[arg(short, long, value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Command to run after the script (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,

    /// Save the result to this path
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Log failing commands and continue
    #[arg(short, long)]
    keep_going: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective config and exit
    #[arg(long)]
    print_config: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let document = match &args.file {
        Some(path) => Document::open(path, config.buffer_config())
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => Document::with_buffer_config(config.buffer_config()),
    };

    let commands = collect_commands(&args)?;
    let mut session = Session::with_config(document, &config);
    let mut events = session.subscribe();

    let outputs = session.execute_all(&commands, args.keep_going)?;
    for event in events.drain() {
        tracing::debug!("Event: {:?}", event);
    }
    for output in &outputs {
        println!("{output}");
    }

    if let Some(path) = &args.output {
        session
            .execute(&Command::SaveAs(path.clone()))
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    let document = session.into_document();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&document.buffer().snapshot())?);
    } else {
        print!("{}", render_listing(document.buffer()));
    }

    Ok(())
}

/// Parses the script file followed by the `-e` commands.
fn collect_commands(args: &Args) -> anyhow::Result<Vec<Command>> {
    let mut commands = match &args.script {
        Some(path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            command::parse_script(&script)
                .with_context(|| format!("Invalid script {}", path.display()))?
        }
        None => Vec::new(),
    };

    for line in &args.exec {
        commands.push(line.parse::<Command>().with_context(|| format!("Invalid command `{line}`"))?);
    }
    Ok(commands)
}

/// Lists every line and the cursor.
fn render_listing(buffer: &TextBuffer) -> String {
    let mut out = String::from("Buffer contents:\n");
    for (i, line) in buffer.lines().iter().enumerate() {
        out.push_str(&format!("Line {}: {:?}\n", i + 1, line));
    }
    out.push_str(&format!("\nCursor position: {}\n", buffer.cursor()));
    if let Some((start, end)) = buffer.selection_bounds() {
        out.push_str(&format!("Selection: {start} - {end}\n"));
    }
    out
}
