//! Command line front end for inspecting a topic mapper.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use topic_index::loader::load_index;
use topic_index::logging::init_logging;
use topic_index::{Built, ContentId};

#[derive(Debug, Parser)]
#[command(name = "topic-index", version, about = "Resolve and check topic mappers")]
struct Cli {
    /// Directory holding the mapper fragments and optional configuration.
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the index and print every diagnostic with summary counts.
    Check {
        /// Exit with a failure status when any diagnostic is reported.
        #[arg(long)]
        strict: bool,
    },
    /// Resolve a URL path to its page.
    Resolve {
        /// Path such as `web/html`; leading and trailing slashes are ignored.
        path: String,
    },
    /// Find the path rendering a content id.
    Reverse {
        /// Markdown content id.
        id: u64,
    },
    /// List the children of the node owning a path.
    Children {
        /// Path of the parent; defaults to the root.
        #[arg(default_value = "")]
        path: String,
    },
    /// Write the navigation tree as JSON.
    Export {
        /// Output file; printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Outcome of a command that ran without an I/O or build error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    /// `check --strict` found diagnostics.
    Failure,
    /// The requested path or content id is not in the index.
    NotFound,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
            Status::NotFound => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("{err:#}");
    }

    match run(cli) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Status> {
    let Built { index, diagnostics } = load_index(&cli.dir)?;

    match cli.command {
        Command::Check { strict } => {
            print!("{diagnostics}");
            print_json(&index.stats())?;
            if strict && !diagnostics.is_clean() {
                return Ok(Status::Failure);
            }
        }
        Command::Resolve { path } => match index.resolve(&path) {
            Some(page) => print_json(&page)?,
            None => return Ok(not_found(&format!("no page at `{path}`"))),
        },
        Command::Reverse { id } => match index.reverse_resolve(ContentId(id)) {
            Some(path) => println!("{path}"),
            None => return Ok(not_found(&format!("no routable page renders content {id}"))),
        },
        Command::Children { path } => match index.list_children(&path) {
            Some(children) => print_json(&children)?,
            None => return Ok(not_found(&format!("no page at `{path}`"))),
        },
        Command::Export { output } => {
            let json = index
                .navigation_json()
                .context("failed to serialise navigation")?;
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }

    Ok(Status::Success)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn not_found(message: &str) -> Status {
    eprintln!("{message}");
    Status::NotFound
}
