use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{EnvelopeCommands, HistoryArgs, RunArgs, ToolCommands, WizardArgs};

/// Command-line interface for Quill PDF tools and e-signature envelopes
///
/// Quill runs PDF tools (merge, split, compress, convert and more) and builds
/// e-signature envelopes through step-by-step wizards. Every wizard step is
/// guarded: you cannot move on until the step has what it needs. Wizards can
/// be driven from the command line, replayed from event scripts, or exposed
/// to AI assistants through the MCP (Model Context Protocol) server mode.
#[derive(Parser)]
#[command(version, about, name = "quill")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/quill/quill.db
    #[arg(long, global = true, conflicts_with = "in_memory")]
    pub database_file: Option<PathBuf>,

    /// Keep the catalog in memory; nothing is written to disk
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Delay between processing progress ticks in milliseconds (default 300)
    #[arg(long, global = true)]
    pub tick_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Quill CLI
///
/// - `tool`: browse the tool catalog and manage favorites
/// - `run`: run one PDF tool end to end on local files
/// - `wizard`: replay a JSON-lines event script against a wizard
/// - `envelope`: inspect envelopes and move them through their lifecycle
/// - `history`: recent processing runs
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Browse the tool catalog
    #[command(alias = "t")]
    Tool {
        #[command(subcommand)]
        command: ToolCommands,
    },
    /// Run a PDF tool on local files
    #[command(alias = "r")]
    Run(RunArgs),
    /// Replay an event script against a wizard
    #[command(alias = "w")]
    Wizard(WizardArgs),
    /// Manage e-signature envelopes
    #[command(alias = "e")]
    Envelope {
        #[command(subcommand)]
        command: EnvelopeCommands,
    },
    /// Show recent processing runs
    #[command(alias = "h")]
    History(HistoryArgs),
    /// Start the MCP server
    Serve,
}
