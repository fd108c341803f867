//! Quill CLI Application
//!
//! Command-line interface and MCP server for Quill PDF tool and envelope
//! wizards.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, QuillMcpServer};
use quill_core::{params::ListTools, StudioBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        in_memory,
        no_color,
        tick_ms,
        command,
    } = Args::parse();

    let mut builder = StudioBuilder::new().with_database_path(database_file);
    if in_memory {
        builder = builder.in_memory();
    }
    if let Some(ms) = tick_ms {
        builder = builder.with_tick(Duration::from_millis(ms));
    }
    let studio = builder.build().await.context("Failed to initialize studio")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Quill started");

    match command {
        Some(Tool { command }) => Cli::new(studio, renderer).handle_tool_command(command).await,
        Some(Run(args)) => Cli::new(studio, renderer).run_tool(args).await,
        Some(Wizard(args)) => Cli::new(studio, renderer).replay_wizard(args).await,
        Some(Envelope { command }) => {
            Cli::new(studio, renderer)
                .handle_envelope_command(command)
                .await
        }
        Some(History(args)) => Cli::new(studio, renderer).show_history(args).await,
        Some(Serve) => {
            info!("Starting Quill MCP server");
            run_stdio_server(QuillMcpServer::new(studio))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(studio, renderer)
                .list_tools(&ListTools::default())
                .await
        }
    }
}
