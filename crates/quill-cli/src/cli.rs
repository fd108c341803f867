//! Command handlers and their clap argument wrappers.
//!
//! Each subcommand has an `*Args` struct carrying the clap attributes and a
//! `From` conversion into the matching `quill_core::params` type, so the
//! studio never sees clap types:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Studio
//! ```

use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::{debug, info};
use quill_core::{
    display::{
        Envelopes, ProcessingHistory, ProcessingResult, SentEnvelope, Tools, UpdateResult,
    },
    models::{EnvelopeStatus, FieldValue, FileHandle, ToolCategory},
    params::{FavoriteTool, Id, ListEnvelopes, ListTools, RecentProcessing, ToolId, UpdateEnvelopeStatus},
    processing::{ProcessingReport, ProgressSource, RandomProgress},
    SharedSession, Studio, WizardEvent,
};

use crate::renderer::TerminalRenderer;

/// Wizard name accepted by `quill wizard` for the envelope flow.
pub const ENVELOPE_WIZARD: &str = "envelope";

// ============================================================================
// Tool commands
// ============================================================================

/// List catalog tools
///
/// Without filters every tool is listed, favorites first. Filters combine:
/// `--favorites --category organize` lists pinned organize tools only.
#[derive(Args)]
pub struct ListToolsArgs {
    #[arg(short, long, help = "Only tools of this category")]
    pub category: Option<CategoryArg>,
    #[arg(short, long, help = "Only tools pinned as favorite")]
    pub favorites: bool,
    #[arg(
        short,
        long,
        help = "Case-insensitive text searched in tool names and descriptions"
    )]
    pub search: Option<String>,
}

impl From<ListToolsArgs> for ListTools {
    fn from(val: ListToolsArgs) -> Self {
        ListTools {
            category: val.category.map(Into::into),
            favorites: val.favorites,
            search: val.search,
        }
    }
}

/// Show one tool
#[derive(Args)]
pub struct ShowToolArgs {
    #[arg(help = "Tool slug, e.g. 'merge' or 'pdf-to-word'")]
    pub tool_id: String,
}

impl From<ShowToolArgs> for ToolId {
    fn from(val: ShowToolArgs) -> Self {
        ToolId {
            tool_id: val.tool_id,
        }
    }
}

/// Pin a tool to the favorites, or unpin it with `--off`
#[derive(Args)]
pub struct FavoriteToolArgs {
    #[arg(help = "Tool slug to pin or unpin")]
    pub tool_id: String,
    #[arg(long, help = "Remove the tool from the favorites instead")]
    pub off: bool,
}

impl From<FavoriteToolArgs> for FavoriteTool {
    fn from(val: FavoriteToolArgs) -> Self {
        FavoriteTool {
            tool_id: val.tool_id,
            favorite: !val.off,
        }
    }
}

#[derive(Subcommand)]
pub enum ToolCommands {
    /// List catalog tools
    #[command(aliases = ["l", "ls"])]
    List(ListToolsArgs),
    /// Show details of one tool
    #[command(alias = "s")]
    Show(ShowToolArgs),
    /// Pin or unpin a tool
    #[command(alias = "f")]
    Favorite(FavoriteToolArgs),
}

/// Tool categories as accepted on the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum CategoryArg {
    Organize,
    Optimize,
    Convert,
    Edit,
    Security,
}

impl From<CategoryArg> for ToolCategory {
    fn from(val: CategoryArg) -> Self {
        match val {
            CategoryArg::Organize => ToolCategory::Organize,
            CategoryArg::Optimize => ToolCategory::Optimize,
            CategoryArg::Convert => ToolCategory::Convert,
            CategoryArg::Edit => ToolCategory::Edit,
            CategoryArg::Security => ToolCategory::Security,
        }
    }
}

// ============================================================================
// Wizard commands
// ============================================================================

/// Run a PDF tool on local files
///
/// Drives the Upload → Settings → Process → Download wizard in one go: the
/// files are uploaded, `--set` values are entered on the settings step, and
/// the job is processed. Fails with the guard's explanation when a step is
/// missing something, e.g. `split` without `--set ranges=1-3`.
#[derive(Args)]
pub struct RunArgs {
    #[arg(help = "Tool slug, e.g. 'compress'")]
    pub tool_id: String,
    #[arg(
        short,
        long = "file",
        required = true,
        help = "Input file; repeat for tools that combine several files"
    )]
    pub files: Vec<PathBuf>,
    #[arg(
        long = "set",
        value_parser = parse_setting,
        help = "Tool setting as key=value, e.g. --set angle=90"
    )]
    pub settings: Vec<(String, String)>,
    #[arg(long, help = "Seed for reproducible progress increments")]
    pub seed: Option<u64>,
}

/// Replay an event script against a wizard
///
/// The script holds one JSON event per line, for example
/// `{"event":"add_file","file":{"name":"nda.pdf","size":1024}}` or
/// `{"event":"next"}`. Blank lines and lines starting with `#` are skipped.
/// Each outcome is printed, followed by the final wizard state.
#[derive(Args)]
pub struct WizardArgs {
    #[arg(help = "Tool slug, or 'envelope' for the envelope wizard")]
    pub wizard: String,
    #[arg(short, long, help = "JSON-lines file with one wizard event per line")]
    pub script: PathBuf,
    #[arg(
        long,
        conflicts_with = "process",
        help = "Send the envelope once the script has reached the review step"
    )]
    pub send: bool,
    #[arg(long, help = "Run processing once the script has reached the process step")]
    pub process: bool,
    #[arg(long, help = "Seed for reproducible progress increments")]
    pub seed: Option<u64>,
}

/// Split a `key=value` command-line setting.
fn parse_setting(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse a JSON-lines event script.
fn parse_script(source: &str) -> Result<Vec<WizardEvent>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line.trim())
                .with_context(|| format!("Invalid event on line {}", index + 1))
        })
        .collect()
}

fn progress_source(seed: Option<u64>) -> RandomProgress {
    match seed {
        Some(seed) => RandomProgress::seeded(seed),
        None => RandomProgress::from_entropy(),
    }
}

// ============================================================================
// Envelope commands
// ============================================================================

/// List envelopes, newest first
#[derive(Args)]
pub struct ListEnvelopesArgs {
    #[arg(short, long, help = "Only envelopes in this status")]
    pub status: Option<StatusArg>,
}

impl From<ListEnvelopesArgs> for ListEnvelopes {
    fn from(val: ListEnvelopesArgs) -> Self {
        ListEnvelopes {
            status: val.status.map(Into::into),
        }
    }
}

/// Show one envelope with its documents and recipients
#[derive(Args)]
pub struct ShowEnvelopeArgs {
    #[arg(help = "Envelope ID")]
    pub id: u64,
}

impl From<ShowEnvelopeArgs> for Id {
    fn from(val: ShowEnvelopeArgs) -> Self {
        Id { id: val.id }
    }
}

/// Move an envelope along its lifecycle
///
/// Drafts can be sent or voided; sent envelopes end as completed, declined or
/// voided. Completed, declined and voided envelopes never change again.
#[derive(Args)]
pub struct EnvelopeStatusArgs {
    #[arg(help = "Envelope ID")]
    pub id: u64,
    #[arg(help = "New status")]
    pub status: StatusArg,
}

impl From<EnvelopeStatusArgs> for UpdateEnvelopeStatus {
    fn from(val: EnvelopeStatusArgs) -> Self {
        UpdateEnvelopeStatus {
            id: val.id,
            status: val.status.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum EnvelopeCommands {
    /// List envelopes
    #[command(aliases = ["l", "ls"])]
    List(ListEnvelopesArgs),
    /// Show details of one envelope
    #[command(alias = "s")]
    Show(ShowEnvelopeArgs),
    /// Change the status of an envelope
    #[command(alias = "u")]
    Status(EnvelopeStatusArgs),
    /// Count envelopes per status
    Stats,
}

/// Envelope statuses as accepted on the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum StatusArg {
    Draft,
    Sent,
    Completed,
    Declined,
    Voided,
}

impl From<StatusArg> for EnvelopeStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Draft => EnvelopeStatus::Draft,
            StatusArg::Sent => EnvelopeStatus::Sent,
            StatusArg::Completed => EnvelopeStatus::Completed,
            StatusArg::Declined => EnvelopeStatus::Declined,
            StatusArg::Voided => EnvelopeStatus::Voided,
        }
    }
}

/// Show recent processing runs
#[derive(Args)]
pub struct HistoryArgs {
    #[arg(short, long, help = "Maximum number of runs to show (default 10)")]
    pub limit: Option<usize>,
}

impl From<HistoryArgs> for RecentProcessing {
    fn from(val: HistoryArgs) -> Self {
        RecentProcessing { limit: val.limit }
    }
}

// ============================================================================
// Handler
// ============================================================================

/// Executes parsed commands against a studio and renders the results.
pub struct Cli {
    studio: Studio,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(studio: Studio, renderer: TerminalRenderer) -> Self {
        Self { studio, renderer }
    }

    pub async fn handle_tool_command(&self, command: ToolCommands) -> Result<()> {
        match command {
            ToolCommands::List(args) => self.list_tools(&args.into()).await,
            ToolCommands::Show(args) => {
                let params: ToolId = args.into();
                let tool = self
                    .studio
                    .get_tool(&params)
                    .await
                    .context("Failed to load tool")?
                    .ok_or_else(|| anyhow!("Tool '{}' not found", params.tool_id))?;
                self.renderer.render(&tool.to_string())
            }
            ToolCommands::Favorite(args) => {
                let tool = self
                    .studio
                    .set_favorite(&args.into())
                    .await
                    .context("Failed to update favorite")?;
                self.renderer
                    .render(&UpdateResult::favorite(tool).to_string())
            }
        }
    }

    pub async fn list_tools(&self, params: &ListTools) -> Result<()> {
        let tools = self
            .studio
            .list_tools(params)
            .await
            .context("Failed to list tools")?;
        self.renderer
            .render(&format!("# Tools\n\n{}", Tools(tools)))
    }

    pub async fn run_tool(&self, args: RunArgs) -> Result<()> {
        let session = self
            .studio
            .start_tool_wizard(&ToolId {
                tool_id: args.tool_id,
            })
            .await
            .context("Failed to start tool wizard")?;

        {
            let mut guard = session.lock().await;
            for path in &args.files {
                let file = FileHandle::from_path(path)
                    .with_context(|| format!("Failed to read '{}'", path.display()))?;
                guard.dispatch(WizardEvent::AddFile { file });
            }
            for (key, value) in args.settings {
                let outcome = guard.dispatch(WizardEvent::Set {
                    key,
                    value: FieldValue::parse_literal(&value),
                });
                if let Some(rejection) = outcome.rejection() {
                    bail!("{rejection}");
                }
            }

            // Upload → Settings → Process
            for _ in 0..2 {
                let outcome = guard.dispatch(WizardEvent::Next);
                if let Some(rejection) = outcome.rejection() {
                    bail!("{rejection}");
                }
            }
        }

        let mut progress = progress_source(args.seed);
        self.process(&session, &mut progress).await
    }

    pub async fn replay_wizard(&self, args: WizardArgs) -> Result<()> {
        let source = fs::read_to_string(&args.script)
            .with_context(|| format!("Failed to read script '{}'", args.script.display()))?;
        let events = parse_script(&source)?;
        debug!("replaying {} event(s) from {}", events.len(), args.script.display());

        let started = if args.wizard == ENVELOPE_WIZARD {
            self.studio.start_envelope_wizard().await
        } else {
            self.studio
                .start_tool_wizard(&ToolId {
                    tool_id: args.wizard.clone(),
                })
                .await
        };
        let session = started.context("Failed to start wizard")?;

        let mut output = String::from("# Events\n\n");
        {
            let mut guard = session.lock().await;
            for (index, event) in events.into_iter().enumerate() {
                let outcome = guard.dispatch(event);
                writeln!(output, "{}. {outcome}", index + 1)?;
            }
            if !args.send && !args.process {
                writeln!(output)?;
                write!(output, "{}", guard.snapshot())?;
            }
        }
        self.renderer.render(&output)?;

        if args.send {
            let envelope = self
                .studio
                .send_envelope(&session)
                .await
                .context("Failed to send envelope")?;
            info!("envelope {} sent", envelope.id);
            self.renderer.render(&format!("\n{}", SentEnvelope(envelope)))?;
        } else if args.process {
            println!();
            let mut progress = progress_source(args.seed);
            self.process(&session, &mut progress).await?;
        }
        Ok(())
    }

    async fn process(&self, session: &SharedSession, progress: &mut dyn ProgressSource) -> Result<()> {
        let report = self
            .studio
            .process(session, progress)
            .await
            .context("Processing failed to run")?;
        let snapshot = session.lock().await.snapshot();
        let failed = !matches!(report, ProcessingReport::Completed { .. });

        self.renderer.render(
            &ProcessingResult {
                report: report.clone(),
                session: snapshot,
            }
            .to_string(),
        )?;
        if failed {
            bail!("{report}");
        }
        Ok(())
    }

    pub async fn handle_envelope_command(&self, command: EnvelopeCommands) -> Result<()> {
        match command {
            EnvelopeCommands::List(args) => {
                let envelopes = self
                    .studio
                    .list_envelopes(&args.into())
                    .await
                    .context("Failed to list envelopes")?;
                self.renderer
                    .render(&format!("# Envelopes\n\n{}", Envelopes(envelopes)))
            }
            EnvelopeCommands::Show(args) => {
                let params: Id = args.into();
                let envelope = self
                    .studio
                    .get_envelope(&params)
                    .await
                    .context("Failed to load envelope")?
                    .ok_or_else(|| anyhow!("Envelope with ID {} not found", params.id))?;
                self.renderer.render(&envelope.to_string())
            }
            EnvelopeCommands::Status(args) => {
                let envelope = self
                    .studio
                    .update_envelope_status(&args.into())
                    .await
                    .context("Failed to update envelope status")?;
                self.renderer
                    .render(&UpdateResult::status(envelope).to_string())
            }
            EnvelopeCommands::Stats => {
                let stats = self
                    .studio
                    .envelope_stats()
                    .await
                    .context("Failed to count envelopes")?;
                self.renderer.render(&stats.to_string())
            }
        }
    }

    pub async fn show_history(&self, args: HistoryArgs) -> Result<()> {
        let records = self
            .studio
            .recent_processing(&args.into())
            .await
            .context("Failed to load processing history")?;
        self.renderer.render(&format!(
            "# Processing history\n\n{}",
            ProcessingHistory(records)
        ))
    }
}
