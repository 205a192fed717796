use crate::commands;
use crate::common::CommonParams;
use crate::config::Config;
use crate::core::llm::GeminiSuggester;
use crate::features::commit::{CommitWorkflow, WorkflowOutcome};
use crate::git::GitRepo;
use crate::logger::{self, LogOptions};
use crate::tui::TerminalPrompter;
use crate::ui;

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use log::debug;

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    name = "commit-commander",
    author,
    version = crate_version!(),
    about = "Interactive conventional commits with optional AI suggestions",
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonParams,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, waiting messages, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a configuration file interactively
    #[command(
        about = "Create a configuration file interactively",
        long_about = "Walk through the available settings and write commit-commander.toml to the repository root."
    )]
    Init,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    logger::init(&LogOptions {
        to_file: cli.log,
        log_file: cli.log_file.clone(),
    })?;

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    match cli.command {
        Some(command) => handle_command(command),
        None => handle_commit(&cli.common).await,
    }
}

/// Handle the command based on parsed arguments
pub fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => handle_init(),
    }
}

/// Handle the `Init` command
pub fn handle_init() -> anyhow::Result<()> {
    let path = Config::config_path()?;
    debug!("Handling 'init' command for {}", path.display());
    commands::handle_init_command(&mut TerminalPrompter, &path)?;
    Ok(())
}

/// Run the interactive commit workflow in the current repository
pub async fn handle_commit(common: &CommonParams) -> anyhow::Result<()> {
    debug!("Handling commit workflow with common: {common:?}");

    let mut config = Config::load()?;
    common.apply_to_config(&mut config);

    let git = GitRepo::discover()?;
    let suggester = GeminiSuggester::new(&config);
    let mut prompter = TerminalPrompter;

    let outcome = CommitWorkflow::new(&config, &mut prompter, &git, &suggester)
        .run()
        .await?;

    match outcome {
        WorkflowOutcome::Committed { subject, .. } => debug!("Committed {subject:?}"),
        WorkflowOutcome::Cancelled => debug!("Workflow cancelled by user"),
    }
    Ok(())
}
