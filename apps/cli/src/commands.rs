//! CLI command definitions, routing, and tracing setup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use agentsim_core::assistant::CodeAssistant;
use agentsim_core::pipeline::{AgentPipeline, PipelineOptions, StageObserver};
use agentsim_genai::GenAiClient;
use agentsim_knowledge::TopicKnowledgeBase;
use agentsim_markdown::DisplayBlock;
use agentsim_shared::{
    AppConfig, ExecutionMode, PipelineStage, init_config, load_config, validate_api_key,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// AgentSim — a simulated AI agent pipeline, from the terminal.
#[derive(Parser)]
#[command(
    name = "agentsim",
    version,
    about = "Run the simulated researcher agent and code assistant.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Research a topic and print the generated report.
    Research {
        /// Topic to research.
        topic: String,

        /// Execution mode: direct or queued (overrides config).
        #[arg(short, long)]
        mode: Option<ExecutionMode>,
    },

    /// Generate a code snippet from a prompt.
    Code {
        /// What to build.
        prompt: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "agentsim=info",
        1 => "agentsim=debug",
        _ => "agentsim=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Research { topic, mode } => cmd_research(&topic, mode).await,
        Command::Code { prompt } => cmd_code(&prompt).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_research(topic: &str, mode: Option<ExecutionMode>) -> Result<()> {
    // Validate the credential before doing anything
    let config = load_config()?;
    validate_api_key(&config)?;

    let mode = mode.unwrap_or(config.pipeline.mode);

    info!(topic, %mode, "starting research run");

    let client = GenAiClient::from_env(&config.gemini.endpoint, &config.gemini.api_key_env)?;
    let knowledge =
        TopicKnowledgeBase::with_delay(Duration::from_millis(config.pipeline.search_delay_ms));
    let options = PipelineOptions {
        summarize_model: config.gemini.summarize_model.clone(),
        mode,
        job_delay: Duration::from_millis(config.pipeline.job_delay_ms),
    };

    let status = CliStatus::new();
    let pipeline = AgentPipeline::new(knowledge, client, options)
        .with_observer(Arc::new(status.clone()));

    let start = Instant::now();
    let report = pipeline.run(topic).await?;
    status.finish();

    println!();
    println!("  Research Report");
    println!("  ---------------");
    for block in agentsim_markdown::render(&report) {
        match block {
            DisplayBlock::Heading(text) => println!("\n  {text}"),
            DisplayBlock::BulletItem(text) => println!("    * {text}"),
            DisplayBlock::Paragraph(text) => println!("  {text}"),
        }
    }
    println!();
    println!("  Mode: {mode}");
    println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_code(prompt: &str) -> Result<()> {
    let config = load_config()?;
    validate_api_key(&config)?;

    info!(prompt_len = prompt.len(), "starting code generation");

    let client = GenAiClient::from_env(&config.gemini.endpoint, &config.gemini.api_key_env)?;
    let assistant = CodeAssistant::new(client, config.gemini.code_model.clone());

    let status = CliStatus::new();
    status.set("Agent is thinking...");

    let start = Instant::now();
    let code = assistant.generate_code(prompt).await?;
    status.finish();

    println!();
    println!("{code}");
    println!();
    println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created config file at {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let rendered = toml::to_string_pretty(&config)?;
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI status display
// ---------------------------------------------------------------------------

/// Stage observer backed by an indicatif spinner.
#[derive(Clone)]
struct CliStatus {
    spinner: ProgressBar,
}

impl CliStatus {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn set(&self, msg: &str) {
        self.spinner.set_message(msg.to_string());
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl StageObserver for CliStatus {
    fn on_stage(&self, _stage: PipelineStage, status: &str) {
        self.spinner.set_message(status.to_string());
    }
}
