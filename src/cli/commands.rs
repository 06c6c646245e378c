//! CLI command definitions for debate-forge.
//!
//! Every command that talks to a model shares the same backend flags; the
//! offline commands (`prompt`, `parse`, `tokenize`, `topics`) never touch the
//! network.

use crate::agents::{LogicAnalyst, OpponentAgent};
use crate::config::AppConfig;
use crate::llm::{LiteLlmClient, LlmProvider, OpenRouterProvider};
use crate::logic::{parse_response, tokenize};
use crate::prompts::build_prompt;
use crate::session::{
    DebateRound, DebateTopic, DebateTrainer, InMemorySessionStore, SessionHistory, SessionStore,
    Side, SqliteSessionStore,
};
use crate::tutorial::TutorialBank;
use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

/// Debate practice toolkit: symbolic logic analysis of arguments.
#[derive(Parser)]
#[command(name = "debate-forge")]
#[command(about = "Convert debate arguments into symbolic logic and assess them")]
#[command(version)]
#[command(
    long_about = "debate-forge asks a language model to rewrite an argument as a symbolic logic \
    expression, parses the validity/soundness assessment, and tokenizes the expression.\n\n\
    Example usage:\n  debate-forge analyze \"If it rains, the ground gets wet.\"\n  \
    debate-forge train --topic 1 --side supporting --session-db sessions.db"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Analyze one sentence and print the result as JSON.
    Analyze(AnalyzeArgs),

    /// Print the analysis prompt for a sentence without calling a model.
    Prompt(PromptArgs),

    /// Parse raw model output (file or stdin) into an analysis result.
    Parse(ParseArgs),

    /// Tokenize a logical expression.
    Tokenize(TokenizeArgs),

    /// List the debate topics.
    Topics,

    /// Argue a topic against the AI opponent, one line per round.
    Train(TrainArgs),

    /// Show a stored training conversation.
    History(HistoryArgs),

    /// Show a tutorial question or check an answer.
    Tutorial(TutorialArgs),
}

/// Model backend.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// OpenAI API (`OPENAI_API_KEY`).
    Openai,
    /// DeepSeek API (`DEEPSEEK_API_KEY`).
    Deepseek,
    /// OpenRouter (`OPENROUTER_API_KEY`).
    Openrouter,
    /// Any OpenAI-compatible proxy (`LITELLM_API_BASE`, `LITELLM_API_KEY`).
    Litellm,
}

/// Backend selection shared by model-backed commands.
#[derive(clap::Args, Debug, Clone)]
pub struct LlmArgs {
    #[arg(short = 'b', long, value_enum, default_value = "openai")]
    pub backend: Backend,

    /// Model override (also DEBATE_MODEL); defaults to the backend's model.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// API key; falls back to the backend's environment variable.
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Sentence to analyze.
    pub sentence: String,

    /// Earlier logical expressions, oldest first. Repeatable.
    #[arg(short = 'c', long = "context")]
    pub context: Vec<String>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Parser, Debug)]
pub struct PromptArgs {
    pub sentence: String,

    /// Earlier logical expressions, oldest first. Repeatable.
    #[arg(short = 'c', long = "context")]
    pub context: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// File holding the raw model output; stdin when omitted.
    pub file: Option<PathBuf>,

    /// Sentence the output was produced for.
    #[arg(short = 's', long, default_value = "")]
    pub sentence: String,
}

#[derive(Parser, Debug)]
pub struct TokenizeArgs {
    pub expression: String,
}

#[derive(Parser, Debug)]
pub struct TrainArgs {
    /// Topic id (see `topics`).
    #[arg(short = 't', long, required_unless_present = "conversation")]
    pub topic: Option<u32>,

    /// Side the user argues: supporting or opposing.
    #[arg(short = 's', long, default_value = "supporting")]
    pub side: Side,

    /// Continue an existing conversation instead of starting one.
    #[arg(long)]
    pub conversation: Option<Uuid>,

    /// SQLite file for sessions (also DEBATE_SESSION_DB); in-memory when unset.
    #[arg(long)]
    pub session_db: Option<PathBuf>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    pub conversation: Uuid,

    /// SQLite file for sessions (also DEBATE_SESSION_DB).
    #[arg(long)]
    pub session_db: Option<PathBuf>,

    /// Only the logic chain of the most recent round.
    #[arg(long)]
    pub current: bool,

    /// Only the logic chains, without the conversation metadata.
    #[arg(long, conflicts_with = "current")]
    pub chains: bool,
}

#[derive(Parser, Debug)]
pub struct TutorialArgs {
    /// YAML question file (also DEBATE_TUTORIAL_FILE).
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Question id to show or answer.
    #[arg(short = 'q', long)]
    pub question: Option<u32>,

    /// Whether the example and question share the same structure.
    #[arg(short = 'a', long, requires = "question")]
    pub answer: Option<bool>,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
///
/// `DEBATE_*` configuration is read only by the commands that use it.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Analyze(args) => run_analyze_command(args, load_config()?).await?,
        Commands::Prompt(args) => print!("{}", build_prompt(&args.sentence, &args.context)),
        Commands::Parse(args) => run_parse_command(args)?,
        Commands::Tokenize(args) => {
            println!("{}", serde_json::to_string(&tokenize(&args.expression))?);
        }
        Commands::Topics => {
            for topic in DebateTopic::all() {
                println!("{:>2}  {}  ({})", topic.id, topic.title, topic.description);
            }
        }
        Commands::Train(args) => run_train_command(args, load_config()?).await?,
        Commands::History(args) => run_history_command(args, load_config()?).await?,
        Commands::Tutorial(args) => run_tutorial_command(args, load_config()?)?,
    }
    Ok(())
}

fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::from_env().context("Invalid DEBATE_* configuration")
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn run_analyze_command(args: AnalyzeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(model) = args.llm.model.clone() {
        config.model = Some(model);
    }
    let llm_client = build_llm_client(&args.llm)?;
    let analyst = LogicAnalyst::new(llm_client, config.analyst_config());

    let result = analyst.analyze(&args.sentence, &args.context).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_parse_command(args: ParseArgs) -> anyhow::Result<()> {
    let raw = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = parse_response(&raw, &args.sentence);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_train_command(args: TrainArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(model) = args.llm.model.clone() {
        config.model = Some(model);
    }
    if let Some(path) = args.session_db.clone() {
        config.session_db = Some(path);
    }

    let llm_client = build_llm_client(&args.llm)?;
    let trainer = DebateTrainer::new(
        open_store(&config).await?,
        LogicAnalyst::new(llm_client.clone(), config.analyst_config()),
        OpponentAgent::new(llm_client, config.opponent_config()),
    );

    let conversation = match (args.conversation, args.topic) {
        (Some(id), _) => trainer.history(id).await?,
        (None, Some(topic_id)) => trainer.start(topic_id, args.side).await?,
        (None, None) => anyhow::bail!("Either --topic or --conversation is required"),
    };

    let topic_title = conversation.topic().map(|t| t.title).unwrap_or("unknown topic");
    println!("Conversation {}", conversation.id);
    println!("Topic: {} (you are {})", topic_title, conversation.user_side);
    println!("Enter one argument per line; an empty line or EOF ends the session.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            break;
        }
        let round = trainer.play_round(conversation.id, &line).await?;
        print_round(&round);
    }

    info!(conversation_id = %conversation.id, "Training session ended");
    Ok(())
}

async fn run_history_command(args: HistoryArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(path) = args.session_db.clone() {
        config.session_db = Some(path);
    }
    if config.session_db.is_none() {
        anyhow::bail!("History needs a session database: pass --session-db or set DEBATE_SESSION_DB");
    }

    let history = SessionHistory::new(open_store(&config).await?);
    let output = if args.current {
        serde_json::to_string_pretty(&history.current_chain(args.conversation).await?)?
    } else if args.chains {
        serde_json::to_string_pretty(&history.logic_chains(args.conversation).await?)?
    } else {
        serde_json::to_string_pretty(&history.conversation(args.conversation).await?)?
    };
    println!("{output}");
    Ok(())
}

fn run_tutorial_command(args: TutorialArgs, config: AppConfig) -> anyhow::Result<()> {
    let bank = match args.file.or(config.tutorial_file) {
        Some(path) => TutorialBank::from_yaml_file(&path)
            .with_context(|| format!("Failed to load tutorial questions from {}", path.display()))?,
        None => TutorialBank::default(),
    };

    let output = match (args.question, args.answer) {
        (Some(id), Some(answer)) => serde_json::to_string_pretty(&bank.check_answer(id, answer)?)?,
        (Some(id), None) => {
            let question = bank
                .question(id)
                .ok_or(crate::error::TutorialError::UnknownQuestion(id))?;
            serde_json::to_string_pretty(&question.prompt())?
        }
        (None, _) => {
            let question = bank
                .next_question(None)
                .context("Tutorial question bank is empty")?;
            serde_json::to_string_pretty(&question.prompt())?
        }
    };
    println!("{output}");
    Ok(())
}

fn print_round(round: &DebateRound) {
    println!("Opponent: {}", round.ai.text);
    println!(
        "  you:      {}  (valid: {}, sound: {})",
        display_expression(&round.user.logic_chain.logical_expression),
        round.user.logic_chain.performance.valid,
        round.user.logic_chain.performance.sound,
    );
    println!(
        "  opponent: {}  (valid: {}, sound: {})\n",
        display_expression(&round.ai.logic_chain.logical_expression),
        round.ai.logic_chain.performance.valid,
        round.ai.logic_chain.performance.sound,
    );
}

fn display_expression(expression: &str) -> &str {
    if expression.is_empty() {
        "<no expression>"
    } else {
        expression
    }
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    Ok(match &config.session_db {
        Some(path) => Arc::new(SqliteSessionStore::open(path).await?),
        None => Arc::new(InMemorySessionStore::new()),
    })
}

fn build_llm_client(args: &LlmArgs) -> anyhow::Result<Arc<dyn LlmProvider>> {
    let key_from = |var: &str| {
        args.api_key
            .clone()
            .or_else(|| std::env::var(var).ok())
            .with_context(|| format!("Missing API key: pass --api-key or set {var}"))
    };

    let client: Arc<dyn LlmProvider> = match args.backend {
        Backend::Openai => Arc::new(LiteLlmClient::openai(key_from("OPENAI_API_KEY")?)),
        Backend::Deepseek => Arc::new(LiteLlmClient::deepseek(key_from("DEEPSEEK_API_KEY")?)),
        Backend::Openrouter => Arc::new(OpenRouterProvider::new(key_from("OPENROUTER_API_KEY")?)),
        Backend::Litellm => Arc::new(LiteLlmClient::from_env().map_err(|e| {
            anyhow::anyhow!(
                "Failed to initialize LLM client: {}. Please set LITELLM_API_BASE.",
                e
            )
        })?),
    };

    info!(backend = ?args.backend, "LLM backend selected");
    Ok(client)
}
