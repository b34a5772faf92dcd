use anyhow::Result;
use clap::{Parser, Subcommand};
use quill::commands::{self, generate::GenerateArgs, Context};
use quill::display::{Section, View};
use quill::gemini::ThinkingLevel;
use quill::news::RANDOM_TOPIC;
use quill::prompt::Style;
use quill::QuillError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version, about = "Turn raw material into an English Blogger SEO package and a Chinese social media package")]
struct Cli {
  /// Gemini API key (or use GEMINI_API_KEY env var)
  #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
  api_key: Option<String>,

  /// Show diagnostic logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate a bilingual content bundle
  Generate {
    /// Source material (defaults to the saved draft)
    text: Option<String>,
    /// Read the material from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    style: Option<Style>,
    /// Model id or alias (pro, flash, 2.5, 2.0, lite)
    #[arg(short, long)]
    model: Option<String>,
    /// Reasoning effort hint
    #[arg(long, value_enum)]
    thinking: Option<ThinkingLevel>,
    #[arg(long, value_enum, default_value_t = View::Both)]
    view: View,
    /// Print the raw bundle as JSON
    #[arg(long)]
    json: bool,
  },
  /// Search the latest news on a topic
  Search {
    /// Topic to search; "隨機" or "random" picks a trending one
    #[arg(default_value = RANDOM_TOPIC)]
    topic: String,
    #[arg(short, long)]
    model: Option<String>,
    /// Cite result N into the saved draft
    #[arg(long)]
    pick: Option<usize>,
  },
  /// List trending keywords in Taiwan
  Trending {
    #[arg(short, long)]
    model: Option<String>,
  },
  /// Show a generated bundle (newest by default)
  Show {
    /// History id or prefix; also restores its material as the draft
    id: Option<String>,
    #[arg(long, value_enum, default_value_t = View::Both)]
    view: View,
    #[arg(long)]
    json: bool,
  },
  /// Copy one section of a bundle to the clipboard
  Copy {
    #[arg(value_enum)]
    section: Section,
    /// History id or prefix (newest by default)
    #[arg(long)]
    id: Option<String>,
    /// Print the text instead of using the terminal clipboard
    #[arg(long)]
    stdout: bool,
  },
  /// Interactive session with autosaved draft
  Compose {
    #[arg(short, long, value_enum)]
    style: Option<Style>,
    #[arg(short, long)]
    model: Option<String>,
    #[arg(long, value_enum)]
    thinking: Option<ThinkingLevel>,
  },
  /// Generation history
  History {
    #[command(subcommand)]
    command: HistoryCommands,
  },
  /// Saved draft
  Draft {
    #[command(subcommand)]
    command: DraftCommands,
  },
  /// Compare the available models
  Models,
  /// Manage the stored API key
  Key {
    #[command(subcommand)]
    command: KeyCommands,
  },
  /// Inspect or create config.json
  Config {
    #[command(subcommand)]
    command: ConfigCommands,
  },
}

#[derive(Subcommand)]
enum HistoryCommands {
  /// List saved bundles, newest first
  List,
  /// Delete all history
  Clear {
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum DraftCommands {
  Show,
  Set { text: String },
  Clear {
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum KeyCommands {
  /// Store a key (prompts when omitted)
  Set { key: Option<String> },
  Clear,
  /// Show which key would be used
  Status,
}

#[derive(Subcommand)]
enum ConfigCommands {
  Show,
  /// Write the default config.json
  Init {
    #[arg(long)]
    force: bool,
  },
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  herald::init_tracing(cli.verbose);

  if let Err(err) = run(cli).await {
    herald::error(&format!("{err:#}"));
    if err.downcast_ref::<QuillError>().is_some_and(QuillError::is_credential_error) {
      herald::hint("Set a key with 'quill key set' or export GEMINI_API_KEY.");
    }
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  // Writing a fresh config must work even when the current one is broken
  if let Commands::Config { command: ConfigCommands::Init { force } } = cli.command {
    return commands::config::init(force);
  }

  let ctx = Context::load(cli.api_key)?;

  match cli.command {
    Commands::Generate { text, file, style, model, thinking, view, json } => {
      let args = GenerateArgs { text, file, style, model, thinking, view, json };
      commands::generate::handle(&ctx, args).await
    }
    Commands::Search { topic, model, pick } => commands::search::handle(&ctx, topic, model, pick).await,
    Commands::Trending { model } => commands::trending::handle(&ctx, model).await,
    Commands::Show { id, view, json } => commands::show::handle(&ctx, id, view, json),
    Commands::Copy { section, id, stdout } => commands::copy::handle(&ctx, section, id, stdout),
    Commands::Compose { style, model, thinking } => {
      commands::compose::handle(&ctx, style, model, thinking).await
    }
    Commands::History { command } => match command {
      HistoryCommands::List => commands::history::list(&ctx),
      HistoryCommands::Clear { force } => commands::history::clear(&ctx, force),
    },
    Commands::Draft { command } => match command {
      DraftCommands::Show => commands::draft::show(&ctx),
      DraftCommands::Set { text } => commands::draft::set(&ctx, text),
      DraftCommands::Clear { force } => commands::draft::clear(&ctx, force),
    },
    Commands::Models => commands::catalogue::handle(&ctx.generation_model(None)),
    Commands::Key { command } => match command {
      KeyCommands::Set { key } => commands::key::set(&ctx, key),
      KeyCommands::Clear => commands::key::clear(&ctx),
      KeyCommands::Status => commands::key::status(&ctx),
    },
    Commands::Config { command } => match command {
      ConfigCommands::Show => commands::config::show(&ctx),
      ConfigCommands::Init { force } => commands::config::init(force),
    },
  }
}
