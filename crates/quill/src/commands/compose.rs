//! Interactive session: type material, search news, generate, copy.
//!
//! One `tokio::select!` loop drives stdin, the in-flight generation, the
//! in-flight trend/search requests and the draft autosave timer. State lives
//! in the loop; spawned tasks only ever return results to it.

use super::generate::{options_for, record_history};
use super::search::print_report;
use super::Context;
use crate::article::GeneratedArticle;
use crate::display::{self, Section, View};
use crate::error::QuillError;
use crate::gemini::{models, TextGenerator, ThinkingLevel};
use crate::generate::generate_bilingual_content;
use crate::news::{self, SearchOutcome, SearchReport, TopicFlow, TopicPhase, RANDOM_TOPIC};
use crate::prompt::Style;
use crate::state::AppState;
use crate::storage::DraftAutosaver;
use anyhow::Result;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeCommand {
  Text(String),
  Generate,
  Style(Option<Style>),
  Model(String),
  Search(String),
  Pick(usize),
  Show(View),
  Copy(Section),
  Load(String),
  Draft,
  Clear,
  Keywords,
  History,
  Help,
  Quit,
  Unknown(String),
}

/// Read one input line. Lines starting with `:` are commands.
pub fn parse_command(line: &str) -> ComposeCommand {
  let trimmed = line.trim();
  let Some(rest) = trimmed.strip_prefix(':') else {
    return ComposeCommand::Text(line.trim_end().to_string());
  };

  let (name, arg) = match rest.split_once(char::is_whitespace) {
    Some((name, arg)) => (name, arg.trim()),
    None => (rest, ""),
  };

  match name {
    "go" | "generate" | "g" => ComposeCommand::Generate,
    "style" => ComposeCommand::Style(Style::parse(arg)),
    "model" if !arg.is_empty() => ComposeCommand::Model(arg.to_string()),
    "search" | "s" => {
      let topic = if arg.is_empty() { RANDOM_TOPIC } else { arg };
      ComposeCommand::Search(topic.to_string())
    }
    "pick" => match arg.parse::<usize>() {
      Ok(n) if n > 0 => ComposeCommand::Pick(n),
      _ => ComposeCommand::Unknown(trimmed.to_string()),
    },
    "show" => match arg {
      "" => ComposeCommand::Show(View::Both),
      "en" | "english" => ComposeCommand::Show(View::English),
      "zh" | "chinese" => ComposeCommand::Show(View::Chinese),
      _ => ComposeCommand::Unknown(trimmed.to_string()),
    },
    "copy" => match Section::from_str(arg, true) {
      Ok(section) => ComposeCommand::Copy(section),
      Err(_) => ComposeCommand::Unknown(trimmed.to_string()),
    },
    "load" if !arg.is_empty() => ComposeCommand::Load(arg.to_string()),
    "draft" => ComposeCommand::Draft,
    "clear" => ComposeCommand::Clear,
    "keywords" | "k" => ComposeCommand::Keywords,
    "history" | "h" => ComposeCommand::History,
    "help" | "?" => ComposeCommand::Help,
    "quit" | "q" | "exit" => ComposeCommand::Quit,
    _ => ComposeCommand::Unknown(trimmed.to_string()),
  }
}

fn print_help() {
  herald::announce("quill compose");
  herald::hint(
    "Type or paste material; each line is added to the draft.\n\
     :go                generate from the draft\n\
     :search [TOPIC]    latest news (no topic = 隨機)\n\
     :pick N            cite news item N into the draft\n\
     :show [en|zh]      show the current result\n\
     :copy SECTION      copy part of the result (e.g. html, threads, body)\n\
     :style NAME        professional, humorous, empathetic, storytelling, analytical\n\
     :model NAME        switch model (see 'quill models')\n\
     :load ID           reopen a history entry\n\
     :history  :keywords  :draft  :clear  :help  :quit",
  );
}

async fn join_task<T>(task: &mut Option<JoinHandle<T>>) -> std::result::Result<T, JoinError> {
  match task {
    Some(handle) => handle.await,
    None => std::future::pending().await,
  }
}

async fn sleep_until_due(deadline: Option<Instant>) {
  match deadline {
    Some(deadline) => tokio::time::sleep_until(deadline).await,
    None => std::future::pending().await,
  }
}

fn flatten<T>(joined: std::result::Result<crate::Result<T>, JoinError>) -> crate::Result<T> {
  joined.unwrap_or_else(|e| Err(QuillError::transport(format!("background task failed: {e}"))))
}

fn report_error(err: &QuillError) {
  herald::error(&err.to_string());
  if err.is_credential_error() {
    herald::hint("Fix the key with 'quill key set', then try again.");
  }
}

struct Session {
  generator: Arc<dyn TextGenerator>,
  state: AppState,
  thinking: Option<ThinkingLevel>,
  temperature: f32,
  search_model: String,
  buffer: String,
  autosaver: DraftAutosaver,
  flow: TopicFlow,
  generation: Option<JoinHandle<crate::Result<GeneratedArticle>>>,
  trends: Option<JoinHandle<crate::Result<Vec<String>>>>,
  search: Option<JoinHandle<crate::Result<SearchOutcome>>>,
}

impl Session {
  fn set_buffer(&mut self, text: String) {
    self.buffer = text;
    self.autosaver.edit(self.buffer.clone(), Instant::now());
  }

  fn start_generation(&mut self) {
    if self.buffer.trim().is_empty() {
      herald::warn("The draft is empty. Type or paste some material first.");
      return;
    }
    if let Err(err) = self.state.begin_generation() {
      herald::warn(&format!("{err}, please wait"));
      return;
    }

    let mut options = crate::generate::GenerationOptions::new(self.state.style, self.state.model.clone());
    options.temperature = self.temperature;
    options.thinking = self.thinking;

    herald::info(&format!(
      "Generating {} content with {}...",
      options.style.label(),
      models::badge(&options.model)
    ));

    let generator = Arc::clone(&self.generator);
    let input = self.buffer.clone();
    self.generation = Some(tokio::spawn(async move {
      generate_bilingual_content(generator.as_ref(), &input, &options).await
    }));
  }

  fn start_search(&mut self, topic: &str) {
    if let Err(err) = self.state.begin_search() {
      herald::warn(&format!("{err}, please wait"));
      return;
    }

    if self.flow.start(topic) != &TopicPhase::FetchingTrends {
      self.spawn_search();
      return;
    }

    herald::info("Fetching trending keywords...");
    let generator = Arc::clone(&self.generator);
    let model = self.search_model.clone();
    self.trends = Some(tokio::spawn(async move { news::trending_topics(generator.as_ref(), &model).await }));
  }

  fn spawn_search(&mut self) {
    let Some(topic) = self.flow.begin_search() else {
      self.flow.finish();
      if let Err(err) = self.state.apply_search(Err(QuillError::transport("no topic to search"))) {
        report_error(&err);
      }
      return;
    };

    herald::info(&format!("Searching news for 「{topic}」..."));
    let generator = Arc::clone(&self.generator);
    let model = self.search_model.clone();
    self.search =
      Some(tokio::spawn(async move { news::search_news(generator.as_ref(), &topic, &model).await }));
  }

  fn trends_done(&mut self, trends: crate::Result<Vec<String>>, rng: &mut StdRng) {
    if let Ok(topics) = &trends {
      herald::event_info(&format!("{} trending keywords received", topics.len()));
    }
    self.flow.trends_arrived(trends, &mut self.state.keywords, rng);
    self.spawn_search();
  }

  fn search_done(&mut self, outcome: crate::Result<SearchOutcome>) {
    let topic = match self.flow.phase() {
      TopicPhase::Searching(topic) => topic.clone(),
      _ => String::new(),
    };
    let notice = self.flow.notice().map(str::to_string);
    self.flow.finish();

    let result = outcome.map(|outcome| SearchReport { topic, outcome, notice });
    match self.state.apply_search(result) {
      Ok(report) => {
        herald::event_success(&format!("Search for 「{}」 finished", report.topic));
        print_report(report);
        if !report.outcome.is_empty() {
          herald::hint("Cite one with :pick N");
        }
      }
      Err(err) => {
        herald::event_warn("Search failed");
        report_error(&err);
      }
    }
  }

  fn generation_done(&mut self, result: crate::Result<GeneratedArticle>, ctx: &Context) {
    match self.state.apply_generation(result) {
      Ok(article) => {
        let article = article.clone();
        herald::event_success("Generation finished");
        record_history(&ctx.history(), &article);
        display::render(&article, View::Both);
        herald::success("Done. :copy SECTION to grab a piece.");
      }
      Err(err) => {
        herald::event_warn("Generation failed");
        report_error(&err);
      }
    }
  }

  /// Returns false when the session should end
  fn handle_command(&mut self, command: ComposeCommand, ctx: &Context) -> bool {
    match command {
      ComposeCommand::Text(text) => {
        let next = if self.buffer.is_empty() { text } else { format!("{}\n{text}", self.buffer) };
        self.set_buffer(next);
      }
      ComposeCommand::Generate => self.start_generation(),
      ComposeCommand::Style(Some(style)) => {
        self.state.style = style;
        herald::info(&format!("Style: {} ({})", style, style.label()));
      }
      ComposeCommand::Style(None) => {
        herald::warn("Unknown style. Use professional, humorous, empathetic, storytelling or analytical.")
      }
      ComposeCommand::Model(name) => {
        self.state.model = models::resolve_model_id(&name);
        herald::info(&format!("Model: {}", self.state.model));
      }
      ComposeCommand::Search(topic) => self.start_search(&topic),
      ComposeCommand::Pick(position) => match self.state.news_item(position).cloned() {
        Some(item) => {
          let next = format!("{}{}", item.citation(), self.buffer);
          self.set_buffer(next);
          herald::success(&format!("Cited 「{}」", item.title));
        }
        None => herald::warn(&format!("No news item #{position}")),
      },
      ComposeCommand::Show(view) => match self.state.active() {
        Some(article) => display::render(article, view),
        None => herald::info("Nothing generated yet. Use :go"),
      },
      ComposeCommand::Copy(section) => match self.state.active() {
        Some(article) => {
          let text = section.copy_text(article);
          if text.trim().is_empty() {
            herald::warn(&format!("{} is empty in this result", section.label()));
          } else {
            let mut stdout = std::io::stdout().lock();
            match write!(stdout, "{}", super::copy::osc52_sequence(&text)).and_then(|_| stdout.flush()) {
              Ok(()) => herald::success(&format!("Copied {}", section.label())),
              Err(err) => herald::error(&format!("Copy failed: {err}")),
            }
          }
        }
        None => herald::info("Nothing generated yet. Use :go"),
      },
      ComposeCommand::Load(id) => match ctx.history().find(&id) {
        Ok(entry) => {
          let input = entry.data.original_input().unwrap_or_default().to_string();
          self.buffer = input.clone();
          self.autosaver.reseed(input);
          self.state.set_active(entry.data);
          herald::success(&format!("Loaded {}", entry.title));
        }
        Err(err) => report_error(&err),
      },
      ComposeCommand::Draft => {
        if self.buffer.is_empty() {
          herald::info("The draft is empty.");
        } else {
          println!("{}", self.buffer);
        }
      }
      ComposeCommand::Clear => {
        self.set_buffer(String::new());
        herald::info("Draft buffer cleared");
      }
      ComposeCommand::Keywords => println!("{}", self.state.keywords.keywords().join("  ")),
      ComposeCommand::History => {
        if let Err(err) = super::history::list(ctx) {
          herald::error(&err.to_string());
        }
      }
      ComposeCommand::Help => print_help(),
      ComposeCommand::Quit => return false,
      ComposeCommand::Unknown(input) => herald::warn(&format!("Unknown command '{input}'. Type :help")),
    }
    true
  }
}

pub async fn handle(
  ctx: &Context,
  style: Option<Style>,
  model: Option<String>,
  thinking: Option<ThinkingLevel>,
) -> Result<()> {
  let generator = ctx.generator()?;
  let options = options_for(ctx, style, model.as_deref(), thinking);
  let drafts = ctx.drafts();
  let seed = drafts.load().unwrap_or_default();

  let mut session = Session {
    generator,
    state: AppState::new(options.style, options.model.clone()),
    thinking: options.thinking,
    temperature: options.temperature,
    search_model: ctx.search_model(None),
    buffer: seed.clone(),
    autosaver: DraftAutosaver::new(seed, ctx.config.draft_debounce()),
    flow: TopicFlow::new(),
    generation: None,
    trends: None,
    search: None,
  };
  let mut rng = StdRng::from_os_rng();

  print_help();
  if !session.buffer.is_empty() {
    herald::hint(&format!("Restored draft ({} chars). :draft to view it.", session.buffer.chars().count()));
  }

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line? else { break };
        if !session.handle_command(parse_command(&line), ctx) {
          break;
        }
      }
      joined = join_task(&mut session.generation) => {
        session.generation = None;
        session.generation_done(flatten(joined), ctx);
      }
      joined = join_task(&mut session.trends) => {
        session.trends = None;
        session.trends_done(flatten(joined), &mut rng);
      }
      joined = join_task(&mut session.search) => {
        session.search = None;
        session.search_done(flatten(joined));
      }
      _ = sleep_until_due(session.autosaver.deadline()) => {
        if let Err(err) = session.autosaver.commit_due(&drafts, Instant::now()) {
          herald::warn(&format!("Draft autosave failed: {err}"));
        }
      }
    }
  }

  if session.generation.is_some() || session.search.is_some() || session.trends.is_some() {
    herald::warn("Leaving with a request still in flight; its result is discarded.");
  }
  Ok(())
}
