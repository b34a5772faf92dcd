//! ## Herald
//!
//! Console output for the Quill tools.
//!
//! - Levelled, prefixed status lines (info, warn, error, success)
//! - Banners for announcements and blocking prompts
//! - Timestamped event lines for background work finishing in `quill compose`
//! - `tracing` subscriber setup for diagnostic logging
//!
//! Everything here writes to stderr so that stdout stays clean for content
//! that users pipe elsewhere (copied sections, raw HTML, JSON).

use chrono::Local;
use colored::*;
use tracing_subscriber::EnvFilter;

/// Default filter used when `RUST_LOG` is not set.
const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,quill=debug,herald=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` always wins. Otherwise only warnings are shown unless `verbose`
/// is set. Returns false if a subscriber was already installed.
pub fn init_tracing(verbose: bool) -> bool {
  let fallback = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .is_ok()
}

/// Core output function, one stderr line per message line
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

fn format_prefix(color: Color, prefix: &str) -> String {
  let pad = 7usize.saturating_sub(prefix.len() + 2);
  format!("[{}]{:<pad$}", prefix.color(color).bold(), "")
}

/// Prefix every line of `message`.
pub fn prefixed_lines(color: Color, prefix: &str, message: &str) -> Vec<String> {
  let prefix = format_prefix(color, prefix);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

fn emit(color: Color, prefix: &str, message: &str) {
  for line in prefixed_lines(color, prefix, message) {
    log(&line);
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Display a message with a banner around it
fn as_banner<F>(log_fn: F, message: &str, width: Option<usize>, border_char: Option<char>)
where
  F: Fn(&str),
{
  let width = width.unwrap_or(50);
  let border_char = border_char.unwrap_or('=');

  let banner = banner_line(width, border_char);

  log_fn(&banner);
  for line in message.lines() {
    log_fn(line);
  }
  log_fn(&banner);
}

/// General information
pub fn info(message: &str) {
  emit(Color::Blue, "info", message);
}

/// Something needs attention
pub fn warn(message: &str) {
  emit(Color::Yellow, "warn", message);
}

/// Something went wrong
pub fn error(message: &str) {
  emit(Color::Red, "error", message);
}

/// Something completed successfully
pub fn success(message: &str) {
  emit(Color::Green, "sccs", message);
}

/// Low-key hint printed without a prefix
pub fn hint(message: &str) {
  for line in message.lines() {
    log(&line.dimmed().to_string());
  }
}

fn event(color: Color, message: &str) {
  let timestamp = Local::now().format("%H:%M:%S").to_string();
  let prefix = format!("[{}] [{}]", "event".color(color).bold(), timestamp.cyan());
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Timestamped info event
pub fn event_info(message: &str) {
  event(Color::Blue, message);
}

/// Timestamped warning event
pub fn event_warn(message: &str) {
  event(Color::Yellow, message);
}

/// Timestamped success event
pub fn event_success(message: &str) {
  event(Color::Green, message);
}

/// Important but not critical
pub fn announce(message: &str) {
  as_banner(|msg| log(&msg.blue().bold().to_string()), message, Some(50), Some('-'));
}

/// Highlight important information
pub fn spotlight(message: &str) {
  as_banner(|msg| log(&msg.yellow().bold().to_string()), message, Some(40), Some('*'));
}

/// Blocking condition the user has to act on
pub fn showstopper(message: &str) {
  as_banner(|msg| log(&msg.bright_red().bold().to_string()), message, Some(60), Some('*'));
}

/// Width to wrap content at: the terminal width clamped to 40..=100,
/// or 80 when stdout is not a terminal.
pub fn content_width() -> usize {
  let term = console::Term::stdout();
  if !term.is_term() {
    return 80;
  }
  let (_, cols) = term.size();
  (cols as usize).clamp(40, 100)
}

/// Whether a human is sitting at the terminal and can answer prompts
pub fn is_attended() -> bool {
  console::user_attended()
}
