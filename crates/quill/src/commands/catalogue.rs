use crate::gemini::models::{CATALOGUE, DEFAULT_MODEL};
use anyhow::Result;
use colored::Colorize;

/// Print the model comparison
pub fn handle(current: &str) -> Result<()> {
  herald::announce("Gemini models");

  for model in CATALOGUE {
    let marker = if model.id == current { "▶".green().to_string() } else { " ".to_string() };
    println!();
    println!("{marker} {} {}", model.name.bold(), model.label.dimmed());
    println!("    id:        {}", model.id);
    println!("    speed:     {}", model.speed);
    println!("    reasoning: {}", model.reasoning);
    println!("    stability: {}", model.stability);
    println!("    best for:  {}", model.best_for);
  }

  println!();
  herald::hint(&format!("Default: {DEFAULT_MODEL}. Any other model id is passed through as-is."));
  Ok(())
}
