use super::Context;
use crate::article::{GroundingSource, NewsItem};
use crate::news::{self, KeywordBoard, SearchOutcome, SearchReport};
use crate::storage::DraftStore;
use anyhow::{anyhow, Result};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Put the citation for `item` in front of the saved draft. Returns the new draft.
pub fn cite_into_draft(drafts: &DraftStore, item: &NewsItem) -> crate::Result<String> {
  let existing = drafts.load().unwrap_or_default();
  let draft = format!("{}{existing}", item.citation());
  drafts.save(&draft)?;
  Ok(draft)
}

pub fn print_sources(sources: &[GroundingSource]) {
  if sources.is_empty() {
    return;
  }
  println!();
  println!("{}", "參考來源".dimmed());
  for source in sources {
    println!("  {} {}", source.title, source.uri.cyan().underline());
  }
}

pub fn print_report(report: &SearchReport) {
  if let Some(notice) = &report.notice {
    herald::warn(notice);
  }

  match &report.outcome {
    SearchOutcome::Found { news, sources } => {
      herald::info(&format!("「{}」最新新聞", report.topic));
      for (index, item) in news.iter().enumerate() {
        println!();
        println!("{} {}", format!("[{}]", index + 1).bold(), item.title.bold());
        let meta = [item.source.as_str(), item.time.as_str()]
          .into_iter()
          .filter(|s| !s.trim().is_empty())
          .collect::<Vec<_>>()
          .join(" · ");
        if !meta.is_empty() {
          println!("    {}", meta.dimmed());
        }
        if !item.snippet.trim().is_empty() {
          println!("    {}", item.snippet);
        }
        if let Some(link) = item.link.as_deref().filter(|l| !l.is_empty()) {
          println!("    {}", link.cyan().underline());
        }
      }
      print_sources(sources);
    }
    SearchOutcome::NoResults { sources } => {
      herald::info(&format!("找不到「{}」的相關新聞，試試其他關鍵字。", report.topic));
      print_sources(sources);
    }
  }
}

pub async fn handle(ctx: &Context, topic: String, model: Option<String>, pick: Option<usize>) -> Result<()> {
  let model = ctx.search_model(model.as_deref());
  let generator = ctx.generator()?;

  if news::is_random_topic(&topic) {
    herald::info("Fetching trending keywords...");
  } else {
    herald::info(&format!("Searching news for 「{}」...", topic.trim()));
  }

  let mut board = KeywordBoard::default();
  let mut rng = StdRng::from_os_rng();
  let report = news::run_topic_search(generator.as_ref(), &mut board, &topic, &model, &mut rng).await?;
  print_report(&report);

  if let Some(position) = pick {
    let item = report
      .outcome
      .news()
      .get(position.saturating_sub(1))
      .filter(|_| position > 0)
      .ok_or_else(|| anyhow!("No news item #{position} in these results"))?;
    cite_into_draft(&ctx.drafts(), item)?;
    herald::success(&format!("Added 「{}」 to the draft", item.title));
  }

  Ok(())
}
