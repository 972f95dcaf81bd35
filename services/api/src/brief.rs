use crate::infra::{ops_state, reference_time};
use chrono::NaiveDate;
use clap::Args;
use opshub::config::AppConfig;
use opshub::error::AppError;
use opshub::ops::brief::{BriefRenderer, HtmlBriefRenderer};
use opshub::ops::store::InMemoryStore;
use opshub::ops::ReviewWindow;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct BriefArgs {
    /// Brief date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Review window in days (1-30). Defaults to BRIEF_REVIEW_DAYS.
    #[arg(long)]
    pub(crate) days: Option<i64>,
    /// Also write the printable HTML document to this path
    #[arg(long)]
    pub(crate) html: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ThemesArgs {
    /// Review window in days (1-30)
    #[arg(long)]
    pub(crate) days: Option<i64>,
}

pub(crate) fn run_brief(args: BriefArgs) -> Result<(), AppError> {
    let BriefArgs { today, days, html } = args;

    let config = AppConfig::load()?;
    let window = match days {
        Some(days) => ReviewWindow::new(days)?,
        None => config.sources.brief_window,
    };
    let now = reference_time(today);

    let store = Arc::new(InMemoryStore::default());
    store.seed_demo(now)?;
    let state = ops_state(&config, store, Some(now));

    let brief = state.briefs.today(window, now)?;
    for line in brief.summary_lines() {
        println!("{line}");
    }

    if let Some(path) = html {
        let document = HtmlBriefRenderer.render(&brief.view())?;
        std::fs::write(&path, &document.bytes)?;
        println!("\nWrote {} to {}", document.file_name, path.display());
    }

    Ok(())
}

pub(crate) fn run_themes(args: ThemesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let window = match args.days {
        Some(days) => ReviewWindow::new(days)?,
        None => ReviewWindow::default(),
    };
    let now = reference_time(None);

    let store = Arc::new(InMemoryStore::default());
    store.seed_demo(now)?;
    let state = ops_state(&config, store, Some(now));

    let themes = state.reviews.themes(window, now)?;
    println!("Review themes (last {} days)", window.days());
    if themes.is_empty() {
        println!("- No mentions of {}", state.reviews.keywords().join(", "));
    }
    for theme in themes {
        println!("- {}: {}", theme.name, theme.count);
    }

    Ok(())
}
