use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use bop_engine::logging::{init_logging, LoggingConfig};
use bop_feed::{DeckState, FeedClient, FeedSource, FixtureFeed, InteractionSink, LogSink, Recorder};
use bop_ui::prelude::Vec2;
use clap::Parser;
use log::{info, warn};

use bop_studio::cli::Cli;
use bop_studio::config::StudioConfig;
use bop_studio::runner::Runner;
use bop_studio::screen::{FeedScreen, SessionSummary};
use bop_studio::script::{self, Step};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..LoggingConfig::default() });

    let mut config = match &cli.config {
        Some(path) => load_config(path).await?,
        None => StudioConfig::default(),
    };
    if let Some(user) = cli.user {
        config.session.user_id = user;
    }
    let steps = load_steps(&cli).await?;

    let summary = match &cli.feed {
        Some(path) => {
            let feed = FixtureFeed::from_path(path, &config.api)
                .await
                .with_context(|| format!("failed to load fixture feed {}", path.display()))?;
            info!("offline: {} cards from {}", feed.len(), path.display());
            session(feed, Box::new(LogSink), &config, &cli, &steps).await?
        }
        None => {
            let client = FeedClient::new(config.api.clone()).context("invalid [api] settings")?;
            let recorder = Rc::new(Recorder::spawn(client.clone()));
            let sink = Box::new(Rc::clone(&recorder));
            let summary = session(client.clone(), sink, &config, &cli, &steps).await?;

            if let Ok(recorder) = Rc::try_unwrap(recorder) {
                let stats = recorder.shutdown().await;
                info!("interactions: {} delivered, {} failed", stats.delivered, stats.failed);
            }
            match client.liked_items(config.session.user_id).await {
                Ok(closet) => info!("closet: {} liked items", closet.len()),
                Err(e) => warn!("failed to read the closet: {e}"),
            }
            summary
        }
    };

    info!("session: {summary}");
    Ok(())
}

async fn session<S: FeedSource>(
    source: S,
    sink: Box<dyn InteractionSink>,
    config: &StudioConfig,
    cli: &Cli,
    steps: &[Step],
) -> Result<SessionSummary> {
    let state = DeckState::default()
        .with_prefetch_ratio(config.session.prefetch_ratio)
        .with_history_limit(config.session.history_limit);
    let screen =
        FeedScreen::new(state, config.deck, config.carousel.clone(), sink, config.session.user_id);

    let viewport = Vec2::new(config.screen.width, config.screen.height);
    let mut runner = Runner::new(source, screen, viewport, cli.fps, config.api.page_size);
    runner.prime().await.context("failed to fetch the first page")?;

    let summary = runner.run(steps).await;
    info!("{} frames at {} fps, {} cards fetched", runner.frames(), cli.fps, runner.fetched());

    Ok(summary)
}

async fn load_config(path: &Path) -> Result<StudioConfig> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path.display()))?;

    StudioConfig::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
}

async fn load_steps(cli: &Cli) -> Result<Vec<Step>> {
    if let Some(path) = &cli.script {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read script {}", path.display()))?;
        return script::parse(&text).with_context(|| format!("invalid script {}", path.display()));
    }
    if let Some(inline) = &cli.steps {
        return script::parse_inline(inline).context("invalid --steps");
    }

    Ok(vec![Step::Settle])
}
