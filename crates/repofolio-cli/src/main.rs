use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repofolio_api::GitHubClient;
use repofolio_core::{
    sources::{GitHubSource, StaticSource},
    Config, FeedOptions, RepoFeed, RepoSummary, SqliteEntryStore,
};
use repofolio_render::Renderer;

#[derive(Parser)]
#[command(name = "repofolio")]
#[command(version, about = "Renders a portfolio page's repository panel from the GitHub API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch (or reuse the cached) repository list and emit the HTML fragment
    Render {
        /// Write the fragment here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the configured GitHub username
        #[arg(long)]
        user: Option<String>,

        /// Skip the cache for this render
        #[arg(long)]
        no_cache: bool,
    },
    /// Drop the cached repository list
    ClearCache,
    /// Write a default config file to edit
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repofolio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Render {
            output,
            user,
            no_cache,
        } => {
            if let Some(user) = user {
                config.github.username = user;
            }
            render(&config, output, no_cache).await
        }
        Commands::ClearCache => {
            let store = SqliteEntryStore::open(&config.cache_db_path()?)?;
            store.clear(&FeedOptions::default().cache_key)?;
            println!("Cache cleared");
            Ok(())
        }
        Commands::InitConfig => {
            config.save()?;
            println!("Wrote default config");
            Ok(())
        }
    }
}

async fn render(config: &Config, output: Option<PathBuf>, no_cache: bool) -> anyhow::Result<()> {
    let feed = build_feed(config, no_cache)?;

    let renderer = Renderer::new(config.feed.exclude.clone(), config.github.profile_url())
        .with_post_render(Box::new(|| {
            // Stand-in for the page's stagger-reveal trigger
            tracing::debug!("card fragment complete, reveal can be scheduled");
        }));

    let fragment = fragment_for(feed.load().await, &renderer);

    match output {
        Some(path) => {
            std::fs::write(&path, fragment)?;
            tracing::info!("wrote fragment to {}", path.display());
        }
        None => print!("{}", fragment),
    }

    Ok(())
}

/// Materialize a pipeline result. A failed fetch still produces output:
/// the static fallback panel, with the error kept on the diagnostic channel.
fn fragment_for(
    result: repofolio_core::Result<Vec<RepoSummary>>,
    renderer: &Renderer,
) -> String {
    match result {
        Ok(repos) => renderer.render(repos),
        Err(e) => {
            tracing::error!("failed to load repositories: {}", e);
            renderer.render_fallback()
        }
    }
}

fn build_feed(config: &Config, no_cache: bool) -> anyhow::Result<RepoFeed> {
    let options = FeedOptions {
        ttl: config.feed.ttl(),
        ..FeedOptions::default()
    };

    // Pinned list configured? Then there is no fetch and nothing to cache.
    if let Some(static_repos) = &config.feed.static_repos {
        let repos = static_repos.iter().cloned().map(Into::into).collect();
        return Ok(RepoFeed::new(Box::new(StaticSource::new(repos)), options));
    }

    if config.github.username.is_empty() {
        anyhow::bail!("no GitHub username configured; set [github].username or pass --user");
    }

    let client = GitHubClient::with_base_url(
        config.github.token.clone(),
        config.github.api_url.clone(),
    );
    let source = GitHubSource::new(
        client,
        config.github.username.clone(),
        config.feed.per_page,
    );

    let mut feed = RepoFeed::new(Box::new(source), options);

    if config.cache.enabled && !no_cache {
        // A broken cache store downgrades to an uncached render, it never
        // blocks the panel.
        match SqliteEntryStore::open(&config.cache_db_path()?) {
            Ok(store) => feed = feed.with_store(Box::new(store)),
            Err(e) => tracing::warn!("cache unavailable, rendering without it: {}", e),
        }
    }

    Ok(feed)
}
