use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nd_core::{FeedRequest, NewsSource, DEFAULT_COUNT};
use nd_feeds::GoogleNewsSource;
use nd_inference::{create_model, SummaryService};
use nd_storage::archive::display_topic;
use nd_storage::Storage;
use nd_web::{create_app, AppState};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    author,
    version,
    about = "Topic headlines with cached AI summaries",
    long_about = None
)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Directory holding config.json, cache.json and archive.json
    #[arg(long, global = true, env = "NEWSDESK_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web dashboard
    Serve {
        #[arg(long, env = "NEWSDESK_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "NEWSDESK_PORT", default_value_t = 5000)]
        port: u16,
        #[arg(
            long,
            default_value = "gemini",
            help = "Summarizer backend. Available models: gemini (default), dummy"
        )]
        model: String,
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        #[arg(long, env = "GEMINI_MODEL")]
        model_name: Option<String>,
    },
    /// Print the current headlines for a search query
    Fetch {
        query: String,
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,
    },
    /// List the configured topics
    Topics,
    /// Print the archive in display order
    Archive,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let storage = Storage::open(&cli.data_dir);

    match cli.command {
        Commands::Serve { host, port, model, api_key, model_name } => {
            if api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                warn!("GEMINI_API_KEY is not set; summaries will fall back to an error notice");
            }
            let config = nd_inference::Config {
                api_key,
                model_name,
                base_url: None,
            };
            let summarizer = create_model(&model, &config)?;
            let summaries = SummaryService::new(summarizer, storage.cache.clone());
            info!("🧠 Summaries by {} ({})", summaries.model().name(), config.model_name());

            let state = AppState {
                storage: storage.clone(),
                summaries,
                source: Arc::new(GoogleNewsSource::new()),
            };

            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("🌐 Serving on http://{} (data in {})", addr, storage.data_dir().display());
            axum::serve(listener, create_app(state)).await?;
        }
        Commands::Fetch { query, count } => {
            let config = storage.config.load()?;
            let source = GoogleNewsSource::new();
            let request = FeedRequest::new(query, count, &config.settings);
            let items = source.fetch(&request).await?;
            if items.is_empty() {
                println!("No headlines for '{}'", request.query);
            }
            for item in items {
                println!("{} ({}, {})\n  {}", item.title, item.source, item.published, item.link);
            }
        }
        Commands::Topics => {
            let config = storage.config.load()?;
            if config.topics.is_empty() {
                let path = storage.data_dir().join(nd_storage::CONFIG_FILE);
                println!("No topics configured in {}", path.display());
            }
            for topic in &config.topics {
                let ai = if topic.ai { "on" } else { "off" };
                println!("{:<24} {:<40} count={} ai={}", topic.name, topic.query, topic.count, ai);
            }
        }
        Commands::Archive => {
            let items = storage.archive.list_sorted()?;
            println!("{} saved articles", items.len());
            for item in &items {
                println!(
                    "[{}] {} ({})\n  {}",
                    display_topic(item),
                    item.title,
                    item.published,
                    item.link
                );
            }
        }
    }

    Ok(())
}
