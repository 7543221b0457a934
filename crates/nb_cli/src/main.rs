use clap::{Args, Parser, Subcommand};
use nb_core::{parse_date, Action, Article, ArticleId, ArticleSource, Config, ListKind, Result};
use nb_feed::{BrowseRequest, GNewsClient, NewsBrowser, View};
use nb_storage::StateStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod logging;
mod output;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse news headlines and keep track of what you liked", long_about = None)]
pub struct Cli {
    /// Storage backend for likes and favorites: memory or sqlite
    #[arg(long, env = "NB_STORE", default_value = "sqlite")]
    store: String,
    /// Database file for the sqlite backend
    #[arg(long, env = "NB_STORE_PATH")]
    store_path: Option<PathBuf>,
    /// GNews API key
    #[arg(long, env = "GNEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Base URL of the news API
    #[arg(long, env = "NB_API_BASE", default_value = nb_core::config::DEFAULT_API_BASE)]
    api_base: String,
    #[arg(long, default_value = "en")]
    lang: String,
    #[arg(long, default_value = "us")]
    country: String,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a page of headlines for a category or a search
    Browse {
        /// general, business, entertainment, health, science, sports or technology
        #[arg(short, long, default_value = "general")]
        category: String,
        /// Free-text search; takes precedence over the category
        #[arg(short, long)]
        search: Option<String>,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Show the articles in one of your lists
    List {
        #[arg(value_parser = parse_list_kind)]
        kind: ListKind,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Like, dislike or favorite an article
    Act {
        #[arg(value_parser = parse_action)]
        action: Action,
        #[command(flatten)]
        article: ArticleArgs,
    },
    /// Show the stored state of an article
    State {
        #[command(flatten)]
        article: ArticleArgs,
    },
    /// Count the articles in each list
    Counts,
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Args, Debug, Clone)]
struct PagingArgs {
    /// Only articles published on this day (YYYY-MM-DD, UTC)
    #[arg(short, long)]
    date: Option<String>,
    #[arg(short, long, default_value_t = 1)]
    page: usize,
}

#[derive(Args, Debug, Clone)]
struct ArticleArgs {
    /// The article as JSON, as returned by the API
    #[arg(long, conflicts_with_all = ["title", "source"])]
    json: Option<String>,
    #[arg(long, required_unless_present = "json")]
    title: Option<String>,
    #[arg(long, required_unless_present = "json")]
    source: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    published_at: Option<String>,
}

impl ArticleArgs {
    fn to_article(&self) -> Result<Article> {
        if let Some(json) = &self.json {
            return Ok(serde_json::from_str(json)?);
        }
        Ok(Article {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            content: None,
            url: self.url.clone(),
            image: self.image.clone(),
            published_at: self.published_at.clone(),
            source: self.source.clone().map(|name| ArticleSource::Named { name, url: None }),
        })
    }
}

fn parse_action(raw: &str) -> std::result::Result<Action, String> {
    Action::parse(raw).ok_or_else(|| format!("unknown action '{raw}' (expected like, dislike or favorite)"))
}

fn parse_list_kind(raw: &str) -> std::result::Result<ListKind, String> {
    raw.parse().map_err(|e: nb_core::Error| e.to_string())
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            api_base: self.api_base.clone(),
            lang: self.lang.clone(),
            country: self.country.clone(),
            ..Config::default()
        }
    }
}

impl PagingArgs {
    fn request(&self, view: View) -> Result<BrowseRequest> {
        Ok(BrowseRequest {
            view,
            date: self.date.as_deref().map(parse_date).transpose()?,
            page: self.page,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = cli.config();
    config.validate()?;
    debug!(?config, "Loaded configuration");
    if config.api_key.is_none() {
        warn!("No GNews API key configured; set GNEWS_API_KEY or pass --api-key");
    }

    let store = nb_storage::create_store(&cli.store, cli.store_path.as_deref()).await?;
    info!("💾 Storage initialized (using {})", cli.store);
    let states = StateStore::with_prefix(store, config.key_prefix.clone());
    let browser = NewsBrowser::new(Arc::new(GNewsClient::new(&config)), states)
        .with_page_size(config.page_size);

    match cli.command {
        Commands::Browse {
            category,
            search,
            paging,
        } => {
            let request = paging.request(View::Feed { category, search })?;
            let result = browser.browse(&request).await?;
            print!("{}", output::format_browse(&result));
        }
        Commands::List { kind, paging } => {
            let result = browser.browse(&paging.request(View::List(kind))?).await?;
            print!("{}", output::format_browse(&result));
        }
        Commands::Act { action, article } => {
            let article = article.to_article()?;
            let outcome = browser.act(&article, action.as_str()).await?;
            println!("{}", output::format_state(&outcome.id, &outcome.state));
            println!("{}", output::format_counts(&outcome.counts));
        }
        Commands::State { article } => {
            let id = ArticleId::derive(&article.to_article()?);
            let state = browser.states().get_state(&id).await;
            println!("{}", output::format_state(&id, &state));
        }
        Commands::Counts => {
            println!("{}", output::format_counts(&browser.counts().await?));
        }
        Commands::Serve { addr } => {
            info!("🌐 Serving news API on http://{}", addr);
            nb_web::serve(nb_web::AppState { browser }, addr).await?;
        }
    }

    Ok(())
}
