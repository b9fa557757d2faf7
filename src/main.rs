//! APCEA CLI
//!
//! Preview and check site content without a browser:
//! - Render the news list, an article or the course catalog
//! - Fetch a shared fragment with its links rewritten
//! - Check the data files for problems
//! - Generate a default config file

use anyhow::{bail, Context};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apcea::chrome::{normalize_root, Fragment, TemplateInjector};
use apcea::config::{generate_default_config, Config};
use apcea::content::{check_catalog, check_news, ContentLoader, DetailOutcome, Issue};
use apcea::fetch::{DirFetcher, FetchResult, HttpFetcher, ResourceFetcher};

#[derive(Parser)]
#[command(name = "apcea")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Preview and check APCEA site content")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site directory or http(s) URL of a deployed site
    #[arg(long, default_value = ".", global = true)]
    pub site: String,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Site root path, overriding the config
    #[arg(long, global = true)]
    pub root_path: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the news list
    News {
        /// Maximum number of cards
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Render an article's detail page regions
    Article {
        /// Article id
        id: String,
    },

    /// Render the course catalog tabs
    Courses,

    /// Fetch a shared fragment (navbar, footer) with links rewritten
    Template {
        /// Fragment name
        name: String,
    },

    /// Check the data files
    Check,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where site resources come from
enum Source {
    Dir(DirFetcher),
    Http(HttpFetcher),
}

impl Source {
    fn new(site: &str, root_path: &str) -> Self {
        if site.starts_with("http://") || site.starts_with("https://") {
            Source::Http(HttpFetcher::new(site))
        } else {
            Source::Dir(DirFetcher::new(site).root_path(root_path))
        }
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for Source {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        match self {
            Source::Dir(f) => f.fetch_text(url).await,
            Source::Http(f) => f.fetch_text(url).await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    init_logging(&config);

    let root_path = normalize_root(
        cli.root_path
            .as_deref()
            .or(config.site.root_path.as_deref())
            .unwrap_or("/"),
    );
    tracing::debug!(site = %cli.site, root = %root_path, "Resolved content source");
    let source = Source::new(&cli.site, &root_path);

    match cli.command {
        Commands::News { limit } => {
            let loader = ContentLoader::new(source, &config.site, &root_path);
            let rendered = loader.render_list(limit.or(config.content.list_limit)).await;
            println!("{}", rendered.html());
            if !rendered.is_content() {
                bail!("news list could not be loaded");
            }
        }

        Commands::Article { id } => {
            let loader = ContentLoader::new(source, &config.site, &root_path);
            match loader.render_detail(&id).await {
                DetailOutcome::Found(view) => {
                    println!("title:  {}", view.document_title);
                    println!("meta:   {}", view.meta.as_str().trim());
                    println!("body:\n{}", view.body);
                }
                DetailOutcome::NotFound(html) => {
                    println!("{}", html);
                    bail!("no article with id {:?}", id);
                }
                DetailOutcome::Unavailable => bail!("news data could not be loaded"),
            }
        }

        Commands::Courses => {
            let loader = ContentLoader::new(source, &config.site, &root_path);
            let Some(catalog) = loader.render_catalog().await else {
                bail!("course data could not be loaded");
            };
            for tab in &catalog.tabs {
                println!("{}", tab.render_button());
                println!("{}", tab.render_panel());
            }
        }

        Commands::Template { name } => {
            let Some(fragment) = Fragment::parse(&name) else {
                bail!("unknown fragment {:?} (expected navbar or footer)", name);
            };
            let injector = TemplateInjector::new(source, &config.site, &root_path);
            let html = injector
                .fetch(fragment)
                .await
                .with_context(|| format!("fetching {}", injector.template_url(fragment)))?;
            println!("{}", html);
        }

        Commands::Check => {
            let loader = ContentLoader::new(source, &config.site, &root_path);
            let mut issues: Vec<Issue> = Vec::new();
            let mut failures = 0;

            match loader.news_feed().await {
                Ok(feed) => {
                    tracing::info!("news.json: {} articles", feed.articles.len());
                    issues.extend(check_news(&feed));
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    failures += 1;
                }
            }
            match loader.course_catalog().await {
                Ok(catalog) => {
                    tracing::info!("courses.json: {} categories", catalog.categories.len());
                    issues.extend(check_catalog(&catalog));
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    failures += 1;
                }
            }

            for issue in &issues {
                eprintln!("{}", issue);
            }
            let errors = failures + issues.iter().filter(|i| i.is_error()).count();
            let warnings = issues.len() + failures - errors;
            println!("{} error(s), {} warning(s)", errors, warnings);
            if errors > 0 {
                std::process::exit(1);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("apcea={}", config.logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
