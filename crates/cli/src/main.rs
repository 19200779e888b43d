//! gallery-search CLI — search a media gallery backend from the terminal.
//!
//! Drives the same `SearchController` a graphical front end would, with
//! terminal collaborators standing in for the gallery renderer and viewer.

mod repl;
mod terminal;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use gallery_search_core::types::MediaType;
use gallery_search_core::view::InputField;
use gallery_search_core::{HttpBackend, SearchConfig, SearchController};

/// gallery-search CLI — search a media gallery from the terminal.
#[derive(Parser)]
#[command(name = "gs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: .gallery-search.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Results per page, overrides the config file
    #[arg(long, global = true)]
    page_size: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the gallery
    Search {
        /// Search query
        query: String,

        /// Only return one media type (image or video)
        #[arg(long = "type", value_parser = parse_media_type)]
        media_type: Option<MediaType>,

        /// Page to show (1-indexed)
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Show search suggestions for a partial query
    Suggest {
        /// Partial query
        query: String,
    },
    /// Interactive search session with live suggestions
    Interactive,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_media_type(s: &str) -> Result<MediaType, String> {
    s.parse()
}

fn load_config(cli: &Cli) -> SearchConfig {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            SearchConfig::load(&cwd)
        }
    };
    if let Some(url) = &cli.base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(size) = cli.page_size {
        config.page_size = size.max(1);
    }
    debug!(base_url = config.base_url.as_str(), page_size = config.page_size, "Config resolved");
    config
}

fn build_controller(cli: &Cli, config: SearchConfig) -> SearchController<HttpBackend> {
    let backend = HttpBackend::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: could not create HTTP client: {e}");
        std::process::exit(1);
    });
    let collab = terminal::collaborators(cli.json);
    let mut controller = SearchController::new(backend, collab, config);
    controller.init();
    controller
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error: could not encode output: {e}");
            std::process::exit(1);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gallery_search=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Search { query, media_type, page } => {
            let config = load_config(&cli);
            let mut controller = build_controller(&cli, config);
            controller.set_type_filter(*media_type);
            controller.on_input(InputField::Header, query);

            if controller.perform_search(query).await.is_err() {
                std::process::exit(1);
            }
            if *page > 1 {
                match controller.load_page(*page).await {
                    Ok(true) => {}
                    Ok(false) => {
                        let pages = controller.results().map(|r| r.page_count()).unwrap_or(1);
                        eprintln!("Page {page} out of range (1-{pages})");
                        std::process::exit(1);
                    }
                    Err(_) => std::process::exit(1),
                }
            }

            let Some(results) = controller.results() else {
                std::process::exit(1);
            };
            if cli.json {
                print_json(&serde_json::json!({
                    "query": results.query,
                    "items": results.items,
                    "totalItems": results.total_items,
                    "page": results.page,
                    "pageSize": results.page_size,
                }));
            } else {
                if results.is_empty() {
                    eprintln!("{}", controller.view().body.text());
                    std::process::exit(1);
                }
                repl::print_results(&controller);
            }
        }
        Commands::Suggest { query } => {
            let config = load_config(&cli);
            let mut controller = build_controller(&cli, config);
            controller.on_input(InputField::Header, query);
            if !controller.suggestions_pending() {
                eprintln!(
                    "Query too short for suggestions (need {} characters)",
                    controller.config().min_suggestion_chars
                );
                std::process::exit(1);
            }
            controller.next_suggestions().await;

            let suggestions = &controller.view().dropdown.suggestions;
            if cli.json {
                print_json(&serde_json::json!(suggestions));
            } else if suggestions.is_empty() {
                eprintln!("No suggestions for '{query}'");
                std::process::exit(1);
            } else {
                for s in suggestions {
                    println!("{s}");
                }
            }
        }
        Commands::Interactive => {
            let config = load_config(&cli);
            let mut controller = build_controller(&cli, config);
            repl::run(&mut controller).await;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "gs", &mut std::io::stdout());
        }
    }
}
