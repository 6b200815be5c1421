//! ingame - browse free-to-play games from the terminal
//!
//! Interactive mode is a fullscreen TUI with platform switching, search with
//! autocomplete and paged results. `list` and `suggest` expose the same search
//! and paging logic for scripts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::io::{self, IsTerminal};

use ingame::browse::{derive_filtered_page, SuggestionState};
use ingame::catalog::{CatalogClient, CatalogSnapshot, CatalogStore, GameRecord, Platform};
use ingame::config::{self, Config};
use ingame::logging::{self, LogTarget};
use ingame::tui;

/// ingame - browse the free-to-play games catalog
#[derive(Parser)]
#[command(name = "ingame")]
#[command(version)]
#[command(about = "Browse free-to-play games: filter by platform, search, page through results")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the fullscreen terminal UI (default)
    Tui {
        /// Platform to load first
        #[arg(short, long, value_enum)]
        platform: Option<PlatformArg>,
    },

    /// Print one page of games, optionally filtered by title
    List {
        /// Catalog platform
        #[arg(short, long, value_enum)]
        platform: Option<PlatformArg>,

        /// Case-insensitive title fragment
        #[arg(short, long, default_value = "")]
        search: String,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show autocomplete suggestions for a title fragment
    Suggest {
        /// Title fragment
        query: String,

        /// Catalog platform
        #[arg(short, long, value_enum)]
        platform: Option<PlatformArg>,

        /// How many times to expand the list ("See more")
        #[arg(long, default_value_t = 0)]
        more: usize,
    },

    /// Show configuration and data paths
    Config,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum PlatformArg {
    Pc,
    Browser,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Pc => Platform::Pc,
            PlatformArg::Browser => Platform::Browser,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    let _log_guard = logging::init(if interactive {
        LogTarget::File
    } else {
        LogTarget::Stderr
    });

    let mut cfg = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid config, using defaults");
        Config::default()
    });

    match cli.command {
        None => run_tui(&cfg)?,
        Some(Commands::Tui { platform }) => {
            if let Some(platform) = platform {
                cfg.catalog.default_platform = platform.into();
            }
            run_tui(&cfg)?;
        }
        Some(Commands::List {
            platform,
            search,
            page,
            format,
        }) => {
            let platform = platform.map(Platform::from);
            run_list(&cfg, platform, &search, page, format)?;
        }
        Some(Commands::Suggest {
            query,
            platform,
            more,
        }) => {
            run_suggest(&cfg, platform.map(Platform::from), &query, more)?;
        }
        Some(Commands::Config) => {
            show_config_info()?;
        }
    }

    Ok(())
}

fn run_tui(cfg: &Config) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        println!(
            "{}",
            "The terminal UI requires an interactive TTY. Try `ingame list` or `ingame suggest`."
                .bright_yellow()
        );
        return Ok(());
    }

    tracing::info!(platform = %cfg.catalog.default_platform, "ingame starting");
    let rt = tokio::runtime::Runtime::new()?;
    tui::run_tui(&rt, cfg)?;
    tracing::info!("ingame exited");
    Ok(())
}

/// Fetch the catalog once through the shared store.
fn load_catalog(cfg: &Config, platform: Option<Platform>) -> Result<CatalogSnapshot> {
    let platform = platform.unwrap_or(cfg.catalog.default_platform);
    let client = CatalogClient::from_config(&cfg.catalog);
    let mut store = CatalogStore::new(platform);

    let ticket = store.select_platform(platform);
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(client.fetch(Some(platform)));
    store.complete(ticket, result);

    let snapshot = store.snapshot();
    if let Some(reason) = snapshot.failure() {
        bail!("Could not load the {platform} catalog: {reason}");
    }
    Ok(snapshot)
}

#[derive(Serialize)]
struct ListOutput<'a> {
    platform: Platform,
    query: &'a str,
    page: usize,
    page_count: usize,
    total: usize,
    games: Vec<&'a GameRecord>,
}

fn run_list(
    cfg: &Config,
    platform: Option<Platform>,
    search: &str,
    page: usize,
    format: OutputFormat,
) -> Result<()> {
    if page == 0 {
        bail!("--page starts at 1");
    }

    let snapshot = load_catalog(cfg, platform)?;
    let view = derive_filtered_page(&snapshot.records, search, page, cfg.browse.page_size);
    let games: Vec<&GameRecord> = view
        .visible()
        .iter()
        .filter_map(|&idx| snapshot.records.get(idx))
        .collect();

    match format {
        OutputFormat::Json => {
            let out = ListOutput {
                platform: snapshot.platform,
                query: search,
                page,
                page_count: view.page_count,
                total: view.matches.len(),
                games,
            };
            let json = serde_json::to_string_pretty(&out).context("Failed to encode JSON")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!(
                "{}",
                format!("{} GAMES\n", snapshot.platform.label().to_uppercase())
                    .bright_yellow()
                    .bold()
            );

            if games.is_empty() {
                if search.is_empty() {
                    println!("{}", "No games in this catalog.".bright_white());
                } else {
                    println!("{}", "No result found.".bright_white());
                }
            }

            let first = (page - 1) * cfg.browse.page_size.max(1);
            for (i, game) in games.iter().enumerate() {
                println!(
                    "  {:3}. {} {}",
                    first + i + 1,
                    game.title.bright_white().bold(),
                    format!("[{}]", game.genre.trim()).bright_cyan()
                );
                if !game.short_description.trim().is_empty() {
                    println!("       {}", game.short_description.trim().bright_black());
                }
                println!("       {}", game.game_url.bright_blue());
            }

            println!(
                "\n{} {} / {}  ({} match{})",
                "Page".bright_cyan(),
                page,
                view.page_count,
                view.matches.len(),
                if view.matches.len() == 1 { "" } else { "es" }
            );
            if page < view.page_count {
                println!(
                    "{}",
                    format!("Next page: ingame list --page {}", page + 1).bright_black()
                );
            }
        }
    }

    Ok(())
}

fn run_suggest(
    cfg: &Config,
    platform: Option<Platform>,
    query: &str,
    more: usize,
) -> Result<()> {
    let snapshot = load_catalog(cfg, platform)?;

    let mut suggestions = SuggestionState::with_step(cfg.browse.suggestion_step);
    suggestions.update(&snapshot.records, query);
    for _ in 0..more {
        suggestions.reveal_more();
    }

    if suggestions.revealed().is_empty() {
        println!("{}", "No suggestions.".bright_yellow());
        return Ok(());
    }

    for &idx in suggestions.revealed() {
        if let Some(game) = snapshot.records.get(idx) {
            println!("  {}", game.title.bright_white());
        }
    }

    if suggestions.more_available() {
        let hidden = suggestions.matches().len() - suggestions.revealed().len();
        println!(
            "{}",
            format!("  ... {hidden} more (use --more {})", more + 1).bright_black()
        );
    }

    Ok(())
}

fn show_config_info() -> Result<()> {
    println!("{}", "ingame configuration\n".bright_cyan().bold());

    match config::get_config_path() {
        Ok(path) => {
            println!("{} {}", "Config file:".bright_yellow(), path.bright_white());
            if std::path::Path::new(&path).exists() {
                println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
            } else {
                println!(
                    "  {} {}",
                    "Status:".bright_cyan(),
                    "Not created yet (will use defaults)".bright_yellow()
                );
            }
        }
        Err(e) => {
            println!(
                "{} Could not determine config path: {}",
                "Error:".bright_red(),
                e
            );
        }
    }

    let cfg = Config::load().unwrap_or_default();
    if let Err(err) = config::init_config() {
        println!(
            "  {} {}",
            "Note:".bright_yellow(),
            format!("Could not create config file yet: {}", err).bright_black()
        );
    }

    let client = CatalogClient::from_config(&cfg.catalog);

    println!("\n{}", "Catalog:".bright_white().bold());
    println!("  {} {}", "Base URL:".bright_cyan(), cfg.catalog.base_url);
    println!(
        "  {} {}",
        "Proxy prefix:".bright_cyan(),
        cfg.catalog.proxy_prefix.as_deref().unwrap_or("(none)")
    );
    println!(
        "  {} {}s",
        "Timeout:".bright_cyan(),
        cfg.catalog.timeout_seconds
    );
    println!(
        "  {} {}",
        "Default platform:".bright_cyan(),
        cfg.catalog.default_platform
    );
    println!(
        "  {} {}",
        "Request URL:".bright_cyan(),
        client.request_url(cfg.catalog.default_platform)
    );

    println!("\n{}", "Browse:".bright_white().bold());
    println!("  {} {}", "Page size:".bright_cyan(), cfg.browse.page_size);
    println!(
        "  {} {}",
        "Suggestion step:".bright_cyan(),
        cfg.browse.suggestion_step
    );

    if let Ok(path) = logging::log_file_path() {
        println!("\n{} {}", "Log file:".bright_yellow(), path.display());
    }

    Ok(())
}
