//! Country browser - Entry Point

use cbrowse::model::REGIONS;
use cbrowse::state::FilterState;
use cbrowse::view::ColorConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Country browser - TUI for browsing countries page by page
#[derive(Parser, Debug)]
#[command(name = "cbrowse")]
#[command(version)]
#[command(about = "TUI application for browsing a countries API with filters and incremental loading")]
pub struct Args {
    /// Base URL of the countries API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Start with a name search applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Start with a region selected (repeatable)
    #[arg(short, long = "region", value_parser = REGIONS, ignore_case = true)]
    pub regions: Vec<String>,

    /// Start with a timezone filter applied, e.g. UTC+01:00
    #[arg(short, long)]
    pub timezone: Option<String>,

    /// Countries requested per page
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Filters to apply to the first page.
    pub fn initial_filters(&self) -> FilterState {
        let mut filters = FilterState::new();
        if let Some(search) = &self.search {
            filters.set_search_text(search.as_str());
        }
        // Region names are matched case-insensitively; store the canonical spelling
        for region in &self.regions {
            let canonical = REGIONS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(region))
                .copied()
                .unwrap_or(region.as_str());
            if !filters.is_region_selected(canonical) {
                filters.toggle_region(canonical);
            }
        }
        if let Some(timezone) = &self.timezone {
            filters.set_timezone(timezone.as_str());
        }
        filters
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cbrowse::config::load_config_with_precedence(args.config.clone())?;
        let merged = cbrowse::config::merge_config(config_file);
        let with_env = cbrowse::config::apply_env_overrides(merged);
        cbrowse::config::apply_cli_overrides(with_env, args.api_url.clone(), args.batch_size)
    }
    .validate()?;

    cbrowse::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let colors = ColorConfig::from_env_and_args(args.no_color);
    cbrowse::view::run_with_config(&config, args.initial_filters(), colors)?;

    Ok(())
}
