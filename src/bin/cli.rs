//! class-pulse CLI
//!
//! Locates a class board on the forum landing page and counts how many post
//! titles carry the marker glyphs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use class_pulse::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, CrawlRequest, Reporter, ResultLog, RunOutcome},
    services::{BoardLocator, GlyphPattern, HttpSource, RowExtractor, StopPolicy},
    storage::{self, OutputFormat},
    utils::http,
};

/// class-pulse - Inven class board title counter
#[derive(Parser, Debug)]
#[command(
    name = "class-pulse",
    version,
    about = "Count glyph-marked post titles on a Lost Ark Inven class board"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and do not echo the result log
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a class board and count marked titles
    Crawl {
        /// Class name as it appears on the landing page
        #[arg(short, long)]
        keyword: String,

        /// Stop at the first post older than this date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "pages", required_unless_present = "pages")]
        since: Option<String>,

        /// Crawl exactly this many pages
        #[arg(long)]
        pages: Option<String>,

        /// Marker glyphs: `blocks`, `bars`, or any set of characters
        #[arg(long, default_value = "blocks")]
        glyphs: String,

        /// Also count marked titles per day
        #[arg(long)]
        by_date: bool,

        /// Save results as text, xlsx or json
        #[arg(long)]
        save: Option<String>,

        /// Directory for saved results (overrides output.dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the board URL for a class without crawling it
    Locate {
        #[arg(short, long)]
        keyword: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn stop_policy(since: Option<&str>, pages: Option<&str>) -> Result<StopPolicy> {
    match (since, pages) {
        (Some(date), None) => StopPolicy::parse_since(date),
        (None, Some(pages)) => StopPolicy::parse_pages(pages),
        _ => Err(AppError::validation(
            "exactly one of --since or --pages is required",
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Crawl {
            keyword,
            since,
            pages,
            glyphs,
            by_date,
            save,
            output,
        } => {
            config.validate()?;
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            let format = save.as_deref().map(str::parse::<OutputFormat>).transpose()?;

            let policy = stop_policy(since.as_deref(), pages.as_deref())?;
            let glyphs: GlyphPattern = glyphs.parse()?;
            let request = CrawlRequest::new(&keyword, policy, glyphs)?.with_date_buckets(by_date);

            let client = http::create_client(&config.crawler)?;
            let source = HttpSource::new(client);
            let mut results = if cli.quiet {
                ResultLog::new()
            } else {
                ResultLog::echoing()
            };

            let outcome = pipeline::run_crawler(&config, &request, &source, today, &mut results).await?;
            if let RunOutcome::BoardNotFound = outcome {
                log::warn!("No board matched '{}'", request.keyword);
            }

            if let Some(format) = format {
                let exporter = storage::exporter(format, &config.output)?;
                let path = exporter.export(&results).await?;
                results.append(
                    &config
                        .messages
                        .saved
                        .replace("{path}", &path.display().to_string()),
                );
            }
        }

        Command::Locate { keyword } => {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return Err(AppError::validation("keyword is empty"));
            }
            config.validate()?;

            let client = http::create_client(&config.crawler)?;
            let source = HttpSource::new(client);
            let locator = BoardLocator::new(&source, &config.forum)?;

            match locator.locate(keyword).await? {
                Some(url) => println!("{url}"),
                None => println!("{}", config.messages.board_not_found),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            RowExtractor::new(&config.listing, today)?;
            log::info!("✓ Config OK (crawler, forum URLs and listing selectors)");
        }
    }

    Ok(())
}
