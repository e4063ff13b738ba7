//! Typo Forge - typo-domain generation and availability checking
//!
//! Generates typo variants of a domain and checks which ones are still
//! registrable, caching registrar answers between runs.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use typo_forge::availability::godaddy::{appraisal_link, search_link};
use typo_forge::availability::validator::utils::parse_label_list;
use typo_forge::availability::{AvailabilityCache, AvailabilityService, GoDaddyClient, GoDaddyConfig};
use typo_forge::logging::{init_logging, parse_level, LogOptions};
use typo_forge::types::{AvailabilityStatus, DomainReport, LookupConfig};
use typo_forge::typo::{AvailabilityStream, TypoPipeline};
use typo_forge::TypoForgeError;

#[derive(Parser, Debug)]
#[command(name = "typo-forge", version, about = "Generate typo domains and check their availability")]
struct Cli {
    /// Show logs on the console at the chosen level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print nothing to stdout
    #[arg(short, long, global = true)]
    silent: bool,

    /// Log level for the log file (and the console with --verbose)
    #[arg(short = 'l', long = "log-level", alias = "loglevel", default_value = "debug",
          value_parser = level_arg, global = true)]
    log_level: LevelFilter,

    /// Check availability with the registrar
    #[arg(short = 'c', long, global = true)]
    check_availability: bool,

    /// Only print result lines containing this text
    #[arg(short, long, global = true)]
    grep: Option<String>,

    /// Read and store availability answers in the cache file
    #[arg(short = 'C', long, global = true)]
    cached: bool,

    /// Empty the cache file before anything else
    #[arg(long, global = true)]
    clear_cache: bool,

    /// Open the registrar search page of every available domain in the browser
    #[arg(short = 'o', long, global = true)]
    open_available_links: bool,

    /// Cache file location
    #[arg(long, global = true, default_value_os_t = AvailabilityCache::default_path())]
    cache_file: PathBuf,

    /// Directory for main.log
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate typos of a domain and check them
    Typo {
        /// Domain label, e.g. `example` (or `example.com`)
        domain: String,

        /// Top-level domain [default: com]
        tld: Option<String>,

        /// Rarity group (A-D) or code (e.g. B1) to generate
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Check a list of labels as-is
    Check {
        labels: Vec<String>,

        /// Newline-delimited label file; `#` starts a comment
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        #[arg(short, long, default_value = "com")]
        tld: String,
    },
}

fn level_arg(input: &str) -> std::result::Result<LevelFilter, String> {
    parse_level(input).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize the library
    if let Err(e) = typo_forge::init() {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }

    let log_options = LogOptions {
        level: cli.log_level,
        verbose: cli.verbose,
        silent: cli.silent,
        log_dir: cli.log_dir.clone(),
    };
    let guard = match init_logging(&log_options) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("⚠️  Logging disabled: {}", e);
            None
        }
    };

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "Run failed");
            match e.downcast_ref::<TypoForgeError>() {
                Some(err) => eprintln!("{}", err.user_message()),
                None => eprintln!("❌ Error: {:#}", e),
            }
            1
        }
    };

    // flush the file writer before exiting
    drop(guard);
    process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let printer = Printer {
        silent: cli.silent,
        grep: cli.grep.clone(),
        open_links: cli.open_available_links,
    };

    // cleared before loading, so a malformed file can be recovered
    if cli.clear_cache {
        AvailabilityCache::reset(&cli.cache_file)?;
        printer.info(&format!("🧹 Cache cleared: {}", cli.cache_file.display()));
    }

    let Some(command) = cli.command else {
        if cli.clear_cache {
            return Ok(());
        }
        bail!("No command given, run with --help for usage");
    };

    let service: Option<Arc<dyn AvailabilityService>> = if cli.check_availability {
        let config = GoDaddyConfig::from_env()?;
        tracing::debug!(base_url = %config.effective_base_url(), "Using GoDaddy");
        Some(Arc::new(GoDaddyClient::new(&config)?))
    } else {
        None
    };

    let config = LookupConfig::cached(cli.check_availability, cli.cached);
    let cache = AvailabilityCache::open(&cli.cache_file, config, service)?;

    let mut pipeline = TypoPipeline::new(cache);
    let start_time = Instant::now();

    let summary = match command {
        Command::Typo { domain, tld, filter } => {
            let (label, tld) = split_domain(&domain, tld);
            let stream = pipeline.generate(&label, &tld, filter.as_deref())?;
            drain(stream, &printer).await?
        }
        Command::Check { mut labels, file, tld } => {
            if let Some(file) = file {
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read label file {}", file.display()))?;
                labels.extend(parse_label_list(&content));
            }
            if labels.is_empty() {
                bail!("No labels given, pass them as arguments or with --file");
            }
            let stream = pipeline.check_labels(&labels, &tld)?;
            drain(stream, &printer).await?
        }
    };

    let cache = pipeline.into_cache();
    let stats = cache.stats();
    cache.close()?;

    tracing::info!(
        total = summary.total,
        available = summary.available,
        hits = stats.hits,
        network_calls = stats.network_calls,
        duration_ms = %start_time.elapsed().as_millis(),
        "Run finished"
    );

    printer.info("");
    printer.info(&format!(
        "📈 {} domains: {} available, {} taken, {} unknown | cache hits {}, registrar calls {} | {:.2}s",
        summary.total,
        summary.available,
        summary.taken,
        summary.unknown,
        stats.hits,
        stats.network_calls,
        start_time.elapsed().as_secs_f32()
    ));

    Ok(())
}

/// `example.com` with no explicit TLD is split into label and TLD
fn split_domain(domain: &str, tld: Option<String>) -> (String, String) {
    match (domain.split_once('.'), tld) {
        (Some((label, suffix)), None) => (label.to_string(), suffix.to_string()),
        (_, tld) => (domain.to_string(), tld.unwrap_or_else(|| "com".to_string())),
    }
}

#[derive(Debug, Default)]
struct Summary {
    total: usize,
    available: usize,
    taken: usize,
    unknown: usize,
}

async fn drain(mut stream: AvailabilityStream<'_>, printer: &Printer) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();

    while let Some(report) = stream.next().await {
        let report = report?;
        summary.total += 1;
        match report.status() {
            AvailabilityStatus::Available => summary.available += 1,
            AvailabilityStatus::Taken => summary.taken += 1,
            AvailabilityStatus::Unknown => summary.unknown += 1,
        }
        printer.report(&report);
    }

    Ok(summary)
}

struct Printer {
    silent: bool,
    grep: Option<String>,
    open_links: bool,
}

impl Printer {
    fn info(&self, line: &str) {
        if !self.silent {
            println!("{}", line);
        }
    }

    fn report(&self, report: &DomainReport) {
        let line = format_report(report);
        let wanted = self
            .grep
            .as_deref()
            .map_or(true, |needle| line.contains(needle));
        if wanted {
            self.info(&line);
        }

        if let Some(link) = self.link_to_open(report) {
            if let Err(e) = open::that(&link) {
                tracing::warn!(domain = %report.domain, error = %e, "Failed to open link");
            }
        }
    }

    fn link_to_open(&self, report: &DomainReport) -> Option<String> {
        (self.open_links && report.status() == AvailabilityStatus::Available)
            .then(|| search_link(&report.domain))
    }
}

fn format_report(report: &DomainReport) -> String {
    let status = report.status();
    let marker = match status {
        AvailabilityStatus::Available => "✅",
        AvailabilityStatus::Taken => "❌",
        AvailabilityStatus::Unknown => "❔",
    };

    let mut line = marker.to_string();
    if let Some(code) = report.code {
        line.push_str(&format!(" [{}]", code));
    }
    line.push_str(&format!(" {} - {}", report.domain, status));

    let availability = &report.availability;
    if let (Some(amount), Some(currency)) = (availability.price_amount(), &availability.currency) {
        line.push_str(&format!(" - {} {:.2}", currency, amount));
    }
    line.push_str(&format!(" - {}", search_link(&report.domain)));
    if status == AvailabilityStatus::Available {
        line.push_str(&format!(" - appraisal: {}", appraisal_link(&report.domain)));
    }

    line
}
