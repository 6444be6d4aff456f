//! workbc - WorkBC job search from the terminal.
//!
//! Searches job postings, shows a single posting, and lists the job types,
//! industries and regions used as search filters. Results render as tables
//! or, with `--json`, as the raw API response.

mod api;
mod commands;
mod config;
mod error;
mod render;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use api::{ReferenceKind, SearchParams};
use clap::{Args, Parser, Subcommand};
use commands::Output;
use config::ConfigStore;
use render::Renderer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "workbc")]
#[command(version, about = "WorkBC Job Search CLI")]
struct Cli {
    /// Log requests and configuration access to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure WorkBC CLI settings
    Config {
        /// Set API base URL
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Search job postings
    Search(SearchArgs),
    /// Get details for a specific job posting
    Job {
        /// Job posting identifier
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available job types
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available industries
    Industries {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available regions
    Regions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Search keywords
    #[arg(long, value_name = "TEXT")]
    keywords: Option<String>,
    /// Filter by region
    #[arg(long)]
    region: Option<String>,
    /// Filter by industry
    #[arg(long)]
    industry: Option<String>,
    /// Filter by job type (full-time, part-time, etc.)
    #[arg(long, value_name = "TYPE")]
    job_type: Option<String>,
    /// Page number
    #[arg(long, value_name = "NUMBER", default_value = "1")]
    page: String,
    /// Results per page
    #[arg(long, value_name = "NUMBER", default_value = "10")]
    per_page: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    /// Filters are only sent when given a non-empty value.
    fn params(&self) -> SearchParams {
        let given = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        SearchParams {
            page: self.page.clone(),
            per_page: self.per_page.clone(),
            keywords: given(&self.keywords),
            region: given(&self.region),
            industry: given(&self.industry),
            job_type: given(&self.job_type),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let no_color = std::env::var_os("NO_COLOR").is_some();
    let stdout_color = !no_color && atty::is(atty::Stream::Stdout);
    let stderr_tty = atty::is(atty::Stream::Stderr);
    // Colour decisions are made per renderer below.
    colored::control::set_override(true);

    let out = Output::new(Renderer::new(stdout_color), stderr_tty);

    match run(cli.command, &out).await {
        Ok(text) => {
            if !text.is_empty() {
                println!("{}", text);
            }
        }
        Err(e) => {
            let marker = Renderer::new(!no_color && stderr_tty);
            eprintln!("{}", marker.failure(&format!("{:#}", e)));
            std::process::exit(1);
        }
    }
}

/// Logging goes to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "workbc=debug,reqwest=info"
    } else {
        "workbc=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Dispatch one subcommand and return what to print.
async fn run(command: Commands, out: &Output) -> Result<String> {
    let store = ConfigStore::open()?;

    match command {
        Commands::Config { base_url, show } => commands::config(&store, out, base_url, show),
        Commands::Search(args) => {
            let client = commands::connect(&store)?;
            commands::search(&client, out, args.params(), args.json).await
        }
        Commands::Job { id, json } => {
            let client = commands::connect(&store)?;
            commands::job(&client, out, &id, json).await
        }
        Commands::Types { json } => {
            let client = commands::connect(&store)?;
            commands::reference(&client, out, ReferenceKind::JobTypes, json).await
        }
        Commands::Industries { json } => {
            let client = commands::connect(&store)?;
            commands::reference(&client, out, ReferenceKind::Industries, json).await
        }
        Commands::Regions { json } => {
            let client = commands::connect(&store)?;
            commands::reference(&client, out, ReferenceKind::Regions, json).await
        }
    }
}
