use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use geo_adset::batch::{self, BatchOptions};
use geo_adset::config::{self, Config};
use geo_adset::facebook::{CampaignType, GraphClient, InterestKind};
use geo_adset::location::{LocationResolver, ResolveStrategy};

/// geo-adset — donut geo-targeted ad sets for Facebook and Instagram
///
/// Resolves each entry of a list to a coordinate, targets a 1 km circle
/// around it minus four neighbouring circles, and creates one ad set.
///
/// Examples:
///   geo-adset urls --file urls.txt --campaign traffic
///   geo-adset addresses --file addresses.txt --dry-run
///   geo-adset interests "Product Management" --kind position
///   geo-adset insights --fields impressions,reach
#[derive(Parser)]
#[command(name = "geo-adset", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Debug-level logging (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build an ad set from street addresses (Google Maps text search).
    Addresses(RunArgs),
    /// Build an ad set from company web domains (Clearbit, US only).
    Urls(RunArgs),
    /// Search targeting interests, job titles or employers by keyword.
    Interests {
        query: String,
        /// interest, position or employer.
        #[arg(long, default_value = "interest", value_parser = parse_kind)]
        kind: InterestKind,
    },
    /// Ad-level insights for the configured campaign.
    Insights {
        /// Comma-separated insight fields.
        #[arg(long, value_delimiter = ',', default_value = "impressions")]
        fields: Vec<String>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Input list, one entry per line. Defaults to addresses.txt / urls.txt.
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Campaign objective the ad set belongs to: "traffic" or "leads".
    #[arg(long, default_value = "traffic", value_parser = parse_campaign)]
    campaign: CampaignType,

    /// Audience interest label (only used with --layer-interests).
    #[arg(long, default_value = "Product Management")]
    interest: String,

    /// Look up --interest and add it to the targeting.
    #[arg(long)]
    layer_interests: bool,

    /// Ad-set name. Defaults to multi-adset-<resolved count>.
    #[arg(long)]
    name: Option<String>,

    /// Resolve and assemble only; print the report without publishing.
    #[arg(long)]
    dry_run: bool,

    /// Seconds to wait after the ad-set request.
    #[arg(long, default_value_t = 5)]
    delay_secs: u64,
}

fn parse_campaign(s: &str) -> Result<CampaignType, String> {
    s.parse()
}

fn parse_kind(s: &str) -> Result<InterestKind, String> {
    s.parse()
}

fn main() {
    let cli = Cli::parse();
    // .env may carry RUST_LOG, so load it before the subscriber reads the filter.
    let dotenv = config::load_dotenv();
    init_logging(cli.verbose);

    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded .env");
    }

    let config = Config::from_env().unwrap_or_else(|e| fail(&e));

    let result = match &cli.command {
        Command::Addresses(args) => run_batch(&config, ResolveStrategy::Address, args),
        Command::Urls(args) => run_batch(&config, ResolveStrategy::Domain, args),
        Command::Interests { query, kind } => search(&config, *kind, query),
        Command::Insights { fields } => insights(&config, fields),
    };

    if let Err(e) = result {
        fail(e.as_ref());
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "geo_adset=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(e: &dyn Error) -> ! {
    error!("{}", e);
    std::process::exit(1);
}

fn run_batch(config: &Config, strategy: ResolveStrategy, args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let default_file = match strategy {
        ResolveStrategy::Address => "addresses.txt",
        ResolveStrategy::Domain => "urls.txt",
    };
    let path = args.file.clone().unwrap_or_else(|| PathBuf::from(default_file));

    let mut options = BatchOptions {
        campaign: args.campaign,
        interest_label: args.interest.clone(),
        interests: Vec::new(),
        name: args.name.clone(),
        dry_run: args.dry_run,
        publish_delay: Duration::from_secs(args.delay_secs),
    };
    batch::preflight(config, strategy, &options)?;

    let entries = batch::load_list(&path)?;
    info!(path = %path.display(), entries = entries.len(), "loaded input list");

    let resolver = LocationResolver::new(config);
    let graph = GraphClient::new(config);

    if args.layer_interests || config.layer_interests {
        options.interests = graph.search_interests(InterestKind::Interest, &args.interest)?;
        info!(label = %args.interest, matches = options.interests.len(), "interest targeting layered");
    }

    let report = batch::run(&resolver, &graph, strategy, &entries, &options)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn search(config: &Config, kind: InterestKind, query: &str) -> Result<(), Box<dyn Error>> {
    let results = GraphClient::new(config).search_interests(kind, query)?;
    info!(%kind, query, matches = results.len(), "targeting search");
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn insights(config: &Config, fields: &[String]) -> Result<(), Box<dyn Error>> {
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
    let rows = GraphClient::new(config).campaign_insights(&fields)?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
