//! Route predicate CLI
//!
//! Usage:
//!   route-predicates match --pattern '{sub}.example.com' --host shop.example.com
//!   route-predicates route --config routes.yaml --host shop.example.com --path /orders
//!   route-predicates check routes.yaml

use anyhow::Context;
use clap::{Parser, Subcommand};
use route_predicates::{GatewayConfig, HostConfig, HostRoutePredicate, RequestAttributes, Router};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "route-predicates")]
#[command(author, version, about = "Evaluate host and path route predicates")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true, env = "ROUTE_PREDICATES_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match a host against an ordered list of patterns
    Match {
        /// Host pattern, repeatable; evaluated in the order given
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Host header value to test
        #[arg(long)]
        host: String,

        /// Compare letters without regard to case
        #[arg(short = 'i', long)]
        ignore_case: bool,
    },
    /// Find the route a request would take
    Route {
        /// Route configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Host header value; omitted means no Host header
        #[arg(long)]
        host: Option<String>,

        /// Request path
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Load and compile a route configuration file
    Check {
        /// Route configuration file (YAML)
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Match {
            patterns,
            host,
            ignore_case,
        } => {
            let config = HostConfig::new(patterns).with_case_sensitive(!ignore_case);
            let predicate = HostRoutePredicate::new(&config)?;
            let result = predicate.evaluate(Some(&host));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Route { config, host, path } => {
            let router = load_router(&config)?;
            let mut builder = hyper::Request::builder().uri(path.as_str());
            if let Some(host) = &host {
                builder = builder.header(hyper::header::HOST, host.as_str());
            }
            let request = builder
                .body(())
                .with_context(|| format!("invalid request for path '{path}'"))?;

            let mut attributes = RequestAttributes::new();
            let output = match router.match_request(&request, &mut attributes) {
                Some(matched) => serde_json::to_value(&matched)?,
                None => serde_json::json!({ "matched": false }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Check { config } => {
            let router = load_router(&config)?;
            println!("{}: {} route(s) OK", config.display(), router.len());
            for id in router.route_ids() {
                println!("  {id}");
            }
        }
    }

    Ok(())
}

fn load_router(path: &Path) -> anyhow::Result<Router> {
    let config = GatewayConfig::from_file(path)?;
    Router::from_config(&config)
        .with_context(|| format!("failed to compile routes in {}", path.display()))
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "route_predicates=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
