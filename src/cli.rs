use crate::logging::{self, LogConfig};
use crate::redirect_map::RedirectMap;
use crate::runtime_config::RuntimeConfig;
use crate::server::RouteRequest;
use anyhow::Context;
use clap::Parser;
use http::Method;
use std::path::PathBuf;

/// Check how a redirect map answers a request.
#[derive(Parser, Debug)]
#[command(name = "redirect-check")]
#[command(about = "Resolve a request against a redirect map and print the outcome", long_about = None)]
pub struct Cli {
    /// Redirect map (YAML)
    #[arg(short, long, env = "BRRTR_REDIRECT_MAP")]
    pub map: PathBuf,

    /// HTTP method of the request
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request target, e.g. `/old/42?ref=x`
    pub target: String,

    /// Log level for routing diagnostics
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Pretty debug logs with source locations (ignores `--log-level`)
    #[arg(long)]
    pub dev: bool,
}

/// Parse arguments, dispatch the request and print `status reason [location]`.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.dev {
        logging::init_logging_with_config(&LogConfig::default_dev())?;
    } else {
        logging::init_logging(&cli.log_level)?;
    }

    let config = RuntimeConfig::from_env();
    let map = RedirectMap::load(&cli.map)?;
    let table = map.build_table(&config.application_path)?;

    let method = Method::from_bytes(cli.method.to_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", cli.method))?;
    let request = RouteRequest::new(method, &cli.target)?;

    let response = table.dispatch(request);
    match response.location() {
        Some(location) => println!("{} {} {}", response.status, response.reason(), location),
        None => println!("{} {}", response.status, response.reason()),
    }
    Ok(())
}
