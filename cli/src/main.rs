use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use draco_loader::decode::header::read_header;
use draco_loader::fetch::{ByteFetcher, DefaultFetcher, Progress};
use draco_loader::loader;
use draco_loader::prelude::{ConfigType, GeometryType};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "draco-loader")]
#[command(about = "Fetches a Draco file and reports what it contains")]
struct Cli {
    /// File path or http(s) URL, appended to the configured base path
    url: String,

    /// JSON loader configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the base path from the configuration
    #[arg(short, long)]
    path: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Ignore proxies set in the environment
    #[arg(long)]
    no_proxy: bool,

    /// Do not print download progress
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config(&cli)?;

    let url = format!("{}{}", cfg.path, cli.url);
    let fetcher = DefaultFetcher::new(&cfg.fetch)?;
    let quiet = cli.quiet;
    let data = fetcher.fetch(&url, |p| if !quiet { print_progress(p) }).await
        .with_context(|| format!("Failed to fetch {}", url))?;
    if !quiet {
        eprintln!();
    }

    let header = read_header(&data)
        .with_context(|| format!("{} is not a readable Draco file", url))?;
    let geometry_type = GeometryType::from_id(header.encoder_type);

    let report = serde_json::json!({
        "url": url,
        "size": data.len(),
        "header": header,
        "geometry_type": geometry_type.map(|ty| ty.to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if geometry_type.is_none() {
        anyhow::bail!("Unknown geometry type: {}", header.encoder_type);
    }
    Ok(())
}

fn config(cli: &Cli) -> Result<loader::Config> {
    let mut cfg = match &cli.config {
        Some(file) => {
            let json = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file))?;
            loader::Config::from_json(&json)
                .with_context(|| format!("Invalid configuration in {}", file))?
        }
        None => loader::Config::default(),
    };
    if let Some(path) = &cli.path {
        cfg.path = path.clone();
    }
    if let Some(timeout) = cli.timeout {
        cfg.fetch.timeout_secs = Some(timeout);
    }
    if cli.no_proxy {
        cfg.fetch.system_proxy = false;
    }
    Ok(cfg)
}

fn print_progress(p: Progress) {
    let mut err = std::io::stderr();
    let _ = match p.fraction() {
        Some(f) => write!(err, "\r{} / {} bytes ({:.0}%)", p.loaded, p.total.unwrap_or(0), f * 100.0),
        None => write!(err, "\r{} bytes", p.loaded),
    };
    let _ = err.flush();
}

