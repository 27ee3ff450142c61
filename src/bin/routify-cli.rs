use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use routify::config::load_manifest;
use routify::observability::init_logging;
use routify::{mount, Router, UrlConf};

#[derive(Parser)]
#[command(name = "routify-cli")]
#[command(about = "Check, inspect and query route manifests", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "routify=warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, validate and register a manifest, reporting any error
    Check { manifest: PathBuf },
    /// Print the normalized route table
    Inspect {
        manifest: PathBuf,
        /// Print JSON instead of the router representation
        #[arg(long)]
        json: bool,
    },
    /// Print the route matching a URL path, with its captured segments
    Resolve { manifest: PathBuf, url: String },
    /// Build a URL from a route name and key=value arguments
    Reverse {
        manifest: PathBuf,
        /// Route name, optionally qualified as namespace:name
        name: String,
        #[arg(value_parser = parse_kwarg)]
        kwargs: Vec<(String, String)>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Check { manifest } => {
            let router = build(&manifest)?;
            println!(
                "{}: ok ({} routes)",
                manifest.display(),
                router.routes().len()
            );
        }
        Commands::Inspect { manifest, json } => {
            let router = build(&manifest)?;
            if json {
                let table = serde_json::json!({
                    "prefix": router.prefix(),
                    "namespace": router.namespace(),
                    "routes": router
                        .routes()
                        .iter()
                        .map(|r| r.summary())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!("{router}");
            }
        }
        Commands::Resolve { manifest, url } => {
            let conf = url_conf(&manifest)?;
            let resolved = conf
                .resolve(&url)
                .ok_or_else(|| format!("no route matches {url:?}"))?;
            let output = serde_json::json!({
                "name": resolved.view_name(),
                "kwargs": resolved.kwargs,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Reverse {
            manifest,
            name,
            kwargs,
        } => {
            let conf = url_conf(&manifest)?;
            let kwargs: Vec<(&str, &str)> = kwargs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            println!("{}", conf.reverse(&name, &kwargs)?);
        }
    }
    Ok(())
}

fn build(manifest: &Path) -> Result<Router, Box<dyn std::error::Error>> {
    Ok(load_manifest(manifest)?.build_router()?)
}

fn url_conf(manifest: &Path) -> Result<UrlConf, Box<dyn std::error::Error>> {
    let router = build(manifest)?;
    Ok(UrlConf::new().with(mount(&router))?)
}

fn parse_kwarg(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {arg:?}"))
}
