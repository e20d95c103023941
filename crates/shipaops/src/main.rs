mod params;

use clap::{Parser, Subcommand};
use colored::Colorize;
use shipaops_client::Client;
use shipaops_modules as modules;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shipaops")]
#[command(about = "Idempotent resource management for the Shipa control plane", long_about = None)]
struct Cli {
    /// Shipa API host, e.g. https://shipa.example.com:8081
    #[arg(long, env = "SHIPA_HOST", global = true)]
    host: Option<String>,

    /// Shipa API token
    #[arg(long, env = "SHIPA_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Only print the JSON result document
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update a framework (pool)
    Framework {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Create or update an application
    Application {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Register or update a cluster
    Cluster {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Create a job (existing jobs are left untouched)
    Job {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Deploy an image to an application
    Deploy {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Bind a cname to an application
    Cname {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Set environment variables on an application
    Env {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Set the network policy of an application
    NetworkPolicy {
        /// Params file (JSON), or '-' for stdin
        #[arg(short, long)]
        params: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let host = cli
        .host
        .ok_or_else(|| anyhow::anyhow!("missing Shipa host: pass --host or set SHIPA_HOST"))?;
    let token = cli
        .token
        .ok_or_else(|| anyhow::anyhow!("missing Shipa token: pass --token or set SHIPA_TOKEN"))?;
    let client = Client::new(host, token)?;

    let outcome = match &cli.command {
        Commands::Framework { params } => {
            modules::framework::run(&client, &params::load(params)?).await?
        }
        Commands::Application { params } => {
            modules::application::run(&client, &params::load(params)?).await?
        }
        Commands::Cluster { params } => {
            modules::cluster::run(&client, &params::load(params)?).await?
        }
        Commands::Job { params } => modules::job::run(&client, &params::load(params)?).await?,
        Commands::Deploy { params } => {
            modules::deploy::run(&client, &params::load(params)?).await?
        }
        Commands::Cname { params } => modules::cname::run(&client, &params::load(params)?).await?,
        Commands::Env { params } => modules::env::run(&client, &params::load(params)?).await?,
        Commands::NetworkPolicy { params } => {
            modules::network_policy::run(&client, &params::load(params)?).await?
        }
    };

    if !cli.quiet {
        let flag = if outcome.changed {
            "changed".yellow()
        } else {
            "unchanged".green()
        };
        eprintln!("{} ({})", outcome.status.bold(), flag);
    }
    println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
    Ok(())
}
