//! redis-admin - Redis statistics and flush from the command line

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use redis_admin::server::HttpServer;
use redis_admin::utils::logging::init_logging;
use redis_admin::{BackendPool, Config, FlushReport, RedisAdmin, StatisticsReport};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "redis-admin", version, about = "Redis statistics and flush administration")]
struct Cli {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "REDIS_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show current Redis statistics
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Remove all data from every Redis database
    Flush {
        /// Confirm the flush
        #[arg(long)]
        yes: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP admin API
    Serve,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };
    init_logging(config.logging())?;

    match cli.command {
        Command::Serve => {
            HttpServer::new(config)?.start().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Stats { json } => {
            let Some(stats) = admin(&config)?.get_statistics().await else {
                eprintln!("Redis statistics unavailable");
                return Ok(ExitCode::FAILURE);
            };
            let report = StatisticsReport::from(&stats);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Flush { yes, json } => {
            if !yes {
                bail!("refusing to flush without --yes; this removes every key in every database");
            }
            let result = admin(&config)?.flush_all().await;
            let report = FlushReport::from(&result);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn admin(config: &Config) -> anyhow::Result<RedisAdmin> {
    let pool = BackendPool::from_config(config.backends()).context("invalid backend configuration")?;
    Ok(RedisAdmin::new(pool))
}
