use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};

use penelope_lib::config::{default_config_path, load_or_init_config, AppConfig};
use penelope_lib::render::{connection_ok, connection_summary, render_status};
use penelope_lib::{GatewayClient, GatewayStatus};

#[derive(Parser)]
#[command(name = "penelope")]
#[command(version)]
#[command(about = "Poll a gateway for session and token statistics")]
struct Cli {
    /// Config file (defaults to $PENELOPE_USER_DATA_DIR/config.toml, ./user-data/config.toml or ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gateway base URL, overrides the config file
    #[arg(long, env = "PENELOPE_GATEWAY_URL", global = true)]
    url: Option<String>,

    /// Gateway auth token, overrides the config file
    #[arg(long, env = "PENELOPE_AUTH_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// More log output (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch once and print the summary
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Check that the gateway answers with the configured URL and token
    Test,
    /// Fetch and print on an interval until interrupted
    Watch {
        /// Minutes between fetches, overrides refresh.interval_minutes
        #[arg(long)]
        interval_minutes: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration, writing the default file if missing
    Config,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<(PathBuf, AppConfig)> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut cfg = load_or_init_config(&path)?;
    if let Some(url) = cli.url.as_deref() {
        cfg.gateway.url = url.to_string();
    }
    if let Some(token) = cli.token.as_deref() {
        cfg.gateway.auth_token = token.to_string();
    }
    log::debug!("config {}: {:?}", path.display(), cfg.gateway);
    Ok((path, cfg))
}

fn print_status(status: &GatewayStatus, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(status)?);
    } else {
        println!("{}", render_status(status, chrono::Utc::now()));
    }
    Ok(())
}

async fn run_watch(
    client: &GatewayClient,
    every: std::time::Duration,
    json: bool,
) -> anyhow::Result<()> {
    log::info!("refreshing every {}s", every.as_secs());
    loop {
        let status = client.fetch().await?;
        print_status(&status, json)?;
        if !json {
            println!();
        }
        tokio::select! {
            _ = tokio::time::sleep(every) => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted, stopping");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (path, cfg) = load_config(&cli)?;
    let command = cli.command.unwrap_or(Command::Status { json: false });

    match command {
        Command::Config => {
            println!("config: {}", path.display());
            println!("gateway.url: {}", cfg.gateway.url);
            println!(
                "gateway.configured: {}",
                if cfg.gateway.is_configured() { "yes" } else { "no" }
            );
            println!("gateway.auth_token: {}", cfg.gateway.token_preview());
            println!("gateway.timeout: {}s", cfg.gateway.timeout().as_secs());
            println!("refresh.interval: {}m", cfg.refresh.interval().as_secs() / 60);
            Ok(ExitCode::SUCCESS)
        }
        Command::Status { json } => {
            if !cfg.gateway.is_configured() {
                log::warn!("gateway url or token missing; set them in {}", path.display());
            }
            let client = GatewayClient::new(cfg.gateway).context("gateway client")?;
            let status = client.fetch().await.context("gateway status")?;
            print_status(&status, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Test => {
            let result = match GatewayClient::new(cfg.gateway) {
                Ok(client) => client.fetch().await,
                Err(e) => Err(e),
            };
            println!("{}", connection_summary(&result));
            Ok(if connection_ok(&result) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Watch {
            interval_minutes,
            json,
        } => {
            let mut refresh = cfg.refresh.clone();
            if let Some(m) = interval_minutes {
                refresh.interval_minutes = m;
            }
            let client = GatewayClient::new(cfg.gateway).context("gateway client")?;
            run_watch(&client, refresh.interval(), json)
                .await
                .context("gateway status")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
