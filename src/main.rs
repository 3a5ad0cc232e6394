use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use nagios_notify::{logging, parse_invocation, relay, Config, Dispatcher};

#[derive(Parser)]
#[command(name = "nagios-notify")]
#[command(about = "Relay Nagios host and service notifications to Slack and Microsoft Teams")]
struct Args {
    /// Path to config.json (skips the search path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a default configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Print payloads instead of posting them
    #[arg(long)]
    dry_run: bool,

    /// MODE NAGIOSHOST CHANNEL TYPE SERVICEDESC HOSTALIAS HOSTADDRESS STATE DATETIME OUTPUT COMMENTS
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    alert: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.write_config {
        Config::default().save_to_file(path)?;
        println!("Config saved to {}", path.display());
        return Ok(());
    }

    let (config, config_path) = match &args.config {
        Some(path) => (Config::from_file(path)?, path.clone()),
        None => Config::load()?,
    };

    logging::init(&config)?;
    info!("Configuration loaded from {}", config_path.display());
    debug!("{:?}", config);
    debug!("Received {} arguments", args.alert.len());

    let alert = parse_invocation(&args.alert);
    let dispatcher = if args.dry_run {
        Dispatcher::dry_run()
    } else {
        Dispatcher::new()
    };

    let summary = relay(&config, &alert, &dispatcher).await;
    debug!("{:?}", summary);

    Ok(())
}
