use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use solar_system_demo::{cfg, logging, server};

#[derive(Parser)]
#[command(name = "solar_system_server")]
#[command(about = "Serves solar system positions over HTTP and WebSocket")]
struct Cli {
    /// Config file; defaults to config.toml in the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Simulated days per tick multiplier
    #[arg(long)]
    time_scale: Option<f64>,

    /// Write the effective config to the config file and exit
    #[arg(long, default_value = "false")]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let path = cli.config.clone().or_else(cfg::default_path);
    let mut config = match &path {
        Some(path) => cfg::load(path)?,
        None => cfg::Config::default(),
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(scale) = cli.time_scale {
        config.server.time_scale = scale;
    }

    if cli.init_config {
        let written = cfg::save(&config, path.as_deref())?;
        println!("wrote {}", written.display());
        return Ok(());
    }

    tracing::info!(host = %config.server.host, port = config.server.port, "starting solar system server");
    server::run(&config.server).await
}
