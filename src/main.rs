//! Coinview main entry point

use coinview_api::start_server;
use coinview_config::{Config, ConfigResult};
use coinview_core::CoinApiClient;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "coinview")]
#[command(author = "Coinview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A small web client for cryptocurrency exchange rates", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// CoinAPI access key (overrides api.key)
    #[arg(long, env = "COINVIEW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Bind host (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Load the config file, apply command line overrides, then validate
///
/// Only the default path may be absent, in which case defaults are used and
/// the returned flag is set. An explicit `--config` must exist.
fn load_config(args: &Args) -> ConfigResult<(Config, bool)> {
    let defaulted = args.config == Path::new(DEFAULT_CONFIG_PATH) && !args.config.exists();
    let mut config = if defaulted {
        Config::default()
    } else {
        Config::load(&args.config)?
    };
    if let Some(key) = &args.api_key {
        config.api.key = key.clone();
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok((config, defaulted))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, defaulted) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e.to_details());
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if defaulted {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded: api={}, quote currency={}, {} currencies",
        config.api.base_url,
        config.api.quote_currency,
        config.currencies.len()
    );

    let source = Arc::new(CoinApiClient::from_config(&config.api)?);

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinview_config::ConfigErrorCode;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let args = Args::parse_from(["coinview", "--config", "/definitely/missing.yaml", "--api-key", "k"]);
        let err = load_config(&args).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }

    #[test]
    fn test_missing_default_config_falls_back() {
        let args = Args::parse_from(["coinview", "--api-key", "k", "--port", "9100"]);
        if args.config.exists() {
            return;
        }
        let (config, defaulted) = load_config(&args).unwrap();
        assert!(defaulted);
        assert_eq!(config.api.key, "k");
        assert_eq!(config.server.port, 9100);
    }
}
