//! VKView CLI
//!
//! Interactive console client for a VK-style social network API.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use vkview_cli::client::ApiClient;
use vkview_cli::format::Prefixes;
use vkview_cli::session::Session;
use vkview_core::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "vkview",
    version,
    about = "Interactive console client for a VK-style social network API"
)]
struct Cli {
    /// Path to the configuration file (default ./config.toml, or $VKVIEW_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let prefixes = Prefixes::default();

    println!("{}Parsing config...", prefixes.info);
    let path = AppConfig::resolve_path(cli.config);
    let config = match AppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };
    let options = match config.options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };

    let client = ApiClient::new(&config)?;
    println!("{}Ready to go!", prefixes.info);

    let stdin = io::stdin();
    let mut session = Session::new(client, options, prefixes, stdin.lock(), io::stdout());
    session.run()
}
