#![allow(non_snake_case)]

use std::env;

use careCompanion::cli;
use careCompanion::config::{AppConfig, Settings};

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Ignoring config file {}: {}", path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    cli::cli(settings).await;
}
