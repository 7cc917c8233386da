use std::io::IsTerminal;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::handlers::terminal::TerminalPlatform;
use crate::service::backend_service::HttpCareBackend;
use crate::service::loader::ScreenContext;
use crate::service::session_store::FileSessionStore;

pub fn init_tracing(verbose: u8) -> Result<(), String> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| format!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

pub fn session_store(settings: &Settings) -> FileSessionStore {
    FileSessionStore::new(settings.session_dir.clone())
}

pub fn build_context(settings: &Settings) -> Result<ScreenContext, String> {
    let base_url = settings
        .base_url
        .clone()
        .ok_or("BASE_URL must be set to reach the care backend".to_string())?;
    Ok(ScreenContext::new(
        Arc::new(HttpCareBackend::new(base_url)),
        Arc::new(session_store(settings)),
        Arc::new(TerminalPlatform::new(settings.url_opener.clone())),
    )
    .with_locale(settings.locale))
}

pub fn today(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}
