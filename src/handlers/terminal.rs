use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::service::platform::{Platform, Route};

pub struct TerminalPlatform {
    opener: String,
}

impl TerminalPlatform {
    pub fn new(opener: String) -> Self {
        Self { opener }
    }
}

#[async_trait]
impl Platform for TerminalPlatform {
    async fn alert(&self, title: &str, message: &str) {
        println!("[{}] {}", title, message);
    }

    async fn navigate(&self, route: Route) {
        info!(%route, "navigating");
        println!("-> {}", route);
    }

    async fn open_url(&self, url: &str) -> Result<(), String> {
        let status = Command::new(&self.opener)
            .arg(url)
            .status()
            .await
            .map_err(|e| format!("Failed to launch {}: {}", self.opener, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", self.opener, status))
        }
    }
}
