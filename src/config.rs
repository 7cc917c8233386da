use std::collections::HashMap;
use std::env;
use std::fs;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::service::session_store::get_session_location;

const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
const DEFAULT_URL_OPENER: &str = "xdg-open";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    pub fn prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("Unsupported locale {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Option<String>,
    pub session_dir: String,
    pub timezone: Tz,
    pub locale: Locale,
    pub url_opener: String,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let timezone_name = config
            .prop("TIMEZONE")
            .unwrap_or(DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| format!("Unknown timezone {}", timezone_name))?;
        let locale = match config.prop("LOCALE") {
            Some(value) => value.parse()?,
            None => Locale::default(),
        };
        Ok(Self {
            base_url: config.prop("BASE_URL"),
            session_dir: config.prop("SESSION_DIR").unwrap_or_else(get_session_location),
            timezone,
            locale,
            url_opener: config
                .prop("URL_OPENER")
                .unwrap_or(DEFAULT_URL_OPENER.to_string()),
        })
    }
}
