use std::env;
use std::time::Duration;

use crate::debounce::SEARCH_DEBOUNCE;

pub const DEFAULT_PLAYERS_URL: &str =
    "https://raw.githubusercontent.com/TOC-Web-Scraping/scraping/main/data/players.json";
pub const DEFAULT_TEAMS_URL: &str =
    "https://raw.githubusercontent.com/TOC-Web-Scraping/scraping/main/data/teams.json";
pub const DEFAULT_IMAGE_BASE: &str =
    "https://raw.githubusercontent.com/TOC-Web-Scraping/scraping/main/data/images/players/";
pub const DEFAULT_IMAGE_FALLBACK: &str =
    "https://www.saiterm.in.th/images/product/20210609132931_1.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub base: String,
    pub fallback: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_IMAGE_BASE.to_string(),
            fallback: DEFAULT_IMAGE_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceKind,
    pub players_url: String,
    pub teams_url: String,
    pub images: ImageConfig,
    pub search_debounce: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Http,
            players_url: DEFAULT_PLAYERS_URL.to_string(),
            teams_url: DEFAULT_TEAMS_URL.to_string(),
            images: ImageConfig::default(),
            search_debounce: SEARCH_DEBOUNCE,
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Read settings from the environment. Call after `dotenvy` has loaded any `.env` files.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset, blank or unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };
        let source = match get("PLAYERS_SOURCE")
            .unwrap_or_else(|| "http".to_string())
            .to_lowercase()
            .as_str()
        {
            "demo" | "seed" | "offline" => SourceKind::Demo,
            _ => SourceKind::Http,
        };
        let debounce_ms = get("SEARCH_DEBOUNCE_MS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(defaults.search_debounce.as_millis() as u64)
            .clamp(100, 10_000);
        let timeout_secs = get("HTTP_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(defaults.http_timeout.as_secs())
            .clamp(1, 120);

        Self {
            source,
            players_url: get("PLAYERS_DATA_URL").unwrap_or(defaults.players_url),
            teams_url: get("TEAMS_DATA_URL").unwrap_or(defaults.teams_url),
            images: ImageConfig {
                base: get("PLAYER_IMAGE_BASE").unwrap_or(defaults.images.base),
                fallback: get("PLAYER_IMAGE_FALLBACK").unwrap_or(defaults.images.fallback),
            },
            search_debounce: Duration::from_millis(debounce_ms),
            http_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
