use std::collections::HashMap;
use std::time::Duration;

use players_terminal::config::{
    Config, DEFAULT_IMAGE_BASE, DEFAULT_PLAYERS_URL, DEFAULT_TEAMS_URL, SourceKind,
};

fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.source, SourceKind::Http);
    assert_eq!(config.players_url, DEFAULT_PLAYERS_URL);
    assert_eq!(config.teams_url, DEFAULT_TEAMS_URL);
    assert_eq!(config.images.base, DEFAULT_IMAGE_BASE);
    assert_eq!(config.search_debounce, Duration::from_millis(1000));
    assert_eq!(config.http_timeout, Duration::from_secs(10));
}

#[test]
fn debounce_is_clamped() {
    let low = config_from(&[("SEARCH_DEBOUNCE_MS", "50")]);
    assert_eq!(low.search_debounce, Duration::from_millis(100));
    let high = config_from(&[("SEARCH_DEBOUNCE_MS", "60000")]);
    assert_eq!(high.search_debounce, Duration::from_millis(10_000));
    let mid = config_from(&[("SEARCH_DEBOUNCE_MS", " 250 ")]);
    assert_eq!(mid.search_debounce, Duration::from_millis(250));
}

#[test]
fn timeout_is_clamped() {
    let low = config_from(&[("HTTP_TIMEOUT_SECS", "0")]);
    assert_eq!(low.http_timeout, Duration::from_secs(1));
    let high = config_from(&[("HTTP_TIMEOUT_SECS", "900")]);
    assert_eq!(high.http_timeout, Duration::from_secs(120));
}

#[test]
fn unparsable_numbers_fall_back() {
    let config = config_from(&[("SEARCH_DEBOUNCE_MS", "abc"), ("HTTP_TIMEOUT_SECS", "-3")]);
    assert_eq!(config.search_debounce, Duration::from_millis(1000));
    assert_eq!(config.http_timeout, Duration::from_secs(10));
}

#[test]
fn source_mapping() {
    for raw in ["demo", "DEMO", " seed ", "offline"] {
        assert_eq!(config_from(&[("PLAYERS_SOURCE", raw)]).source, SourceKind::Demo);
    }
    for raw in ["http", "", "something-else"] {
        assert_eq!(config_from(&[("PLAYERS_SOURCE", raw)]).source, SourceKind::Http);
    }
}

#[test]
fn blank_urls_keep_defaults() {
    let config = config_from(&[
        ("PLAYERS_DATA_URL", "   "),
        ("TEAMS_DATA_URL", "http://localhost:8000/teams.json"),
        ("PLAYER_IMAGE_FALLBACK", "none.png"),
    ]);
    assert_eq!(config.players_url, DEFAULT_PLAYERS_URL);
    assert_eq!(config.teams_url, "http://localhost:8000/teams.json");
    assert_eq!(config.images.fallback, "none.png");
}
