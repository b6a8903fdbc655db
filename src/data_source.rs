use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;

use crate::config::{Config, SourceKind};
use crate::http_client::http_client;
use crate::state::{Player, Team};

/// Request/response access to the player catalog.
pub trait DataSource: Send {
    fn fetch_players(&self, search: &str) -> Result<Vec<Player>>;
    fn fetch_team(&self, team_id: &str) -> Result<Option<Team>>;
}

pub fn source_from_config(config: &Config) -> Box<dyn DataSource> {
    match config.source {
        SourceKind::Http => Box::new(HttpDataSource::new(
            config.players_url.clone(),
            config.teams_url.clone(),
            config.http_timeout,
        )),
        SourceKind::Demo => Box::new(StaticDataSource::demo()),
    }
}

/// Static JSON files served over plain HTTP GET.
pub struct HttpDataSource {
    players_url: String,
    teams_url: String,
    timeout: Duration,
    // teams.json is fetched once per source; failures are not cached.
    teams: OnceCell<Vec<Team>>,
}

impl HttpDataSource {
    pub fn new(players_url: String, teams_url: String, timeout: Duration) -> Self {
        Self {
            players_url,
            teams_url,
            timeout,
            teams: OnceCell::new(),
        }
    }

    fn get(&self, url: &str) -> Result<String> {
        let client = http_client(self.timeout)?;
        let resp = client.get(url).send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        check_status(status, url, body)
    }
}

/// Map a response status to the body on success or a descriptive error.
pub fn check_status(status: StatusCode, url: &str, body: String) -> Result<String> {
    if status == StatusCode::NOT_FOUND {
        return Err(anyhow!("http {status}: {url} not found"));
    }
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, body));
    }
    Ok(body)
}

impl DataSource for HttpDataSource {
    fn fetch_players(&self, search: &str) -> Result<Vec<Player>> {
        let body = self.get(&self.players_url)?;
        let players = parse_players_json(&body)?;
        Ok(filter_players(players, search))
    }

    fn fetch_team(&self, team_id: &str) -> Result<Option<Team>> {
        let teams = self.teams.get_or_try_init(|| {
            let body = self.get(&self.teams_url)?;
            parse_teams_json(&body)
        })?;
        Ok(find_team(teams, team_id))
    }
}

/// In-memory catalog for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    players: Vec<Player>,
    teams: Vec<Team>,
}

impl StaticDataSource {
    pub fn new(players: Vec<Player>, teams: Vec<Team>) -> Self {
        Self { players, teams }
    }

    pub fn demo() -> Self {
        Self::new(demo_players(), demo_teams())
    }
}

impl DataSource for StaticDataSource {
    fn fetch_players(&self, search: &str) -> Result<Vec<Player>> {
        Ok(filter_players(self.players.clone(), search))
    }

    fn fetch_team(&self, team_id: &str) -> Result<Option<Team>> {
        Ok(find_team(&self.teams, team_id))
    }
}

pub fn parse_players_json(raw: &str) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid players json")
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<Team>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid teams json")
}

/// Case-insensitive substring match on the player name. A blank term keeps everything.
pub fn filter_players(players: Vec<Player>, search: &str) -> Vec<Player> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return players;
    }
    players
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

fn find_team(teams: &[Team], team_id: &str) -> Option<Team> {
    if team_id.is_empty() {
        return None;
    }
    teams.iter().find(|t| t.url == team_id).cloned()
}

fn demo_player(url: &str, name: &str, country: &str, team: &str, image: &str) -> Player {
    Player {
        url: url.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        team: team.to_string(),
        image_url: image.to_string(),
    }
}

fn demo_players() -> Vec<Player> {
    vec![
        demo_player("tenz", "TenZ", "Canada", "sentinels", "tenz.png"),
        demo_player("zekken", "zekken", "United States", "sentinels", "zekken.png"),
        demo_player("sacy", "Sacy", "Brazil", "sentinels", "sacy.jpg"),
        demo_player("pancada", "pANcada", "Brazil", "sentinels", "pancada.png"),
        demo_player("aspas", "aspas", "Brazil", "leviatan", "aspas.webp"),
        demo_player("mazino", "Mazino", "Chile", "leviatan", "mazino.png"),
        demo_player("kiNgg", "kiNgg", "Chile", "leviatan", ""),
        demo_player("derke", "Derke", "Finland", "fnatic", "derke.png"),
        demo_player("boaster", "Boaster", "United Kingdom", "fnatic", "boaster.png"),
        demo_player("chronicle", "Chronicle", "Russia", "fnatic", "chronicle.jpeg"),
        demo_player("leo", "Leo", "Sweden", "fnatic", "leo.png"),
        demo_player("alfajer", "Alfajer", "Turkey", "fnatic", "alfajer.png"),
        demo_player("something", "something", "Russia", "paper-rex", "something.png"),
        demo_player("f0rsaken", "f0rsakeN", "Indonesia", "paper-rex", "f0rsaken.png"),
        demo_player("jinggg", "Jinggg", "Singapore", "paper-rex", "jinggg.png"),
        demo_player("d4v41", "d4v41", "Malaysia", "paper-rex", "d4v41.png"),
        demo_player("mindfreak", "mindfreak", "Indonesia", "paper-rex", "mindfreak.png"),
        demo_player("less", "Less", "Brazil", "loud", "less.png"),
        demo_player("cauanzin", "cauanzin", "Brazil", "loud", "cauanzin.png"),
        demo_player("", "tuyz", "Brazil", "loud", "tuyz.png"),
    ]
}

fn demo_teams() -> Vec<Team> {
    let logo = |slug: &str| {
        format!(
            "https://raw.githubusercontent.com/TOC-Web-Scraping/scraping/main/data/images/teams/{slug}.png"
        )
    };
    vec![
        Team {
            url: "sentinels".to_string(),
            name: "Sentinels".to_string(),
            logo: logo("sentinels"),
        },
        Team {
            url: "leviatan".to_string(),
            name: "LEVIATÁN".to_string(),
            logo: logo("leviatan"),
        },
        Team {
            url: "fnatic".to_string(),
            name: "FNATIC".to_string(),
            logo: logo("fnatic"),
        },
        Team {
            url: "paper-rex".to_string(),
            name: "Paper Rex".to_string(),
            logo: logo("paper-rex"),
        },
    ]
}
