use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::card::{self, CardView};
use crate::config::{Config, ImageConfig};
use crate::debounce::Debouncer;
use crate::pagination::Pager;

/// A catalog entry. Empty strings stand for absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub logo: String,
}

// Scraped data mixes strings, numbers and nulls for the same field.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamLookup {
    Pending,
    Resolved(Team),
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Players,
    PlayerDetail { url: String },
}

impl Screen {
    pub fn path(&self) -> String {
        match self {
            Screen::Home => "/".to_string(),
            Screen::Players => "/players".to_string(),
            Screen::PlayerDetail { url } => format!("/player/{url}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Grid,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers {
        search: String,
        players: Vec<Player>,
    },
    PlayersFailed {
        search: String,
        message: String,
    },
    SetTeam {
        team_id: String,
        team: Option<Team>,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchPlayers { search: String },
    FetchTeam { team_id: String },
}

pub struct AppState {
    pub screen: Screen,
    pub focus: Focus,
    pub search: String,
    search_debounce: Debouncer<String>,
    /// Search term the current `players` answer (or are being fetched for).
    pub active_search: String,
    pub players: Vec<Player>,
    pub players_loading: bool,
    pub players_error: Option<String>,
    pub pager: Pager,
    /// Card cursor, relative to the current page.
    pub selected: usize,
    pub teams: HashMap<String, TeamLookup>,
    pub images: ImageConfig,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            screen: Screen::Home,
            focus: Focus::Search,
            search: String::new(),
            search_debounce: Debouncer::with_emitted(config.search_debounce, String::new()),
            active_search: String::new(),
            players: Vec::new(),
            players_loading: false,
            players_error: None,
            pager: Pager::new(),
            selected: 0,
            teams: HashMap::new(),
            images: config.images.clone(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    /// Enter the players screen with fresh view state and request the unfiltered list.
    pub fn open_players(&mut self) -> ProviderCommand {
        let delay = self.search_debounce.delay();
        self.search_debounce.cancel();
        self.search_debounce = Debouncer::with_emitted(delay, String::new());
        self.screen = Screen::Players;
        self.focus = Focus::Search;
        self.search.clear();
        self.active_search.clear();
        self.players.clear();
        self.players_loading = true;
        self.players_error = None;
        self.pager = Pager::new();
        self.selected = 0;
        ProviderCommand::FetchPlayers {
            search: String::new(),
        }
    }

    fn leave_players(&mut self) {
        self.search_debounce.cancel();
    }

    pub fn go_home(&mut self) {
        self.leave_players();
        self.screen = Screen::Home;
    }

    /// Navigate to the parent screen. Returning to the list refetches it.
    pub fn back(&mut self) -> Option<ProviderCommand> {
        match self.screen {
            Screen::Home => None,
            Screen::Players => {
                self.go_home();
                None
            }
            Screen::PlayerDetail { .. } => Some(self.open_players()),
        }
    }

    pub fn search_debounce_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    pub fn input_char(&mut self, ch: char, now: Instant) {
        self.search.push(ch);
        self.search_debounce.push(self.search.clone(), now);
    }

    pub fn input_backspace(&mut self, now: Instant) {
        if self.search.pop().is_some() {
            self.search_debounce.push(self.search.clone(), now);
        }
    }

    /// Emit a fetch once the search box has been quiet for the debounce interval.
    pub fn poll_search(&mut self, now: Instant) -> Option<ProviderCommand> {
        if self.screen != Screen::Players {
            return None;
        }
        let search = self.search_debounce.poll(now)?;
        self.active_search = search.clone();
        self.players_loading = true;
        Some(ProviderCommand::FetchPlayers { search })
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
        self.selected = 0;
    }

    pub fn next_page(&mut self) {
        self.pager.next();
        self.selected = 0;
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.pager.go_to(page);
        if moved {
            self.selected = 0;
        }
        moved
    }

    /// Jump to the `n`-th (1-based) button of the visible page strip.
    pub fn go_to_button(&mut self, n: usize) -> bool {
        if !self.pager.controls_visible() || n == 0 {
            return false;
        }
        let Some(page) = self.pager.buttons().get(n - 1).copied() else {
            return false;
        };
        self.go_to_page(page)
    }

    pub fn visible_cards(&self) -> Vec<CardView> {
        card::page_cards(&self.players, self.pager.current, &self.images, &self.teams)
    }

    pub fn visible_players(&self) -> &[Player] {
        &self.players[self.pager.window()]
    }

    pub fn select_next(&mut self) {
        let total = self.visible_players().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.visible_players().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.visible_players().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    /// Navigate to a player's detail screen. An empty `url` does nothing.
    pub fn select_card(&mut self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }
        self.leave_players();
        self.screen = Screen::PlayerDetail {
            url: url.to_string(),
        };
        true
    }

    pub fn open_selected(&mut self) -> bool {
        let Some(url) = self
            .visible_players()
            .get(self.selected)
            .map(|p| p.url.clone())
        else {
            return false;
        };
        self.select_card(&url)
    }

    pub fn detail_player(&self) -> Option<&Player> {
        let Screen::PlayerDetail { url } = &self.screen else {
            return None;
        };
        self.players.iter().find(|p| &p.url == url)
    }

    /// Team lookups for cards on screen that have not been requested yet.
    /// Each team id is requested once; later cards share the pending entry.
    pub fn team_requests(&mut self) -> Vec<ProviderCommand> {
        let wanted: Vec<String> = match &self.screen {
            Screen::Players => self
                .visible_players()
                .iter()
                .map(|p| p.team.clone())
                .collect(),
            Screen::PlayerDetail { .. } => self
                .detail_player()
                .map(|p| vec![p.team.clone()])
                .unwrap_or_default(),
            Screen::Home => Vec::new(),
        };

        let mut cmds = Vec::new();
        for team_id in wanted {
            if team_id.is_empty() || self.teams.contains_key(&team_id) {
                continue;
            }
            self.teams.insert(team_id.clone(), TeamLookup::Pending);
            cmds.push(ProviderCommand::FetchTeam { team_id });
        }
        cmds
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers { search, players } => {
            if search != state.active_search {
                state.push_log(format!("[INFO] Dropped stale results for \"{search}\""));
                return;
            }
            state.push_log(format!("[INFO] Loaded {} players", players.len()));
            state.players = players;
            state.players_loading = false;
            state.players_error = None;
            state.pager.set_total(state.players.len());
            state.clamp_selection();
        }
        Delta::PlayersFailed { search, message } => {
            if search != state.active_search {
                return;
            }
            state.push_log(format!("[WARN] Players fetch error: {message}"));
            state.players_loading = false;
            state.players_error = Some(message);
        }
        Delta::SetTeam { team_id, team } => {
            let lookup = match team {
                Some(team) => TeamLookup::Resolved(team),
                None => TeamLookup::Absent,
            };
            state.teams.insert(team_id, lookup);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
