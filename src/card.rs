use std::collections::HashMap;

use crate::config::ImageConfig;
use crate::pagination;
use crate::state::{Player, TeamLookup};

/// Everything a single card needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: String,
    pub url: String,
    pub name: String,
    pub country: String,
    pub image: String,
    pub team_logo: Option<String>,
}

/// Image for a player: `<base><url>.<ext>` when both `url` and `image_url` are set,
/// otherwise the fallback placeholder. The path is not checked for existence.
pub fn image_path(player: &Player, images: &ImageConfig) -> String {
    if player.url.is_empty() || player.image_url.is_empty() {
        return images.fallback.clone();
    }
    let ext = player.image_url.rsplit('.').next().unwrap_or_default();
    format!("{}{}.{}", images.base, player.url, ext)
}

/// Logo for a team id, only once the lookup has resolved to a team with a logo.
pub fn team_logo(team_id: &str, teams: &HashMap<String, TeamLookup>) -> Option<String> {
    match teams.get(team_id)? {
        TeamLookup::Resolved(team) if !team.logo.is_empty() => Some(team.logo.clone()),
        _ => None,
    }
}

pub fn card_view(
    player: &Player,
    position: usize,
    images: &ImageConfig,
    teams: &HashMap<String, TeamLookup>,
) -> CardView {
    let key = if player.url.is_empty() {
        format!("#{position}")
    } else {
        player.url.clone()
    };
    CardView {
        key,
        url: player.url.clone(),
        name: player.name.clone(),
        country: player.country.clone(),
        image: image_path(player, images),
        team_logo: team_logo(&player.team, teams),
    }
}

/// Cards for the current page window, in result order.
pub fn page_cards(
    players: &[Player],
    page: usize,
    images: &ImageConfig,
    teams: &HashMap<String, TeamLookup>,
) -> Vec<CardView> {
    let window = pagination::page_window(page, players.len());
    let offset = window.start;
    players[window]
        .iter()
        .enumerate()
        .map(|(i, player)| card_view(player, offset + i, images, teams))
        .collect()
}

/// Trailing file name of an image URL, for compact card rendering.
pub fn short_image_name(image: &str) -> &str {
    image.rsplit('/').next().unwrap_or(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Team;

    fn images() -> ImageConfig {
        ImageConfig {
            base: "https://img.test/players/".to_string(),
            fallback: "https://img.test/fallback.png".to_string(),
        }
    }

    #[test]
    fn image_uses_last_extension_token() {
        let player = Player {
            url: "abc".to_string(),
            image_url: "photos/abc.final.jpeg".to_string(),
            ..Player::default()
        };
        assert_eq!(image_path(&player, &images()), "https://img.test/players/abc.jpeg");
    }

    #[test]
    fn image_without_dot_keeps_whole_token() {
        let player = Player {
            url: "abc".to_string(),
            image_url: "png".to_string(),
            ..Player::default()
        };
        assert_eq!(image_path(&player, &images()), "https://img.test/players/abc.png");
    }

    #[test]
    fn logo_only_when_resolved() {
        let mut teams = HashMap::new();
        teams.insert("a".to_string(), TeamLookup::Pending);
        teams.insert("b".to_string(), TeamLookup::Absent);
        teams.insert(
            "c".to_string(),
            TeamLookup::Resolved(Team {
                url: "c".to_string(),
                name: "C".to_string(),
                logo: "c.png".to_string(),
            }),
        );
        teams.insert(
            "d".to_string(),
            TeamLookup::Resolved(Team {
                url: "d".to_string(),
                name: "D".to_string(),
                logo: String::new(),
            }),
        );
        assert_eq!(team_logo("a", &teams), None);
        assert_eq!(team_logo("b", &teams), None);
        assert_eq!(team_logo("c", &teams).as_deref(), Some("c.png"));
        assert_eq!(team_logo("d", &teams), None);
        assert_eq!(team_logo("zz", &teams), None);
    }

    #[test]
    fn short_image_name_takes_file() {
        assert_eq!(short_image_name("https://x.test/a/b.png"), "b.png");
        assert_eq!(short_image_name("b.png"), "b.png");
    }
}
