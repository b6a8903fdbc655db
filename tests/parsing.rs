use std::fs;
use std::path::PathBuf;

use players_terminal::card::image_path;
use players_terminal::config::ImageConfig;
use players_terminal::data_source::{filter_players, parse_players_json, parse_teams_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(players.len(), 4);
    assert_eq!(players[0].url, "tenz");
    assert_eq!(players[0].team, "sentinels");
    assert_eq!(players[0].image_url, "https://owcdn.net/img/tenz.png");
    // null and missing fields become empty, numeric ids become strings
    assert_eq!(players[2].image_url, "");
    assert_eq!(players[3].url, "");
    assert_eq!(players[3].team, "42");
}

#[test]
fn parses_teams_fixture() {
    let raw = read_fixture("teams.json");
    let teams = parse_teams_json(&raw).expect("fixture should parse");
    assert_eq!(teams.len(), 3);
    assert_eq!(teams[0].logo, "https://owcdn.net/img/sentinels.png");
    assert_eq!(teams[1].logo, "");
}

#[test]
fn null_bodies_are_empty() {
    assert!(parse_players_json("null").expect("null should parse").is_empty());
    assert!(parse_players_json("  ").expect("blank should parse").is_empty());
    assert!(parse_teams_json("null").expect("null should parse").is_empty());
}

#[test]
fn malformed_body_is_an_error() {
    let err = parse_players_json("{\"players\": 3}").expect_err("object is not a list");
    assert!(format!("{err:#}").contains("invalid players json"));
}

#[test]
fn fixture_images_resolve_or_fall_back() {
    let images = ImageConfig::default();
    let players = parse_players_json(&read_fixture("players.json")).expect("fixture should parse");

    assert_eq!(
        image_path(&players[0], &images),
        format!("{}tenz.png", images.base)
    );
    assert_eq!(
        image_path(&players[1], &images),
        format!("{}aspas.webp", images.base)
    );
    assert_eq!(image_path(&players[2], &images), images.fallback);
    assert_eq!(image_path(&players[3], &images), images.fallback);
}

#[test]
fn filter_matches_name_substring() {
    let players = parse_players_json(&read_fixture("players.json")).expect("fixture should parse");
    let hits = filter_players(players.clone(), "as");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "aspas");
    assert_eq!(filter_players(players.clone(), "").len(), 4);
    assert!(filter_players(players, "zzz").is_empty());
}
