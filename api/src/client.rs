use crate::wire::{GameResponse, PlayByPlayResponse, WireLineup, WirePlay};
use crate::{Game, GameStatus, Lineup, PlayFeed, Player, RawPlay, ScorePair};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const SWOOPS_API: &str = "https://api.playswoops.com/api";

/// Swoops REST client for game metadata and play-by-play feeds.
#[derive(Debug, Clone)]
pub struct SwoopsApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for SwoopsApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("swooptui/0.1 (terminal game viewer)")
                .build()
                .unwrap_or_default(),
            base_url: std::env::var("SWOOPTUI_API_URL").unwrap_or_else(|_| SWOOPS_API.to_owned()),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl SwoopsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different server root (tests, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Fetch matchup metadata: both lineups' rosters plus the final result.
    pub async fn fetch_game(&self, game_id: &str) -> ApiResult<Game> {
        let url = format!("{}/game/{game_id}", self.base_url);
        let raw: GameResponse = self.get(&url).await?;
        if raw.id.is_none() && raw.lineup_1.is_none() {
            return Err(ApiError::NotFound(format!("game {game_id}")));
        }
        Ok(map_game(game_id, raw))
    }

    /// Fetch the ordered play-by-play feed for a game.
    pub async fn fetch_play_feed(&self, game_id: &str) -> ApiResult<PlayFeed> {
        let url = format!("{}/game/{game_id}/playbyplay", self.base_url);
        let raw: PlayByPlayResponse = self.get(&url).await?;
        let plays = raw
            .feed
            .unwrap_or_default()
            .iter()
            .map(map_play)
            .collect();
        Ok(PlayFeed {
            game_id: game_id.to_owned(),
            plays,
        })
    }

    /// Mark the game as revealed for this user. Best-effort telemetry:
    /// the caller is expected to log and drop any error, never retry.
    pub async fn mark_revealed(&self, game_id: &str) -> ApiResult<()> {
        let url = format!("{}/game/{game_id}/reveal", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url))?;
        Ok(())
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: Swoops wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_game(game_id: &str, raw: GameResponse) -> Game {
    let final_scores = raw.results.as_ref().and_then(|r| {
        r.lineup_1_score.zip(r.lineup_2_score).map(|(c1, c2)| ScorePair {
            challenger: c1,
            challenged: c2,
        })
    });

    Game {
        id: raw.id.unwrap_or_else(|| game_id.to_owned()),
        status: parse_status(raw.status.as_deref().unwrap_or_default()),
        challenger: raw.lineup_1.map(map_lineup).unwrap_or_default(),
        challenged: raw.lineup_2.map(map_lineup).unwrap_or_default(),
        final_scores,
        revealed: raw.revealed.unwrap_or(false),
    }
}

fn map_lineup(raw: WireLineup) -> Lineup {
    Lineup {
        team_name: raw
            .team
            .and_then(|t| t.name)
            .unwrap_or_else(|| "Unnamed".to_owned()),
        players: raw
            .players
            .into_iter()
            .map(|p| Player {
                uuid: p.uuid.unwrap_or_default(),
                full_name: p.full_name.unwrap_or_default(),
            })
            .collect(),
    }
}

fn map_play(raw: &WirePlay) -> RawPlay {
    RawPlay {
        quarter: raw.quarter.unwrap_or_default(),
        gameclock: raw.gameclock.clone().unwrap_or_default(),
        detail: raw.detail.clone().unwrap_or_default(),
        action: raw.action.clone(),
        action_type: raw.action_type.clone(),
        player_uuid: raw.player.clone(),
        lineup_number: raw.lineup_number,
        challenger_score: raw.challenger_score.unwrap_or_default(),
        challenged_score: raw.challenged_score.unwrap_or_default(),
    }
}

fn parse_status(s: &str) -> GameStatus {
    match s {
        "IN_PROGRESS" | "STARTED" => GameStatus::InProgress,
        "COMPLETE" | "FINISHED" => GameStatus::Complete,
        _ => GameStatus::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_maps_known_states() {
        assert_eq!(parse_status("OPEN"), GameStatus::Open);
        assert_eq!(parse_status("IN_PROGRESS"), GameStatus::InProgress);
        assert_eq!(parse_status("COMPLETE"), GameStatus::Complete);
        assert_eq!(parse_status("anything-else"), GameStatus::Open);
    }

    #[test]
    fn map_game_builds_final_scores_only_when_both_sides_present() {
        let raw = GameResponse {
            id: Some("42".into()),
            status: Some("COMPLETE".into()),
            results: Some(crate::wire::WireResults {
                lineup_1_score: Some(88),
                lineup_2_score: None,
            }),
            ..Default::default()
        };
        let game = map_game("42", raw);
        assert!(game.final_scores.is_none());

        let raw = GameResponse {
            id: Some("42".into()),
            results: Some(crate::wire::WireResults {
                lineup_1_score: Some(88),
                lineup_2_score: Some(84),
            }),
            ..Default::default()
        };
        let game = map_game("42", raw);
        assert_eq!(
            game.final_scores,
            Some(ScorePair { challenger: 88, challenged: 84 })
        );
    }

    #[test]
    fn map_play_defaults_missing_fields() {
        let raw = WirePlay {
            quarter: Some(2),
            gameclock: Some("07:31".into()),
            detail: Some("J. Doe makes two point shot".into()),
            ..Default::default()
        };
        let play = map_play(&raw);
        assert_eq!(play.quarter, 2);
        assert_eq!(play.gameclock, "07:31");
        assert!(play.action.is_none());
        assert!(play.player_uuid.is_none());
        assert_eq!(play.scores(), ScorePair::default());
    }

    #[tokio::test]
    async fn fetch_play_feed_parses_feed_array() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "feed": [
                {
                    "quarter": 1,
                    "gameclock": "11:42",
                    "detail": "A. Guard makes three point shot",
                    "action": "3PT",
                    "action_type": "MAKE",
                    "player": "uuid-a",
                    "lineup_number": 1,
                    "challenger_score": 3,
                    "challenged_score": 0
                }
            ]
        });
        let mock = server
            .mock("GET", "/game/42/playbyplay")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = SwoopsApi::with_base_url(server.url());
        let feed = api.fetch_play_feed("42").await.expect("feed should parse");
        mock.assert_async().await;

        assert_eq!(feed.game_id, "42");
        assert_eq!(feed.plays.len(), 1);
        assert_eq!(feed.plays[0].action.as_deref(), Some("3PT"));
        assert_eq!(feed.plays[0].player_uuid.as_deref(), Some("uuid-a"));
        assert_eq!(
            feed.plays[0].scores(),
            ScorePair { challenger: 3, challenged: 0 }
        );
    }

    #[tokio::test]
    async fn fetch_game_maps_lineups_and_rosters() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "id": "42",
            "status": "COMPLETE",
            "revealed": false,
            "lineup_1": {
                "team": { "name": "Ball Hogs" },
                "players": [
                    { "uuid": "uuid-a", "full_name": "A. Guard" },
                    { "uuid": "uuid-b", "full_name": "B. Forward" }
                ]
            },
            "lineup_2": {
                "team": { "name": "Rim Runners" },
                "players": [
                    { "uuid": "uuid-x", "full_name": "X. Center" }
                ]
            },
            "results": { "lineup_1_score": 91, "lineup_2_score": 87 }
        });
        let mock = server
            .mock("GET", "/game/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = SwoopsApi::with_base_url(server.url());
        let game = api.fetch_game("42").await.expect("game should parse");
        mock.assert_async().await;

        assert_eq!(game.id, "42");
        assert_eq!(game.status, GameStatus::Complete);
        assert_eq!(game.challenger.team_name, "Ball Hogs");
        assert_eq!(game.challenger.players.len(), 2);
        assert_eq!(game.challenged.players[0].uuid, "uuid-x");
        assert!(game.has_rosters());
    }

    #[tokio::test]
    async fn mark_revealed_posts_and_surfaces_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("POST", "/game/42/reveal")
            .with_status(204)
            .create_async()
            .await;
        let api = SwoopsApi::with_base_url(server.url());
        assert!(api.mark_revealed("42").await.is_ok());
        ok.assert_async().await;

        let failing = server
            .mock("POST", "/game/43/reveal")
            .with_status(500)
            .create_async()
            .await;
        let err = api.mark_revealed("43").await;
        failing.assert_async().await;
        assert!(err.is_err(), "5xx must surface so the caller can log it");
    }
}
