//! Swoops API raw wire types: serde shapes for deserializing responses.
//! These map to the clean domain types via the mapping fns in client.rs.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Game detail  (GET /api/game/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameResponse {
    pub id: Option<String>,
    pub status: Option<String>, // "OPEN" | "IN_PROGRESS" | "COMPLETE"
    pub lineup_1: Option<WireLineup>,
    pub lineup_2: Option<WireLineup>,
    pub results: Option<WireResults>,
    pub revealed: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireLineup {
    pub team: Option<WireTeam>,
    #[serde(default)]
    pub players: Vec<WirePlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    pub uuid: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireResults {
    pub lineup_1_score: Option<u16>,
    pub lineup_2_score: Option<u16>,
}

// ---------------------------------------------------------------------------
// Play-by-play feed  (GET /api/game/{id}/playbyplay)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayByPlayResponse {
    pub feed: Option<Vec<WirePlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlay {
    pub quarter: Option<u8>,
    pub gameclock: Option<String>,
    pub detail: Option<String>,
    pub action: Option<String>,
    pub action_type: Option<String>,
    pub player: Option<String>, // acting player's UUID
    pub lineup_number: Option<u8>,
    pub challenger_score: Option<u16>,
    pub challenged_score: Option<u16>,
}
