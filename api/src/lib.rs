pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the Swoops wire format
// ---------------------------------------------------------------------------

/// A head-to-head Swoops matchup with both lineups resolved.
#[derive(Debug, Clone, Default)]
pub struct Game {
    pub id: String,
    pub status: GameStatus,
    /// Lineup 1 — the side that issued the challenge.
    pub challenger: Lineup,
    /// Lineup 2 — the side that accepted.
    pub challenged: Lineup,
    /// Final score pair from the completed simulation, if the game has one.
    pub final_scores: Option<ScorePair>,
    /// Whether the game's result has already been revealed to this user.
    pub revealed: bool,
}

impl Game {
    /// Both 5-player rosters present — the prerequisite for playback.
    pub fn has_rosters(&self) -> bool {
        !self.challenger.players.is_empty() && !self.challenged.players.is_empty()
    }

    pub fn lineup(&self, slot: LineupSlot) -> &Lineup {
        match slot {
            LineupSlot::Challenger => &self.challenger,
            LineupSlot::Challenged => &self.challenged,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lineup {
    pub team_name: String,
    pub players: Vec<Player>, // 5 when the lineup is submitted
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub uuid: String,
    pub full_name: String,
}

/// Which of the two lineups an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineupSlot {
    Challenger, // lineup number 1
    Challenged, // lineup number 2
}

impl LineupSlot {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(LineupSlot::Challenger),
            2 => Some(LineupSlot::Challenged),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            LineupSlot::Challenger => 0,
            LineupSlot::Challenged => 1,
        }
    }
}

/// Running score pair as of some point in the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub challenger: u16,
    pub challenged: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Open,
    InProgress,
    Complete,
}

/// One raw play-by-play entry as served by the feed endpoint.
///
/// `action`/`action_type` are the structured classification hints; `detail`
/// is the display string the normalizer falls back to when they are absent.
#[derive(Debug, Clone, Default)]
pub struct RawPlay {
    pub quarter: u8,
    pub gameclock: String, // "MM:SS", counting down within the quarter
    pub detail: String,
    pub action: Option<String>,      // "2PT" | "3PT" | "FT" | "REB" | ...
    pub action_type: Option<String>, // "MAKE" | "MISS" | "OFF" | "DEF" | ...
    pub player_uuid: Option<String>,
    pub lineup_number: Option<u8>, // 1 | 2 when the feed attributes a side
    pub challenger_score: u16,
    pub challenged_score: u16,
}

impl RawPlay {
    pub fn scores(&self) -> ScorePair {
        ScorePair {
            challenger: self.challenger_score,
            challenged: self.challenged_score,
        }
    }
}

/// The full ordered play feed for one game.
#[derive(Debug, Clone, Default)]
pub struct PlayFeed {
    pub game_id: String,
    pub plays: Vec<RawPlay>,
}
