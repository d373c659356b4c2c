use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use swoops_api::{Game, PlayFeed};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadGame { game_id: String },
    LoadPlayFeed { game_id: String },
    /// Best-effort telemetry fired once when Q4 finishes. No response is
    /// ever sent back for this; failures are logged and dropped.
    MarkRevealed { game_id: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    GameLoaded { game: Game },
    FeedLoaded { feed: PlayFeed },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
