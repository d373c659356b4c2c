use crate::app::MenuItem;
use crate::playback::PlaybackEngine;
use crate::playback::projector::Projection;

// ---------------------------------------------------------------------------
// Scrub state
// ---------------------------------------------------------------------------

/// While the user drags the timeline, the UI renders a deterministic
/// projection instead of live playback state. Live playback is left
/// untouched; leaving scrub mode simply drops the projection.
#[derive(Debug, Default)]
pub struct ScrubState {
    pub active: bool,
    /// 1-based cumulative play count the user has scrubbed to.
    pub position: usize,
    pub projection: Option<Projection>,
}

impl ScrubState {
    pub fn begin(&mut self, at: usize) {
        self.active = true;
        self.position = at;
    }

    /// Move the scrub target, clamped to `[0, total]`.
    pub fn move_by(&mut self, delta: isize, total: usize) {
        let next = self.position.saturating_add_signed(delta);
        self.position = next.min(total);
    }

    pub fn end(&mut self) {
        self.active = false;
        self.projection = None;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub game_id: String,
    pub playback: PlaybackEngine,
    pub scrub: ScrubState,
    /// Vertical scroll offset for the play list.
    pub play_scroll: u16,
    /// Vertical scroll offset for the box-score view.
    pub box_scroll: u16,
}

impl AppState {
    pub fn new(game_id: String, speed_ms: u64) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            game_id,
            playback: PlaybackEngine::new(speed_ms),
            scrub: ScrubState::default(),
            play_scroll: 0,
            box_scroll: 0,
        }
    }
}
