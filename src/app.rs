use crate::playback::TickOutcome;
use crate::playback::quarters::Quarter;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use log::warn;
use swoops_api::{Game, PlayFeed};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    PlayByPlay,
    BoxScore,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(game_id: String) -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(game_id, settings.speed_ms),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_game_loaded(&mut self, game: Game) {
        self.state.last_error = None;
        self.state.playback.set_game(game);
    }

    pub fn on_feed_loaded(&mut self, feed: PlayFeed) {
        self.state.last_error = None;
        self.state.playback.set_feed(feed.plays);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Playback controls
    // -----------------------------------------------------------------------

    pub fn toggle_pause(&mut self) {
        if self.state.playback.is_armed() {
            self.state.playback.toggle_paused();
        }
    }

    pub fn speed_up(&mut self) {
        self.state.playback.speed_up();
        self.persist_speed();
    }

    pub fn speed_down(&mut self) {
        self.state.playback.speed_down();
        self.persist_speed();
    }

    fn persist_speed(&mut self) {
        self.settings.speed_ms = self.state.playback.speed_ms();
        if let Err(e) = self.settings.save() {
            warn!("could not persist settings: {e}");
        }
    }

    pub fn jump_to_quarter(&mut self, number: u8) {
        if let Some(quarter) = Quarter::from_index(number.saturating_sub(1) as usize) {
            self.state.playback.set_current_quarter(quarter, true);
            self.state.play_scroll = 0;
        }
    }

    /// Returns true when this skip is the one that ended the game, so the
    /// caller can fire the one-shot reveal notification.
    pub fn skip_to_end(&mut self) -> bool {
        self.state.play_scroll = 0;
        self.state.playback.skip_to_end()
    }

    /// Drop all reveal progress so the feed can be replayed from the start.
    /// The caller re-requests the game and feed afterwards.
    pub fn restart(&mut self) {
        self.state.playback.reset();
        self.state.scrub.end();
        self.state.play_scroll = 0;
        self.state.box_scroll = 0;
    }

    /// One scheduler tick, driven by the host's drip timer.
    pub fn on_play_tick(&mut self) -> TickOutcome {
        let outcome = self.state.playback.tick();
        if outcome == TickOutcome::Revealed {
            // Keep the newest play visible while the drip runs.
            self.state.play_scroll = 0;
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Scrubbing — renders read-only projections, never touches live state
    // -----------------------------------------------------------------------

    pub fn scrub_begin(&mut self) {
        if !self.state.playback.is_armed() {
            return;
        }
        self.state.scrub.begin(self.state.playback.revealed_count());
        self.refresh_scrub_projection();
    }

    pub fn scrub_move(&mut self, delta: isize) {
        if !self.state.scrub.active {
            self.scrub_begin();
        }
        let total = self.state.playback.total_plays();
        self.state.scrub.move_by(delta, total);
        self.refresh_scrub_projection();
    }

    pub fn scrub_end(&mut self) {
        self.state.scrub.end();
    }

    fn refresh_scrub_projection(&mut self) {
        self.state.scrub.projection = self.state.playback.project_at(self.state.scrub.position);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if self.state.active_tab == MenuItem::BoxScore {
            self.state.box_scroll = 0;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}
