pub mod boxscore;
pub mod jitter;
pub mod normalize;
pub mod projector;
pub mod quarters;

use crate::playback::boxscore::{LineupBoxScores, accumulate, initial_box_scores};
use crate::playback::jitter::{Jitter, UniformJitter};
use crate::playback::normalize::{PlayEvent, normalize};
use crate::playback::quarters::{QUARTERS, Quarter, QuarterState, partition, quarter_final_scores};
use log::debug;
use std::time::Duration;
use swoops_api::{Game, RawPlay};

pub const MIN_SPEED_MS: u64 = 250;
pub const MAX_SPEED_MS: u64 = 4000;
pub const SPEED_STEP_MS: u64 = 250;
pub const DEFAULT_SPEED_MS: u64 = 1500;

/// What a single scheduler tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Engine inert, paused, or already ended — nothing happened.
    Idle,
    /// One play was revealed.
    Revealed,
    /// The tick exhausted a quarter and advanced to the next one.
    QuarterFinished(Quarter),
    /// Q4 exhausted: playback auto-paused, animation over. Emitted at most
    /// once per loaded game — the host fires the mark-revealed call on it.
    GameFinished,
}

/// Drip-feed playback state machine.
///
/// Owns all reveal state; mutated only from the host's single event loop
/// (one tick callback or one key handler at a time), so there is no interior
/// locking. The host owns the actual timer and asks `next_tick_delay` for
/// the jittered interval; the engine never blocks.
pub struct PlaybackEngine {
    game: Option<Game>,
    pending_feed: Option<Vec<RawPlay>>,
    /// Forward-chronological per-quarter source lists, fixed once armed.
    sources: [Vec<PlayEvent>; 4],
    /// Next unrevealed index into each source list.
    cursors: [usize; 4],
    quarters: [QuarterState; 4],
    /// Game-cumulative box score as of the most recently revealed play.
    live_box: LineupBoxScores,
    current_quarter: Quarter,
    paused: bool,
    speed_ms: u64,
    should_animate: bool,
    armed: bool,
    finish_signaled: bool,
    total_plays: usize,
    jitter: Box<dyn Jitter>,
}

impl PlaybackEngine {
    pub fn new(speed_ms: u64) -> Self {
        Self::with_jitter(speed_ms, Box::new(UniformJitter::new()))
    }

    pub fn with_jitter(speed_ms: u64, jitter: Box<dyn Jitter>) -> Self {
        Self {
            game: None,
            pending_feed: None,
            sources: Default::default(),
            cursors: [0; 4],
            quarters: Default::default(),
            live_box: Default::default(),
            current_quarter: Quarter::First,
            paused: true,
            speed_ms: speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS),
            should_animate: true,
            armed: false,
            finish_signaled: false,
            total_plays: 0,
            jitter,
        }
    }

    // -----------------------------------------------------------------------
    // Data arrival — the engine stays inert until both inputs are present
    // -----------------------------------------------------------------------

    pub fn set_game(&mut self, game: Game) {
        self.game = Some(game);
        self.try_arm();
    }

    pub fn set_feed(&mut self, plays: Vec<RawPlay>) {
        self.pending_feed = Some(plays);
        self.try_arm();
    }

    /// Drop all reveal state but keep speed and jitter, for loading another
    /// game into the same engine.
    pub fn reset(&mut self) {
        self.game = None;
        self.pending_feed = None;
        self.sources = Default::default();
        self.cursors = [0; 4];
        self.quarters = Default::default();
        self.live_box = Default::default();
        self.current_quarter = Quarter::First;
        self.paused = true;
        self.should_animate = true;
        self.armed = false;
        self.finish_signaled = false;
        self.total_plays = 0;
    }

    fn try_arm(&mut self) {
        if self.armed {
            return;
        }
        let (Some(game), Some(feed)) = (self.game.as_ref(), self.pending_feed.as_ref()) else {
            return;
        };
        if !game.has_rosters() {
            return;
        }

        let events = normalize(feed, game);
        self.sources = partition(&events);
        self.total_plays = self.sources.iter().map(Vec::len).sum();
        self.live_box = initial_box_scores(game);
        for q in QUARTERS {
            self.quarters[q.index()] =
                QuarterState::fresh(quarter_final_scores(&self.sources[q.index()]), self.live_box.clone());
        }
        self.cursors = [0; 4];
        self.current_quarter = Quarter::First;
        self.paused = true;
        self.should_animate = true;
        self.finish_signaled = false;
        self.armed = true;
        debug!("playback armed: {} plays across 4 quarters", self.total_plays);
    }

    // -----------------------------------------------------------------------
    // Scheduler
    // -----------------------------------------------------------------------

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_playing(&self) -> bool {
        self.armed && !self.paused && self.should_animate
    }

    /// Jittered delay before the next tick. The host arms exactly one timer
    /// with this value whenever `is_playing` holds and no timer is pending.
    pub fn next_tick_delay(&mut self) -> Duration {
        self.jitter.next_delay(self.speed_ms)
    }

    /// Reveal the next play. One call per timer fire.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }

        // Guard against the user having jumped current_quarter ahead of (or
        // behind) actual reveal progress: continue from the first quarter in
        // order that is not yet finished.
        let quarter = if self.quarters[self.current_quarter.index()].finished {
            match self.first_unfinished() {
                Some(q) => q,
                None => return TickOutcome::Idle,
            }
        } else {
            self.current_quarter
        };
        self.current_quarter = quarter;

        let qi = quarter.index();
        if self.cursors[qi] < self.sources[qi].len() {
            self.reveal_next(qi);
        }

        if self.cursors[qi] >= self.sources[qi].len() {
            self.quarters[qi].finish();
            match quarter.next() {
                Some(next) => {
                    self.current_quarter = next;
                    TickOutcome::QuarterFinished(quarter)
                }
                None => {
                    self.paused = true;
                    self.should_animate = false;
                    self.finish_signal()
                }
            }
        } else {
            TickOutcome::Revealed
        }
    }

    fn first_unfinished(&self) -> Option<Quarter> {
        QUARTERS.iter().copied().find(|q| !self.quarters[q.index()].finished)
    }

    fn reveal_next(&mut self, qi: usize) {
        let event = self.sources[qi][self.cursors[qi]].clone();
        self.cursors[qi] += 1;
        self.live_box = accumulate(&event, &self.live_box);
        self.quarters[qi].reveal(event, self.live_box.clone());
    }

    fn finish_signal(&mut self) -> TickOutcome {
        if self.finish_signaled {
            TickOutcome::Idle
        } else {
            self.finish_signaled = true;
            TickOutcome::GameFinished
        }
    }

    // -----------------------------------------------------------------------
    // User controls
    // -----------------------------------------------------------------------

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_speed(&mut self, speed_ms: u64) {
        self.speed_ms = speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS);
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.speed_ms.saturating_sub(SPEED_STEP_MS));
    }

    pub fn speed_down(&mut self) {
        self.set_speed(self.speed_ms + SPEED_STEP_MS);
    }

    /// Jump the view to a quarter. A user-triggered forward jump first
    /// force-completes every skipped unfinished quarter so the reveal state
    /// never has gaps. No-op until the engine is armed.
    pub fn set_current_quarter(&mut self, quarter: Quarter, user_triggered: bool) {
        if !self.armed {
            return;
        }
        if user_triggered {
            for q in QUARTERS.iter().copied().take_while(|q| *q < quarter) {
                if !self.quarters[q.index()].finished {
                    self.force_complete(q);
                }
            }
        }
        self.current_quarter = quarter;
    }

    /// Reveal a quarter's remaining plays at once and mark it finished.
    fn force_complete(&mut self, quarter: Quarter) {
        let qi = quarter.index();
        while self.cursors[qi] < self.sources[qi].len() {
            self.reveal_next(qi);
        }
        self.quarters[qi].finish();
    }

    /// Force-complete all four quarters. Idempotent. Returns true when this
    /// call is the one that ended the game, so the host can fire the
    /// best-effort mark-revealed notification exactly once.
    pub fn skip_to_end(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        for q in QUARTERS {
            if !self.quarters[q.index()].finished {
                self.force_complete(q);
            }
        }
        self.current_quarter = Quarter::Fourth;
        self.paused = true;
        self.should_animate = false;
        self.finish_signal() == TickOutcome::GameFinished
    }

    // -----------------------------------------------------------------------
    // Accessors for rendering and scrubbing
    // -----------------------------------------------------------------------

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn current_quarter(&self) -> Quarter {
        self.current_quarter
    }

    pub fn quarter_state(&self, quarter: Quarter) -> &QuarterState {
        &self.quarters[quarter.index()]
    }

    pub fn quarters(&self) -> &[QuarterState; 4] {
        &self.quarters
    }

    pub(crate) fn sources(&self) -> &[Vec<PlayEvent>; 4] {
        &self.sources
    }

    pub fn total_plays(&self) -> usize {
        self.total_plays
    }

    pub fn revealed_count(&self) -> usize {
        self.cursors.iter().sum()
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_animate(&self) -> bool {
        self.should_animate
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use swoops_api::{Game, Lineup, Player, RawPlay};

    pub fn roster(team: &str, names: &[(&str, &str)]) -> Lineup {
        Lineup {
            team_name: team.into(),
            players: names
                .iter()
                .map(|(uuid, name)| Player {
                    uuid: (*uuid).into(),
                    full_name: (*name).into(),
                })
                .collect(),
        }
    }

    pub fn test_game() -> Game {
        Game {
            id: "g1".into(),
            challenger: roster("Ball Hogs", &[("a", "A. Guard"), ("b", "B. Forward")]),
            challenged: roster("Rim Runners", &[("x", "X. Center"), ("y", "Y. Wing")]),
            ..Default::default()
        }
    }

    pub fn raw(
        quarter: u8,
        clock: &str,
        action: &str,
        action_type: &str,
        uuid: &str,
        scores: (u16, u16),
    ) -> RawPlay {
        RawPlay {
            quarter,
            gameclock: clock.into(),
            detail: format!("{uuid} {action} {action_type}"),
            action: Some(action.into()),
            action_type: Some(action_type.into()),
            player_uuid: Some(uuid.into()),
            lineup_number: None,
            challenger_score: scores.0,
            challenged_score: scores.1,
        }
    }

    /// Two plays per quarter, challenger scoring threes, challenged twos.
    pub fn four_quarter_feed() -> Vec<RawPlay> {
        let mut feed = Vec::new();
        let mut c = 0u16;
        let mut d = 0u16;
        for q in 1..=4u8 {
            c += 3;
            feed.push(raw(q, "08:00", "3PT", "MAKE", "a", (c, d)));
            d += 2;
            feed.push(raw(q, "04:00", "2PT", "MAKE", "x", (c, d)));
        }
        feed
    }
}
