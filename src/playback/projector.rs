use crate::playback::PlaybackEngine;
use crate::playback::boxscore::{accumulate, initial_box_scores};
use crate::playback::quarters::{QUARTERS, Quarter, QuarterState, quarter_final_scores};

/// A deterministic snapshot of the reveal state at an arbitrary cumulative
/// play index, as if playback had been paused exactly there. Built fresh
/// from the partitioned sources — never shares state with live playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub current_quarter: Quarter,
    pub quarters: [QuarterState; 4],
}

impl PlaybackEngine {
    /// Project the reveal state at a 1-based cumulative play count `n`
    /// across all four quarters. `n >= total` yields the fully-finished
    /// state; `n == 0` the pristine one. `None` until the engine is armed.
    pub fn project_at(&self, n: usize) -> Option<Projection> {
        if !self.is_armed() {
            return None;
        }
        let game = self.game()?;
        let sources = self.sources();

        let initial = initial_box_scores(game);
        let mut live_box = initial.clone();
        let mut quarters: [QuarterState; 4] = Default::default();
        let mut remaining = n;
        let mut current = Quarter::First;

        for q in QUARTERS {
            let qi = q.index();
            let source = &sources[qi];
            let take = remaining.min(source.len());

            // Seed with the zeroed rosters, exactly as the live engine does
            // at arm time, so untouched quarters compare equal to live state.
            let mut state = QuarterState::fresh(quarter_final_scores(source), initial.clone());
            for event in &source[..take] {
                live_box = accumulate(event, &live_box);
                state.reveal(event.clone(), live_box.clone());
            }
            if take == source.len() {
                state.finish();
            }
            quarters[qi] = state;

            if take > 0 {
                current = q;
            }
            remaining -= take;
        }

        Some(Projection { current_quarter: current, quarters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::jitter::FixedJitter;
    use crate::playback::test_support::{four_quarter_feed, raw, test_game};
    use crate::playback::{DEFAULT_SPEED_MS, TickOutcome};
    use swoops_api::ScorePair;

    fn armed_engine(feed: Vec<swoops_api::RawPlay>) -> PlaybackEngine {
        let mut e = PlaybackEngine::with_jitter(DEFAULT_SPEED_MS, Box::new(FixedJitter(1)));
        e.set_feed(feed);
        e.set_game(test_game());
        e.set_paused(false);
        e
    }

    #[test]
    fn none_until_armed() {
        let mut e = PlaybackEngine::with_jitter(DEFAULT_SPEED_MS, Box::new(FixedJitter(1)));
        assert!(e.project_at(3).is_none());
        e.set_feed(four_quarter_feed());
        assert!(e.project_at(3).is_none());
    }

    #[test]
    fn worked_example_at_index_two() {
        // made-3pt by A (3-0), missed-2pt by B (3-0), made-FT by A (4-0)
        let feed = vec![
            raw(1, "10:00", "3PT", "MAKE", "a", (3, 0)),
            raw(1, "08:00", "2PT", "MISS", "b", (3, 0)),
            raw(1, "06:00", "FT", "MAKE", "a", (4, 0)),
        ];
        let e = armed_engine(feed);
        let projection = e.project_at(2).expect("armed engine projects");

        assert_eq!(projection.current_quarter, Quarter::First);
        let q1 = &projection.quarters[0];
        assert_eq!(q1.plays.len(), 2);
        assert!(!q1.finished);
        assert_eq!(q1.current_scores, ScorePair { challenger: 3, challenged: 0 });

        let a = q1.box_scores[0].iter().find(|p| p.uuid == "a").unwrap();
        assert_eq!(a.line.pts, 3);
        let b = q1.box_scores[0].iter().find(|p| p.uuid == "b").unwrap();
        assert_eq!(b.line.fg_att, 1, "B's miss already counts as an attempt");
    }

    #[test]
    fn projection_matches_scheduler_run_to_completion() {
        let mut e = armed_engine(four_quarter_feed());
        while e.tick() != TickOutcome::Idle {}

        let projection = e.project_at(e.total_plays()).unwrap();
        assert_eq!(projection.current_quarter, Quarter::Fourth);
        for (projected, live) in projection.quarters.iter().zip(e.quarters().iter()) {
            assert_eq!(projected, live);
        }
    }

    #[test]
    fn beyond_total_is_the_finished_state() {
        let e = armed_engine(four_quarter_feed());
        let total = e.total_plays();
        assert_eq!(e.project_at(total), e.project_at(total + 100));
    }

    #[test]
    fn index_zero_reveals_nothing() {
        let e = armed_engine(four_quarter_feed());
        let projection = e.project_at(0).unwrap();
        assert_eq!(projection.current_quarter, Quarter::First);
        assert!(projection.quarters.iter().all(|q| q.plays.is_empty() && !q.finished));
    }

    #[test]
    fn truncation_keeps_the_oldest_plays_of_the_containing_quarter() {
        // 2 plays per quarter: index 3 = Q1 complete + first play of Q2.
        let e = armed_engine(four_quarter_feed());
        let projection = e.project_at(3).unwrap();
        assert!(projection.quarters[0].finished);
        assert_eq!(projection.current_quarter, Quarter::Second);
        let q2 = &projection.quarters[1];
        assert_eq!(q2.plays.len(), 1);
        // The revealed play is the quarter's chronologically first one.
        assert_eq!(q2.plays[0].clock, "08:00");
        assert!(!q2.finished);
        assert!(projection.quarters[2].plays.is_empty());
    }

    #[test]
    fn projection_does_not_disturb_live_state() {
        let mut e = armed_engine(four_quarter_feed());
        e.tick();
        let revealed_before = e.revealed_count();
        let _ = e.project_at(e.total_plays());
        assert_eq!(e.revealed_count(), revealed_before);
        assert!(!e.quarter_state(Quarter::Fourth).finished);
    }
}
