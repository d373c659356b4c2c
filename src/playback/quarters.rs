use crate::playback::boxscore::LineupBoxScores;
use crate::playback::normalize::PlayEvent;
use swoops_api::ScorePair;

/// Playback axis. Regulation only — overtime is not part of the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quarter {
    #[default]
    First,
    Second,
    Third,
    Fourth,
}

pub const QUARTERS: [Quarter; 4] = [Quarter::First, Quarter::Second, Quarter::Third, Quarter::Fourth];

impl Quarter {
    pub fn index(self) -> usize {
        match self {
            Quarter::First => 0,
            Quarter::Second => 1,
            Quarter::Third => 2,
            Quarter::Fourth => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        QUARTERS.get(i).copied()
    }

    /// Quarter number as the feed carries it (1–4).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::First => "Q1",
            Quarter::Second => "Q2",
            Quarter::Third => "Q3",
            Quarter::Fourth => "Q4",
        }
    }
}

/// Reveal-side record for one quarter.
///
/// `plays` holds revealed events newest-first (most recent at index 0).
/// `box_scores` is the game-cumulative box score as of this quarter's most
/// recently revealed play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuarterState {
    pub finished: bool,
    pub plays: Vec<PlayEvent>,
    pub final_scores: ScorePair,
    pub current_scores: ScorePair,
    pub box_scores: LineupBoxScores,
}

impl QuarterState {
    pub fn fresh(final_scores: ScorePair, box_scores: LineupBoxScores) -> Self {
        Self {
            finished: false,
            plays: Vec::new(),
            final_scores,
            current_scores: ScorePair::default(),
            box_scores,
        }
    }

    /// Record one revealed play with its already-accumulated box score.
    pub fn reveal(&mut self, event: PlayEvent, box_scores: LineupBoxScores) {
        self.current_scores = event.scores;
        self.box_scores = box_scores;
        self.plays.insert(0, event);
    }

    /// Source exhausted — freeze the score at the quarter's terminal pair.
    pub fn finish(&mut self) {
        self.finished = true;
        self.current_scores = self.final_scores;
    }

    pub fn revealed_count(&self) -> usize {
        self.plays.len()
    }
}

/// Split the normalized whole-game list into four forward-chronological
/// per-quarter lists. Events with a quarter outside 1–4 are dropped.
pub fn partition(events: &[PlayEvent]) -> [Vec<PlayEvent>; 4] {
    let mut out: [Vec<PlayEvent>; 4] = Default::default();
    for event in events {
        if let Some(q) = event.quarter.checked_sub(1).map(usize::from)
            && q < 4
        {
            out[q].push(event.clone());
        }
    }
    out
}

/// A quarter's terminal score is the pair carried by its last event.
pub fn quarter_final_scores(source: &[PlayEvent]) -> ScorePair {
    source.last().map(|e| e.scores).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::normalize::ActionKind;

    fn event(sequence: usize, quarter: u8, challenger: u16) -> PlayEvent {
        PlayEvent {
            sequence,
            quarter,
            clock: "05:00".into(),
            detail: format!("play {sequence}"),
            action: ActionKind::Unknown,
            player_uuid: None,
            player_name: None,
            lineup: None,
            scores: ScorePair { challenger, challenged: 0 },
        }
    }

    #[test]
    fn quarter_axis_is_ordered_and_bounded() {
        assert_eq!(Quarter::First.next(), Some(Quarter::Second));
        assert_eq!(Quarter::Fourth.next(), None);
        assert_eq!(Quarter::Third.number(), 3);
        assert!(Quarter::First < Quarter::Fourth);
        assert_eq!(Quarter::from_index(4), None);
    }

    #[test]
    fn partition_is_complete_and_order_preserving() {
        let feed: Vec<PlayEvent> = vec![
            event(0, 1, 2),
            event(1, 1, 4),
            event(2, 2, 6),
            event(3, 3, 6),
            event(4, 4, 8),
            event(5, 4, 10),
        ];
        let parts = partition(&feed);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1].len(), 1);
        assert_eq!(parts[2].len(), 1);
        assert_eq!(parts[3].len(), 2);

        // Concatenating the four quarters reproduces the original feed.
        let rebuilt: Vec<PlayEvent> = parts.iter().flatten().cloned().collect();
        assert_eq!(rebuilt, feed);
    }

    #[test]
    fn out_of_range_quarters_are_dropped() {
        let parts = partition(&[event(0, 0, 0), event(1, 5, 0), event(2, 2, 3)]);
        assert_eq!(parts.iter().map(Vec::len).sum::<usize>(), 1);
        assert_eq!(parts[1][0].sequence, 2);
    }

    #[test]
    fn final_scores_come_from_the_last_event() {
        let source = vec![event(0, 1, 2), event(1, 1, 7)];
        assert_eq!(
            quarter_final_scores(&source),
            ScorePair { challenger: 7, challenged: 0 }
        );
        assert_eq!(quarter_final_scores(&[]), ScorePair::default());
    }

    #[test]
    fn reveal_prepends_newest_first() {
        let mut state = QuarterState::fresh(ScorePair::default(), Default::default());
        state.reveal(event(0, 1, 2), Default::default());
        state.reveal(event(1, 1, 4), Default::default());
        assert_eq!(state.plays[0].sequence, 1);
        assert_eq!(state.plays[1].sequence, 0);
        assert_eq!(state.current_scores.challenger, 4);
    }

    #[test]
    fn finish_freezes_the_terminal_score() {
        let mut state = QuarterState::fresh(
            ScorePair { challenger: 20, challenged: 18 },
            Default::default(),
        );
        state.reveal(event(0, 1, 2), Default::default());
        state.finish();
        assert!(state.finished);
        assert_eq!(state.current_scores, ScorePair { challenger: 20, challenged: 18 });
    }
}
