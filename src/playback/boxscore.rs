use crate::playback::normalize::{ActionKind, PlayEvent};
use log::debug;
use swoops_api::Game;

/// Per-player running totals. Counting stats only — every field is
/// monotonically non-decreasing as plays are applied in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatLine {
    pub fg_made: u16,
    pub fg_att: u16,
    pub two_made: u16,
    pub two_att: u16,
    pub three_made: u16,
    pub three_att: u16,
    pub ft_made: u16,
    pub ft_att: u16,
    pub orb: u16,
    pub drb: u16,
    pub trb: u16,
    pub ast: u16,
    pub stl: u16,
    pub blk: u16,
    pub tov: u16,
    pub pf: u16,
    pub pts: u16,
}

impl StatLine {
    /// The fixed stat-delta table. Attempts increment on both makes and
    /// misses; makes additionally bump the makes counter and points by the
    /// shot value. Two-pointers feed the field-goal totals alongside threes.
    fn apply(&mut self, action: ActionKind) {
        match action {
            ActionKind::MadeTwo => {
                self.two_made += 1;
                self.two_att += 1;
                self.fg_made += 1;
                self.fg_att += 1;
                self.pts += 2;
            }
            ActionKind::MissedTwo => {
                self.two_att += 1;
                self.fg_att += 1;
            }
            ActionKind::MadeThree => {
                self.three_made += 1;
                self.three_att += 1;
                self.fg_made += 1;
                self.fg_att += 1;
                self.pts += 3;
            }
            ActionKind::MissedThree => {
                self.three_att += 1;
                self.fg_att += 1;
            }
            ActionKind::MadeFreeThrow => {
                self.ft_made += 1;
                self.ft_att += 1;
                self.pts += 1;
            }
            ActionKind::MissedFreeThrow => {
                self.ft_att += 1;
            }
            ActionKind::Assist => self.ast += 1,
            ActionKind::Steal => self.stl += 1,
            ActionKind::Block => self.blk += 1,
            ActionKind::Turnover => self.tov += 1,
            ActionKind::Foul => self.pf += 1,
            ActionKind::OffensiveRebound => {
                self.orb += 1;
                self.trb += 1;
            }
            ActionKind::DefensiveRebound => {
                self.drb += 1;
                self.trb += 1;
            }
            ActionKind::Boundary | ActionKind::Unknown => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerBoxScore {
    pub uuid: String,
    pub name: String,
    pub line: StatLine,
}

/// Both lineups' box scores, indexed by `LineupSlot::index()`.
pub type LineupBoxScores = [Vec<PlayerBoxScore>; 2];

/// Zeroed box scores for both rosters.
pub fn initial_box_scores(game: &Game) -> LineupBoxScores {
    let zeroed = |players: &[swoops_api::Player]| {
        players
            .iter()
            .map(|p| PlayerBoxScore {
                uuid: p.uuid.clone(),
                name: p.full_name.clone(),
                line: StatLine::default(),
            })
            .collect()
    };
    [zeroed(&game.challenger.players), zeroed(&game.challenged.players)]
}

/// `accumulate(event, prior) -> next`. Always returns a fresh object graph;
/// `prior` is never mutated, so earlier snapshots stay valid for scrubbing.
///
/// A play referencing a player absent from the attributed roster is skipped
/// silently — upstream data gaps must not stall playback.
pub fn accumulate(event: &PlayEvent, prior: &LineupBoxScores) -> LineupBoxScores {
    let mut next = prior.clone();

    let (Some(lineup), Some(uuid)) = (event.lineup, event.player_uuid.as_deref()) else {
        return next;
    };

    match next[lineup.index()].iter_mut().find(|p| p.uuid == uuid) {
        Some(entry) => entry.line.apply(event.action),
        None => debug!("play {} references unknown player {uuid}", event.sequence),
    }
    next
}

/// Team totals for one lineup's accumulated lines.
pub fn team_totals(lineup: &[PlayerBoxScore]) -> StatLine {
    let mut totals = StatLine::default();
    for p in lineup {
        totals.fg_made += p.line.fg_made;
        totals.fg_att += p.line.fg_att;
        totals.two_made += p.line.two_made;
        totals.two_att += p.line.two_att;
        totals.three_made += p.line.three_made;
        totals.three_att += p.line.three_att;
        totals.ft_made += p.line.ft_made;
        totals.ft_att += p.line.ft_att;
        totals.orb += p.line.orb;
        totals.drb += p.line.drb;
        totals.trb += p.line.trb;
        totals.ast += p.line.ast;
        totals.stl += p.line.stl;
        totals.blk += p.line.blk;
        totals.tov += p.line.tov;
        totals.pf += p.line.pf;
        totals.pts += p.line.pts;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use swoops_api::{LineupSlot, ScorePair};

    fn event(action: ActionKind, lineup: LineupSlot, uuid: &str) -> PlayEvent {
        PlayEvent {
            sequence: 0,
            quarter: 1,
            clock: "10:00".into(),
            detail: String::new(),
            action,
            player_uuid: Some(uuid.into()),
            player_name: None,
            lineup: Some(lineup),
            scores: ScorePair::default(),
        }
    }

    fn one_player_each() -> LineupBoxScores {
        let entry = |uuid: &str| PlayerBoxScore {
            uuid: uuid.into(),
            name: uuid.into(),
            line: StatLine::default(),
        };
        [vec![entry("a")], vec![entry("x")]]
    }

    fn line_after(action: ActionKind) -> StatLine {
        let prior = one_player_each();
        let next = accumulate(&event(action, LineupSlot::Challenger, "a"), &prior);
        next[0][0].line
    }

    #[test]
    fn made_two_increments_makes_attempts_and_points() {
        let line = line_after(ActionKind::MadeTwo);
        assert_eq!((line.two_made, line.two_att), (1, 1));
        assert_eq!((line.fg_made, line.fg_att), (1, 1));
        assert_eq!(line.pts, 2);
    }

    #[test]
    fn missed_shots_increment_attempts_only() {
        let line = line_after(ActionKind::MissedThree);
        assert_eq!((line.three_made, line.three_att), (0, 1));
        assert_eq!((line.fg_made, line.fg_att), (0, 1));
        assert_eq!(line.pts, 0);

        let line = line_after(ActionKind::MissedFreeThrow);
        assert_eq!((line.ft_made, line.ft_att), (0, 1));
        assert_eq!(line.pts, 0);
    }

    #[test]
    fn made_free_throw_counts_the_attempt_too() {
        let line = line_after(ActionKind::MadeFreeThrow);
        assert_eq!((line.ft_made, line.ft_att), (1, 1));
        assert_eq!(line.pts, 1);
        // Free throws do not touch the field-goal columns.
        assert_eq!((line.fg_made, line.fg_att), (0, 0));
    }

    #[test]
    fn rebounds_bump_side_and_total() {
        let line = line_after(ActionKind::OffensiveRebound);
        assert_eq!((line.orb, line.drb, line.trb), (1, 0, 1));
        let line = line_after(ActionKind::DefensiveRebound);
        assert_eq!((line.orb, line.drb, line.trb), (0, 1, 1));
    }

    #[test]
    fn single_counter_actions_bump_exactly_one_stat() {
        for (action, pick) in [
            (ActionKind::Assist, 0usize),
            (ActionKind::Steal, 1),
            (ActionKind::Block, 2),
            (ActionKind::Turnover, 3),
            (ActionKind::Foul, 4),
        ] {
            let line = line_after(action);
            let counters = [line.ast, line.stl, line.blk, line.tov, line.pf];
            for (i, v) in counters.into_iter().enumerate() {
                assert_eq!(v, u16::from(i == pick), "{action:?} touched counter {i}");
            }
            assert_eq!(line.pts, 0);
        }
    }

    #[test]
    fn prior_snapshot_is_never_mutated() {
        let prior = one_player_each();
        let next = accumulate(&event(ActionKind::MadeThree, LineupSlot::Challenger, "a"), &prior);
        assert_eq!(prior[0][0].line, StatLine::default());
        assert_eq!(next[0][0].line.pts, 3);
    }

    #[test]
    fn unknown_player_is_tolerated_silently() {
        let prior = one_player_each();
        let next = accumulate(&event(ActionKind::MadeTwo, LineupSlot::Challenger, "ghost"), &prior);
        assert_eq!(next, prior);
    }

    #[test]
    fn lineup_attribution_picks_the_right_side() {
        let prior = one_player_each();
        let next = accumulate(&event(ActionKind::Steal, LineupSlot::Challenged, "x"), &prior);
        assert_eq!(next[0][0].line.stl, 0);
        assert_eq!(next[1][0].line.stl, 1);
    }

    #[test]
    fn team_totals_sum_player_lines() {
        let prior = one_player_each();
        let mid = accumulate(&event(ActionKind::MadeThree, LineupSlot::Challenger, "a"), &prior);
        let next = accumulate(&event(ActionKind::MadeFreeThrow, LineupSlot::Challenger, "a"), &mid);
        let totals = team_totals(&next[0]);
        assert_eq!(totals.pts, 4);
        assert_eq!(totals.fg_made, 1);
        assert_eq!(totals.ft_att, 1);
    }
}
