use swoops_api::{Game, LineupSlot, RawPlay, ScorePair};

// ---------------------------------------------------------------------------
// Action classification
// ---------------------------------------------------------------------------

/// What a single play did, reduced to the categories the box-score
/// accumulator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    MadeTwo,
    MissedTwo,
    MadeThree,
    MissedThree,
    MadeFreeThrow,
    MissedFreeThrow,
    Assist,
    Steal,
    Block,
    Turnover,
    Foul,
    OffensiveRebound,
    DefensiveRebound,
    /// Quarter start/end marker — display only, no stat delta.
    Boundary,
    /// Unclassifiable detail string — passed through, no stat delta.
    Unknown,
}

impl ActionKind {
    pub fn is_boundary(self) -> bool {
        self == ActionKind::Boundary
    }
}

/// One fully-resolved play: classification, acting player, side, and the
/// running score pair as of this play. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub sequence: usize,
    pub quarter: u8, // 1–4
    pub clock: String,
    pub detail: String,
    pub action: ActionKind,
    pub player_uuid: Option<String>,
    pub player_name: Option<String>,
    pub lineup: Option<LineupSlot>,
    pub scores: ScorePair,
}

/// Resolve the raw feed against the two rosters.
///
/// Pure transform: same-length output, input untouched. Callers must hold
/// off until both the feed and the roster-carrying game are available —
/// there is no partial output.
pub fn normalize(feed: &[RawPlay], game: &Game) -> Vec<PlayEvent> {
    feed.iter()
        .enumerate()
        .map(|(sequence, play)| normalize_one(sequence, play, game))
        .collect()
}

fn normalize_one(sequence: usize, play: &RawPlay, game: &Game) -> PlayEvent {
    let action = classify(play);

    if action.is_boundary() {
        // Swoops serves "Start of 2nd Period" etc.; the UI speaks in quarters.
        let detail = play.detail.replace("Period", "Quarter").replace("period", "quarter");
        return PlayEvent {
            sequence,
            quarter: play.quarter,
            clock: play.gameclock.clone(),
            detail,
            action,
            player_uuid: None,
            player_name: None,
            lineup: None,
            scores: play.scores(),
        };
    }

    let resolved = resolve_player(play, game);
    let lineup = play
        .lineup_number
        .and_then(LineupSlot::from_number)
        .or(resolved.map(|(slot, _)| slot));

    PlayEvent {
        sequence,
        quarter: play.quarter,
        clock: play.gameclock.clone(),
        detail: play.detail.clone(),
        action,
        player_uuid: resolved.map(|(_, p)| p.uuid.clone()),
        player_name: resolved.map(|(_, p)| p.full_name.clone()),
        lineup,
        scores: play.scores(),
    }
}

/// Find the acting player: UUID lookup first, then a roster player whose
/// name appears in the detail text. Returns the slot the player was found in.
fn resolve_player<'a>(
    play: &RawPlay,
    game: &'a Game,
) -> Option<(LineupSlot, &'a swoops_api::Player)> {
    let slots = [LineupSlot::Challenger, LineupSlot::Challenged];

    if let Some(uuid) = play.player_uuid.as_deref()
        && !uuid.is_empty()
    {
        for slot in slots {
            if let Some(p) = game.lineup(slot).players.iter().find(|p| p.uuid == uuid) {
                return Some((slot, p));
            }
        }
    }

    for slot in slots {
        if let Some(p) = game
            .lineup(slot)
            .players
            .iter()
            .find(|p| !p.full_name.is_empty() && play.detail.contains(p.full_name.as_str()))
        {
            return Some((slot, p));
        }
    }

    None
}

fn classify(play: &RawPlay) -> ActionKind {
    let detail = play.detail.to_lowercase();
    if detail.contains("period") && (detail.contains("start") || detail.contains("end")) {
        return ActionKind::Boundary;
    }

    match (play.action.as_deref(), play.action_type.as_deref()) {
        (Some("2PT"), Some("MAKE")) => ActionKind::MadeTwo,
        (Some("2PT"), Some("MISS")) => ActionKind::MissedTwo,
        (Some("3PT"), Some("MAKE")) => ActionKind::MadeThree,
        (Some("3PT"), Some("MISS")) => ActionKind::MissedThree,
        (Some("FT"), Some("MAKE")) => ActionKind::MadeFreeThrow,
        (Some("FT"), Some("MISS")) => ActionKind::MissedFreeThrow,
        (Some("REB"), Some("OFF")) => ActionKind::OffensiveRebound,
        (Some("REB"), Some("DEF")) => ActionKind::DefensiveRebound,
        (Some("AST"), _) => ActionKind::Assist,
        (Some("STL"), _) => ActionKind::Steal,
        (Some("BLK"), _) => ActionKind::Block,
        (Some("TOV"), _) => ActionKind::Turnover,
        (Some("PF"), _) => ActionKind::Foul,
        _ => classify_detail(&detail),
    }
}

/// Keyword fallback for feeds that only carry the display string.
fn classify_detail(detail: &str) -> ActionKind {
    let makes = detail.contains("makes");
    let misses = detail.contains("misses");

    if detail.contains("free throw") {
        if makes {
            return ActionKind::MadeFreeThrow;
        }
        if misses {
            return ActionKind::MissedFreeThrow;
        }
        return ActionKind::Unknown;
    }
    if detail.contains("three point") || detail.contains("3-pt") || detail.contains("3pt") {
        if makes {
            return ActionKind::MadeThree;
        }
        if misses {
            return ActionKind::MissedThree;
        }
        return ActionKind::Unknown;
    }
    if detail.contains("two point")
        || detail.contains("2-pt")
        || detail.contains("layup")
        || detail.contains("dunk")
        || detail.contains("jump shot")
    {
        if makes {
            return ActionKind::MadeTwo;
        }
        if misses {
            return ActionKind::MissedTwo;
        }
        return ActionKind::Unknown;
    }
    if detail.contains("offensive rebound") {
        return ActionKind::OffensiveRebound;
    }
    if detail.contains("defensive rebound") {
        return ActionKind::DefensiveRebound;
    }
    if detail.contains("assist") {
        return ActionKind::Assist;
    }
    if detail.contains("steal") {
        return ActionKind::Steal;
    }
    if detail.contains("block") {
        return ActionKind::Block;
    }
    if detail.contains("turnover") {
        return ActionKind::Turnover;
    }
    if detail.contains("foul") {
        return ActionKind::Foul;
    }
    ActionKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use swoops_api::{Lineup, Player};

    fn roster(names: &[(&str, &str)]) -> Lineup {
        Lineup {
            team_name: "Test".into(),
            players: names
                .iter()
                .map(|(uuid, name)| Player {
                    uuid: (*uuid).into(),
                    full_name: (*name).into(),
                })
                .collect(),
        }
    }

    fn test_game() -> Game {
        Game {
            id: "g1".into(),
            challenger: roster(&[("uuid-a", "A. Guard"), ("uuid-b", "B. Forward")]),
            challenged: roster(&[("uuid-x", "X. Center")]),
            ..Default::default()
        }
    }

    fn play(detail: &str) -> RawPlay {
        RawPlay {
            quarter: 1,
            gameclock: "10:00".into(),
            detail: detail.into(),
            ..Default::default()
        }
    }

    #[test]
    fn structured_fields_win_over_detail_text() {
        let mut p = play("A. Guard does something ambiguous");
        p.action = Some("3PT".into());
        p.action_type = Some("MISS".into());
        assert_eq!(classify(&p), ActionKind::MissedThree);
    }

    #[test]
    fn detail_text_fallback_classifies_shots_and_hustle_stats() {
        assert_eq!(classify(&play("A. Guard makes three point shot")), ActionKind::MadeThree);
        assert_eq!(classify(&play("B. Forward misses two point layup")), ActionKind::MissedTwo);
        assert_eq!(classify(&play("A. Guard makes free throw 1 of 2")), ActionKind::MadeFreeThrow);
        assert_eq!(classify(&play("X. Center grabs the defensive rebound")), ActionKind::DefensiveRebound);
        assert_eq!(classify(&play("X. Center grabs the offensive rebound")), ActionKind::OffensiveRebound);
        assert_eq!(classify(&play("steal by A. Guard")), ActionKind::Steal);
        assert_eq!(classify(&play("shooting foul on X. Center")), ActionKind::Foul);
        assert_eq!(classify(&play("jump ball won")), ActionKind::Unknown);
    }

    #[test]
    fn boundary_rewrites_period_to_quarter() {
        let events = normalize(&[play("End of 1st Period")], &test_game());
        assert_eq!(events[0].action, ActionKind::Boundary);
        assert_eq!(events[0].detail, "End of 1st Quarter");
        assert!(events[0].player_uuid.is_none());
        assert!(events[0].lineup.is_none());
    }

    #[test]
    fn player_resolved_by_uuid_attributes_correct_lineup() {
        let mut p = play("makes two point shot");
        p.action = Some("2PT".into());
        p.action_type = Some("MAKE".into());
        p.player_uuid = Some("uuid-x".into());
        let events = normalize(&[p], &test_game());
        assert_eq!(events[0].player_name.as_deref(), Some("X. Center"));
        assert_eq!(events[0].lineup, Some(LineupSlot::Challenged));
    }

    #[test]
    fn player_resolved_by_name_in_detail_when_uuid_missing() {
        let events = normalize(&[play("B. Forward misses three point shot")], &test_game());
        assert_eq!(events[0].player_uuid.as_deref(), Some("uuid-b"));
        assert_eq!(events[0].lineup, Some(LineupSlot::Challenger));
    }

    #[test]
    fn explicit_lineup_number_wins_over_resolved_side() {
        let mut p = play("A. Guard commits a turnover");
        p.lineup_number = Some(2);
        let events = normalize(&[p], &test_game());
        // Feed says lineup 2 even though the name resolves to lineup 1.
        assert_eq!(events[0].lineup, Some(LineupSlot::Challenged));
        assert_eq!(events[0].player_uuid.as_deref(), Some("uuid-a"));
    }

    #[test]
    fn output_is_same_length_and_carries_scores() {
        let mut p1 = play("A. Guard makes three point shot");
        p1.challenger_score = 3;
        let p2 = play("unrecognizable noise");
        let events = normalize(&[p1, p2], &test_game());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].scores, ScorePair { challenger: 3, challenged: 0 });
        assert_eq!(events[1].action, ActionKind::Unknown);
        assert_eq!(events[0].sequence, 0);
        assert_eq!(events[1].sequence, 1);
    }
}
