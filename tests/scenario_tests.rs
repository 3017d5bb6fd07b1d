//! End-to-end game scenarios driven through the reducer.
//!
//! Each test plays a short game from an empty roster and checks totals,
//! statuses and the derived views after every interesting step.

use jackpot_scorer::core::{
    Action, DropLevel, GameMode, GameState, IdGenerator, PlayerId, PlayerStatus, RoundScores,
    ScoreEntry,
};
use jackpot_scorer::machine::{is_game_over, leaderboard, reduce, running_totals, winner, PlayerLabel};
use jackpot_scorer::rules::validation::WINNER_REQUIRED;
use jackpot_scorer::rules::{validate_round_scores, RoundSheet, ELIMINATION_THRESHOLD};

struct Table {
    state: GameState,
    ids: IdGenerator,
}

impl Table {
    fn new(names: &[&str], mode: GameMode) -> Self {
        let mut table = Self {
            state: GameState::new(),
            ids: IdGenerator::with_manual_clock(7, 1_700_000_000_000),
        };
        for name in names {
            table.apply(Action::AddPlayer(name.to_string()));
        }
        table.apply(Action::StartGame(mode));
        table
    }

    fn apply(&mut self, action: Action) -> &GameState {
        self.state = reduce(&self.state, &action, &mut self.ids);
        &self.state
    }

    fn id(&self, name: &str) -> PlayerId {
        self.state
            .players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.clone())
            .unwrap()
    }

    fn total(&self, name: &str) -> u32 {
        self.state.player(&self.id(name)).unwrap().total_score
    }

    fn submit(&mut self, entries: &[(&str, ScoreEntry)]) {
        let scores: RoundScores = entries
            .iter()
            .map(|(name, entry)| (self.id(name), *entry))
            .collect();
        self.apply(Action::SubmitRound(scores));
    }
}

/// Test that the first round updates totals, the winner and the round counter.
#[test]
fn test_first_round_records_winner() {
    let mut table = Table::new(&["P1", "P2"], GameMode::Standard);
    table.submit(&[("P1", ScoreEntry::points(0)), ("P2", ScoreEntry::points(45))]);

    assert_eq!(table.total("P1"), 0);
    assert_eq!(table.total("P2"), 45);
    assert_eq!(table.state.rounds[0].winner_id, Some(table.id("P1")));
    assert_eq!(table.state.rounds[0].round_number, 1);
    assert_eq!(table.state.current_round(), 2);
}

/// Test that a first drop from 230 eliminates at 255 and ends a two-player game.
#[test]
fn test_first_drop_can_eliminate() {
    let mut table = Table::new(&["P1", "P2"], GameMode::Standard);
    table.state.players[1].total_score = 230;

    table.submit(&[("P1", ScoreEntry::points(0)), ("P2", ScoreEntry::drop(DropLevel::First))]);

    let p2 = table.state.player(&table.id("P2")).unwrap();
    assert_eq!(p2.total_score, 255);
    assert_eq!(p2.drop_count, 1);
    assert_eq!(p2.status, PlayerStatus::Eliminated);
    assert!(is_game_over(&table.state));
    assert_eq!(winner(&table.state).map(|p| p.name.as_str()), Some("P1"));
}

/// Test that re-entry takes the highest active total and is labelled.
#[test]
fn test_reentry_matches_highest_active_total() {
    let mut table = Table::new(&["P1", "P2", "P3"], GameMode::Standard);
    table.state.players[0].total_score = 40;
    table.state.players[1].total_score = 90;
    table.state.players[2].total_score = 260;
    table.state.players[2].status = PlayerStatus::Eliminated;

    let p3 = table.id("P3");
    table.apply(Action::ReenterPlayer(p3.clone()));

    let p3 = table.state.player(&p3).unwrap();
    assert_eq!(p3.total_score, 90);
    assert_eq!(p3.status, PlayerStatus::Active);
    assert!(p3.has_reentered);

    let board = leaderboard(&table.state);
    let labels: Vec<_> = board.iter().map(|s| (s.player.name.as_str(), s.label)).collect();
    assert_eq!(
        labels,
        vec![("P1", PlayerLabel::Active), ("P2", PlayerLabel::Active), ("P3", PlayerLabel::Reentered)]
    );
}

/// Test that validation accepts exactly one zero and names the missing winner.
#[test]
fn test_validation_requires_one_winner() {
    let table = Table::new(&["P1", "P2", "P3"], GameMode::Standard);
    let (p1, p2, p3) = (table.id("P1"), table.id("P2"), table.id("P3"));

    let ok: RoundScores = [
        (p1.clone(), ScoreEntry::points(0)),
        (p2.clone(), ScoreEntry::points(20)),
        (p3.clone(), ScoreEntry::points(35)),
    ]
    .into_iter()
    .collect();
    assert!(validate_round_scores(&ok, table.state.active_players()).is_empty());

    let no_winner: RoundScores = [
        (p1, ScoreEntry::points(10)),
        (p2, ScoreEntry::points(20)),
        (p3, ScoreEntry::points(35)),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        validate_round_scores(&no_winner, table.state.active_players()),
        vec![WINNER_REQUIRED.to_string()]
    );
}

/// Test that adding or removing players after the start changes nothing.
#[test]
fn test_roster_frozen_after_start() {
    let mut table = Table::new(&["P1", "P2"], GameMode::Standard);
    let before = table.state.clone();

    table.apply(Action::AddPlayer("P3".to_string()));
    assert_eq!(table.state, before);

    let p1 = table.id("P1");
    table.apply(Action::RemovePlayer(p1));
    assert_eq!(table.state, before);
}

/// Test that the first drop costs 25 and every later drop costs 40.
#[test]
fn test_repeat_drops_cost_more() {
    let mut table = Table::new(&["Ann", "Ben"], GameMode::Standard);

    for expected in [25, 65, 105] {
        let ben = table.id("Ben");
        let mut sheet = RoundSheet::for_state(&table.state);
        sheet.set_drop(&ben).unwrap();
        let scores = sheet.finalize().unwrap();
        table.apply(Action::SubmitRound(scores));

        assert_eq!(table.total("Ben"), expected);
    }

    let ben = table.id("Ben");
    assert_eq!(table.state.player(&ben).unwrap().drop_count, 3);
    assert_eq!(running_totals(&table.state, &ben), vec![25, 65, 105]);
    assert_eq!(table.total("Ann"), 0);
}

/// Test Secret Seven doubling on rounds 1 and 7 and the seven-round cap.
#[test]
fn test_secret_seven_doubles_first_and_last_round() {
    let mut table = Table::new(&["Ann", "Ben"], GameMode::SecretSeven);

    for _ in 0..7 {
        table.submit(&[("Ann", ScoreEntry::points(0)), ("Ben", ScoreEntry::points(10))]);
    }

    // Rounds 1 and 7 count double: 20 + 5 * 10 + 20
    assert_eq!(table.total("Ben"), 90);
    let multipliers: Vec<u32> = table.state.rounds.iter().map(|r| r.multiplier).collect();
    assert_eq!(multipliers, vec![2, 1, 1, 1, 1, 1, 2]);

    assert!(is_game_over(&table.state));
    assert_eq!(winner(&table.state).map(|p| p.name.as_str()), Some("Ann"));

    let before = table.state.clone();
    table.submit(&[("Ann", ScoreEntry::points(0)), ("Ben", ScoreEntry::points(10))]);
    assert_eq!(table.state, before);
}

/// Test that drop penalties are never doubled.
#[test]
fn test_secret_seven_drops_are_not_doubled() {
    let mut table = Table::new(&["Ann", "Ben"], GameMode::SecretSeven);
    table.submit(&[("Ann", ScoreEntry::points(0)), ("Ben", ScoreEntry::drop(DropLevel::First))]);

    assert_eq!(table.total("Ben"), 25);
}

/// Test that undoing rounds restores totals and drop counts exactly.
#[test]
fn test_undo_then_resubmit() {
    let mut table = Table::new(&["Ann", "Ben", "Cal"], GameMode::Standard);
    table.submit(&[
        ("Ann", ScoreEntry::points(0)),
        ("Ben", ScoreEntry::points(30)),
        ("Cal", ScoreEntry::drop(DropLevel::First)),
    ]);
    let after_first = table.state.clone();

    table.submit(&[
        ("Ann", ScoreEntry::points(12)),
        ("Ben", ScoreEntry::points(0)),
        ("Cal", ScoreEntry::drop(DropLevel::Repeat)),
    ]);
    table.apply(Action::UndoRound);
    assert_eq!(table.state, after_first);

    table.apply(Action::UndoRound);
    assert_eq!(table.total("Cal"), 0);
    assert_eq!(table.state.player(&table.id("Cal")).unwrap().drop_count, 0);
    assert_eq!(table.state.current_round(), 1);
}

/// Test that the last active player wins once the others are eliminated.
#[test]
fn test_elimination_ends_game_with_last_player() {
    let mut table = Table::new(&["Ann", "Ben", "Cal"], GameMode::Standard);

    for _ in 0..4 {
        table.submit(&[
            ("Ann", ScoreEntry::points(0)),
            ("Ben", ScoreEntry::points(70)),
            ("Cal", ScoreEntry::points(65)),
        ]);
    }

    // Ben 280, Cal 260
    assert!(table.total("Ben") >= ELIMINATION_THRESHOLD);
    assert!(table.total("Cal") >= ELIMINATION_THRESHOLD);
    assert_eq!(table.state.active_count(), 1);
    assert!(is_game_over(&table.state));
    assert_eq!(winner(&table.state).map(|p| p.name.as_str()), Some("Ann"));

    let board = leaderboard(&table.state);
    assert_eq!(board[0].rank, Some(1));
    assert_eq!(board[1].rank, None);
    assert_eq!(board[1].player.name, "Cal");
    assert_eq!(board[2].player.name, "Ben");

    // Further rounds are refused
    let before = table.state.clone();
    table.submit(&[("Ann", ScoreEntry::points(0))]);
    assert_eq!(table.state, before);
}
