//! Match and tournament progression.
//!
//! Owns the full tournament state: the teams, the bracket, the match in
//! progress, and the random source used for tie-breaking. The engine
//! advances strictly in response to discrete events — a turn outcome
//! arriving from the word-guessing mini-game, or the caller moving on to
//! the next match. One match runs at a time; every mutation happens
//! sequentially on this single owned struct.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::bracket::{build_bracket, Match};
use crate::roster::{Roster, Team};
use crate::sequencer::{PlayerRef, TurnPolicy, TurnSequencer};

/// Errors raised by tournament operations. A rejected operation leaves
/// the tournament state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("a tournament needs at least 2 teams, got {0}")]
    NotEnoughTeams(usize),

    #[error("match {0} is not ready: a feeder match has no winner yet")]
    MatchNotReady(usize),

    #[error("a match is already in progress")]
    MatchInProgress,

    #[error("no match is in progress")]
    NoActiveMatch,

    #[error("the current match is already decided")]
    MatchAlreadyDecided,

    #[error("the current match has not been decided yet")]
    MatchNotDecided,

    #[error("the tournament is complete")]
    TournamentOver,
}

/// Where the tournament currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current match has not been started yet.
    AwaitingMatch,
    /// A match is running and waiting for turn outcomes.
    InMatch,
    /// The current match has a winner; waiting for `advance_match`.
    MatchDecided,
    /// The final has been decided; a champion exists.
    Complete,
}

/// What the mini-game reports for one completed turn. A turn abandoned
/// mid-round ("force end") is submitted the same way, with the score and
/// word lists as they stood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    pub score: u32,
    pub correct_words: Vec<String>,
    pub skipped_words: Vec<String>,
}

/// One recorded turn: who played and what they scored. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub team_slot: usize,
    pub player_index: usize,
    pub player_name: String,
    pub score: u32,
    pub correct_words: Vec<String>,
    pub skipped_words: Vec<String>,
}

/// What recording a turn led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// The match continues; this player is up next.
    NextTurn(PlayerRef),
    /// Scores were level after the normal sequence; a two-turn overtime
    /// begins with this player.
    OvertimeStarted(PlayerRef),
    /// The match is over; `winner` is a roster index.
    Decided { winner: usize },
}

/// Result of advancing past a decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    NextMatch(usize),
    Champion(usize),
}

/// Transient per-match state, recreated by `start_match`.
#[derive(Debug, Clone)]
struct MatchRun {
    /// Resolved roster indices for the two sides.
    pair: [usize; 2],
    scores: [u32; 2],
    turns: Vec<TurnRecord>,
    seq: TurnSequencer,
    overtime: bool,
}

/// A running tournament: bracket, scores, and turn sequencing for the
/// match in progress.
pub struct Tournament {
    teams: Vec<Team>,
    matches: Vec<Match>,
    current: usize,
    policy: TurnPolicy,
    phase: Phase,
    run: Option<MatchRun>,
    rng: SmallRng,
}

impl Tournament {
    /// Creates a tournament from a finalized roster, entropy-seeded.
    pub fn new(roster: Roster, policy: TurnPolicy) -> Result<Self, TournamentError> {
        Self::with_rng(roster, policy, SmallRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible simulations.
    pub fn seeded(roster: Roster, policy: TurnPolicy, seed: u64) -> Result<Self, TournamentError> {
        Self::with_rng(roster, policy, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(roster: Roster, policy: TurnPolicy, rng: SmallRng) -> Result<Self, TournamentError> {
        let teams = roster.into_teams();
        if teams.len() < 2 {
            return Err(TournamentError::NotEnoughTeams(teams.len()));
        }
        let matches = build_bracket(teams.len());
        Ok(Tournament {
            teams,
            matches,
            current: 0,
            policy,
            phase: Phase::AwaitingMatch,
            run: None,
            rng,
        })
    }

    /// Starts the current match and returns the first designated player.
    ///
    /// Both sides must resolve to concrete teams; with matches played in
    /// list order that always holds, so `MatchNotReady` signals a caller
    /// error rather than an expected state.
    pub fn start_match(&mut self) -> Result<PlayerRef, TournamentError> {
        match self.phase {
            Phase::AwaitingMatch => {}
            Phase::InMatch => return Err(TournamentError::MatchInProgress),
            Phase::MatchDecided => return Err(TournamentError::MatchAlreadyDecided),
            Phase::Complete => return Err(TournamentError::TournamentOver),
        }
        let pair = match self.matches[self.current].pairing(&self.matches) {
            [Some(a), Some(b)] => [a, b],
            _ => return Err(TournamentError::MatchNotReady(self.current)),
        };
        let sizes = [
            self.teams[pair[0]].players.len(),
            self.teams[pair[1]].players.len(),
        ];
        self.run = Some(MatchRun {
            pair,
            scores: [0, 0],
            turns: Vec::new(),
            seq: TurnSequencer::new(self.policy, sizes),
            overtime: false,
        });
        self.phase = Phase::InMatch;
        self.current_turn()
    }

    /// Records one turn's outcome for the designated player, then either
    /// hands back the next designee, opens overtime on a tie, or decides
    /// the match.
    pub fn record_turn(&mut self, outcome: TurnOutcome) -> Result<TurnEvent, TournamentError> {
        if self.phase != Phase::InMatch {
            return Err(TournamentError::NoActiveMatch);
        }
        let designee = self.current_turn()?;

        let run = self.run.as_mut().ok_or(TournamentError::NoActiveMatch)?;
        run.scores[designee.team_slot] += outcome.score;
        run.turns.push(TurnRecord {
            team_slot: designee.team_slot,
            player_index: designee.player_index,
            player_name: designee.player_name,
            score: outcome.score,
            correct_words: outcome.correct_words,
            skipped_words: outcome.skipped_words,
        });
        run.seq.advance();

        if !run.seq.is_exhausted() {
            return self.current_turn().map(TurnEvent::NextTurn);
        }
        self.conclude_match()
    }

    /// Settles an exhausted turn sequence: decide on a score gap, open
    /// overtime on a first tie, coin-flip on a tied overtime.
    fn conclude_match(&mut self) -> Result<TurnEvent, TournamentError> {
        let (pair, scores, overtime) = {
            let run = self.run.as_ref().ok_or(TournamentError::NoActiveMatch)?;
            (run.pair, run.scores, run.overtime)
        };

        if scores[0] != scores[1] {
            let winner = if scores[0] > scores[1] { pair[0] } else { pair[1] };
            return Ok(self.decide(winner));
        }

        if !overtime {
            // Sudden death: one uniformly random player per side, team A
            // first. Overtime replaces the match run's scores and turn
            // history outright.
            let picks = [
                self.rng.gen_range(0..self.teams[pair[0]].players.len()),
                self.rng.gen_range(0..self.teams[pair[1]].players.len()),
            ];
            let run = self.run.as_mut().ok_or(TournamentError::NoActiveMatch)?;
            run.scores = [0, 0];
            run.turns.clear();
            run.overtime = true;
            run.seq.begin_overtime(picks);
            return self.current_turn().map(TurnEvent::OvertimeStarted);
        }

        // A tied overtime ends on an unweighted coin flip; ties must
        // terminate, and overtime never nests.
        let winner = if self.rng.gen_bool(0.5) { pair[0] } else { pair[1] };
        Ok(self.decide(winner))
    }

    /// The single terminal write of a match's winner.
    fn decide(&mut self, winner: usize) -> TurnEvent {
        self.matches[self.current].winner = Some(winner);
        self.phase = Phase::MatchDecided;
        TurnEvent::Decided { winner }
    }

    /// Moves past a decided match, either to the next match awaiting a
    /// start or to tournament completion after the final.
    pub fn advance_match(&mut self) -> Result<Progress, TournamentError> {
        match self.phase {
            Phase::MatchDecided => {}
            Phase::Complete => return Err(TournamentError::TournamentOver),
            _ => return Err(TournamentError::MatchNotDecided),
        }
        self.run = None;
        self.current += 1;
        if self.current >= self.matches.len() {
            self.phase = Phase::Complete;
            // The last match is the final; its winner is the champion.
            let champion = self
                .matches
                .last()
                .and_then(|m| m.winner)
                .ok_or(TournamentError::MatchNotDecided)?;
            Ok(Progress::Champion(champion))
        } else {
            self.phase = Phase::AwaitingMatch;
            Ok(Progress::NextMatch(self.current))
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn policy(&self) -> TurnPolicy {
        self.policy
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// The full bracket with every recorded winner.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current_match_index(&self) -> usize {
        self.current
    }

    /// Resolves the given match's sides; `None` entries are sides whose
    /// feeder match is still undecided.
    pub fn pairing(&self, index: usize) -> Option<[Option<usize>; 2]> {
        self.matches.get(index).map(|m| m.pairing(&self.matches))
    }

    /// The player designated for the current turn.
    pub fn current_turn(&self) -> Result<PlayerRef, TournamentError> {
        let run = self.run.as_ref().ok_or(TournamentError::NoActiveMatch)?;
        let (team_slot, player_index) = run
            .seq
            .current()
            .ok_or(TournamentError::NoActiveMatch)?;
        let team = &self.teams[run.pair[team_slot]];
        Ok(PlayerRef {
            team_slot,
            player_index,
            player_name: team.players[player_index].clone(),
        })
    }

    /// Resolved roster indices of the running (or just decided) match.
    pub fn current_pair(&self) -> Option<[usize; 2]> {
        self.run.as_ref().map(|run| run.pair)
    }

    /// Live score pair of the running (or just decided) match.
    pub fn match_score(&self) -> Option<[u32; 2]> {
        self.run.as_ref().map(|run| run.scores)
    }

    /// Per-turn results of the current match. After a tie this holds the
    /// overtime turns only, matching the score reset.
    pub fn turn_history(&self) -> &[TurnRecord] {
        self.run.as_ref().map_or(&[], |run| &run.turns)
    }

    pub fn is_overtime(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.overtime)
    }

    /// The tournament winner, once the final has been played.
    pub fn champion(&self) -> Option<usize> {
        if self.phase != Phase::Complete {
            return None;
        }
        self.matches.last().and_then(|m| m.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(sizes: &[usize]) -> Roster {
        let mut roster = Roster::new();
        for (i, &size) in sizes.iter().enumerate() {
            let players: Vec<String> = (0..size).map(|p| format!("T{}P{}", i, p)).collect();
            roster
                .add_team(&format!("Team {}", i), &players)
                .expect("valid test roster");
        }
        roster
    }

    fn outcome(score: u32) -> TurnOutcome {
        TurnOutcome {
            score,
            ..TurnOutcome::default()
        }
    }

    #[test]
    fn rejects_fewer_than_two_teams() {
        let result = Tournament::seeded(roster(&[2]), TurnPolicy::Sequential, 1);
        assert!(matches!(result, Err(TournamentError::NotEnoughTeams(1))));
    }

    #[test]
    fn start_match_returns_team_a_first_player() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Sequential, 1).unwrap();
        let first = t.start_match().unwrap();
        assert_eq!(first.team_slot, 0);
        assert_eq!(first.player_index, 0);
        assert_eq!(first.player_name, "T0P0");
        assert_eq!(t.phase(), Phase::InMatch);
        assert_eq!(t.match_score(), Some([0, 0]));
    }

    #[test]
    fn start_match_twice_is_rejected_without_mutation() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Sequential, 1).unwrap();
        t.start_match().unwrap();
        t.record_turn(outcome(3)).unwrap();

        assert_eq!(t.start_match(), Err(TournamentError::MatchInProgress));
        assert_eq!(t.match_score(), Some([3, 0]));
        assert_eq!(t.turn_history().len(), 1);
    }

    #[test]
    fn record_turn_without_match_is_rejected() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Sequential, 1).unwrap();
        assert_eq!(
            t.record_turn(outcome(1)),
            Err(TournamentError::NoActiveMatch)
        );
    }

    #[test]
    fn starting_a_match_with_undecided_feeders_is_rejected() {
        // Not reachable through normal sequencing (matches run in list
        // order), so force the cursor onto the final directly.
        let mut t = Tournament::seeded(roster(&[1, 1, 1, 1]), TurnPolicy::Sequential, 1).unwrap();
        t.current = 2;
        assert_eq!(t.start_match(), Err(TournamentError::MatchNotReady(2)));
        assert_eq!(t.phase(), Phase::AwaitingMatch);
    }

    #[test]
    fn advance_before_decision_is_rejected() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Sequential, 1).unwrap();
        assert_eq!(t.advance_match(), Err(TournamentError::MatchNotDecided));
        t.start_match().unwrap();
        assert_eq!(t.advance_match(), Err(TournamentError::MatchNotDecided));
    }

    #[test]
    fn scores_accumulate_per_side() {
        let mut t = Tournament::seeded(roster(&[2, 1]), TurnPolicy::Sequential, 1).unwrap();
        t.start_match().unwrap();
        t.record_turn(outcome(4)).unwrap();
        t.record_turn(outcome(2)).unwrap();
        assert_eq!(t.match_score(), Some([6, 0]));

        let event = t.record_turn(outcome(5)).unwrap();
        assert_eq!(t.match_score(), Some([6, 5]));
        assert_eq!(event, TurnEvent::Decided { winner: 0 });
    }

    #[test]
    fn winner_is_written_into_the_bracket_once() {
        let mut t = Tournament::seeded(roster(&[1, 1]), TurnPolicy::Sequential, 1).unwrap();
        t.start_match().unwrap();
        t.record_turn(outcome(2)).unwrap();
        let event = t.record_turn(outcome(7)).unwrap();

        assert_eq!(event, TurnEvent::Decided { winner: 1 });
        assert_eq!(t.matches()[0].winner, Some(1));
        assert_eq!(t.phase(), Phase::MatchDecided);
        // Further turn submissions are rejected, leaving the result alone.
        assert_eq!(
            t.record_turn(outcome(9)),
            Err(TournamentError::NoActiveMatch)
        );
        assert_eq!(t.matches()[0].winner, Some(1));
    }

    #[test]
    fn tie_opens_overtime_with_one_pick_per_side() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Sequential, 7).unwrap();
        t.start_match().unwrap();
        t.record_turn(outcome(3)).unwrap();
        t.record_turn(outcome(2)).unwrap();
        t.record_turn(outcome(1)).unwrap();
        let event = t.record_turn(outcome(4)).unwrap();

        let first = match event {
            TurnEvent::OvertimeStarted(player) => player,
            other => panic!("expected overtime, got {:?}", other),
        };
        assert_eq!(first.team_slot, 0);
        assert!(t.is_overtime());
        assert_eq!(t.match_score(), Some([0, 0]));
        assert!(t.turn_history().is_empty());
    }

    #[test]
    fn overtime_decides_on_a_score_gap() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Alternating, 7).unwrap();
        t.start_match().unwrap();
        for _ in 0..3 {
            t.record_turn(outcome(2)).unwrap();
        }
        let event = t.record_turn(outcome(2)).unwrap();
        assert!(matches!(event, TurnEvent::OvertimeStarted(_)));

        t.record_turn(outcome(5)).unwrap();
        let event = t.record_turn(outcome(1)).unwrap();
        assert_eq!(event, TurnEvent::Decided { winner: 0 });
    }

    #[test]
    fn tied_overtime_coin_flips_between_the_two_sides() {
        let mut t = Tournament::seeded(roster(&[2, 2]), TurnPolicy::Alternating, 11).unwrap();
        t.start_match().unwrap();
        for _ in 0..4 {
            t.record_turn(outcome(1)).unwrap();
        }
        t.record_turn(outcome(3)).unwrap();
        let event = t.record_turn(outcome(3)).unwrap();

        let winner = match event {
            TurnEvent::Decided { winner } => winner,
            other => panic!("expected a decision, got {:?}", other),
        };
        assert!(winner == 0 || winner == 1);
        assert_eq!(t.matches()[0].winner, Some(winner));
    }

    #[test]
    fn seeded_tournaments_replay_identically() {
        for seed in [3, 99] {
            let run = |seed| {
                let mut t =
                    Tournament::seeded(roster(&[2, 2]), TurnPolicy::Sequential, seed).unwrap();
                t.start_match().unwrap();
                for _ in 0..3 {
                    t.record_turn(outcome(1)).unwrap();
                }
                // Tie; overtime picks come from the seeded RNG.
                match t.record_turn(outcome(1)).unwrap() {
                    TurnEvent::OvertimeStarted(player) => player,
                    other => panic!("expected overtime, got {:?}", other),
                }
            };
            assert_eq!(run(seed), run(seed));
        }
    }

    #[test]
    fn advance_past_final_yields_champion() {
        let mut t = Tournament::seeded(roster(&[1, 1]), TurnPolicy::Sequential, 1).unwrap();
        t.start_match().unwrap();
        t.record_turn(outcome(3)).unwrap();
        t.record_turn(outcome(1)).unwrap();

        assert_eq!(t.advance_match(), Ok(Progress::Champion(0)));
        assert_eq!(t.phase(), Phase::Complete);
        assert_eq!(t.champion(), Some(0));
        assert_eq!(t.start_match(), Err(TournamentError::TournamentOver));
        assert_eq!(t.advance_match(), Err(TournamentError::TournamentOver));
    }

    #[test]
    fn champion_is_none_before_completion() {
        let mut t = Tournament::seeded(roster(&[1, 1]), TurnPolicy::Sequential, 1).unwrap();
        assert_eq!(t.champion(), None);
        t.start_match().unwrap();
        t.record_turn(outcome(3)).unwrap();
        t.record_turn(outcome(1)).unwrap();
        assert_eq!(t.champion(), None);
    }
}
