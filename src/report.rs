//! Read-only report structures for UI and export collaborators.
//!
//! The engine exposes its results as plain serializable values: a
//! per-match summary with player breakdowns, and a whole-bracket view
//! with every recorded winner. Anything beyond these structures and the
//! plain-text match summary (file handling, markup) belongs to the
//! caller.

use serde::Serialize;

use crate::progression::{Phase, Tournament};

/// One player's line in a match breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerLine {
    pub player_name: String,
    pub score: u32,
    pub correct_words: Vec<String>,
    pub skipped_words: Vec<String>,
}

/// Summary of a decided match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub match_index: usize,
    pub round: u32,
    pub team_names: [String; 2],
    pub scores: [u32; 2],
    pub winner_name: String,
    pub overtime: bool,
    /// Per-team player breakdowns, side A first. After an overtime this
    /// covers the overtime turns only, matching the score reset.
    pub breakdown: [Vec<PlayerLine>; 2],
}

impl MatchReport {
    /// Builds the report for the tournament's current match.
    ///
    /// Returns `None` unless that match has been decided and not yet
    /// advanced past.
    pub fn for_current_match(t: &Tournament) -> Option<MatchReport> {
        if t.phase() != Phase::MatchDecided {
            return None;
        }
        let index = t.current_match_index();
        let m = &t.matches()[index];
        let pair = t.current_pair()?;
        let winner = m.winner?;

        let mut breakdown: [Vec<PlayerLine>; 2] = [Vec::new(), Vec::new()];
        for record in t.turn_history() {
            breakdown[record.team_slot].push(PlayerLine {
                player_name: record.player_name.clone(),
                score: record.score,
                correct_words: record.correct_words.clone(),
                skipped_words: record.skipped_words.clone(),
            });
        }

        Some(MatchReport {
            match_index: index,
            round: m.round,
            team_names: [
                t.teams()[pair[0]].name.clone(),
                t.teams()[pair[1]].name.clone(),
            ],
            scores: t.match_score()?,
            winner_name: t.teams()[winner].name.clone(),
            overtime: t.is_overtime(),
            breakdown,
        })
    }

    /// Renders the plain-text match summary: the score line followed by
    /// per-team player sections with their word lists.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        lines.push("Match results".to_string());
        lines.push(format!(
            "Teams: {} vs {}",
            self.team_names[0], self.team_names[1]
        ));
        lines.push(format!(
            "Score: {} {} - {} {}",
            self.team_names[0], self.scores[0], self.scores[1], self.team_names[1]
        ));
        if self.overtime {
            lines.push("Decided in overtime".to_string());
        }
        lines.push(format!("Winner: {}", self.winner_name));
        lines.push(String::new());

        for (side, name) in self.team_names.iter().enumerate() {
            lines.push(format!("Team: {}", name));
            let players = &self.breakdown[side];
            if players.is_empty() {
                lines.push("  No player results".to_string());
                lines.push(String::new());
                continue;
            }
            for (i, player) in players.iter().enumerate() {
                lines.push(format!("  Player {}: {}", i + 1, player.player_name));
                lines.push(format!(
                    "    Score: {} (correct: {}, skipped: {})",
                    player.score,
                    player.correct_words.len(),
                    player.skipped_words.len()
                ));
                if !player.correct_words.is_empty() {
                    lines.push("    Correct:".to_string());
                    lines.push(format!("      {}", player.correct_words.join(", ")));
                }
                if !player.skipped_words.is_empty() {
                    lines.push("    Skipped:".to_string());
                    lines.push(format!("      {}", player.skipped_words.join(", ")));
                }
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }
}

/// One match in a bracket overview. Sides still waiting on a feeder
/// match render as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketEntry {
    pub round: u32,
    pub sides: [Option<String>; 2],
    pub winner: Option<String>,
}

/// The whole bracket with every recorded winner, for champion display
/// and statistics export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketReport {
    pub entries: Vec<BracketEntry>,
    pub champion: Option<String>,
}

impl BracketReport {
    pub fn new(t: &Tournament) -> BracketReport {
        let name = |team: Option<usize>| team.map(|i| t.teams()[i].name.clone());
        let entries = t
            .matches()
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let pair = t.pairing(i).unwrap_or([None, None]);
                BracketEntry {
                    round: m.round,
                    sides: [name(pair[0]), name(pair[1])],
                    winner: name(m.winner),
                }
            })
            .collect();
        BracketReport {
            entries,
            champion: name(t.champion()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::TurnOutcome;
    use crate::roster::Roster;
    use crate::sequencer::TurnPolicy;

    fn small_tournament() -> Tournament {
        let mut roster = Roster::new();
        roster
            .add_team("Reds", &["Ann".to_string(), "Ben".to_string()])
            .unwrap();
        roster
            .add_team("Blues", &["Cora".to_string()])
            .unwrap();
        Tournament::seeded(roster, TurnPolicy::Sequential, 5).unwrap()
    }

    fn turn(score: u32, correct: &[&str], skipped: &[&str]) -> TurnOutcome {
        TurnOutcome {
            score,
            correct_words: correct.iter().map(|w| w.to_string()).collect(),
            skipped_words: skipped.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn no_report_before_decision() {
        let mut t = small_tournament();
        assert!(MatchReport::for_current_match(&t).is_none());
        t.start_match().unwrap();
        assert!(MatchReport::for_current_match(&t).is_none());
    }

    #[test]
    fn report_carries_names_scores_and_breakdown() {
        let mut t = small_tournament();
        t.start_match().unwrap();
        t.record_turn(turn(2, &["cat", "sun"], &["moon"])).unwrap();
        t.record_turn(turn(3, &["dog", "ice", "oak"], &[])).unwrap();
        t.record_turn(turn(4, &["map", "jar", "fog", "rye"], &[]))
            .unwrap();

        let report = MatchReport::for_current_match(&t).expect("match is decided");
        assert_eq!(report.team_names, ["Reds".to_string(), "Blues".to_string()]);
        assert_eq!(report.scores, [5, 4]);
        assert_eq!(report.winner_name, "Reds");
        assert!(!report.overtime);
        assert_eq!(report.breakdown[0].len(), 2);
        assert_eq!(report.breakdown[1].len(), 1);
        assert_eq!(report.breakdown[0][0].player_name, "Ann");
        assert_eq!(report.breakdown[0][0].correct_words, vec!["cat", "sun"]);
    }

    #[test]
    fn text_summary_lists_teams_and_words() {
        let mut t = small_tournament();
        t.start_match().unwrap();
        t.record_turn(turn(2, &["cat"], &["moon"])).unwrap();
        t.record_turn(turn(1, &["dog"], &[])).unwrap();
        t.record_turn(turn(1, &["map"], &["jar"])).unwrap();

        let text = MatchReport::for_current_match(&t).unwrap().to_text();
        assert!(text.contains("Teams: Reds vs Blues"));
        assert!(text.contains("Score: Reds 3 - 1 Blues"));
        assert!(text.contains("Winner: Reds"));
        assert!(text.contains("Player 1: Ann"));
        assert!(text.contains("      cat"));
        assert!(text.contains("    Skipped:"));
    }

    #[test]
    fn bracket_report_tracks_pending_and_decided_sides() {
        let mut t = small_tournament();
        let report = BracketReport::new(&t);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(
            report.entries[0].sides,
            [Some("Reds".to_string()), Some("Blues".to_string())]
        );
        assert_eq!(report.entries[0].winner, None);
        assert_eq!(report.champion, None);

        t.start_match().unwrap();
        t.record_turn(turn(2, &[], &[])).unwrap();
        t.record_turn(turn(1, &[], &[])).unwrap();
        t.record_turn(turn(0, &[], &[])).unwrap();
        t.advance_match().unwrap();

        let report = BracketReport::new(&t);
        assert_eq!(report.entries[0].winner, Some("Reds".to_string()));
        assert_eq!(report.champion, Some("Reds".to_string()));
    }

    #[test]
    fn reports_serialize_to_json() {
        let mut t = small_tournament();
        t.start_match().unwrap();
        t.record_turn(turn(2, &["cat"], &[])).unwrap();
        t.record_turn(turn(0, &[], &[])).unwrap();
        t.record_turn(turn(1, &[], &[])).unwrap();

        let report = MatchReport::for_current_match(&t).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"winner_name\":\"Reds\""));

        let json = serde_json::to_string(&BracketReport::new(&t)).unwrap();
        assert!(json.contains("\"round\":1"));
    }
}
