//! Bracket construction.
//!
//! Builds a single-elimination bracket as one flat list of matches in
//! round order: every round-1 match first, then round 2, and so on.
//! Later rounds reference earlier matches by index, never the other way
//! around.

use super::slot::{Match, Slot};

/// Builds the match list for `team_count` teams paired in roster order.
///
/// Teams are paired consecutively: (0,1), (2,3), and so on. An unpaired
/// trailing entry gets a bye and carries into the next round, so every
/// team except the champion loses exactly once and the list holds
/// `team_count - 1` matches. Fewer than two teams yields an empty
/// bracket; the caller rejects starting a tournament in that case.
pub fn build_bracket(team_count: usize) -> Vec<Match> {
    let mut matches = Vec::new();
    if team_count < 2 {
        return matches;
    }

    let mut entries: Vec<Slot> = (0..team_count).map(Slot::Team).collect();
    let mut round = 1;
    while entries.len() > 1 {
        let mut next = Vec::with_capacity(entries.len().div_ceil(2));
        for pair in entries.chunks(2) {
            if let [a, b] = *pair {
                matches.push(Match::new(round, a, b));
                next.push(Slot::WinnerOf(matches.len() - 1));
            } else {
                // Odd entry out: bye into the next round.
                next.push(pair[0]);
            }
        }
        entries = next;
        round += 1;
    }
    matches
}

/// Number of rounds in a built bracket.
pub fn round_count(matches: &[Match]) -> u32 {
    matches.last().map_or(0, |m| m.round)
}
