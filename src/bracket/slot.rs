//! Match records and deferred winner references.
//!
//! A match's two sides are slots: either a concrete roster index or a
//! reference to an earlier match whose winner fills the side once known.
//! Back-references always point strictly earlier in the flat match list,
//! so resolution is a single lookup and can never cycle.

/// One side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A team straight from the roster.
    Team(usize),
    /// The winner of the match at this index in the match list.
    WinnerOf(usize),
}

impl Slot {
    /// Resolves the slot to a roster index against the match list.
    ///
    /// `Team` resolves unconditionally; `WinnerOf` resolves only after
    /// the referenced match has recorded a winner. O(1), never recurses:
    /// a winner is itself a concrete roster index.
    pub fn resolve(self, matches: &[Match]) -> Option<usize> {
        match self {
            Slot::Team(team) => Some(team),
            Slot::WinnerOf(index) => matches.get(index).and_then(|m| m.winner),
        }
    }
}

/// A bracket match: a 1-based round number, two slots, and the winning
/// roster index once the match has been decided. The winner is written
/// exactly once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub round: u32,
    pub slots: [Slot; 2],
    pub winner: Option<usize>,
}

impl Match {
    /// Creates an undecided match.
    pub fn new(round: u32, a: Slot, b: Slot) -> Self {
        Match {
            round,
            slots: [a, b],
            winner: None,
        }
    }

    /// Resolves both sides. A `None` entry is a side still waiting on a
    /// feeder match.
    pub fn pairing(&self, matches: &[Match]) -> [Option<usize>; 2] {
        [self.slots[0].resolve(matches), self.slots[1].resolve(matches)]
    }
}
