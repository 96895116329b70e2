//! Turn sequencing within a match.
//!
//! Decides whose turn it is, advances after each recorded turn, and
//! detects when a match's turn sequence is exhausted. Covers the two
//! turn-order policies plus the two-turn overtime sub-sequence used to
//! break a tied match.

/// How players are ordered within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPolicy {
    /// All of team A's players take a turn, then all of team B's.
    Sequential,
    /// Turns strictly alternate A, B, A, B. Bounded by the smaller
    /// team's size; the larger team's surplus players sit out.
    Alternating,
}

/// The player designated to take a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRef {
    /// Which side of the match: 0 for team A, 1 for team B.
    pub team_slot: usize,
    /// Index into the team's player list.
    pub player_index: usize,
    pub player_name: String,
}

/// Per-match turn state machine, recreated for every match.
#[derive(Debug, Clone)]
pub struct TurnSequencer {
    policy: TurnPolicy,
    sizes: [usize; 2],
    /// Sequential mode: which side is currently at bat.
    team_turn: usize,
    cursor: usize,
    /// Overtime player picks, one index per side, set once a tie forces
    /// overtime. Overtime never nests.
    overtime: Option<[usize; 2]>,
}

impl TurnSequencer {
    /// Creates a sequencer positioned at the first turn of the match.
    ///
    /// `sizes` holds the two teams' player counts; roster validation
    /// guarantees both are at least 1.
    pub fn new(policy: TurnPolicy, sizes: [usize; 2]) -> Self {
        TurnSequencer {
            policy,
            sizes,
            team_turn: 0,
            cursor: 0,
            overtime: None,
        }
    }

    /// The designated (team slot, player index) for the current turn, or
    /// `None` once the sequence is exhausted.
    pub fn current(&self) -> Option<(usize, usize)> {
        if self.is_exhausted() {
            return None;
        }
        if let Some(picks) = self.overtime {
            return Some((self.cursor, picks[self.cursor]));
        }
        match self.policy {
            TurnPolicy::Sequential => Some((self.team_turn, self.cursor)),
            TurnPolicy::Alternating => Some((self.cursor % 2, self.cursor / 2)),
        }
    }

    /// Moves past the current turn once its result has been recorded.
    pub fn advance(&mut self) {
        if self.overtime.is_some() {
            self.cursor += 1;
            return;
        }
        match self.policy {
            TurnPolicy::Sequential => {
                if self.team_turn == 0 && self.cursor + 1 >= self.sizes[0] {
                    // Team A is done; hand over to team B's first player.
                    self.team_turn = 1;
                    self.cursor = 0;
                } else {
                    self.cursor += 1;
                }
            }
            TurnPolicy::Alternating => self.cursor += 1,
        }
    }

    /// True once every scheduled turn has been taken.
    ///
    /// Sequential mode exhausts only when the cursor has moved *past*
    /// team B's last player, so a match yields exactly `p1 + p2` turns.
    pub fn is_exhausted(&self) -> bool {
        if self.overtime.is_some() {
            return self.cursor >= 2;
        }
        match self.policy {
            TurnPolicy::Sequential => self.team_turn == 1 && self.cursor >= self.sizes[1],
            TurnPolicy::Alternating => self.cursor >= 2 * self.sizes[0].min(self.sizes[1]),
        }
    }

    /// Restarts the sequence as a two-turn overtime with the given
    /// player picks, team A's pick first.
    pub fn begin_overtime(&mut self, picks: [usize; 2]) {
        self.overtime = Some(picks);
        self.team_turn = 0;
        self.cursor = 0;
    }

    pub fn is_overtime(&self) -> bool {
        self.overtime.is_some()
    }
}
