//! Team roster management.
//!
//! Holds the ordered list of teams entered during tournament setup.
//! Insertion order is significant: it determines the initial bracket
//! pairing, and a team's position in the roster is its identity for the
//! rest of the tournament. Once a tournament starts the roster is handed
//! over wholesale and never mutated again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of teams a roster accepts.
pub const MAX_TEAMS: usize = 8;

/// Errors raised while assembling a roster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster is full: at most {MAX_TEAMS} teams")]
    TooManyTeams,

    #[error("team name is empty")]
    EmptyTeamName,

    #[error("team '{0}' has no players")]
    NoPlayers(String),

    #[error("team '{0}' has an empty player name")]
    EmptyPlayerName(String),
}

/// A team: a display name and its players in turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<String>,
}

/// Ordered list of teams, validated on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Roster { teams: Vec::new() }
    }

    /// Builds a roster from pre-assembled teams, applying the same
    /// validation as [`Roster::add_team`]. Used when teams arrive from a
    /// file rather than interactive setup.
    pub fn from_teams(teams: Vec<Team>) -> Result<Self, RosterError> {
        let mut roster = Roster::new();
        for team in teams {
            roster.add_team(&team.name, &team.players)?;
        }
        Ok(roster)
    }

    /// Appends a team. Name and player names are stored trimmed.
    ///
    /// Rejects a full roster, a name that trims to empty, an empty
    /// player list, or a player name that trims to empty. On failure the
    /// roster is unchanged.
    pub fn add_team(&mut self, name: &str, players: &[String]) -> Result<(), RosterError> {
        if self.teams.len() >= MAX_TEAMS {
            return Err(RosterError::TooManyTeams);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyTeamName);
        }
        if players.is_empty() {
            return Err(RosterError::NoPlayers(name.to_string()));
        }
        let mut trimmed = Vec::with_capacity(players.len());
        for player in players {
            let player = player.trim();
            if player.is_empty() {
                return Err(RosterError::EmptyPlayerName(name.to_string()));
            }
            trimmed.push(player.to_string());
        }
        self.teams.push(Team {
            name: name.to_string(),
            players: trimmed,
        });
        Ok(())
    }

    /// Removes the team at `index`. Out-of-range indices are ignored;
    /// passing a valid index is the caller's responsibility.
    pub fn remove_team(&mut self, index: usize) {
        if index < self.teams.len() {
            self.teams.remove(index);
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Consumes the roster, yielding the team list in insertion order.
    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }
}
