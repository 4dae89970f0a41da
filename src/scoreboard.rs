//! Match scoreboard and player labels
//!
//! Scores live for the whole process; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::sim::{PlayerId, RoundOutcome};

/// Cumulative round wins for both players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player1: u32,
    pub player2: u32,
    /// Rounds that ended without a winner
    pub draws: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins for one player
    pub fn score(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.player1,
            PlayerId::Two => self.player2,
        }
    }

    /// Credit a resolved round; a draw scores nobody
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome.winner() {
            Some(PlayerId::One) => self.player1 += 1,
            Some(PlayerId::Two) => self.player2 += 1,
            None => self.draws += 1,
        }
    }

    /// Rounds played so far
    pub fn rounds_played(&self) -> u32 {
        self.player1 + self.player2 + self.draws
    }

    /// The player ahead, `None` when level
    pub fn leader(&self) -> Option<PlayerId> {
        match self.player1.cmp(&self.player2) {
            std::cmp::Ordering::Greater => Some(PlayerId::One),
            std::cmp::Ordering::Less => Some(PlayerId::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Display names, for labels and banners only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    player1: String,
    player2: String,
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new("p1", "p2")
    }
}

impl PlayerNames {
    /// Names are trimmed and lowercased; blanks fall back to "p1"/"p2"
    pub fn new(player1: &str, player2: &str) -> Self {
        Self {
            player1: normalize(player1, "p1"),
            player2: normalize(player2, "p2"),
        }
    }

    pub fn name(&self, player: PlayerId) -> &str {
        match player {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    /// Short tag drawn on the actor (first two characters)
    pub fn label(&self, player: PlayerId) -> String {
        self.name(player).chars().take(2).collect()
    }
}

fn normalize(name: &str, fallback: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_lowercase()
    }
}

impl RoundOutcome {
    /// Banner text shown when the round ends
    pub fn banner(self, names: &PlayerNames) -> String {
        match self.winner() {
            Some(player) => format!("{} WINS!", names.name(player)),
            None => "TIME UP! DRAW!".to_string(),
        }
    }
}
