//! Player identification for a two-player game.
//!
//! Players carry the ids 1 and 2, matching the dense-grid encoding the
//! engine is initialized from (0 = empty cell). The id doubles as the bit
//! offset inside a board plane word, so it is load-bearing, not cosmetic.

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Grid/plane id of this player (1 or 2).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Parse a dense-grid cell value. `0` (empty) and anything above 2
    /// return `None`.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// Terminal result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Tie,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Player::from_id(0), None);
        assert_eq!(Player::from_id(1), Some(Player::One));
        assert_eq!(Player::from_id(2), Some(Player::Two));
        assert_eq!(Player::from_id(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Player::Two), "Player 2");
    }
}
