use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Blue => Cell::Blue,
        }
    }

    /// Index into per-player counter arrays (placed/removed)
    pub fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
        }
    }
}
