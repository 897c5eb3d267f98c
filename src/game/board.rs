use super::topology::{self, Position, POSITION_COUNT};
use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Blue,
}

/// Owner per intersection. Mutated only through `GameState` transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; POSITION_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; POSITION_COUNT],
        }
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Number of pieces a player currently has on the board
    pub fn count(&self, player: Player) -> usize {
        let cell = player.to_cell();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// All positions currently owned by a player
    pub fn positions_of(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        let cell = player.to_cell();
        Position::all().filter(move |&p| self.get(p) == cell)
    }

    /// All currently empty positions
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&p| self.is_empty_at(p))
    }

    /// Whether `pos` is part of a completed mill for `player`: some mill
    /// line through `pos` has all three members owned by `player`.
    pub fn is_mill_at(&self, pos: Position, player: Player) -> bool {
        let cell = player.to_cell();
        topology::mills_containing(pos).any(|mill| mill.iter().all(|&p| self.get(p) == cell))
    }

    /// Number of mill lines where `player` holds exactly two positions and
    /// the third is empty. Used for reward shaping.
    pub fn mill_threats(&self, player: Player) -> usize {
        let cell = player.to_cell();
        topology::mill_lines()
            .filter(|mill| {
                let own = mill.iter().filter(|&&p| self.get(p) == cell).count();
                let empty = mill.iter().filter(|&&p| self.is_empty_at(p)).count();
                own == 2 && empty == 1
            })
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(name: &str) -> Position {
        Position::from_name(name).unwrap()
    }

    #[test]
    fn test_new_board_empty() {
        let board = Board::new();
        for p in Position::all() {
            assert_eq!(board.get(p), Cell::Empty);
        }
        assert_eq!(board.count(Player::Red), 0);
        assert_eq!(board.count(Player::Blue), 0);
    }

    #[test]
    fn test_mill_detection() {
        let mut board = Board::new();
        board.set(pos("a1"), Cell::Red);
        board.set(pos("a4"), Cell::Red);
        assert!(!board.is_mill_at(pos("a4"), Player::Red));

        board.set(pos("a7"), Cell::Red);
        for name in ["a1", "a4", "a7"] {
            assert!(board.is_mill_at(pos(name), Player::Red));
            assert!(!board.is_mill_at(pos(name), Player::Blue));
        }
        // d5 is not in the a-file mill
        assert!(!board.is_mill_at(pos("d5"), Player::Red));
    }

    #[test]
    fn test_mill_detection_symmetric_under_relabeling() {
        let mut red_board = Board::new();
        let mut blue_board = Board::new();
        for name in ["b2", "b4", "b6"] {
            red_board.set(pos(name), Cell::Red);
            blue_board.set(pos(name), Cell::Blue);
        }
        assert!(red_board.is_mill_at(pos("b4"), Player::Red));
        assert!(blue_board.is_mill_at(pos("b4"), Player::Blue));
    }

    #[test]
    fn test_mixed_line_is_not_a_mill() {
        let mut board = Board::new();
        board.set(pos("a1"), Cell::Red);
        board.set(pos("a4"), Cell::Blue);
        board.set(pos("a7"), Cell::Red);
        assert!(!board.is_mill_at(pos("a1"), Player::Red));
        assert!(!board.is_mill_at(pos("a4"), Player::Blue));
    }

    #[test]
    fn test_mill_threats() {
        let mut board = Board::new();
        assert_eq!(board.mill_threats(Player::Red), 0);

        // Two on the a-file with a7 open: one threat
        board.set(pos("a1"), Cell::Red);
        board.set(pos("a4"), Cell::Red);
        assert_eq!(board.mill_threats(Player::Red), 1);

        // b4 adds a second threat on a4-b4-c4
        board.set(pos("b4"), Cell::Red);
        assert_eq!(board.mill_threats(Player::Red), 2);

        // Opponent blocking a7 kills the a-file threat
        board.set(pos("a7"), Cell::Blue);
        assert_eq!(board.mill_threats(Player::Red), 1);

        // A completed mill does not count as a threat
        board.set(pos("c4"), Cell::Red);
        assert_eq!(board.mill_threats(Player::Red), 0);
    }

    #[test]
    fn test_positions_of() {
        let mut board = Board::new();
        board.set(pos("d1"), Cell::Blue);
        board.set(pos("g7"), Cell::Blue);
        let owned: Vec<Position> = board.positions_of(Player::Blue).collect();
        assert_eq!(owned, vec![pos("d1"), pos("g7")]);
        assert_eq!(board.positions_of(Player::Red).count(), 0);
    }
}
