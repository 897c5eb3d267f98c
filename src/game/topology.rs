//! Static board graph: 24 named intersections, 16 mill lines, and the
//! undirected adjacency relation used for movement. Built once, never
//! mutated.

/// Number of intersections on the board.
pub const POSITION_COUNT: usize = 24;

/// Number of three-in-a-row mill lines.
pub const MILL_COUNT: usize = 16;

/// Position names in canonical (sorted) order. All position indices,
/// state encodings, and action indices use this ordering.
const NAMES: [&str; POSITION_COUNT] = [
    "a1", "a4", "a7", "b2", "b4", "b6", "c3", "c4", "c5", "d1", "d2", "d3",
    "d5", "d6", "d7", "e3", "e4", "e5", "f2", "f4", "f6", "g1", "g4", "g7",
];

/// The 16 mill lines, as index triples into the canonical ordering.
const MILLS: [[u8; 3]; MILL_COUNT] = [
    // Rings and arms along the files
    [0, 1, 2],   // a1 a4 a7
    [3, 4, 5],   // b2 b4 b6
    [6, 7, 8],   // c3 c4 c5
    [9, 10, 11], // d1 d2 d3
    [12, 13, 14], // d5 d6 d7
    [15, 16, 17], // e3 e4 e5
    [18, 19, 20], // f2 f4 f6
    [21, 22, 23], // g1 g4 g7
    // Cross lines
    [0, 9, 21],  // a1 d1 g1
    [1, 4, 7],   // a4 b4 c4
    [2, 14, 23], // a7 d7 g7
    [3, 10, 18], // b2 d2 f2
    [5, 13, 20], // b6 d6 f6
    [6, 11, 15], // c3 d3 e3
    [8, 12, 17], // c5 d5 e5
    [16, 19, 22], // e4 f4 g4
];

/// Adjacency lists (movement graph), indexed by position.
const ADJACENT: [&[u8]; POSITION_COUNT] = [
    &[1, 9, 3],        // a1: a4 d1 b2
    &[0, 2, 4],        // a4: a1 a7 b4
    &[1, 14, 5],       // a7: a4 d7 b6
    &[4, 10, 6, 0],    // b2: b4 d2 c3 a1
    &[3, 5, 1, 7],     // b4: b2 b6 a4 c4
    &[4, 13, 8, 2],    // b6: b4 d6 c5 a7
    &[7, 3, 11],       // c3: c4 b2 d3
    &[6, 8, 4],        // c4: c3 c5 b4
    &[7, 5, 12],       // c5: c4 b6 d5
    &[0, 10, 21],      // d1: a1 d2 g1
    &[9, 11, 3, 18],   // d2: d1 d3 b2 f2
    &[10, 6, 15],      // d3: d2 c3 e3
    &[13, 8, 17],      // d5: d6 c5 e5
    &[12, 14, 5, 20],  // d6: d5 d7 b6 f6
    &[13, 2, 23],      // d7: d6 a7 g7
    &[16, 11, 18],     // e3: e4 d3 f2
    &[15, 17, 19],     // e4: e3 e5 f4
    &[16, 12, 20],     // e5: e4 d5 f6
    &[19, 10, 15, 21], // f2: f4 d2 e3 g1
    &[18, 20, 16, 22], // f4: f2 f6 e4 g4
    &[19, 13, 17, 23], // f6: f4 d6 e5 g7
    &[22, 9, 18],      // g1: g4 d1 f2
    &[21, 23, 19],     // g4: g1 g7 f4
    &[22, 14, 20],     // g7: g4 d7 f6
];

/// An intersection on the board, identified by its index in the canonical
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(u8);

impl Position {
    /// Create a position from a canonical index.
    pub fn new(index: usize) -> Option<Position> {
        if index < POSITION_COUNT {
            Some(Position(index as u8))
        } else {
            None
        }
    }

    /// Canonical index (0..24).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Board name, e.g. "d5".
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Look up a position by board name.
    pub fn from_name(name: &str) -> Option<Position> {
        NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Position(i as u8))
    }

    /// All positions in canonical order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..POSITION_COUNT as u8).map(Position)
    }

    /// Positions reachable in one move.
    pub fn adjacent(self) -> impl Iterator<Item = Position> {
        ADJACENT[self.index()].iter().map(|&i| Position(i))
    }

    pub fn is_adjacent_to(self, other: Position) -> bool {
        ADJACENT[self.index()].contains(&other.0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// All mill lines.
pub fn mill_lines() -> impl Iterator<Item = [Position; 3]> {
    MILLS.iter().map(|m| m.map(Position))
}

/// The mill lines containing a given position (1 or 2 per position on
/// this board).
pub fn mills_containing(pos: Position) -> impl Iterator<Item = [Position; 3]> {
    mill_lines().filter(move |m| m.contains(&pos))
}
