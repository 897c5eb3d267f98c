use super::board::{Board, Cell};
use super::topology::Position;
use super::Player;

/// Pieces each side places over the course of a game.
pub const PIECES_PER_SIDE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Both sides alternately place their 12 pieces.
    Placing,
    /// All pieces placed; turns slide a piece to an adjacent empty spot.
    Moving,
    /// The side to move just formed a mill and must remove one opponent
    /// piece; entered transiently, exits after exactly one removal.
    Removal,
}

/// A single half-move, disambiguated by the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Place(Position),
    Move(Position, Position),
    Remove(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// Wrong phase, occupied destination, non-adjacent move, or a piece
    /// that is not the mover's.
    IllegalMove,
    /// Removal target is not opponent-owned, or is protected by a mill
    /// while the opponent still has pieces outside mills.
    IllegalRemoval,
    GameOver,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::IllegalMove => f.write_str("illegal move"),
            ActionError::IllegalRemoval => f.write_str("illegal removal"),
            ActionError::GameOver => f.write_str("game is already over"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Full game state: board, phase machine, turn, and per-side piece
/// accounting. Transitions are immutable: `apply` returns the successor
/// state and leaves `self` untouched on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    phase: Phase,
    placed: [u8; 2],
    removed: [u8; 2],
    winner: Option<Player>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        Self::initial_with_starting_player(Player::Red)
    }

    pub fn initial_with_starting_player(starting: Player) -> Self {
        GameState {
            board: Board::new(),
            current_player: starting,
            phase: Phase::Placing,
            placed: [0, 0],
            removed: [0, 0],
            winner: None,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces this side has placed so far (0..=12).
    pub fn placed(&self, player: Player) -> u8 {
        self.placed[player.index()]
    }

    /// Pieces removed *from* this side by the opponent.
    pub fn removed(&self, player: Player) -> u8 {
        self.removed[player.index()]
    }

    /// Pieces this side currently has on the board:
    /// `active = placed - removed`, always equal to the board count.
    pub fn active(&self, player: Player) -> u8 {
        self.placed[player.index()] - self.removed[player.index()]
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Legal actions for the side to move, dispatched on the phase.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        match self.phase {
            Phase::Removal => self
                .legal_removals(self.current_player.other())
                .into_iter()
                .map(Action::Remove)
                .collect(),
            _ => self.legal_actions_for(self.current_player),
        }
    }

    /// Placement or movement actions available to `player` in the current
    /// phase. Removal is excluded: it is not part of a learned policy, so
    /// bootstrapping agents see an empty action set there.
    pub fn legal_actions_for(&self, player: Player) -> Vec<Action> {
        match self.phase {
            Phase::Placing => self.board.empty_positions().map(Action::Place).collect(),
            Phase::Moving => {
                let mut actions = Vec::new();
                for from in self.board.positions_of(player) {
                    for to in from.adjacent() {
                        if self.board.is_empty_at(to) {
                            actions.push(Action::Move(from, to));
                        }
                    }
                }
                actions
            }
            Phase::Removal => Vec::new(),
        }
    }

    /// Opponent pieces eligible for removal: pieces outside any completed
    /// mill, unless every opponent piece sits in a mill (then all are
    /// eligible).
    pub fn legal_removals(&self, victim: Player) -> Vec<Position> {
        let victim_positions: Vec<Position> = self.board.positions_of(victim).collect();
        let all_in_mills = victim_positions
            .iter()
            .all(|&p| self.board.is_mill_at(p, victim));
        victim_positions
            .into_iter()
            .filter(|&p| all_in_mills || !self.board.is_mill_at(p, victim))
            .collect()
    }

    /// Apply a half-move, returning the successor state. The action kind
    /// must match the current phase; on any error `self` is unchanged.
    pub fn apply(&self, action: Action) -> Result<GameState, ActionError> {
        if self.is_terminal() {
            return Err(ActionError::GameOver);
        }
        let mover = self.current_player;
        let mut next = *self;
        match (self.phase, action) {
            (Phase::Placing, Action::Place(pos)) => {
                if !next.board.is_empty_at(pos) {
                    return Err(ActionError::IllegalMove);
                }
                next.board.set(pos, mover.to_cell());
                next.placed[mover.index()] += 1;
                next.finish_half_move(pos, mover);
            }
            (Phase::Moving, Action::Move(from, to)) => {
                if next.board.get(from) != mover.to_cell()
                    || !next.board.is_empty_at(to)
                    || !from.is_adjacent_to(to)
                {
                    return Err(ActionError::IllegalMove);
                }
                next.board.set(from, Cell::Empty);
                next.board.set(to, mover.to_cell());
                next.finish_half_move(to, mover);
            }
            (Phase::Removal, Action::Remove(pos)) => {
                let victim = mover.other();
                if !self.legal_removals(victim).contains(&pos) {
                    return Err(ActionError::IllegalRemoval);
                }
                next.board.set(pos, Cell::Empty);
                next.removed[victim.index()] += 1;
                next.phase = if next.all_pieces_placed() {
                    Phase::Moving
                } else {
                    Phase::Placing
                };
                next.current_player = mover.other();
                next.check_winner();
            }
            (_, Action::Remove(_)) => return Err(ActionError::IllegalRemoval),
            (_, _) => return Err(ActionError::IllegalMove),
        }
        Ok(next)
    }

    /// Shared tail of placement and movement: mill check, phase advance,
    /// turn switch, win check.
    fn finish_half_move(&mut self, landed: Position, mover: Player) {
        if self.board.is_mill_at(landed, mover) {
            // Turn stays with the mover until the removal is applied.
            self.phase = Phase::Removal;
        } else {
            self.current_player = mover.other();
            if self.phase == Phase::Placing && self.all_pieces_placed() {
                self.phase = Phase::Moving;
            }
            self.check_winner();
        }
    }

    fn all_pieces_placed(&self) -> bool {
        self.placed == [PIECES_PER_SIDE, PIECES_PER_SIDE]
    }

    /// A side loses the instant its active count drops below 3 once it
    /// has placed all its pieces.
    fn check_winner(&mut self) {
        for player in [Player::Red, Player::Blue] {
            if self.placed(player) == PIECES_PER_SIDE && self.active(player) < 3 {
                self.winner = Some(player.other());
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        board: Board,
        current_player: Player,
        phase: Phase,
        placed: [u8; 2],
        removed: [u8; 2],
    ) -> Self {
        GameState {
            board,
            current_player,
            phase,
            placed,
            removed,
            winner: None,
        }
    }
}
