//! Turn-based tic-tac-toe state machine driving a 22-segment panel.
//!
//! The panel layout is fixed: segments 0-3 are the status glyphs (O, X,
//! WINS, GO) and segments 4-21 are the 3x3 grid, six per row — the three
//! O marks of the row followed by its three X marks.

pub const SEGMENT_COUNT: usize = 22;

const STATUS_O: usize = 0;
const STATUS_X: usize = 1;
const STATUS_WINS: usize = 2;
const STATUS_GO: usize = 3;

const WIN_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    X,
    O,
}

impl Player {
    fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won(Player),
    Stalemate,
}

pub struct TicTacToe {
    board: [[Option<Player>; 3]; 3],
    cursor: (usize, usize),
    player: Player,
    outcome: Option<Outcome>,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self { board: Default::default(), cursor: (0, 0), player: Player::X, outcome: None }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Moves the cursor, clamped to the grid.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let x = (self.cursor.0 as i32 + dx).clamp(0, 2) as usize;
        let y = (self.cursor.1 as i32 + dy).clamp(0, 2) as usize;
        self.cursor = (x, y);
    }

    /// Places the current player's mark at the cursor, or starts a fresh
    /// game if the previous one has finished. Marking an occupied square
    /// does nothing.
    pub fn press(&mut self) {
        if self.outcome.is_some() {
            *self = Self::new();
            return;
        }
        let (x, y) = self.cursor;
        if self.board[x][y].is_none() {
            self.board[x][y] = Some(self.player);
            self.player = self.player.other();
            self.outcome = self.check_outcome();
        }
    }

    fn check_outcome(&self) -> Option<Outcome> {
        for line in &WIN_LINES {
            let [(x1, y1), (x2, y2), (x3, y3)] = *line;
            let first = self.board[x1][y1]?;
            if self.board[x2][y2] == Some(first) && self.board[x3][y3] == Some(first) {
                return Some(Outcome::Won(first));
            }
        }
        let full = self.board.iter().flatten().all(|square| square.is_some());
        full.then_some(Outcome::Stalemate)
    }

    /// Flattens the game into per-segment active flags in panel order. The
    /// cursor square shows the current player's mark held steady.
    pub fn segment_states(&self) -> [bool; SEGMENT_COUNT] {
        let mut states = [false; SEGMENT_COUNT];

        match self.outcome {
            None => {
                states[STATUS_O] = self.player == Player::O;
                states[STATUS_X] = self.player == Player::X;
                states[STATUS_GO] = true;
            },
            Some(Outcome::Stalemate) => {
                states[STATUS_O] = true;
                states[STATUS_X] = true;
            },
            Some(Outcome::Won(winner)) => {
                states[STATUS_O] = winner == Player::O;
                states[STATUS_X] = winner == Player::X;
                states[STATUS_WINS] = true;
            },
        }

        for y in 0..3 {
            for x in 0..3 {
                states[grid_segment(Player::O, x, y)] = self.board[x][y] == Some(Player::O);
                states[grid_segment(Player::X, x, y)] = self.board[x][y] == Some(Player::X);
            }
        }

        if self.outcome.is_none() {
            let (x, y) = self.cursor;
            states[grid_segment(self.player, x, y)] = true;
        }

        states
    }
}

fn grid_segment(player: Player, x: usize, y: usize) -> usize {
    let row_base = 4 + y * 6;
    match player {
        Player::O => row_base + x,
        Player::X => row_base + 3 + x,
    }
}
