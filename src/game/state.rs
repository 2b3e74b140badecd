use std::time::Duration;

use super::direction::Direction;

/// A grid-aligned cell, addressed by the pixel coordinates of its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell one step in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.vector(cell_size);
        self.offset(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction applied on every tick
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake whose body trails behind the head
    pub fn new(head: Cell, direction: Direction, length: usize, cell_size: i32) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.stepped(back, cell_size));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_cells(body: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check if a cell collides with the snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().contains(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head; drop the tail unless the snake grows this step
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly initialized, waiting for the start control
    Ready,
    Running,
    /// Terminal until the game is restarted
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell is left for food
    BoardFull,
}

impl GameOverReason {
    /// Text shown in the message display
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "Game over! You hit the wall!",
            GameOverReason::SelfCollision => "Game over! You bit yourself!",
            GameOverReason::BoardFull => "You win! There is no room left on the board!",
        }
    }

    /// Short form for the stats line
    pub fn label(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "wall",
            GameOverReason::SelfCollision => "self",
            GameOverReason::BoardFull => "full board",
        }
    }
}

/// Complete game state, owned by the host and lent to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Only `None` once the board is full
    pub food: Option<Cell>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub score: u32,
    /// Current delay between ticks
    pub tick_interval: Duration,
    pub phase: Phase,
    /// Direction requested by input, applied on the next tick
    pub pending_direction: Option<Direction>,
    pub game_over_reason: Option<GameOverReason>,
    pub food_eaten: u32,
    pub ticks: u32,
}

impl GameState {
    /// Create a new game state in the `Ready` phase
    pub fn new(
        snake: Snake,
        food: Option<Cell>,
        canvas_width: u32,
        canvas_height: u32,
        cell_size: u32,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            food,
            canvas_width,
            canvas_height,
            cell_size,
            score: 0,
            tick_interval,
            phase: Phase::Ready,
            pending_direction: None,
            game_over_reason: None,
            food_eaten: 0,
            ticks: 0,
        }
    }

    /// Check if a cell lies inside the canvas
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.canvas_width as i32
            && cell.y >= 0
            && cell.y < self.canvas_height as i32
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn message(&self) -> Option<&'static str> {
        self.game_over_reason.map(|reason| reason.message())
    }
}
