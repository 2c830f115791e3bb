use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;

use super::action::{Action, Direction, ScreenSide};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// One occupied cell of the snake's body
pub type Segment = Position;

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True if the position lies on a `grid_size` x `grid_size` grid
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    pub body: Vec<Segment>,
    /// Current direction of movement
    pub direction: Direction,
    /// Deferred growth, consumed by the next move
    pub growing: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            growing: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Segment] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Step one cell in the current direction.
    ///
    /// The new head is not bounds-checked; an off-grid head is how the
    /// caller detects a wall hit.
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop();
        }
    }

    /// Schedule one segment of growth for the next move.
    ///
    /// Repeated calls before that move coalesce into a single segment.
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What happened when food was asked to respawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Food now sits on this free cell
    Placed(Position),
    /// Every grid cell is occupied; no food was placed
    BoardFull,
}

/// The single piece of food on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    /// `None` only once the board has filled up
    pub pos: Option<Position>,
}

impl Food {
    pub fn at(pos: Position) -> Self {
        Self { pos: Some(pos) }
    }

    /// Place food on a uniformly random cell not listed in `occupied`.
    ///
    /// With `occupied == None` the first sample is taken as-is; that form is
    /// only used for the initial placement. When the occupied cells cover the
    /// whole grid the respawn is skipped and the food is removed.
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        grid_size: usize,
        occupied: Option<&[Position]>,
    ) -> SpawnOutcome {
        let taken: HashSet<Position> = occupied
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|pos| pos.is_within(grid_size))
            .collect();

        if taken.len() >= grid_size * grid_size {
            self.pos = None;
            return SpawnOutcome::BoardFull;
        }

        loop {
            let x = rng.gen_range(0..grid_size) as i32;
            let y = rng.gen_range(0..grid_size) as i32;
            let pos = Position::new(x, y);

            if !taken.contains(&pos) {
                self.pos = Some(pos);
                return SpawnOutcome::Placed(pos);
            }
        }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub grid_size: usize,
    pub score: u32,
    /// Ticks processed while running
    pub steps: u32,
    /// Sum of tick durations processed while running
    pub play_time: Duration,
    /// Terminal once set
    pub game_over: bool,
    pub paused: bool,
    /// Set when food could not respawn because no cell was free
    pub board_full: bool,
    /// Steering intent waiting for the next tick
    pending_direction: Option<Direction>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: 0,
            steps: 0,
            play_time: Duration::ZERO,
            game_over: false,
            paused: false,
            board_full: false,
            pending_direction: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.grid_size)
    }

    /// Direction the next tick will move in
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.snake.direction)
    }

    /// Steering intent queued for the next tick, if any
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Turn one step for a touch on `side`.
    ///
    /// The turn is queued rather than written to the snake; touches that
    /// arrive before the next tick rotate the queued heading, so only the
    /// final value is applied.
    pub fn on_input(&mut self, side: ScreenSide) {
        if self.game_over {
            return;
        }
        self.pending_direction = Some(self.heading().turned_by(side));
    }

    /// Dispatch an input-surface action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Touch(side) => self.on_input(side),
            Action::TogglePause => self.toggle_pause(),
        }
    }

    /// Take the queued intent, leaving the queue empty
    pub(crate) fn take_pending_direction(&mut self) -> Option<Direction> {
        self.pending_direction.take()
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.game_over {
            return;
        }
        self.paused = paused;
    }

    /// Check the committed head against the walls and the rest of the body
    pub fn check_collision(&self) -> Option<CollisionType> {
        let head = self.snake.head();

        if !self.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
