/// Direction the snake can move
///
/// The grid is Cartesian: `y` grows upward, so `Up` increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The steering cycle, in clockwise order
    pub const CYCLE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    fn cycle_index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// One 90-degree step clockwise
    pub fn clockwise(&self) -> Direction {
        Self::CYCLE[(self.cycle_index() + 1) % 4]
    }

    /// One 90-degree step counter-clockwise
    pub fn counter_clockwise(&self) -> Direction {
        Self::CYCLE[(self.cycle_index() + 3) % 4]
    }

    /// Rotate according to the side of the screen that was touched
    pub fn turned_by(&self, side: ScreenSide) -> Direction {
        match side {
            ScreenSide::Left => self.counter_clockwise(),
            ScreenSide::Right => self.clockwise(),
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Half of the play area that received a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSide {
    /// Turns the snake counter-clockwise
    Left,
    /// Turns the snake clockwise
    Right,
}

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Touch on one half of the play area
    Touch(ScreenSide),
    /// Flip the paused flag
    TogglePause,
}
