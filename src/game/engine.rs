use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, Food, GameState, Position, Snake, SpawnOutcome},
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Information about a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether food had nowhere left to respawn this tick
    pub board_full: bool,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the tick
    pub info: TickInfo,
}

impl TickResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: TickInfo {
                ate_food: false,
                collision_type: None,
                board_full: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine, seeded from the config when it carries a seed
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;

        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        // Initial placement does not look at the snake
        let mut food = Food { pos: None };
        food.spawn(&mut self.rng, self.config.grid_size, None);

        GameState::new(snake, food, self.config.grid_size)
    }

    /// Advance the game by one tick.
    ///
    /// Does nothing while paused or after game over. Otherwise applies the
    /// queued steering intent, moves, eats, and then checks the committed
    /// head for collisions.
    pub fn update(&mut self, state: &mut GameState, dt: Duration) -> TickResult {
        if state.game_over || state.paused {
            return TickResult::idle(state.game_over);
        }

        if let Some(direction) = state.take_pending_direction() {
            state.snake.direction = direction;
        }

        state.snake.move_forward();
        state.steps += 1;
        state.play_time += dt;

        let ate_food = state.food.pos == Some(state.snake.head());
        let mut board_full = false;

        if ate_food {
            state.score += 1;
            state.snake.grow();

            let outcome = state.food.spawn(
                &mut self.rng,
                state.grid_size,
                Some(state.snake.body.as_slice()),
            );
            match outcome {
                SpawnOutcome::Placed(pos) => {
                    debug!("Food eaten, score {}, respawned at {:?}", state.score, pos);
                }
                SpawnOutcome::BoardFull => {
                    warn!("No free cell left for food at score {}", state.score);
                    state.board_full = true;
                    board_full = true;
                }
            }
        }

        let collision_type = state.check_collision();
        if let Some(collision) = collision_type {
            state.game_over = true;
            info!(
                "Game over: {:?} at {:?}, score {} after {} ticks",
                collision,
                state.snake.head(),
                state.score,
                state.steps
            );
        }

        TickResult {
            terminated: state.game_over,
            info: TickInfo {
                ate_food,
                collision_type,
                board_full,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::ScreenSide;

    const TICK: Duration = Duration::from_millis(150);

    fn seeded(config: GameConfig) -> GameEngine {
        GameEngine::new(config.with_seed(42))
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded(GameConfig::default());
        let state = engine.reset();

        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.food.pos.is_some_and(|pos| state.is_in_bounds(pos)));
    }

    #[test]
    fn test_seed_makes_reset_reproducible() {
        let a = seeded(GameConfig::default()).reset();
        let b = seeded(GameConfig::default()).reset();
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.food = Food::at(Position::new(0, 0));

        let result = engine.update(&mut state, TICK);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.play_time, TICK);
        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::small());
        let mut state = engine.reset();

        // Place food directly in front of snake
        let head = state.snake.head();
        state.food = Food::at(head.moved_in_direction(state.snake.direction));
        let initial_length = state.snake.len();

        let result = engine.update(&mut state, TICK);

        assert!(result.info.ate_food);
        assert_eq!(state.score, 1);
        assert!(state.snake.growing);
        assert_eq!(state.snake.len(), initial_length);
        let food = state.food.pos.expect("food respawned");
        assert!(!state.snake.body.contains(&food));

        // Growth lands on the following move
        state.food = Food::at(Position::new(0, 0));
        engine.update(&mut state, TICK);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = seeded(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Food::at(Position::new(5, 5)),
            10,
        );

        let result = engine.update(&mut state, TICK);

        assert!(result.terminated);
        assert!(state.game_over);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        // The illegal head is committed before it is detected
        assert_eq!(state.snake.head(), Position::new(-1, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded(GameConfig::small());

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Food::at(Position::new(8, 8)), 10);

        // Right: head (6,5)
        engine.update(&mut state, TICK);
        // Up: head (6,6)
        state.on_input(ScreenSide::Left);
        engine.update(&mut state, TICK);
        // Left: head (5,6)
        state.on_input(ScreenSide::Left);
        engine.update(&mut state, TICK);
        // Down: head (5,5), still part of the body
        state.on_input(ScreenSide::Left);
        let result = engine.update(&mut state, TICK);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_reversal_is_permitted_until_it_collides() {
        let mut engine = seeded(GameConfig::small());
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 1);
        let mut state = GameState::new(snake, Food::at(Position::new(8, 8)), 10);

        // Two right-half touches in one tick reverse a lone head safely
        state.on_input(ScreenSide::Right);
        state.on_input(ScreenSide::Right);
        let result = engine.update(&mut state, TICK);

        assert!(!result.terminated);
        assert_eq!(state.snake.direction, Direction::Left);
        assert_eq!(state.snake.head(), Position::new(4, 5));
    }

    #[test]
    fn test_pending_intent_applied_once() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.food = Food::at(Position::new(0, 0));

        state.on_input(ScreenSide::Left);
        engine.update(&mut state, TICK);
        assert_eq!(state.snake.head(), Position::new(10, 11));
        assert_eq!(state.pending_direction(), None);

        engine.update(&mut state, TICK);
        assert_eq!(state.snake.head(), Position::new(10, 12));
    }

    #[test]
    fn test_paused_game_no_update() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.on_input(ScreenSide::Right);
        state.toggle_pause();
        let before = state.clone();

        let result = engine.update(&mut state, TICK);

        assert!(!result.terminated);
        assert_eq!(state, before);

        state.toggle_pause();
        engine.update(&mut state, TICK);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = seeded(GameConfig::small());
        let mut state = engine.reset();
        state.game_over = true;
        let before = state.clone();

        for _ in 0..3 {
            let result = engine.update(&mut state, TICK);
            assert!(result.terminated);
            assert_eq!(result.info.collision_type, None);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_board_full_stops_respawn() {
        let mut engine = seeded(GameConfig::new(2));
        // 2x2 grid: snake covers three cells and eats the fourth
        let snake = Snake {
            body: vec![Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)],
            direction: Direction::Right,
            growing: false,
        };
        let mut state = GameState::new(snake, Food::at(Position::new(1, 1)), 2);
        state.snake.grow();

        let result = engine.update(&mut state, TICK);

        assert!(result.info.ate_food);
        assert!(result.info.board_full);
        assert!(state.board_full);
        assert_eq!(state.food.pos, None);
        assert_eq!(state.score, 1);
        assert!(!result.terminated);

        // Nowhere left to go
        let result = engine.update(&mut state, TICK);
        assert!(result.terminated);
        assert_eq!(state.score, 1);
    }
}
