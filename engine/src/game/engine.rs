use crate::config::validate_grid_size;
use crate::defaults::{FOOD_DRAWS_PER_CELL, FOOD_SCORE, INITIAL_SNAKE_LENGTH};
use crate::{log, log_verbose};
use super::rng::GameRng;
use super::snake::Snake;
use super::snapshot::{GameSnapshot, TickEvent};
use super::types::{Direction, GameOverReason, GameStatus, Point};

/// Single-player snake simulation. Owns all game state; advanced one tick at a
/// time by an external tick source.
pub struct GameEngine {
    grid_size: usize,
    snake: Snake,
    food: Option<Point>,
    score: u32,
    status: GameStatus,
    tick: u64,
    rng: GameRng,
}

impl GameEngine {
    pub fn new(grid_size: usize, rng: GameRng) -> Result<Self, String> {
        validate_grid_size(grid_size)?;

        let mut engine = Self {
            grid_size,
            snake: Self::starting_snake(grid_size),
            food: None,
            score: 0,
            status: GameStatus::Running,
            tick: 0,
            rng,
        };
        engine.reset();
        Ok(engine)
    }

    /// Builds an engine in an arbitrary running position. The body must be
    /// contiguous and `direction` must not face the neck. When `food` is
    /// `None` a fresh one is spawned.
    pub fn from_layout(
        grid_size: usize,
        segments: Vec<Point>,
        direction: Direction,
        food: Option<Point>,
        rng: GameRng,
    ) -> Result<Self, String> {
        validate_grid_size(grid_size)?;

        if let Some(outside) = segments.iter().find(|p| !p.is_within(grid_size)) {
            return Err(format!("Segment ({}, {}) is outside the grid", outside.x, outside.y));
        }
        let snake = Snake::from_segments(segments, direction)?;

        if let Some(food) = food {
            if !food.is_within(grid_size) {
                return Err(format!("Food ({}, {}) is outside the grid", food.x, food.y));
            }
            if snake.occupies(food) {
                return Err(format!("Food ({}, {}) is on the snake", food.x, food.y));
            }
        }

        let mut engine = Self {
            grid_size,
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            tick: 0,
            rng,
        };
        if engine.food.is_none() {
            engine.food = engine.spawn_food();
            if engine.food.is_none() {
                engine.status = GameStatus::Over(GameOverReason::BoardFilled);
            }
        }
        Ok(engine)
    }

    fn starting_snake(grid_size: usize) -> Snake {
        let center = (grid_size / 2) as i32;
        Snake::new(Point::new(center, center), Direction::Right, INITIAL_SNAKE_LENGTH)
    }

    pub fn reset(&mut self) {
        self.snake = Self::starting_snake(self.grid_size);
        self.score = 0;
        self.status = GameStatus::Running;
        self.tick = 0;
        self.food = self.spawn_food();
        log_verbose!("New game on a {0}x{0} grid", self.grid_size);
    }

    /// Buffers a turn for the next tick. Turning back onto the committed
    /// direction is refused, as is any input once the game is over.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status.is_over() || direction.is_opposite(&self.snake.direction) {
            return false;
        }
        self.snake.pending_direction = direction;
        true
    }

    pub fn advance(&mut self) -> TickEvent {
        if let GameStatus::Over(reason) = self.status {
            return TickEvent::Frozen { reason };
        }

        self.tick += 1;
        self.snake.direction = self.snake.pending_direction;
        let next_head = self.snake.head().step(self.snake.direction);

        if !next_head.is_within(self.grid_size) {
            return self.finish(GameOverReason::WallCollision);
        }
        // The tail has not moved yet, so stepping onto it counts as a collision.
        if self.snake.occupies(next_head) {
            return self.finish(GameOverReason::SelfCollision);
        }

        if self.food != Some(next_head) {
            let vacated = self.snake.slide(next_head);
            return TickEvent::Moved { head: next_head, vacated };
        }

        self.snake.push_head(next_head);

        self.score += FOOD_SCORE;
        self.food = self.spawn_food();
        log_verbose!(
            "Ate food at ({}, {}). Score: {}",
            next_head.x,
            next_head.y,
            self.score
        );

        if self.food.is_none() {
            return self.finish(GameOverReason::BoardFilled);
        }

        TickEvent::Ate {
            head: next_head,
            score: self.score,
            food: self.food,
        }
    }

    fn finish(&mut self, reason: GameOverReason) -> TickEvent {
        self.status = GameStatus::Over(reason);
        log!(
            "Game over at tick {}: snake {} with score {}",
            self.tick,
            reason,
            self.score
        );
        TickEvent::GameOver { reason }
    }

    /// Rejection-samples a free cell, falling back to a uniform pick among the
    /// enumerated free cells once the draw budget runs out. `None` when the
    /// snake covers the whole grid.
    fn spawn_food(&mut self) -> Option<Point> {
        let size = self.grid_size as i32;
        let cells = self.grid_size * self.grid_size;
        if self.snake.len() >= cells {
            return None;
        }

        for _ in 0..cells * FOOD_DRAWS_PER_CELL {
            let candidate = Point::new(self.rng.random_range(0..size), self.rng.random_range(0..size));
            if !self.snake.occupies(candidate) {
                log_verbose!("Food spawned at ({}, {})", candidate.x, candidate.y);
                return Some(candidate);
            }
        }

        let free: Vec<Point> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Point::new(x, y)))
            .filter(|p| !self.snake.occupies(*p))
            .collect();
        if free.is_empty() {
            return None;
        }
        let food = free.get(self.rng.random_range(0..free.len())).copied();
        if let Some(food) = food {
            log_verbose!("Food spawned at ({}, {}) after exhausting draws", food.x, food.y);
        }
        food
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid_size: self.grid_size,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.snake.direction,
            pending_direction: self.snake.pending_direction,
            score: self.score,
            status: self.status,
            tick: self.tick,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(cells: &[(i32, i32)]) -> Vec<Point> {
        cells.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn engine_with(
        cells: &[(i32, i32)],
        direction: Direction,
        food: (i32, i32),
    ) -> GameEngine {
        GameEngine::from_layout(
            20,
            points(cells),
            direction,
            Some(Point::new(food.0, food.1)),
            GameRng::new(42),
        )
        .unwrap()
    }

    #[test]
    fn test_reset_places_canonical_snake() {
        let engine = GameEngine::new(20, GameRng::new(1)).unwrap();
        assert_eq!(engine.snapshot().snake, points(&[(10, 10), (9, 10), (8, 10)]));
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.pending_direction(), Direction::Right);
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_over());
        let food = engine.food().unwrap();
        assert!(food.is_within(20));
        assert!(!engine.snake().occupies(food));
    }

    #[test]
    fn test_new_rejects_tiny_grid() {
        assert!(GameEngine::new(3, GameRng::new(1)).is_err());
    }

    #[test]
    fn test_advance_moves_right_without_growing() {
        let mut engine = engine_with(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0));
        let event = engine.advance();
        assert_eq!(
            event,
            TickEvent::Moved {
                head: Point::new(11, 10),
                vacated: Point::new(8, 10),
            }
        );
        assert_eq!(engine.snapshot().snake, points(&[(11, 10), (10, 10), (9, 10)]));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tick(), 1);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut engine = engine_with(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10));
        let event = engine.advance();
        assert!(matches!(event, TickEvent::Ate { score: 10, .. }));
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.snake().len(), 4);
        let food = engine.food().unwrap();
        assert!(!engine.snake().occupies(food));
        assert!(food.is_within(20));
    }

    #[test]
    fn test_wall_collision_discards_invalid_head() {
        let mut engine = engine_with(&[(19, 10), (18, 10), (17, 10)], Direction::Right, (0, 0));
        let before = engine.snapshot().snake;
        let event = engine.advance();
        assert_eq!(event, TickEvent::GameOver { reason: GameOverReason::WallCollision });
        assert!(engine.is_over());
        assert_eq!(engine.snapshot().snake, before);
        assert!(engine.snapshot().snake.iter().all(|p| p.is_within(20)));
    }

    #[test]
    fn test_wall_collision_on_each_edge() {
        let cases = [
            (&[(0, 5), (1, 5)][..], Direction::Left),
            (&[(5, 0), (5, 1)][..], Direction::Up),
            (&[(5, 19), (5, 18)][..], Direction::Down),
            (&[(19, 5), (18, 5)][..], Direction::Right),
        ];
        for (cells, direction) in cases {
            let mut engine = engine_with(cells, direction, (10, 10));
            assert_eq!(
                engine.advance(),
                TickEvent::GameOver { reason: GameOverReason::WallCollision }
            );
        }
    }

    #[test]
    fn test_self_collision_ends_game() {
        // Head at (5,5) heading up into its own body at (5,4).
        let mut engine = engine_with(
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Left,
            (0, 0),
        );
        assert!(engine.set_direction(Direction::Up));
        assert_eq!(
            engine.advance(),
            TickEvent::GameOver { reason: GameOverReason::SelfCollision }
        );
        assert_eq!(engine.snake().len(), 5);
    }

    #[test]
    fn test_moving_onto_tail_is_a_collision() {
        // A 2x2 loop: the head's next cell is the current tail.
        let mut engine = engine_with(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Up, (0, 0));
        assert!(engine.set_direction(Direction::Right));
        assert_eq!(
            engine.advance(),
            TickEvent::GameOver { reason: GameOverReason::SelfCollision }
        );
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = engine_with(&[(19, 10), (18, 10), (17, 10)], Direction::Right, (0, 0));
        engine.advance();
        let frozen = engine.snapshot();

        assert!(!engine.set_direction(Direction::Up));
        assert_eq!(
            engine.advance(),
            TickEvent::Frozen { reason: GameOverReason::WallCollision }
        );
        assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn test_reverse_direction_is_rejected() {
        let mut engine = GameEngine::new(20, GameRng::new(3)).unwrap();
        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_checks_committed_direction_not_buffered() {
        let mut engine = GameEngine::new(20, GameRng::new(3)).unwrap();
        assert!(engine.set_direction(Direction::Up));
        // Down reverses the buffered Up but not the committed Right.
        assert!(engine.set_direction(Direction::Down));
        assert_eq!(engine.pending_direction(), Direction::Down);
        // Left still reverses the committed Right.
        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Direction::Down);

        engine.advance();
        assert_eq!(engine.direction(), Direction::Down);
        assert_eq!(engine.snake().head(), Point::new(10, 11));
    }

    #[test]
    fn test_direction_applies_on_next_advance_only() {
        let mut engine = GameEngine::new(20, GameRng::new(3)).unwrap();
        engine.set_direction(Direction::Up);
        assert_eq!(engine.direction(), Direction::Right);
        engine.advance();
        assert_eq!(engine.direction(), Direction::Up);
        assert_eq!(engine.snake().head(), Point::new(10, 9));
    }

    #[test]
    fn test_reset_after_game_over_restarts() {
        let mut engine = engine_with(&[(19, 10), (18, 10), (17, 10)], Direction::Right, (0, 0));
        engine.advance();
        assert!(engine.is_over());

        engine.reset();
        assert!(!engine.is_over());
        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().head(), Point::new(10, 10));
        assert!(matches!(engine.advance(), TickEvent::Moved { .. } | TickEvent::Ate { .. }));
    }

    // Covers every cell of a 4x4 grid except (3,3); the head at (2,3) faces it.
    const ALMOST_FULL: [(i32, i32); 15] = [
        (2, 3), (1, 3), (0, 3),
        (0, 2), (1, 2), (2, 2), (3, 2),
        (3, 1), (2, 1), (1, 1), (0, 1),
        (0, 0), (1, 0), (2, 0), (3, 0),
    ];

    #[test]
    fn test_food_spawn_finds_last_free_cell() {
        let engine =
            GameEngine::from_layout(4, points(&ALMOST_FULL), Direction::Right, None, GameRng::new(9)).unwrap();
        assert_eq!(engine.food(), Some(Point::new(3, 3)));
        assert!(!engine.is_over());
    }

    #[test]
    fn test_filling_the_board_ends_game() {
        let mut engine = GameEngine::from_layout(
            4,
            points(&ALMOST_FULL),
            Direction::Right,
            Some(Point::new(3, 3)),
            GameRng::new(9),
        )
        .unwrap();

        assert_eq!(
            engine.advance(),
            TickEvent::GameOver { reason: GameOverReason::BoardFilled }
        );
        assert_eq!(engine.snake().len(), 16);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.food(), None);
    }

    #[test]
    fn test_from_layout_validates() {
        let rng = || GameRng::new(1);
        assert!(GameEngine::from_layout(20, points(&[(20, 0)]), Direction::Up, None, rng()).is_err());
        assert!(GameEngine::from_layout(20, points(&[(1, 1), (1, 1)]), Direction::Up, None, rng()).is_err());
        assert!(
            GameEngine::from_layout(20, points(&[(1, 1)]), Direction::Up, Some(Point::new(1, 1)), rng())
                .is_err()
        );
        assert!(
            GameEngine::from_layout(20, points(&[(1, 1)]), Direction::Up, Some(Point::new(-1, 0)), rng())
                .is_err()
        );
    }

    #[test]
    fn test_from_layout_rejects_broken_body() {
        let rng = || GameRng::new(1);
        assert!(GameEngine::from_layout(20, points(&[(1, 1), (5, 5)]), Direction::Up, None, rng()).is_err());
        assert!(
            GameEngine::from_layout(20, points(&[(4, 4), (3, 4), (3, 5)]), Direction::Left, None, rng()).is_err()
        );
        assert!(GameEngine::from_layout(20, points(&[(4, 4), (3, 4), (3, 5)]), Direction::Up, None, rng()).is_ok());
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed: u64| {
            let mut engine = GameEngine::new(10, GameRng::new(seed)).unwrap();
            let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
            let mut history = Vec::new();
            for i in 0..40 {
                engine.set_direction(turns[(i / 3) % turns.len()]);
                history.push(engine.advance());
            }
            (history, engine.snapshot())
        };
        assert_eq!(play(77), play(77));
    }
}
