use super::{
    action::{Direction, Intent},
    config::GameConfig,
    event::GameEvent,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use crate::persistence::BestScoreStore;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Random draws attempted before falling back to enumerating free cells
const MAX_FOOD_SAMPLES: usize = 1024;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed
    Skipped,
    /// The snake moved one cell, length unchanged
    Moved,
    /// The snake ate and grew by one segment
    Grew,
    /// The snake hit a wall or itself
    Collided(CollisionType),
    /// The snake ate the last reachable food and now covers the whole board
    BoardFilled,
}

/// Owns a game and advances it one tick at a time
///
/// The engine never schedules itself: a host calls [`GameEngine::tick`] every
/// [`GameEngine::speed_interval`] and re-arms its timer when that changes.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
    store: Box<dyn BestScoreStore + Send>,
    events: Vec<GameEvent>,
}

impl GameEngine<StdRng> {
    /// Create an idle game seeded from OS entropy
    pub fn new(config: GameConfig, store: Box<dyn BestScoreStore + Send>) -> Self {
        Self::with_rng(config, StdRng::from_entropy(), store)
    }

    /// Create an idle game whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64, store: Box<dyn BestScoreStore + Send>) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed), store)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an idle game drawing food positions from `rng`
    ///
    /// The best score is loaded from `store` once, here.
    pub fn with_rng(config: GameConfig, mut rng: R, mut store: Box<dyn BestScoreStore + Send>) -> Self {
        let mut state = initial_state(&config, &mut rng);
        state.best_score = store.load_best_score();

        tracing::debug!(best_score = state.best_score, "engine created");

        Self {
            config,
            state,
            rng,
            store,
            events: Vec::new(),
        }
    }

    /// Resume from an existing snapshot, keeping its best score as is
    pub fn from_state(
        config: GameConfig,
        state: GameState,
        rng: R,
        store: Box<dyn BestScoreStore + Send>,
    ) -> Self {
        Self {
            config,
            state,
            rng,
            store,
            events: Vec::new(),
        }
    }

    /// Read-only snapshot for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    /// Period the host should wait between ticks
    pub fn speed_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_interval_ms)
    }

    /// Take the notifications queued since the previous call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Dispatch an intent to the matching operation
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Steer(direction) => {
                self.set_direction(direction);
            }
            Intent::TogglePause => self.toggle_pause(),
            Intent::Start => self.start(),
            Intent::Reset => self.reset(),
        }
    }

    /// Queue a direction for the next tick
    ///
    /// Ignored outside [`Phase::Running`] and when `requested` reverses the
    /// direction applied by the last tick. A second call before the next tick
    /// overwrites the first. Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(self.state.direction) || !self.state.is_running() {
            return false;
        }

        self.state.pending_direction = requested;
        true
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.events.push(GameEvent::Paused);
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.events.push(GameEvent::Resumed);
            }
            Phase::Idle | Phase::GameOver => {}
        }
    }

    /// Leave idle or paused; a finished game needs [`GameEngine::reset`]
    pub fn start(&mut self) {
        match self.state.phase {
            Phase::Idle => {
                self.state.phase = Phase::Running;
                self.events.push(GameEvent::Started);
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.events.push(GameEvent::Resumed);
            }
            Phase::Running | Phase::GameOver => {}
        }
    }

    /// Start over with a fresh snake; only the best score survives
    pub fn reset(&mut self) {
        let best_score = self.state.best_score;
        self.state = initial_state(&self.config, &mut self.rng);
        self.state.best_score = best_score;
        self.state.phase = Phase::Running;

        tracing::debug!(best_score, "game reset");
        self.events.push(GameEvent::Started);
    }

    /// Advance the game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Skipped;
        }

        // The committed direction is the reference for the reversal guard
        self.state.direction = self.state.pending_direction;
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.state.phase = Phase::GameOver;
            tracing::info!(?collision, score = self.state.score, "game over");
            self.events.push(GameEvent::Died(collision));
            return TickOutcome::Collided(collision);
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);

        if !ate_food {
            self.events.push(GameEvent::Moved);
            return TickOutcome::Moved;
        }

        self.on_food_eaten()
    }

    fn on_food_eaten(&mut self) -> TickOutcome {
        self.state.score = self.state.score.saturating_add(self.config.food_reward);
        self.events.push(GameEvent::Ate {
            score: self.state.score,
        });

        if self.state.score > self.state.best_score {
            self.state.best_score = self.state.score;
            self.store.save_best_score(self.state.best_score);
            self.events.push(GameEvent::NewBestScore(self.state.best_score));
        }

        self.state.speed_interval_ms = self
            .state
            .speed_interval_ms
            .saturating_sub(self.config.speed_increment_ms)
            .max(self.config.min_speed_ms);

        match generate_food(&mut self.rng, self.config.grid_size, &self.state.snake) {
            Some(food) => {
                self.state.food = food;
                TickOutcome::Grew
            }
            None => {
                self.state.phase = Phase::GameOver;
                tracing::info!(score = self.state.score, "board filled");
                self.events.push(GameEvent::BoardFilled);
                TickOutcome::BoardFilled
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !pos.is_within(self.config.grid_size) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it only moves away after this check
        if self.state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

/// Pick a random cell on a `grid_size` board that the snake does not cover
///
/// Uses rejection sampling; after [`MAX_FOOD_SAMPLES`] misses the free cells
/// are enumerated and one is chosen uniformly. Returns `None` when the snake
/// covers the whole board.
pub fn generate_food<R: Rng>(rng: &mut R, grid_size: i32, snake: &Snake) -> Option<Position> {
    if grid_size <= 0 {
        return None;
    }

    for _ in 0..MAX_FOOD_SAMPLES {
        let pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.occupies(*pos))
        .choose(rng)
}

fn initial_state<R: Rng>(config: &GameConfig, rng: &mut R) -> GameState {
    let center = Position::new(config.grid_size / 2, config.grid_size / 2);
    let snake = Snake::new(center);
    // Only a 1x1 board leaves no free cell next to a single segment
    let food = generate_food(rng, config.grid_size, &snake).unwrap_or(center);

    GameState::new(snake, food, Direction::Right, config.initial_speed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryBestScoreStore, NullBestScoreStore};

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::default(), 7, Box::new(NullBestScoreStore))
    }

    fn running(snake: Vec<Position>, direction: Direction, food: Position) -> GameEngine {
        let state = GameState::new(Snake::from_segments(snake), food, direction, 150)
            .with_phase(Phase::Running);
        GameEngine::from_state(
            GameConfig::default(),
            state,
            StdRng::seed_from_u64(3),
            Box::new(NullBestScoreStore),
        )
    }

    #[test]
    fn test_new_engine_is_idle_at_center() {
        let engine = engine();
        let state = engine.state();

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.snake.segments(), &[Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_interval_ms, 150);
        assert_ne!(state.food, Position::new(10, 10));
        assert!(state.food.is_within(20));
    }

    #[test]
    fn test_best_score_loaded_on_construction() {
        let store = MemoryBestScoreStore::with_value(90);
        let engine = GameEngine::seeded(GameConfig::default(), 1, Box::new(store));
        assert_eq!(engine.best_score(), 90);
    }

    #[test]
    fn test_tick_is_noop_when_idle() {
        let mut engine = engine();
        let before = engine.state().clone();

        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = running(vec![Position::new(10, 10)], Direction::Right, Position::new(0, 0));

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.state().snake.segments(), &[Position::new(11, 10)]);
        assert_eq!(engine.drain_events().collect::<Vec<_>>(), vec![GameEvent::Moved]);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = running(vec![Position::new(10, 10)], Direction::Right, Position::new(11, 10));

        assert_eq!(engine.tick(), TickOutcome::Grew);

        let state = engine.state();
        assert_eq!(state.score, 10);
        assert_eq!(state.best_score, 10);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.speed_interval_ms, 145);
        assert!(!state.snake.occupies(state.food));

        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::Ate { score: 10 }, GameEvent::NewBestScore(10)]
        );
    }

    #[test]
    fn test_best_score_saved_only_when_beaten() {
        let store = MemoryBestScoreStore::with_value(20);
        let state = GameState {
            best_score: 20,
            ..GameState::new(
                Snake::new(Position::new(10, 10)),
                Position::new(11, 10),
                Direction::Right,
                150,
            )
            .with_phase(Phase::Running)
        };
        let mut engine = GameEngine::from_state(
            GameConfig::default(),
            state,
            StdRng::seed_from_u64(5),
            Box::new(store.clone()),
        );

        engine.tick();
        assert_eq!(engine.best_score(), 20);
        assert!(store.saved_values().is_empty());
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = running(vec![Position::new(0, 10)], Direction::Left, Position::new(5, 5));

        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.state().snake.segments(), &[Position::new(0, 10)]);
    }

    #[test]
    fn test_tail_counts_as_collision() {
        // A 2x2 loop: head (5,5) moving Down lands on the tail (5,6)
        let mut engine = running(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Down,
            Position::new(0, 0),
        );

        assert_eq!(engine.tick(), TickOutcome::Collided(CollisionType::SelfCollision));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = running(
            vec![Position::new(10, 10), Position::new(9, 10)],
            Direction::Right,
            Position::new(0, 0),
        );

        assert!(!engine.set_direction(Direction::Left));
        engine.tick();

        assert_eq!(engine.state().direction, Direction::Right);
        assert_eq!(engine.state().snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_guard_uses_applied_direction_not_pending() {
        let mut engine = running(
            vec![Position::new(10, 10), Position::new(9, 10)],
            Direction::Right,
            Position::new(0, 0),
        );

        // Up is queued, but Right is still the applied direction, so Down passes
        // the guard and Left does not
        assert!(engine.set_direction(Direction::Up));
        assert!(engine.set_direction(Direction::Down));
        assert!(!engine.set_direction(Direction::Left));

        engine.tick();
        assert_eq!(engine.state().snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_direction_ignored_when_not_running() {
        let mut engine = engine();
        assert!(!engine.set_direction(Direction::Up));
        assert_eq!(engine.state().pending_direction, Direction::Right);
    }

    #[test]
    fn test_pause_cycle() {
        let mut engine = engine();

        engine.toggle_pause();
        assert_eq!(engine.phase(), Phase::Idle);

        engine.start();
        engine.toggle_pause();
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.tick(), TickOutcome::Skipped);

        engine.toggle_pause();
        assert_eq!(engine.phase(), Phase::Running);

        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::Started, GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_start_after_game_over_needs_reset() {
        let mut engine = running(vec![Position::new(19, 0)], Direction::Right, Position::new(5, 5));
        engine.tick();
        assert_eq!(engine.phase(), Phase::GameOver);

        engine.start();
        engine.toggle_pause();
        assert_eq!(engine.phase(), Phase::GameOver);

        engine.apply(Intent::Reset);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_speed_is_floored() {
        let config = GameConfig::default();
        let mut state = GameState::new(
            Snake::new(Position::new(0, 0)),
            Position::new(1, 0),
            Direction::Right,
            52,
        )
        .with_phase(Phase::Running);
        state.score = 500;
        let mut engine =
            GameEngine::from_state(config, state, StdRng::seed_from_u64(9), Box::new(NullBestScoreStore));

        engine.tick();
        assert_eq!(engine.state().speed_interval_ms, 50);
        assert_eq!(engine.speed_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_generate_food_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);

        for _ in 0..200 {
            let food = generate_food(&mut rng, 2, &snake);
            assert_eq!(food, Some(Position::new(0, 1)));
        }
    }

    #[test]
    fn test_generate_food_on_full_board() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ]);

        assert_eq!(generate_food(&mut rng, 2, &snake), None);
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        let config = GameConfig::with_grid_size(2);
        let state = GameState::new(
            Snake::from_segments(vec![Position::new(1, 0), Position::new(1, 1), Position::new(0, 1)]),
            Position::new(0, 0),
            Direction::Left,
            150,
        )
        .with_phase(Phase::Running);
        let mut engine =
            GameEngine::from_state(config, state, StdRng::seed_from_u64(2), Box::new(NullBestScoreStore));

        assert_eq!(engine.tick(), TickOutcome::BoardFilled);
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.state().snake.len(), 4);
    }
}
