use std::fmt;
use std::time::{Duration, Instant};

use log::{Level as LogLevel, debug, info, log_enabled, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, DeathReason};
use crate::config::{
    BONUS_MIN_SCORE, BONUS_PACING_POINTS, COUNTDOWN_DURATION, HAZARD_LENGTH,
    HAZARD_MOVE_INTERVAL, INITIAL_TICK_DELAY_MS, LEVEL_UP_DISPLAY, MIN_TICK_DELAY_MS,
    OBSTACLE_COUNT, OBSTACLE_SIZE, TICK_DELAY_STEP_MS,
};
use crate::food::{Bonus, Food};
use crate::grid::{Board, Position, Rect};
use crate::hazard::WanderingHazard;
use crate::input::{Direction, GameInput};
use crate::placement::{generate_obstacles, place_random};
use crate::snake::Snake;
use crate::snapshot::Snapshot;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    /// Level briefing shown since `since`.
    LevelUp { since: Instant },
    /// Resume countdown running since `since`.
    Countdown { since: Instant },
    GameOver { reason: DeathReason },
}

/// Difficulty stage. Each stage adds a hazard.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// The following level and the score that unlocks it.
    #[must_use]
    pub fn next(self) -> Option<(Self, u32)> {
        match self {
            Self::One => Some((Self::Two, 8)),
            Self::Two => Some((Self::Three, 15)),
            Self::Three => None,
        }
    }

    /// Warning shown on the level-up screen.
    #[must_use]
    pub fn briefing(self) -> &'static str {
        match self {
            Self::One => "Eat, grow, stay on the board.",
            Self::Two => "Beware of the Russell's viper.",
            Self::Three => "Beware of the stones.",
        }
    }

    #[must_use]
    pub fn has_hazard(self) -> bool {
        self >= Self::Two
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.number())
    }
}

/// Returns the tick delay for a snake of `length` cells: one step faster per
/// segment, never below the floor.
#[must_use]
pub fn tick_delay_for_length(length: usize) -> Duration {
    let segments = u64::try_from(length.saturating_sub(1)).unwrap_or(u64::MAX);
    let delay_ms = INITIAL_TICK_DELAY_MS
        .saturating_sub(segments.saturating_mul(TICK_DELAY_STEP_MS))
        .max(MIN_TICK_DELAY_MS);
    Duration::from_millis(delay_ms)
}

/// Complete mutable game state for one run.
#[derive(Debug, Clone)]
pub struct Session {
    pub snake: Snake,
    /// The viper, present once a level that has one is reached.
    pub hazard: Option<WanderingHazard>,
    pub obstacles: Vec<Rect>,
    pub food: Food,
    pub bonus: Option<Bonus>,
    pub score: u32,
    pub level: Level,
    /// Food points eaten since the last banana was eaten.
    pub points_since_bonus: u32,
    /// Set on a level-up; cleared once play resumes after the countdown.
    pub level_up_triggered: bool,
    pub status: GameStatus,
    board: Board,
    tick_delay: Duration,
    rng: StdRng,
}

impl Session {
    /// Creates a session in the menu with a fresh random stream.
    #[must_use]
    pub fn new_with_seed(board: Board, seed: u64) -> Self {
        Self::from_rng(board, StdRng::seed_from_u64(seed))
    }

    fn from_rng(board: Board, mut rng: StdRng) -> Self {
        let snake = Snake::new(board.center(), Direction::Right);
        // Only a single-cell board has no room next to the snake.
        let food = Food::spawn(&mut rng, board, |cell| snake.occupies(cell))
            .unwrap_or(Food::new(Position::new(0, 0)));

        Self {
            tick_delay: tick_delay_for_length(snake.len()),
            snake,
            hazard: None,
            obstacles: Vec::new(),
            food,
            bonus: None,
            score: 0,
            level: Level::One,
            points_since_bonus: 0,
            level_up_triggered: false,
            status: GameStatus::Menu,
            board,
            rng,
        }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Delay the outer loop should wait before the next tick.
    #[must_use]
    pub fn tick_delay(&self) -> Duration {
        self.tick_delay
    }

    #[must_use]
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        Snapshot::capture(self, now)
    }

    /// Advances the session by one tick at time `now`.
    pub fn tick(&mut self, now: Instant) {
        let next = match self.status {
            GameStatus::Playing => self.tick_playing(now),
            GameStatus::LevelUp { since } => self.tick_level_up(since, now),
            GameStatus::Countdown { since } => self.tick_countdown(since, now),
            GameStatus::Menu | GameStatus::Paused | GameStatus::GameOver { .. } => None,
        };

        if let Some(next) = next {
            self.transition(next, now);
        }
    }

    /// Applies one player intent.
    pub fn apply_input(&mut self, input: GameInput, now: Instant) {
        let next = match (input, self.status) {
            (
                GameInput::Direction(direction),
                GameStatus::Playing | GameStatus::Countdown { .. },
            ) => {
                self.snake.buffer_direction(direction);
                None
            }
            (GameInput::Pause, GameStatus::Playing) => Some(GameStatus::Paused),
            (GameInput::Pause, GameStatus::Paused) => Some(GameStatus::Playing),
            (GameInput::Start, GameStatus::Menu) => Some(GameStatus::Playing),
            (GameInput::Start, GameStatus::GameOver { .. }) => {
                self.restart();
                None
            }
            _ => None,
        };

        if let Some(next) = next {
            self.transition(next, now);
        }
    }

    /// Discards the finished run and returns to the menu, continuing the same
    /// random stream.
    fn restart(&mut self) {
        info!("restarting after game over with score {}", self.score);
        *self = Self::from_rng(self.board, self.rng.clone());
    }

    fn tick_playing(&mut self, now: Instant) -> Option<GameStatus> {
        self.snake.move_forward(self.board);

        if let Some(reason) = collision::detect_fatal(
            &self.snake,
            self.board,
            &self.obstacles,
            self.hazard.as_ref(),
        ) {
            return Some(GameStatus::GameOver { reason });
        }

        let head = self.snake.head();
        if collision::reaches(head, self.food.position) {
            self.eat_food();
            if !self.respawn_food() {
                return Some(GameStatus::GameOver {
                    reason: DeathReason::BoardFilled,
                });
            }
        }

        if let Some(bonus) = self.bonus {
            if collision::reaches(head, bonus.position) {
                self.eat_bonus(bonus);
            }
        }

        self.update_bonus(now);
        self.tick_delay = tick_delay_for_length(self.snake.len());

        if let Some(hazard) = self.hazard.as_mut() {
            hazard.update(&mut self.rng, self.board, &self.obstacles, now);
        }

        self.check_level_up(now)
    }

    fn tick_level_up(&self, since: Instant, now: Instant) -> Option<GameStatus> {
        (now.saturating_duration_since(since) >= LEVEL_UP_DISPLAY)
            .then_some(GameStatus::Countdown { since: now })
    }

    fn tick_countdown(&mut self, since: Instant, now: Instant) -> Option<GameStatus> {
        if now.saturating_duration_since(since) < COUNTDOWN_DURATION {
            return None;
        }

        self.level_up_triggered = false;
        Some(GameStatus::Playing)
    }

    fn eat_food(&mut self) {
        let points = self.food.points();
        self.score += points;
        self.points_since_bonus += points;
        self.snake.grow_next();
        debug!("food eaten at {:?}, score {}", self.food.position, self.score);
    }

    /// Places the next piece of food. Returns false when the board is full.
    fn respawn_food(&mut self) -> bool {
        let (snake, hazard, obstacles, bonus) =
            (&self.snake, &self.hazard, &self.obstacles, &self.bonus);
        let cell_size = self.board.cell_size;
        let spawned = Food::spawn(&mut self.rng, self.board, |cell| {
            snake.occupies(cell)
                || hazard.as_ref().is_some_and(|hazard| hazard.occupies(cell))
                || collision::hits_obstacle(cell, cell_size, obstacles)
                || bonus.is_some_and(|bonus| bonus.position == cell)
        });

        match spawned {
            Some(food) => {
                self.food = food;
                true
            }
            None => {
                warn!("no free cell left for food");
                false
            }
        }
    }

    fn eat_bonus(&mut self, bonus: Bonus) {
        self.score += bonus.points();
        self.snake.grow_next();
        self.bonus = None;
        self.points_since_bonus = 0;
        info!("banana eaten at {:?}, score {}", bonus.position, self.score);
    }

    /// Spawns a banana when pacing allows. A banana that expires this tick
    /// leaves the board empty until the next one.
    fn update_bonus(&mut self, now: Instant) {
        if let Some(bonus) = self.bonus {
            if bonus.is_expired(now) {
                self.bonus = None;
                info!("banana at {:?} expired", bonus.position);
                return;
            }
        }

        if !self.bonus_is_due() {
            return;
        }

        let (snake, hazard, obstacles, food) =
            (&self.snake, &self.hazard, &self.obstacles, self.food);
        let cell_size = self.board.cell_size;
        self.bonus = Bonus::spawn(&mut self.rng, self.board, now, |cell| {
            snake.occupies(cell)
                || hazard.as_ref().is_some_and(|hazard| hazard.occupies(cell))
                || collision::hits_obstacle(cell, cell_size, obstacles)
                || food.position == cell
        });

        if let Some(bonus) = self.bonus {
            info!("banana spawned at {:?}", bonus.position);
        }
    }

    /// True when no banana is out, the score is high enough and enough food
    /// was eaten since the last one.
    #[must_use]
    pub fn bonus_is_due(&self) -> bool {
        self.bonus.is_none()
            && self.score >= BONUS_MIN_SCORE
            && self.points_since_bonus >= BONUS_PACING_POINTS
    }

    fn check_level_up(&mut self, now: Instant) -> Option<GameStatus> {
        if self.level_up_triggered {
            return None;
        }

        let (next, threshold) = self.level.next()?;
        if self.score < threshold {
            return None;
        }

        self.level = next;
        self.level_up_triggered = true;
        info!("reached {} at score {}", self.level, self.score);
        self.enter_level(now);

        Some(GameStatus::LevelUp { since: now })
    }

    fn enter_level(&mut self, now: Instant) {
        if self.level.has_hazard() && self.hazard.is_none() {
            self.hazard = self.spawn_hazard(now);
        }

        if self.level == Level::Three {
            self.obstacles = self.spawn_obstacles();
        }
    }

    fn spawn_hazard(&mut self, now: Instant) -> Option<WanderingHazard> {
        let board = self.board;
        let (snake, obstacles, food, bonus) =
            (&self.snake, &self.obstacles, self.food, self.bonus);
        let ahead = snake.next_head_position(board);
        let is_taken = |cell: Position| {
            snake.occupies(cell)
                || cell == ahead
                || cell == food.position
                || bonus.is_some_and(|bonus| bonus.position == cell)
                || collision::hits_obstacle(cell, board.cell_size, obstacles)
        };

        let head = place_random(&mut self.rng, board, board.cell_size, |head| {
            WanderingHazard::body_from_head(head, HAZARD_LENGTH, board)
                .into_iter()
                .any(&is_taken)
        });

        let Some(head) = head else {
            warn!("no room to release the viper");
            return None;
        };

        let heading = Direction::random(&mut self.rng);
        info!("viper released at {head:?} heading {heading:?}");
        Some(WanderingHazard::new(
            WanderingHazard::body_from_head(head, HAZARD_LENGTH, board),
            heading,
            now,
            HAZARD_MOVE_INTERVAL,
        ))
    }

    fn spawn_obstacles(&mut self) -> Vec<Rect> {
        let board = self.board;
        let (snake, hazard, food, bonus) = (&self.snake, &self.hazard, self.food, self.bonus);
        let ahead = snake.next_head_position(board);

        let obstacles = generate_obstacles(
            &mut self.rng,
            board,
            OBSTACLE_SIZE,
            OBSTACLE_COUNT,
            |cell| {
                snake.occupies(cell)
                    || cell == ahead
                    || cell == food.position
                    || bonus.is_some_and(|bonus| bonus.position == cell)
                    || hazard.as_ref().is_some_and(|hazard| hazard.occupies(cell))
            },
        );

        info!("placed {} stones: {obstacles:?}", obstacles.len());
        obstacles
    }

    fn transition(&mut self, next: GameStatus, now: Instant) {
        info!("status {:?} -> {:?}", self.status, next);
        if let GameStatus::GameOver { reason } = next {
            info!(
                "game over: {} with score {} on {}",
                reason.describe(),
                self.score,
                self.level
            );
        }

        self.status = next;

        if log_enabled!(LogLevel::Debug) {
            match serde_json::to_string(&self.snapshot(now)) {
                Ok(json) => debug!("snapshot {json}"),
                Err(error) => warn!("failed to serialize snapshot: {error}"),
            }
        }
    }
}
