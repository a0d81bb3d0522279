use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::{BONUS_LIFETIME, BONUS_POINTS, FOOD_POINTS};
use crate::grid::{Board, Position};
use crate::placement::place_random;

/// The ordinary piece of food. Exactly one is on the board at all times.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        FOOD_POINTS
    }

    /// Spawns food on a free cell; `None` when the board is full.
    #[must_use]
    pub fn spawn<R, F>(rng: &mut R, board: Board, is_blocked: F) -> Option<Self>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        place_random(rng, board, board.cell_size, is_blocked).map(Self::new)
    }
}

/// A banana: worth more than food, but gone after a fixed lifetime.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Bonus {
    pub position: Position,
    pub spawned_at: Instant,
    pub lifetime: Duration,
}

impl Bonus {
    #[must_use]
    pub fn new(position: Position, spawned_at: Instant) -> Self {
        Self {
            position,
            spawned_at,
            lifetime: BONUS_LIFETIME,
        }
    }

    /// Spawns a banana on a free cell; `None` when the board is full.
    #[must_use]
    pub fn spawn<R, F>(rng: &mut R, board: Board, now: Instant, is_blocked: F) -> Option<Self>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        place_random(rng, board, board.cell_size, is_blocked).map(|cell| Self::new(cell, now))
    }

    #[must_use]
    pub fn points(self) -> u32 {
        BONUS_POINTS
    }

    /// Time left before the banana disappears.
    #[must_use]
    pub fn remaining(self, now: Instant) -> Duration {
        self.lifetime
            .saturating_sub(now.saturating_duration_since(self.spawned_at))
    }

    /// Returns true once the full lifetime has elapsed.
    #[must_use]
    pub fn is_expired(self, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned_at) >= self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{BONUS_LIFETIME, DEFAULT_BOARD};
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Bonus, Food};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(25, 0),
                Position::new(50, 0),
            ],
            Direction::Right,
        );

        for _ in 0..100 {
            let food = Food::spawn(&mut rng, DEFAULT_BOARD, |cell| snake.occupies(cell))
                .expect("board has free cells");
            assert!(!snake.occupies(food.position));
        }
    }

    #[test]
    fn bonus_expires_exactly_at_lifetime() {
        let spawned_at = Instant::now();
        let bonus = Bonus::new(Position::new(50, 50), spawned_at);

        assert!(!bonus.is_expired(spawned_at + BONUS_LIFETIME - Duration::from_millis(1)));
        assert!(bonus.is_expired(spawned_at + BONUS_LIFETIME));
        assert_eq!(bonus.remaining(spawned_at + Duration::from_secs(2)), Duration::from_secs(3));
        assert_eq!(bonus.remaining(spawned_at + Duration::from_secs(9)), Duration::ZERO);
    }

    #[test]
    fn bonus_is_worth_more_than_food() {
        let food = Food::new(Position::new(25, 25));
        let bonus = Bonus::new(Position::new(50, 50), Instant::now());

        assert_eq!(food.points(), 1);
        assert_eq!(bonus.points(), 3);
    }
}
