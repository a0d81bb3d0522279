use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::grid::{Board, Position, Rect};
use crate::input::Direction;

/// Odds (one in N) that the viper picks a fresh heading on an eligible tick.
const TURN_ODDS: u32 = 4;

/// The wandering viper: a fixed-length snake that drifts around a torus board
/// and steers clear of stones.
#[derive(Debug, Clone)]
pub struct WanderingHazard {
    segments: VecDeque<Position>,
    heading: Direction,
    last_move: Instant,
    move_interval: Duration,
}

impl WanderingHazard {
    /// Creates a viper from explicit segments (front is head).
    #[must_use]
    pub fn new(
        segments: Vec<Position>,
        heading: Direction,
        now: Instant,
        move_interval: Duration,
    ) -> Self {
        debug_assert!(!segments.is_empty(), "a viper needs at least a head");

        Self {
            segments: VecDeque::from(segments),
            heading,
            last_move: now,
            move_interval,
        }
    }

    /// Lays out a `length`-cell body trailing to the right of `head`, wrapped
    /// onto the board.
    #[must_use]
    pub fn body_from_head(head: Position, length: usize, board: Board) -> Vec<Position> {
        (0..length)
            .scan(head, |cell, _| {
                let current = *cell;
                *cell = cell.shifted(Direction::Right, board.cell_size).wrapped(board);
                Some(current)
            })
            .collect()
    }

    /// Runs one update: when the move interval has elapsed, maybe turns, then
    /// tries to advance. Returns true when the viper moved.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: Board,
        obstacles: &[Rect],
        now: Instant,
    ) -> bool {
        if !self.is_due(now) {
            return false;
        }

        if rng.gen_ratio(1, TURN_ODDS) {
            self.heading = Direction::random(rng);
        }

        self.try_advance(board, obstacles, now)
    }

    /// Returns true once strictly more than the move interval has passed since
    /// the last committed move.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_move) > self.move_interval
    }

    /// Moves one cell along the current heading, wrapping across edges.
    ///
    /// A candidate head that touches a stone aborts the move and leaves the
    /// timer untouched so the move is retried on the next eligible tick.
    pub fn try_advance(&mut self, board: Board, obstacles: &[Rect], now: Instant) -> bool {
        let candidate = self.head().shifted(self.heading, board.cell_size).wrapped(board);

        if obstacles
            .iter()
            .any(|obstacle| obstacle.overlaps_cell(candidate, board.cell_size))
        {
            return false;
        }

        self.segments.push_front(candidate);
        let _ = self.segments.pop_back();
        self.last_move = now;
        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .segments
            .front()
            .expect("viper must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::DEFAULT_BOARD;
    use crate::grid::{Position, Rect};
    use crate::input::Direction;

    use super::WanderingHazard;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn viper(head: Position, heading: Direction, now: Instant) -> WanderingHazard {
        WanderingHazard::new(
            WanderingHazard::body_from_head(head, 3, DEFAULT_BOARD),
            heading,
            now,
            INTERVAL,
        )
    }

    #[test]
    fn moving_left_from_left_edge_wraps_to_right_edge() {
        let start = Instant::now();
        let mut hazard = viper(Position::new(0, 100), Direction::Left, start);

        assert!(hazard.try_advance(DEFAULT_BOARD, &[], start));

        assert_eq!(hazard.head(), Position::new(775, 100));
        assert_eq!(hazard.len(), 3);
    }

    #[test]
    fn moving_up_from_top_edge_wraps_to_bottom_edge() {
        let start = Instant::now();
        let mut hazard = viper(Position::new(100, 0), Direction::Up, start);

        assert!(hazard.try_advance(DEFAULT_BOARD, &[], start));

        assert_eq!(hazard.head(), Position::new(100, 575));
    }

    #[test]
    fn body_layout_wraps_past_right_edge() {
        let body = WanderingHazard::body_from_head(Position::new(750, 0), 3, DEFAULT_BOARD);

        assert_eq!(
            body,
            vec![
                Position::new(750, 0),
                Position::new(775, 0),
                Position::new(0, 0)
            ]
        );
    }

    #[test]
    fn blocked_move_keeps_position_and_timer() {
        let start = Instant::now();
        let mut hazard = viper(Position::new(100, 100), Direction::Up, start);
        let stone = Rect::square(Position::new(100, 50), 50);
        let later = start + Duration::from_secs(1);

        assert!(!hazard.try_advance(DEFAULT_BOARD, &[stone], later));

        assert_eq!(hazard.head(), Position::new(100, 100));
        assert!(hazard.is_due(later));
    }

    #[test]
    fn update_waits_for_move_interval() {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(3);
        let mut hazard = viper(Position::new(400, 300), Direction::Right, start);

        assert!(!hazard.update(&mut rng, DEFAULT_BOARD, &[], start + INTERVAL));
        assert_eq!(hazard.head(), Position::new(400, 300));

        assert!(hazard.update(
            &mut rng,
            DEFAULT_BOARD,
            &[],
            start + INTERVAL + Duration::from_millis(1)
        ));
        assert_ne!(hazard.head(), Position::new(400, 300));
        assert!(!hazard.is_due(start + INTERVAL + Duration::from_millis(1)));
    }

    #[test]
    fn viper_keeps_fixed_length_while_wandering() {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(99);
        let mut hazard = viper(Position::new(400, 300), Direction::Down, start);
        let stones = [Rect::square(Position::new(200, 200), 50)];

        let mut now = start;
        for _ in 0..500 {
            now += Duration::from_millis(501);
            hazard.update(&mut rng, DEFAULT_BOARD, &stones, now);

            assert_eq!(hazard.len(), 3);
            assert!(hazard.segments().all(|cell| cell.is_within(DEFAULT_BOARD)));
            assert!(!stones[0].overlaps_cell(hazard.head(), DEFAULT_BOARD.cell_size));
        }
    }
}
