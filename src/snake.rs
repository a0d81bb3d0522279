use std::collections::VecDeque;

use crate::grid::{Board, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Player snake: body cells (front is head) plus movement buffering.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    buffered_direction: Direction,
    next_buffered_direction: Option<Direction>,
    grow: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "a snake needs at least a head");

        Self {
            body: VecDeque::from(segments),
            direction,
            buffered_direction: direction,
            next_buffered_direction: None,
            grow: false,
        }
    }

    /// Queues growth on the next movement tick.
    pub fn grow_next(&mut self) {
        self.grow = true;
    }

    /// Returns true when the next advance will keep the tail.
    #[must_use]
    pub fn is_growing(&self) -> bool {
        self.grow
    }

    /// Prepends a head one cell away in `direction`. The tail is dropped unless
    /// growth was queued, in which case the queued growth is consumed.
    ///
    /// Bounds are not checked here; leaving the board is a collision.
    pub fn advance(&mut self, direction: Direction, cell_size: i32) {
        let next_head = self.head().shifted(direction, cell_size);

        self.body.push_front(next_head);
        if !self.grow {
            let _ = self.body.pop_back();
        }
        self.grow = false;
    }

    /// Applies one buffered movement step.
    pub fn move_forward(&mut self, board: Board) {
        self.direction = self.buffered_direction;

        if let Some(next) = self.next_buffered_direction.take() {
            self.buffered_direction = next;
        }

        self.advance(self.direction, board.cell_size);
    }

    /// Buffers the next direction, supporting a two-deep queue for quick turns.
    ///
    /// With no turn queued, the direction becomes the primary buffered
    /// direction unless it reverses the current heading. With a turn already
    /// queued, a second direction is stored (last input wins) unless it
    /// reverses the queued one.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if self.buffered_direction == self.direction {
            if direction_change_is_valid(self.direction, direction) {
                self.buffered_direction = direction;
            }
        } else if direction_change_is_valid(self.buffered_direction, direction) {
            self.next_buffered_direction = Some(direction);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the cell the head will enter on the next buffered move.
    #[must_use]
    pub fn next_head_position(&self, board: Board) -> Position {
        self.head().shifted(self.buffered_direction, board.cell_size)
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DEFAULT_BOARD;
    use crate::grid::Position;
    use crate::input::Direction;

    use super::Snake;

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position::new(400, 300), Direction::Right);

        snake.move_forward(DEFAULT_BOARD);

        assert_eq!(snake.head(), Position::new(425, 300));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_previous_tail_once() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right);

        snake.grow_next();
        snake.advance(Direction::Right, 25);
        assert_eq!(snake.len(), 2);
        assert!(!snake.is_growing());

        snake.advance(Direction::Right, 25);
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![Position::new(150, 100), Position::new(125, 100)]
        );
    }

    #[test]
    fn advance_does_not_clamp_to_board() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Left);

        snake.advance(Direction::Left, 25);

        assert_eq!(snake.head(), Position::new(-25, 0));
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Up);

        snake.buffer_direction(Direction::Down);
        snake.move_forward(DEFAULT_BOARD);

        assert_eq!(snake.head(), Position::new(100, 75));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn direction_buffer_two_deep_queue() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Down);

        snake.buffer_direction(Direction::Right);
        snake.buffer_direction(Direction::Up);

        snake.move_forward(DEFAULT_BOARD);
        assert_eq!(snake.head(), Position::new(125, 100));

        snake.move_forward(DEFAULT_BOARD);
        assert_eq!(snake.head(), Position::new(125, 75));
    }

    #[test]
    fn direction_buffer_second_slot_uses_last_input() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Down);

        snake.buffer_direction(Direction::Right);
        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);

        snake.move_forward(DEFAULT_BOARD);
        assert_eq!(snake.head(), Position::new(125, 100));

        snake.move_forward(DEFAULT_BOARD);
        assert_eq!(snake.head(), Position::new(125, 125));
    }

    #[test]
    fn direction_buffer_rejects_reversal_of_queued_direction() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Down);

        snake.buffer_direction(Direction::Right);
        snake.buffer_direction(Direction::Left);

        assert!(snake.next_buffered_direction.is_none());
    }

    #[test]
    fn quick_turns_never_fold_the_snake_onto_its_neck() {
        let mut snake = Snake::from_segments(
            vec![Position::new(100, 100), Position::new(75, 100)],
            Direction::Right,
        );

        snake.buffer_direction(Direction::Left);
        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Left);
        snake.move_forward(DEFAULT_BOARD);

        assert!(!snake.head_overlaps_body());
        assert_eq!(snake.head(), Position::new(100, 75));
    }

    #[test]
    fn head_overlap_detection_skips_head() {
        let coiled = Snake::from_segments(
            vec![
                Position::new(50, 50),
                Position::new(75, 50),
                Position::new(75, 75),
                Position::new(50, 75),
                Position::new(50, 50),
            ],
            Direction::Up,
        );
        let straight = Snake::new(Position::new(50, 50), Direction::Up);

        assert!(coiled.head_overlaps_body());
        assert!(!straight.head_overlaps_body());
    }
}
