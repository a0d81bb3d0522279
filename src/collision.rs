//! Head-versus-world checks for the player snake. Every function is pure and
//! independent of the others; the session decides what a hit means.

use serde::Serialize;

use crate::grid::{Board, Position, Rect};
use crate::hazard::WanderingHazard;
use crate::snake::Snake;

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    ObstacleCollision,
    HazardCollision,
    /// No free cell was left for the next piece of food.
    BoardFilled,
}

impl DeathReason {
    /// Short player-facing description.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::WallCollision => "hit the wall",
            Self::SelfCollision => "bit yourself",
            Self::ObstacleCollision => "hit a stone",
            Self::HazardCollision => "ran into the viper",
            Self::BoardFilled => "no room left to grow",
        }
    }
}

#[must_use]
pub fn hits_boundary(head: Position, board: Board) -> bool {
    !head.is_within(board)
}

#[must_use]
pub fn hits_self(snake: &Snake) -> bool {
    snake.head_overlaps_body()
}

#[must_use]
pub fn hits_obstacle(head: Position, cell_size: i32, obstacles: &[Rect]) -> bool {
    obstacles
        .iter()
        .any(|obstacle| obstacle.overlaps_cell(head, cell_size))
}

#[must_use]
pub fn hits_hazard(head: Position, hazard: &WanderingHazard) -> bool {
    hazard.occupies(head)
}

/// Returns true when the head sits on `cell`. Used for food and bananas.
#[must_use]
pub fn reaches(head: Position, cell: Position) -> bool {
    head == cell
}

/// Runs every fatal check against the snake's head. `hazard` is `None` while
/// the viper is not active.
#[must_use]
pub fn detect_fatal(
    snake: &Snake,
    board: Board,
    obstacles: &[Rect],
    hazard: Option<&WanderingHazard>,
) -> Option<DeathReason> {
    let head = snake.head();

    if hits_boundary(head, board) {
        return Some(DeathReason::WallCollision);
    }
    if hits_self(snake) {
        return Some(DeathReason::SelfCollision);
    }
    if hits_obstacle(head, board.cell_size, obstacles) {
        return Some(DeathReason::ObstacleCollision);
    }
    if hazard.is_some_and(|hazard| hits_hazard(head, hazard)) {
        return Some(DeathReason::HazardCollision);
    }

    None
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::DEFAULT_BOARD;
    use crate::grid::{Position, Rect};
    use crate::hazard::WanderingHazard;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{DeathReason, detect_fatal, hits_boundary, reaches};

    #[test]
    fn every_off_board_neighbour_is_fatal() {
        let board = DEFAULT_BOARD;

        for head in [
            Position::new(-25, 300),
            Position::new(board.width, 300),
            Position::new(400, -25),
            Position::new(400, board.height),
        ] {
            assert!(hits_boundary(head, board));
            assert_eq!(
                detect_fatal(&Snake::new(head, Direction::Up), board, &[], None),
                Some(DeathReason::WallCollision)
            );
        }
    }

    #[test]
    fn head_on_any_body_cell_is_fatal() {
        let snake = Snake::from_segments(
            vec![
                Position::new(100, 100),
                Position::new(125, 100),
                Position::new(125, 125),
                Position::new(100, 125),
                Position::new(100, 100),
            ],
            Direction::Up,
        );

        assert_eq!(
            detect_fatal(&snake, DEFAULT_BOARD, &[], None),
            Some(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn head_inside_stone_is_fatal() {
        let snake = Snake::new(Position::new(225, 225), Direction::Up);
        let stones = [Rect::square(Position::new(200, 200), 50)];

        assert_eq!(
            detect_fatal(&snake, DEFAULT_BOARD, &stones, None),
            Some(DeathReason::ObstacleCollision)
        );
    }

    #[test]
    fn viper_only_counts_when_active() {
        let snake = Snake::new(Position::new(300, 300), Direction::Up);
        let hazard = WanderingHazard::new(
            vec![
                Position::new(275, 300),
                Position::new(300, 300),
                Position::new(325, 300),
            ],
            Direction::Left,
            Instant::now(),
            Duration::from_millis(500),
        );

        assert_eq!(detect_fatal(&snake, DEFAULT_BOARD, &[], None), None);
        assert_eq!(
            detect_fatal(&snake, DEFAULT_BOARD, &[], Some(&hazard)),
            Some(DeathReason::HazardCollision)
        );
    }

    #[test]
    fn collectible_match_is_exact_cell_equality() {
        assert!(reaches(Position::new(50, 75), Position::new(50, 75)));
        assert!(!reaches(Position::new(50, 75), Position::new(75, 75)));
    }
}
